#![allow(dead_code)]

use chrome_ext::host::{decode_message, MAX_FROM_BROWSER};
use chrome_ext::{BadgeColor, HostPlatform, Icon, TabId};
use std::io::Cursor;

/// A host call as seen by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Icon(Option<TabId>, String),
    BadgeColor(Option<TabId>, BadgeColor),
    BadgeText(Option<TabId>, String),
    Title(Option<TabId>, String),
}

/// Records every call instead of talking to a browser.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<Call>,
}

impl HostPlatform for RecordingHost {
    fn set_icon(&mut self, tab: Option<TabId>, icon: &Icon) -> chrome_ext::Result<()> {
        self.calls.push(Call::Icon(tab, icon.path().to_string()));
        Ok(())
    }

    fn set_badge_background_color(
        &mut self,
        tab: Option<TabId>,
        color: BadgeColor,
    ) -> chrome_ext::Result<()> {
        self.calls.push(Call::BadgeColor(tab, color));
        Ok(())
    }

    fn set_badge_text(&mut self, tab: Option<TabId>, text: &str) -> chrome_ext::Result<()> {
        self.calls.push(Call::BadgeText(tab, text.to_string()));
        Ok(())
    }

    fn set_title(&mut self, tab: Option<TabId>, title: &str) -> chrome_ext::Result<()> {
        self.calls.push(Call::Title(tab, title.to_string()));
        Ok(())
    }
}

/// Split a byte stream of frames back into their JSON bodies.
pub fn decode_frames(bytes: &[u8]) -> Vec<serde_json::Value> {
    let mut cur = Cursor::new(bytes);
    let mut out = Vec::new();
    while (cur.position() as usize) < bytes.len() {
        let raw = decode_message(&mut cur, MAX_FROM_BROWSER).expect("frame");
        out.push(serde_json::from_str(&raw).expect("json"));
    }
    out
}
