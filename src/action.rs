//! Browser action control surface (`chrome.browserAction.*`).
//!
//! [`HostPlatform`] is the narrow adapter between this crate and whatever
//! actually talks to the browser. [`FramedHost`] is the stock adapter: it
//! forwards every call as a native-messaging frame to the extension, whose
//! background page applies it.
//!
//! Tab-scoped setters reset on their own when the tab closes. That is done by
//! the browser, not here.

use crate::error::Result;
use crate::host::encode_message;
use crate::json::{JsonObject, JsonValue};
use crate::manifest::BrowserActionInfo;
use std::fmt;
use std::io::{self, Write};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub i32);

/// Path of an image bundled with the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    path: String,
}

impl Icon {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Badge background color as RGBA bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BadgeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl BadgeColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<BadgeColor> for JsonValue {
    fn from(c: BadgeColor) -> Self {
        JsonValue::Array(vec![c.r.into(), c.g.into(), c.b.into(), c.a.into()])
    }
}

/// One method per host capability. `tab` limits the change to that tab.
pub trait HostPlatform {
    fn set_icon(&mut self, tab: Option<TabId>, icon: &Icon) -> Result<()>;

    fn set_badge_background_color(&mut self, tab: Option<TabId>, color: BadgeColor)
        -> Result<()>;

    fn set_badge_text(&mut self, tab: Option<TabId>, text: &str) -> Result<()>;

    fn set_title(&mut self, tab: Option<TabId>, title: &str) -> Result<()>;
}

impl<H: HostPlatform + ?Sized> HostPlatform for &mut H {
    fn set_icon(&mut self, tab: Option<TabId>, icon: &Icon) -> Result<()> {
        (**self).set_icon(tab, icon)
    }

    fn set_badge_background_color(
        &mut self,
        tab: Option<TabId>,
        color: BadgeColor,
    ) -> Result<()> {
        (**self).set_badge_background_color(tab, color)
    }

    fn set_badge_text(&mut self, tab: Option<TabId>, text: &str) -> Result<()> {
        (**self).set_badge_text(tab, text)
    }

    fn set_title(&mut self, tab: Option<TabId>, title: &str) -> Result<()> {
        (**self).set_title(tab, title)
    }
}

/// Sends each call as a framed `{"type":"call","api":..,"args":{..}}` command.
///
/// Writes are synchronous: a call blocks until the frame is flushed. Inside
/// [`serve`](crate::host::serve) that happens on the runtime thread, which is
/// fine for the small frames browser-action calls produce; for bulk output
/// use [`send_message`](crate::host::send_message), which writes on the
/// blocking pool.
#[derive(Debug)]
pub struct FramedHost<W> {
    writer: W,
}

impl FramedHost<io::Stdout> {
    /// Adapter writing to the process stdout, as Chrome expects of a native host.
    /// Each call blocks until its frame is flushed.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> FramedHost<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn call<const N: usize>(
        &mut self,
        api: &str,
        tab: Option<TabId>,
        fields: [(&str, JsonValue); N],
    ) -> Result<()> {
        let mut args = JsonObject::new();
        if let Some(TabId(id)) = tab {
            args.insert("tabId", id);
        }
        for (key, value) in fields {
            args.insert(key, value);
        }

        let mut command = JsonObject::new();
        command.insert("type", "call");
        command.insert("api", api);
        command.insert("args", args);

        let frame = encode_message(&JsonValue::Object(command))?;
        self.writer.write_all(&frame)?;
        self.writer.flush()?;
        trace!(api, bytes = frame.len(), "sent host call");
        Ok(())
    }
}

impl<W: Write> HostPlatform for FramedHost<W> {
    fn set_icon(&mut self, tab: Option<TabId>, icon: &Icon) -> Result<()> {
        self.call("browserAction.setIcon", tab, [("path", icon.path().into())])
    }

    fn set_badge_background_color(
        &mut self,
        tab: Option<TabId>,
        color: BadgeColor,
    ) -> Result<()> {
        self.call(
            "browserAction.setBadgeBackgroundColor",
            tab,
            [("color", color.into())],
        )
    }

    fn set_badge_text(&mut self, tab: Option<TabId>, text: &str) -> Result<()> {
        self.call("browserAction.setBadgeText", tab, [("text", text.into())])
    }

    fn set_title(&mut self, tab: Option<TabId>, title: &str) -> Result<()> {
        self.call("browserAction.setTitle", tab, [("title", title.into())])
    }
}

type ClickListener<H> = Box<dyn FnMut(&mut H) -> Result<()>>;

/// A toolbar button declared in the manifest and driven through a host adapter.
pub struct BrowserAction<H> {
    info: BrowserActionInfo,
    host: H,
    listeners: Vec<ClickListener<H>>,
}

impl<H: HostPlatform> BrowserAction<H> {
    pub fn new(info: BrowserActionInfo, host: H) -> Self {
        Self {
            info,
            host,
            listeners: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn info(&self) -> &BrowserActionInfo {
        &self.info
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn set_icon(&mut self, icon: &Icon) -> Result<()> {
        self.host.set_icon(None, icon)
    }

    pub fn set_icon_for_tab(&mut self, tab: TabId, icon: &Icon) -> Result<()> {
        self.host.set_icon(Some(tab), icon)
    }

    pub fn set_badge_background_color(&mut self, color: BadgeColor) -> Result<()> {
        self.host.set_badge_background_color(None, color)
    }

    pub fn set_badge_background_color_for_tab(
        &mut self,
        tab: TabId,
        color: BadgeColor,
    ) -> Result<()> {
        self.host.set_badge_background_color(Some(tab), color)
    }

    pub fn set_badge_text(&mut self, text: &str) -> Result<()> {
        self.host.set_badge_text(None, text)
    }

    pub fn set_badge_text_for_tab(&mut self, tab: TabId, text: &str) -> Result<()> {
        self.host.set_badge_text(Some(tab), text)
    }

    /// Sets the tooltip shown when the button is moused over.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.host.set_title(None, title)
    }

    pub fn set_title_for_tab(&mut self, tab: TabId, title: &str) -> Result<()> {
        self.host.set_title(Some(tab), title)
    }

    /// Subscribe to clicks. Listeners get the host adapter so they can update
    /// the button in response.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&mut H) -> Result<()> + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Run every listener in subscription order and return how many ran.
    /// Stops at the first listener error.
    pub fn dispatch_click(&mut self) -> Result<usize> {
        for listener in &mut self.listeners {
            listener(&mut self.host)?;
        }
        Ok(self.listeners.len())
    }
}

impl<H: fmt::Debug> fmt::Debug for BrowserAction<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserAction")
            .field("info", &self.info)
            .field("host", &self.host)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
