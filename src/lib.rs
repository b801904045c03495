//! # chrome_ext
//!
//! Drive a Chrome extension from a native Rust process:
//!
//! - A closed, ordered **JSON value model** ([`json::JsonValue`]) for manifest and
//!   command data
//! - The **browser action** control surface (icon, badge, title, click listeners)
//!   behind a narrow [`HostPlatform`] adapter
//! - **View components** that receive their window context through a one-shot
//!   handshake
//! - **Manifest descriptors** for the browser action and NPAPI plugins, validated
//!   and written as `manifest.json`
//!
//! The browser owns everything visual: badge rendering, icon display and window
//! lifecycle. This crate only issues the calls and routes the events.
//!
//! ---
//!
//! ## How calls reach the browser
//!
//! The stock adapter, [`FramedHost`], speaks Chrome's native-messaging protocol:
//!
//! 1. A **4-byte length prefix** (`u32`) in **native endianness**.
//! 2. Then **that many bytes** of UTF-8 JSON.
//!
//! Every browser-action call becomes one frame on stdout:
//!
//! ```json
//! {"type":"call","api":"browserAction.setBadgeText","args":{"tabId":7,"text":"3"}}
//! ```
//!
//! The extension's background page applies it with `chrome.browserAction.*` and
//! forwards events back on stdin:
//!
//! ```json
//! {"type":"clicked"}
//! {"type":"connect","name":"popup","view":{"url":"chrome-extension://id/popup.html"}}
//! {"type":"error","api":"browserAction.setIcon","message":"Could not load icon"}
//! ```
//!
//! ### Gotchas
//!
//! - **Never log to stdout:** stdout carries protocol frames. The crate logs through
//!   `tracing`; install a subscriber that writes to stderr.
//! - **Disconnect is normal:** when the browser closes stdin, [`host::serve`] returns `Ok(())`.
//! - **Message limits:** host → browser is capped at 1 MiB ([`host::MAX_TO_BROWSER`]),
//!   browser → host at 64 MiB ([`host::MAX_FROM_BROWSER`]).
//!
//! ---
//!
//! ## Crate layout
//!
//! - [`json`] — `JsonValue`, the shared [`json::NULL`], ordered objects.
//! - [`action`] — [`HostPlatform`], [`FramedHost`], [`BrowserAction`].
//! - [`view`] — [`View`], [`ViewComponent`], [`ConnectionPoints`].
//! - [`host`] — framing, [`host::HostEvent`], dispatch and the async stdio loop.
//! - [`manifest`] — [`ExtensionManifest`] and friends, TOML loading.
//!
//! ---
//!
//! ## Quick start
//!
//! ```no_run
//! use chrome_ext::{
//!     host, BadgeColor, BrowserAction, BrowserActionInfo, ConnectionPoints, FramedHost,
//!     HostPlatform, View, ViewComponent,
//! };
//!
//! struct Popup;
//!
//! impl ViewComponent for Popup {
//!     fn on_load(&mut self, view: &View) {
//!         tracing::info!(url = ?view.url, "popup ready");
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), chrome_ext::Error> {
//!     let info = BrowserActionInfo {
//!         default_icon: "icon.png".into(),
//!         name: "Counter".into(),
//!         popup: Some("popup.html".into()),
//!     };
//!     let mut action = BrowserAction::new(info, FramedHost::stdout());
//!     action.set_badge_background_color(BadgeColor::new(200, 0, 0, 255))?;
//!
//!     let mut clicks = 0u32;
//!     action.add_listener(move |host| {
//!         clicks += 1;
//!         host.set_badge_text(None, &clicks.to_string())
//!     });
//!
//!     let mut points = ConnectionPoints::new();
//!     points.connect("popup", Popup)?;
//!
//!     host::serve(&mut action, &mut points).await
//! }
//! ```
//!
//! ## Writing the manifest
//!
//! ```rust
//! use chrome_ext::{BrowserActionInfo, ExtensionManifest, PluginInfo};
//!
//! let manifest = ExtensionManifest {
//!     name: "Counter".into(),
//!     version: "1.0".into(),
//!     description: None,
//!     browser_action: Some(BrowserActionInfo {
//!         default_icon: "icon.png".into(),
//!         name: "Counter".into(),
//!         popup: None,
//!     }),
//!     plugins: vec![PluginInfo { path: "plugin.so".into(), public: false }],
//! };
//!
//! let mut out = Vec::new();
//! manifest.write(&mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     r#"{"name":"Counter","version":"1.0","browser_action":{"default_icon":"icon.png","name":"Counter"},"plugins":[{"path":"plugin.so","public":false}]}"#
//! );
//! ```

pub mod action;
pub mod error;
pub mod host;
pub mod json;
pub mod manifest;
pub mod view;

#[doc(inline)]
pub use action::{BadgeColor, BrowserAction, FramedHost, HostPlatform, Icon, TabId};
#[doc(inline)]
pub use error::{Error, HostApiError, Result};
#[doc(inline)]
pub use json::{JsonKind, JsonObject, JsonValue};
#[doc(inline)]
pub use manifest::{write_manifest, BrowserActionInfo, ExtensionManifest, PluginInfo};
#[doc(inline)]
pub use view::{ConnectionPoints, View, ViewComponent};
