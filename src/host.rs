//! Native-messaging framing and host event handling.
//!
//! The extension's background page and this process exchange frames over
//! stdio: a 4-byte native-endian length followed by that many bytes of UTF-8
//! JSON. Outgoing frames carry browser-action calls (see
//! [`FramedHost`](crate::action::FramedHost)); incoming frames carry
//! [`HostEvent`]s.

use crate::action::{BrowserAction, HostPlatform};
use crate::error::{HostApiError, Result};
use crate::view::{ConnectionPoints, View};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use tracing::{debug, trace};

pub const MAX_TO_BROWSER: usize = 1_048_576; // 1 MB (host -> browser)
pub const MAX_FROM_BROWSER: usize = 64 * 1_048_576; // 64 MB (browser -> host)

#[inline]
fn read_exact_u32_len<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut len_buf = [0u8; 4];
    r.read_exact(&mut len_buf)?;
    Ok(u32::from_ne_bytes(len_buf))
}

/// Encode any serde-serializable value into the native-messaging frame:
/// 4-byte native-endian length + JSON bytes.
pub fn encode_message<T: Serialize + ?Sized>(msg: &T) -> io::Result<Vec<u8>> {
    let json = serde_json::to_vec(msg)?;
    if json.len() > MAX_TO_BROWSER {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "outgoing message exceeds 1MB",
        ));
    }
    let mut out = Vec::with_capacity(4 + json.len());
    out.extend_from_slice(&(json.len() as u32).to_ne_bytes());
    out.extend_from_slice(&json);
    Ok(out)
}

/// Decode a single framed message from a reader.
pub fn decode_message<R: Read>(reader: &mut R, max_size: usize) -> io::Result<String> {
    let len = read_exact_u32_len(&mut *reader)? as usize;
    let cap = max_size.min(MAX_FROM_BROWSER);
    if len > cap {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "incoming message too large",
        ));
    }
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    trace!(len, "decoded frame");
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Events the extension forwards to the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// `chrome.browserAction.onClicked` fired.
    Clicked,
    /// A view component finished loading and hands over its window context.
    Connect { name: String, view: View },
    /// A previous call failed inside the browser.
    Error { api: String, message: String },
}

pub fn parse_event(raw: &str) -> Result<HostEvent> {
    Ok(serde_json::from_str(raw)?)
}

/// Apply one incoming event.
///
/// Clicks run the browser action's listeners, handshakes go to the matching
/// connection point, and browser-reported failures come back as
/// [`Error::HostApi`](crate::Error::HostApi).
pub fn dispatch<H: HostPlatform>(
    event: HostEvent,
    action: &mut BrowserAction<H>,
    points: &mut ConnectionPoints,
) -> Result<()> {
    match event {
        HostEvent::Clicked => {
            let ran = action.dispatch_click()?;
            debug!(listeners = ran, "browser action clicked");
            Ok(())
        }
        HostEvent::Connect { name, view } => points.handshake(&name, view),
        HostEvent::Error { api, message } => Err(HostApiError { api, message }.into()),
    }
}

#[cfg(feature = "tokio")]
pub use self::stdio::{event_loop, event_loop_from, get_message, send_message, serve, serve_from};

#[cfg(feature = "tokio")]
mod stdio {
    use super::*;
    use std::io::Write;

    fn join_error(e: tokio::task::JoinError) -> io::Error {
        io::Error::new(io::ErrorKind::Other, e)
    }

    /// Read one frame on the blocking pool, handing the reader back.
    async fn next_frame<R>(mut reader: R) -> io::Result<(R, io::Result<String>)>
    where
        R: Read + Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let msg = decode_message(&mut reader, MAX_FROM_BROWSER);
            (reader, msg)
        })
        .await
        .map_err(join_error)
    }

    pub async fn get_message() -> io::Result<String> {
        let (_, msg) = next_frame(io::stdin()).await?;
        msg
    }

    pub async fn send_message<T: Serialize>(msg: &T) -> io::Result<()> {
        let frame = encode_message(msg)?;
        tokio::task::spawn_blocking(move || {
            let mut stdout = io::stdout();
            stdout.write_all(&frame)?;
            stdout.flush()?;
            Ok(())
        })
        .await
        .map_err(join_error)?
    }

    /// Read raw messages until the browser closes stdin.
    pub async fn event_loop<F, Fut>(handler: F) -> io::Result<()>
    where
        F: FnMut(String) -> Fut,
        Fut: std::future::Future<Output = io::Result<()>>,
    {
        event_loop_from(io::stdin(), handler).await
    }

    /// [`event_loop`] over any reader. EOF ends the loop with `Ok(())`.
    pub async fn event_loop_from<R, F, Fut>(mut reader: R, mut handler: F) -> io::Result<()>
    where
        R: Read + Send + 'static,
        F: FnMut(String) -> Fut,
        Fut: std::future::Future<Output = io::Result<()>>,
    {
        loop {
            let (r, msg) = next_frame(reader).await?;
            reader = r;
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    debug!("input closed");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };
            handler(msg).await?;
        }
    }

    /// Drive a browser action and its view components from stdin events.
    ///
    /// Returns `Ok(())` when the browser disconnects. The first malformed event
    /// or browser-reported failure stops the loop and is returned.
    pub async fn serve<H: HostPlatform>(
        action: &mut BrowserAction<H>,
        points: &mut ConnectionPoints,
    ) -> Result<()> {
        serve_from(io::stdin(), action, points).await
    }

    /// [`serve`] over any reader of framed events.
    pub async fn serve_from<R, H>(
        mut reader: R,
        action: &mut BrowserAction<H>,
        points: &mut ConnectionPoints,
    ) -> Result<()>
    where
        R: Read + Send + 'static,
        H: HostPlatform,
    {
        loop {
            let (r, raw) = next_frame(reader).await?;
            reader = r;
            let raw = match raw {
                Ok(raw) => raw,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    debug!("input closed");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            let event = parse_event(&raw)?;
            dispatch(event, action, points)?;
        }
    }
}
