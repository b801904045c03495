//! View components: extension pages with their own window context.
//!
//! A component registers a named connection point first. When its page has
//! loaded, the extension performs the handshake by sending a
//! [`HostEvent::Connect`](crate::host::HostEvent::Connect) carrying the
//! [`View`] handle; the component's [`ViewComponent::on_load`] then runs
//! exactly once.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Handle to a view's window context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_id: Option<i32>,
}

pub trait ViewComponent {
    /// Called once the view handle is available.
    fn on_load(&mut self, view: &View);
}

struct Slot {
    component: Box<dyn ViewComponent>,
    view: Option<View>,
}

/// Named connection points awaiting (or past) their handshake.
#[derive(Default)]
pub struct ConnectionPoints {
    slots: HashMap<String, Slot>,
}

impl ConnectionPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Establish the connection point `name` for `component`.
    pub fn connect<C>(&mut self, name: impl Into<String>, component: C) -> Result<()>
    where
        C: ViewComponent + 'static,
    {
        let name = name.into();
        if self.slots.contains_key(&name) {
            return Err(Error::DuplicateConnection(name));
        }
        debug!(%name, "connection point registered");
        self.slots.insert(
            name,
            Slot {
                component: Box::new(component),
                view: None,
            },
        );
        Ok(())
    }

    /// Deliver `view` to the component behind `name` and run its `on_load`.
    pub fn handshake(&mut self, name: &str, view: View) -> Result<()> {
        let slot = self
            .slots
            .get_mut(name)
            .ok_or_else(|| Error::UnknownConnection(name.to_string()))?;
        if slot.view.is_some() {
            return Err(Error::AlreadyLoaded(name.to_string()));
        }
        let view = slot.view.insert(view);
        slot.component.on_load(view);
        debug!(name, "view loaded");
        Ok(())
    }

    pub fn view(&self, name: &str) -> Option<&View> {
        self.slots.get(name).and_then(|slot| slot.view.as_ref())
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.view(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for ConnectionPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|(name, slot)| (name, &slot.view)))
            .finish()
    }
}
