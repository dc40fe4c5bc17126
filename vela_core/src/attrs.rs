// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pass-through attributes attached to marks.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;

use smallvec::SmallVec;

use crate::MarkId;

/// A named interaction handler forwarded to the renderer.
///
/// The pipeline never invokes handlers; it only carries them to the mark they were attached to.
#[derive(Clone)]
pub struct EventHandler {
    /// Event name (for example `"click"` or `"focus"`).
    pub event: String,
    /// Callback receiving the id of the mark that fired.
    pub callback: Arc<dyn Fn(MarkId) + Send + Sync>,
}

impl EventHandler {
    /// Creates a handler for `event`.
    pub fn new(
        event: impl Into<String>,
        callback: impl Fn(MarkId) + Send + Sync + 'static,
    ) -> Self {
        Self {
            event: event.into(),
            callback: Arc::new(callback),
        }
    }

    /// Invokes the callback.
    pub fn fire(&self, id: MarkId) {
        (self.callback)(id);
    }
}

impl core::fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventHandler")
            .field("event", &self.event)
            .field("callback", &"<fn>")
            .finish()
    }
}

/// Attributes a renderer forwards to its output (accessibility, focus order, handlers).
#[derive(Clone, Debug, Default)]
pub struct Attrs {
    /// Accessible label.
    pub aria_label: Option<String>,
    /// Keyboard focus order.
    ///
    /// Fractional values are allowed and order between integer slots.
    pub tab_index: Option<f64>,
    /// Accessibility role (for example `"presentation"`).
    pub role: Option<String>,
    /// Interaction handlers.
    pub handlers: SmallVec<[EventHandler; 2]>,
}

impl Attrs {
    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.aria_label.is_none()
            && self.tab_index.is_none()
            && self.role.is_none()
            && self.handlers.is_empty()
    }

    /// Returns the handlers registered for `event`.
    pub fn handlers_for<'a>(&'a self, event: &'a str) -> impl Iterator<Item = &'a EventHandler> {
        self.handlers.iter().filter(move |h| h.event == event)
    }
}
