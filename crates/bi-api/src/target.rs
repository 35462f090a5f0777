//! Event target collaborator
//!
//! The drill pipeline notifies the host twice per interaction: through the
//! registered callback and through a DOM-style custom event dispatched on a
//! caller-supplied target. The target is whatever the host wants it to be, a
//! wrapped DOM node in a web embedding or a plain in-process sink elsewhere.

use serde_json::Value;

/// A DOM-style custom event
#[derive(Debug, Clone, PartialEq)]
pub struct CustomEvent {
    /// Event name, e.g. `"drill"`
    pub name: String,

    /// Whether the event bubbles up the host's element tree
    pub bubbles: bool,

    /// Whether a handler may cancel the event
    pub cancelable: bool,

    /// Arbitrary payload attached to the event
    pub detail: Value,
}

impl CustomEvent {
    /// A bubbling, cancelable event carrying `detail`
    pub fn bubbling(name: impl Into<String>, detail: Value) -> Self {
        Self {
            name: name.into(),
            bubbles: true,
            cancelable: true,
            detail,
        }
    }
}

/// Receiver of custom events
pub trait EventTarget: Send + Sync {
    /// Dispatch an event to the host
    ///
    /// Returns `false` when a handler cancelled a cancelable event, `true`
    /// otherwise, matching DOM dispatch semantics.
    fn dispatch_event(&self, event: CustomEvent) -> bool;
}
