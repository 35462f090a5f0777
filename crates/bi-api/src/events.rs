//! Dashboard lifecycle events and their bus

use std::sync::Arc;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Identity of the dashboard a plugin runs inside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardContext {
    pub project_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    pub user_id: String,
}

/// Reference to an addressable dashboard element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRef {
    pub identifier: String,
}

impl ElementRef {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

/// Kinds of dashboard lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DashboardEventKind {
    /// A single element finished initializing
    ElementInitialized,
    /// A single element finished rendering
    ElementRendered,
    /// The whole dashboard finished rendering
    DashboardRendered,
}

/// One dashboard lifecycle event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardEvent {
    pub context: DashboardContext,

    /// Element the event concerns; absent for dashboard-wide events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<ElementRef>,

    pub kind: DashboardEventKind,

    pub timestamp: DateTime<Utc>,
}

impl DashboardEvent {
    pub fn new(context: DashboardContext, kind: DashboardEventKind) -> Self {
        Self {
            context,
            element: None,
            kind,
            timestamp: Utc::now(),
        }
    }

    pub fn for_element(
        context: DashboardContext,
        element: ElementRef,
        kind: DashboardEventKind,
    ) -> Self {
        Self {
            context,
            element: Some(element),
            kind,
            timestamp: Utc::now(),
        }
    }
}

/// Listener invoked for dashboard events
pub type DashboardEventListener = Box<dyn Fn(&DashboardEvent) + Send + Sync>;

/// Fan-out of dashboard events to registered listeners
///
/// Listeners subscribe either to one event kind or to everything. The bus is
/// cheaply cloneable; clones share the same registry.
#[derive(Clone, Default)]
pub struct DashboardEventBus {
    by_kind: Arc<Mutex<AHashMap<DashboardEventKind, Vec<DashboardEventListener>>>>,
    catch_all: Arc<Mutex<Vec<DashboardEventListener>>>,
}

impl DashboardEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events of one kind
    pub fn subscribe(&self, kind: DashboardEventKind, listener: DashboardEventListener) {
        self.by_kind.lock().entry(kind).or_default().push(listener);
    }

    /// Subscribe to every event
    pub fn subscribe_all(&self, listener: DashboardEventListener) {
        self.catch_all.lock().push(listener);
    }

    /// Deliver an event to kind-scoped and catch-all listeners
    pub fn publish(&self, event: &DashboardEvent) {
        tracing::trace!(kind = ?event.kind, "publishing dashboard event");

        let by_kind = self.by_kind.lock();
        if let Some(listeners) = by_kind.get(&event.kind) {
            for listener in listeners {
                listener(event);
            }
        }
        drop(by_kind);

        for listener in self.catch_all.lock().iter() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn context() -> DashboardContext {
        DashboardContext {
            project_id: "project-1".to_string(),
            client_id: None,
            user_id: "user-1".to_string(),
        }
    }

    #[test]
    fn test_kind_scoped_delivery() {
        let bus = DashboardEventBus::new();
        let rendered = Arc::new(AtomicUsize::new(0));

        let seen = rendered.clone();
        bus.subscribe(
            DashboardEventKind::DashboardRendered,
            Box::new(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            }),
        );

        bus.publish(&DashboardEvent::new(
            context(),
            DashboardEventKind::ElementRendered,
        ));
        assert_eq!(rendered.load(Ordering::SeqCst), 0);

        bus.publish(&DashboardEvent::new(
            context(),
            DashboardEventKind::DashboardRendered,
        ));
        assert_eq!(rendered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_catch_all_sees_every_kind() {
        let bus = DashboardEventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let count = seen.clone();
        bus.subscribe_all(Box::new(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        }));

        bus.publish(&DashboardEvent::new(
            context(),
            DashboardEventKind::ElementInitialized,
        ));
        bus.publish(&DashboardEvent::for_element(
            context(),
            ElementRef::new("vis-1"),
            DashboardEventKind::ElementRendered,
        ));

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
