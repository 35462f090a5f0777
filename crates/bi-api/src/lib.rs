//! Embedding surface of the dashboard platform
//!
//! This crate defines how the dashboard talks to its host: the event target
//! that receives bubbled notifications, the plugin API used to register
//! listeners and middleware, and the layout/color configuration vocabulary.
//! It is interface scaffolding; the dashboard behavior behind these surfaces
//! lives in the hosting application.

pub mod api;
pub mod color;
pub mod events;
pub mod layout;
pub mod middleware;
pub mod target;

// Re-export commonly used types
pub use api::{DashboardApi, DashboardElement, ElementAction, FiltersApi};
pub use color::{ColorAssignment, ColorSelector};
pub use events::{
    DashboardContext, DashboardEvent, DashboardEventBus, DashboardEventKind,
    DashboardEventListener, ElementRef,
};
pub use layout::{LayoutApi, LayoutColumn, LayoutRow};
pub use middleware::{Middleware, MiddlewareInput, VisData};
pub use target::{CustomEvent, EventTarget};
