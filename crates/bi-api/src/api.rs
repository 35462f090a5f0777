//! Plugin API surface
//!
//! A plugin receives a [`DashboardApi`] when it is initialized and uses it to
//! register listeners and middleware or to manipulate the layout. The traits
//! here are the contract between plugin and host; every implementation lives
//! on the host side.

use crate::events::DashboardEventListener;
use crate::layout::LayoutApi;
use crate::middleware::Middleware;

/// Host-provided API handed to plugins on initialization
pub trait DashboardApi {
    /// Register a listener for dashboard lifecycle events
    fn add_listener(&self, listener: DashboardEventListener);

    /// Register a visualization-data middleware
    fn add_middleware(&self, middleware: Box<dyn Middleware>);

    /// Register a hook run when the plugin is disposed
    fn on_dispose(&self, hook: Box<dyn FnOnce() + Send>);

    /// Layout manipulation surface
    fn layout_api(&mut self) -> &mut dyn LayoutApi;

    /// Filter manipulation surface
    fn filters_api(&mut self) -> &mut dyn FiltersApi;
}

/// Programmatic manipulation of dashboard filters
// TODO: filter listing and mutation operations
pub trait FiltersApi {}

/// An addressable element of a live dashboard
pub trait DashboardElement {
    fn identifier(&self) -> &str;

    /// Submit an action against this element
    fn submit(&self, action: ElementAction);
}

/// Actions a plugin may submit against a dashboard element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementAction {
    AddMetric,
    RemoveMetric,
    AddAttribute,
    RemoveAttribute,
    AddFilter,
    ModifyFilter,
    AddProperty,
    RemoveProperty,
    UpdateProperty,
}
