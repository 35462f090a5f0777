//! Props-interceptor middleware
//!
//! Middleware lets a plugin rewrite the data a visualization is about to be
//! rendered with. The default implementations pass the data through
//! untouched, so a middleware only overrides the hook it cares about.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::events::{DashboardContext, ElementRef};

/// Renderable visualization data handed to middleware
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisData {
    /// Bucket assignment of measures and attributes
    pub buckets: Value,

    /// Visualization properties (axes, legend, colors, ...)
    pub properties: Value,
}

/// Input to one middleware invocation
pub struct MiddlewareInput<'a> {
    pub context: &'a DashboardContext,
    pub element: &'a ElementRef,
    pub data: VisData,
}

/// Interceptor of visualization data
pub trait Middleware: Send + Sync {
    /// Called before the initial render
    fn on_init(&self, input: MiddlewareInput<'_>) -> VisData {
        input.data
    }

    /// Called on each render after the initial one
    fn on_update(&self, input: MiddlewareInput<'_>) -> VisData {
        input.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NoopMiddleware;

    impl Middleware for NoopMiddleware {}

    #[test]
    fn test_default_hooks_pass_data_through() {
        let context = DashboardContext {
            project_id: "project-1".to_string(),
            client_id: None,
            user_id: "user-1".to_string(),
        };
        let element = ElementRef::new("vis-1");
        let data = VisData {
            buckets: json!({"measures": ["m1"]}),
            properties: json!({"legend": {"enabled": true}}),
        };

        let out = NoopMiddleware.on_init(MiddlewareInput {
            context: &context,
            element: &element,
            data: data.clone(),
        });

        assert_eq!(out, data);
    }
}
