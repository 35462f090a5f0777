//! Drill-down derivation pipeline
//!
//! Given the analytical model behind a visualization and the host's
//! drillable-item declarations, this crate decides which rendered headers are
//! clickable, composes normalized drill events from raw chart and table
//! interactions, and compiles declarative drill predicates for advanced
//! configurations.

pub mod composer;
pub mod debounce;
pub mod event;
pub mod item;
pub mod predicate;
pub mod resolver;

// Re-export commonly used types
pub use composer::{DrillConfig, DrillEventComposer, OnFiredDrillEvent, DEFAULT_DEBOUNCE_WINDOW};
pub use event::{
    CellDrillEvent, ChartDrillEvent, ChartPoint, DrillContext, DrillEvent, DrillHeader,
    DrillIntersection, DrillIntersectionElement, DrillPoint, DRILL_EVENT_NAME,
};
pub use item::{DrillItem, DrillableItem};
pub use predicate::{
    compile, CompositionNode, CompositionVariant, DrillDefinition, DrillDefinitionError,
    DrillPredicate, ItemSelector,
};
pub use resolver::{clickable_element_type, is_drillable, measure_uri_or_identifier};
