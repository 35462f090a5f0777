//! Analytical model for the dashboard platform
//!
//! This crate defines the analytical query model (AFM) that describes how a
//! visualization's data was computed, together with the closed vocabulary of
//! visualization and element types shared by the rest of the workspace.

pub mod afm;
pub mod execution;
pub mod visualization;

// Re-export commonly used types
pub use afm::{
    Afm, Aggregation, Attribute, DateDataSet, FilterItem, Measure, MeasureDefinition,
    ObjQualifier, PopMeasure, PreviousPeriodMeasure, SimpleMeasure,
};
pub use execution::{DataValue, Dimension, Execution, ResultSpec};
pub use visualization::{ElementType, VisType};
