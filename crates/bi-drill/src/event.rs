//! Drill event payloads
//!
//! Raw interaction shapes arrive from the rendering layer; the normalized
//! shapes leave through the host callback and the event target. Optional
//! drill-context fields are serialized only when present, so each chart type
//! produces exactly the fields it supports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use bi_model::{Afm, DataValue, ElementType, VisType};

/// Name of the custom event dispatched on the host target
pub const DRILL_EVENT_NAME: &str = "drill";

/// Raw intersection entry attached to a chart point or table cell
///
/// Carries whatever the rendering layer knows about one analytical header the
/// clicked element passes through. Attribute values have only a URI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrillIntersection {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DataValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// Persisted references of a normalized intersection element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrillHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// One analytical header a clicked element passes through, normalized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillIntersectionElement {
    pub id: String,
    pub title: String,
    pub header: DrillHeader,
}

/// A chart series point carried by a raw interaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Concrete type of the series the point belongs to; consulted when the
    /// outer chart is a combo chart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_type: Option<VisType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drill_context: Vec<DrillIntersection>,
}

/// Raw chart interaction
///
/// A group interaction covers several series points at once, e.g. a combo
/// chart label encompassing one point per series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartDrillEvent {
    Point(ChartPoint),
    #[serde(rename = "points")]
    Group(Vec<ChartPoint>),
}

impl ChartDrillEvent {
    pub fn is_group(&self) -> bool {
        matches!(self, ChartDrillEvent::Group(_))
    }
}

/// Raw table cell interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDrillEvent {
    pub column_index: usize,
    pub row_index: usize,

    /// Raw data of the clicked row
    pub row: Vec<Value>,

    pub intersection: Vec<DrillIntersection>,
}

/// Per-point payload of a group drill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillPoint {
    pub x: f64,
    pub y: f64,
    pub intersection: Vec<DrillIntersectionElement>,
}

/// Normalized description of what was clicked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillContext {
    /// Visualization type the interaction happened in
    #[serde(rename = "type")]
    pub vis_type: VisType,

    /// Kind of element that was clicked
    pub element: ElementType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<Vec<Value>>,

    /// Analytical headers relevant for the clicked element
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intersection: Vec<DrillIntersectionElement>,

    /// Covered series points; present for group interactions only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<DrillPoint>>,
}

impl DrillContext {
    /// Context with no positional or tabular fields set
    pub fn new(vis_type: VisType, element: ElementType) -> Self {
        Self {
            vis_type,
            element,
            x: None,
            y: None,
            z: None,
            value: None,
            column_index: None,
            row_index: None,
            row: None,
            intersection: Vec::new(),
            points: None,
        }
    }
}

/// The normalized drill event handed to the host
///
/// Transient; constructed fresh for every interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillEvent {
    /// Snapshot of the analytical model the visualization was computed from
    pub execution_context: Afm,

    pub drill_context: DrillContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_context_fields_stay_off_the_wire() {
        let context = DrillContext::new(VisType::Pie, ElementType::Slice);
        let json = serde_json::to_value(&context).unwrap();

        assert_eq!(json["type"], "pie");
        assert_eq!(json["element"], "slice");
        assert!(json.get("x").is_none());
        assert!(json.get("value").is_none());
        assert!(json.get("points").is_none());
        assert!(json.get("columnIndex").is_none());
    }

    #[test]
    fn test_group_event_shape() {
        let event = ChartDrillEvent::Group(vec![ChartPoint {
            x: 1.0,
            y: 2.0,
            ..ChartPoint::default()
        }]);

        assert!(event.is_group());
        let json = serde_json::to_value(&event).unwrap();
        assert!(json["points"].is_array());
    }
}
