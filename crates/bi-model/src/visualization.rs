//! Closed vocabulary of visualization and element types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Visualization types supported by the platform
///
/// `Combo` hosts several concrete series types in one chart; interactions on
/// a combo chart are attributed to the concrete type of the clicked series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisType {
    Line,
    Area,
    Dual,
    Scatter,
    Bubble,
    Column,
    Bar,
    Pie,
    Treemap,
    Donut,
    Funnel,
    Table,
    Heatmap,
    Combo,
}

impl VisType {
    pub fn is_combo(self) -> bool {
        self == VisType::Combo
    }

    pub fn is_treemap(self) -> bool {
        self == VisType::Treemap
    }

    pub fn is_heatmap(self) -> bool {
        self == VisType::Heatmap
    }

    /// Lowercase name used on the wire and in diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            VisType::Line => "line",
            VisType::Area => "area",
            VisType::Dual => "dual",
            VisType::Scatter => "scatter",
            VisType::Bubble => "bubble",
            VisType::Column => "column",
            VisType::Bar => "bar",
            VisType::Pie => "pie",
            VisType::Treemap => "treemap",
            VisType::Donut => "donut",
            VisType::Funnel => "funnel",
            VisType::Table => "table",
            VisType::Heatmap => "heatmap",
            VisType::Combo => "combo",
        }
    }
}

impl fmt::Display for VisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of clickable visualization elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Point,
    Bar,
    Slice,
    Cell,
    /// Group label encompassing several series points
    Label,
}

impl ElementType {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Point => "point",
            ElementType::Bar => "bar",
            ElementType::Slice => "slice",
            ElementType::Cell => "cell",
            ElementType::Label => "label",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vis_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VisType::Treemap).unwrap(),
            "\"treemap\""
        );
        let parsed: VisType = serde_json::from_str("\"heatmap\"").unwrap();
        assert_eq!(parsed, VisType::Heatmap);
    }

    #[test]
    fn test_type_helpers() {
        assert!(VisType::Combo.is_combo());
        assert!(!VisType::Line.is_combo());
        assert!(VisType::Treemap.is_treemap());
        assert!(VisType::Heatmap.is_heatmap());
    }
}
