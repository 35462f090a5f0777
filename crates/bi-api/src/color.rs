//! Color assignment configuration
//!
//! Hosts may pin chart colors to particular entities with declarative
//! selectors. Only the configuration vocabulary lives here; evaluating
//! selectors against rendered series is the charting layer's business.

use serde::{Deserialize, Serialize};

/// Binds a color to whatever the selector matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAssignment {
    pub predicate: ColorSelector,

    /// Color reference, either a palette name or a css-style value
    pub color: String,
}

/// Declarative selector for color assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorSelector {
    /// Matches a particular attribute value, optionally narrowed to one
    /// display form
    #[serde(rename_all = "camelCase")]
    AttributeValue {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_form_id: Option<String>,
        value: String,
    },

    /// Matches an exact attribute element, disregarding display forms
    AttributeElement { uri: String },

    /// Matches a particular metric
    Metric { uri: String },

    /// Matches only when all nested selectors match
    And(Vec<ColorSelector>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_wire_shape() {
        let selector = ColorSelector::And(vec![
            ColorSelector::Metric {
                uri: "/md/obj/1".to_string(),
            },
            ColorSelector::AttributeValue {
                display_form_id: None,
                value: "north".to_string(),
            },
        ]);

        let json = serde_json::to_value(&selector).unwrap();
        assert_eq!(json["and"][0]["metric"]["uri"], "/md/obj/1");
        assert_eq!(json["and"][1]["attributeValue"]["value"], "north");
    }
}
