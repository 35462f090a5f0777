//! Drillable item descriptors

use serde::{Deserialize, Serialize};

use bi_model::ObjQualifier;

/// Descriptor of a clickable entity
///
/// Two items match when they share a non-empty URI or a non-empty stable
/// identifier. The channels are independent; either one suffices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillableItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl DrillableItem {
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    pub fn from_identifier(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            ..Self::default()
        }
    }

    /// Whether the two items refer to the same entity
    pub fn matches(&self, other: &DrillableItem) -> bool {
        channel_matches(self.identifier.as_deref(), other.identifier.as_deref())
            || channel_matches(self.uri.as_deref(), other.uri.as_deref())
    }
}

// A channel participates in matching only when both sides carry a non-empty
// value; undefined never equals undefined.
fn channel_matches(expected: Option<&str>, got: Option<&str>) -> bool {
    matches!((expected, got), (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() && a == b)
}

impl From<&ObjQualifier> for DrillableItem {
    fn from(qualifier: &ObjQualifier) -> Self {
        Self {
            uri: qualifier.uri().map(str::to_string),
            identifier: qualifier.identifier().map(str::to_string),
            title: None,
        }
    }
}

/// A header encountered during rendering
///
/// Headers of measures defined inside the model (derived or adhoc ones)
/// additionally carry the model-local identifier they render, which lets
/// drillability resolution reach their persisted ancestry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrillItem {
    /// Plain header carrying its own persisted references
    Header(DrillableItem),
    /// Header bound to a measure by its model-local identifier
    #[serde(rename_all = "camelCase")]
    LocalId {
        header: DrillableItem,
        local_identifier: String,
    },
}

impl DrillItem {
    pub fn header(&self) -> &DrillableItem {
        match self {
            DrillItem::Header(header) => header,
            DrillItem::LocalId { header, .. } => header,
        }
    }

    pub fn local_identifier(&self) -> Option<&str> {
        match self {
            DrillItem::Header(_) => None,
            DrillItem::LocalId {
                local_identifier, ..
            } => Some(local_identifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_by_either_channel() {
        let declared = DrillableItem {
            uri: Some("/md/obj/1".to_string()),
            identifier: Some("metric.sales".to_string()),
            title: None,
        };

        assert!(declared.matches(&DrillableItem::from_uri("/md/obj/1")));
        assert!(declared.matches(&DrillableItem::from_identifier("metric.sales")));
        assert!(!declared.matches(&DrillableItem::from_uri("/md/obj/2")));
    }

    #[test]
    fn test_absent_channels_never_match() {
        assert!(!DrillableItem::default().matches(&DrillableItem::default()));
    }

    #[test]
    fn test_empty_strings_never_match() {
        let empty = DrillableItem {
            uri: Some(String::new()),
            identifier: Some(String::new()),
            title: None,
        };
        assert!(!empty.matches(&empty.clone()));
    }

    #[test]
    fn test_drill_item_accessors() {
        let plain = DrillItem::Header(DrillableItem::from_uri("/md/obj/1"));
        assert_eq!(plain.local_identifier(), None);

        let local = DrillItem::LocalId {
            header: DrillableItem::default(),
            local_identifier: "m1".to_string(),
        };
        assert_eq!(local.local_identifier(), Some("m1"));
        assert_eq!(local.header(), &DrillableItem::default());
    }
}
