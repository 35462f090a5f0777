//! The analytical query model (AFM)
//!
//! An AFM is the declarative description of the query that produced a
//! visualization: the measures that were computed, the attributes that slice
//! them and the filters that restrict the data. The hosting application
//! supplies one per rendered visualization; this workspace treats it as
//! read-only input.

use serde::{Deserialize, Serialize};

/// Reference to a persisted catalog object.
///
/// Objects are addressable either by workspace URI or by a stable
/// identifier. Which channel is populated depends on how the hosting
/// application manages its catalog; drilling treats the two as independent
/// match channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjQualifier {
    /// Workspace URI of the object
    Uri(String),
    /// Stable identifier of the object
    Identifier(String),
}

impl ObjQualifier {
    /// URI channel, if this qualifier carries one
    pub fn uri(&self) -> Option<&str> {
        match self {
            ObjQualifier::Uri(uri) => Some(uri),
            ObjQualifier::Identifier(_) => None,
        }
    }

    /// Identifier channel, if this qualifier carries one
    pub fn identifier(&self) -> Option<&str> {
        match self {
            ObjQualifier::Uri(_) => None,
            ObjQualifier::Identifier(id) => Some(id),
        }
    }
}

/// The analytical query model
///
/// Measure and attribute order is meaningful; local identifiers are unique
/// within one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Afm {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<Measure>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterItem>,
}

impl Afm {
    /// Create a model from measures and attributes, without global filters
    pub fn new(measures: Vec<Measure>, attributes: Vec<Attribute>) -> Self {
        Self {
            measures,
            attributes,
            filters: Vec::new(),
        }
    }

    /// Look up a measure by its local identifier
    pub fn measure(&self, local_identifier: &str) -> Option<&Measure> {
        self.measures
            .iter()
            .find(|m| m.local_identifier == local_identifier)
    }

    /// Look up an attribute by its local identifier
    pub fn attribute(&self, local_identifier: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.local_identifier == local_identifier)
    }
}

/// One measure of the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// Reference name scoped to this model, distinct from any persisted
    /// URI/identifier
    pub local_identifier: String,

    /// How the measure is computed
    pub definition: MeasureDefinition,

    /// Display title override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Number format override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Measure {
    /// A measure computed directly from a catalog item
    pub fn simple(local_identifier: impl Into<String>, item: ObjQualifier) -> Self {
        Self {
            local_identifier: local_identifier.into(),
            definition: MeasureDefinition::Simple(SimpleMeasure {
                item,
                aggregation: None,
                filters: Vec::new(),
                compute_ratio: false,
            }),
            alias: None,
            format: None,
        }
    }

    /// A period-over-period measure derived from a master measure
    pub fn pop(
        local_identifier: impl Into<String>,
        master: impl Into<String>,
        pop_attribute: ObjQualifier,
    ) -> Self {
        Self {
            local_identifier: local_identifier.into(),
            definition: MeasureDefinition::PopMeasure(PopMeasure {
                measure_identifier: master.into(),
                pop_attribute,
            }),
            alias: None,
            format: None,
        }
    }

    /// A previous-period measure derived from a master measure
    pub fn previous_period(
        local_identifier: impl Into<String>,
        master: impl Into<String>,
        date_data_sets: Vec<DateDataSet>,
    ) -> Self {
        Self {
            local_identifier: local_identifier.into(),
            definition: MeasureDefinition::PreviousPeriodMeasure(PreviousPeriodMeasure {
                measure_identifier: master.into(),
                date_data_sets,
            }),
            alias: None,
            format: None,
        }
    }

    /// Local identifier of the master measure, for derived measures
    pub fn master_local_identifier(&self) -> Option<&str> {
        match &self.definition {
            MeasureDefinition::Simple(_) => None,
            MeasureDefinition::PopMeasure(pop) => Some(&pop.measure_identifier),
            MeasureDefinition::PreviousPeriodMeasure(pp) => Some(&pp.measure_identifier),
        }
    }

    /// Whether this measure is defined relative to another measure
    pub fn is_derived(&self) -> bool {
        self.master_local_identifier().is_some()
    }

    /// Catalog item behind a simple measure; derived measures have none
    pub fn item_qualifier(&self) -> Option<&ObjQualifier> {
        match &self.definition {
            MeasureDefinition::Simple(simple) => Some(&simple.item),
            _ => None,
        }
    }
}

/// How a measure is computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasureDefinition {
    /// Direct reference to a catalog metric or fact
    #[serde(rename = "measure")]
    Simple(SimpleMeasure),
    /// Period-over-period comparison against a master measure
    PopMeasure(PopMeasure),
    /// Previous-period comparison against a master measure
    PreviousPeriodMeasure(PreviousPeriodMeasure),
}

/// Direct measure definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleMeasure {
    /// The metric or fact being measured
    pub item: ObjQualifier,

    /// Aggregation applied when the item is a fact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,

    /// Measure-scoped filters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterItem>,

    /// Show the measure as a ratio of the unsliced total
    #[serde(default)]
    pub compute_ratio: bool,
}

/// Period-over-period measure definition
///
/// `measure_identifier` points at the master measure's local identifier
/// within the same model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopMeasure {
    pub measure_identifier: String,
    pub pop_attribute: ObjQualifier,
}

/// Previous-period measure definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousPeriodMeasure {
    pub measure_identifier: String,
    pub date_data_sets: Vec<DateDataSet>,
}

/// Date dimension shift used by previous-period measures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateDataSet {
    pub data_set: ObjQualifier,
    pub periods_ago: i32,
}

/// Aggregation functions for fact-based measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Count,
    Avg,
    Min,
    Max,
    Median,
}

/// One attribute of the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub local_identifier: String,

    /// Display form the attribute is rendered through
    pub display_form: ObjQualifier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Attribute {
    pub fn new(local_identifier: impl Into<String>, display_form: ObjQualifier) -> Self {
        Self {
            local_identifier: local_identifier.into(),
            display_form,
            alias: None,
        }
    }
}

/// Filters restricting the data, either globally or per measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterItem {
    #[serde(rename_all = "camelCase")]
    PositiveAttributeFilter {
        display_form: ObjQualifier,
        #[serde(rename = "in")]
        elements: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    NegativeAttributeFilter {
        display_form: ObjQualifier,
        #[serde(rename = "notIn")]
        elements: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    AbsoluteDateFilter {
        data_set: ObjQualifier,
        from: String,
        to: String,
    },
    #[serde(rename_all = "camelCase")]
    RelativeDateFilter {
        data_set: ObjQualifier,
        granularity: String,
        from: i32,
        to: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_lookup_by_local_identifier() {
        let afm = Afm::new(
            vec![
                Measure::simple("m1", ObjQualifier::Uri("/md/obj/1".to_string())),
                Measure::simple("m2", ObjQualifier::Identifier("metric.sales".to_string())),
            ],
            vec![],
        );

        assert!(afm.measure("m2").is_some());
        assert!(afm.measure("m3").is_none());
    }

    #[test]
    fn test_master_local_identifier_only_for_derived_measures() {
        let simple = Measure::simple("m1", ObjQualifier::Uri("/md/obj/1".to_string()));
        let pop = Measure::pop("m2", "m1", ObjQualifier::Uri("/md/obj/2".to_string()));
        let previous = Measure::previous_period(
            "m3",
            "m1",
            vec![DateDataSet {
                data_set: ObjQualifier::Uri("/md/obj/3".to_string()),
                periods_ago: 1,
            }],
        );

        assert_eq!(simple.master_local_identifier(), None);
        assert!(!simple.is_derived());
        assert_eq!(pop.master_local_identifier(), Some("m1"));
        assert_eq!(previous.master_local_identifier(), Some("m1"));
        assert!(previous.is_derived());
    }

    #[test]
    fn test_item_qualifier_only_for_simple_measures() {
        let simple = Measure::simple("m1", ObjQualifier::Identifier("metric.sales".to_string()));
        let pop = Measure::pop("m2", "m1", ObjQualifier::Uri("/md/obj/2".to_string()));

        assert_eq!(
            simple.item_qualifier().and_then(ObjQualifier::identifier),
            Some("metric.sales")
        );
        assert!(pop.item_qualifier().is_none());
    }

    #[test]
    fn test_measure_wire_names_are_camel_case() {
        let pop = Measure::pop("m2", "m1", ObjQualifier::Uri("/md/obj/2".to_string()));
        let json = serde_json::to_value(&pop).unwrap();

        assert_eq!(json["localIdentifier"], "m2");
        assert_eq!(json["definition"]["popMeasure"]["measureIdentifier"], "m1");
        assert_eq!(
            json["definition"]["popMeasure"]["popAttribute"]["uri"],
            "/md/obj/2"
        );
    }

    #[test]
    fn test_filter_wire_names() {
        let filter = FilterItem::NegativeAttributeFilter {
            display_form: ObjQualifier::Uri("/md/obj/9".to_string()),
            elements: vec!["/md/obj/9/elements?id=1".to_string()],
        };
        let json = serde_json::to_value(&filter).unwrap();

        assert!(json["negativeAttributeFilter"]["notIn"].is_array());
        assert_eq!(
            json["negativeAttributeFilter"]["displayForm"]["uri"],
            "/md/obj/9"
        );
    }
}
