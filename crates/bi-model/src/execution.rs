//! Execution configuration and result values
//!
//! An execution pairs an analytical model with an optional result layout.
//! There is no fluent builder here: executions are immutable values put
//! together with ordinary constructors, so a host can assemble one in a
//! single expression and hand it over.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::afm::Afm;

/// A complete, immutable execution configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub afm: Afm,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_spec: Option<ResultSpec>,
}

impl Execution {
    pub fn new(afm: Afm) -> Self {
        Self {
            afm,
            result_spec: None,
        }
    }

    pub fn with_result_spec(afm: Afm, result_spec: ResultSpec) -> Self {
        Self {
            afm,
            result_spec: Some(result_spec),
        }
    }
}

/// Layout of the execution result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSpec {
    pub dimensions: Vec<Dimension>,
}

impl ResultSpec {
    /// Two-dimensional layout: rows first, columns second
    pub fn rows_and_columns(rows: Dimension, columns: Dimension) -> Self {
        Self {
            dimensions: vec![rows, columns],
        }
    }
}

/// One result dimension, listing the local identifiers placed in it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub item_identifiers: Vec<String>,
}

impl Dimension {
    pub fn new(item_identifiers: Vec<String>) -> Self {
        Self { item_identifiers }
    }
}

/// A single value from an execution result
///
/// Values arrive either as preformatted text or as raw numbers; the wire
/// format does not tag them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Text(text) => f.write_str(text),
            DataValue::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for DataValue {
    fn from(text: &str) -> Self {
        DataValue::Text(text.to_string())
    }
}

impl From<f64> for DataValue {
    fn from(number: f64) -> Self {
        DataValue::Number(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::afm::{Attribute, Measure, ObjQualifier};

    #[test]
    fn test_execution_from_ordinary_constructors() {
        let afm = Afm::new(
            vec![Measure::simple(
                "m1",
                ObjQualifier::Identifier("metric.sales".to_string()),
            )],
            vec![Attribute::new(
                "a1",
                ObjQualifier::Uri("/md/obj/42".to_string()),
            )],
        );

        let execution = Execution::with_result_spec(
            afm,
            ResultSpec::rows_and_columns(
                Dimension::new(vec!["a1".to_string()]),
                Dimension::new(vec!["m1".to_string()]),
            ),
        );

        let spec = execution.result_spec.unwrap();
        assert_eq!(spec.dimensions.len(), 2);
        assert_eq!(spec.dimensions[0].item_identifiers, vec!["a1"]);
    }

    #[test]
    fn test_data_value_is_untagged_on_the_wire() {
        let values: Vec<DataValue> = serde_json::from_str("[\"north\", 12.5]").unwrap();
        assert_eq!(
            values,
            vec![DataValue::from("north"), DataValue::from(12.5)]
        );
    }

    #[test]
    fn test_data_value_display() {
        assert_eq!(DataValue::from("north").to_string(), "north");
        assert_eq!(DataValue::from(15.0).to_string(), "15");
        assert_eq!(DataValue::from(15.5).to_string(), "15.5");
    }
}
