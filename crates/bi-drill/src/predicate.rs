//! Declarative drill predicates
//!
//! Beyond flat drillable-item lists, hosts can describe what is drillable
//! with a small composition language: alternatives OR their branches,
//! composites wrap composition criteria, `fromAll` requires every listed
//! item to match. Definitions compile into executable predicates over the
//! analytical model and a rendered header.
//!
//! The definition tree is a tagged union, so dispatch is exhaustive at
//! compile time and malformed shapes cannot be constructed; JSON ingestion
//! rejects them up front instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bi_model::Afm;

use crate::item::{DrillItem, DrillableItem};
use crate::resolver::measure_uri_or_identifier;

/// Declarative description of what should be drillable
///
/// Composition nodes (`Variants`, `FromAll`) normally appear wrapped in a
/// `Composite`; they are accepted at the top level as well, where item
/// selectors inside `Variants` keep the weaker non-composed semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrillDefinition {
    /// Matches when any nested definition matches
    Alternatives(Vec<DrillDefinition>),
    /// Selects exactly the specified item
    Item(DrillableItem),
    /// Matches a composite item fulfilling the nested composition criteria
    Composite(CompositionNode),
    /// Alternative composition criteria, evaluated with OR
    Variants(Vec<CompositionVariant>),
    /// Requires every listed item to match
    FromAll(Vec<ItemSelector>),
}

/// Composition criteria nested under a composite definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompositionNode {
    /// Alternative ways to match the composite, evaluated with OR
    Variants(Vec<CompositionVariant>),
    /// The composite must be composed from all of the listed items
    FromAll(Vec<ItemSelector>),
    Item(DrillableItem),
}

/// One variant of a composite match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompositionVariant {
    FromAll(Vec<ItemSelector>),
    Item(DrillableItem),
}

/// Leaf selector wrapping one drillable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSelector {
    pub item: DrillableItem,
}

/// Error raised for host-supplied definitions that do not parse
#[derive(Debug, Error)]
pub enum DrillDefinitionError {
    #[error("malformed drill definition: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl DrillDefinition {
    /// Parse a JSON definition, failing fast on malformed shapes
    pub fn from_json(json: &str) -> Result<Self, DrillDefinitionError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Executable predicate over the analytical model and a rendered header
pub struct DrillPredicate {
    eval: Box<dyn Fn(&Afm, &DrillItem) -> bool + Send + Sync>,
}

impl DrillPredicate {
    fn new(eval: impl Fn(&Afm, &DrillItem) -> bool + Send + Sync + 'static) -> Self {
        Self {
            eval: Box::new(eval),
        }
    }

    pub fn evaluate(&self, afm: &Afm, item: &DrillItem) -> bool {
        (self.eval)(afm, item)
    }
}

fn any_of(predicates: Vec<DrillPredicate>) -> DrillPredicate {
    DrillPredicate::new(move |afm, item| {
        predicates.iter().any(|predicate| predicate.evaluate(afm, item))
    })
}

fn all_of(predicates: Vec<DrillPredicate>) -> DrillPredicate {
    DrillPredicate::new(move |afm, item| {
        predicates.iter().all(|predicate| predicate.evaluate(afm, item))
    })
}

// Exact URI/identifier match, including local-identifier indirection, the
// same resolution is_drillable() applies to flat item lists.
fn exact_match(expected: DrillableItem) -> DrillPredicate {
    DrillPredicate::new(move |afm, item| {
        if expected.matches(item.header()) {
            return true;
        }
        item.local_identifier()
            .and_then(|local_identifier| measure_uri_or_identifier(afm, local_identifier))
            .map(|resolved| expected.matches(&resolved))
            .unwrap_or(false)
    })
}

// Matching adhoc/arithmetic composites against a bare item selector is not
// supported; the predicate deliberately never matches.
fn composition_match(_expected: DrillableItem) -> DrillPredicate {
    DrillPredicate::new(|_afm, _item| false)
}

/// Compile a definition into an executable predicate
pub fn compile(definition: &DrillDefinition) -> DrillPredicate {
    compile_definition(definition, false)
}

fn compile_definition(definition: &DrillDefinition, composed: bool) -> DrillPredicate {
    match definition {
        DrillDefinition::Alternatives(definitions) => any_of(
            definitions
                .iter()
                .map(|definition| compile_definition(definition, composed))
                .collect(),
        ),
        DrillDefinition::Item(item) => compile_item(item, composed),
        DrillDefinition::Composite(node) => compile_composition(node, true),
        DrillDefinition::Variants(variants) => any_of(
            variants
                .iter()
                .map(|variant| compile_variant(variant, composed))
                .collect(),
        ),
        DrillDefinition::FromAll(selectors) => compile_from_all(selectors),
    }
}

fn compile_composition(node: &CompositionNode, composed: bool) -> DrillPredicate {
    match node {
        CompositionNode::Variants(variants) => any_of(
            variants
                .iter()
                .map(|variant| compile_variant(variant, composed))
                .collect(),
        ),
        CompositionNode::FromAll(selectors) => compile_from_all(selectors),
        CompositionNode::Item(item) => compile_item(item, composed),
    }
}

fn compile_variant(variant: &CompositionVariant, composed: bool) -> DrillPredicate {
    match variant {
        CompositionVariant::FromAll(selectors) => compile_from_all(selectors),
        CompositionVariant::Item(item) => compile_item(item, composed),
    }
}

// fromAll always evaluates its selectors in composed context.
fn compile_from_all(selectors: &[ItemSelector]) -> DrillPredicate {
    all_of(
        selectors
            .iter()
            .map(|selector| exact_match(selector.item.clone()))
            .collect(),
    )
}

fn compile_item(item: &DrillableItem, composed: bool) -> DrillPredicate {
    if composed {
        exact_match(item.clone())
    } else {
        composition_match(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bi_model::{Measure, ObjQualifier};

    fn header(uri: &str) -> DrillItem {
        DrillItem::Header(DrillableItem::from_uri(uri))
    }

    fn selector(uri: &str) -> ItemSelector {
        ItemSelector {
            item: DrillableItem::from_uri(uri),
        }
    }

    #[test]
    fn test_bare_item_selector_is_an_unsupported_composition_match() {
        let definition = DrillDefinition::Item(DrillableItem::from_uri("/md/obj/1"));
        let predicate = compile(&definition);

        // even an exact reference does not match outside a composite
        assert!(!predicate.evaluate(&Afm::default(), &header("/md/obj/1")));
    }

    #[test]
    fn test_composite_item_selector_matches_exactly() {
        let definition = DrillDefinition::Composite(CompositionNode::Item(
            DrillableItem::from_uri("/md/obj/1"),
        ));
        let predicate = compile(&definition);

        assert!(predicate.evaluate(&Afm::default(), &header("/md/obj/1")));
        assert!(!predicate.evaluate(&Afm::default(), &header("/md/obj/2")));
    }

    #[test]
    fn test_alternatives_match_any_branch() {
        let definition = DrillDefinition::Alternatives(vec![
            DrillDefinition::Composite(CompositionNode::Item(DrillableItem::from_uri(
                "/md/obj/1",
            ))),
            DrillDefinition::Composite(CompositionNode::Item(DrillableItem::from_uri(
                "/md/obj/2",
            ))),
        ]);
        let predicate = compile(&definition);

        assert!(predicate.evaluate(&Afm::default(), &header("/md/obj/1")));
        assert!(predicate.evaluate(&Afm::default(), &header("/md/obj/2")));
        assert!(!predicate.evaluate(&Afm::default(), &header("/md/obj/3")));
    }

    #[test]
    fn test_from_all_requires_every_selector_to_match() {
        let definition = DrillDefinition::Composite(CompositionNode::FromAll(vec![
            selector("/md/obj/1"),
            ItemSelector {
                item: DrillableItem::from_identifier("metric.sales"),
            },
        ]));
        let predicate = compile(&definition);

        // matches only the first selector
        assert!(!predicate.evaluate(&Afm::default(), &header("/md/obj/1")));

        // carries both reference channels, so every selector matches
        let both = DrillItem::Header(DrillableItem {
            uri: Some("/md/obj/1".to_string()),
            identifier: Some("metric.sales".to_string()),
            title: None,
        });
        assert!(predicate.evaluate(&Afm::default(), &both));
    }

    #[test]
    fn test_variants_are_alternatives_within_a_composite() {
        let definition = DrillDefinition::Composite(CompositionNode::Variants(vec![
            CompositionVariant::FromAll(vec![selector("/md/obj/1"), selector("/md/obj/2")]),
            CompositionVariant::Item(DrillableItem::from_uri("/md/obj/3")),
        ]));
        let predicate = compile(&definition);

        assert!(predicate.evaluate(&Afm::default(), &header("/md/obj/3")));
        assert!(!predicate.evaluate(&Afm::default(), &header("/md/obj/1")));
    }

    #[test]
    fn test_exact_match_resolves_local_identifiers() {
        let afm = Afm::new(
            vec![
                Measure::simple("m1", ObjQualifier::Uri("/md/obj/1".to_string())),
                Measure::pop("m2", "m1", ObjQualifier::Uri("/md/obj/7".to_string())),
            ],
            vec![],
        );
        let definition = DrillDefinition::Composite(CompositionNode::Item(
            DrillableItem::from_uri("/md/obj/1"),
        ));
        let predicate = compile(&definition);

        let derived_header = DrillItem::LocalId {
            header: DrillableItem::default(),
            local_identifier: "m2".to_string(),
        };
        assert!(predicate.evaluate(&afm, &derived_header));
    }

    #[test]
    fn test_top_level_from_all() {
        let definition = DrillDefinition::FromAll(vec![
            selector("/md/obj/1"),
            ItemSelector {
                item: DrillableItem::from_identifier("metric.sales"),
            },
        ]);
        let predicate = compile(&definition);

        assert!(!predicate.evaluate(&Afm::default(), &header("/md/obj/1")));

        let both = DrillItem::Header(DrillableItem {
            uri: Some("/md/obj/1".to_string()),
            identifier: Some("metric.sales".to_string()),
            title: None,
        });
        assert!(predicate.evaluate(&Afm::default(), &both));
    }

    #[test]
    fn test_json_round_trip_of_the_wire_shape() {
        let json = r#"{
            "alternatives": [
                { "item": { "uri": "/md/obj/1" } },
                {
                    "composite": {
                        "variants": [
                            { "fromAll": [
                                { "item": { "uri": "/md/obj/1" } },
                                { "item": { "uri": "/md/obj/2" } }
                            ] },
                            { "item": { "uri": "/md/obj/3" } }
                        ]
                    }
                }
            ]
        }"#;

        let definition = DrillDefinition::from_json(json).unwrap();
        let predicate = compile(&definition);

        assert!(predicate.evaluate(&Afm::default(), &header("/md/obj/3")));

        let serialized = serde_json::to_value(&definition).unwrap();
        assert!(serialized["alternatives"][1]["composite"]["variants"][0]["fromAll"].is_array());
    }

    #[test]
    fn test_malformed_definitions_fail_fast() {
        assert!(matches!(
            DrillDefinition::from_json(r#"{ "everything": true }"#),
            Err(DrillDefinitionError::Malformed(_))
        ));
        assert!(DrillDefinition::from_json(r#"{ "alternatives": {} }"#).is_err());
    }
}
