//! Drillability resolution
//!
//! Decides whether a rendered header should be clickable, reconciling the
//! host's drillable-item declarations with the analytical model. Headers may
//! reference a measure only by its model-local identifier; resolution then
//! walks one level of derived-measure ancestry to reach something with a
//! persisted URI or identifier.

use bi_model::{Afm, ElementType, VisType};

use crate::item::{DrillItem, DrillableItem};

/// Resolve the persisted references behind a model-local measure identifier
///
/// Derived measures (period-over-period, previous period) are followed
/// exactly one level to their master. A master that is itself derived is not
/// chased further and resolves to nothing. Unresolvable references are not an
/// error; the header is simply not drillable.
pub fn measure_uri_or_identifier(afm: &Afm, local_identifier: &str) -> Option<DrillableItem> {
    let Some(mut measure) = afm.measure(local_identifier) else {
        tracing::debug!(local_identifier, "measure not found in model");
        return None;
    };
    if let Some(master) = measure.master_local_identifier() {
        measure = afm.measure(master)?;
    }
    measure.item_qualifier().map(DrillableItem::from)
}

fn is_header_drillable(drillable_items: &[DrillableItem], header: &DrillableItem) -> bool {
    drillable_items.iter().any(|item| item.matches(header))
}

/// Decide whether a rendered header should be clickable
///
/// True when the header itself, or the measure it references through its
/// local identifier, matches any of the declared drillable items.
pub fn is_drillable(drillable_items: &[DrillableItem], header: &DrillItem, afm: &Afm) -> bool {
    // Adhoc measure headers carry no persisted references of their own; only
    // the local-identifier path below can match those.
    if is_header_drillable(drillable_items, header.header()) {
        return true;
    }

    header
        .local_identifier()
        .and_then(|local_identifier| measure_uri_or_identifier(afm, local_identifier))
        .map(|resolved| is_header_drillable(drillable_items, &resolved))
        .unwrap_or(false)
}

/// Kind of element a click lands on in the given visualization type
///
/// Total over the closed set of drillable visualization types. Any other
/// input is a caller contract violation and panics with a diagnostic; combo
/// charts must resolve to the concrete type of the clicked series before the
/// lookup.
pub fn clickable_element_type(vis_type: VisType) -> ElementType {
    match vis_type {
        VisType::Line | VisType::Area | VisType::Dual | VisType::Scatter | VisType::Bubble => {
            ElementType::Point
        }
        VisType::Column | VisType::Bar => ElementType::Bar,
        VisType::Pie | VisType::Treemap | VisType::Donut | VisType::Funnel => ElementType::Slice,
        VisType::Table | VisType::Heatmap => ElementType::Cell,
        other => panic!("unknown visualization type for drilling: {}", other),
    }
}
