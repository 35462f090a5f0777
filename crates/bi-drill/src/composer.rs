//! Drill event composition and dispatch
//!
//! A [`DrillEventComposer`] belongs to one rendered visualization. It owns
//! the drill configuration and the debounce state, so rapid clicks on one
//! chart never interfere with another chart's pending events. Composed
//! events go to the registered callback first and, unless the callback
//! returns `false`, to the host's event target as a bubbling, cancelable
//! `"drill"` custom event.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bi_api::{CustomEvent, EventTarget};
use bi_model::{Afm, ElementType, VisType};

use crate::debounce::TrailingDebouncer;
use crate::event::{
    CellDrillEvent, ChartDrillEvent, ChartPoint, DrillContext, DrillEvent, DrillHeader,
    DrillIntersection, DrillIntersectionElement, DrillPoint, DRILL_EVENT_NAME,
};
use crate::resolver::clickable_element_type;

/// Default quiet window for chart clicks
///
/// Zero coalesces bursts arriving between two host-loop ticks without
/// delaying anything a full frame.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::ZERO;

/// Callback invoked with every composed drill event
///
/// Returning `false` suppresses the follow-up event-target notification;
/// any other result lets it through.
pub type OnFiredDrillEvent = Box<dyn Fn(&DrillEvent) -> bool + Send + Sync>;

/// Ties a visualization's analytical model to its drill callback
pub struct DrillConfig {
    pub afm: Afm,
    pub on_fired_drill_event: OnFiredDrillEvent,
}

impl DrillConfig {
    pub fn new(
        afm: Afm,
        on_fired_drill_event: impl Fn(&DrillEvent) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            afm,
            on_fired_drill_event: Box::new(on_fired_drill_event),
        }
    }
}

struct PendingChartClick {
    event: ChartDrillEvent,
    target: Arc<dyn EventTarget>,
    chart_type: VisType,
}

/// Per-chart composer of drill events
pub struct DrillEventComposer {
    config: DrillConfig,
    debouncer: TrailingDebouncer<PendingChartClick>,
}

impl DrillEventComposer {
    pub fn new(config: DrillConfig) -> Self {
        Self::with_debounce_window(config, DEFAULT_DEBOUNCE_WINDOW)
    }

    pub fn with_debounce_window(config: DrillConfig, window: Duration) -> Self {
        Self {
            config,
            debouncer: TrailingDebouncer::new(window),
        }
    }

    /// Record a chart interaction
    ///
    /// The newest call within the quiet window wins; composition happens on
    /// the next [`tick`](Self::tick) after the window elapses.
    pub fn chart_click(
        &self,
        event: ChartDrillEvent,
        target: Arc<dyn EventTarget>,
        chart_type: VisType,
    ) {
        self.debouncer.push(PendingChartClick {
            event,
            target,
            chart_type,
        });
    }

    /// Host-loop pulse; composes and dispatches a pending chart interaction
    /// once its quiet window has passed
    pub fn tick(&self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&self, now: Instant) {
        if let Some(pending) = self.debouncer.poll_at(now) {
            self.compose_and_fire_chart(pending);
        }
    }

    /// Compose and dispatch a table cell interaction; never debounced
    pub fn cell_click(&self, event: CellDrillEvent, target: &dyn EventTarget) {
        tracing::debug!(
            column = event.column_index,
            row = event.row_index,
            "composing cell drill event"
        );

        let mut context =
            DrillContext::new(VisType::Table, clickable_element_type(VisType::Table));
        context.column_index = Some(event.column_index);
        context.row_index = Some(event.row_index);
        context.row = Some(event.row);
        context.intersection = normalize_intersection(&event.intersection);

        self.fire(context, target);
    }

    fn compose_and_fire_chart(&self, pending: PendingChartClick) {
        let PendingChartClick {
            event,
            target,
            chart_type,
        } = pending;

        let chart_type = effective_chart_type(chart_type, &event);
        tracing::debug!(%chart_type, group = event.is_group(), "composing chart drill event");

        let context = match &event {
            ChartDrillEvent::Point(point) => compose_point_context(point, chart_type),
            ChartDrillEvent::Group(points) => compose_group_context(points, chart_type),
        };

        self.fire(context, target.as_ref());
    }

    fn fire(&self, drill_context: DrillContext, target: &dyn EventTarget) {
        let event = DrillEvent {
            execution_context: self.config.afm.clone(),
            drill_context,
        };

        let propagate = (self.config.on_fired_drill_event)(&event);
        if !propagate {
            return;
        }

        match serde_json::to_value(&event) {
            Ok(detail) => {
                target.dispatch_event(CustomEvent::bubbling(DRILL_EVENT_NAME, detail));
            }
            Err(error) => {
                tracing::error!(%error, "failed to serialize drill event payload");
            }
        }
    }
}

// Combo charts host several concrete series types; the clicked series
// decides which one governs element kind and field inclusion.
fn effective_chart_type(chart_type: VisType, event: &ChartDrillEvent) -> VisType {
    if !chart_type.is_combo() {
        return chart_type;
    }
    match event {
        ChartDrillEvent::Point(point) => point.series_type.unwrap_or(chart_type),
        ChartDrillEvent::Group(_) => chart_type,
    }
}

fn compose_point_context(point: &ChartPoint, chart_type: VisType) -> DrillContext {
    let mut context = DrillContext::new(chart_type, clickable_element_type(chart_type));

    if !chart_type.is_treemap() {
        context.x = Some(point.x);
        context.y = Some(point.y);
    }
    context.z = point.z.filter(|z| !z.is_nan());
    if chart_type.is_treemap() || chart_type.is_heatmap() {
        context.value = point.value;
    }
    context.intersection = normalize_intersection(&point.drill_context);

    context
}

fn compose_group_context(points: &[ChartPoint], chart_type: VisType) -> DrillContext {
    let mut context = DrillContext::new(chart_type, ElementType::Label);

    context.points = Some(
        points
            .iter()
            .map(|point| DrillPoint {
                x: point.x,
                y: point.y,
                intersection: normalize_intersection(&point.drill_context),
            })
            .collect(),
    );

    context
}

fn normalize_intersection(intersection: &[DrillIntersection]) -> Vec<DrillIntersectionElement> {
    intersection
        .iter()
        .map(|entry| DrillIntersectionElement {
            id: entry.id.clone(),
            title: [
                entry.title.clone(),
                entry.value.as_ref().map(ToString::to_string),
                entry.name.clone(),
            ]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.is_empty())
            .unwrap_or_default(),
            header: DrillHeader {
                uri: entry.uri.clone(),
                identifier: entry.identifier.clone(),
            },
        })
        .collect()
}
