//! Dashboard layout manipulation surface

use serde::{Deserialize, Serialize};

use crate::events::ElementRef;

/// One column of a layout row
///
/// `size` is measured in grid units out of 12, as is customary for dashboard
/// grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutColumn {
    pub size: u8,
    pub element: ElementRef,
}

/// One row of the dashboard grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRow {
    pub columns: Vec<LayoutColumn>,
}

impl LayoutRow {
    /// A row spanning the full grid width with a single element
    pub fn full_width(element: ElementRef) -> Self {
        Self {
            columns: vec![LayoutColumn { size: 12, element }],
        }
    }
}

/// Programmatic manipulation of the dashboard layout
///
/// Implemented by the hosting application; plugins only call it.
pub trait LayoutApi {
    /// Insert a row at `order`; `-1` appends at the end
    fn add_row(&mut self, order: isize, row: LayoutRow) -> anyhow::Result<()>;

    fn add_column(
        &mut self,
        row_index: usize,
        col_index: usize,
        column: LayoutColumn,
    ) -> anyhow::Result<()>;

    fn remove_row(&mut self, index: usize) -> anyhow::Result<()>;

    fn remove_column(&mut self, row_index: usize, col_index: usize) -> anyhow::Result<()>;
}
