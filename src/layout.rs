use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Largest number of charts a single panel can hold.
pub const MAX_STOCKS: usize = 6;

/// Pixel size of the panel handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    pub rows: u32,
    pub cols: u32,
}

impl LayoutPlan {
    pub fn capacity(&self) -> usize {
        (self.rows * self.cols) as usize
    }
}

/// Size shared by every cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellGeometry {
    pub width: u32,
    pub height: u32,
}

/// Pick the grid shape for `count` charts.
pub fn plan_layout(count: usize) -> Result<LayoutPlan> {
    let (rows, cols) = match count {
        1 => (1, 1),
        2 => (1, 2),
        3 => (1, 3),
        4 => (2, 2),
        5 | 6 => (2, 3),
        _ => return Err(AppError::InvalidCount { count }),
    };
    Ok(LayoutPlan { rows, cols })
}

/// Split the canvas into equal cells, reserving `spacing` before and after every row and
/// column. Division floors; leftover pixels stay as slack on the right and bottom edges.
pub fn cell_geometry(canvas: CanvasSize, plan: LayoutPlan, spacing: u32) -> CellGeometry {
    let reserved_width = spacing.saturating_mul(plan.cols.saturating_add(1));
    let reserved_height = spacing.saturating_mul(plan.rows.saturating_add(1));

    CellGeometry {
        width: canvas.width.saturating_sub(reserved_width) / plan.cols,
        height: canvas.height.saturating_sub(reserved_height) / plan.rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_fixed_table_for_supported_counts() {
        let expected = [(1, 1), (1, 2), (1, 3), (2, 2), (2, 3), (2, 3)];
        for (idx, (rows, cols)) in expected.into_iter().enumerate() {
            let plan = plan_layout(idx + 1).expect("supported count");
            assert_eq!(plan, LayoutPlan { rows, cols }, "count {}", idx + 1);
            assert!(plan.capacity() >= idx + 1);
        }
    }

    #[test]
    fn rejects_counts_outside_range() {
        for count in [0, 7, 12] {
            let err = plan_layout(count).expect_err("count should be rejected");
            assert!(
                matches!(err, AppError::InvalidCount { count: c } if c == count),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn floors_cell_geometry_for_medium_panel() {
        let plan = LayoutPlan { rows: 2, cols: 3 };
        let geometry = cell_geometry(CanvasSize::new(338, 158), plan, 2);
        assert_eq!(
            geometry,
            CellGeometry {
                width: 110,
                height: 76
            }
        );
    }

    #[test]
    fn leaves_remainder_as_trailing_slack() {
        let plan = LayoutPlan { rows: 1, cols: 3 };
        let geometry = cell_geometry(CanvasSize::new(100, 50), plan, 0);
        assert_eq!(geometry.width, 33);
        assert_eq!(geometry.height, 50);
        assert_eq!(100 - geometry.width * 3, 1);
    }

    #[test]
    fn huge_spacing_saturates_to_empty_cells() {
        let plan = LayoutPlan { rows: 2, cols: 3 };
        let geometry = cell_geometry(CanvasSize::new(338, 158), plan, 2_000_000_000);
        assert_eq!(geometry, CellGeometry { width: 0, height: 0 });

        let geometry = cell_geometry(CanvasSize::new(338, 158), plan, u32::MAX);
        assert_eq!(geometry, CellGeometry { width: 0, height: 0 });
    }

    #[test]
    fn tiny_canvas_collapses_to_zero() {
        let plan = LayoutPlan { rows: 2, cols: 3 };
        let geometry = cell_geometry(CanvasSize::new(4, 4), plan, 2);
        assert_eq!(geometry, CellGeometry { width: 0, height: 0 });
    }
}
