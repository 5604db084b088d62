// Drag model for the spreadsheet-style contact table. Pointer-down captures
// the starting width and cursor x, pointer-move applies the clamped delta,
// pointer-up commits. Widths live in component state and are not persisted.

pub const MIN_COLUMN_WIDTH: f64 = 80.0;
pub const DEFAULT_COLUMN_WIDTH: f64 = 180.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnDrag {
    pub column: usize,
    pub start_width: f64,
    pub start_x: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnWidths {
    widths: Vec<f64>,
}

impl ColumnWidths {
    pub fn new(columns: usize) -> Self {
        Self {
            widths: vec![DEFAULT_COLUMN_WIDTH; columns],
        }
    }

    pub fn width(&self, column: usize) -> f64 {
        self.widths.get(column).copied().unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    pub fn begin_drag(&self, column: usize, pointer_x: f64) -> ColumnDrag {
        ColumnDrag {
            column,
            start_width: self.width(column),
            start_x: pointer_x,
        }
    }

    /// width = max(MIN_COLUMN_WIDTH, start_width + dx)
    pub fn drag_to(&mut self, drag: &ColumnDrag, pointer_x: f64) {
        if let Some(width) = self.widths.get_mut(drag.column) {
            *width = (drag.start_width + pointer_x - drag.start_x).max(MIN_COLUMN_WIDTH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_applies_delta_to_start_width() {
        let mut widths = ColumnWidths::new(4);
        let drag = widths.begin_drag(1, 400.0);
        widths.drag_to(&drag, 460.0);
        assert_eq!(widths.width(1), DEFAULT_COLUMN_WIDTH + 60.0);
    }

    #[test]
    fn drag_never_shrinks_below_minimum() {
        let mut widths = ColumnWidths::new(4);
        let drag = widths.begin_drag(2, 400.0);
        widths.drag_to(&drag, -1000.0);
        assert_eq!(widths.width(2), MIN_COLUMN_WIDTH);
    }

    #[test]
    fn drag_is_relative_to_capture_not_last_move() {
        let mut widths = ColumnWidths::new(4);
        let drag = widths.begin_drag(0, 100.0);
        widths.drag_to(&drag, 150.0);
        widths.drag_to(&drag, 120.0);
        assert_eq!(widths.width(0), DEFAULT_COLUMN_WIDTH + 20.0);
    }

    #[test]
    fn other_columns_are_untouched() {
        let mut widths = ColumnWidths::new(3);
        let drag = widths.begin_drag(0, 0.0);
        widths.drag_to(&drag, 75.0);
        assert_eq!(widths.width(1), DEFAULT_COLUMN_WIDTH);
        assert_eq!(widths.width(2), DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn out_of_range_column_is_ignored() {
        let mut widths = ColumnWidths::new(2);
        let drag = widths.begin_drag(9, 0.0);
        widths.drag_to(&drag, 50.0);
        assert_eq!(widths.width(9), DEFAULT_COLUMN_WIDTH);
    }
}
