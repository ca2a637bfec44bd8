/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct used by the connection pass once
 * the particle count grows. It divides the viewport into square cells at least
 * as large as the connection radius, so every pair closer than that radius is
 * found by looking at a particle's own cell and its eight neighbors.
 *
 * Positions outside the viewport are clamped into the border cells. Clamping
 * only ever shrinks distances in cell space, so no close pair is missed.
 */

use nannou::prelude::Vec2;

pub struct SpatialGrid {
    pub cell_size: f32,
    pub columns: usize,
    pub rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let cell_size = cell_size.max(1.0);
        let columns = cells_along(width, cell_size);
        let rows = cells_along(height, cell_size);

        Self {
            cell_size,
            columns,
            rows,
            cells: vec![Vec::new(); columns * rows],
        }
    }

    // True if the grid was laid out for these dimensions
    pub fn fits(&self, cell_size: f32, width: f32, height: f32) -> bool {
        let cell_size = cell_size.max(1.0);
        self.cell_size == cell_size
            && self.columns == cells_along(width, cell_size)
            && self.rows == cells_along(height, cell_size)
    }

    // Convert viewport coordinates to (column, row), clamped to the grid
    #[inline]
    pub fn cell_coords(&self, pos: Vec2) -> (usize, usize) {
        let column = (pos.x / self.cell_size)
            .floor()
            .clamp(0.0, (self.columns - 1) as f32) as usize;
        let row = (pos.y / self.cell_size)
            .floor()
            .clamp(0.0, (self.rows - 1) as f32) as usize;
        (column, row)
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, index: usize, pos: Vec2) {
        let (column, row) = self.cell_coords(pos);
        self.cells[row * self.columns + column].push(index);
    }

    // Push every index stored in the 3x3 block of cells around pos into out
    pub fn collect_nearby(&self, pos: Vec2, out: &mut Vec<usize>) {
        let (column, row) = self.cell_coords(pos);

        let first_row = row.saturating_sub(1);
        let last_row = (row + 1).min(self.rows - 1);
        let first_column = column.saturating_sub(1);
        let last_column = (column + 1).min(self.columns - 1);

        for check_row in first_row..=last_row {
            let row_start = check_row * self.columns;
            for check_column in first_column..=last_column {
                out.extend_from_slice(&self.cells[row_start + check_column]);
            }
        }
    }
}

fn cells_along(extent: f32, cell_size: f32) -> usize {
    if extent.is_finite() && extent > 0.0 {
        ((extent / cell_size).ceil() as usize).max(1)
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec2;

    #[test]
    fn layout_covers_the_viewport() {
        let grid = SpatialGrid::new(120.0, 1000.0, 700.0);
        assert_eq!(grid.columns, 9);
        assert_eq!(grid.rows, 6);
        assert!(grid.fits(120.0, 1000.0, 700.0));
        assert!(!grid.fits(120.0, 1300.0, 700.0));
    }

    #[test]
    fn zero_sized_viewport_has_one_cell() {
        let grid = SpatialGrid::new(120.0, 0.0, 0.0);
        assert_eq!((grid.columns, grid.rows), (1, 1));
        assert_eq!(grid.cell_coords(vec2(50.0, 50.0)), (0, 0));
    }

    #[test]
    fn out_of_bounds_positions_clamp_to_border_cells() {
        let grid = SpatialGrid::new(100.0, 500.0, 500.0);
        assert_eq!(grid.cell_coords(vec2(-3.0, -3.0)), (0, 0));
        assert_eq!(grid.cell_coords(vec2(503.0, 250.0)), (4, 2));
    }

    #[test]
    fn nearby_lookup_spans_neighboring_cells_only() {
        let mut grid = SpatialGrid::new(100.0, 500.0, 500.0);
        grid.insert(0, vec2(150.0, 150.0)); // cell (1, 1)
        grid.insert(1, vec2(250.0, 250.0)); // cell (2, 2)
        grid.insert(2, vec2(450.0, 450.0)); // cell (4, 4)

        let mut nearby = Vec::new();
        grid.collect_nearby(vec2(150.0, 150.0), &mut nearby);
        nearby.sort_unstable();
        assert_eq!(nearby, vec![0, 1]);

        grid.clear();
        nearby.clear();
        grid.collect_nearby(vec2(150.0, 150.0), &mut nearby);
        assert!(nearby.is_empty());
    }
}
