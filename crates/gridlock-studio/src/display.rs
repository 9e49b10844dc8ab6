//! Drawing helpers for sudoku grids.

use gridlock_engine::coords::{Rect, Vec2};
use gridlock_engine::paint::Color;
use gridlock_engine::scene::Batch;

use crate::grid::{Grid, GridLocation, COLUMNS, ROWS};

/// Colors and thicknesses of the grid lines.
///
/// Minor lines separate cells; major lines separate the 3×3 boxes.
#[derive(Debug, Clone)]
pub struct GridStyle {
    pub minor_color: Color,
    pub major_color: Color,
    pub minor_thickness: f32,
    pub major_thickness: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            minor_color: Color::LIGHTER_GREY,
            major_color: Color::GREY,
            minor_thickness: 1.0,
            major_thickness: 2.0,
        }
    }
}

/// Draws the minor and major grid lines across `area`.
///
/// Endpoints are rounded to whole pixels so 1px lines stay crisp.
pub fn draw_gridlines(g: &mut Batch<'_>, area: Rect, style: &GridStyle) {
    let origin = area.top_left();
    let horizontal = area.size.horizontal();
    let vertical = area.size.vertical();

    for i in 0..=ROWS {
        let t = i as f32 / ROWS as f32;
        let h1 = (origin + horizontal * t).rounded();
        let h2 = (origin + vertical + horizontal * t).rounded();
        let v1 = (origin + vertical * t).rounded();
        let v2 = (origin + horizontal + vertical * t).rounded();

        g.line(h1, h2, style.minor_color, style.minor_thickness);
        g.line(v1, v2, style.minor_color, style.minor_thickness);
    }

    for i in 0..=3 {
        let t = i as f32 / 3.0;
        let h1 = (origin + horizontal * t).rounded();
        let h2 = (origin + vertical + horizontal * t).rounded();
        let v1 = (origin + vertical * t).rounded();
        let v2 = (origin + horizontal + vertical * t).rounded();

        g.line(h1, h2, style.major_color, style.major_thickness);
        g.line(v1, v2, style.major_color, style.major_thickness);
    }
}

/// Calls `draw_item` once per cell with the cell's item, its sub-rectangle of
/// `area`, and its location. Cells run left to right, top to bottom.
pub fn draw_grid<T>(
    g: &mut Batch<'_>,
    area: Rect,
    grid: &Grid<T>,
    mut draw_item: impl FnMut(&mut Batch<'_>, &T, Rect, GridLocation),
) {
    let cell = area.size / COLUMNS as f32;

    for row in 0..ROWS {
        for col in 0..COLUMNS {
            let location = GridLocation::from_row_col(row, col);
            let offset = area.top_left() + cell * Vec2::new(col as f32, row as f32);
            let cell_area = Rect::from_origin_size(offset, cell);
            draw_item(g, grid.get(location), cell_area, location);
        }
    }
}
