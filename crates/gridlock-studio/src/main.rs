use anyhow::Result;
use gridlock_engine::coords::{Rect, Vec2};
use gridlock_engine::core::{App, AppCtx};
use gridlock_engine::logging::{LoggingConfig, init_logging};
use gridlock_engine::paint::Color;
use gridlock_engine::window::{MouseButton, Runtime, RuntimeConfig};

mod display;
mod grid;

use display::{GridStyle, draw_grid, draw_gridlines};
use grid::{Cell, Grid};

// An example sudoku grid.
const PUZZLE: &str = "
0 4 0 0 0 0 1 7 9
0 0 2 0 0 8 0 5 4
0 0 6 0 0 5 0 0 8
0 8 0 0 7 0 9 1 0
0 5 0 0 9 0 0 3 0
0 1 9 0 6 0 0 4 0
3 0 0 4 0 0 7 0 0
5 7 0 1 0 0 2 0 0
9 2 8 0 0 0 0 6 0
";

struct StudioApp {
    grid: Grid<Cell>,
    style: GridStyle,
    show_grid: bool,
}

impl App for StudioApp {
    fn draw(&mut self, ctx: &AppCtx) {
        let area = Rect::from_origin_size(Vec2::zero(), ctx.window_size)
            .min_square()
            .resize_by(0.9);

        let mut g = ctx.graphics.begin();
        g.clear(Color::WHITE);

        if self.show_grid {
            draw_gridlines(&mut g, area, &self.style);
            draw_grid(&mut g, area, &self.grid, |g, item, cell_area, _location| {
                if let Some(n) = item {
                    g.write(
                        n.to_string(),
                        cell_area
                            .resize_vertical_by(0.8)
                            .translate_vertical_relative(0.05),
                        Color::DARK_GREY,
                    );
                }
            });
        }

        g.finish();
    }

    fn mouse_pressed(&mut self, ctx: &AppCtx, _button: MouseButton, _position: Vec2) {
        self.show_grid = !self.show_grid;
        self.draw(ctx);
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let app = StudioApp {
        grid: Grid::parse(PUZZLE),
        style: GridStyle::default(),
        show_grid: true,
    };

    Runtime::run(
        RuntimeConfig {
            title: "Sudoku Solver".to_string(),
            font_bytes: load_font(),
            ..RuntimeConfig::default()
        },
        app,
    )
}

fn load_font() -> Option<Vec<u8>> {
    let found = [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok());

    if found.is_none() {
        log::warn!("no system font found; grid numbers will not be drawn");
    }
    found
}
