use macroquad::prelude::*;

use crate::application::{CellView, Renderer, RunState, Scheduler, Simulation};
use crate::domain::Pattern;
use crate::ui::{Button, PANEL_WIDTH, grid_area_height, grid_area_width, panel_x};

/// Retained canvas: the simulation paints cells into it as they change
/// and `present` replays the latest paint of every cell each frame.
#[derive(Default)]
pub struct CanvasRenderer {
    width: f32,
    height: f32,
    cols: usize,
    cells: Vec<Option<CellView>>,
    show_grid_lines: bool,
}

impl CanvasRenderer {
    pub fn new(show_grid_lines: bool) -> Self {
        Self {
            show_grid_lines,
            ..Self::default()
        }
    }

    pub fn show_grid_lines(&self) -> bool {
        self.show_grid_lines
    }

    /// Returns the new setting. Takes effect on the next present.
    pub fn toggle_grid_lines(&mut self) -> bool {
        self.show_grid_lines = !self.show_grid_lines;
        self.show_grid_lines
    }

    /// Draw the canvas into the grid area
    pub fn present(&self) {
        let alive_color = Color::from_rgba(0, 255, 150, 255);
        let dead_color = Color::from_rgba(40, 40, 40, 255);
        let grid_line_color = Color::from_rgba(0, 0, 0, 255);
        let area_width = grid_area_width();
        let area_height = grid_area_height();

        for view in self.cells.iter().flatten() {
            let b = view.bounds;
            // Skip cells outside the visible area
            if b.x > area_width || b.y > area_height {
                continue;
            }

            let color = if view.alive { alive_color } else { dead_color };
            draw_rectangle(b.x, b.y, b.width, b.height, color);

            if self.show_grid_lines {
                draw_rectangle_lines(b.x, b.y, b.width, b.height, 1.0, grid_line_color);
            }
        }
    }
}

impl Renderer for CanvasRenderer {
    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.cols = 0;
        self.cells.clear();
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn draw_cell(&mut self, cell: &CellView) {
        if self.cols == 0 {
            self.cols = (self.width / cell.bounds.width).round().max(1.0) as usize;
        }
        let index = cell.y * self.cols + cell.x;
        if index >= self.cells.len() {
            self.cells.resize(index + 1, None);
        }
        self.cells[index] = Some(*cell);
    }
}

/// Helper to draw text labels
fn draw_text_label(text: &str, x: f32, y: f32, size: f32, color: Color) {
    draw_text(text, x, y, size, color);
}

/// Draw the control panel with buttons and simulation info
pub fn draw_controls<S: Scheduler>(
    simulation: &Simulation<CanvasRenderer, S>,
    buttons: &[Button],
    mouse_pos: (f32, f32),
    generation: u64,
    pattern: &Pattern,
    status: &str,
) {
    draw_rectangle(
        panel_x(),
        0.0,
        PANEL_WIDTH,
        screen_height(),
        Color::from_rgba(30, 30, 30, 255),
    );

    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let px = panel_x() + 8.0;
    let (rows, cols) = simulation.grid().dimensions();
    let state = simulation.run_state();
    let state_color = match state {
        RunState::Running => Color::from_rgba(0, 255, 0, 255),
        RunState::Paused => Color::from_rgba(255, 165, 0, 255),
        RunState::Stopped => GRAY,
    };
    let on_off = |flag: bool| if flag { "on" } else { "off" };

    let labels = [
        ("Generation:".to_string(), 520.0, 16.0, WHITE),
        (generation.to_string(), 540.0, 20.0, Color::from_rgba(0, 255, 150, 255)),
        ("Status:".to_string(), 570.0, 16.0, WHITE),
        (state.to_string(), 588.0, 16.0, state_color),
        (format!("Grid: {}x{}", cols, rows), 615.0, 14.0, LIGHTGRAY),
        (format!("Alive: {}", simulation.population()), 632.0, 14.0, LIGHTGRAY),
        (format!("Wrap: {}", on_off(simulation.wrap())), 649.0, 14.0, LIGHTGRAY),
        (
            format!("Lines: {}", on_off(simulation.renderer().show_grid_lines())),
            666.0,
            14.0,
            LIGHTGRAY,
        ),
        (format!("Step: {}", simulation.strategy().name()), 683.0, 14.0, LIGHTGRAY),
        (format!("Pattern: {}", pattern.name), 700.0, 14.0, LIGHTGRAY),
        (pattern.description.to_string(), 714.0, 12.0, GRAY),
        ("LMB paint  RMB erase".to_string(), 736.0, 12.0, GRAY),
        ("Space start/pause  N step".to_string(), 750.0, 12.0, GRAY),
        ("[ ] size  G lines  P strategy".to_string(), 764.0, 12.0, GRAY),
        ("Tab pattern  T place".to_string(), 778.0, 12.0, GRAY),
    ];

    labels.iter().for_each(|(text, y, size, color)| {
        draw_text_label(text, px, *y, *size, *color);
    });

    if !status.is_empty() {
        draw_text_label(status, 8.0, screen_height() - 10.0, 16.0, YELLOW);
    }
}
