mod button;

pub use button::{Button, ButtonAction};

use macroquad::prelude::{screen_height, screen_width};

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 36.0;
const BUTTON_SPACING: f32 = 46.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the grid area
pub fn grid_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the height of the grid area
pub fn grid_area_height() -> f32 {
    screen_height()
}

/// Board sizes reachable with the size keys, as (rows, cols)
pub const GRID_SIZES: &[(usize, usize)] = &[
    (20, 20),
    (40, 60),
    (50, 50),
    (60, 80),
    (75, 100),
];

/// Create the control buttons stacked down the panel
pub fn create_buttons() -> Vec<Button> {
    let px = panel_x();
    ButtonAction::all()
        .into_iter()
        .enumerate()
        .map(|(i, action)| {
            Button::new(px, 20.0 + i as f32 * BUTTON_SPACING, PANEL_WIDTH, BUTTON_HEIGHT, action)
        })
        .collect()
}
