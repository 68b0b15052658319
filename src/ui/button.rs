use macroquad::prelude::*;

/// What a panel button does when clicked
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Play,
    Pause,
    Stop,
    Step,
    Clear,
    Random,
    Wrap,
    Save,
    Open,
}

impl ButtonAction {
    pub fn all() -> Vec<ButtonAction> {
        vec![
            ButtonAction::Play,
            ButtonAction::Pause,
            ButtonAction::Stop,
            ButtonAction::Step,
            ButtonAction::Clear,
            ButtonAction::Random,
            ButtonAction::Wrap,
            ButtonAction::Save,
            ButtonAction::Open,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ButtonAction::Play => "Play",
            ButtonAction::Pause => "Pause/Resume",
            ButtonAction::Stop => "Stop",
            ButtonAction::Step => "Step",
            ButtonAction::Clear => "Clear",
            ButtonAction::Random => "Random",
            ButtonAction::Wrap => "Wrap",
            ButtonAction::Save => "Save",
            ButtonAction::Open => "Open",
        }
    }
}

/// Panel button with hover highlight and click detection
#[derive(Clone)]
pub struct Button {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    action: ButtonAction,
}

impl Button {
    pub fn new(x: f32, y: f32, width: f32, height: f32, action: ButtonAction) -> Self {
        Self { x, y, width, height, action }
    }

    pub fn action(&self) -> ButtonAction {
        self.action
    }

    pub fn contains(&self, point: (f32, f32)) -> bool {
        point.0 >= self.x
            && point.0 <= self.x + self.width
            && point.1 >= self.y
            && point.1 <= self.y + self.height
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let color = if self.contains(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };

        draw_rectangle(self.x, self.y, self.width, self.height, color);
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 2.0, WHITE);

        let label = self.action.label();
        let text_size = measure_text(label, None, 20, 1.0);
        draw_text(
            label,
            self.x + (self.width - text_size.width) / 2.0,
            self.y + (self.height + text_size.height) / 2.0,
            20.0,
            WHITE,
        );
    }

    /// Check if button was clicked this frame
    pub fn is_clicked(&self, mouse_pos: (f32, f32)) -> bool {
        self.contains(mouse_pos) && is_mouse_button_pressed(MouseButton::Left)
    }
}
