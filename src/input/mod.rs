use macroquad::prelude::*;
use tracing::info;

use crate::application::{LifeConfig, Renderer, RunState, Scheduler, Simulation};
use crate::domain::{Pattern, presets};
use crate::error::{LifeError, LifeResult};
use crate::rendering::CanvasRenderer;
use crate::ui::{Button, ButtonAction, GRID_SIZES};

/// Front-end requests resolved from keys and buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start when stopped, otherwise pause/resume
    PlayPause,
    Start,
    TogglePause,
    Stop,
    Advance,
    Clear,
    Randomize,
    ToggleWrap,
    ToggleGridLines,
    CycleStrategy,
    SizeDown,
    SizeUp,
    NextPattern,
    /// Place the selected preset at the cursor
    StampPattern,
    Save,
    Open,
}

/// Preset selection for stamping
#[derive(Clone, Debug)]
pub struct PatternPicker {
    patterns: Vec<Pattern>,
    selected: usize,
}

impl Default for PatternPicker {
    fn default() -> Self {
        Self {
            patterns: presets::all_patterns(),
            selected: 0,
        }
    }
}

impl PatternPicker {
    pub fn current(&self) -> &Pattern {
        &self.patterns[self.selected]
    }

    /// Select the following preset, wrapping to the first
    pub fn cycle(&mut self) -> &Pattern {
        self.selected = (self.selected + 1) % self.patterns.len();
        self.current()
    }
}

impl From<ButtonAction> for Command {
    fn from(action: ButtonAction) -> Self {
        match action {
            ButtonAction::Play => Command::Start,
            ButtonAction::Pause => Command::TogglePause,
            ButtonAction::Stop => Command::Stop,
            ButtonAction::Step => Command::Advance,
            ButtonAction::Clear => Command::Clear,
            ButtonAction::Random => Command::Randomize,
            ButtonAction::Wrap => Command::ToggleWrap,
            ButtonAction::Save => Command::Save,
            ButtonAction::Open => Command::Open,
        }
    }
}

/// Whether a mouse position lies on the board surface
fn on_surface<R: Renderer, S: Scheduler>(
    simulation: &Simulation<R, S>,
    mouse_pos: (f32, f32),
    area_width: f32,
) -> bool {
    let (width, height) = simulation.renderer().size();
    mouse_pos.0 >= 0.0
        && mouse_pos.1 >= 0.0
        && mouse_pos.0 < width.min(area_width)
        && mouse_pos.1 < height
}

/// Paint with the left button, erase with the right. Positions off the
/// board surface are ignored rather than sent to the simulation.
pub fn handle_mouse_paint<S: Scheduler>(
    simulation: &mut Simulation<CanvasRenderer, S>,
    mouse_pos: (f32, f32),
) -> LifeResult<()> {
    let alive = if is_mouse_button_down(MouseButton::Left) {
        true
    } else if is_mouse_button_down(MouseButton::Right) {
        false
    } else {
        return Ok(());
    };

    if !on_surface(simulation, mouse_pos, crate::ui::grid_area_width()) {
        return Ok(());
    }
    simulation.set_cell_at_pixel(mouse_pos.0, mouse_pos.1, alive)
}

/// Commands for keys pressed this frame
pub fn keyboard_commands() -> Vec<Command> {
    let bindings: [(KeyCode, Command); 14] = [
        (KeyCode::Space, Command::PlayPause),
        (KeyCode::N, Command::Advance),
        (KeyCode::Escape, Command::Stop),
        (KeyCode::C, Command::Clear),
        (KeyCode::R, Command::Randomize),
        (KeyCode::W, Command::ToggleWrap),
        (KeyCode::G, Command::ToggleGridLines),
        (KeyCode::P, Command::CycleStrategy),
        (KeyCode::LeftBracket, Command::SizeDown),
        (KeyCode::RightBracket, Command::SizeUp),
        (KeyCode::Tab, Command::NextPattern),
        (KeyCode::T, Command::StampPattern),
        (KeyCode::S, Command::Save),
        (KeyCode::O, Command::Open),
    ];

    bindings
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|(_, command)| *command)
        .collect()
}

/// Commands for buttons clicked this frame
pub fn button_commands(buttons: &[Button], mouse_pos: (f32, f32)) -> Vec<Command> {
    buttons
        .iter()
        .filter(|btn| btn.is_clicked(mouse_pos))
        .map(|btn| Command::from(btn.action()))
        .collect()
}

/// Neighbouring preset size, stepping from the current board
pub fn next_grid_size(current: (usize, usize), up: bool) -> (usize, usize) {
    let cells = current.0 * current.1;
    let found = if up {
        GRID_SIZES.iter().find(|(r, c)| r * c > cells)
    } else {
        GRID_SIZES.iter().rev().find(|(r, c)| r * c < cells)
    };
    found.copied().unwrap_or(current)
}

/// Place the selected preset with its top-left corner under the cursor
pub fn stamp_pattern<R: Renderer, S: Scheduler>(
    simulation: &mut Simulation<R, S>,
    picker: &PatternPicker,
    mouse_pos: (f32, f32),
    area_width: f32,
) -> LifeResult<String> {
    let pattern = picker.current();
    if !on_surface(simulation, mouse_pos, area_width) {
        let unit = simulation.unit_size();
        return Err(LifeError::InvalidCoordinate {
            x: (mouse_pos.0 / unit).floor() as i64,
            y: (mouse_pos.1 / unit).floor() as i64,
            cols: simulation.grid().cols(),
            rows: simulation.grid().rows(),
        });
    }
    simulation.place_pattern_at_pixel(pattern, mouse_pos.0, mouse_pos.1)?;
    Ok(format!("Placed {}", pattern.name))
}

/// Run one command. Returns a status line for the panel when there is
/// something worth showing.
pub fn execute<S: Scheduler>(
    simulation: &mut Simulation<CanvasRenderer, S>,
    command: Command,
    config: &LifeConfig,
    picker: &mut PatternPicker,
    mouse_pos: (f32, f32),
) -> LifeResult<Option<String>> {
    let status = match command {
        Command::PlayPause if simulation.run_state() == RunState::Stopped => {
            simulation.start()?;
            None
        }
        Command::PlayPause | Command::TogglePause => {
            let paused = simulation.toggle_pause()?;
            Some(if paused { "Paused" } else { "Resumed" }.to_string())
        }
        Command::Start => {
            simulation.start()?;
            None
        }
        Command::Stop => {
            simulation.stop();
            None
        }
        Command::Advance => {
            simulation.advance();
            None
        }
        Command::Clear => {
            simulation.clear();
            None
        }
        Command::Randomize => {
            simulation.randomize(0.3, &mut ::rand::rng())?;
            None
        }
        Command::ToggleWrap => {
            let wrap = simulation.toggle_wrap();
            Some(format!("Wrap {}", if wrap { "on" } else { "off" }))
        }
        Command::ToggleGridLines => {
            simulation.renderer_mut().toggle_grid_lines();
            None
        }
        Command::CycleStrategy => {
            let strategy = simulation.strategy().next();
            simulation.set_strategy(strategy);
            Some(format!("Stepping: {}", strategy.name()))
        }
        Command::SizeDown | Command::SizeUp => {
            let (rows, cols) =
                next_grid_size(simulation.grid().dimensions(), command == Command::SizeUp);
            simulation.resize(rows, cols)?;
            None
        }
        Command::NextPattern => {
            let pattern = picker.cycle();
            Some(format!("Pattern: {}", pattern.name))
        }
        Command::StampPattern => Some(stamp_pattern(
            simulation,
            picker,
            mouse_pos,
            crate::ui::grid_area_width(),
        )?),
        Command::Save => {
            std::fs::write(&config.save_path, simulation.export_state())?;
            info!("💾 Saved board to {}", config.save_path.display());
            Some(format!("Saved {}", config.save_path.display()))
        }
        Command::Open => {
            let text = std::fs::read_to_string(&config.save_path)?;
            simulation.import_state(&text)?;
            Some(format!("Opened {}", config.save_path.display()))
        }
    };
    Ok(status)
}
