use std::time::Duration;

use macroquad::prelude::*;
use tracing::{Level, error, warn};

use lifeboard::{
    IntervalScheduler, LifeConfig, RunState, Simulation, SimulationEvent,
    input::{self, PatternPicker},
    rendering::{self, CanvasRenderer},
    ui,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Conway's Game of Life".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = LifeConfig::from_env().unwrap_or_else(|err| {
        error!("Invalid configuration, using defaults: {}", err);
        LifeConfig::default()
    });

    let renderer = CanvasRenderer::new(config.show_grid_lines);
    let mut simulation = match Simulation::new(&config, renderer, IntervalScheduler::new()) {
        Ok(simulation) => simulation,
        Err(err) => {
            error!("Could not create simulation: {}", err);
            return;
        }
    };
    let events = simulation.subscribe();

    let mut picker = PatternPicker::default();
    let mut generation = 0;
    let mut status = String::new();

    loop {
        let mouse_pos = mouse_position();
        let buttons = ui::create_buttons();

        let mut commands = input::button_commands(&buttons, mouse_pos);
        commands.extend(input::keyboard_commands());

        for command in commands {
            match input::execute(&mut simulation, command, &config, &mut picker, mouse_pos) {
                Ok(Some(message)) => status = message,
                Ok(None) => status.clear(),
                Err(err) => {
                    warn!(?command, "Command rejected: {}", err);
                    status = err.to_string();
                }
            }
        }

        if let Err(err) = input::handle_mouse_paint(&mut simulation, mouse_pos) {
            warn!("Paint rejected: {}", err);
        }

        simulation.pump(Duration::from_secs_f32(get_frame_time()));

        for event in events.try_iter() {
            match event {
                SimulationEvent::GenerationAdvanced { generation: g } => generation = g,
                SimulationEvent::RunStateChanged { state: RunState::Stopped } => generation = 0,
                _ => {}
            }
        }

        clear_background(BLACK);
        simulation.renderer().present();
        rendering::draw_controls(
            &simulation,
            &buttons,
            mouse_pos,
            generation,
            picker.current(),
            &status,
        );

        next_frame().await;
    }
}
