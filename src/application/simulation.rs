use std::fmt;
use std::time::Duration;

use crossbeam_channel::Receiver;
use rand::Rng;
use tracing::{debug, info, warn};

use super::{
    CellBounds, CellView, EventBus, LifeConfig, Renderer, Scheduler, SimulationEvent, TickHandle,
};
use crate::domain::{Grid, ImportMode, Pattern, StepStrategy, format};
use crate::error::{LifeError, LifeResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl RunState {
    pub const fn name(self) -> &'static str {
        match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
            RunState::Paused => "paused",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Simulation owns the grid and drives it through generations.
/// It is the single point of mutation: every alive-flag write goes
/// through here so the renderer sees each one.
pub struct Simulation<R: Renderer, S: Scheduler> {
    grid: Grid,
    generation: u64,
    run_state: RunState,
    /// Alive flags captured when a run begins; present whenever not stopped
    snapshot: Option<Vec<bool>>,
    tick: Option<TickHandle>,
    tick_period: Duration,
    unit_size: f32,
    strategy: StepStrategy,
    import_mode: ImportMode,
    renderer: R,
    scheduler: S,
    events: EventBus,
}

impl<R: Renderer, S: Scheduler> Simulation<R, S> {
    pub fn new(config: &LifeConfig, renderer: R, scheduler: S) -> LifeResult<Self> {
        config.validate()?;
        let grid = Grid::new(config.rows, config.cols)?.with_wrap(config.wrap);

        let mut simulation = Self {
            grid,
            generation: 0,
            run_state: RunState::Stopped,
            snapshot: None,
            tick: None,
            tick_period: config.tick_period(),
            unit_size: config.unit_size,
            strategy: config.strategy,
            import_mode: config.import_mode,
            renderer,
            scheduler,
            events: EventBus::new(),
        };
        simulation.redraw_all();
        Ok(simulation)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    /// Whether a periodic tick is registered
    pub fn has_pending_tick(&self) -> bool {
        self.tick.is_some()
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn unit_size(&self) -> f32 {
        self.unit_size
    }

    pub fn strategy(&self) -> StepStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: StepStrategy) {
        self.strategy = strategy;
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Receive generation, run-state and reset notifications
    pub fn subscribe(&mut self) -> Receiver<SimulationEvent> {
        self.events.subscribe()
    }

    /// Cell at (x, y) as the renderer would see it
    pub fn cell_view(&self, x: usize, y: usize) -> LifeResult<CellView> {
        let index = self.grid.coordinates_to_index(x, y)?;
        Ok(self.view_of(index))
    }

    fn view_of(&self, index: usize) -> CellView {
        let cols = self.grid.cols();
        let (x, y) = (index % cols, index / cols);
        let cell = self.grid.cells()[index];
        CellView {
            x,
            y,
            bounds: CellBounds {
                x: x as f32 * self.unit_size,
                y: y as f32 * self.unit_size,
                width: self.unit_size,
                height: self.unit_size,
            },
            alive: cell.is_alive(),
            lifetime: cell.lifetime(),
        }
    }

    fn draw_index(&mut self, index: usize) {
        let view = self.view_of(index);
        self.renderer.draw_cell(&view);
    }

    /// Resize the surface to the grid and paint every cell
    fn redraw_all(&mut self) {
        let (rows, cols) = self.grid.dimensions();
        self.renderer
            .set_size(cols as f32 * self.unit_size, rows as f32 * self.unit_size);
        for index in 0..self.grid.len() {
            self.draw_index(index);
        }
    }

    fn set_run_state(&mut self, state: RunState) {
        if self.run_state != state {
            self.run_state = state;
            self.events.publish(SimulationEvent::RunStateChanged { state });
        }
    }

    fn capture_snapshot(&mut self) {
        self.snapshot = Some(self.grid.alive_flags());
    }

    /// Register the periodic tick, cancelling any previous registration first
    fn arm_tick(&mut self) -> LifeResult<()> {
        self.cancel_tick();
        self.tick = Some(self.scheduler.schedule_repeating(self.tick_period)?);
        Ok(())
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Paint a cell. The cell is cleared first, so painting an alive
    /// cell alive again restarts its lifetime.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> LifeResult<()> {
        let index = self.grid.coordinates_to_index(x, y)?;
        let cell = &mut self.grid.cells_mut()[index];
        cell.set_state(false);
        if alive {
            cell.set_state(true);
        }
        self.draw_index(index);
        Ok(())
    }

    /// Cell coordinates under a pixel position on the render surface
    fn cell_at_pixel(&self, pixel_x: f32, pixel_y: f32) -> LifeResult<(usize, usize)> {
        let x = (pixel_x / self.unit_size).floor();
        let y = (pixel_y / self.unit_size).floor();
        let (rows, cols) = self.grid.dimensions();

        let in_range = x >= 0.0 && y >= 0.0 && x < cols as f32 && y < rows as f32;
        if !in_range {
            return Err(LifeError::InvalidCoordinate {
                x: x as i64,
                y: y as i64,
                cols,
                rows,
            });
        }
        Ok((x as usize, y as usize))
    }

    /// Paint the cell under a pixel position on the render surface
    pub fn set_cell_at_pixel(&mut self, pixel_x: f32, pixel_y: f32, alive: bool) -> LifeResult<()> {
        let (x, y) = self.cell_at_pixel(pixel_x, pixel_y)?;
        self.set_cell(x, y, alive)
    }

    /// Flip a cell; returns its new alive flag
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> LifeResult<bool> {
        let index = self.grid.coordinates_to_index(x, y)?;
        let cell = &mut self.grid.cells_mut()[index];
        cell.toggle_state();
        let alive = cell.is_alive();
        self.draw_index(index);
        Ok(alive)
    }

    /// Begin a run: snapshot the board and start ticking
    pub fn start(&mut self) -> LifeResult<()> {
        if self.run_state != RunState::Stopped {
            return Err(LifeError::InvalidTransition {
                action: "start",
                state: self.run_state.name(),
            });
        }
        self.arm_tick()?;
        self.capture_snapshot();
        self.set_run_state(RunState::Running);
        info!("▶ Run started at generation {}", self.generation);
        Ok(())
    }

    /// Flip between running and paused; returns the resulting paused flag
    pub fn toggle_pause(&mut self) -> LifeResult<bool> {
        match self.run_state {
            RunState::Running => {
                self.cancel_tick();
                self.set_run_state(RunState::Paused);
                info!("⏸ Paused at generation {}", self.generation);
                Ok(true)
            }
            RunState::Paused => {
                self.arm_tick()?;
                self.set_run_state(RunState::Running);
                info!("▶ Resumed at generation {}", self.generation);
                Ok(false)
            }
            RunState::Stopped => Err(LifeError::InvalidTransition {
                action: "pause",
                state: self.run_state.name(),
            }),
        }
    }

    /// End the run and put the board back the way it was before it began
    pub fn stop(&mut self) {
        self.cancel_tick();
        self.generation = 0;

        if let Some(snapshot) = self.snapshot.take() {
            for index in 0..self.grid.len().min(snapshot.len()) {
                let cell = &mut self.grid.cells_mut()[index];
                cell.set_state(false);
                cell.set_state(snapshot[index]);
                self.draw_index(index);
            }
        }
        self.set_run_state(RunState::Stopped);
        info!("⏹ Stopped, board restored");
    }

    /// Step once by hand, leaving the simulation paused.
    /// Returns the new generation.
    pub fn advance(&mut self) -> u64 {
        match self.run_state {
            RunState::Stopped => self.capture_snapshot(),
            RunState::Running => self.cancel_tick(),
            RunState::Paused => {}
        }
        self.set_run_state(RunState::Paused);
        self.step();
        self.generation
    }

    /// Kill every cell. Generation and snapshot are left alone.
    pub fn clear(&mut self) {
        for index in 0..self.grid.len() {
            self.grid.cells_mut()[index].set_state(false);
            self.draw_index(index);
        }
    }

    /// Reallocate the board; all contents are discarded
    pub fn resize(&mut self, rows: usize, cols: usize) -> LifeResult<()> {
        self.reallocate(rows, cols)?;
        self.after_reset();
        Ok(())
    }

    fn reallocate(&mut self, rows: usize, cols: usize) -> LifeResult<()> {
        self.grid.resize(rows, cols)?;
        self.redraw_all();
        info!("📐 Grid resized to {}×{}", rows, cols);
        Ok(())
    }

    /// A run in progress keeps a snapshot matching the new board
    fn after_reset(&mut self) {
        if self.run_state != RunState::Stopped {
            warn!("Grid replaced while {}; snapshot re-captured", self.run_state);
            self.capture_snapshot();
        }
        let (rows, cols) = self.grid.dimensions();
        self.events.publish(SimulationEvent::GridReset { rows, cols });
    }

    pub fn wrap(&self) -> bool {
        self.grid.wrap()
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.grid.set_wrap(wrap);
    }

    /// Returns the new wrap flag
    pub fn toggle_wrap(&mut self) -> bool {
        let wrap = !self.grid.wrap();
        self.grid.set_wrap(wrap);
        wrap
    }

    /// Make each cell alive with probability `density`
    pub fn randomize<G: Rng>(&mut self, density: f64, rng: &mut G) -> LifeResult<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(LifeError::config(format!(
                "density must be within 0..=1, got {density}"
            )));
        }
        for index in 0..self.grid.len() {
            let alive = rng.random_bool(density);
            self.grid.cells_mut()[index].set_state(alive);
            self.draw_index(index);
        }
        Ok(())
    }

    /// Stamp a pattern with its top-left corner at (x, y)
    pub fn place_pattern(&mut self, pattern: &Pattern, x: usize, y: usize) -> LifeResult<()> {
        for index in pattern.place_on(&mut self.grid, x, y)? {
            self.draw_index(index);
        }
        Ok(())
    }

    /// Stamp a pattern with its top-left corner on the cell under a pixel
    pub fn place_pattern_at_pixel(
        &mut self,
        pattern: &Pattern,
        pixel_x: f32,
        pixel_y: f32,
    ) -> LifeResult<()> {
        let (x, y) = self.cell_at_pixel(pixel_x, pixel_y)?;
        self.place_pattern(pattern, x, y)?;
        debug!(pattern = pattern.name, x, y, "pattern placed");
        Ok(())
    }

    pub fn export_state(&self) -> String {
        format::export(&self.grid)
    }

    /// Replace the board with serialized text using the configured import mode
    pub fn import_state(&mut self, text: &str) -> LifeResult<()> {
        self.import_state_with(text, self.import_mode)
    }

    /// Nothing changes unless the whole text parses
    pub fn import_state_with(&mut self, text: &str, mode: ImportMode) -> LifeResult<()> {
        let board = format::import(text, mode)?;
        self.reallocate(board.rows, board.cols)?;
        for (index, alive) in board.alive.into_iter().enumerate() {
            self.grid.cells_mut()[index].set_state(alive);
            self.draw_index(index);
        }
        self.after_reset();
        info!("📂 Imported {}×{} board ({} alive)", board.rows, board.cols, self.population());
        Ok(())
    }

    /// Move the scheduler clock forward and step once if a tick came due.
    /// A stalled frame still yields a single step. Returns whether a step ran.
    pub fn pump(&mut self, elapsed: Duration) -> bool {
        self.scheduler.elapse(elapsed);
        let Some(handle) = self.tick else {
            return false;
        };
        let due = self.scheduler.take_due(handle);
        if due {
            self.step();
        }
        due
    }

    /// One generation: count every neighbourhood against the current
    /// board into a buffer, then apply the buffer.
    fn step(&mut self) {
        let next = self.grid.next_generation(self.strategy);
        for (index, alive) in next.into_iter().enumerate() {
            self.grid.cells_mut()[index].set_state(alive);
            self.draw_index(index);
        }

        self.generation += 1;
        debug!(
            generation = self.generation,
            population = self.grid.population(),
            "generation advanced"
        );
        self.events.publish(SimulationEvent::GenerationAdvanced {
            generation: self.generation,
        });
    }
}
