/// Pixel rectangle occupied by one cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything a renderer needs to paint one cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellView {
    pub x: usize,
    pub y: usize,
    pub bounds: CellBounds,
    pub alive: bool,
    pub lifetime: u32,
}

/// Sink notified every time a cell's alive flag is written.
/// Colors are the renderer's business; the engine only reports state.
pub trait Renderer {
    /// Surface size in pixels, set whenever the grid is reallocated
    fn set_size(&mut self, width: f32, height: f32);

    fn size(&self) -> (f32, f32);

    fn draw_cell(&mut self, cell: &CellView);
}

/// Renderer that discards draw calls, for headless runs
#[derive(Debug, Default)]
pub struct NullRenderer {
    width: f32,
    height: f32,
}

impl Renderer for NullRenderer {
    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn draw_cell(&mut self, _cell: &CellView) {}
}
