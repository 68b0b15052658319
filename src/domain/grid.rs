use super::{Cell, StepStrategy};
use crate::error::{LifeError, LifeResult};
use rayon::prelude::*;

/// Offsets visited for each neighbour, column by column.
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Grid owns the row-major cell storage and answers adjacency queries.
/// With `wrap` set the board behaves like a torus; each axis wraps independently.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    wrap: bool,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(rows: usize, cols: usize) -> LifeResult<Self> {
        Self::check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            wrap: false,
            cells: vec![Cell::new(); rows * cols],
        })
    }

    /// Set wrap-around (builder pattern)
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    fn check_dimensions(rows: usize, cols: usize) -> LifeResult<()> {
        if rows == 0 || cols == 0 || rows.checked_mul(cols).is_none() {
            return Err(LifeError::InvalidDimensions { rows, cols });
        }
        Ok(())
    }

    /// Get grid dimensions as (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub const fn wrap(&self) -> bool {
        self.wrap
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Convert 2D coordinates to a row-major index
    pub fn coordinates_to_index(&self, x: usize, y: usize) -> LifeResult<usize> {
        if x >= self.cols || y >= self.rows {
            return Err(LifeError::InvalidCoordinate {
                x: x as i64,
                y: y as i64,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(y * self.cols + x)
    }

    /// Convert a row-major index back to (x, y)
    pub fn index_to_coordinates(&self, index: usize) -> LifeResult<(usize, usize)> {
        if index >= self.cells.len() {
            return Err(LifeError::InvalidIndex {
                index,
                len: self.cells.len(),
            });
        }
        Ok((index % self.cols, index / self.cols))
    }

    /// Reallocate to new dimensions. Prior contents are discarded even
    /// where the old and new boards overlap.
    pub fn resize(&mut self, rows: usize, cols: usize) -> LifeResult<()> {
        Self::check_dimensions(rows, cols)?;
        self.rows = rows;
        self.cols = cols;
        self.cells = vec![Cell::new(); rows * cols];
        Ok(())
    }

    pub fn cell(&self, x: usize, y: usize) -> LifeResult<&Cell> {
        let index = self.coordinates_to_index(x, y)?;
        Ok(&self.cells[index])
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> LifeResult<&mut Cell> {
        let index = self.coordinates_to_index(x, y)?;
        Ok(&mut self.cells[index])
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Step one coordinate along an axis, wrapping or dropping it at the edges.
    fn offset_axis(value: usize, delta: isize, len: usize, wrap: bool) -> Option<usize> {
        match delta {
            -1 if value == 0 => wrap.then(|| len - 1),
            1 if value + 1 == len => wrap.then_some(0),
            _ => Some(value.wrapping_add_signed(delta)),
        }
    }

    /// Indices of the neighbours of an in-range coordinate
    fn neighbor_indices(&self, x: usize, y: usize) -> impl Iterator<Item = usize> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = Self::offset_axis(x, dx, self.cols, self.wrap)?;
            let ny = Self::offset_axis(y, dy, self.rows, self.wrap)?;
            Some(ny * self.cols + nx)
        })
    }

    /// Up to eight neighbouring cells. Off-grid neighbours are dropped
    /// unless wrap is on. On boards narrower than three cells a wrapped
    /// neighbour may be the same cell more than once, or the cell itself.
    pub fn neighbors(&self, x: usize, y: usize) -> LifeResult<Vec<&Cell>> {
        self.coordinates_to_index(x, y)?;
        Ok(self
            .neighbor_indices(x, y)
            .map(|index| &self.cells[index])
            .collect())
    }

    pub fn alive_neighbor_count(&self, x: usize, y: usize) -> LifeResult<u8> {
        self.coordinates_to_index(x, y)?;
        Ok(self.count_alive_neighbors(x, y))
    }

    fn count_alive_neighbors(&self, x: usize, y: usize) -> u8 {
        self.neighbor_indices(x, y)
            .filter(|&index| self.cells[index].is_alive())
            .count() as u8
    }

    /// Next alive flag for every cell, computed entirely from the
    /// current generation. The grid itself is not touched.
    pub fn next_generation(&self, strategy: StepStrategy) -> Vec<bool> {
        let next = |index: usize| {
            let (x, y) = (index % self.cols, index / self.cols);
            let neighbors = self.count_alive_neighbors(x, y);
            Cell::next_alive(self.cells[index].is_alive(), neighbors)
        };

        match strategy {
            StepStrategy::Serial => (0..self.cells.len()).map(&next).collect(),
            StepStrategy::Parallel => (0..self.cells.len()).into_par_iter().map(&next).collect(),
        }
    }

    /// Alive flags in row-major order
    pub fn alive_flags(&self) -> Vec<bool> {
        self.cells.iter().map(|cell| cell.is_alive()).collect()
    }

    /// Number of alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (index % self.cols, index / self.cols, *cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&str], wrap: bool) -> Grid {
        let mut grid = Grid::new(rows.len(), rows[0].len()).unwrap().with_wrap(wrap);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '1' {
                    grid.cell_mut(x, y).unwrap().set_state(true);
                }
            }
        }
        grid
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(Grid::new(0, 3), Err(LifeError::InvalidDimensions { .. })));
        assert!(matches!(Grid::new(3, 0), Err(LifeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_index_conversion() {
        let grid = Grid::new(4, 5).unwrap();
        assert_eq!(grid.coordinates_to_index(3, 2).unwrap(), 13);
        assert_eq!(grid.index_to_coordinates(13).unwrap(), (3, 2));
        assert_eq!(grid.index_to_coordinates(19).unwrap(), (4, 3));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let grid = Grid::new(4, 5).unwrap();
        assert!(matches!(
            grid.coordinates_to_index(5, 0),
            Err(LifeError::InvalidCoordinate { x: 5, y: 0, cols: 5, rows: 4 })
        ));
        assert!(grid.coordinates_to_index(0, 4).is_err());
        assert!(matches!(
            grid.index_to_coordinates(20),
            Err(LifeError::InvalidIndex { index: 20, len: 20 })
        ));
        assert!(grid.neighbors(9, 9).is_err());
        assert!(grid.alive_neighbor_count(0, 9).is_err());
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut grid = grid_from(&["111", "111"], false);
        grid.resize(3, 4).unwrap();
        assert_eq!(grid.dimensions(), (3, 4));
        assert_eq!(grid.len(), 12);
        assert!(grid.cells().iter().all(|c| !c.is_alive() && c.lifetime() == 0));
    }

    #[test]
    fn test_resize_rejects_zero() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(grid.resize(0, 2).is_err());
        assert_eq!(grid.dimensions(), (2, 2));
    }

    #[test]
    fn test_neighbor_counts_without_wrap() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.neighbors(0, 0).unwrap().len(), 3);
        assert_eq!(grid.neighbors(1, 0).unwrap().len(), 5);
        assert_eq!(grid.neighbors(1, 1).unwrap().len(), 8);
        assert_eq!(grid.neighbors(2, 2).unwrap().len(), 3);
    }

    #[test]
    fn test_corner_wraps_diagonally() {
        let wrapped = grid_from(&["000", "000", "001"], true);
        assert_eq!(wrapped.neighbors(0, 0).unwrap().len(), 8);
        assert_eq!(wrapped.alive_neighbor_count(0, 0).unwrap(), 1);

        let flat = grid_from(&["000", "000", "001"], false);
        assert_eq!(flat.alive_neighbor_count(0, 0).unwrap(), 0);
    }

    #[test]
    fn test_edge_wraps_on_single_axis() {
        // (1, 0) with wrap sees the bottom row through its top edge only
        let grid = grid_from(&["0000", "0000", "0000", "1110"], true);
        assert_eq!(grid.alive_neighbor_count(1, 0).unwrap(), 3);
        // (3, 1) sees column 0 through its right edge
        let grid = grid_from(&["1000", "1000", "1000", "0000"], true);
        assert_eq!(grid.alive_neighbor_count(3, 1).unwrap(), 3);
    }

    #[test]
    fn test_single_cell_torus_sees_itself() {
        let grid = grid_from(&["1"], true);
        assert_eq!(grid.alive_neighbor_count(0, 0).unwrap(), 8);
        let grid = grid_from(&["1"], false);
        assert_eq!(grid.alive_neighbor_count(0, 0).unwrap(), 0);
    }

    #[test]
    fn test_next_generation_blinker() {
        let grid = grid_from(&["00000", "00100", "00100", "00100", "00000"], false);
        let next = grid.next_generation(StepStrategy::Serial);
        let expected = grid_from(&["00000", "00000", "01110", "00000", "00000"], false);
        assert_eq!(next, expected.alive_flags());
        // Grid itself untouched
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let grid = grid_from(
            &["0110100", "1011001", "0010110", "1100011", "0101010", "0011100"],
            true,
        );
        assert_eq!(
            grid.next_generation(StepStrategy::Serial),
            grid.next_generation(StepStrategy::Parallel)
        );
    }

    #[test]
    fn test_iter_cells_positions() {
        let grid = grid_from(&["01", "10"], false);
        let alive: Vec<_> = grid
            .iter_cells()
            .filter(|(_, _, c)| c.is_alive())
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(alive, vec![(1, 0), (0, 1)]);
    }
}
