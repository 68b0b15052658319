/// Cell is the fundamental unit of the board.
/// It tracks whether it is alive and for how many consecutive
/// generations it has stayed alive.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    alive: bool,
    lifetime: u32,
}

impl Cell {
    /// A dead cell with no history
    pub const fn new() -> Self {
        Self {
            alive: false,
            lifetime: 0,
        }
    }

    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        self.alive
    }

    /// Consecutive generations this cell has been alive
    pub const fn lifetime(self) -> u32 {
        self.lifetime
    }

    /// Set the alive flag. Every call with `true` counts as one more
    /// generation alive; `false` resets the lifetime.
    pub fn set_state(&mut self, alive: bool) {
        self.alive = alive;
        self.lifetime = if alive {
            self.lifetime.saturating_add(1)
        } else {
            0
        };
    }

    /// Flip the alive flag. Becoming alive this way does not count a generation.
    pub fn toggle_state(&mut self) {
        self.alive = !self.alive;
        if !self.alive {
            self.lifetime = 0;
        }
    }

    /// Conway's rule (B3/S23):
    /// 1. Live cell with 2-3 neighbors survives
    /// 2. Dead cell with exactly 3 neighbors becomes alive
    /// 3. All other cases result in death
    pub const fn next_alive(alive: bool, neighbors: u8) -> bool {
        matches!((alive, neighbors), (true, 2 | 3) | (false, 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underpopulation() {
        assert!(!Cell::next_alive(true, 0));
        assert!(!Cell::next_alive(true, 1));
    }

    #[test]
    fn test_survival() {
        assert!(Cell::next_alive(true, 2));
        assert!(Cell::next_alive(true, 3));
    }

    #[test]
    fn test_overpopulation() {
        for n in 4..=8 {
            assert!(!Cell::next_alive(true, n));
        }
    }

    #[test]
    fn test_reproduction() {
        assert!(Cell::next_alive(false, 3));
        for n in [0, 1, 2, 4, 5, 6, 7, 8] {
            assert!(!Cell::next_alive(false, n));
        }
    }

    #[test]
    fn test_lifetime_counts_each_alive_set() {
        let mut cell = Cell::new();
        cell.set_state(true);
        assert_eq!(cell.lifetime(), 1);
        cell.set_state(true);
        cell.set_state(true);
        assert_eq!(cell.lifetime(), 3);
        cell.set_state(false);
        assert!(!cell.is_alive());
        assert_eq!(cell.lifetime(), 0);
    }

    #[test]
    fn test_toggle_does_not_count_generation() {
        let mut cell = Cell::new();
        cell.toggle_state();
        assert!(cell.is_alive());
        assert_eq!(cell.lifetime(), 0);

        cell.set_state(true);
        assert_eq!(cell.lifetime(), 1);
        cell.toggle_state();
        assert!(!cell.is_alive());
        assert_eq!(cell.lifetime(), 0);
    }
}
