/// Cell is the value stored at one grid position.
/// 0 is dead, any non-zero value is one of the alive states.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Cell(pub u32);

impl Cell {
    pub const DEAD: Cell = Cell(0);
    pub const ALIVE: Cell = Cell(1);

    /// Check if the cell is currently alive (any non-zero state)
    pub const fn is_alive(self) -> bool {
        self.0 != 0
    }

    /// Raw state value
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Next alive state, saturating at `max_state`
    pub const fn advanced(self, max_state: u32) -> Self {
        if self.0 >= max_state {
            Cell(max_state)
        } else {
            Cell(self.0 + 1)
        }
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_dead() {
        assert!(!Cell::DEAD.is_alive());
        assert!(!Cell::default().is_alive());
    }

    #[test]
    fn test_every_nonzero_state_is_alive() {
        assert!(Cell(1).is_alive());
        assert!(Cell(2).is_alive());
        assert!(Cell(u32::MAX).is_alive());
    }

    #[test]
    fn test_advance_saturates() {
        assert_eq!(Cell(1).advanced(3), Cell(2));
        assert_eq!(Cell(3).advanced(3), Cell(3));
        assert_eq!(Cell(5).advanced(3), Cell(3));
    }
}
