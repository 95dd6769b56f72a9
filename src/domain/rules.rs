use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::Cell;

/// Trait for cellular automaton rules.
/// Implementations must be pure: the result depends only on the arguments.
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &str;

    /// Apply rule to compute next cell state from the number of alive neighbours
    fn evolve(&self, current: Cell, neighbors: u8) -> Cell;
}

/// Set of neighbour counts (0..=8) stored as a bitmask
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct NeighborSet(u16);

impl NeighborSet {
    pub const EMPTY: NeighborSet = NeighborSet(0);

    /// Build a set from counts; counts above 8 are ignored
    pub fn from_counts(counts: &[u8]) -> Self {
        let mask = counts
            .iter()
            .filter(|&&n| n <= 8)
            .fold(0u16, |mask, &n| mask | (1 << n));
        Self(mask)
    }

    #[inline]
    pub const fn contains(self, count: u8) -> bool {
        count <= 8 && self.0 & (1 << count) != 0
    }

    pub fn counts(self) -> impl Iterator<Item = u8> {
        (0..=8u8).filter(move |&n| self.contains(n))
    }
}

/// What happens to a live cell that survives a step
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Aging {
    /// Keeps its current state value
    #[default]
    Keep,
    /// Moves to the next state, saturating at the last one
    Advance,
}

/// Life-like rule set: birth/survival neighbour counts generalised to
/// `states` alive states. Any alive state counts as a live neighbour.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RuleSet {
    name: String,
    pub birth: NeighborSet,
    pub survival: NeighborSet,
    /// Number of alive states; cell values range over 0..=states
    pub states: u32,
    pub aging: Aging,
}

impl RuleSet {
    pub fn new(name: impl Into<String>, birth: &[u8], survival: &[u8]) -> Self {
        Self {
            name: name.into(),
            birth: NeighborSet::from_counts(birth),
            survival: NeighborSet::from_counts(survival),
            states: 1,
            aging: Aging::Keep,
        }
    }

    /// Use `states` alive states with the given survival behaviour
    pub fn with_states(mut self, states: u32, aging: Aging) -> Self {
        self.states = states;
        self.aging = aging;
        self
    }

    /// Conway's Game of Life (B3/S23)
    pub fn conway() -> Self {
        Self::new("Conway", &[3], &[2, 3])
    }

    /// HighLife (B36/S23), has replicators
    pub fn highlife() -> Self {
        Self::new("HighLife", &[3, 6], &[2, 3])
    }

    /// Seeds (B2/S), every live cell dies each generation
    pub fn seeds() -> Self {
        Self::new("Seeds", &[2], &[])
    }

    /// Day & Night (B3678/S34678)
    pub fn day_and_night() -> Self {
        Self::new("Day&Night", &[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    /// Life-like rule with two alive states: survivors age from 1 to 2
    pub fn aging_life() -> Self {
        Self::new("Aging", &[3], &[2, 3]).with_states(2, Aging::Advance)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::conway()
    }
}

impl Rule for RuleSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn evolve(&self, current: Cell, neighbors: u8) -> Cell {
        if current.is_alive() {
            if !self.survival.contains(neighbors) {
                return Cell::DEAD;
            }
            match self.aging {
                Aging::Keep => current,
                Aging::Advance => current.advanced(self.states),
            }
        } else if self.birth.contains(neighbors) {
            Cell::ALIVE
        } else {
            Cell::DEAD
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in self.birth.counts() {
            write!(f, "{n}")?;
        }
        write!(f, "/S")?;
        for n in self.survival.counts() {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("expected `B<digits>/S<digits>`, got {0:?}")]
    Malformed(String),
    #[error("neighbour count {0} is out of range 0..=8")]
    CountOutOfRange(char),
}

fn parse_counts(digits: &str) -> Result<Vec<u8>, RuleParseError> {
    digits
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(n) if n <= 8 => Ok(n as u8),
            _ => Err(RuleParseError::CountOutOfRange(c)),
        })
        .collect()
}

impl FromStr for RuleSet {
    type Err = RuleParseError;

    /// Parses `B3/S23` style notation (case-insensitive, either order)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RuleParseError::Malformed(s.to_string());
        let (first, second) = s.trim().split_once('/').ok_or_else(malformed)?;

        let mut birth = None;
        let mut survival = None;
        for part in [first, second] {
            let mut chars = part.chars();
            match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') if birth.is_none() => birth = Some(parse_counts(chars.as_str())?),
                Some('S') if survival.is_none() => survival = Some(parse_counts(chars.as_str())?),
                _ => return Err(malformed()),
            }
        }

        let (birth, survival) = birth.zip(survival).ok_or_else(malformed)?;
        let name = s.trim().to_ascii_uppercase();
        Ok(Self::new(name, &birth, &survival))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conway_rules() {
        let rule = RuleSet::conway();

        // Underpopulation
        assert_eq!(rule.evolve(Cell::ALIVE, 0), Cell::DEAD);
        assert_eq!(rule.evolve(Cell::ALIVE, 1), Cell::DEAD);

        // Survival
        assert_eq!(rule.evolve(Cell::ALIVE, 2), Cell::ALIVE);
        assert_eq!(rule.evolve(Cell::ALIVE, 3), Cell::ALIVE);

        // Overpopulation
        assert_eq!(rule.evolve(Cell::ALIVE, 4), Cell::DEAD);
        assert_eq!(rule.evolve(Cell::ALIVE, 8), Cell::DEAD);

        // Reproduction
        assert_eq!(rule.evolve(Cell::DEAD, 3), Cell::ALIVE);
        assert_eq!(rule.evolve(Cell::DEAD, 2), Cell::DEAD);
    }

    #[test]
    fn test_highlife_reproduction() {
        let rule = RuleSet::highlife();
        assert_eq!(rule.evolve(Cell::DEAD, 6), Cell::ALIVE);
        assert_eq!(rule.evolve(Cell::DEAD, 3), Cell::ALIVE);
    }

    #[test]
    fn test_seeds_always_dies() {
        let rule = RuleSet::seeds();
        assert_eq!(rule.evolve(Cell::ALIVE, 0), Cell::DEAD);
        assert_eq!(rule.evolve(Cell::ALIVE, 2), Cell::DEAD);
        assert_eq!(rule.evolve(Cell::ALIVE, 8), Cell::DEAD);
        assert_eq!(rule.evolve(Cell::DEAD, 2), Cell::ALIVE);
        assert_eq!(rule.evolve(Cell::DEAD, 3), Cell::DEAD);
    }

    #[test]
    fn test_day_and_night_extended_birth() {
        let rule = RuleSet::day_and_night();
        for n in [3, 6, 7, 8] {
            assert_eq!(rule.evolve(Cell::DEAD, n), Cell::ALIVE, "birth at {n}");
        }
        for n in [2, 4, 5] {
            assert_eq!(rule.evolve(Cell::DEAD, n), Cell::DEAD, "no birth at {n}");
        }
        assert_eq!(rule.evolve(Cell::ALIVE, 4), Cell::ALIVE);
        assert_eq!(rule.evolve(Cell::ALIVE, 8), Cell::ALIVE);
        assert_eq!(rule.evolve(Cell::ALIVE, 5), Cell::DEAD);
        assert_eq!(rule.evolve(Cell::ALIVE, 2), Cell::DEAD);
        assert_eq!(rule.to_string(), "B3678/S34678");
    }

    #[test]
    fn test_multi_state_survivors() {
        let keep = RuleSet::conway().with_states(2, Aging::Keep);
        assert_eq!(keep.evolve(Cell(2), 2), Cell(2));

        let aging = RuleSet::aging_life();
        assert_eq!(aging.evolve(Cell(1), 2), Cell(2));
        assert_eq!(aging.evolve(Cell(2), 3), Cell(2));
        assert_eq!(aging.evolve(Cell(2), 4), Cell::DEAD);
        // Births always start at state 1
        assert_eq!(aging.evolve(Cell::DEAD, 3), Cell::ALIVE);
    }

    #[test]
    fn test_parse_and_display() {
        let rule: RuleSet = "B36/S23".parse().unwrap();
        assert_eq!(rule.birth, RuleSet::highlife().birth);
        assert_eq!(rule.survival, RuleSet::highlife().survival);
        assert_eq!(rule.to_string(), "B36/S23");

        let reversed: RuleSet = "s23/b3".parse().unwrap();
        assert_eq!(reversed.to_string(), "B3/S23");

        let seeds: RuleSet = "B2/S".parse().unwrap();
        assert_eq!(seeds.survival, NeighborSet::EMPTY);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!("B3S23".parse::<RuleSet>(), Err(RuleParseError::Malformed(_))));
        assert!(matches!("B3/B2".parse::<RuleSet>(), Err(RuleParseError::Malformed(_))));
        assert_eq!("B9/S23".parse::<RuleSet>(), Err(RuleParseError::CountOutOfRange('9')));
    }

    #[test]
    fn test_neighbor_set_ignores_out_of_range() {
        let set = NeighborSet::from_counts(&[3, 9, 12]);
        assert!(set.contains(3));
        assert!(!set.contains(9));
        assert_eq!(set.counts().collect::<Vec<_>>(), vec![3]);
    }
}
