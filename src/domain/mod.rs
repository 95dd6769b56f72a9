mod algorithm;
mod cell;
mod double_buffer;
mod grid;
mod patterns;
mod rule_engine;
mod rules;
mod seeder;

pub use algorithm::Algorithm;
pub use cell::Cell;
pub use double_buffer::GridStateStore;
pub use grid::Grid;
pub use patterns::{Pattern, presets};
pub use rule_engine::{RuleEngine, count_live_neighbors};
pub use rules::{Aging, NeighborSet, Rule, RuleParseError, RuleSet};
pub use seeder::Seeder;
