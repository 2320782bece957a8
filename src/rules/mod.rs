//! Rule derivation: scanning, permutation expansion, grammar parsing.
//!
//! The pipeline runs once per parse:
//!
//! 1. [`scanner::scan`] finds candidate word runs on the grid.
//! 2. [`permute::expand_all`] expands stacked tiles into concrete sequences.
//! 3. [`parser::parse_rules`] parses sequences, filters semantically invalid
//!    rules, and deduplicates by tile signature.

pub mod parser;
pub mod permute;
pub mod scanner;

mod rule;

pub use parser::parse_rules;
pub use rule::{Condition, Effect, Rule, RuleSignature, Ruleset, RulesetDelta, Transformation};
pub use scanner::{Run, Slot};
