//! Rule evaluation: inheritance, conditions, and world queries.
//!
//! Evaluators borrow the registry, map, and ruleset immutably; they are
//! rebuilt whenever the borrowed state changes (including against the
//! speculative working maps used during collision resolution).

mod conditions;
mod evaluator;
mod inheritance;

pub use conditions::ConditionEvaluator;
pub use evaluator::RuleEvaluator;
pub use inheritance::InheritanceResolver;
