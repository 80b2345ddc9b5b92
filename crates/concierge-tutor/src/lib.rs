//! Tutor agents for concierge
//!
//! A Triage Agent that hands each student question off to a Math Tutor
//! (which can solve linear equations) or a History Tutor. The model picks
//! the target; nothing here classifies questions locally.

pub mod agents;
pub mod equation;
pub mod tools;

pub use agents::{SEPARATOR_WIDTH, TUTOR_QUERIES, history_tutor, math_tutor, triage_agent};
pub use equation::{EquationError, Solution, solve};
pub use tools::{solve_equation, solve_equation_tool};
