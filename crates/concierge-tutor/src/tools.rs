//! Math tools

use crate::equation::solve;
use concierge_tools::{FunctionTool, Param};

/// Solve a linear equation and describe the result in one sentence
///
/// Failures are reported in the returned text rather than as an error, so
/// the model can explain them to the student.
pub fn solve_equation(equation: &str) -> String {
    match solve(equation) {
        Ok(solution) => format!("The solution to the equation {equation} is {solution}"),
        Err(e) => format!("Error solving equation: {e}"),
    }
}

/// `solve_equation` as a model-callable tool
pub fn solve_equation_tool() -> FunctionTool {
    FunctionTool::new(
        "solve_equation",
        "Solves a simple linear equation of the form 'ax + b = c'.",
        |args| Ok(solve_equation(args.str("equation")?)),
    )
    .with_param(Param::string(
        "equation",
        "The equation to solve, e.g. '2*x + 3 = 7'",
    ))
}
