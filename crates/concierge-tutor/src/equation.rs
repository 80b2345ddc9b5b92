//! Linear equation solver
//!
//! Accepts equations in one unknown built from numbers, a single-letter
//! variable, `+ - * /` and exactly one `=`:
//!
//! ```text
//! equation := side '=' side
//! side     := ['+'|'-'] term (('+'|'-') term)*
//! term     := factor (('*'|'/') factor)*      "2x" is read as 2*x
//! factor   := number | variable
//! ```
//!
//! Nothing is evaluated beyond this grammar. Arithmetic is exact
//! ([`Decimal`]) and every operation is overflow-checked.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Digits kept after the decimal point when printing a root
const DISPLAY_DECIMALS: u32 = 6;

/// Reasons an equation cannot be solved
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EquationError {
    #[error("equation is empty")]
    Empty,

    #[error("expected an '=' sign")]
    MissingEquals,

    #[error("expected exactly one '=' sign")]
    RepeatedEquals,

    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("unexpected '{0}'")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("number '{0}' is out of range")]
    NumberOutOfRange(String),

    #[error("the equation is not linear")]
    NonLinear,

    #[error("cannot divide by the unknown")]
    DivisionByVariable,

    #[error("division by zero")]
    DivisionByZero,

    #[error("more than one unknown ('{0}' and '{1}')")]
    MultipleUnknowns(char, char),

    #[error("the equation has no unknown")]
    NoUnknown,

    #[error("the equation has no unique solution")]
    NoUniqueSolution,

    #[error("arithmetic overflow")]
    Overflow,
}

impl From<EquationError> for concierge_core::Error {
    fn from(err: EquationError) -> Self {
        concierge_core::Error::InvalidToolInput(err.to_string())
    }
}

/// Root of a linear equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    /// The unknown's letter
    pub variable: char,
    /// Its exact value
    pub value: Decimal,
}

impl fmt::Display for Solution {
    /// `x = 2`, `x = 0.333333`: at most six decimals, trailing zeros trimmed
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .value
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
        write!(f, "{} = {}", self.variable, rounded)
    }
}

/// Solve a linear equation in one unknown
///
/// ```
/// use concierge_tutor::solve;
///
/// let solution = solve("2*x + 3 = 7").unwrap();
/// assert_eq!(solution.to_string(), "x = 2");
/// ```
pub fn solve(equation: &str) -> Result<Solution, EquationError> {
    let tokens = tokenize(equation)?;
    if tokens.is_empty() {
        return Err(EquationError::Empty);
    }

    let mut sides = tokens.split(|t| *t == Token::Equals);
    let (Some(left), Some(right)) = (sides.next(), sides.next()) else {
        return Err(EquationError::MissingEquals);
    };
    if sides.next().is_some() {
        return Err(EquationError::RepeatedEquals);
    }

    let mut parser = Parser::default();
    let left = parser.side(left)?;
    let right = parser.side(right)?;
    let variable = parser.variable.ok_or(EquationError::NoUnknown)?;

    // a1*v + b1 = a2*v + b2  =>  v = (b2 - b1) / (a1 - a2)
    let coefficient = left
        .coefficient
        .checked_sub(right.coefficient)
        .ok_or(EquationError::Overflow)?;
    if coefficient.is_zero() {
        return Err(EquationError::NoUniqueSolution);
    }
    let constant = right
        .constant
        .checked_sub(left.constant)
        .ok_or(EquationError::Overflow)?;
    let value = constant
        .checked_div(coefficient)
        .ok_or(EquationError::Overflow)?;

    Ok(Solution { variable, value })
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(Decimal),
    Variable(char),
    Plus,
    Minus,
    Star,
    Slash,
    Equals,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Variable(v) => write!(f, "{v}"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Equals => f.write_str("="),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, EquationError> {
    // A sentence-ending period ("2x + 3 = 7.") is not part of the equation
    let input = input.trim();
    let input = match input.strip_suffix('.') {
        Some(rest) if !rest.ends_with('.') => rest,
        _ => input,
    };

    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            c if c.is_whitespace() => {
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                if i < chars.len() && chars[i] == '.' {
                    i += 1;
                    let fraction_start = i;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                    if i == fraction_start && fraction_start == start + 1 {
                        return Err(EquationError::UnexpectedChar('.'));
                    }
                }
                let text: String = chars[start..i].iter().collect();
                tokens.push(Token::Number(parse_number(&text)?));
            }
            c if c.is_ascii_alphabetic() => {
                tokens.push(Token::Variable(c));
                i += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '=' => {
                tokens.push(Token::Equals);
                i += 1;
            }
            other => return Err(EquationError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

fn parse_number(text: &str) -> Result<Decimal, EquationError> {
    let normalized = if text.starts_with('.') {
        format!("0{text}")
    } else {
        text.trim_end_matches('.').to_string()
    };
    Decimal::from_str(&normalized).map_err(|_| EquationError::NumberOutOfRange(text.to_string()))
}

/// One side reduced to `coefficient * v + constant`
#[derive(Debug, Default)]
struct Linear {
    coefficient: Decimal,
    constant: Decimal,
}

/// A product of factors: `value`, times the unknown when `has_variable`
#[derive(Debug, Clone, Copy)]
struct Term {
    value: Decimal,
    has_variable: bool,
}

#[derive(Debug, Default)]
struct Parser {
    variable: Option<char>,
}

impl Parser {
    fn side(&mut self, tokens: &[Token]) -> Result<Linear, EquationError> {
        let mut pos = 0;
        let mut side = Linear::default();
        let mut negate = false;

        match tokens.first() {
            None => return Err(EquationError::UnexpectedEnd),
            Some(Token::Plus) => pos += 1,
            Some(Token::Minus) => {
                negate = true;
                pos += 1;
            }
            Some(_) => {}
        }

        loop {
            let mut term = self.term(tokens, &mut pos)?;
            if negate {
                term.value = -term.value;
            }
            let slot = if term.has_variable {
                &mut side.coefficient
            } else {
                &mut side.constant
            };
            *slot = slot.checked_add(term.value).ok_or(EquationError::Overflow)?;

            match tokens.get(pos) {
                None => return Ok(side),
                Some(Token::Plus) => negate = false,
                Some(Token::Minus) => negate = true,
                Some(other) => return Err(EquationError::UnexpectedToken(other.to_string())),
            }
            pos += 1;
        }
    }

    fn term(&mut self, tokens: &[Token], pos: &mut usize) -> Result<Term, EquationError> {
        let mut term = self.factor(tokens, pos)?;

        // Implicit product: a number directly followed by the unknown
        if !term.has_variable && matches!(tokens.get(*pos), Some(Token::Variable(_))) {
            let variable = self.factor(tokens, pos)?;
            term = multiply(term, variable)?;
        }

        loop {
            match tokens.get(*pos) {
                Some(Token::Star) => {
                    *pos += 1;
                    let rhs = self.factor(tokens, pos)?;
                    term = multiply(term, rhs)?;
                }
                Some(Token::Slash) => {
                    *pos += 1;
                    let rhs = self.factor(tokens, pos)?;
                    term = divide(term, rhs)?;
                }
                _ => return Ok(term),
            }
        }
    }

    fn factor(&mut self, tokens: &[Token], pos: &mut usize) -> Result<Term, EquationError> {
        let token = tokens.get(*pos).ok_or(EquationError::UnexpectedEnd)?;
        *pos += 1;
        match token {
            Token::Number(value) => Ok(Term {
                value: *value,
                has_variable: false,
            }),
            Token::Variable(name) => {
                match self.variable {
                    Some(seen) if seen != *name => {
                        return Err(EquationError::MultipleUnknowns(seen, *name));
                    }
                    _ => self.variable = Some(*name),
                }
                Ok(Term {
                    value: Decimal::ONE,
                    has_variable: true,
                })
            }
            other => Err(EquationError::UnexpectedToken(other.to_string())),
        }
    }
}

fn multiply(lhs: Term, rhs: Term) -> Result<Term, EquationError> {
    if lhs.has_variable && rhs.has_variable {
        return Err(EquationError::NonLinear);
    }
    Ok(Term {
        value: lhs.value.checked_mul(rhs.value).ok_or(EquationError::Overflow)?,
        has_variable: lhs.has_variable || rhs.has_variable,
    })
}

fn divide(lhs: Term, rhs: Term) -> Result<Term, EquationError> {
    if rhs.has_variable {
        return Err(EquationError::DivisionByVariable);
    }
    if rhs.value.is_zero() {
        return Err(EquationError::DivisionByZero);
    }
    Ok(Term {
        value: lhs.value.checked_div(rhs.value).ok_or(EquationError::Overflow)?,
        has_variable: lhs.has_variable,
    })
}
