//! Balanced parentheses checking.
//!
//! Only `(` and `)` are significant; every other character is ignored. An
//! empty string, or one without any parentheses, is balanced.

use crate::error::{EnrollmentError, Result};
use log::info;
use std::fs;
use std::path::Path;

const OPEN: char = '(';
const CLOSE: char = ')';

/// Checks one input string for balanced parentheses.
#[derive(Debug, Clone)]
pub struct ParenthesesChecker {
    input: String,
}

impl ParenthesesChecker {
    /// Creates a checker. An absent input is rejected with `InvalidArgument`.
    pub fn new(input: Option<&str>) -> Result<Self> {
        let input = input.ok_or_else(|| {
            EnrollmentError::InvalidArgument("input string cannot be absent".to_string())
        })?;
        Ok(ParenthesesChecker {
            input: input.to_string(),
        })
    }

    /// Creates a checker from a file, trimming each line and joining them
    /// without a separator.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let input: String = contents.lines().map(str::trim).collect();
        Ok(ParenthesesChecker { input })
    }

    /// The text that will be scanned.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns `true` if the input's parentheses are balanced.
    pub fn is_balanced(&self) -> bool {
        info!("Checking balanced parentheses on: {}", self.input);
        is_balanced(&self.input)
    }
}

/// Returns `true` if every `)` closes an earlier unmatched `(` and none are left open.
pub fn is_balanced(text: &str) -> bool {
    let mut stack = Vec::new();

    for c in text.chars() {
        match c {
            OPEN => stack.push(c),
            CLOSE => {
                if stack.pop() != Some(OPEN) {
                    return false;
                }
            }
            _ => {}
        }
    }

    stack.is_empty()
}
