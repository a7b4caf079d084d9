//! Dynamic function registry
//!
//! Maps function names to callables that compute segment content from the
//! content of other segments. Each document manager owns its own registry;
//! there is no global table. Two built-ins ship with the crate.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Failure inside a dynamic function call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DynamicFnError {
    #[error("expected {expected} argument(s), got {got}")]
    WrongArgumentCount { expected: usize, got: usize },
    #[error("not an integer: {0:?}")]
    InvalidInteger(String),
    #[error("not all decimal digits: {0:?}")]
    NotDigits(String),
    #[error("integer overflow")]
    Overflow,
    #[error("{0}")]
    Failed(String),
}

/// A registered dynamic function
///
/// Arguments are the dependency segments' content strings in declared order.
pub type DynamicFn = Box<dyn Fn(&[&str]) -> Result<String, DynamicFnError>>;

/// Name-to-function table for dynamic segment evaluation
pub struct FunctionRegistry {
    functions: HashMap<String, DynamicFn>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Create a registry with the built-in functions registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("difference", difference);
        registry.register("digits_to_words", digits_to_words);
        registry
    }

    /// Register a function under a name; re-registering replaces
    pub fn register<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&[&str]) -> Result<String, DynamicFnError> + 'static,
    {
        self.functions.insert(name.into(), Box::new(function));
    }

    pub fn get(&self, name: &str) -> Option<&DynamicFn> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted for stable output
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

/// Built-in `difference(a, b)`: decimal string of `a - b`
///
/// Arguments are reduced to their character data first (XML tag runs are
/// dropped, then whitespace trimmed), so `<price>100</price>` reads as 100.
/// The remaining text must parse as a base-10 integer, optional sign.
pub fn difference(args: &[&str]) -> Result<String, DynamicFnError> {
    require_arity(args, 2)?;
    let a = integer_argument(args[0])?;
    let b = integer_argument(args[1])?;
    let result = a.checked_sub(b).ok_or(DynamicFnError::Overflow)?;
    Ok(result.to_string())
}

/// Built-in `digits_to_words(s)`: spell out a digit string
///
/// The argument is taken verbatim: every character must be an ASCII decimal
/// digit, no trimming. `"2024"` becomes `"two zero two four"`.
pub fn digits_to_words(args: &[&str]) -> Result<String, DynamicFnError> {
    const WORDS: [&str; 10] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ];

    require_arity(args, 1)?;
    let digits = args[0];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(DynamicFnError::NotDigits(digits.to_string()));
    }

    let words: Vec<&str> = digits
        .chars()
        .map(|c| WORDS[(c as u8 - b'0') as usize])
        .collect();
    Ok(words.join(" "))
}

fn require_arity(args: &[&str], expected: usize) -> Result<(), DynamicFnError> {
    if args.len() != expected {
        return Err(DynamicFnError::WrongArgumentCount {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Integer value of an argument's character data
fn integer_argument(raw: &str) -> Result<i64, DynamicFnError> {
    character_data(raw)
        .trim()
        .parse::<i64>()
        .map_err(|_| DynamicFnError::InvalidInteger(raw.to_string()))
}

/// Drop `<...>` tag runs, keeping the text between them
fn character_data(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
