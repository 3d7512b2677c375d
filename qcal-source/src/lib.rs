//! Source code representation and error management.

use std::{fmt, ops::Range};

/// Represents source code.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// Represents a syntax error (parse time error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    message: String,
    span: Range<usize>,
}

impl SyntaxError {
    /// Create a new syntax error with the specified `message` and `span`.
    pub fn new(message: impl ToString, span: Range<usize>) -> Self {
        Self {
            message: message.to_string(),
            span,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// Accumulates the syntax errors of a single parse.
///
/// The parser owns one of these while it runs and hands it back next to the AST, so that all errors
/// are reported instead of just the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxErrors {
    errors: Vec<SyntaxError>,
}

impl SyntaxErrors {
    /// Create an empty `SyntaxErrors`.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the list.
    pub fn add_error(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }

    /// Returns `true` if no errors were accumulated.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the most recently reported error.
    pub fn last(&self) -> Option<&SyntaxError> {
        self.errors.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxError> {
        self.errors.iter()
    }

    /// Returns the messages of all the errors, in the order they were reported.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(SyntaxError::message).collect()
    }
}

impl IntoIterator for SyntaxErrors {
    type Item = SyntaxError;
    type IntoIter = std::vec::IntoIter<SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a SyntaxErrors {
    type Item = &'a SyntaxError;
    type IntoIter = std::slice::Iter<'a, SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for SyntaxErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(
                f,
                "ERROR: {message} at position {position}",
                message = error.message,
                position = error.span.start
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_error() {
        let mut errors = SyntaxErrors::new();
        assert!(errors.is_empty());
        errors.add_error(SyntaxError::new("first", 0..1));
        errors.add_error(SyntaxError::new("second", 4..5));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.messages(), vec!["first", "second"]);
        assert_eq!(
            errors.to_string(),
            "ERROR: first at position 0\nERROR: second at position 4\n"
        );
    }
}
