use crate::Color;
use thiserror::Error;

/// Error raised by the expression engine, the map minimizer or one of the
/// companion tools.
#[derive(Error, Debug, PartialEq)]
pub enum LogicError {
    /// A character outside the supported alphabet
    #[error("Invalid character '{found}' at position {position}")]
    InvalidCharacter { found: char, position: usize },

    /// A parenthesis without a matching counterpart
    #[error("Mismatched parentheses")]
    UnbalancedParentheses,

    /// An operator found fewer operands than it consumes
    #[error("Missing operand for '{0}'")]
    MissingOperand(char),

    /// The token sequence does not reduce to a single tree
    #[error("Not a valid expression")]
    InvalidExpression,

    /// The evaluated variable is absent from the assignment
    #[error("Missing value for variable '{0}'")]
    UnknownVariable(String),

    /// A four-variable map takes exactly 16 cells
    #[error("The grid must have exactly 16 cells (found {0})")]
    InvalidGridSize(usize),

    /// The node id is not part of the circuit
    #[error("No node {0} in this circuit")]
    NoSuchNode(usize),

    /// The target node does not expose the requested pin
    #[error("Pin '{0}' is not available on the target node")]
    InvalidPin(char),

    /// The node exists but is not an input source
    #[error("Node {0} is not an input source")]
    NotAnInput(usize),

    /// The name does not match any band color
    #[error("Unknown band color '{0}'")]
    UnknownColor(String),

    /// Color codes carry four or five bands
    #[error("Expected 4 or 5 color bands (found {0})")]
    InvalidBandCount(usize),

    /// The color has no digit value and cannot fill a digit position
    #[error("'{0}' has no digit value")]
    NotADigitBand(Color),

    /// The color has no tolerance rating
    #[error("'{0}' has no tolerance rating")]
    NotAToleranceBand(Color),
}
