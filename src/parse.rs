//! Lexing and parsing of infix Boolean expressions.
//!
//! Parsing goes through three explicit stages, each usable on its own:
//! [tokenize] scans the text into a [Token] sequence, [to_postfix] reorders
//! it with the shunting-yard transform, and [build_tree] folds the postfix
//! sequence into an [Expr].

use crate::{BinaryOp, Expr, LogicError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static RE_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap());

/// Operators recognized in infix expressions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operator {
    /// Unary negation
    Not,
    /// Conjunction
    And,
    /// Exclusive disjunction
    Xor,
    /// Inclusive disjunction
    Or,
}

impl Operator {
    /// Binding priority used by the infix-to-postfix transform.
    pub fn priority(self) -> u8 {
        match self {
            Operator::Not => 4,
            Operator::And => 3,
            Operator::Xor => 2,
            Operator::Or => 1,
        }
    }

    /// Only negation associates to the right.
    pub fn is_right_associative(self) -> bool {
        self == Operator::Not
    }

    /// The single-character spelling of this operator.
    pub fn symbol(self) -> char {
        match self {
            Operator::Not => '!',
            Operator::And => '&',
            Operator::Xor => '^',
            Operator::Or => '|',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '!' => Some(Operator::Not),
            '&' => Some(Operator::And),
            '^' => Some(Operator::Xor),
            '|' => Some(Operator::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<Operator> for BinaryOp {
    type Error = LogicError;

    fn try_from(op: Operator) -> Result<Self, Self::Error> {
        match op {
            Operator::And => Ok(BinaryOp::And),
            Operator::Xor => Ok(BinaryOp::Xor),
            Operator::Or => Ok(BinaryOp::Or),
            Operator::Not => Err(LogicError::InvalidExpression),
        }
    }
}

/// A single token of an infix expression, in scan order.
#[derive(Clone, PartialEq, Debug)]
pub enum Token {
    /// A named variable
    Variable(String),
    /// One of the four Boolean operators
    Operator(Operator),
    /// An opening parenthesis
    Open,
    /// A closing parenthesis
    Close,
}

/// Scan an expression into tokens.
///
/// Whitespace separates tokens and is never emitted. Variables are
/// identifiers of the form `[A-Za-z_][A-Za-z0-9_]*`. Any other character
/// fails with [LogicError::InvalidCharacter] carrying its character
/// position.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LogicError> {
    let mut tokens = Vec::new();
    let mut byte = 0;
    let mut position = 0;

    while byte < text.len() {
        let rest = &text[byte..];
        let c = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };

        if c.is_whitespace() {
            byte += c.len_utf8();
            position += 1;
            continue;
        }

        if let Some(op) = Operator::from_char(c) {
            tokens.push(Token::Operator(op));
            byte += c.len_utf8();
            position += 1;
            continue;
        }

        if c == '(' || c == ')' {
            tokens.push(if c == '(' { Token::Open } else { Token::Close });
            byte += c.len_utf8();
            position += 1;
            continue;
        }

        if let Some(m) = RE_IDENT.find(rest) {
            tokens.push(Token::Variable(m.as_str().to_string()));
            byte += m.end();
            position += m.as_str().chars().count();
            continue;
        }

        return Err(LogicError::InvalidCharacter { found: c, position });
    }

    Ok(tokens)
}

/// Reorder an infix token sequence into postfix.
///
/// Classical shunting yard: operators unwind the stack while its top binds
/// at least as tightly (strictly tighter for the right-associative `!`),
/// parentheses delimit sub-sequences and are discarded. Unmatched
/// parentheses on either side fail with
/// [LogicError::UnbalancedParentheses].
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, LogicError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Variable(_) => output.push(token),
            Token::Open => stack.push(token),
            Token::Close => loop {
                match stack.pop() {
                    Some(Token::Open) => break,
                    Some(op) => output.push(op),
                    None => return Err(LogicError::UnbalancedParentheses),
                }
            },
            Token::Operator(op) => {
                while let Some(&Token::Operator(top)) = stack.last() {
                    let unwinds = if op.is_right_associative() {
                        top.priority() > op.priority()
                    } else {
                        top.priority() >= op.priority()
                    };
                    if !unwinds {
                        break;
                    }
                    stack.pop();
                    output.push(Token::Operator(top));
                }
                stack.push(Token::Operator(op));
            }
        }
    }

    while let Some(token) = stack.pop() {
        match token {
            Token::Open | Token::Close => return Err(LogicError::UnbalancedParentheses),
            _ => output.push(token),
        }
    }

    Ok(output)
}

/// Fold a postfix token sequence into an expression tree.
///
/// Variables push leaves, `!` consumes one operand, binary operators
/// consume two (right operand on top). An operator finding too few
/// operands fails with [LogicError::MissingOperand]; anything other than a
/// single tree left at the end fails with [LogicError::InvalidExpression].
pub fn build_tree(postfix: Vec<Token>) -> Result<Expr, LogicError> {
    let mut stack: Vec<Expr> = Vec::new();

    for token in postfix {
        let node = match token {
            Token::Variable(name) => Expr::Variable(name),
            Token::Operator(Operator::Not) => {
                let operand = stack.pop().ok_or(LogicError::MissingOperand('!'))?;
                Expr::Not(Box::new(operand))
            }
            Token::Operator(op) => {
                let right = stack.pop().ok_or(LogicError::MissingOperand(op.symbol()))?;
                let left = stack.pop().ok_or(LogicError::MissingOperand(op.symbol()))?;
                Expr::Binary(op.try_into()?, Box::new((left, right)))
            }
            // Parentheses never survive the postfix transform
            Token::Open | Token::Close => return Err(LogicError::InvalidExpression),
        };
        stack.push(node);
    }

    let tree = stack.pop().ok_or(LogicError::InvalidExpression)?;
    if !stack.is_empty() {
        return Err(LogicError::InvalidExpression);
    }
    Ok(tree)
}

/// Run the full pipeline on an expression string.
pub(crate) fn parse_expression(text: &str) -> Result<Expr, LogicError> {
    build_tree(to_postfix(tokenize(text)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postfix_symbols(text: &str) -> Result<String, LogicError> {
        let postfix = to_postfix(tokenize(text)?)?;
        Ok(postfix
            .iter()
            .map(|t| match t {
                Token::Variable(name) => name.clone(),
                Token::Operator(op) => op.symbol().to_string(),
                Token::Open => "(".to_string(),
                Token::Close => ")".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" "))
    }

    #[test]
    fn scan_tokens() -> Result<(), LogicError> {
        let tokens = tokenize("!(sel & b1) | x_2")?;
        assert_eq!(tokens.len(), 8);
        assert_eq!(tokens[0], Token::Operator(Operator::Not));
        assert_eq!(tokens[2], Token::Variable("sel".to_string()));
        assert_eq!(tokens[7], Token::Variable("x_2".to_string()));

        assert!(tokenize("  \t ")?.is_empty());
        Ok(())
    }

    #[test]
    fn scan_rejects_stray_characters() {
        assert_eq!(
            tokenize("A $ B"),
            Err(LogicError::InvalidCharacter {
                found: '$',
                position: 2
            })
        );
        assert_eq!(
            tokenize("A & 1"),
            Err(LogicError::InvalidCharacter {
                found: '1',
                position: 4
            })
        );
    }

    #[test]
    fn postfix_respects_priorities() -> Result<(), LogicError> {
        assert_eq!(postfix_symbols("A | B & C")?, "A B C & |");
        assert_eq!(postfix_symbols("A ^ B | C")?, "A B ^ C |");
        assert_eq!(postfix_symbols("!A & B")?, "A ! B &");
        assert_eq!(postfix_symbols("!(A & B)")?, "A B & !");
        assert_eq!(postfix_symbols("!!A")?, "A ! !");
        Ok(())
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_eq!(
            postfix_symbols("(A & B"),
            Err(LogicError::UnbalancedParentheses)
        );
        assert_eq!(
            postfix_symbols("A & B)"),
            Err(LogicError::UnbalancedParentheses)
        );
    }

    #[test]
    fn tree_requires_operands() {
        let parse = |s: &str| to_postfix(tokenize(s).unwrap()).and_then(build_tree);

        assert_eq!(parse("A &"), Err(LogicError::MissingOperand('&')));
        assert_eq!(parse("| A"), Err(LogicError::MissingOperand('|')));
        assert_eq!(parse("!"), Err(LogicError::MissingOperand('!')));
        assert_eq!(parse(""), Err(LogicError::InvalidExpression));
        assert_eq!(parse("A B"), Err(LogicError::InvalidExpression));
    }
}
