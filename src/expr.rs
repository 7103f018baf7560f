//! Boolean expressions as owned operator trees.

use crate::parse;
use crate::table::Assignment;
use crate::LogicError;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::str::FromStr;

/// Binary connectives allowed at inner tree nodes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    /// True when both children are true
    And,
    /// True when the children differ
    Xor,
    /// True when at least one child is true
    Or,
}

impl BinaryOp {
    /// Priority controls the parentheses added when formatting expressions.
    pub fn priority(self) -> u8 {
        match self {
            BinaryOp::And => 3,
            BinaryOp::Xor => 2,
            BinaryOp::Or => 1,
        }
    }

    /// The single-character spelling of this connective.
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::And => '&',
            BinaryOp::Xor => '^',
            BinaryOp::Or => '|',
        }
    }

    fn apply(self, left: bool, right: bool) -> bool {
        match self {
            BinaryOp::And => left && right,
            BinaryOp::Xor => left != right,
            BinaryOp::Or => left || right,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A Boolean expression tree.
///
/// Inner nodes are operators, leaves are named variables. Each node
/// exclusively owns its children; trees are built per request and
/// discarded afterwards.
///
/// Expressions overload the `!`, `&`, `|` and `^` operators so they can be
/// written as plain Rust statements, and parse from infix strings using the
/// same symbols.
///
/// ```
/// use logiclab::Expr;
/// # use logiclab::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let parsed: Expr = "!(A & B) | C".parse()?;
/// let built = !(Expr::var("A") & Expr::var("B")) | Expr::var("C");
/// assert_eq!(parsed, built);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    /// A reference to a named variable
    Variable(String),
    /// Negation of a subtree
    Not(Box<Expr>),
    /// Two subtrees joined by a binary connective
    Binary(BinaryOp, Box<(Expr, Expr)>),
}

impl Expr {
    /// Leaf referring to the variable with the given name.
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    /// Evaluate the tree under the given assignment.
    ///
    /// Children of a binary node are evaluated left before right. A
    /// variable absent from the assignment fails with
    /// [LogicError::UnknownVariable].
    pub fn eval(&self, assignment: &Assignment) -> Result<bool, LogicError> {
        match self {
            Expr::Variable(name) => assignment
                .value(name)
                .ok_or_else(|| LogicError::UnknownVariable(name.clone())),
            Expr::Not(inner) => Ok(!inner.eval(assignment)?),
            Expr::Binary(op, children) => {
                let left = children.0.eval(assignment)?;
                let right = children.1.eval(assignment)?;
                Ok(op.apply(left, right))
            }
        }
    }

    /// Add every referenced variable name to the set.
    pub fn collect_variables(&self, variables: &mut BTreeSet<String>) {
        match self {
            Expr::Variable(name) => {
                variables.insert(name.clone());
            }
            Expr::Not(inner) => inner.collect_variables(variables),
            Expr::Binary(_, children) => {
                children.0.collect_variables(variables);
                children.1.collect_variables(variables);
            }
        }
    }

    /// Referenced variable names in ascending lexicographic order.
    ///
    /// This order fixes the column and bit layout of derived truth tables.
    pub fn variables(&self) -> Vec<String> {
        let mut set = BTreeSet::new();
        self.collect_variables(&mut set);
        set.into_iter().collect()
    }

    fn fmt_infix(&self, f: &mut fmt::Formatter, parent: Option<BinaryOp>) -> fmt::Result {
        match self {
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Not(inner) => {
                write!(f, "!")?;
                match inner.as_ref() {
                    Expr::Binary(..) => {
                        write!(f, "(")?;
                        inner.fmt_infix(f, None)?;
                        write!(f, ")")
                    }
                    _ => inner.fmt_infix(f, None),
                }
            }
            Expr::Binary(op, children) => {
                let wrap = matches!(parent, Some(p) if p.priority() > op.priority());
                if wrap {
                    write!(f, "(")?;
                }
                children.0.fmt_infix(f, Some(*op))?;
                write!(f, " {} ", op.symbol())?;
                children.1.fmt_infix(f, Some(*op))?;
                if wrap {
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Expr {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_expression(s)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_infix(f, None)
    }
}

/* ************************************************************************* */
/* **************************  Operator overloading  *********************** */
/* ************************************************************************* */

impl Not for Expr {
    type Output = Expr;
    fn not(self) -> Self::Output {
        Expr::Not(Box::new(self))
    }
}

impl BitAnd for Expr {
    type Output = Expr;
    fn bitand(self, rhs: Expr) -> Self::Output {
        Expr::Binary(BinaryOp::And, Box::new((self, rhs)))
    }
}

impl BitOr for Expr {
    type Output = Expr;
    fn bitor(self, rhs: Expr) -> Self::Output {
        Expr::Binary(BinaryOp::Or, Box::new((self, rhs)))
    }
}

impl BitXor for Expr {
    type Output = Expr;
    fn bitxor(self, rhs: Expr) -> Self::Output {
        Expr::Binary(BinaryOp::Xor, Box::new((self, rhs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() -> Result<(), LogicError> {
        let expr: Expr = "A & (B | C)".parse()?;
        assert_eq!(format!("{}", expr), "A & (B | C)");

        let expr: Expr = "A & B | C".parse()?;
        assert_eq!(format!("{}", expr), "A & B | C");

        let expr: Expr = "!(A ^ B)".parse()?;
        assert_eq!(format!("{}", expr), "!(A ^ B)");

        let expr: Expr = "!A | !B".parse()?;
        assert_eq!(format!("{}", expr), "!A | !B");
        Ok(())
    }

    #[test]
    fn operators_build_the_parsed_tree() -> Result<(), LogicError> {
        let parsed: Expr = "a & !(b ^ c) | d".parse()?;
        let built =
            Expr::var("a") & !(Expr::var("b") ^ Expr::var("c")) | Expr::var("d");
        assert_eq!(parsed, built);
        Ok(())
    }

    #[test]
    fn eval() -> Result<(), LogicError> {
        let expr: Expr = "(A & B) | (C & !D)".parse()?;

        let assignment: Assignment =
            [("A", true), ("B", true), ("C", false), ("D", false)]
                .into_iter()
                .collect();
        assert!(expr.eval(&assignment)?);

        let assignment: Assignment =
            [("A", true), ("B", false), ("C", true), ("D", true)]
                .into_iter()
                .collect();
        assert!(!expr.eval(&assignment)?);
        Ok(())
    }

    #[test]
    fn eval_needs_every_variable() -> Result<(), LogicError> {
        let expr: Expr = "A & B".parse()?;
        let assignment: Assignment = [("A", true)].into_iter().collect();
        assert_eq!(
            expr.eval(&assignment),
            Err(LogicError::UnknownVariable("B".to_string()))
        );
        Ok(())
    }

    #[test]
    fn variables_are_sorted() -> Result<(), LogicError> {
        let expr: Expr = "delta | (alpha & !charlie) ^ bravo".parse()?;
        assert_eq!(expr.variables(), ["alpha", "bravo", "charlie", "delta"]);

        // repeated references collapse
        let expr: Expr = "x & x & x".parse()?;
        assert_eq!(expr.variables(), ["x"]);
        Ok(())
    }
}
