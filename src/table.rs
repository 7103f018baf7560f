//! Truth tables enumerated from expression trees.

use crate::{Expr, LogicError};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A mapping from variable names to Boolean values.
///
/// One assignment is synthesized per truth table row; it only lives for the
/// evaluation it drives.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Assignment {
    values: HashMap<String, bool>,
}

impl Assignment {
    /// Bind a variable to a value, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.values.insert(name.into(), value);
    }

    /// Value bound to the name, if any.
    pub fn value(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variable is bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut assignment = Assignment::default();
        for (name, value) in iter {
            assignment.set(name, value);
        }
        assignment
    }
}

/// One row of a truth table: an assignment and the evaluated output.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    assignment: Assignment,
    output: bool,
}

impl Row {
    /// Input value of a variable in this row
    pub fn value(&self, name: &str) -> Option<bool> {
        self.assignment.value(name)
    }

    /// The full input assignment
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// The evaluated result for this row
    pub fn output(&self) -> bool {
        self.output
    }
}

/// The complete enumeration of an expression over its variables.
///
/// Columns are the variable names in ascending lexicographic order. Rows
/// are ordered by the binary value of their assignment, reading the first
/// variable as the most significant bit.
///
/// ```
/// use logiclab::TruthTable;
/// # use logiclab::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let table: TruthTable = "A & B".parse()?;
/// assert_eq!(table.variables(), ["A", "B"]);
/// assert_eq!(table.len(), 4);
///
/// // only the last row (A=1, B=1) is true
/// let outputs: Vec<bool> = table.rows().iter().map(|r| r.output()).collect();
/// assert_eq!(outputs, [false, false, false, true]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TruthTable {
    variables: Vec<String>,
    rows: Vec<Row>,
}

impl TruthTable {
    /// Enumerate every assignment of the expression's variables.
    ///
    /// With `n` variables this evaluates the tree `2^n` times; `n` is only
    /// bounded by the variables actually referenced.
    pub fn from_expr(expr: &Expr) -> Result<Self, LogicError> {
        let variables = expr.variables();
        let n = variables.len();

        let mut rows = Vec::with_capacity(1 << n);
        for mask in 0..(1usize << n) {
            let mut assignment = Assignment::default();
            for (i, name) in variables.iter().enumerate() {
                assignment.set(name.clone(), mask & (1 << (n - 1 - i)) != 0);
            }
            let output = expr.eval(&assignment)?;
            rows.push(Row { assignment, output });
        }

        Ok(Self { variables, rows })
    }

    /// Column names, ascending
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// All rows, in ascending assignment order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromStr for TruthTable {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expr: Expr = s.parse()?;
        Self::from_expr(&expr)
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for name in &self.variables {
            write!(f, "{}\t", name)?;
        }
        writeln!(f, "RESULT")?;
        for row in &self.rows {
            for name in &self.variables {
                write!(f, "{}\t", row.value(name).unwrap_or(false) as u8)?;
            }
            writeln!(f, "{}", row.output as u8)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn bits(table: &TruthTable, row: &Row) -> Vec<bool> {
        table
            .variables()
            .iter()
            .map(|v| row.value(v).unwrap_or(false))
            .collect()
    }

    #[test]
    fn two_variable_order() -> Result<(), LogicError> {
        let table: TruthTable = "A & B".parse()?;
        assert_eq!(table.variables(), ["A", "B"]);
        assert_eq!(table.len(), 4);

        let expected = [
            (false, false, false),
            (false, true, false),
            (true, false, false),
            (true, true, true),
        ];
        for (row, (a, b, out)) in table.rows().iter().zip(expected) {
            assert_eq!(row.value("A"), Some(a));
            assert_eq!(row.value("B"), Some(b));
            assert_eq!(row.output(), out);
        }
        Ok(())
    }

    #[test]
    fn every_assignment_appears_once() -> Result<(), LogicError> {
        let table: TruthTable = "(p | q) ^ (r & s)".parse()?;
        assert_eq!(table.len(), 16);

        let distinct: HashSet<Vec<bool>> =
            table.rows().iter().map(|r| bits(&table, r)).collect();
        assert_eq!(distinct.len(), 16);
        Ok(())
    }

    #[test]
    fn de_morgan() -> Result<(), LogicError> {
        let table: TruthTable = "!(A & B) | C".parse()?;
        assert_eq!(table.len(), 8);

        for row in table.rows() {
            let a = row.value("A").unwrap_or(false);
            let b = row.value("B").unwrap_or(false);
            let c = row.value("C").unwrap_or(false);
            assert_eq!(row.output(), !(a && b) || c);
        }

        let outputs: Vec<bool> = table.rows().iter().map(|r| r.output()).collect();
        assert_eq!(
            outputs,
            [true, true, true, true, true, true, false, true]
        );
        Ok(())
    }

    #[test]
    fn first_variable_is_most_significant() -> Result<(), LogicError> {
        // sorts to [x, y, z]: x changes once over the table, z on every row
        let table: TruthTable = "z | y | x".parse()?;
        let flips = |name: &str| {
            table
                .rows()
                .windows(2)
                .filter(|w| w[0].value(name) != w[1].value(name))
                .count()
        };
        assert_eq!(flips("x"), 1);
        assert_eq!(flips("y"), 3);
        assert_eq!(flips("z"), 7);
        Ok(())
    }

    #[test]
    fn deterministic() -> Result<(), LogicError> {
        let first: TruthTable = "!(A & B) | (C ^ D)".parse()?;
        let second: TruthTable = "!(A & B) | (C ^ D)".parse()?;
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
        Ok(())
    }

    #[test]
    fn render() -> Result<(), LogicError> {
        let table: TruthTable = "A & B".parse()?;
        let text = table.to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("A\tB\tRESULT"));
        assert_eq!(lines.next(), Some("0\t0\t0"));
        assert_eq!(lines.last(), Some("1\t1\t1"));
        Ok(())
    }
}
