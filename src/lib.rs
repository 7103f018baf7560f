//! Algorithmic core for a suite of digital-logic teaching tools.
//!
//! Everything in this crate is a pure, synchronous computation: the caller
//! hands over a typed request and receives a typed result (or a
//! [LogicError]). There is no I/O, no rendering and no persistent state;
//! presentation layers are expected to live elsewhere.
//!
//! # Truth tables
//!
//! An infix Boolean expression over named variables is scanned into
//! [tokens](Token), reordered into postfix, folded into an [expression
//! tree](Expr) and enumerated over every assignment of its variables.
//! Variables sort lexicographically and the first one drives the most
//! significant bit, so rows come out in the conventional order.
//!
//! ```
//! use logiclab::TruthTable;
//! # use logiclab::LogicError;
//! # fn main() -> Result<(), LogicError> {
//!
//! let table: TruthTable = "!(A & B) | C".parse()?;
//! assert_eq!(table.variables(), ["A", "B", "C"]);
//! assert_eq!(table.len(), 8);
//!
//! // only A=1, B=1, C=0 makes the expression false
//! assert_eq!(table.rows().iter().filter(|r| !r.output()).count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Karnaugh maps
//!
//! A [KMap] holds the sixteen minterm values of a four-variable function,
//! each a [Cell]: fixed at zero or one, or a don't-care free to join any
//! grouping. [KMap::minimize] enumerates every valid wraparound block,
//! selects the essential ones and covers the rest greedily, returning the
//! chosen [groups](Group) and the reduced sum-of-products expression.
//!
//! ```
//! use logiclab::KMap;
//! # use logiclab::LogicError;
//! # fn main() -> Result<(), LogicError> {
//!
//! let map: KMap = "1111 0000 0000 0000".parse()?;
//! assert_eq!(map.minimize().expression(), "A'B'");
//!
//! let map: KMap = "11XX 0000 0000 0000".parse()?;
//! assert_eq!(map.minimize().expression(), "A'B'");
//! # Ok(())
//! # }
//! ```
//!
//! # Gate circuits
//!
//! A [Circuit] is a netlist of input sources, [gates](GateKind) and output
//! probes. [Circuit::propagate] runs a bounded sweep loop until the levels
//! settle and [Circuit::equation] reads the Boolean equation feeding any
//! node back out of the wiring.
//!
//! # Resistor codes
//!
//! [decode] turns a 4- or 5-band [Color] code into a [Resistance] with the
//! usual digit/multiplier/tolerance arithmetic and human-readable
//! formatting.

mod circuit;
mod error;
mod expr;
mod kmap;
mod minimize;
mod parse;
mod resistor;
mod table;

pub use circuit::{Circuit, GateKind, NodeId, Pin, Signals};
pub use error::LogicError;
pub use expr::{BinaryOp, Expr};
pub use kmap::{Cell, KMap, MintermSet, CELLS};
pub use minimize::{minimize, valid_groups, Group, Minimization};
pub use parse::{build_tree, to_postfix, tokenize, Operator, Token};
pub use resistor::{decode, Color, Resistance};
pub use table::{Assignment, Row, TruthTable};
