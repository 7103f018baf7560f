//! Combinational gate netlists: bounded signal propagation and equation
//! read-back.

use crate::LogicError;
use itertools::Itertools;
use slab::Slab;
use std::collections::{HashMap, HashSet};

/// Sweeps over the netlist before levels are considered settled.
///
/// Enough for any acyclic arrangement of the supported gates; feedback
/// loops keep whatever the last sweep produced.
const SETTLE_SWEEPS: usize = 10;

/// Supported gate families.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GateKind {
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Xnor,
    Not,
    Buffer,
}

impl GateKind {
    /// Number of input pins.
    pub fn arity(self) -> usize {
        match self {
            GateKind::Not | GateKind::Buffer => 1,
            _ => 2,
        }
    }

    /// Truth function of the gate; unary gates ignore the second input.
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            GateKind::And => a && b,
            GateKind::Or => a || b,
            GateKind::Nand => !(a && b),
            GateKind::Nor => !(a || b),
            GateKind::Xor => a != b,
            GateKind::Xnor => a == b,
            GateKind::Not => !a,
            GateKind::Buffer => a,
        }
    }

    /// Infix symbol used in derived equations.
    pub fn symbol(self) -> &'static str {
        match self {
            GateKind::And => "·",
            GateKind::Or => "+",
            GateKind::Nand => "⊼",
            GateKind::Nor => "⊽",
            GateKind::Xor => "⊕",
            GateKind::Xnor => "⊙",
            GateKind::Not => "¬",
            GateKind::Buffer => "",
        }
    }
}

/// Handle to a node in a circuit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw slab index of the node
    pub fn index(self) -> usize {
        self.0
    }
}

/// Input pin of a gate or probe; unary gates and probes only expose `A`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pin {
    A,
    B,
}

impl Pin {
    fn name(self) -> char {
        match self {
            Pin::A => 'A',
            Pin::B => 'B',
        }
    }
}

#[derive(Clone, Debug)]
enum NodeKind {
    Input { value: bool },
    Gate(GateKind),
    Probe,
}

#[derive(Clone, Debug)]
struct Node {
    label: Option<String>,
    kind: NodeKind,
}

#[derive(Clone, Copy, PartialEq, Debug)]
struct Wire {
    from: NodeId,
    to: NodeId,
    pin: Pin,
}

/// A combinational netlist of input sources, gates and output probes.
///
/// ```
/// use logiclab::{Circuit, GateKind, Pin};
/// # use logiclab::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let mut circuit = Circuit::new();
/// let a = circuit.add_input("A", true);
/// let b = circuit.add_input("B", false);
/// let xor = circuit.add_gate(GateKind::Xor);
/// let sum = circuit.add_probe("S");
///
/// circuit.connect(a, xor, Pin::A)?;
/// circuit.connect(b, xor, Pin::B)?;
/// circuit.connect(xor, sum, Pin::A)?;
///
/// assert!(circuit.propagate().level(sum));
/// assert_eq!(circuit.equation(sum)?, "(A ⊕ B)");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, Debug)]
pub struct Circuit {
    nodes: Slab<Node>,
    wires: Vec<Wire>,
}

impl Circuit {
    /// Create an empty circuit
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a toggleable input source.
    pub fn add_input(&mut self, label: impl Into<String>, value: bool) -> NodeId {
        NodeId(self.nodes.insert(Node {
            label: Some(label.into()),
            kind: NodeKind::Input { value },
        }))
    }

    /// Add a gate.
    pub fn add_gate(&mut self, kind: GateKind) -> NodeId {
        NodeId(self.nodes.insert(Node {
            label: None,
            kind: NodeKind::Gate(kind),
        }))
    }

    /// Add an output probe.
    pub fn add_probe(&mut self, label: impl Into<String>) -> NodeId {
        NodeId(self.nodes.insert(Node {
            label: Some(label.into()),
            kind: NodeKind::Probe,
        }))
    }

    /// Remove a node together with every wire touching it.
    pub fn remove(&mut self, id: NodeId) -> Result<(), LogicError> {
        if !self.nodes.contains(id.0) {
            return Err(LogicError::NoSuchNode(id.0));
        }
        self.nodes.remove(id.0);
        self.wires.retain(|w| w.from != id && w.to != id);
        Ok(())
    }

    /// Number of nodes in the circuit
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the circuit has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> Result<&Node, LogicError> {
        self.nodes.get(id.0).ok_or(LogicError::NoSuchNode(id.0))
    }

    /// Wire a source node into an input pin of a gate or probe.
    ///
    /// Probes expose the single pin `A`, as do unary gates. Reconnecting an
    /// occupied pin replaces the previous wire.
    pub fn connect(&mut self, from: NodeId, to: NodeId, pin: Pin) -> Result<(), LogicError> {
        self.node(from)?;
        let target = self.node(to)?;
        match target.kind {
            NodeKind::Input { .. } => return Err(LogicError::InvalidPin(pin.name())),
            NodeKind::Gate(kind) if kind.arity() == 1 && pin == Pin::B => {
                return Err(LogicError::InvalidPin('B'));
            }
            NodeKind::Probe if pin == Pin::B => return Err(LogicError::InvalidPin('B')),
            _ => (),
        }
        self.wires.retain(|w| !(w.to == to && w.pin == pin));
        self.wires.push(Wire { from, to, pin });
        Ok(())
    }

    /// Set the level of an input source.
    pub fn set_input(&mut self, id: NodeId, value: bool) -> Result<(), LogicError> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(LogicError::NoSuchNode(id.0))?;
        match &mut node.kind {
            NodeKind::Input { value: level } => {
                *level = value;
                Ok(())
            }
            _ => Err(LogicError::NotAnInput(id.0)),
        }
    }

    fn wire_into(&self, to: NodeId, pin: Pin) -> Option<&Wire> {
        self.wires.iter().find(|w| w.to == to && w.pin == pin)
    }

    /// Propagate source levels through the netlist.
    pub fn propagate(&self) -> Signals {
        let mut levels: HashMap<usize, bool> = HashMap::new();
        for (id, node) in self.nodes.iter() {
            if let NodeKind::Input { value } = node.kind {
                levels.insert(id, value);
            }
        }

        for _ in 0..SETTLE_SWEEPS {
            for (id, node) in self.nodes.iter() {
                match node.kind {
                    NodeKind::Input { .. } => (),
                    NodeKind::Gate(kind) => {
                        let a = self.pin_level(&levels, NodeId(id), Pin::A);
                        let b = self.pin_level(&levels, NodeId(id), Pin::B);
                        levels.insert(id, kind.apply(a, b));
                    }
                    NodeKind::Probe => {
                        let level = self.pin_level(&levels, NodeId(id), Pin::A);
                        levels.insert(id, level);
                    }
                }
            }
        }

        Signals { levels }
    }

    fn pin_level(&self, levels: &HashMap<usize, bool>, to: NodeId, pin: Pin) -> bool {
        self.wire_into(to, pin)
            .map(|w| levels.get(&w.from.0).copied().unwrap_or(false))
            .unwrap_or(false)
    }

    /// Derive the Boolean equation driving a node.
    ///
    /// Inputs print their label, `NOT` prints `¬(x)`, `BUFFER` is
    /// transparent and binary gates print `(a SYM b)`. An unconnected
    /// input pin reads as `0`; a feedback loop or a binary gate missing a
    /// wire prints `?`.
    pub fn equation(&self, id: NodeId) -> Result<String, LogicError> {
        self.node(id)?;
        Ok(self.build_equation(id, &HashSet::new()))
    }

    /// Equations for every probe, one per line, in id order.
    pub fn equations(&self) -> String {
        self.nodes
            .iter()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Probe))
            .map(|(id, node)| {
                let label = node.label.clone().unwrap_or_else(|| format!("n{}", id));
                format!("{} = {}", label, self.build_equation(NodeId(id), &HashSet::new()))
            })
            .join("\n")
    }

    fn build_equation(&self, id: NodeId, visited: &HashSet<usize>) -> String {
        if visited.contains(&id.0) {
            return "?".to_string();
        }
        let node = match self.nodes.get(id.0) {
            Some(node) => node,
            None => return "?".to_string(),
        };

        // each branch walks with its own copy so shared fan-in is not
        // mistaken for feedback
        let mut visited = visited.clone();
        visited.insert(id.0);

        match node.kind {
            NodeKind::Input { .. } => node
                .label
                .clone()
                .unwrap_or_else(|| format!("n{}", id.0)),
            NodeKind::Probe => match self.wire_into(id, Pin::A) {
                Some(wire) => self.build_equation(wire.from, &visited),
                None => "0".to_string(),
            },
            NodeKind::Gate(kind) if kind.arity() == 1 => {
                let operand = self
                    .wire_into(id, Pin::A)
                    .map(|w| self.build_equation(w.from, &visited))
                    .unwrap_or_else(|| "0".to_string());
                match kind {
                    GateKind::Buffer => operand,
                    _ => format!("¬({})", operand),
                }
            }
            NodeKind::Gate(kind) => {
                let a = self.wire_into(id, Pin::A);
                let b = self.wire_into(id, Pin::B);
                match (a, b) {
                    (Some(a), Some(b)) => format!(
                        "({} {} {})",
                        self.build_equation(a.from, &visited),
                        kind.symbol(),
                        self.build_equation(b.from, &visited)
                    ),
                    _ => "?".to_string(),
                }
            }
        }
    }
}

/// Settled levels of every node after propagation.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Signals {
    levels: HashMap<usize, bool>,
}

impl Signals {
    /// Level of a node; nodes never driven read low.
    pub fn level(&self, id: NodeId) -> bool {
        self.levels.get(&id.0).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_adder() -> (Circuit, NodeId, NodeId, NodeId, NodeId) {
        let mut circuit = Circuit::new();
        let a = circuit.add_input("A", false);
        let b = circuit.add_input("B", false);
        let xor = circuit.add_gate(GateKind::Xor);
        let and = circuit.add_gate(GateKind::And);
        let sum = circuit.add_probe("S");
        let carry = circuit.add_probe("C");

        circuit.connect(a, xor, Pin::A).unwrap();
        circuit.connect(b, xor, Pin::B).unwrap();
        circuit.connect(a, and, Pin::A).unwrap();
        circuit.connect(b, and, Pin::B).unwrap();
        circuit.connect(xor, sum, Pin::A).unwrap();
        circuit.connect(and, carry, Pin::A).unwrap();

        (circuit, a, b, sum, carry)
    }

    #[test]
    fn gate_truth_functions() {
        assert!(GateKind::And.apply(true, true));
        assert!(!GateKind::And.apply(true, false));
        assert!(GateKind::Nand.apply(true, false));
        assert!(GateKind::Nor.apply(false, false));
        assert!(GateKind::Xor.apply(true, false));
        assert!(GateKind::Xnor.apply(true, true));
        assert!(GateKind::Not.apply(false, false));
        assert!(GateKind::Buffer.apply(true, false));
    }

    #[test]
    fn half_adder_settles() -> Result<(), LogicError> {
        let (mut circuit, a, b, sum, carry) = half_adder();

        for (va, vb, s, c) in [
            (false, false, false, false),
            (false, true, true, false),
            (true, false, true, false),
            (true, true, false, true),
        ] {
            circuit.set_input(a, va)?;
            circuit.set_input(b, vb)?;
            let signals = circuit.propagate();
            assert_eq!(signals.level(sum), s);
            assert_eq!(signals.level(carry), c);
        }
        Ok(())
    }

    #[test]
    fn equations_read_back() -> Result<(), LogicError> {
        let (circuit, _, _, sum, carry) = half_adder();
        assert_eq!(circuit.equation(sum)?, "(A ⊕ B)");
        assert_eq!(circuit.equation(carry)?, "(A · B)");
        assert_eq!(circuit.equations(), "S = (A ⊕ B)\nC = (A · B)");
        Ok(())
    }

    #[test]
    fn chained_inverters() -> Result<(), LogicError> {
        let mut circuit = Circuit::new();
        let a = circuit.add_input("A", true);
        let first = circuit.add_gate(GateKind::Not);
        let second = circuit.add_gate(GateKind::Not);
        let out = circuit.add_probe("Q");
        circuit.connect(a, first, Pin::A)?;
        circuit.connect(first, second, Pin::A)?;
        circuit.connect(second, out, Pin::A)?;

        assert!(circuit.propagate().level(out));
        assert_eq!(circuit.equation(out)?, "¬(¬(A))");
        Ok(())
    }

    #[test]
    fn feedback_is_guarded() -> Result<(), LogicError> {
        let mut circuit = Circuit::new();
        let gate = circuit.add_gate(GateKind::Not);
        let out = circuit.add_probe("Q");
        circuit.connect(gate, gate, Pin::A)?;
        circuit.connect(gate, out, Pin::A)?;

        // propagation terminates and the equation reports the loop
        circuit.propagate();
        assert_eq!(circuit.equation(out)?, "¬(?)");
        Ok(())
    }

    #[test]
    fn dangling_pins() -> Result<(), LogicError> {
        let mut circuit = Circuit::new();
        let a = circuit.add_input("A", true);
        let and = circuit.add_gate(GateKind::And);
        let not = circuit.add_gate(GateKind::Not);
        let probe = circuit.add_probe("Q");
        circuit.connect(a, and, Pin::A)?;

        // a binary gate missing a wire has no equation
        assert_eq!(circuit.equation(and)?, "?");
        // unconnected unary input reads as 0, unconnected probe as well
        assert_eq!(circuit.equation(not)?, "¬(0)");
        assert_eq!(circuit.equation(probe)?, "0");
        Ok(())
    }

    #[test]
    fn wiring_is_validated() {
        let mut circuit = Circuit::new();
        let a = circuit.add_input("A", false);
        let b = circuit.add_input("B", false);
        let not = circuit.add_gate(GateKind::Not);
        let probe = circuit.add_probe("Q");

        assert_eq!(
            circuit.connect(a, not, Pin::B),
            Err(LogicError::InvalidPin('B'))
        );
        assert_eq!(
            circuit.connect(a, probe, Pin::B),
            Err(LogicError::InvalidPin('B'))
        );
        assert_eq!(
            circuit.connect(a, b, Pin::A),
            Err(LogicError::InvalidPin('A'))
        );
        assert_eq!(
            circuit.set_input(not, true),
            Err(LogicError::NotAnInput(not.index()))
        );

        let ghost = NodeId(99);
        assert_eq!(
            circuit.connect(ghost, not, Pin::A),
            Err(LogicError::NoSuchNode(99))
        );
        assert_eq!(circuit.remove(ghost), Err(LogicError::NoSuchNode(99)));
    }

    #[test]
    fn reconnect_replaces_and_remove_detaches() -> Result<(), LogicError> {
        let mut circuit = Circuit::new();
        let a = circuit.add_input("A", true);
        let b = circuit.add_input("B", false);
        let probe = circuit.add_probe("Q");

        circuit.connect(a, probe, Pin::A)?;
        assert!(circuit.propagate().level(probe));

        // a second wire on the same pin replaces the first
        circuit.connect(b, probe, Pin::A)?;
        assert!(!circuit.propagate().level(probe));
        assert_eq!(circuit.equation(probe)?, "B");

        circuit.remove(b)?;
        assert_eq!(circuit.equation(probe)?, "0");
        assert_eq!(circuit.len(), 2);
        Ok(())
    }
}
