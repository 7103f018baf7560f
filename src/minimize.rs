//! Map minimization: block generation, cover selection and sum-of-products
//! rendering.

use crate::kmap::{Cell, KMap, MintermSet, CELLS, LAYOUT};
use crate::LogicError;
use itertools::{iproduct, Itertools};
use std::collections::HashSet;
use std::fmt;

/// Names of the four map variables, most significant bit first.
const VARS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Permitted block shapes (height, width), in generation order.
const SHAPES: [(usize, usize); 9] = [
    (1, 1),
    (1, 2),
    (2, 1),
    (1, 4),
    (4, 1),
    (2, 2),
    (2, 4),
    (4, 2),
    (4, 4),
];

/// A rectangular block of compatible minterms on the wraparound grid.
///
/// Members are sorted ascending and deduplicated; the sorted sequence is
/// the block's identity. Every member cell is a one or a don't-care and at
/// least one member is a one.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Group {
    minterms: Vec<usize>,
}

impl Group {
    fn new(mut minterms: Vec<usize>) -> Self {
        minterms.sort_unstable();
        minterms.dedup();
        Self { minterms }
    }

    /// Member minterm indices, ascending.
    pub fn minterms(&self) -> &[usize] {
        &self.minterms
    }

    /// Number of cells in the block
    pub fn len(&self) -> usize {
        self.minterms.len()
    }

    /// Whether the block has no cells
    pub fn is_empty(&self) -> bool {
        self.minterms.is_empty()
    }

    /// Test whether the block covers a minterm
    pub fn contains(&self, minterm: usize) -> bool {
        self.minterms.binary_search(&minterm).is_ok()
    }

    /// Render the product term covering exactly this block.
    ///
    /// A variable whose bit is constant across all members appears as a
    /// literal, complemented with a trailing prime when the bit is 0.
    /// Variables that vary inside the block are abstracted away; when none
    /// is left the term is the constant `1`.
    pub fn term(&self) -> String {
        let mut term = String::new();
        for (position, name) in VARS.iter().enumerate() {
            // A is bit 3 ... D is bit 0
            let bit = 3 - position;
            let first = (self.minterms[0] >> bit) & 1;
            if self.minterms.iter().any(|m| (m >> bit) & 1 != first) {
                continue;
            }
            term.push(*name);
            if first == 0 {
                term.push('\'');
            }
        }
        if term.is_empty() {
            term.push('1');
        }
        term
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.term())
    }
}

/// All valid blocks of the map, largest first.
///
/// Scans every origin of the 4x4 layout and every permitted shape, keeps
/// the wrapped blocks whose members are all ones or don't-cares with at
/// least one one, and deduplicates them by their sorted signature. The
/// stable sort keeps generation order between blocks of equal size.
pub fn valid_groups(map: &KMap) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut seen: HashSet<Vec<usize>> = HashSet::new();

    for (row, column) in iproduct!(0..4usize, 0..4usize) {
        for (height, width) in SHAPES {
            let cells: Vec<usize> = iproduct!(0..height, 0..width)
                .map(|(i, j)| LAYOUT[(row + i) % 4][(column + j) % 4])
                .collect();
            let group = Group::new(cells);
            if !is_valid(map, &group) {
                continue;
            }
            if seen.insert(group.minterms.clone()) {
                groups.push(group);
            }
        }
    }

    groups.sort_by_key(|g| std::cmp::Reverse(g.len()));
    groups
}

fn is_valid(map: &KMap, group: &Group) -> bool {
    let mut has_one = false;
    for &minterm in group.minterms() {
        match map.cell(minterm) {
            Cell::Zero => return false,
            Cell::One => has_one = true,
            Cell::DontCare => (),
        }
    }
    has_one
}

/// The selected cover and its rendered sum-of-products expression.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Minimization {
    groups: Vec<Group>,
    expression: String,
}

impl Minimization {
    /// Selected blocks, in selection order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The minimal sum-of-products expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl fmt::Display for Minimization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

impl KMap {
    /// Reduce the map to a minimal sum-of-products cover.
    ///
    /// Essential blocks (the only cover of some one-minterm) are selected
    /// first; the remaining minterms are covered greedily, preferring the
    /// block covering the most still-uncovered ones, then the larger block
    /// (fewer literals), then the block with the lowest first minterm.
    pub fn minimize(&self) -> Minimization {
        solve(self)
    }
}

/// Minimize a raw 16-cell grid given in minterm order.
///
/// Fails with [LogicError::InvalidGridSize] when the slice does not hold
/// exactly 16 cells.
pub fn minimize(cells: &[Cell]) -> Result<Minimization, LogicError> {
    let map = KMap::new(cells.to_vec())?;
    Ok(map.minimize())
}

fn solve(map: &KMap) -> Minimization {
    let ones: Vec<usize> = (0..CELLS).filter(|&m| map.cell(m) == Cell::One).collect();

    if ones.is_empty() {
        return Minimization {
            groups: Vec::new(),
            expression: "0".to_string(),
        };
    }
    if ones.len() == CELLS {
        return Minimization {
            groups: vec![Group::new((0..CELLS).collect())],
            expression: "1".to_string(),
        };
    }

    let groups = valid_groups(map);

    // minterm -> indices of the blocks covering it
    let mut coverage: Vec<Vec<usize>> = vec![Vec::new(); CELLS];
    for (gi, group) in groups.iter().enumerate() {
        for &minterm in group.minterms() {
            if map.cell(minterm) == Cell::One {
                coverage[minterm].push(gi);
            }
        }
    }

    let mut chosen: Vec<usize> = Vec::new();
    let mut chosen_set: HashSet<usize> = HashSet::new();
    let mut covered = MintermSet::new();

    // Essential pass: a one-minterm covered by a single block forces it
    for &minterm in &ones {
        if let [only] = coverage[minterm][..] {
            if chosen_set.insert(only) {
                chosen.push(only);
            }
        }
    }
    for &gi in &chosen {
        mark_covered(map, &groups[gi], &mut covered);
    }

    // Greedy pass over whatever the essential blocks left uncovered
    loop {
        let remaining: Vec<usize> = ones
            .iter()
            .copied()
            .filter(|&m| !covered.contains(m))
            .collect();
        if remaining.is_empty() {
            break;
        }

        let mut best: Option<(usize, usize)> = None;
        for (gi, group) in groups.iter().enumerate() {
            let score = remaining.iter().filter(|&&m| group.contains(m)).count();
            if score == 0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((bi, bs)) => {
                    score > bs
                        || (score == bs && group.len() > groups[bi].len())
                        || (score == bs
                            && group.len() == groups[bi].len()
                            && group.minterms()[0] < groups[bi].minterms()[0])
                }
            };
            if better {
                best = Some((gi, score));
            }
        }

        // The all-zero guard above means some block always scores; bail out
        // rather than spin if that ever fails to hold.
        let (gi, _) = match best {
            Some(found) => found,
            None => break,
        };
        if chosen_set.insert(gi) {
            chosen.push(gi);
        }
        mark_covered(map, &groups[gi], &mut covered);
    }

    let selection: Vec<Group> = chosen.iter().map(|&gi| groups[gi].clone()).collect();
    let terms: Vec<String> = selection.iter().map(Group::term).collect();
    let expression = if terms.iter().any(|t| t == "1") {
        "1".to_string()
    } else {
        terms.into_iter().unique().join(" + ")
    };

    Minimization {
        groups: selection,
        expression,
    }
}

fn mark_covered(map: &KMap, group: &Group, covered: &mut MintermSet) {
    for &minterm in group.minterms() {
        if map.cell(minterm) == Cell::One {
            covered.insert(minterm);
        }
    }
}
