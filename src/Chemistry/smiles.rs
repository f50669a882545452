//! SMILES writer for adjacency-list molecules.
//!
//! Two depth-first passes over the heavy-atom graph: the first builds the spanning tree and
//! finds ring-closure bonds, the second writes atoms, branches and ring digits.
//! Hydrogens bonded to a single heavy atom are folded into that atom. Radical and charged atoms
//! are written in brackets with their hydrogen count (`[CH3]`, `[OH]`). Fragments are joined
//! with `.`. Start atoms and branch order depend on atom numbering, so the output is stable
//! for a given adjacency list but not canonical across renumberings.

use super::adjacency_list::{AdjacencyMolecule, BondOrder};
use std::collections::HashMap;

const ORGANIC_SUBSET: [&str; 10] = ["B", "C", "N", "O", "P", "S", "F", "Cl", "Br", "I"];
const AROMATIC_ELEMENTS: [&str; 6] = ["B", "C", "N", "O", "P", "S"];

fn default_valence(element: &str) -> Option<i16> {
    match element {
        "H" | "F" | "Cl" | "Br" | "I" => Some(1),
        "O" | "S" => Some(2),
        "B" | "N" | "P" => Some(3),
        "C" | "Si" => Some(4),
        "He" | "Ne" | "Ar" => Some(0),
        _ => None,
    }
}

fn charged_valence(element: &str, valence: i16, charge: i8) -> i16 {
    let charge = charge as i16;
    match element {
        "N" | "P" | "O" | "S" => valence + charge,
        "C" | "Si" => valence - charge.abs(),
        _ => valence - charge,
    }
}

/// spanning tree and ring closures found by the first pass
struct DfsTree {
    children: Vec<Vec<(usize, BondOrder)>>,
    /// ring bonds opened at an atom: (closing atom, order)
    openings: HashMap<usize, Vec<(usize, BondOrder)>>,
    /// ring bonds closed at an atom: opening atoms
    closings: HashMap<usize, Vec<usize>>,
}

#[derive(Default)]
struct RingDigits {
    in_use: Vec<usize>,
    assigned: HashMap<(usize, usize), usize>,
}

impl RingDigits {
    fn open(&mut self, opening: usize, closing: usize) -> usize {
        let mut digit = 1;
        while self.in_use.contains(&digit) {
            digit += 1;
        }
        self.in_use.push(digit);
        self.assigned.insert((opening, closing), digit);
        digit
    }

    fn close(&mut self, opening: usize, closing: usize) -> Option<usize> {
        let digit = self.assigned.remove(&(opening, closing))?;
        self.in_use.retain(|d| *d != digit);
        Some(digit)
    }
}

fn format_digit(digit: usize) -> String {
    if digit > 9 {
        format!("%{}", digit)
    } else {
        digit.to_string()
    }
}

struct SmilesGraph<'a> {
    mol: &'a AdjacencyMolecule,
    is_node: Vec<bool>,
    aromatic: Vec<bool>,
    hydrogens: Vec<u8>,
}

impl<'a> SmilesGraph<'a> {
    fn new(mol: &'a AdjacencyMolecule) -> Self {
        let n = mol.atom_count();
        let is_node: Vec<bool> = (0..n)
            .map(|i| {
                let atom = &mol.atoms[i];
                if !atom.is_hydrogen() {
                    return true;
                }
                let neighbours = mol.neighbours(i);
                !(neighbours.len() == 1
                    && neighbours[0].1 == BondOrder::Single
                    && !mol.atoms[neighbours[0].0].is_hydrogen())
            })
            .collect();
        let aromatic: Vec<bool> = (0..n)
            .map(|i| {
                AROMATIC_ELEMENTS.contains(&mol.atoms[i].element.as_str())
                    && mol
                        .neighbours(i)
                        .iter()
                        .any(|(_, order)| *order == BondOrder::Benzene)
            })
            .collect();
        let hydrogens: Vec<u8> = (0..n)
            .map(|i| {
                if !is_node[i] {
                    return 0;
                }
                let neighbours = mol.neighbours(i);
                let explicit = neighbours.iter().filter(|(j, _)| !is_node[*j]).count() as i16;
                let atom = &mol.atoms[i];
                let implicit = match default_valence(&atom.element) {
                    Some(valence) if !atom.is_hydrogen() => {
                        let valence = charged_valence(&atom.element, valence, atom.charge);
                        let used_doubled: i16 =
                            neighbours.iter().map(|(_, o)| o.doubled() as i16).sum();
                        ((2 * valence - used_doubled).max(0) / 2 - atom.radicals as i16).max(0)
                    }
                    _ => 0,
                };
                (explicit + implicit) as u8
            })
            .collect();
        Self {
            mol,
            is_node,
            aromatic,
            hydrogens,
        }
    }

    fn node_neighbours(&self, atom: usize) -> Vec<(usize, BondOrder)> {
        self.mol
            .neighbours(atom)
            .into_iter()
            .filter(|(j, _)| self.is_node[*j])
            .collect()
    }

    fn atom_symbol(&self, i: usize) -> String {
        let atom = &self.mol.atoms[i];
        let symbol = if self.aromatic[i] {
            atom.element.to_lowercase()
        } else {
            atom.element.clone()
        };
        let bracket = atom.radicals > 0
            || atom.charge != 0
            || atom.is_hydrogen()
            || !ORGANIC_SUBSET.contains(&atom.element.as_str());
        if !bracket {
            return symbol;
        }
        let mut text = format!("[{}", symbol);
        match self.hydrogens[i] {
            0 => {}
            1 => text.push('H'),
            h => text.push_str(&format!("H{}", h)),
        }
        match atom.charge {
            0 => {}
            1 => text.push('+'),
            -1 => text.push('-'),
            c if c > 0 => text.push_str(&format!("+{}", c)),
            c => text.push_str(&c.to_string()),
        }
        text.push(']');
        text
    }

    fn bond_symbol(&self, a: usize, b: usize, order: BondOrder) -> &'static str {
        match order {
            BondOrder::Single if self.aromatic[a] && self.aromatic[b] => "-",
            BondOrder::Single | BondOrder::Benzene => "",
            BondOrder::Double => "=",
            BondOrder::Triple => "#",
        }
    }

    fn explore(&self, atom: usize, parent: Option<usize>, state: &mut [u8], tree: &mut DfsTree) {
        state[atom] = 1;
        for (n, order) in self.node_neighbours(atom) {
            if Some(n) == parent {
                continue;
            }
            match state[n] {
                0 => {
                    tree.children[atom].push((n, order));
                    self.explore(n, Some(atom), state, tree);
                }
                // n is an ancestor still on the stack
                1 => {
                    tree.openings.entry(n).or_default().push((atom, order));
                    tree.closings.entry(atom).or_default().push(n);
                }
                _ => {}
            }
        }
        state[atom] = 2;
    }

    fn write_atom(&self, atom: usize, tree: &DfsTree, digits: &mut RingDigits, out: &mut String) {
        out.push_str(&self.atom_symbol(atom));
        if let Some(closing) = tree.closings.get(&atom) {
            for &opening in closing {
                if let Some(digit) = digits.close(opening, atom) {
                    let order = self.mol.bond_between(opening, atom).unwrap_or(BondOrder::Single);
                    out.push_str(self.bond_symbol(opening, atom, order));
                    out.push_str(&format_digit(digit));
                }
            }
        }
        if let Some(opening) = tree.openings.get(&atom) {
            for &(closing, _) in opening {
                let digit = digits.open(atom, closing);
                out.push_str(&format_digit(digit));
            }
        }
        let children = &tree.children[atom];
        for (k, &(child, order)) in children.iter().enumerate() {
            let is_last = k + 1 == children.len();
            if !is_last {
                out.push('(');
            }
            out.push_str(self.bond_symbol(atom, child, order));
            self.write_atom(child, tree, digits, out);
            if !is_last {
                out.push(')');
            }
        }
    }
}

/// SMILES string of a molecule
pub fn write_smiles(mol: &AdjacencyMolecule) -> String {
    let graph = SmilesGraph::new(mol);
    let n = mol.atom_count();
    // terminal atoms first, so chains are written end to end
    let mut starts: Vec<usize> = (0..n).filter(|&i| graph.is_node[i]).collect();
    starts.sort_by_key(|&i| (graph.node_neighbours(i).len(), i));

    let mut state = vec![0u8; n];
    let mut fragments = Vec::new();
    for start in starts {
        if state[start] != 0 {
            continue;
        }
        let mut tree = DfsTree {
            children: vec![Vec::new(); n],
            openings: HashMap::new(),
            closings: HashMap::new(),
        };
        graph.explore(start, None, &mut state, &mut tree);
        let mut digits = RingDigits::default();
        let mut out = String::new();
        graph.write_atom(start, &tree, &mut digits, &mut out);
        fragments.push(out);
    }
    fragments.join(".")
}
