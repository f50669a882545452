use super::isomorphism::is_isomorphic;
use super::resonance::generate_resonance_isomers;
use super::smiles::write_smiles;
use super::structure::{ChemicalStructure, StructureError};
use petgraph::graph::{NodeIndex, UnGraph};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::OnceLock;

/// bond types of the adjacency list: S, D, T and B (benzene)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Benzene,
}

impl BondOrder {
    pub fn from_token(token: &str) -> Result<Self, StructureError> {
        match token.to_uppercase().as_str() {
            "S" => Ok(BondOrder::Single),
            "D" => Ok(BondOrder::Double),
            "T" => Ok(BondOrder::Triple),
            "B" => Ok(BondOrder::Benzene),
            _ => Err(StructureError::UnknownBondType(token.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BondOrder::Single => "S",
            BondOrder::Double => "D",
            BondOrder::Triple => "T",
            BondOrder::Benzene => "B",
        }
    }
    /// bond order times two, so that a benzene bond (1.5) stays an integer
    pub fn doubled(&self) -> u8 {
        match self {
            BondOrder::Single => 2,
            BondOrder::Double => 4,
            BondOrder::Triple => 6,
            BondOrder::Benzene => 3,
        }
    }

    pub fn increment(&self) -> Option<BondOrder> {
        match self {
            BondOrder::Single => Some(BondOrder::Double),
            BondOrder::Double => Some(BondOrder::Triple),
            _ => None,
        }
    }

    pub fn decrement(&self) -> Option<BondOrder> {
        match self {
            BondOrder::Double => Some(BondOrder::Single),
            BondOrder::Triple => Some(BondOrder::Double),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    pub element: String,
    /// reaction-center label such as `*1`
    pub label: Option<String>,
    /// number of radical electrons
    pub radicals: u8,
    /// `S` or `T` suffix of a biradical
    pub spin: Option<char>,
    pub lone_pairs: Option<u8>,
    pub charge: i8,
}

impl Atom {
    pub fn new(element: &str) -> Self {
        Self {
            element: element.to_string(),
            label: None,
            radicals: 0,
            spin: None,
            lone_pairs: None,
            charge: 0,
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element == "H"
    }
}

/// bond between two atoms; `atom1 < atom2` always holds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
}

/// molecular graph read from an adjacency list
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMolecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub multiplicity: Option<u8>,
}

struct DeclaredAtom {
    line: usize,
    index: usize,
    atom: Atom,
    neighbours: Vec<(usize, BondOrder)>,
}

fn bond_regex() -> &'static Regex {
    static BOND_RE: OnceLock<Regex> = OnceLock::new();
    BOND_RE.get_or_init(|| Regex::new(r"\{\s*(\d+)\s*,\s*([A-Za-z]+)\s*\}").unwrap())
}

impl AdjacencyMolecule {
    /// builds a molecule from atoms and bonds, bonds are normalised and sorted
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut bonds: Vec<Bond> = bonds
            .into_iter()
            .map(|b| Bond {
                atom1: b.atom1.min(b.atom2),
                atom2: b.atom1.max(b.atom2),
                order: b.order,
            })
            .collect();
        bonds.sort_by_key(|b| (b.atom1, b.atom2));
        Self {
            atoms,
            bonds,
            multiplicity: None,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn bond_between(&self, a: usize, b: usize) -> Option<BondOrder> {
        let key = (a.min(b), a.max(b));
        self.bonds
            .iter()
            .find(|bond| (bond.atom1, bond.atom2) == key)
            .map(|bond| bond.order)
    }

    /// neighbours of an atom sorted by index
    pub fn neighbours(&self, atom: usize) -> Vec<(usize, BondOrder)> {
        let mut found: Vec<(usize, BondOrder)> = self
            .bonds
            .iter()
            .filter_map(|b| {
                if b.atom1 == atom {
                    Some((b.atom2, b.order))
                } else if b.atom2 == atom {
                    Some((b.atom1, b.order))
                } else {
                    None
                }
            })
            .collect();
        found.sort_by_key(|(n, _)| *n);
        found
    }

    pub fn degree(&self, atom: usize) -> usize {
        self.bonds
            .iter()
            .filter(|b| b.atom1 == atom || b.atom2 == atom)
            .count()
    }
    /// undirected graph with atoms as nodes and bond orders as edges, node `i` is atom `i`
    pub fn to_graph(&self) -> UnGraph<Atom, BondOrder> {
        let mut graph = UnGraph::with_capacity(self.atoms.len(), self.bonds.len());
        let nodes: Vec<NodeIndex> = self
            .atoms
            .iter()
            .map(|atom| graph.add_node(atom.clone()))
            .collect();
        for bond in &self.bonds {
            graph.add_edge(nodes[bond.atom1], nodes[bond.atom2], bond.order);
        }
        graph
    }

    pub fn set_bond_order(&mut self, a: usize, b: usize, order: BondOrder) {
        let key = (a.min(b), a.max(b));
        if let Some(bond) = self
            .bonds
            .iter_mut()
            .find(|bond| (bond.atom1, bond.atom2) == key)
        {
            bond.order = order;
        }
    }
    ////////////////////////////////////READING////////////////////////////////////////////////
    pub fn parse(adjlist: &str) -> Result<Self, StructureError> {
        let mut declared: Vec<DeclaredAtom> = Vec::new();
        let mut multiplicity = None;
        for (i, raw_line) in adjlist.lines().enumerate() {
            let line_no = i + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix("multiplicity") {
                let value = rest
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| StructureError::InvalidLine {
                        line: line_no,
                        reason: format!("bad multiplicity '{}'", rest.trim()),
                    })?;
                multiplicity = Some(value);
                continue;
            }
            if !line.starts_with(|c: char| c.is_ascii_digit()) {
                // the species name may precede the atoms
                if declared.is_empty() {
                    continue;
                }
                return Err(StructureError::InvalidLine {
                    line: line_no,
                    reason: format!("expected an atom line, found '{}'", line),
                });
            }
            declared.push(parse_atom_line(line_no, line)?);
        }
        if declared.is_empty() {
            return Err(StructureError::EmptyAdjacencyList);
        }

        let mut positions: HashMap<usize, usize> = HashMap::new();
        for (pos, d) in declared.iter().enumerate() {
            if positions.insert(d.index, pos).is_some() {
                return Err(StructureError::InvalidLine {
                    line: d.line,
                    reason: format!("atom index {} is declared twice", d.index),
                });
            }
        }

        let mut orders: BTreeMap<(usize, usize), BondOrder> = BTreeMap::new();
        for (pos, d) in declared.iter().enumerate() {
            for (neighbour, order) in &d.neighbours {
                let other = *positions
                    .get(neighbour)
                    .ok_or(StructureError::DanglingBond {
                        atom: d.index,
                        neighbour: *neighbour,
                    })?;
                if other == pos {
                    return Err(StructureError::InvalidLine {
                        line: d.line,
                        reason: format!("atom {} is bonded to itself", d.index),
                    });
                }
                let key = (pos.min(other), pos.max(other));
                match orders.get(&key) {
                    Some(existing) if existing != order => {
                        return Err(StructureError::InconsistentBond(d.index, *neighbour));
                    }
                    _ => {
                        orders.insert(key, *order);
                    }
                }
            }
        }

        let bonds = orders
            .into_iter()
            .map(|((atom1, atom2), order)| Bond {
                atom1,
                atom2,
                order,
            })
            .collect();
        let atoms = declared.into_iter().map(|d| d.atom).collect();
        let mut molecule = AdjacencyMolecule::new(atoms, bonds);
        molecule.multiplicity = multiplicity;
        Ok(molecule)
    }
    ////////////////////////////////////WRITING////////////////////////////////////////////////
    /// adjacency list in the service dialect, without a trailing newline
    pub fn write(&self) -> String {
        let mut lines = Vec::with_capacity(self.atoms.len());
        for (i, atom) in self.atoms.iter().enumerate() {
            let mut line = format!("{}", i + 1);
            if let Some(label) = &atom.label {
                line.push(' ');
                line.push_str(label);
            }
            line.push_str(&format!(" {} {}", atom.element, atom.radicals));
            if let Some(spin) = atom.spin {
                line.push(spin);
            }
            for (neighbour, order) in self.neighbours(i) {
                line.push_str(&format!(" {{{},{}}}", neighbour + 1, order.as_str()));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

fn parse_atom_line(line_no: usize, line: &str) -> Result<DeclaredAtom, StructureError> {
    let invalid = |reason: String| StructureError::InvalidLine {
        line: line_no,
        reason,
    };
    let (head, tail) = match line.find('{') {
        Some(p) => line.split_at(p),
        None => (line, ""),
    };
    let mut tokens = head.split_whitespace();
    let index: usize = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| invalid("missing atom index".to_string()))?;
    let mut token = tokens
        .next()
        .ok_or_else(|| invalid("missing element".to_string()))?;
    let mut label = None;
    if token.starts_with('*') {
        label = Some(token.to_string());
        token = tokens
            .next()
            .ok_or_else(|| invalid("missing element".to_string()))?;
    }
    let element_ok = token.starts_with(|c: char| c.is_ascii_uppercase())
        && token.chars().all(|c| c.is_ascii_alphabetic());
    if !element_ok {
        return Err(invalid(format!("'{}' is not an element symbol", token)));
    }
    let mut atom = Atom::new(token);
    atom.label = label;
    for property in tokens {
        apply_property(&mut atom, property).map_err(invalid)?;
    }

    let mut neighbours = Vec::new();
    for cap in bond_regex().captures_iter(tail) {
        let neighbour: usize = cap[1]
            .parse()
            .map_err(|_| invalid(format!("bad neighbour index '{}'", &cap[1])))?;
        neighbours.push((neighbour, BondOrder::from_token(&cap[2])?));
    }
    let leftover = bond_regex().replace_all(tail, "");
    if !leftover.trim().is_empty() {
        return Err(invalid(format!("unexpected text '{}'", leftover.trim())));
    }
    Ok(DeclaredAtom {
        line: line_no,
        index,
        atom,
        neighbours,
    })
}

fn apply_property(atom: &mut Atom, token: &str) -> Result<(), String> {
    let bad = || format!("bad atom property '{}'", token);
    if let Some(value) = token.strip_prefix('u') {
        atom.radicals = value.parse().map_err(|_| bad())?;
    } else if let Some(value) = token.strip_prefix('p') {
        atom.lone_pairs = Some(value.parse().map_err(|_| bad())?);
    } else if let Some(value) = token.strip_prefix('c') {
        atom.charge = value.parse().map_err(|_| bad())?;
    } else {
        // service dialect: "0", "1", "2S", "2T"
        let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(bad());
        }
        atom.radicals = digits.parse().map_err(|_| bad())?;
        match &token[digits.len()..] {
            "" => {}
            "S" => atom.spin = Some('S'),
            "T" => atom.spin = Some('T'),
            _ => return Err(bad()),
        }
    }
    Ok(())
}

impl fmt::Display for AdjacencyMolecule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.write())
    }
}

impl ChemicalStructure for AdjacencyMolecule {
    fn from_adjacency_list(adjlist: &str) -> Result<Self, StructureError> {
        AdjacencyMolecule::parse(adjlist)
    }

    fn to_adjacency_list(&self) -> String {
        self.write()
    }

    fn to_smiles(&self) -> String {
        write_smiles(self)
    }

    fn is_isomorphic(&self, other: &Self) -> bool {
        is_isomorphic(self, other)
    }

    fn generate_resonance_isomers(&self) -> Vec<Self> {
        generate_resonance_isomers(self)
    }

    fn clear_labeled_atoms(&mut self) {
        for atom in self.atoms.iter_mut() {
            atom.label = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETHYL: &str = "1 *1 C 1 {2,S}\n2 C 0 {1,S}";

    #[test]
    fn test_parse_service_dialect() {
        let mol = AdjacencyMolecule::parse(ETHYL).unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 1);
        assert_eq!(mol.atoms[0].label, Some("*1".to_string()));
        assert_eq!(mol.atoms[0].radicals, 1);
        assert_eq!(mol.atoms[1].radicals, 0);
        assert_eq!(mol.bond_between(0, 1), Some(BondOrder::Single));
    }

    #[test]
    fn test_parse_new_dialect_with_name_and_multiplicity() {
        let text = "CH2O\nmultiplicity 1\n1 C u0 p0 c0 {2,D}\n2 O u0 p2 c0 {1,D}\n";
        let mol = AdjacencyMolecule::parse(text).unwrap();
        assert_eq!(mol.multiplicity, Some(1));
        assert_eq!(mol.atoms[1].lone_pairs, Some(2));
        assert_eq!(mol.bond_between(1, 0), Some(BondOrder::Double));
    }

    #[test]
    fn test_biradical_spin() {
        let mol = AdjacencyMolecule::parse("1 C 2T").unwrap();
        assert_eq!(mol.atoms[0].radicals, 2);
        assert_eq!(mol.atoms[0].spin, Some('T'));
        assert_eq!(mol.write(), "1 C 2T");
    }

    #[test]
    fn test_one_sided_bond_declaration() {
        let mol = AdjacencyMolecule::parse("1 C 0 {2,D}\n2 C 0").unwrap();
        assert_eq!(mol.neighbours(1), vec![(0, BondOrder::Double)]);
    }

    #[test]
    fn test_write_keeps_labels() {
        let mol = AdjacencyMolecule::parse(ETHYL).unwrap();
        assert_eq!(mol.write(), "1 *1 C 1 {2,S}\n2 C 0 {1,S}");
    }

    #[test]
    fn test_clear_labeled_atoms() {
        let mut mol = AdjacencyMolecule::parse(ETHYL).unwrap();
        mol.clear_labeled_atoms();
        assert_eq!(mol.to_adjacency_list(), "1 C 1 {2,S}\n2 C 0 {1,S}");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            AdjacencyMolecule::parse(""),
            Err(StructureError::EmptyAdjacencyList)
        );
        assert_eq!(
            AdjacencyMolecule::parse("1 C 0 {3,S}\n2 C 0"),
            Err(StructureError::DanglingBond {
                atom: 1,
                neighbour: 3
            })
        );
        assert_eq!(
            AdjacencyMolecule::parse("1 C 0 {2,S}\n2 C 0 {1,D}"),
            Err(StructureError::InconsistentBond(2, 1))
        );
        assert_eq!(
            AdjacencyMolecule::parse("1 C 0 {2,Q}\n2 C 0"),
            Err(StructureError::UnknownBondType("Q".to_string()))
        );
        assert!(matches!(
            AdjacencyMolecule::parse("1 C 0 {1,S}"),
            Err(StructureError::InvalidLine { line: 1, .. })
        ));
        assert!(matches!(
            AdjacencyMolecule::parse("1 C x"),
            Err(StructureError::InvalidLine { line: 1, .. })
        ));
        assert!(matches!(
            AdjacencyMolecule::parse("1 C 0\nnot an atom"),
            Err(StructureError::InvalidLine { line: 2, .. })
        ));
    }
}
