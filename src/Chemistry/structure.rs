use std::fmt;
use thiserror::Error;

/// error types for reading a molecule from an adjacency list
#[derive(Debug, Error, PartialEq)]
pub enum StructureError {
    #[error("Adjacency list is empty")]
    EmptyAdjacencyList,
    #[error("Invalid adjacency list line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
    #[error("Unknown bond type: {0}")]
    UnknownBondType(String),
    #[error("Atom {atom} is bonded to undeclared atom {neighbour}")]
    DanglingBond { atom: usize, neighbour: usize },
    #[error("Bond between atoms {0} and {1} is declared with different orders")]
    InconsistentBond(usize, usize),
}

/// What the estimator needs from a molecule.
///
/// The estimation exchange never looks inside a molecule: it only parses structures sent
/// back by the service, tests them for isomorphism and names them. Any chemistry toolkit
/// can be plugged in by implementing this trait (the crate ships `AdjacencyMolecule`).
///
/// `is_isomorphic` must be reflexive and symmetric, it is the matching primitive of the
/// whole exchange. `generate_resonance_isomers` must return a non-empty list whose first
/// element is the molecule itself.
pub trait ChemicalStructure: Clone + fmt::Debug {
    fn from_adjacency_list(adjlist: &str) -> Result<Self, StructureError>;
    fn to_adjacency_list(&self) -> String;
    fn to_smiles(&self) -> String;
    fn is_isomorphic(&self, other: &Self) -> bool;
    fn generate_resonance_isomers(&self) -> Vec<Self>;
    fn clear_labeled_atoms(&mut self);
}

/// A labeled chemical species: the label is the SMILES of its (first) molecule
#[derive(Debug, Clone)]
pub struct Species<M> {
    pub label: String,
    pub molecule: Vec<M>,
}

impl<M: ChemicalStructure> Species<M> {
    pub fn from_molecule(molecule: M) -> Self {
        Self {
            label: molecule.to_smiles(),
            molecule: vec![molecule],
        }
    }
    /// structure used when the species takes part in a query
    pub fn representative(&self) -> Option<&M> {
        self.molecule.first()
    }
}

impl<M> fmt::Display for Species<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
