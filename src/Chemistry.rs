/// The chemistry model seen by the estimator: a trait describing what the exchange needs
/// from a molecule (parsing from an adjacency list, isomorphism, resonance isomers, SMILES)
/// and the `Species` wrapper used in estimated reactions.
///
/// # Examples
/// ```
/// use KiThe_estimator::Chemistry::structure::ChemicalStructure;
/// use KiThe_estimator::Chemistry::adjacency_list::AdjacencyMolecule;
/// let ethane = AdjacencyMolecule::from_adjacency_list("1 C 0 {2,S}\n2 C 0 {1,S}").unwrap();
/// let same = AdjacencyMolecule::from_adjacency_list("1 C 0 {2,S}\n2 C 0 {1,S}").unwrap();
/// assert!(ethane.is_isomorphic(&same));
/// assert_eq!(ethane.to_smiles(), "CC");
/// ```
pub mod structure;
/// eng
/// Small reference implementation of the chemistry model. Reads and writes adjacency lists in
/// the dialect spoken by the estimation service:
///
/// ```text
/// 1 *1 C 1 {2,S}
/// 2    C 0 {1,S} {3,D}
/// 3    C 0 {2,D}
/// ```
/// (index, optional label, element, number of radical electrons, bonds) and also the newer
/// dialect with `u`/`p`/`c` fields (`1 C u1 p0 c0 {2,S}`). Hydrogen atoms are usually implicit.
pub mod adjacency_list;
/// Graph isomorphism for adjacency-list molecules (backtracking with atom invariants)
pub mod isomorphism;
/// Allyl-type radical resonance isomers
pub mod resonance;
/// SMILES writer used for species labels
pub mod smiles;
