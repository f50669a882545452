use crate::Chemistry::structure::ChemicalStructure;
use log::debug;

/// concentration units written for every reactant block
pub const UNITS: &str = "(molecule/cm3)";
/// placeholder concentration, the service only needs the structures
pub const CONCENTRATION: &str = "1";
pub const END_MARKER: &str = "END\n";

/// Builds the request payload for a PopulateReactions job.
///
/// Reactants structurally equivalent to an earlier one are skipped. The block index is the
/// one-based position in `reactants`, so a skipped duplicate leaves a gap in the numbering.
/// Atom labels are cleared on a copy before serialisation.
pub fn encode_request<M: ChemicalStructure>(reactants: &[M]) -> String {
    let mut payload = String::new();
    let mut added: Vec<&M> = Vec::new();
    for (index, reactant) in reactants.iter().enumerate() {
        if added.iter().any(|r| r.is_isomorphic(reactant)) {
            debug!("reactant {} duplicates an earlier reactant, skipped", index + 1);
            continue;
        }
        added.push(reactant);
        let mut unlabeled = reactant.clone();
        unlabeled.clear_labeled_atoms();
        payload.push_str(&format!(
            "reactant{} {} {}\n{}\n\n",
            index + 1,
            UNITS,
            CONCENTRATION,
            unlabeled.to_adjacency_list().trim_end()
        ));
    }
    payload.push_str(END_MARKER);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chemistry::adjacency_list::AdjacencyMolecule;

    fn mol(text: &str) -> AdjacencyMolecule {
        AdjacencyMolecule::parse(text).unwrap()
    }

    #[test]
    fn test_single_reactant_block() {
        let ethyl = mol("1 *1 C 1 {2,S}\n2 C 0 {1,S}");
        let payload = encode_request(&[ethyl.clone()]);
        assert_eq!(
            payload,
            "reactant1 (molecule/cm3) 1\n1 C 1 {2,S}\n2 C 0 {1,S}\n\nEND\n"
        );
        // the caller's molecule keeps its labels
        assert_eq!(ethyl.atoms[0].label, Some("*1".to_string()));
    }

    #[test]
    fn test_equivalent_reactants_are_encoded_once() {
        let methyl = mol("1 C 1");
        let ethane = mol("1 C 0 {2,S}\n2 C 0 {1,S}");
        let ethane_labeled = mol("1 *2 C 0 {2,S}\n2 C 0 {1,S}");
        let payload = encode_request(&[ethane, methyl, ethane_labeled]);
        assert_eq!(payload.matches("1 C 0 {2,S}").count(), 1);
        assert_eq!(payload.matches("(molecule/cm3)").count(), 2);
        assert!(payload.contains("reactant1 (molecule/cm3) 1\n"));
        assert!(payload.contains("reactant2 (molecule/cm3) 1\n1 C 1\n\n"));
        assert!(!payload.contains("reactant3"));
        assert!(payload.ends_with("\n\nEND\n"));
    }

    #[test]
    fn test_duplicate_leaves_gap_in_numbering() {
        let methyl = mol("1 C 1");
        let payload = encode_request(&[methyl.clone(), methyl, mol("1 O 1")]);
        assert!(payload.contains("reactant1 "));
        assert!(!payload.contains("reactant2 "));
        assert!(payload.contains("reactant3 (molecule/cm3) 1\n1 O 1\n\n"));
    }

    #[test]
    fn test_empty_request() {
        let payload = encode_request::<AdjacencyMolecule>(&[]);
        assert_eq!(payload, "END\n");
    }
}
