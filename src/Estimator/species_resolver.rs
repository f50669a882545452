use super::errors::EstimatorError;
use super::response_parser::SpeciesDictionaryEntry;
use crate::Chemistry::structure::{ChemicalStructure, Species};

/// The service's species dictionary with every structure parsed, in response order.
///
/// Built once per response and dropped with it.
#[derive(Debug, Clone)]
pub struct SpeciesDictionary<M> {
    entries: Vec<(String, M)>,
}

impl<M: ChemicalStructure> SpeciesDictionary<M> {
    /// a structure that cannot be read makes the whole response malformed
    pub fn from_entries(entries: &[SpeciesDictionaryEntry]) -> Result<Self, EstimatorError> {
        let mut parsed = Vec::with_capacity(entries.len());
        for entry in entries {
            let molecule = M::from_adjacency_list(&entry.adjacency_list).map_err(|e| {
                EstimatorError::ProtocolError(format!(
                    "structure of species {} cannot be read: {}",
                    entry.name, e
                ))
            })?;
            parsed.push((entry.name.clone(), molecule));
        }
        Ok(Self { entries: parsed })
    }

    /// Name the service assigned to `molecule`.
    ///
    /// Every resonance isomer of the query is tested against every entry; the first entry in
    /// response order that matches any isomer wins. A well-formed response has at most one.
    pub fn resolve_name(&self, molecule: &M) -> Option<&str> {
        let isomers = molecule.generate_resonance_isomers();
        self.entries
            .iter()
            .find(|(_, listed)| isomers.iter().any(|isomer| isomer.is_isomorphic(listed)))
            .map(|(name, _)| name.as_str())
    }

    pub fn molecule(&self, name: &str) -> Option<&M> {
        self.entries
            .iter()
            .find(|(listed, _)| listed == name)
            .map(|(_, molecule)| molecule)
    }
    /// species labelled with the SMILES of the named structure
    pub fn species(&self, name: &str) -> Option<Species<M>> {
        self.molecule(name)
            .map(|molecule| Species::from_molecule(molecule.clone()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
