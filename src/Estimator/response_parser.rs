use super::errors::EstimatorError;
use log::debug;
use std::collections::HashSet;

/// separates the species dictionary from the reaction section
pub const SECTION_SEPARATOR: &str = "\n\n\n";
/// separates species blocks, and the reaction header from the reaction lines
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// one species of the service's dictionary: assigned name and adjacency list
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesDictionaryEntry {
    pub name: String,
    pub adjacency_list: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedResponse {
    /// in response order
    pub species: Vec<SpeciesDictionaryEntry>,
    /// raw tab-separated reaction lines, `DUP` markers included
    pub reaction_lines: Vec<String>,
}

impl ParsedResponse {
    pub fn is_empty(&self) -> bool {
        self.species.is_empty() && self.reaction_lines.is_empty()
    }
}

fn species_entry(block: &str) -> SpeciesDictionaryEntry {
    let mut lines = block.lines();
    let name = lines.next().unwrap_or_default().trim().to_string();
    let adjacency_list = lines.collect::<Vec<&str>>().join("\n");
    SpeciesDictionaryEntry {
        name,
        adjacency_list,
    }
}

/// Splits a raw service response into the species dictionary and the reaction lines.
///
/// `<species blocks>\n\n\n<header>\n\n<reaction lines>`: the first triple newline ends the
/// dictionary, its blocks are separated by blank lines and start with the species name.
/// The first block of the reaction section is a header and is discarded.
/// A response without the section separator, or with reaction lines glued to the header,
/// is a `ProtocolError`; empty sections are not.
pub fn parse_response(raw: &str) -> Result<ParsedResponse, EstimatorError> {
    let text = raw.replace("\r\n", "\n");
    let (species_section, reaction_section) =
        text.split_once(SECTION_SEPARATOR).ok_or_else(|| {
            EstimatorError::ProtocolError(
                "no blank-line separator between species dictionary and reactions".to_string(),
            )
        })?;

    let mut species = Vec::new();
    let mut seen = HashSet::new();
    for block in species_section.split(BLOCK_SEPARATOR) {
        let block = block.trim_matches('\n');
        if block.trim().is_empty() {
            continue;
        }
        let entry = species_entry(block);
        if !seen.insert(entry.name.clone()) {
            return Err(EstimatorError::ProtocolError(format!(
                "species {} appears twice in the dictionary",
                entry.name
            )));
        }
        species.push(entry);
    }

    let mut reaction_blocks = reaction_section
        .trim_start_matches('\n')
        .split(BLOCK_SEPARATOR);
    let header = reaction_blocks.next().unwrap_or_default();
    if header.lines().filter(|line| !line.trim().is_empty()).count() > 1 {
        return Err(EstimatorError::ProtocolError(format!(
            "no blank line between the reaction header and the reaction lines: {:?}",
            header
        )));
    }
    let reaction_lines: Vec<String> = reaction_blocks
        .next()
        .map(|block| {
            block
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| line.to_string())
                .collect()
        })
        .unwrap_or_default();

    debug!(
        "response holds {} species and {} reaction lines",
        species.len(),
        reaction_lines.len()
    );
    Ok(ParsedResponse {
        species,
        reaction_lines,
    })
}
