use crate::Chemistry::structure::ChemicalStructure;
use log::{error, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// reactants and optional products of one estimation query
#[derive(Debug, Clone)]
pub struct QueryTask<M> {
    pub reactants: Vec<M>,
    pub products: Vec<M>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    Reactants,
    Products,
}

fn header(line: &str) -> Option<&'static str> {
    match line.trim().to_uppercase().as_str() {
        "REACTANTS" => Some("REACTANTS"),
        "PRODUCTS" => Some("PRODUCTS"),
        "END" => Some("END"),
        _ => None,
    }
}

/// Reads a query task file.
///
/// ```text
/// REACTANTS
/// CH3
/// 1 C 1
///
/// C2H5
/// 1 C 1 {2,S}
/// 2 C 0 {1,S}
/// PRODUCTS
/// 1 C 0 {2,S}
/// 2 C 0 {1,S} {3,S}
/// 3 C 0 {2,S}
/// END
/// ```
/// Adjacency lists inside a section are separated by blank lines and may start with a name.
/// `END` or the end of the file closes a section, the PRODUCTS section is optional.
/// Lines starting with `//` are comments.
pub fn load_query_from_file<M: ChemicalStructure>(file_name: &str) -> Result<QueryTask<M>, String> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(format!("File '{}' does not exist", file_name));
    }
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => return Err(format!("Failed to open file '{}': {}", file_name, e)),
    };
    let reader = BufReader::new(file);
    let lines: Vec<String> = reader.lines().map_while(Result::ok).collect();
    parse_query(&lines, file_name)
}

/// blocks of one section: (line number of the first line, text)
fn close_block(block: &mut Vec<String>, start: usize, blocks: &mut Vec<(usize, String)>) {
    if !block.is_empty() {
        blocks.push((start, block.join("\n")));
        block.clear();
    }
}

pub fn parse_query<M: ChemicalStructure>(
    lines: &[String],
    file_name: &str,
) -> Result<QueryTask<M>, String> {
    let mut section = Section::None;
    let mut reactant_blocks: Vec<(usize, String)> = Vec::new();
    let mut product_blocks: Vec<(usize, String)> = Vec::new();
    let mut block: Vec<String> = Vec::new();
    let mut block_start = 0;
    let mut seen_reactants = false;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            continue;
        }
        if let Some(h) = header(trimmed) {
            let target = match section {
                Section::Reactants => &mut reactant_blocks,
                _ => &mut product_blocks,
            };
            close_block(&mut block, block_start, target);
            section = match h {
                "REACTANTS" => {
                    seen_reactants = true;
                    Section::Reactants
                }
                "PRODUCTS" => Section::Products,
                _ => Section::None,
            };
            continue;
        }
        if section == Section::None {
            if !trimmed.is_empty() {
                warn!("line {} of '{}' is outside any section, ignored", i + 1, file_name);
            }
            continue;
        }
        if trimmed.is_empty() {
            let target = match section {
                Section::Reactants => &mut reactant_blocks,
                _ => &mut product_blocks,
            };
            close_block(&mut block, block_start, target);
            continue;
        }
        if block.is_empty() {
            block_start = i + 1;
        }
        block.push(trimmed.to_string());
    }
    let target = match section {
        Section::Reactants => &mut reactant_blocks,
        _ => &mut product_blocks,
    };
    close_block(&mut block, block_start, target);

    if !seen_reactants {
        return Err(format!("No 'REACTANTS' header found in file '{}'", file_name));
    }
    if reactant_blocks.is_empty() {
        return Err(format!("No reactants listed in file '{}'", file_name));
    }

    let parse = |blocks: Vec<(usize, String)>| -> Result<Vec<M>, String> {
        blocks
            .into_iter()
            .map(|(start, text)| {
                M::from_adjacency_list(&text).map_err(|e| {
                    let msg = format!(
                        "Error parsing adjacency list starting at line {} of '{}': {}",
                        start, file_name, e
                    );
                    error!("{}", msg);
                    msg
                })
            })
            .collect()
    };
    let task = QueryTask {
        reactants: parse(reactant_blocks)?,
        products: parse(product_blocks)?,
    };
    info!(
        "Loaded {} reactants and {} products from file '{}'",
        task.reactants.len(),
        task.products.len(),
        file_name
    );
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chemistry::adjacency_list::AdjacencyMolecule;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_task(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_reactants_and_products() {
        let file = write_task(
            "// methyl recombination\nREACTANTS\nCH3\n1 C 1\n\n1 C 1\n\nPRODUCTS\nC2H6\n1 C 0 {2,S}\n2 C 0 {1,S}\nEND\n",
        );
        let task: QueryTask<AdjacencyMolecule> =
            load_query_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(task.reactants.len(), 2);
        assert_eq!(task.products.len(), 1);
        assert_eq!(task.products[0].bond_count(), 1);
    }

    #[test]
    fn test_products_are_optional() {
        let file = write_task("REACTANTS\n1 C 1 {2,S}\n2 C 0 {1,S}\n");
        let task: QueryTask<AdjacencyMolecule> =
            load_query_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(task.reactants.len(), 1);
        assert!(task.products.is_empty());
    }

    #[test]
    fn test_errors() {
        assert!(load_query_from_file::<AdjacencyMolecule>("no_such_task.txt").is_err());

        let file = write_task("PRODUCTS\n1 C 1\nEND\n");
        let err = load_query_from_file::<AdjacencyMolecule>(file.path().to_str().unwrap())
            .unwrap_err();
        assert!(err.contains("REACTANTS"));

        let file = write_task("REACTANTS\n1 C 1 {5,S}\nEND\n");
        let err = load_query_from_file::<AdjacencyMolecule>(file.path().to_str().unwrap())
            .unwrap_err();
        assert!(err.contains("line 2"));

        let file = write_task("REACTANTS\nEND\n");
        assert!(load_query_from_file::<AdjacencyMolecule>(file.path().to_str().unwrap()).is_err());
    }
}
