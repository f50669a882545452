use super::adjacency_list::{AdjacencyMolecule, BondOrder};

const MAX_RESONANCE_ISOMERS: usize = 32;

/// All structures reachable by allyl-type shifts `X•–Y=Z  →  X=Y–Z•`.
/// The molecule itself is always the first element.
pub fn generate_resonance_isomers(mol: &AdjacencyMolecule) -> Vec<AdjacencyMolecule> {
    let mut isomers = vec![mol.clone()];
    let mut index = 0;
    while index < isomers.len() && isomers.len() < MAX_RESONANCE_ISOMERS {
        let current = isomers[index].clone();
        for candidate in allyl_shifts(&current) {
            if isomers.len() >= MAX_RESONANCE_ISOMERS {
                break;
            }
            if !isomers.contains(&candidate) {
                isomers.push(candidate);
            }
        }
        index += 1;
    }
    isomers
}

fn allyl_shifts(mol: &AdjacencyMolecule) -> Vec<AdjacencyMolecule> {
    let mut shifted = Vec::new();
    for x in 0..mol.atom_count() {
        if mol.atoms[x].radicals == 0 {
            continue;
        }
        for (y, xy) in mol.neighbours(x) {
            if xy != BondOrder::Single {
                continue;
            }
            for (z, yz) in mol.neighbours(y) {
                if z == x {
                    continue;
                }
                let Some(yz_lowered) = yz.decrement() else {
                    continue;
                };
                let mut isomer = mol.clone();
                isomer.atoms[x].radicals -= 1;
                isomer.atoms[z].radicals += 1;
                for atom in [x, z] {
                    if isomer.atoms[atom].radicals < 2 {
                        isomer.atoms[atom].spin = None;
                    }
                }
                isomer.set_bond_order(x, y, BondOrder::Double);
                isomer.set_bond_order(y, z, yz_lowered);
                shifted.push(isomer);
            }
        }
    }
    shifted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allyl_radical_has_two_structures() {
        let allyl = AdjacencyMolecule::parse("1 C 1 {2,S}\n2 C 0 {1,S} {3,D}\n3 C 0 {2,D}").unwrap();
        let isomers = generate_resonance_isomers(&allyl);
        assert_eq!(isomers.len(), 2);
        assert_eq!(isomers[0], allyl);
        let shifted = &isomers[1];
        assert_eq!(shifted.atoms[0].radicals, 0);
        assert_eq!(shifted.atoms[2].radicals, 1);
        assert_eq!(shifted.bond_between(0, 1), Some(BondOrder::Double));
        assert_eq!(shifted.bond_between(1, 2), Some(BondOrder::Single));
    }

    #[test]
    fn test_saturated_radical_has_one_structure() {
        let ethyl = AdjacencyMolecule::parse("1 C 1 {2,S}\n2 C 0 {1,S}").unwrap();
        assert_eq!(generate_resonance_isomers(&ethyl), vec![ethyl]);
    }

    #[test]
    fn test_closed_shell_molecule_has_one_structure() {
        let butadiene = AdjacencyMolecule::parse(
            "1 C 0 {2,D}\n2 C 0 {1,D} {3,S}\n3 C 0 {2,S} {4,D}\n4 C 0 {3,D}",
        )
        .unwrap();
        assert_eq!(generate_resonance_isomers(&butadiene).len(), 1);
    }
}
