use super::adjacency_list::{AdjacencyMolecule, Atom};
use petgraph::algo::is_isomorphic_matching;

/// atoms correspond when element, radical count and charge agree; labels are not compared
fn same_atom(a: &Atom, b: &Atom) -> bool {
    a.element == b.element && a.radicals == b.radicals && a.charge == b.charge
}

/// Structural equivalence of two molecular graphs.
/// Explicit and implicit hydrogens are not reconciled: both molecules should use the same convention.
pub fn is_isomorphic(a: &AdjacencyMolecule, b: &AdjacencyMolecule) -> bool {
    if a.atom_count() != b.atom_count() || a.bond_count() != b.bond_count() {
        return false;
    }
    let graph_a = a.to_graph();
    let graph_b = b.to_graph();
    is_isomorphic_matching(&graph_a, &graph_b, same_atom, |x, y| x == y)
}
