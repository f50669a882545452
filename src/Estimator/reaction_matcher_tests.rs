#[cfg(test)]
mod tests {
    use crate::Chemistry::adjacency_list::AdjacencyMolecule;
    use crate::Estimator::arrhenius::{DUPLICATE_WARNING, PROVENANCE, PreExponentialUnits};
    use crate::Estimator::errors::EstimatorError;
    use crate::Estimator::reaction_matcher::{
        RawReaction, ReactionLine, ReactionMatcher, names_correspond, parse_reaction_line,
    };
    use crate::Estimator::response_parser::SpeciesDictionaryEntry;
    use crate::Estimator::species_resolver::SpeciesDictionary;
    use approx::assert_relative_eq;

    fn dictionary() -> SpeciesDictionary<AdjacencyMolecule> {
        let entries: Vec<SpeciesDictionaryEntry> = [
            ("R1", "1 C 1 {2,S}\n2 C 0 {1,S}"),
            ("P1", "1 C 0 {2,D}\n2 C 0 {1,D}"),
            ("CH3", "1 C 1"),
            ("H", "1 H 1"),
            ("C2H6", "1 C 0 {2,S}\n2 C 0 {1,S}"),
        ]
        .iter()
        .map(|(name, adjlist)| SpeciesDictionaryEntry {
            name: name.to_string(),
            adjacency_list: adjlist.to_string(),
        })
        .collect();
        SpeciesDictionary::from_entries(&entries).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_name_rule() {
        let empty: [&str; 0] = [];
        assert!(names_correspond(&empty, &["A", "B"]));
        assert!(names_correspond(&["A"], &["A", "A"]));
        assert!(names_correspond(&["A"], &["A", "A", "A"]));
        assert!(!names_correspond(&["A"], &["A", "B"]));
        assert!(names_correspond(&["A", "B"], &["B", "A"]));
        assert!(!names_correspond(&["A", "C"], &["A", "B"]));
        assert!(!names_correspond(&["A", "A"], &["A", "B"]));
        assert!(!names_correspond(&["A", "B"], &["A"]));
        assert!(!names_correspond(&["A", "B"], &["A", "B", "B"]));
    }

    #[test]
    fn test_parse_reaction_line() {
        let line = "CH3 + CH3 --> C2H6\t1.0e13\t0\t0.5\trate rule\tfamily";
        let ReactionLine::Reaction(raw) = parse_reaction_line(line).unwrap() else {
            panic!("expected a reaction");
        };
        assert_eq!(raw.reactants, names(&["CH3", "CH3"]));
        assert_eq!(raw.products, names(&["C2H6"]));
        assert_eq!(raw.comment(), "rate rule\tfamily");
        assert_eq!(raw.equation(), "CH3 + CH3 --> C2H6");
        assert_eq!(
            parse_reaction_line("  DUP\t1.0\t0\t0").unwrap(),
            ReactionLine::Duplicate
        );
        assert!(matches!(
            parse_reaction_line("CH3 + CH3 = C2H6\t1\t0\t0"),
            Err(EstimatorError::ProtocolError(_))
        ));
    }

    #[test]
    fn test_forward_and_reverse_matching() {
        let raw = RawReaction {
            reactants: names(&["CH3", "H"]),
            products: names(&["CH4"]),
            fields: Vec::new(),
        };
        assert!(raw.matches(&names(&["H", "CH3"]), &names(&[])));
        assert!(raw.matches(&names(&["CH4"]), &names(&[])));
        assert!(raw.matches(&names(&["CH4"]), &names(&["CH3", "H"])));
        assert!(!raw.matches(&names(&["CH3"]), &names(&[])));
        assert!(!raw.matches(&names(&["CH3", "H"]), &names(&["C2H6"])));
    }

    #[test]
    fn test_unimolecular_example() {
        let dict = dictionary();
        let matcher = ReactionMatcher::new(&dict, names(&["R1"]), Vec::new());
        let result = matcher
            .match_reactions(&["R1 --> P1\t1.0e13\t0\t5.0\tcomment"])
            .unwrap();
        assert_eq!(result.reactions.len(), 1);
        assert!(result.notices.is_empty());
        let reaction = &result.reactions[0];
        assert_relative_eq!(reaction.kinetics.A, 1.0e13);
        assert_eq!(reaction.kinetics.A_units, PreExponentialUnits::PerSecond);
        assert_eq!(reaction.kinetics.A_units.as_str(), "s^-1");
        assert_relative_eq!(reaction.kinetics.n, 0.0);
        assert_relative_eq!(reaction.kinetics.Ea, 5.0);
        assert_relative_eq!(reaction.kinetics.T0, 1.0);
        assert_eq!(reaction.degeneracy, 1);
        assert_eq!(reaction.kinetics.comment, format!("{}comment", PROVENANCE));
        assert_eq!(reaction.long_desc, "comment");
        assert_eq!(reaction.reactants[0].label, "[CH2]C");
        assert_eq!(reaction.products[0].label, "C=C");
        assert_eq!(reaction.equation(), "[CH2]C <=> C=C");
    }

    #[test]
    fn test_self_reaction_and_units() {
        let dict = dictionary();
        let matcher = ReactionMatcher::new(&dict, names(&["CH3"]), Vec::new());
        let lines = [
            "CH3 + CH3 --> C2H6\t8.26e15\t-1.4\t1.0\tR_Recombination",
            "CH3 + H --> C2H6\t1.0e12\t0\t0\tnot this one",
        ];
        let result = matcher.match_reactions(&lines).unwrap();
        assert_eq!(result.reactions.len(), 1);
        let reaction = &result.reactions[0];
        assert_eq!(reaction.kinetics.A_units, PreExponentialUnits::Bimolecular);
        assert_relative_eq!(reaction.kinetics.n, -1.4);
        assert_eq!(reaction.reactants.len(), 2);
    }

    #[test]
    fn test_reverse_direction_match() {
        let dict = dictionary();
        let matcher = ReactionMatcher::new(&dict, names(&["C2H6"]), names(&["CH3"]));
        let result = matcher
            .match_reactions(&["CH3 + CH3 --> C2H6\t1.0e13\t0\t0\trecombination"])
            .unwrap();
        assert_eq!(result.reactions.len(), 1);
        // the record keeps the direction of the line
        assert_eq!(result.reactions[0].equation(), "[CH3] + [CH3] <=> CC");
    }

    #[test]
    fn test_every_matching_line_is_kept() {
        let dict = dictionary();
        let matcher = ReactionMatcher::new(&dict, names(&["R1"]), Vec::new());
        let lines = [
            "R1 --> P1 + H\t1.0e13\t0\t40.0\tbeta scission",
            "R1 --> P1 + H\t2.0e13\t0\t42.0\tanother path",
        ];
        let result = matcher.match_reactions(&lines).unwrap();
        assert_eq!(result.reactions.len(), 2);
        assert_relative_eq!(result.reactions[1].kinetics.A, 2.0e13);
    }

    #[test]
    fn test_two_duplicate_markers_after_a_match() {
        let dict = dictionary();
        let matcher = ReactionMatcher::new(&dict, names(&["R1"]), Vec::new());
        let lines = [
            "R1 --> P1 + H\t1.0e13\t0\t40.0\tfirst",
            "DUP\t3.0e12\t0\t41.0",
            "DUP\t2.0e12\t0\t43.0",
        ];
        let result = matcher.match_reactions(&lines).unwrap();
        assert_eq!(result.reactions.len(), 1);
        let comment = &result.reactions[0].kinetics.comment;
        assert_eq!(comment.matches(DUPLICATE_WARNING).count(), 2);
        assert!(comment.starts_with(PROVENANCE));
        // rates are not summed
        assert_relative_eq!(result.reactions[0].kinetics.A, 1.0e13);
        assert_eq!(result.notices.len(), 2);
        assert!(
            result
                .notices
                .iter()
                .all(|n| matches!(n, EstimatorError::DuplicateRateUnhandled(_)))
        );
    }

    #[test]
    fn test_duplicate_marker_after_non_matching_line() {
        let dict = dictionary();
        let matcher = ReactionMatcher::new(&dict, names(&["R1"]), Vec::new());
        let lines = [
            "R1 --> P1 + H\t1.0e13\t0\t40.0\tfirst",
            "CH3 + H --> C2H6\t1.0e13\t0\t0\tother",
            "DUP\t2.0e12\t0\t43.0",
        ];
        let result = matcher.match_reactions(&lines).unwrap();
        assert_eq!(result.reactions.len(), 1);
        assert!(!result.reactions[0].kinetics.comment.contains("DUPLICATE"));
        assert!(result.notices.is_empty());
    }

    #[test]
    fn test_malformed_rate_fields() {
        let dict = dictionary();
        let matcher = ReactionMatcher::new(&dict, names(&["R1"]), Vec::new());
        assert!(matches!(
            matcher.match_reactions(&["R1 --> P1\tfast\t0\t5.0"]),
            Err(EstimatorError::ProtocolError(_))
        ));
        assert!(matches!(
            matcher.match_reactions(&["R1 --> P1\t1.0e13"]),
            Err(EstimatorError::ProtocolError(_))
        ));
        // rates of lines that do not match are never read
        assert!(matcher.match_reactions(&["H --> CH3\tfast"]).is_ok());
    }

    #[test]
    fn test_unknown_species_in_matched_line() {
        let dict = dictionary();
        let matcher = ReactionMatcher::new(&dict, names(&["R1"]), Vec::new());
        assert!(matches!(
            matcher.match_reactions(&["R1 --> X9\t1.0\t0\t0"]),
            Err(EstimatorError::ProtocolError(_))
        ));
    }

    #[test]
    fn test_no_lines_no_matches() {
        let dict = dictionary();
        let matcher = ReactionMatcher::new(&dict, names(&["R1"]), Vec::new());
        let empty: [&str; 0] = [];
        let result = matcher.match_reactions(&empty).unwrap();
        assert!(result.reactions.is_empty());
        assert!(result.notices.is_empty());
    }
}
