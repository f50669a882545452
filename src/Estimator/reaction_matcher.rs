//! # Reaction Matcher
//!
//! Scans the reaction lines of a service response for the reactions asked about.
//!
//! A reaction line is tab separated: `R1 + R2 --> P1 + P2`, A, n, Ea and free comment fields.
//! A line matches when its names correspond to the query either forward (reactants to query
//! reactants, products to query products) or in reverse. Correspondence of a query name list
//! `Q` with a parsed list `P`:
//! - `Q` empty: any `P` (the side is "don't care")
//! - same length: equal as multisets
//! - one query name, several parsed names: every parsed name is the query name (A + A)
//! - otherwise no match
//!
//! Lines starting with `DUP` say the rate of the previous line should be summed with this one.
//! Summation is not done: the previous matched reaction gets a warning in its comment and the
//! marker is skipped. Matches are not deduplicated.
use super::arrhenius::{
    Arrhenius, DUPLICATE_WARNING, EstimatedReaction, PROVENANCE, PreExponentialUnits,
};
use super::errors::EstimatorError;
use super::species_resolver::SpeciesDictionary;
use crate::Chemistry::structure::{ChemicalStructure, Species};
use log::{info, warn};

pub const ARROW: &str = " --> ";
pub const PLUS: &str = " + ";
pub const DUPLICATE_MARKER: &str = "DUP";
/// the service always reports a degeneracy of one
pub const DEGENERACY: u32 = 1;

/// reaction line split into names and the remaining tab-separated fields
#[derive(Debug, Clone, PartialEq)]
pub struct RawReaction {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    /// A, n, Ea, comment fields...
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReactionLine {
    Duplicate,
    Reaction(RawReaction),
}

fn split_names(side: &str) -> Vec<String> {
    side.split(PLUS).map(|name| name.trim().to_string()).collect()
}

pub fn parse_reaction_line(line: &str) -> Result<ReactionLine, EstimatorError> {
    if line.trim().starts_with(DUPLICATE_MARKER) {
        return Ok(ReactionLine::Duplicate);
    }
    let mut fields = line.split('\t');
    let equation = fields.next().unwrap_or_default();
    let (reactants, products) = equation.split_once(ARROW).ok_or_else(|| {
        EstimatorError::ProtocolError(format!("reaction line without '-->': {}", line))
    })?;
    Ok(ReactionLine::Reaction(RawReaction {
        reactants: split_names(reactants),
        products: split_names(products),
        fields: fields.map(|f| f.to_string()).collect(),
    }))
}

/// whether a parsed name list satisfies a query name list
pub fn names_correspond<Q: AsRef<str>, P: AsRef<str>>(query: &[Q], parsed: &[P]) -> bool {
    if query.is_empty() {
        return true;
    }
    if query.len() == parsed.len() {
        let mut q: Vec<&str> = query.iter().map(|s| s.as_ref()).collect();
        let mut p: Vec<&str> = parsed.iter().map(|s| s.as_ref()).collect();
        q.sort_unstable();
        p.sort_unstable();
        return q == p;
    }
    if query.len() == 1 && parsed.len() > 1 {
        return parsed.iter().all(|p| p.as_ref() == query[0].as_ref());
    }
    false
}

impl RawReaction {
    pub fn matches<S: AsRef<str>>(&self, reactant_names: &[S], product_names: &[S]) -> bool {
        let forward = names_correspond(reactant_names, &self.reactants)
            && names_correspond(product_names, &self.products);
        let reverse = names_correspond(product_names, &self.reactants)
            && names_correspond(reactant_names, &self.products);
        forward || reverse
    }

    fn numeric_field(&self, index: usize, what: &str) -> Result<f64, EstimatorError> {
        let raw = self.fields.get(index).ok_or_else(|| {
            EstimatorError::ProtocolError(format!("reaction line has no {} field", what))
        })?;
        raw.trim().parse::<f64>().map_err(|_| {
            EstimatorError::ProtocolError(format!("{} '{}' is not a number", what, raw.trim()))
        })
    }

    /// trailing comment fields, tab-joined
    pub fn comment(&self) -> String {
        self.fields.iter().skip(3).cloned().collect::<Vec<String>>().join("\t")
    }

    #[allow(non_snake_case)]
    pub fn kinetics(&self) -> Result<Arrhenius, EstimatorError> {
        let A = self.numeric_field(0, "pre-exponential factor")?;
        let n = self.numeric_field(1, "temperature exponent")?;
        let Ea = self.numeric_field(2, "activation energy")?;
        let mut kinetics = Arrhenius::new(
            A,
            PreExponentialUnits::for_reactant_count(self.reactants.len()),
            n,
            Ea,
        );
        kinetics.comment = format!("{}{}", PROVENANCE, self.comment());
        Ok(kinetics)
    }

    pub fn equation(&self) -> String {
        format!("{}{}{}", self.reactants.join(PLUS), ARROW, self.products.join(PLUS))
    }
}

/// matches and the non-fatal conditions met while scanning
#[derive(Debug, Clone)]
pub struct MatchResult<M> {
    pub reactions: Vec<EstimatedReaction<M>>,
    pub notices: Vec<EstimatorError>,
}

pub struct ReactionMatcher<'a, M> {
    pub dictionary: &'a SpeciesDictionary<M>,
    pub reactant_names: Vec<String>,
    pub product_names: Vec<String>,
}

impl<'a, M: ChemicalStructure> ReactionMatcher<'a, M> {
    pub fn new(
        dictionary: &'a SpeciesDictionary<M>,
        reactant_names: Vec<String>,
        product_names: Vec<String>,
    ) -> Self {
        Self {
            dictionary,
            reactant_names,
            product_names,
        }
    }

    fn species_list(&self, names: &[String]) -> Result<Vec<Species<M>>, EstimatorError> {
        names
            .iter()
            .map(|name| {
                self.dictionary.species(name).ok_or_else(|| {
                    EstimatorError::ProtocolError(format!(
                        "reaction refers to species {} missing from the dictionary",
                        name
                    ))
                })
            })
            .collect()
    }

    fn build_reaction(&self, raw: &RawReaction) -> Result<EstimatedReaction<M>, EstimatorError> {
        let kinetics = raw.kinetics()?;
        Ok(EstimatedReaction {
            reactants: self.species_list(&raw.reactants)?,
            products: self.species_list(&raw.products)?,
            kinetics,
            degeneracy: DEGENERACY,
            long_desc: raw.comment(),
        })
    }

    pub fn match_reactions<S: AsRef<str>>(
        &self,
        lines: &[S],
    ) -> Result<MatchResult<M>, EstimatorError> {
        let mut reactions: Vec<EstimatedReaction<M>> = Vec::new();
        let mut notices = Vec::new();
        // index of the reaction built from the line just before, if it matched
        let mut previous: Option<usize> = None;
        for line in lines {
            let line = line.as_ref();
            let raw = match parse_reaction_line(line)? {
                ReactionLine::Duplicate => {
                    warn!("duplicate reaction kinetics are not being summed");
                    if let Some(i) = previous {
                        reactions[i].append_comment(DUPLICATE_WARNING);
                        notices.push(EstimatorError::DuplicateRateUnhandled(
                            reactions[i].equation(),
                        ));
                    }
                    continue;
                }
                ReactionLine::Reaction(raw) => raw,
            };
            previous = None;
            if raw.matches(&self.reactant_names, &self.product_names) {
                info!("found a matching reaction: {}", raw.equation());
                reactions.push(self.build_reaction(&raw)?);
                previous = Some(reactions.len() - 1);
            }
        }
        Ok(MatchResult { reactions, notices })
    }
}
