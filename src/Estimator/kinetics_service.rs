//! # Kinetics Service
//!
//! ## Aim
//! Single entry point of the estimation exchange: given reactant structures (and optionally
//! product structures) return the reactions a running PopulateReactions service proposes for
//! them, with Arrhenius rates.
//!
//! ## Flow
//! reactants → `encode_request` → `ServiceConnection::exchange` → `parse_response` →
//! `SpeciesDictionary` (names of the query molecules) → `ReactionMatcher` → reactions
//!
//! ## Failure policy
//! The service is optional. An unreachable service gives an `Estimation` with status
//! `ServiceStatus::Unavailable` and no reactions; a product that cannot be named is dropped
//! from the search with a notice; a reactant that cannot be named gives an empty result.
//! Only a malformed response (`EstimatorError::ProtocolError`) is returned as an error.
//!
//! ## Usage
//! ```rust, ignore
//! let service = KineticsService::new(&ServiceConfig::default());
//! let estimation = service.estimate_reactions(&[methyl.clone(), methyl], &[])?;
//! if !estimation.is_reached() {
//!     println!("service is down");
//! }
//! for reaction in estimation.reactions { println!("{}", reaction.equation()); }
//! ```
use super::arrhenius::EstimatedReaction;
use super::errors::{EstimatorError, ServiceStatus};
use super::reaction_matcher::ReactionMatcher;
use super::request_encoder::encode_request;
use super::response_parser::parse_response;
use super::species_resolver::SpeciesDictionary;
use super::stream_receiver::{ServiceConnection, StreamReceiver};
use crate::Chemistry::structure::{ChemicalStructure, Species};
use crate::settings::ServiceConfig;
use log::{debug, info, warn};

/// reactions found by one call, with the conditions met on the way
#[derive(Debug, Clone)]
pub struct Estimation<M> {
    pub status: ServiceStatus,
    pub reactions: Vec<EstimatedReaction<M>>,
    /// `UnresolvedSpecies` and `DuplicateRateUnhandled` conditions
    pub notices: Vec<EstimatorError>,
}

impl<M> Estimation<M> {
    pub fn unavailable(error: EstimatorError) -> Self {
        Self {
            status: ServiceStatus::Unavailable(error),
            reactions: Vec::new(),
            notices: Vec::new(),
        }
    }

    fn reached(reactions: Vec<EstimatedReaction<M>>, notices: Vec<EstimatorError>) -> Self {
        Self {
            status: ServiceStatus::Reached,
            reactions,
            notices,
        }
    }
    /// false when the service could not be reached; an empty result from a reached service is true
    pub fn is_reached(&self) -> bool {
        self.status == ServiceStatus::Reached
    }

    pub fn into_reactions(self) -> Vec<EstimatedReaction<M>> {
        self.reactions
    }
}

pub struct KineticsService<C: ServiceConnection = StreamReceiver> {
    connection: C,
}

impl KineticsService<StreamReceiver> {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            connection: StreamReceiver::from_config(config),
        }
    }
}

impl Default for KineticsService<StreamReceiver> {
    fn default() -> Self {
        Self::new(&ServiceConfig::default())
    }
}

impl<C: ServiceConnection> KineticsService<C> {
    pub fn with_connection(connection: C) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Reactions proposed by the service for `reactants`, in either direction.
    ///
    /// Empty `products` match any products. A reactant missing from the species dictionary
    /// gives an empty result; a missing product turns the whole product side into
    /// "any products", so that the products that did resolve cannot narrow the search
    /// to reactions with fewer products. Both cases leave an `UnresolvedSpecies` notice.
    pub fn estimate_reactions<M: ChemicalStructure>(
        &self,
        reactants: &[M],
        products: &[M],
    ) -> Result<Estimation<M>, EstimatorError> {
        let payload = encode_request(reactants);
        let response = match self.connection.exchange(&payload) {
            Ok(response) => response,
            Err(err @ EstimatorError::ServiceUnavailable { .. }) => {
                warn!(
                    "unable to query the estimation service for kinetics (is the service running?): {}",
                    err
                );
                return Ok(Estimation::unavailable(err));
            }
            Err(err) => return Err(err),
        };
        let parsed = parse_response(&response)?;
        if parsed.is_empty() {
            info!("the estimation service answered with no species and no reactions");
        }
        let dictionary = SpeciesDictionary::<M>::from_entries(&parsed.species)?;
        debug!(
            "species known to the service: {}",
            dictionary.names().collect::<Vec<&str>>().join(", ")
        );

        let mut notices = Vec::new();
        let mut reactant_names = Vec::with_capacity(reactants.len());
        for reactant in reactants {
            match dictionary.resolve_name(reactant) {
                Some(name) => reactant_names.push(name.to_string()),
                None => {
                    let smiles = reactant.to_smiles();
                    warn!(
                        "could not find reactant {} in the species dictionary of the service",
                        smiles
                    );
                    notices.push(EstimatorError::UnresolvedSpecies(smiles));
                }
            }
        }
        if reactant_names.len() < reactants.len() {
            return Ok(Estimation::reached(Vec::new(), notices));
        }
        let mut product_names = Vec::with_capacity(products.len());
        for product in products {
            match dictionary.resolve_name(product) {
                Some(name) => product_names.push(name.to_string()),
                None => {
                    let smiles = product.to_smiles();
                    warn!(
                        "could not find requested product {} in the species dictionary of the service",
                        smiles
                    );
                    notices.push(EstimatorError::UnresolvedSpecies(smiles));
                }
            }
        }
        if product_names.len() < products.len() {
            info!("some products are unknown to the service, matching any products");
            product_names.clear();
        }

        info!(
            "searching {} reaction lines for {:?} -> {:?}",
            parsed.reaction_lines.len(),
            reactant_names,
            product_names
        );
        let matcher = ReactionMatcher::new(&dictionary, reactant_names, product_names);
        let matched = matcher.match_reactions(&parsed.reaction_lines)?;
        notices.extend(matched.notices);
        Ok(Estimation::reached(matched.reactions, notices))
    }

    /// Kinetics of one known reaction, queried with the first structure of every species.
    ///
    /// When the service proposes several matching reactions the first is returned with a
    /// warning appended to its comment; `None` when nothing matches or the service is down.
    pub fn estimate_kinetics_for_reaction<M: ChemicalStructure>(
        &self,
        reactants: &[Species<M>],
        products: &[Species<M>],
    ) -> Result<Option<EstimatedReaction<M>>, EstimatorError> {
        let structures = |species: &[Species<M>]| -> Vec<M> {
            species
                .iter()
                .filter_map(|s| {
                    let molecule = s.representative().cloned();
                    if molecule.is_none() {
                        warn!("species {} has no structure and is left out of the query", s);
                    }
                    molecule
                })
                .collect()
        };
        let equation = format!(
            "{} <=> {}",
            reactants.iter().map(|s| s.label.as_str()).collect::<Vec<_>>().join(" + "),
            products.iter().map(|s| s.label.as_str()).collect::<Vec<_>>().join(" + ")
        );
        let mut reactions = self
            .estimate_reactions(&structures(reactants), &structures(products))?
            .into_reactions();
        if reactions.is_empty() {
            warn!("estimation service could not find the reaction {}", equation);
            return Ok(None);
        }
        let count = reactions.len();
        let mut first = reactions.swap_remove(0);
        if count > 1 {
            warn!(
                "estimation service identified {} reactions that match {} instead of 1",
                count, equation
            );
            first.append_comment(&format!(
                "\nWARNING - estimation service identified {} reactions that match this. These kinetics are just from one of them.",
                count
            ));
        }
        Ok(Some(first))
    }
}

/// Runs one estimation with the service described by `config`.
pub fn estimate_reactions<M: ChemicalStructure>(
    config: &ServiceConfig,
    reactants: &[M],
    products: &[M],
) -> Result<Estimation<M>, EstimatorError> {
    KineticsService::new(config).estimate_reactions(reactants, products)
}
