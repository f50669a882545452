/// eng
/// Query exchange with an external kinetics-estimation service (a PopulateReactions server).
/// The reactant structures are sent over TCP as a job file, the service answers with a species
/// dictionary and a list of reactions with estimated Arrhenius parameters, and the reactions
/// that involve the query species are picked out of that answer.
///
/// Leaf modules first: request_encoder → stream_receiver → response_parser →
/// species_resolver, reaction_matcher → kinetics_service
pub mod errors;
/// payload of a PopulateReactions job
pub mod request_encoder;
/// TCP exchange, read until the service closes the stream
pub mod stream_receiver;
/// splits the response into the species dictionary and the reaction lines
pub mod response_parser;
/// names the service assigned to the query molecules
pub mod species_resolver;
/// Arrhenius parameters and the estimated reaction record
pub mod arrhenius;
/// finds the reaction lines matching the query, forward or reverse
pub mod reaction_matcher;
/// orchestration of the whole exchange
pub mod kinetics_service;
mod reaction_matcher_tests;

pub use errors::{EstimatorError, ServiceStatus};
pub use kinetics_service::{Estimation, KineticsService, estimate_reactions};
