/// interactive terminal menu of the estimator
pub mod cli_main;
/// querying the estimation service with a task file
pub mod cli_query;
/// viewing and changing the service settings
pub mod cli_settings;
