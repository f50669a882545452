use KiThe_estimator::Utils::logging::init_logging;
use KiThe_estimator::cli::cli_main::run_interactive_menu;
use KiThe_estimator::settings::SettingsManager;

pub fn main() {
    let mut manager = SettingsManager::new();
    // an optional argument names a log file
    let log_file = std::env::args().nth(1);
    if let Err(e) = init_logging(&manager.config().log_level, log_file.as_deref()) {
        eprintln!("Logging is not available: {}", e);
    }
    run_interactive_menu(&mut manager);
}
