use super::cli_main::{get_user_input, prompt};
use crate::settings::SettingsManager;
use std::io::{self, Write};

pub fn settings_menu(manager: &mut SettingsManager) {
    loop {
        println!("\n=== Estimation service settings ===");
        show_settings(manager);
        println!("1. Set host");
        println!("2. Set port");
        println!("3. Set timeout");
        println!("4. Set response deadline");
        println!("5. Set log level (applies on next start)");
        println!("6. Reset to defaults");
        println!("0. Back");
        print!("Choose option: ");
        io::stdout().flush().unwrap();

        let result = match get_user_input().trim() {
            "1" => manager
                .set_host(&prompt("Host: "))
                .map_err(|e| e.to_string()),
            "2" => read_number::<u16>("Port: ")
                .and_then(|port| manager.set_port(port).map_err(|e| e.to_string())),
            "3" => read_number::<u64>("Timeout, s: ")
                .and_then(|t| manager.set_timeout_secs(t).map_err(|e| e.to_string())),
            "4" => {
                let text = prompt("Response deadline, s (empty for none): ");
                let deadline = if text.is_empty() {
                    Ok(None)
                } else {
                    text.parse::<u64>()
                        .map(Some)
                        .map_err(|_| format!("'{}' is not a whole number", text))
                };
                deadline.and_then(|d| {
                    manager
                        .set_response_deadline_secs(d)
                        .map_err(|e| e.to_string())
                })
            }
            "5" => manager
                .set_log_level(&prompt("Log level (error, warn, info, debug, trace): "))
                .map_err(|e| e.to_string()),
            "6" => manager.reset_to_defaults().map_err(|e| e.to_string()),
            "0" => break,
            _ => Err("Invalid option".to_string()),
        };
        match result {
            Ok(()) => println!("Settings saved to {}", manager.config_file()),
            Err(e) => println!("\x1b[31mError: {}\x1b[0m", e),
        }
    }
}

fn show_settings(manager: &SettingsManager) {
    let config = manager.config();
    println!("  host: {}", config.host);
    println!("  port: {}", config.port);
    println!("  timeout: {} s", config.timeout_secs);
    match config.response_deadline_secs {
        Some(d) => println!("  response deadline: {} s", d),
        None => println!("  response deadline: none"),
    }
    println!("  log level: {}", config.log_level);
}

fn read_number<T: std::str::FromStr>(text: &str) -> Result<T, String> {
    let input = prompt(text);
    input
        .parse::<T>()
        .map_err(|_| format!("'{}' is not a valid number", input))
}
