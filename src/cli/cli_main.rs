use super::cli_query::query_menu;
use super::cli_settings::settings_menu;
use crate::settings::SettingsManager;
use std::io::{self, Write};

pub fn run_interactive_menu(manager: &mut SettingsManager) {
    loop {
        show_main_menu(manager);
        let choice = get_user_input();

        match choice.trim() {
            "1" => query_menu(manager.config()),
            "2" => settings_menu(manager),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - header text
Yellow (\x1b[33m) - menu options
Cyan (\x1b[36m) - "Enter your choice:" prompt
Reset (\x1b[0m) - back to normal color
*/
fn show_main_menu(manager: &SettingsManager) {
    println!(
        "\x1b[34m\n KiThe estimator: reaction kinetics from a PopulateReactions service\n
    service at {} \n \x1b[0m",
        manager.config().address()
    );
    println!("\x1b[33m1. Estimate reactions from a task file\x1b[0m");
    println!("\x1b[33m2. Service settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    io::stdout().flush().unwrap();
}

pub(crate) fn get_user_input() -> String {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        // end of input leaves every menu
        Ok(0) => "0".to_string(),
        Ok(_) => input,
        Err(e) => {
            println!("Failed to read input: {}", e);
            "0".to_string()
        }
    }
}

pub(crate) fn prompt(text: &str) -> String {
    print!("\x1b[36m{}\x1b[0m", text);
    io::stdout().flush().unwrap();
    get_user_input().trim().to_string()
}
