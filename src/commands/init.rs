use std::io::{self, Write};

use crate::config::Config;
use crate::error::{CohortError, Result};

fn prompt(label: &str) -> String {
    print!("{label}");
    io::stdout().flush().unwrap();

    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input.trim().to_string()
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ));
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Cohort CLI Configuration");
    println!("========================\n");

    let base_url = prompt("Enter your platform URL (e.g., https://lms.example.com): ");
    if base_url.is_empty() {
        return Err(CohortError::MissingBaseUrl);
    }

    let username = prompt("Enter your username: ");
    if username.is_empty() {
        return Err(CohortError::MissingUsername);
    }

    let course_id = prompt("Enter default course id [optional]: ");
    let api_token = prompt("Enter API token [optional]: ");

    // Create config directory if it doesn't exist
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CohortError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let mut config_content = format!("base_url = \"{base_url}\"\nusername = \"{username}\"\n");
    if !course_id.is_empty() {
        config_content.push_str(&format!("course_id = \"{course_id}\"\n"));
    }
    if !api_token.is_empty() {
        config_content.push_str(&format!("api_token = \"{api_token}\"\n"));
    }

    std::fs::write(&config_path, config_content).map_err(|e| CohortError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'cohort' commands!");

    Ok(())
}
