use std::path::Path;

use notimefy_core::{Config, StateStore};

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;
    let store = StateStore::for_service(&config.kimai)?;

    println!("state file: {}", store.path().display());
    match store.load() {
        Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
        None => println!("No tracker state recorded yet"),
    }
    Ok(())
}
