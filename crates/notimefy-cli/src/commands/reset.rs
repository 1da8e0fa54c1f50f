use std::path::Path;

use notimefy_core::{Config, StateStore};

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;
    let store = StateStore::for_service(&config.kimai)?;
    store.reset()?;
    println!("tracker state reset");
    Ok(())
}
