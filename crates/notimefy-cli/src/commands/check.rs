use std::path::Path;

use notimefy_core::{notify, Check, Config, KimaiClient, ReportingPeriod, StateStore};

pub fn run(config_path: Option<&Path>, reset_first: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;
    let store = StateStore::for_service(&config.kimai)?;
    if reset_first {
        store.reset()?;
    }

    let client = KimaiClient::new(&config.kimai)?;
    let notifier = notify::from_config(&config)?;

    let check = Check {
        thresholds: &config.thresholds,
        policy: config.notify.policy,
        source: &client,
        store: &store,
        notifier: notifier.as_ref(),
    };
    let report = check.run(&ReportingPeriod::current())?;

    tracing::info!(
        month = %report.month,
        hours = report.hours,
        surpassed = ?report.surpassed,
        notified = report.notified,
        remaining = ?report.remaining,
        "Check complete"
    );
    Ok(())
}
