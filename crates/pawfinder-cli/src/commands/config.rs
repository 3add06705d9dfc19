use anyhow::{Result, bail};
use colored::Colorize;

use pawfinder_core::config::AppConfig;
use pawfinder_infrastructure::ConfigService;

/// Writes a default `config.toml`.
pub fn init(service: &ConfigService, force: bool) -> Result<()> {
    if service.path().exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            service.path().display()
        );
    }
    service.save(&AppConfig::default())?;
    println!(
        "{}",
        format!("Wrote {}", service.path().display()).bright_green()
    );
    Ok(())
}

/// Prints the effective configuration, environment overrides included.
pub fn show(service: &ConfigService) -> Result<()> {
    let config = service.load()?;
    println!("{}", format!("# {}", service.path().display()).bright_black());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
