use std::path::Path;

use reqwest::Url;
use taskdeck::config::AppConfig;
use taskdeck::{Error, Result};

use crate::cli::ConfigSetArgs;

pub fn show(config: &AppConfig, path: &Path) {
    println!("Config file:    {}", path.display());
    println!("API base URL:   {}", config.api_base_url);
    println!("Production:     {}", config.production);
    println!("Debug logging:  {}", config.debug_logging);
    println!("Data directory: {}", config.data_directory.display());
}

/// Apply the given settings on top of `config`.
fn apply(config: &mut AppConfig, args: ConfigSetArgs) -> Result<()> {
    if let Some(url) = args.base_url {
        let url = url.trim().to_string();
        Url::parse(&url).map_err(|e| Error::Config(format!("base URL {url:?}: {e}")))?;
        config.api_base_url = url;
    }
    if let Some(production) = args.production {
        config.production = production;
    }
    if let Some(debug) = args.debug_logging {
        config.debug_logging = debug;
    }
    Ok(())
}

/// Update the config file itself. Environment overrides are not written back.
pub fn set(path: &Path, args: ConfigSetArgs) -> Result<()> {
    let mut config = AppConfig::from_file(path);
    apply(&mut config, args)?;
    config.save(path)?;
    log::info!("Saved config to {}", path.display());
    println!("Saved {}", path.display());
    Ok(())
}
