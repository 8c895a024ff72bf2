//! The SvxLink daemon as seen from svxdesk: its config file and its service.

use crate::config::AppConfig;
use crate::runner;
use anyhow::Result;
use confpatch::ConfigDocument;

/// Control device path from the daemon configuration.
///
/// Falls back to the configured default when the file is missing or
/// unreadable, or the key is absent, commented or empty.
pub fn device_path(config: &AppConfig) -> String {
    let key = &config.device_key;
    let path = config.daemon_config_path();

    match ConfigDocument::read(&path) {
        Ok(document) => {
            confpatch::lookup_or(&document, &key.section, &key.key, &key.default_value)
                .to_string()
        }
        Err(e) => {
            log::warn!("{e}; using default device path {}", key.default_value);
            key.default_value.clone()
        }
    }
}

/// Run the configured restart command.
pub fn restart(config: &AppConfig) -> Result<()> {
    log::info!("Restarting daemon: {}", config.restart_command);
    let output = runner::run_line(&config.restart_command)?;
    if !output.is_empty() {
        log::debug!("Restart output: {output}");
    }
    Ok(())
}
