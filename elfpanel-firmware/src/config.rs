//! Configuration loading
//!
//! The panel configuration is `panel.toml`, embedded at compile time and
//! parsed at start-up by the core's no_std parser. The build script has
//! already rejected a file this parser cannot read, so the fallback is
//! for development builds only.

use defmt::*;

use elfpanel_core::config::{parse_config, PanelConfig};

/// Embedded configuration (compiled into firmware)
/// Edit panel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../panel.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_config() -> PanelConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            warn!("Failed to parse embedded config: {}", e);
            warn!("Using default configuration");
            PanelConfig::default()
        }
    }
}
