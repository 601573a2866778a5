//! Build script for elfpanel-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use elfpanel_core::config::{parse_config, PanelConfig};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml configuration at compile time
///
/// The file is deserialized into the same `PanelConfig` the firmware
/// uses, so unknown keys and wrong value types fail the build. The
/// firmware's own line parser must then produce the identical config.
fn validate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a panel.toml configuration file.          ║\n\
            ║  Please create one in the elfpanel-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: PanelConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid panel.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = check_ranges(&config);
    if !errors.is_empty() {
        report("Invalid panel configuration", &errors);
    }

    match parse_config(&config_content) {
        Ok(parsed) if parsed == config => {}
        Ok(_) => report(
            "panel.toml reads differently in the firmware parser",
            &["Use plain `key = value` lines with integers and booleans".to_string()],
        ),
        Err(e) => report(
            "panel.toml rejected by the firmware parser",
            &[format!("{:?}", e)],
        ),
    }

    println!("cargo:warning=panel.toml validated successfully");
}

/// Value checks the types alone cannot express
fn check_ranges(config: &PanelConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.timing.pulse_hold_us == 0 {
        errors.push("[timing] pulse_hold_us must be at least 1".to_string());
    }
    if config.timing.poll_timeout_ms == 0 || config.timing.poll_timeout_ms > 1000 {
        errors.push("[timing] poll_timeout_ms must be 1-1000".to_string());
    }
    // IS31FL3730 answers at 0x60..=0x63, three chips in a row
    if !(0x60..=0x61).contains(&config.display.base_address) {
        errors.push("[display] base_address must be 0x60 or 0x61".to_string());
    }

    errors
}

fn report(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
