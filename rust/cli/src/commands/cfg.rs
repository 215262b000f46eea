//! Configuration command handler.
//!
//! Prints the resolved configuration as pretty JSON, one `{value, source}`
//! object per setting.

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "mode": {
            "value": config.mode,
            "source": sources.mode,
        },
        "level": {
            "value": config.level,
            "source": sources.level,
        },
        "level_seconds": {
            "value": config.level_seconds,
            "source": sources.level_seconds,
        },
        "scoring": {
            "value": config.scoring,
            "source": sources.scoring,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
