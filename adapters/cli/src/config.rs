//! Tuning file loading.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use lawn_defence_core::Tuning;

/// Loads the tuning at `path`, falling back to the defaults when no path is given.
pub(crate) fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    parse_tuning(&text).with_context(|| format!("invalid tuning file {}", path.display()))
}

fn parse_tuning(text: &str) -> Result<Tuning> {
    let tuning: Tuning = toml::from_str(text).context("failed to parse TOML")?;
    tuning.validate()?;
    Ok(tuning)
}

/// Renders the tuning as TOML, for `--print-config`.
pub(crate) fn render_tuning(tuning: &Tuning) -> Result<String> {
    toml::to_string_pretty(tuning).context("failed to serialize tuning")
}
