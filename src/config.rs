//! CLI settings: flag -> environment -> `brainfucked.toml` -> defaults.

use std::collections::HashMap;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use cross_xdg::BaseDirs;

pub const CONFIG_FILE_NAME: &str = "brainfucked.toml";
pub const COLOR_ENV: &str = "BRAINFUCKED_COLOR";
pub const CONTEXT_ENV: &str = "BRAINFUCKED_CONTEXT";

const DEFAULT_CONTEXT_WINDOW: usize = 32;

/// When to colour error reports on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => io::stderr().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!("invalid color mode: {other}, must be 'auto', 'always' or 'never'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub color: ColorMode,
    /// Characters of program shown on each side of a failing instruction.
    pub context_window: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}

impl Settings {
    /// Resolve settings, letting `color_flag` override everything else.
    pub fn load(color_flag: Option<ColorMode>) -> Self {
        let mut settings = load_from_toml().unwrap_or_default();
        settings.apply_env(|key| std::env::var(key).ok());
        if let Some(color) = color_flag {
            settings.color = color;
        }
        settings
    }

    /// Overlay values from a `[diagnostics]` section. Unknown keys and
    /// unparsable values are ignored.
    pub fn from_toml_str(content: &str) -> Self {
        let map = diagnostics_section(content);
        let mut settings = Self::default();
        if let Some(color) = map.get("color").and_then(|v| v.parse().ok()) {
            settings.color = color;
        }
        if let Some(window) = map.get("context_window").and_then(|v| v.parse().ok()) {
            settings.context_window = window;
        }
        settings
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(color) = lookup(COLOR_ENV).and_then(|v| v.parse().ok()) {
            self.color = color;
        }
        if let Some(window) = lookup(CONTEXT_ENV).and_then(|v| v.trim().parse().ok()) {
            self.context_window = window;
        }
    }
}

fn load_from_toml() -> Option<Settings> {
    let base_dirs = BaseDirs::new().ok()?;

    let mut path = PathBuf::from(base_dirs.config_home());
    path.push(CONFIG_FILE_NAME);

    let content = fs::read_to_string(&path).ok()?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Some(Settings::from_toml_str(&content))
}

/// Collect `key = value` pairs from the `[diagnostics]` table.
fn diagnostics_section(content: &str) -> HashMap<String, String> {
    let mut in_section = false;
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if line.starts_with('[') && line.ends_with(']') {
            in_section = line[1..line.len() - 1].trim() == "diagnostics";
            continue;
        }
        if !in_section { continue; }
        if let Some((key, raw)) = line.split_once('=') {
            let raw = raw.trim();
            let value = raw
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(raw);
            map.insert(key.trim().to_string(), value.to_string());
        }
    }
    map
}
