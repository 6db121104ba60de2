// src/config/input.rs
//! Run input: what to scrape and where. Loaded once at start, then resolved
//! into an immutable [`RunConfig`].

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::TrendsError;

pub const ENV_INPUT_PATH: &str = "TRENDS_INPUT_PATH";
pub const ENV_STORAGE_DIR: &str = "TRENDS_STORAGE_DIR";
pub const DEFAULT_STORAGE_DIR: &str = "storage";

const ENV_MODE: &str = "TRENDS_MODE";
const ENV_GEO: &str = "TRENDS_GEO";
const ENV_HL: &str = "TRENDS_HL";
const ENV_TZ: &str = "TRENDS_TZ";

fn default_mode() -> String {
    "realtime".to_string()
}
fn default_geo() -> String {
    "TR".to_string()
}
fn default_hl() -> String {
    "tr".to_string()
}
fn default_tz() -> i32 {
    180
}
fn default_category() -> String {
    "all".to_string()
}
fn default_records_per_interval() -> u32 {
    300
}
fn default_recent_seconds() -> u32 {
    20
}
fn default_include_raw() -> bool {
    true
}

/// Raw input as it appears in `INPUT.json` / `config/input.toml`.
/// Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunInput {
    /// "realtime" | "daily"
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_geo")]
    pub geo: String,
    #[serde(default = "default_hl")]
    pub hl: String,
    /// Timezone offset in minutes (TR, +03:00 => 180).
    #[serde(default = "default_tz")]
    pub tz: i32,
    // Realtime only
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_records_per_interval")]
    pub records_per_interval: u32,
    #[serde(default = "default_recent_seconds")]
    pub recent_seconds: u32,
    /// Keep the upstream fragment on every record under `_raw`.
    #[serde(default = "default_include_raw")]
    pub include_raw: bool,
}

impl Default for RunInput {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            geo: default_geo(),
            hl: default_hl(),
            tz: default_tz(),
            category: default_category(),
            records_per_interval: default_records_per_interval(),
            recent_seconds: default_recent_seconds(),
            include_raw: default_include_raw(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Realtime,
    Daily,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Realtime => "realtime",
            Mode::Daily => "daily",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TrendsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "realtime" => Ok(Mode::Realtime),
            "daily" => Ok(Mode::Daily),
            other => Err(TrendsError::Configuration(format!(
                "invalid mode: {other}. Use \"realtime\" or \"daily\""
            ))),
        }
    }
}

/// Resolved configuration; immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub mode: Mode,
    pub geo: String,
    pub hl: String,
    pub tz: i32,
    pub category: String,
    pub records_per_interval: u32,
    pub recent_seconds: u32,
    pub include_raw: bool,
}

impl TryFrom<RunInput> for RunConfig {
    type Error = TrendsError;

    fn try_from(input: RunInput) -> Result<Self, Self::Error> {
        let mode = input.mode.parse::<Mode>()?;
        Ok(Self {
            mode,
            geo: input.geo,
            hl: input.hl,
            tz: input.tz,
            category: input.category,
            records_per_interval: input.records_per_interval,
            recent_seconds: input.recent_seconds,
            include_raw: input.include_raw,
        })
    }
}

/// Root directory for datasets and key-value stores.
pub fn storage_dir() -> PathBuf {
    std::env::var(ENV_STORAGE_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_DIR))
}

/// Load input from an explicit path. Supports JSON or TOML.
pub fn load_input_from(path: &Path) -> Result<RunInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading run input from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_input(&content, ext.as_str())
        .with_context(|| format!("parsing run input from {}", path.display()))
}

/// Load input using env var + fallbacks, then apply env overrides:
/// 1) $TRENDS_INPUT_PATH
/// 2) <storage>/key_value_stores/default/INPUT.json
/// 3) config/input.toml
/// 4) config/input.json
/// 5) defaults
pub fn load_input_default() -> Result<RunInput> {
    let mut input = load_input_file()?;
    apply_env_overrides(&mut input)?;
    Ok(input)
}

fn load_input_file() -> Result<RunInput> {
    if let Ok(p) = std::env::var(ENV_INPUT_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_input_from(&pb);
        } else {
            return Err(anyhow!("TRENDS_INPUT_PATH points to non-existent path"));
        }
    }
    let candidates = [
        storage_dir()
            .join("key_value_stores")
            .join("default")
            .join("INPUT.json"),
        PathBuf::from("config/input.toml"),
        PathBuf::from("config/input.json"),
    ];
    for p in candidates {
        if p.exists() {
            return load_input_from(&p);
        }
    }
    Ok(RunInput::default())
}

fn apply_env_overrides(input: &mut RunInput) -> Result<()> {
    if let Ok(v) = std::env::var(ENV_MODE) {
        input.mode = v.trim().to_string();
    }
    if let Ok(v) = std::env::var(ENV_GEO) {
        input.geo = v.trim().to_string();
    }
    if let Ok(v) = std::env::var(ENV_HL) {
        input.hl = v.trim().to_string();
    }
    if let Ok(v) = std::env::var(ENV_TZ) {
        input.tz = v
            .trim()
            .parse()
            .with_context(|| format!("{ENV_TZ} must be an integer, got {v:?}"))?;
    }
    Ok(())
}

fn parse_input(s: &str, hint_ext: &str) -> Result<RunInput> {
    if hint_ext == "toml" {
        return Ok(toml::from_str(s)?);
    }
    // Empty INPUT.json is treated as "no input".
    if s.trim().is_empty() {
        return Ok(RunInput::default());
    }
    match serde_json::from_str(s) {
        Ok(v) => Ok(v),
        Err(json_err) => toml::from_str(s)
            .map_err(|_| anyhow!(json_err).context("unsupported run input format")),
    }
}
