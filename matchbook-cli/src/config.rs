use anyhow::{Context, Result};
use matchbook_core::MatchPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::render::StatusFilter;
use crate::state::{ensure_matchbook_home, matchbook_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub matching: MatchPolicy,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySection {
    /// Default table filter when --filter is not given
    pub filter: StatusFilter,
    /// Max table rows; unset prints everything
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(matchbook_home()?.join("config.toml"))
}

/// Load the config at `path`, or the default location. A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;
    cfg.matching.validate()?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => ensure_matchbook_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_file_is_default() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.matching.amount_tolerance, dec!(0.01));
        assert_eq!(cfg.matching.date_tolerance_days, 0);
        assert_eq!(cfg.display.filter, StatusFilter::All);
    }

    #[test]
    fn test_partial_sections() {
        let cfg = parse_config(
            r#"
[matching]
date_tolerance_days = 3

[display]
filter = "mismatch"
limit = 20
"#,
        )
        .unwrap();
        assert_eq!(cfg.matching.date_tolerance_days, 3);
        assert_eq!(cfg.matching.amount_tolerance, dec!(0.01));
        assert_eq!(cfg.display.filter, StatusFilter::Mismatch);
        assert_eq!(cfg.display.limit, Some(20));
    }

    #[test]
    fn test_negative_window_rejected() {
        let err = parse_config("[matching]\ndate_tolerance_days = -1\n").unwrap_err();
        assert!(err.to_string().contains("date_tolerance_days"));
    }

    #[test]
    fn test_round_trips_through_file() {
        let dir = std::env::temp_dir().join(format!("matchbook-cfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join("config.toml");

        let mut cfg = Config::default();
        cfg.display.limit = Some(5);
        save_config(&cfg, &p).unwrap();
        assert_eq!(load_config(Some(&p)).unwrap(), cfg);

        assert_eq!(load_config(Some(&dir.join("missing.toml"))).unwrap(), Config::default());
    }
}
