//! Saved command-line defaults.
//!
//! A defaults file holds flag tokens, one or more per line, `#` comments
//! allowed. The global file lives in the platform config dir and a
//! `.foliorc` in the working directory overrides it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub perf: bool,
    pub debug_log: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub page_height: Option<u32>,
    pub page_width: Option<u32>,
}

impl ConfigFlags {
    /// Merge two flag sets; `other` wins where both carry a value.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            perf: self.perf || other.perf,
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
            data_dir: other.data_dir.clone().or_else(|| self.data_dir.clone()),
            page_height: other.page_height.or(self.page_height),
            page_width: other.page_width.or(self.page_width),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("folio").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("folio")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("folio").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("folio").join("config");
        }
    }

    PathBuf::from(".foliorc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".foliorc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# folio defaults (saved with --save-defaults)".to_string()];
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(dir) = &flags.data_dir {
        lines.push(format!("--data-dir {}", dir.display()));
    }
    if let Some(px) = flags.page_height {
        lines.push(format!("--page-height {px}"));
    }
    if let Some(px) = flags.page_width {
        lines.push(format!("--page-width {px}"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pull the persistable flags out of raw arguments. Unknown tokens and
/// unparsable values are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        if name == "--perf" {
            flags.perf = true;
            i += 1;
            continue;
        }
        if !matches!(
            name,
            "--debug-log" | "--data-dir" | "--page-height" | "--page-width"
        ) {
            i += 1;
            continue;
        }
        let value = match inline_value {
            Some(value) => Some(value),
            None => {
                i += 1;
                tokens.get(i).map(String::as_str)
            }
        };
        if let Some(value) = value {
            match name {
                "--debug-log" => flags.debug_log = Some(PathBuf::from(value)),
                "--data-dir" => flags.data_dir = Some(PathBuf::from(value)),
                "--page-height" => flags.page_height = parse_px(value),
                _ => flags.page_width = parse_px(value),
            }
        }
        i += 1;
    }
    flags
}

fn parse_px(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|px| *px > 0)
}
