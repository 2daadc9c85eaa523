// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key/value settings sources.
//!
//! Credentials are read from a `.env`-style file (falling back to the
//! process environment). The only value ever written back is the athlete
//! id, once it has been resolved from the API.

use crate::config::ConfigError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default settings file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Readable and writable settings source.
pub trait SettingsStore: Send + Sync {
    /// Look up a value. Returns `None` if the key is not set anywhere.
    fn get(&self, key: &str) -> Option<String>;

    /// Persist a value so that later loads observe it.
    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError>;
}

/// Settings backed by a dotenv file.
///
/// Values in the file take precedence over the process environment.
/// Unquoted values expand `$VAR` references, so a secret containing `$`
/// must be single-quoted (`CLIENT_SECRET='ab$cd'`). Values written by
/// [`SettingsStore::set`] are always single-quoted.
#[derive(Debug, Clone)]
pub struct EnvFileStore {
    path: PathBuf,
}

impl EnvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a key from the file only. A missing or unreadable file yields `None`.
    fn read_file_value(&self, key: &str) -> Option<String> {
        let iter = dotenvy::from_path_iter(&self.path).ok()?;
        let mut found = None;
        for item in iter {
            match item {
                Ok((k, v)) if k == key => found = Some(v),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "Skipping unparsable settings line");
                }
            }
        }
        found
    }
}

impl Default for EnvFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}

impl SettingsStore for EnvFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_file_value(key)
            .or_else(|| std::env::var(key).ok())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let existing = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(ConfigError::Settings(e.to_string())),
        };

        let contents = upsert_line(&existing, key, value);
        fs::write(&self.path, contents).map_err(|e| ConfigError::Settings(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), key, "Settings file updated");
        Ok(())
    }
}

/// Replace the first `KEY=...` line (or append one), leaving every other line alone.
fn upsert_line(contents: &str, key: &str, value: &str) -> String {
    let new_line = format!("{}='{}'", key, value);
    let mut replaced = false;
    let mut lines: Vec<String> = Vec::new();

    for line in contents.lines() {
        if !replaced && line_key(line) == Some(key) {
            lines.push(new_line.clone());
            replaced = true;
        } else {
            lines.push(line.to_string());
        }
    }
    if !replaced {
        lines.push(new_line);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Key of an assignment line, tolerating an `export ` prefix.
fn line_key(line: &str) -> Option<&str> {
    let line = line.trim_start();
    if line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, _) = line.split_once('=')?;
    Some(key.trim())
}

/// In-memory settings, for tests and for embedding without a settings file.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given pairs.
    pub fn with_values<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| ConfigError::Settings("settings lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
