//! Explicit binding context: env prefix, environment snapshot and structured source

use super::error::SourceError;
use super::loader::{self, Format};
use figment::Figment;
use serde_json::Value;
use std::collections::HashMap;
use std::env::VarError;
use std::io::Read;
use std::path::Path;

const ENV_DELIMITER: char = '_';

#[derive(Debug, Clone)]
enum EnvSource {
    Process,
    Fixed(HashMap<String, String>),
}

/// Everything a binder reads from besides the command line.
///
/// Built by the caller and passed to the binder. Unless fixed variables are
/// supplied, environment lookups read the live process environment.
#[derive(Debug, Clone)]
pub struct ConfigContext {
    env_prefix: String,
    env: EnvSource,
    source: Option<Figment>,
}

impl ConfigContext {
    /// Context reading the process environment with `env_prefix`.
    pub fn new(env_prefix: impl Into<String>) -> Self {
        Self { env_prefix: env_prefix.into(), env: EnvSource::Process, source: None }
    }

    /// Replace the process environment with a fixed set of variables.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = EnvSource::Fixed(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    pub fn with_source(mut self, source: Figment) -> Self {
        self.source = Some(source);
        self
    }

    pub fn read_config<R: Read>(&mut self, reader: R, format: Format) -> Result<(), SourceError> {
        self.source = Some(loader::read_source(reader, format)?);
        Ok(())
    }

    pub fn read_config_file(&mut self, path: &Path) -> Result<(), SourceError> {
        self.source = Some(loader::load_source_file(path)?);
        Ok(())
    }

    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Environment variable name for a binding, e.g. `store.db-url` with
    /// prefix `APP` becomes `APP_STORE_DB_URL`.
    pub fn env_key(&self, name: &str) -> String {
        let key: String = name
            .chars()
            .map(|c| match c {
                '.' | '-' => ENV_DELIMITER,
                other => other.to_ascii_uppercase(),
            })
            .collect();

        if self.env_prefix.is_empty() {
            key
        } else {
            format!("{}{}{}", self.env_prefix.to_ascii_uppercase(), ENV_DELIMITER, key)
        }
    }

    /// Value of the environment variable for `name`, if set.
    pub fn lookup_env(&self, name: &str) -> Option<String> {
        let key = self.env_key(name);
        match &self.env {
            EnvSource::Process => env_value(&key, std::env::var(&key)),
            EnvSource::Fixed(vars) => vars.get(&key).cloned(),
        }
    }

    /// Value stored under the dotted `name` in the structured source, if any.
    pub fn lookup_source(&self, name: &str) -> Option<Value> {
        self.source.as_ref()?.extract_inner::<Value>(name).ok()
    }
}

/// Present UTF-8 value, or `None` with a warning when the value is not UTF-8.
fn env_value(key: &str, value: Result<String, VarError>) -> Option<String> {
    match value {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => {
            tracing::warn!("Ignoring non-UTF-8 value in {}: {:?}", key, raw);
            None
        }
    }
}
