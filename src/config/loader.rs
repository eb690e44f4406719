//! Structured config source loading

use super::error::SourceError;
use figment::providers::{Format as _, Toml, Yaml};
use figment::Figment;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Structured formats a config source can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    /// Pick the format from a file extension (`.yaml`, `.yml`, `.toml`).
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            other => Err(SourceError::UnsupportedExtension {
                ext: other.to_string(),
                path: path.to_path_buf(),
            }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Format::Yaml => "YAML",
            Format::Toml => "TOML",
        }
    }
}

/// Parse `content` into a figment, failing early on invalid syntax.
pub fn parse_source(content: &str, format: Format) -> Result<Figment, SourceError> {
    let figment = match format {
        Format::Yaml => Figment::from(Yaml::string(content)),
        Format::Toml => Figment::from(Toml::string(content)),
    };

    // Providers are lazy; extracting once surfaces syntax errors here instead
    // of silently during lookups.
    figment
        .extract::<serde_json::Value>()
        .map_err(|e| SourceError::Invalid { format: format.name(), source: Box::new(e) })?;

    Ok(figment)
}

pub fn read_source<R: Read>(mut reader: R, format: Format) -> Result<Figment, SourceError> {
    let mut content = String::new();
    reader.read_to_string(&mut content).map_err(SourceError::Stream)?;
    parse_source(&content, format)
}

pub fn load_source_file(path: &Path) -> Result<Figment, SourceError> {
    let format = Format::from_path(path)?;
    let content = fs::read_to_string(path)
        .map_err(|source| SourceError::Read { path: path.to_path_buf(), source })?;
    parse_source(&content, format)
}

/// Load an explicit config file, or discover one of `candidates` under `root`.
///
/// An explicit path must load cleanly. A discovered file that fails to load is
/// skipped with a warning and `Ok(None)` is returned.
pub fn load_config(
    root: &Path,
    config_path: Option<&Path>,
    candidates: &[&str],
) -> Result<Option<(Figment, PathBuf)>, SourceError> {
    if let Some(path) = config_path {
        return load_source_file(path).map(|figment| Some((figment, path.to_path_buf())));
    }

    let Some(discovered) = discover_config(root, candidates) else {
        return Ok(None);
    };

    match load_source_file(&discovered) {
        Ok(figment) => {
            tracing::debug!("Loaded discovered config {}", discovered.display());
            Ok(Some((figment, discovered)))
        }
        Err(e) => {
            tracing::warn!("Failed to load auto-discovered config {}: {}", discovered.display(), e);
            Ok(None)
        }
    }
}

fn discover_config(root: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates.iter().map(|candidate| root.join(candidate)).find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("app.yaml")).expect("yaml"), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("app.YML")).expect("yml"), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("app.toml")).expect("toml"), Format::Toml);
        assert!(matches!(
            Format::from_path(Path::new("app.ini")),
            Err(SourceError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn test_parse_source_nested_lookup() {
        let figment = parse_source("deep:\n  nested:\n    str: value\n", Format::Yaml).expect("yaml");
        let value: String = figment.extract_inner("deep.nested.str").expect("nested key");
        assert_eq!(value, "value");
    }

    #[test]
    fn test_parse_source_rejects_invalid_toml() {
        let result = parse_source("number = = 3\n", Format::Toml);
        assert!(matches!(result, Err(SourceError::Invalid { format: "TOML", .. })));
    }

    #[test]
    fn test_load_config_none_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let loaded = load_config(tmp.path(), None, &["app.yaml"]).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_config_discovers_candidate() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".app.toml"), "number = 7\n").expect("write");

        let (figment, path) = load_config(tmp.path(), None, &["app.yaml", ".app.toml"])
            .expect("load")
            .expect("discovered");
        assert!(path.ends_with(".app.toml"));
        let number: i64 = figment.extract_inner("number").expect("number");
        assert_eq!(number, 7);
    }

    #[test]
    fn test_explicit_invalid_config_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.yaml");
        fs::write(&path, "key: [unclosed\n").expect("write");

        assert!(load_config(tmp.path(), Some(&path), &[]).is_err());
    }

    #[test]
    fn test_discovered_invalid_config_is_skipped() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("app.yaml"), "key: [unclosed\n").expect("write");

        let loaded = load_config(tmp.path(), None, &["app.yaml"]).expect("soft fail");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_read_source_from_reader() {
        let figment = read_source("str-reader: from_reader\n".as_bytes(), Format::Yaml).expect("read");
        let value: String = figment.extract_inner("str-reader").expect("key");
        assert_eq!(value, "from_reader");
    }
}
