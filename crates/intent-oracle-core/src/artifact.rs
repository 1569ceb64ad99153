//! Embedding artifact loading.
//!
//! Two on-disk layouts are understood:
//!
//! - **JSON**: `{"words": ["ash", ...], "vectors": [[0.1, ...], ...]}`
//! - **Text**: one `word v1 v2 ... vD` entry per line, whitespace separated.
//!   Blank lines and lines starting with `#` are ignored.
//!
//! The table is validated after parsing, so ragged or empty artifacts are
//! rejected before any request is served.

use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::config::{ArtifactConfig, ArtifactFormat};
use crate::error::{OracleError, OracleResult};
use crate::table::{EmbeddingTable, RawTable};

/// Load the artifact described by `config`.
pub fn load_from_config(config: &ArtifactConfig) -> OracleResult<EmbeddingTable> {
    load_table(Path::new(&config.path), config.format)
}

/// Load and validate an embedding table from `path`.
pub fn load_table(path: &Path, format: ArtifactFormat) -> OracleResult<EmbeddingTable> {
    info!(path = %path.display(), "Loading embedding artifact");

    if !path.exists() {
        report_missing(path);
        return Err(OracleError::artifact(path, "artifact not found"));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| OracleError::artifact(path, format!("failed to read: {}", e)))?;

    let table = match resolve_format(path, format) {
        ArtifactFormat::Json => parse_json(&content),
        _ => parse_text(&content),
    }
    .map_err(|e| match e {
        OracleError::Artifact { .. } => e,
        other => OracleError::artifact(path, other.to_string()),
    })?;

    info!(
        path = %path.display(),
        words = table.len(),
        dimension = table.dimension(),
        "Embedding artifact loaded"
    );
    Ok(table)
}

fn resolve_format(path: &Path, format: ArtifactFormat) -> ArtifactFormat {
    match format {
        ArtifactFormat::Auto => {
            let is_json = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if is_json {
                ArtifactFormat::Json
            } else {
                ArtifactFormat::Text
            }
        }
        explicit => explicit,
    }
}

/// Log what is actually next to a missing artifact.
fn report_missing(path: &Path) {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    match fs::read_dir(parent) {
        Ok(entries) => {
            let mut names: Vec<String> = entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            error!(
                path = %path.display(),
                directory = %parent.display(),
                contents = ?names,
                "Embedding artifact not found"
            );
        }
        Err(e) => {
            error!(
                path = %path.display(),
                directory = %parent.display(),
                error = %e,
                "Embedding artifact not found and its directory is unreadable"
            );
        }
    }
}

/// Parse the JSON layout.
pub fn parse_json(content: &str) -> OracleResult<EmbeddingTable> {
    let raw: RawTable = serde_json::from_str(content)?;
    EmbeddingTable::from_raw(raw)
}

/// Parse the whitespace text layout.
pub fn parse_text(content: &str) -> OracleResult<EmbeddingTable> {
    let mut words = Vec::new();
    let mut vectors = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let Some(word) = fields.next() else {
            continue;
        };
        let vector = fields
            .map(|f| {
                f.parse::<f32>().map_err(|_| {
                    OracleError::SerializationError(format!(
                        "line {}: '{}' is not a number",
                        line_no + 1,
                        f
                    ))
                })
            })
            .collect::<OracleResult<Vec<f32>>>()?;

        words.push(word.to_string());
        vectors.push(vector);
    }

    EmbeddingTable::new(words, vectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_parse_text() {
        let table = parse_text(
            "# tiny vocabulary\n\
             ash 0.1 0.2 0.3\n\
             \n\
             brine -1 0 1e-3\n",
        )
        .unwrap();

        assert_eq!(table.words(), &["ash".to_string(), "brine".to_string()]);
        assert_eq!(table.dimension(), 3);
        assert!((table.vector(1).unwrap()[2] - 0.001).abs() < 1e-9);
    }

    #[test]
    fn test_parse_text_bad_number() {
        let err = parse_text("ash 0.1 zero\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_text_ragged() {
        let err = parse_text("a 1 2\nb 1\n").unwrap_err();
        assert!(matches!(err, OracleError::RaggedTable { row: 1, .. }));
    }

    #[test]
    fn test_parse_json() {
        let table =
            parse_json(r#"{"words": ["tide", "moon"], "vectors": [[1.0, 0.0], [0.0, 1.0]]}"#)
                .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.word(0), Some("tide"));
    }

    #[test]
    fn test_parse_json_length_mismatch() {
        let err = parse_json(r#"{"words": ["tide"], "vectors": []}"#).unwrap_err();
        assert!(matches!(err, OracleError::LengthMismatch { .. }));
    }

    #[test]
    fn test_load_auto_detects_format() {
        let dir = tempdir().unwrap();

        let json_path = dir.path().join("ocean.json");
        fs::write(&json_path, r#"{"words": ["a"], "vectors": [[0.5, 0.5]]}"#).unwrap();
        let table = load_table(&json_path, ArtifactFormat::Auto).unwrap();
        assert_eq!(table.dimension(), 2);

        let text_path = dir.path().join("ocean.txt");
        let mut f = fs::File::create(&text_path).unwrap();
        writeln!(f, "a 0.5 0.5 0.5").unwrap();
        let table = load_table(&text_path, ArtifactFormat::Auto).unwrap();
        assert_eq!(table.dimension(), 3);
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vectors.dat");
        fs::write(&path, r#"{"words": ["a"], "vectors": [[1.0]]}"#).unwrap();

        assert!(load_table(&path, ArtifactFormat::Json).is_ok());
        assert!(load_table(&path, ArtifactFormat::Text).is_err());
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("oracle_ocean.json");

        let err = load_table(&path, ArtifactFormat::Auto).unwrap_err();
        assert!(matches!(err, OracleError::Artifact { .. }));
        assert!(err.is_setup_error());
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_parse_errors_carry_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_table(&path, ArtifactFormat::Auto).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
