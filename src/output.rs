use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::OutputDocument;

/// Sibling path the document is staged at before the rename.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "output".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `doc` as 2-space pretty JSON, replacing whatever was at `path`.
///
/// The document is staged next to the target and renamed over it, so the
/// target always holds either the previous document or the new one.
pub fn write_document(path: &Path, doc: &OutputDocument) -> Result<()> {
    let mut json = serde_json::to_string_pretty(doc).context("Failed to serialize output document")?;
    json.push('\n');

    let staging = staging_path(path);
    fs::write(&staging, json)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    fs::rename(&staging, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

pub fn read_document(path: &Path) -> Result<OutputDocument> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Malformed document in {}", path.display()))
}

#[cfg(test)]
pub(crate) fn scratch_path(tag: &str) -> PathBuf {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    std::env::temp_dir().join(format!("goalie-edges-{}-{}-{}.json", tag, std::process::id(), nanos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BetType, BettingEdge, EdgeStrength};
    use chrono::{TimeZone, Utc};

    fn doc(edges: usize) -> OutputDocument {
        let edge = BettingEdge {
            game: "BOS @ MTL".into(),
            bet_type: BetType::Under,
            edge: EdgeStrength::Medium,
            reason: "Two elite goalies (avg 0.930 SV%), low-scoring game expected".into(),
            confidence: 7,
        };
        OutputDocument::new(
            Utc.with_ymd_and_hms(2025, 1, 14, 18, 30, 0).unwrap(),
            vec![],
            vec![edge; edges],
        )
    }

    #[test]
    fn test_top_level_keys_and_indent() {
        let path = scratch_path("keys");
        write_document(&path, &doc(1)).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"timestamp\": \"2025-01-14T18:30:00Z\""));
        assert!(text.contains("\n  \"games\": []"));
        assert!(text.contains("\n  \"bettingEdges\": ["));
        assert!(text.contains("\"betType\": \"UNDER\""));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_overwrites_previous_document() {
        let path = scratch_path("overwrite");
        fs::write(&path, "stale content that is much longer than nothing").unwrap();
        write_document(&path, &doc(2)).unwrap();
        write_document(&path, &doc(0)).unwrap();
        let back = read_document(&path).unwrap();
        assert!(back.betting_edges.is_empty());
        assert!(!staging_path(&path).exists());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_staging_path_is_sibling() {
        let p = Path::new("/srv/out/data.json");
        assert_eq!(staging_path(p), PathBuf::from("/srv/out/data.json.tmp"));
    }
}
