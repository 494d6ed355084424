//! Format change sets and cycle reports for terminal or JSON output.

use crate::diff::{ChangeEvent, ChangeSet};
use crate::monitor::CycleReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;

/// JSON shape for `check --format json`
#[derive(Debug, Serialize)]
pub struct ChangeSummary {
    pub new: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
    pub files: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_saved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts_failed: Option<usize>,
    pub dry_run: bool,
}

impl ChangeSummary {
    pub fn from_changes(changes: &ChangeSet, files: usize, dry_run: bool) -> Self {
        let paths = |list: &[ChangeEvent]| -> Vec<String> {
            list.iter().map(|e| e.path().to_string()).collect()
        };
        Self {
            new: paths(&changes.new),
            modified: paths(&changes.modified),
            deleted: paths(&changes.deleted),
            files,
            baseline_saved: None,
            alerts_failed: None,
            dry_run,
        }
    }

    pub fn from_report(report: &CycleReport) -> Self {
        let mut summary = Self::from_changes(&report.changes, report.files, false);
        summary.baseline_saved = Some(report.baseline_saved);
        summary.alerts_failed = Some(report.alerts_failed);
        summary
    }
}

/// Render a change set as a table followed by a one-line total
pub fn format_changes_text(changes: &ChangeSet, footer: &str) -> String {
    let mut out = String::new();
    if changes.is_empty() {
        out.push_str("No changes detected.\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Change", "Path", "Digest"]);
        for event in changes.events() {
            let digest = match event {
                ChangeEvent::New { digest, .. } => short_hex(digest),
                ChangeEvent::Modified { old, new, .. } => {
                    format!("{} -> {}", short_hex(old), short_hex(new))
                }
                ChangeEvent::Deleted { last, .. } => short_hex(last),
            };
            table.add_row(vec![event.kind().to_string(), event.path().to_string(), digest]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out.push_str(&format!(
        "{} new, {} modified, {} deleted. {}",
        changes.new.len(),
        changes.modified.len(),
        changes.deleted.len(),
        footer
    ));
    out
}

fn short_hex(digest: &[u8]) -> String {
    hex::encode(&digest[..digest.len().min(6)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::classify;
    use crate::snapshot::Snapshot;

    fn changes() -> ChangeSet {
        let mut baseline = Snapshot::new();
        baseline.insert("/w/a", [1; 32]);
        baseline.insert("/w/b", [2; 32]);
        let mut current = Snapshot::new();
        current.insert("/w/a", [3; 32]);
        current.insert("/w/c", [4; 32]);
        classify(&baseline, &current)
    }

    #[test]
    fn test_text_lists_each_change() {
        let text = format_changes_text(&changes(), "Baseline updated.");
        assert!(text.contains("/w/a"));
        assert!(text.contains("/w/b"));
        assert!(text.contains("/w/c"));
        assert!(text.contains("010101010101 -> 030303030303"));
        assert!(text.ends_with("1 new, 1 modified, 1 deleted. Baseline updated."));
    }

    #[test]
    fn test_text_for_no_changes() {
        let text = format_changes_text(&ChangeSet::default(), "");
        assert!(text.starts_with("No changes detected."));
    }

    #[test]
    fn test_json_summary_shape() {
        let summary = ChangeSummary::from_changes(&changes(), 2, true);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["new"], serde_json::json!(["/w/c"]));
        assert_eq!(value["modified"], serde_json::json!(["/w/a"]));
        assert_eq!(value["deleted"], serde_json::json!(["/w/b"]));
        assert_eq!(value["dry_run"], serde_json::json!(true));
        assert!(value.get("baseline_saved").is_none());
    }
}
