//! Collect report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::spec::{RecordCopiedFile, SpecCollectError};

/// Aggregate counters and diagnostics for one `collect_flat` run.
#[derive(Debug, Default, Clone)]
pub struct ReportCollect {
    /// Files seen in visited directories.
    pub cnt_scanned: u64,
    /// Files whose name ends with the extension marker.
    pub cnt_matched: u64,
    /// Files copied into the destination.
    pub cnt_copied: u64,
    /// Copies that needed a numeric suffix.
    pub cnt_renamed: u64,
    /// Ignored directories not descended into.
    pub cnt_pruned: u64,
    /// Non-fatal warnings collected during traversal.
    pub warnings: Vec<String>,
    /// Per-file failures (only under the `Continue` failure policy).
    pub errors: Vec<SpecCollectError>,
    /// Copied files in copy order, when records were requested.
    pub records: Vec<RecordCopiedFile>,
}

impl ReportCollect {
    /// Number of collected per-file errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_matched".to_string(), self.cnt_matched);
        dict_counts.insert("cnt_copied".to_string(), self.cnt_copied);
        dict_counts.insert("cnt_renamed".to_string(), self.cnt_renamed);
        dict_counts.insert("cnt_pruned".to_string(), self.cnt_pruned);
        dict_counts.insert("cnt_errors".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} scanned={} matched={} copied={} renamed={} pruned={} errors={} warnings={}",
            dict_counts["cnt_scanned"],
            dict_counts["cnt_matched"],
            dict_counts["cnt_copied"],
            dict_counts["cnt_renamed"],
            dict_counts["cnt_pruned"],
            dict_counts["cnt_errors"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportCollect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COLLECT]"))
    }
}

/// Mutable accumulator for collect statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportCollectBuilder {
    cnt_scanned: u64,
    cnt_matched: u64,
    cnt_copied: u64,
    cnt_renamed: u64,
    cnt_pruned: u64,
    warnings: Vec<String>,
    errors: Vec<SpecCollectError>,
    records: Vec<RecordCopiedFile>,
}

impl ReportCollectBuilder {
    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    pub fn add_matched(&mut self) {
        self.cnt_matched += 1;
    }

    pub fn add_pruned(&mut self) {
        self.cnt_pruned += 1;
    }

    /// Count one successful copy; the record is kept only when `if_keep_record`.
    pub fn add_copied(&mut self, record: RecordCopiedFile, if_keep_record: bool) {
        self.cnt_copied += 1;
        if record.is_renamed() {
            self.cnt_renamed += 1;
        }
        if if_keep_record {
            self.records.push(record);
        }
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Add one path-scoped error.
    pub fn add_error(&mut self, path: PathBuf, exception: String) {
        self.errors.push(SpecCollectError { path, exception });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCollect {
        ReportCollect {
            cnt_scanned: self.cnt_scanned,
            cnt_matched: self.cnt_matched,
            cnt_copied: self.cnt_copied,
            cnt_renamed: self.cnt_renamed,
            cnt_pruned: self.cnt_pruned,
            warnings: self.warnings,
            errors: self.errors,
            records: self.records,
        }
    }
}
