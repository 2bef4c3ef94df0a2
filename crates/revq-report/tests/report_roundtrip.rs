//! Property tests for the report round-trip contract.
//!
//! Saving and reloading a report must preserve the flattened issue ordering,
//! the sequential id assignment, and every field value.

use camino::Utf8PathBuf;
use indexmap::IndexMap;
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use serde_json::json;

use revq_report::Report;

fn arb_affected() -> impl Strategy<Value = serde_json::Value> {
    (1u32..500, 0u32..100, any::<bool>(), "[ -~]{0,30}", "[ -~]{0,30}").prop_map(
        |(start, extra, with_file, proposal, code)| {
            let mut value = json!({
                "start_line": start,
                "end_line": start + extra,
                "proposal": proposal,
                "affected_code": code,
            });
            if with_file {
                value["file"] = json!("other/place.py");
            }
            value
        },
    )
}

fn arb_issue() -> impl Strategy<Value = serde_json::Value> {
    (
        "[ -~]{1,30}",
        "[ -~]{0,60}",
        btree_set("[a-z]{1,8}", 0..4),
        1u8..=5,
        1u8..=5,
        vec(arb_affected(), 0..3),
    )
        .prop_map(|(title, details, tags, severity, confidence, lines)| {
            json!({
                "title": title,
                "details": details,
                "tags": tags,
                "severity": severity,
                "confidence": confidence,
                "affected_lines": lines,
            })
        })
}

proptest! {
    #[test]
    fn round_trip_preserves_ids_ordering_and_fields(
        files in vec(("[a-z]{1,10}\\.[a-z]{1,4}", vec(arb_issue(), 0..4)), 0..5),
        summary in "[ -~]{0,80}",
        processed in 0u32..1000,
    ) {
        let mut raw = IndexMap::new();
        for (file, issues) in files {
            raw.insert(file, issues);
        }
        let expected_total: usize = raw.values().map(Vec::len).sum();

        let mut report = Report::from_raw(raw).unwrap();
        report.summary = summary;
        report.number_of_processed_files = processed;

        prop_assert_eq!(report.total_issues(), expected_total);
        prop_assert_eq!(report.plain_issues().len(), expected_total);
        let ids: Vec<u32> = report.plain_issues().iter().map(|i| i.id).collect();
        prop_assert_eq!(ids, (1..=expected_total as u32).collect::<Vec<_>>());
        for issue in report.plain_issues() {
            for line in &issue.affected_lines {
                prop_assert!(!line.file.is_empty());
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("report.json")).unwrap();
        report.save(&path).unwrap();
        let loaded = Report::load(&path).unwrap();

        prop_assert_eq!(&loaded, &report);
    }
}
