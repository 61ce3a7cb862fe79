use availgrid_tools::{
    compile_prompt, describe_grid, dry_run_submit, format_selection, parse_selection, SourceSpec,
    SubmitRequest, ToolErrorKind,
};
use std::io::Write;

// 2025-01-06 09:00 UTC, a Monday.
const MON_9: i64 = 1_736_154_000;
const ZONE: Option<&str> = Some("UTC");

fn write_dump(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp dump");
    file.write_all(json.as_bytes()).expect("write temp dump");
    file
}

fn sample_dump() -> String {
    serde_json::json!([
        { "timestamp": MON_9 + 900, "day": 0, "row": 1, "label": "9:15 AM" },
        { "timestamp": MON_9, "day": 0, "row": 0, "label": "9:00 AM" },
        { "timestamp": MON_9 + 3 * 3600, "day": 0, "row": 12, "label": "12:00 PM" },
        { "timestamp": MON_9 + 86_400, "day": 1, "row": 0, "label": "9:00 AM" }
    ])
    .to_string()
}

#[test]
fn end_to_end_describe_prompt_select_format() {
    let dump = write_dump(&sample_dump());
    let source = SourceSpec::File {
        path: dump.path().to_string_lossy().into_owned(),
    };

    let days = describe_grid(&source, ZONE).into_result().expect("describe");
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].blocks.len(), 2);

    let prompt = compile_prompt(&days, ZONE).into_result().expect("prompt");
    assert!(prompt.menu.contains("January 6, 2025 (Monday)"));
    assert!(prompt.menu.contains("[d0t0] 9:00 AM (1736154000)"));

    let selection = parse_selection("afternoon0 d1t0 d0t0", &days, &prompt.lookup, ZONE)
        .into_result()
        .expect("select");
    assert_eq!(
        selection.timestamps,
        vec![MON_9 + 3 * 3600, MON_9 + 86_400, MON_9]
    );

    let lines = format_selection(&selection, &days, ZONE)
        .into_result()
        .expect("format");
    assert_eq!(
        lines,
        vec![
            "Monday, January 6: 12:00 PM, 9:00 AM".to_string(),
            "Tuesday, January 7: 9:00 AM".to_string(),
        ]
    );
    assert_eq!(lines, selection.readable);
}

#[test]
fn malformed_dump_is_invalid_input() {
    let dump = write_dump(r#"[{"day": 0, "label": "9:00 AM"}]"#);
    let response = describe_grid(
        &SourceSpec::File {
            path: dump.path().to_string_lossy().into_owned(),
        },
        ZONE,
    );
    assert!(!response.ok);
    assert!(response.data.is_none());
    assert_eq!(
        response.error.expect("error").kind,
        ToolErrorKind::InvalidInput
    );
}

#[test]
fn inconsistent_grid_is_invalid_grid() {
    let dump = write_dump(r#"[{"timestamp": 100, "day": 0}]"#);
    let response = describe_grid(
        &SourceSpec::File {
            path: dump.path().to_string_lossy().into_owned(),
        },
        ZONE,
    );
    let error = response.error.expect("error");
    assert_eq!(error.kind, ToolErrorKind::InvalidGrid);
    assert!(error.message.contains("900"));
}

#[test]
fn inline_source_and_json_envelope_shape() {
    let source: SourceSpec = serde_json::from_value(serde_json::json!({
        "kind": "inline",
        "cells": [{ "timestamp": MON_9, "day": 2 }]
    }))
    .expect("decode source spec");

    let response = describe_grid(&source, ZONE);
    let json = serde_json::to_value(&response).expect("encode envelope");
    assert_eq!(json["ok"], true);
    assert_eq!(json["data"][0]["day_index"], 2);
    assert_eq!(json["data"][0]["slots"][0]["id"], "d2t0");
    assert_eq!(json["data"][0]["slots"][0]["label"], "9:00 AM");
    assert!(json.get("error").is_none());
}

#[test]
fn extreme_aligned_timestamps_describe_without_panicking() {
    let source: SourceSpec = serde_json::from_value(serde_json::json!({
        "kind": "inline",
        "cells": [
            { "timestamp": -9_223_372_036_854_774_900_i64, "day": 0 },
            { "timestamp": 9_223_372_036_854_774_900_i64, "day": 0 }
        ]
    }))
    .expect("decode source spec");

    let days = describe_grid(&source, ZONE).into_result().expect("describe");
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].slots.len(), 2);
    assert_eq!(days[0].blocks.len(), 2);
}

#[test]
fn unknown_zone_is_reported_not_raised() {
    let response = compile_prompt(&[], Some("Atlantis/Central"));
    assert!(!response.ok);
    assert_eq!(
        response.error.expect("error").kind,
        ToolErrorKind::InvalidInput
    );
}

#[test]
fn dry_run_submit_reports_each_timestamp() {
    let source: SourceSpec = serde_json::from_value(serde_json::json!({
        "kind": "inline",
        "cells": [{ "timestamp": MON_9, "day": 0 }, { "timestamp": MON_9 + 900, "day": 0 }]
    }))
    .expect("decode source spec");
    let days = describe_grid(&source, ZONE).into_result().expect("describe");

    let request = SubmitRequest {
        event_url: "https://www.when2meet.com/?123-abc".to_string(),
        name: "Ada".to_string(),
        password: Some("secret".to_string()),
        timestamps: vec![MON_9 + 900, 42],
        paced: false,
    };
    let outcome = dry_run_submit(&request, &days).into_result().expect("submit");
    assert_eq!(outcome.report.participant, "Ada");
    assert_eq!(outcome.report.marked_count(), 1);

    let json = serde_json::to_value(&outcome.report).expect("encode report");
    assert_eq!(json["marks"][0]["outcome"]["status"], "marked");
    assert_eq!(json["marks"][1]["outcome"]["status"], "failed");
    assert_eq!(
        json["marks"][1]["outcome"]["failure"]["kind"],
        "target_not_found"
    );
    assert_eq!(outcome.transcript[0], "sign in as Ada (with password)");
}
