// SPDX-License-Identifier: MIT

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    add_task = { PendingOp::add_task("Title".into(), "Desc".into(), "local-100".into()), "local-100" },
    update_task = { PendingOp::update_task("42".into(), Status::Completed, None), "42" },
)]
fn op_task_id_extraction(op: PendingOp, expected_id: &str) {
    assert_eq!(op.task_id(), expected_id);
}

#[test]
fn add_task_wire_format() {
    let op = PendingOp::add_task("X".into(), "Y".into(), "local-100".into());
    let json = serde_json::to_value(&op).unwrap();

    assert_eq!(json["type"], "ADD_TASK");
    assert_eq!(json["title"], "X");
    assert_eq!(json["description"], "Y");
    assert_eq!(json["localId"], "local-100");
}

#[test]
fn update_task_wire_format() {
    let op = PendingOp::update_task("1".into(), Status::Completed, Some("done early".into()));
    let json = serde_json::to_value(&op).unwrap();

    assert_eq!(json["type"], "UPDATE_TASK");
    assert_eq!(json["taskId"], "1");
    assert_eq!(json["status"], "Completed");
    assert_eq!(json["remarks"], "done early");
}

#[test]
fn update_task_omits_absent_remarks() {
    let op = PendingOp::update_task("1".into(), Status::Pending, None);
    let json = serde_json::to_value(&op).unwrap();
    assert!(json.get("remarks").is_none());
}

#[parameterized(
    add_task = { PendingOp::add_task("Title".into(), "Desc".into(), "local-1".into()) },
    update_with_remarks = { PendingOp::update_task("1".into(), Status::InProgress, Some("r".into())) },
    update_without_remarks = { PendingOp::update_task("2".into(), Status::Completed, None) },
)]
fn op_serialization_roundtrip(op: PendingOp) {
    let json = serde_json::to_string(&op).unwrap();
    let back: PendingOp = serde_json::from_str(&json).unwrap();
    assert_eq!(back, op);
}

#[test]
fn op_deserializes_legacy_queue_entry() {
    // Entry shape as written by older client builds.
    let json = r#"{"type":"UPDATE_TASK","taskId":"1","status":"In Progress","remarks":"wip"}"#;
    let op: PendingOp = serde_json::from_str(json).unwrap();
    assert_eq!(
        op,
        PendingOp::update_task("1".into(), Status::InProgress, Some("wip".into()))
    );
}

#[test]
fn op_rejects_unknown_tag() {
    let json = r#"{"type":"DELETE_TASK","taskId":"1"}"#;
    assert!(serde_json::from_str::<PendingOp>(json).is_err());
}
