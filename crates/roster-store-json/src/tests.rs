//! Integration tests for `JsonStore` against documents in a temporary
//! directory.

use std::str::FromStr;

use chrono::NaiveDate;
use roster_core::{
  face::{FaceUpdate, NewFace},
  status::MarkedStatus,
  store::RosterStore,
};
use tempfile::TempDir;

use crate::{Error, JsonStore};

async fn store() -> (JsonStore, TempDir) {
  let dir = tempfile::tempdir().expect("temp dir");
  let store = JsonStore::open(
    dir.path().join("data/faces.json"),
    dir.path().join("data/attendance.json"),
  )
  .await
  .expect("json store");
  (store, dir)
}

fn d(s: &str) -> NaiveDate { NaiveDate::from_str(s).unwrap() }

fn new_face(label: &str, class: &str, roll_no: &str, images: &[&str]) -> NewFace {
  NewFace {
    label:   label.into(),
    class:   class.into(),
    roll_no: roll_no.into(),
    images:  images.iter().map(|s| s.to_string()).collect(),
  }
}

// ─── Opening ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn open_creates_both_documents() {
  let (s, _dir) = store().await;

  assert_eq!(std::fs::read_to_string(s.faces_path()).unwrap(), "[]");
  assert_eq!(std::fs::read_to_string(s.attendance_path()).unwrap(), "{}");
  assert!(s.list_faces().await.unwrap().is_empty());
  assert!(s.attendance_sheet().await.unwrap().is_empty());
}

#[tokio::test]
async fn open_keeps_existing_documents() {
  let dir = tempfile::tempdir().unwrap();
  let faces = dir.path().join("faces.json");
  std::fs::write(
    &faces,
    r#"[{"label":"Sanju","class":"10A","rollNo":"4","images":["a"]}]"#,
  )
  .unwrap();

  let s = JsonStore::open(&faces, dir.path().join("attendance.json"))
    .await
    .unwrap();
  let listed = s.list_faces().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].roll_no, "4");
}

// ─── Faces ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_twice_keeps_scalars_and_duplicates_images() {
  let (s, _dir) = store().await;

  s.upsert_face(new_face("S1", "X", "1", &[])).await.unwrap();
  s.upsert_face(new_face("S1", "X", "1", &[])).await.unwrap();
  let faces = s.list_faces().await.unwrap();
  assert_eq!(faces.len(), 1);
  assert_eq!(faces[0].class, "X");
  assert_eq!(faces[0].roll_no, "1");

  s.upsert_face(new_face("S1", "X", "1", &["img1"])).await.unwrap();
  let stored = s.upsert_face(new_face("S1", "X", "1", &["img1"])).await.unwrap();
  assert_eq!(stored.images, vec!["img1".to_string(), "img1".to_string()]);
  assert_eq!(s.list_faces().await.unwrap()[0], stored);
}

#[tokio::test]
async fn list_preserves_insertion_order() {
  let (s, _dir) = store().await;
  for label in ["c", "a", "b"] {
    s.upsert_face(new_face(label, "", "", &[])).await.unwrap();
  }
  let labels: Vec<_> = s
    .list_faces()
    .await
    .unwrap()
    .into_iter()
    .map(|f| f.label)
    .collect();
  assert_eq!(labels, ["c", "a", "b"]);
}

#[tokio::test]
async fn rename_missing_face_is_not_found() {
  let (s, _dir) = store().await;
  let err = s
    .rename_face("ghost", FaceUpdate {
      name:    "x".into(),
      class:   String::new(),
      roll_no: String::new(),
    })
    .await
    .unwrap_err();
  assert!(matches!(
    roster_core::Error::from(err),
    roster_core::Error::FaceNotFound(_)
  ));
}

#[tokio::test]
async fn rename_moves_attendance_records() {
  let (s, _dir) = store().await;
  s.upsert_face(new_face("S1", "X", "1", &["a"])).await.unwrap();
  s.mark("S1", d("2025-08-04"), MarkedStatus::Leave).await.unwrap();

  let renamed = s
    .rename_face("S1", FaceUpdate {
      name:    "Sanju".into(),
      class:   "Y".into(),
      roll_no: "2".into(),
    })
    .await
    .unwrap();
  assert_eq!(renamed.label, "Sanju");
  assert_eq!(renamed.images, vec!["a".to_string()]);

  assert!(s.records_for("S1").await.unwrap().is_empty());
  let records = s.records_for("Sanju").await.unwrap();
  assert_eq!(records[&d("2025-08-04")], MarkedStatus::Leave);
}

#[tokio::test]
async fn failed_rename_leaves_registry_untouched() {
  let (s, _dir) = store().await;
  s.upsert_face(new_face("S1", "X", "1", &[])).await.unwrap();

  std::fs::remove_file(s.attendance_path()).unwrap();
  std::fs::create_dir(s.attendance_path()).unwrap();

  let err = s
    .rename_face("S1", FaceUpdate {
      name:    "S2".into(),
      class:   "X".into(),
      roll_no: "1".into(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Io { .. }));

  let labels: Vec<_> = s
    .list_faces()
    .await
    .unwrap()
    .into_iter()
    .map(|f| f.label)
    .collect();
  assert_eq!(labels, ["S1"]);
}

#[tokio::test]
async fn remove_face_leaves_attendance_in_place() {
  let (s, _dir) = store().await;
  s.upsert_face(new_face("S1", "X", "1", &[])).await.unwrap();
  s.mark("S1", d("2025-08-04"), MarkedStatus::Present).await.unwrap();

  let removed = s.remove_face("S1").await.unwrap();
  assert_eq!(removed.label, "S1");
  assert!(s.list_faces().await.unwrap().is_empty());
  assert_eq!(s.records_for("S1").await.unwrap().len(), 1);

  let err = s.remove_face("S1").await.unwrap_err();
  assert!(matches!(err, Error::Core(roster_core::Error::FaceNotFound(_))));
}

// ─── Attendance ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn mark_overwrites_same_pair() {
  let (s, _dir) = store().await;
  s.mark("S1", d("2025-08-04"), MarkedStatus::Present).await.unwrap();
  s.mark("S1", d("2025-08-04"), MarkedStatus::Absent).await.unwrap();
  s.mark("S1", d("2025-08-05"), MarkedStatus::Leave).await.unwrap();

  let records = s.records_for("S1").await.unwrap();
  assert_eq!(records.len(), 2);
  assert_eq!(records[&d("2025-08-04")], MarkedStatus::Absent);
}

#[tokio::test]
async fn records_for_unknown_label_is_empty() {
  let (s, _dir) = store().await;
  assert!(s.records_for("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn attendance_document_uses_label_then_date_layout() {
  let (s, _dir) = store().await;
  s.mark("S1", d("2025-08-04"), MarkedStatus::Leave).await.unwrap();

  let raw: serde_json::Value =
    serde_json::from_str(&std::fs::read_to_string(s.attendance_path()).unwrap())
      .unwrap();
  assert_eq!(raw, serde_json::json!({ "S1": { "2025-08-04": "Leave" } }));
}

#[tokio::test]
async fn documents_round_trip_through_a_fresh_store() {
  let (s, dir) = store().await;
  s.upsert_face(new_face("S1", "X", "1", &["a", "b"])).await.unwrap();
  s.upsert_face(new_face("S2", "Y", "2", &[])).await.unwrap();
  s.mark("S1", d("2025-08-04"), MarkedStatus::Present).await.unwrap();
  s.mark("S2", d("2025-08-05"), MarkedStatus::Absent).await.unwrap();

  let faces = s.list_faces().await.unwrap();
  let sheet = s.attendance_sheet().await.unwrap();

  let reopened = JsonStore::open(
    dir.path().join("data/faces.json"),
    dir.path().join("data/attendance.json"),
  )
  .await
  .unwrap();
  assert_eq!(reopened.list_faces().await.unwrap(), faces);
  assert_eq!(reopened.attendance_sheet().await.unwrap(), sheet);
}

#[tokio::test]
async fn corrupt_registry_reads_as_empty() {
  let (s, _dir) = store().await;
  std::fs::write(s.faces_path(), "not json at all").unwrap();
  assert!(s.list_faces().await.unwrap().is_empty());
}
