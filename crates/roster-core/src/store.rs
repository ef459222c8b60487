//! The `RosterStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-json`).
//! Higher layers (`roster-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  face::{Face, FaceUpdate, NewFace},
  status::{AttendanceSheet, MarkedStatus, SubjectRecords},
};

/// Abstraction over the face registry and the attendance log.
///
/// Every write is a whole-document read-modify-write. Two overlapping writes
/// race and the later one wins; no locking is performed.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  // ── Face registry ─────────────────────────────────────────────────────

  /// All faces, in storage order.
  fn list_faces(
    &self,
  ) -> impl Future<Output = Result<Vec<Face>, Self::Error>> + Send + '_;

  /// Insert a face or merge into the one holding the same label. See
  /// [`crate::face::upsert`]. Returns the stored face.
  fn upsert_face(
    &self,
    input: NewFace,
  ) -> impl Future<Output = Result<Face, Self::Error>> + Send + '_;

  /// Relabel a face and overwrite its class and roll number. The subject's
  /// attendance records follow it to the new label.
  ///
  /// Fails with `FaceNotFound` if `label` is absent and `LabelTaken` if the
  /// new label belongs to another face.
  fn rename_face<'a>(
    &'a self,
    label: &'a str,
    update: FaceUpdate,
  ) -> impl Future<Output = Result<Face, Self::Error>> + Send + 'a;

  /// Delete a face. Its attendance records are left in place.
  fn remove_face<'a>(
    &'a self,
    label: &'a str,
  ) -> impl Future<Output = Result<Face, Self::Error>> + Send + 'a;

  // ── Attendance log ────────────────────────────────────────────────────

  /// Record `status` for (`label`, `date`), replacing any earlier record.
  fn mark<'a>(
    &'a self,
    label: &'a str,
    date: NaiveDate,
    status: MarkedStatus,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// One subject's explicit records; empty if none were ever marked.
  fn records_for<'a>(
    &'a self,
    label: &'a str,
  ) -> impl Future<Output = Result<SubjectRecords, Self::Error>> + Send + 'a;

  /// The entire log, read once.
  fn attendance_sheet(
    &self,
  ) -> impl Future<Output = Result<AttendanceSheet, Self::Error>> + Send + '_;

  /// Move a subject's records from `from` to `to`; returns how many moved.
  fn move_records<'a>(
    &'a self,
    from: &'a str,
    to: &'a str,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}
