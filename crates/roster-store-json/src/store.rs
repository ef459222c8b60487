//! [`JsonStore`] — the JSON-file implementation of [`RosterStore`].

use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use roster_core::{
  face::{self, Face, FaceUpdate, NewFace},
  status::{AttendanceSheet, MarkedStatus, SubjectRecords},
  store::RosterStore,
};

use crate::{Result, document};

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Paths {
  faces:      PathBuf,
  attendance: PathBuf,
}

/// A Roster store backed by two JSON documents: a registry array of faces and
/// an attendance object keyed by label then date.
///
/// Cloning is cheap — the paths are reference-counted. There is no in-process
/// locking: every write rereads the whole document and the last writer wins.
#[derive(Debug, Clone)]
pub struct JsonStore {
  paths: Arc<Paths>,
}

impl JsonStore {
  /// Point a store at its two documents, creating either if absent.
  pub async fn open(
    faces_path: impl Into<PathBuf>,
    attendance_path: impl Into<PathBuf>,
  ) -> Result<Self> {
    let store = Self {
      paths: Arc::new(Paths {
        faces:      faces_path.into(),
        attendance: attendance_path.into(),
      }),
    };
    store.load_faces().await?;
    store.load_sheet().await?;
    Ok(store)
  }

  pub fn faces_path(&self) -> &std::path::Path { &self.paths.faces }

  pub fn attendance_path(&self) -> &std::path::Path { &self.paths.attendance }

  async fn load_faces(&self) -> Result<Vec<Face>> {
    document::read_or_init(&self.paths.faces, Vec::new()).await
  }

  async fn save_faces(&self, faces: &[Face]) -> Result<()> {
    document::write(&self.paths.faces, &faces).await
  }

  async fn load_sheet(&self) -> Result<AttendanceSheet> {
    document::read_or_init(&self.paths.attendance, AttendanceSheet::new()).await
  }

  async fn save_sheet(&self, sheet: &AttendanceSheet) -> Result<()> {
    document::write(&self.paths.attendance, sheet).await
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for JsonStore {
  type Error = crate::Error;

  // ── Faces ─────────────────────────────────────────────────────────────────

  async fn list_faces(&self) -> Result<Vec<Face>> { self.load_faces().await }

  async fn upsert_face(&self, input: NewFace) -> Result<Face> {
    let mut faces = self.load_faces().await?;
    let label = input.label.clone();
    let added = input.images.len();
    let stored = face::upsert(&mut faces, input).clone();
    self.save_faces(&faces).await?;

    tracing::debug!(%label, images_added = added, total_images = stored.images.len(), "upserted face");
    Ok(stored)
  }

  async fn rename_face(&self, label: &str, update: FaceUpdate) -> Result<Face> {
    // Both documents are read and checked before either is written, and the
    // registry goes last, so a failure never leaves a renamed face whose
    // records still sit under the old label.
    let mut faces = self.load_faces().await?;
    let original = self.load_sheet().await?;
    let renamed = face::rename(&mut faces, label, update)?;

    let mut sheet = original.clone();
    let moved = roster_core::status::move_records(&mut sheet, label, &renamed.label);
    if moved > 0 {
      self.save_sheet(&sheet).await?;
    }
    if let Err(err) = self.save_faces(&faces).await {
      if moved > 0 {
        if let Err(restore) = self.save_sheet(&original).await {
          tracing::error!(error = %restore, "failed to restore attendance after rename");
        }
      }
      return Err(err);
    }

    tracing::debug!(from = %label, to = %renamed.label, records_moved = moved, "renamed face");
    Ok(renamed)
  }

  async fn remove_face(&self, label: &str) -> Result<Face> {
    let mut faces = self.load_faces().await?;
    let removed = face::remove(&mut faces, label)?;
    self.save_faces(&faces).await?;

    tracing::debug!(%label, "removed face");
    Ok(removed)
  }

  // ── Attendance ────────────────────────────────────────────────────────────

  async fn mark(&self, label: &str, date: NaiveDate, status: MarkedStatus) -> Result<()> {
    let mut sheet = self.load_sheet().await?;
    let previous = roster_core::status::mark(&mut sheet, label, date, status);
    self.save_sheet(&sheet).await?;

    tracing::debug!(%label, %date, %status, ?previous, "marked attendance");
    Ok(())
  }

  async fn records_for(&self, label: &str) -> Result<SubjectRecords> {
    let mut sheet = self.load_sheet().await?;
    Ok(sheet.remove(label).unwrap_or_default())
  }

  async fn attendance_sheet(&self) -> Result<AttendanceSheet> { self.load_sheet().await }

  async fn move_records(&self, from: &str, to: &str) -> Result<usize> {
    let mut sheet = self.load_sheet().await?;
    let moved = roster_core::status::move_records(&mut sheet, from, to);
    if moved > 0 {
      self.save_sheet(&sheet).await?;
    }
    Ok(moved)
  }
}
