//! Face — a labelled subject in the registry.
//!
//! The registry is an ordered list of faces keyed by `label`. A save under an
//! existing label merges into the stored face instead of replacing it. The
//! functions here implement those merge rules over a plain `Vec<Face>`; the
//! storage backend only reads the list, applies one of them, and writes it
//! back.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A known subject with its reference captures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
  /// Unique, stable identifier; also the key of the attendance log.
  pub label:   String,
  /// Free-form group tag (a class or section).
  #[serde(default)]
  pub class:   String,
  #[serde(rename = "rollNo")]
  pub roll_no: String,
  /// Opaque encoded image payloads, in capture order.
  #[serde(default)]
  pub images:  Vec<String>,
}

/// Input to [`crate::store::RosterStore::upsert_face`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewFace {
  pub label:   String,
  #[serde(default)]
  pub class:   String,
  #[serde(rename = "rollNo")]
  pub roll_no: String,
  #[serde(default)]
  pub images:  Vec<String>,
}

/// Input to [`crate::store::RosterStore::rename_face`]. `name` becomes the
/// face's new label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FaceUpdate {
  pub name:    String,
  #[serde(default)]
  pub class:   String,
  #[serde(rename = "rollNo")]
  pub roll_no: String,
}

/// Insert `input`, or merge it into the face already holding its label.
///
/// Merging appends `input.images` to the stored images and overwrites `class`
/// and `roll_no`. Repeating the same call therefore duplicates the images;
/// callers are expected to submit only new captures.
pub fn upsert(faces: &mut Vec<Face>, input: NewFace) -> &Face {
  let NewFace { label, class, roll_no, images } = input;

  match faces.iter().position(|f| f.label == label) {
    Some(i) => {
      let face = &mut faces[i];
      face.images.extend(images);
      face.class = class;
      face.roll_no = roll_no;
      &faces[i]
    }
    None => {
      faces.push(Face { label, class, roll_no, images });
      &faces[faces.len() - 1]
    }
  }
}

/// Change the label, class and roll number of the face labelled `label`.
/// Images are left untouched.
///
/// Fails with [`Error::FaceNotFound`] if no face has `label`, and with
/// [`Error::LabelTaken`] if `update.name` belongs to a different face.
pub fn rename(faces: &mut [Face], label: &str, update: FaceUpdate) -> Result<Face> {
  let index = faces
    .iter()
    .position(|f| f.label == label)
    .ok_or_else(|| Error::FaceNotFound(label.to_owned()))?;

  if update.name != label && faces.iter().any(|f| f.label == update.name) {
    return Err(Error::LabelTaken(update.name));
  }

  let face = &mut faces[index];
  face.label = update.name;
  face.class = update.class;
  face.roll_no = update.roll_no;
  Ok(face.clone())
}

/// Remove the face labelled `label`, returning it.
pub fn remove(faces: &mut Vec<Face>, label: &str) -> Result<Face> {
  let index = faces
    .iter()
    .position(|f| f.label == label)
    .ok_or_else(|| Error::FaceNotFound(label.to_owned()))?;
  Ok(faces.remove(index))
}
