//! Attendance statuses and the attendance log document.
//!
//! Only [`MarkedStatus`] values are ever persisted. [`AttendanceStatus`] adds
//! the two kinds the resolver computes on the fly (`Holiday`, `Not Marked`).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// A status that can be recorded explicitly for a (subject, date) pair.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum MarkedStatus {
  Present,
  Absent,
  Leave,
}

/// The effective status of a subject on a date, as reported to callers.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum AttendanceStatus {
  Present,
  Absent,
  Leave,
  Holiday,
  #[serde(rename = "Not Marked")]
  #[strum(serialize = "Not Marked")]
  NotMarked,
}

impl From<MarkedStatus> for AttendanceStatus {
  fn from(s: MarkedStatus) -> Self {
    match s {
      MarkedStatus::Present => Self::Present,
      MarkedStatus::Absent => Self::Absent,
      MarkedStatus::Leave => Self::Leave,
    }
  }
}

impl MarkedStatus {
  /// Parse a status submitted by a caller.
  pub fn parse(value: &str) -> crate::Result<Self> {
    value
      .trim()
      .parse()
      .map_err(|_| crate::Error::InvalidStatus(value.to_owned()))
  }
}

/// One subject's explicit records, keyed by date.
pub type SubjectRecords = BTreeMap<NaiveDate, MarkedStatus>;

/// The whole attendance log: subject label → that subject's records.
pub type AttendanceSheet = BTreeMap<String, SubjectRecords>;

/// Record `status` for `label` on `date`, replacing any earlier record for the
/// same pair. The subject's sub-mapping is created on first use.
pub fn mark(
  sheet: &mut AttendanceSheet,
  label: &str,
  date: NaiveDate,
  status: MarkedStatus,
) -> Option<MarkedStatus> {
  sheet.entry(label.to_owned()).or_default().insert(date, status)
}

/// Move every record held under `from` to `to`.
///
/// Records already present under `to` are kept unless `from` has one for the
/// same date, in which case the moved record wins. Returns the number of
/// records moved.
pub fn move_records(sheet: &mut AttendanceSheet, from: &str, to: &str) -> usize {
  if from == to {
    return 0;
  }
  let Some(moved) = sheet.remove(from) else {
    return 0;
  };
  let count = moved.len();
  sheet.entry(to.to_owned()).or_default().extend(moved);
  count
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  fn d(s: &str) -> NaiveDate { NaiveDate::from_str(s).unwrap() }

  #[test]
  fn not_marked_uses_spaced_wire_name() {
    let json = serde_json::to_string(&AttendanceStatus::NotMarked).unwrap();
    assert_eq!(json, "\"Not Marked\"");
    assert_eq!(AttendanceStatus::NotMarked.to_string(), "Not Marked");
    assert_eq!(
      AttendanceStatus::from_str("Not Marked").unwrap(),
      AttendanceStatus::NotMarked
    );
  }

  #[test]
  fn computed_statuses_are_not_markable() {
    assert!(serde_json::from_str::<MarkedStatus>("\"Holiday\"").is_err());
    assert!(serde_json::from_str::<MarkedStatus>("\"Not Marked\"").is_err());
    assert!(MarkedStatus::from_str("Leave").is_ok());
    assert!(MarkedStatus::parse("Holiday").unwrap_err().is_validation());
    assert_eq!(MarkedStatus::parse(" Present ").unwrap(), MarkedStatus::Present);
  }

  #[test]
  fn mark_creates_sub_mapping_and_overwrites() {
    let mut sheet = AttendanceSheet::new();
    assert_eq!(mark(&mut sheet, "S1", d("2025-08-04"), MarkedStatus::Present), None);
    assert_eq!(
      mark(&mut sheet, "S1", d("2025-08-04"), MarkedStatus::Leave),
      Some(MarkedStatus::Present)
    );
    assert_eq!(sheet["S1"].len(), 1);
    assert_eq!(sheet["S1"][&d("2025-08-04")], MarkedStatus::Leave);
  }

  #[test]
  fn sheet_serialises_dates_as_iso_keys() {
    let mut sheet = AttendanceSheet::new();
    mark(&mut sheet, "S1", d("2025-08-04"), MarkedStatus::Absent);
    let json = serde_json::to_value(&sheet).unwrap();
    assert_eq!(json["S1"]["2025-08-04"], "Absent");

    let back: AttendanceSheet = serde_json::from_value(json).unwrap();
    assert_eq!(back, sheet);
  }

  #[test]
  fn move_records_merges_with_moved_entries_winning() {
    let mut sheet = AttendanceSheet::new();
    mark(&mut sheet, "old", d("2025-08-04"), MarkedStatus::Present);
    mark(&mut sheet, "old", d("2025-08-05"), MarkedStatus::Leave);
    mark(&mut sheet, "new", d("2025-08-05"), MarkedStatus::Absent);
    mark(&mut sheet, "new", d("2025-08-06"), MarkedStatus::Absent);

    assert_eq!(move_records(&mut sheet, "old", "new"), 2);
    assert!(!sheet.contains_key("old"));
    let new = &sheet["new"];
    assert_eq!(new.len(), 3);
    assert_eq!(new[&d("2025-08-05")], MarkedStatus::Leave);
  }

  #[test]
  fn move_records_without_source_is_noop() {
    let mut sheet = AttendanceSheet::new();
    assert_eq!(move_records(&mut sheet, "ghost", "other"), 0);
    assert!(sheet.is_empty());
  }
}
