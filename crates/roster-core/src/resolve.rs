//! Status resolution.
//!
//! Everything here is a pure function of its inputs: the query date, "today",
//! the session calendar, and the explicit records from the attendance log.
//!
//! The rules are checked in a fixed order and the first match wins:
//!
//! 1. before the session start → `Not Marked`
//! 2. the weekly rest day → `Holiday`
//! 3. a configured holiday → `Holiday`
//! 4. an explicit record → that record
//! 5. after today → `Not Marked`
//! 6. otherwise → `Absent`
//!
//! Rules 2 and 3 take precedence over an explicit record.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};

use crate::{
  Error, Result,
  calendar::SessionCalendar,
  status::{AttendanceSheet, AttendanceStatus, SubjectRecords},
};

/// The effective status of one subject on `date`.
pub fn resolve(
  date: NaiveDate,
  today: NaiveDate,
  calendar: &SessionCalendar,
  records: &SubjectRecords,
) -> AttendanceStatus {
  if calendar.before_session(date) {
    return AttendanceStatus::NotMarked;
  }
  if calendar.is_rest_day(date) || calendar.holiday_on(date).is_some() {
    return AttendanceStatus::Holiday;
  }
  if let Some(status) = records.get(&date) {
    return (*status).into();
  }
  if date > today {
    AttendanceStatus::NotMarked
  } else {
    AttendanceStatus::Absent
  }
}

/// The status of every subject in `labels` on `date`.
///
/// Each subject is resolved with [`resolve`] against the same `today` and the
/// same `sheet`. Labels with no records resolve as if their record set were
/// empty.
pub fn resolve_for_date<'a>(
  date: NaiveDate,
  today: NaiveDate,
  calendar: &SessionCalendar,
  labels: impl IntoIterator<Item = &'a str>,
  sheet: &AttendanceSheet,
) -> BTreeMap<String, AttendanceStatus> {
  let empty = SubjectRecords::new();
  labels
    .into_iter()
    .map(|label| {
      let records = sheet.get(label).unwrap_or(&empty);
      (label.to_owned(), resolve(date, today, calendar, records))
    })
    .collect()
}

/// The status of one subject on every day of the given month.
pub fn resolve_month(
  year: i32,
  month: u32,
  today: NaiveDate,
  calendar: &SessionCalendar,
  records: &SubjectRecords,
) -> Result<BTreeMap<NaiveDate, AttendanceStatus>> {
  let first = NaiveDate::from_ymd_opt(year, month, 1)
    .ok_or_else(|| Error::InvalidMonth(format!("{year:04}-{month:02}")))?;
  let next = first
    .checked_add_months(Months::new(1))
    .ok_or_else(|| Error::InvalidMonth(format!("{year:04}-{month:02}")))?;

  Ok(
    first
      .iter_days()
      .take_while(|d| *d < next)
      .map(|d| (d, resolve(d, today, calendar, records)))
      .collect(),
  )
}
