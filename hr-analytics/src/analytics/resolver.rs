//! Latest-record resolution
//!
//! Picks one representative row per group from a set of dated rows in a
//! single pass. A group's latest row is the one with the greatest
//! `(date, id)` among rows dated on or before `as_of`; its earliest row is
//! the one with the smallest `(date, id)`. Groups with no eligible row are
//! absent from the result.

use chrono::NaiveDate;
use hr_common::db::Salary;
use std::collections::BTreeMap;

/// A row that belongs to a group and carries an effective date
pub trait Dated {
    fn group_key(&self) -> i64;
    fn date(&self) -> NaiveDate;
    fn id(&self) -> i64;
}

impl Dated for Salary {
    fn group_key(&self) -> i64 {
        self.employee_id
    }

    fn date(&self) -> NaiveDate {
        self.effective_date
    }

    fn id(&self) -> i64 {
        self.id
    }
}

/// Latest row per group, ignoring rows dated after `as_of`
pub fn latest_per_group<T: Dated>(rows: &[T], as_of: NaiveDate) -> BTreeMap<i64, &T> {
    let mut best: BTreeMap<i64, &T> = BTreeMap::new();

    for row in rows.iter().filter(|row| row.date() <= as_of) {
        best.entry(row.group_key())
            .and_modify(|current| {
                if (row.date(), row.id()) > (current.date(), current.id()) {
                    *current = row;
                }
            })
            .or_insert(row);
    }

    best
}

/// Earliest row per group
pub fn earliest_per_group<T: Dated>(rows: &[T]) -> BTreeMap<i64, &T> {
    let mut best: BTreeMap<i64, &T> = BTreeMap::new();

    for row in rows {
        best.entry(row.group_key())
            .and_modify(|current| {
                if (row.date(), row.id()) < (current.date(), current.id()) {
                    *current = row;
                }
            })
            .or_insert(row);
    }

    best
}
