//! Database models

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money;
use crate::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub manager_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub hire_date: NaiveDate,
    pub position: String,
    pub department_id: i64,
    pub is_active: bool,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Attendance status, stored as its snake_case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    HalfDay,
    Leave,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 5] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::HalfDay,
        AttendanceStatus::Leave,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::HalfDay => "half_day",
            AttendanceStatus::Leave => "leave",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttendanceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown attendance status: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attendance {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PerformanceReview {
    pub id: i64,
    pub employee_id: i64,
    pub review_date: NaiveDate,
    pub reviewer_id: Option<i64>,
    pub rating: i64,
    pub comments: String,
    pub goals_met: bool,
    pub improvement_areas: String,
    pub strengths: String,
}

/// One row of an employee's salary history
///
/// Amounts are kept in cents; use [`Salary::amount`] / [`Salary::bonus`]
/// for decimal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Salary {
    pub id: i64,
    pub employee_id: i64,
    pub amount_cents: i64,
    pub bonus_cents: i64,
    pub effective_date: NaiveDate,
    pub salary_type: String,
    pub currency: String,
    pub notes: String,
}

impl Salary {
    pub fn amount(&self) -> Decimal {
        money::from_cents(self.amount_cents)
    }

    pub fn bonus(&self) -> Decimal {
        money::from_cents(self.bonus_cents)
    }
}

// ========================================
// Insert payloads
// ========================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewDepartment {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub hire_date: NaiveDate,
    pub position: String,
    pub department_id: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAttendance {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPerformanceReview {
    pub employee_id: i64,
    pub review_date: NaiveDate,
    pub reviewer_id: Option<i64>,
    pub rating: i64,
    pub comments: String,
    pub goals_met: bool,
    pub improvement_areas: String,
    pub strengths: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSalary {
    pub employee_id: i64,
    pub amount: Decimal,
    pub bonus: Decimal,
    pub effective_date: NaiveDate,
    pub salary_type: String,
    pub currency: String,
    pub notes: String,
}

impl NewSalary {
    /// Salary row with the default type (`monthly`) and currency (`USD`)
    pub fn new(employee_id: i64, amount: Decimal, bonus: Decimal, effective_date: NaiveDate) -> Self {
        Self {
            employee_id,
            amount,
            bonus,
            effective_date,
            salary_type: "monthly".to_string(),
            currency: "USD".to_string(),
            notes: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_status_round_trip() {
        for status in AttendanceStatus::ALL {
            assert_eq!(status.as_str().parse::<AttendanceStatus>().unwrap(), status);
        }
        assert!("holiday".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_attendance_status_serializes_snake_case() {
        let json = serde_json::to_string(&AttendanceStatus::HalfDay).unwrap();
        assert_eq!(json, "\"half_day\"");
    }

    #[test]
    fn test_salary_decimal_accessors() {
        let salary = Salary {
            id: 1,
            employee_id: 1,
            amount_cents: 5_000_000,
            bonus_cents: 100_050,
            effective_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            salary_type: "monthly".to_string(),
            currency: "USD".to_string(),
            notes: String::new(),
        };
        assert_eq!(salary.amount().to_string(), "50000.00");
        assert_eq!(salary.bonus().to_string(), "1000.50");
    }
}
