//! Analytics computations over in-memory record slices
//!
//! Each function takes the rows a request loaded and returns a serializable
//! result. Nothing here touches the database; empty inputs produce zeros.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use hr_common::db::{Attendance, AttendanceStatus, Department, Employee, PerformanceReview, Salary};
use hr_common::money;

use super::aggregate::{
    average_or_zero, decimal_average_or_zero, decimal_sum, group_count, percentage_or_zero,
};
use super::resolver::{earliest_per_group, latest_per_group};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentAnalytics {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub employee_count: u64,
    pub average_salary: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceAnalytics {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub present_count: u64,
    pub absent_count: u64,
    pub late_count: u64,
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceTrend {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub average_rating: f64,
    pub goals_met_count: u64,
    pub total_reviews: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryGrowth {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub initial_salary: Decimal,
    pub current_salary: Decimal,
    pub growth_percentage: f64,
    pub total_bonus: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: AttendanceStatus,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingCount {
    pub rating: i64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentPerformance {
    pub department_id: i64,
    pub department_name: String,
    pub average_rating: f64,
    pub goals_met_percentage: f64,
    pub review_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryStats {
    pub average_salary: Decimal,
    pub min_salary: Decimal,
    pub max_salary: Decimal,
    pub total_bonus_paid: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSalaries {
    pub department_id: i64,
    pub department_name: String,
    pub average_salary: Decimal,
    pub total_employees: u64,
    pub total_bonus: Decimal,
}

/// employee id -> department id
fn department_index(employees: &[Employee]) -> HashMap<i64, i64> {
    employees.iter().map(|e| (e.id, e.department_id)).collect()
}

/// Headcount and average current salary per department
///
/// The average runs over employees that have a current salary row; a
/// department with nobody (or nobody paid yet) reports zero.
pub fn department_analytics(
    departments: &[Department],
    employees: &[Employee],
    salaries: &[Salary],
    as_of: NaiveDate,
) -> Vec<DepartmentAnalytics> {
    let headcount = group_count(employees, |e| e.department_id);
    let by_employee = department_index(employees);

    let mut current_by_department: BTreeMap<i64, Vec<Decimal>> = BTreeMap::new();
    for (employee_id, salary) in latest_per_group(salaries, as_of) {
        if let Some(department_id) = by_employee.get(&employee_id) {
            current_by_department
                .entry(*department_id)
                .or_default()
                .push(salary.amount());
        }
    }

    departments
        .iter()
        .map(|department| DepartmentAnalytics {
            id: department.id,
            name: department.name.clone(),
            location: department.location.clone(),
            employee_count: headcount.get(&department.id).copied().unwrap_or(0),
            average_salary: decimal_average_or_zero(
                current_by_department
                    .get(&department.id)
                    .into_iter()
                    .flatten()
                    .copied(),
            ),
        })
        .collect()
}

pub fn attendance_analytics(employee: &Employee, attendance: &[Attendance]) -> AttendanceAnalytics {
    let rows: Vec<&Attendance> = attendance
        .iter()
        .filter(|a| a.employee_id == employee.id)
        .collect();
    let count_of = |status: AttendanceStatus| rows.iter().filter(|a| a.status == status).count() as u64;

    let present_count = count_of(AttendanceStatus::Present);

    AttendanceAnalytics {
        id: employee.id,
        first_name: employee.first_name.clone(),
        last_name: employee.last_name.clone(),
        present_count,
        absent_count: count_of(AttendanceStatus::Absent),
        late_count: count_of(AttendanceStatus::Late),
        attendance_rate: percentage_or_zero(present_count, rows.len() as u64),
    }
}

pub fn performance_trend(employee: &Employee, reviews: &[PerformanceReview]) -> PerformanceTrend {
    let rows: Vec<&PerformanceReview> = reviews
        .iter()
        .filter(|r| r.employee_id == employee.id)
        .collect();

    PerformanceTrend {
        id: employee.id,
        first_name: employee.first_name.clone(),
        last_name: employee.last_name.clone(),
        average_rating: average_or_zero(rows.iter().map(|r| r.rating as f64)),
        goals_met_count: rows.iter().filter(|r| r.goals_met).count() as u64,
        total_reviews: rows.len() as u64,
    }
}

/// Growth from the earliest salary row to the current one
///
/// Returns `None` when the employee has no salary row in effect on `as_of`.
pub fn salary_growth(employee: &Employee, salaries: &[Salary], as_of: NaiveDate) -> Option<SalaryGrowth> {
    let initial = earliest_per_group(salaries).get(&employee.id)?.amount();
    let current = latest_per_group(salaries, as_of).get(&employee.id)?.amount();

    let growth_percentage = if initial.is_zero() {
        0.0
    } else {
        ((current - initial) * Decimal::ONE_HUNDRED / initial)
            .to_f64()
            .unwrap_or(0.0)
    };

    Some(SalaryGrowth {
        id: employee.id,
        first_name: employee.first_name.clone(),
        last_name: employee.last_name.clone(),
        initial_salary: initial,
        current_salary: current,
        growth_percentage,
        total_bonus: decimal_sum(
            salaries
                .iter()
                .filter(|s| s.employee_id == employee.id)
                .map(Salary::bonus),
        ),
    })
}

/// Attendance rows per status, ordered by status name
pub fn status_summary(attendance: &[Attendance]) -> Vec<StatusCount> {
    let mut summary: Vec<StatusCount> = group_count(attendance, |a| a.status)
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect();
    summary.sort_by_key(|entry| entry.status.as_str());
    summary
}

/// Reviews per rating, ascending
pub fn rating_distribution(reviews: &[PerformanceReview]) -> Vec<RatingCount> {
    group_count(reviews, |r| r.rating)
        .into_iter()
        .map(|(rating, count)| RatingCount { rating, count })
        .collect()
}

pub fn department_performance(
    departments: &[Department],
    employees: &[Employee],
    reviews: &[PerformanceReview],
) -> Vec<DepartmentPerformance> {
    let by_employee = department_index(employees);

    let mut by_department: BTreeMap<i64, Vec<&PerformanceReview>> = BTreeMap::new();
    for review in reviews {
        if let Some(department_id) = by_employee.get(&review.employee_id) {
            by_department.entry(*department_id).or_default().push(review);
        }
    }

    departments
        .iter()
        .map(|department| {
            let rows = by_department
                .get(&department.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let review_count = rows.len() as u64;
            let goals_met = rows.iter().filter(|r| r.goals_met).count() as u64;

            DepartmentPerformance {
                department_id: department.id,
                department_name: department.name.clone(),
                average_rating: average_or_zero(rows.iter().map(|r| r.rating as f64)),
                goals_met_percentage: percentage_or_zero(goals_met, review_count),
                review_count,
            }
        })
        .collect()
}

/// Company-wide salary figures
///
/// Average, min and max come from current rows only; `total_bonus_paid`
/// sums the bonus of every historical row.
pub fn salary_stats(salaries: &[Salary], as_of: NaiveDate) -> SalaryStats {
    let current: Vec<Decimal> = latest_per_group(salaries, as_of)
        .values()
        .map(|s| s.amount())
        .collect();

    let zero = money::round(Decimal::ZERO);

    SalaryStats {
        average_salary: decimal_average_or_zero(current.iter().copied()),
        min_salary: current.iter().min().copied().unwrap_or(zero),
        max_salary: current.iter().max().copied().unwrap_or(zero),
        total_bonus_paid: decimal_sum(salaries.iter().map(Salary::bonus)),
    }
}

/// Current-salary rollup for one department
pub fn department_salaries(
    department: &Department,
    employees: &[Employee],
    salaries: &[Salary],
    as_of: NaiveDate,
) -> DepartmentSalaries {
    let by_employee = department_index(employees);

    let current: Vec<&Salary> = latest_per_group(salaries, as_of)
        .into_values()
        .filter(|s| by_employee.get(&s.employee_id) == Some(&department.id))
        .collect();

    DepartmentSalaries {
        department_id: department.id,
        department_name: department.name.clone(),
        average_salary: decimal_average_or_zero(current.iter().map(|s| s.amount())),
        total_employees: current.len() as u64,
        total_bonus: decimal_sum(current.iter().map(|s| s.bonus())),
    }
}
