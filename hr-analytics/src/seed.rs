//! Synthetic data generation
//!
//! Populates the record store with departments, employees, weekday
//! attendance, performance reviews and a salary history per employee. All
//! inserts run in one transaction, so a failed run leaves the store as it
//! was.

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveTime, Weekday};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashSet;
use tracing::info;

use hr_common::db::{
    AttendanceStatus, NewAttendance, NewDepartment, NewEmployee, NewPerformanceReview, NewSalary,
};
use hr_common::{money, Error, Result};

use crate::db;

pub const DEPARTMENT_NAMES: [&str; 7] = [
    "Engineering",
    "Marketing",
    "Sales",
    "HR",
    "Finance",
    "Operations",
    "IT",
];

const LOCATIONS: [&str; 7] = [
    "New York",
    "San Francisco",
    "Chicago",
    "Austin",
    "Seattle",
    "Boston",
    "Denver",
];

const POSITIONS: [&str; 7] = [
    "Manager",
    "Developer",
    "Designer",
    "Analyst",
    "Specialist",
    "Coordinator",
    "Director",
];

const FIRST_NAMES: [&str; 16] = [
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
];

const LAST_NAMES: [&str; 16] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas",
];

/// Attendance status mix: 80% present, 10% absent, 5% late, 3% half day, 2% leave
const STATUS_WEIGHTS: [(AttendanceStatus, u32); 5] = [
    (AttendanceStatus::Present, 80),
    (AttendanceStatus::Absent, 10),
    (AttendanceStatus::Late, 5),
    (AttendanceStatus::HalfDay, 3),
    (AttendanceStatus::Leave, 2),
];

/// Ratings skew high: weights for 1..=5
const RATING_WEIGHTS: [u32; 5] = [5, 10, 20, 40, 25];

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub employees: usize,
    /// Capped at the number of known department names
    pub departments: usize,
    pub attendance_days: i64,
    /// Delete existing records first
    pub clear: bool,
    /// Fixed RNG seed for reproducible data
    pub seed: Option<u64>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            employees: 5,
            departments: 3,
            attendance_days: 30,
            clear: false,
            seed: None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub departments: usize,
    pub employees: usize,
    pub attendance: usize,
    pub reviews: usize,
    pub salaries: usize,
}

struct SeededEmployee {
    id: i64,
    department_id: i64,
    position: &'static str,
    hire_date: NaiveDate,
    name: String,
}

/// Generate a data set ending at `today`
pub async fn generate(pool: &SqlitePool, options: &SeedOptions, today: NaiveDate) -> Result<SeedSummary> {
    let department_count = options.departments.min(DEPARTMENT_NAMES.len());
    if department_count == 0 && options.employees > 0 {
        return Err(Error::InvalidInput(
            "At least one department is required to place employees".to_string(),
        ));
    }
    let attendance_from = attendance_start(today, options.attendance_days)?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut tx = pool.begin().await?;

    if options.clear {
        clear_all(&mut tx).await?;
    }

    let mut summary = SeedSummary::default();

    info!("Creating departments...");
    let mut department_ids = Vec::with_capacity(department_count);
    for name in DEPARTMENT_NAMES.iter().take(department_count) {
        let department = NewDepartment {
            name: name.to_string(),
            location: pick(&mut rng, &LOCATIONS).to_string(),
        };
        department_ids.push(db::insert_department(&mut *tx, &department).await?);
        info!("Created department: {} ({})", department.name, department.location);
    }
    summary.departments = department_ids.len();

    info!("Creating employees...");
    let employees = create_employees(&mut tx, &mut rng, options.employees, &department_ids, today).await?;
    summary.employees = employees.len();

    for department_id in &department_ids {
        let members: Vec<&SeededEmployee> = employees
            .iter()
            .filter(|e| e.department_id == *department_id)
            .collect();
        if let Some(manager) = members.choose(&mut rng) {
            db::set_department_manager(&mut *tx, *department_id, Some(manager.id)).await?;
            info!("Set {} as manager of department {}", manager.name, department_id);
        }
    }

    info!("Creating attendance records...");
    summary.attendance =
        create_attendance(&mut tx, &mut rng, &employees, attendance_from, today).await?;

    info!("Creating performance reviews...");
    summary.reviews = create_reviews(&mut tx, &mut rng, &employees, today).await?;

    info!("Creating salary records...");
    summary.salaries = create_salaries(&mut tx, &mut rng, &employees, today).await?;

    tx.commit().await?;

    info!("Successfully generated employee data: {:?}", summary);
    Ok(summary)
}

async fn clear_all(conn: &mut SqliteConnection) -> Result<()> {
    info!("Clearing existing data...");
    for table in [
        "salaries",
        "performance_reviews",
        "attendance",
        "employees",
        "departments",
    ] {
        sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn weighted_index(weights: &[u32]) -> Result<WeightedIndex<u32>> {
    WeightedIndex::new(weights).map_err(|e| Error::Internal(format!("Invalid weights: {}", e)))
}

/// Amount scaled by a factor given in basis points
fn scale(amount: Decimal, basis_points: i64) -> Decimal {
    money::round(amount * Decimal::new(basis_points, 4))
}

async fn create_employees(
    conn: &mut SqliteConnection,
    rng: &mut StdRng,
    count: usize,
    department_ids: &[i64],
    today: NaiveDate,
) -> Result<Vec<SeededEmployee>> {
    let mut employees = Vec::with_capacity(count);
    let mut emails = HashSet::new();

    for _ in 0..count {
        let first_name = pick(rng, &FIRST_NAMES);
        let last_name = pick(rng, &LAST_NAMES);
        let department_id = *department_ids
            .choose(rng)
            .ok_or_else(|| Error::Internal("No departments to assign".to_string()))?;
        let position = pick(rng, &POSITIONS);

        let base = format!("{}.{}", first_name.to_lowercase(), last_name.to_lowercase());
        let mut email = format!("{}@example.com", base);
        let mut suffix = 2;
        while !emails.insert(email.clone()) {
            email = format!("{}{}@example.com", base, suffix);
            suffix += 1;
        }

        let employee = NewEmployee {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            phone_number: format!(
                "555-{:03}-{:04}",
                rng.gen_range(100..1000),
                rng.gen_range(0..10000)
            ),
            hire_date: today - Duration::days(rng.gen_range(0..=5 * 365)),
            position: position.to_string(),
            department_id,
            is_active: rng.gen_bool(0.9),
        };

        let id = db::insert_employee(&mut *conn, &employee).await?;
        let name = format!("{} {}", first_name, last_name);
        info!("Created employee: {}", name);

        employees.push(SeededEmployee {
            id,
            department_id,
            position,
            hire_date: employee.hire_date,
            name,
        });
    }

    Ok(employees)
}

fn clock_times(rng: &mut StdRng, status: AttendanceStatus) -> (Option<NaiveTime>, Option<NaiveTime>) {
    match status {
        AttendanceStatus::Present | AttendanceStatus::Late => {
            let (hours, minutes): (i32, i32) = if status == AttendanceStatus::Present {
                (rng.gen_range(-1..=1), rng.gen_range(-15..=15))
            } else {
                (rng.gen_range(0..=2), rng.gen_range(15..=45))
            };
            let clock_in = NaiveTime::from_hms_opt(
                (9 + hours).clamp(7, 11) as u32,
                minutes.clamp(0, 59) as u32,
                0,
            );

            let hours: i32 = rng.gen_range(-1..=2);
            let minutes: i32 = rng.gen_range(-15..=30);
            let clock_out = NaiveTime::from_hms_opt(
                (17 + hours).clamp(16, 20) as u32,
                minutes.clamp(0, 59) as u32,
                0,
            );

            (clock_in, clock_out)
        }
        AttendanceStatus::HalfDay => {
            let (start, end) = if rng.gen_bool(0.5) { (9, 13) } else { (13, 17) };
            (
                NaiveTime::from_hms_opt(start, rng.gen_range(0..=30), 0),
                NaiveTime::from_hms_opt(end, rng.gen_range(0..=30), 0),
            )
        }
        AttendanceStatus::Absent | AttendanceStatus::Leave => (None, None),
    }
}

/// First day of the attendance window; negative counts as 0
fn attendance_start(today: NaiveDate, days: i64) -> Result<NaiveDate> {
    let days = days.max(0).unsigned_abs();
    today
        .checked_sub_days(Days::new(days))
        .ok_or_else(|| Error::InvalidInput(format!("Attendance window of {} days is out of range", days)))
}

async fn create_attendance(
    conn: &mut SqliteConnection,
    rng: &mut StdRng,
    employees: &[SeededEmployee],
    start: NaiveDate,
    today: NaiveDate,
) -> Result<usize> {
    let statuses = weighted_index(&STATUS_WEIGHTS.map(|(_, weight)| weight))?;
    let mut created = 0;

    for date in start.iter_days().take_while(|date| *date <= today) {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        for employee in employees {
            let status = STATUS_WEIGHTS[statuses.sample(rng)].0;
            let (clock_in, clock_out) = clock_times(rng, status);

            let record = NewAttendance {
                employee_id: employee.id,
                date,
                clock_in,
                clock_out,
                status,
                notes: if rng.gen_bool(0.3) {
                    "Logged by supervisor".to_string()
                } else {
                    String::new()
                },
            };
            db::insert_attendance(&mut *conn, &record).await?;
            created += 1;
        }
    }

    info!("Created attendance records from {} to {}", start, today);
    Ok(created)
}

async fn create_reviews(
    conn: &mut SqliteConnection,
    rng: &mut StdRng,
    employees: &[SeededEmployee],
    today: NaiveDate,
) -> Result<usize> {
    let ratings = weighted_index(&RATING_WEIGHTS)?;
    let mut created = 0;

    for employee in employees {
        let count = rng.gen_range(1..=3);
        let mut dates: Vec<NaiveDate> = (0..count)
            .map(|_| today - Duration::days(rng.gen_range(0..=2 * 365)))
            .collect();
        dates.sort();

        for review_date in dates {
            let others: Vec<i64> = employees
                .iter()
                .filter(|e| e.id != employee.id)
                .map(|e| e.id)
                .collect();
            let rating = ratings.sample(rng) as i64 + 1;

            let summary = match rating {
                1 | 2 => "Needs significant improvement.",
                3 => "Meeting expectations but has room for growth.",
                _ => "Exceeding expectations in most areas.",
            };

            let review = NewPerformanceReview {
                employee_id: employee.id,
                review_date,
                reviewer_id: others.choose(rng).copied(),
                rating,
                comments: format!("Review for {}.\n{}", employee.name, summary),
                goals_met: rating >= 3,
                improvement_areas: if rating < 5 {
                    "Time management and documentation.".to_string()
                } else {
                    String::new()
                },
                strengths: "Collaboration and technical depth.".to_string(),
            };
            db::insert_performance(&mut *conn, &review).await?;
            created += 1;
        }

        info!("Created {} performance reviews for {}", count, employee.name);
    }

    Ok(created)
}

/// Annual base salary range for a position
fn base_salary_range(position: &str) -> (i64, i64) {
    match position {
        "Manager" => (85_000, 120_000),
        "Director" => (120_000, 170_000),
        "Developer" => (70_000, 110_000),
        "Designer" => (65_000, 95_000),
        "Analyst" => (60_000, 90_000),
        "Specialist" => (55_000, 85_000),
        "Coordinator" => (50_000, 70_000),
        _ => (50_000, 100_000),
    }
}

async fn create_salaries(
    conn: &mut SqliteConnection,
    rng: &mut StdRng,
    employees: &[SeededEmployee],
    today: NaiveDate,
) -> Result<usize> {
    let mut created = 0;

    for employee in employees {
        let (low, high) = base_salary_range(employee.position);
        let base = Decimal::from(rng.gen_range(low..=high));

        // Start at 80-100% of the position's base
        let mut amount = scale(base, rng.gen_range(8_000..=10_000));
        let mut effective_date = employee.hire_date;

        let mut initial = NewSalary::new(employee.id, amount, Decimal::ZERO, effective_date);
        initial.salary_type = "annual".to_string();
        db::insert_salary(&mut *conn, &initial).await?;
        created += 1;

        // Up to three raises, 6-18 months apart, never in the future
        let raises = rng.gen_range(0..=3);
        let mut applied = 0;
        for _ in 0..raises {
            let months = rng.gen_range(6..=18);
            let Some(next_date) = effective_date.checked_add_months(Months::new(months)) else {
                break;
            };
            if next_date > today {
                break;
            }

            let increase_bp = rng.gen_range(300..=1_500);
            let bonus = scale(amount, rng.gen_range(0..=2_000));
            let new_amount = scale(amount, 10_000 + increase_bp);

            let mut raise = NewSalary::new(employee.id, new_amount, bonus, next_date);
            raise.salary_type = "annual".to_string();
            raise.notes = format!(
                "{:.1}% increase from previous salary",
                Decimal::new(increase_bp, 2)
            );
            db::insert_salary(&mut *conn, &raise).await?;

            amount = new_amount;
            effective_date = next_date;
            applied += 1;
            created += 1;
        }

        info!("Created {} salary records for {}", applied + 1, employee.name);
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_uses_basis_points() {
        let base = Decimal::from(100_000);
        assert_eq!(scale(base, 8_000).to_string(), "80000.00");
        assert_eq!(scale(base, 10_350).to_string(), "103500.00");
        assert_eq!(scale(Decimal::new(3333, 2), 5_000).to_string(), "16.67");
    }

    #[test]
    fn test_clock_times_follow_status() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let (clock_in, clock_out) = clock_times(&mut rng, AttendanceStatus::Late);
            let clock_in = clock_in.unwrap();
            assert!(clock_in >= NaiveTime::from_hms_opt(9, 0, 0).unwrap());
            assert!(clock_out.unwrap() >= NaiveTime::from_hms_opt(16, 0, 0).unwrap());

            assert_eq!(clock_times(&mut rng, AttendanceStatus::Absent), (None, None));
            let (half_in, half_out) = clock_times(&mut rng, AttendanceStatus::HalfDay);
            assert!(half_in.unwrap() < half_out.unwrap());
        }
    }

    #[test]
    fn test_attendance_start_bounds() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();

        assert_eq!(attendance_start(today, 30).unwrap(), NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
        assert_eq!(attendance_start(today, -5).unwrap(), today);
        assert!(matches!(attendance_start(today, i64::MAX), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_department_names_are_unique() {
        let names: HashSet<&str> = DEPARTMENT_NAMES.iter().copied().collect();
        assert_eq!(names.len(), DEPARTMENT_NAMES.len());
    }
}
