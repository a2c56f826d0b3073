//! Read-side analytics
//!
//! `resolver` picks the current/initial row per employee, `aggregate` holds
//! the zero-safe grouping primitives, `engine` computes each metric over
//! loaded rows and `service` wires the engine to the record store.

pub mod aggregate;
pub mod engine;
pub mod resolver;
pub mod service;

pub use engine::{
    AttendanceAnalytics, DepartmentAnalytics, DepartmentPerformance, DepartmentSalaries,
    PerformanceTrend, RatingCount, SalaryGrowth, SalaryStats, StatusCount,
};
