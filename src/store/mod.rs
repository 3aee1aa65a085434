//! Record store contract shared by the registry, ledger and aggregator.
//!
//! Every mutating call is atomic with respect to other mutations: the
//! duplicate-check-then-insert of attendance and the employee cascade
//! delete never expose a half-applied state. Multi-row reads observe one
//! consistent snapshot taken when the call starts.

use std::future::Future;

use chrono::NaiveDate;
use derive_more::Display;

use crate::model::attendance::{AttendanceFilter, AttendanceRecord, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[display(fmt = "employee {} does not exist", _0)]
    EmployeeNotFound(String),
    #[display(fmt = "employee {} already exists", _0)]
    DuplicateEmployee(String),
    #[display(fmt = "attendance for {} on {} already exists", employee_id, date)]
    DuplicateAttendance {
        employee_id: String,
        date: NaiveDate,
    },
    #[display(fmt = "{}", _0)]
    Backend(String),
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

/// Employees plus the attendance rows of a single day, read together.
#[derive(Debug, Clone, Default)]
pub struct DaySnapshot {
    pub employees: Vec<Employee>,
    pub day_attendance: Vec<AttendanceRecord>,
    pub total_attendance_records: usize,
}

pub trait RecordStore: Clone + Send + Sync + 'static {
    /// Persists a new employee, `DuplicateEmployee` when the business key is taken.
    fn insert_employee(
        &self,
        employee: NewEmployee,
    ) -> impl Future<Output = StoreResult<Employee>> + Send;

    fn find_employee(
        &self,
        employee_id: &str,
    ) -> impl Future<Output = StoreResult<Option<Employee>>> + Send;

    /// All employees in insertion order.
    fn list_employees(&self) -> impl Future<Output = StoreResult<Vec<Employee>>> + Send;

    /// Removes the employee and every attendance row referencing it as one unit.
    /// Returns the number of attendance rows removed.
    fn delete_employee_cascade(
        &self,
        employee_id: &str,
    ) -> impl Future<Output = StoreResult<u64>> + Send;

    /// Inserts one attendance row. Fails with `EmployeeNotFound` when the
    /// employee is absent and `DuplicateAttendance` when the (employee, date)
    /// pair already has a row; neither case writes anything.
    fn insert_attendance(
        &self,
        attendance: NewAttendance,
    ) -> impl Future<Output = StoreResult<AttendanceRecord>> + Send;

    /// Matching rows in insertion order, each joined with the employee's name.
    fn list_attendance(
        &self,
        filter: &AttendanceFilter,
    ) -> impl Future<Output = StoreResult<Vec<AttendanceRecord>>> + Send;

    fn day_snapshot(&self, day: NaiveDate) -> impl Future<Output = StoreResult<DaySnapshot>> + Send;

    /// Cheap liveness probe of the backend.
    fn ping(&self) -> impl Future<Output = StoreResult<()>> + Send;
}
