//! In-memory record store.
//!
//! Both tables live behind a single `RwLock`, so a write (cascade delete,
//! duplicate check + insert) is one critical section and every read scans
//! a consistent view. Used by the test-suite and when no database is set.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use super::{DaySnapshot, RecordStore, StoreError, StoreResult};
use crate::model::attendance::{AttendanceFilter, AttendanceRecord, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};

#[derive(Debug, Default)]
struct Tables {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    next_employee_id: u64,
    next_attendance_id: u64,
}

impl Tables {
    fn employee(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.employee_id == employee_id)
    }

    fn names(&self) -> HashMap<&str, &str> {
        self.employees
            .iter()
            .map(|e| (e.employee_id.as_str(), e.full_name.as_str()))
            .collect()
    }

    fn joined<'a>(
        &'a self,
        rows: impl Iterator<Item = &'a AttendanceRecord>,
    ) -> Vec<AttendanceRecord> {
        let names = self.names();
        rows.map(|r| AttendanceRecord {
            employee_name: names.get(r.employee_id.as_str()).map(|n| n.to_string()),
            ..r.clone()
        })
        .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }
}

impl RecordStore for MemoryStore {
    async fn insert_employee(&self, employee: NewEmployee) -> StoreResult<Employee> {
        let mut tables = self.write()?;
        if tables.employee(&employee.employee_id).is_some() {
            return Err(StoreError::DuplicateEmployee(employee.employee_id));
        }
        tables.next_employee_id += 1;
        let created = employee.into_employee(tables.next_employee_id);
        tables.employees.push(created.clone());
        Ok(created)
    }

    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        Ok(self.read()?.employee(employee_id).cloned())
    }

    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.read()?.employees.clone())
    }

    async fn delete_employee_cascade(&self, employee_id: &str) -> StoreResult<u64> {
        let mut tables = self.write()?;
        let Some(pos) = tables
            .employees
            .iter()
            .position(|e| e.employee_id == employee_id)
        else {
            return Err(StoreError::EmployeeNotFound(employee_id.to_string()));
        };

        tables.employees.remove(pos);
        let before = tables.attendance.len();
        tables.attendance.retain(|r| r.employee_id != employee_id);
        Ok((before - tables.attendance.len()) as u64)
    }

    async fn insert_attendance(&self, attendance: NewAttendance) -> StoreResult<AttendanceRecord> {
        let mut tables = self.write()?;
        let Some(employee) = tables.employee(&attendance.employee_id) else {
            return Err(StoreError::EmployeeNotFound(attendance.employee_id));
        };
        let employee_name = employee.full_name.clone();

        let duplicate = tables
            .attendance
            .iter()
            .any(|r| r.employee_id == attendance.employee_id && r.date == attendance.date);
        if duplicate {
            return Err(StoreError::DuplicateAttendance {
                employee_id: attendance.employee_id,
                date: attendance.date,
            });
        }

        tables.next_attendance_id += 1;
        let id = tables.next_attendance_id;
        tables.attendance.push(attendance.clone().into_record(id, None));
        Ok(attendance.into_record(id, Some(employee_name)))
    }

    async fn list_attendance(&self, filter: &AttendanceFilter) -> StoreResult<Vec<AttendanceRecord>> {
        let tables = self.read()?;
        Ok(tables.joined(tables.attendance.iter().filter(|r| filter.matches(r))))
    }

    async fn day_snapshot(&self, day: NaiveDate) -> StoreResult<DaySnapshot> {
        let tables = self.read()?;
        Ok(DaySnapshot {
            employees: tables.employees.clone(),
            day_attendance: tables
                .attendance
                .iter()
                .filter(|r| r.date == day)
                .cloned()
                .collect(),
            total_attendance_records: tables.attendance.len(),
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        self.read().map(|_| ())
    }
}
