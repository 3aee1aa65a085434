use chrono::NaiveDate;
use tracing::{info, warn};

use crate::model::attendance::{AttendanceFilter, AttendanceRecord, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};
use crate::store::{DaySnapshot, MemoryStore, MySqlStore, RecordStore, StoreResult};

/// Backend picked at startup.
#[derive(Clone)]
pub enum Store {
    Memory(MemoryStore),
    MySql(MySqlStore),
}

impl Store {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Memory(_) => "memory",
            Store::MySql(_) => "mysql",
        }
    }
}

pub async fn init_store(database_url: Option<&str>) -> StoreResult<Store> {
    match database_url {
        Some(url) => {
            let store = MySqlStore::connect(url).await?;
            store.ensure_schema().await?;
            info!("Connected to MySQL record store");
            Ok(Store::MySql(store))
        }
        None => {
            warn!("DATABASE_URL not set, records are kept in memory and lost on restart");
            Ok(Store::Memory(MemoryStore::new()))
        }
    }
}

impl RecordStore for Store {
    async fn insert_employee(&self, employee: NewEmployee) -> StoreResult<Employee> {
        match self {
            Store::Memory(s) => s.insert_employee(employee).await,
            Store::MySql(s) => s.insert_employee(employee).await,
        }
    }

    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        match self {
            Store::Memory(s) => s.find_employee(employee_id).await,
            Store::MySql(s) => s.find_employee(employee_id).await,
        }
    }

    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        match self {
            Store::Memory(s) => s.list_employees().await,
            Store::MySql(s) => s.list_employees().await,
        }
    }

    async fn delete_employee_cascade(&self, employee_id: &str) -> StoreResult<u64> {
        match self {
            Store::Memory(s) => s.delete_employee_cascade(employee_id).await,
            Store::MySql(s) => s.delete_employee_cascade(employee_id).await,
        }
    }

    async fn insert_attendance(&self, attendance: NewAttendance) -> StoreResult<AttendanceRecord> {
        match self {
            Store::Memory(s) => s.insert_attendance(attendance).await,
            Store::MySql(s) => s.insert_attendance(attendance).await,
        }
    }

    async fn list_attendance(&self, filter: &AttendanceFilter) -> StoreResult<Vec<AttendanceRecord>> {
        match self {
            Store::Memory(s) => s.list_attendance(filter).await,
            Store::MySql(s) => s.list_attendance(filter).await,
        }
    }

    async fn day_snapshot(&self, day: NaiveDate) -> StoreResult<DaySnapshot> {
        match self {
            Store::Memory(s) => s.day_snapshot(day).await,
            Store::MySql(s) => s.day_snapshot(day).await,
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        match self {
            Store::Memory(s) => s.ping().await,
            Store::MySql(s) => s.ping().await,
        }
    }
}
