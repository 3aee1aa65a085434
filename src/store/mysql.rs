use std::str::FromStr;

use chrono::NaiveDate;
use futures_util::TryStreamExt;
use sqlx::{MySqlPool, prelude::FromRow};
use tracing::{debug, error, info};

use super::{DaySnapshot, RecordStore, StoreError, StoreResult};
use crate::model::attendance::{
    AttendanceFilter, AttendanceRecord, AttendanceStatus, NewAttendance,
};
use crate::model::employee::{Employee, NewEmployee};

const CREATE_EMPLOYEES: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    employee_id VARCHAR(64) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
    full_name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    department VARCHAR(128) NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE KEY uq_employees_employee_id (employee_id)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

const CREATE_ATTENDANCE: &str = r#"
CREATE TABLE IF NOT EXISTS attendance (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    employee_id VARCHAR(64) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
    date DATE NOT NULL,
    status ENUM('Present', 'Absent') NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE KEY uq_attendance_employee_date (employee_id, date),
    KEY idx_attendance_date (date),
    CONSTRAINT fk_attendance_employee FOREIGN KEY (employee_id)
        REFERENCES employees (employee_id) ON DELETE CASCADE
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

const SELECT_ATTENDANCE: &str = r#"
SELECT a.id, a.employee_id, a.date, a.status, e.full_name AS employee_name
FROM attendance a
LEFT JOIN employees e ON e.employee_id = a.employee_id
"#;

#[derive(FromRow)]
struct AttendanceRow {
    id: u64,
    employee_id: String,
    date: NaiveDate,
    status: String,
    employee_name: Option<String>,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = AttendanceStatus::from_str(&row.status).map_err(|_| {
            StoreError::Backend(format!(
                "attendance row {} has unknown status {:?}",
                row.id, row.status
            ))
        })?;
        Ok(AttendanceRecord {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            status,
            employee_name: row.employee_name,
        })
    }
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    Str(&'a str),
    Date(NaiveDate),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        error!(error = %e, "MySQL store failure");
        StoreError::Backend(e.to_string())
    }
}

/// MySQL reports both unique and foreign key violations as SQLSTATE 23000.
fn is_integrity_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23000"))
}

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = MySqlPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Creates both tables when missing.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_EMPLOYEES).execute(&self.pool).await?;
        sqlx::query(CREATE_ATTENDANCE).execute(&self.pool).await?;
        info!("MySQL schema ready");
        Ok(())
    }
}

impl RecordStore for MySqlStore {
    async fn insert_employee(&self, employee: NewEmployee) -> StoreResult<Employee> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (employee_id, full_name, email, department)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) => Ok(employee.into_employee(res.last_insert_id())),
            Err(e) if is_integrity_violation(&e) => {
                Err(StoreError::DuplicateEmployee(employee.employee_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_id, full_name, email, department
            FROM employees
            WHERE employee_id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT id, employee_id, full_name, email, department FROM employees ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    async fn delete_employee_cascade(&self, employee_id: &str) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Err(StoreError::EmployeeNotFound(employee_id.to_string()));
        }

        tx.commit().await?;
        Ok(removed)
    }

    async fn insert_attendance(&self, attendance: NewAttendance) -> StoreResult<AttendanceRecord> {
        let mut tx = self.pool.begin().await?;

        // shared lock keeps a concurrent cascade delete out until commit
        let employee_name = sqlx::query_scalar::<_, String>(
            "SELECT full_name FROM employees WHERE employee_id = ? LOCK IN SHARE MODE",
        )
        .bind(&attendance.employee_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(employee_name) = employee_name else {
            tx.rollback().await?;
            return Err(StoreError::EmployeeNotFound(attendance.employee_id));
        };

        let result = sqlx::query("INSERT INTO attendance (employee_id, date, status) VALUES (?, ?, ?)")
            .bind(&attendance.employee_id)
            .bind(attendance.date)
            .bind(attendance.status.as_ref())
            .execute(&mut *tx)
            .await;

        match result {
            Ok(res) => {
                tx.commit().await?;
                Ok(attendance.into_record(res.last_insert_id(), Some(employee_name)))
            }
            Err(e) if is_integrity_violation(&e) => {
                tx.rollback().await?;
                Err(StoreError::DuplicateAttendance {
                    employee_id: attendance.employee_id,
                    date: attendance.date,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_attendance(&self, filter: &AttendanceFilter) -> StoreResult<Vec<AttendanceRecord>> {
        let mut conditions = Vec::new();
        let mut bindings = Vec::new();

        if let Some(employee_id) = filter.employee_id.as_deref() {
            conditions.push("a.employee_id = ?");
            bindings.push(FilterValue::Str(employee_id));
        }
        if let Some(date) = filter.date {
            conditions.push("a.date = ?");
            bindings.push(FilterValue::Date(date));
        }

        let where_clause = if conditions.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!("{} {} ORDER BY a.id", SELECT_ATTENDANCE, where_clause);
        debug!(sql = %sql, ?filter, "Fetching attendance");

        let mut query = sqlx::query_as::<_, AttendanceRow>(&sql);
        for value in bindings {
            query = match value {
                FilterValue::Str(v) => query.bind(v),
                FilterValue::Date(v) => query.bind(v),
            };
        }

        let records: Vec<AttendanceRecord> = query
            .fetch(&self.pool)
            .map_err(StoreError::from)
            .and_then(|row| async move { AttendanceRecord::try_from(row) })
            .try_collect()
            .await?;
        Ok(records)
    }

    async fn day_snapshot(&self, day: NaiveDate) -> StoreResult<DaySnapshot> {
        let mut tx = self.pool.begin().await?;

        let employees = sqlx::query_as::<_, Employee>(
            "SELECT id, employee_id, full_name, email, department FROM employees ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;

        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "{} WHERE a.date = ? ORDER BY a.id",
            SELECT_ATTENDANCE
        ))
        .bind(day)
        .fetch_all(&mut *tx)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(DaySnapshot {
            employees,
            day_attendance: rows
                .into_iter()
                .map(AttendanceRecord::try_from)
                .collect::<StoreResult<_>>()?,
            total_attendance_records: usize::try_from(total).unwrap_or_default(),
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
