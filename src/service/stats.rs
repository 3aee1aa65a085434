use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::error::AppResult;
use crate::model::attendance::AttendanceStatus;
use crate::model::dashboard::DashboardStats;
use crate::store::{DaySnapshot, RecordStore};

#[derive(Clone)]
pub struct StatsAggregator<S> {
    store: S,
}

/// Pure aggregation over one snapshot; rows of other days are ignored.
pub fn aggregate(snapshot: &DaySnapshot, today: NaiveDate) -> DashboardStats {
    let (mut today_present, mut today_absent) = (0, 0);
    for record in snapshot.day_attendance.iter().filter(|r| r.date == today) {
        match record.status {
            AttendanceStatus::Present => today_present += 1,
            AttendanceStatus::Absent => today_absent += 1,
        }
    }

    let mut departments = BTreeMap::new();
    for employee in &snapshot.employees {
        *departments.entry(employee.department.clone()).or_insert(0) += 1;
    }

    DashboardStats {
        total_employees: snapshot.employees.len(),
        total_attendance_records: snapshot.total_attendance_records,
        today_present,
        today_absent,
        today_date: today,
        departments,
    }
}

impl<S: RecordStore> StatsAggregator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stats for the local calendar day, fixed once at call time.
    pub async fn compute_dashboard_stats(&self) -> AppResult<DashboardStats> {
        self.compute_dashboard_stats_on(Local::now().date_naive())
            .await
    }

    pub async fn compute_dashboard_stats_on(&self, today: NaiveDate) -> AppResult<DashboardStats> {
        let snapshot = self.store.day_snapshot(today).await?;
        let stats = aggregate(&snapshot, today);
        debug!(
            total_employees = stats.total_employees,
            today_present = stats.today_present,
            today_absent = stats.today_absent,
            "Computed dashboard stats"
        );
        Ok(stats)
    }
}
