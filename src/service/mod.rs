//! Core operations over a [`RecordStore`](crate::store::RecordStore).

pub mod ledger;
pub mod registry;
pub mod stats;

pub use ledger::AttendanceLedger;
pub use registry::EmployeeRegistry;
pub use stats::StatsAggregator;

use crate::store::RecordStore;

/// The three core components sharing one store, registered as actix app data.
#[derive(Clone)]
pub struct Services<S> {
    pub employees: EmployeeRegistry<S>,
    pub attendance: AttendanceLedger<S>,
    pub stats: StatsAggregator<S>,
    store: S,
}

impl<S: RecordStore> Services<S> {
    pub fn new(store: S) -> Self {
        Self {
            employees: EmployeeRegistry::new(store.clone()),
            attendance: AttendanceLedger::new(store.clone()),
            stats: StatsAggregator::new(store.clone()),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
