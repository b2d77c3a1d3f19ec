//! Shared capacity pools.
//!
//! Two process-wide bounded resources exist in the system: the inpatient
//! ward (a counter of admitted patients against a fixed maximum) and the
//! ambulance fleet (a pool that emergency appointments dispatch from).
//! Both are explicit values handed to the entities that draw from them,
//! never globals, so several independent hospitals can coexist in one
//! process and tests get a fresh pool each time.
//!
//! Handles are cheap clones of the same underlying pool. All mutation goes
//! through `admit`/`release` and `dispatch`, which keep the two core
//! invariants: a release happens at most once per admission, and a dispatch
//! either takes the full requested count or takes nothing.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{HospitalError, HospitalResult};

/// Counter of currently admitted inpatients, bounded by the ward maximum.
///
/// Every `Inpatient` holds a clone of the capacity it was admitted against
/// and releases its slot exactly once on discharge.
#[derive(Clone, Debug)]
pub struct WardCapacity {
    admitted: Arc<Mutex<u32>>,
    max: u32,
}

impl WardCapacity {
    /// Creates an empty ward with the given maximum.
    pub fn new(max: u32) -> Self {
        Self {
            admitted: Arc::new(Mutex::new(0)),
            max,
        }
    }

    fn lock(&self) -> MutexGuard<'_, u32> {
        // A poisoned lock means a panic mid-increment; the counter itself
        // is a plain u32 and still consistent, so keep going.
        self.admitted.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Claims one admission slot.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::WardCapacityFull` when the ward is at its
    /// maximum, leaving the counter untouched.
    pub fn admit(&self) -> HospitalResult<()> {
        let mut admitted = self.lock();
        if *admitted >= self.max {
            return Err(HospitalError::WardCapacityFull {
                admitted: *admitted,
                max: self.max,
            });
        }
        *admitted += 1;
        Ok(())
    }

    /// Returns one admission slot to the pool. Saturates at zero.
    pub fn release(&self) {
        let mut admitted = self.lock();
        *admitted = admitted.saturating_sub(1);
    }

    /// Number of currently admitted inpatients.
    pub fn admitted(&self) -> u32 {
        *self.lock()
    }

    /// The ward maximum.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Human-readable occupancy summary, e.g. `"3/16 beds occupied"`.
    pub fn occupancy_info(&self) -> String {
        format!("{}/{} beds occupied", self.admitted(), self.max)
    }
}

/// The shared ambulance pool drawn on by all emergency appointments.
#[derive(Clone, Debug)]
pub struct AmbulanceFleet {
    remaining: Arc<Mutex<u32>>,
    total: u32,
}

impl AmbulanceFleet {
    /// Creates a fleet with all ambulances available.
    pub fn new(total: u32) -> Self {
        Self {
            remaining: Arc::new(Mutex::new(total)),
            total,
        }
    }

    fn lock(&self) -> MutexGuard<'_, u32> {
        self.remaining.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Takes `count` ambulances from the pool, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::AmbulanceShortage` when fewer than `count`
    /// ambulances remain; the pool is left unchanged so the caller can
    /// retry with a smaller request.
    pub fn dispatch(&self, count: u32) -> HospitalResult<()> {
        let mut remaining = self.lock();
        if count > *remaining {
            return Err(HospitalError::AmbulanceShortage {
                requested: count,
                remaining: *remaining,
            });
        }
        *remaining -= count;
        Ok(())
    }

    /// Returns `count` ambulances to the pool, capped at the fleet total.
    pub fn return_ambulances(&self, count: u32) {
        let mut remaining = self.lock();
        *remaining = (*remaining + count).min(self.total);
    }

    /// Number of ambulances currently available.
    pub fn remaining(&self) -> u32 {
        *self.lock()
    }

    /// Total fleet size.
    pub fn total(&self) -> u32 {
        self.total
    }
}
