//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the
//! service layer, so no operation reads ambient process state while
//! handling a request. The defaults reproduce the hospital's fixed
//! capacities; tests construct smaller configurations to exercise the
//! capacity edge cases without registering sixteen patients first.

use ada_types::RoomNumber;

use crate::capacity::{AmbulanceFleet, WardCapacity};
use crate::constants::{AMBULANCE_FLEET_SIZE, FIRST_PATIENT_ID, ROOM_CATALOG, WARD_CAPACITY};
use crate::error::{HospitalError, HospitalResult};

/// Hospital configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct HospitalConfig {
    ward_capacity: u32,
    ambulance_fleet_size: u32,
    rooms: Vec<RoomNumber>,
    first_patient_id: u32,
}

impl HospitalConfig {
    /// Creates a new `HospitalConfig`.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidInput` if the room catalog is empty,
    /// contains duplicates, or either capacity is zero.
    pub fn new(
        ward_capacity: u32,
        ambulance_fleet_size: u32,
        rooms: Vec<RoomNumber>,
        first_patient_id: u32,
    ) -> HospitalResult<Self> {
        if ward_capacity == 0 {
            return Err(HospitalError::InvalidInput(
                "ward capacity must be at least 1".into(),
            ));
        }
        if ambulance_fleet_size == 0 {
            return Err(HospitalError::InvalidInput(
                "ambulance fleet must have at least one vehicle".into(),
            ));
        }
        if rooms.is_empty() {
            return Err(HospitalError::InvalidInput(
                "room catalog cannot be empty".into(),
            ));
        }

        let mut sorted = rooms.clone();
        sorted.sort();
        sorted.dedup();
        if sorted.len() != rooms.len() {
            return Err(HospitalError::InvalidInput(
                "room catalog contains duplicate rooms".into(),
            ));
        }

        Ok(Self {
            ward_capacity,
            ambulance_fleet_size,
            rooms: sorted,
            first_patient_id,
        })
    }

    /// Builds a fresh ward capacity pool for this configuration.
    pub fn ward_capacity(&self) -> WardCapacity {
        WardCapacity::new(self.ward_capacity)
    }

    /// Builds a fresh ambulance fleet for this configuration.
    pub fn ambulance_fleet(&self) -> AmbulanceFleet {
        AmbulanceFleet::new(self.ambulance_fleet_size)
    }

    /// The room catalog, sorted ascending.
    pub fn rooms(&self) -> &[RoomNumber] {
        &self.rooms
    }

    pub fn first_patient_id(&self) -> u32 {
        self.first_patient_id
    }
}

impl Default for HospitalConfig {
    fn default() -> Self {
        let rooms = ROOM_CATALOG
            .iter()
            .map(|&n| RoomNumber::new(n).expect("room catalog constants are positive"))
            .collect();

        Self {
            ward_capacity: WARD_CAPACITY,
            ambulance_fleet_size: AMBULANCE_FLEET_SIZE,
            rooms,
            first_patient_id: FIRST_PATIENT_ID,
        }
    }
}
