//! Constants used throughout the hospital core crate.
//!
//! All fixed capacities, catalogs and ranges live here so the values are
//! consistent across the codebase and easy to audit.

/// Display name of the hospital.
pub const HOSPITAL_NAME: &str = "Ada Hospital";

/// Maximum number of concurrently admitted inpatients.
pub const WARD_CAPACITY: u32 = 16;

/// Total size of the ambulance fleet shared by all emergency appointments.
pub const AMBULANCE_FLEET_SIZE: u32 = 5;

/// The fixed ward room catalog, four rooms per floor.
pub const ROOM_CATALOG: [u32; 16] = [
    101, 102, 103, 104, 201, 202, 203, 204, 301, 302, 303, 304, 401, 402, 403, 404,
];

/// First identifier handed out by the patient repository.
pub const FIRST_PATIENT_ID: u32 = 2501;

/// Inclusive upper bound for the routine-appointment queue number draw.
pub const MAX_QUEUE_NUMBER: u32 = 50;

/// Default routine appointment duration in minutes.
pub const DEFAULT_ROUTINE_DURATION_MIN: i64 = 30;

/// Accepted routine appointment duration range in minutes.
pub const ROUTINE_DURATION_RANGE_MIN: std::ops::RangeInclusive<i64> = 10..=120;

/// Fixed duration of every online appointment, in minutes.
pub const ONLINE_DURATION_MIN: i64 = 20;

/// Base consultation fee for online appointments.
pub const ONLINE_BASE_FEE: u32 = 200;
