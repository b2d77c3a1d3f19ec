//! Error types for the hospital core.
//!
//! One error enum covers the whole crate so service callers only handle a
//! single type. Variants fall into four classes: field validation,
//! identity-lookup misses, conflicts (duplicate ids, double-booking), and
//! capacity exhaustion. Every error is raised before any mutation, so a
//! failed operation never leaves an entity or repository half-updated.

use ada_types::{AppointmentId, PatientId, ValueError};
use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum HospitalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    InvalidValue(#[from] ValueError),
    #[error("invalid appointment date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid status for this patient type: {0}")]
    InvalidStatus(String),
    #[error("unknown status label: {0}")]
    UnknownStatus(String),

    #[error("patient not found: {0}")]
    PatientNotFound(PatientId),
    #[error("patient {0} is not an emergency patient")]
    NotAnEmergencyPatient(PatientId),
    #[error("appointment not found: {0}")]
    AppointmentNotFound(AppointmentId),

    #[error("a patient with id {0} already exists")]
    DuplicatePatientId(PatientId),
    #[error("an appointment with id {0} already exists")]
    DuplicateAppointmentId(AppointmentId),
    #[error("doctor {doctor} already has an appointment at {at}")]
    DoubleBooking {
        doctor: String,
        at: DateTime<Utc>,
    },

    #[error("inpatient capacity is full ({admitted}/{max})")]
    WardCapacityFull { admitted: u32, max: u32 },
    #[error("no free room available")]
    NoFreeRoom,
    #[error("not enough ambulances: requested {requested}, remaining {remaining}")]
    AmbulanceShortage { requested: u32, remaining: u32 },
}

pub type HospitalResult<T> = std::result::Result<T, HospitalError>;
