//! # Ada Core
//!
//! Core business logic for the Ada Hospital management system.
//!
//! This crate contains the in-memory domain model and its rules:
//! - Patient variants (inpatient, outpatient, emergency) over a shared core
//! - Appointment variants (routine, emergency dispatch, online) with booking rules
//! - Shared capacity pools for ward beds and the ambulance fleet
//! - Repositories for identity lookup and services for cross-entity operations
//!
//! **No outer surfaces**: persistence, HTTP/CLI frontends and authentication
//! belong in a shell built on top of this crate. State lives only for the
//! process lifetime.

pub mod appointment;
pub mod capacity;
pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
pub mod repositories;
pub mod services;

pub use capacity::{AmbulanceFleet, WardCapacity};
pub use config::HospitalConfig;
pub use error::{HospitalError, HospitalResult};

pub use appointment::{
    Appointment, AppointmentKind, AppointmentStatus, EmergencyAppointment, OnlineAppointment,
    RoutineAppointment,
};
pub use patient::{
    EmergencyLevel, EmergencyPatient, Inpatient, Outpatient, Patient, PatientKind, PatientStatus,
    TriageArea,
};
pub use repositories::{AppointmentRepository, PatientRepository};
pub use services::{AppointmentService, PatientService};
