//! Business-rule services.
//!
//! Services coordinate repository operations that span more than one
//! entity or resource (room allocation, the emergency-to-inpatient
//! conversion, booking conflict checks). Every failing path returns
//! before any mutation, so no operation leaves partial state behind.

pub mod appointments;
pub mod patients;

pub use appointments::AppointmentService;
pub use patients::PatientService;
