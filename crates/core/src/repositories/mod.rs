//! In-memory repositories.
//!
//! Each repository owns its entity collection for the process lifetime:
//! identity lookup, duplicate rejection, filtering and — for patients —
//! id generation and room allocation. Nothing is persisted; state lives
//! only in memory.

pub mod appointments;
pub mod patients;

pub use appointments::AppointmentRepository;
pub use patients::PatientRepository;
