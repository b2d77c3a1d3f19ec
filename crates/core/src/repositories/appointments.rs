//! In-memory appointment collection.
//!
//! Identifiers are caller-supplied (the shell hands out incident and
//! booking numbers) and must be unique. The conflict query treats a
//! cancelled appointment as a free slot.

use ada_types::{AppointmentId, PersonName};
use chrono::{DateTime, NaiveDate, Utc};

use crate::appointment::Appointment;
use crate::error::{HospitalError, HospitalResult};

/// Owns every appointment record in the system.
#[derive(Debug, Default)]
pub struct AppointmentRepository {
    appointments: Vec<Appointment>,
}

impl AppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an appointment.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::DuplicateAppointmentId` if a record with
    /// the same identity already exists; nothing is inserted.
    pub fn save(&mut self, appointment: Appointment) -> HospitalResult<AppointmentId> {
        let id = appointment.id();
        if self.find_by_id(id).is_some() {
            return Err(HospitalError::DuplicateAppointmentId(id));
        }
        self.appointments.push(appointment);
        Ok(id)
    }

    pub fn find_by_id(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: AppointmentId) -> Option<&mut Appointment> {
        self.appointments.iter_mut().find(|a| a.id() == id)
    }

    pub fn filter_by_date(&self, date: NaiveDate) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.scheduled_at().date_naive() == date)
            .collect()
    }

    pub fn filter_by_doctor(&self, doctor: &PersonName) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.doctor() == doctor)
            .collect()
    }

    /// Whether a non-cancelled appointment already holds the doctor's slot
    /// at exactly this time.
    pub fn has_time_conflict(&self, doctor: &PersonName, at: DateTime<Utc>) -> bool {
        self.appointments
            .iter()
            .any(|a| a.doctor() == doctor && a.scheduled_at() == at && !a.is_cancelled())
    }

    /// Deletes an appointment by identity.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::AppointmentNotFound` if no record matches.
    pub fn delete(&mut self, id: AppointmentId) -> HospitalResult<Appointment> {
        let index = self
            .appointments
            .iter()
            .position(|a| a.id() == id)
            .ok_or(HospitalError::AppointmentNotFound(id))?;
        Ok(self.appointments.remove(index))
    }

    pub fn list_all(&self) -> Vec<&Appointment> {
        self.appointments.iter().collect()
    }

    pub fn count(&self) -> usize {
        self.appointments.len()
    }
}
