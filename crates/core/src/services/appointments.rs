//! Appointment business rules.
//!
//! The service wraps the repository with the booking-conflict check: a
//! doctor can hold at most one non-cancelled appointment per time slot,
//! checked on both creation and reschedule. Variant-specific rules
//! (ambulance dispatch, policlinic fees) live on the entities.

use ada_types::{AppointmentId, PersonName};
use chrono::{DateTime, NaiveDate, Utc};

use crate::appointment::Appointment;
use crate::error::{HospitalError, HospitalResult};
use crate::repositories::AppointmentRepository;

/// Service for booking, cancelling and querying appointments.
#[derive(Debug, Default)]
pub struct AppointmentService {
    repository: AppointmentRepository,
}

impl AppointmentService {
    pub fn new(repository: AppointmentRepository) -> Self {
        Self { repository }
    }

    /// Books an appointment after checking the doctor's slot.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::DoubleBooking` when the doctor already
    /// holds a non-cancelled appointment at the same time, or
    /// `HospitalError::DuplicateAppointmentId` on an identity collision.
    /// Nothing is stored on either failure.
    pub fn create_appointment(
        &mut self,
        appointment: Appointment,
    ) -> HospitalResult<AppointmentId> {
        let doctor = appointment.doctor().clone();
        let at = appointment.scheduled_at();
        if self.repository.has_time_conflict(&doctor, at) {
            return Err(HospitalError::DoubleBooking {
                doctor: doctor.to_string(),
                at,
            });
        }

        let kind = appointment.kind();
        let id = self.repository.save(appointment)?;
        tracing::info!(appointment = %id, %kind, %doctor, %at, "appointment booked");
        Ok(id)
    }

    /// Looks up an appointment by identity.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::AppointmentNotFound` on a miss.
    pub fn get_appointment(&self, id: AppointmentId) -> HospitalResult<&Appointment> {
        self.repository
            .find_by_id(id)
            .ok_or(HospitalError::AppointmentNotFound(id))
    }

    /// Cancels an appointment, freeing the doctor's slot.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::AppointmentNotFound` on a miss.
    pub fn cancel_appointment(&mut self, id: AppointmentId) -> HospitalResult<()> {
        let appointment = self
            .repository
            .find_by_id_mut(id)
            .ok_or(HospitalError::AppointmentNotFound(id))?;
        appointment.cancel();
        tracing::info!(appointment = %id, "appointment cancelled");
        Ok(())
    }

    /// Marks an appointment completed.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::AppointmentNotFound` on a miss.
    pub fn complete_appointment(&mut self, id: AppointmentId) -> HospitalResult<()> {
        let appointment = self
            .repository
            .find_by_id_mut(id)
            .ok_or(HospitalError::AppointmentNotFound(id))?;
        appointment.complete();
        tracing::info!(appointment = %id, "appointment completed");
        Ok(())
    }

    /// Moves an appointment to a new time, re-running the slot check
    /// against every other record for the same doctor.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::AppointmentNotFound` on a miss, or
    /// `HospitalError::DoubleBooking` when the target slot is taken. On
    /// either failure the appointment keeps its original time and status.
    pub fn reschedule_appointment(
        &mut self,
        id: AppointmentId,
        new_time: DateTime<Utc>,
    ) -> HospitalResult<()> {
        let doctor = self
            .repository
            .find_by_id(id)
            .ok_or(HospitalError::AppointmentNotFound(id))?
            .doctor()
            .clone();

        let slot_taken = self
            .repository
            .filter_by_doctor(&doctor)
            .into_iter()
            .any(|a| a.id() != id && a.scheduled_at() == new_time && !a.is_cancelled());
        if slot_taken {
            return Err(HospitalError::DoubleBooking {
                doctor: doctor.to_string(),
                at: new_time,
            });
        }

        self.repository
            .find_by_id_mut(id)
            .ok_or(HospitalError::AppointmentNotFound(id))?
            .reschedule(new_time);
        tracing::info!(appointment = %id, at = %new_time, "appointment rescheduled");
        Ok(())
    }

    pub fn list_by_doctor(&self, doctor: &PersonName) -> Vec<&Appointment> {
        self.repository.filter_by_doctor(doctor)
    }

    pub fn list_by_date(&self, date: NaiveDate) -> Vec<&Appointment> {
        self.repository.filter_by_date(date)
    }

    pub fn list_all(&self) -> Vec<&Appointment> {
        self.repository.list_all()
    }

    /// Appointments still scheduled and not yet in the past.
    pub fn list_active(&self) -> Vec<&Appointment> {
        self.repository
            .list_all()
            .into_iter()
            .filter(|a| a.is_active())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.repository.count()
    }
}
