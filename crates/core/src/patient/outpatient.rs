//! Outpatients with scheduled visit dates.
//!
//! An outpatient carries at most one active appointment date. When the
//! record is cancelled or completed the active date moves into an
//! append-only appointment history, so the migration runs once per date
//! even if the transition is repeated.

use ada_types::{Age, Gender, PatientId, PersonName};
use chrono::NaiveDate;

use crate::error::{HospitalError, HospitalResult};
use crate::patient::{PatientCore, PatientStatus};

/// Priority score for outpatients (lowest tier).
const OUTPATIENT_PRIORITY: u32 = 20;

/// A patient seen without admission.
#[derive(Debug)]
pub struct Outpatient {
    core: PatientCore,
    appointment_date: Option<NaiveDate>,
    appointment_history: Vec<NaiveDate>,
}

impl Outpatient {
    /// Creates a new outpatient.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidDate` if `appointment_date` is set
    /// but not a valid `YYYY-MM-DD` date, or `HospitalError::InvalidStatus`
    /// if `status` is not recognised.
    pub fn new(
        id: Option<PatientId>,
        name: PersonName,
        age: Age,
        gender: Gender,
        appointment_date: Option<&str>,
        status: PatientStatus,
    ) -> HospitalResult<Self> {
        let appointment_date = appointment_date.map(parse_iso_date).transpose()?;
        let core = PatientCore::new(id, name, age, gender, status, &PatientStatus::ALL)?;

        Ok(Self {
            core,
            appointment_date,
            appointment_history: Vec::new(),
        })
    }

    pub(crate) fn core(&self) -> &PatientCore {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut PatientCore {
        &mut self.core
    }

    /// The active appointment date, if any.
    pub fn appointment_date(&self) -> Option<NaiveDate> {
        self.appointment_date
    }

    /// Replaces the active appointment date.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidDate` if `date` is not `YYYY-MM-DD`.
    pub fn set_appointment_date(&mut self, date: &str) -> HospitalResult<()> {
        self.appointment_date = Some(parse_iso_date(date)?);
        Ok(())
    }

    pub fn has_appointment(&self) -> bool {
        self.appointment_date.is_some()
    }

    /// Past appointment dates, oldest first.
    pub fn appointment_history(&self) -> &[NaiveDate] {
        &self.appointment_history
    }

    pub fn priority(&self) -> u32 {
        OUTPATIENT_PRIORITY
    }

    /// Applies a status transition.
    ///
    /// Cancelling or completing moves the active appointment date into the
    /// history before the transition is recorded.
    pub fn update_status(&mut self, status: PatientStatus) -> HospitalResult<()> {
        PatientCore::ensure_allowed(status, &PatientStatus::ALL)?;

        if matches!(status, PatientStatus::Cancelled | PatientStatus::Completed) {
            if let Some(date) = self.appointment_date.take() {
                self.appointment_history.push(date);
            }
        }

        self.core.record_status(status);
        Ok(())
    }

    pub fn detailed_info(&self) -> String {
        let date = match self.appointment_date {
            Some(date) => date.to_string(),
            None => "none".to_string(),
        };
        format!("{}\nVisit date : {}", self.core.detailed_info(), date)
    }
}

fn parse_iso_date(value: &str) -> HospitalResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| HospitalError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outpatient(date: Option<&str>) -> Outpatient {
        Outpatient::new(
            None,
            PersonName::new("day patient").unwrap(),
            Age::new(33).unwrap(),
            Gender::Male,
            date,
            PatientStatus::Active,
        )
        .expect("valid outpatient")
    }

    #[test]
    fn test_rejects_malformed_appointment_date() {
        let result = Outpatient::new(
            None,
            PersonName::new("day patient").unwrap(),
            Age::new(33).unwrap(),
            Gender::Male,
            Some("01/02/2025"),
            PatientStatus::Active,
        );
        assert!(matches!(result, Err(HospitalError::InvalidDate(_))));
    }

    #[test]
    fn test_completion_moves_date_into_history_once() {
        let mut patient = outpatient(Some("2025-03-14"));
        assert!(patient.has_appointment());

        patient.update_status(PatientStatus::Completed).unwrap();
        assert!(!patient.has_appointment());
        assert_eq!(patient.appointment_history().len(), 1);

        // Completing again with no active date leaves the history alone.
        patient.update_status(PatientStatus::Completed).unwrap();
        assert_eq!(patient.appointment_history().len(), 1);
    }

    #[test]
    fn test_cancel_then_rebook_accumulates_history() {
        let mut patient = outpatient(Some("2025-03-14"));
        patient.update_status(PatientStatus::Cancelled).unwrap();

        patient.set_appointment_date("2025-04-01").unwrap();
        patient.update_status(PatientStatus::Completed).unwrap();

        let history: Vec<String> = patient
            .appointment_history()
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(history, vec!["2025-03-14", "2025-04-01"]);
    }

    #[test]
    fn test_non_terminal_transitions_keep_active_date() {
        let mut patient = outpatient(Some("2025-05-20"));
        patient.update_status(PatientStatus::Stable).unwrap();
        assert!(patient.has_appointment());
    }
}
