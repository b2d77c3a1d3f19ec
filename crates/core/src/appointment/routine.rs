//! Routine (walk-in clinic) appointments.
//!
//! A routine appointment binds a room, a bounded duration and a queue
//! number drawn once at construction. The random source is injected so
//! tests can pass a seeded generator; the queue number is never redrawn.

use ada_types::{AppointmentId, PatientId, PersonName, RoomNumber};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::appointment::AppointmentCore;
use crate::constants::{DEFAULT_ROUTINE_DURATION_MIN, MAX_QUEUE_NUMBER, ROUTINE_DURATION_RANGE_MIN};
use crate::error::{HospitalError, HospitalResult};
use crate::patient::TriageArea;

/// A scheduled in-person visit.
#[derive(Debug)]
pub struct RoutineAppointment {
    core: AppointmentCore,
    room: RoomNumber,
    duration_min: i64,
    triage_hint: Option<TriageArea>,
    note: Option<String>,
    queue_number: u32,
}

impl RoutineAppointment {
    /// Creates a new routine appointment.
    ///
    /// `duration_min` defaults to 30 minutes when absent. The queue number
    /// is drawn uniformly from 0-50 using `rng`.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidInput` if the duration is outside
    /// the 10-120 minute range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AppointmentId,
        patient_id: PatientId,
        doctor: PersonName,
        scheduled_at: DateTime<Utc>,
        room: RoomNumber,
        duration_min: Option<i64>,
        triage_hint: Option<TriageArea>,
        rng: &mut impl Rng,
    ) -> HospitalResult<Self> {
        let duration_min = duration_min.unwrap_or(DEFAULT_ROUTINE_DURATION_MIN);
        validate_duration(duration_min)?;

        Ok(Self {
            core: AppointmentCore::new(id, patient_id, doctor, scheduled_at),
            room,
            duration_min,
            triage_hint,
            note: None,
            queue_number: rng.gen_range(0..=MAX_QUEUE_NUMBER),
        })
    }

    pub(crate) fn core(&self) -> &AppointmentCore {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut AppointmentCore {
        &mut self.core
    }

    pub fn room(&self) -> RoomNumber {
        self.room
    }

    pub fn duration_min(&self) -> i64 {
        self.duration_min
    }

    /// Triage-area hint carried over from the patient module, if any.
    pub fn triage_hint(&self) -> Option<TriageArea> {
        self.triage_hint
    }

    /// The queue number drawn at construction.
    pub fn queue_number(&self) -> u32 {
        self.queue_number
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Attaches a free-text note, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidInput` if the note is blank.
    pub fn add_note(&mut self, note: &str) -> HospitalResult<()> {
        if note.trim().is_empty() {
            return Err(HospitalError::InvalidInput("note cannot be empty".into()));
        }
        self.note = Some(note.trim().to_string());
        Ok(())
    }

    /// Changes the duration, keeping it within the accepted range.
    pub fn update_duration(&mut self, duration_min: i64) -> HospitalResult<()> {
        validate_duration(duration_min)?;
        self.duration_min = duration_min;
        Ok(())
    }

    /// When the appointment ends.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.core.scheduled_at() + Duration::minutes(self.duration_min)
    }

    /// Whether the appointment falls on today's date.
    pub fn is_today(&self) -> bool {
        self.core.scheduled_at().date_naive() == Utc::now().date_naive()
    }

    /// Whether the scheduled time has already passed.
    pub fn is_past(&self) -> bool {
        self.core.scheduled_at() < Utc::now()
    }

    pub fn details(&self) -> String {
        let area = match self.triage_hint {
            Some(area) => area.to_string(),
            None => "unspecified".to_string(),
        };
        format!(
            "ROUTINE APPOINTMENT\nAppointment : {}\nDoctor      : {}\nRoom        : {}\nTime        : {}\nQueue no    : {}\nDuration    : {} min\nArea        : {}\nStatus      : {}",
            self.core.id(),
            self.core.doctor(),
            self.room,
            self.core.scheduled_at().format("%d.%m.%Y %H:%M"),
            self.queue_number,
            self.duration_min,
            area,
            self.core.status(),
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "[ROUTINE] {} | Dr. {} | Room {}",
            self.core.scheduled_at().format("%d.%m.%Y %H:%M"),
            self.core.doctor(),
            self.room
        )
    }
}

fn validate_duration(duration_min: i64) -> HospitalResult<()> {
    if !ROUTINE_DURATION_RANGE_MIN.contains(&duration_min) {
        return Err(HospitalError::InvalidInput(format!(
            "appointment duration must be between {} and {} minutes, got {}",
            ROUTINE_DURATION_RANGE_MIN.start(),
            ROUTINE_DURATION_RANGE_MIN.end(),
            duration_min
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn routine(duration: Option<i64>, rng: &mut StdRng) -> HospitalResult<RoutineAppointment> {
        RoutineAppointment::new(
            AppointmentId::new(10).unwrap(),
            PatientId::new(2501).unwrap(),
            PersonName::new("deniz acar").unwrap(),
            Utc::now() + Duration::hours(3),
            RoomNumber::new(101).unwrap(),
            duration,
            None,
            rng,
        )
    }

    #[test]
    fn test_queue_number_is_deterministic_with_seeded_rng() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);

        let a = routine(None, &mut rng_a).expect("valid appointment");
        let b = routine(None, &mut rng_b).expect("valid appointment");

        assert_eq!(a.queue_number(), b.queue_number());
        assert!(a.queue_number() <= MAX_QUEUE_NUMBER);
    }

    #[test]
    fn test_duration_defaults_and_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let appointment = routine(None, &mut rng).expect("valid appointment");
        assert_eq!(appointment.duration_min(), 30);

        assert!(routine(Some(9), &mut rng).is_err());
        assert!(routine(Some(121), &mut rng).is_err());
        assert!(routine(Some(120), &mut rng).is_ok());
    }

    #[test]
    fn test_end_time_follows_duration() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut appointment = routine(Some(45), &mut rng).expect("valid appointment");
        assert_eq!(
            appointment.end_time() - appointment.core().scheduled_at(),
            Duration::minutes(45)
        );

        appointment.update_duration(60).expect("valid duration");
        assert_eq!(
            appointment.end_time() - appointment.core().scheduled_at(),
            Duration::minutes(60)
        );
    }

    #[test]
    fn test_note_must_not_be_blank() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut appointment = routine(None, &mut rng).expect("valid appointment");

        assert!(appointment.add_note("   ").is_err());
        appointment.add_note(" bring referral letter ").unwrap();
        assert_eq!(appointment.note(), Some("bring referral letter"));
    }
}
