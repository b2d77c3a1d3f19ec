//! Appointment entity models.
//!
//! Appointments come in three variants — routine, emergency (112 dispatch)
//! and online — over a shared core of identity, patient, doctor, schedule
//! and status. As with patients, the enum is closed; callers branch on
//! [`AppointmentKind`] rather than downcasting.
//!
//! Status transitions are plain setters with no cross-field side effects,
//! except `reschedule`, which also resets the status to `scheduled`.
//! `is_active` is evaluated against the wall clock at every call and is
//! deliberately never cached.

pub mod emergency;
pub mod online;
pub mod routine;

pub use emergency::{CasualtyInfo, EmergencyAppointment};
pub use online::OnlineAppointment;
pub use routine::RoutineAppointment;

use ada_types::{AppointmentId, PatientId, PersonName};
use chrono::{DateTime, Utc};

use crate::error::HospitalError;

/// The lifecycle states of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// The stable label string for this status.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "in_progress" => Ok(AppointmentStatus::InProgress),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(HospitalError::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Identity, parties, schedule and status shared by every variant.
#[derive(Debug)]
pub struct AppointmentCore {
    id: AppointmentId,
    patient_id: PatientId,
    doctor: PersonName,
    scheduled_at: DateTime<Utc>,
    status: AppointmentStatus,
    created_at: DateTime<Utc>,
}

impl AppointmentCore {
    pub(crate) fn new(
        id: AppointmentId,
        patient_id: PatientId,
        doctor: PersonName,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            patient_id,
            doctor,
            scheduled_at,
            status: AppointmentStatus::Scheduled,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn doctor(&self) -> &PersonName {
        &self.doctor
    }

    pub fn scheduled_at(&self) -> DateTime<Utc> {
        self.scheduled_at
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn cancel(&mut self) {
        self.status = AppointmentStatus::Cancelled;
    }

    pub(crate) fn complete(&mut self) {
        self.status = AppointmentStatus::Completed;
    }

    pub(crate) fn start(&mut self) {
        self.status = AppointmentStatus::InProgress;
    }

    pub(crate) fn reschedule(&mut self, new_time: DateTime<Utc>) {
        self.scheduled_at = new_time;
        self.status = AppointmentStatus::Scheduled;
    }

    /// Whether the appointment is still scheduled and not yet in the past,
    /// judged against the wall clock at call time.
    pub fn is_active(&self) -> bool {
        self.status == AppointmentStatus::Scheduled && self.scheduled_at >= Utc::now()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }

    pub fn is_completed(&self) -> bool {
        self.status == AppointmentStatus::Completed
    }
}

/// Tag identifying an appointment's concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentKind {
    Routine,
    Emergency,
    Online,
}

impl std::fmt::Display for AppointmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentKind::Routine => write!(f, "routine"),
            AppointmentKind::Emergency => write!(f, "emergency"),
            AppointmentKind::Online => write!(f, "online"),
        }
    }
}

/// An appointment record, one of the three concrete variants.
#[derive(Debug)]
pub enum Appointment {
    Routine(RoutineAppointment),
    Emergency(EmergencyAppointment),
    Online(OnlineAppointment),
}

impl Appointment {
    pub fn kind(&self) -> AppointmentKind {
        match self {
            Appointment::Routine(_) => AppointmentKind::Routine,
            Appointment::Emergency(_) => AppointmentKind::Emergency,
            Appointment::Online(_) => AppointmentKind::Online,
        }
    }

    pub(crate) fn core(&self) -> &AppointmentCore {
        match self {
            Appointment::Routine(a) => a.core(),
            Appointment::Emergency(a) => a.core(),
            Appointment::Online(a) => a.core(),
        }
    }

    pub(crate) fn core_mut(&mut self) -> &mut AppointmentCore {
        match self {
            Appointment::Routine(a) => a.core_mut(),
            Appointment::Emergency(a) => a.core_mut(),
            Appointment::Online(a) => a.core_mut(),
        }
    }

    pub fn id(&self) -> AppointmentId {
        self.core().id()
    }

    pub fn patient_id(&self) -> PatientId {
        self.core().patient_id()
    }

    pub fn doctor(&self) -> &PersonName {
        self.core().doctor()
    }

    pub fn scheduled_at(&self) -> DateTime<Utc> {
        self.core().scheduled_at()
    }

    pub fn status(&self) -> AppointmentStatus {
        self.core().status()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.core().created_at()
    }

    pub fn is_active(&self) -> bool {
        self.core().is_active()
    }

    pub fn is_cancelled(&self) -> bool {
        self.core().is_cancelled()
    }

    pub fn cancel(&mut self) {
        self.core_mut().cancel();
    }

    pub fn complete(&mut self) {
        self.core_mut().complete();
    }

    pub fn start(&mut self) {
        self.core_mut().start();
    }

    /// Moves the appointment and resets its status to `scheduled`.
    pub fn reschedule(&mut self, new_time: DateTime<Utc>) {
        self.core_mut().reschedule(new_time);
    }

    /// Multi-line detail block for display.
    pub fn details(&self) -> String {
        match self {
            Appointment::Routine(a) => a.details(),
            Appointment::Emergency(a) => a.details(),
            Appointment::Online(a) => a.details(),
        }
    }

    /// One-line summary for listings.
    pub fn summary(&self) -> String {
        match self {
            Appointment::Routine(a) => a.summary(),
            Appointment::Emergency(a) => a.summary(),
            Appointment::Online(a) => a.summary(),
        }
    }
}

impl From<RoutineAppointment> for Appointment {
    fn from(value: RoutineAppointment) -> Self {
        Appointment::Routine(value)
    }
}

impl From<EmergencyAppointment> for Appointment {
    fn from(value: EmergencyAppointment) -> Self {
        Appointment::Emergency(value)
    }
}

impl From<OnlineAppointment> for Appointment {
    fn from(value: OnlineAppointment) -> Self {
        Appointment::Online(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::str::FromStr;

    fn core(at: DateTime<Utc>) -> AppointmentCore {
        AppointmentCore::new(
            AppointmentId::new(1).unwrap(),
            PatientId::new(2501).unwrap(),
            PersonName::new("deniz acar").unwrap(),
            at,
        )
    }

    #[test]
    fn test_new_appointment_starts_scheduled() {
        let core = core(Utc::now() + Duration::hours(2));
        assert_eq!(core.status(), AppointmentStatus::Scheduled);
        assert!(core.is_active());
    }

    #[test]
    fn test_past_appointment_is_not_active() {
        let core = core(Utc::now() - Duration::hours(1));
        assert!(!core.is_active());
    }

    #[test]
    fn test_reschedule_resets_cancelled_status() {
        let mut core = core(Utc::now() + Duration::hours(2));
        core.cancel();
        assert!(core.is_cancelled());

        let new_time = Utc::now() + Duration::days(1);
        core.reschedule(new_time);
        assert_eq!(core.status(), AppointmentStatus::Scheduled);
        assert_eq!(core.scheduled_at(), new_time);
    }

    #[test]
    fn test_status_labels_round_trip() {
        for status in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::InProgress,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ] {
            assert_eq!(
                AppointmentStatus::from_str(status.label()).expect("label parses"),
                status
            );
        }
    }
}
