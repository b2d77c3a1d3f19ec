//! Online (video consultation) appointments.
//!
//! Online bookings pair a poliklinik with one of its listed doctors and
//! run for a fixed twenty minutes. The two booking conflict rules —
//! doctor slot taken, and one online appointment per patient per day —
//! are pure predicates over an appointment list; callers run them before
//! construction and abort on a hit, the entity itself does not enforce
//! them.

use ada_types::{AppointmentId, PatientId, PersonName};
use chrono::{DateTime, Duration, Utc};

use crate::appointment::{Appointment, AppointmentCore};
use crate::constants::{ONLINE_BASE_FEE, ONLINE_DURATION_MIN};
use crate::error::{HospitalError, HospitalResult};

/// The fixed poliklinik catalog: name, listed doctors, and the fee
/// surcharge on top of the base consultation fee.
const POLICLINICS: [(&str, &[&str], u32); 4] = [
    ("Cardiology", &["Deniz Acar", "Elif Kaya"], 150),
    ("Neurology", &["Kerem Olmez"], 120),
    ("Dermatology", &["Mert Aydin", "Zeynep Koc"], 80),
    ("Pediatrics", &["Selin Arslan", "Baran Tekin"], 50),
];

/// A fixed-duration video consultation.
#[derive(Debug)]
pub struct OnlineAppointment {
    core: AppointmentCore,
    poliklinik: &'static str,
    fee_surcharge: u32,
}

impl OnlineAppointment {
    /// Creates a new online appointment.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidInput` if the poliklinik is not in
    /// the catalog or the doctor is not listed under it.
    pub fn new(
        id: AppointmentId,
        patient_id: PatientId,
        doctor: PersonName,
        scheduled_at: DateTime<Utc>,
        poliklinik: &str,
    ) -> HospitalResult<Self> {
        let (name, doctors, surcharge) = POLICLINICS
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(poliklinik.trim()))
            .ok_or_else(|| {
                HospitalError::InvalidInput(format!("unknown poliklinik: {poliklinik}"))
            })?;

        if !doctors.iter().any(|d| *d == doctor.as_str()) {
            return Err(HospitalError::InvalidInput(format!(
                "doctor {doctor} is not listed under {name}"
            )));
        }

        Ok(Self {
            core: AppointmentCore::new(id, patient_id, doctor, scheduled_at),
            poliklinik: name,
            fee_surcharge: *surcharge,
        })
    }

    pub(crate) fn core(&self) -> &AppointmentCore {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut AppointmentCore {
        &mut self.core
    }

    pub fn poliklinik(&self) -> &'static str {
        self.poliklinik
    }

    /// Fixed consultation length in minutes.
    pub fn duration_min(&self) -> i64 {
        ONLINE_DURATION_MIN
    }

    /// When the consultation ends.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.core.scheduled_at() + Duration::minutes(ONLINE_DURATION_MIN)
    }

    /// Base fee plus the poliklinik surcharge.
    pub fn consultation_fee(&self) -> u32 {
        ONLINE_BASE_FEE + self.fee_surcharge
    }

    pub fn details(&self) -> String {
        format!(
            "ONLINE APPOINTMENT\nAppointment : {}\nPoliklinik  : {}\nDoctor      : {}\nTime        : {} - {}\nFee         : {}\nStatus      : {}",
            self.core.id(),
            self.poliklinik,
            self.core.doctor(),
            self.core.scheduled_at().format("%d.%m.%Y %H:%M"),
            self.end_time().format("%H:%M"),
            self.consultation_fee(),
            self.core.status(),
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "[ONLINE] {} | {} | Dr. {}",
            self.core.scheduled_at().format("%d.%m.%Y %H:%M"),
            self.poliklinik,
            self.core.doctor()
        )
    }

    /// The poliklinik names offered for online booking.
    pub fn policlinics() -> impl Iterator<Item = &'static str> {
        POLICLINICS.iter().map(|(name, _, _)| *name)
    }

    /// The doctors listed under a poliklinik, if it exists.
    pub fn doctors_of(poliklinik: &str) -> Option<&'static [&'static str]> {
        POLICLINICS
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(poliklinik.trim()))
            .map(|(_, doctors, _)| *doctors)
    }
}

/// Whether a doctor already holds a non-cancelled online booking at the
/// exact time. Pure; run by the caller before constructing.
pub fn doctor_slot_taken<'a, I>(doctor: &PersonName, at: DateTime<Utc>, appointments: I) -> bool
where
    I: IntoIterator<Item = &'a Appointment>,
{
    appointments.into_iter().any(|a| {
        matches!(a, Appointment::Online(_))
            && !a.is_cancelled()
            && a.doctor() == doctor
            && a.scheduled_at() == at
    })
}

/// Whether the patient already holds a non-cancelled online booking on the
/// same calendar day. Pure; run by the caller before constructing.
pub fn has_patient_daily_conflict<'a, I>(
    patient_id: PatientId,
    at: DateTime<Utc>,
    appointments: I,
) -> bool
where
    I: IntoIterator<Item = &'a Appointment>,
{
    appointments.into_iter().any(|a| {
        matches!(a, Appointment::Online(_))
            && !a.is_cancelled()
            && a.patient_id() == patient_id
            && a.scheduled_at().date_naive() == at.date_naive()
    })
}
