//! Admitted (inpatient) patients.
//!
//! Every inpatient occupies one slot in the shared [`WardCapacity`] pool.
//! Construction claims the slot (and fails when the ward is full, before
//! any other state exists); the first transition to `Discharged` returns
//! the slot and clears the room. A per-instance flag guards the release so
//! repeated discharge calls cannot drain the pool twice, even if the
//! status is mutated externally in between. Dropping a record that was
//! never discharged also returns the slot, so a failed insertion cannot
//! strand a bed.

use ada_types::{Age, Gender, PatientId, PersonName, RoomNumber};

use crate::capacity::WardCapacity;
use crate::error::HospitalResult;
use crate::patient::emergency::EmergencyPatient;
use crate::patient::{PatientCore, PatientStatus};

/// Priority score for admitted patients (between emergency and outpatient).
const INPATIENT_PRIORITY: u32 = 40;

/// A patient admitted to a ward bed.
#[derive(Debug)]
pub struct Inpatient {
    core: PatientCore,
    room: Option<RoomNumber>,
    discharged: bool,
    ward: WardCapacity,
}

impl Inpatient {
    /// Creates a new inpatient, claiming one ward slot.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidStatus` if `status` is not a
    /// recognised patient status, or `HospitalError::WardCapacityFull` if
    /// the ward has no free slot. On error nothing is claimed.
    pub fn new(
        id: Option<PatientId>,
        name: PersonName,
        age: Age,
        gender: Gender,
        room: Option<RoomNumber>,
        status: PatientStatus,
        ward: &WardCapacity,
    ) -> HospitalResult<Self> {
        let core = PatientCore::new(id, name, age, gender, status, &PatientStatus::ALL)?;
        ward.admit()?;

        Ok(Self {
            core,
            room,
            discharged: false,
            ward: ward.clone(),
        })
    }

    /// Converts an emergency patient into an inpatient.
    ///
    /// The identity and demographics carry over unchanged; the triage
    /// history does not. The new record starts in the `Active` status.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::WardCapacityFull` if the ward is full; the
    /// source record is not consumed or modified.
    pub fn from_emergency(
        emergency: &EmergencyPatient,
        room: RoomNumber,
        ward: &WardCapacity,
    ) -> HospitalResult<Self> {
        Self::new(
            emergency.core().id(),
            emergency.core().name().clone(),
            emergency.core().age(),
            emergency.core().gender(),
            Some(room),
            PatientStatus::Active,
            ward,
        )
    }

    pub(crate) fn core(&self) -> &PatientCore {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut PatientCore {
        &mut self.core
    }

    /// The occupied room, if one is assigned.
    pub fn room(&self) -> Option<RoomNumber> {
        self.room
    }

    /// Assigns or moves the patient to a room.
    pub fn set_room(&mut self, room: RoomNumber) {
        self.room = Some(room);
    }

    /// Whether the discharge side effects have already run.
    pub fn is_discharged(&self) -> bool {
        self.discharged
    }

    pub fn priority(&self) -> u32 {
        INPATIENT_PRIORITY
    }

    /// Occupancy summary for the shared ward pool.
    pub fn capacity_info(&self) -> String {
        self.ward.occupancy_info()
    }

    /// Applies a status transition.
    ///
    /// The first transition to `Discharged` releases the ward slot and
    /// clears the room before the transition is recorded; later discharge
    /// calls only append to the history.
    pub fn update_status(&mut self, status: PatientStatus) -> HospitalResult<()> {
        PatientCore::ensure_allowed(status, &PatientStatus::ALL)?;

        if status == PatientStatus::Discharged && !self.discharged {
            self.ward.release();
            self.discharged = true;
            self.room = None;
        }

        self.core.record_status(status);
        Ok(())
    }

    pub fn detailed_info(&self) -> String {
        let room = match self.room {
            Some(room) => room.to_string(),
            None => "none".to_string(),
        };
        format!("{}\nRoom       : {}", self.core.detailed_info(), room)
    }
}

impl Drop for Inpatient {
    /// Returns the ward slot if the record goes away without a discharge,
    /// e.g. when a repository insert rejects it. The `discharged` flag
    /// keeps the release at exactly once per admission.
    fn drop(&mut self) {
        if !self.discharged {
            self.ward.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HospitalError;

    fn inpatient(ward: &WardCapacity, room: u32) -> Inpatient {
        Inpatient::new(
            None,
            PersonName::new("ward patient").unwrap(),
            Age::new(58).unwrap(),
            Gender::Male,
            Some(RoomNumber::new(room).unwrap()),
            PatientStatus::Active,
            ward,
        )
        .expect("ward has space")
    }

    #[test]
    fn test_construction_claims_a_ward_slot() {
        let ward = WardCapacity::new(2);
        let _a = inpatient(&ward, 101);
        assert_eq!(ward.admitted(), 1);
    }

    #[test]
    fn test_construction_fails_when_ward_full() {
        let ward = WardCapacity::new(1);
        let _a = inpatient(&ward, 101);

        let result = Inpatient::new(
            None,
            PersonName::new("second patient").unwrap(),
            Age::new(30).unwrap(),
            Gender::Female,
            None,
            PatientStatus::Active,
            &ward,
        );
        assert!(matches!(
            result,
            Err(HospitalError::WardCapacityFull { .. })
        ));
        assert_eq!(ward.admitted(), 1);
    }

    #[test]
    fn test_discharge_is_idempotent_on_the_pool() {
        let ward = WardCapacity::new(4);
        let mut patient = inpatient(&ward, 202);
        assert_eq!(ward.admitted(), 1);

        patient.update_status(PatientStatus::Discharged).unwrap();
        assert_eq!(ward.admitted(), 0);
        assert_eq!(patient.room(), None);

        // A second discharge appends history but must not touch the pool.
        patient.update_status(PatientStatus::Discharged).unwrap();
        assert_eq!(ward.admitted(), 0);
        assert_eq!(patient.core().status_history().len(), 3);
    }

    #[test]
    fn test_discharge_survives_external_status_churn() {
        let ward = WardCapacity::new(4);
        let mut patient = inpatient(&ward, 303);

        patient.update_status(PatientStatus::Discharged).unwrap();
        patient.update_status(PatientStatus::Active).unwrap();
        patient.update_status(PatientStatus::Discharged).unwrap();

        // The release ran exactly once despite the round trip.
        assert_eq!(ward.admitted(), 0);
    }

    #[test]
    fn test_dropped_inpatient_returns_its_slot() {
        let ward = WardCapacity::new(2);
        {
            let _patient = inpatient(&ward, 101);
            assert_eq!(ward.admitted(), 1);
        }
        assert_eq!(ward.admitted(), 0);
    }

    #[test]
    fn test_dropping_a_discharged_inpatient_does_not_release_twice() {
        let ward = WardCapacity::new(2);
        let other = inpatient(&ward, 101);
        {
            let mut patient = inpatient(&ward, 102);
            patient.update_status(PatientStatus::Discharged).unwrap();
            assert_eq!(ward.admitted(), 1);
        }
        // The discharge already released; the drop must not.
        assert_eq!(ward.admitted(), 1);
        drop(other);
    }

    #[test]
    fn test_from_emergency_preserves_identity_and_demographics() {
        let ward = WardCapacity::new(4);
        let emergency = EmergencyPatient::new(
            Some(PatientId::new(2507).unwrap()),
            PersonName::new("acil hasta").unwrap(),
            Age::new(71).unwrap(),
            Gender::Female,
            crate::patient::EmergencyLevel::Moderate,
            None,
            PatientStatus::Emergency,
        )
        .expect("valid emergency patient");

        let converted =
            Inpatient::from_emergency(&emergency, RoomNumber::new(104).unwrap(), &ward)
                .expect("conversion succeeds");

        assert_eq!(converted.core().id(), emergency.core().id());
        assert_eq!(converted.core().name(), emergency.core().name());
        assert_eq!(converted.core().age(), emergency.core().age());
        assert_eq!(converted.core().gender(), emergency.core().gender());
        assert_eq!(converted.core().status(), PatientStatus::Active);
        assert_eq!(converted.room(), Some(RoomNumber::new(104).unwrap()));
    }
}
