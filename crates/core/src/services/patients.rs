//! Patient business rules.
//!
//! The service owns the patient repository and a handle to the shared
//! ward pool. Entity-level side effects (capacity release on discharge,
//! appointment-history migration) are inherited from the entities; the
//! service adds the cross-entity steps: automatic room assignment and the
//! emergency-to-inpatient conversion.

use ada_types::{PatientId, RoomNumber};
use std::collections::BTreeMap;

use crate::capacity::WardCapacity;
use crate::error::{HospitalError, HospitalResult};
use crate::patient::{Inpatient, Patient, PatientKind, PatientStatus};
use crate::repositories::PatientRepository;

/// Service for patient registration, status management and admission.
#[derive(Debug)]
pub struct PatientService {
    repository: PatientRepository,
    ward: WardCapacity,
}

impl PatientService {
    /// Creates a new service over `repository`, admitting against `ward`.
    ///
    /// The ward handle must be the same pool the shell constructs its
    /// inpatients against, otherwise admissions would be counted twice
    /// across two pools.
    pub fn new(repository: PatientRepository, ward: WardCapacity) -> Self {
        Self { repository, ward }
    }

    /// Registers a patient, assigning the lowest free room to an
    /// inpatient that arrives without one.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::NoFreeRoom` when a room is needed but none
    /// is free, or `HospitalError::DuplicatePatientId` on an identity
    /// collision. In both cases nothing is inserted.
    pub fn register_patient(&mut self, mut patient: Patient) -> HospitalResult<PatientId> {
        if let Patient::Inpatient(inpatient) = &mut patient {
            if inpatient.room().is_none() {
                let room = self.repository.get_available_room()?;
                inpatient.set_room(room);
            }
        }

        let kind = patient.kind();
        let id = self.repository.add(patient)?;
        tracing::info!(patient = %id, %kind, "patient registered");
        Ok(id)
    }

    /// Looks up a patient by identity.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::PatientNotFound` on a miss.
    pub fn get_patient(&self, patient_id: PatientId) -> HospitalResult<&Patient> {
        self.repository
            .get_by_id(patient_id)
            .ok_or(HospitalError::PatientNotFound(patient_id))
    }

    /// Discharges a patient, inheriting the variant's discharge side
    /// effects (ward slot release, room clearing).
    pub fn discharge_patient(&mut self, patient_id: PatientId) -> HospitalResult<()> {
        self.update_patient_status(patient_id, PatientStatus::Discharged)
    }

    /// Applies a status transition through the entity's own rules.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::PatientNotFound` on a lookup miss, or the
    /// entity's `InvalidStatus` error when the transition is rejected.
    pub fn update_patient_status(
        &mut self,
        patient_id: PatientId,
        status: PatientStatus,
    ) -> HospitalResult<()> {
        let patient = self
            .repository
            .get_by_id_mut(patient_id)
            .ok_or(HospitalError::PatientNotFound(patient_id))?;
        patient.update_status(status)?;
        tracing::info!(patient = %patient_id, status = %status, "patient status updated");
        Ok(())
    }

    /// Converts an emergency patient into an inpatient, preserving the
    /// identity and demographics and discarding the triage history.
    ///
    /// The steps are: look up the emergency record, claim the lowest free
    /// room, construct the inpatient (which claims a ward slot), then
    /// swap the records. A failure at any step leaves the original
    /// emergency record untouched.
    ///
    /// # Errors
    ///
    /// Returns `PatientNotFound` or `NotAnEmergencyPatient` on lookup
    /// problems, `NoFreeRoom` when the ward rooms are all taken, and
    /// `WardCapacityFull` when the bed pool is exhausted.
    pub fn admit_emergency_patient(&mut self, patient_id: PatientId) -> HospitalResult<RoomNumber> {
        let patient = self
            .repository
            .get_by_id(patient_id)
            .ok_or(HospitalError::PatientNotFound(patient_id))?;

        let Patient::Emergency(emergency) = patient else {
            return Err(HospitalError::NotAnEmergencyPatient(patient_id));
        };

        let room = self.repository.get_available_room()?;
        let inpatient = Inpatient::from_emergency(emergency, room, &self.ward)?;

        self.repository
            .replace_patient(patient_id, inpatient.into())?;
        tracing::info!(patient = %patient_id, %room, "emergency patient admitted to ward");
        Ok(room)
    }

    pub fn list_patients(&self) -> Vec<&Patient> {
        self.repository.list_all()
    }

    pub fn list_patients_by_status(&self, status: PatientStatus) -> Vec<&Patient> {
        self.repository.filter_by_status(status)
    }

    pub fn list_patients_by_type(&self, kind: PatientKind) -> Vec<&Patient> {
        self.repository.filter_by_type(kind)
    }

    /// Patients not yet out of the care process.
    pub fn list_active_patients(&self) -> Vec<&Patient> {
        self.repository.list_active_patients()
    }

    /// Emergency patients who have not been discharged.
    pub fn list_emergency_patients(&self) -> Vec<&Patient> {
        self.repository
            .list_all()
            .into_iter()
            .filter(|p| {
                p.kind() == PatientKind::Emergency && p.status() != PatientStatus::Discharged
            })
            .collect()
    }

    /// Patients sorted by descending priority score.
    pub fn list_patients_by_priority(&self, only_active: bool) -> Vec<&Patient> {
        self.repository.list_patients_by_priority(only_active)
    }

    pub fn total_patient_count(&self) -> usize {
        self.repository.count()
    }

    /// Current ward occupancy, keyed by room.
    pub fn list_room_occupancy(&self) -> BTreeMap<RoomNumber, &Patient> {
        self.repository.list_rooms()
    }

    /// The shared ward pool this service admits against.
    pub fn ward(&self) -> &WardCapacity {
        &self.ward
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HospitalConfig;
    use crate::patient::{EmergencyLevel, EmergencyPatient};
    use ada_types::{Age, Gender, PersonName};

    fn service(ward_beds: u32, rooms: &[u32]) -> (PatientService, WardCapacity) {
        let cfg = HospitalConfig::new(
            ward_beds,
            2,
            rooms
                .iter()
                .map(|&r| RoomNumber::new(r).unwrap())
                .collect(),
            2501,
        )
        .expect("valid test config");
        let ward = cfg.ward_capacity();
        let repo = PatientRepository::new(&cfg);
        (PatientService::new(repo, ward.clone()), ward)
    }

    fn inpatient(ward: &WardCapacity, room: Option<u32>) -> Patient {
        Inpatient::new(
            None,
            PersonName::new("ward patient").unwrap(),
            Age::new(45).unwrap(),
            Gender::Female,
            room.map(|r| RoomNumber::new(r).unwrap()),
            PatientStatus::Active,
            ward,
        )
        .expect("ward has space")
        .into()
    }

    fn emergency(level: EmergencyLevel) -> Patient {
        EmergencyPatient::new(
            None,
            PersonName::new("er patient").unwrap(),
            Age::new(66).unwrap(),
            Gender::Male,
            level,
            None,
            PatientStatus::Emergency,
        )
        .expect("valid emergency patient")
        .into()
    }

    #[test]
    fn test_register_assigns_room_to_roomless_inpatient() {
        let (mut service, ward) = service(4, &[101, 102]);
        let id = service
            .register_patient(inpatient(&ward, None))
            .expect("registration succeeds");

        let Patient::Inpatient(p) = service.get_patient(id).unwrap() else {
            panic!("expected inpatient");
        };
        assert_eq!(p.room().map(|r| r.get()), Some(101));
    }

    #[test]
    fn test_register_fails_when_no_room_free() {
        let (mut service, ward) = service(4, &[101]);
        service
            .register_patient(inpatient(&ward, Some(101)))
            .expect("first registration succeeds");

        let before = service.total_patient_count();
        let err = service
            .register_patient(inpatient(&ward, None))
            .expect_err("no rooms left");
        assert!(matches!(err, HospitalError::NoFreeRoom));
        assert_eq!(service.total_patient_count(), before);
    }

    #[test]
    fn test_rejected_duplicate_registration_returns_ward_slot() {
        let (mut service, ward) = service(4, &[101, 102]);
        let id = service.register_patient(inpatient(&ward, None)).unwrap();
        assert_eq!(ward.admitted(), 1);

        let mut duplicate = inpatient(&ward, Some(102));
        duplicate.core_mut().set_id(id);
        let err = service
            .register_patient(duplicate)
            .expect_err("identity collision");
        assert!(matches!(err, HospitalError::DuplicatePatientId(_)));

        // The rejected record is gone; its admission must come back with it.
        assert_eq!(service.total_patient_count(), 1);
        assert_eq!(ward.admitted(), 1);
    }

    #[test]
    fn test_discharge_releases_bed_through_entity_rules() {
        let (mut service, ward) = service(4, &[101, 102]);
        let id = service.register_patient(inpatient(&ward, None)).unwrap();
        assert_eq!(ward.admitted(), 1);

        service.discharge_patient(id).expect("discharge succeeds");
        assert_eq!(ward.admitted(), 0);
        assert_eq!(
            service.get_patient(id).unwrap().status(),
            PatientStatus::Discharged
        );
    }

    #[test]
    fn test_update_status_unknown_patient_fails() {
        let (mut service, _ward) = service(4, &[101]);
        let missing = PatientId::new(9000).unwrap();
        assert!(matches!(
            service.update_patient_status(missing, PatientStatus::Stable),
            Err(HospitalError::PatientNotFound(_))
        ));
    }

    #[test]
    fn test_admit_emergency_patient_converts_in_place() {
        let (mut service, _ward) = service(4, &[101, 102]);
        let id = service
            .register_patient(emergency(EmergencyLevel::Critical))
            .unwrap();

        let room = service
            .admit_emergency_patient(id)
            .expect("conversion succeeds");
        assert_eq!(room.get(), 101);

        let converted = service.get_patient(id).expect("still present");
        assert_eq!(converted.kind(), PatientKind::Inpatient);
        assert_eq!(converted.id(), Some(id));
        assert_eq!(converted.name().as_str(), "Er Patient");
        assert_eq!(converted.status(), PatientStatus::Active);
        assert_eq!(service.total_patient_count(), 1);
    }

    #[test]
    fn test_admit_emergency_patient_rejects_wrong_type() {
        let (mut service, ward) = service(4, &[101, 102]);
        let id = service.register_patient(inpatient(&ward, None)).unwrap();

        assert!(matches!(
            service.admit_emergency_patient(id),
            Err(HospitalError::NotAnEmergencyPatient(_))
        ));
    }

    #[test]
    fn test_failed_admission_keeps_emergency_record() {
        // One bed, already taken: conversion must fail on capacity and
        // leave the emergency record as it was.
        let (mut service, ward) = service(1, &[101, 102]);
        service.register_patient(inpatient(&ward, None)).unwrap();
        let id = service
            .register_patient(emergency(EmergencyLevel::Moderate))
            .unwrap();

        let err = service
            .admit_emergency_patient(id)
            .expect_err("no beds left");
        assert!(matches!(err, HospitalError::WardCapacityFull { .. }));

        let patient = service.get_patient(id).expect("record survives");
        assert_eq!(patient.kind(), PatientKind::Emergency);
    }

    #[test]
    fn test_emergency_listing_excludes_discharged() {
        let (mut service, _ward) = service(4, &[101]);
        let keep = service
            .register_patient(emergency(EmergencyLevel::Low))
            .unwrap();
        let gone = service
            .register_patient(emergency(EmergencyLevel::Low))
            .unwrap();
        service.discharge_patient(gone).unwrap();

        let listed = service.list_emergency_patients();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), Some(keep));
    }
}
