//! In-memory patient collection.
//!
//! The repository assigns sequential identifiers on insert (when the
//! caller did not supply one), rejects duplicates, and answers the room
//! and priority queries the service layer builds on. Filter results are
//! freshly constructed collections; callers must not assume they alias
//! the backing store.

use std::collections::BTreeMap;

use ada_types::{PatientId, RoomNumber};

use crate::config::HospitalConfig;
use crate::error::{HospitalError, HospitalResult};
use crate::patient::{Patient, PatientKind, PatientStatus};

/// Owns every patient record in the system.
#[derive(Debug)]
pub struct PatientRepository {
    patients: Vec<Patient>,
    next_id: u32,
    rooms: Vec<RoomNumber>,
}

impl PatientRepository {
    /// Creates an empty repository with the configured room catalog and
    /// id sequence start.
    pub fn new(cfg: &HospitalConfig) -> Self {
        Self {
            patients: Vec::new(),
            next_id: cfg.first_patient_id(),
            rooms: cfg.rooms().to_vec(),
        }
    }

    /// Next free identifier, skipping any the caller already supplied.
    fn generate_id(&mut self) -> PatientId {
        loop {
            let id = PatientId::new(self.next_id).expect("id sequence starts above zero");
            self.next_id += 1;
            if self.get_by_id(id).is_none() {
                return id;
            }
        }
    }

    /// Inserts a patient, assigning a fresh identity when none is set.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::DuplicatePatientId` if a record with the
    /// same identity already exists; the patient is not inserted.
    pub fn add(&mut self, mut patient: Patient) -> HospitalResult<PatientId> {
        let id = match patient.id() {
            Some(id) => id,
            None => {
                let id = self.generate_id();
                patient.core_mut().set_id(id);
                id
            }
        };

        if self.get_by_id(id).is_some() {
            return Err(HospitalError::DuplicatePatientId(id));
        }

        self.patients.push(patient);
        Ok(id)
    }

    /// Removes a patient by identity.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::PatientNotFound` if no record matches.
    pub fn remove(&mut self, patient_id: PatientId) -> HospitalResult<Patient> {
        let index = self
            .patients
            .iter()
            .position(|p| p.id() == Some(patient_id))
            .ok_or(HospitalError::PatientNotFound(patient_id))?;
        Ok(self.patients.remove(index))
    }

    pub fn get_by_id(&self, patient_id: PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id() == Some(patient_id))
    }

    pub fn get_by_id_mut(&mut self, patient_id: PatientId) -> Option<&mut Patient> {
        self.patients
            .iter_mut()
            .find(|p| p.id() == Some(patient_id))
    }

    pub fn list_all(&self) -> Vec<&Patient> {
        self.patients.iter().collect()
    }

    pub fn filter_by_status(&self, status: PatientStatus) -> Vec<&Patient> {
        self.patients
            .iter()
            .filter(|p| p.status() == status)
            .collect()
    }

    pub fn filter_by_type(&self, kind: PatientKind) -> Vec<&Patient> {
        self.patients.iter().filter(|p| p.kind() == kind).collect()
    }

    pub fn count(&self) -> usize {
        self.patients.len()
    }

    /// Substitutes the record holding `patient_id` with `replacement`.
    ///
    /// Only used for the emergency-to-inpatient conversion, where the new
    /// record carries the same identity. The old record is returned so a
    /// failed follow-up step could reinstate it.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::PatientNotFound` if no record matches, or
    /// `HospitalError::InvalidInput` if the replacement carries a
    /// different identity.
    pub fn replace_patient(
        &mut self,
        patient_id: PatientId,
        replacement: Patient,
    ) -> HospitalResult<Patient> {
        if replacement.id() != Some(patient_id) {
            return Err(HospitalError::InvalidInput(format!(
                "replacement record must keep identity {patient_id}"
            )));
        }

        let index = self
            .patients
            .iter()
            .position(|p| p.id() == Some(patient_id))
            .ok_or(HospitalError::PatientNotFound(patient_id))?;

        Ok(std::mem::replace(&mut self.patients[index], replacement))
    }

    /// The lowest-numbered room from the catalog not occupied by any
    /// inpatient.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::NoFreeRoom` when every room is taken.
    pub fn get_available_room(&self) -> HospitalResult<RoomNumber> {
        self.rooms
            .iter()
            .find(|room| !self.is_room_occupied(**room))
            .copied()
            .ok_or(HospitalError::NoFreeRoom)
    }

    fn is_room_occupied(&self, room: RoomNumber) -> bool {
        self.patients.iter().any(|p| match p {
            Patient::Inpatient(inpatient) => inpatient.room() == Some(room),
            _ => false,
        })
    }

    /// Room occupancy, keyed by room number in ascending order.
    pub fn list_rooms(&self) -> BTreeMap<RoomNumber, &Patient> {
        let mut rooms = BTreeMap::new();
        for patient in &self.patients {
            if let Patient::Inpatient(inpatient) = patient {
                if let Some(room) = inpatient.room() {
                    rooms.insert(room, patient);
                }
            }
        }
        rooms
    }

    /// Patients sorted by descending priority score, optionally restricted
    /// to those still in active care.
    pub fn list_patients_by_priority(&self, only_active: bool) -> Vec<&Patient> {
        let mut patients: Vec<&Patient> = self
            .patients
            .iter()
            .filter(|p| !only_active || p.is_active())
            .collect();
        patients.sort_by(|a, b| b.priority().cmp(&a.priority()));
        patients
    }

    /// Patients still in an active care process.
    pub fn list_active_patients(&self) -> Vec<&Patient> {
        self.patients.iter().filter(|p| p.is_active()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::WardCapacity;
    use crate::patient::{EmergencyLevel, EmergencyPatient, Inpatient, Outpatient};
    use ada_types::{Age, Gender, PersonName};

    fn test_cfg() -> HospitalConfig {
        HospitalConfig::new(
            8,
            2,
            vec![
                RoomNumber::new(101).unwrap(),
                RoomNumber::new(102).unwrap(),
                RoomNumber::new(103).unwrap(),
            ],
            2501,
        )
        .expect("valid test config")
    }

    fn outpatient(name: &str) -> Patient {
        Outpatient::new(
            None,
            PersonName::new(name).unwrap(),
            Age::new(30).unwrap(),
            Gender::Male,
            Some("2025-06-01"),
            PatientStatus::Active,
        )
        .expect("valid outpatient")
        .into()
    }

    fn inpatient(name: &str, room: Option<u32>, ward: &WardCapacity) -> Patient {
        Inpatient::new(
            None,
            PersonName::new(name).unwrap(),
            Age::new(50).unwrap(),
            Gender::Female,
            room.map(|r| RoomNumber::new(r).unwrap()),
            PatientStatus::Active,
            ward,
        )
        .expect("ward has space")
        .into()
    }

    fn emergency(name: &str, level: EmergencyLevel) -> Patient {
        EmergencyPatient::new(
            None,
            PersonName::new(name).unwrap(),
            Age::new(70).unwrap(),
            Gender::Male,
            level,
            None,
            PatientStatus::Emergency,
        )
        .expect("valid emergency patient")
        .into()
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut repo = PatientRepository::new(&test_cfg());
        let first = repo.add(outpatient("ali")).expect("insert succeeds");
        let second = repo.add(outpatient("veli")).expect("insert succeeds");

        assert_eq!(first.get(), 2501);
        assert_eq!(second.get(), 2502);
        assert_eq!(repo.count(), 2);
        assert_eq!(
            repo.get_by_id(first).expect("present").name().as_str(),
            "Ali"
        );
    }

    #[test]
    fn test_generated_ids_skip_caller_supplied_ones() {
        let mut repo = PatientRepository::new(&test_cfg());
        let mut seeded = outpatient("seeded");
        seeded.core_mut().set_id(PatientId::new(2501).unwrap());
        repo.add(seeded).expect("caller-supplied id inserts");

        // The generator must step over the occupied 2501.
        let next = repo.add(outpatient("generated")).expect("insert succeeds");
        assert_eq!(next.get(), 2502);
        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn test_add_rejects_duplicate_identity() {
        let mut repo = PatientRepository::new(&test_cfg());
        let id = repo.add(outpatient("ali")).expect("insert succeeds");

        let mut duplicate = outpatient("other");
        duplicate.core_mut().set_id(id);
        let err = repo.add(duplicate).expect_err("duplicate id");
        assert!(matches!(err, HospitalError::DuplicatePatientId(_)));
        assert_eq!(repo.count(), 1);
    }

    #[test]
    fn test_remove_fails_on_miss() {
        let mut repo = PatientRepository::new(&test_cfg());
        let missing = PatientId::new(9999).unwrap();
        assert!(matches!(
            repo.remove(missing),
            Err(HospitalError::PatientNotFound(_))
        ));
    }

    #[test]
    fn test_available_room_skips_occupied_rooms() {
        let ward = WardCapacity::new(8);
        let mut repo = PatientRepository::new(&test_cfg());

        repo.add(inpatient("a", Some(101), &ward)).unwrap();
        assert_eq!(repo.get_available_room().unwrap().get(), 102);

        repo.add(inpatient("b", Some(102), &ward)).unwrap();
        repo.add(inpatient("c", Some(103), &ward)).unwrap();
        assert!(matches!(
            repo.get_available_room(),
            Err(HospitalError::NoFreeRoom)
        ));
    }

    #[test]
    fn test_discharged_room_becomes_available_again() {
        let ward = WardCapacity::new(8);
        let mut repo = PatientRepository::new(&test_cfg());
        let id = repo.add(inpatient("a", Some(101), &ward)).unwrap();
        repo.add(inpatient("b", Some(102), &ward)).unwrap();

        repo.get_by_id_mut(id)
            .expect("present")
            .update_status(PatientStatus::Discharged)
            .expect("valid transition");

        assert_eq!(repo.get_available_room().unwrap().get(), 101);
        assert_eq!(repo.list_rooms().len(), 1);
    }

    #[test]
    fn test_filters_by_status_and_type() {
        let ward = WardCapacity::new(8);
        let mut repo = PatientRepository::new(&test_cfg());
        repo.add(outpatient("a")).unwrap();
        repo.add(inpatient("b", Some(101), &ward)).unwrap();
        repo.add(emergency("c", EmergencyLevel::Critical)).unwrap();

        assert_eq!(repo.filter_by_type(PatientKind::Inpatient).len(), 1);
        assert_eq!(repo.filter_by_status(PatientStatus::Emergency).len(), 1);
        assert_eq!(repo.filter_by_status(PatientStatus::Active).len(), 2);
    }

    #[test]
    fn test_priority_order_emergency_then_inpatient_then_outpatient() {
        let ward = WardCapacity::new(8);
        let mut repo = PatientRepository::new(&test_cfg());
        repo.add(outpatient("day case")).unwrap();
        repo.add(inpatient("ward case", Some(101), &ward)).unwrap();
        repo.add(emergency("er case", EmergencyLevel::Low)).unwrap();

        let ordered = repo.list_patients_by_priority(false);
        let kinds: Vec<PatientKind> = ordered.iter().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                PatientKind::Emergency,
                PatientKind::Inpatient,
                PatientKind::Outpatient
            ]
        );
    }

    #[test]
    fn test_priority_list_can_exclude_inactive() {
        let ward = WardCapacity::new(8);
        let mut repo = PatientRepository::new(&test_cfg());
        let id = repo.add(inpatient("ward case", Some(101), &ward)).unwrap();
        repo.add(outpatient("day case")).unwrap();

        repo.get_by_id_mut(id)
            .unwrap()
            .update_status(PatientStatus::Discharged)
            .unwrap();

        assert_eq!(repo.list_patients_by_priority(true).len(), 1);
        assert_eq!(repo.list_patients_by_priority(false).len(), 2);
        assert_eq!(repo.list_active_patients().len(), 1);
    }
}
