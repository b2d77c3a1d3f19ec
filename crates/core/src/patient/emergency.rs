//! Emergency department patients.
//!
//! An emergency patient records an urgency level, an arrival time and a
//! growing symptom list. Triage is split into an explicit two-step API:
//! [`EmergencyPatient::evaluate_triage`] is a pure query over the current
//! symptoms, and [`EmergencyPatient::apply_triage`] commits the result.
//! Applying can only raise the stored level, so re-triaging after new
//! symptoms never leaves the record stale and never downgrades it.

use ada_types::{Age, Gender, PatientId, PersonName};
use chrono::{DateTime, Utc};

use crate::error::HospitalResult;
use crate::patient::triage::{self, EmergencyLevel, TriageArea, TriageAssessment};
use crate::patient::{PatientCore, PatientStatus};

/// Statuses an emergency patient may hold.
const EMERGENCY_STATUSES: [PatientStatus; 3] = [
    PatientStatus::Emergency,
    PatientStatus::Stable,
    PatientStatus::Discharged,
];

/// A patient in the emergency department.
#[derive(Debug)]
pub struct EmergencyPatient {
    core: PatientCore,
    level: EmergencyLevel,
    arrival_time: DateTime<Utc>,
    symptoms: Vec<String>,
    area: TriageArea,
}

impl EmergencyPatient {
    /// Creates a new emergency patient.
    ///
    /// `arrival_time` defaults to the current wall clock when absent. The
    /// initial triage area derives from the declared level.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidStatus` if `status` is not one of
    /// `emergency`, `stable` or `discharged`.
    pub fn new(
        id: Option<PatientId>,
        name: PersonName,
        age: Age,
        gender: Gender,
        level: EmergencyLevel,
        arrival_time: Option<DateTime<Utc>>,
        status: PatientStatus,
    ) -> HospitalResult<Self> {
        let core = PatientCore::new(id, name, age, gender, status, &EMERGENCY_STATUSES)?;

        Ok(Self {
            core,
            level,
            arrival_time: arrival_time.unwrap_or_else(Utc::now),
            symptoms: Vec::new(),
            area: level.area(),
        })
    }

    pub(crate) fn core(&self) -> &PatientCore {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut PatientCore {
        &mut self.core
    }

    pub fn emergency_level(&self) -> EmergencyLevel {
        self.level
    }

    pub fn arrival_time(&self) -> DateTime<Utc> {
        self.arrival_time
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// The currently assigned triage area.
    pub fn triage_area(&self) -> TriageArea {
        self.area
    }

    /// Records additional symptoms. Does not re-triage; call
    /// [`evaluate_triage`](Self::evaluate_triage) and
    /// [`apply_triage`](Self::apply_triage) to pick up the change.
    pub fn add_symptoms<I, S>(&mut self, symptoms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symptoms.extend(symptoms.into_iter().map(Into::into));
    }

    /// Classifies the current symptom set without touching any state.
    pub fn evaluate_triage(&self) -> TriageAssessment {
        triage::evaluate(&self.symptoms)
    }

    /// Commits a triage assessment to the record.
    ///
    /// The stored level and area only move upward; an assessment below the
    /// current level leaves the record unchanged.
    pub fn apply_triage(&mut self, assessment: TriageAssessment) {
        if assessment.level > self.level {
            self.level = assessment.level;
            self.area = assessment.level.area();
        }
    }

    /// Raises the urgency one level and forces the status back to
    /// `emergency`. A patient already at the maximum level is left as-is.
    pub fn escalate(&mut self) {
        let Some(raised) = self.level.raised() else {
            return;
        };
        self.level = raised;
        self.area = raised.area();

        if self.core.status() != PatientStatus::Emergency {
            self.core.record_status(PatientStatus::Emergency);
        }
    }

    /// Marks the patient as stable.
    pub fn stabilize(&mut self) -> HospitalResult<()> {
        self.update_status(PatientStatus::Stable)
    }

    pub fn priority(&self) -> u32 {
        self.level.priority()
    }

    /// Applies a status transition within the emergency status subset.
    pub fn update_status(&mut self, status: PatientStatus) -> HospitalResult<()> {
        PatientCore::ensure_allowed(status, &EMERGENCY_STATUSES)?;
        self.core.record_status(status);
        Ok(())
    }

    pub fn detailed_info(&self) -> String {
        let symptoms = if self.symptoms.is_empty() {
            "none".to_string()
        } else {
            self.symptoms.join(", ")
        };
        format!(
            "{}\nArea       : {}\nLevel      : {}\nSymptoms   : {}\nArrived    : {}",
            self.core.detailed_info(),
            self.area,
            self.level.as_number(),
            symptoms,
            self.arrival_time.format("%Y-%m-%d %H:%M"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HospitalError;

    fn patient(level: EmergencyLevel) -> EmergencyPatient {
        EmergencyPatient::new(
            Some(PatientId::new(2510).unwrap()),
            PersonName::new("er patient").unwrap(),
            Age::new(64).unwrap(),
            Gender::Male,
            level,
            None,
            PatientStatus::Emergency,
        )
        .expect("valid emergency patient")
    }

    #[test]
    fn test_rejects_status_outside_emergency_subset() {
        let result = EmergencyPatient::new(
            None,
            PersonName::new("er patient").unwrap(),
            Age::new(64).unwrap(),
            Gender::Male,
            EmergencyLevel::Low,
            None,
            PatientStatus::Active,
        );
        assert!(matches!(result, Err(HospitalError::InvalidStatus(_))));

        let mut ok = patient(EmergencyLevel::Low);
        assert!(ok.update_status(PatientStatus::Completed).is_err());
    }

    #[test]
    fn test_chest_pain_triages_to_red_level_three() {
        let mut p = patient(EmergencyLevel::Low);
        p.add_symptoms(["chest pain"]);

        let assessment = p.evaluate_triage();
        assert_eq!(assessment.area, TriageArea::Red);
        assert_eq!(assessment.level, EmergencyLevel::Critical);

        // Evaluation alone must not have mutated the record.
        assert_eq!(p.emergency_level(), EmergencyLevel::Low);

        p.apply_triage(assessment);
        assert_eq!(p.emergency_level(), EmergencyLevel::Critical);
        assert_eq!(p.triage_area(), TriageArea::Red);
    }

    #[test]
    fn test_triage_never_lowers_an_existing_level() {
        let mut p = patient(EmergencyLevel::Critical);
        p.add_symptoms(["dizziness"]);

        let assessment = p.evaluate_triage();
        assert_eq!(assessment.level, EmergencyLevel::Moderate);

        p.apply_triage(assessment);
        assert_eq!(p.emergency_level(), EmergencyLevel::Critical);
        assert_eq!(p.triage_area(), TriageArea::Red);
    }

    #[test]
    fn test_escalate_raises_level_and_forces_emergency_status() {
        let mut p = patient(EmergencyLevel::Low);
        p.stabilize().unwrap();
        assert_eq!(p.core().status(), PatientStatus::Stable);

        p.escalate();
        assert_eq!(p.emergency_level(), EmergencyLevel::Moderate);
        assert_eq!(p.core().status(), PatientStatus::Emergency);
    }

    #[test]
    fn test_escalate_at_maximum_is_a_no_op() {
        let mut p = patient(EmergencyLevel::Critical);
        let history_before = p.core().status_history().len();

        p.escalate();
        assert_eq!(p.emergency_level(), EmergencyLevel::Critical);
        assert_eq!(p.core().status_history().len(), history_before);
    }

    #[test]
    fn test_priority_follows_level() {
        assert_eq!(patient(EmergencyLevel::Critical).priority(), 100);
        assert_eq!(patient(EmergencyLevel::Moderate).priority(), 80);
        assert_eq!(patient(EmergencyLevel::Low).priority(), 60);
    }
}
