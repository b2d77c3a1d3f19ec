//! Patient entity models.
//!
//! A patient is one of three concrete variants — inpatient, outpatient or
//! emergency — sharing a common core of demographics, a current status and
//! an append-only status history. The `Patient` enum is deliberately
//! *closed*: callers branch on [`PatientKind`] or pattern-match instead of
//! downcasting, and every variant-specific rule lives with its variant.
//!
//! Status transitions all funnel through [`PatientCore`]: a variant first
//! validates the target status against its own valid set, then runs its
//! side effects (room release, appointment-history migration), then records
//! the transition. Side effects are guarded so they run exactly once per
//! logical transition even if the same target status is applied twice.

pub mod emergency;
pub mod inpatient;
pub mod outpatient;
pub mod triage;

pub use emergency::EmergencyPatient;
pub use inpatient::Inpatient;
pub use outpatient::Outpatient;
pub use triage::{EmergencyLevel, TriageArea, TriageAssessment};

use ada_types::{Age, Gender, PatientId, PersonName};
use chrono::{DateTime, Utc};

use crate::error::{HospitalError, HospitalResult};

/// The statuses a patient record can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    Active,
    Emergency,
    Stable,
    Discharged,
    Cancelled,
    Completed,
}

impl PatientStatus {
    /// Every status the system recognises.
    pub const ALL: [PatientStatus; 6] = [
        PatientStatus::Active,
        PatientStatus::Emergency,
        PatientStatus::Stable,
        PatientStatus::Discharged,
        PatientStatus::Cancelled,
        PatientStatus::Completed,
    ];

    /// The stable label string for this status.
    pub fn label(&self) -> &'static str {
        match self {
            PatientStatus::Active => "active",
            PatientStatus::Emergency => "emergency",
            PatientStatus::Stable => "stable",
            PatientStatus::Discharged => "discharged",
            PatientStatus::Cancelled => "cancelled",
            PatientStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for PatientStatus {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(PatientStatus::Active),
            "emergency" => Ok(PatientStatus::Emergency),
            "stable" => Ok(PatientStatus::Stable),
            "discharged" => Ok(PatientStatus::Discharged),
            "cancelled" => Ok(PatientStatus::Cancelled),
            "completed" => Ok(PatientStatus::Completed),
            other => Err(HospitalError::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One entry in a patient's append-only status history.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StatusChange {
    pub status: PatientStatus,
    pub at: DateTime<Utc>,
}

/// Demographics and status shared by every patient variant.
///
/// The identity is optional until the repository assigns one on insert and
/// immutable afterwards. The history always holds at least one entry once
/// construction succeeds.
#[derive(Debug)]
pub struct PatientCore {
    id: Option<PatientId>,
    name: PersonName,
    age: Age,
    gender: Gender,
    status: PatientStatus,
    history: Vec<StatusChange>,
}

impl PatientCore {
    pub(crate) fn new(
        id: Option<PatientId>,
        name: PersonName,
        age: Age,
        gender: Gender,
        status: PatientStatus,
        allowed: &[PatientStatus],
    ) -> HospitalResult<Self> {
        Self::ensure_allowed(status, allowed)?;
        Ok(Self {
            id,
            name,
            age,
            gender,
            status,
            history: vec![StatusChange {
                status,
                at: Utc::now(),
            }],
        })
    }

    /// Validates a target status against a variant's valid set.
    pub(crate) fn ensure_allowed(
        status: PatientStatus,
        allowed: &[PatientStatus],
    ) -> HospitalResult<()> {
        if allowed.contains(&status) {
            return Ok(());
        }
        Err(HospitalError::InvalidStatus(status.label().to_string()))
    }

    /// Sets the current status and appends a history entry.
    ///
    /// Callers must have run `ensure_allowed` (and any side effects) first.
    pub(crate) fn record_status(&mut self, status: PatientStatus) {
        self.status = status;
        self.history.push(StatusChange {
            status,
            at: Utc::now(),
        });
    }

    pub(crate) fn set_id(&mut self, id: PatientId) {
        self.id = Some(id);
    }

    pub fn id(&self) -> Option<PatientId> {
        self.id
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn status(&self) -> PatientStatus {
        self.status
    }

    /// The full status history, oldest first.
    pub fn status_history(&self) -> &[StatusChange] {
        &self.history
    }

    /// Whether the patient is in an active care process.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            PatientStatus::Active | PatientStatus::Emergency | PatientStatus::Stable
        )
    }

    fn id_label(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => "unassigned".to_string(),
        }
    }

    pub(crate) fn detailed_info(&self) -> String {
        format!(
            "Patient ID : {}\nName       : {}\nAge        : {}\nGender     : {}\nStatus     : {}",
            self.id_label(),
            self.name,
            self.age,
            self.gender,
            self.status
        )
    }
}

/// Tag identifying a patient's concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientKind {
    Inpatient,
    Outpatient,
    Emergency,
}

impl std::str::FromStr for PatientKind {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inpatient" => Ok(PatientKind::Inpatient),
            "outpatient" => Ok(PatientKind::Outpatient),
            "emergency" | "emergencypatient" => Ok(PatientKind::Emergency),
            other => Err(HospitalError::InvalidInput(format!(
                "unknown patient type: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for PatientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatientKind::Inpatient => write!(f, "inpatient"),
            PatientKind::Outpatient => write!(f, "outpatient"),
            PatientKind::Emergency => write!(f, "emergency"),
        }
    }
}

/// A patient record, one of the three concrete variants.
#[derive(Debug)]
pub enum Patient {
    Inpatient(Inpatient),
    Outpatient(Outpatient),
    Emergency(EmergencyPatient),
}

impl Patient {
    pub fn kind(&self) -> PatientKind {
        match self {
            Patient::Inpatient(_) => PatientKind::Inpatient,
            Patient::Outpatient(_) => PatientKind::Outpatient,
            Patient::Emergency(_) => PatientKind::Emergency,
        }
    }

    pub(crate) fn core(&self) -> &PatientCore {
        match self {
            Patient::Inpatient(p) => p.core(),
            Patient::Outpatient(p) => p.core(),
            Patient::Emergency(p) => p.core(),
        }
    }

    pub(crate) fn core_mut(&mut self) -> &mut PatientCore {
        match self {
            Patient::Inpatient(p) => p.core_mut(),
            Patient::Outpatient(p) => p.core_mut(),
            Patient::Emergency(p) => p.core_mut(),
        }
    }

    pub fn id(&self) -> Option<PatientId> {
        self.core().id()
    }

    pub fn name(&self) -> &PersonName {
        self.core().name()
    }

    pub fn age(&self) -> Age {
        self.core().age()
    }

    pub fn gender(&self) -> Gender {
        self.core().gender()
    }

    pub fn status(&self) -> PatientStatus {
        self.core().status()
    }

    pub fn status_history(&self) -> &[StatusChange] {
        self.core().status_history()
    }

    pub fn is_active(&self) -> bool {
        self.core().is_active()
    }

    /// Numeric priority used for descending triage-style ordering.
    ///
    /// Emergency patients outrank inpatients, who outrank outpatients.
    pub fn priority(&self) -> u32 {
        match self {
            Patient::Inpatient(p) => p.priority(),
            Patient::Outpatient(p) => p.priority(),
            Patient::Emergency(p) => p.priority(),
        }
    }

    /// Multi-line human-readable record summary.
    pub fn detailed_info(&self) -> String {
        match self {
            Patient::Inpatient(p) => p.detailed_info(),
            Patient::Outpatient(p) => p.detailed_info(),
            Patient::Emergency(p) => p.detailed_info(),
        }
    }

    /// Applies a status transition with the variant's own rules and side
    /// effects.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidStatus` if the target status is not
    /// in the variant's valid set; no state changes in that case.
    pub fn update_status(&mut self, status: PatientStatus) -> HospitalResult<()> {
        match self {
            Patient::Inpatient(p) => p.update_status(status),
            Patient::Outpatient(p) => p.update_status(status),
            Patient::Emergency(p) => p.update_status(status),
        }
    }
}

impl From<Inpatient> for Patient {
    fn from(value: Inpatient) -> Self {
        Patient::Inpatient(value)
    }
}

impl From<Outpatient> for Patient {
    fn from(value: Outpatient) -> Self {
        Patient::Outpatient(value)
    }
}

impl From<EmergencyPatient> for Patient {
    fn from(value: EmergencyPatient) -> Self {
        Patient::Emergency(value)
    }
}
