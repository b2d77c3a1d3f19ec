//! Symptom-based triage classification.
//!
//! Evaluation is a pure function over the recorded symptom list; applying
//! the result to a patient is a separate, explicit step so that nothing
//! that looks like a query mutates state. Keyword matching is
//! case-insensitive and scans the three priority tiers in order.

/// Symptoms that place a patient straight into the red area.
const CRITICAL_SYMPTOMS: [&str; 4] = [
    "chest pain",
    "shortness of breath",
    "loss of consciousness",
    "severe bleeding",
];

/// Symptoms that place a patient into the yellow area.
const MODERATE_SYMPTOMS: [&str; 4] = ["high fever", "severe pain", "vomiting", "dizziness"];

/// Urgency of an emergency patient, from routine to life-threatening.
///
/// Level 3 is the most urgent; escalation only ever moves upward.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum EmergencyLevel {
    Low = 1,
    Moderate = 2,
    Critical = 3,
}

impl EmergencyLevel {
    /// Creates a level from its numeric value.
    ///
    /// Returns `None` unless `value` is 1, 2 or 3.
    pub fn from_number(value: u32) -> Option<Self> {
        match value {
            1 => Some(EmergencyLevel::Low),
            2 => Some(EmergencyLevel::Moderate),
            3 => Some(EmergencyLevel::Critical),
            _ => None,
        }
    }

    /// The numeric value of this level.
    pub fn as_number(&self) -> u32 {
        *self as u32
    }

    /// Priority score used for cross-patient ordering.
    pub fn priority(&self) -> u32 {
        match self {
            EmergencyLevel::Critical => 100,
            EmergencyLevel::Moderate => 80,
            EmergencyLevel::Low => 60,
        }
    }

    /// The next level up, or `None` at the maximum.
    pub fn raised(&self) -> Option<Self> {
        match self {
            EmergencyLevel::Low => Some(EmergencyLevel::Moderate),
            EmergencyLevel::Moderate => Some(EmergencyLevel::Critical),
            EmergencyLevel::Critical => None,
        }
    }

    /// The triage area this level maps to.
    pub fn area(&self) -> TriageArea {
        match self {
            EmergencyLevel::Critical => TriageArea::Red,
            EmergencyLevel::Moderate => TriageArea::Yellow,
            EmergencyLevel::Low => TriageArea::Green,
        }
    }
}

/// The emergency department area a patient is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TriageArea {
    Green,
    Yellow,
    Red,
}

impl std::fmt::Display for TriageArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriageArea::Green => write!(f, "Green"),
            TriageArea::Yellow => write!(f, "Yellow"),
            TriageArea::Red => write!(f, "Red"),
        }
    }
}

/// The outcome of evaluating a symptom set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriageAssessment {
    pub level: EmergencyLevel,
    pub area: TriageArea,
}

impl TriageAssessment {
    fn from_level(level: EmergencyLevel) -> Self {
        Self {
            level,
            area: level.area(),
        }
    }
}

/// Classifies a symptom set into a triage assessment.
///
/// The symptoms are joined and matched case-insensitively against the
/// critical tier first, then the moderate tier; anything else is green.
/// Evaluation never reads or writes patient state, so re-running it after
/// new symptoms arrive is always safe.
pub fn evaluate(symptoms: &[String]) -> TriageAssessment {
    let text = symptoms.join("; ").to_lowercase();

    if CRITICAL_SYMPTOMS.iter().any(|kw| text.contains(kw)) {
        return TriageAssessment::from_level(EmergencyLevel::Critical);
    }
    if MODERATE_SYMPTOMS.iter().any(|kw| text.contains(kw)) {
        return TriageAssessment::from_level(EmergencyLevel::Moderate);
    }
    TriageAssessment::from_level(EmergencyLevel::Low)
}
