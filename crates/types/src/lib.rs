//! Validated domain primitives for the Ada Hospital system.
//!
//! Every type in this crate enforces its own field-level constraint at
//! construction time, so the rest of the workspace can pass them around
//! without re-checking. Raw input parsing (from console text) is the
//! presentation shell's job; these types only reject values that are
//! malformed at the domain level.

/// Errors that can occur when creating validated domain values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValueError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
    /// The age was outside the accepted 0-120 range
    #[error("age must be between 0 and 120, got {0}")]
    AgeOutOfRange(u32),
    /// The gender string did not match a canonical value
    #[error("unrecognised gender: {0}")]
    UnknownGender(String),
    /// The room number was zero
    #[error("room number must be a positive integer")]
    NonPositiveRoom,
    /// The identifier was zero
    #[error("identifier must be a positive integer")]
    NonPositiveId,
}

/// A person's name, guaranteed non-empty and normalised to title case.
///
/// The input is trimmed of surrounding whitespace and each
/// whitespace-separated word is capitalised (`"ayşe  yilmaz"` becomes
/// `"Ayşe Yilmaz"`). Interior runs of whitespace collapse to single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonName(String);

impl PersonName {
    /// Creates a new `PersonName` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::Empty` if the trimmed input is empty or
    /// contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ValueError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty);
        }

        let normalised = trimmed
            .split_whitespace()
            .map(title_case_word)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self(normalised))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for PersonName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PersonName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PersonName::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A patient age in whole years, bounded to the 0-120 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(u8);

impl Age {
    /// Creates a new `Age`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::AgeOutOfRange` if `years` exceeds 120.
    pub fn new(years: u32) -> Result<Self, ValueError> {
        if years > 120 {
            return Err(ValueError::AgeOutOfRange(years));
        }
        Ok(Self(years as u8))
    }

    /// Returns the age in years.
    pub fn years(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Age {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Age {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let years = u32::deserialize(deserializer)?;
        Age::new(years).map_err(serde::de::Error::custom)
    }
}

/// Canonical patient gender values.
///
/// Parsing is lenient about case and accepts single-letter shorthand, but
/// the stored value is always one of the two canonical variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            other => Err(ValueError::UnknownGender(other.to_string())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// A ward room number, guaranteed positive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct RoomNumber(u32);

impl RoomNumber {
    /// Creates a new `RoomNumber`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonPositiveRoom` if `number` is zero.
    pub fn new(number: u32) -> Result<Self, ValueError> {
        if number == 0 {
            return Err(ValueError::NonPositiveRoom);
        }
        Ok(Self(number))
    }

    /// Returns the raw room number.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A patient identifier, assigned by the patient repository on insert and
/// immutable thereafter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct PatientId(u32);

impl PatientId {
    /// Creates a new `PatientId`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonPositiveId` if `id` is zero.
    pub fn new(id: u32) -> Result<Self, ValueError> {
        if id == 0 {
            return Err(ValueError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Returns the raw identifier.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An appointment identifier, supplied by the caller at creation and
/// required to be unique within the appointment repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct AppointmentId(u32);

impl AppointmentId {
    /// Creates a new `AppointmentId`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonPositiveId` if `id` is zero.
    pub fn new(id: u32) -> Result<Self, ValueError> {
        if id == 0 {
            return Err(ValueError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Returns the raw identifier.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
