//! Emergency (112 dispatch) appointments.
//!
//! An emergency appointment records incident metadata and draws vehicles
//! from the shared [`AmbulanceFleet`]. Requesting and dispatching are
//! separate steps: a request only records the desired count, while a
//! dispatch takes from the pool all-or-nothing, so a failed dispatch
//! leaves the fleet untouched and the caller can retry with fewer.

use ada_types::{AppointmentId, PatientId, PersonName};
use chrono::{DateTime, Utc};

use crate::appointment::AppointmentCore;
use crate::capacity::AmbulanceFleet;
use crate::error::{HospitalError, HospitalResult};

/// Criticality threshold above which an incident counts as critical.
const CRITICAL_EVENT_THRESHOLD: u32 = 4;

/// Injured count and criticality, bundled for other modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CasualtyInfo {
    pub injured_count: u32,
    pub critical_level: u32,
}

/// An incident response backed by the shared ambulance fleet.
#[derive(Debug)]
pub struct EmergencyAppointment {
    core: AppointmentCore,
    injured_count: u32,
    incident_address: String,
    critical_level: u32,
    emergency_note: Option<String>,
    requested_ambulances: u32,
    dispatched_ambulances: u32,
    fleet: AmbulanceFleet,
}

impl EmergencyAppointment {
    /// Creates a new emergency appointment drawing on `fleet`.
    ///
    /// Incident metadata starts empty and is filled in through the
    /// setters as details come in from the caller.
    pub fn new(
        id: AppointmentId,
        patient_id: PatientId,
        doctor: PersonName,
        scheduled_at: DateTime<Utc>,
        fleet: &AmbulanceFleet,
    ) -> Self {
        Self {
            core: AppointmentCore::new(id, patient_id, doctor, scheduled_at),
            injured_count: 0,
            incident_address: String::new(),
            critical_level: 0,
            emergency_note: None,
            requested_ambulances: 0,
            dispatched_ambulances: 0,
            fleet: fleet.clone(),
        }
    }

    pub(crate) fn core(&self) -> &AppointmentCore {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut AppointmentCore {
        &mut self.core
    }

    pub fn injured_count(&self) -> u32 {
        self.injured_count
    }

    /// Sets the number of injured people at the incident.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidInput` if `count` is zero.
    pub fn set_injured_count(&mut self, count: u32) -> HospitalResult<()> {
        if count == 0 {
            return Err(HospitalError::InvalidInput(
                "injured count must be positive".into(),
            ));
        }
        self.injured_count = count;
        Ok(())
    }

    pub fn incident_address(&self) -> &str {
        &self.incident_address
    }

    /// Sets the incident address.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidInput` if `address` is blank.
    pub fn set_incident_address(&mut self, address: &str) -> HospitalResult<()> {
        if address.trim().is_empty() {
            return Err(HospitalError::InvalidInput(
                "incident address cannot be empty".into(),
            ));
        }
        self.incident_address = address.trim().to_string();
        Ok(())
    }

    pub fn critical_level(&self) -> u32 {
        self.critical_level
    }

    /// Sets the incident criticality on the 1-5 scale.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidInput` if `level` is outside 1-5.
    pub fn set_critical_level(&mut self, level: u32) -> HospitalResult<()> {
        if !(1..=5).contains(&level) {
            return Err(HospitalError::InvalidInput(format!(
                "critical level must be between 1 and 5, got {level}"
            )));
        }
        self.critical_level = level;
        Ok(())
    }

    pub fn emergency_note(&self) -> Option<&str> {
        self.emergency_note.as_deref()
    }

    /// Attaches an optional note; blank input is ignored.
    pub fn set_emergency_note(&mut self, note: &str) {
        let trimmed = note.trim();
        if !trimmed.is_empty() {
            self.emergency_note = Some(trimmed.to_string());
        }
    }

    pub fn requested_ambulances(&self) -> u32 {
        self.requested_ambulances
    }

    pub fn dispatched_ambulances(&self) -> u32 {
        self.dispatched_ambulances
    }

    /// Records the desired ambulance count for this incident.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidInput` if `count` is zero.
    pub fn request_ambulances(&mut self, count: u32) -> HospitalResult<()> {
        if count == 0 {
            return Err(HospitalError::InvalidInput(
                "ambulance count must be positive".into(),
            ));
        }
        self.requested_ambulances = count;
        Ok(())
    }

    /// Dispatches the requested ambulances from the shared fleet.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::AmbulanceShortage` when the fleet cannot
    /// cover the request; neither the fleet nor this appointment changes,
    /// so the caller can lower the request and retry.
    pub fn dispatch_ambulances(&mut self) -> HospitalResult<()> {
        self.fleet.dispatch(self.requested_ambulances)?;
        self.dispatched_ambulances = self.requested_ambulances;
        tracing::info!(
            appointment = %self.core.id(),
            dispatched = self.dispatched_ambulances,
            remaining = self.fleet.remaining(),
            "ambulances dispatched"
        );
        Ok(())
    }

    /// Ambulances currently available in the shared fleet.
    pub fn remaining_ambulances(&self) -> u32 {
        self.fleet.remaining()
    }

    /// Whether the fleet could currently cover the request.
    pub fn has_sufficient_ambulances(&self) -> bool {
        self.requested_ambulances <= self.fleet.remaining()
    }

    /// Whether this incident counts as critical (level 4 or 5).
    pub fn is_critical_event(&self) -> bool {
        self.critical_level >= CRITICAL_EVENT_THRESHOLD
    }

    /// Injured/criticality snapshot for other modules.
    pub fn casualty_info(&self) -> CasualtyInfo {
        CasualtyInfo {
            injured_count: self.injured_count,
            critical_level: self.critical_level,
        }
    }

    pub fn details(&self) -> String {
        let note = self.emergency_note.as_deref().unwrap_or("none");
        format!(
            "EMERGENCY INCIDENT REPORT\nIncident    : {}\nCreated     : {}\nAddress     : {}\nInjured     : {}\nCriticality : {}\nNote        : {}\nDispatched  : {}\nRemaining   : {}\nStatus      : {}",
            self.core.id(),
            self.core.created_at().format("%d.%m.%Y %H:%M"),
            self.incident_address,
            self.injured_count,
            self.critical_level,
            note,
            self.dispatched_ambulances,
            self.fleet.remaining(),
            self.core.status(),
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "EMERGENCY | Incident {} | Criticality: {} | Injured: {}",
            self.core.id(),
            self.critical_level,
            self.injured_count
        )
    }
}
