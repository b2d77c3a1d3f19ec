use chrono::{Duration, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ada_core::appointment::{EmergencyAppointment, OnlineAppointment, RoutineAppointment};
use ada_core::patient::{EmergencyPatient, Inpatient, Outpatient};
use ada_core::{
    AppointmentRepository, AppointmentService, EmergencyLevel, HospitalConfig, PatientRepository,
    PatientService, PatientStatus,
};
use ada_types::{Age, AppointmentId, Gender, PersonName};

/// Walks the hospital core through a day of operations: registrations,
/// triage, an emergency admission, bookings with a rejected double-booking,
/// and an ambulance dispatch. All state is in memory and is gone when the
/// process exits.
///
/// # Environment Variables
/// - `RUST_LOG`: tracing filter, merged with the default `ada=info`
fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("ada=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = HospitalConfig::default();
    let ward = config.ward_capacity();
    let fleet = config.ambulance_fleet();
    tracing::info!(
        hospital = ada_core::constants::HOSPITAL_NAME,
        beds = ward.max(),
        ambulances = fleet.total(),
        "hospital core initialised"
    );

    let mut patients = PatientService::new(PatientRepository::new(&config), ward.clone());
    let mut appointments = AppointmentService::new(AppointmentRepository::new());

    // Registrations: an outpatient with a booked date, an inpatient who
    // gets the lowest free room, and an emergency arrival.
    let outpatient_id = patients.register_patient(
        Outpatient::new(
            None,
            PersonName::new("ayse yilmaz")?,
            Age::new(34)?,
            Gender::Female,
            Some("2026-09-02"),
            PatientStatus::Active,
        )?
        .into(),
    )?;

    let inpatient_id = patients.register_patient(
        Inpatient::new(
            None,
            PersonName::new("mehmet demir")?,
            Age::new(58)?,
            Gender::Male,
            None,
            PatientStatus::Active,
            &ward,
        )?
        .into(),
    )?;

    let mut arrival = EmergencyPatient::new(
        None,
        PersonName::new("fatma celik")?,
        Age::new(71)?,
        Gender::Female,
        EmergencyLevel::Low,
        None,
        PatientStatus::Emergency,
    )?;
    arrival.add_symptoms(["chest pain", "dizziness"]);
    let assessment = arrival.evaluate_triage();
    tracing::info!(level = %assessment.level.as_number(), area = ?assessment.area, "triage assessed");
    arrival.apply_triage(assessment);
    let emergency_id = patients.register_patient(arrival.into())?;

    tracing::info!(ward = %ward.occupancy_info(), "after registrations");

    // The emergency patient stabilises into a ward bed.
    let room = patients.admit_emergency_patient(emergency_id)?;
    tracing::info!(patient = %emergency_id, %room, "moved to the ward");

    // Bookings. The second request asks for the slot the first one holds
    // and is turned away.
    let mut rng = rand::thread_rng();
    let slot = Utc::now() + Duration::days(1);
    appointments.create_appointment(
        RoutineAppointment::new(
            AppointmentId::new(1)?,
            outpatient_id,
            PersonName::new("deniz acar")?,
            slot,
            config.rooms()[0],
            Some(45),
            None,
            &mut rng,
        )?
        .into(),
    )?;

    let rejected = RoutineAppointment::new(
        AppointmentId::new(2)?,
        inpatient_id,
        PersonName::new("deniz acar")?,
        slot,
        config.rooms()[1],
        None,
        None,
        &mut rng,
    )?;
    if let Err(err) = appointments.create_appointment(rejected.into()) {
        tracing::warn!(%err, "booking rejected");
    }

    let online = OnlineAppointment::new(
        AppointmentId::new(3)?,
        outpatient_id,
        PersonName::new("Elif Kaya")?,
        slot + Duration::hours(3),
        "cardiology",
    )?;
    tracing::info!(fee = online.consultation_fee(), "online consultation priced");
    appointments.create_appointment(online.into())?;

    // A traffic incident: three injured, two ambulances out of the fleet.
    let mut incident = EmergencyAppointment::new(
        AppointmentId::new(4)?,
        emergency_id,
        PersonName::new("kerem olmez")?,
        Utc::now(),
        &fleet,
    );
    incident.set_injured_count(3)?;
    incident.set_incident_address("Kordon Boyu 17")?;
    incident.set_critical_level(3)?;
    incident.request_ambulances(2)?;
    incident.dispatch_ambulances()?;
    tracing::info!(remaining = fleet.remaining(), "fleet after dispatch");
    appointments.create_appointment(incident.into())?;

    for patient in patients.list_patients_by_priority(true) {
        tracing::info!(summary = %patient.detailed_info(), "active patient");
    }
    for appointment in appointments.list_all() {
        tracing::info!(summary = %appointment.summary(), "appointment");
    }

    patients.discharge_patient(inpatient_id)?;
    tracing::info!(
        ward = %ward.occupancy_info(),
        patients = patients.total_patient_count(),
        appointments = appointments.count(),
        "end of day"
    );

    Ok(())
}
