//! The hospital registry.
//!
//! The registry owns every patient, every doctor and the emergency queue. Callers refer to
//! entities by id only; each operation resolves the id again, delegates to the entity and
//! reports what happened.
//!
//! Lookups are linear scans over the owned collections. Ids are unique by construction, so the
//! first match is the only match.

use crate::config::CoreConfig;
use crate::constants::{FIRST_DOCTOR_ID, FIRST_PATIENT_ID};
use crate::doctor::Doctor;
use crate::error::{HmsError, HmsResult};
use crate::patient::Patient;
use crate::queue::EmergencyQueue;
use crate::report::{Booking, Consultation, Counters, DoctorInfo, PatientInfo, TestRequest, Triage};
use hms_types::{Department, DoctorId, PatientId, RoomType};
use std::sync::Arc;

/// Owner of all hospital state.
#[derive(Clone, Debug)]
pub struct Registry {
    cfg: Arc<CoreConfig>,
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    emergencies: EmergencyQueue,
    next_patient_id: PatientId,
    next_doctor_id: DoctorId,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Arc::new(CoreConfig::default()))
    }
}

impl Registry {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            patients: Vec::new(),
            doctors: Vec::new(),
            emergencies: EmergencyQueue::new(),
            next_patient_id: FIRST_PATIENT_ID,
            next_doctor_id: FIRST_DOCTOR_ID,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Register a patient and return the assigned id.
    ///
    /// # Errors
    ///
    /// [`HmsError::IdsExhausted`] once the counter cannot advance past `u32::MAX`. No patient is
    /// added and the counter stays put.
    pub fn register_patient(
        &mut self,
        name: impl Into<String>,
        age: u32,
        contact: impl Into<String>,
    ) -> HmsResult<PatientId> {
        let id = self.next_patient_id;
        let Some(following) = id.checked_next() else {
            tracing::error!(patient_id = %id, "patient ids exhausted");
            return Err(HmsError::IdsExhausted("patient"));
        };
        self.patients.push(Patient::new(id, name, age, contact));
        self.next_patient_id = following;
        tracing::info!(patient_id = %id, "patient registered");
        Ok(id)
    }

    /// Add a doctor and return the assigned id.
    ///
    /// # Errors
    ///
    /// [`HmsError::IdsExhausted`] once the counter cannot advance past `u32::MAX`.
    pub fn add_doctor(
        &mut self,
        name: impl Into<String>,
        department: Department,
    ) -> HmsResult<DoctorId> {
        let id = self.next_doctor_id;
        let Some(following) = id.checked_next() else {
            tracing::error!(doctor_id = %id, "doctor ids exhausted");
            return Err(HmsError::IdsExhausted("doctor"));
        };
        self.doctors.push(Doctor::new(id, name, department));
        self.next_doctor_id = following;
        tracing::info!(doctor_id = %id, department = department.name(), "doctor added");
        Ok(id)
    }

    pub fn counters(&self) -> Counters {
        Counters {
            next_patient_id: self.next_patient_id,
            next_doctor_id: self.next_doctor_id,
        }
    }

    // ------------------------------------------------------------------------
    // Patient workflow
    // ------------------------------------------------------------------------

    /// Admit a patient who is not currently admitted.
    ///
    /// Returns the history text recorded for the admission.
    ///
    /// # Errors
    ///
    /// - [`HmsError::PatientNotFound`] if `patient_id` does not resolve.
    /// - [`HmsError::AlreadyAdmitted`] if the patient is already admitted. Nothing changes,
    ///   including the room type.
    pub fn admit_patient(&mut self, patient_id: PatientId, room_type: RoomType) -> HmsResult<String> {
        let patient = self.patient_mut(patient_id)?;

        if patient.is_admitted() {
            tracing::warn!(patient_id = %patient_id, "admission refused: already admitted");
            return Err(HmsError::AlreadyAdmitted {
                patient_id,
                name: patient.name().to_string(),
            });
        }

        let entry = patient.admit(room_type);
        tracing::info!(patient_id = %patient_id, room_type = room_type.label(), "patient admitted");
        Ok(entry)
    }

    /// Discharge a patient.
    ///
    /// Only existence is checked. Discharging a patient who is not admitted still records a
    /// discharge entry.
    pub fn discharge_patient(&mut self, patient_id: PatientId) -> HmsResult<String> {
        let patient = self.patient_mut(patient_id)?;
        if !patient.is_admitted() {
            tracing::debug!(patient_id = %patient_id, "discharging a patient who is not admitted");
        }
        let entry = patient.discharge();
        tracing::info!(patient_id = %patient_id, "patient discharged");
        Ok(entry)
    }

    pub fn add_record(&mut self, patient_id: PatientId, text: impl Into<String>) -> HmsResult<()> {
        self.patient_mut(patient_id)?.add_record(text);
        tracing::info!(patient_id = %patient_id, "medical record added");
        Ok(())
    }

    pub fn request_test(
        &mut self,
        patient_id: PatientId,
        test_name: impl Into<String>,
    ) -> HmsResult<TestRequest> {
        let test_name = test_name.into();
        let patient = self.patient_mut(patient_id)?;
        patient.request_test(test_name.clone());
        tracing::info!(patient_id = %patient_id, test = %test_name, "test requested");

        Ok(TestRequest {
            patient_id,
            patient_name: patient.name().to_string(),
            test_name,
        })
    }

    /// Run a test for a patient. The result is fixed and the pending tests are not consumed.
    pub fn perform_test(&self, patient_id: PatientId) -> HmsResult<&'static str> {
        let result = self.patient(patient_id)?.perform_test();
        tracing::info!(patient_id = %patient_id, "test performed");
        Ok(result)
    }

    // ------------------------------------------------------------------------
    // Emergencies
    // ------------------------------------------------------------------------

    /// Queue an emergency case.
    ///
    /// The id is not checked; unknown ids are reported when the case is handled. Returns the
    /// number of queued cases including this one.
    pub fn add_emergency(&mut self, patient_id: PatientId) -> usize {
        self.emergencies.enqueue(patient_id);
        tracing::info!(patient_id = %patient_id, queued = self.emergencies.len(), "emergency added");
        self.emergencies.len()
    }

    /// Handle the longest-waiting emergency.
    pub fn handle_emergency(&mut self) -> Triage {
        let Some(patient_id) = self.emergencies.dequeue() else {
            tracing::debug!("no emergency cases to handle");
            return Triage::Empty;
        };

        match self.find_patient(patient_id) {
            Some(patient) => {
                tracing::info!(patient_id = %patient_id, "emergency handled");
                Triage::Handled {
                    patient_id,
                    name: patient.name().to_string(),
                }
            }
            None => {
                tracing::warn!(patient_id = %patient_id, "emergency case for unknown patient");
                Triage::UnknownPatient { patient_id }
            }
        }
    }

    pub fn emergencies(&self) -> &EmergencyQueue {
        &self.emergencies
    }

    // ------------------------------------------------------------------------
    // Appointments
    // ------------------------------------------------------------------------

    /// Book `patient_id` onto the tail of a doctor's appointment queue.
    ///
    /// # Errors
    ///
    /// [`HmsError::DoctorNotFound`] takes precedence over [`HmsError::PatientNotFound`]. In
    /// either case nothing is queued.
    pub fn book_appointment(
        &mut self,
        doctor_id: DoctorId,
        patient_id: PatientId,
    ) -> HmsResult<Booking> {
        let doctor_found = self.find_doctor(doctor_id).is_some();
        let patient_name = self.find_patient(patient_id).map(|p| p.name().to_string());

        if !doctor_found {
            tracing::warn!(doctor_id = %doctor_id, "booking failed: doctor not found");
            return Err(HmsError::DoctorNotFound(doctor_id));
        }
        let Some(patient_name) = patient_name else {
            tracing::warn!(patient_id = %patient_id, "booking failed: patient not found");
            return Err(HmsError::PatientNotFound(patient_id));
        };

        let doctor = self.doctor_mut(doctor_id)?;
        doctor.schedule_appointment(patient_id);
        tracing::info!(doctor_id = %doctor_id, patient_id = %patient_id, "appointment booked");

        Ok(Booking {
            doctor_id,
            doctor_name: doctor.name().to_string(),
            patient_id,
            patient_name,
        })
    }

    /// Let a doctor see the next booked patient.
    pub fn next_patient(&mut self, doctor_id: DoctorId) -> HmsResult<Consultation> {
        let doctor = self.doctor_mut(doctor_id)?;
        let doctor_name = doctor.name().to_string();

        let Some(patient_id) = doctor.next_patient() else {
            tracing::debug!(doctor_id = %doctor_id, "no appointments waiting");
            return Ok(Consultation::Empty { doctor_name });
        };

        let consultation = match self.find_patient(patient_id) {
            Some(patient) => {
                tracing::info!(doctor_id = %doctor_id, patient_id = %patient_id, "patient seen");
                Consultation::Seen {
                    doctor_name,
                    patient_id,
                    patient_name: patient.name().to_string(),
                }
            }
            None => {
                tracing::warn!(doctor_id = %doctor_id, patient_id = %patient_id, "appointment for unknown patient");
                Consultation::UnknownPatient {
                    doctor_name,
                    patient_id,
                }
            }
        };
        Ok(consultation)
    }

    // ------------------------------------------------------------------------
    // Read-only projections
    // ------------------------------------------------------------------------

    pub fn patient_info(&self, patient_id: PatientId) -> HmsResult<PatientInfo> {
        let patient = self.patient(patient_id)?;
        tracing::debug!(patient_id = %patient_id, "patient info requested");

        let history = patient
            .history()
            .map(|entry| {
                if self.cfg.history_timestamps() {
                    entry.timestamped()
                } else {
                    entry.text().to_string()
                }
            })
            .collect();

        Ok(PatientInfo {
            facility: self.cfg.facility_name().to_string(),
            id: patient.id(),
            name: patient.name().to_string(),
            age: patient.age(),
            contact: patient.contact().to_string(),
            admitted: patient.is_admitted(),
            room_type: patient.is_admitted().then(|| patient.room_type()),
            pending_tests: patient.pending_tests().map(str::to_string).collect(),
            history,
        })
    }

    pub fn doctor_info(&self, doctor_id: DoctorId) -> HmsResult<DoctorInfo> {
        let doctor = self.doctor(doctor_id)?;
        tracing::debug!(doctor_id = %doctor_id, "doctor info requested");

        Ok(DoctorInfo {
            facility: self.cfg.facility_name().to_string(),
            id: doctor.id(),
            name: doctor.name().to_string(),
            department: doctor.department(),
            department_label: doctor.department_name().to_string(),
            queued_appointments: doctor.appointments().len(),
        })
    }

    pub fn patient(&self, patient_id: PatientId) -> HmsResult<&Patient> {
        self.find_patient(patient_id)
            .ok_or(HmsError::PatientNotFound(patient_id))
    }

    pub fn doctor(&self, doctor_id: DoctorId) -> HmsResult<&Doctor> {
        self.find_doctor(doctor_id)
            .ok_or(HmsError::DoctorNotFound(doctor_id))
    }

    pub fn patients(&self) -> impl Iterator<Item = &Patient> + '_ {
        self.patients.iter()
    }

    pub fn doctors(&self) -> impl Iterator<Item = &Doctor> + '_ {
        self.doctors.iter()
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    fn find_patient(&self, patient_id: PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id() == patient_id)
    }

    fn find_doctor(&self, doctor_id: DoctorId) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id() == doctor_id)
    }

    fn patient_mut(&mut self, patient_id: PatientId) -> HmsResult<&mut Patient> {
        self.patients
            .iter_mut()
            .find(|p| p.id() == patient_id)
            .ok_or_else(|| {
                tracing::warn!(patient_id = %patient_id, "patient not found");
                HmsError::PatientNotFound(patient_id)
            })
    }

    fn doctor_mut(&mut self, doctor_id: DoctorId) -> HmsResult<&mut Doctor> {
        self.doctors
            .iter_mut()
            .find(|d| d.id() == doctor_id)
            .ok_or_else(|| {
                tracing::warn!(doctor_id = %doctor_id, "doctor not found");
                HmsError::DoctorNotFound(doctor_id)
            })
    }
}
