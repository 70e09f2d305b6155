//! Results of registry operations and their operator-facing rendering.
//!
//! Every value here implements `Display` with the status line an operator sees. The info
//! projections are also `Serialize` so the CLI can emit them as JSON.

use crate::error::Outcome;
use hms_types::{Department, DoctorId, PatientId, RoomType};
use serde::Serialize;
use std::fmt;

/// Result of draining the emergency queue once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Triage {
    /// Nothing was queued.
    Empty,
    /// The head id resolved to a patient.
    Handled { patient_id: PatientId, name: String },
    /// The head id did not resolve. It is consumed all the same.
    UnknownPatient { patient_id: PatientId },
}

impl Triage {
    /// Id removed from the queue, if any.
    pub fn patient_id(&self) -> Option<PatientId> {
        match self {
            Triage::Empty => None,
            Triage::Handled { patient_id, .. } | Triage::UnknownPatient { patient_id } => {
                Some(*patient_id)
            }
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Triage::Empty => Outcome::Empty,
            Triage::Handled { .. } => Outcome::Ok,
            Triage::UnknownPatient { .. } => Outcome::Dangling,
        }
    }
}

impl fmt::Display for Triage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Triage::Empty => write!(f, "No emergency cases to handle."),
            Triage::Handled { name, .. } => write!(f, "Emergency handled for patient: {name}"),
            Triage::UnknownPatient { patient_id } => {
                write!(f, "Emergency case for unknown patient ID: {patient_id}")
            }
        }
    }
}

/// Result of a doctor taking the next booked patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Consultation {
    Empty {
        doctor_name: String,
    },
    Seen {
        doctor_name: String,
        patient_id: PatientId,
        patient_name: String,
    },
    UnknownPatient {
        doctor_name: String,
        patient_id: PatientId,
    },
}

impl Consultation {
    pub fn patient_id(&self) -> Option<PatientId> {
        match self {
            Consultation::Empty { .. } => None,
            Consultation::Seen { patient_id, .. }
            | Consultation::UnknownPatient { patient_id, .. } => Some(*patient_id),
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Consultation::Empty { .. } => Outcome::Empty,
            Consultation::Seen { .. } => Outcome::Ok,
            Consultation::UnknownPatient { .. } => Outcome::Dangling,
        }
    }
}

impl fmt::Display for Consultation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Consultation::Empty { doctor_name } => {
                write!(f, "No appointments waiting for Doctor {doctor_name}.")
            }
            Consultation::Seen {
                doctor_name,
                patient_id,
                patient_name,
            } => write!(
                f,
                "Doctor {doctor_name} is seeing patient: {patient_name} (ID {patient_id})"
            ),
            Consultation::UnknownPatient {
                doctor_name,
                patient_id,
            } => write!(
                f,
                "Doctor {doctor_name} has an appointment for unknown patient ID: {patient_id}"
            ),
        }
    }
}

/// A confirmed appointment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub patient_id: PatientId,
    pub patient_name: String,
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment booked: Patient {} with Doctor {}",
            self.patient_name, self.doctor_name
        )
    }
}

/// Notification that a test was queued for a patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestRequest {
    pub patient_id: PatientId,
    pub patient_name: String,
    pub test_name: String,
}

impl fmt::Display for TestRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has requested test: {}",
            self.patient_name, self.test_name
        )
    }
}

/// Next identifiers the registry will hand out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub next_patient_id: PatientId,
    pub next_doctor_id: DoctorId,
}

impl fmt::Display for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Patient Counter: {}", self.next_patient_id)?;
        write!(f, "Doctor Counter: {}", self.next_doctor_id)
    }
}

/// Read-only view of a patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatientInfo {
    pub facility: String,
    pub id: PatientId,
    pub name: String,
    pub age: u32,
    pub contact: String,
    pub admitted: bool,
    /// Present only while admitted.
    pub room_type: Option<RoomType>,
    /// Oldest first.
    pub pending_tests: Vec<String>,
    /// Newest first, already rendered.
    pub history: Vec<String>,
}

impl fmt::Display for PatientInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Patient Information ({}) =====", self.facility)?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Age: {}", self.age)?;
        writeln!(f, "Contact: {}", self.contact)?;
        match self.room_type {
            Some(room) if self.admitted => writeln!(f, "Admission Status: Admitted ({room})")?,
            _ => writeln!(f, "Admission Status: Not Admitted")?,
        }
        if self.pending_tests.is_empty() {
            writeln!(f, "Pending Tests: none")?;
        } else {
            writeln!(f, "Pending Tests: {}", self.pending_tests.join(", "))?;
        }
        writeln!(f, "Medical history for {}:", self.name)?;
        for line in &self.history {
            writeln!(f, "- {line}")?;
        }
        write!(f, "=============================")
    }
}

/// Read-only view of a doctor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DoctorInfo {
    pub facility: String,
    pub id: DoctorId,
    pub name: String,
    pub department: Department,
    pub department_label: String,
    pub queued_appointments: usize,
}

impl fmt::Display for DoctorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Doctor Information ({}) =====", self.facility)?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Department: {}", self.department_label)?;
        writeln!(f, "Pending Appointments: {}", self.queued_appointments)?;
        write!(f, "==========================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triage_messages() {
        assert_eq!(Triage::Empty.to_string(), "No emergency cases to handle.");
        let handled = Triage::Handled {
            patient_id: PatientId::new(3),
            name: "Mike Johnson".into(),
        };
        assert_eq!(handled.to_string(), "Emergency handled for patient: Mike Johnson");
        assert_eq!(handled.patient_id(), Some(PatientId::new(3)));

        let unknown = Triage::UnknownPatient {
            patient_id: PatientId::new(42),
        };
        assert_eq!(
            unknown.to_string(),
            "Emergency case for unknown patient ID: 42"
        );
        assert_eq!(unknown.outcome(), Outcome::Dangling);
    }

    #[test]
    fn patient_info_hides_room_when_discharged() {
        let info = PatientInfo {
            facility: "General Hospital".into(),
            id: PatientId::new(1),
            name: "John Doe".into(),
            age: 35,
            contact: "555-1234".into(),
            admitted: false,
            room_type: None,
            pending_tests: vec![],
            history: vec!["Patient: John Doe --> has been discharged".into()],
        };
        let rendered = info.to_string();
        assert!(rendered.contains("Admission Status: Not Admitted"));
        assert!(rendered.contains("Pending Tests: none"));
        assert!(rendered.contains("- Patient: John Doe --> has been discharged"));
    }

    #[test]
    fn doctor_info_serializes_department_name() {
        let info = DoctorInfo {
            facility: "General Hospital".into(),
            id: DoctorId::new(1),
            name: "Dr. Grey".into(),
            department: Department::Emergency,
            department_label: Department::Emergency.label().into(),
            queued_appointments: 0,
        };
        let json = serde_json::to_value(&info).expect("serialize");
        assert_eq!(json["department"], "EMERGENCY");
        assert_eq!(json["department_label"], " ");
        assert!(info.to_string().contains("Department:  \n"));
    }
}
