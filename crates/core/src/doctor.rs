//! Doctor entity and its appointment queue.

use crate::queue::AppointmentQueue;
use hms_types::{Department, DoctorId, PatientId};

/// A doctor on staff.
#[derive(Clone, Debug)]
pub struct Doctor {
    id: DoctorId,
    name: String,
    department: Department,
    appointments: AppointmentQueue,
}

impl Doctor {
    pub fn new(id: DoctorId, name: impl Into<String>, department: Department) -> Self {
        Self {
            id,
            name: name.into(),
            department,
            appointments: AppointmentQueue::new(),
        }
    }

    /// Queue `patient_id` behind any existing appointments.
    ///
    /// The id is not checked here; the registry validates it before booking.
    pub fn schedule_appointment(&mut self, patient_id: PatientId) {
        self.appointments.enqueue(patient_id);
    }

    /// Take the next booked patient, or `None` when nobody is waiting.
    pub fn next_patient(&mut self) -> Option<PatientId> {
        self.appointments.dequeue()
    }

    pub fn appointments(&self) -> &AppointmentQueue {
        &self.appointments
    }

    pub fn id(&self) -> DoctorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> Department {
        self.department
    }

    /// Department as shown to operators. Unlabelled departments render blank.
    pub fn department_name(&self) -> &'static str {
        self.department.label()
    }
}
