//! Patient entity.
//!
//! A patient owns its admission state, its medical history and its queue of requested tests.
//! Guards that depend on the rest of the hospital (for example refusing a second admission)
//! belong to the [`Registry`](crate::Registry), not here.

use crate::constants::TEST_COMPLETED;
use crate::history::{HistoryEntry, MedicalHistoryLog};
use hms_types::{PatientId, RoomType};
use std::collections::VecDeque;

/// A registered patient.
#[derive(Clone, Debug)]
pub struct Patient {
    id: PatientId,
    name: String,
    age: u32,
    contact: String,
    admitted: bool,
    /// Last room assigned. Kept after discharge.
    room_type: RoomType,
    history: MedicalHistoryLog,
    pending_tests: VecDeque<String>,
}

impl Patient {
    pub fn new(id: PatientId, name: impl Into<String>, age: u32, contact: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            contact: contact.into(),
            admitted: false,
            room_type: RoomType::default(),
            history: MedicalHistoryLog::new(),
            pending_tests: VecDeque::new(),
        }
    }

    /// Admit to `room_type` and record it.
    ///
    /// Does not check whether the patient is already admitted; callers must consult
    /// [`Patient::is_admitted`] first.
    ///
    /// Returns the recorded history text.
    pub fn admit(&mut self, room_type: RoomType) -> String {
        self.admitted = true;
        self.room_type = room_type;
        let text = format!(
            "Patient: {} --> has been admitted to room type: {} ({})",
            self.name,
            room_type.code(),
            room_type.label()
        );
        self.history.append(text.clone());
        text
    }

    /// Discharge and record it. Unguarded: discharging a patient who is not admitted still
    /// appends an entry.
    pub fn discharge(&mut self) -> String {
        self.admitted = false;
        let text = format!("Patient: {} --> has been discharged", self.name);
        self.history.append(text.clone());
        text
    }

    pub fn add_record(&mut self, text: impl Into<String>) {
        self.history.append(text);
    }

    /// Queue a test for this patient.
    pub fn request_test(&mut self, test_name: impl Into<String>) {
        self.pending_tests.push_back(test_name.into());
    }

    /// Run a test.
    ///
    /// Always succeeds with the same result and leaves the pending tests untouched.
    pub fn perform_test(&self) -> &'static str {
        TEST_COMPLETED
    }

    /// History entries from newest to oldest.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> + '_ {
        self.history.iter()
    }

    /// Requested tests, oldest first.
    pub fn pending_tests(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.pending_tests.iter().map(String::as_str)
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn is_admitted(&self) -> bool {
        self.admitted
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }
}
