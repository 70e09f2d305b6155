//! # HMS Core
//!
//! Core business logic for the in-memory hospital registry.
//!
//! This crate contains the entities and the workflow rules:
//! - Patients with admission state, an append-only medical history and requested tests
//! - Doctors with a first-in-first-out appointment queue
//! - The [`Registry`], which owns everything, assigns ids and routes every operation
//! - Command scripts that drive a registry from plain text
//!
//! **No process concerns**: logging setup, environment loading and argument parsing belong in
//! the binaries.

pub mod config;
pub mod constants;
pub mod doctor;
pub mod error;
pub mod history;
pub mod patient;
pub mod queue;
pub mod registry;
pub mod report;
pub mod script;

pub use config::CoreConfig;
pub use doctor::Doctor;
pub use error::{HmsError, HmsResult, Outcome};
pub use history::{HistoryEntry, MedicalHistoryLog};
pub use patient::Patient;
pub use queue::{AppointmentQueue, EmergencyQueue, PatientQueue};
pub use registry::Registry;
pub use report::{Booking, Consultation, Counters, DoctorInfo, PatientInfo, TestRequest, Triage};
pub use script::{Command, Script, ScriptLine, Step, DEFAULT_WORKFLOW};

// Re-export the shared vocabulary so callers need only this crate.
pub use hms_types::{Department, DoctorId, NonEmptyText, PatientId, RoomType, TypesError};
