//! Constants used throughout the registry core.

use hms_types::{DoctorId, PatientId};

/// First identifier handed out by a fresh registry.
pub const FIRST_PATIENT_ID: PatientId = PatientId::new(1);

/// First identifier handed out by a fresh registry.
pub const FIRST_DOCTOR_ID: DoctorId = DoctorId::new(1);

/// Facility name used when none is configured.
pub const DEFAULT_FACILITY_NAME: &str = "General Hospital";

/// Result reported by every test run.
pub const TEST_COMPLETED: &str = "test completed successfully";

/// Environment variable naming the facility.
pub const FACILITY_NAME_ENV: &str = "HMS_FACILITY_NAME";

/// Environment variable enabling timestamps on rendered history lines.
pub const HISTORY_TIMESTAMPS_ENV: &str = "HMS_HISTORY_TIMESTAMPS";

/// Environment variable naming a command script for the runner.
pub const SCRIPT_PATH_ENV: &str = "HMS_SCRIPT";

/// Prefix for comment lines in command scripts.
pub const SCRIPT_COMMENT_PREFIX: char = '#';
