//! Shared vocabulary for the hospital registry.
//!
//! Identifiers, departments and room types are used by the core registry, the command-script
//! interpreter and the binaries. Keeping them in one small crate gives every layer the same
//! parsing and labelling rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing or constructing shared types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypesError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input was not a non-negative integer identifier
    #[error("invalid identifier: '{0}'")]
    InvalidId(String),
    /// The input did not name a known department
    #[error("unknown department: '{0}'")]
    UnknownDepartment(String),
    /// The input did not name a known room type
    #[error("unknown room type: '{0}'")]
    UnknownRoomType(String),
}

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u32 {
                self.0
            }

            /// The identifier that follows this one, or `None` once `u32::MAX` is reached.
            pub const fn checked_next(self) -> Option<Self> {
                match self.0.checked_add(1) {
                    Some(raw) => Some(Self(raw)),
                    None => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u32>()
                    .map(Self)
                    .map_err(|_| TypesError::InvalidId(s.to_string()))
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }
    };
}

numeric_id!(
    /// Registry-assigned patient identifier.
    ///
    /// A `PatientId` is a plain value: holding one says nothing about whether the patient
    /// exists. Queues store these and resolve them through the registry when drained.
    PatientId
);

numeric_id!(
    /// Registry-assigned doctor identifier.
    DoctorId
);

// ============================================================================
// Departments
// ============================================================================

/// Clinical department a doctor belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    Cardiology,
    Neurology,
    Orthopedics,
    Pediatrics,
    Emergency,
    General,
}

/// Label rendered for a department with no entry in [`DEPARTMENT_LABELS`].
pub const UNMAPPED_DEPARTMENT_LABEL: &str = " ";

/// Human-readable department labels.
///
/// `Emergency` has no entry and renders as [`UNMAPPED_DEPARTMENT_LABEL`].
const DEPARTMENT_LABELS: &[(Department, &str)] = &[
    (Department::Cardiology, "CARDIOLOGY"),
    (Department::Neurology, "NEUROLOGY"),
    (Department::Orthopedics, "ORTHOPEDICS"),
    (Department::Pediatrics, "PEDIATRICS"),
    (Department::General, "GENERAL"),
];

impl Department {
    pub const ALL: [Department; 6] = [
        Department::Cardiology,
        Department::Neurology,
        Department::Orthopedics,
        Department::Pediatrics,
        Department::Emergency,
        Department::General,
    ];

    /// Display label for this department.
    ///
    /// Total over the enumeration: departments missing from the label table fall back to a
    /// single blank.
    pub fn label(self) -> &'static str {
        DEPARTMENT_LABELS
            .iter()
            .find(|(department, _)| *department == self)
            .map_or(UNMAPPED_DEPARTMENT_LABEL, |&(_, label)| label)
    }

    /// Canonical upper-case name, as accepted by [`Department::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Department::Cardiology => "CARDIOLOGY",
            Department::Neurology => "NEUROLOGY",
            Department::Orthopedics => "ORTHOPEDICS",
            Department::Pediatrics => "PEDIATRICS",
            Department::Emergency => "EMERGENCY",
            Department::General => "GENERAL",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Department {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise_enum_name(s);
        Department::ALL
            .into_iter()
            .find(|department| department.name() == wanted)
            .ok_or_else(|| TypesError::UnknownDepartment(s.to_string()))
    }
}

// ============================================================================
// Room types
// ============================================================================

/// Kind of room a patient is admitted to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    #[default]
    GeneralWard,
    Icu,
    PrivateRoom,
    SemiPrivate,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::GeneralWard,
        RoomType::Icu,
        RoomType::PrivateRoom,
        RoomType::SemiPrivate,
    ];

    /// Stable numeric code, in declaration order starting at 0.
    pub fn code(self) -> u8 {
        match self {
            RoomType::GeneralWard => 0,
            RoomType::Icu => 1,
            RoomType::PrivateRoom => 2,
            RoomType::SemiPrivate => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoomType::GeneralWard => "GENERAL_WARD",
            RoomType::Icu => "ICU",
            RoomType::PrivateRoom => "PRIVATE_ROOM",
            RoomType::SemiPrivate => "SEMI_PRIVATE",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoomType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise_enum_name(s);
        RoomType::ALL
            .into_iter()
            .find(|room| room.label() == wanted)
            .ok_or_else(|| TypesError::UnknownRoomType(s.to_string()))
    }
}

/// Accepts `private_room`, `Private-Room` and `PRIVATE_ROOM` alike.
fn normalise_enum_name(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('-', "_")
}

// ============================================================================
// Text
// ============================================================================

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// Returns `Err(TypesError::Empty)` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypesError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypesError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}
