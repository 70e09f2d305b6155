//! Command scripts.
//!
//! A script is a plain-text sequence of registry commands, one per line. Blank lines and lines
//! starting with `#` are ignored. Arguments are shell-style words, so names containing spaces
//! are written in quotes:
//!
//! ```text
//! register-patient "John Doe" 35 555-1234
//! add-doctor "Dr. Smith" CARDIOLOGY
//! book 1 1
//! ```
//!
//! Parsing is all-or-nothing: a script with any malformed line is rejected before anything
//! runs. Running a script produces one [`Step`] per command.

use crate::constants::SCRIPT_COMMENT_PREFIX;
use crate::error::{HmsError, HmsResult, Outcome};
use crate::registry::Registry;
use hms_types::{Department, DoctorId, PatientId, RoomType};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The workflow the runner replays when no script is configured.
pub const DEFAULT_WORKFLOW: &str = include_str!("../scripts/default_workflow.hms");

/// A single registry command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    RegisterPatient {
        name: String,
        age: u32,
        contact: String,
    },
    AddDoctor {
        name: String,
        department: Department,
    },
    Admit {
        patient_id: PatientId,
        room_type: RoomType,
    },
    Discharge {
        patient_id: PatientId,
    },
    AddRecord {
        patient_id: PatientId,
        text: String,
    },
    RequestTest {
        patient_id: PatientId,
        test_name: String,
    },
    PerformTest {
        patient_id: PatientId,
    },
    Emergency {
        patient_id: PatientId,
    },
    HandleEmergency,
    Book {
        doctor_id: DoctorId,
        patient_id: PatientId,
    },
    NextPatient {
        doctor_id: DoctorId,
    },
    ShowPatient {
        patient_id: PatientId,
    },
    ShowDoctor {
        doctor_id: DoctorId,
    },
    Counters,
}

impl Command {
    /// Parse a command from its words. The first word is the command name.
    pub fn from_words(words: &[String]) -> Result<Self, String> {
        let Some((name, args)) = words.split_first() else {
            return Err("empty command".into());
        };

        let command = match name.as_str() {
            "register-patient" => {
                let [name, age, contact] = expect_args::<3>(name, args, "<name> <age> <contact>")?;
                Command::RegisterPatient {
                    name: name.clone(),
                    age: age
                        .parse()
                        .map_err(|_| format!("invalid age: '{age}'"))?,
                    contact: contact.clone(),
                }
            }
            "add-doctor" => {
                let [name, department] = expect_args::<2>(name, args, "<name> <department>")?;
                Command::AddDoctor {
                    name: name.clone(),
                    department: parse_word(department)?,
                }
            }
            "admit" => {
                let [patient, room] = expect_args::<2>(name, args, "<patient> <room-type>")?;
                Command::Admit {
                    patient_id: parse_word(patient)?,
                    room_type: parse_word(room)?,
                }
            }
            "discharge" => {
                let [patient] = expect_args::<1>(name, args, "<patient>")?;
                Command::Discharge {
                    patient_id: parse_word(patient)?,
                }
            }
            "add-record" => {
                let [patient, text] = expect_args::<2>(name, args, "<patient> <text>")?;
                Command::AddRecord {
                    patient_id: parse_word(patient)?,
                    text: text.clone(),
                }
            }
            "request-test" => {
                let [patient, test] = expect_args::<2>(name, args, "<patient> <test>")?;
                Command::RequestTest {
                    patient_id: parse_word(patient)?,
                    test_name: test.clone(),
                }
            }
            "perform-test" => {
                let [patient] = expect_args::<1>(name, args, "<patient>")?;
                Command::PerformTest {
                    patient_id: parse_word(patient)?,
                }
            }
            "emergency" => {
                let [patient] = expect_args::<1>(name, args, "<patient>")?;
                Command::Emergency {
                    patient_id: parse_word(patient)?,
                }
            }
            "handle-emergency" => {
                expect_args::<0>(name, args, "")?;
                Command::HandleEmergency
            }
            "book" => {
                let [doctor, patient] = expect_args::<2>(name, args, "<doctor> <patient>")?;
                Command::Book {
                    doctor_id: parse_word(doctor)?,
                    patient_id: parse_word(patient)?,
                }
            }
            "next-patient" => {
                let [doctor] = expect_args::<1>(name, args, "<doctor>")?;
                Command::NextPatient {
                    doctor_id: parse_word(doctor)?,
                }
            }
            "show-patient" => {
                let [patient] = expect_args::<1>(name, args, "<patient>")?;
                Command::ShowPatient {
                    patient_id: parse_word(patient)?,
                }
            }
            "show-doctor" => {
                let [doctor] = expect_args::<1>(name, args, "<doctor>")?;
                Command::ShowDoctor {
                    doctor_id: parse_word(doctor)?,
                }
            }
            "counters" => {
                expect_args::<0>(name, args, "")?;
                Command::Counters
            }
            other => return Err(format!("unknown command '{other}'")),
        };

        Ok(command)
    }

    /// Label used when an operation reports a failure.
    fn failure_label(&self) -> &'static str {
        match self {
            Command::Admit { .. } => "Admit Failed",
            Command::Discharge { .. } => "Discharge Failed",
            Command::AddRecord { .. } => "Record Failed",
            Command::RequestTest { .. } => "Test Request Failed",
            Command::PerformTest { .. } => "Test Failed",
            Command::Book { .. } => "Booking Failed",
            Command::NextPatient { .. } => "Consultation Failed",
            Command::ShowPatient { .. } | Command::ShowDoctor { .. } => "Display Failed",
            Command::RegisterPatient { .. }
            | Command::AddDoctor { .. }
            | Command::Emergency { .. }
            | Command::HandleEmergency
            | Command::Counters => "Failed",
        }
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words = shlex::split(line).ok_or_else(|| "unbalanced quotes".to_string())?;
        Command::from_words(&words)
    }
}

fn expect_args<'a, const N: usize>(
    name: &str,
    args: &'a [String],
    usage: &str,
) -> Result<&'a [String; N], String> {
    args.try_into().map_err(|_| {
        if usage.is_empty() {
            format!("'{name}' takes no arguments, got {}", args.len())
        } else {
            format!(
                "'{name}' expects {} argument(s) ({usage}), got {}",
                N,
                args.len()
            )
        }
    })
}

fn parse_word<T>(word: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    word.parse().map_err(|e: T::Err| e.to_string())
}

/// A parsed command with its position in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number.
    pub line: usize,
    pub source: String,
    pub command: Command,
}

/// A parsed command script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

impl Script {
    /// Parse script text.
    ///
    /// # Errors
    ///
    /// Returns [`HmsError::ScriptSyntax`] for the first malformed line.
    pub fn parse(text: &str) -> HmsResult<Self> {
        let mut lines = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let source = raw.trim();
            if source.is_empty() || source.starts_with(SCRIPT_COMMENT_PREFIX) {
                continue;
            }

            let line = index + 1;
            let command = source
                .parse::<Command>()
                .map_err(|message| HmsError::ScriptSyntax { line, message })?;

            lines.push(ScriptLine {
                line,
                source: source.to_string(),
                command,
            });
        }

        Ok(Self { lines })
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> HmsResult<Self> {
        let text = std::fs::read_to_string(path).map_err(HmsError::ScriptRead)?;
        tracing::debug!(path = %path.display(), "loaded script");
        Self::parse(&text)
    }

    /// The built-in default workflow.
    pub fn default_workflow() -> HmsResult<Self> {
        Self::parse(DEFAULT_WORKFLOW)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptLine> + '_ {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// What running one command produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    pub line: usize,
    pub command: String,
    pub outcome: Outcome,
    pub message: String,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Registry {
    /// Run one command and describe the result.
    pub fn execute(&mut self, command: &Command) -> (Outcome, String) {
        match self.dispatch(command) {
            Ok(done) => done,
            Err(err) => {
                let message = match err {
                    HmsError::AlreadyAdmitted { .. } => format!("{err}."),
                    _ => format!("{}: {err}.", command.failure_label()),
                };
                (err.outcome(), message)
            }
        }
    }

    /// Run every command of `script` in order.
    pub fn run_script(&mut self, script: &Script) -> Vec<Step> {
        script
            .iter()
            .map(|line| {
                let (outcome, message) = self.execute(&line.command);
                Step {
                    line: line.line,
                    command: line.source.clone(),
                    outcome,
                    message,
                }
            })
            .collect()
    }

    fn dispatch(&mut self, command: &Command) -> HmsResult<(Outcome, String)> {
        let done = match command {
            Command::RegisterPatient { name, age, contact } => {
                let id = self.register_patient(name.as_str(), *age, contact.as_str())?;
                (Outcome::Ok, format!("Patient registered with ID: {id}"))
            }
            Command::AddDoctor { name, department } => {
                let id = self.add_doctor(name.as_str(), *department)?;
                (Outcome::Ok, format!("Doctor added with ID: {id}"))
            }
            Command::Admit {
                patient_id,
                room_type,
            } => (Outcome::Ok, self.admit_patient(*patient_id, *room_type)?),
            Command::Discharge { patient_id } => {
                (Outcome::Ok, self.discharge_patient(*patient_id)?)
            }
            Command::AddRecord { patient_id, text } => {
                self.add_record(*patient_id, text.as_str())?;
                (
                    Outcome::Ok,
                    format!("Record added for patient ID: {patient_id}"),
                )
            }
            Command::RequestTest {
                patient_id,
                test_name,
            } => (
                Outcome::Ok,
                self.request_test(*patient_id, test_name.as_str())?
                    .to_string(),
            ),
            Command::PerformTest { patient_id } => {
                (Outcome::Ok, self.perform_test(*patient_id)?.to_string())
            }
            Command::Emergency { patient_id } => {
                self.add_emergency(*patient_id);
                (
                    Outcome::Ok,
                    format!("Emergency case added for patient ID: {patient_id}"),
                )
            }
            Command::HandleEmergency => {
                let triage = self.handle_emergency();
                (triage.outcome(), triage.to_string())
            }
            Command::Book {
                doctor_id,
                patient_id,
            } => (
                Outcome::Ok,
                self.book_appointment(*doctor_id, *patient_id)?.to_string(),
            ),
            Command::NextPatient { doctor_id } => {
                let consultation = self.next_patient(*doctor_id)?;
                (consultation.outcome(), consultation.to_string())
            }
            Command::ShowPatient { patient_id } => {
                (Outcome::Ok, self.patient_info(*patient_id)?.to_string())
            }
            Command::ShowDoctor { doctor_id } => {
                (Outcome::Ok, self.doctor_info(*doctor_id)?.to_string())
            }
            Command::Counters => (Outcome::Ok, self.counters().to_string()),
        };

        Ok(done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn run(text: &str) -> Vec<Step> {
        let script = Script::parse(text).expect("valid script");
        Registry::default().run_script(&script)
    }

    #[test]
    fn parses_quoted_names_and_skips_comments() {
        let script = Script::parse(
            "# staff\n\nadd-doctor \"Dr. Smith\" cardiology\n  register-patient 'Jane Smith' 28 555-5678\n",
        )
        .expect("parse");

        assert_eq!(script.len(), 2);
        let lines: Vec<&ScriptLine> = script.iter().collect();
        assert_eq!(lines[0].line, 3);
        assert_eq!(
            lines[0].command,
            Command::AddDoctor {
                name: "Dr. Smith".into(),
                department: Department::Cardiology,
            }
        );
        assert_eq!(
            lines[1].command,
            Command::RegisterPatient {
                name: "Jane Smith".into(),
                age: 28,
                contact: "555-5678".into(),
            }
        );
    }

    #[test]
    fn reports_line_of_first_syntax_error() {
        let err = Script::parse("counters\nadmit 1\nbogus\n").expect_err("bad arity");
        match err {
            HmsError::ScriptSyntax { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("'admit' expects 2"));
            }
            other => panic!("expected ScriptSyntax, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_commands_and_bad_values() {
        for (text, needle) in [
            ("transfer 1 2", "unknown command"),
            ("admit 1 PENTHOUSE", "unknown room type"),
            ("add-doctor Who DENTISTRY", "unknown department"),
            ("book one 2", "invalid identifier"),
            ("register-patient Ann old 555", "invalid age"),
            ("register-patient \"Ann 30 555", "unbalanced quotes"),
            ("handle-emergency now", "takes no arguments"),
        ] {
            let err = Script::parse(text).expect_err(text);
            assert!(
                err.to_string().contains(needle),
                "{text}: expected '{needle}' in '{err}'"
            );
        }
    }

    #[test]
    fn failures_are_reported_not_raised() {
        let steps = run(
            "admit 999 ICU\nadd-doctor \"Dr. Smith\" CARDIOLOGY\nbook 1 999\nbook 999 1\nshow-patient 999\nshow-doctor 999\n",
        );

        let messages: Vec<&str> = steps.iter().map(|s| s.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Admit Failed: Patient with ID 999 not found.",
                "Doctor added with ID: 1",
                "Booking Failed: Patient with ID 999 not found.",
                "Booking Failed: Doctor with ID 999 not found.",
                "Display Failed: Patient with ID 999 not found.",
                "Display Failed: Doctor with ID 999 not found.",
            ]
        );
        assert_eq!(steps[0].outcome, Outcome::NotFound);
        assert_eq!(steps[1].outcome, Outcome::Ok);
    }

    #[test]
    fn duplicate_admission_reports_invalid_state() {
        let steps = run("register-patient \"John Doe\" 35 555-1234\nadmit 1 PRIVATE_ROOM\nadmit 1 ICU\n");

        assert_eq!(steps[1].outcome, Outcome::Ok);
        assert!(steps[1].message.contains("John Doe"));
        assert_eq!(steps[2].outcome, Outcome::InvalidState);
        assert_eq!(steps[2].message, "Patient John Doe is already admitted.");
    }

    #[test]
    fn emergency_drain_reports_empty_and_dangling() {
        let steps = run("emergency 42\nhandle-emergency\nhandle-emergency\n");

        assert_eq!(steps[0].message, "Emergency case added for patient ID: 42");
        assert_eq!(steps[1].outcome, Outcome::Dangling);
        assert_eq!(
            steps[1].message,
            "Emergency case for unknown patient ID: 42"
        );
        assert_eq!(steps[2].outcome, Outcome::Empty);
        assert_eq!(steps[2].message, "No emergency cases to handle.");
    }

    #[test]
    fn default_workflow_runs_end_to_end() {
        let script = Script::default_workflow().expect("default workflow parses");
        let mut registry = Registry::default();
        let steps = registry.run_script(&script);

        assert_eq!(steps.len(), script.len());
        let messages: Vec<&str> = steps.iter().map(|s| s.message.as_str()).collect();

        assert!(messages.contains(&"Patient John Doe is already admitted."));
        assert!(messages.contains(&"Booking Failed: Doctor with ID 999 not found."));
        assert!(messages.contains(&"Emergency handled for patient: Mike Johnson"));
        assert!(messages.contains(&"Emergency handled for patient: John Doe"));
        assert!(messages.contains(&"No emergency cases to handle."));
        assert!(messages.contains(&"Mike Johnson has requested test: Blood Panel"));
        assert!(messages.contains(&"Doctor Dr. Smith is seeing patient: John Doe (ID 1)"));
        assert!(messages.contains(&"No appointments waiting for Doctor Dr. Smith."));

        let john = registry.patient(PatientId::new(1)).expect("John");
        assert_eq!(john.room_type(), RoomType::PrivateRoom);
        assert!(!registry.patient(PatientId::new(2)).expect("Jane").is_admitted());
        assert_eq!(messages.last(), Some(&"Patient Counter: 4\nDoctor Counter: 4"));
    }

    #[test]
    fn steps_serialize_with_snake_case_outcomes() {
        let steps = run("handle-emergency\n");
        let json = serde_json::to_value(&steps).expect("serialize");
        assert_eq!(json[0]["outcome"], "empty");
        assert_eq!(json[0]["line"], 1);
        assert_eq!(json[0]["command"], "handle-emergency");
    }

    #[test]
    fn loads_script_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "register-patient \"John Doe\" 35 555-1234").expect("write");
        writeln!(file, "show-patient 1").expect("write");

        let script = Script::load(file.path()).expect("load");
        let steps = Registry::default().run_script(&script);
        assert!(steps[1].message.contains("Name: John Doe"));
    }

    #[test]
    fn missing_script_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = Script::load(&dir.path().join("missing.hms")).expect_err("missing");
        assert!(matches!(err, HmsError::ScriptRead(_)));
    }
}
