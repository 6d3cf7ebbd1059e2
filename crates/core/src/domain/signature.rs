use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

const PRONOUN_SEPARATOR: &str = " / ";
const NO_PRONOUNS_SENTINELS: [&str; 2] = ["keine pronomen", "no pronouns"];

/// Organisation projects; each selects its own signature template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Project {
    #[default]
    #[serde(rename = "each-one")]
    EachOne,
    #[serde(rename = "community")]
    Community,
    #[serde(rename = "cuz")]
    Cuz,
    #[serde(rename = "jugend")]
    Jugend,
    #[serde(rename = "nar")]
    Nar,
    #[serde(rename = "afrolution")]
    Afrolution,
}

impl Project {
    pub const ALL: [Project; 6] = [
        Project::EachOne,
        Project::Community,
        Project::Cuz,
        Project::Jugend,
        Project::Nar,
        Project::Afrolution,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EachOne => "each-one",
            Self::Community => "community",
            Self::Cuz => "cuz",
            Self::Jugend => "jugend",
            Self::Nar => "nar",
            Self::Afrolution => "afrolution",
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Project {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Project::ALL
            .into_iter()
            .find(|project| project.as_str() == value)
            .ok_or_else(|| DomainError::UnknownProject(value.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignatureField {
    FullName,
    Position,
    Email,
    Project,
}

impl SignatureField {
    /// Dialog element name the host reports errors against.
    pub fn form_name(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Position => "position",
            Self::Email => "email",
            Self::Project => "project",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    UnknownProject(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<SignatureField, FieldProblem>);

impl FieldErrors {
    pub fn insert(&mut self, field: SignatureField, problem: FieldProblem) {
        self.0.insert(field, problem);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: SignatureField) -> Option<&FieldProblem> {
        self.0.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignatureField, &FieldProblem)> {
        self.0.iter().map(|(field, problem)| (*field, problem))
    }
}

/// Raw dialog values, exactly as submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureForm {
    pub full_name: String,
    pub position: String,
    pub pronouns: String,
    pub email: String,
    pub project: String,
    pub work_number: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureRequest {
    pub full_name: String,
    pub position: String,
    pub pronouns: Option<String>,
    pub email: String,
    pub project: Project,
    pub work_number: Option<String>,
}

impl SignatureForm {
    pub fn validate(&self) -> Result<SignatureRequest, FieldErrors> {
        let mut errors = FieldErrors::default();

        let full_name = required(&self.full_name, SignatureField::FullName, &mut errors);
        let position = required(&self.position, SignatureField::Position, &mut errors);
        let email = required(&self.email, SignatureField::Email, &mut errors);
        let project = match required(&self.project, SignatureField::Project, &mut errors) {
            Some(raw) => match raw.parse::<Project>() {
                Ok(project) => Some(project),
                Err(_) => {
                    errors.insert(SignatureField::Project, FieldProblem::UnknownProject(raw));
                    None
                }
            },
            None => None,
        };

        match (full_name, position, email, project) {
            (Some(full_name), Some(position), Some(email), Some(project)) if errors.is_empty() => {
                Ok(SignatureRequest {
                    full_name,
                    position,
                    pronouns: optional(&self.pronouns),
                    email,
                    project,
                    work_number: optional(&self.work_number),
                })
            }
            _ => Err(errors),
        }
    }
}

impl SignatureRequest {
    /// `Max_Mustermann_each-one_Signatur.html`
    pub fn file_name(&self) -> String {
        format!("{}_{}_Signatur.html", self.full_name.replace(' ', "_"), self.project)
    }

    pub fn formatted_pronouns(&self) -> String {
        self.pronouns.as_deref().map(format_pronouns).unwrap_or_default()
    }
}

/// Turns `"er/ihm / he/him"` into `"Pronomen er/ihm - pronouns he/him"`.
///
/// Anything that is not exactly two halves around `" / "`, or that names the
/// "no pronouns" option in either language, is returned unchanged.
pub fn format_pronouns(pronouns: &str) -> String {
    let parts: Vec<&str> = pronouns.split(PRONOUN_SEPARATOR).collect();
    let [first, second] = parts.as_slice() else {
        return pronouns.to_owned();
    };

    let first = first.trim();
    let second = second.trim();
    if is_no_pronouns(first) || is_no_pronouns(second) {
        return pronouns.to_owned();
    }

    format!("Pronomen {first} - pronouns {second}")
}

fn is_no_pronouns(part: &str) -> bool {
    let lowered = part.to_lowercase();
    NO_PRONOUNS_SENTINELS.contains(&lowered.as_str())
}

fn clean(value: &str) -> String {
    value.replace(['\r', '\n'], " ").trim().to_owned()
}

fn required(value: &str, field: SignatureField, errors: &mut FieldErrors) -> Option<String> {
    let cleaned = clean(value);
    if cleaned.is_empty() {
        errors.insert(field, FieldProblem::Missing);
        return None;
    }
    Some(cleaned)
}

fn optional(value: &str) -> Option<String> {
    Some(clean(value)).filter(|cleaned| !cleaned.is_empty())
}
