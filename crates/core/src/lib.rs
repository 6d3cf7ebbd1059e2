pub mod config;
pub mod domain;
pub mod errors;
pub mod i18n;
pub mod signature;

pub use domain::onboarding::{OnboardingState, Step, UserId};
pub use domain::signature::{
    format_pronouns, FieldErrors, FieldProblem, Project, SignatureField, SignatureForm,
    SignatureRequest,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use i18n::{Language, Translations};
pub use signature::{SignatureError, SignatureRenderer};
