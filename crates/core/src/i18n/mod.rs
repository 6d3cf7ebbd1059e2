//! User-facing copy for the onboarding bot, in German and English.

use crate::domain::onboarding::Step;
use crate::domain::signature::{FieldProblem, Project, SignatureField};

mod de;
mod en;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    /// Unrecognised settings fall back to German.
    pub fn from_setting(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Self::En,
            _ => Self::De,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
        }
    }

    pub fn translations(self) -> &'static Translations {
        match self {
            Self::De => &de::TRANSLATIONS,
            Self::En => &en::TRANSLATIONS,
        }
    }
}

#[derive(Debug)]
pub struct StepCopy {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
    pub button: &'static str,
}

#[derive(Debug)]
pub struct DialogCopy {
    pub title: &'static str,
    pub intro: &'static str,
    pub full_name: &'static str,
    pub full_name_help: &'static str,
    pub position: &'static str,
    pub position_help: &'static str,
    pub pronouns: &'static str,
    pub pronouns_placeholder: &'static str,
    pub pronouns_help: &'static str,
    pub email: &'static str,
    pub email_help: &'static str,
    pub project: &'static str,
    pub project_help: &'static str,
    pub work_number: &'static str,
    pub work_number_placeholder: &'static str,
    pub work_number_help: &'static str,
    pub submit: &'static str,
}

#[derive(Debug)]
pub struct ProjectNames {
    pub each_one: &'static str,
    pub community: &'static str,
    pub cuz: &'static str,
    pub jugend: &'static str,
    pub nar: &'static str,
    pub afrolution: &'static str,
}

#[derive(Debug)]
pub struct FieldCopy {
    pub full_name_required: &'static str,
    pub position_required: &'static str,
    pub email_required: &'static str,
    pub project_required: &'static str,
    pub project_unknown: &'static str,
}

/// `{name}`, `{team}`, `{step}` and `{project}` are substituted at use.
#[derive(Debug)]
pub struct Translations {
    pub welcome_greeting: &'static str,
    pub welcome_intro: &'static str,
    pub welcome_closing: &'static str,

    pub accounts: StepCopy,
    pub profile: StepCopy,
    pub channels: StepCopy,
    pub tools: StepCopy,
    pub policies: StepCopy,
    pub intro: StepCopy,
    pub button_generate_signature: &'static str,

    pub dialog: DialogCopy,
    pub projects: ProjectNames,
    pub fields: FieldCopy,

    pub signature_generated_title: &'static str,
    pub signature_generated_message: &'static str,
    pub signature_instructions_title: &'static str,
    pub signature_instructions_outlook: &'static str,
    pub signature_instructions_thunderbird: &'static str,
    pub signature_project_footer: &'static str,
    pub signature_render_failed: &'static str,
    pub signature_upload_failed: &'static str,

    pub step_marked_complete: &'static str,
    pub dialog_opening: &'static str,
}

impl Translations {
    pub fn step(&self, step: Step) -> &StepCopy {
        match step {
            Step::Accounts => &self.accounts,
            Step::Profile => &self.profile,
            Step::Channels => &self.channels,
            Step::Tools => &self.tools,
            Step::Policies => &self.policies,
            Step::Intro => &self.intro,
        }
    }

    pub fn project_name(&self, project: Project) -> &'static str {
        match project {
            Project::EachOne => self.projects.each_one,
            Project::Community => self.projects.community,
            Project::Cuz => self.projects.cuz,
            Project::Jugend => self.projects.jugend,
            Project::Nar => self.projects.nar,
            Project::Afrolution => self.projects.afrolution,
        }
    }

    pub fn field_problem(&self, field: SignatureField, problem: &FieldProblem) -> &'static str {
        match (field, problem) {
            (SignatureField::Project, FieldProblem::UnknownProject(_)) => {
                self.fields.project_unknown
            }
            (SignatureField::FullName, _) => self.fields.full_name_required,
            (SignatureField::Position, _) => self.fields.position_required,
            (SignatureField::Email, _) => self.fields.email_required,
            (SignatureField::Project, FieldProblem::Missing) => self.fields.project_required,
        }
    }

    pub fn welcome_message(&self, display_name: &str, team_name: &str) -> String {
        let greeting =
            self.welcome_greeting.replace("{name}", display_name).replace("{team}", team_name);
        format!("{greeting}\n\n{}\n\n{}", self.welcome_intro, self.welcome_closing)
    }

    pub fn step_marked_complete(&self, step: Step) -> String {
        self.step_marked_complete.replace("{step}", step.as_str())
    }

    pub fn signature_posted(&self, full_name: &str, project: Project) -> String {
        let project_name = self.project_name(project);
        let message = self
            .signature_generated_message
            .replace("{name}", full_name)
            .replace("{project}", project_name);
        let footer = self.signature_project_footer.replace("{project}", project_name);

        format!(
            "{}\n\n{message}{}{}{}{footer}",
            self.signature_generated_title,
            self.signature_instructions_title,
            self.signature_instructions_outlook,
            self.signature_instructions_thunderbird,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Language;
    use crate::domain::onboarding::Step;
    use crate::domain::signature::{FieldProblem, Project, SignatureField};

    #[test]
    fn language_setting_falls_back_to_german() {
        assert_eq!(Language::from_setting("en"), Language::En);
        assert_eq!(Language::from_setting(" EN "), Language::En);
        assert_eq!(Language::from_setting("de"), Language::De);
        assert_eq!(Language::from_setting("fr"), Language::De);
        assert_eq!(Language::from_setting(""), Language::De);
    }

    #[test]
    fn every_step_has_copy_in_both_languages() {
        for language in [Language::De, Language::En] {
            let tr = language.translations();
            for step in Step::ALL {
                let copy = tr.step(step);
                assert!(!copy.title.is_empty(), "{step} title missing for {language:?}");
                assert!(!copy.button.is_empty(), "{step} button missing for {language:?}");
                assert!(copy.link.starts_with('['), "{step} link should be markdown");
            }
        }
    }

    #[test]
    fn welcome_message_names_user_and_team() {
        let message = Language::En.translations().welcome_message("Ada Lovelace", "EOTO");

        assert!(message.starts_with("👋 Hi Ada Lovelace, welcome to EOTO!"));
        assert!(message.contains("\n\n"));
        assert!(!message.contains("{name}"));
    }

    #[test]
    fn step_confirmation_mentions_the_step() {
        assert_eq!(
            Language::De.translations().step_marked_complete(Step::Tools),
            "Schritt 'tools' als erledigt markiert ✔️"
        );
    }

    #[test]
    fn signature_post_uses_localized_project_name() {
        let message = Language::De.translations().signature_posted("Max", Project::Jugend);

        assert!(message.contains("Jugendangebote"));
        assert!(message.contains("Hallo Max"));
        assert!(message.ends_with("_Projekt: Jugendangebote_"));
    }

    #[test]
    fn unknown_project_has_its_own_message() {
        let tr = Language::En.translations();
        let unknown = tr.field_problem(
            SignatureField::Project,
            &FieldProblem::UnknownProject("x".to_string()),
        );

        assert_ne!(unknown, tr.field_problem(SignatureField::Project, &FieldProblem::Missing));
    }
}
