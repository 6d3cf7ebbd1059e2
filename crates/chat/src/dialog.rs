use onboarding_core::domain::signature::Project;
use onboarding_core::i18n::Translations;

use crate::model::{Dialog, DialogElement, DialogOption, OpenDialogRequest, User};

pub const SUBMIT_SIGNATURE_PATH: &str = "/submit-signature";

/// The signature form, pre-filled with what the host knows about the user.
pub fn signature_dialog(
    tr: &Translations,
    user: &User,
    trigger_id: impl Into<String>,
    callback_base_url: &str,
) -> OpenDialogRequest {
    let copy = &tr.dialog;

    let elements = vec![
        DialogElement {
            display_name: copy.full_name.to_string(),
            name: "full_name".to_string(),
            kind: "text".to_string(),
            default: user.full_name(),
            placeholder: "Max Mustermann".to_string(),
            help_text: copy.full_name_help.to_string(),
            ..DialogElement::default()
        },
        DialogElement {
            display_name: copy.position.to_string(),
            name: "position".to_string(),
            kind: "text".to_string(),
            placeholder: "Projektkoordinator*in".to_string(),
            help_text: copy.position_help.to_string(),
            ..DialogElement::default()
        },
        DialogElement {
            display_name: copy.pronouns.to_string(),
            name: "pronouns".to_string(),
            kind: "text".to_string(),
            placeholder: copy.pronouns_placeholder.to_string(),
            help_text: copy.pronouns_help.to_string(),
            optional: true,
            ..DialogElement::default()
        },
        DialogElement {
            display_name: copy.email.to_string(),
            name: "email".to_string(),
            kind: "text".to_string(),
            subtype: "email".to_string(),
            default: user.email.clone(),
            help_text: copy.email_help.to_string(),
            ..DialogElement::default()
        },
        DialogElement {
            display_name: copy.project.to_string(),
            name: "project".to_string(),
            kind: "select".to_string(),
            default: Project::default().as_str().to_string(),
            help_text: copy.project_help.to_string(),
            options: Project::ALL
                .into_iter()
                .map(|project| DialogOption {
                    text: tr.project_name(project).to_string(),
                    value: project.as_str().to_string(),
                })
                .collect(),
            ..DialogElement::default()
        },
        DialogElement {
            display_name: copy.work_number.to_string(),
            name: "work_number".to_string(),
            kind: "text".to_string(),
            subtype: "tel".to_string(),
            placeholder: copy.work_number_placeholder.to_string(),
            help_text: copy.work_number_help.to_string(),
            optional: true,
            ..DialogElement::default()
        },
    ];

    OpenDialogRequest {
        trigger_id: trigger_id.into(),
        url: format!("{callback_base_url}{SUBMIT_SIGNATURE_PATH}"),
        dialog: Dialog {
            title: copy.title.to_string(),
            introduction_text: copy.intro.to_string(),
            elements,
            submit_label: copy.submit.to_string(),
            notify_on_cancel: false,
        },
    }
}
