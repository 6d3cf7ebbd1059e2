use serde_json::{Map, Value};
use tracing::warn;

use onboarding_core::domain::onboarding::{OnboardingState, Step};
use onboarding_core::i18n::Translations;

use crate::model::{
    Attachment, Post, PostAction, PostActionIntegration, PostActionType, PostProps,
};

pub const COMPLETE_STEP_PATH: &str = "/complete-step";
pub const OPEN_SIGNATURE_DIALOG: &str = "open_signature_dialog";

pub struct ChecklistBuilder {
    attachments: Vec<Attachment>,
}

impl ChecklistBuilder {
    pub fn new() -> Self {
        Self { attachments: Vec::new() }
    }

    pub fn attachment<F>(mut self, title: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut AttachmentBuilder),
    {
        let mut builder = AttachmentBuilder::default();
        build(&mut builder);
        self.attachments.push(builder.build(title.into()));
        self
    }

    pub fn build(self) -> Vec<Attachment> {
        self.attachments
    }
}

impl Default for ChecklistBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct AttachmentBuilder {
    text: String,
    actions: Vec<PostAction>,
}

impl AttachmentBuilder {
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    pub fn button(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
        context: Map<String, Value>,
    ) -> &mut Self {
        self.actions.push(PostAction {
            name: name.into(),
            kind: PostActionType::Button,
            integration: PostActionIntegration { url: url.into(), context },
        });
        self
    }

    fn build(self, title: String) -> Attachment {
        Attachment { title, text: self.text, actions: self.actions }
    }
}

pub fn checkbox(done: bool) -> &'static str {
    if done {
        "✅ "
    } else {
        "☐ "
    }
}

fn context(key: &str, value: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), Value::String(value.to_string()));
    map
}

/// One attachment per step, in step order, with a done button each.
///
/// Without a callback base URL every attachment is still rendered but
/// carries no buttons.
pub fn render_checklist(
    state: &OnboardingState,
    tr: &Translations,
    callback_base_url: Option<&str>,
) -> Vec<Attachment> {
    let callback_url = callback_base_url.map(|base| format!("{base}{COMPLETE_STEP_PATH}"));
    if callback_url.is_none() {
        warn!(
            event_name = "checklist.callback_url_missing",
            user_id = %state.user_id,
            "site url is not configured; rendering checklist without buttons"
        );
    }

    Step::ALL
        .into_iter()
        .fold(ChecklistBuilder::new(), |checklist, step| {
            let copy = tr.step(step);
            checklist.attachment(copy.title, |attachment| {
                attachment.text(format!(
                    "{} {}{}",
                    checkbox(state.is_complete(step)),
                    copy.description,
                    copy.link
                ));

                if let Some(url) = callback_url.as_deref() {
                    if step == Step::Profile {
                        attachment.button(
                            tr.button_generate_signature,
                            url,
                            context("action", OPEN_SIGNATURE_DIALOG),
                        );
                    }
                    attachment.button(copy.button, url, context("step", step.as_str()));
                }
            })
        })
        .build()
}

/// The welcome message with its checklist, as posted into the bot DM or
/// returned as the replacement for a clicked post.
pub fn checklist_post(
    channel_id: impl Into<String>,
    user_id: impl Into<String>,
    message: impl Into<String>,
    attachments: Vec<Attachment>,
) -> Post {
    Post {
        id: String::new(),
        channel_id: channel_id.into(),
        user_id: user_id.into(),
        message: message.into(),
        props: PostProps { attachments },
        file_ids: Vec::new(),
    }
}
