//! JSON shapes exchanged with the chat host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use onboarding_core::domain::signature::SignatureForm;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_bot: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim()).trim().to_string()
    }

    /// Full name when set, otherwise the username.
    pub fn display_name(&self) -> String {
        let full_name = self.full_name();
        if full_name.is_empty() {
            self.username.clone()
        } else {
            full_name
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub display_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "PostProps::is_empty")]
    pub props: PostProps,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostProps {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl PostProps {
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub actions: Vec<PostAction>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostActionType {
    Button,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAction {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PostActionType,
    pub integration: PostActionIntegration,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostActionIntegration {
    pub url: String,
    #[serde(default)]
    pub context: Map<String, Value>,
}

/// Body the host posts to an integration URL when a button is clicked.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct PostActionIntegrationRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub post_id: String,
    #[serde(default)]
    pub trigger_id: String,
    #[serde(default)]
    pub context: Map<String, Value>,
}

impl PostActionIntegrationRequest {
    /// A string value from the button context; non-strings read as `None`.
    pub fn context_str(&self, key: &str) -> Option<&str> {
        self.context.get(key).and_then(Value::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostActionIntegrationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<Post>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ephemeral_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenDialogRequest {
    pub trigger_id: String,
    pub url: String,
    pub dialog: Dialog,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    pub title: String,
    pub introduction_text: String,
    pub elements: Vec<DialogElement>,
    pub submit_label: String,
    pub notify_on_cancel: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogElement {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subtype: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help_text: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<DialogOption>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogOption {
    pub text: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SubmitDialogRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub callback_id: String,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub submission: Map<String, Value>,
}

impl SubmitDialogRequest {
    fn text(&self, name: &str) -> String {
        self.submission.get(name).and_then(Value::as_str).unwrap_or_default().to_string()
    }

    /// Non-string or missing values become empty strings.
    pub fn signature_form(&self) -> SignatureForm {
        SignatureForm {
            full_name: self.text("full_name"),
            position: self.text("position"),
            pronouns: self.text("pronouns"),
            email: self.text("email"),
            project: self.text("project"),
            work_number: self.text("work_number"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitDialogResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{PostActionIntegrationRequest, SubmitDialogRequest, SubmitDialogResponse, User};

    #[test]
    fn display_name_falls_back_to_username() {
        let mut user = User { username: "ada".to_string(), ..User::default() };
        assert_eq!(user.display_name(), "ada");

        user.first_name = "Ada".to_string();
        assert_eq!(user.display_name(), "Ada");

        user.last_name = "Lovelace".to_string();
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn context_str_ignores_non_string_values() {
        let request: PostActionIntegrationRequest = serde_json::from_value(json!({
            "user_id": "u1",
            "context": { "step": 3, "action": "open_signature_dialog" }
        }))
        .expect("decode");

        assert_eq!(request.context_str("step"), None);
        assert_eq!(request.context_str("action"), Some("open_signature_dialog"));
        assert_eq!(request.context_str("missing"), None);
    }

    #[test]
    fn submission_maps_to_signature_form() {
        let request: SubmitDialogRequest = serde_json::from_value(json!({
            "user_id": "u1",
            "channel_id": "c1",
            "submission": {
                "full_name": "Max Mustermann",
                "position": "Lead",
                "email": "max@example.org",
                "project": "nar",
                "work_number": null
            }
        }))
        .expect("decode");

        let form = request.signature_form();
        assert_eq!(form.full_name, "Max Mustermann");
        assert_eq!(form.project, "nar");
        assert_eq!(form.pronouns, "");
        assert_eq!(form.work_number, "");
    }

    #[test]
    fn empty_dialog_response_serializes_to_empty_object() {
        let body = serde_json::to_value(SubmitDialogResponse::default()).expect("encode");
        assert_eq!(body, json!({}));
    }
}
