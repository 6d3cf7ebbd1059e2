use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::host::{BotSpec, HostApi, HostError};
use crate::model::{Bot, BotPatch, Channel, FileInfo, OpenDialogRequest, Post, Team, User};

/// `HostApi` over the Mattermost REST API (v4), authenticated with a bearer token.
pub struct MattermostClient {
    http: reqwest::Client,
    api_url: String,
    token: SecretString,
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    file_infos: Vec<FileInfo>,
}

impl MattermostClient {
    pub fn new(
        api_url: impl Into<String>,
        token: SecretString,
        timeout: Duration,
    ) -> Result<Self, HostError> {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            HostError::Transport { endpoint: api_url.clone(), message: e.to_string() }
        })?;
        Ok(Self { http, api_url, token })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path)).bearer_auth(self.token.expose_secret())
    }

    async fn send(&self, endpoint: &str, builder: RequestBuilder) -> Result<Response, HostError> {
        let response = builder.send().await.map_err(|e| HostError::Transport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "host api call");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify(endpoint, status, body))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        builder: RequestBuilder,
    ) -> Result<T, HostError> {
        let response = self.send(endpoint, builder).await?;
        response.json::<T>().await.map_err(|e| HostError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

fn classify(endpoint: &str, status: StatusCode, body: String) -> HostError {
    match status {
        StatusCode::NOT_FOUND => HostError::NotFound(endpoint.to_string()),
        StatusCode::CONFLICT => HostError::Conflict(endpoint.to_string()),
        StatusCode::BAD_REQUEST if body.contains("exists") => {
            HostError::Conflict(endpoint.to_string())
        }
        other => HostError::Status {
            endpoint: endpoint.to_string(),
            status: other.as_u16(),
            message: body,
        },
    }
}

#[async_trait]
impl HostApi for MattermostClient {
    async fn get_user(&self, user_id: &str) -> Result<User, HostError> {
        let path = format!("/users/{user_id}");
        self.send_json(&path, self.request(Method::GET, &path)).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, HostError> {
        let path = format!("/users/username/{username}");
        match self.send_json(&path, self.request(Method::GET, &path)).await {
            Ok(user) => Ok(Some(user)),
            Err(HostError::NotFound(_)) => Ok(None),
            Err(other) => Err(other),
        }
    }

    async fn get_teams_for_user(&self, user_id: &str) -> Result<Vec<Team>, HostError> {
        let path = format!("/users/{user_id}/teams");
        self.send_json(&path, self.request(Method::GET, &path)).await
    }

    async fn get_direct_channel(&self, user_a: &str, user_b: &str) -> Result<Channel, HostError> {
        let path = "/channels/direct";
        self.send_json(path, self.request(Method::POST, path).json(&[user_a, user_b])).await
    }

    async fn create_post(&self, post: Post) -> Result<Post, HostError> {
        let path = "/posts";
        self.send_json(path, self.request(Method::POST, path).json(&post)).await
    }

    async fn open_interactive_dialog(&self, request: OpenDialogRequest) -> Result<(), HostError> {
        let path = "/actions/dialogs/open";
        self.send(path, self.request(Method::POST, path).json(&request)).await?;
        Ok(())
    }

    async fn upload_file(
        &self,
        channel_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<FileInfo, HostError> {
        let path = "/files";
        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str("text/html")
            .map_err(|e| HostError::Transport {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;
        let form = Form::new().text("channel_id", channel_id.to_string()).part("files", part);

        let uploaded: UploadResponse =
            self.send_json(path, self.request(Method::POST, path).multipart(form)).await?;
        uploaded.file_infos.into_iter().next().ok_or_else(|| HostError::Decode {
            endpoint: path.to_string(),
            message: "upload response listed no files".to_string(),
        })
    }

    async fn create_bot(&self, bot: &BotSpec) -> Result<Bot, HostError> {
        let path = "/bots";
        let body = json!({
            "username": bot.username,
            "display_name": bot.display_name,
            "description": bot.description,
        });
        self.send_json(path, self.request(Method::POST, path).json(&body)).await
    }

    async fn patch_bot(&self, bot_user_id: &str, patch: BotPatch) -> Result<Bot, HostError> {
        let path = format!("/bots/{bot_user_id}");
        self.send_json(&path, self.request(Method::PUT, &path).json(&patch)).await
    }

    async fn set_profile_image(&self, user_id: &str, image: Vec<u8>) -> Result<(), HostError> {
        let path = format!("/users/{user_id}/image");
        let form = Form::new().part("image", Part::bytes(image).file_name("profile.png"));
        self.send(&path, self.request(Method::POST, &path).multipart(form)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;

    use super::{classify, MattermostClient};
    use crate::host::HostError;

    #[test]
    fn api_url_is_joined_without_double_slashes() {
        let client = MattermostClient::new(
            "https://chat.example.org/api/v4/",
            "token".to_string().into(),
            Duration::from_secs(5),
        )
        .expect("client");

        assert_eq!(client.url("/users/u1"), "https://chat.example.org/api/v4/users/u1");
    }

    #[test]
    fn status_codes_map_to_host_errors() {
        assert_eq!(
            classify("/users/x", StatusCode::NOT_FOUND, String::new()),
            HostError::NotFound("/users/x".to_string())
        );
        assert_eq!(
            classify("/bots", StatusCode::BAD_REQUEST, "username already exists".to_string()),
            HostError::Conflict("/bots".to_string())
        );
        assert!(matches!(
            classify("/posts", StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
            HostError::Status { status: 500, ref message, .. } if message == "boom"
        ));
    }
}
