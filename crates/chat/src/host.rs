use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Bot, BotPatch, Channel, FileInfo, OpenDialogRequest, Post, Team, User};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("host request to `{endpoint}` failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("host returned {status} for `{endpoint}`: {message}")]
    Status { endpoint: String, status: u16, message: String },
    #[error("`{0}` was not found on the host")]
    NotFound(String),
    #[error("`{0}` already exists on the host")]
    Conflict(String),
    #[error("could not decode host response from `{endpoint}`: {message}")]
    Decode { endpoint: String, message: String },
}

/// Bot account fields sent on creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotSpec {
    pub username: String,
    pub display_name: String,
    pub description: String,
}

/// The slice of the chat host's API the onboarding bot relies on.
#[async_trait]
pub trait HostApi: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<User, HostError>;

    /// `Ok(None)` when no account has that username.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, HostError>;

    async fn get_teams_for_user(&self, user_id: &str) -> Result<Vec<Team>, HostError>;

    async fn get_direct_channel(&self, user_a: &str, user_b: &str) -> Result<Channel, HostError>;

    async fn create_post(&self, post: Post) -> Result<Post, HostError>;

    async fn open_interactive_dialog(&self, request: OpenDialogRequest) -> Result<(), HostError>;

    async fn upload_file(
        &self,
        channel_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<FileInfo, HostError>;

    async fn create_bot(&self, bot: &BotSpec) -> Result<Bot, HostError>;

    async fn patch_bot(&self, bot_user_id: &str, patch: BotPatch) -> Result<Bot, HostError>;

    async fn set_profile_image(&self, user_id: &str, image: Vec<u8>) -> Result<(), HostError>;
}
