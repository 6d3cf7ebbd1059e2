use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::host::{BotSpec, HostApi, HostError};
use crate::model::{Bot, BotPatch, Channel, FileInfo, OpenDialogRequest, Post, Team, User};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    pub channel_id: String,
    pub file_name: String,
    pub content: Vec<u8>,
}

#[derive(Default)]
struct HostState {
    users: HashMap<String, User>,
    teams: HashMap<String, Vec<Team>>,
    bots: HashMap<String, Bot>,
    posts: Vec<Post>,
    dialogs: Vec<OpenDialogRequest>,
    uploads: Vec<UploadedFile>,
    profile_images: Vec<String>,
    failing: Vec<&'static str>,
    next_id: u64,
}

impl HostState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn check(&self, operation: &'static str) -> Result<(), HostError> {
        if self.failing.contains(&operation) {
            return Err(HostError::Status {
                endpoint: operation.to_string(),
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

/// A host that keeps everything in memory and records what the bot did.
#[derive(Default)]
pub struct InMemoryHost {
    state: Mutex<HostState>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user: User) {
        self.state.lock().await.users.insert(user.id.clone(), user);
    }

    pub async fn add_team(&self, user_id: &str, team: Team) {
        self.state.lock().await.teams.entry(user_id.to_string()).or_default().push(team);
    }

    /// Makes every later call to `operation` (a `HostApi` method name) fail.
    pub async fn fail(&self, operation: &'static str) {
        self.state.lock().await.failing.push(operation);
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.lock().await.posts.clone()
    }

    pub async fn dialogs(&self) -> Vec<OpenDialogRequest> {
        self.state.lock().await.dialogs.clone()
    }

    pub async fn uploads(&self) -> Vec<UploadedFile> {
        self.state.lock().await.uploads.clone()
    }

    pub async fn bots(&self) -> Vec<Bot> {
        self.state.lock().await.bots.values().cloned().collect()
    }

    pub async fn profile_images(&self) -> Vec<String> {
        self.state.lock().await.profile_images.clone()
    }
}

/// Direct channel ids are stable per unordered user pair.
pub fn direct_channel_id(user_a: &str, user_b: &str) -> String {
    let (first, second) = if user_a <= user_b { (user_a, user_b) } else { (user_b, user_a) };
    format!("{first}__{second}")
}

#[async_trait]
impl HostApi for InMemoryHost {
    async fn get_user(&self, user_id: &str) -> Result<User, HostError> {
        let state = self.state.lock().await;
        state.check("get_user")?;
        state.users.get(user_id).cloned().ok_or_else(|| HostError::NotFound(user_id.to_string()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, HostError> {
        let state = self.state.lock().await;
        state.check("get_user_by_username")?;
        Ok(state.users.values().find(|user| user.username == username).cloned())
    }

    async fn get_teams_for_user(&self, user_id: &str) -> Result<Vec<Team>, HostError> {
        let state = self.state.lock().await;
        state.check("get_teams_for_user")?;
        Ok(state.teams.get(user_id).cloned().unwrap_or_default())
    }

    async fn get_direct_channel(&self, user_a: &str, user_b: &str) -> Result<Channel, HostError> {
        let state = self.state.lock().await;
        state.check("get_direct_channel")?;
        Ok(Channel { id: direct_channel_id(user_a, user_b) })
    }

    async fn create_post(&self, mut post: Post) -> Result<Post, HostError> {
        let mut state = self.state.lock().await;
        state.check("create_post")?;
        post.id = state.next_id("post");
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn open_interactive_dialog(&self, request: OpenDialogRequest) -> Result<(), HostError> {
        let mut state = self.state.lock().await;
        state.check("open_interactive_dialog")?;
        state.dialogs.push(request);
        Ok(())
    }

    async fn upload_file(
        &self,
        channel_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<FileInfo, HostError> {
        let mut state = self.state.lock().await;
        state.check("upload_file")?;
        let id = state.next_id("file");
        state.uploads.push(UploadedFile {
            channel_id: channel_id.to_string(),
            file_name: file_name.to_string(),
            content,
        });
        Ok(FileInfo { id, name: file_name.to_string() })
    }

    async fn create_bot(&self, bot: &BotSpec) -> Result<Bot, HostError> {
        let mut state = self.state.lock().await;
        state.check("create_bot")?;
        if state.users.values().any(|user| user.username == bot.username) {
            return Err(HostError::Conflict(bot.username.clone()));
        }

        let user_id = state.next_id("bot");
        let created = Bot {
            user_id: user_id.clone(),
            username: bot.username.clone(),
            display_name: bot.display_name.clone(),
            description: bot.description.clone(),
        };
        state.users.insert(
            user_id.clone(),
            User {
                id: user_id.clone(),
                username: bot.username.clone(),
                is_bot: true,
                ..User::default()
            },
        );
        state.bots.insert(user_id, created.clone());
        Ok(created)
    }

    async fn patch_bot(&self, bot_user_id: &str, patch: BotPatch) -> Result<Bot, HostError> {
        let mut state = self.state.lock().await;
        state.check("patch_bot")?;
        let bot = state
            .bots
            .get_mut(bot_user_id)
            .ok_or_else(|| HostError::NotFound(bot_user_id.to_string()))?;
        if let Some(display_name) = patch.display_name {
            bot.display_name = display_name;
        }
        if let Some(description) = patch.description {
            bot.description = description;
        }
        Ok(bot.clone())
    }

    async fn set_profile_image(&self, user_id: &str, _image: Vec<u8>) -> Result<(), HostError> {
        let mut state = self.state.lock().await;
        state.check("set_profile_image")?;
        state.profile_images.push(user_id.to_string());
        Ok(())
    }
}
