use chrono::Utc;
use tracing::{debug, info};

use onboarding_chat::model::{PostActionIntegrationRequest, PostActionIntegrationResponse, User};
use onboarding_chat::{checklist_post, render_checklist};
use onboarding_core::domain::onboarding::{OnboardingState, Step, UserId};
use onboarding_core::errors::ApplicationError;

use crate::routes::{integration, persistence, AppState};

const FALLBACK_TEAM_NAME: &str = "Mattermost";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started { post_id: String },
    AlreadyStarted,
    SkippedBot,
}

/// Creates the user's record and posts the welcome checklist into the bot DM.
///
/// Users that already have a record are left alone, so repeated triggers
/// post nothing.
pub async fn start_for_user(
    app: &AppState,
    user: &User,
    correlation_id: &str,
) -> Result<StartOutcome, ApplicationError> {
    if user.is_bot {
        return Ok(StartOutcome::SkippedBot);
    }

    let user_id = UserId(user.id.clone());
    if app.states.find(&user_id).await.map_err(persistence)?.is_some() {
        debug!(
            event_name = "onboarding.start.skipped",
            correlation_id,
            user_id = %user_id,
            "onboarding already started"
        );
        return Ok(StartOutcome::AlreadyStarted);
    }

    let state = app
        .states
        .save(OnboardingState::started(user_id.clone(), Utc::now()))
        .await
        .map_err(persistence)?;

    let channel = app
        .host
        .get_direct_channel(&app.bot.user_id, &user.id)
        .await
        .map_err(integration)?;

    let message = welcome_message(app, user).await;
    let attachments =
        render_checklist(&state, app.translations(), app.callback_base_url.as_deref());
    let post = app
        .host
        .create_post(checklist_post(channel.id, app.bot.user_id.clone(), message, attachments))
        .await
        .map_err(integration)?;

    info!(
        event_name = "onboarding.started",
        correlation_id,
        user_id = %user_id,
        post_id = %post.id,
        "welcome checklist posted"
    );
    Ok(StartOutcome::Started { post_id: post.id })
}

/// Marks `step` complete and returns the rebuilt post for the clicked message.
pub async fn complete_step(
    app: &AppState,
    request: &PostActionIntegrationRequest,
    step: Step,
    correlation_id: &str,
) -> Result<PostActionIntegrationResponse, ApplicationError> {
    let user_id = UserId(request.user_id.clone());

    let mut state = app
        .states
        .find(&user_id)
        .await
        .map_err(persistence)?
        .unwrap_or_else(|| OnboardingState::new(user_id.clone()));
    let changed = state.mark_complete(step);
    let state = app.states.save(state).await.map_err(persistence)?;

    let user = app.host.get_user(&request.user_id).await.map_err(integration)?;
    let message = welcome_message(app, &user).await;
    let attachments =
        render_checklist(&state, app.translations(), app.callback_base_url.as_deref());

    let mut update =
        checklist_post(request.channel_id.clone(), request.user_id.clone(), message, attachments);
    update.id = request.post_id.clone();

    info!(
        event_name = "onboarding.step_completed",
        correlation_id,
        user_id = %user_id,
        step = %step,
        changed,
        completed = state.completed_count(),
        "onboarding step marked complete"
    );

    Ok(PostActionIntegrationResponse {
        update: Some(update),
        ephemeral_text: app.translations().step_marked_complete(step),
    })
}

async fn welcome_message(app: &AppState, user: &User) -> String {
    let team_name = primary_team_name(app, &user.id).await;
    app.translations().welcome_message(&user.display_name(), &team_name)
}

/// Display name of the user's first team, or a generic name when unknown.
async fn primary_team_name(app: &AppState, user_id: &str) -> String {
    match app.host.get_teams_for_user(user_id).await {
        Ok(teams) => teams
            .into_iter()
            .next()
            .map(|team| team.display_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| FALLBACK_TEAM_NAME.to_string()),
        Err(error) => {
            debug!(user_id, error = %error, "team lookup failed; using fallback team name");
            FALLBACK_TEAM_NAME.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use onboarding_chat::model::{Team, User};
    use onboarding_core::domain::onboarding::UserId;

    use super::{start_for_user, StartOutcome};
    use crate::routes::test_support::{app_state, new_user};

    #[tokio::test]
    async fn start_posts_welcome_checklist_into_bot_dm() {
        let (app, host) = app_state().await;
        let user = new_user("u1");
        host.add_user(user.clone()).await;
        let team = Team { id: "t1".into(), name: "eoto".into(), display_name: "EOTO".into() };
        host.add_team("u1", team).await;

        let outcome = start_for_user(&app, &user, "test").await.expect("start");

        assert!(matches!(outcome, StartOutcome::Started { .. }));
        let posts = host.posts().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].user_id, "bot-user");
        assert_eq!(posts[0].channel_id, "bot-user__u1");
        assert!(posts[0].message.starts_with("👋 Hallo Ada Lovelace, willkommen bei EOTO!"));
        assert_eq!(posts[0].props.attachments.len(), 6);

        let state = app.states.find(&UserId("u1".into())).await.expect("find").expect("state");
        assert!(state.started_at.is_some());
        assert_eq!(state.completed_count(), 0);
    }

    #[tokio::test]
    async fn second_start_posts_nothing() {
        let (app, host) = app_state().await;
        let user = new_user("u1");

        start_for_user(&app, &user, "test").await.expect("first");
        let second = start_for_user(&app, &user, "test").await.expect("second");

        assert_eq!(second, StartOutcome::AlreadyStarted);
        assert_eq!(host.posts().await.len(), 1);
    }

    #[tokio::test]
    async fn bots_are_skipped() {
        let (app, host) = app_state().await;
        let bot = User { is_bot: true, ..new_user("b1") };

        let outcome = start_for_user(&app, &bot, "test").await.expect("start");

        assert_eq!(outcome, StartOutcome::SkippedBot);
        assert!(host.posts().await.is_empty());
        assert_eq!(app.states.find(&UserId("b1".into())).await.expect("find"), None);
    }

    #[tokio::test]
    async fn missing_team_falls_back_to_generic_name() {
        let (app, host) = app_state().await;

        start_for_user(&app, &new_user("u2"), "test").await.expect("start");

        let posts = host.posts().await;
        assert!(posts[0].message.contains("willkommen bei Mattermost!"));
        assert!(posts[0].props.attachments.iter().all(|a| a.text.starts_with("☐ ")));
    }
}
