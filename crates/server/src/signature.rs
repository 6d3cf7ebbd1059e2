use std::collections::BTreeMap;

use tracing::{error, info, warn};

use onboarding_chat::model::{
    Post, PostActionIntegrationRequest, PostActionIntegrationResponse, SubmitDialogRequest,
    SubmitDialogResponse,
};
use onboarding_chat::signature_dialog;
use onboarding_core::domain::signature::FieldErrors;
use onboarding_core::errors::ApplicationError;
use onboarding_core::i18n::Translations;

use crate::routes::{integration, AppState};

/// Opens the signature form for the user who clicked the profile button.
pub async fn open_dialog(
    app: &AppState,
    request: &PostActionIntegrationRequest,
    correlation_id: &str,
) -> Result<PostActionIntegrationResponse, ApplicationError> {
    let user = app.host.get_user(&request.user_id).await.map_err(integration)?;
    let base_url = app.callback_base_url.as_deref().ok_or_else(|| {
        ApplicationError::Configuration("site url is not configured".to_string())
    })?;

    let dialog = signature_dialog(app.translations(), &user, request.trigger_id.clone(), base_url);
    app.host.open_interactive_dialog(dialog).await.map_err(integration)?;

    info!(
        event_name = "signature.dialog_opened",
        correlation_id,
        user_id = %request.user_id,
        "signature dialog opened"
    );
    Ok(PostActionIntegrationResponse {
        update: None,
        ephemeral_text: app.translations().dialog_opening.to_string(),
    })
}

/// Validates, renders and uploads a signature, then tells the user in the bot DM.
///
/// Every outcome is a dialog response: field problems come back per field so
/// the host can show them inline, anything else as a single error line.
pub async fn submit(
    app: &AppState,
    submission: &SubmitDialogRequest,
    correlation_id: &str,
) -> SubmitDialogResponse {
    let tr = app.translations();
    if submission.cancelled {
        return SubmitDialogResponse::default();
    }

    let request = match submission.signature_form().validate() {
        Ok(request) => request,
        Err(errors) => {
            info!(
                event_name = "signature.validation_failed",
                correlation_id,
                user_id = %submission.user_id,
                fields = errors.len(),
                "signature submission has field errors"
            );
            return SubmitDialogResponse { error: None, errors: field_messages(tr, &errors) };
        }
    };

    let html = match app.renderer.render(&request) {
        Ok(html) => html,
        Err(render_error) => {
            error!(
                event_name = "signature.render_failed",
                correlation_id,
                error = %render_error,
                "failed to render signature"
            );
            return error_response(tr.signature_render_failed);
        }
    };

    let file = match app
        .host
        .upload_file(&submission.channel_id, &request.file_name(), html.into_bytes())
        .await
    {
        Ok(file) => file,
        Err(upload_error) => {
            error!(
                event_name = "signature.upload_failed",
                correlation_id,
                channel_id = %submission.channel_id,
                error = %upload_error,
                "failed to upload signature file"
            );
            return error_response(tr.signature_upload_failed);
        }
    };

    let channel_id = match app.host.get_direct_channel(&app.bot.user_id, &submission.user_id).await
    {
        Ok(channel) => channel.id,
        Err(dm_error) => {
            warn!(
                event_name = "signature.dm_unavailable",
                correlation_id,
                error = %dm_error,
                "bot DM unavailable; posting into the submission channel"
            );
            submission.channel_id.clone()
        }
    };

    let post = Post {
        channel_id,
        user_id: app.bot.user_id.clone(),
        message: tr.signature_posted(&request.full_name, request.project),
        file_ids: vec![file.id.clone()],
        ..Post::default()
    };
    if let Err(post_error) = app.host.create_post(post).await {
        error!(
            event_name = "signature.post_failed",
            correlation_id,
            error = %post_error,
            "failed to post signature message"
        );
    }

    info!(
        event_name = "signature.generated",
        correlation_id,
        user_id = %submission.user_id,
        project = %request.project,
        file_id = %file.id,
        "signature generated"
    );
    SubmitDialogResponse::default()
}

fn field_messages(tr: &Translations, errors: &FieldErrors) -> BTreeMap<String, String> {
    errors
        .iter()
        .map(|(field, problem)| {
            (field.form_name().to_string(), tr.field_problem(field, problem).to_string())
        })
        .collect()
}

fn error_response(message: &str) -> SubmitDialogResponse {
    SubmitDialogResponse { error: Some(message.to_string()), errors: BTreeMap::new() }
}
