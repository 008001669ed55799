use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use smol_str::SmolStr;

use crate::commands::{run_command, CommandContext, Response as CommandResponse, SettingNode};
use crate::server::model::command::CommandRequestModel;
use crate::server::{extract_service, GuildPathParams};
use crate::service::setting::SettingService;
use crate::service::user_setting::UserSettingService;
use crate::service::Services;

// /guilds/:guild_id/commands
pub async fn run_settings_command(
    State(services): State<Arc<Services>>,
    State(tree): State<Arc<SettingNode>>,
    Path(GuildPathParams { guild_id }): Path<GuildPathParams>,
    Json(request): Json<CommandRequestModel>,
) -> Result<Json<CommandResponse>, Response> {
    if request.user_id.is_empty() || request.channel_id.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json("Both userId and channelId are required!"),
        )
            .into_response());
    }

    let setting_service =
        extract_service::<SettingService>(&services).map_err(|err| err.into_response())?;
    let user_setting_service =
        extract_service::<UserSettingService>(&services).map_err(|err| err.into_response())?;

    // records are provisioned on first contact, handlers only ever see existing ones
    setting_service.ensure_setting(&guild_id).await;
    user_setting_service.ensure_setting(&request.user_id).await;

    let context = CommandContext {
        guild_id: SmolStr::new(&guild_id),
        user_id: SmolStr::new(&request.user_id),
        channel_id: SmolStr::new(&request.channel_id),
        mentions: request.mentions.iter().map(SmolStr::new).collect(),
        prefix: setting_service.prefix(&guild_id).await,
    };

    let tokens: Vec<&str> = request.content.split_whitespace().collect();
    let response = run_command(&tree, &tokens, &context, &services).await;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_util::test_services;
    use crate::commands::{get_settings_tree, ErrorKind, ResponseKind};
    use crate::service::nintendo_network::MockNintendoNetworkApi;

    fn request(user_id: &str, content: &str) -> CommandRequestModel {
        CommandRequestModel {
            user_id: user_id.into(),
            channel_id: "channel".into(),
            content: content.into(),
            mentions: vec![],
        }
    }

    async fn send(
        services: &Arc<Services>,
        tree: &Arc<SettingNode>,
        guild_id: &str,
        request: CommandRequestModel,
    ) -> Result<Json<CommandResponse>, Response> {
        run_settings_command(
            State(services.clone()),
            State(tree.clone()),
            Path(GuildPathParams {
                guild_id: guild_id.into(),
            }),
            Json(request),
        )
        .await
    }

    #[tokio::test]
    async fn commands_provision_new_guilds_and_users() {
        let services = Arc::new(test_services(MockNintendoNetworkApi::new()).await);
        let tree = Arc::new(get_settings_tree());

        let Ok(Json(response)) = send(&services, &tree, "fresh", request("newcomer", "server filter enable")).await
        else {
            panic!("command was rejected");
        };
        assert_eq!(response.kind, ResponseKind::Success);

        let setting = services
            .get::<SettingService>()
            .unwrap()
            .get_setting("fresh")
            .await
            .unwrap();
        assert!(setting.swear_filter.enabled);
        assert!(services
            .get::<UserSettingService>()
            .unwrap()
            .find_setting("newcomer")
            .await
            .is_some());
    }

    #[tokio::test]
    async fn usage_examples_use_the_guild_prefix() {
        let services = Arc::new(test_services(MockNintendoNetworkApi::new()).await);
        let tree = Arc::new(get_settings_tree());

        send(&services, &tree, "guild", request("user", "bot prefix !")).await.ok();
        let Ok(Json(response)) = send(&services, &tree, "guild", request("user", "user timezone")).await
        else {
            panic!("command was rejected");
        };

        assert_eq!(response.error_kind(), Some(ErrorKind::MissingArgument));
        assert!(response.body.contains("``!user timezone America/New_York``"));
    }

    #[tokio::test]
    async fn requests_without_origin_are_rejected() {
        let services = Arc::new(test_services(MockNintendoNetworkApi::new()).await);
        let tree = Arc::new(get_settings_tree());

        let Err(response) = send(&services, &tree, "guild", request("", "bot prefix")).await else {
            panic!("command was accepted");
        };
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
