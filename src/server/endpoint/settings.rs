use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::database::settings::GuildSetting;
use crate::database::user_settings::UserSetting;
use crate::server::{extract_service, GuildPathParams};
use crate::service::setting::SettingService;
use crate::service::user_setting::UserSettingService;
use crate::service::Services;

#[derive(Deserialize)]
pub struct UserPathParams {
    pub user_id: String,
}

// /guilds/:guild_id/settings
pub async fn get_guild_setting(
    State(services): State<Arc<Services>>,
    Path(GuildPathParams { guild_id }): Path<GuildPathParams>,
) -> Result<Json<GuildSetting>, Response> {
    let setting_service =
        extract_service::<SettingService>(&services).map_err(|err| err.into_response())?;

    if !setting_service.contains_setting(&guild_id) {
        return Err((
            StatusCode::NOT_FOUND,
            Json("This server doesn't have any settings yet!"),
        )
            .into_response());
    }

    match setting_service.get_setting(&guild_id).await {
        Ok(setting) => Ok(Json(setting)),
        Err(err) => {
            error!("failed to read guild settings {}", err);
            Err(StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
    }
}

// /users/:user_id/settings
pub async fn get_user_setting(
    State(services): State<Arc<Services>>,
    Path(UserPathParams { user_id }): Path<UserPathParams>,
) -> Result<Json<UserSetting>, Response> {
    let user_setting_service =
        extract_service::<UserSettingService>(&services).map_err(|err| err.into_response())?;

    match user_setting_service.find_setting(&user_id).await {
        Some(setting) => Ok(Json(setting)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json("This user doesn't have any settings yet!"),
        )
            .into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_util::test_services;
    use crate::service::nintendo_network::MockNintendoNetworkApi;

    #[tokio::test]
    async fn provisioned_guild_settings_are_returned() {
        let services = Arc::new(test_services(MockNintendoNetworkApi::new()).await);

        let Ok(Json(setting)) = get_guild_setting(
            State(services.clone()),
            Path(GuildPathParams {
                guild_id: "guild".into(),
            }),
        )
        .await
        else {
            panic!("guild settings were not found");
        };
        assert_eq!(setting, GuildSetting::default());

        let Err(response) = get_guild_setting(
            State(services),
            Path(GuildPathParams {
                guild_id: "elsewhere".into(),
            }),
        )
        .await
        else {
            panic!("unknown guild returned settings");
        };
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_users_are_not_found() {
        let services = Arc::new(test_services(MockNintendoNetworkApi::new()).await);

        let response = get_user_setting(
            State(services.clone()),
            Path(UserPathParams {
                user_id: "user".into(),
            }),
        )
        .await;
        assert!(response.is_ok());

        let Err(response) = get_user_setting(
            State(services),
            Path(UserPathParams {
                user_id: "nobody".into(),
            }),
        )
        .await
        else {
            panic!("unknown user returned settings");
        };
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
