use std::future::Future;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::routing::*;
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::commands::{get_settings_tree, SettingNode};
use crate::config::Config;
use crate::server::endpoint::commands::run_settings_command;
use crate::server::endpoint::settings::{get_guild_setting, get_user_setting};
use crate::service::setting::SettingService;
use crate::service::user_setting::UserSettingService;
use crate::service::Services;
use crate::util::Shutdown;

mod endpoint;
mod model;

#[derive(Clone, FromRef)]
pub struct AxumState {
    pub services: Arc<Services>,
    pub tree: Arc<SettingNode>,
}

pub fn extract_service<T: typemap_rev::TypeMapKey>(
    services: &Services,
) -> Result<&T::Value, (StatusCode, &'static str)> {
    if let Some(service) = services.get::<T>() {
        Ok(service)
    } else {
        Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"))
    }
}

#[derive(Deserialize)]
pub struct GuildPathParams {
    pub guild_id: String,
}

async fn root() -> &'static str {
    "Welcome to the clinet settings API."
}

async fn health_check(State(services): State<Arc<Services>>) -> StatusCode {
    if services.contains_key::<SettingService>() && services.contains_key::<UserSettingService>() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

// subscribed eagerly, a shutdown sent after this call returns is always observed
fn shutdown_signal(shutdown: &Shutdown) -> impl Future<Output = ()> {
    let mut receiver = shutdown.subscribe();

    async move {
        let _ = receiver.recv().await;
    }
}

pub fn create_router(services: Arc<Services>) -> Router {
    let state = AxumState {
        services,
        tree: Arc::new(get_settings_tree()),
    };

    Router::new()
        .route("/", get(root))
        .route("/health_check", get(health_check))
        .route("/guilds/:guild_id/commands", post(run_settings_command))
        .route("/guilds/:guild_id/settings", get(get_guild_setting))
        .route("/users/:user_id/settings", get(get_user_setting))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(
    config: Arc<Config>,
    services: Arc<Services>,
    shutdown: Shutdown,
) -> anyhow::Result<()> {
    let app = create_router(services);
    let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), config.server_port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(port = config.server_port, "settings server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(&shutdown))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::future::IntoFuture;

    use super::*;
    use crate::commands::test_util::test_services;
    use crate::service::nintendo_network::MockNintendoNetworkApi;

    #[tokio::test]
    async fn health_check_requires_settings_services() {
        let services = Arc::new(test_services(MockNintendoNetworkApi::new()).await);
        assert_eq!(health_check(State(services)).await, StatusCode::OK);

        let empty = Arc::new(Services::new());
        assert_eq!(
            health_check(State(empty)).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_services_map_to_internal_error() {
        let services = Services::new();
        let err = extract_service::<SettingService>(&services).err();
        assert_eq!(
            err,
            Some((StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"))
        );
    }

    #[tokio::test]
    async fn server_stops_on_shutdown() {
        let services = Arc::new(test_services(MockNintendoNetworkApi::new()).await);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let shutdown = Shutdown::new();

        let server = tokio::spawn(
            axum::serve(listener, create_router(services))
                .with_graceful_shutdown(shutdown_signal(&shutdown))
                .into_future(),
        );
        shutdown.shutdown();

        assert!(server.await.unwrap().is_ok());
    }
}
