use std::sync::Arc;

use typemap_rev::TypeMap;

use nintendo_network::{AccountServerClient, NintendoNetworkService};
use setting::SettingService;
use timezone::{ChronoTzResolver, TimezoneService};
use user_setting::UserSettingService;

use crate::config::Config;
use crate::database::SettingsSnapshot;

pub mod nintendo_network;
pub mod setting;
pub mod store;
pub mod timezone;
pub mod user_setting;

pub type Services = TypeMap;

pub fn create_services(config: Arc<Config>) -> anyhow::Result<Services> {
    let setting_service = SettingService::new(config.default_prefix.clone());
    let user_setting_service = UserSettingService::new();
    let timezone_service = TimezoneService::new(Box::new(ChronoTzResolver));
    let nintendo_network_service =
        NintendoNetworkService::new(Box::new(AccountServerClient::new(&config)?));

    let mut services = Services::new();
    services.insert::<SettingService>(setting_service);
    services.insert::<UserSettingService>(user_setting_service);
    services.insert::<TimezoneService>(timezone_service);
    services.insert::<NintendoNetworkService>(nintendo_network_service);

    Ok(services)
}

pub async fn restore_snapshot(services: &Services, snapshot: SettingsSnapshot) -> anyhow::Result<()> {
    let (Some(setting_service), Some(user_setting_service)) = (
        services.get::<SettingService>(),
        services.get::<UserSettingService>(),
    ) else {
        anyhow::bail!("couldn't get settings services!");
    };

    setting_service.restore_settings(snapshot.guilds).await;
    user_setting_service.restore_settings(snapshot.users).await;

    Ok(())
}

pub async fn take_snapshot(services: &Services) -> anyhow::Result<SettingsSnapshot> {
    let (Some(setting_service), Some(user_setting_service)) = (
        services.get::<SettingService>(),
        services.get::<UserSettingService>(),
    ) else {
        anyhow::bail!("couldn't get settings services!");
    };

    Ok(SettingsSnapshot {
        guilds: setting_service.all_settings().await,
        users: user_setting_service.all_settings().await,
    })
}
