use std::collections::HashMap;

use typemap_rev::TypeMapKey;

use crate::database::settings::GuildSetting;
use crate::service::store::{KeyedStore, StoreError};

impl TypeMapKey for SettingService {
    type Value = SettingService;
}

pub struct SettingService {
    pub default_prefix: String,
    store: KeyedStore<GuildSetting>,
}

impl SettingService {
    pub fn new(default_prefix: String) -> SettingService {
        SettingService {
            default_prefix,
            store: KeyedStore::new(),
        }
    }

    pub async fn ensure_setting(&self, guild_id: &str) {
        self.store.ensure(guild_id).await;
    }

    pub async fn get_setting(&self, guild_id: &str) -> Result<GuildSetting, StoreError> {
        self.store.read(guild_id, GuildSetting::clone).await
    }

    pub async fn read_setting<R>(
        &self,
        guild_id: &str,
        reader: impl FnOnce(&GuildSetting) -> R,
    ) -> Result<R, StoreError> {
        self.store.read(guild_id, reader).await
    }

    pub async fn update_setting<R>(
        &self,
        guild_id: &str,
        writer: impl FnOnce(&mut GuildSetting) -> R,
    ) -> Result<R, StoreError> {
        self.store.update(guild_id, writer).await
    }

    pub fn contains_setting(&self, guild_id: &str) -> bool {
        self.store.contains(guild_id)
    }

    /// Prefix commands in this guild are expected to start with.
    pub async fn prefix(&self, guild_id: &str) -> String {
        if !self.store.contains(guild_id) {
            return self.default_prefix.clone();
        }

        let prefix_override = self
            .store
            .read(guild_id, |setting| setting.bot_prefix.clone())
            .await
            .unwrap_or_default();

        if prefix_override.is_empty() {
            self.default_prefix.clone()
        } else {
            prefix_override
        }
    }

    pub async fn restore_settings(&self, settings: HashMap<String, GuildSetting>) {
        for (guild_id, setting) in settings {
            self.store.insert(&guild_id, setting).await;
        }
    }

    pub async fn all_settings(&self) -> HashMap<String, GuildSetting> {
        self.store.snapshot().await
    }
}
