use std::collections::HashMap;

use typemap_rev::TypeMapKey;

use crate::database::user_settings::UserSetting;
use crate::service::store::{KeyedStore, StoreError};

impl TypeMapKey for UserSettingService {
    type Value = UserSettingService;
}

pub struct UserSettingService {
    store: KeyedStore<UserSetting>,
}

impl UserSettingService {
    pub fn new() -> UserSettingService {
        UserSettingService {
            store: KeyedStore::new(),
        }
    }

    pub async fn ensure_setting(&self, user_id: &str) {
        self.store.ensure(user_id).await;
    }

    pub async fn get_setting(&self, user_id: &str) -> Result<UserSetting, StoreError> {
        self.store.read(user_id, UserSetting::clone).await
    }

    /// Like `get_setting` but for users other than the caller, who may never have been seen.
    pub async fn find_setting(&self, user_id: &str) -> Option<UserSetting> {
        if !self.store.contains(user_id) {
            return None;
        }

        self.store.read(user_id, UserSetting::clone).await.ok()
    }

    pub async fn read_setting<R>(
        &self,
        user_id: &str,
        reader: impl FnOnce(&UserSetting) -> R,
    ) -> Result<R, StoreError> {
        self.store.read(user_id, reader).await
    }

    pub async fn update_setting<R>(
        &self,
        user_id: &str,
        writer: impl FnOnce(&mut UserSetting) -> R,
    ) -> Result<R, StoreError> {
        self.store.update(user_id, writer).await
    }

    pub async fn restore_settings(&self, settings: HashMap<String, UserSetting>) {
        for (user_id, setting) in settings {
            self.store.insert(&user_id, setting).await;
        }
    }

    pub async fn all_settings(&self) -> HashMap<String, UserSetting> {
        self.store.snapshot().await
    }
}
