use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database::settings::GuildSetting;
use crate::database::user_settings::UserSetting;

pub mod log_events;
pub mod settings;
pub mod user_settings;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSnapshot {
    pub guilds: HashMap<String, GuildSetting>,
    pub users: HashMap<String, UserSetting>,
}

/// Durable copy of every settings record, kept as a single JSON document.
pub struct SettingsRepository(pub PathBuf);

impl SettingsRepository {
    pub async fn load(&self) -> anyhow::Result<SettingsSnapshot> {
        let content = match tokio::fs::read(&self.0).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.0.display(), "no settings snapshot found, starting empty");
                return Ok(SettingsSnapshot::default());
            }
            Err(err) => return Err(err.into()),
        };

        let snapshot: SettingsSnapshot = serde_json::from_slice(&content)?;
        info!(
            guilds = snapshot.guilds.len(),
            users = snapshot.users.len(),
            "loaded settings snapshot"
        );

        Ok(snapshot)
    }

    pub async fn save(&self, snapshot: &SettingsSnapshot) -> anyhow::Result<()> {
        let content = serde_json::to_vec_pretty(snapshot)?;

        // rename is atomic, readers see either the old or the new snapshot
        let temp_path = self.0.with_extension("tmp");
        tokio::fs::write(&temp_path, content).await?;
        tokio::fs::rename(&temp_path, &self.0).await?;

        info!(
            guilds = snapshot.guilds.len(),
            users = snapshot.users.len(),
            "saved settings snapshot"
        );
        Ok(())
    }
}
