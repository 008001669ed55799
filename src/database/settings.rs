use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::database::log_events::LogEvents;

/// Opaque roleme entry owned by the roleme subsystem, carried through untouched.
pub type RoleMe = serde_json::Value;
/// Opaque feed entry owned by the feeds subsystem, carried through untouched.
pub type Feed = serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildSetting {
    #[serde(rename = "allowVoice")]
    pub allow_voice: bool,
    #[serde(rename = "adminRoles")]
    pub bot_admin_roles: Vec<String>,
    #[serde(rename = "adminUsers")]
    pub bot_admin_users: Vec<String>,
    #[serde(rename = "botOptions")]
    pub bot_options: BotOptions,
    // empty means the global default prefix is used
    #[serde(rename = "botPrefix")]
    pub bot_prefix: String,
    #[serde(rename = "customResponses")]
    pub custom_responses: Vec<CustomResponse>,
    #[serde(rename = "logSettings")]
    pub log_settings: LogSettings,
    #[serde(rename = "swearFilter")]
    pub swear_filter: SwearFilter,
    #[serde(rename = "tipsChannel")]
    pub tips_channel: String,
    #[serde(rename = "userJoinMessage")]
    pub user_join_message: String,
    #[serde(rename = "userJoinMessageChannel")]
    pub user_join_message_channel: String,
    #[serde(rename = "userLeaveMessage")]
    pub user_leave_message: String,
    #[serde(rename = "userLeaveMessageChannel")]
    pub user_leave_message_channel: String,
    #[serde(rename = "roleMeList")]
    pub role_me_list: Vec<RoleMe>,
    #[serde(rename = "disableNowPlaying")]
    pub auto_send_now_playing: bool,
    #[serde(rename = "apiInviteChannel")]
    pub api_invite_channel: String,
    #[serde(rename = "apiInviteKey")]
    pub api_invite_key: String,
    pub feeds: Vec<Feed>,
}

/// Per guild overrides of global bot options, keyed by option name.
///
/// An override can only narrow a globally enabled option, `true` here never re-enables something
/// the global configuration turned off.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotOptions(pub BTreeMap<String, bool>);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomResponse {
    pub expression: String,
    pub response: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogSettings {
    pub logging_enabled: bool,
    pub logging_channel: String,
    pub logging_events: LogEvents,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwearFilter {
    pub enabled: bool,
    pub blacklisted_words: Vec<String>,
    pub disable_normalize: bool,
    pub disable_spaced_tab: bool,
    pub disable_multi_whitespace_stripping: bool,
    pub disable_zero_width_stripping: bool,
    pub disable_spaced_bypass: bool,
    /// Seconds before filter warnings are deleted, zero disables deletion.
    pub warning_delete_timeout: u64,
    pub allow_admin_bypass: bool,
    pub allow_bot_owner_bypass: bool,
}

/// Words removed from and missing in a blocklist after a removal request.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WordRemoval {
    pub removed: Vec<String>,
    pub missing: Vec<String>,
}

impl SwearFilter {
    pub fn add_words<S: AsRef<str>>(&mut self, words: &[S]) {
        self.blacklisted_words
            .extend(words.iter().map(|word| word.as_ref().to_string()));
    }

    /// Removes every occurrence of each given word.
    pub fn remove_words<S: AsRef<str>>(&mut self, words: &[S]) -> WordRemoval {
        let mut removal = WordRemoval::default();
        for word in words {
            let word = word.as_ref();
            let before = self.blacklisted_words.len();
            self.blacklisted_words.retain(|existing| existing != word);
            if self.blacklisted_words.len() < before {
                removal.removed.push(word.to_string());
            } else if !removal.removed.iter().any(|removed| removed == word) {
                removal.missing.push(word.to_string());
            }
        }

        removal
    }

    /// Drops repeated words keeping the first occurrence, returns how many were dropped.
    pub fn dedupe_words(&mut self) -> usize {
        let before = self.blacklisted_words.len();
        let mut seen = Vec::with_capacity(before);
        self.blacklisted_words.retain(|word| {
            if seen.contains(word) {
                false
            } else {
                seen.push(word.clone());
                true
            }
        });

        before - self.blacklisted_words.len()
    }
}
