use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Every logging event category a guild can toggle.
///
/// The registry below is built from [`LogEvent::ALL`] once, so the same set of names is used for
/// lookups, bulk toggles and presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogEvent {
    ChannelCreate,
    ChannelDelete,
    ChannelUpdate,
    GuildBanAdd,
    GuildBanRemove,
    GuildEmojisUpdate,
    GuildMemberAdd,
    GuildMemberRemove,
    GuildRoleCreate,
    GuildRoleDelete,
    GuildRoleUpdate,
    GuildUpdate,
    UserUpdate,
    VoiceStateUpdate,
    // triggered by the bot itself rather than received from discord
    SwearDetect,
    UserModlog,
}

impl LogEvent {
    pub const ALL: [LogEvent; 16] = [
        LogEvent::ChannelCreate,
        LogEvent::ChannelDelete,
        LogEvent::ChannelUpdate,
        LogEvent::GuildBanAdd,
        LogEvent::GuildBanRemove,
        LogEvent::GuildEmojisUpdate,
        LogEvent::GuildMemberAdd,
        LogEvent::GuildMemberRemove,
        LogEvent::GuildRoleCreate,
        LogEvent::GuildRoleDelete,
        LogEvent::GuildRoleUpdate,
        LogEvent::GuildUpdate,
        LogEvent::UserUpdate,
        LogEvent::VoiceStateUpdate,
        LogEvent::SwearDetect,
        LogEvent::UserModlog,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LogEvent::ChannelCreate => "ChannelCreate",
            LogEvent::ChannelDelete => "ChannelDelete",
            LogEvent::ChannelUpdate => "ChannelUpdate",
            LogEvent::GuildBanAdd => "GuildBanAdd",
            LogEvent::GuildBanRemove => "GuildBanRemove",
            LogEvent::GuildEmojisUpdate => "GuildEmojisUpdate",
            LogEvent::GuildMemberAdd => "GuildMemberAdd",
            LogEvent::GuildMemberRemove => "GuildMemberRemove",
            LogEvent::GuildRoleCreate => "GuildRoleCreate",
            LogEvent::GuildRoleDelete => "GuildRoleDelete",
            LogEvent::GuildRoleUpdate => "GuildRoleUpdate",
            LogEvent::GuildUpdate => "GuildUpdate",
            LogEvent::UserUpdate => "UserUpdate",
            LogEvent::VoiceStateUpdate => "VoiceStateUpdate",
            LogEvent::SwearDetect => "SwearDetect",
            LogEvent::UserModlog => "UserModlog",
        }
    }

    /// Exact, case sensitive lookup.
    pub fn from_name(name: &str) -> Option<LogEvent> {
        LOG_EVENT_REGISTRY.get(name).copied()
    }
}

lazy_static! {
    static ref LOG_EVENT_REGISTRY: HashMap<&'static str, LogEvent> = LogEvent::ALL
        .iter()
        .map(|event| (event.name(), *event))
        .collect();
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogEvents {
    pub channel_create: bool,
    pub channel_delete: bool,
    pub channel_update: bool,
    pub guild_ban_add: bool,
    pub guild_ban_remove: bool,
    pub guild_emojis_update: bool,
    pub guild_member_add: bool,
    pub guild_member_remove: bool,
    pub guild_role_create: bool,
    pub guild_role_delete: bool,
    pub guild_role_update: bool,
    pub guild_update: bool,
    pub user_update: bool,
    pub voice_state_update: bool,
    pub swear_detect: bool,
    pub user_modlog: bool,
}

/// Result of toggling several events by name in one request.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FlagPartition {
    pub applied: Vec<String>,
    pub unknown: Vec<String>,
}

impl LogEvents {
    pub fn recommended() -> LogEvents {
        LogEvents {
            channel_create: true,
            channel_delete: true,
            guild_ban_add: true,
            guild_ban_remove: true,
            guild_member_add: true,
            guild_member_remove: true,
            guild_role_create: true,
            guild_role_delete: true,
            guild_role_update: true,
            guild_update: true,
            swear_detect: true,
            user_modlog: true,
            voice_state_update: true,
            ..LogEvents::default()
        }
    }

    fn flag_mut(&mut self, event: LogEvent) -> &mut bool {
        match event {
            LogEvent::ChannelCreate => &mut self.channel_create,
            LogEvent::ChannelDelete => &mut self.channel_delete,
            LogEvent::ChannelUpdate => &mut self.channel_update,
            LogEvent::GuildBanAdd => &mut self.guild_ban_add,
            LogEvent::GuildBanRemove => &mut self.guild_ban_remove,
            LogEvent::GuildEmojisUpdate => &mut self.guild_emojis_update,
            LogEvent::GuildMemberAdd => &mut self.guild_member_add,
            LogEvent::GuildMemberRemove => &mut self.guild_member_remove,
            LogEvent::GuildRoleCreate => &mut self.guild_role_create,
            LogEvent::GuildRoleDelete => &mut self.guild_role_delete,
            LogEvent::GuildRoleUpdate => &mut self.guild_role_update,
            LogEvent::GuildUpdate => &mut self.guild_update,
            LogEvent::UserUpdate => &mut self.user_update,
            LogEvent::VoiceStateUpdate => &mut self.voice_state_update,
            LogEvent::SwearDetect => &mut self.swear_detect,
            LogEvent::UserModlog => &mut self.user_modlog,
        }
    }

    pub fn get(&self, event: LogEvent) -> bool {
        match event {
            LogEvent::ChannelCreate => self.channel_create,
            LogEvent::ChannelDelete => self.channel_delete,
            LogEvent::ChannelUpdate => self.channel_update,
            LogEvent::GuildBanAdd => self.guild_ban_add,
            LogEvent::GuildBanRemove => self.guild_ban_remove,
            LogEvent::GuildEmojisUpdate => self.guild_emojis_update,
            LogEvent::GuildMemberAdd => self.guild_member_add,
            LogEvent::GuildMemberRemove => self.guild_member_remove,
            LogEvent::GuildRoleCreate => self.guild_role_create,
            LogEvent::GuildRoleDelete => self.guild_role_delete,
            LogEvent::GuildRoleUpdate => self.guild_role_update,
            LogEvent::GuildUpdate => self.guild_update,
            LogEvent::UserUpdate => self.user_update,
            LogEvent::VoiceStateUpdate => self.voice_state_update,
            LogEvent::SwearDetect => self.swear_detect,
            LogEvent::UserModlog => self.user_modlog,
        }
    }

    pub fn set(&mut self, event: LogEvent, value: bool) {
        *self.flag_mut(event) = value;
    }

    /// Returns `None` when `name` isn't a known event.
    pub fn lookup(&self, name: &str) -> Option<bool> {
        LogEvent::from_name(name).map(|event| self.get(event))
    }

    /// Returns whether `name` was recognized, nothing is touched otherwise.
    pub fn set_by_name(&mut self, name: &str, value: bool) -> bool {
        match LogEvent::from_name(name) {
            Some(event) => {
                self.set(event, value);
                true
            }
            None => false,
        }
    }

    pub fn set_all(&mut self, value: bool) {
        for event in LogEvent::ALL {
            self.set(event, value);
        }
    }

    pub fn apply_preset(&mut self, preset: &LogEvents) {
        *self = preset.clone();
    }

    /// Toggles each name independently, an unknown name never stops the ones after it.
    pub fn set_many<S: AsRef<str>>(&mut self, names: &[S], value: bool) -> FlagPartition {
        let mut partition = FlagPartition::default();
        for name in names {
            let name = name.as_ref();
            if self.set_by_name(name, value) {
                partition.applied.push(name.to_string());
            } else {
                partition.unknown.push(name.to_string());
            }
        }

        partition
    }

    pub fn states(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        LogEvent::ALL
            .iter()
            .map(move |event| (event.name(), self.get(*event)))
    }
}
