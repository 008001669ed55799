use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSetting {
    pub balance: i64,
    #[serde(rename = "dailyNext")]
    pub daily_next: Option<DateTime<Utc>>,
    #[serde(rename = "description")]
    pub about_me: String,
    // validated against the timezone database when read, not when loaded
    pub timezone: String,
    pub socials: Socials,
}

/// Empty strings mean the social isn't set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Socials {
    #[serde(rename = "switchFC")]
    pub switch_fc: String,
    #[serde(rename = "nintyID")]
    pub nnid: String,
    pub psn: String,
    pub xbox: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocialKind {
    SwitchFriendCode,
    NintendoNetworkId,
    PlayStationNetwork,
    XboxLive,
}

impl SocialKind {
    pub const ALL: [SocialKind; 4] = [
        SocialKind::SwitchFriendCode,
        SocialKind::NintendoNetworkId,
        SocialKind::PlayStationNetwork,
        SocialKind::XboxLive,
    ];

    pub fn from_selector(selector: &str) -> Option<SocialKind> {
        match selector {
            "switchfc" => Some(SocialKind::SwitchFriendCode),
            "nnid" | "nintendoid" | "nintyid" => Some(SocialKind::NintendoNetworkId),
            "psn" => Some(SocialKind::PlayStationNetwork),
            "xbox" | "gamertag" => Some(SocialKind::XboxLive),
            _ => None,
        }
    }

    pub fn selector(self) -> &'static str {
        match self {
            SocialKind::SwitchFriendCode => "switchfc",
            SocialKind::NintendoNetworkId => "nnid",
            SocialKind::PlayStationNetwork => "psn",
            SocialKind::XboxLive => "xbox",
        }
    }

    /// Name used in field titles.
    pub fn display_name(self) -> &'static str {
        match self {
            SocialKind::SwitchFriendCode => "Switch Friend Code",
            SocialKind::NintendoNetworkId => "Nintendo Network ID",
            SocialKind::PlayStationNetwork => "PSN",
            SocialKind::XboxLive => "Xbox Live Gamertag",
        }
    }

    /// Name used inside sentences.
    pub fn short_name(self) -> &'static str {
        match self {
            SocialKind::SwitchFriendCode => "Switch friend code",
            SocialKind::NintendoNetworkId => "NNID",
            SocialKind::PlayStationNetwork => "PSN",
            SocialKind::XboxLive => "Xbox Live gamertag",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SocialKind::SwitchFriendCode => "Nintendo Switch friend code",
            SocialKind::NintendoNetworkId => "Nintendo Network ID",
            SocialKind::PlayStationNetwork => "PlayStation Network",
            SocialKind::XboxLive => "Xbox Live Gamertag",
        }
    }
}

impl Socials {
    pub fn get(&self, kind: SocialKind) -> &str {
        match kind {
            SocialKind::SwitchFriendCode => &self.switch_fc,
            SocialKind::NintendoNetworkId => &self.nnid,
            SocialKind::PlayStationNetwork => &self.psn,
            SocialKind::XboxLive => &self.xbox,
        }
    }

    pub fn field_mut(&mut self, kind: SocialKind) -> &mut String {
        match kind {
            SocialKind::SwitchFriendCode => &mut self.switch_fc,
            SocialKind::NintendoNetworkId => &mut self.nnid,
            SocialKind::PlayStationNetwork => &mut self.psn,
            SocialKind::XboxLive => &mut self.xbox,
        }
    }

    pub fn is_set(&self, kind: SocialKind) -> bool {
        !self.get(kind).is_empty()
    }
}
