pub const EMBED_COLOR: u32 = 0x4286F4;
pub const ERROR_COLOR: u32 = 0xFF0000;
pub const FIELDS_COLOR: u32 = 0x1C1C1C;

pub const SETTINGS_TITLE: &str = "Settings";
pub const BOT_SETTINGS_TITLE: &str = "Bot Settings";
pub const USER_SETTINGS_TITLE: &str = "User Settings";
pub const SERVER_SETTINGS_TITLE: &str = "Server Settings";

pub const TIMEZONE_EXAMPLE: &str = "America/New_York";
