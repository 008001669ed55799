use argh::FromArgs;

fn default_logs_path() -> String {
    "./logs".into()
}

fn default_settings_path() -> String {
    "./settings.json".into()
}

#[derive(FromArgs)]
/// guild and user settings service
pub struct Flags {
    /// path to logs directory
    #[argh(option, default = "default_logs_path()")]
    pub logs_path: String,

    /// path to the settings snapshot, loaded on startup and written on shutdown
    #[argh(option, default = "default_settings_path()")]
    pub settings_path: String,
}
