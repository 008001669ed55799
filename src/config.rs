use serde::Deserialize;

fn default_prefix() -> String {
    "cli$".into()
}

fn default_server_port() -> u16 {
    8080
}

fn default_nnid_api_url() -> String {
    "https://accountws.nintendo.net".into()
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_prefix")]
    pub default_prefix: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    #[serde(default = "default_nnid_api_url")]
    pub nnid_api_url: String,
    /// Account server credentials, NNID checks fail until both are set.
    #[serde(default)]
    pub nnid_client_id: String,
    #[serde(default)]
    pub nnid_client_secret: String,
}

pub fn get_config() -> envy::Result<Config> {
    envy::from_env()
}
