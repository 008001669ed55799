use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequestModel {
    pub user_id: String,
    pub channel_id: String,
    /// Command text starting at the settings domain, e.g. `server log enable all`.
    pub content: String,
    #[serde(default)]
    pub mentions: Vec<String>,
}
