use async_trait::async_trait;

use crate::commands::{
    get_service, CommandContext, CommandError, Response, SettingGroup, SettingHandler,
};
use crate::constants::BOT_SETTINGS_TITLE;
use crate::service::setting::SettingService;
use crate::service::Services;
use crate::util::escape_backticks;

const PREFIX_TITLE: &str = "Bot Settings - Command Prefix";

pub fn bot_settings() -> SettingGroup {
    SettingGroup::new(
        "bot",
        BOT_SETTINGS_TITLE,
        "Manages how the bot behaves in this server.",
    )
    .handler(
        &["prefix"],
        "Displays or sets the command prefix",
        "this/text",
        PrefixHandler,
    )
}

pub struct PrefixHandler;

#[async_trait]
impl SettingHandler for PrefixHandler {
    fn title(&self) -> &'static str {
        PREFIX_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        let setting_service = get_service::<SettingService>(services)?;

        let new_prefix = match args.first() {
            Some(prefix) => *prefix,
            None => {
                let prefix = setting_service.prefix(&context.guild_id).await;
                return Ok(Response::success(
                    PREFIX_TITLE,
                    format!("Current command prefix:\n\n{}", prefix),
                ));
            }
        };

        // an empty override follows the global default
        let prefix_override = if new_prefix == setting_service.default_prefix {
            String::new()
        } else {
            new_prefix.to_string()
        };

        setting_service
            .update_setting(&context.guild_id, |setting| {
                setting.bot_prefix = prefix_override
            })
            .await?;

        Ok(Response::success(
            PREFIX_TITLE,
            format!(
                "Successfully set the command prefix to ``{}``.",
                escape_backticks(new_prefix)
            ),
        ))
    }
}
