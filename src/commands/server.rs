use std::time::Duration;

use async_trait::async_trait;

use crate::commands::validators::parse_timeout;
use crate::commands::{
    get_service, no_arguments, CommandContext, CommandError, Response, SettingGroup,
    SettingHandler,
};
use crate::constants::SERVER_SETTINGS_TITLE;
use crate::database::log_events::{FlagPartition, LogEvents};
use crate::database::settings::{GuildSetting, LogSettings, SwearFilter};
use crate::service::setting::SettingService;
use crate::service::Services;
use crate::util::escape_backticks;

const JOIN_MESSAGE_TITLE: &str = "Server Settings - Join Message";
const LEAVE_MESSAGE_TITLE: &str = "Server Settings - Leave Message";
const TIPS_TITLE: &str = "Server Settings - Tips";
const NOW_PLAYING_TITLE: &str = "Server Settings - Auto Send Now Playing";
const INVITE_TITLE: &str = "Server Settings - API Invite Generation";
const FILTER_TITLE: &str = "Server Settings - Swear Filter";
const LOG_TITLE: &str = "Server Settings - Log";
const RESET_TITLE: &str = "Server Settings - Reset";

pub fn server_settings() -> SettingGroup {
    SettingGroup::new(
        "server",
        SERVER_SETTINGS_TITLE,
        "Manages settings for this server.",
    )
    .handler(
        &["joinmsg"],
        "Displays the join message, or sets it to be sent in the current channel",
        "this/message",
        MemberMessageHandler(MemberEvent::Join),
    )
    .handler(
        &["leavemsg"],
        "Displays the leave message, or sets it to be sent in the current channel",
        "this/message",
        MemberMessageHandler(MemberEvent::Leave),
    )
    .group(
        &["tips"],
        "Displays or toggles hourly tips in the current channel",
        "this/enable/disable",
        tips_settings(),
    )
    .group(
        &["autosendnowplaying"],
        "Displays or toggles sending now playing messages for new tracks",
        "this/enable/disable",
        now_playing_settings(),
    )
    .group(
        &["invitegen"],
        "Manages invite link generation via the API",
        "setting (value(s))",
        invite_settings(),
    )
    .group(
        &["filter"],
        "Manages the swear filter",
        "setting (value(s))",
        filter_settings(),
    )
    .group(
        &["log"],
        "Manages logging for this server",
        "setting (value(s))",
        log_settings(),
    )
    .group(
        &["reset"],
        "Resets a group of settings to their defaults",
        "joinmsg/leavemsg/log/filter/invitegen",
        reset_settings(),
    )
}

fn tips_settings() -> SettingGroup {
    SettingGroup::new("server tips", TIPS_TITLE, "Manages hourly tips for this server.")
        .usage_arguments("enable/disable")
        .default_handler(SwitchStatusHandler(Switch::Tips))
        .handler(
            &["enable"],
            "Enables hourly tips in the current channel",
            "this",
            SwitchHandler(Switch::Tips, true),
        )
        .handler(
            &["disable"],
            "Disables hourly tips",
            "this",
            SwitchHandler(Switch::Tips, false),
        )
}

fn now_playing_settings() -> SettingGroup {
    SettingGroup::new(
        "server autosendnowplaying",
        NOW_PLAYING_TITLE,
        "Manages automatic now playing messages.",
    )
    .usage_arguments("enable/disable")
    .default_handler(SwitchStatusHandler(Switch::NowPlaying))
    .handler(
        &["enable"],
        "Sends a now playing message each time a new track starts",
        "this",
        SwitchHandler(Switch::NowPlaying, true),
    )
    .handler(
        &["disable"],
        "Stops sending now playing messages for new tracks",
        "this",
        SwitchHandler(Switch::NowPlaying, false),
    )
}

fn invite_settings() -> SettingGroup {
    SettingGroup::new(
        "server invitegen",
        INVITE_TITLE,
        "Manages invite link generation via the API.",
    )
    .handler(
        &["setchannel"],
        "Sets the invite link channel to the current channel",
        "this",
        ChannelHandler(ChannelTarget::InviteGeneration),
    )
    .handler(
        &["key"],
        "Displays or sets the key to use for invite link generation",
        "this/string",
        InviteKeyHandler,
    )
}

fn filter_settings() -> SettingGroup {
    SettingGroup::new(
        "server filter",
        FILTER_TITLE,
        "Manages the swear filter for this server.",
    )
    .handler(
        &["enable"],
        "Enables the swear filter for this server",
        "this",
        SwitchHandler(Switch::Filter, true),
    )
    .handler(
        &["disable"],
        "Disables the swear filter for this server",
        "this",
        SwitchHandler(Switch::Filter, false),
    )
    .handler(
        &["timeout"],
        "Displays or sets the timeout for deleting warning messages",
        "this/number",
        FilterTimeoutHandler,
    )
    .group(
        &["words"],
        "Lists filtered words, or adds/removes specified words/clears all words",
        "this/(add word1)/(remove word2)/clear/dedupe",
        SettingGroup::new(
            "server filter words",
            FILTER_TITLE,
            "Manages the filtered words.",
        )
        .default_handler(WordsListHandler)
        .handler(&["add"], "Adds words to the filter", "word(s)", WordsAddHandler)
        .handler(
            &["remove"],
            "Removes words from the filter",
            "word(s)",
            WordsRemoveHandler,
        )
        .handler(
            &["clear"],
            "Removes every word from the filter",
            "this",
            WordsClearHandler,
        )
        .handler(
            &["dedupe"],
            "Removes repeated words from the filter",
            "this",
            WordsDedupeHandler,
        ),
    )
}

fn log_settings() -> SettingGroup {
    SettingGroup::new(
        "server log",
        LOG_TITLE,
        "Sets the logging capabilities for this server.",
    )
    .handler(
        &["set"],
        "Sets the logging channel to the current channel",
        "this",
        ChannelHandler(ChannelTarget::Log),
    )
    .handler(
        &["enable"],
        "Enables logging for the server (to this channel if not set), enabling any optionally specified events",
        "this/all/recommended/event(s)",
        LogEnableHandler,
    )
    .handler(
        &["disable"],
        "Disables logging for the server, disabling any optionally specified events",
        "this/all/event(s)",
        LogDisableHandler,
    )
    .handler(
        &["unset"],
        "Unsets the current logging channel and disables logging",
        "this",
        LogUnsetHandler,
    )
    .handler(
        &["events"],
        "Returns a list of available events to enable/disable",
        "this",
        LogEventsHandler,
    )
}

fn reset_settings() -> SettingGroup {
    let mut group = SettingGroup::new(
        "server reset",
        RESET_TITLE,
        "Resets a group of settings to their defaults.",
    )
    .usage_arguments("joinmsg/leavemsg/log/filter/invitegen")
    .default_handler(ResetMissingHandler);

    for target in ResetTarget::ALL {
        group = group.handler(
            target.selectors(),
            target.description(),
            "this",
            ResetHandler(target),
        );
    }

    group
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberEvent {
    Join,
    Leave,
}

impl MemberEvent {
    fn title(self) -> &'static str {
        match self {
            MemberEvent::Join => JOIN_MESSAGE_TITLE,
            MemberEvent::Leave => LEAVE_MESSAGE_TITLE,
        }
    }

    fn noun(self) -> &'static str {
        match self {
            MemberEvent::Join => "join",
            MemberEvent::Leave => "leave",
        }
    }

    /// Message text and destination channel.
    fn fields(self, setting: &GuildSetting) -> (&String, &String) {
        match self {
            MemberEvent::Join => (&setting.user_join_message, &setting.user_join_message_channel),
            MemberEvent::Leave => (
                &setting.user_leave_message,
                &setting.user_leave_message_channel,
            ),
        }
    }

    fn fields_mut(self, setting: &mut GuildSetting) -> (&mut String, &mut String) {
        match self {
            MemberEvent::Join => (
                &mut setting.user_join_message,
                &mut setting.user_join_message_channel,
            ),
            MemberEvent::Leave => (
                &mut setting.user_leave_message,
                &mut setting.user_leave_message_channel,
            ),
        }
    }
}

pub struct MemberMessageHandler(MemberEvent);

#[async_trait]
impl SettingHandler for MemberMessageHandler {
    fn title(&self) -> &'static str {
        self.0.title()
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        let event = self.0;
        let setting_service = get_service::<SettingService>(services)?;

        if args.is_empty() {
            let (message, channel) = setting_service
                .read_setting(&context.guild_id, |setting| {
                    let (message, channel) = event.fields(setting);
                    (message.clone(), channel.clone())
                })
                .await?;

            if message.is_empty() {
                return Ok(Response::success(
                    event.title(),
                    format!("No {} message is currently set.", event.noun()),
                ));
            }

            return Ok(Response::success(
                event.title(),
                format!("The {} message is sent to <#{}>.", event.noun(), channel),
            )
            .field("Message", message));
        }

        let message = args.join(" ");
        let channel_id = context.channel_id.to_string();
        setting_service
            .update_setting(&context.guild_id, |setting| {
                let (message_field, channel_field) = event.fields_mut(setting);
                *message_field = message;
                *channel_field = channel_id;
            })
            .await?;

        Ok(Response::success(
            event.title(),
            format!(
                "Successfully set the {} message to this channel.",
                event.noun()
            ),
        ))
    }
}

/// Guild features that are turned on or off as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Switch {
    Tips,
    NowPlaying,
    Filter,
}

impl Switch {
    fn title(self) -> &'static str {
        match self {
            Switch::Tips => TIPS_TITLE,
            Switch::NowPlaying => NOW_PLAYING_TITLE,
            Switch::Filter => FILTER_TITLE,
        }
    }

    fn apply(self, setting: &mut GuildSetting, enable: bool, channel_id: &str) {
        match self {
            // the channel is the feature switch, an empty channel means tips are off
            Switch::Tips => {
                setting.tips_channel = if enable {
                    channel_id.to_string()
                } else {
                    String::new()
                }
            }
            Switch::NowPlaying => setting.auto_send_now_playing = enable,
            Switch::Filter => setting.swear_filter.enabled = enable,
        }
    }

    fn status(self, setting: &GuildSetting) -> String {
        let state = |enabled: bool| if enabled { "enabled" } else { "disabled" };
        match self {
            Switch::Tips if setting.tips_channel.is_empty() => {
                "Tips are disabled for this server.".to_string()
            }
            Switch::Tips => format!(
                "Tips are enabled for this server in <#{}>.",
                setting.tips_channel
            ),
            Switch::NowPlaying => format!(
                "Sending now playing messages each time a new track is started without user interaction is {}.",
                state(setting.auto_send_now_playing)
            ),
            Switch::Filter => format!(
                "The swear filter is {}.",
                state(setting.swear_filter.enabled)
            ),
        }
    }

    fn changed(self, enable: bool) -> String {
        let action = if enable { "enabled" } else { "disabled" };
        match (self, enable) {
            (Switch::Tips, true) => "Successfully enabled hourly tips for this channel.".to_string(),
            (Switch::Tips, false) => "Successfully disabled hourly tips for this server.".to_string(),
            (Switch::NowPlaying, _) => format!(
                "Successfully {} sending now playing messages each time a new track is started without user interaction.",
                action
            ),
            (Switch::Filter, _) => format!("Successfully {} the swear filter.", action),
        }
    }
}

pub struct SwitchStatusHandler(Switch);

#[async_trait]
impl SettingHandler for SwitchStatusHandler {
    fn title(&self) -> &'static str {
        self.0.title()
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        no_arguments(args)?;

        let switch = self.0;
        let setting_service = get_service::<SettingService>(services)?;
        let body = setting_service
            .read_setting(&context.guild_id, |setting| switch.status(setting))
            .await?;

        Ok(Response::success(switch.title(), body))
    }
}

pub struct SwitchHandler(Switch, bool);

#[async_trait]
impl SettingHandler for SwitchHandler {
    fn title(&self) -> &'static str {
        self.0.title()
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        no_arguments(args)?;

        let SwitchHandler(switch, enable) = *self;
        let setting_service = get_service::<SettingService>(services)?;
        setting_service
            .update_setting(&context.guild_id, |setting| {
                switch.apply(setting, enable, &context.channel_id)
            })
            .await?;

        Ok(Response::success(switch.title(), switch.changed(enable)))
    }
}

/// Settings that remember the channel a command was sent from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelTarget {
    InviteGeneration,
    Log,
}

pub struct ChannelHandler(ChannelTarget);

#[async_trait]
impl SettingHandler for ChannelHandler {
    fn title(&self) -> &'static str {
        match self.0 {
            ChannelTarget::InviteGeneration => INVITE_TITLE,
            ChannelTarget::Log => LOG_TITLE,
        }
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        no_arguments(args)?;

        let target = self.0;
        let channel_id = context.channel_id.to_string();
        let setting_service = get_service::<SettingService>(services)?;
        setting_service
            .update_setting(&context.guild_id, |setting| match target {
                ChannelTarget::InviteGeneration => setting.api_invite_channel = channel_id,
                ChannelTarget::Log => setting.log_settings.logging_channel = channel_id,
            })
            .await?;

        let body = match target {
            ChannelTarget::InviteGeneration => {
                "Successfully set the channel to use for generating invite links to this channel."
            }
            ChannelTarget::Log => "Successfully set the logging channel to this channel.",
        };
        Ok(Response::success(self.title(), body))
    }
}

pub struct InviteKeyHandler;

#[async_trait]
impl SettingHandler for InviteKeyHandler {
    fn title(&self) -> &'static str {
        INVITE_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        let setting_service = get_service::<SettingService>(services)?;

        if args.is_empty() {
            let key = setting_service
                .read_setting(&context.guild_id, |setting| setting.api_invite_key.clone())
                .await?;
            if key.is_empty() {
                return Ok(Response::success(
                    INVITE_TITLE,
                    "No key is currently set for generating invite links!",
                ));
            }

            return Ok(Response::success(
                INVITE_TITLE,
                format!(
                    "The current key for generating invite links is ``{}``.",
                    escape_backticks(&key)
                ),
            ));
        }

        let key = args.join(" ");
        let body = format!(
            "Successfully set the key to use for generating invite links to ``{}``.",
            escape_backticks(&key)
        );
        setting_service
            .update_setting(&context.guild_id, |setting| setting.api_invite_key = key)
            .await?;

        Ok(Response::success(INVITE_TITLE, body))
    }
}

pub struct FilterTimeoutHandler;

#[async_trait]
impl SettingHandler for FilterTimeoutHandler {
    fn title(&self) -> &'static str {
        FILTER_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        let setting_service = get_service::<SettingService>(services)?;

        let timeout = match args.first() {
            Some(input) => parse_timeout(input)?,
            None => {
                let timeout = setting_service
                    .read_setting(&context.guild_id, |setting| {
                        setting.swear_filter.warning_delete_timeout
                    })
                    .await?;

                if timeout == 0 {
                    return Ok(Response::success(
                        FILTER_TITLE,
                        "The timeout for deleting warning messages is disabled.",
                    ));
                }

                return Ok(Response::success(
                    FILTER_TITLE,
                    format!(
                        "The current timeout for deleting warning messages is set to {} seconds ({}).",
                        timeout,
                        humantime::format_duration(Duration::from_secs(timeout))
                    ),
                ));
            }
        };

        setting_service
            .update_setting(&context.guild_id, |setting| {
                setting.swear_filter.warning_delete_timeout = timeout
            })
            .await?;

        if timeout == 0 {
            return Ok(Response::success(
                FILTER_TITLE,
                "Successfully disabled the timeout for deleting warning messages.",
            ));
        }

        Ok(Response::success(
            FILTER_TITLE,
            format!(
                "Successfully set the timeout for deleting warning messages to {} seconds.",
                timeout
            ),
        ))
    }
}

pub struct WordsListHandler;

#[async_trait]
impl SettingHandler for WordsListHandler {
    fn title(&self) -> &'static str {
        FILTER_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        no_arguments(args)?;

        let setting_service = get_service::<SettingService>(services)?;
        let words = setting_service
            .read_setting(&context.guild_id, |setting| {
                setting.swear_filter.blacklisted_words.join(", ")
            })
            .await?;

        let words = if words.is_empty() {
            "No words are in the swear filter!".to_string()
        } else {
            words
        };

        Ok(Response::success(FILTER_TITLE, "").field("Filtered Words", words))
    }
}

pub struct WordsAddHandler;

#[async_trait]
impl SettingHandler for WordsAddHandler {
    fn title(&self) -> &'static str {
        FILTER_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        if args.is_empty() {
            return Err(CommandError::MissingArgument(
                "You must specify one or more words to add to the filter.".into(),
            ));
        }

        let setting_service = get_service::<SettingService>(services)?;
        setting_service
            .update_setting(&context.guild_id, |setting| {
                setting.swear_filter.add_words(args)
            })
            .await?;

        Ok(Response::success(
            FILTER_TITLE,
            "Successfully added the provided words to the filter.",
        ))
    }
}

pub struct WordsRemoveHandler;

#[async_trait]
impl SettingHandler for WordsRemoveHandler {
    fn title(&self) -> &'static str {
        FILTER_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        if args.is_empty() {
            return Err(CommandError::MissingArgument(
                "You must specify one or more words to remove from the filter.".into(),
            ));
        }

        let setting_service = get_service::<SettingService>(services)?;
        let removal = setting_service
            .update_setting(&context.guild_id, |setting| {
                setting.swear_filter.remove_words(args)
            })
            .await?;

        if removal.removed.is_empty() {
            return Err(CommandError::NotFound(format!(
                "None of the provided words are in the filter: {}",
                removal.missing.join(", ")
            )));
        }

        let mut body = format!(
            "Successfully removed the following words from the filter: {}",
            removal.removed.join(", ")
        );
        if !removal.missing.is_empty() {
            body.push_str(&format!(
                "\nFailed to find the following words: {}",
                removal.missing.join(", ")
            ));
        }

        Ok(Response::success(FILTER_TITLE, body))
    }
}

pub struct WordsClearHandler;

#[async_trait]
impl SettingHandler for WordsClearHandler {
    fn title(&self) -> &'static str {
        FILTER_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        no_arguments(args)?;

        let setting_service = get_service::<SettingService>(services)?;
        setting_service
            .update_setting(&context.guild_id, |setting| {
                setting.swear_filter.blacklisted_words.clear()
            })
            .await?;

        Ok(Response::success(
            FILTER_TITLE,
            "Successfully cleared all words from the filter.",
        ))
    }
}

pub struct WordsDedupeHandler;

#[async_trait]
impl SettingHandler for WordsDedupeHandler {
    fn title(&self) -> &'static str {
        FILTER_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        no_arguments(args)?;

        let setting_service = get_service::<SettingService>(services)?;
        let dropped = setting_service
            .update_setting(&context.guild_id, |setting| {
                setting.swear_filter.dedupe_words()
            })
            .await?;

        let body = match dropped {
            0 => "There are no repeated words in the filter.".to_string(),
            1 => "Successfully removed 1 repeated word from the filter.".to_string(),
            dropped => format!(
                "Successfully removed {} repeated words from the filter.",
                dropped
            ),
        };

        Ok(Response::success(FILTER_TITLE, body))
    }
}

pub struct LogUnsetHandler;

#[async_trait]
impl SettingHandler for LogUnsetHandler {
    fn title(&self) -> &'static str {
        LOG_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        no_arguments(args)?;

        let setting_service = get_service::<SettingService>(services)?;
        setting_service
            .update_setting(&context.guild_id, |setting| {
                setting.log_settings.logging_channel.clear();
                setting.log_settings.logging_enabled = false;
            })
            .await?;

        Ok(Response::success(
            LOG_TITLE,
            "Successfully unset the logging channel and disabled logging.",
        ))
    }
}

fn describe_partition(partition: &FlagPartition, action: &str) -> String {
    let mut lines = vec![];
    if !partition.applied.is_empty() {
        lines.push(format!(
            "{} the following events: {}",
            action,
            partition.applied.join(", ")
        ));
    }
    if !partition.unknown.is_empty() {
        lines.push(format!(
            "Failed to find the following events: {}",
            partition.unknown.join(", ")
        ));
    }

    lines.join("\n")
}

pub struct LogEnableHandler;

#[async_trait]
impl SettingHandler for LogEnableHandler {
    fn title(&self) -> &'static str {
        LOG_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        let setting_service = get_service::<SettingService>(services)?;
        let channel_id = context.channel_id.to_string();

        let (partition, channel_was_set) = setting_service
            .update_setting(&context.guild_id, |setting| {
                let log_settings = &mut setting.log_settings;
                log_settings.logging_enabled = true;

                let partition = match args {
                    ["all"] => {
                        log_settings.logging_events.set_all(true);
                        None
                    }
                    ["recommended"] => {
                        log_settings
                            .logging_events
                            .apply_preset(&LogEvents::recommended());
                        None
                    }
                    [] => None,
                    names => Some(log_settings.logging_events.set_many(names, true)),
                };

                let channel_was_set = log_settings.logging_channel.is_empty();
                if channel_was_set {
                    log_settings.logging_channel = channel_id;
                }

                (partition, channel_was_set)
            })
            .await?;

        let mut body = match args {
            ["all"] => "Successfully enabled all logging events",
            ["recommended"] => "Successfully toggled all logging events to their recommended states",
            _ => "Successfully enabled logging",
        }
        .to_string();
        if channel_was_set {
            body.push_str(" and set the logging channel to this channel.");
        } else {
            body.push('.');
        }
        if let Some(partition) = partition {
            body.push_str("\n\n");
            body.push_str(&describe_partition(&partition, "Enabled"));
        }

        Ok(Response::success(LOG_TITLE, body))
    }
}

pub struct LogDisableHandler;

#[async_trait]
impl SettingHandler for LogDisableHandler {
    fn title(&self) -> &'static str {
        LOG_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        let setting_service = get_service::<SettingService>(services)?;

        let partition = setting_service
            .update_setting(&context.guild_id, |setting| {
                let log_settings = &mut setting.log_settings;
                match args {
                    [] => {
                        log_settings.logging_enabled = false;
                        None
                    }
                    ["all"] => {
                        log_settings.logging_events.set_all(false);
                        None
                    }
                    names => Some(log_settings.logging_events.set_many(names, false)),
                }
            })
            .await?;

        let body = match (args, partition) {
            (_, Some(partition)) if partition.applied.is_empty() => {
                return Err(CommandError::NotFound(describe_partition(
                    &partition, "Disabled",
                )))
            }
            (_, Some(partition)) => describe_partition(&partition, "Disabled"),
            ([], None) => "Successfully disabled logging.".to_string(),
            (_, None) => "Successfully disabled all logging events.".to_string(),
        };

        Ok(Response::success(LOG_TITLE, body))
    }
}

pub struct LogEventsHandler;

#[async_trait]
impl SettingHandler for LogEventsHandler {
    fn title(&self) -> &'static str {
        LOG_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        no_arguments(args)?;

        let setting_service = get_service::<SettingService>(services)?;
        let states = setting_service
            .read_setting(&context.guild_id, |setting| {
                setting
                    .log_settings
                    .logging_events
                    .states()
                    .map(|(name, enabled)| format!("{}: **{}**", name, enabled))
                    .collect::<Vec<String>>()
            })
            .await?;

        Ok(Response::success(
            LOG_TITLE,
            format!("__Event states__\n\n{}", states.join("\n")),
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetTarget {
    JoinMessage,
    LeaveMessage,
    Log,
    Filter,
    InviteGeneration,
}

impl ResetTarget {
    pub const ALL: [ResetTarget; 5] = [
        ResetTarget::JoinMessage,
        ResetTarget::LeaveMessage,
        ResetTarget::Log,
        ResetTarget::Filter,
        ResetTarget::InviteGeneration,
    ];

    fn selectors(self) -> &'static [&'static str] {
        match self {
            ResetTarget::JoinMessage => &["joinmsg"],
            ResetTarget::LeaveMessage => &["leavemsg"],
            ResetTarget::Log => &["log"],
            ResetTarget::Filter => &["filter"],
            ResetTarget::InviteGeneration => &["invitegen"],
        }
    }

    fn description(self) -> &'static str {
        match self {
            ResetTarget::JoinMessage => "Removes the join message",
            ResetTarget::LeaveMessage => "Removes the leave message",
            ResetTarget::Log => "Unsets the logging channel and disables logging and every event",
            ResetTarget::Filter => "Restores every swear filter setting to its default",
            ResetTarget::InviteGeneration => "Removes the invite link channel and key",
        }
    }

    /// Every field of the target is reset together.
    fn apply(self, setting: &mut GuildSetting) {
        match self {
            ResetTarget::JoinMessage => {
                setting.user_join_message.clear();
                setting.user_join_message_channel.clear();
            }
            ResetTarget::LeaveMessage => {
                setting.user_leave_message.clear();
                setting.user_leave_message_channel.clear();
            }
            ResetTarget::Log => setting.log_settings = LogSettings::default(),
            ResetTarget::Filter => setting.swear_filter = SwearFilter::default(),
            ResetTarget::InviteGeneration => {
                setting.api_invite_channel.clear();
                setting.api_invite_key.clear();
            }
        }
    }
}

pub struct ResetHandler(ResetTarget);

#[async_trait]
impl SettingHandler for ResetHandler {
    fn title(&self) -> &'static str {
        RESET_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        no_arguments(args)?;

        let target = self.0;
        let setting_service = get_service::<SettingService>(services)?;
        setting_service
            .update_setting(&context.guild_id, |setting| target.apply(setting))
            .await?;

        Ok(Response::success(
            RESET_TITLE,
            format!(
                "Successfully reset the settings for ``{}``.",
                target.selectors()[0]
            ),
        ))
    }
}

pub struct ResetMissingHandler;

#[async_trait]
impl SettingHandler for ResetMissingHandler {
    fn title(&self) -> &'static str {
        RESET_TITLE
    }

    async fn handle(
        &self,
        _args: &[&str],
        _context: &CommandContext,
        _services: &Services,
    ) -> Result<Response, CommandError> {
        Err(CommandError::MissingArgument(
            "You must specify a setting to reset.".into(),
        ))
    }
}
