use async_recursion::async_recursion;
use async_trait::async_trait;
use serde::Serialize;
use smol_str::SmolStr;
use thiserror::Error;
use tracing::{debug, error};
use typemap_rev::TypeMapKey;

use crate::constants::{EMBED_COLOR, ERROR_COLOR, FIELDS_COLOR, SETTINGS_TITLE};
use crate::service::store::StoreError;
use crate::service::Services;
use crate::util::escape_backticks;

pub mod bot;
pub mod server;
pub mod user;
pub mod validators;

const DEFAULT_USAGE_ARGUMENTS: &str = "setting (value(s))";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Validation,
    DuplicateValue,
    MissingArgument,
    ExternalService,
    Internal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "error", rename_all = "snake_case")]
pub enum ResponseKind {
    Success,
    Usage,
    Error(ErrorKind),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResponseField {
    pub name: String,
    pub value: String,
}

/// Result of a settings command, rendering is left to whoever sends it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Response {
    pub kind: ResponseKind,
    pub title: String,
    pub body: String,
    pub fields: Vec<ResponseField>,
    pub color: u32,
}

impl Response {
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Response {
        Response {
            kind: ResponseKind::Success,
            title: title.into(),
            body: body.into(),
            fields: vec![],
            color: EMBED_COLOR,
        }
    }

    pub fn usage(title: impl Into<String>, body: impl Into<String>) -> Response {
        Response {
            kind: ResponseKind::Usage,
            ..Response::success(title, body)
        }
    }

    pub fn error(kind: ErrorKind, title: impl Into<String>, body: impl Into<String>) -> Response {
        Response {
            kind: ResponseKind::Error(kind),
            color: ERROR_COLOR,
            ..Response::success(title, body)
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Response {
        self.fields.push(ResponseField {
            name: name.into(),
            value: value.into(),
        });
        self.color = FIELDS_COLOR;
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ResponseKind::Error(_))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self.kind {
            ResponseKind::Error(kind) => Some(kind),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    DuplicateValue(String),
    #[error("{0}")]
    MissingArgument(String),
    #[error("{0}")]
    ExternalService(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        CommandError::Internal(err.to_string())
    }
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::NotFound(_) => ErrorKind::NotFound,
            CommandError::Validation(_) => ErrorKind::Validation,
            CommandError::DuplicateValue(_) => ErrorKind::DuplicateValue,
            CommandError::MissingArgument(_) => ErrorKind::MissingArgument,
            CommandError::ExternalService(_) => ErrorKind::ExternalService,
            CommandError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn into_response(self, title: &str) -> Response {
        let kind = self.kind();
        let body = match self {
            CommandError::Internal(reason) => {
                error!(title = title, "failed to handle settings command {}", reason);
                "Something went wrong while handling this command, please try again later."
                    .to_string()
            }
            other => other.to_string(),
        };

        Response::error(kind, format!("{} Error", title), body)
    }
}

/// Who issued a command and where.
#[derive(Clone, Debug, Default)]
pub struct CommandContext {
    pub guild_id: SmolStr,
    pub user_id: SmolStr,
    pub channel_id: SmolStr,
    pub mentions: Vec<SmolStr>,
    /// Effective command prefix in this guild, used in usage examples.
    pub prefix: String,
}

#[async_trait]
pub trait SettingHandler {
    fn title(&self) -> &'static str;
    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError>;
}

pub enum SettingNode {
    Group(SettingGroup),
    Handler(Box<dyn SettingHandler + Send + Sync>),
}

pub struct SettingChild {
    pub selectors: &'static [&'static str],
    pub description: &'static str,
    pub argument: &'static str,
    pub node: SettingNode,
}

/// Inner node of the settings tree, selects a child by the first remaining token.
pub struct SettingGroup {
    pub path: &'static str,
    pub title: &'static str,
    pub help_text: &'static str,
    pub usage_arguments: &'static str,
    /// Runs instead of the usage response when no tokens are left.
    pub default: Option<Box<dyn SettingHandler + Send + Sync>>,
    pub children: Vec<SettingChild>,
}

impl SettingGroup {
    pub fn new(path: &'static str, title: &'static str, help_text: &'static str) -> SettingGroup {
        SettingGroup {
            path,
            title,
            help_text,
            usage_arguments: DEFAULT_USAGE_ARGUMENTS,
            default: None,
            children: vec![],
        }
    }

    pub fn usage_arguments(mut self, usage_arguments: &'static str) -> SettingGroup {
        self.usage_arguments = usage_arguments;
        self
    }

    pub fn default_handler(
        mut self,
        handler: impl SettingHandler + Send + Sync + 'static,
    ) -> SettingGroup {
        self.default = Some(Box::new(handler));
        self
    }

    pub fn handler(
        mut self,
        selectors: &'static [&'static str],
        description: &'static str,
        argument: &'static str,
        handler: impl SettingHandler + Send + Sync + 'static,
    ) -> SettingGroup {
        self.children.push(SettingChild {
            selectors,
            description,
            argument,
            node: SettingNode::Handler(Box::new(handler)),
        });
        self
    }

    pub fn group(
        mut self,
        selectors: &'static [&'static str],
        description: &'static str,
        argument: &'static str,
        group: SettingGroup,
    ) -> SettingGroup {
        self.children.push(SettingChild {
            selectors,
            description,
            argument,
            node: SettingNode::Group(group),
        });
        self
    }

    pub fn find(&self, selector: &str) -> Option<&SettingChild> {
        self.children
            .iter()
            .find(|child| child.selectors.contains(&selector))
    }

    pub fn usage(&self, prefix: &str) -> Response {
        let command = if self.path.is_empty() {
            self.usage_arguments.to_string()
        } else {
            format!("{} {}", self.path, self.usage_arguments)
        };

        let mut response = Response::usage(
            format!("{} Help", self.title),
            format!("{}\n\nUsage: ``{}{}``", self.help_text, prefix, command),
        );
        for child in &self.children {
            response = response.field(
                child.selectors.join("/"),
                format!("{} ({})", child.description, child.argument),
            );
        }

        response
    }
}

async fn run_handler(
    handler: &(dyn SettingHandler + Send + Sync),
    args: &[&str],
    context: &CommandContext,
    services: &Services,
) -> Response {
    match handler.handle(args, context, services).await {
        Ok(response) => response,
        Err(err) => err.into_response(handler.title()),
    }
}

#[async_recursion]
pub async fn dispatch(
    node: &SettingNode,
    args: &[&str],
    context: &CommandContext,
    services: &Services,
) -> Response {
    let group = match node {
        SettingNode::Handler(handler) => {
            return run_handler(handler.as_ref(), args, context, services).await
        }
        SettingNode::Group(group) => group,
    };

    let (selector, rest) = match args.split_first() {
        Some(split) => split,
        None => {
            return match &group.default {
                Some(handler) => run_handler(handler.as_ref(), args, context, services).await,
                None => group.usage(&context.prefix),
            }
        }
    };

    match group.find(selector) {
        Some(child) => dispatch(&child.node, rest, context, services).await,
        None => CommandError::NotFound(format!(
            "Error finding the setting ``{}``.",
            escape_backticks(selector)
        ))
        .into_response(group.title),
    }
}

/// Entry point for a tokenized command, `tokens` starts at the settings domain.
pub async fn run_command(
    tree: &SettingNode,
    tokens: &[&str],
    context: &CommandContext,
    services: &Services,
) -> Response {
    debug!(
        guild_id = context.guild_id.as_str(),
        user_id = context.user_id.as_str(),
        tokens = tokens.len(),
        "dispatching settings command"
    );

    dispatch(tree, tokens, context, services).await
}

pub fn get_settings_tree() -> SettingNode {
    SettingNode::Group(
        SettingGroup::new("", SETTINGS_TITLE, "Manages bot, user and server settings.")
            .usage_arguments("<bot|user|server> setting (value(s))")
            .group(
                &["bot"],
                "Manages how the bot behaves in this server",
                "setting (value(s))",
                bot::bot_settings(),
            )
            .group(
                &["user"],
                "Manages your personal settings",
                "setting (value(s))",
                user::user_settings(),
            )
            .group(
                &["server"],
                "Manages settings for this server",
                "setting (value(s))",
                server::server_settings(),
            ),
    )
}

/// Looks up a service, a missing one means `create_services` was changed without updating callers.
pub fn get_service<T: TypeMapKey>(services: &Services) -> Result<&T::Value, CommandError> {
    services.get::<T>().ok_or_else(|| {
        CommandError::Internal(format!("couldn't get {}!", std::any::type_name::<T>()))
    })
}

/// For handlers that take no value, leftover tokens are an unknown setting rather than ignored.
pub fn no_arguments(args: &[&str]) -> Result<(), CommandError> {
    match args.first() {
        Some(token) => Err(CommandError::NotFound(format!(
            "Error finding the setting ``{}``.",
            escape_backticks(token)
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use smol_str::SmolStr;

    use crate::commands::{get_settings_tree, run_command, CommandContext, Response};
    use crate::service::nintendo_network::{MockNintendoNetworkApi, NintendoNetworkService};
    use crate::service::setting::SettingService;
    use crate::service::timezone::{ChronoTzResolver, TimezoneService};
    use crate::service::user_setting::UserSettingService;
    use crate::service::Services;

    pub const DEFAULT_PREFIX: &str = "cli$";

    pub async fn test_services(nnid_api: MockNintendoNetworkApi) -> Services {
        let mut services = Services::new();
        services.insert::<SettingService>(SettingService::new(DEFAULT_PREFIX.into()));
        services.insert::<UserSettingService>(UserSettingService::new());
        services.insert::<TimezoneService>(TimezoneService::new(Box::new(ChronoTzResolver)));
        services.insert::<NintendoNetworkService>(NintendoNetworkService::new(Box::new(nnid_api)));

        let setting_service = services.get::<SettingService>().unwrap();
        setting_service.ensure_setting("guild").await;
        let user_setting_service = services.get::<UserSettingService>().unwrap();
        user_setting_service.ensure_setting("user").await;

        services
    }

    pub fn context() -> CommandContext {
        CommandContext {
            guild_id: SmolStr::new("guild"),
            user_id: SmolStr::new("user"),
            channel_id: SmolStr::new("channel"),
            mentions: vec![],
            prefix: DEFAULT_PREFIX.into(),
        }
    }

    pub async fn run(services: &Services, context: &CommandContext, command: &str) -> Response {
        let tree = get_settings_tree();
        let tokens: Vec<&str> = command.split_whitespace().collect();
        run_command(&tree, &tokens, context, services).await
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;
    use crate::service::nintendo_network::MockNintendoNetworkApi;

    fn collect_paths(node: &SettingNode, prefix: String, paths: &mut Vec<String>) {
        if let SettingNode::Group(group) = node {
            for child in &group.children {
                let path = format!("{} {}", prefix, child.selectors[0]).trim().to_string();
                paths.push(path.clone());
                collect_paths(&child.node, path, paths);
            }
        }
    }

    #[test]
    fn tree_exposes_every_command_path() {
        let mut paths = vec![];
        collect_paths(&get_settings_tree(), String::new(), &mut paths);

        for expected in [
            "bot prefix",
            "user about",
            "user timezone",
            "user social set",
            "user social list",
            "user social clear",
            "user social available",
            "server joinmsg",
            "server leavemsg",
            "server tips enable",
            "server tips disable",
            "server autosendnowplaying enable",
            "server invitegen setchannel",
            "server invitegen key",
            "server filter enable",
            "server filter disable",
            "server filter words add",
            "server filter words remove",
            "server filter words clear",
            "server filter timeout",
            "server log set",
            "server log enable",
            "server log disable",
            "server log events",
            "server reset joinmsg",
            "server reset leavemsg",
            "server reset log",
            "server reset filter",
            "server reset invitegen",
        ] {
            assert!(paths.iter().any(|path| path == expected), "missing {}", expected);
        }
    }

    #[test]
    fn selectors_are_unique_per_group() {
        fn check(node: &SettingNode) {
            if let SettingNode::Group(group) = node {
                let mut seen: Vec<&str> = vec![];
                for child in &group.children {
                    for selector in child.selectors {
                        assert!(!seen.contains(selector), "duplicate selector {}", selector);
                        seen.push(selector);
                    }
                    check(&child.node);
                }
            }
        }

        check(&get_settings_tree());
    }

    #[tokio::test]
    async fn empty_tokens_return_usage() {
        let services = test_services(MockNintendoNetworkApi::new()).await;
        let response = run(&services, &context(), "").await;

        assert_eq!(response.kind, ResponseKind::Usage);
        assert_eq!(response.title, "Settings Help");
        assert_eq!(response.fields.len(), 3);
        assert!(response.body.contains("``cli$<bot|user|server> setting (value(s))``"));
    }

    #[tokio::test]
    async fn nested_groups_return_their_own_usage() {
        let services = test_services(MockNintendoNetworkApi::new()).await;
        let response = run(&services, &context(), "server filter").await;

        assert_eq!(response.kind, ResponseKind::Usage);
        assert_eq!(response.title, "Server Settings - Swear Filter Help");
        assert!(response.body.contains("``cli$server filter setting (value(s))``"));
        assert!(response.fields.iter().any(|field| field.name == "words"));
    }

    #[tokio::test]
    async fn unknown_selector_names_the_token() {
        let services = test_services(MockNintendoNetworkApi::new()).await;
        let response = run(&services, &context(), "server nope").await;

        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(response.title, "Server Settings Error");
        assert_eq!(response.body, "Error finding the setting ``nope``.");
    }

    #[tokio::test]
    async fn selectors_are_case_sensitive() {
        let services = test_services(MockNintendoNetworkApi::new()).await;
        let response = run(&services, &context(), "Server log").await;

        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(response.title, "Settings Error");
    }

    #[test]
    fn no_arguments_names_the_first_leftover_token() {
        assert!(no_arguments(&[]).is_ok());

        let err = no_arguments(&["bo`gus", "more"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Error finding the setting ``bo\\`gus``.");
    }

    #[tokio::test]
    async fn unprovisioned_guild_is_an_internal_error() {
        let services = test_services(MockNintendoNetworkApi::new()).await;
        let mut context = context();
        context.guild_id = SmolStr::new("never-seen");

        let response = run(&services, &context, "server filter enable").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::Internal));
    }

    #[test]
    fn responses_serialize_with_kind_tags() {
        let json = serde_json::to_value(Response::error(
            ErrorKind::DuplicateValue,
            "title",
            "body",
        ))
        .unwrap();
        assert_eq!(json["kind"]["type"], "error");
        assert_eq!(json["kind"]["error"], "duplicate_value");

        let json = serde_json::to_value(Response::success("title", "body")).unwrap();
        assert_eq!(json["kind"]["type"], "success");
    }
}
