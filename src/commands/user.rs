use async_trait::async_trait;
use tracing::warn;

use crate::commands::validators::{ensure_changed, validate_friend_code, validate_timezone};
use crate::commands::{
    get_service, no_arguments, CommandContext, CommandError, Response, SettingGroup,
    SettingHandler,
};
use crate::constants::{TIMEZONE_EXAMPLE, USER_SETTINGS_TITLE};
use crate::database::user_settings::SocialKind;
use crate::service::nintendo_network::NintendoNetworkService;
use crate::service::timezone::TimezoneService;
use crate::service::user_setting::UserSettingService;
use crate::service::Services;
use crate::util::escape_backticks;

const ABOUT_ME_TITLE: &str = "User Settings - About Me";
const TIMEZONE_TITLE: &str = "User Settings - Timezone";
const SOCIALS_TITLE: &str = "User Settings - Socials";

pub fn user_settings() -> SettingGroup {
    SettingGroup::new("user", USER_SETTINGS_TITLE, "Manages your personal settings.")
        .handler(
            &["about", "aboutme", "description", "desc", "info"],
            "Displays your or a mentioned user's about me, or sets yours",
            "this/@mention/text",
            AboutMeHandler,
        )
        .handler(
            &["timezone", "tz"],
            "Displays your current time or sets your timezone",
            "this/timezone name",
            TimezoneHandler,
        )
        .group(
            &["social", "socials"],
            "Manages your socials",
            "setting (value(s))",
            SettingGroup::new("user social", SOCIALS_TITLE, "Manages your socials.")
                .handler(
                    &["set", "add"],
                    "Sets a social",
                    "social code/name",
                    SocialSetHandler,
                )
                .handler(&["list"], "Lists your socials", "this", SocialListHandler)
                .handler(
                    &["clear", "remove"],
                    "Removes a social",
                    "social",
                    SocialClearHandler,
                )
                .handler(
                    &["available", "types"],
                    "Lists available socials",
                    "this",
                    SocialTypesHandler,
                ),
        )
}

fn mention(user_id: &str) -> String {
    format!("<@!{}>", user_id)
}

pub struct AboutMeHandler;

#[async_trait]
impl SettingHandler for AboutMeHandler {
    fn title(&self) -> &'static str {
        ABOUT_ME_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        let user_setting_service = get_service::<UserSettingService>(services)?;

        if args.is_empty() {
            let about_me = user_setting_service
                .read_setting(&context.user_id, |setting| setting.about_me.clone())
                .await?;
            if about_me.is_empty() {
                return Err(CommandError::MissingArgument(format!(
                    "You must set an about me before viewing it.\n\nEx: ``{}user about I like trains``",
                    context.prefix
                )));
            }

            return Ok(about_me_response(&context.user_id, &about_me));
        }

        if let (1, Some(mentioned)) = (args.len(), context.mentions.first()) {
            let about_me = match user_setting_service.find_setting(mentioned).await {
                Some(setting) => setting.about_me,
                None => {
                    return Err(CommandError::NotFound(format!(
                        "Error finding the about me for {}.",
                        mention(mentioned)
                    )))
                }
            };
            if about_me.is_empty() {
                return Err(CommandError::NotFound(format!(
                    "{} hasn't set an about me yet.",
                    mention(mentioned)
                )));
            }

            return Ok(about_me_response(mentioned, &about_me));
        }

        let about_me = args.join(" ");
        user_setting_service
            .update_setting(&context.user_id, |setting| setting.about_me = about_me)
            .await?;

        Ok(Response::success(
            ABOUT_ME_TITLE,
            "Successfully set your about me!",
        ))
    }
}

fn about_me_response(user_id: &str, about_me: &str) -> Response {
    Response::success("About Me", mention(user_id)).field("About Me", about_me)
}

pub struct TimezoneHandler;

#[async_trait]
impl SettingHandler for TimezoneHandler {
    fn title(&self) -> &'static str {
        TIMEZONE_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        let user_setting_service = get_service::<UserSettingService>(services)?;
        let timezone_service = get_service::<TimezoneService>(services)?;

        let name = match args.first() {
            Some(name) => *name,
            None => {
                let current = user_setting_service
                    .read_setting(&context.user_id, |setting| setting.timezone.clone())
                    .await?;
                if current.is_empty() {
                    return Err(CommandError::MissingArgument(format!(
                        "You must set a timezone before viewing it.\n\nEx: ``{}user timezone {}``",
                        context.prefix, TIMEZONE_EXAMPLE
                    )));
                }

                let timezone = timezone_service.resolve(&current).await.ok_or_else(|| {
                    warn!(
                        user_id = context.user_id.as_str(),
                        timezone = current.as_str(),
                        "stored timezone no longer resolves"
                    );
                    CommandError::Validation(format!(
                        "You have an invalid timezone set, please set a new one first.\n\nEx: ``{}user timezone {}``",
                        context.prefix, TIMEZONE_EXAMPLE
                    ))
                })?;

                return Ok(Response::success(
                    TIMEZONE_TITLE,
                    format!(
                        "Your current timezone is set to ``{}``.\nYour current time is ``{}``.",
                        current,
                        TimezoneService::current_time(timezone)
                    ),
                ));
            }
        };

        // resolved before taking the record lock, the resolver may need to do IO
        let timezone = validate_timezone(timezone_service, name).await?;
        user_setting_service
            .update_setting(&context.user_id, |setting| {
                setting.timezone = name.to_string()
            })
            .await?;

        Ok(Response::success(
            TIMEZONE_TITLE,
            format!(
                "Successfully set your timezone to ``{}``.\nYour current time is ``{}``.",
                name,
                TimezoneService::current_time(timezone)
            ),
        ))
    }
}

fn parse_social_kind(selector: &str) -> Result<SocialKind, CommandError> {
    SocialKind::from_selector(selector).ok_or_else(|| {
        CommandError::NotFound(format!(
            "Unknown social ``{}``.",
            escape_backticks(selector)
        ))
    })
}

fn already_set_message(kind: SocialKind) -> String {
    format!("You have already set that {}.", kind.short_name())
}

pub struct SocialSetHandler;

#[async_trait]
impl SettingHandler for SocialSetHandler {
    fn title(&self) -> &'static str {
        SOCIALS_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        let (kind, value) = match args {
            [kind, value, ..] => (parse_social_kind(kind)?, *value),
            [kind] => {
                parse_social_kind(kind)?;
                return Err(CommandError::MissingArgument(
                    "You must specify a social identifier to set it.".into(),
                ));
            }
            [] => {
                return Err(CommandError::MissingArgument(
                    "You must specify a social and an identifier to set it.".into(),
                ))
            }
        };

        let user_setting_service = get_service::<UserSettingService>(services)?;

        let current = user_setting_service
            .read_setting(&context.user_id, |setting| {
                setting.socials.get(kind).to_string()
            })
            .await?;
        ensure_changed(&current, value, already_set_message(kind))?;

        match kind {
            SocialKind::SwitchFriendCode => validate_friend_code(value)?,
            SocialKind::NintendoNetworkId => {
                let nintendo_network_service = get_service::<NintendoNetworkService>(services)?;
                let exists = nintendo_network_service
                    .does_user_exist(value)
                    .await
                    .map_err(|_| {
                        CommandError::ExternalService(
                            "There was an error checking if that NNID exists.".into(),
                        )
                    })?;
                if !exists {
                    return Err(CommandError::Validation("That NNID doesn't exist!".into()));
                }
            }
            SocialKind::PlayStationNetwork | SocialKind::XboxLive => {}
        }

        // checked again under the lock, another command may have stored it meanwhile
        user_setting_service
            .update_setting(&context.user_id, |setting| {
                let field = setting.socials.field_mut(kind);
                ensure_changed(field, value, already_set_message(kind))?;
                *field = value.to_string();
                Ok::<(), CommandError>(())
            })
            .await??;

        Ok(Response::success(
            SOCIALS_TITLE,
            format!(
                "Successfully set your {} to ``{}``.",
                kind.short_name(),
                escape_backticks(value)
            ),
        ))
    }
}

pub struct SocialListHandler;

#[async_trait]
impl SettingHandler for SocialListHandler {
    fn title(&self) -> &'static str {
        SOCIALS_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        no_arguments(args)?;

        let user_setting_service = get_service::<UserSettingService>(services)?;
        let socials = user_setting_service
            .read_setting(&context.user_id, |setting| setting.socials.clone())
            .await?;

        let set_kinds: Vec<SocialKind> = SocialKind::ALL
            .into_iter()
            .filter(|kind| socials.is_set(*kind))
            .collect();
        if set_kinds.is_empty() {
            return Ok(Response::success(
                SOCIALS_TITLE,
                "You don't have any socials yet!",
            ));
        }

        let mut response =
            Response::success("Socials", "Below are all of the socials you have added.");
        for kind in set_kinds {
            response = response.field(kind.display_name(), socials.get(kind));
        }

        Ok(response)
    }
}

pub struct SocialClearHandler;

#[async_trait]
impl SettingHandler for SocialClearHandler {
    fn title(&self) -> &'static str {
        SOCIALS_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        context: &CommandContext,
        services: &Services,
    ) -> Result<Response, CommandError> {
        let kind = match args {
            [selector, rest @ ..] => {
                let kind = parse_social_kind(selector)?;
                no_arguments(rest)?;
                kind
            }
            [] => {
                return Err(CommandError::MissingArgument(
                    "You must specify a social to clear.".into(),
                ))
            }
        };

        let user_setting_service = get_service::<UserSettingService>(services)?;
        user_setting_service
            .update_setting(&context.user_id, |setting| {
                let field = setting.socials.field_mut(kind);
                if field.is_empty() {
                    return Err(CommandError::NotFound(format!(
                        "You don't have a {} set.",
                        kind.short_name()
                    )));
                }
                field.clear();
                Ok(())
            })
            .await??;

        Ok(Response::success(
            SOCIALS_TITLE,
            format!("Cleared your {}.", kind.short_name()),
        ))
    }
}

pub struct SocialTypesHandler;

#[async_trait]
impl SettingHandler for SocialTypesHandler {
    fn title(&self) -> &'static str {
        SOCIALS_TITLE
    }

    async fn handle(
        &self,
        args: &[&str],
        _context: &CommandContext,
        _services: &Services,
    ) -> Result<Response, CommandError> {
        no_arguments(args)?;

        let types = SocialKind::ALL
            .into_iter()
            .map(|kind| format!("``{}`` - {}", kind.selector(), kind.description()))
            .collect::<Vec<String>>()
            .join("\n");

        Ok(Response::success(
            "User Settings - Socials - Types",
            format!("These are the available socials you can use:\n\n{}", types),
        ))
    }
}

#[cfg(test)]
mod tests {
    use smol_str::SmolStr;

    use crate::commands::test_util::*;
    use crate::commands::{ErrorKind, ResponseKind};
    use crate::service::nintendo_network::{MockNintendoNetworkApi, NintendoNetworkError};
    use crate::service::user_setting::UserSettingService;
    use crate::service::Services;

    async fn socials(services: &Services) -> crate::database::user_settings::Socials {
        services
            .get::<UserSettingService>()
            .unwrap()
            .get_setting("user")
            .await
            .unwrap()
            .socials
    }

    #[tokio::test]
    async fn about_me_round_trip_through_commands() {
        let services = test_services(MockNintendoNetworkApi::new()).await;

        let response = run(&services, &context(), "user about").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::MissingArgument));

        let response = run(&services, &context(), "user desc hello   there world").await;
        assert_eq!(response.kind, ResponseKind::Success);

        let response = run(&services, &context(), "user aboutme").await;
        assert_eq!(response.fields[0].value, "hello there world");
        assert_eq!(response.body, "<@!user>");
    }

    #[tokio::test]
    async fn about_me_of_mentioned_user() {
        let services = test_services(MockNintendoNetworkApi::new()).await;
        let user_setting_service = services.get::<UserSettingService>().unwrap();
        user_setting_service.ensure_setting("friend").await;
        user_setting_service
            .update_setting("friend", |setting| setting.about_me = "i am a friend".into())
            .await
            .unwrap();

        let mut context = context();
        context.mentions = vec![SmolStr::new("friend")];
        let response = run(&services, &context, "user about <@!friend>").await;
        assert_eq!(response.fields[0].value, "i am a friend");

        context.mentions = vec![SmolStr::new("stranger")];
        let response = run(&services, &context, "user about <@!stranger>").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));

        // a mention inside a longer text is part of the new about me
        let response = run(&services, &context, "user about friends with <@!stranger>").await;
        assert_eq!(response.kind, ResponseKind::Success);
    }

    #[tokio::test]
    async fn timezone_is_validated_before_storing() {
        let services = test_services(MockNintendoNetworkApi::new()).await;

        let response = run(&services, &context(), "user timezone").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::MissingArgument));

        let response = run(&services, &context(), "user tz Not/A_Zone").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::Validation));
        assert_eq!(response.body, "Invalid timezone.");

        let response = run(&services, &context(), "user timezone Asia/Tokyo").await;
        assert_eq!(response.kind, ResponseKind::Success);
        assert!(response.body.starts_with("Successfully set your timezone to ``Asia/Tokyo``."));

        let response = run(&services, &context(), "user timezone").await;
        assert!(response.body.contains("``Asia/Tokyo``"));
        assert!(response.body.contains("JST (+09:00)"));
    }

    #[tokio::test]
    async fn stored_invalid_timezone_asks_for_a_new_one() {
        let services = test_services(MockNintendoNetworkApi::new()).await;
        services
            .get::<UserSettingService>()
            .unwrap()
            .update_setting("user", |setting| setting.timezone = "Gone/Away".into())
            .await
            .unwrap();

        let response = run(&services, &context(), "user timezone").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::Validation));
        assert!(response.body.starts_with("You have an invalid timezone set"));
    }

    #[tokio::test]
    async fn friend_code_must_match_pattern() {
        let services = test_services(MockNintendoNetworkApi::new()).await;

        let response = run(&services, &context(), "user social set switchfc 1234").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::Validation));
        assert_eq!(socials(&services).await.switch_fc, "");

        let response = run(&services, &context(), "user social set switchfc SW-1234-5678-9012").await;
        assert_eq!(response.kind, ResponseKind::Success);
        assert_eq!(socials(&services).await.switch_fc, "SW-1234-5678-9012");
    }

    #[tokio::test]
    async fn setting_current_value_is_a_duplicate() {
        let services = test_services(MockNintendoNetworkApi::new()).await;

        for kind in ["psn", "xbox", "gamertag"] {
            run(&services, &context(), &format!("user social add {} player1", kind)).await;
            let response =
                run(&services, &context(), &format!("user social add {} player1", kind)).await;
            assert_eq!(response.error_kind(), Some(ErrorKind::DuplicateValue), "{}", kind);
        }

        run(&services, &context(), "user social set switchfc SW-1111-2222-3333").await;
        let response = run(&services, &context(), "user social set switchfc SW-1111-2222-3333").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::DuplicateValue));
        assert_eq!(response.body, "You have already set that Switch friend code.");
    }

    #[tokio::test]
    async fn nnid_duplicate_skips_external_check() {
        let mut api = MockNintendoNetworkApi::new();
        api.expect_does_user_exist().times(1).returning(|_| Ok(true));
        let services = test_services(api).await;

        let response = run(&services, &context(), "user social set nnid someone").await;
        assert_eq!(response.kind, ResponseKind::Success);
        let response = run(&services, &context(), "user social set nintyid someone").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::DuplicateValue));
        assert_eq!(socials(&services).await.nnid, "someone");
    }

    #[tokio::test]
    async fn nnid_must_exist() {
        let mut api = MockNintendoNetworkApi::new();
        api.expect_does_user_exist()
            .withf(|nnid| nnid == "nobody")
            .returning(|_| Ok(false));
        let services = test_services(api).await;

        let response = run(&services, &context(), "user social set nnid nobody").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::Validation));
        assert_eq!(response.body, "That NNID doesn't exist!");
        assert_eq!(socials(&services).await.nnid, "");
    }

    #[tokio::test]
    async fn nnid_check_failure_is_reported_without_mutation() {
        let mut api = MockNintendoNetworkApi::new();
        api.expect_does_user_exist().returning(|_| {
            Err(NintendoNetworkError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            ))
        });
        let services = test_services(api).await;

        let response = run(&services, &context(), "user social set nnid someone").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::ExternalService));
        assert_eq!(response.title, "User Settings - Socials Error");
        assert_eq!(socials(&services).await.nnid, "");
    }

    #[tokio::test]
    async fn social_set_argument_errors() {
        let services = test_services(MockNintendoNetworkApi::new()).await;

        let response = run(&services, &context(), "user social set").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::MissingArgument));

        let response = run(&services, &context(), "user social set psn").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::MissingArgument));

        let response = run(&services, &context(), "user social set steam someone").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(response.body, "Unknown social ``steam``.");
    }

    #[tokio::test]
    async fn list_and_clear_socials() {
        let services = test_services(MockNintendoNetworkApi::new()).await;

        let response = run(&services, &context(), "user social list").await;
        assert_eq!(response.body, "You don't have any socials yet!");

        run(&services, &context(), "user social set xbox player1").await;
        run(&services, &context(), "user social set psn player2").await;
        let response = run(&services, &context(), "user socials list").await;
        let names: Vec<&str> = response.fields.iter().map(|field| field.name.as_str()).collect();
        assert_eq!(names, vec!["PSN", "Xbox Live Gamertag"]);

        let response = run(&services, &context(), "user social remove xbox").await;
        assert_eq!(response.body, "Cleared your Xbox Live gamertag.");
        assert_eq!(socials(&services).await.xbox, "");

        let response = run(&services, &context(), "user social clear xbox").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));

        let response = run(&services, &context(), "user social clear").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::MissingArgument));
    }

    #[tokio::test]
    async fn socials_group_usage_and_types() {
        let services = test_services(MockNintendoNetworkApi::new()).await;

        let response = run(&services, &context(), "user social").await;
        assert_eq!(response.kind, ResponseKind::Usage);
        assert_eq!(response.title, "User Settings - Socials Help");

        let response = run(&services, &context(), "user social types").await;
        assert!(response.body.contains("``nnid`` - Nintendo Network ID"));

        let response = run(&services, &context(), "user social follow").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(response.title, "User Settings - Socials Error");
    }

    #[tokio::test]
    async fn social_commands_reject_trailing_tokens() {
        let services = test_services(MockNintendoNetworkApi::new()).await;
        run(&services, &context(), "user social set psn somebody").await;

        for command in [
            "user social list bogus",
            "user social types bogus",
            "user social clear psn bogus",
        ] {
            let response = run(&services, &context(), command).await;
            assert_eq!(response.error_kind(), Some(ErrorKind::NotFound), "{}", command);
            assert_eq!(response.body, "Error finding the setting ``bogus``.", "{}", command);
        }

        assert_eq!(socials(&services).await.psn, "somebody");
    }
}
