use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{Client, ClientBuilder, StatusCode};
use thiserror::Error;
use tracing::error;
use typemap_rev::TypeMapKey;

use crate::config::Config;

const MAPPED_IDS_PATH: &str = "/v1/api/admin/mapped_ids";

lazy_static! {
    static ref OUT_ID: Regex = Regex::new(r"<out_id>\s*([0-9]+)\s*</out_id>").unwrap();
}

impl TypeMapKey for NintendoNetworkService {
    type Value = NintendoNetworkService;
}

#[derive(Error, Debug)]
pub enum NintendoNetworkError {
    #[error("request to account server failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("account server replied with status {0}")]
    Status(StatusCode),
    #[error("account server credentials are not configured")]
    MissingCredentials,
}

/// Existence checks for Nintendo Network IDs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NintendoNetworkApi {
    async fn does_user_exist(&self, nnid: &str) -> Result<bool, NintendoNetworkError>;
}

/// Asks the Nintendo account server to map a user id to a principal id, a user exists when the
/// reply carries a non-empty `out_id`.
pub struct AccountServerClient {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl AccountServerClient {
    pub fn new(config: &Config) -> anyhow::Result<AccountServerClient> {
        Ok(AccountServerClient {
            client: ClientBuilder::new().user_agent("clinet").build()?,
            base_url: config.nnid_api_url.trim_end_matches('/').to_string(),
            client_id: config.nnid_client_id.clone(),
            client_secret: config.nnid_client_secret.clone(),
        })
    }
}

fn contains_principal_id(body: &str) -> bool {
    OUT_ID.is_match(body)
}

#[async_trait]
impl NintendoNetworkApi for AccountServerClient {
    async fn does_user_exist(&self, nnid: &str) -> Result<bool, NintendoNetworkError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(NintendoNetworkError::MissingCredentials);
        }

        let response = self
            .client
            .get(format!("{}{}", self.base_url, MAPPED_IDS_PATH))
            .query(&[
                ("input_type", "user_id"),
                ("output_type", "pid"),
                ("input", nnid),
            ])
            .header("X-Nintendo-Client-ID", &self.client_id)
            .header("X-Nintendo-Client-Secret", &self.client_secret)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NintendoNetworkError::Status(status));
        }

        let body = response.text().await?;
        Ok(contains_principal_id(&body))
    }
}

pub struct NintendoNetworkService {
    api: Box<dyn NintendoNetworkApi + Send + Sync>,
}

impl NintendoNetworkService {
    pub fn new(api: Box<dyn NintendoNetworkApi + Send + Sync>) -> NintendoNetworkService {
        NintendoNetworkService { api }
    }

    pub async fn does_user_exist(&self, nnid: &str) -> Result<bool, NintendoNetworkError> {
        self.api.does_user_exist(nnid).await.map_err(|err| {
            error!(nnid = nnid, "failed to check nnid existence {}", err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_id_detection() {
        assert!(contains_principal_id(
            "<mapped_ids><mapped_id><in_id>someone</in_id><out_id>1799999999</out_id></mapped_id></mapped_ids>"
        ));
        assert!(!contains_principal_id(
            "<mapped_ids><mapped_id><in_id>nobody</in_id><out_id></out_id></mapped_id></mapped_ids>"
        ));
        assert!(!contains_principal_id("<mapped_ids/>"));
    }

    #[tokio::test]
    async fn unset_credentials_fail_without_a_request() {
        let config: Config = envy::from_iter(vec![(
            "NNID_API_URL".to_string(),
            "http://127.0.0.1:9".to_string(),
        )])
        .unwrap();
        let client = AccountServerClient::new(&config).unwrap();

        let service = NintendoNetworkService::new(Box::new(client));
        assert!(matches!(
            service.does_user_exist("someone").await,
            Err(NintendoNetworkError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn service_passes_through_api_answers() {
        let mut api = MockNintendoNetworkApi::new();
        api.expect_does_user_exist()
            .withf(|nnid| nnid == "someone")
            .times(1)
            .returning(|_| Ok(true));

        let service = NintendoNetworkService::new(Box::new(api));
        assert!(service.does_user_exist("someone").await.unwrap());
    }

    #[tokio::test]
    async fn service_surfaces_status_errors() {
        let mut api = MockNintendoNetworkApi::new();
        api.expect_does_user_exist()
            .returning(|_| Err(NintendoNetworkError::Status(StatusCode::BAD_GATEWAY)));

        let service = NintendoNetworkService::new(Box::new(api));
        assert!(matches!(
            service.does_user_exist("someone").await,
            Err(NintendoNetworkError::Status(StatusCode::BAD_GATEWAY))
        ));
    }
}
