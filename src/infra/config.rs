use std::net::SocketAddr;

use env_helpers::get_env_default;
use secrecy::SecretString;
use url::Url;

use crate::{application::classifier::UnmappedEventPolicy, infra::error::InfraError};

/// Connection settings for the document store holding user records.
pub struct AppwriteConfig {
    /// API root including the version segment, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: Url,
    pub project_id: String,
    pub api_key: SecretString,
    pub database_id: String,
    pub collection_id: String,
    /// Accept self-signed TLS certificates from the store.
    pub self_signed: bool,
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub appwrite: AppwriteConfig,
    /// How to treat event types that carry no entitlement change.
    pub unmapped_event_policy: UnmappedEventPolicy,
    /// Skip events older than the last applied one. Requires an integer
    /// `subscriptionEventAt` attribute on the user collection.
    pub ordering_guard: bool,
    /// When set, webhook requests must send this exact `Authorization` value.
    pub webhook_auth_token: Option<SecretString>,
}

impl AppConfig {
    /// Load and validate configuration once at startup.
    ///
    /// Missing credentials are an error: the server refuses to start rather
    /// than accepting webhooks it cannot persist.
    pub fn from_env() -> Result<Self, InfraError> {
        let lookup = |name: &str| std::env::var(name).ok();

        let endpoint = parse_endpoint(&require(
            &["APPWRITE_ENDPOINT", "APPWRITE_FUNCTION_ENDPOINT"],
            lookup,
        )?)?;
        let project_id = require(
            &["APPWRITE_PROJECT_ID", "APPWRITE_FUNCTION_PROJECT_ID"],
            lookup,
        )?;
        let api_key = SecretString::new(
            require(&["APPWRITE_API_KEY", "APPWRITE_FUNCTION_API_KEY"], lookup)?.into(),
        );

        let database_id: String = get_env_default("APPWRITE_DATABASE_ID", "astra_db".to_string());
        let collection_id: String = get_env_default("APPWRITE_COLLECTION_ID", "users".to_string());
        let self_signed: bool = get_env_default("APPWRITE_SELF_SIGNED", false);

        let bind_addr: SocketAddr = get_env_default(
            "BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3001)),
        );

        let unmapped_event_policy: UnmappedEventPolicy =
            get_env_default("UNMAPPED_EVENT_POLICY", "unchanged".to_string())
                .parse()
                .map_err(|reason| InfraError::ConfigInvalid {
                    var: "UNMAPPED_EVENT_POLICY",
                    reason,
                })?;

        let ordering_guard: bool = get_env_default("ORDERING_GUARD", false);

        let webhook_auth_token = lookup("WEBHOOK_AUTH_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .map(|token| SecretString::new(token.into()));

        Ok(Self {
            bind_addr,
            appwrite: AppwriteConfig {
                endpoint,
                project_id,
                api_key,
                database_id,
                collection_id,
                self_signed,
            },
            unmapped_event_policy,
            ordering_guard,
            webhook_auth_token,
        })
    }
}

/// First non-blank value among `names`, reported under the first name when
/// none is set. Later names are legacy aliases.
fn require(
    names: &[&'static str],
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, InfraError> {
    names
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
        .ok_or(InfraError::ConfigMissing { var: names[0] })
}

fn parse_endpoint(raw: &str) -> Result<Url, InfraError> {
    let url = Url::parse(raw.trim()).map_err(|e| InfraError::ConfigInvalid {
        var: "APPWRITE_ENDPOINT",
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(InfraError::ConfigInvalid {
            var: "APPWRITE_ENDPOINT",
            reason: "must be an http(s) URL".to_string(),
        });
    }

    Ok(url)
}
