use std::{env, net::SocketAddr, time::Duration};

use thiserror::Error;

pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_GITHUB_ORG: &str = "ComputerScienceHouse";
pub const DEFAULT_LDAP_USER_BASE: &str = "cn=users,cn=accounts,dc=csh,dc=rit,dc=edu";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 8;
/// One year.
pub const MAX_SESSION_TTL_HOURS: i64 = 8760;
pub const DEFAULT_OUTBOUND_TIMEOUT_SECONDS: u64 = 30;
/// Default: 200ms/token (~5 req/sec)
pub const DEFAULT_RATE_LIMIT_MS: u64 = 200;
pub const DEFAULT_RATE_LIMIT_BURST: u32 = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("LINK_STATE and REVOKE_STATE must differ")]
    AmbiguousStates,
}

#[derive(Debug, Clone)]
pub struct OidcSettings {
    pub issuer: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone)]
pub struct LdapSettings {
    pub url: String,
    pub bind_dn: String,
    pub bind_secret: String,
    pub user_base: String,
}

#[derive(Debug, Clone)]
pub struct OAuthProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone)]
pub struct GitHubSettings {
    pub client_id: String,
    pub client_secret: String,
    pub org: String,
    pub org_token: String,
    pub link_state: String,
    pub revoke_state: String,
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitSettings {
    pub per_millisecond: u64,
    pub burst: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub public_origin: String,
    pub return_uri: String,
    pub secret_key: String,
    pub auth_cookie_secure: bool,
    pub session_ttl_hours: i64,
    pub outbound_timeout: Duration,
    pub oidc: OidcSettings,
    pub ldap: LdapSettings,
    pub slack: OAuthProviderConfig,
    pub github: GitHubSettings,
    pub rate_limit: RateLimitSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok(); // Load .env file

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let optional = |name: &'static str, default: &str| -> String {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let server_addr_raw = optional("SERVER_ADDR", DEFAULT_SERVER_ADDR);
        let server_addr = server_addr_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                name: "SERVER_ADDR",
                value: server_addr_raw.clone(),
            })?;

        let public_origin = optional("PUBLIC_ORIGIN", DEFAULT_PUBLIC_ORIGIN)
            .trim_end_matches('/')
            .to_string();

        // Strength is checked when the signing keys are built.
        let secret_key = required("SECRET_KEY")?;

        let auth_cookie_secure = parse_bool(
            "AUTH_COOKIE_SECURE",
            &optional("AUTH_COOKIE_SECURE", "true"),
        )?;
        let session_ttl_hours = parse_number::<i64>(
            "SESSION_TTL_HOURS",
            lookup("SESSION_TTL_HOURS"),
            DEFAULT_SESSION_TTL_HOURS,
        )?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(ConfigError::Invalid {
                name: "SESSION_TTL_HOURS",
                value: session_ttl_hours.to_string(),
            });
        }
        let outbound_timeout_seconds = parse_number::<u64>(
            "OUTBOUND_TIMEOUT_SECONDS",
            lookup("OUTBOUND_TIMEOUT_SECONDS"),
            DEFAULT_OUTBOUND_TIMEOUT_SECONDS,
        )?;

        let oidc = OidcSettings {
            issuer: required("OIDC_ISSUER")?.trim_end_matches('/').to_string(),
            client_id: required("OIDC_CLIENT_ID")?,
            client_secret: required("OIDC_CLIENT_SECRET")?,
            redirect_uri: format!("{}/auth/callback", public_origin),
        };

        let ldap = LdapSettings {
            url: required("LDAP_URL")?,
            bind_dn: required("LDAP_DN")?,
            bind_secret: required("LDAP_SECRET")?,
            user_base: optional("LDAP_USER_BASE", DEFAULT_LDAP_USER_BASE),
        };

        let slack = OAuthProviderConfig {
            client_id: required("SLACK_CLIENT_ID")?,
            client_secret: required("SLACK_SECRET")?,
            redirect_uri: required("REDIRECT_URI")?,
        };

        let github = GitHubSettings {
            client_id: required("GITHUB_CLIENT_ID")?,
            client_secret: required("GITHUB_SECRET")?,
            org: optional("GITHUB_ORG", DEFAULT_GITHUB_ORG),
            org_token: required("ORG_TOKEN")?,
            link_state: required("LINK_STATE")?,
            revoke_state: required("REVOKE_STATE")?,
        };
        if github.link_state == github.revoke_state {
            return Err(ConfigError::AmbiguousStates);
        }

        let rate_limit = RateLimitSettings {
            per_millisecond: parse_number::<u64>(
                "RATE_LIMITER_MILLISECONDS",
                lookup("RATE_LIMITER_MILLISECONDS"),
                DEFAULT_RATE_LIMIT_MS,
            )?,
            burst: parse_number::<u32>(
                "RATE_LIMITER_BURST",
                lookup("RATE_LIMITER_BURST"),
                DEFAULT_RATE_LIMIT_BURST,
            )?,
        };

        Ok(Config {
            server_addr,
            public_origin,
            return_uri: required("RETURN_URI")?,
            secret_key,
            auth_cookie_secure,
            session_ttl_hours,
            outbound_timeout: Duration::from_secs(outbound_timeout_seconds),
            oidc,
            ldap,
            slack,
            github,
            rate_limit,
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        server_addr: DEFAULT_SERVER_ADDR.parse().unwrap(),
        public_origin: "http://localhost:8080".into(),
        return_uri: "https://members.example.com/profile".into(),
        secret_key: "0123456789abcdef0123456789ABCDEF".into(),
        auth_cookie_secure: false,
        session_ttl_hours: 1,
        outbound_timeout: Duration::from_secs(5),
        oidc: OidcSettings {
            issuer: "https://sso.example.com/realms/members".into(),
            client_id: "eac".into(),
            client_secret: "oidc-secret".into(),
            redirect_uri: "http://localhost:8080/auth/callback".into(),
        },
        ldap: LdapSettings {
            url: "ldap://localhost:389".into(),
            bind_dn: "uid=eac,cn=users,dc=example,dc=com".into(),
            bind_secret: "ldap-secret".into(),
            user_base: "cn=users,dc=example,dc=com".into(),
        },
        slack: OAuthProviderConfig {
            client_id: "slack-client".into(),
            client_secret: "slack-secret".into(),
            redirect_uri: "http://localhost:8080/slack".into(),
        },
        github: GitHubSettings {
            client_id: "github-client".into(),
            client_secret: "github-secret".into(),
            org: "ExampleOrg".into(),
            org_token: "org-token".into(),
            link_state: "link-state-constant".into(),
            revoke_state: "revoke-state-constant".into(),
        },
        rate_limit: RateLimitSettings {
            per_millisecond: DEFAULT_RATE_LIMIT_MS,
            burst: DEFAULT_RATE_LIMIT_BURST,
        },
    }
}
