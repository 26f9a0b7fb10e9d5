use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::debug;

use crate::{
    config::Config,
    routes::auth::claims::SessionClaims,
    services::oidc::models::OidcUserInfo,
    utils::jwt::{create_jwt, decode_jwt, JwtKeys},
};

pub const SESSION_COOKIE: &str = "eac_session";
pub const SESSION_AUDIENCE: &str = "eac-session";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("identity provider did not return a preferred_username")]
    MissingUsername,
    #[error("failed to sign session: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Mints the session cookie for a user the identity provider vouched for.
pub fn issue_session(
    config: &Config,
    keys: &JwtKeys,
    user_info: &OidcUserInfo,
) -> Result<Cookie<'static>, SessionError> {
    let preferred_username = user_info
        .preferred_username
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(SessionError::MissingUsername)?
        .to_string();

    let claims = SessionClaims {
        sub: user_info.sub.clone(),
        preferred_username,
        name: user_info.name.clone(),
        email: user_info.email.clone(),
        exp: (Utc::now() + Duration::hours(config.session_ttl_hours)).timestamp() as usize,
        iss: String::new(),
        aud: String::new(),
    };
    let token = create_jwt(claims, keys, &config.public_origin, SESSION_AUDIENCE)?;

    Ok(Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(config.auth_cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::hours(config.session_ttl_hours))
        .build())
}

/// Returns the session claims when the cookie is present and valid.
pub fn read_session(jar: &CookieJar, config: &Config, keys: &JwtKeys) -> Option<SessionClaims> {
    let cookie = jar.get(SESSION_COOKIE)?;
    match decode_jwt(cookie.value(), keys, &config.public_origin, SESSION_AUDIENCE) {
        Ok(data) => Some(data.claims),
        Err(error) => {
            debug!(%error, "Ignoring invalid session cookie");
            None
        }
    }
}

pub fn clear_session(config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(config.auth_cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(0))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    fn keys() -> JwtKeys {
        JwtKeys::from_secret(test_config().secret_key).unwrap()
    }

    fn user_info(username: Option<&str>) -> OidcUserInfo {
        OidcUserInfo {
            sub: "f00".into(),
            preferred_username: username.map(str::to_string),
            name: Some("Jane Doe".into()),
            email: Some("jdoe@example.com".into()),
        }
    }

    #[test]
    fn issued_session_reads_back() {
        let config = test_config();
        let keys = keys();

        let cookie = issue_session(&config, &keys, &user_info(Some("jdoe"))).unwrap();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));

        let jar = CookieJar::new().add(cookie);
        let claims = read_session(&jar, &config, &keys).expect("session");
        assert_eq!(claims.preferred_username, "jdoe");
        assert_eq!(claims.sub, "f00");
        assert_eq!(claims.iss, config.public_origin);
        assert_eq!(claims.aud, SESSION_AUDIENCE);
    }

    #[test]
    fn username_is_required() {
        let config = test_config();

        for info in [user_info(None), user_info(Some("  "))] {
            let err = issue_session(&config, &keys(), &info).unwrap_err();
            assert!(matches!(err, SessionError::MissingUsername));
        }
    }

    #[test]
    fn tampered_or_missing_cookie_is_ignored() {
        let config = test_config();
        let keys = keys();

        assert!(read_session(&CookieJar::new(), &config, &keys).is_none());

        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "not.a.jwt"));
        assert!(read_session(&jar, &config, &keys).is_none());
    }

    #[test]
    fn clear_session_expires_cookie() {
        let cookie = clear_session(&test_config());
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(0)));
    }
}
