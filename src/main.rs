use std::{net::SocketAddr, sync::Arc};

use anyhow::{anyhow, Context};
use axum::response::IntoResponse;
use eac_backend::{
    config::Config,
    responses::TextResponse,
    routes::app_router,
    services::{
        directory::ldap::LdapDirectory,
        github_org::client::GitHubOrgClient,
        oauth::{github::client::GitHubOAuthClient, slack::client::SlackOAuthClient},
        oidc::client::OidcClient,
    },
    utils::jwt::JwtKeys,
    AppState,
};
use reqwest::Client;
use tokio::net::TcpListener;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "tls")]
use axum_server::tls_rustls::RustlsConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    let session_keys = JwtKeys::from_secret(&config.secret_key).context("invalid SECRET_KEY")?;

    let http_client = Client::builder()
        .timeout(config.outbound_timeout)
        .build()
        .context("failed to build HTTP client")?;

    let oidc = OidcClient::discover(http_client.clone(), config.oidc.clone())
        .await
        .context("OIDC discovery failed")?;
    let directory = LdapDirectory::new(config.ldap.clone(), config.outbound_timeout);
    let slack_oauth = SlackOAuthClient::new(http_client.clone(), config.slack.clone());
    let github_oauth = GitHubOAuthClient::new(http_client.clone(), &config.github);
    let github_org = GitHubOrgClient::new(http_client.clone(), &config.github);

    let global_governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(config.rate_limit.per_millisecond)
            .burst_size(config.rate_limit.burst)
            .use_headers()
            .error_handler(|_err| {
                TextResponse::too_many_requests(
                    "Too many requests. Please wait a moment and try again.",
                )
                .into_response()
            })
            .finish()
            .ok_or_else(|| anyhow!("invalid rate limiter settings"))?,
    );

    // Forget peers that have gone quiet.
    let governor_limiter = global_governor_conf.limiter().clone();
    std::thread::spawn(move || {
        let interval = std::time::Duration::from_secs(60);
        loop {
            std::thread::sleep(interval);
            governor_limiter.retain_recent();
        }
    });

    let addr = config.server_addr;
    let state = AppState {
        config: Arc::new(config),
        session_keys: Arc::new(session_keys),
        oidc: Arc::new(oidc),
        directory: Arc::new(directory),
        slack_oauth: Arc::new(slack_oauth),
        github_oauth: Arc::new(github_oauth),
        github_org: Arc::new(github_org),
    };

    let app = app_router(state).layer(GovernorLayer {
        config: global_governor_conf,
    });
    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();

    #[cfg(feature = "tls")]
    {
        let tls_config = RustlsConfig::from_pem_file(
            std::env::var("DEV_CERT_LOCATION").context("DEV_CERT_LOCATION must be set")?,
            std::env::var("DEV_KEY_LOCATION").context("DEV_KEY_LOCATION must be set")?,
        )
        .await
        .context("failed to load TLS certs")?;

        info!(%addr, "Running with TLS");
        axum_server::bind_rustls(addr, tls_config)
            .serve(make_service)
            .await?;
        return Ok(()); // Skip the plain listener when TLS is used
    }

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "Running without TLS");
    axum::serve(listener, make_service).await?;
    Ok(())
}
