use axum::{Router, extract::Query, response::Html, routing::get};
use colored::*;
use prompt_feed::Session;
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::api::HttpPromptApi;
use crate::config::Config;

const LOGIN_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Deserialize)]
struct CallbackParams {
    access_token: Option<String>,
    error: Option<String>,
}

/// What the callback handler has seen so far.
#[derive(Debug, Default, Clone)]
enum CallbackState {
    #[default]
    Waiting,
    Token(String),
    Failed(String),
}

type SharedState = Arc<Mutex<CallbackState>>;

/// Open the login surface and build a session from the returned token.
///
/// Starts a local callback server, sends the browser to the provider and
/// waits for the access token to come back.
pub async fn login(config: &Config, api: &HttpPromptApi) -> anyhow::Result<Session> {
    let state: SharedState = Arc::new(Mutex::new(CallbackState::Waiting));
    let handler_state = state.clone();

    let app = Router::new().route(
        "/callback",
        get(move |query: Query<CallbackParams>| callback_handler(query, handler_state.clone())),
    );

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.callback_port)).await?;
    info!(port = config.callback_port, "login callback server started");
    let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

    let auth_url = authorize_url(config);
    println!("{}", "Opening browser for login...".yellow());
    if let Err(e) = webbrowser::open(&auth_url) {
        warn!("could not open browser: {e}");
        println!("{}", "Please open this URL manually:".bright_white().bold());
        println!("{}", auth_url.bright_blue().underline());
    }

    let token = wait_for_token(&state).await;
    server_handle.abort();
    let token = token?;

    let session = api.fetch_session(&token).await?;
    api.set_token(Some(session.token.clone()));
    info!(username = %session.username, "logged in");
    Ok(session)
}

fn authorize_url(config: &Config) -> String {
    format!(
        "{}/authorize?redirect_to=http://localhost:{}/callback",
        config.auth_url.trim_end_matches('/'),
        config.callback_port
    )
}

async fn wait_for_token(state: &SharedState) -> anyhow::Result<String> {
    let timeout = tokio::time::Duration::from_secs(LOGIN_TIMEOUT_SECS);
    let start = tokio::time::Instant::now();

    loop {
        tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;

        let current = state
            .lock()
            .map(|s| s.clone())
            .map_err(|_| anyhow::anyhow!("login state poisoned"))?;
        match current {
            CallbackState::Token(token) => return Ok(token),
            CallbackState::Failed(error) => anyhow::bail!("login failed: {error}"),
            CallbackState::Waiting => {}
        }

        if start.elapsed() > timeout {
            anyhow::bail!("login timed out after {LOGIN_TIMEOUT_SECS} seconds");
        }
    }
}

async fn callback_handler(Query(params): Query<CallbackParams>, state: SharedState) -> Html<String> {
    let Ok(mut current) = state.lock() else {
        return Html("failed".to_string());
    };

    if let Some(error) = params.error {
        *current = CallbackState::Failed(error.clone());
        return Html(page("Login failed", &format!("<p>{error}</p><p>You can close this window.</p>")));
    }

    match params.access_token {
        Some(token) => {
            *current = CallbackState::Token(token);
            Html(page("Logged in", "<p>You can close this window and return to the terminal.</p>"))
        }
        // The provider puts the token in the URL fragment; send it back as a query.
        None => Html(page(
            "Finishing login",
            r#"<p>Redirecting back to the terminal...</p>
            <script>
                const params = new URLSearchParams(window.location.hash.substring(1));
                const token = params.get('access_token');
                if (token) {
                    fetch('/callback?access_token=' + encodeURIComponent(token))
                        .then(() => setTimeout(() => window.close(), 1000));
                } else {
                    document.body.innerHTML = '<h1>No token found</h1><p>Please try logging in again.</p>';
                }
            </script>"#,
        )),
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title}</title>
<style>body {{ font-family: Arial, sans-serif; text-align: center; margin-top: 15vh; }}</style>
</head>
<body><h1>{title}</h1>{body}</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            backend_url: "http://localhost:3000/api".into(),
            auth_url: "https://auth.example.com/".into(),
            callback_port: 8181,
            vote_overlay_cap: None,
        }
    }

    #[test]
    fn authorize_url_points_back_at_callback() {
        assert_eq!(
            authorize_url(&config()),
            "https://auth.example.com/authorize?redirect_to=http://localhost:8181/callback"
        );
    }

    #[tokio::test]
    async fn callback_records_token() {
        let state: SharedState = Arc::default();
        let params = CallbackParams {
            access_token: Some("abc".into()),
            error: None,
        };

        let _page = callback_handler(Query(params), state.clone()).await;

        assert!(matches!(&*state.lock().unwrap(), CallbackState::Token(t) if t == "abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn provider_error_ends_the_wait() {
        let state: SharedState = Arc::default();
        let params = CallbackParams {
            access_token: None,
            error: Some("access_denied".into()),
        };
        let _page = callback_handler(Query(params), state.clone()).await;

        let err = wait_for_token(&state).await.unwrap_err();
        assert!(err.to_string().contains("access_denied"));
    }
}
