use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/api";
const DEFAULT_AUTH_URL: &str = "http://localhost:3000/auth";
const DEFAULT_CALLBACK_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    /// Base of the login provider; `/authorize` is appended.
    pub auth_url: String,
    pub callback_port: u16,
    /// Per-direction limit on remembered votes. Unbounded when unset.
    pub vote_overlay_cap: Option<usize>,
}

impl Config {
    /// Read from the environment. Call after `dotenv`.
    pub fn load() -> Self {
        Self {
            backend_url: var("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            auth_url: var("AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            callback_port: parse_or("CALLBACK_PORT", var("CALLBACK_PORT"), DEFAULT_CALLBACK_PORT),
            vote_overlay_cap: overlay_cap(var("VOTE_OVERLAY_CAP")),
        }
    }
}

fn overlay_cap(raw: Option<String>) -> Option<usize> {
    match raw.and_then(|raw| parse::<usize>("VOTE_OVERLAY_CAP", &raw)) {
        Some(0) => {
            warn!("Invalid VOTE_OVERLAY_CAP value 0, keeping votes unbounded");
            None
        }
        cap => cap,
    }
}

fn var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => {
            info!("{key} not set, using default");
            None
        }
    }
}

fn parse<T: FromStr>(key: &str, raw: &str) -> Option<T>
where
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| warn!("Invalid {key} value {raw:?}: {e}"))
        .ok()
}

fn parse_or<T: FromStr + Display>(key: &str, raw: Option<String>, default: T) -> T
where
    T::Err: Display,
{
    raw.and_then(|raw| parse(key, &raw)).unwrap_or_else(|| {
        info!("{key} using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_falls_back() {
        assert_eq!(parse_or("CALLBACK_PORT", Some("http".into()), 8080u16), 8080);
        assert_eq!(parse_or("CALLBACK_PORT", Some("9090".into()), 8080u16), 9090);
        assert_eq!(parse_or("CALLBACK_PORT", None, 8080u16), 8080);
    }

    #[test]
    fn cap_parses_as_count() {
        assert_eq!(parse::<usize>("VOTE_OVERLAY_CAP", "500"), Some(500));
        assert_eq!(parse::<usize>("VOTE_OVERLAY_CAP", "-1"), None);
    }

    #[test]
    fn zero_cap_falls_back_to_unbounded() {
        assert_eq!(overlay_cap(Some("0".into())), None);
        assert_eq!(overlay_cap(Some("25".into())), Some(25));
        assert_eq!(overlay_cap(None), None);
    }
}
