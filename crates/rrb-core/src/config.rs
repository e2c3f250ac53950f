use std::{env, fs, path::Path, time::Duration};

use crate::{
    dispatch::BroadcastPacing,
    errors::Error,
    locale::{Locale, ReportStyle},
    Result,
};

/// Typed configuration for the relay, loaded from the process environment
/// (with optional `.env` support).
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub bind_addr: String,

    pub style: ReportStyle,

    /// Maximum bytes per outbound message segment. Kept under Telegram's
    /// 4096 hard limit.
    pub segment_limit: usize,
    /// Maximum number of recent updates fetched during subscriber discovery.
    pub discovery_limit: u8,

    pub pacing: BroadcastPacing,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let bind_addr = env_str("RELAY_BIND_ADDR")
            .and_then(non_empty)
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let locale = match env_str("RELAY_LOCALE").and_then(non_empty) {
            Some(raw) => Locale::parse(&raw)
                .ok_or_else(|| Error::Config(format!("unsupported RELAY_LOCALE: {raw}")))?,
            None => Locale::Uk,
        };
        let style = match env_bool("RELAY_VERSION_FOOTER") {
            Some(flag) => ReportStyle::new(locale, flag),
            None => ReportStyle::for_locale(locale),
        };

        let segment_limit = env_usize("RELAY_SEGMENT_LIMIT").unwrap_or(4000);
        let discovery_limit = env_u8("RELAY_DISCOVERY_LIMIT").unwrap_or(100);

        let pacing = BroadcastPacing {
            inter_segment: Duration::from_millis(
                env_u64("RELAY_SEGMENT_DELAY_MS").unwrap_or(1000),
            ),
            inter_recipient: Duration::from_millis(
                env_u64("RELAY_RECIPIENT_DELAY_MS").unwrap_or(100),
            ),
        };

        Ok(Self {
            telegram_bot_token,
            bind_addr,
            style,
            segment_limit,
            discovery_limit,
            pacing,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_u8(key: &str) -> Option<u8> {
    env_str(key).and_then(|s| s.trim().parse::<u8>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
