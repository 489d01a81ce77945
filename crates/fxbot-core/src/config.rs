use std::{
    env, fs,
    path::Path,
    time::Duration,
};

use crate::{errors::Error, Result};

/// Typed configuration, loaded from the environment (with an optional
/// `.env` file that never overrides existing variables).
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    // Rate provider
    pub currency_api_key: String,
    pub currency_api_url: String,
    pub http_timeout: Duration,

    // Charts
    pub graph_window_days: u32,
    pub chart_width: u32,
    pub chart_height: u32,

    // /start keyboard shortcuts
    pub keyboard_currencies: Vec<String>,
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

        let currency_api_key = env_str("CURRENCY_API_KEY").unwrap_or_default();
        if currency_api_key.trim().is_empty() {
            return Err(Error::Config(
                "CURRENCY_API_KEY environment variable is required".to_string(),
            ));
        }

        let currency_api_url = env_str("CURRENCY_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| "https://api.freecurrencyapi.com/v1".to_string());

        let http_timeout = Duration::from_secs(env_u64("HTTP_TIMEOUT_SECS").unwrap_or(10));

        let graph_window_days = env_u32("GRAPH_WINDOW_DAYS").unwrap_or(10).max(1);
        let chart_width = env_u32("CHART_WIDTH").unwrap_or(800).clamp(200, 4000);
        let chart_height = env_u32("CHART_HEIGHT").unwrap_or(400).clamp(200, 4000);

        let keyboard_currencies = parse_csv_upper(
            env_str("KEYBOARD_CURRENCIES")
                .or_else(|| Some("USD,EUR,GBP,JPY,UAH,CNY".to_string())),
        );

        Ok(Self {
            telegram_bot_token,
            currency_api_key,
            currency_api_url,
            http_timeout,
            graph_window_days,
            chart_width,
            chart_height,
            keyboard_currencies,
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

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_u32(key: &str) -> Option<u32> {
    env_str(key).and_then(|s| s.trim().parse::<u32>().ok())
}

fn parse_csv_upper(v: Option<String>) -> Vec<String> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_parsing_trims_and_uppercases() {
        assert_eq!(
            parse_csv_upper(Some(" usd, eur ,,GBP".to_string())),
            vec!["USD", "EUR", "GBP"]
        );
        assert!(parse_csv_upper(None).is_empty());
    }
}
