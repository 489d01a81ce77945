//! Command routing: one inbound message in, exactly one reply out.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::{
    chart,
    command::Command,
    config::Config,
    domain::{CurrencyCode, FavoritePair, UserId},
    engine,
    errors::Error,
    favorites::FavoritesStore,
    formatting::escape_html,
    messaging::types::ReplyKeyboard,
    ports::RateProvider,
    Result,
};

/// The outbound artifact for one inbound command.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Text {
        html: String,
        keyboard: Option<ReplyKeyboard>,
    },
    Photo {
        png: Vec<u8>,
        caption: String,
    },
}

impl Reply {
    fn text(html: impl Into<String>) -> Self {
        Reply::Text {
            html: html.into(),
            keyboard: None,
        }
    }
}

/// Knobs the dispatcher needs from configuration.
#[derive(Clone, Debug)]
pub struct DispatchSettings {
    pub quick_picks: Vec<String>,
    pub graph_window_days: u32,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            quick_picks: ["USD", "EUR", "GBP", "JPY", "UAH", "CNY"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            graph_window_days: 10,
            chart_width: 800,
            chart_height: 400,
        }
    }
}

impl From<&Config> for DispatchSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            quick_picks: cfg.keyboard_currencies.clone(),
            graph_window_days: cfg.graph_window_days,
            chart_width: cfg.chart_width,
            chart_height: cfg.chart_height,
        }
    }
}

/// Routes each parsed command to the rate provider, conversion engine,
/// chart renderer, or favorites store, and always produces exactly one
/// reply. Every failure is mapped to a short, non-technical line here;
/// nothing propagates further up.
pub struct Dispatcher {
    provider: Arc<dyn RateProvider>,
    favorites: FavoritesStore,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(
        provider: Arc<dyn RateProvider>,
        favorites: FavoritesStore,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            provider,
            favorites,
            settings,
        }
    }

    pub async fn dispatch(&self, user: UserId, raw: &str) -> Reply {
        match Command::parse(raw, &self.settings.quick_picks) {
            Command::Start => self.start_reply(),
            Command::Help => Reply::text(self.help_text()),
            Command::Convert { amount, from, to } => self
                .convert_reply(amount, &from, &to)
                .await
                .unwrap_or_else(|e| self.error_reply(&e)),
            Command::Graph { from, to } => self
                .graph_reply(&from, &to)
                .await
                .unwrap_or_else(|e| self.error_reply(&e)),
            Command::Rates { base } => self
                .rates_reply(&base)
                .await
                .unwrap_or_else(|e| self.error_reply(&e)),
            Command::Favorite { from, to } => {
                self.favorites.set(
                    user,
                    FavoritePair {
                        from: from.clone(),
                        to: to.clone(),
                    },
                );
                Reply::text(format!("⭐ Saved your favorite pair: {from} → {to}"))
            }
            Command::MyFavorite => self
                .my_favorite_reply(user)
                .await
                .unwrap_or_else(|e| self.error_reply(&e)),
            Command::CurrencyChosen(code) => Reply::text(format!(
                "You picked {code}. Now enter the amount and the second currency.\n\
                 Example: /convert 100 {code} to EUR"
            )),
            Command::Usage(hint) => {
                Reply::text(format!("⚠️ Wrong format. Example: {}", hint.example()))
            }
            Command::Unrecognized { raw } => {
                let shown: String = raw.chars().take(32).collect();
                Reply::text(format!(
                    "🤔 I don't understand “{}”. Try /help.",
                    escape_html(&shown)
                ))
            }
        }
    }

    async fn convert_reply(
        &self,
        amount: f64,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Reply> {
        let snapshot = self.provider.latest(from).await?;
        let result = engine::convert(amount, &snapshot, to)?;
        Ok(Reply::text(format!(
            "💱 {amount} {from} = {result:.2} {to}"
        )))
    }

    async fn graph_reply(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<Reply> {
        let today = Utc::now().date_naive();
        let start = today - Duration::days(self.settings.graph_window_days as i64);
        let series = self.provider.historical(from, to, start, today).await?;
        let png = chart::render_series_chart(
            &series,
            self.settings.chart_width,
            self.settings.chart_height,
        )?;
        Ok(Reply::Photo {
            png,
            caption: format!(
                "📊 {from} → {to}, last {} days",
                self.settings.graph_window_days
            ),
        })
    }

    async fn rates_reply(&self, base: &CurrencyCode) -> Result<Reply> {
        let snapshot = self.provider.latest(base).await?;
        if snapshot.is_empty() {
            return Err(Error::Provider("empty rates payload".to_string()));
        }
        Ok(Reply::text(engine::format_rates_table(&snapshot)))
    }

    /// The favorite pair is converted directly with amount 1; no synthetic
    /// command text is re-parsed. No favorite saved means no network call.
    async fn my_favorite_reply(&self, user: UserId) -> Result<Reply> {
        let pair = self.favorites.get(user).ok_or(Error::NoFavoriteSet)?;
        self.convert_reply(1.0, &pair.from, &pair.to).await
    }

    fn start_reply(&self) -> Reply {
        Reply::Text {
            html: "👋 Hi! I convert currencies. Pick a currency below or check /help."
                .to_string(),
            keyboard: Some(ReplyKeyboard::from_labels(&self.settings.quick_picks, 3)),
        }
    }

    fn help_text(&self) -> String {
        format!(
            "📌 <b>Commands:</b>\n\
             /convert 100 USD to EUR — convert an amount\n\
             /graph USD EUR — rate chart for the last {} days\n\
             /rates USD — current rates for a base currency\n\
             /favorite USD EUR — save a favorite pair\n\
             /myfavorite — convert your favorite pair\n\
             /help — this message",
            self.settings.graph_window_days
        )
    }

    /// Exhaustive error-kind to reply-text mapping. Diagnostic detail stays
    /// server-side.
    fn error_reply(&self, err: &Error) -> Reply {
        tracing::warn!(error = %err, "command failed");
        let text = match err {
            Error::Provider(_) | Error::External(_) => {
                "❌ Couldn't fetch exchange rates. Try again later."
            }
            Error::CurrencyNotFound(_) => "❌ Conversion failed. Check the currency codes.",
            Error::NoFavoriteSet => {
                "⚠️ You haven't saved a favorite pair yet. Use /favorite first."
            }
            Error::Chart(_) => "❌ Couldn't draw the chart. Try again later.",
            Error::Config(_) => "⚠️ Something went wrong. Try again later.",
        };
        Reply::text(text)
    }
}
