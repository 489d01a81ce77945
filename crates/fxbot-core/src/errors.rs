/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the dispatcher
/// can turn every failure into exactly one short user-facing reply.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("rate provider error: {0}")]
    Provider(String),

    #[error("currency not in snapshot: {0}")]
    CurrencyNotFound(String),

    #[error("no favorite pair saved")]
    NoFavoriteSet,

    #[error("chart error: {0}")]
    Chart(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
