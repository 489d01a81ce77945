use std::sync::Arc;

use fxbot_core::{
    config::Config,
    dispatcher::{DispatchSettings, Dispatcher},
    favorites::FavoritesStore,
    ports::RateProvider,
};
use fxbot_rates::FreeCurrencyApi;

#[tokio::main]
async fn main() -> Result<(), fxbot_core::Error> {
    fxbot_core::logging::init("fxbot")?;

    let cfg = Arc::new(Config::load()?);

    let provider: Arc<dyn RateProvider> = Arc::new(FreeCurrencyApi::new(
        cfg.currency_api_url.clone(),
        cfg.currency_api_key.clone(),
        cfg.http_timeout,
    )?);

    let dispatcher = Arc::new(Dispatcher::new(
        provider,
        FavoritesStore::default(),
        DispatchSettings::from(cfg.as_ref()),
    ));

    fxbot_telegram::router::run_polling(cfg, dispatcher)
        .await
        .map_err(|e| fxbot_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
