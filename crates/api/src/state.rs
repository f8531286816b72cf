//! Shared application state

use std::sync::Arc;

use melodia_billing::{SimulatedGateway, SubscriptionLedger, SubscriptionService};
use melodia_studio::{Catalog, GenerationService, HistoryStore};

use crate::config::Config;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: &'static Catalog,
    pub generator: Arc<GenerationService>,
    pub subscriptions: Arc<SubscriptionService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let history = Arc::new(HistoryStore::new(config.history_path.clone()));
        let generator = GenerationService::new(
            history,
            config.generation_delay(),
            &config.audio_base_url,
        );

        let subscriptions = SubscriptionService::new(
            Arc::new(SubscriptionLedger::new()),
            Arc::new(SimulatedGateway::new(config.payment_success_rate)),
        );

        Self {
            config: Arc::new(config),
            catalog: Catalog::builtin(),
            generator: Arc::new(generator),
            subscriptions: Arc::new(subscriptions),
        }
    }

    pub fn ledger(&self) -> &SubscriptionLedger {
        self.subscriptions.ledger()
    }
}
