use std::{sync::Arc, time::Duration};

use crate::{api::OrderRegistry, config::Settings};
use shared::protocol::OrderEvent;
use tokio::sync::broadcast;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) orders: OrderRegistry,
    pub(crate) events: broadcast::Sender<OrderEvent>,
    pub(crate) settings: Arc<Settings>,
}

impl AppState {
    pub(crate) fn new(settings: Settings) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            orders: OrderRegistry::new(settings.max_open_orders),
            events,
            settings: Arc::new(settings),
        }
    }

    pub(crate) fn submit_delay(&self) -> Duration {
        self.settings.submit_delay()
    }
}
