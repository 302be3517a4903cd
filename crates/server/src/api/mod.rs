use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
    time::Duration,
};

use chrono::{DateTime, Utc};
use shared::{
    domain::OrderId,
    error::{ApiError, ErrorCode, FormError},
    order::OrderForm,
    protocol::{FormAction, Notice, OrderEvent, OrderSnapshot},
};
use tokio::{
    sync::{
        broadcast::{self, error::RecvError},
        Mutex,
    },
    task::JoinHandle,
};
use tracing::{debug, info, warn};

/// Notices kept per session; older ones are dropped first.
pub const MAX_NOTICES: usize = 8;

struct OrderSession {
    form: OrderForm,
    notices: VecDeque<Notice>,
    created_at: DateTime<Utc>,
}

impl OrderSession {
    fn snapshot(&self, order_id: OrderId) -> OrderSnapshot {
        self.form.snapshot(order_id, self.notices.iter().cloned().collect())
    }

    fn record_notice(&mut self, notice: Notice) {
        while self.notices.len() >= MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }
}

/// In-memory order form sessions, one per visitor form.
#[derive(Clone)]
pub struct OrderRegistry {
    sessions: Arc<Mutex<HashMap<OrderId, OrderSession>>>,
    max_open: usize,
}

impl OrderRegistry {
    pub fn new(max_open: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_open: max_open.max(1),
        }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn create(&self) -> OrderSnapshot {
        let mut sessions = self.sessions.lock().await;
        while sessions.len() >= self.max_open {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, session)| session.created_at)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            debug!(%oldest, "evicted oldest order session");
        }

        let order_id = OrderId::new();
        let session = OrderSession {
            form: OrderForm::new(),
            notices: VecDeque::new(),
            created_at: Utc::now(),
        };
        let snapshot = session.snapshot(order_id);
        sessions.insert(order_id, session);
        info!(%order_id, open = sessions.len(), "order session created");
        snapshot
    }

    pub async fn snapshot(&self, order_id: OrderId) -> Result<OrderSnapshot, ApiError> {
        let sessions = self.sessions.lock().await;
        let session = sessions.get(&order_id).ok_or_else(not_found)?;
        Ok(session.snapshot(order_id))
    }

    pub async fn apply(
        &self,
        order_id: OrderId,
        action: FormAction,
    ) -> Result<OrderSnapshot, ApiError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&order_id).ok_or_else(not_found)?;
        session.form.apply(action)?;
        Ok(session.snapshot(order_id))
    }

    /// Starts a submission. A missing agreement records its notice on the
    /// session before the error is returned.
    pub async fn begin_submit(&self, order_id: OrderId) -> Result<OrderSnapshot, ApiError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&order_id).ok_or_else(not_found)?;
        if let Err(error) = session.form.begin_submit() {
            if let Some(notice) = error.notice() {
                session.record_notice(notice);
            }
            return Err(error.into());
        }
        Ok(session.snapshot(order_id))
    }

    pub async fn finish_submit(&self, order_id: OrderId) -> Option<Notice> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&order_id)?;
        let notice = session.form.finish_submit()?;
        session.record_notice(notice.clone());
        Some(notice)
    }
}

/// Completes a started submission after `delay`, standing in for a network
/// round trip that cannot fail.
pub fn spawn_submission(
    orders: OrderRegistry,
    events: broadcast::Sender<OrderEvent>,
    order_id: OrderId,
    delay: Duration,
) -> JoinHandle<()> {
    let _ = events.send(OrderEvent::SubmissionStarted { order_id });
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Some(notice) = orders.finish_submit(order_id).await {
            info!(%order_id, "order submitted");
            let _ = events.send(OrderEvent::Notice { order_id, notice });
        }
    })
}

/// Runs a whole submission for a form that is not kept in the registry.
pub async fn submit_detached(form: &mut OrderForm, delay: Duration) -> Result<Notice, FormError> {
    form.begin_submit()?;
    tokio::time::sleep(delay).await;
    form.finish_submit().ok_or(FormError::AlreadySubmitting)
}

/// Waits for the next event of `order_id`. A lagging receiver skips the
/// dropped events and keeps going; `None` once the channel is closed.
pub async fn next_order_event(
    events_rx: &mut broadcast::Receiver<OrderEvent>,
    order_id: OrderId,
) -> Option<OrderEvent> {
    loop {
        match events_rx.recv().await {
            Ok(event) if event.order_id() == order_id => return Some(event),
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                warn!(%order_id, skipped, "order event subscriber lagged");
                continue;
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

fn not_found() -> ApiError {
    ApiError::new(ErrorCode::NotFound, "order not found")
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
