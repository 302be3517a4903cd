use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ContactMethod, OrderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    AgreementRequired,
    Submitted,
}

/// Toast-style message shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
    pub emitted_at: DateTime<Utc>,
}

impl Notice {
    fn new(kind: NoticeKind, title: &str, description: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
            emitted_at: Utc::now(),
        }
    }

    pub fn agreement_required() -> Self {
        Self::new(
            NoticeKind::AgreementRequired,
            "Подтвердите соглашение",
            "Поставьте галочку согласия на обработку данных.",
        )
    }

    pub fn submitted() -> Self {
        Self::new(
            NoticeKind::Submitted,
            "Заявка отправлена",
            "Мы свяжемся с вами в ближайшее время.",
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum FormAction {
    ToggleService { index: usize },
    SelectContact { method: ContactMethod },
    SetName { value: String },
    SetPhone { raw: String },
    SetDescription { value: String },
    SetAgree { value: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceChip {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// Length counter rendered next to capped inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharCounter {
    pub len: usize,
    pub max: usize,
    pub at_limit: bool,
}

impl CharCounter {
    pub fn new(value: &str, max: usize) -> Self {
        let len = value.chars().count();
        Self {
            len,
            max,
            at_limit: len >= max,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: OrderId,
    pub name: String,
    pub name_counter: CharCounter,
    pub phone: String,
    pub description: String,
    pub description_counter: CharCounter,
    pub services: Vec<ServiceChip>,
    pub contact: Option<ContactMethod>,
    pub agree: bool,
    pub submitting: bool,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum OrderEvent {
    SubmissionStarted { order_id: OrderId },
    Notice { order_id: OrderId, notice: Notice },
}

impl OrderEvent {
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderEvent::SubmissionStarted { order_id } | OrderEvent::Notice { order_id, .. } => {
                *order_id
            }
        }
    }
}
