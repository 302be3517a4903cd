use std::collections::BTreeSet;

use crate::{
    domain::{truncate_chars, ContactMethod, OrderId, DESCRIPTION_MAX, NAME_MAX, SERVICES},
    error::FormError,
    phone::PhoneNumber,
    protocol::{CharCounter, FormAction, Notice, OrderSnapshot, ServiceChip},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// In-memory state of one order form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderForm {
    name: String,
    phone: PhoneNumber,
    description: String,
    services: BTreeSet<usize>,
    contact: Option<ContactMethod>,
    agree: bool,
    state: SubmissionState,
}

impl OrderForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn services(&self) -> &BTreeSet<usize> {
        &self.services
    }

    pub fn contact(&self) -> Option<ContactMethod> {
        self.contact
    }

    pub fn agree(&self) -> bool {
        self.agree
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn set_name(&mut self, value: &str) {
        self.name = truncate_chars(value, NAME_MAX);
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = truncate_chars(value, DESCRIPTION_MAX);
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.phone = PhoneNumber::from_input(raw);
    }

    pub fn set_agree(&mut self, value: bool) {
        self.agree = value;
    }

    pub fn toggle_service(&mut self, index: usize) -> Result<(), FormError> {
        if index >= SERVICES.len() {
            return Err(FormError::UnknownService(index));
        }
        if !self.services.remove(&index) {
            self.services.insert(index);
        }
        Ok(())
    }

    /// Re-selecting the active method keeps it selected.
    pub fn select_contact(&mut self, method: ContactMethod) {
        self.contact = Some(method);
    }

    pub fn apply(&mut self, action: FormAction) -> Result<(), FormError> {
        match action {
            FormAction::ToggleService { index } => self.toggle_service(index)?,
            FormAction::SelectContact { method } => self.select_contact(method),
            FormAction::SetName { value } => self.set_name(&value),
            FormAction::SetPhone { raw } => self.set_phone(&raw),
            FormAction::SetDescription { value } => self.set_description(&value),
            FormAction::SetAgree { value } => self.set_agree(value),
        }
        Ok(())
    }

    /// Moves `Idle -> Submitting`. Leaves every field untouched on error.
    pub fn begin_submit(&mut self) -> Result<(), FormError> {
        if !self.agree {
            return Err(FormError::AgreementRequired);
        }
        if self.is_submitting() {
            return Err(FormError::AlreadySubmitting);
        }
        self.state = SubmissionState::Submitting;
        Ok(())
    }

    /// Moves `Submitting -> Idle` and yields the success notice once.
    pub fn finish_submit(&mut self) -> Option<Notice> {
        if !self.is_submitting() {
            return None;
        }
        self.state = SubmissionState::Idle;
        Some(Notice::submitted())
    }

    pub fn snapshot(&self, order_id: OrderId, notices: Vec<Notice>) -> OrderSnapshot {
        OrderSnapshot {
            order_id,
            name: self.name.clone(),
            name_counter: CharCounter::new(&self.name, NAME_MAX),
            phone: self.phone.formatted(),
            description: self.description.clone(),
            description_counter: CharCounter::new(&self.description, DESCRIPTION_MAX),
            services: SERVICES
                .iter()
                .enumerate()
                .map(|(index, label)| ServiceChip {
                    index,
                    label: label.to_string(),
                    selected: self.services.contains(&index),
                })
                .collect(),
            contact: self.contact,
            agree: self.agree,
            submitting: self.is_submitting(),
            notices,
        }
    }
}

#[cfg(test)]
#[path = "tests/order_tests.rs"]
mod tests;
