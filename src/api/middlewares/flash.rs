use actix_session::Session;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, AppResult};

const FLASH_KEY: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: FlashCategory,
    pub message: String,
}

impl FlashMessage {
    /// Plain messages are informational unless a category is given.
    pub fn new(message: impl Into<String>) -> Self {
        FlashMessage {
            category: FlashCategory::Info,
            message: message.into(),
        }
    }

    pub fn category(mut self, category: FlashCategory) -> Self {
        self.category = category;
        self
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message).category(FlashCategory::Success)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message).category(FlashCategory::Danger)
    }
}

impl From<&str> for FlashMessage {
    fn from(message: &str) -> Self {
        FlashMessage::new(message)
    }
}

impl From<String> for FlashMessage {
    fn from(message: String) -> Self {
        FlashMessage::new(message)
    }
}

/// One-shot messages kept in the cookie session until the next render.
#[derive(Clone)]
pub struct Flash(Session);

impl Flash {
    pub fn new(session: Session) -> Self {
        Flash(session)
    }

    pub fn push(&self, message: impl Into<FlashMessage>) -> AppResult<()> {
        let mut pending = self.pending()?;
        pending.push(message.into());

        self.0
            .insert(FLASH_KEY, pending)
            .map_err(|err| AppError::InternalError().trace(&err.to_string()))
    }

    pub fn take(&self) -> AppResult<Vec<FlashMessage>> {
        let pending = self.pending()?;

        if !pending.is_empty() {
            self.0.remove(FLASH_KEY);
        }

        Ok(pending)
    }

    fn pending(&self) -> AppResult<Vec<FlashMessage>> {
        self.0
            .get::<Vec<FlashMessage>>(FLASH_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|err| AppError::InternalError().trace(&err.to_string()))
    }
}
