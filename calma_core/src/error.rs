use thiserror::Error;

use crate::data::{category::CategoryId, event::EventId};

/// Error type for store mutations that name a record which is not in the
/// store. The store is left unchanged whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StoreError {
    #[error("no event with id `{0}`")]
    EventNotFound(EventId),
    #[error("no category with id `{0}`")]
    CategoryNotFound(CategoryId),
}

/// Error type for loading user settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}
