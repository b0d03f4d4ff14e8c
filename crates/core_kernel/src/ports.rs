//! Collaborator boundary
//!
//! The billing core reaches persistence and transport only through a port
//! trait the domain crate defines. This module holds what every port
//! shares: the error type adapters report through, so a missing row and a
//! dropped connection look the same to the services no matter which backend
//! sits behind the trait.

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Failure surfaced by a port implementation
#[derive(Debug, Error)]
pub enum PortError {
    /// No entity of the given kind exists under the given id
    #[error("no {entity} found for id {id}")]
    NotFound { entity: String, id: String },

    /// The input was rejected before touching the backend
    #[error("invalid input: {0}")]
    Validation(String),

    /// The write collides with state already present
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend could not be reached
    #[error("backend unreachable: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// The adapter failed in a way the caller cannot act on
    #[error("internal port failure: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl PortError {
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict(message.into())
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Whether retrying the same operation could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    /// Whether the failure is a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker for port traits
///
/// Ports extend this so every adapter is shareable across tasks and usable
/// behind `Arc<dyn …>`.
pub trait DomainPort: Send + Sync + 'static {}
