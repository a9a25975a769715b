//! Haven Core
//!
//! Core types and error handling shared across Haven components.
//!
//! This crate provides:
//! - Subject, caregiver, and supervision profiles
//! - Inbound message and recent-history types
//! - The Directive contract consumed by the external phrasing collaborator
//! - The AlertEvent contract consumed by the external notifier
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    AgeGroup, AlertEvent, CaregiverContact, Directive, Emotion, HistoryEntry, InboundMessage,
    ParentalFlavor, Subject, SuggestedAction, SupervisedProfile,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        AlertEvent, CaregiverContact, Directive, Emotion, HistoryEntry, InboundMessage, Subject,
        SuggestedAction, SupervisedProfile,
    };
}
