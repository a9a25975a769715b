//! Mode state for one subject
//!
//! Exactly one mode is active per subject at any instant; entering a new
//! exclusive mode replaces the previous one. The variant payloads carry the
//! lifecycle data each mode needs.

use crate::escalation::TimerHandle;
use haven_classifiers::CrisisCategory;
use haven_core::{CaregiverContact, ParentalFlavor, Subject, SupervisedProfile};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use tokio::sync::Mutex;

/// The five exclusive behavioral modes, with their payloads
#[derive(Debug, Clone)]
pub enum Mode {
    /// Ordinary conversation
    Normal,

    /// Therapeutic listening
    Therapy,

    /// Crisis intervention
    Crisis(CrisisData),

    /// Simulated-parental support
    ParentalRole(ParentalData),

    /// Supervision of a vulnerable third party
    Supervision(SupervisionData),
}

impl Mode {
    /// Fieldless kind of this mode
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Normal => ModeKind::Normal,
            Self::Therapy => ModeKind::Therapy,
            Self::Crisis(_) => ModeKind::Crisis,
            Self::ParentalRole(_) => ModeKind::ParentalRole,
            Self::Supervision(_) => ModeKind::Supervision,
        }
    }
}

/// Fieldless mirror of [`Mode`] for logging and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    Normal,
    Therapy,
    Crisis,
    ParentalRole,
    Supervision,
}

impl ModeKind {
    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Therapy => "therapy",
            Self::Crisis => "crisis",
            Self::ParentalRole => "parental_role",
            Self::Supervision => "supervision",
        }
    }
}

/// Crisis-mode payload
#[derive(Debug, Clone)]
pub struct CrisisData {
    /// Category of the verdict that opened the mode
    pub category: CrisisCategory,

    /// When the crisis started
    pub started: SystemTime,

    /// Last message exchanged during the crisis
    pub last_message: String,
}

/// How the parental role was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationSource {
    /// The user asked for it explicitly
    Requested,

    /// Offered proactively and confirmed on a later turn
    Offered,
}

/// Parental-role payload
#[derive(Debug, Clone)]
pub struct ParentalData {
    /// Chosen flavor
    pub flavor: ParentalFlavor,

    /// How the mode was activated
    pub source: ActivationSource,
}

/// Supervision payload
#[derive(Debug, Clone)]
pub struct SupervisionData {
    /// Profile of the supervised person
    pub profile: SupervisedProfile,

    /// Contact to alert when a risk goes unacknowledged
    pub caregiver: CaregiverContact,

    /// Last message received from the supervised person
    pub last_message: String,
}

/// Per-subject mode record
pub struct ModeState {
    /// The subject this record protects
    pub subject: Subject,

    /// The single active mode
    pub mode: Mode,

    /// Armed escalation timer, if any
    pub timer: Option<TimerHandle>,

    /// Proactive parental offer awaiting confirmation on the next turn
    pub pending_parental_offer: Option<ParentalFlavor>,
}

impl ModeState {
    /// Create an idle record for a subject
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            mode: Mode::Normal,
            timer: None,
            pending_parental_offer: None,
        }
    }

    /// Kind of the active mode
    pub fn kind(&self) -> ModeKind {
        self.mode.kind()
    }

    /// Cancel any armed timer; returns whether one was armed
    pub fn cancel_timer(&mut self) -> bool {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
            true
        } else {
            false
        }
    }
}

/// Registry entry for one subject
///
/// The mutex serializes message handling and timer expiry for the subject;
/// different subjects never contend.
pub struct SubjectEntry {
    /// The subject's mode state
    pub state: Mutex<ModeState>,
}

impl SubjectEntry {
    /// Create an entry with an idle mode state
    pub fn new(subject: Subject) -> Self {
        Self {
            state: Mutex::new(ModeState::new(subject)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_kind_mapping() {
        assert_eq!(Mode::Normal.kind(), ModeKind::Normal);
        assert_eq!(Mode::Therapy.kind(), ModeKind::Therapy);
        assert_eq!(
            Mode::ParentalRole(ParentalData {
                flavor: ParentalFlavor::Madre,
                source: ActivationSource::Requested,
            })
            .kind(),
            ModeKind::ParentalRole
        );
    }

    #[test]
    fn test_new_state_is_idle() {
        let mut state = ModeState::new(Subject::minimal("u1"));
        assert_eq!(state.kind(), ModeKind::Normal);
        assert!(state.timer.is_none());
        assert!(!state.cancel_timer());
    }
}
