//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the combat engine so clients
//! can bubble them up with consistent context.
use siege_core::{EncounterError, ErrorSeverity, GameError, TemplateId};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Encounter(#[from] EncounterError),

    #[error("runtime requires an archetype catalog before building")]
    MissingArchetypes,

    #[error("no archetype registered for {0}")]
    UnknownTemplate(TemplateId),
}

impl RuntimeError {
    /// Severity of the underlying engine error, if this wraps one.
    pub fn encounter_severity(&self) -> Option<ErrorSeverity> {
        match self {
            RuntimeError::Encounter(error) => Some(error.severity()),
            _ => None,
        }
    }

    pub(crate) fn is_not_found(&self) -> bool {
        matches!(
            self,
            RuntimeError::Encounter(EncounterError::MonsterNotFound(_))
        )
    }
}
