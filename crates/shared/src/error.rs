use thiserror::Error;

use crate::domain::CardKind;

/// Rejected game configuration. Raised before any round starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown card kind '{0}'")]
    UnknownKind(String),

    #[error("at least one card kind is required")]
    NoKinds,

    #[error("card kind '{0}' is listed more than once")]
    DuplicateKind(CardKind),

    #[error("a {rows}x{columns} board has {slots} slots but {kinds} kinds need {needed}")]
    LayoutMismatch {
        rows: usize,
        columns: usize,
        slots: usize,
        kinds: usize,
        needed: usize,
    },

    #[error("{timer} duration must be greater than zero")]
    ZeroDuration { timer: &'static str },
}
