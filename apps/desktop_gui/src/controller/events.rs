//! Backend-to-UI events and error modeling for the desktop app.

use shared::domain::Score;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    BestLoaded(Option<Score>),
    BestSaved(Score),
    BestCleared,
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadScore,
    SaveScore,
    ClearScore,
    Assets,
}

impl UiErrorContext {
    pub fn label(self) -> &'static str {
        match self {
            Self::BackendStartup => "Startup",
            Self::LoadScore => "Loading best score",
            Self::SaveScore => "Saving best score",
            Self::ClearScore => "Resetting best score",
            Self::Assets => "Card images",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    /// Without a working store, or without knowing what it holds, the game
    /// is still playable but results are not saved.
    pub fn disables_persistence(&self) -> bool {
        matches!(
            self.context,
            UiErrorContext::BackendStartup | UiErrorContext::LoadScore | UiErrorContext::SaveScore
        )
    }

    pub fn banner_text(&self) -> String {
        format!("{}: {}", self.context.label(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_text_names_the_context() {
        let err = UiError::from_message(UiErrorContext::SaveScore, "disk full");
        assert_eq!(err.banner_text(), "Saving best score: disk full");
        assert!(err.disables_persistence());
    }

    #[test]
    fn load_failures_stop_saving() {
        let err = UiError::from_message(UiErrorContext::LoadScore, "database is locked");
        assert!(err.disables_persistence());
    }

    #[test]
    fn asset_errors_keep_persistence() {
        let err = UiError::from_message(UiErrorContext::Assets, "missing back.jpg");
        assert!(!err.disables_persistence());
        assert_eq!(err.banner_text(), "Card images: missing back.jpg");
    }
}
