use std::{collections::HashSet, time::Duration};

use shared::{domain::CardKind, error::GameError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub kinds: Vec<CardKind>,
    pub preview: Duration,
    pub mismatch: Duration,
    pub tick: Duration,
    /// Disable the restart control while the preview is showing. Restart
    /// inputs are still honoured by the controller.
    pub lock_restart_during_preview: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            columns: 5,
            kinds: CardKind::ALL.to_vec(),
            preview: Duration::from_millis(3000),
            mismatch: Duration::from_millis(700),
            tick: Duration::from_millis(1000),
            lock_restart_during_preview: true,
        }
    }
}

impl GameConfig {
    /// Saturates instead of overflowing, so an oversized board fails
    /// validation as a layout mismatch.
    pub fn tile_count(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    pub fn pair_count(&self) -> usize {
        self.kinds.len()
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.kinds.is_empty() {
            return Err(GameError::NoKinds);
        }

        let mut seen = HashSet::new();
        for kind in &self.kinds {
            if !seen.insert(*kind) {
                return Err(GameError::DuplicateKind(*kind));
            }
        }

        let needed = self.kinds.len() * 2;
        if self.tile_count() != needed {
            return Err(GameError::LayoutMismatch {
                rows: self.rows,
                columns: self.columns,
                slots: self.tile_count(),
                kinds: self.kinds.len(),
                needed,
            });
        }

        for (timer, duration) in [
            ("preview", self.preview),
            ("mismatch", self.mismatch),
            ("tick", self.tick),
        ] {
            if duration.is_zero() {
                return Err(GameError::ZeroDuration { timer });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_the_classic_board() {
        let config = GameConfig::default();
        assert_eq!(config.tile_count(), 20);
        assert_eq!(config.pair_count(), 10);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_board_that_does_not_fit_the_pairs() {
        let config = GameConfig {
            rows: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(GameError::LayoutMismatch {
                rows: 3,
                columns: 5,
                slots: 15,
                kinds: 10,
                needed: 20,
            })
        );
    }

    #[test]
    fn oversized_board_is_a_layout_mismatch() {
        let config = GameConfig {
            rows: usize::MAX,
            columns: 3,
            ..GameConfig::default()
        };
        assert_eq!(config.tile_count(), usize::MAX);
        assert!(matches!(
            config.validate(),
            Err(GameError::LayoutMismatch {
                slots: usize::MAX,
                needed: 20,
                ..
            })
        ));
    }

    #[test]
    fn rejects_duplicate_and_missing_kinds() {
        let duplicate = GameConfig {
            rows: 2,
            columns: 2,
            kinds: vec![CardKind::Fire, CardKind::Fire],
            ..GameConfig::default()
        };
        assert_eq!(
            duplicate.validate(),
            Err(GameError::DuplicateKind(CardKind::Fire))
        );

        let empty = GameConfig {
            rows: 0,
            columns: 0,
            kinds: Vec::new(),
            ..GameConfig::default()
        };
        assert_eq!(empty.validate(), Err(GameError::NoKinds));
    }

    #[test]
    fn rejects_zero_timer_durations() {
        let config = GameConfig {
            mismatch: Duration::ZERO,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(GameError::ZeroDuration { timer: "mismatch" })
        );
    }
}
