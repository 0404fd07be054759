use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const BACK_FACE_ASSET: &str = "back.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Darkness,
    Double,
    Fairy,
    Fighting,
    Fire,
    Grass,
    Lightning,
    Metal,
    Psychic,
    Water,
}

impl CardKind {
    pub const ALL: [CardKind; 10] = [
        CardKind::Darkness,
        CardKind::Double,
        CardKind::Fairy,
        CardKind::Fighting,
        CardKind::Fire,
        CardKind::Grass,
        CardKind::Lightning,
        CardKind::Metal,
        CardKind::Psychic,
        CardKind::Water,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Darkness => "darkness",
            Self::Double => "double",
            Self::Fairy => "fairy",
            Self::Fighting => "fighting",
            Self::Fire => "fire",
            Self::Grass => "grass",
            Self::Lightning => "lightning",
            Self::Metal => "metal",
            Self::Psychic => "psychic",
            Self::Water => "water",
        }
    }

    /// File name of the face image for this kind inside an assets directory.
    pub fn face_asset(self) -> &'static str {
        match self {
            Self::Darkness => "darkness.jpg",
            Self::Double => "double.jpg",
            Self::Fairy => "fairy.jpg",
            Self::Fighting => "fighting.jpg",
            Self::Fire => "fire.jpg",
            Self::Grass => "grass.jpg",
            Self::Lightning => "lightning.jpg",
            Self::Metal => "metal.jpg",
            Self::Psychic => "psychic.jpg",
            Self::Water => "water.jpg",
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardKind {
    type Err = GameError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GameError::UnknownKind(wanted.to_string()))
    }
}

/// A card of the deck. Two cards of the same kind share one face image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    kind: CardKind,
    face: &'static str,
}

impl Card {
    pub fn new(kind: CardKind) -> Self {
        Self {
            kind,
            face: kind.face_asset(),
        }
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    pub fn face(&self) -> &'static str {
        self.face
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "side", content = "kind", rename_all = "snake_case")]
pub enum TileFace {
    Back,
    Front(CardKind),
}

impl TileFace {
    pub fn is_back(self) -> bool {
        matches!(self, Self::Back)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Preview,
    Playing,
    Resolving,
    Won,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Preview => "Preview",
            Self::Playing => "Playing",
            Self::Resolving => "Resolving",
            Self::Won => "Won",
        }
    }

    pub fn accepts_tile_input(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Errors and elapsed seconds of a finished round.
///
/// Field order matters: the derived ordering compares errors first and
/// seconds second, which is exactly the best-score ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score {
    pub errors: u32,
    pub seconds: u32,
}

impl Score {
    pub fn new(errors: u32, seconds: u32) -> Self {
        Self { errors, seconds }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Excellent,
    Good,
    Poor,
}

impl PerformanceTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent!",
            Self::Good => "Good!",
            Self::Poor => "Poor!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelField {
    Errors,
    Time,
    Best,
}
