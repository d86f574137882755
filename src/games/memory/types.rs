//! Core domain types for the memory game.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// The fixed icon set cards are drawn from.
pub const ICONS: [Icon; 16] = [
    Icon('🐶'),
    Icon('🐱'),
    Icon('🐭'),
    Icon('🐹'),
    Icon('🐰'),
    Icon('🦊'),
    Icon('🐻'),
    Icon('🐼'),
    Icon('🐨'),
    Icon('🐯'),
    Icon('🦁'),
    Icon('🐮'),
    Icon('🐷'),
    Icon('🐸'),
    Icon('🐵'),
    Icon('🐔'),
];

/// Symbol printed on the face of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Icon(pub char);

impl Icon {
    /// Returns the symbol.
    pub fn symbol(self) -> char {
        self.0
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a card in the dealt deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub usize);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single card on the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    icon: Icon,
    is_flipped: bool,
    is_matched: bool,
}

impl Card {
    /// Creates a face-down card.
    pub fn new(id: CardId, icon: Icon) -> Self {
        Self {
            id,
            icon,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Returns the card id.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Returns the icon, regardless of whether it is visible.
    pub fn icon(&self) -> Icon {
        self.icon
    }

    /// Returns true while the card is turned face up.
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    /// Returns true once the card belongs to a matched pair.
    pub fn is_matched(&self) -> bool {
        self.is_matched
    }

    /// Returns true if the card can still be flipped.
    pub fn is_face_down(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }

    /// Returns what a player is allowed to see of this card.
    pub fn view(&self) -> CardView {
        let face = if self.is_matched {
            CardFace::Matched(self.icon)
        } else if self.is_flipped {
            CardFace::Up(self.icon)
        } else {
            CardFace::Down
        };
        CardView { id: self.id, face }
    }

    pub(super) fn set_flipped(&mut self, flipped: bool) {
        self.is_flipped = flipped;
    }

    pub(super) fn set_matched(&mut self) {
        self.is_matched = true;
    }
}

/// Visible face of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    /// Face down; the icon is opaque.
    Down,
    /// Face up while awaiting resolution.
    Up(Icon),
    /// Part of a matched pair.
    Matched(Icon),
}

/// Presentation-safe projection of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    /// Card id.
    pub id: CardId,
    /// What is visible.
    pub face: CardFace,
}

impl CardView {
    /// Returns the icon if it is visible.
    pub fn icon(&self) -> Option<Icon> {
        match self.face {
            CardFace::Down => None,
            CardFace::Up(icon) | CardFace::Matched(icon) => Some(icon),
        }
    }
}

/// Game mode, fixing which constraint applies and how records compare.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Untimed, unlimited attempts. Record is elapsed seconds.
    #[default]
    Basic,
    /// Attempt budget per difficulty. Record is attempts used.
    Limited,
    /// Countdown per difficulty. Record is seconds remaining.
    Timed,
}

impl Mode {
    /// Returns the display label for this mode.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Limited => "Limited attempts",
            Self::Timed => "Against the clock",
        }
    }
}

/// Difficulty tier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// 6 pairs.
    #[default]
    Easy,
    /// 8 pairs.
    Medium,
    /// 12 pairs.
    Hard,
}

impl Difficulty {
    /// Returns the static profile for this difficulty.
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => DifficultyProfile::new(6, 24, 60),
            Self::Medium => DifficultyProfile::new(8, 28, 120),
            Self::Hard => DifficultyProfile::new(12, 36, 120),
        }
    }
}

/// Pair count and limits of a difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Distinct icons, and so pairs, on the table.
    pair_count: usize,
    /// Attempt budget in limited mode.
    attempt_limit: u32,
    /// Countdown start in timed mode.
    time_limit_seconds: u32,
}

impl DifficultyProfile {
    const fn new(pair_count: usize, attempt_limit: u32, time_limit_seconds: u32) -> Self {
        Self {
            pair_count,
            attempt_limit,
            time_limit_seconds,
        }
    }
}

/// Mode and difficulty chosen at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Game mode.
    pub mode: Mode,
    /// Difficulty tier.
    pub difficulty: Difficulty,
}

impl SessionConfig {
    /// Creates a new session config.
    pub fn new(mode: Mode, difficulty: Difficulty) -> Self {
        Self { mode, difficulty }
    }

    /// Parses mode and difficulty names (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`](super::GameError::InvalidConfig)
    /// naming whichever value is unknown.
    #[instrument]
    pub fn parse(mode: &str, difficulty: &str) -> Result<Self, super::GameError> {
        let mode = mode
            .trim()
            .to_lowercase()
            .parse::<Mode>()
            .map_err(|_| super::GameError::InvalidConfig(format!("unknown mode '{}'", mode)))?;
        let difficulty = difficulty
            .trim()
            .to_lowercase()
            .parse::<Difficulty>()
            .map_err(|_| {
                super::GameError::InvalidConfig(format!("unknown difficulty '{}'", difficulty))
            })?;
        Ok(Self { mode, difficulty })
    }

    /// Returns the difficulty profile.
    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }
}

impl std::fmt::Display for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.mode, self.difficulty)
    }
}
