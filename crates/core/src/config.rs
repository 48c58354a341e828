//! Board configuration
//!
//! A [`BoardConfig`] is plain serde data. It can come from JSON, a file, or
//! `CRYSTAL_GRID_*` environment variables layered over the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ConfigError;
use crate::observer::BoardObserver;
use crate::rng::{fill_random, SimpleRng};
use crate::spawn::RandomSpawner;
use crate::turn::TurnController;
use crate::types::{
    CrystalKind, Direction, DEFAULT_DESTROY_TIMEOUT_MS, DEFAULT_HEIGHT, DEFAULT_WIDTH,
    MAX_BOARD_DIM,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    pub gravity: Direction,
    /// Kinds drawn by the random fill and refill
    pub kinds: Vec<CrystalKind>,
    pub seed: u32,
    /// Fixed starting layout, one string per row
    pub layout: Option<Vec<String>>,
    /// Install a [`RandomSpawner`] so cleared cells are refilled
    pub refill: bool,
    /// How long an async host waits for one deferred destruction
    pub destroy_timeout_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            gravity: Direction::Down,
            kinds: CrystalKind::ALL.to_vec(),
            seed: 1,
            layout: None,
            refill: false,
            destroy_timeout_ms: DEFAULT_DESTROY_TIMEOUT_MS,
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Defaults overridden by `CRYSTAL_GRID_WIDTH`, `CRYSTAL_GRID_HEIGHT`,
    /// `CRYSTAL_GRID_GRAVITY`, `CRYSTAL_GRID_SEED` and `CRYSTAL_GRID_REFILL`.
    ///
    /// Numbers that fail to parse fall back to the default. An unknown
    /// gravity name is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `CRYSTAL_GRID_*` overrides read through `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        if let Some(width) = var("CRYSTAL_GRID_WIDTH").and_then(|s| s.parse().ok()) {
            self.width = width;
        }
        if let Some(height) = var("CRYSTAL_GRID_HEIGHT").and_then(|s| s.parse().ok()) {
            self.height = height;
        }
        if let Some(seed) = var("CRYSTAL_GRID_SEED").and_then(|s| s.parse().ok()) {
            self.seed = seed;
        }
        if let Some(gravity) = var("CRYSTAL_GRID_GRAVITY") {
            self.gravity =
                Direction::from_str(&gravity).ok_or(ConfigError::UnknownDirection(gravity))?;
        }
        if let Some(refill) = var("CRYSTAL_GRID_REFILL") {
            self.refill = refill == "1" || refill.eq_ignore_ascii_case("true");
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_BOARD_DIM {
            return Err(ConfigError::TooLarge(self.width));
        }
        if self.height > MAX_BOARD_DIM {
            return Err(ConfigError::TooLarge(self.height));
        }
        if self.kinds.is_empty() {
            return Err(ConfigError::NoKinds);
        }
        Ok(())
    }

    /// Build the starting board: the layout when given, else a seeded fill.
    pub fn build_board(&self) -> Result<Board, ConfigError> {
        self.validate()?;

        if let Some(rows) = &self.layout {
            let board = Board::from_rows(rows, self.gravity)?;
            if board.width() != self.width || board.height() != self.height {
                return Err(ConfigError::LayoutShape {
                    width: self.width,
                    height: self.height,
                    detail: format!("layout is {}x{}", board.width(), board.height()),
                });
            }
            return Ok(board);
        }

        let mut board = Board::new(self.width, self.height, self.gravity)?;
        let mut rng = SimpleRng::new(self.seed);
        fill_random(&mut board, &self.kinds, &mut rng)?;
        Ok(board)
    }

    /// Board plus controller, with a random spawner when `refill` is set.
    ///
    /// The spawner is seeded from the fill seed so the whole run replays.
    pub fn build_controller<O: BoardObserver>(
        &self,
        observer: O,
    ) -> Result<TurnController<O>, ConfigError> {
        let board = self.build_board()?;
        let controller = TurnController::with_observer(board, observer);
        if self.refill {
            let spawner = RandomSpawner::new(&self.kinds, self.seed.wrapping_add(1));
            return Ok(controller.with_spawner(spawner));
        }
        Ok(controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!((config.width, config.height), (8, 8));
        assert_eq!(config.gravity, Direction::Down);
        assert_eq!(config.kinds.len(), 6);
        assert!(!config.refill);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BoardConfig::from_json(r#"{"width": 5, "gravity": "left"}"#).unwrap();
        assert_eq!(config.width, 5);
        assert_eq!(config.height, 8);
        assert_eq!(config.gravity, Direction::Left);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            BoardConfig::from_json(r#"{"width": 0}"#),
            Err(ConfigError::EmptyGrid { .. })
        ));
        assert!(matches!(
            BoardConfig::from_json(r#"{"kinds": []}"#),
            Err(ConfigError::NoKinds)
        ));
        assert!(matches!(
            BoardConfig::from_json(r#"{"height": 65}"#),
            Err(ConfigError::TooLarge(65))
        ));
        assert!(matches!(
            BoardConfig::from_json(r#"{"kinds": ["teal"]}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = BoardConfig::default()
            .with_overrides(env(&[
                ("CRYSTAL_GRID_WIDTH", "10"),
                ("CRYSTAL_GRID_GRAVITY", "up"),
                ("CRYSTAL_GRID_SEED", "not-a-number"),
                ("CRYSTAL_GRID_REFILL", "true"),
            ]))
            .unwrap();
        assert_eq!(config.width, 10);
        assert_eq!(config.gravity, Direction::Up);
        assert_eq!(config.seed, 1);
        assert!(config.refill);
    }

    #[test]
    fn test_override_unknown_gravity() {
        let err = BoardConfig::default()
            .with_overrides(env(&[("CRYSTAL_GRID_GRAVITY", "sideways")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDirection(ref s) if s == "sideways"));
    }

    #[test]
    fn test_layout_must_match_dimensions() {
        let config = BoardConfig {
            width: 3,
            height: 2,
            layout: Some(vec!["RGB".into()]),
            ..BoardConfig::default()
        };
        assert!(matches!(
            config.build_board(),
            Err(ConfigError::LayoutShape { .. })
        ));
    }

    #[test]
    fn test_seeded_board_is_reproducible() {
        let config = BoardConfig {
            seed: 77,
            ..BoardConfig::default()
        };
        let a = config.build_board().unwrap();
        let b = config.build_board().unwrap();
        assert_eq!(a.to_rows(), b.to_rows());
        assert_eq!(a.occupied_count(), 64);
    }

    #[test]
    fn test_build_controller_starts_idle() {
        let config = BoardConfig {
            layout: Some(vec!["RGB".into(), "GBR".into()]),
            width: 3,
            height: 2,
            ..BoardConfig::default()
        };
        let controller = config.build_controller(NoopObserver).unwrap();
        assert!(controller.is_idle());
        assert_eq!(controller.board().to_rows(), vec!["RGB", "GBR"]);
    }
}
