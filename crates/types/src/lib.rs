//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond conversions, making them
//! usable in any context (board logic, async driver, CLI output).
//!
//! # Coordinates
//!
//! Cells are addressed by [`Coord`] with `x` growing to the right and `y`
//! growing downward, so `y = 0` is the top row:
//!
//! | Direction | dx | dy |
//! |-----------|----|----|
//! | `Up`      |  0 | -1 |
//! | `Down`    |  0 | +1 |
//! | `Left`    | -1 |  0 |
//! | `Right`   | +1 |  0 |
//!
//! # Board Limits
//!
//! - `DEFAULT_WIDTH` / `DEFAULT_HEIGHT`: 8 x 8
//! - `MAX_BOARD_DIM`: 64 cells per side
//! - `MIN_RUN`: 3 crystals form a match
//!
//! # Examples
//!
//! ```
//! use crystal_grid_types::{CrystalKind, Direction, Coord};
//!
//! let kind = CrystalKind::from_char('r').unwrap();
//! assert_eq!(kind, CrystalKind::Red);
//!
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir.opposite(), Direction::Right);
//!
//! assert_eq!(Coord::new(2, 3).step(Direction::Up), Some(Coord::new(2, 2)));
//! assert_eq!(Coord::new(0, 0).step(Direction::Left), None);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_WIDTH: u8 = 8;

/// Default board height in cells
pub const DEFAULT_HEIGHT: u8 = 8;

/// Largest accepted width or height
pub const MAX_BOARD_DIM: u8 = 64;

/// Shortest run that counts as a match
pub const MIN_RUN: usize = 3;

/// Default time a destruction collaborator gets before the driver gives up (ms)
pub const DEFAULT_DESTROY_TIMEOUT_MS: u64 = 2_000;

/// Cardinal direction on the board.
///
/// Used for swap requests, neighbour lookup and the board-wide gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the other way
    ///
    /// # Examples
    ///
    /// ```
    /// use crystal_grid_types::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Right.opposite(), Direction::Left);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Axis this direction moves along
    pub fn axis(&self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// Unit offset `(dx, dy)`
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Slot used by neighbour tables
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Parse direction from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "up" | "u", "down" | "d", "left" | "l", "right" | "r".
    /// "top" and "bottom" are accepted as aliases.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" | "top" => Some(Direction::Up),
            "down" | "d" | "bottom" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// One of the two board axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Scan order of the matcher: rows first, then columns
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// `(forward, backward)` directions along the axis
    pub fn directions(&self) -> (Direction, Direction) {
        match self {
            Axis::Horizontal => (Direction::Right, Direction::Left),
            Axis::Vertical => (Direction::Up, Direction::Down),
        }
    }
}

/// Grid coordinate, `(0, 0)` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Coordinate one step away, or `None` when it would go negative.
    ///
    /// The upper bound is the board's concern.
    pub fn step(&self, direction: Direction) -> Option<Coord> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Coord { x, y })
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The crystal categories
///
/// Each kind has a single-letter code used by text layouts:
/// - **Red**: `R`
/// - **Green**: `G`
/// - **Blue**: `B`
/// - **Yellow**: `Y`
/// - **Purple**: `P`
/// - **Orange**: `O`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrystalKind {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

impl CrystalKind {
    pub const ALL: [CrystalKind; 6] = [
        CrystalKind::Red,
        CrystalKind::Green,
        CrystalKind::Blue,
        CrystalKind::Yellow,
        CrystalKind::Purple,
        CrystalKind::Orange,
    ];

    /// Parse a kind from its layout letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use crystal_grid_types::CrystalKind;
    ///
    /// assert_eq!(CrystalKind::from_char('B'), Some(CrystalKind::Blue));
    /// assert_eq!(CrystalKind::from_char('.'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(CrystalKind::Red),
            'G' => Some(CrystalKind::Green),
            'B' => Some(CrystalKind::Blue),
            'Y' => Some(CrystalKind::Yellow),
            'P' => Some(CrystalKind::Purple),
            'O' => Some(CrystalKind::Orange),
            _ => None,
        }
    }

    /// Layout letter
    pub fn as_char(&self) -> char {
        match self {
            CrystalKind::Red => 'R',
            CrystalKind::Green => 'G',
            CrystalKind::Blue => 'B',
            CrystalKind::Yellow => 'Y',
            CrystalKind::Purple => 'P',
            CrystalKind::Orange => 'O',
        }
    }

    /// Parse kind from its name or letter (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" | "r" => Some(CrystalKind::Red),
            "green" | "g" => Some(CrystalKind::Green),
            "blue" | "b" => Some(CrystalKind::Blue),
            "yellow" | "y" => Some(CrystalKind::Yellow),
            "purple" | "p" => Some(CrystalKind::Purple),
            "orange" | "o" => Some(CrystalKind::Orange),
            _ => None,
        }
    }

    /// Convert to lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            CrystalKind::Red => "red",
            CrystalKind::Green => "green",
            CrystalKind::Blue => "blue",
            CrystalKind::Yellow => "yellow",
            CrystalKind::Purple => "purple",
            CrystalKind::Orange => "orange",
        }
    }

    /// Stable non-zero code for compact grids and hashing (0 means empty)
    pub fn code(&self) -> u8 {
        match self {
            CrystalKind::Red => 1,
            CrystalKind::Green => 2,
            CrystalKind::Blue => 3,
            CrystalKind::Yellow => 4,
            CrystalKind::Purple => 5,
            CrystalKind::Orange => 6,
        }
    }
}

/// Turn cycle phases
///
/// `Idle` is the only phase that accepts a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    #[default]
    Idle,
    Swapping,
    Validating,
    RollingBack,
    Matching,
    Destroying,
    Compacting,
}

impl TurnPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPhase::Idle => "idle",
            TurnPhase::Swapping => "swapping",
            TurnPhase::Validating => "validating",
            TurnPhase::RollingBack => "rolling_back",
            TurnPhase::Matching => "matching",
            TurnPhase::Destroying => "destroying",
            TurnPhase::Compacting => "compacting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_opposites_are_involutions() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().axis(), dir.axis());
            assert_ne!(dir.opposite().index(), dir.index());
        }
    }

    #[test]
    fn direction_from_str_accepts_aliases() {
        assert_eq!(Direction::from_str("Top"), Some(Direction::Up));
        assert_eq!(Direction::from_str("bottom"), Some(Direction::Down));
        assert_eq!(Direction::from_str("R"), Some(Direction::Right));
        assert_eq!(Direction::from_str("sideways"), None);
    }

    #[test]
    fn coord_step_stops_at_zero() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Down), Some(Coord::new(0, 1)));
        assert_eq!(origin.step(Direction::Right), Some(Coord::new(1, 0)));
    }

    #[test]
    fn crystal_kind_codes_are_unique_and_nonzero() {
        let mut seen = [false; 7];
        for kind in CrystalKind::ALL {
            let code = kind.code() as usize;
            assert!(code != 0);
            assert!(!seen[code]);
            seen[code] = true;
            assert_eq!(CrystalKind::from_char(kind.as_char()), Some(kind));
            assert_eq!(CrystalKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn serde_names_are_lowercase() {
        let json = serde_json::to_string(&CrystalKind::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
        let dir: Direction = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(dir, Direction::Left);
        let phase = serde_json::to_string(&TurnPhase::RollingBack).unwrap();
        assert_eq!(phase, "\"rolling_back\"");
    }
}
