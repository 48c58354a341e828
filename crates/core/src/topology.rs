//! Topology module - fixed four-way adjacency between cells
//!
//! Cells live in a flat arena in row-major order (`y * width + x`).
//! Neighbour links are stored as indices and wired once in [`Topology::build`];
//! nothing mutates them afterwards.

use arrayvec::ArrayVec;

use crate::error::ConfigError;
use crate::types::{Coord, Direction, MAX_BOARD_DIM};

/// Index of a cell in the board arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u16);

impl CellId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Immutable neighbour table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    width: u8,
    height: u8,
    /// `links[cell][direction.index()]`
    links: Vec<[Option<CellId>; 4]>,
}

impl Topology {
    /// Wire every cell to its up-to-four neighbours.
    pub fn build(width: u8, height: u8) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if width > MAX_BOARD_DIM {
            return Err(ConfigError::TooLarge(width));
        }
        if height > MAX_BOARD_DIM {
            return Err(ConfigError::TooLarge(height));
        }

        let mut links = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let here = Coord::new(x, y);
                let mut slots = [None; 4];
                for dir in Direction::ALL {
                    slots[dir.index()] = here
                        .step(dir)
                        .and_then(|c| Self::flat_index(width, height, c));
                }
                links.push(slots);
            }
        }

        Ok(Self {
            width,
            height,
            links,
        })
    }

    #[inline(always)]
    fn flat_index(width: u8, height: u8, coord: Coord) -> Option<CellId> {
        if coord.x >= width || coord.y >= height {
            return None;
        }
        Some(CellId(coord.y as u16 * width as u16 + coord.x as u16))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Cell at `coord`, `None` when off the board
    pub fn id_of(&self, coord: Coord) -> Option<CellId> {
        Self::flat_index(self.width, self.height, coord)
    }

    /// Coordinate of a cell
    pub fn coord_of(&self, id: CellId) -> Coord {
        let w = self.width as u16;
        Coord::new((id.0 % w) as u8, (id.0 / w) as u8)
    }

    /// Neighbour in `direction`, `None` at the boundary
    #[inline]
    pub fn neighbor(&self, id: CellId, direction: Direction) -> Option<CellId> {
        self.links[id.index()][direction.index()]
    }

    /// All neighbours that exist
    pub fn neighbors(&self, id: CellId) -> ArrayVec<CellId, 4> {
        self.links[id.index()].iter().flatten().copied().collect()
    }

    /// Cells with no neighbour in `direction`, one per lane.
    ///
    /// For `Down` this is the bottom row left to right, for `Left` the first
    /// column top to bottom.
    pub fn boundary(&self, direction: Direction) -> Vec<CellId> {
        self.ids()
            .filter(|&id| self.neighbor(id, direction).is_none())
            .collect()
    }

    /// Every cell id in row-major order
    pub fn ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.links.len() as u16).map(CellId)
    }
}
