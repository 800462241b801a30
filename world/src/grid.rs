//! Static walkability grid parsed from a textual layout.

use roguelike_core::TilePosition;
use thiserror::Error;

const BLOCKED_SYMBOL: char = '#';
const WALKABLE_SYMBOL: char = '.';

/// Contents of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Tile that no entity may enter.
    Blocked,
    /// Tile entities may stand on.
    Walkable,
}

/// Reasons a layout cannot be turned into a [`GridMap`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The layout contained no rows or only empty rows.
    #[error("grid layout contains no tiles")]
    Empty,
    /// A row's length differs from the first row.
    #[error("row {row} has {found} tiles but the first row has {expected}")]
    Ragged {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A row contained a symbol other than `#` or `.`.
    #[error("unknown tile symbol {symbol:?} at row {row}, column {column}")]
    UnknownSymbol {
        /// Zero-based row of the symbol.
        row: usize,
        /// Zero-based column of the symbol.
        column: usize,
        /// The unexpected symbol.
        symbol: char,
    },
}

/// Rectangular, immutable grid of blocked and walkable tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl GridMap {
    /// Parses a layout where `#` marks blocked tiles and `.` walkable ones.
    ///
    /// Every row must have the same length; ragged layouts are rejected so
    /// that lookups can never index outside the stored cells.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = Vec::new();
        let mut expected = None;
        let mut height = 0_usize;

        for (row_index, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let mut found = 0_usize;
            for (column, symbol) in row.chars().enumerate() {
                let cell = match symbol {
                    BLOCKED_SYMBOL => Cell::Blocked,
                    WALKABLE_SYMBOL => Cell::Walkable,
                    symbol => {
                        return Err(GridError::UnknownSymbol {
                            row: row_index,
                            column,
                            symbol,
                        })
                    }
                };
                cells.push(cell);
                found += 1;
            }

            match expected {
                None => expected = Some(found),
                Some(expected) if expected != found => {
                    return Err(GridError::Ragged {
                        row: row_index,
                        expected,
                        found,
                    })
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = expected.unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }

        Ok(Self {
            width: u32::try_from(width).map_err(|_| GridError::Empty)?,
            height: u32::try_from(height).map_err(|_| GridError::Empty)?,
            cells,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the cell at the provided tile, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, tile: TilePosition) -> Option<Cell> {
        self.index(tile)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the tile lies inside the grid and is walkable.
    #[must_use]
    pub fn is_walkable(&self, tile: TilePosition) -> bool {
        self.cell(tile) == Some(Cell::Walkable)
    }

    /// Iterates every walkable tile in row-major order.
    pub fn walkable_tiles(&self) -> impl Iterator<Item = TilePosition> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Walkable)
            .map(move |(index, _)| TilePosition::new((index % width) as i32, (index / width) as i32))
    }

    fn index(&self, tile: TilePosition) -> Option<usize> {
        let column = u32::try_from(tile.x()).ok()?;
        let row = u32::try_from(tile.y()).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}
