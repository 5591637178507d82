use std::fmt;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::Point;
use crate::error::GoError;
use crate::stone::{Cell, Stone};

/// Smallest supported board edge.
pub const MIN_SIZE: u8 = 4;
/// Largest supported board edge.
pub const MAX_SIZE: u8 = 19;

/// Outcome of a successful placement: the move itself and every point it
/// captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureReport {
    pub point: Point,
    pub stone: Stone,
    pub captured: Vec<Point>,
}

/// A square Go board stored as a flat row-major array.
///
/// Neighbors are never stored; they are derived from coordinates on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    size: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `size` x `size` board.
    pub fn new(size: u8) -> Result<Self, GoError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GoError::InvalidSize(size));
        }
        Ok(Board {
            size,
            cells: vec![Cell::Empty; size as usize * size as usize],
        })
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.size
    }

    /// All cells, row by row (`y` outer, `x` inner).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn on_board(&self, (x, y): Point) -> bool {
        x < self.size && y < self.size
    }

    pub fn get(&self, point: Point) -> Result<Cell, GoError> {
        if !self.on_board(point) {
            return Err(GoError::OutOfRange {
                x: point.0,
                y: point.1,
            });
        }
        Ok(self.cells[self.idx(point)])
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        self.get(point).ok().and_then(Cell::stone)
    }

    /// True when no stone of either color is on the board.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    pub fn stone_count(&self, stone: Stone) -> u32 {
        let cell = Cell::from(stone);
        self.cells.iter().filter(|&&c| c == cell).count() as u32
    }

    /// Overwrite a cell without any rules checking. Off-board points are ignored.
    pub(crate) fn set_raw(&mut self, point: Point, cell: Cell) {
        if self.on_board(point) {
            let i = self.idx(point);
            self.cells[i] = cell;
        }
    }

    // -- Moves --

    /// Place `stone` at `point`, removing any opposing chains left without
    /// liberties.
    ///
    /// Fails without touching the board when the point is off the board,
    /// already occupied, or when the new stone's chain would have no
    /// liberties once captures are resolved.
    pub fn place(&mut self, point: Point, stone: Stone) -> Result<CaptureReport, GoError> {
        let (x, y) = point;
        if !self.get(point)?.is_empty() {
            return Err(GoError::Occupied { x, y });
        }

        self.set_raw(point, stone.into());

        let mut captured = Vec::new();
        let mut visited = vec![false; self.cells.len()];
        for n in self.neighbors(point) {
            if self.stone_at(n) != Some(stone.opp()) || visited[self.idx(n)] {
                continue;
            }
            let chain = self.chain_from(n, &mut visited);
            if !self.has_liberty(&chain) {
                for &p in &chain {
                    self.set_raw(p, Cell::Empty);
                }
                captured.extend(chain);
            }
        }

        let own = self.chain(point);
        if !self.has_liberty(&own) {
            // Any capture frees a point next to the new stone.
            debug_assert!(captured.is_empty());
            self.set_raw(point, Cell::Empty);
            tracing::trace!("rejected suicide: {stone} at ({x}, {y})");
            return Err(GoError::Suicide { x, y });
        }

        tracing::debug!(
            "{stone} played ({x}, {y}), captured {} stone(s)",
            captured.len()
        );
        Ok(CaptureReport {
            point,
            stone,
            captured,
        })
    }

    pub fn place_black(&mut self, point: Point) -> Result<CaptureReport, GoError> {
        self.place(point, Stone::Black)
    }

    pub fn place_white(&mut self, point: Point) -> Result<CaptureReport, GoError> {
        self.place(point, Stone::White)
    }

    // -- Graph algorithms --

    /// Get the 4-connected neighbors that are on the board.
    pub fn neighbors(&self, (x, y): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if y > 0 {
            result.push((x, y - 1));
        }
        if y + 1 < self.size {
            result.push((x, y + 1));
        }
        if x > 0 {
            result.push((x - 1, y));
        }
        if x + 1 < self.size {
            result.push((x + 1, y));
        }
        result
    }

    /// Flood-fill the chain of same-colored stones containing `point`.
    /// Empty for an empty or off-board point.
    pub fn chain(&self, point: Point) -> Vec<Point> {
        let mut visited = vec![false; self.cells.len()];
        self.chain_from(point, &mut visited)
    }

    /// Distinct empty points adjacent to the chain containing `point`.
    pub fn liberties(&self, point: Point) -> Vec<Point> {
        let chain = self.chain(point);
        let mut seen = vec![false; self.cells.len()];
        let mut libs = Vec::new();
        for &p in &chain {
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                if !seen[ni] && self.cells[ni].is_empty() {
                    seen[ni] = true;
                    libs.push(n);
                }
            }
        }
        libs
    }

    /// Chain flood-fill using a caller-owned visited set, so several fills in
    /// one call never walk the same stone twice.
    fn chain_from(&self, point: Point, visited: &mut [bool]) -> Vec<Point> {
        let stone = match self.stone_at(point) {
            Some(s) => s,
            None => return Vec::new(),
        };

        let mut result = Vec::new();
        let mut stack = vec![point];

        while let Some(p) = stack.pop() {
            let vi = self.idx(p);
            if visited[vi] {
                continue;
            }
            visited[vi] = true;
            result.push(p);
            for n in self.neighbors(p) {
                if self.stone_at(n) == Some(stone) && !visited[self.idx(n)] {
                    stack.push(n);
                }
            }
        }

        result
    }

    fn has_liberty(&self, chain: &[Point]) -> bool {
        chain.iter().any(|&p| {
            self.neighbors(p)
                .iter()
                .any(|&n| self.cells[self.idx(n)].is_empty())
        })
    }

    // -- Internal helpers --

    #[inline]
    pub(crate) fn idx(&self, (x, y): Point) -> usize {
        y as usize * self.size as usize + x as usize
    }
}

/// One row per line, `B`/`W` for stones and `+` for empty points.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size as usize) {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
