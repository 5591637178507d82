use std::fmt;

use serde::Serialize;

use crate::Point;
use crate::board::Board;
use crate::stone::{Cell, Stone};

/// Area score for both players: stones on the board plus empty regions
/// bordered by that color alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    /// The leading color, or `None` on a tie.
    pub fn winner(&self) -> Option<Stone> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Stone::Black),
            std::cmp::Ordering::Less => Some(Stone::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn margin(&self) -> u32 {
        self.black.abs_diff(self.white)
    }

    /// Result in SGF form: "B+{margin}", "W+{margin}", or "Draw".
    pub fn result(&self) -> String {
        match self.winner() {
            Some(stone) => format!("{}+{}", stone.letter(), self.margin()),
            None => "Draw".to_string(),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(stone) => write!(f, "{stone} wins, by {}", self.margin()),
            None => write!(f, "Tie game."),
        }
    }
}

/// A maximal 4-connected group of empty points and the colors touching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EmptyRegion {
    pub points: Vec<Point>,
    pub borders_black: bool,
    pub borders_white: bool,
}

impl EmptyRegion {
    /// The color that alone borders this region. Dame and untouched regions
    /// belong to nobody.
    pub fn owner(&self) -> Option<Stone> {
        match (self.borders_black, self.borders_white) {
            (true, false) => Some(Stone::Black),
            (false, true) => Some(Stone::White),
            _ => None,
        }
    }
}

impl Board {
    /// Chinese-style area score of the current position. Never mutates the
    /// board.
    pub fn score(&self) -> Score {
        if self.is_empty() {
            return Score::default();
        }

        let mut score = Score {
            black: self.stone_count(Stone::Black),
            white: self.stone_count(Stone::White),
        };
        for region in self.empty_regions() {
            match region.owner() {
                Some(Stone::Black) => score.black += region.points.len() as u32,
                Some(Stone::White) => score.white += region.points.len() as u32,
                None => {}
            }
        }
        score
    }

    /// Area owner of every point, laid out like [`Board::cells`].
    ///
    /// Stones own their own point, empty points take the owner of their
    /// region, dame is `None`.
    pub fn ownership(&self) -> Vec<Option<Stone>> {
        let mut ownership: Vec<Option<Stone>> = self.cells().iter().map(|c| c.stone()).collect();
        for region in self.empty_regions() {
            let owner = region.owner();
            for &p in &region.points {
                ownership[self.idx(p)] = owner;
            }
        }
        ownership
    }

    /// Partition all empty points into regions in a single pass.
    pub(crate) fn empty_regions(&self) -> Vec<EmptyRegion> {
        let size = self.size();
        let mut visited = vec![false; self.cells().len()];
        let mut regions = Vec::new();

        for y in 0..size {
            for x in 0..size {
                let idx = self.idx((x, y));
                if visited[idx] || !self.cells()[idx].is_empty() {
                    continue;
                }

                let mut region = EmptyRegion {
                    points: Vec::new(),
                    borders_black: false,
                    borders_white: false,
                };
                let mut stack = vec![(x, y)];

                while let Some(p) = stack.pop() {
                    let pi = self.idx(p);
                    if visited[pi] {
                        continue;
                    }
                    visited[pi] = true;
                    region.points.push(p);

                    for n in self.neighbors(p) {
                        let ni = self.idx(n);
                        match self.cells()[ni] {
                            Cell::Empty if !visited[ni] => stack.push(n),
                            Cell::Empty => {}
                            Cell::Black => region.borders_black = true,
                            Cell::White => region.borders_white = true,
                        }
                    }
                }

                regions.push(region);
            }
        }

        regions
    }
}
