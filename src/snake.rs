use std::collections::{HashSet, VecDeque};

use crate::Coords;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// (row, col) offset of a single step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn shift(self, pos: Coords) -> Coords {
        let (dr, dc) = self.delta();
        (pos.0 + dr, pos.1 + dc)
    }
}

/// The snake body, head first. `cells` mirrors `body` so membership
/// checks don't rescan the whole body.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Coords>,
    cells: HashSet<Coords>,
    direction: Direction,
}

impl Snake {
    /// Lays out `size` segments in a straight line trailing behind `head`.
    pub fn new(head: Coords, size: usize, direction: Direction) -> Self {
        let back = direction.opposite();
        let mut pos = head;
        let mut segments = Vec::with_capacity(size.max(1));

        for _ in 0..size.max(1) {
            segments.push(pos);
            pos = back.shift(pos);
        }

        Snake::from_segments(segments, direction)
    }

    /// Builds a snake from explicit segments, head first. Duplicated cells
    /// are dropped so the body stays self-disjoint.
    pub fn from_segments<I>(segments: I, direction: Direction) -> Self
    where
        I: IntoIterator<Item = Coords>,
    {
        let mut body = VecDeque::new();
        let mut cells = HashSet::new();

        for pos in segments {
            if cells.insert(pos) {
                body.push_back(pos);
            }
        }

        assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { body, cells, direction }
    }

    pub fn body(&self) -> impl Iterator<Item = &Coords> + '_ {
        self.body.iter()
    }

    pub fn segments(&self) -> Vec<Coords> {
        self.body.iter().copied().collect()
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.cells.contains(pos)
    }

    /// Last direction actually applied on a tick.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Where the head would land moving along `direction`.
    pub fn next_head(&self, direction: Direction) -> Coords {
        direction.shift(self.head())
    }

    /// Pushes `new_head` and, unless growing, pops the tail. Returns the
    /// vacated tail cell, if any. The caller has already checked that
    /// `new_head` is free.
    pub fn advance(&mut self, new_head: Coords, direction: Direction, grow: bool) -> Option<Coords> {
        self.body.push_front(new_head);
        self.cells.insert(new_head);
        self.direction = direction;

        if grow {
            None
        } else {
            let old_tail = self.body.pop_back();
            if let Some(tail) = old_tail {
                self.cells.remove(&tail);
            }
            old_tail
        }
    }
}
