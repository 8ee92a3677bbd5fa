use std::collections::{HashSet, VecDeque};

use super::types::{BoardSize, Cell, Direction};

pub const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    body_set: HashSet<Cell>,
}

impl Snake {
    pub fn from_segments(segments: Vec<Cell>) -> Result<Self, String> {
        if segments.is_empty() {
            return Err("Snake must have at least one segment".to_string());
        }

        let mut body = VecDeque::with_capacity(segments.len());
        let mut body_set = HashSet::with_capacity(segments.len());
        for segment in segments {
            if !body_set.insert(segment) {
                return Err(format!("Snake segment {} appears twice", segment));
            }
            body.push_back(segment);
        }

        Ok(Self { body, body_set })
    }

    pub fn spawn(board_size: BoardSize) -> Self {
        let center = (board_size.get() / 2) as i32;
        let mut body = VecDeque::with_capacity(INITIAL_SNAKE_LENGTH);
        let mut body_set = HashSet::with_capacity(INITIAL_SNAKE_LENGTH);
        for i in 0..INITIAL_SNAKE_LENGTH as i32 {
            let segment = Cell::new(center - i, center);
            body.push_back(segment);
            body_set.insert(segment);
        }
        Self { body, body_set }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.body_set.contains(cell)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn occupied(&self) -> &HashSet<Cell> {
        &self.body_set
    }

    pub fn advance(&self, direction: Direction) -> Cell {
        self.head().offset(direction)
    }

    pub fn grow(&mut self, new_head: Cell) {
        self.body.push_front(new_head);
        self.body_set.insert(new_head);
    }

    pub fn move_to(&mut self, new_head: Cell) {
        // Tail goes first so a head entering the vacated cell stays in body_set.
        if let Some(tail) = self.body.pop_back() {
            self.body_set.remove(&tail);
        }
        self.body.push_front(new_head);
        self.body_set.insert(new_head);
    }
}
