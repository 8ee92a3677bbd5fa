use crate::games::snake::Direction;

#[derive(Debug, Default)]
pub struct DirectionBuffer {
    pending: Option<Direction>,
}

impl DirectionBuffer {
    pub fn offer(&mut self, direction: Direction, heading: Direction) -> bool {
        if direction.is_opposite(&heading) {
            return false;
        }
        self.pending = Some(direction);
        true
    }

    pub fn take(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<Direction> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
