use std::fmt;
use std::str::FromStr;

pub const MIN_BOARD_SIZE: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardSize(u32);

impl BoardSize {
    pub fn new(size: u32) -> Result<Self, String> {
        if size < MIN_BOARD_SIZE {
            return Err(format!(
                "Board size must be at least {}, got {}",
                MIN_BOARD_SIZE, size
            ));
        }
        Ok(Self(size))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn cell_count(&self) -> usize {
        (self.0 as usize) * (self.0 as usize)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        in_bounds(cell, *self)
    }
}

pub fn in_bounds(cell: Cell, board_size: BoardSize) -> bool {
    let size = board_size.get() as i64;
    (0..size).contains(&(cell.x as i64)) && (0..size).contains(&(cell.y as i64))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            other => Err(format!("Unknown direction: {}", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

impl fmt::Display for DeathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeathReason::WallCollision => write!(f, "hit the wall"),
            DeathReason::SelfCollision => write!(f, "bit its own tail"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_size_rejects_degenerate_boards() {
        assert!(BoardSize::new(4).is_err());
        assert!(BoardSize::new(0).is_err());
        assert_eq!(BoardSize::new(5).unwrap().get(), 5);
    }

    #[test]
    fn test_in_bounds_edges() {
        let board = BoardSize::new(20).unwrap();
        assert!(in_bounds(Cell::new(0, 0), board));
        assert!(in_bounds(Cell::new(19, 19), board));
        assert!(!in_bounds(Cell::new(-1, 0), board));
        assert!(!in_bounds(Cell::new(0, -1), board));
        assert!(!in_bounds(Cell::new(20, 5), board));
        assert!(!in_bounds(Cell::new(5, 20), board));
    }

    #[test]
    fn test_opposites() {
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        for direction in Direction::ALL {
            assert!(!direction.is_opposite(&direction));
        }
    }

    #[test]
    fn test_offset_moves_one_unit() {
        let cell = Cell::new(3, 3);
        assert_eq!(cell.offset(Direction::Up), Cell::new(3, 2));
        assert_eq!(cell.offset(Direction::Down), Cell::new(3, 4));
        assert_eq!(cell.offset(Direction::Left), Cell::new(2, 3));
        assert_eq!(cell.offset(Direction::Right), Cell::new(4, 3));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("W".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!(" right ".parse::<Direction>(), Ok(Direction::Right));
        assert!("north".parse::<Direction>().is_err());
    }
}
