use super::snake::Snake;
use super::types::{BoardSize, Cell, DeathReason};

pub fn check_collision(
    candidate_head: Cell,
    snake: &Snake,
    board_size: BoardSize,
    tail_vacates: bool,
) -> Option<DeathReason> {
    if !board_size.contains(candidate_head) {
        return Some(DeathReason::WallCollision);
    }

    // A tail that moves away this tick frees its cell.
    if snake.contains(&candidate_head) && !(tail_vacates && candidate_head == snake.tail()) {
        return Some(DeathReason::SelfCollision);
    }

    None
}
