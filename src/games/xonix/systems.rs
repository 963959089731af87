use super::state::{CellState, Direction, Enemy, EnemyKind, Field, GridPos, Xonix};
use crate::game::traits::GameError;
use rand::Rng;

#[derive(Debug, Default)]
pub struct PlayerMoveOutcome {
    /// Cells converted to `Land` by a capture this move (0 if no loop closed)
    pub cells_captured: usize,
}

/// Advances the player one step in its latched direction.
///
/// Step order matters and is load-bearing: clamp, self-cross test,
/// loop-close capture, then trail extension. `ball_positions` seed the
/// capture flood when a loop closes.
pub fn move_player(
    player: &mut Xonix,
    field: &mut Field,
    ball_positions: &[GridPos],
) -> PlayerMoveOutcome {
    let mut outcome = PlayerMoveOutcome::default();

    let next = player
        .position
        .moved(player.direction)
        .clamped(field.width(), field.height());
    player.position = next;

    // Fatal if this step landed on the agent's own trail
    player.self_crossed = field.cell(&next) == CellState::Track;

    if field.cell(&next) == CellState::Land && player.on_water {
        // Loop closed: back on captured ground after a water crossing
        player.direction = Direction::None;
        player.on_water = false;
        outcome.cells_captured = run_capture(field, ball_positions);
    }

    if field.cell(&next) == CellState::Water {
        player.on_water = true;
        field.set_cell(&next, CellState::Track);
    }

    outcome
}

pub fn set_player_direction(player: &mut Xonix, direction: Direction) -> Result<(), GameError> {
    if direction == Direction::None {
        return Err(GameError::InvalidInput(
            "direction request must name an axis".to_string(),
        ));
    }

    player.direction = direction;
    Ok(())
}

/// Per-axis look-ahead bounce shared by `move_enemy` and
/// `enemy_would_collide`: a velocity component flips when the adjacent
/// cell on its axis is the kind's repelling state.
fn bounced_velocity(enemy: &Enemy, field: &Field) -> (i32, i32) {
    let (mut dx, mut dy) = enemy.velocity;
    let repellent = enemy.kind.repellent();

    if field.cell(&enemy.position.offset(dx, 0)) == repellent {
        dx = -dx;
    }
    if field.cell(&enemy.position.offset(0, dy)) == repellent {
        dy = -dy;
    }
    (dx, dy)
}

/// Applies the bounce, then one diagonal step. The bounce decision and
/// the step are committed together; nothing re-evaluates mid-tick.
pub fn move_enemy(enemy: &mut Enemy, field: &Field) {
    let (dx, dy) = bounced_velocity(enemy, field);
    enemy.velocity = (dx, dy);
    enemy.position = enemy.position.offset(dx, dy);
}

/// One-tick-ahead terminal check, using the same look-ahead as
/// `move_enemy`: true when the enemy's next cell is the player's trail
/// (balls only) or the player itself (both kinds).
pub fn enemy_would_collide(enemy: &Enemy, field: &Field, player_pos: GridPos) -> bool {
    let (dx, dy) = bounced_velocity(enemy, field);
    let next = enemy.position.offset(dx, dy);

    if enemy.kind == EnemyKind::Ball && field.cell(&next) == CellState::Track {
        return true;
    }
    next == player_pos
}

/// Territory capture: every water region a ball cannot reach becomes
/// `Land`, and the whole trail is committed to `Land` with it; only the
/// water 8-connected to a ball survives.
///
/// `Track` blocks the flood: that is what makes a closed trail enclose
/// anything. Two phases so the result cannot depend on seed or cell
/// iteration order: first mark everything reachable from the seeds
/// `Scratch` (explicit work stack; the field is too large for
/// recursion), then sweep unmarked `Water`/`Track` to `Land` and marked
/// cells back to `Water`. Returns the number of cells captured.
pub fn run_capture(field: &mut Field, seeds: &[GridPos]) -> usize {
    let mut stack: Vec<GridPos> = Vec::new();

    for seed in seeds {
        if field.cell(seed) == CellState::Water {
            field.set_cell(seed, CellState::Scratch);
            stack.push(*seed);
        }
        while let Some(pos) = stack.pop() {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let neighbor = pos.offset(dx, dy);
                    if field.in_bounds(&neighbor) && field.cell(&neighbor) == CellState::Water {
                        field.set_cell(&neighbor, CellState::Scratch);
                        stack.push(neighbor);
                    }
                }
            }
        }
    }

    let (width, height) = field.dimensions();
    let mut captured = 0;
    for y in 0..height {
        for x in 0..width {
            let pos = GridPos::new(x as i32, y as i32);
            match field.cell(&pos) {
                CellState::Water | CellState::Track => {
                    field.set_cell(&pos, CellState::Land);
                    captured += 1;
                }
                CellState::Scratch => field.set_cell(&pos, CellState::Water),
                CellState::Land => {}
            }
        }
    }
    field.recount_water();

    tracing::debug!(
        "Capture swept {} cells, {} water remaining ({}%)",
        captured,
        field.water_count(),
        field.capture_percent()
    );

    captured
}

/// Spawns a free-roaming ball on a random `Water` cell with a random
/// diagonal heading. The caller guarantees open water exists (a fresh
/// or sub-threshold field always has some).
pub fn spawn_ball(field: &Field, rng: &mut impl Rng) -> Enemy {
    let (width, height) = field.dimensions();

    let position = loop {
        let pos = GridPos::new(
            rng.gen_range(0..width as i32),
            rng.gen_range(0..height as i32),
        );
        if field.cell(&pos) == CellState::Water {
            break pos;
        }
    };

    let dx = if rng.gen_bool(0.5) { 1 } else { -1 };
    let dy = if rng.gen_bool(0.5) { 1 } else { -1 };
    Enemy::ball(position, (dx, dy))
}
