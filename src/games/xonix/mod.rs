pub mod config;
pub mod state;
pub mod systems;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::game::traits::{Game, GameError, TickResult};

pub use config::XonixConfig;
pub use state::{CellState, Direction, Enemy, EnemyKind, Field, GridPos, RoundState, Xonix};

/// The whole simulation session: field, player, enemy collections,
/// round state machine and RNG, owned as one value. `tick` is the only
/// mutator; collaborators read snapshots between ticks.
pub struct XonixGame {
    field: Field,
    player: Xonix,
    balls: Vec<Enemy>,
    cubes: Vec<Enemy>,
    round_state: RoundState,
    /// Orthogonal suspend flag; freezes ticks without touching the state machine
    paused: bool,
    /// Round countdown in seconds; expiry spawns a cube
    timer: f32,
    /// Remaining pause in `Respawning`/`LevelingUp`, in seconds
    state_delay: f32,
    config: XonixConfig,
    rng: StdRng,
    /// Completed simulation steps
    ticks: u64,
}

impl XonixGame {
    pub fn new() -> Self {
        Self::with_config(XonixConfig::default())
    }

    pub fn with_config(config: XonixConfig) -> Self {
        let field = Field::new(config.field_width, config.field_height, config.border_margin);
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ball = systems::spawn_ball(&field, &mut rng);

        Self {
            player: Xonix::new(config.field_width, config.starting_lives),
            balls: vec![ball],
            cubes: vec![Enemy::cube()],
            round_state: RoundState::Playing,
            paused: false,
            timer: config.round_seconds,
            state_delay: 0.0,
            field,
            config,
            rng,
            ticks: 0,
        }
    }

    /// Latches a movement direction for the player's next move, or
    /// reports why the request cannot apply right now.
    pub fn try_request_direction(&mut self, direction: Direction) -> Result<(), GameError> {
        if self.paused {
            return Err(GameError::InvalidState("game is paused".to_string()));
        }
        if self.round_state != RoundState::Playing {
            return Err(GameError::InvalidState(format!(
                "round is {:?}",
                self.round_state
            )));
        }

        systems::set_player_direction(&mut self.player, direction)
    }

    /// Latches a movement direction for the player's next move.
    /// Ignored (with a debug log, never an error to the caller) unless
    /// the round is actively playing.
    pub fn request_direction(&mut self, direction: Direction) {
        if let Err(e) = self.try_request_direction(direction) {
            tracing::debug!("Ignoring direction request ({:?}): {}", direction, e);
        }
    }

    /// Flips the suspend flag. A paused game ignores ticks entirely,
    /// round timer included.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        tracing::info!("Game {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Advances the simulation by `dt` seconds: at most one complete,
    /// atomic simulation step, or a slice of a respawn/level-up pause.
    pub fn tick(&mut self, dt: f32) -> TickResult {
        let mut result = TickResult::default();

        if self.paused {
            return result;
        }

        match self.round_state {
            RoundState::GameOver => return result,
            RoundState::Respawning | RoundState::LevelingUp => {
                self.state_delay -= dt;
                if self.state_delay <= 0.0 {
                    self.round_state = RoundState::Playing;
                }
                return result;
            }
            RoundState::Playing => {}
        }

        self.ticks += 1;
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.timer = self.config.round_seconds;
            self.cubes.push(Enemy::cube());
            result.cube_spawned = true;
            tracing::info!("Round timer expired, cube #{} deployed", self.cubes.len());
        }

        // Player first, then every enemy, strictly in that order
        let ball_positions: Vec<GridPos> = self.balls.iter().map(|b| b.position).collect();
        let outcome = systems::move_player(&mut self.player, &mut self.field, &ball_positions);
        result.cells_captured = outcome.cells_captured;
        if outcome.cells_captured > 0 {
            tracing::info!(
                "Captured {} cells, field {}% taken",
                outcome.cells_captured,
                self.field.capture_percent()
            );
        }

        for ball in &mut self.balls {
            systems::move_enemy(ball, &self.field);
        }
        for cube in &mut self.cubes {
            systems::move_enemy(cube, &self.field);
        }

        let player_pos = self.player.position;
        let hit = self.player.self_crossed
            || self
                .balls
                .iter()
                .any(|b| systems::enemy_would_collide(b, &self.field, player_pos))
            || self
                .cubes
                .iter()
                .any(|c| systems::enemy_would_collide(c, &self.field, player_pos));

        if hit {
            self.timer = self.config.round_seconds;
            self.player.lose_life();
            result.life_lost = true;

            if self.player.lives > 0 {
                self.field.clear_track();
                self.player.reset_for_new_attempt(self.field.width());
                self.round_state = RoundState::Respawning;
                self.state_delay = self.config.respawn_delay_seconds;
                tracing::info!("Life lost, {} remaining", self.player.lives);
            } else {
                self.round_state = RoundState::GameOver;
                result.game_over = true;
                tracing::info!("Game over at level {}", self.player.level);
            }
        } else if self.field.capture_percent() >= self.config.capture_threshold_percent {
            self.timer = self.config.round_seconds;
            self.player.level_up();
            self.field.reset();
            self.player.reset_for_new_attempt(self.field.width());
            let ball = systems::spawn_ball(&self.field, &mut self.rng);
            self.balls.push(ball);
            self.round_state = RoundState::LevelingUp;
            self.state_delay = self.config.levelup_delay_seconds;
            result.leveled_up = true;
            tracing::info!(
                "Level {} reached, {} balls in play",
                self.player.level,
                self.balls.len()
            );
        }

        result
    }

    pub fn current_tick(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &XonixConfig {
        &self.config
    }

    // Read-only snapshot queries for rendering/UI collaborators.

    pub fn field_dimensions(&self) -> (u32, u32) {
        self.field.dimensions()
    }

    pub fn cell_state(&self, x: i32, y: i32) -> CellState {
        self.field.cell(&GridPos::new(x, y))
    }

    pub fn capture_percent(&self) -> u32 {
        self.field.capture_percent()
    }

    pub fn player_position(&self) -> GridPos {
        self.player.position
    }

    pub fn lives(&self) -> u32 {
        self.player.lives
    }

    pub fn level(&self) -> u32 {
        self.player.level
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.balls.iter().chain(self.cubes.iter())
    }

    /// Timer value rounded for display.
    pub fn remaining_seconds(&self) -> u32 {
        self.timer.max(0.0).round() as u32
    }

    pub fn round_state(&self) -> RoundState {
        self.round_state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for XonixGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for XonixGame {
    fn tick(&mut self, dt_seconds: f32) -> TickResult {
        XonixGame::tick(self, dt_seconds)
    }

    fn tick_rate(&self) -> std::time::Duration {
        self.config.tick_duration()
    }

    fn is_game_over(&self) -> bool {
        self.round_state == RoundState::GameOver
    }
}
