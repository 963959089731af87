/// A position on the game field
///
/// (0,0) is the top-left corner,
/// x increases to the right, y increases downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn moved(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Clamps the position into `0..width` x `0..height`.
    ///
    /// The player never wraps or leaves the field; walking into an edge
    /// leaves it pinned on that edge.
    pub fn clamped(&self, width: u32, height: u32) -> Self {
        Self {
            x: self.x.clamp(0, width as i32 - 1),
            y: self.y.clamp(0, height as i32 - 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// State of a single field cell.
///
/// `Scratch` is a transient marker owned by the capture sweep; it never
/// survives past a completed `run_capture` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Uncaptured open sea; free enemies roam here, the player lays track here
    Water,
    /// Captured ground, including the permanent border margin
    Land,
    /// The player's in-progress trail across water
    Track,
    /// Flood-fill visit marker, internal to the capture algorithm
    Scratch,
}

pub struct Field {
    /// Width of the field in cells
    width: u32,
    /// Height of the field in cells
    height: u32,
    /// Border margin that is always `Land`
    margin: u32,
    cells: Vec<CellState>,
    /// Interior water cell count right after a reset
    water_baseline: u32,
    /// Water cells remaining; updated only by `reset` and the capture sweep
    water_count: u32,
}

impl Field {
    pub fn new(width: u32, height: u32, margin: u32) -> Self {
        // Clamp the margin so even a tiny field keeps a nonempty
        // interior; otherwise the baseline arithmetic in `reset`
        // underflows.
        let margin = margin
            .min(width.saturating_sub(1) / 2)
            .min(height.saturating_sub(1) / 2);
        let mut field = Self {
            width,
            height,
            margin,
            cells: vec![CellState::Water; (width * height) as usize],
            water_baseline: 0,
            water_count: 0,
        };
        field.reset();
        field
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: &GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn pos_to_index(&self, pos: &GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.y as u32 * self.width + pos.x as u32) as usize)
        } else {
            None
        }
    }

    /// Returns the state of the cell at `pos`.
    ///
    /// Out-of-bounds reads answer `Water`, so neighbor look-ups past the
    /// field edge behave like an infinite sea. Bounded enemies rely on
    /// this to bounce off the outer edge of the border.
    pub fn cell(&self, pos: &GridPos) -> CellState {
        self.pos_to_index(pos)
            .map(|idx| self.cells[idx])
            .unwrap_or(CellState::Water)
    }

    /// Writes the cell at `pos`; out-of-bounds writes are dropped.
    pub fn set_cell(&mut self, pos: &GridPos, state: CellState) {
        if let Some(idx) = self.pos_to_index(pos) {
            self.cells[idx] = state;
        }
    }

    /// Resets every cell: the border margin becomes `Land`, the interior
    /// `Water`, and the water baseline for the capture percentage is
    /// recomputed. Called at game start and on every level-up.
    pub fn reset(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let border = x < self.margin
                    || x >= self.width - self.margin
                    || y < self.margin
                    || y >= self.height - self.margin;
                let idx = (y * self.width + x) as usize;
                self.cells[idx] = if border {
                    CellState::Land
                } else {
                    CellState::Water
                };
            }
        }
        self.water_baseline = (self.width - 2 * self.margin) * (self.height - 2 * self.margin);
        self.water_count = self.water_baseline;
    }

    /// Reverts every `Track` cell to `Water`, abandoning the player's
    /// trail after a fatal collision. The water count is left alone:
    /// the capture percentage only moves on a completed fill or a reset.
    pub fn clear_track(&mut self) {
        for cell in &mut self.cells {
            if *cell == CellState::Track {
                *cell = CellState::Water;
            }
        }
    }

    /// Percentage of the initial water area captured so far, rounded for
    /// display and for the level-up threshold check.
    pub fn capture_percent(&self) -> u32 {
        let remaining = self.water_count as f32 / self.water_baseline as f32;
        (100.0 - remaining * 100.0).round() as u32
    }

    pub fn water_count(&self) -> u32 {
        self.water_count
    }

    /// Recounts `Water` cells into the running water count. Only the
    /// capture sweep calls this; see `systems::run_capture`.
    pub(crate) fn recount_water(&mut self) {
        self.water_count = self
            .cells
            .iter()
            .filter(|&&c| c == CellState::Water)
            .count() as u32;
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("water_count", &self.water_count)
            .field("capture_percent", &self.capture_percent())
            .finish()
    }
}

/// The player-controlled line-drawing agent.
#[derive(Debug, Clone)]
pub struct Xonix {
    /// Current position on the field
    pub position: GridPos,
    /// Latched movement direction, applied on every move until changed
    pub direction: Direction,
    /// Whether the agent is currently out on open water laying track
    pub on_water: bool,
    /// Set by the last move if it stepped onto the agent's own trail
    pub self_crossed: bool,
    /// Lives remaining; the game ends at zero
    pub lives: u32,
    /// Current level, starting at 1
    pub level: u32,
}

impl Xonix {
    pub fn new(field_width: u32, lives: u32) -> Self {
        Self {
            position: Self::spawn_position(field_width),
            direction: Direction::None,
            on_water: false,
            self_crossed: false,
            lives,
            level: 1,
        }
    }

    /// Fixed spawn cell: top-center of the border.
    pub fn spawn_position(field_width: u32) -> GridPos {
        GridPos::new(field_width as i32 / 2, 0)
    }

    /// Puts the agent back on its spawn cell with no direction and no
    /// trail state. Lives and level are untouched; called after a life
    /// loss and after a level-up.
    pub fn reset_for_new_attempt(&mut self, field_width: u32) {
        self.position = Self::spawn_position(field_width);
        self.direction = Direction::None;
        self.on_water = false;
        self.self_crossed = false;
    }

    pub fn lose_life(&mut self) {
        self.lives -= 1;
    }

    pub fn level_up(&mut self) {
        self.level += 1;
    }
}

/// Which region an enemy is confined to; the only behavioral difference
/// between the two kinds is which cell state repels them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    /// Free-roaming "ball": bounces off `Land`, lives on the open sea
    Ball,
    /// Bounded "cube": bounces off `Water`, lives on captured ground
    Cube,
}

impl EnemyKind {
    /// The cell state this kind bounces off.
    pub fn repellent(&self) -> CellState {
        match self {
            EnemyKind::Ball => CellState::Land,
            EnemyKind::Cube => CellState::Water,
        }
    }
}

/// A bouncing enemy agent. Velocity components are always ±1.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub position: GridPos,
    pub velocity: (i32, i32),
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn ball(position: GridPos, velocity: (i32, i32)) -> Self {
        Self {
            position,
            velocity,
            kind: EnemyKind::Ball,
        }
    }

    /// Cubes always enter at the same border cell with the same heading.
    pub fn cube() -> Self {
        Self {
            position: GridPos::new(1, 1),
            velocity: (1, -1),
            kind: EnemyKind::Cube,
        }
    }
}

/// The round lifecycle. `Respawning` and `LevelingUp` are short
/// countdown pauses before play resumes; `GameOver` is terminal.
/// Pausing is an orthogonal suspend flag, not a state here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Playing,
    Respawning,
    LevelingUp,
    GameOver,
}
