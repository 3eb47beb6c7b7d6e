use core::fmt;
use core::str::FromStr;
use rand::Rng;

use crate::*;

/// Opaque identifier of a game session, rendered in the usual UUID layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u128);

impl SessionId {
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    /// Random version 4 identifier.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bits: u128 = rng.random();
        let bits = (bits & !(0xf_u128 << 76)) | (0x4_u128 << 76);
        let bits = (bits & !(0x3_u128 << 62)) | (0x2_u128 << 62);
        Self(bits)
    }

    pub const fn as_u128(self) -> u128 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.0;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            bits >> 96,
            (bits >> 80) & 0xffff,
            (bits >> 64) & 0xffff,
            (bits >> 48) & 0xffff,
            bits & 0xffff_ffff_ffff,
        )
    }
}

impl FromStr for SessionId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

        let mut bits = 0u128;
        let mut groups = s.split('-');
        for len in GROUPS {
            let group = groups.next().ok_or(GameError::InvalidSessionId)?;
            if group.len() != len || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(GameError::InvalidSessionId);
            }
            let value =
                u128::from_str_radix(group, 16).map_err(|_| GameError::InvalidSessionId)?;
            bits = (bits << (4 * len)) | value;
        }
        if groups.next().is_some() {
            return Err(GameError::InvalidSessionId);
        }
        Ok(Self(bits))
    }
}

/// Valid transitions:
/// - Created -> InProgress
/// - Created -> Won (first move clears the board)
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Mines not placed yet
    #[default]
    Created,
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_created(self) -> bool {
        matches!(self, Self::Created)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from creation to a win or a loss; owns its grid exclusively.
///
/// Moves consume the session and hand back the updated one, there is no locking in here. Callers must make sure
/// only one move per session id is in flight at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    id: SessionId,
    config: GameConfig,
    grid: Grid,
    state: SessionState,
}

impl GameSession {
    pub fn new(id: SessionId, width: i32, height: i32, mine_count: i32) -> Result<Self> {
        let config = GameConfig::new(width, height, mine_count)?;
        log::debug!(
            "Created game {} ({}x{}, {} mines)",
            id,
            config.width,
            config.height,
            config.mines
        );
        Ok(Self {
            id,
            config,
            grid: Grid::with_size(config.size()),
            state: SessionState::Created,
        })
    }

    /// Session with a known layout, skipping the lazy placement of the first move.
    pub fn from_mine_coords(
        id: SessionId,
        width: i32,
        height: i32,
        mine_coords: &[Coord2],
    ) -> Result<Self> {
        let mine_count = i32::try_from(mine_coords.len()).map_err(|_| GameError::InvalidMineCount)?;
        let config = GameConfig::new(width, height, mine_count)?;
        let mut grid = Grid::with_size(config.size());
        for &coords in mine_coords {
            if grid.get(coords)? == Cell::HiddenMine {
                return Err(GameError::InvalidMineCount);
            }
            grid[coords] = Cell::HiddenMine;
        }

        Ok(Self {
            id,
            config,
            grid,
            state: SessionState::InProgress,
        })
    }

    /// Rebuilds a session from stored parts, checking they describe a reachable game.
    pub fn from_parts(
        id: SessionId,
        config: GameConfig,
        grid: Grid,
        mines_placed: bool,
        completed: bool,
    ) -> Result<Self> {
        if grid.size() != config.size() {
            return Err(GameError::InvalidBoardShape);
        }

        let state = if !mines_placed {
            // a finished game always has its mines
            if completed || grid.iter().any(|(_, cell)| cell != Cell::Hidden) {
                return Err(GameError::InvalidBoardShape);
            }
            SessionState::Created
        } else {
            if grid.mine_count() != config.mines {
                return Err(GameError::InvalidMineCount);
            }
            let exploded = grid.count_cells(|cell| cell == Cell::ExplodedMine);
            let hidden_mines = grid.count_cells(|cell| cell == Cell::HiddenMine);
            let shown_mines = grid.count_cells(|cell| cell == Cell::RevealedMineOnWin);
            match (completed, exploded) {
                (false, 0) if shown_mines == 0 => SessionState::InProgress,
                (true, 0) if hidden_mines == 0 && grid.is_won() => SessionState::Won,
                (true, 1) if shown_mines == 0 => SessionState::Lost,
                _ => return Err(GameError::InvalidBoardShape),
            }
        };

        Ok(Self {
            id,
            config,
            grid,
            state,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn completed(&self) -> bool {
        self.state.is_finished()
    }

    pub fn mines_placed(&self) -> bool {
        !self.state.is_created()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.grid.get(coords)
    }

    /// Plays one move at `(row, col)`, placing mines first if this is the first move.
    pub fn make_move(mut self, row: i32, col: i32, placer: impl MinePlacer) -> Result<Self> {
        if self.state.is_finished() {
            return Err(GameError::GameAlreadyCompleted);
        }
        let coords = self.grid.validate_coords(row, col)?;
        if !self.grid[coords].is_hidden() {
            return Err(GameError::CellAlreadyRevealed);
        }

        if self.state.is_created() {
            placer.place(&mut self.grid, self.config.mines, coords)?;
            self.state = SessionState::InProgress;
        }

        match self.grid.reveal(coords)? {
            RevealOutcome::Revealed => {}
            RevealOutcome::HitMine => self.state = SessionState::Lost,
            RevealOutcome::Won => self.state = SessionState::Won,
        }
        log::debug!("Game {} move {:?}: {:?}", self.id, coords, self.state);
        Ok(self)
    }
}

/// Starts a new game; the caller is responsible for persisting it.
///
/// The engine accepts any width and height up to `Coord::MAX` (255). Tighter limits, such as the 30x30 cap of the
/// service, are for the caller to apply.
pub fn create_game(id: SessionId, width: i32, height: i32, mine_count: i32) -> Result<GameSession> {
    GameSession::new(id, width, height, mine_count)
}

/// Applies one move; the caller persists the result, or deletes it once completed.
pub fn make_move(
    session: GameSession,
    row: i32,
    col: i32,
    placer: impl MinePlacer,
) -> Result<GameSession> {
    session.make_move(row, col, placer)
}
