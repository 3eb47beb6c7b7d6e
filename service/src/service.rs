use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sapper_core::*;

use crate::{Result, SessionStore, Settings};

/// Runs games on top of a [`SessionStore`]: creates them, applies moves, and drops them once they end.
///
/// Every move is a load, a pure engine update, and a save. The service assumes at most one move per session id is
/// in flight; two services sharing a store must coordinate per id themselves or they can lose updates.
#[derive(Debug)]
pub struct GameService<S> {
    store: S,
    settings: Settings,
    rng: SmallRng,
}

impl<S: SessionStore> GameService<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            store,
            settings,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn create_game(&mut self, width: i32, height: i32, mine_count: i32) -> Result<GameSession> {
        if width > i32::from(self.settings.max_width)
            || height > i32::from(self.settings.max_height)
        {
            log::warn!(
                "Rejected {}x{} board, limit is {}x{}",
                width,
                height,
                self.settings.max_width,
                self.settings.max_height
            );
            return Err(GameError::InvalidDimensions.into());
        }

        let id = SessionId::random(&mut self.rng);
        let session = create_game(id, width, height, mine_count)?;
        let session = self.store.save(&session)?;
        log::info!(
            "Created game {} ({}x{}, {} mines)",
            id,
            width,
            height,
            mine_count
        );
        Ok(session)
    }

    /// Plays `(row, col)` in game `id`; a finished game is deleted right after its final state is saved.
    pub fn make_move(&mut self, id: SessionId, row: i32, col: i32) -> Result<GameSession> {
        let session = self.store.load(&id)?;
        let placer = RandomMinePlacer::new(self.rng.random());
        let session = make_move(session, row, col, placer).inspect_err(|err| {
            log::warn!("Rejected move ({}, {}) in game {}: {}", row, col, id, err);
        })?;

        let session = self.store.save(&session)?;
        if session.completed() {
            self.store.delete(&id)?;
            log::info!("Game {} ended: {:?}", id, session.state());
        }
        Ok(session)
    }

    pub fn game(&self, id: SessionId) -> Result<GameSession> {
        Ok(self.store.load(&id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, ServiceError};

    fn service() -> GameService<MemoryStore> {
        GameService::new(MemoryStore::new(), Settings::default().with_seed(11))
    }

    fn find_cell(session: &GameSession, wanted: Cell) -> Coord2 {
        session
            .grid()
            .iter()
            .find(|&(_, cell)| cell == wanted)
            .map(|(coords, _)| coords)
            .unwrap()
    }

    #[test]
    fn create_game_persists_a_fresh_session() {
        let mut service = service();

        let session = service.create_game(10, 10, 10).unwrap();

        assert_eq!(session.state(), SessionState::Created);
        assert_eq!(service.store().len().unwrap(), 1);
        assert_eq!(service.game(session.id()).unwrap(), session);
    }

    #[test]
    fn create_game_enforces_board_limits() {
        let mut service = service();

        assert!(matches!(
            service.create_game(31, 10, 10),
            Err(ServiceError::Game(GameError::InvalidDimensions))
        ));
        assert!(matches!(
            service.create_game(0, 5, 1),
            Err(ServiceError::Game(GameError::InvalidDimensions))
        ));
        assert!(matches!(
            service.create_game(5, 5, 25),
            Err(ServiceError::Game(GameError::InvalidMineCount))
        ));
        assert!(service.store().is_empty().unwrap());
    }

    #[test]
    fn first_move_is_safe_and_saved() {
        let mut service = service();
        let id = service.create_game(3, 3, 1).unwrap().id();

        let session = service.make_move(id, 1, 1).unwrap();

        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.cell_at((1, 1)), Ok(Cell::Revealed(1)));
        assert_eq!(session.grid().mine_count(), 1);
        assert_eq!(service.game(id).unwrap(), session);
    }

    #[test]
    fn winning_game_is_removed() {
        let mut service = service();
        let id = service.create_game(2, 2, 1).unwrap().id();

        let mut session = service.make_move(id, 0, 0).unwrap();
        while !session.completed() {
            let (row, col) = find_cell(&session, Cell::Hidden);
            session = service.make_move(id, row.into(), col.into()).unwrap();
        }

        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.grid().count_cells(|cell| cell == Cell::RevealedMineOnWin), 1);
        assert!(service.store().is_empty().unwrap());
        assert!(matches!(service.game(id), Err(ServiceError::GameNotFound(_))));
    }

    #[test]
    fn lost_game_is_removed_and_further_moves_are_not_found() {
        let mut service = service();
        let id = service.create_game(2, 2, 1).unwrap().id();
        let session = service.make_move(id, 0, 0).unwrap();

        let (row, col) = find_cell(&session, Cell::HiddenMine);
        let session = service.make_move(id, row.into(), col.into()).unwrap();

        assert_eq!(session.state(), SessionState::Lost);
        assert!(session.completed());
        assert_eq!(session.cell_at((row, col)), Ok(Cell::ExplodedMine));
        assert!(matches!(
            service.make_move(id, 0, 1),
            Err(ServiceError::GameNotFound(missing)) if missing == id
        ));
    }

    #[test]
    fn unknown_game_is_not_found() {
        let mut service = service();
        let id = SessionId::random(&mut rand::rng());

        assert!(matches!(
            service.make_move(id, 0, 0),
            Err(ServiceError::GameNotFound(_))
        ));
    }

    #[test]
    fn rejected_move_leaves_stored_session_untouched() {
        let mut service = service();
        let id = service.create_game(2, 2, 1).unwrap().id();
        let session = service.make_move(id, 0, 0).unwrap();

        assert!(matches!(
            service.make_move(id, 2, 0),
            Err(ServiceError::Game(GameError::OutOfBounds))
        ));
        assert!(matches!(
            service.make_move(id, 0, 0),
            Err(ServiceError::Game(GameError::CellAlreadyRevealed))
        ));
        assert_eq!(service.game(id).unwrap(), session);
    }

    #[test]
    fn seeded_services_are_reproducible() {
        let mut first = service();
        let mut second = service();

        let a = first.create_game(8, 8, 10).unwrap();
        let b = second.create_game(8, 8, 10).unwrap();
        assert_eq!(a.id(), b.id());

        let a = first.make_move(a.id(), 4, 4).unwrap();
        let b = second.make_move(b.id(), 4, 4).unwrap();
        assert_eq!(a, b);
    }
}
