//! Stored form of a game session.
//!
//! A record keeps the board as rows of signed cell codes (see [`Cell`]) next to the game metadata, using the field
//! names of the original key-value entries so existing data stays readable.

use sapper_core::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Malformed session record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Inconsistent session record: {0}")]
    Game(#[from] GameError),
}

pub type Result<T> = core::result::Result<T, RecordError>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub game_id: String,
    pub width: i32,
    pub height: i32,
    pub mines_count: i32,
    pub completed: bool,
    /// Older entries were written with mines placed up front
    #[serde(default = "placed_by_default")]
    pub mines_placed: bool,
    pub field: Vec<Vec<CellCode>>,
}

const fn placed_by_default() -> bool {
    true
}

impl SessionRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&GameSession> for SessionRecord {
    fn from(session: &GameSession) -> Self {
        Self {
            game_id: session.id().to_string(),
            width: session.width().into(),
            height: session.height().into(),
            mines_count: session.mine_count().into(),
            completed: session.completed(),
            mines_placed: session.mines_placed(),
            field: session.grid().to_codes(),
        }
    }
}

impl TryFrom<SessionRecord> for GameSession {
    type Error = RecordError;

    fn try_from(record: SessionRecord) -> Result<Self> {
        let id: SessionId = record.game_id.parse()?;
        let config = GameConfig::new(record.width, record.height, record.mines_count)?;
        let grid = Grid::from_codes(&record.field)?;
        Ok(GameSession::from_parts(
            id,
            config,
            grid,
            record.mines_placed,
            record.completed,
        )?)
    }
}

pub fn encode_session(session: &GameSession) -> Result<String> {
    SessionRecord::from(session).to_json()
}

pub fn decode_session(json: &str) -> Result<GameSession> {
    let record = SessionRecord::from_json(json)?;
    log::trace!("Decoded record for game {}", record.game_id);
    record.try_into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: SessionId = SessionId::from_u128(0xfeed);

    #[test]
    fn record_uses_integer_cells_and_original_field_names() {
        let session = GameSession::from_mine_coords(ID, 3, 2, &[(0, 0)]).unwrap();
        let session = session.make_move(1, 2, RandomMinePlacer::new(0)).unwrap();
        let session = session.make_move(1, 0, RandomMinePlacer::new(0)).unwrap();

        let json: serde_json::Value = serde_json::from_str(&encode_session(&session).unwrap()).unwrap();

        assert_eq!(json["game_id"], "00000000-0000-0000-0000-00000000feed");
        assert_eq!(json["mines_count"], 1);
        assert_eq!(json["completed"], true);
        assert_eq!(json["field"], serde_json::json!([[-4, 1, 0], [1, 1, 0]]));
    }

    #[test]
    fn session_survives_encoding() {
        let session = GameSession::new(ID, 4, 4, 3).unwrap();
        let mines = FixedMinePlacer::new(&[(3, 3), (3, 2), (2, 3)]);
        let session = session.make_move(2, 2, mines).unwrap();
        assert_eq!(session.cell_at((2, 2)), Ok(Cell::Revealed(3)));

        let decoded = decode_session(&encode_session(&session).unwrap()).unwrap();

        assert_eq!(decoded, session);
        assert_eq!(decoded.state(), SessionState::InProgress);
    }

    #[test]
    fn fresh_session_keeps_lazy_placement() {
        let session = GameSession::new(ID, 5, 5, 4).unwrap();

        let decoded = decode_session(&encode_session(&session).unwrap()).unwrap();

        assert_eq!(decoded.state(), SessionState::Created);
        assert!(!decoded.mines_placed());
    }

    #[test]
    fn unknown_cell_code_is_rejected() {
        let json = r#"{"game_id":"00000000-0000-0000-0000-000000000001","width":2,"height":1,
            "mines_count":1,"completed":false,"field":[[-2,9]]}"#;

        assert!(matches!(
            decode_session(json),
            Err(RecordError::Game(GameError::InvalidCellCode(9)))
        ));
    }

    #[test]
    fn record_without_placement_flag_is_read_as_placed() {
        let json = r#"{"game_id":"00000000-0000-0000-0000-000000000001","width":2,"height":1,
            "mines_count":1,"completed":false,"field":[[-2,-1]]}"#;

        let session = decode_session(json).unwrap();

        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.cell_at((0, 0)), Ok(Cell::HiddenMine));
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(decode_session("{"), Err(RecordError::Json(_))));
    }
}
