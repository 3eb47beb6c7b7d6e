use serde::{Deserialize, Serialize};

use crate::*;

/// Signed integer used to store a [`Cell`] outside of the engine.
pub type CellCode = i8;

/// State of one square of the board, as tracked by the engine.
///
/// Persisted as a [`CellCode`]:
///
/// | cell                | code    |
/// |---------------------|---------|
/// | `Hidden`            | `-1`    |
/// | `HiddenMine`        | `-2`    |
/// | `Revealed(n)`       | `0..=8` |
/// | `ExplodedMine`      | `-3`    |
/// | `RevealedMineOnWin` | `-4`    |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CellCode", try_from = "CellCode")]
pub enum Cell {
    #[default]
    Hidden,
    HiddenMine,
    Revealed(u8),
    ExplodedMine,
    RevealedMineOnWin,
}

impl Cell {
    pub const HIDDEN: CellCode = -1;
    pub const HIDDEN_MINE: CellCode = -2;
    pub const EXPLODED_MINE: CellCode = -3;
    pub const REVEALED_MINE_ON_WIN: CellCode = -4;
    /// Largest count a `Revealed` cell can carry.
    pub const MAX_ADJACENT: u8 = 8;

    /// Whether the player can still click this cell.
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden | Self::HiddenMine)
    }

    pub const fn is_mine(self) -> bool {
        matches!(
            self,
            Self::HiddenMine | Self::ExplodedMine | Self::RevealedMineOnWin
        )
    }

    /// Rejects `Revealed` counts no board can produce.
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::Revealed(count) if count > Self::MAX_ADJACENT => Err(GameError::InvalidCellCode(
                CellCode::try_from(count).unwrap_or(CellCode::MAX),
            )),
            cell => Ok(cell),
        }
    }

    pub const fn code(self) -> CellCode {
        match self {
            Self::Hidden => Self::HIDDEN,
            Self::HiddenMine => Self::HIDDEN_MINE,
            Self::Revealed(count) => count as CellCode,
            Self::ExplodedMine => Self::EXPLODED_MINE,
            Self::RevealedMineOnWin => Self::REVEALED_MINE_ON_WIN,
        }
    }

    pub const fn from_code(code: CellCode) -> Result<Self> {
        match code {
            Self::HIDDEN => Ok(Self::Hidden),
            Self::HIDDEN_MINE => Ok(Self::HiddenMine),
            Self::EXPLODED_MINE => Ok(Self::ExplodedMine),
            Self::REVEALED_MINE_ON_WIN => Ok(Self::RevealedMineOnWin),
            0..=8 => Ok(Self::Revealed(code as u8)),
            _ => Err(GameError::InvalidCellCode(code)),
        }
    }

    /// Single character shown to a player, mines only become visible once the game is over.
    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden | Self::HiddenMine => ' ',
            Self::Revealed(count) => match char::from_digit(count as u32, 10) {
                Some(digit) => digit,
                None => '?',
            },
            Self::ExplodedMine => 'X',
            Self::RevealedMineOnWin => 'M',
        }
    }
}

impl From<Cell> for CellCode {
    fn from(cell: Cell) -> Self {
        cell.code()
    }
}

impl TryFrom<CellCode> for Cell {
    type Error = GameError;

    fn try_from(code: CellCode) -> Result<Self> {
        Self::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_maps_back_to_its_cell() {
        let cells = [
            Cell::Hidden,
            Cell::HiddenMine,
            Cell::Revealed(0),
            Cell::Revealed(8),
            Cell::ExplodedMine,
            Cell::RevealedMineOnWin,
        ];
        for cell in cells {
            assert_eq!(Cell::from_code(cell.code()), Ok(cell));
        }
    }

    #[test]
    fn terminal_mine_codes_are_distinct() {
        assert_ne!(
            Cell::ExplodedMine.code(),
            Cell::RevealedMineOnWin.code()
        );
        assert_eq!(Cell::Hidden.code(), -1);
        assert_eq!(Cell::HiddenMine.code(), -2);
        assert_eq!(Cell::ExplodedMine.code(), -3);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(Cell::from_code(9), Err(GameError::InvalidCellCode(9)));
        assert_eq!(Cell::from_code(-5), Err(GameError::InvalidCellCode(-5)));
    }

    #[test]
    fn mines_stay_blank_until_disclosed() {
        assert_eq!(Cell::HiddenMine.symbol(), ' ');
        assert_eq!(Cell::Revealed(3).symbol(), '3');
        assert_eq!(Cell::ExplodedMine.symbol(), 'X');
        assert_eq!(Cell::RevealedMineOnWin.symbol(), 'M');
    }

    #[test]
    fn counts_above_eight_are_invalid() {
        assert_eq!(Cell::Revealed(8).validate(), Ok(Cell::Revealed(8)));
        assert_eq!(Cell::HiddenMine.validate(), Ok(Cell::HiddenMine));
        assert_eq!(Cell::Revealed(9).validate(), Err(GameError::InvalidCellCode(9)));
        assert_eq!(
            Cell::Revealed(250).validate(),
            Err(GameError::InvalidCellCode(CellCode::MAX))
        );
        assert_eq!(Cell::Revealed(250).symbol(), '?');
    }
}
