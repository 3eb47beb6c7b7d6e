use sapper_core::Coord;
use serde::{Deserialize, Serialize};

/// Limits and knobs of the game service, usually read from a TOML file.
///
/// ```toml
/// max_width = 30
/// max_height = 30
/// seed = 42 # optional, makes ids and layouts reproducible
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub max_width: Coord,
    pub max_height: Coord,
    pub seed: Option<u64>,
}

impl Settings {
    pub const MAX_DIMENSION: Coord = 30;

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_width: Self::MAX_DIMENSION,
            max_height: Self::MAX_DIMENSION,
            seed: None,
        }
    }
}
