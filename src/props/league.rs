//! Supported leagues and their upstream ids.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

use crate::error::PropsError;

/// League selectable on the props board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum League {
    /// National Basketball Association.
    Nba,
    /// Major League Baseball.
    Mlb,
    /// National Football League.
    Nfl,
    /// National Hockey League.
    Nhl,
    /// Tennis.
    Tennis,
}

impl League {
    /// League key used when a request does not name one.
    pub const DEFAULT_KEY: &'static str = "nba";

    /// Upstream `league_id` for this league.
    pub const fn id(self) -> u32 {
        match self {
            League::Nba => 7,
            League::Mlb => 10,
            League::Nfl => 9,
            League::Nhl => 2,
            League::Tennis => 14,
        }
    }

    /// Resolve a case-insensitive league key.
    pub fn parse(key: &str) -> Result<Self, PropsError> {
        League::from_str(key).map_err(|_| PropsError::UnsupportedLeague {
            league: key.to_string(),
        })
    }

    /// Upper-cased key, as shown in records and titles.
    pub fn label(self) -> String {
        self.to_string().to_uppercase()
    }
}
