//! The sixteen administrative regions of Ghana.
//!
//! Submissions carry exactly one region. The census populations are the
//! 2021 PHC figures and feed the participation-rate estimates in
//! [`crate::stats`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Greater Accra")]
    GreaterAccra,
    Ashanti,
    Western,
    Eastern,
    Central,
    Volta,
    Oti,
    Northern,
    #[serde(rename = "North East")]
    NorthEast,
    Savannah,
    #[serde(rename = "Upper East")]
    UpperEast,
    #[serde(rename = "Upper West")]
    UpperWest,
    Bono,
    #[serde(rename = "Bono East")]
    BonoEast,
    Ahafo,
    #[serde(rename = "Western North")]
    WesternNorth,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown region: {0}")]
pub struct ParseRegionError(pub String);

impl Region {
    pub const ALL: [Region; 16] = [
        Region::GreaterAccra,
        Region::Ashanti,
        Region::Western,
        Region::Eastern,
        Region::Central,
        Region::Volta,
        Region::Oti,
        Region::Northern,
        Region::NorthEast,
        Region::Savannah,
        Region::UpperEast,
        Region::UpperWest,
        Region::Bono,
        Region::BonoEast,
        Region::Ahafo,
        Region::WesternNorth,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::GreaterAccra => "Greater Accra",
            Self::Ashanti => "Ashanti",
            Self::Western => "Western",
            Self::Eastern => "Eastern",
            Self::Central => "Central",
            Self::Volta => "Volta",
            Self::Oti => "Oti",
            Self::Northern => "Northern",
            Self::NorthEast => "North East",
            Self::Savannah => "Savannah",
            Self::UpperEast => "Upper East",
            Self::UpperWest => "Upper West",
            Self::Bono => "Bono",
            Self::BonoEast => "Bono East",
            Self::Ahafo => "Ahafo",
            Self::WesternNorth => "Western North",
        }
    }

    /// Three-letter region code (e.g. `GAR`, `ASH`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::GreaterAccra => "GAR",
            Self::Ashanti => "ASH",
            Self::Western => "WES",
            Self::Eastern => "EAS",
            Self::Central => "CEN",
            Self::Volta => "VOL",
            Self::Oti => "OTI",
            Self::Northern => "NOR",
            Self::NorthEast => "NEA",
            Self::Savannah => "SAV",
            Self::UpperEast => "UEA",
            Self::UpperWest => "UWE",
            Self::Bono => "BON",
            Self::BonoEast => "BEA",
            Self::Ahafo => "AHA",
            Self::WesternNorth => "WNO",
        }
    }

    pub fn capital(&self) -> &'static str {
        match self {
            Self::GreaterAccra => "Accra",
            Self::Ashanti => "Kumasi",
            Self::Western => "Sekondi-Takoradi",
            Self::Eastern => "Koforidua",
            Self::Central => "Cape Coast",
            Self::Volta => "Ho",
            Self::Oti => "Dambai",
            Self::Northern => "Tamale",
            Self::NorthEast => "Nalerigu",
            Self::Savannah => "Damongo",
            Self::UpperEast => "Bolgatanga",
            Self::UpperWest => "Wa",
            Self::Bono => "Sunyani",
            Self::BonoEast => "Techiman",
            Self::Ahafo => "Goaso",
            Self::WesternNorth => "Sefwi Wiawso",
        }
    }

    pub fn population(&self) -> u64 {
        match self {
            Self::GreaterAccra => 5_055_883,
            Self::Ashanti => 6_030_030,
            Self::Western => 2_658_774,
            Self::Eastern => 2_917_039,
            Self::Central => 2_563_228,
            Self::Volta => 1_635_421,
            Self::Oti => 735_432,
            Self::Northern => 2_046_696,
            Self::NorthEast => 535_967,
            Self::Savannah => 583_933,
            Self::UpperEast => 1_241_998,
            Self::UpperWest => 859_679,
            Self::Bono => 1_179_079,
            Self::BonoEast => 1_170_301,
            Self::Ahafo => 553_636,
            Self::WesternNorth => 819_984,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = ParseRegionError;

    /// Accepts the display name or the three-letter code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s) || r.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseRegionError(s.to_string()))
    }
}
