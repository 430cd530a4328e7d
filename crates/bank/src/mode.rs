//! Quiz modes and per-mode difficulty settings.

use crate::question::QuestionKind;

/// Map scope a mode plays on. Picks the projection and basemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    China,
    World,
}

/// The four playable modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    ProvinceClick,
    CityClick,
    WorldCountry,
    WorldCity,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::ProvinceClick,
        Mode::CityClick,
        Mode::WorldCountry,
        Mode::WorldCity,
    ];

    /// Stable identifier; used in recency keys and share links.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::ProvinceClick => "province-click",
            Mode::CityClick => "city-click",
            Mode::WorldCountry => "world-province",
            Mode::WorldCity => "world-city",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::ProvinceClick => "省份大挑战",
            Mode::CityClick => "省会定位",
            Mode::WorldCountry => "世界国家挑战",
            Mode::WorldCity => "世界城市定位",
        }
    }

    pub fn scope(self) -> Scope {
        match self {
            Mode::ProvinceClick | Mode::CityClick => Scope::China,
            Mode::WorldCountry | Mode::WorldCity => Scope::World,
        }
    }

    /// What a tap means in this mode: naming a region or placing a city.
    pub fn kind(self) -> QuestionKind {
        match self {
            Mode::ProvinceClick | Mode::WorldCountry => QuestionKind::Region,
            Mode::CityClick | Mode::WorldCity => QuestionKind::City,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProvinceDifficulty {
    #[default]
    Easy,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CityDifficulty {
    #[default]
    Easy,
    Hard,
    /// Adds the curated secondary-city pool on top of the capitals.
    Super,
}

/// World-country pool size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountryPool {
    #[default]
    All,
    Top50,
}

/// World-city pool size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CityPool {
    Top50,
    #[default]
    Top200,
}

impl CityPool {
    pub fn cap(self) -> usize {
        match self {
            CityPool::Top50 => 50,
            CityPool::Top200 => 200,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub province_difficulty: ProvinceDifficulty,
    pub city_difficulty: CityDifficulty,
    pub world_country_difficulty: CountryPool,
    pub world_city_difficulty: CityPool,
}

impl Settings {
    /// Human-readable difficulty for the active mode, used in share text.
    pub fn difficulty_label(&self, mode: Mode) -> &'static str {
        match mode {
            Mode::ProvinceClick => match self.province_difficulty {
                ProvinceDifficulty::Easy => "简单",
                ProvinceDifficulty::Hard => "困难",
            },
            Mode::CityClick => match self.city_difficulty {
                CityDifficulty::Easy => "简单",
                CityDifficulty::Hard => "困难",
                CityDifficulty::Super => "超级",
            },
            Mode::WorldCountry => match self.world_country_difficulty {
                CountryPool::All => "全部国家",
                CountryPool::Top50 => "Top 50",
            },
            Mode::WorldCity => match self.world_city_difficulty {
                CityPool::Top50 => "Top 50",
                CityPool::Top200 => "Top 200",
            },
        }
    }
}
