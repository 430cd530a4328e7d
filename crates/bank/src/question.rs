//! The question record shared by every mode.

use foundation::math::GeoPoint;
use foundation::normalize_name;
use formats::datasets::CityType;

use crate::mode::Mode;

/// What counts as a correct answer: naming the right region, or landing a
/// tap close enough to a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Region,
    City,
}

impl QuestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Region => "province",
            QuestionKind::City => "city",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub kind: QuestionKind,
    /// Canonical answer name, matched against clicked features.
    pub name: String,
    /// Display prompt shown to the player.
    pub prompt: String,
    pub actual: GeoPoint,
    /// Precomputed familiarity in [0,1]; `None` means the sampler falls
    /// back to a mode default.
    pub familiarity: Option<f64>,
    pub city_type: Option<CityType>,
    pub country: String,
    pub province: String,
}

impl Question {
    /// Stable key for recency tracking. Two questions with the same key
    /// are the same question as far as repeat-avoidance is concerned.
    pub fn recency_key(&self, mode: Mode) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            mode.as_str(),
            self.kind.as_str(),
            normalize_name(&self.name),
            normalize_name(&self.prompt),
            normalize_name(&self.province),
            normalize_name(&self.country),
        )
    }
}
