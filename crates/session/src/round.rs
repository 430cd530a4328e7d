//! Round state, scoring tiers, best records and share text.

use bank::mode::{Mode, Settings};
use bank::question::{Question, QuestionKind};
use foundation::math::{GeoPoint, format_distance_km};
use std::collections::BTreeMap;

pub const TOTAL_QUESTIONS: usize = 10;
/// City taps within this distance of the target count as correct.
pub const CITY_HIT_THRESHOLD_KM: f64 = 300.0;
/// Advice to the UI: auto-advance this long after an answer lands.
pub const AUTO_ADVANCE_MS: u64 = 2000;

/// One answered question.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub question: String,
    pub actual: GeoPoint,
    pub player: Option<GeoPoint>,
    pub distance_km: f64,
    pub clicked_name: Option<String>,
    pub correct: bool,
}

/// Live state of a round in progress.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub mode: Mode,
    pub questions: Vec<Question>,
    pub current: usize,
    pub score: usize,
    pub total_distance_km: f64,
    pub history: Vec<HistoryEntry>,
    pub awaiting_answer: bool,
}

impl RoundState {
    pub fn new(mode: Mode, questions: Vec<Question>) -> Self {
        Self {
            mode,
            questions,
            current: 0,
            score: 0,
            total_distance_km: 0.0,
            history: Vec::new(),
            awaiting_answer: true,
        }
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    pub fn correct_count(&self) -> usize {
        self.history.iter().filter(|h| h.correct).count()
    }
}

/// Performance tier. Region modes rank by accuracy, city modes by total
/// distance; both land on the same five labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Legendary,
    Outstanding,
    Solid,
    Passable,
    NeedsPractice,
}

impl Tier {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 1.0 {
            Tier::Legendary
        } else if accuracy >= 0.8 {
            Tier::Outstanding
        } else if accuracy >= 0.6 {
            Tier::Solid
        } else if accuracy >= 0.4 {
            Tier::Passable
        } else {
            Tier::NeedsPractice
        }
    }

    pub fn from_total_distance(total_km: f64) -> Self {
        if total_km < 500.0 {
            Tier::Legendary
        } else if total_km < 1000.0 {
            Tier::Outstanding
        } else if total_km < 2000.0 {
            Tier::Solid
        } else if total_km < 5000.0 {
            Tier::Passable
        } else {
            Tier::NeedsPractice
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Legendary => "料事如神",
            Tier::Outstanding => "深不可测",
            Tier::Solid => "出类拔萃",
            Tier::Passable => "马马虎虎",
            Tier::NeedsPractice => "还得再练练",
        }
    }
}

/// End-of-round result.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mode: Mode,
    pub tier: Tier,
    pub total_questions: usize,
    pub correct: usize,
    /// Fraction in [0,1]; meaningful for region modes.
    pub accuracy: f64,
    pub total_distance_km: f64,
    pub average_distance_km: f64,
    pub history: Vec<HistoryEntry>,
}

impl Summary {
    pub fn from_round(round: &RoundState) -> Self {
        let total = round.total_questions().max(1);
        let correct = round.correct_count();
        let accuracy = correct as f64 / total as f64;
        let tier = match round.mode.kind() {
            QuestionKind::Region => Tier::from_accuracy(accuracy),
            QuestionKind::City => Tier::from_total_distance(round.total_distance_km),
        };
        Self {
            mode: round.mode,
            tier,
            total_questions: round.total_questions(),
            correct,
            accuracy,
            total_distance_km: round.total_distance_km,
            average_distance_km: round.total_distance_km / total as f64,
            history: round.history.clone(),
        }
    }

    /// One-line boast for sharing, difficulty included.
    pub fn share_text(&self, settings: &Settings) -> String {
        let score_line = match self.mode.kind() {
            QuestionKind::Region => format!("成绩 {}/{}", self.correct, self.total_questions),
            QuestionKind::City => {
                format!("总误差 {}", format_distance_km(self.total_distance_km))
            }
        };
        format!(
            "我在《地理知识问答》{}（{}）打出 {}，你敢来挑战吗？",
            self.mode.title(),
            settings.difficulty_label(self.mode),
            score_line
        )
    }
}

/// Per-mode personal best.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordEntry {
    Region {
        correct: usize,
        total: usize,
        accuracy_pct: u32,
    },
    City {
        total_distance_km: f64,
    },
}

impl RecordEntry {
    fn from_summary(summary: &Summary) -> Self {
        match summary.mode.kind() {
            QuestionKind::Region => RecordEntry::Region {
                correct: summary.correct,
                total: summary.total_questions,
                accuracy_pct: (summary.accuracy * 100.0).round() as u32,
            },
            QuestionKind::City => RecordEntry::City {
                // Stored rounded so records compare the way they display.
                total_distance_km: (summary.total_distance_km * 100.0).round() / 100.0,
            },
        }
    }

    /// Region: more correct answers wins, accuracy breaks ties. City:
    /// strictly smaller total distance wins.
    fn beats(&self, current: &RecordEntry) -> bool {
        match (self, current) {
            (
                RecordEntry::Region { correct, accuracy_pct, .. },
                RecordEntry::Region {
                    correct: old_correct,
                    accuracy_pct: old_pct,
                    ..
                },
            ) => correct > old_correct || (correct == old_correct && accuracy_pct > old_pct),
            (
                RecordEntry::City { total_distance_km },
                RecordEntry::City {
                    total_distance_km: old,
                },
            ) => total_distance_km < old,
            // Mode kinds never mix under one key.
            _ => false,
        }
    }

    pub fn display_line(&self, mode: Mode) -> String {
        match self {
            RecordEntry::Region {
                correct,
                total,
                accuracy_pct,
            } => format!("{}：{}/{}（{}%）", mode.title(), correct, total, accuracy_pct),
            RecordEntry::City { total_distance_km } => {
                format!("{}：总误差 {}", mode.title(), format_distance_km(*total_distance_km))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBook {
    entries: BTreeMap<Mode, RecordEntry>,
}

impl RecordBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, mode: Mode) -> Option<&RecordEntry> {
        self.entries.get(&mode)
    }

    /// Returns true when the summary set a new best.
    pub fn update(&mut self, summary: &Summary) -> bool {
        let candidate = RecordEntry::from_summary(summary);
        let improved = match self.entries.get(&summary.mode) {
            Some(current) => candidate.beats(current),
            None => true,
        };
        if improved {
            self.entries.insert(summary.mode, candidate);
        }
        improved
    }
}
