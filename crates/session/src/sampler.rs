//! Recency-aware question sampling.
//!
//! Two strategies, both seeded from the caller's RNG so rounds are
//! reproducible under test:
//! - flat: uniform over questions not seen recently, topping up from the
//!   recently-seen pool when fresh ones run out;
//! - progressive: difficulty ramps across the round by walking the
//!   familiarity ranking from easy to hard with a little jitter.

use std::collections::{BTreeMap, BTreeSet};

use bank::builder::{china_city_familiarity, world_city_fame};
use bank::mode::Mode;
use bank::question::Question;
use foundation::math::clamp01;
use formats::datasets::{CityRecord, CityType};
use rand::Rng;
use rand::seq::SliceRandom;

/// Per-mode memory of recently asked questions, by recency key.
#[derive(Debug, Clone, Default)]
pub struct RecencyBook {
    recent: BTreeMap<Mode, Vec<String>>,
}

impl RecencyBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recent(&self, mode: Mode) -> &[String] {
        self.recent.get(&mode).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append this round's picks, keeping at most `max(6 * target, 80)`
    /// keys so small pools eventually cycle back in.
    pub fn remember(&mut self, mode: Mode, picked: &[Question], target: usize) {
        let limit = (target * 6).max(80);
        let entry = self.recent.entry(mode).or_default();
        entry.extend(picked.iter().map(|q| q.recency_key(mode)));
        if entry.len() > limit {
            let overflow = entry.len() - limit;
            entry.drain(..overflow);
        }
    }
}

fn split_by_recency(
    mode: Mode,
    items: Vec<Question>,
    book: &RecencyBook,
) -> (Vec<Question>, Vec<Question>) {
    // Datasets occasionally repeat an entry; keep the first of each key so
    // a round can never ask the same question twice.
    let mut seen = BTreeSet::new();
    let recent = book.recent(mode);
    items
        .into_iter()
        .filter(|q| seen.insert(q.recency_key(mode)))
        .partition(|q| !recent.contains(&q.recency_key(mode)))
}

/// Uniform sample of `count` questions, fresh before stale, shuffled.
pub fn sample_flat<R: Rng>(
    mode: Mode,
    items: Vec<Question>,
    count: usize,
    book: &mut RecencyBook,
    rng: &mut R,
) -> Vec<Question> {
    let target = count.min(items.len());
    if target == 0 {
        return Vec::new();
    }

    let (mut fresh, mut stale) = split_by_recency(mode, items, book);
    fresh.shuffle(rng);
    stale.shuffle(rng);

    let mut picked: Vec<Question> = if fresh.len() >= target {
        fresh.into_iter().take(target).collect()
    } else {
        let need = target - fresh.len();
        fresh.extend(stale.into_iter().take(need));
        fresh
    };
    picked.shuffle(rng);

    book.remember(mode, &picked, target);
    picked
}

/// Familiarity ramp: questions sorted easiest-first, the i-th pick lands
/// near rank `i/(n-1)` of what remains, jittered by ~12% of the pool.
pub fn sample_progressive<R: Rng>(
    mode: Mode,
    items: Vec<Question>,
    count: usize,
    book: &mut RecencyBook,
    rng: &mut R,
) -> Vec<Question> {
    let target = count.min(items.len());
    if target == 0 {
        return Vec::new();
    }

    let (mut fresh, mut stale) = split_by_recency(mode, items, book);
    fresh.shuffle(rng);
    stale.shuffle(rng);
    fresh.extend(stale);

    let mut remaining: Vec<(Question, f64)> = fresh
        .into_iter()
        .map(|q| {
            let familiarity = clamp01(question_familiarity(mode, &q));
            (q, familiarity)
        })
        .collect();
    remaining.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut picked = Vec::with_capacity(target);
    for i in 0..target {
        if remaining.is_empty() {
            break;
        }
        let ratio = if target <= 1 {
            0.0
        } else {
            i as f64 / (target - 1) as f64
        };
        let target_index = (ratio * (remaining.len() - 1) as f64).round() as usize;
        let jitter = ((remaining.len() as f64 * 0.12).floor() as usize).max(1);
        let min_index = target_index.saturating_sub(jitter);
        let max_index = (target_index + jitter).min(remaining.len() - 1);
        let pick_index = rng.random_range(min_index..=max_index);
        picked.push(remaining.remove(pick_index).0);
    }

    book.remember(mode, &picked, target);
    picked
}

/// Familiarity for sampling: the precomputed score when the builder set
/// one, else a per-mode estimate.
fn question_familiarity(mode: Mode, question: &Question) -> f64 {
    if let Some(score) = question.familiarity
        && score.is_finite()
    {
        return score;
    }

    match mode {
        Mode::CityClick => {
            let name = if question.name.is_empty() {
                &question.prompt
            } else {
                &question.name
            };
            china_city_familiarity(name, question.city_type.unwrap_or(CityType::Capital))
        }
        Mode::WorldCity => {
            let record = CityRecord {
                name: question.name.clone(),
                en_name: String::new(),
                position: question.actual,
                kind: question.city_type.unwrap_or(CityType::Capital),
                province: question.province.clone(),
                country: question.country.clone(),
            };
            world_city_fame(&record)
        }
        _ => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bank::question::QuestionKind;
    use foundation::math::GeoPoint;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(name: &str, familiarity: Option<f64>) -> Question {
        Question {
            kind: QuestionKind::Region,
            name: name.to_string(),
            prompt: name.to_string(),
            actual: GeoPoint::new(0.0, 0.0),
            familiarity,
            city_type: None,
            country: String::new(),
            province: String::new(),
        }
    }

    fn pool(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| question(&format!("q{i}"), Some(i as f64 / n as f64)))
            .collect()
    }

    #[test]
    fn flat_sampling_avoids_recent_questions() {
        let mut book = RecencyBook::new();
        let mut rng = StdRng::seed_from_u64(7);

        let first = sample_flat(Mode::ProvinceClick, pool(20), 10, &mut book, &mut rng);
        assert_eq!(first.len(), 10);
        let first_keys: Vec<String> =
            first.iter().map(|q| q.recency_key(Mode::ProvinceClick)).collect();

        let second = sample_flat(Mode::ProvinceClick, pool(20), 10, &mut book, &mut rng);
        assert_eq!(second.len(), 10);
        for q in &second {
            assert!(!first_keys.contains(&q.recency_key(Mode::ProvinceClick)));
        }
    }

    #[test]
    fn flat_sampling_tops_up_from_stale_when_fresh_runs_out() {
        let mut book = RecencyBook::new();
        let mut rng = StdRng::seed_from_u64(7);

        sample_flat(Mode::ProvinceClick, pool(12), 10, &mut book, &mut rng);
        let second = sample_flat(Mode::ProvinceClick, pool(12), 10, &mut book, &mut rng);
        // Only 2 fresh remain; the rest come from the stale pool.
        assert_eq!(second.len(), 10);
    }

    #[test]
    fn rounds_never_repeat_an_identity_key() {
        let mut book = RecencyBook::new();
        let mut rng = StdRng::seed_from_u64(11);

        // Pool with every question duplicated.
        let mut items = pool(8);
        items.extend(pool(8));
        let picked = sample_flat(Mode::ProvinceClick, items, 10, &mut book, &mut rng);
        let mut keys: Vec<String> =
            picked.iter().map(|q| q.recency_key(Mode::ProvinceClick)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), picked.len());
        assert_eq!(picked.len(), 8);

        let mut items = pool(8);
        items.extend(pool(8));
        let mut fresh_book = RecencyBook::new();
        let picked =
            sample_progressive(Mode::WorldCountry, items, 10, &mut fresh_book, &mut rng);
        let mut keys: Vec<String> =
            picked.iter().map(|q| q.recency_key(Mode::WorldCountry)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), picked.len());
        assert_eq!(picked.len(), 8);
    }

    #[test]
    fn recency_is_per_mode() {
        let mut book = RecencyBook::new();
        let mut rng = StdRng::seed_from_u64(1);
        sample_flat(Mode::ProvinceClick, pool(10), 10, &mut book, &mut rng);
        assert_eq!(book.recent(Mode::ProvinceClick).len(), 10);
        assert!(book.recent(Mode::WorldCountry).is_empty());
    }

    #[test]
    fn recency_book_caps_its_memory() {
        let mut book = RecencyBook::new();
        let picked = pool(30);
        for _ in 0..5 {
            book.remember(Mode::WorldCity, &picked, 30);
        }
        // cap = max(6 * 30, 80) = 180
        assert_eq!(book.recent(Mode::WorldCity).len(), 150);
        book.remember(Mode::WorldCity, &picked, 30);
        assert_eq!(book.recent(Mode::WorldCity).len(), 180);
        book.remember(Mode::WorldCity, &picked, 30);
        assert_eq!(book.recent(Mode::WorldCity).len(), 180);
    }

    #[test]
    fn progressive_sampling_ramps_from_easy_to_hard() {
        let mut book = RecencyBook::new();
        let mut rng = StdRng::seed_from_u64(42);

        let picked = sample_progressive(Mode::WorldCountry, pool(100), 10, &mut book, &mut rng);
        assert_eq!(picked.len(), 10);

        let first_half: f64 = picked[..5]
            .iter()
            .map(|q| q.familiarity.unwrap())
            .sum::<f64>()
            / 5.0;
        let second_half: f64 = picked[5..]
            .iter()
            .map(|q| q.familiarity.unwrap())
            .sum::<f64>()
            / 5.0;
        assert!(
            first_half > second_half,
            "expected familiarity to drop: {first_half} vs {second_half}"
        );
    }

    #[test]
    fn progressive_sampling_handles_tiny_pools() {
        let mut book = RecencyBook::new();
        let mut rng = StdRng::seed_from_u64(3);
        let picked = sample_progressive(Mode::WorldCountry, pool(3), 10, &mut book, &mut rng);
        assert_eq!(picked.len(), 3);
        let single = sample_progressive(Mode::WorldCity, pool(1), 10, &mut book, &mut rng);
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn sampling_is_reproducible_for_a_fixed_seed() {
        let run = |seed: u64| {
            let mut book = RecencyBook::new();
            let mut rng = StdRng::seed_from_u64(seed);
            sample_progressive(Mode::WorldCountry, pool(50), 10, &mut book, &mut rng)
                .iter()
                .map(|q| q.name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(9), run(9));
    }
}
