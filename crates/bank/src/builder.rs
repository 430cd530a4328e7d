//! Question pool builders: one per mode, turning sanitized datasets into
//! scored `Question` lists. Pools are deterministic; randomness happens
//! later, in the sampler.

use foundation::math::clamp01;
use foundation::{normalize_geo_name, normalize_name};
use formats::datasets::{CityRecord, CityType};
use formats::geojson::RegionSet;
use formats::metrics::{LabelCatalog, MetricsIndex};

use crate::mode::{CityPool, CountryPool};
use crate::question::{Question, QuestionKind};
use crate::tables;

/// Familiarity of a Chinese city from its local name. Names without a
/// fame entry (which is most of them, the table is keyed in English) get
/// a flat baseline per type.
pub fn china_city_familiarity(name: &str, kind: CityType) -> f64 {
    let fame = tables::fame_score_for(name);
    match kind {
        CityType::Secondary => fame.map(|f| clamp01(f * 0.72)).unwrap_or(0.34),
        _ => fame.map(|f| clamp01(0.42 + f * 0.5)).unwrap_or(0.68),
    }
}

/// Fame of a world city, preferring the English name for table lookup.
/// Unlisted cities fall back by type.
pub fn world_city_fame(city: &CityRecord) -> f64 {
    let key = if city.en_name.is_empty() {
        &city.name
    } else {
        &city.en_name
    };
    tables::fame_score_for(key).unwrap_or(if city.kind == CityType::Major { 0.78 } else { 0.62 })
}

/// Province-click pool: every named province except Macau, whose shape is
/// too small to click reliably.
pub fn build_china_province_questions(provinces: &RegionSet) -> Vec<Question> {
    let macau = normalize_name("澳门特别行政区");
    provinces
        .features
        .iter()
        .filter(|f| !f.name.is_empty() && normalize_name(&f.name) != macau)
        .filter_map(|feature| {
            let actual = feature.center()?;
            Some(Question {
                kind: QuestionKind::Region,
                name: feature.name.clone(),
                prompt: feature.name.clone(),
                actual,
                familiarity: None,
                city_type: None,
                country: String::new(),
                province: String::new(),
            })
        })
        .collect()
}

/// Capital-location pool from the sanitized China city list. Municipalities
/// and SARs are excluded: locating "the capital of Shanghai" is not a quiz.
pub fn build_china_capital_questions(cities: &[CityRecord]) -> Vec<Question> {
    cities
        .iter()
        .filter(|city| city.kind == CityType::Capital)
        .filter(|city| {
            let province = if city.province.is_empty() {
                &city.name
            } else {
                &city.province
            };
            !tables::is_excluded_china_province(province)
        })
        .map(|city| {
            let province = if city.province.is_empty() {
                city.name.clone()
            } else {
                city.province.clone()
            };
            let capital = tables::province_capital(&province).unwrap_or(&city.name);
            Question {
                kind: QuestionKind::City,
                name: city.name.clone(),
                prompt: format!("{province}{capital}"),
                actual: city.position,
                familiarity: Some(china_city_familiarity(&city.name, CityType::Capital)),
                city_type: Some(CityType::Capital),
                country: "China".to_string(),
                province,
            }
        })
        .collect()
}

/// Secondary-city pool from the curated table; only reachable on the
/// `Super` city difficulty.
pub fn build_china_secondary_questions() -> Vec<Question> {
    tables::CHINA_SECONDARY_CITIES
        .iter()
        .filter(|city| !tables::is_excluded_china_province(city.province))
        .map(|city| Question {
            kind: QuestionKind::City,
            name: city.name.to_string(),
            prompt: format!("{}第二大城市（{}）", city.province, city.name),
            actual: city.position(),
            familiarity: Some(china_city_familiarity(city.name, CityType::Secondary)),
            city_type: Some(CityType::Secondary),
            country: "China".to_string(),
            province: city.province.to_string(),
        })
        .collect()
}

/// World-country pool. Familiarity is the composite economy score when
/// metrics exist, else an area-rank score, so that big well-known
/// countries come out first on every difficulty.
pub fn build_world_country_questions(
    countries: &RegionSet,
    metrics: &MetricsIndex,
    labels: &LabelCatalog,
    pool: CountryPool,
) -> Vec<Question> {
    let mut by_area: Vec<(&str, f64)> = countries
        .features
        .iter()
        .map(|f| (f.name.as_str(), f.area_sr()))
        .collect();
    by_area.sort_by(|a, b| b.1.total_cmp(&a.1));
    let denom = by_area.len().saturating_sub(1).max(1) as f64;
    let area_rank_score = |name: &str| -> Option<f64> {
        let key = normalize_geo_name(name);
        by_area
            .iter()
            .position(|(n, _)| normalize_geo_name(n) == key)
            .map(|idx| (by_area.len() - 1 - idx) as f64 / denom)
    };

    struct Scored<'a> {
        feature: &'a formats::geojson::RegionFeature,
        score: f64,
        has_gdp: bool,
    }

    let mut scored: Vec<Scored> = countries
        .features
        .iter()
        .filter(|f| !f.name.is_empty())
        .map(|feature| {
            let country_metrics = metrics.resolve(&feature.name);
            let has_gdp = country_metrics.is_some_and(|m| m.gdp_value().is_some());
            let score = country_metrics
                .and_then(|m| m.combined_score())
                .or_else(|| area_rank_score(&feature.name))
                .unwrap_or(0.0);
            Scored {
                feature,
                score,
                has_gdp,
            }
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let used: Vec<&Scored> = match pool {
        CountryPool::All => scored.iter().collect(),
        CountryPool::Top50 => {
            let base: Vec<&Scored> = scored.iter().filter(|s| s.has_gdp).take(50).collect();
            if base.len() < 50 {
                let mut out = base.clone();
                for item in &scored {
                    if out.len() >= 50 {
                        break;
                    }
                    if !out.iter().any(|s| std::ptr::eq(*s, item)) {
                        out.push(item);
                    }
                }
                out
            } else {
                base
            }
        }
    };

    used.into_iter()
        .filter_map(|item| {
            let actual = item.feature.center()?;
            let label = labels.label_for(&item.feature.name);
            Some(Question {
                kind: QuestionKind::Region,
                name: item.feature.name.clone(),
                prompt: format!("{} / {}", label.zh, label.en),
                actual,
                familiarity: Some(clamp01(item.score)),
                city_type: None,
                country: String::new(),
                province: String::new(),
            })
        })
        .collect()
}

struct ScoredCity<'a> {
    city: &'a CityRecord,
    region: String,
    fame: f64,
    gdp_value: f64,
    area_value: f64,
    has_metrics: bool,
    score: f64,
}

impl ScoredCity<'_> {
    fn key(&self) -> String {
        city_key(self.city)
    }
}

fn city_key(city: &CityRecord) -> String {
    format!(
        "{}|{}",
        normalize_geo_name(&city.name),
        normalize_geo_name(&city.country)
    )
}

/// World-city pool: composite-scored, admissibility-filtered, then
/// region-balanced so one continent cannot crowd out the rest. When the
/// strict filter leaves the pool short, a relaxed pass tops it up.
pub fn build_world_city_questions(
    cities: &[CityRecord],
    metrics: &MetricsIndex,
    labels: &LabelCatalog,
    pool: CityPool,
) -> Vec<Question> {
    let cap = pool.cap();

    let mut scored: Vec<ScoredCity> = cities
        .iter()
        .map(|city| {
            let country_metrics = metrics.resolve(&city.country);
            let gdp_score = country_metrics
                .and_then(|m| m.gdp_score())
                .or_else(|| country_metrics.and_then(|m| m.combined_score()))
                .unwrap_or(0.24);
            let type_score = if city.kind == CityType::Major { 0.92 } else { 0.72 };
            let fame = world_city_fame(city);
            let region = country_metrics
                .and_then(|m| m.region.clone())
                .unwrap_or_else(|| "Other".to_string());
            let score = tables::WEIGHT_COUNTRY_GDP * gdp_score
                + tables::WEIGHT_CITY_FAME * fame
                + tables::WEIGHT_CITY_TYPE * type_score;
            ScoredCity {
                city,
                region,
                fame,
                gdp_value: country_metrics.and_then(|m| m.gdp_value()).unwrap_or(0.0),
                area_value: country_metrics.and_then(|m| m.area_value()).unwrap_or(0.0),
                has_metrics: country_metrics.is_some(),
                score,
            }
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let strict: Vec<&ScoredCity> = scored
        .iter()
        .filter(|item| is_world_city_candidate(item, pool, false))
        .collect();
    let mut selected = select_with_region_balance(&strict, pool, cap);

    let target = cap.min(scored.len());
    if selected.len() < target {
        let mut picked: Vec<String> = selected.iter().map(|c| city_key(c)).collect();
        for item in scored.iter().filter(|i| is_world_city_candidate(i, pool, true)) {
            if selected.len() >= target {
                break;
            }
            let key = item.key();
            if !picked.contains(&key) {
                picked.push(key);
                selected.push(item.city);
            }
        }
    }

    let score_for = |city: &CityRecord| -> f64 {
        let key = city_key(city);
        scored
            .iter()
            .find(|item| item.key() == key)
            .map(|item| item.score)
            .unwrap_or(0.0)
    };

    selected
        .into_iter()
        .map(|city| {
            let label = labels.label_for(&city.country);
            let display = if !city.en_name.is_empty() && city.en_name != city.name {
                format!("{} / {}", city.name, city.en_name)
            } else {
                city.name.clone()
            };
            let prompt = if city.kind == CityType::Capital {
                format!("{} / {} 首都（{display}）", label.zh, label.en)
            } else {
                format!("{} / {} 主要城市（{display}）", label.zh, label.en)
            };
            Question {
                kind: QuestionKind::City,
                name: city.name.clone(),
                prompt,
                actual: city.position,
                familiarity: Some(clamp01(score_for(city))),
                city_type: Some(city.kind),
                country: city.country.clone(),
                province: city.province.clone(),
            }
        })
        .collect()
}

/// Admissibility gate: blocks the territory blocklist outright, then holds
/// small or economically minor countries to a higher fame bar. Top50 is
/// much stricter than Top200; the relaxed variant lowers each bar a notch.
fn is_world_city_candidate(item: &ScoredCity, pool: CityPool, relaxed: bool) -> bool {
    if tables::is_blocked_country(&normalize_geo_name(&item.city.country)) {
        return false;
    }

    let fame = item.fame;
    let gdp = item.gdp_value;
    let area = item.area_value;

    if pool == CityPool::Top50 {
        if !item.has_metrics {
            return fame >= if relaxed { 0.86 } else { 0.92 };
        }
        if !relaxed && item.city.kind != CityType::Major && fame < 0.9 {
            return false;
        }
        if gdp < 5e10 && fame < if relaxed { 0.9 } else { 0.94 } {
            return false;
        }
        if gdp < 1.2e11 && area < 2.2e4 && fame < if relaxed { 0.86 } else { 0.9 } {
            return false;
        }
        if area < 1500.0 && fame < if relaxed { 0.9 } else { 0.95 } {
            return false;
        }
        return true;
    }

    if !item.has_metrics {
        return fame >= if relaxed { 0.74 } else { 0.82 };
    }
    if gdp < 2e10 && area < 1e4 && fame < if relaxed { 0.75 } else { 0.82 } {
        return false;
    }
    if area < 800.0 && fame < if relaxed { 0.8 } else { 0.88 } {
        return false;
    }
    true
}

/// Fill each region's minimum quota from its best-scored cities, then top
/// up globally by score until the cap.
fn select_with_region_balance<'a>(
    scored: &[&'a ScoredCity<'a>],
    pool: CityPool,
    cap: usize,
) -> Vec<&'a CityRecord> {
    let target = cap.min(scored.len());
    let mut selected: Vec<&CityRecord> = Vec::new();
    let mut picked: Vec<String> = Vec::new();

    for (region, top50_min, top200_min) in tables::WORLD_CITY_REGION_MINIMUMS {
        let quota = match pool {
            CityPool::Top50 => top50_min,
            CityPool::Top200 => top200_min,
        };
        let mut taken = 0;
        for item in scored.iter().filter(|i| i.region == region) {
            if taken >= quota {
                break;
            }
            let key = item.key();
            if !picked.contains(&key) {
                picked.push(key);
                selected.push(item.city);
                taken += 1;
            }
        }
    }

    for item in scored {
        if selected.len() >= target {
            break;
        }
        let key = item.key();
        if !picked.contains(&key) {
            picked.push(key);
            selected.push(item.city);
        }
    }

    selected.truncate(target);
    selected
}
