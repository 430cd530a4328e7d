//! The game session: dataset loading, round lifecycle and tap evaluation.

use std::collections::BTreeMap;

use bank::builder::{
    build_china_capital_questions, build_china_province_questions,
    build_china_secondary_questions, build_world_city_questions,
    build_world_country_questions,
};
use bank::mode::{CityDifficulty, Mode, Scope, Settings};
use bank::question::QuestionKind;
use foundation::diag::DiagnosticsLog;
use foundation::math::{GeoPoint, Projection, ViewTransform, haversine_km, screen_to_geo};
use foundation::normalize_name;
use formats::datasets::{CityRecord, CountryMeta, MetricsFile, RawCity};
use formats::geojson::{RegionFeature, RegionSet, RegionSetError, find_feature_by_point};
use formats::metrics::{LabelCatalog, MetricsIndex, build_country_centers};
use formats::sanitize::{
    normalize_orientation, sanitize_china_cities, sanitize_world_cities,
    sanitize_world_countries,
};
use formats::validate::{ValidationReport, validate_capitals};
use rand::Rng;

use crate::input::{GestureTracker, PointerEvent, TapCheck};
use crate::round::{
    AUTO_ADVANCE_MS, CITY_HIT_THRESHOLD_KM, HistoryEntry, RecordBook, RoundState, Summary,
    TOTAL_QUESTIONS,
};
use crate::sampler::{RecencyBook, sample_flat, sample_progressive};

/// Raw dataset payloads, as fetched. All six are required.
#[derive(Debug, Clone, Copy)]
pub struct DatasetBundle<'a> {
    pub china_provinces: &'a str,
    pub china_cities: &'a str,
    pub world_countries: &'a str,
    pub world_cities: &'a str,
    pub country_meta: &'a str,
    pub country_metrics: &'a str,
}

#[derive(Debug)]
pub enum DatasetLoadError {
    ChinaProvinces(RegionSetError),
    WorldCountries(RegionSetError),
    ChinaCities(serde_json::Error),
    WorldCities(serde_json::Error),
    CountryMeta(serde_json::Error),
    CountryMetrics(serde_json::Error),
}

impl std::fmt::Display for DatasetLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetLoadError::ChinaProvinces(e) => write!(f, "china provinces: {e}"),
            DatasetLoadError::WorldCountries(e) => write!(f, "world countries: {e}"),
            DatasetLoadError::ChinaCities(e) => write!(f, "china cities: {e}"),
            DatasetLoadError::WorldCities(e) => write!(f, "world cities: {e}"),
            DatasetLoadError::CountryMeta(e) => write!(f, "country metadata: {e}"),
            DatasetLoadError::CountryMetrics(e) => write!(f, "country metrics: {e}"),
        }
    }
}

impl std::error::Error for DatasetLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetLoadError::ChinaProvinces(e) | DatasetLoadError::WorldCountries(e) => Some(e),
            DatasetLoadError::ChinaCities(e)
            | DatasetLoadError::WorldCities(e)
            | DatasetLoadError::CountryMeta(e)
            | DatasetLoadError::CountryMetrics(e) => Some(e),
        }
    }
}

/// Everything the quiz needs, fully sanitized. Loading is atomic: any
/// broken file fails the whole load and no partial state escapes.
#[derive(Debug, Clone)]
pub struct QuizData {
    pub china_provinces: RegionSet,
    pub china_cities: Vec<CityRecord>,
    pub world_countries: RegionSet,
    pub world_cities: Vec<CityRecord>,
    pub labels: LabelCatalog,
    pub metrics: MetricsIndex,
    pub country_centers: BTreeMap<String, GeoPoint>,
    pub validation: ValidationReport,
}

impl QuizData {
    /// Parse, sanitize and cross-validate the six dataset files.
    /// `zh_names` maps 2-letter country codes to localized display names.
    pub fn load(
        bundle: DatasetBundle<'_>,
        zh_names: &BTreeMap<String, String>,
    ) -> Result<Self, DatasetLoadError> {
        let mut china_provinces = RegionSet::from_geojson_str(bundle.china_provinces)
            .map_err(DatasetLoadError::ChinaProvinces)?;
        normalize_orientation(&mut china_provinces);

        let mut world_countries = RegionSet::from_geojson_str(bundle.world_countries)
            .map_err(DatasetLoadError::WorldCountries)?;
        normalize_orientation(&mut world_countries);
        sanitize_world_countries(&mut world_countries);

        let china_raw: Vec<RawCity> = serde_json::from_str(bundle.china_cities)
            .map_err(DatasetLoadError::ChinaCities)?;
        let china_cities = sanitize_china_cities(china_raw);

        let world_raw: Vec<RawCity> = serde_json::from_str(bundle.world_cities)
            .map_err(DatasetLoadError::WorldCities)?;
        let world_cities = sanitize_world_cities(world_raw);

        let meta: Vec<CountryMeta> =
            serde_json::from_str(bundle.country_meta).map_err(DatasetLoadError::CountryMeta)?;
        let metrics_file: MetricsFile = serde_json::from_str(bundle.country_metrics)
            .map_err(DatasetLoadError::CountryMetrics)?;

        let labels = LabelCatalog::build(&meta, zh_names);
        let metrics = MetricsIndex::build(metrics_file);
        let country_centers = build_country_centers(&meta);

        let validation = validate_capitals(
            &world_cities,
            &world_countries.features,
            &metrics,
            &country_centers,
        );

        Ok(Self {
            china_provinces,
            china_cities,
            world_countries,
            world_cities,
            labels,
            metrics,
            country_centers,
            validation,
        })
    }

    fn active_features(&self, mode: Mode) -> &[RegionFeature] {
        match mode.scope() {
            Scope::China => &self.china_provinces.features,
            Scope::World => &self.world_countries.features,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    /// The mode's question pool came up empty after filtering.
    EmptyPool,
    NoActiveRound,
    /// `advance` called while the current question is still unanswered.
    AwaitingAnswer,
}

impl std::fmt::Display for RoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundError::EmptyPool => write!(f, "question pool is empty for this mode"),
            RoundError::NoActiveRound => write!(f, "no round in progress"),
            RoundError::AwaitingAnswer => write!(f, "current question is unanswered"),
        }
    }
}

impl std::error::Error for RoundError {}

/// Why a pointer-up did not count as an answer. The question stays open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotAwaitingAnswer,
    SecondaryTouch,
    Gesture,
    Drag,
    /// Tap landed outside every map feature (or off the projection).
    OutsideMap,
    /// Distance came out non-finite; the tap cannot be scored.
    Unmeasurable,
}

/// A scored answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerResult {
    pub correct: bool,
    pub clicked_name: Option<String>,
    pub distance_km: f64,
    pub feedback: String,
    /// UI advice: advance automatically after this many milliseconds.
    pub auto_advance_ms: u64,
    pub is_last: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    Rejected(RejectReason),
    Answered(AnswerResult),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Next { index: usize, total: usize },
    Finished(Summary),
}

/// One player's session: owns the data, settings, recency memory, records
/// and the active round.
pub struct GameSession<R: Rng> {
    data: QuizData,
    settings: Settings,
    recency: RecencyBook,
    records: RecordBook,
    diag: DiagnosticsLog,
    gesture: GestureTracker,
    round: Option<RoundState>,
    rng: R,
}

impl<R: Rng> GameSession<R> {
    pub fn new(data: QuizData, settings: Settings, rng: R) -> Self {
        let mut diag = DiagnosticsLog::new();
        data.validation.log_summary(&mut diag);
        Self {
            data,
            settings,
            recency: RecencyBook::new(),
            records: RecordBook::new(),
            diag,
            gesture: GestureTracker::new(),
            round: None,
            rng,
        }
    }

    pub fn data(&self) -> &QuizData {
        &self.data
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn records(&self) -> &RecordBook {
        &self.records
    }

    pub fn diagnostics(&self) -> &DiagnosticsLog {
        &self.diag
    }

    pub fn drain_diagnostics(&mut self) -> Vec<foundation::diag::DiagEvent> {
        self.diag.drain()
    }

    /// Build and sample this mode's pool, then start a fresh round.
    pub fn start_round(&mut self, mode: Mode) -> Result<&RoundState, RoundError> {
        let questions = match mode {
            Mode::ProvinceClick => {
                let pool = build_china_province_questions(&self.data.china_provinces);
                sample_flat(mode, pool, TOTAL_QUESTIONS, &mut self.recency, &mut self.rng)
            }
            Mode::CityClick => {
                let mut pool = build_china_capital_questions(&self.data.china_cities);
                if self.settings.city_difficulty == CityDifficulty::Super {
                    pool.extend(build_china_secondary_questions());
                }
                sample_progressive(mode, pool, TOTAL_QUESTIONS, &mut self.recency, &mut self.rng)
            }
            Mode::WorldCountry => {
                let pool = build_world_country_questions(
                    &self.data.world_countries,
                    &self.data.metrics,
                    &self.data.labels,
                    self.settings.world_country_difficulty,
                );
                sample_progressive(mode, pool, TOTAL_QUESTIONS, &mut self.recency, &mut self.rng)
            }
            Mode::WorldCity => {
                let pool = build_world_city_questions(
                    &self.data.world_cities,
                    &self.data.metrics,
                    &self.data.labels,
                    self.settings.world_city_difficulty,
                );
                sample_progressive(mode, pool, TOTAL_QUESTIONS, &mut self.recency, &mut self.rng)
            }
        };

        if questions.is_empty() {
            return Err(RoundError::EmptyPool);
        }

        self.gesture = GestureTracker::new();
        self.diag.emit(
            "round_start",
            format!("{} with {} questions", mode.as_str(), questions.len()),
        );
        Ok(self.round.insert(RoundState::new(mode, questions)))
    }

    pub fn quit_round(&mut self) {
        self.round = None;
        self.gesture = GestureTracker::new();
    }

    pub fn pointer_down(&mut self, event: &PointerEvent, transform: ViewTransform) {
        self.gesture.pointer_down(event, transform);
    }

    pub fn pointer_cancel(&mut self, event: &PointerEvent) {
        self.gesture.pointer_cancel(event);
    }

    /// Interpret a pointer-up as an answer attempt.
    ///
    /// `hit_feature` is the name of the feature the renderer reports under
    /// the pointer, when it knows; otherwise the tap's geographic point is
    /// matched against the active feature set.
    pub fn pointer_up(
        &mut self,
        event: &PointerEvent,
        transform: ViewTransform,
        projection: &Projection,
        hit_feature: Option<&str>,
    ) -> AnswerOutcome {
        let position = match self.gesture.pointer_up(event, transform) {
            TapCheck::SecondaryTouch => {
                return AnswerOutcome::Rejected(RejectReason::SecondaryTouch);
            }
            TapCheck::Gesture => {
                self.diag.emit("gesture_skip", "pan/zoom detected, tap ignored");
                return AnswerOutcome::Rejected(RejectReason::Gesture);
            }
            TapCheck::Drag { moved_px } => {
                self.diag
                    .emit("drag_skip", format!("moved {moved_px:.2} px, tap ignored"));
                return AnswerOutcome::Rejected(RejectReason::Drag);
            }
            TapCheck::Tap { position } => position,
        };

        let Some(round) = self.round.as_mut() else {
            return AnswerOutcome::Rejected(RejectReason::NotAwaitingAnswer);
        };
        if !round.awaiting_answer {
            return AnswerOutcome::Rejected(RejectReason::NotAwaitingAnswer);
        }

        let geo = screen_to_geo(position.x, position.y, projection, transform);
        let features = self.data.active_features(round.mode);

        match round.mode.kind() {
            QuestionKind::Region => {
                let clicked_name = hit_feature.map(str::to_string).or_else(|| {
                    geo.and_then(|g| find_feature_by_point(g.lon, g.lat, features))
                        .map(|f| f.name.clone())
                });
                let Some(clicked_name) = clicked_name else {
                    self.diag.emit("region_click_miss", "tap outside every region");
                    return AnswerOutcome::Rejected(RejectReason::OutsideMap);
                };
                let result = Self::score_region_answer(round, &self.data, geo, clicked_name);
                self.diag.emit(
                    "region_click",
                    format!(
                        "{} -> {} ({})",
                        round.current_question().name,
                        result.clicked_name.as_deref().unwrap_or("-"),
                        if result.correct { "correct" } else { "wrong" }
                    ),
                );
                AnswerOutcome::Answered(result)
            }
            QuestionKind::City => {
                let Some(geo) = geo else {
                    self.diag.emit("city_click_invalid", "tap off the projection");
                    return AnswerOutcome::Rejected(RejectReason::OutsideMap);
                };
                let on_map = hit_feature.is_some()
                    || find_feature_by_point(geo.lon, geo.lat, features).is_some();
                if !on_map {
                    self.diag.emit("city_click_outside_map", "tap outside the basemap");
                    return AnswerOutcome::Rejected(RejectReason::OutsideMap);
                }

                let target = round.current_question().actual;
                let distance = haversine_km(geo, target);
                if !distance.is_finite() {
                    self.diag.emit("city_click_unmeasurable", "distance came out non-finite");
                    return AnswerOutcome::Rejected(RejectReason::Unmeasurable);
                }

                let result = Self::score_city_answer(round, geo, distance);
                self.diag.emit(
                    "city_click",
                    format!(
                        "{} at {:.1} km ({})",
                        round.history.last().map(|h| h.question.as_str()).unwrap_or("-"),
                        distance,
                        if result.correct { "hit" } else { "miss" }
                    ),
                );
                AnswerOutcome::Answered(result)
            }
        }
    }

    fn score_region_answer(
        round: &mut RoundState,
        data: &QuizData,
        geo: Option<GeoPoint>,
        clicked_name: String,
    ) -> AnswerResult {
        let target = round.current_question().clone();
        let correct = normalize_name(&clicked_name) == normalize_name(&target.name);
        if correct {
            round.score += 1;
        }

        round.history.push(HistoryEntry {
            question: target.name.clone(),
            actual: target.actual,
            player: geo,
            distance_km: 0.0,
            clicked_name: Some(clicked_name.clone()),
            correct,
        });
        round.awaiting_answer = false;

        let display = |name: &str| -> String {
            if round.mode == Mode::WorldCountry {
                let label = data.labels.label_for(name);
                format!("{} / {}", label.zh, label.en)
            } else {
                name.to_string()
            }
        };
        let feedback = if correct {
            "回答正确。".to_string()
        } else {
            format!(
                "未命中，点击了：{}。正确答案：{}。",
                display(&clicked_name),
                display(&target.name)
            )
        };

        AnswerResult {
            correct,
            clicked_name: Some(clicked_name),
            distance_km: 0.0,
            feedback,
            auto_advance_ms: AUTO_ADVANCE_MS,
            is_last: round.is_last_question(),
        }
    }

    fn score_city_answer(round: &mut RoundState, geo: GeoPoint, distance: f64) -> AnswerResult {
        let target = round.current_question().clone();
        let correct = distance <= CITY_HIT_THRESHOLD_KM;
        round.total_distance_km += distance;
        if correct {
            round.score += 1;
        }

        round.history.push(HistoryEntry {
            question: target.prompt.clone(),
            actual: target.actual,
            player: Some(geo),
            distance_km: distance,
            clicked_name: None,
            correct,
        });
        round.awaiting_answer = false;

        let feedback = if correct {
            format!("误差：{}", foundation::math::format_distance_km(distance))
        } else {
            format!(
                "误差：{}。正确位置：{}。",
                foundation::math::format_distance_km(distance),
                target.prompt
            )
        };

        AnswerResult {
            correct,
            clicked_name: None,
            distance_km: distance,
            feedback,
            auto_advance_ms: AUTO_ADVANCE_MS,
            is_last: round.is_last_question(),
        }
    }

    /// Move to the next question, or finish the round and settle records.
    pub fn advance(&mut self) -> Result<Advance, RoundError> {
        let round = self.round.as_mut().ok_or(RoundError::NoActiveRound)?;
        if round.awaiting_answer {
            return Err(RoundError::AwaitingAnswer);
        }

        if round.is_last_question() {
            let summary = Summary::from_round(round);
            let improved = self.records.update(&summary);
            self.diag.emit(
                "round_finish",
                format!(
                    "{}: {}/{} correct, {:.1} km total{}",
                    summary.mode.as_str(),
                    summary.correct,
                    summary.total_questions,
                    summary.total_distance_km,
                    if improved { ", new best" } else { "" }
                ),
            );
            self.round = None;
            return Ok(Advance::Finished(summary));
        }

        round.current += 1;
        round.awaiting_answer = true;
        Ok(Advance::Next {
            index: round.current,
            total: round.total_questions(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::math::{ProjectionKind, Vec2, geo_to_screen};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EMPTY_JSON_ARRAY: &str = "[]";
    const EMPTY_METRICS: &str = r#"{"countries": [], "iso3Metrics": {}, "nameToIso3": {}}"#;

    fn china_provinces_json() -> String {
        // Three squares standing in for provinces.
        r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "甲省"},
                 "geometry": {"type": "Polygon",
                  "coordinates": [[[100,30],[110,30],[110,40],[100,40],[100,30]]]}},
                {"type": "Feature", "properties": {"name": "乙省"},
                 "geometry": {"type": "Polygon",
                  "coordinates": [[[110,30],[120,30],[120,40],[110,40],[110,30]]]}},
                {"type": "Feature", "properties": {"name": "丙省"},
                 "geometry": {"type": "Polygon",
                  "coordinates": [[[100,20],[110,20],[110,30],[100,30],[100,20]]]}}
            ]
        }"#
        .to_string()
    }

    fn world_countries_json() -> String {
        r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "Boxland"},
                 "geometry": {"type": "Polygon",
                  "coordinates": [[[0,0],[20,0],[20,20],[0,20],[0,0]]]}}
            ]
        }"#
        .to_string()
    }

    fn china_cities_json() -> String {
        r#"[
            {"name": "石家庄市", "enName": "Shijiazhuang", "lat": 38.0428,
             "lon": 114.5149, "type": "capital", "province": "河北省"}
        ]"#
        .to_string()
    }

    fn load_data() -> QuizData {
        QuizData::load(
            DatasetBundle {
                china_provinces: &china_provinces_json(),
                china_cities: &china_cities_json(),
                world_countries: &world_countries_json(),
                world_cities: EMPTY_JSON_ARRAY,
                country_meta: EMPTY_JSON_ARRAY,
                country_metrics: EMPTY_METRICS,
            },
            &BTreeMap::new(),
        )
        .expect("load")
    }

    fn session() -> GameSession<StdRng> {
        GameSession::new(load_data(), Settings::default(), StdRng::seed_from_u64(11))
    }

    fn projection() -> Projection {
        Projection::new(ProjectionKind::Equirectangular, 100.0, Vec2::new(400.0, 300.0))
    }

    fn tap_at_geo(
        session: &mut GameSession<StdRng>,
        geo: GeoPoint,
        hit: Option<&str>,
    ) -> AnswerOutcome {
        let projection = projection();
        let transform = ViewTransform::identity();
        let screen = geo_to_screen(geo, &projection, transform).expect("projectable");
        let down = PointerEvent::mouse(screen.x, screen.y);
        session.pointer_down(&down, transform);
        session.pointer_up(&down, transform, &projection, hit)
    }

    #[test]
    fn load_fails_atomically_on_a_broken_file() {
        let result = QuizData::load(
            DatasetBundle {
                china_provinces: &china_provinces_json(),
                china_cities: "not json",
                world_countries: &world_countries_json(),
                world_cities: EMPTY_JSON_ARRAY,
                country_meta: EMPTY_JSON_ARRAY,
                country_metrics: EMPTY_METRICS,
            },
            &BTreeMap::new(),
        );
        assert!(matches!(result, Err(DatasetLoadError::ChinaCities(_))));
    }

    #[test]
    fn province_round_scores_one_of_three() {
        let mut s = session();
        s.start_round(Mode::ProvinceClick).expect("start");
        assert_eq!(s.round().unwrap().total_questions(), 3);

        for i in 0..3 {
            let target = s.round().unwrap().current_question().name.clone();
            // Answer the first question with its own name, the rest wrongly.
            let answer = if i == 0 { target.clone() } else { "丁省".to_string() };
            let outcome = tap_at_geo(
                &mut s,
                GeoPoint::new(35.0, 105.0),
                Some(&answer),
            );
            let AnswerOutcome::Answered(result) = outcome else {
                panic!("expected an answer, got {outcome:?}");
            };
            assert_eq!(result.correct, i == 0);
            assert_eq!(result.auto_advance_ms, AUTO_ADVANCE_MS);

            match s.advance().expect("advance") {
                Advance::Next { index, .. } => assert_eq!(index, i + 1),
                Advance::Finished(summary) => {
                    assert_eq!(i, 2);
                    assert_eq!(summary.correct, 1);
                    assert!((summary.accuracy - 1.0 / 3.0).abs() < 1e-12);
                    return;
                }
            }
        }
        panic!("round never finished");
    }

    #[test]
    fn city_threshold_is_inclusive_at_300_km() {
        let question = bank::question::Question {
            kind: QuestionKind::City,
            name: "石家庄市".to_string(),
            prompt: "河北省石家庄市".to_string(),
            actual: GeoPoint::new(38.0428, 114.5149),
            familiarity: None,
            city_type: None,
            country: "China".to_string(),
            province: "河北省".to_string(),
        };
        let mut round = RoundState::new(Mode::CityClick, vec![question.clone(), question]);

        let exact =
            GameSession::<StdRng>::score_city_answer(&mut round, GeoPoint::new(0.0, 0.0), 300.0);
        assert!(exact.correct);

        round.current = 1;
        round.awaiting_answer = true;
        let over =
            GameSession::<StdRng>::score_city_answer(&mut round, GeoPoint::new(0.0, 0.0), 300.01);
        assert!(!over.correct);
        assert!((round.total_distance_km - 600.01).abs() < 1e-9);
    }

    #[test]
    fn city_round_measures_distance_and_hits_within_threshold() {
        let mut s = session();
        s.start_round(Mode::CityClick).expect("start");
        let round = s.round().unwrap();
        assert_eq!(round.total_questions(), 1);
        let target = round.current_question().actual;

        // One degree of longitude at this latitude is well under 300 km.
        let tap = GeoPoint::new(target.lat, target.lon + 0.1);
        let outcome = tap_at_geo(&mut s, tap, None);
        let AnswerOutcome::Answered(result) = outcome else {
            panic!("expected an answer, got {outcome:?}");
        };
        assert!(result.correct);
        assert!(result.distance_km > 5.0 && result.distance_km < 15.0);

        let Advance::Finished(summary) = s.advance().expect("advance") else {
            panic!("expected the round to finish");
        };
        assert_eq!(summary.correct, 1);
        assert!((summary.total_distance_km - result.distance_km).abs() < 1e-9);
        assert!(s.records().entry(Mode::CityClick).is_some());
    }

    #[test]
    fn geo_fallback_resolves_the_clicked_region() {
        let mut s = session();
        s.start_round(Mode::ProvinceClick).expect("start");
        // No renderer hit: the tap's geographic point decides.
        let outcome = tap_at_geo(&mut s, GeoPoint::new(35.0, 105.0), None);
        let AnswerOutcome::Answered(result) = outcome else {
            panic!("expected an answer, got {outcome:?}");
        };
        assert_eq!(result.clicked_name.as_deref(), Some("甲省"));
    }

    #[test]
    fn taps_outside_every_region_are_rejected() {
        let mut s = session();
        s.start_round(Mode::ProvinceClick).expect("start");
        let outcome = tap_at_geo(&mut s, GeoPoint::new(-40.0, -100.0), None);
        assert_eq!(outcome, AnswerOutcome::Rejected(RejectReason::OutsideMap));
        // The question is still open.
        assert!(s.round().unwrap().awaiting_answer);
    }

    #[test]
    fn drag_does_not_consume_the_question() {
        let mut s = session();
        s.start_round(Mode::ProvinceClick).expect("start");
        let projection = projection();
        let transform = ViewTransform::identity();
        s.pointer_down(&PointerEvent::mouse(100.0, 100.0), transform);
        let outcome = s.pointer_up(
            &PointerEvent::mouse(200.0, 100.0),
            transform,
            &projection,
            Some("甲省"),
        );
        assert_eq!(outcome, AnswerOutcome::Rejected(RejectReason::Drag));
        assert!(s.round().unwrap().awaiting_answer);
    }

    #[test]
    fn advance_requires_an_answer_first() {
        let mut s = session();
        s.start_round(Mode::ProvinceClick).expect("start");
        assert_eq!(s.advance(), Err(RoundError::AwaitingAnswer));
        s.quit_round();
        assert_eq!(s.advance(), Err(RoundError::NoActiveRound));
    }

    #[test]
    fn empty_pool_refuses_to_start() {
        let mut s = session();
        // No world cities were loaded.
        assert_eq!(s.start_round(Mode::WorldCity).err(), Some(RoundError::EmptyPool));
    }

    #[test]
    fn validation_summary_lands_in_diagnostics() {
        let s = session();
        assert!(s.diagnostics().events().iter().any(|e| e.kind == "validation"));
    }
}
