//! Cooldown-gated contextual message scheduling.
//!
//! The scheduler is an explicit object with a constructor-injected cooldown
//! table and seeded RNG, never ambient singletons. All of its mutable state
//! (fired-history map, current-area pointer) is transient and scoped to one
//! running session; nothing here is persisted.
use crate::BadgeAwarder;
use crate::MessageSink;
use crate::badges::BadgeBook;
use crate::constants::{
    BADGE_MILESTONE_PREFIX, COOLDOWN_FOOD_SUGGESTION_MIN, COOLDOWN_LOCATION_SUGGESTION_MIN,
    COOLDOWN_MILESTONE_MIN, COOLDOWN_NEAR_CHECKPOINT_MIN, COOLDOWN_TIME_GREETING_MIN,
    COOLDOWN_TIME_SUGGESTION_MIN, MILESTONE_THRESHOLDS, NEAR_ALERT_RADIUS_M,
};
use crate::data::{AreaOfInterest, Checkpoint, TourData};
use crate::geo;
use crate::position::PositionFix;
use crate::unlocks::UnlockLedger;
use chrono::{DateTime, Duration, Timelike, Utc};
use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Notification topics rate-limited by the cooldown table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    NearCheckpoint,
    LocationSuggestion,
    FoodSuggestion,
    TimeGreeting,
    TimeSuggestion,
    Milestone,
}

/// Outbound contextual message delivered through the sink port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerMessage {
    pub text: String,
    pub topic: Topic,
}

/// Per-topic minimum interval between emissions for the same key. The
/// values are policy, not physics; tests inject compressed tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownTable {
    cooldowns: HashMap<Topic, Duration>,
}

impl Default for CooldownTable {
    fn default() -> Self {
        let cooldowns = HashMap::from([
            (
                Topic::NearCheckpoint,
                Duration::minutes(COOLDOWN_NEAR_CHECKPOINT_MIN),
            ),
            (
                Topic::LocationSuggestion,
                Duration::minutes(COOLDOWN_LOCATION_SUGGESTION_MIN),
            ),
            (
                Topic::FoodSuggestion,
                Duration::minutes(COOLDOWN_FOOD_SUGGESTION_MIN),
            ),
            (
                Topic::TimeGreeting,
                Duration::minutes(COOLDOWN_TIME_GREETING_MIN),
            ),
            (
                Topic::TimeSuggestion,
                Duration::minutes(COOLDOWN_TIME_SUGGESTION_MIN),
            ),
            (Topic::Milestone, Duration::minutes(COOLDOWN_MILESTONE_MIN)),
        ]);
        Self { cooldowns }
    }
}

impl CooldownTable {
    #[must_use]
    pub fn cooldown(&self, topic: Topic) -> Duration {
        self.cooldowns
            .get(&topic)
            .copied()
            .unwrap_or_else(|| Duration::minutes(COOLDOWN_MILESTONE_MIN))
    }

    /// Override one topic's cooldown (test compression, product tuning).
    pub fn set(&mut self, topic: Topic, cooldown: Duration) {
        self.cooldowns.insert(topic, cooldown);
    }
}

/// Named local-time windows for time-driven messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeWindow {
    Morning,
    Lunch,
    Afternoon,
    Sunset,
    Dinner,
}

impl TimeWindow {
    const ALL: [Self; 5] = [
        Self::Morning,
        Self::Lunch,
        Self::Afternoon,
        Self::Sunset,
        Self::Dinner,
    ];

    fn contains_hour(self, hour: u32) -> bool {
        match self {
            Self::Morning => (6..10).contains(&hour),
            Self::Lunch => (11..14).contains(&hour),
            Self::Afternoon => (14..17).contains(&hour),
            Self::Sunset => (17..19).contains(&hour),
            Self::Dinner => (19..22).contains(&hour),
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Lunch => "lunch",
            Self::Afternoon => "afternoon",
            Self::Sunset => "sunset",
            Self::Dinner => "dinner",
        }
    }

    const fn topic(self) -> Topic {
        match self {
            Self::Morning => Topic::TimeGreeting,
            Self::Lunch | Self::Dinner => Topic::FoodSuggestion,
            Self::Afternoon | Self::Sunset => Topic::TimeSuggestion,
        }
    }

    fn message(self, area: Option<&str>) -> String {
        match self {
            Self::Morning => area.map_or_else(
                || "Good morning! A fresh stretch of the island is rolling past.".to_string(),
                |name| format!("Good morning! The light over {name} is at its best right now."),
            ),
            Self::Lunch => {
                "It's lunchtime — the dining car is serving, or keep an eye out for a warung at the next stop.".to_string()
            }
            Self::Afternoon => area.map_or_else(
                || "A calm afternoon stretch — a fine moment for photos from the window.".to_string(),
                |name| format!("A calm afternoon around {name} — a fine moment for photos from the window."),
            ),
            Self::Sunset => {
                "The sun sets soon. The west-facing windows have the best view.".to_string()
            }
            Self::Dinner => "Dinnertime — the dining car is open for the evening service.".to_string(),
        }
    }
}

/// Cooldown-gated notifier combining area detection, nearest-checkpoint
/// alerts, time-of-day windows, and milestone crossings.
#[derive(Debug, Clone)]
pub struct TriggerScheduler {
    cooldowns: CooldownTable,
    last_fired: HashMap<(Topic, String), DateTime<Utc>>,
    current_area: Option<String>,
    message_rng: SmallRng,
}

impl TriggerScheduler {
    /// Build a scheduler with the given policy table and session seed. The
    /// seed drives candidate-message choice, so identical seeds replay
    /// identical wording.
    #[must_use]
    pub fn new(cooldowns: CooldownTable, seed: u64) -> Self {
        Self {
            cooldowns,
            last_fired: HashMap::new(),
            current_area: None,
            message_rng: SmallRng::seed_from_u64(derive_stream_seed(seed, b"messages")),
        }
    }

    /// True when `(topic, key)` has never fired, or its cooldown elapsed.
    #[must_use]
    pub fn can_fire(&self, topic: Topic, key: &str, now: DateTime<Utc>) -> bool {
        self.last_fired
            .get(&(topic, key.to_string()))
            .is_none_or(|last| now - *last > self.cooldowns.cooldown(topic))
    }

    /// Name of the area the user is currently inside, if any.
    #[must_use]
    pub fn current_area(&self) -> Option<&str> {
        self.current_area.as_deref()
    }

    /// Record the firing and deliver best-effort. The cooldown is recorded
    /// before the sink call and kept regardless of its outcome, so a failed
    /// delivery cannot cause a retry storm.
    fn dispatch(
        &mut self,
        topic: Topic,
        key: &str,
        text: String,
        now: DateTime<Utc>,
        sink: &mut dyn MessageSink,
    ) {
        self.last_fired.insert((topic, key.to_string()), now);
        let message = TriggerMessage { text, topic };
        log::debug!("firing {topic:?} for key {key}");
        if !sink.emit(&message) {
            log::warn!("message sink dropped a {topic:?} notification");
        }
    }

    /// Location-driven evaluation, run on every position tick.
    pub fn on_position(
        &mut self,
        fix: &PositionFix,
        data: &TourData,
        ledger: &UnlockLedger,
        now: DateTime<Utc>,
        sink: &mut dyn MessageSink,
    ) {
        self.evaluate_areas(fix, &data.areas, now, sink);
        self.evaluate_near_checkpoint(fix, &data.checkpoints, ledger, now, sink);
    }

    fn evaluate_areas(
        &mut self,
        fix: &PositionFix,
        areas: &[AreaOfInterest],
        now: DateTime<Utc>,
        sink: &mut dyn MessageSink,
    ) {
        let inside = areas
            .iter()
            .find(|area| area.area().contains(fix.coordinates));
        let Some(area) = inside else {
            if self.current_area.take().is_some() {
                log::debug!("left all areas of interest");
            }
            return;
        };
        if self.current_area.as_deref() == Some(area.name.as_str()) {
            return;
        }
        self.current_area = Some(area.name.clone());
        if !self.can_fire(Topic::LocationSuggestion, &area.name, now) {
            return;
        }
        let text = self.pick_area_suggestion(area);
        self.dispatch(Topic::LocationSuggestion, &area.name, text, now, sink);
    }

    fn pick_area_suggestion(&mut self, area: &AreaOfInterest) -> String {
        if area.suggestions.is_empty() {
            return format!(
                "You're passing through {} — worth a look out the window.",
                area.name
            );
        }
        let index = self.message_rng.gen_range(0..area.suggestions.len());
        area.suggestions[index].clone()
    }

    fn evaluate_near_checkpoint(
        &mut self,
        fix: &PositionFix,
        checkpoints: &[Checkpoint],
        ledger: &UnlockLedger,
        now: DateTime<Utc>,
        sink: &mut dyn MessageSink,
    ) {
        let nearest = checkpoints
            .iter()
            .filter_map(|checkpoint| {
                let distance_m = geo::distance_meters(fix.coordinates, checkpoint.coordinates);
                (distance_m <= NEAR_ALERT_RADIUS_M).then_some((checkpoint, distance_m))
            })
            .min_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.0.id.cmp(&b.0.id))
            });
        let Some((checkpoint, distance_m)) = nearest else {
            return;
        };
        if !self.can_fire(Topic::NearCheckpoint, &checkpoint.id, now) {
            return;
        }
        let rounded = distance_m.round() as i64;
        let text = if ledger.contains(&checkpoint.id) {
            format!(
                "You're {rounded} m from {}, which you've already unlocked. Enjoy the view this time around.",
                checkpoint.name
            )
        } else {
            format!(
                "{} is about {rounded} m away. Keep your eyes out — you're close enough to unlock it!",
                checkpoint.name
            )
        };
        self.dispatch(Topic::NearCheckpoint, &checkpoint.id, text, now, sink);
    }

    /// Time-driven evaluation, run on the poll ticker independently of
    /// position.
    pub fn on_clock(&mut self, now: DateTime<Utc>, sink: &mut dyn MessageSink) {
        let hour = now.hour();
        for window in TimeWindow::ALL {
            if !window.contains_hour(hour) {
                continue;
            }
            if !self.can_fire(window.topic(), window.key(), now) {
                continue;
            }
            let text = window.message(self.current_area.as_deref());
            self.dispatch(window.topic(), window.key(), text, now, sink);
        }
    }

    /// Milestone evaluation, run whenever the unlock count changes. Fires
    /// the bracket the progress ratio currently falls in, at most once per
    /// threshold, and awards the matching badge.
    pub fn on_progress(
        &mut self,
        unlocked: usize,
        total: usize,
        now: DateTime<Utc>,
        sink: &mut dyn MessageSink,
        book: &mut BadgeBook,
        badge_port: &mut dyn BadgeAwarder,
    ) {
        if total == 0 {
            return;
        }
        let progress = unlocked as f32 / total as f32;
        let Some((percent, _)) = MILESTONE_THRESHOLDS
            .iter()
            .rev()
            .find(|(_, ratio)| progress >= *ratio)
        else {
            return;
        };
        let label = percent.to_string();
        if !self.can_fire(Topic::Milestone, &label, now) {
            return;
        }
        let text = milestone_message(*percent);
        self.dispatch(Topic::Milestone, &label, text, now, sink);
        book.award(&format!("{BADGE_MILESTONE_PREFIX}{percent}"), badge_port);
    }
}

fn milestone_message(percent: u8) -> String {
    match percent {
        25 => "A quarter of the route's checkpoints unlocked — the journey is just warming up!",
        50 => "Halfway there: half the checkpoints on this route are yours.",
        75 => "Three quarters of the checkpoints unlocked. The finish line is in sight.",
        _ => "Every checkpoint on the route unlocked. What a journey!",
    }
    .to_string()
}

/// Derive a per-domain RNG seed from the session seed, so adding streams
/// later never shifts existing draws.
fn derive_stream_seed(session_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac = Hmac::<Sha256>::new_from_slice(&session_seed.to_le_bytes())
        .expect("64-bit seed is a valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use chrono::TimeZone;

    #[derive(Default)]
    struct CollectingSink {
        messages: Vec<TriggerMessage>,
        reject: bool,
    }

    impl MessageSink for CollectingSink {
        fn emit(&mut self, message: &TriggerMessage) -> bool {
            if self.reject {
                return false;
            }
            self.messages.push(message.clone());
            true
        }
    }

    #[derive(Default)]
    struct NullPort;

    impl BadgeAwarder for NullPort {
        fn award(&mut self, _badge_id: &str) {}
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 4, 8, 0, 0).unwrap()
    }

    fn scheduler() -> TriggerScheduler {
        TriggerScheduler::new(CooldownTable::default(), 1337)
    }

    fn fix_at(coordinates: Coordinate) -> PositionFix {
        PositionFix {
            coordinates,
            accuracy_m: Some(5.0),
            heading_deg: None,
            speed_mps: None,
            timestamp: t0(),
            progress: 0.0,
        }
    }

    fn ubud_area() -> AreaOfInterest {
        AreaOfInterest {
            name: "Ubud".to_string(),
            center: Coordinate::new(-8.5069, 115.2625),
            radius_km: 5.0,
            suggestions: vec![
                "The market opens early.".to_string(),
                "The palace dance starts at dusk.".to_string(),
            ],
        }
    }

    fn checkpoint(id: &str, coordinates: Coordinate) -> Checkpoint {
        Checkpoint {
            id: id.to_string(),
            name: id.to_string(),
            coordinates,
            unlock_radius_m: 300.0,
            category: String::new(),
            region: String::new(),
            badge_id: format!("badge.{id}"),
        }
    }

    #[test]
    fn cooldown_gates_open_shut_then_reopen() {
        let mut scheduler = scheduler();
        let mut sink = CollectingSink::default();
        assert!(scheduler.can_fire(Topic::NearCheckpoint, "tanah-lot", t0()));

        scheduler.dispatch(
            Topic::NearCheckpoint,
            "tanah-lot",
            "hi".to_string(),
            t0(),
            &mut sink,
        );
        // Immediately after, and just inside the window: shut.
        assert!(!scheduler.can_fire(Topic::NearCheckpoint, "tanah-lot", t0()));
        assert!(!scheduler.can_fire(
            Topic::NearCheckpoint,
            "tanah-lot",
            t0() + Duration::minutes(60)
        ));
        // After the cooldown: open again.
        assert!(scheduler.can_fire(
            Topic::NearCheckpoint,
            "tanah-lot",
            t0() + Duration::minutes(60) + Duration::seconds(1)
        ));
        // Other keys are independent.
        assert!(scheduler.can_fire(Topic::NearCheckpoint, "ubud", t0()));
    }

    #[test]
    fn area_entry_fires_once_and_pointer_clears_outside() {
        let mut scheduler = scheduler();
        let mut sink = CollectingSink::default();
        let data = TourData {
            areas: vec![ubud_area()],
            ..TourData::empty()
        };
        let ledger = UnlockLedger::new();
        let center = fix_at(Coordinate::new(-8.5069, 115.2625));

        scheduler.on_position(&center, &data, &ledger, t0(), &mut sink);
        assert_eq!(sink.messages.len(), 1);
        assert_eq!(sink.messages[0].topic, Topic::LocationSuggestion);
        assert!(ubud_area().suggestions.contains(&sink.messages[0].text));
        assert_eq!(scheduler.current_area(), Some("Ubud"));

        // Same position one second later: inside cooldown, same area.
        scheduler.on_position(&center, &data, &ledger, t0() + Duration::seconds(1), &mut sink);
        assert_eq!(sink.messages.len(), 1);

        // ~8 km from the center (3 km outside the radius): pointer clears.
        let outside = fix_at(Coordinate::new(-8.5788, 115.2625));
        scheduler.on_position(&outside, &data, &ledger, t0() + Duration::seconds(2), &mut sink);
        assert_eq!(scheduler.current_area(), None);
        assert_eq!(sink.messages.len(), 1);
    }

    #[test]
    fn reentry_during_cooldown_updates_pointer_silently() {
        let mut scheduler = scheduler();
        let mut sink = CollectingSink::default();
        let data = TourData {
            areas: vec![ubud_area()],
            ..TourData::empty()
        };
        let ledger = UnlockLedger::new();
        let center = fix_at(Coordinate::new(-8.5069, 115.2625));
        let outside = fix_at(Coordinate::new(-8.5788, 115.2625));

        scheduler.on_position(&center, &data, &ledger, t0(), &mut sink);
        scheduler.on_position(&outside, &data, &ledger, t0() + Duration::minutes(1), &mut sink);
        scheduler.on_position(&center, &data, &ledger, t0() + Duration::minutes(2), &mut sink);
        assert_eq!(scheduler.current_area(), Some("Ubud"));
        assert_eq!(sink.messages.len(), 1, "cooldown still blocks the re-entry");
    }

    #[test]
    fn nearest_checkpoint_alert_frames_discovery_and_revisit() {
        let mut scheduler = scheduler();
        let mut sink = CollectingSink::default();
        let here = Coordinate::new(-8.60, 115.30);
        // ~120 m and ~330 m away.
        let near = checkpoint("near", Coordinate::new(-8.5989, 115.30));
        let far = checkpoint("far", Coordinate::new(-8.597, 115.30));
        let data = TourData {
            checkpoints: vec![far, near],
            ..TourData::empty()
        };
        let mut ledger = UnlockLedger::new();

        scheduler.on_position(&fix_at(here), &data, &ledger, t0(), &mut sink);
        assert_eq!(sink.messages.len(), 1);
        let text = &sink.messages[0].text;
        assert!(text.contains("near"), "nearest checkpoint wins: {text}");
        assert!(text.contains("unlock it"), "discovery framing: {text}");
        assert!(text.contains("122 m") || text.contains("123 m"), "{text}");

        // Unlock it, advance past the cooldown, and revisit.
        ledger.insert(crate::unlocks::UnlockRecord {
            checkpoint_id: "near".to_string(),
            unlocked_at: t0(),
        });
        let later = t0() + Duration::minutes(61);
        scheduler.on_position(&fix_at(here), &data, &ledger, later, &mut sink);
        assert_eq!(sink.messages.len(), 2);
        assert!(
            sink.messages[1].text.contains("already unlocked"),
            "revisit framing: {}",
            sink.messages[1].text
        );
    }

    #[test]
    fn time_windows_fire_within_their_hours_only() {
        let mut scheduler = scheduler();
        let mut sink = CollectingSink::default();

        // 08:00: morning greeting.
        scheduler.on_clock(t0(), &mut sink);
        assert_eq!(sink.messages.len(), 1);
        assert_eq!(sink.messages[0].topic, Topic::TimeGreeting);

        // Same hour again: cooldown holds.
        scheduler.on_clock(t0() + Duration::minutes(1), &mut sink);
        assert_eq!(sink.messages.len(), 1);

        // 12:00: lunch food suggestion.
        scheduler.on_clock(t0() + Duration::hours(4), &mut sink);
        assert_eq!(sink.messages.len(), 2);
        assert_eq!(sink.messages[1].topic, Topic::FoodSuggestion);

        // 22:30: no window covers it.
        scheduler.on_clock(t0() + Duration::hours(14) + Duration::minutes(30), &mut sink);
        assert_eq!(sink.messages.len(), 2);
    }

    #[test]
    fn morning_greeting_interpolates_the_current_area() {
        let mut scheduler = scheduler();
        let mut sink = CollectingSink::default();
        let data = TourData {
            areas: vec![ubud_area()],
            ..TourData::empty()
        };
        let ledger = UnlockLedger::new();
        scheduler.on_position(
            &fix_at(Coordinate::new(-8.5069, 115.2625)),
            &data,
            &ledger,
            t0(),
            &mut sink,
        );
        scheduler.on_clock(t0() + Duration::minutes(1), &mut sink);
        let greeting = sink.messages.last().unwrap();
        assert_eq!(greeting.topic, Topic::TimeGreeting);
        assert!(greeting.text.contains("Ubud"), "{}", greeting.text);
    }

    #[test]
    fn milestones_fire_exactly_once_each_in_ascending_order() {
        let mut scheduler = scheduler();
        let mut sink = CollectingSink::default();
        let mut book = BadgeBook::new();
        let mut port = NullPort;

        for unlocked in [1usize, 1, 2, 2, 3, 4, 4] {
            scheduler.on_progress(unlocked, 4, t0(), &mut sink, &mut book, &mut port);
        }
        let milestone_texts: Vec<_> = sink
            .messages
            .iter()
            .filter(|m| m.topic == Topic::Milestone)
            .map(|m| m.text.clone())
            .collect();
        assert_eq!(milestone_texts.len(), 4);
        assert!(milestone_texts[0].contains("quarter"));
        assert!(milestone_texts[1].contains("Halfway"));
        assert!(milestone_texts[2].contains("Three quarters"));
        assert!(milestone_texts[3].contains("Every checkpoint"));
        assert!(book.has("badge.milestone.100"));
    }

    #[test]
    fn milestone_below_first_threshold_stays_silent() {
        let mut scheduler = scheduler();
        let mut sink = CollectingSink::default();
        let mut book = BadgeBook::new();
        let mut port = NullPort;
        scheduler.on_progress(1, 5, t0(), &mut sink, &mut book, &mut port);
        assert!(sink.messages.is_empty());
        scheduler.on_progress(0, 0, t0(), &mut sink, &mut book, &mut port);
        assert!(sink.messages.is_empty());
    }

    #[test]
    fn sink_failure_still_records_the_cooldown() {
        let mut scheduler = scheduler();
        let mut sink = CollectingSink {
            reject: true,
            ..CollectingSink::default()
        };
        let data = TourData {
            areas: vec![ubud_area()],
            ..TourData::empty()
        };
        let ledger = UnlockLedger::new();
        let center = fix_at(Coordinate::new(-8.5069, 115.2625));

        scheduler.on_position(&center, &data, &ledger, t0(), &mut sink);
        assert!(sink.messages.is_empty());
        // The cooldown was recorded despite the failed delivery.
        assert!(!scheduler.can_fire(Topic::LocationSuggestion, "Ubud", t0()));
    }

    #[test]
    fn same_seed_replays_the_same_suggestions() {
        let area = ubud_area();
        let mut first = TriggerScheduler::new(CooldownTable::default(), 99);
        let mut second = TriggerScheduler::new(CooldownTable::default(), 99);
        let picks_a: Vec<_> = (0..8).map(|_| first.pick_area_suggestion(&area)).collect();
        let picks_b: Vec<_> = (0..8).map(|_| second.pick_area_suggestion(&area)).collect();
        assert_eq!(picks_a, picks_b);

        let mut other = TriggerScheduler::new(CooldownTable::default(), 100);
        let picks_c: Vec<_> = (0..8).map(|_| other.pick_area_suggestion(&area)).collect();
        // Not a hard guarantee, but with eight draws over two options a
        // differing seed matching exactly is vanishingly unlikely.
        assert!(picks_a != picks_c || picks_a.iter().all(|p| p == &picks_a[0]));
    }

    #[test]
    fn compressed_cooldown_table_is_honored() {
        let mut table = CooldownTable::default();
        table.set(Topic::LocationSuggestion, Duration::seconds(1));
        let mut scheduler = TriggerScheduler::new(table, 7);
        let mut sink = CollectingSink::default();
        scheduler.dispatch(
            Topic::LocationSuggestion,
            "Ubud",
            "hello".to_string(),
            t0(),
            &mut sink,
        );
        assert!(!scheduler.can_fire(Topic::LocationSuggestion, "Ubud", t0()));
        assert!(scheduler.can_fire(
            Topic::LocationSuggestion,
            "Ubud",
            t0() + Duration::seconds(2)
        ));
    }
}
