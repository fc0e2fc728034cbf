//! Headless simulation harness.
//!
//! Drives a full journey session against a manually advanced clock, one
//! simulated second per iteration, collecting everything the engine emits
//! into a run summary for reporting.
use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use colored::Colorize;
use kereta_core::{
    BadgeAwarder, Clock, DataLoader, FeedConfig, ManualClock, MemoryStore, MessageSink, TourData,
    TourEngine, TriggerMessage,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Embedded default catalog: the Bali sightseeing loop.
const BALI_TOUR_JSON: &str = include_str!("../assets/data/bali_tour.json");

/// Loader for the embedded catalog asset.
pub struct EmbeddedCatalog;

impl DataLoader for EmbeddedCatalog {
    type Error = kereta_core::CatalogError;

    fn load_tour_data(&self) -> Result<TourData, Self::Error> {
        TourData::from_json(BALI_TOUR_JSON)
    }
}

/// Parameters of one headless run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub seed: u64,
    pub feed: FeedConfig,
    pub hours: f64,
    pub verbose: bool,
}

/// One delivered message, for the report.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRecord {
    pub at: DateTime<Utc>,
    pub topic: String,
    pub text: String,
}

/// One unlock, for the report.
#[derive(Debug, Clone, Serialize)]
pub struct UnlockSummary {
    pub checkpoint_id: String,
    pub at: DateTime<Utc>,
    pub distance_m: f64,
}

/// Aggregated outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub simulated_hours: f64,
    pub ticks: u64,
    pub fixes: u64,
    pub unlocks: Vec<UnlockSummary>,
    pub messages: Vec<MessageRecord>,
    pub messages_by_topic: BTreeMap<String, u64>,
    pub badges: Vec<String>,
    pub final_progress_percent: f32,
}

/// Console sink that prints messages as they arrive and records them.
struct ConsoleSink {
    verbose: bool,
    records: Vec<MessageRecord>,
    now: DateTime<Utc>,
}

impl ConsoleSink {
    fn new(verbose: bool, start: DateTime<Utc>) -> Self {
        Self {
            verbose,
            records: Vec::new(),
            now: start,
        }
    }
}

impl MessageSink for ConsoleSink {
    fn emit(&mut self, message: &TriggerMessage) -> bool {
        let topic = format!("{:?}", message.topic);
        if self.verbose {
            println!(
                "  {} {} {}",
                self.now.format("%H:%M:%S").to_string().dimmed(),
                format!("[{topic}]").cyan(),
                message.text
            );
        }
        self.records.push(MessageRecord {
            at: self.now,
            topic,
            text: message.text.clone(),
        });
        true
    }
}

/// Badge port that records award order.
#[derive(Default)]
struct ConsoleBadgePort {
    verbose: bool,
    awards: Vec<String>,
}

impl BadgeAwarder for ConsoleBadgePort {
    fn award(&mut self, badge_id: &str) {
        if self.verbose {
            println!("  {} {}", "🏅".yellow(), badge_id.yellow());
        }
        self.awards.push(badge_id.to_string());
    }
}

/// Run one simulated journey and aggregate what the engine produced.
///
/// # Errors
///
/// Returns an error when the embedded catalog fails to load or the feed
/// cannot be built over its route.
pub fn run_simulation(config: &RunConfig) -> Result<RunSummary> {
    // A fixed departure keeps runs reproducible; 08:00 hits the morning
    // greeting window right away.
    let departure = Utc.with_ymd_and_hms(2024, 5, 4, 8, 0, 0).unwrap();
    let clock = Rc::new(ManualClock::new(departure));
    let engine = TourEngine::new(EmbeddedCatalog, MemoryStore::default());
    let mut session = engine.create_session(config.feed, config.seed, clock.clone())?;

    let mut sink = ConsoleSink::new(config.verbose, departure);
    let mut badge_port = ConsoleBadgePort {
        verbose: config.verbose,
        ..ConsoleBadgePort::default()
    };

    session.begin("sim-booking");
    let total_seconds = (config.hours * 3600.0).max(1.0) as u64;
    let mut ticks = 0u64;
    let mut fixes = 0u64;
    let mut unlocks = Vec::new();

    for _ in 0..total_seconds {
        clock.advance(Duration::seconds(1));
        sink.now = clock.now();
        let outcome = session.tick(&mut sink, &mut badge_port);
        ticks += 1;
        fixes += outcome.fixes.len() as u64;
        for event in outcome.unlocks {
            unlocks.push(UnlockSummary {
                checkpoint_id: event.checkpoint_id,
                at: event.unlocked_at,
                distance_m: event.distance_m,
            });
        }
    }
    session.shutdown();

    let final_progress_percent = session
        .lifecycle()
        .journey()
        .map_or(0.0, |journey| journey.progress_percent);

    let mut messages_by_topic: BTreeMap<String, u64> = BTreeMap::new();
    for record in &sink.records {
        *messages_by_topic.entry(record.topic.clone()).or_default() += 1;
    }

    Ok(RunSummary {
        seed: config.seed,
        simulated_hours: config.hours,
        ticks,
        fixes,
        unlocks,
        messages: sink.records,
        messages_by_topic,
        badges: badge_port.awards,
        final_progress_percent,
    })
}

/// Render the summary for the console.
pub fn render_console(summary: &RunSummary, out: &mut dyn std::io::Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Journey Summary".bold())?;
    writeln!(out, "{}", "-".repeat(32))?;
    writeln!(out, "seed:             {}", summary.seed)?;
    writeln!(out, "simulated hours:  {:.1}", summary.simulated_hours)?;
    writeln!(out, "ticks / fixes:    {} / {}", summary.ticks, summary.fixes)?;
    writeln!(out, "final progress:   {:.1}%", summary.final_progress_percent)?;
    writeln!(out, "checkpoints unlocked: {}", summary.unlocks.len())?;
    for unlock in &summary.unlocks {
        writeln!(
            out,
            "  {} {} ({:.0} m at {})",
            "✓".green(),
            unlock.checkpoint_id,
            unlock.distance_m,
            unlock.at.format("%H:%M:%S")
        )?;
    }
    writeln!(out, "badges: {}", summary.badges.join(", "))?;
    writeln!(out, "messages by topic:")?;
    for (topic, count) in &summary.messages_by_topic {
        writeln!(out, "  {topic:20} {count}")?;
    }
    Ok(())
}

/// Render the summary as pretty JSON.
///
/// # Errors
///
/// Returns an error when serialization or the write fails.
pub fn render_json(summary: &RunSummary, out: &mut dyn std::io::Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)?;
    Ok(())
}
