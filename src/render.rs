//! Render sink: the notifications a session emits for the UI layer.

use serde::{Deserialize, Serialize};

use crate::games::memory::{CardId, CardView, Mode, Outcome, SessionConfig, format_clock, format_record};

/// Receiver of state-change notifications.
///
/// Implemented by the presentation layer. The session never reads back from it.
pub trait RenderSink {
    /// Handles one state change.
    fn render(&mut self, event: RenderEvent);
}

/// Observable state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderEvent {
    /// A new deck was dealt. Face-down cards carry no icon.
    Dealt {
        /// Session config the deck was dealt for.
        config: SessionConfig,
        /// Cards in table order.
        cards: Vec<CardView>,
    },
    /// A card turned face up.
    CardFlipped(CardView),
    /// Cards turned back face down.
    CardsUnflipped(Vec<CardId>),
    /// Cards became a matched pair.
    CardsMatched(Vec<CardId>),
    /// Matched pair counter changed.
    PairsChanged {
        /// Pairs matched.
        matched: usize,
        /// Pairs in the deck.
        total: usize,
    },
    /// Attempt counter changed.
    AttemptsChanged {
        /// Attempts used.
        used: u32,
        /// Attempt budget in limited mode.
        limit: Option<u32>,
    },
    /// Countdown value changed (timed mode).
    TimerTick {
        /// Seconds left.
        seconds_remaining: u32,
    },
    /// The session ended.
    SessionEnded(ResultSummary),
    /// The deck was cleared and the session returned to idle.
    Cleared,
    /// A non-fatal problem the UI may surface (e.g. a failed score write).
    Warning(String),
}

/// Mode-specific detail of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultDetail {
    /// Attempts used against the budget (limited mode).
    Attempts {
        /// Attempts used.
        used: u32,
        /// Attempt budget.
        limit: u32,
    },
    /// Elapsed play time (basic and timed modes).
    Elapsed {
        /// Whole seconds since the first flip.
        seconds: u64,
    },
}

/// How the finished session relates to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BestResult {
    /// This win set a new record.
    NewRecord,
    /// Stored record, if any, unchanged.
    Previous(Option<u32>),
}

/// Summary emitted when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Mode the session was played in.
    pub mode: Mode,
    /// Win or loss.
    pub outcome: Outcome,
    /// Pairs matched.
    pub matched_pairs: usize,
    /// Pairs in the deck.
    pub pair_count: usize,
    /// Mode-specific detail.
    pub detail: ResultDetail,
    /// Value compared against the record (seconds, attempts or seconds left).
    pub value: u32,
    /// Record status.
    pub best: BestResult,
}

impl ResultSummary {
    /// Current-result text, e.g. `Pairs: 6/6 | Attempts: 20/24`.
    pub fn current_text(&self) -> String {
        let detail = match self.detail {
            ResultDetail::Attempts { used, limit } => format!("Attempts: {}/{}", used, limit),
            ResultDetail::Elapsed { seconds } => format!("Time: {}", format_clock(seconds)),
        };
        format!("Pairs: {}/{} | {}", self.matched_pairs, self.pair_count, detail)
    }

    /// Best-result text: `New record!`, the stored record, or `No record yet`.
    pub fn best_text(&self) -> String {
        match self.best {
            BestResult::NewRecord => "New record!".to_string(),
            BestResult::Previous(Some(value)) => format!("Best: {}", format_record(self.mode, value)),
            BestResult::Previous(None) => "No record yet".to_string(),
        }
    }
}

impl std::fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.outcome, self.current_text(), self.best_text())
    }
}

/// Sink that records every event, for tests and headless drivers.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<RenderEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events in emission order.
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn drain(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }

    /// The most recent session summary, if any.
    pub fn last_summary(&self) -> Option<&ResultSummary> {
        self.events.iter().rev().find_map(|e| match e {
            RenderEvent::SessionEnded(summary) => Some(summary),
            _ => None,
        })
    }

    /// Warnings received so far.
    pub fn warnings(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Warning(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSink for EventLog {
    fn render(&mut self, event: RenderEvent) {
        self.events.push(event);
    }
}
