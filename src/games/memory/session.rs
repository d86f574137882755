//! The game session state machine.
//!
//! `Idle → Dealt → AwaitingFirstFlip ⇄ AwaitingSecondFlip (→ Locked) → Over`.
//! Every transition runs synchronously inside one call: a flip, a fired timer,
//! a reset. Deferred work goes through the [`Scheduler`], and every path that
//! leaves a state early cancels the handles the session owns.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::deck;
use super::invariants::assert_invariants;
use super::phases::{FlipResult, IgnoreReason, Outcome, Phase};
use super::rules::is_improvement;
use super::state::SessionState;
use super::types::{CardId, Difficulty, Mode, SessionConfig};
use super::GameError;
use crate::render::{BestResult, RenderEvent, RenderSink, ResultDetail, ResultSummary};
use crate::scheduler::{Fired, Scheduler, TimerEvent, TimerHandle};
use crate::store::ScoreStore;

/// Fixed delays used by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long a mismatched pair stays face up.
    pub unflip_delay: Duration,
    /// Countdown period in timed mode.
    pub countdown_interval: Duration,
    /// Pause between unflipping and redealing on a mid-game reset.
    pub reset_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            unflip_delay: Duration::from_millis(750),
            countdown_interval: Duration::from_millis(1000),
            reset_delay: Duration::from_millis(400),
        }
    }
}

/// Handles the session currently owns. At most one of each kind.
#[derive(Debug, Clone, Copy, Default)]
struct ActiveTimers {
    countdown: Option<TimerHandle>,
    unflip: Option<TimerHandle>,
    redeal: Option<TimerHandle>,
}

/// One player's memory game: deck, counters, limits and record keeping.
pub struct GameSession<C, S, R> {
    scheduler: C,
    store: S,
    sink: R,
    rng: StdRng,
    timings: Timings,
    config: Option<SessionConfig>,
    state: SessionState,
    timers: ActiveTimers,
}

impl<C, S, R> std::fmt::Debug for GameSession<C, S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("timings", &self.timings)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<C: Scheduler, S: ScoreStore, R: RenderSink> GameSession<C, S, R> {
    /// Creates an idle session around its collaborators.
    #[instrument(skip_all)]
    pub fn new(scheduler: C, store: S, sink: R) -> Self {
        Self {
            scheduler,
            store,
            sink,
            rng: StdRng::from_entropy(),
            timings: Timings::default(),
            config: None,
            state: SessionState::default(),
            timers: ActiveTimers::default(),
        }
    }

    /// Replaces the random source, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Replaces the default delays.
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Returns the active config, `None` while idle.
    pub fn config(&self) -> Option<SessionConfig> {
        self.config
    }

    /// Returns the session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        match self.config {
            None => Phase::Idle,
            Some(_) => self.state.phase(),
        }
    }

    /// Returns the delays in use.
    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    /// Returns the scheduler mutably, e.g. to advance a manual clock.
    pub fn scheduler_mut(&mut self) -> &mut C {
        &mut self.scheduler
    }

    /// Returns the score store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the score store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Returns the render sink.
    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Returns the render sink mutably.
    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    /// Starts a fresh session: deals a deck, resets counters, cancels old timers.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InsufficientIcons`] if the profile asks for more
    /// pairs than there are icons. The session is left untouched.
    #[instrument(skip(self, config), fields(config = %config))]
    pub fn start(&mut self, config: SessionConfig) -> Result<(), GameError> {
        let profile = config.profile();
        let cards = deck::deal(*profile.pair_count(), &mut self.rng)?;

        self.cancel_timers();
        self.config = Some(config);
        self.state = SessionState {
            cards,
            pair_count: *profile.pair_count(),
            seconds_remaining: match config.mode {
                Mode::Timed => *profile.time_limit_seconds(),
                _ => 0,
            },
            ..SessionState::default()
        };

        info!(pairs = self.state.pair_count, "Session dealt");
        self.sink.render(RenderEvent::Dealt {
            config,
            cards: self.state.views(),
        });
        self.sink.render(RenderEvent::PairsChanged {
            matched: 0,
            total: self.state.pair_count,
        });
        self.sink.render(RenderEvent::AttemptsChanged {
            used: 0,
            limit: attempt_limit(config),
        });
        if config.mode == Mode::Timed {
            self.sink.render(RenderEvent::TimerTick {
                seconds_remaining: self.state.seconds_remaining,
            });
        }

        assert_invariants(&self.state);
        Ok(())
    }

    /// Starts a session from mode and difficulty names.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] for an unknown name; the session
    /// keeps its previous state.
    #[instrument(skip(self))]
    pub fn start_named(&mut self, mode: &str, difficulty: &str) -> Result<(), GameError> {
        let config = SessionConfig::parse(mode, difficulty).inspect_err(|e| {
            warn!(error = %e, "Rejected session config");
        })?;
        self.start(config)
    }

    /// Turns a card face up.
    ///
    /// Inapplicable flips (idle, over, locked, unknown or already revealed
    /// card) are ignored and reported as [`FlipResult::Ignored`].
    #[instrument(skip(self))]
    pub fn flip(&mut self, id: CardId) -> FlipResult {
        let Some(config) = self.config else {
            return self.ignore(id, IgnoreReason::NotStarted);
        };
        if self.state.is_over {
            return self.ignore(id, IgnoreReason::SessionOver);
        }
        if self.state.is_locked {
            return self.ignore(id, IgnoreReason::Locked);
        }
        match self.state.card(id) {
            None => return self.ignore(id, IgnoreReason::UnknownCard),
            Some(card) if !card.is_face_down() => {
                return self.ignore(id, IgnoreReason::AlreadyRevealed);
            }
            Some(_) => {}
        }

        if self.state.started_at.is_none() {
            self.state.started_at = Some(self.scheduler.now());
            if config.mode == Mode::Timed {
                let handle = self
                    .scheduler
                    .every(self.timings.countdown_interval, TimerEvent::CountdownTick);
                self.timers.countdown = Some(handle);
            }
            debug!("Clock started");
        }

        let view = match self.state.card_mut(id) {
            Some(card) => {
                card.set_flipped(true);
                card.view()
            }
            None => return self.ignore(id, IgnoreReason::UnknownCard),
        };
        self.state.pending.push(id);
        self.sink.render(RenderEvent::CardFlipped(view));

        let result = if self.state.pending.len() == 2 {
            self.resolve_pair(config)
        } else {
            FlipResult::Revealed
        };

        assert_invariants(&self.state);
        result
    }

    /// Delivers a fired timer. Handles the session no longer owns are ignored.
    #[instrument(skip(self))]
    pub fn fire(&mut self, fired: Fired) {
        match fired.event {
            TimerEvent::Unflip if self.timers.unflip == Some(fired.handle) => {
                self.timers.unflip = None;
                self.unflip_pending();
            }
            TimerEvent::CountdownTick
                if self.timers.countdown == Some(fired.handle) && !self.state.is_over =>
            {
                self.tick();
            }
            TimerEvent::Redeal if self.timers.redeal == Some(fired.handle) => {
                self.timers.redeal = None;
                if let Some(config) = self.config
                    && let Err(e) = self.start(config)
                {
                    warn!(error = %e, "Redeal failed");
                    self.sink.render(RenderEvent::Warning(e.to_string()));
                }
            }
            _ => {
                debug!(handle = ?fired.handle, event = ?fired.event, "Ignoring stale timer");
            }
        }
    }

    /// Delivers every due timer in deadline order. Returns how many fired.
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        while let Some(fired) = self.scheduler.next_due() {
            self.fire(fired);
            count += 1;
        }
        count
    }

    /// Starts over with the same config.
    ///
    /// A finished session redeals at once. Mid-game, face-up cards are turned
    /// back first and the redeal follows after [`Timings::reset_delay`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotStarted`] while idle.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), GameError> {
        let Some(config) = self.config else {
            return Err(GameError::NotStarted);
        };
        if self.state.is_over {
            return self.start(config);
        }

        self.cancel_timers();
        let turned: Vec<CardId> = self
            .state
            .cards
            .iter_mut()
            .filter(|card| card.is_flipped() && !card.is_matched())
            .map(|card| {
                card.set_flipped(false);
                card.id()
            })
            .collect();
        self.state.pending.clear();
        self.state.is_locked = true;
        if !turned.is_empty() {
            self.sink.render(RenderEvent::CardsUnflipped(turned));
        }

        let handle = self.scheduler.after(self.timings.reset_delay, TimerEvent::Redeal);
        self.timers.redeal = Some(handle);
        debug!(?handle, "Redeal scheduled");
        Ok(())
    }

    /// Cancels everything, clears the deck and returns to idle.
    #[instrument(skip(self))]
    pub fn abandon(&mut self) {
        self.cancel_timers();
        self.config = None;
        self.state = SessionState::default();
        info!("Session abandoned");
        self.sink.render(RenderEvent::Cleared);
    }

    /// Reads the stored record for a mode and difficulty; failures read as none.
    #[instrument(skip(self))]
    pub fn best_score(&mut self, mode: Mode, difficulty: Difficulty) -> Option<u32> {
        self.store.get(mode, difficulty).unwrap_or_else(|e| {
            warn!(error = %e, "Record read failed, treating as absent");
            None
        })
    }

    fn ignore(&self, id: CardId, reason: IgnoreReason) -> FlipResult {
        debug!(%id, ?reason, "Flip ignored");
        FlipResult::Ignored(reason)
    }

    fn resolve_pair(&mut self, config: SessionConfig) -> FlipResult {
        let (first, second) = (self.state.pending[0], self.state.pending[1]);
        self.state.attempts_used += 1;
        self.sink.render(RenderEvent::AttemptsChanged {
            used: self.state.attempts_used,
            limit: attempt_limit(config),
        });

        let is_match = matches!(
            (self.state.card(first), self.state.card(second)),
            (Some(a), Some(b)) if a.icon() == b.icon()
        );

        if is_match {
            for id in [first, second] {
                if let Some(card) = self.state.card_mut(id) {
                    card.set_matched();
                }
            }
            self.state.matched_pairs += 1;
            self.state.pending.clear();
            debug!(%first, %second, matched = self.state.matched_pairs, "Pair matched");
            self.sink.render(RenderEvent::CardsMatched(vec![first, second]));
            self.sink.render(RenderEvent::PairsChanged {
                matched: self.state.matched_pairs,
                total: self.state.pair_count,
            });

            if self.state.matched_pairs == self.state.pair_count {
                self.end(Outcome::Win);
                return FlipResult::Finished(Outcome::Win);
            }
        } else {
            self.state.is_locked = true;
            let handle = self.scheduler.after(self.timings.unflip_delay, TimerEvent::Unflip);
            self.timers.unflip = Some(handle);
            debug!(%first, %second, ?handle, "Mismatch, locked until unflip");
        }

        if let Some(limit) = attempt_limit(config)
            && self.state.attempts_used >= limit
        {
            self.end(Outcome::Loss);
            return FlipResult::Finished(Outcome::Loss);
        }

        if is_match {
            FlipResult::Matched
        } else {
            FlipResult::Mismatched
        }
    }

    fn unflip_pending(&mut self) {
        let ids: Vec<CardId> = self.state.pending.drain(..).collect();
        for &id in &ids {
            if let Some(card) = self.state.card_mut(id)
                && !card.is_matched()
            {
                card.set_flipped(false);
            }
        }
        self.state.is_locked = false;
        debug!(?ids, "Mismatched pair turned back");
        self.sink.render(RenderEvent::CardsUnflipped(ids));
        assert_invariants(&self.state);
    }

    fn tick(&mut self) {
        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        self.sink.render(RenderEvent::TimerTick {
            seconds_remaining: self.state.seconds_remaining,
        });
        if self.state.seconds_remaining == 0 {
            info!("Time is up");
            self.end(Outcome::Loss);
        }
    }

    fn end(&mut self, outcome: Outcome) {
        let Some(config) = self.config else {
            return;
        };
        self.cancel_timers();
        self.state.is_over = true;
        self.state.is_locked = false;
        self.state.outcome = Some(outcome);
        if config.mode == Mode::Timed && outcome == Outcome::Loss {
            self.state.seconds_remaining = 0;
        }

        let elapsed = self
            .state
            .started_at
            .map(|started| self.scheduler.now().saturating_sub(started).as_secs())
            .unwrap_or(0);

        let (value, detail) = match config.mode {
            Mode::Basic => (
                u32::try_from(elapsed).unwrap_or(u32::MAX),
                ResultDetail::Elapsed { seconds: elapsed },
            ),
            Mode::Limited => (
                self.state.attempts_used,
                ResultDetail::Attempts {
                    used: self.state.attempts_used,
                    limit: *config.profile().attempt_limit(),
                },
            ),
            Mode::Timed => (
                self.state.seconds_remaining,
                ResultDetail::Elapsed { seconds: elapsed },
            ),
        };

        let best = match outcome {
            Outcome::Win => self.record(config, value),
            Outcome::Loss => BestResult::Previous(self.best_score(config.mode, config.difficulty)),
        };

        let summary = ResultSummary {
            mode: config.mode,
            outcome,
            matched_pairs: self.state.matched_pairs,
            pair_count: self.state.pair_count,
            detail,
            value,
            best,
        };
        info!(%config, ?outcome, value, ?best, "Session ended");
        self.sink.render(RenderEvent::SessionEnded(summary));
    }

    fn record(&mut self, config: SessionConfig, value: u32) -> BestResult {
        let stored = self.best_score(config.mode, config.difficulty);
        if !is_improvement(config.mode, value, stored) {
            debug!(value, ?stored, "Record stands");
            return BestResult::Previous(stored);
        }

        if let Err(e) = self.store.set(config.mode, config.difficulty, value) {
            warn!(error = %e, "Record write failed");
            self.sink
                .render(RenderEvent::Warning(format!("Could not save best result: {}", e.message)));
        }
        BestResult::NewRecord
    }

    fn cancel_timers(&mut self) {
        let timers = std::mem::take(&mut self.timers);
        for handle in [timers.countdown, timers.unflip, timers.redeal].into_iter().flatten() {
            self.scheduler.cancel(handle);
        }
    }
}

fn attempt_limit(config: SessionConfig) -> Option<u32> {
    match config.mode {
        Mode::Limited => Some(*config.profile().attempt_limit()),
        _ => None,
    }
}
