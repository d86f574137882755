//! View model kept up to date from session notifications.

use tracing::{debug, warn};

use crate::games::memory::{CardFace, CardId, CardView, SessionConfig};
use crate::render::{RenderEvent, RenderSink, ResultSummary};

/// What the terminal draws, rebuilt only from [`RenderEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    config: Option<SessionConfig>,
    cards: Vec<CardView>,
    matched: usize,
    total: usize,
    attempts: u32,
    attempt_limit: Option<u32>,
    seconds_remaining: Option<u32>,
    result: Option<ResultSummary>,
    warning: Option<String>,
}

impl BoardView {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config of the dealt deck.
    pub fn config(&self) -> Option<SessionConfig> {
        self.config
    }

    /// Cards in table order.
    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    /// Status line for the running session.
    pub fn status_line(&self) -> String {
        let mut parts = vec![format!("Pairs: {}/{}", self.matched, self.total)];
        match self.attempt_limit {
            Some(limit) => parts.push(format!("Attempts: {}/{}", self.attempts, limit)),
            None => parts.push(format!("Attempts: {}", self.attempts)),
        }
        if let Some(seconds) = self.seconds_remaining {
            parts.push(format!("Time left: {}", crate::games::memory::format_clock(u64::from(seconds))));
        }
        parts.join("  |  ")
    }

    /// Summary of the finished session.
    pub fn result(&self) -> Option<&ResultSummary> {
        self.result.as_ref()
    }

    /// Last non-fatal warning.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    fn set_face(&mut self, id: CardId, face: CardFace) {
        if let Some(card) = self.cards.get_mut(id.0) {
            card.face = face;
        }
    }
}

impl RenderSink for BoardView {
    fn render(&mut self, event: RenderEvent) {
        debug!(?event, "Render");
        match event {
            RenderEvent::Dealt { config, cards } => {
                *self = Self {
                    config: Some(config),
                    cards,
                    warning: self.warning.take(),
                    ..Self::default()
                };
            }
            RenderEvent::CardFlipped(view) => self.set_face(view.id, view.face),
            RenderEvent::CardsUnflipped(ids) => {
                for id in ids {
                    self.set_face(id, CardFace::Down);
                }
            }
            RenderEvent::CardsMatched(ids) => {
                for id in ids {
                    if let Some(icon) = self.cards.get(id.0).and_then(CardView::icon) {
                        self.set_face(id, CardFace::Matched(icon));
                    }
                }
            }
            RenderEvent::PairsChanged { matched, total } => {
                self.matched = matched;
                self.total = total;
            }
            RenderEvent::AttemptsChanged { used, limit } => {
                self.attempts = used;
                self.attempt_limit = limit;
            }
            RenderEvent::TimerTick { seconds_remaining } => {
                self.seconds_remaining = Some(seconds_remaining);
            }
            RenderEvent::SessionEnded(summary) => self.result = Some(summary),
            RenderEvent::Cleared => *self = Self::default(),
            RenderEvent::Warning(message) => {
                warn!(%message, "Session warning");
                self.warning = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::memory::{Difficulty, Icon, Mode};

    fn dealt(view: &mut BoardView) {
        view.render(RenderEvent::Dealt {
            config: SessionConfig::new(Mode::Limited, Difficulty::Easy),
            cards: (0..4)
                .map(|i| CardView {
                    id: CardId(i),
                    face: CardFace::Down,
                })
                .collect(),
        });
    }

    #[test]
    fn test_flip_then_match_keeps_icon() {
        let mut view = BoardView::new();
        dealt(&mut view);
        view.render(RenderEvent::CardFlipped(CardView {
            id: CardId(1),
            face: CardFace::Up(Icon('🐶')),
        }));
        view.render(RenderEvent::CardFlipped(CardView {
            id: CardId(2),
            face: CardFace::Up(Icon('🐶')),
        }));
        view.render(RenderEvent::CardsMatched(vec![CardId(1), CardId(2)]));
        assert_eq!(view.cards()[1].face, CardFace::Matched(Icon('🐶')));
        assert_eq!(view.cards()[0].face, CardFace::Down);
    }

    #[test]
    fn test_status_line_shows_limit() {
        let mut view = BoardView::new();
        dealt(&mut view);
        view.render(RenderEvent::PairsChanged { matched: 1, total: 6 });
        view.render(RenderEvent::AttemptsChanged {
            used: 3,
            limit: Some(24),
        });
        assert_eq!(view.status_line(), "Pairs: 1/6  |  Attempts: 3/24");
    }

    #[test]
    fn test_cleared_resets_view() {
        let mut view = BoardView::new();
        dealt(&mut view);
        view.render(RenderEvent::Cleared);
        assert!(view.cards().is_empty());
        assert!(view.config().is_none());
    }
}
