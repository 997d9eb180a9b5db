//! The card panel and the events that drive it.
//!
//! Resolution cycles never touch the [`CardDeck`] directly. They send
//! [`DisplayEvent`]s through a [`DisplayHandle`] and the owner of the deck
//! (the event loop, or the headless runner) applies them in order. Every event
//! carries the generation of the cycle that produced it, and the deck drops
//! anything that does not belong to the newest cycle it has seen.

use chrono::{DateTime, Local};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

use crate::render::Card;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// A cycle started: hide the panel until it finishes.
    Begin { generation: u64 },
    Clear { generation: u64 },
    Append { generation: u64, card: Card },
    Located { generation: u64, place: String },
    Error { generation: u64, message: String },
    /// The cycle finished, successfully or not: show the panel again.
    Reveal { generation: u64 },
}

impl DisplayEvent {
    pub const fn generation(&self) -> u64 {
        match self {
            Self::Begin { generation }
            | Self::Clear { generation }
            | Self::Append { generation, .. }
            | Self::Located { generation, .. }
            | Self::Error { generation, .. }
            | Self::Reveal { generation } => *generation,
        }
    }
}

pub fn channel() -> (DisplayHandle, DisplayEvents) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DisplayHandle { tx }, DisplayEvents { rx })
}

/// Sending side, cloned into every resolution cycle.
#[derive(Debug, Clone)]
pub struct DisplayHandle {
    tx: UnboundedSender<DisplayEvent>,
}

impl DisplayHandle {
    pub fn begin(&self, generation: u64) {
        self.send(DisplayEvent::Begin { generation });
    }

    pub fn clear(&self, generation: u64) {
        self.send(DisplayEvent::Clear { generation });
    }

    pub fn append(&self, generation: u64, card: Card) {
        self.send(DisplayEvent::Append { generation, card });
    }

    pub fn located(&self, generation: u64, place: String) {
        self.send(DisplayEvent::Located { generation, place });
    }

    pub fn error(&self, generation: u64, message: String) {
        self.send(DisplayEvent::Error {
            generation,
            message,
        });
    }

    pub fn reveal(&self, generation: u64) {
        self.send(DisplayEvent::Reveal { generation });
    }

    fn send(&self, event: DisplayEvent) {
        // The receiver only goes away on shutdown.
        if self.tx.send(event).is_err() {
            trace!("display closed, event dropped");
        }
    }
}

/// Receiving side, owned by whoever owns the deck.
#[derive(Debug)]
pub struct DisplayEvents {
    rx: UnboundedReceiver<DisplayEvent>,
}

/// What changed during one [`DisplayEvents::drain_into`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    pub applied: usize,
    pub discarded: usize,
    pub cleared: bool,
    pub revealed: bool,
}

impl DisplayEvents {
    /// Applies every queued event without waiting for more.
    pub fn drain_into(&mut self, deck: &mut CardDeck) -> DrainSummary {
        let mut summary = DrainSummary::default();
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    let cleared = matches!(event, DisplayEvent::Clear { .. });
                    let revealed = matches!(event, DisplayEvent::Reveal { .. });
                    if deck.apply(event) {
                        summary.applied += 1;
                        summary.cleared |= cleared;
                        summary.revealed |= revealed;
                    } else {
                        summary.discarded += 1;
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        summary
    }
}

/// The rendered state of the card panel.
#[derive(Debug, Clone)]
pub struct CardDeck {
    generation: u64,
    cards: Vec<Card>,
    error: Option<String>,
    location: Option<String>,
    revealed: bool,
    busy: bool,
    finished_at: Option<DateTime<Local>>,
}

impl Default for CardDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl CardDeck {
    pub const fn new() -> Self {
        Self {
            generation: 0,
            cards: Vec::new(),
            error: None,
            location: None,
            revealed: true,
            busy: false,
            finished_at: None,
        }
    }

    /// Returns false when the event belonged to a superseded cycle.
    pub fn apply(&mut self, event: DisplayEvent) -> bool {
        let generation = event.generation();

        if let DisplayEvent::Begin { generation } = event {
            if generation < self.generation {
                debug!(generation, current = self.generation, "stale begin discarded");
                return false;
            }
            self.generation = generation;
            self.revealed = false;
            self.busy = true;
            self.error = None;
            self.location = None;
            return true;
        }

        if generation != self.generation {
            debug!(generation, current = self.generation, "stale display event discarded");
            return false;
        }

        match event {
            DisplayEvent::Begin { .. } => {}
            DisplayEvent::Clear { .. } => {
                self.cards.clear();
                self.error = None;
            }
            DisplayEvent::Append { card, .. } => self.cards.push(card),
            DisplayEvent::Located { place, .. } => self.location = Some(place),
            DisplayEvent::Error { message, .. } => self.error = Some(message),
            DisplayEvent::Reveal { .. } => {
                self.revealed = true;
                self.busy = false;
                self.finished_at = Some(Local::now());
            }
        }
        true
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// False while a cycle is running (the panel is drawn faded).
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn finished_at(&self) -> Option<DateTime<Local>> {
        self.finished_at
    }
}
