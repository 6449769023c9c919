//! Input pump: crossterm events and deadline ticks on one channel

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// What the shell reacts to
#[derive(Clone, Debug)]
pub enum Event {
    /// Time to check toast and fetch deadlines
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

impl Event {
    /// Map a terminal event; key releases and focus/paste events are dropped
    fn from_terminal(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Self::Key(key)),
            CrosstermEvent::Mouse(mouse) => Some(Self::Mouse(mouse)),
            CrosstermEvent::Resize(w, h) => Some(Self::Resize(w, h)),
            _ => None,
        }
    }
}

/// Receiving end of the input thread. The thread stops once this is dropped.
pub struct EventHandler {
    rx: Receiver<Event>,
    _pump: thread::JoinHandle<()>,
}

impl EventHandler {
    /// Start reading input, emitting a `Tick` every `tick_rate`
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let pump = thread::spawn(move || pump(&tx, tick_rate));
        Self { rx, _pump: pump }
    }

    /// Block for at most `timeout`
    pub fn next_timeout(&self, timeout: Duration) -> Option<Event> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Whatever is already queued
    pub fn try_next(&self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

fn pump(tx: &Sender<Event>, tick_rate: Duration) {
    let mut next_tick = Instant::now() + tick_rate;
    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        if event::poll(wait).unwrap_or(false) {
            let mapped = event::read().ok().and_then(Event::from_terminal);
            if let Some(event) = mapped {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }

        if Instant::now() >= next_tick {
            if tx.send(Event::Tick).is_err() {
                return;
            }
            next_tick = Instant::now() + tick_rate;
        }
    }
}
