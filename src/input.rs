/// Keyboard handling: terminal keys become discrete `InputEvent`s that are
/// queued and folded into the simulation once per frame.

use std::collections::VecDeque;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;

use crate::compute::{fire, select_type};
use crate::entities::{ProjectileType, SimState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Select(ProjectileType),
    Fire,
    Exit,
}

/// Translate a terminal event.  Only presses count: repeats from a held key
/// and releases are dropped, so each physical press fires once.
pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

pub fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Exit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Exit),
        KeyCode::Char(' ') => Some(InputEvent::Fire),
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|d| ProjectileType::from_number(d as u8))
            .map(InputEvent::Select),
        _ => None,
    }
}

/// FIFO of events waiting for the next frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Map and enqueue a raw terminal event; unmapped events are ignored.
    pub fn push_raw(&mut self, event: &Event) {
        if let Some(ev) = map_event(event) {
            self.push(ev);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply every pending event in arrival order.  Returns the new state
    /// and whether an exit was requested; events after an exit are dropped.
    pub fn drain_into(&mut self, state: &SimState, rng: &mut impl Rng) -> (SimState, bool) {
        let mut state = state.clone();
        while let Some(event) = self.pending.pop_front() {
            match apply_event(&state, event, rng) {
                Some(next) => state = next,
                None => {
                    self.pending.clear();
                    return (state, true);
                }
            }
        }
        (state, false)
    }
}

/// Fold one event into the state.  `None` means the user asked to exit.
pub fn apply_event(state: &SimState, event: InputEvent, rng: &mut impl Rng) -> Option<SimState> {
    match event {
        InputEvent::Select(kind) => Some(select_type(state, kind, rng)),
        InputEvent::Fire => Some(fire(state, rng)),
        InputEvent::Exit => None,
    }
}
