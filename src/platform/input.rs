//! Keyboard input capture
//!
//! Key events arrive asynchronously from the browser; the game samples them
//! once per tick with [`InputState::take_tick_input`]. Held directions are
//! level-triggered, menu steps and confirm are consumed once per press.

use std::collections::VecDeque;

use crate::difficulty::Difficulty;
use crate::sim::{MenuNav, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Confirm,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            " " | "Enter" => Some(Key::Confirm),
            _ => None,
        }
    }
}

/// Accumulated input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    confirm: bool,
    nav: VecDeque<MenuNav>,
    pick: Option<Difficulty>,
    autopilot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Up => {
                self.up = true;
                self.nav.push_back(MenuNav::Prev);
            }
            Key::Down => {
                self.down = true;
                self.nav.push_back(MenuNav::Next);
            }
            Key::Confirm => self.confirm = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Up => self.up = false,
            Key::Down => self.down = false,
            Key::Confirm => {}
        }
    }

    /// Difficulty chosen by clicking its menu entry
    pub fn pick(&mut self, difficulty: Difficulty) {
        self.pick = Some(difficulty);
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
    }

    /// Forget held keys (window lost focus, key-up events will never arrive)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
    }

    /// Sample input for one tick, consuming one-shot events
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            confirm: std::mem::take(&mut self.confirm),
            menu_nav: self.nav.pop_front(),
            pick: self.pick.take(),
            autopilot: self.autopilot,
        }
    }
}
