//! Crossterm-backed keystroke source

use crate::key::{Key, KeySource};
use crate::prompt::PromptError;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io;

/// Reads keystrokes from the controlling terminal
///
/// `enable_raw_mode` saves the current terminal attributes and
/// `disable_raw_mode` puts exactly those back, so the previous mode is
/// restored rather than reset to a default.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl CrosstermKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for CrosstermKeys {
    fn enter_raw_mode(&mut self) -> io::Result<()> {
        enable_raw_mode()
    }

    fn read_key(&mut self) -> Result<Key, PromptError> {
        loop {
            match event::read().map_err(PromptError::InputClosed)? {
                // Only key presses count (Windows also reports releases)
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Key::from(key)),
                _ => continue,
            }
        }
    }

    fn restore_mode(&mut self) -> io::Result<()> {
        disable_raw_mode()
    }
}

impl From<KeyEvent> for Key {
    fn from(key: KeyEvent) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Ctrl+\ arrives as Ctrl+4 on most unix terminals
            KeyCode::Char('c' | 'C' | '\\' | '4') if ctrl => Key::Interrupt,
            KeyCode::Char(_) if ctrl => Key::Other,
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}
