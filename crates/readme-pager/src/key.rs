//! Keystroke sources and the raw-mode guard

use crate::prompt::PromptError;
use std::collections::VecDeque;
use std::io;

/// A single keystroke as seen by the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character (space is reported as [`Key::Space`])
    Char(char),
    Space,
    /// Ctrl+C or Ctrl+\
    Interrupt,
    /// Anything else (arrows, function keys, Enter, ...)
    Other,
}

/// Capability to read single raw keystrokes
///
/// Implementations switch their input into raw, unbuffered, no-echo mode in
/// `enter_raw_mode` and put back whatever mode was active before in
/// `restore_mode`. Callers should not pair these by hand; use [`RawMode`].
pub trait KeySource {
    fn enter_raw_mode(&mut self) -> io::Result<()>;

    /// Block until one keystroke is available
    fn read_key(&mut self) -> Result<Key, PromptError>;

    fn restore_mode(&mut self) -> io::Result<()>;
}

/// Scoped raw mode
///
/// Holds a [`KeySource`] in raw mode for as long as the guard lives and
/// restores the previous mode on drop, whatever the exit path.
pub struct RawMode<'a, S: KeySource + ?Sized> {
    source: &'a mut S,
}

impl<'a, S: KeySource + ?Sized> RawMode<'a, S> {
    pub fn acquire(source: &'a mut S) -> Result<Self, PromptError> {
        source.enter_raw_mode().map_err(PromptError::InputClosed)?;
        Ok(Self { source })
    }

    pub fn read_key(&mut self) -> Result<Key, PromptError> {
        self.source.read_key()
    }
}

impl<S: KeySource + ?Sized> Drop for RawMode<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.source.restore_mode() {
            log::error!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Terminal mode transition recorded by [`ScriptedKeys`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    Raw,
    Restored,
}

/// Pre-recorded keystrokes
///
/// Replays a fixed key sequence and records every mode transition, so the
/// raw-mode discipline can be checked after a review. Once the script runs
/// out, reads fail with [`PromptError::InputClosed`], as a closed stdin would.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
    raw: bool,
    transitions: Vec<ModeChange>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Build a script from typed characters
    ///
    /// `' '` becomes [`Key::Space`], `'\x03'` and `'\x1c'` become
    /// [`Key::Interrupt`], `'\r'` becomes [`Key::Other`].
    pub fn typed(keys: &str) -> Self {
        Self::new(keys.chars().map(|c| match c {
            ' ' => Key::Space,
            '\x03' | '\x1c' => Key::Interrupt,
            '\r' => Key::Other,
            c => Key::Char(c),
        }))
    }

    /// Is the source currently in raw mode?
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    pub fn transitions(&self) -> &[ModeChange] {
        &self.transitions
    }

    /// Keys not yet consumed
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn enter_raw_mode(&mut self) -> io::Result<()> {
        self.raw = true;
        self.transitions.push(ModeChange::Raw);
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key, PromptError> {
        self.keys.pop_front().ok_or_else(|| {
            PromptError::InputClosed(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted keys exhausted",
            ))
        })
    }

    fn restore_mode(&mut self) -> io::Result<()> {
        self.raw = false;
        self.transitions.push(ModeChange::Restored);
        Ok(())
    }
}
