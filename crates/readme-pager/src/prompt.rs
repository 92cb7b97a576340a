//! Paged confirmation prompt
//!
//! Shows a [`ReviewItem`] page by page and resolves it from single
//! keystrokes:
//!
//! | key            | effect                                   |
//! |----------------|------------------------------------------|
//! | `y` / `Y`      | [`Decision::Confirmed`]                  |
//! | `n` / `N`      | [`Decision::Rejected`]                   |
//! | space          | next page (last page: see [`LastPagePolicy`]) |
//! | Ctrl+C, Ctrl+\ | [`Decision::Aborted`]                    |
//! | anything else  | read again, same page                    |
//!
//! Running out of pages without a decision yields `Rejected`.

use crate::decision::Decision;
use crate::item::{paginate, Page, ReviewItem};
use crate::key::{Key, KeySource, RawMode};
use crate::terminal::CrosstermKeys;
use crate::DEFAULT_PAGE_SIZE;
use std::io::{self, Stdout, Write};
use thiserror::Error;

/// Why a review could not reach a confirm/reject decision
#[derive(Debug, Error)]
pub enum PromptError {
    /// The keystroke source is exhausted or could not be read
    #[error("keystroke input closed: {0}")]
    InputClosed(#[source] io::Error),

    /// The operator pressed an interrupt key
    #[error("operation cancelled by user")]
    Interrupted,

    /// Writing a page to the output failed
    #[error("failed to write page: {0}")]
    Output(#[from] io::Error),
}

/// What space does on the final page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LastPagePolicy {
    /// Space ends the body; the item falls through to `Rejected`
    #[default]
    Finish,
    /// Space is ignored on the final page; only `y`/`n` (or an interrupt) end it
    RequireDecision,
}

/// Pages through review items and collects one decision per item
pub struct PagedPrompt<K: KeySource, W: Write> {
    keys: K,
    out: W,
    page_size: usize,
    last_page: LastPagePolicy,
}

impl PagedPrompt<CrosstermKeys, Stdout> {
    /// Prompt on the process terminal
    pub fn stdio(page_size: usize, last_page: LastPagePolicy) -> Self {
        Self::new(CrosstermKeys::new(), io::stdout(), page_size, last_page)
    }
}

impl<K: KeySource, W: Write> PagedPrompt<K, W> {
    pub fn new(keys: K, out: W, page_size: usize, last_page: LastPagePolicy) -> Self {
        let page_size = if page_size == 0 {
            log::warn!(
                "Page size 0 is not usable, falling back to {}",
                DEFAULT_PAGE_SIZE
            );
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        Self {
            keys,
            out,
            page_size,
            last_page,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (K, W) {
        (self.keys, self.out)
    }

    /// Review one item
    ///
    /// Never fails: an interrupt or unreadable input becomes
    /// [`Decision::Aborted`], which callers must treat as "stop the batch".
    pub fn confirm(&mut self, item: &ReviewItem) -> Decision {
        match self.try_confirm(item) {
            Ok(decision) => {
                log::debug!("Review of {} finished: {}", item.id(), decision);
                decision
            }
            Err(e) => {
                log::warn!("Review of {} aborted: {}", item.id(), e);
                let _ = writeln!(self.out, "\n{}", abort_message(&e));
                let _ = self.out.flush();
                Decision::Aborted
            }
        }
    }

    /// Review one item, surfacing why no decision could be made
    pub fn try_confirm(&mut self, item: &ReviewItem) -> Result<Decision, PromptError> {
        let lines: Vec<&str> = item.body().lines().collect();
        let pages = paginate(&lines, self.page_size);

        for page in &pages {
            self.render_page(item.id(), page)?;

            loop {
                match self.read_key()? {
                    Key::Char('y' | 'Y') => {
                        writeln!(self.out, "\nConfirmed: {}", item.id())?;
                        return Ok(Decision::Confirmed);
                    }
                    Key::Char('n' | 'N') => {
                        writeln!(self.out, "\nNot confirmed: {}", item.id())?;
                        return Ok(Decision::Rejected);
                    }
                    Key::Space if self.space_advances(page) => break,
                    Key::Interrupt => return Err(PromptError::Interrupted),
                    key => log::trace!("Ignoring {:?} on page {}", key, page.index + 1),
                }
            }
        }

        writeln!(self.out, "\nNot confirmed: {}", item.id())?;
        Ok(Decision::Rejected)
    }

    fn space_advances(&self, page: &Page<'_>) -> bool {
        !page.is_last() || self.last_page == LastPagePolicy::Finish
    }

    /// Raw mode is held for exactly one keystroke
    fn read_key(&mut self) -> Result<Key, PromptError> {
        let mut raw = RawMode::acquire(&mut self.keys)?;
        raw.read_key()
    }

    fn render_page(&mut self, id: &str, page: &Page<'_>) -> Result<(), PromptError> {
        let title = format!("{bar} Repository: {id} {bar}", bar = "=".repeat(20));
        let border = "=".repeat(title.chars().count());
        writeln!(self.out, "\n{}\n{}\n{}\n", border, title, border)?;

        for line in page.lines {
            writeln!(self.out, "{}", line)?;
        }

        let choices = if !page.is_last() {
            "'y' to confirm update, 'n' to cancel, or space to continue"
        } else if self.last_page == LastPagePolicy::Finish {
            "'y' to confirm update, 'n' to cancel, or space to skip"
        } else {
            "'y' to confirm update or 'n' to cancel"
        };
        write!(
            self.out,
            "[page {}/{}] Press {}: ",
            page.index + 1,
            page.total,
            choices
        )?;
        self.out.flush()?;
        Ok(())
    }
}

fn abort_message(error: &PromptError) -> String {
    match error {
        PromptError::Interrupted => "Operation cancelled by user.".to_string(),
        other => format!("Operation aborted: {}", other),
    }
}
