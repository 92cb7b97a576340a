//! # readme-pager
//!
//! A small, reusable prompt that pages through a text body (usually a model
//! README) and resolves it to a [`Decision`] from single raw keystrokes.
//!
//! ## Design Principles
//!
//! The prompt never talks to a terminal directly. Keystrokes come from a
//! [`KeySource`], output goes to any [`std::io::Write`]. This keeps the paging
//! logic testable with [`ScriptedKeys`] and a `Vec<u8>`, while
//! [`CrosstermKeys`] provides the real raw-mode implementation.
//!
//! Raw mode is held only while a single key is read. [`RawMode`] restores the
//! previous mode when dropped, so every exit path (decision, interrupt, I/O
//! error, panic unwinding) leaves the terminal usable.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use readme_pager::{Decision, LastPagePolicy, PagedPrompt, ReviewItem};
//!
//! let mut prompt = PagedPrompt::stdio(30, LastPagePolicy::Finish);
//! let item = ReviewItem::new("openai-community/gpt2", "# GPT-2\n...");
//!
//! match prompt.confirm(&item) {
//!     Decision::Confirmed => println!("queued for update"),
//!     Decision::Rejected => println!("skipped"),
//!     Decision::Aborted => println!("stopping batch"),
//! }
//! ```

pub mod decision;
pub mod item;
pub mod key;
pub mod prompt;
pub mod terminal;

/// Lines shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 30;

pub use decision::Decision;
pub use item::{paginate, Page, ReviewItem};
pub use key::{Key, KeySource, ModeChange, RawMode, ScriptedKeys};
pub use prompt::{LastPagePolicy, PagedPrompt, PromptError};
pub use terminal::CrosstermKeys;
