//! # Events Module
//!
//! Event-driven progress reporting.
//!
//! ## Design
//! The engine emits events through channels, allowing any front end
//! (the CLI progress bar, a JSON logger) to subscribe and display progress.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Compare(CompareEvent::Progress(p)) = event {
//!             println!("{}/{}", p.comparisons_completed, p.total_comparisons);
//!         }
//!     }
//! });
//!
//! cleaner.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
