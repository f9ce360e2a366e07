//! Pure timeline reconstruction: presence-signal edge detection, fuzzy-text
//! interval subdivision, and event materialization.
//!
//! Everything in this crate is synchronous and single-threaded; recognition
//! only enters through caller-supplied sampling closures.

mod event;
mod signal;
mod similarity;
mod subdivide;
mod track;

pub use event::{frames_to_ms, materialize};
pub use signal::{PresenceSignal, SignalError, extract_intervals};
pub use similarity::{DEFAULT_THRESHOLD, Similarity};
pub use subdivide::{Subdivider, Subdivision};
pub use track::{format_timestamp, render};
