pub mod acquire;
pub mod cli;
pub mod diagnostics;
pub mod pipeline;
pub mod progress;
pub mod range;
pub mod scratch;
pub mod settings;
pub mod source;
