//! Terminal front end: URL prompt, transcript, spinner, and the pipeline
//! that turns a submitted URL into a rendered summary.

mod command;
mod feeders;
mod input;
mod markdown;
mod pipeline;
mod shutdown;
mod styles;
mod transcript;
mod tui;
mod view;

pub use pipeline::{Pipeline, PipelineError};
pub use shutdown::ShutdownHandle;
pub use tui::run;
