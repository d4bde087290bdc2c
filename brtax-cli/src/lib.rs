//! Command-line front end: explicit application state, report rendering and
//! logging setup around the `brtax-core` engine.

pub mod app;
pub mod cli;
pub mod currency;
pub mod logging;
pub mod report;

pub use app::{AppState, Mode, Report};
pub use report::{OutputFormat, render};
