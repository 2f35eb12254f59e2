//! Next course of every non-permanent instructor ("vacataire"), read from an
//! ADE calendar export.
//!
//! The export goes through a chain of stages, each one a plain function over
//! the full output of the previous one:
//!
//! 1. [`loader`] reads lines and marks folded continuation lines,
//! 2. [`segment`] groups them into events,
//! 3. [`normalize`] turns an event into its ordered field values,
//! 4. [`course`] extracts date, time, title and a guessed instructor,
//! 5. [`filter`] drops permanent staff and splits run-together names,
//! 6. [`select`] keeps the next course of each instructor after a date.
//!
//! [`pipeline`] chains 1 to 5, [`export`] and [`timeline`] write the results.

pub mod app;
pub mod cli;
pub mod course;
pub mod export;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod policy;
pub mod prompt;
pub mod segment;
pub mod select;
pub mod timeline;
