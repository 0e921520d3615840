//! FHA: Functional Hazard Analysis toolkit
//!
//! A table mutation engine for FHA worksheets and an analytics engine that
//! derives risk dashboards from them, with a command-line front end.

pub mod analytics;
pub mod cli;
pub mod core;
pub mod tabular;
