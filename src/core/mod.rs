//! Core module - table engine, vocabulary and project plumbing

pub mod config;
pub mod entry;
pub mod project;
pub mod severity;
pub mod table;
pub mod vocabulary;

pub use config::Config;
pub use entry::{Entry, Field, Fields};
pub use project::{Project, ProjectError};
pub use severity::Severity;
pub use table::{FhaTable, TableError};
pub use vocabulary::{Vocabulary, VocabularyError};
