//! # histwalk-core
//!
//! Core library for histwalk - review one author's commits file by file.
//!
//! This crate enumerates author-filtered history, stages before/after
//! content in a scratch area and hands it to a viewer. Version control,
//! binary classification and viewing are traits so each can be swapped out.

pub mod classify;
pub mod diff;
pub mod error;
pub mod git;
pub mod history;
pub mod materialize;
pub mod models;
pub mod scratch;
pub mod stat;
pub mod viewer;
pub mod walker;

pub use classify::{Classifier, FileCommand, Sniffer};
pub use error::{Error, Result};
pub use git::GitCli;
pub use history::{enumerate, HistoryStore};
pub use models::{AuthorFilter, ChangeKind, ChangedPath, CommitId, CommitInfo, TreeRef};
pub use scratch::Scratch;
pub use viewer::{EditorViewer, Viewer};
pub use walker::{Reporter, SkipReason, Summary, Walker};
