//! Periodic validation for training loops.
//!
//! A [`training::Validator`] runs a held-out [`training::Dataset`] through an
//! inference [`graph::Session`], accumulates the error rate and the
//! batch-size-weighted mean cost, and writes both to a
//! [`summary::SummaryWriter`] every `period` epochs.

pub mod config;
pub mod config_file;
pub mod constants;
pub mod error;
pub mod graph;
pub mod logging;
pub mod metrics_wrapper;
pub mod summary;
pub mod training;

pub use config::ValidationConfig;
pub use error::{Result, ValhookError};
pub use graph::{Feed, FnGraph, Session, TensorHandle};
pub use summary::{JsonLinesSummaryWriter, MemorySummaryWriter, MetricsSummaryWriter, SummaryWriter};
pub use training::{
	Accumulator, Batch, Callback, CallbackGroup, Dataset, InMemoryDataset, PeriodicCallback, ValidationReport,
	Validator, ValidatorState,
};
