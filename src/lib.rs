#![allow(dead_code)]
//! pbsdo - Create PBS jobs from the standard input
//!
//! pbsdo reads argument tokens from stdin or a file, splits them across one
//! or more PBS jobs, and writes a submission script per job that runs a
//! user-supplied command over that job's share of the arguments, optionally
//! fanned out across background worker processes inside the job.
//!
//! # Architecture
//!
//! - **commands**: CLI command implementation (generate)
//! - **core**: Core functionality (partitioner, script synthesizer, input pipeline, submit)
//! - **models**: Data structures (config, job spec, script counter)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use error::{PbsDoError, Result};
