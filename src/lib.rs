//! Core library for the avance-tools command line application.
//!
//! The library consolidates a folder of dated sales workbooks into one table
//! and summarizes its columns as frequency charts. IO adapters live under
//! [`avance::tools::io`], the in-memory table inside [`avance::tools::model`],
//! the batch pipeline in [`avance::tools::consolidate`], and the stateful entry
//! point used by front ends in [`avance::tools::session`].

pub mod avance;

pub use avance::tools::{
    Result, ToolError, config, consolidate, error, filename, frequency, io, logging, model, range,
    request, session,
};
