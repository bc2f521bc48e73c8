//! BWE CLI library.
//!
//! This crate provides the document types and command implementations behind
//! the `bwe` binary: rendering partial collections to WAV, morphing two
//! collections, validating documents, and summarizing partial files.

pub mod commands;
pub mod input;
