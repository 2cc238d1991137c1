//! Timeline and navigation core for animated phylogenetic tree movies.
//!
//! A tree movie is an ordered sequence of anchor trees (reconstructed
//! from successive alignment windows) with interpolated intermediate
//! trees between each adjacent pair. This crate owns everything needed
//! to move through that sequence (index arithmetic, the continuous
//! time model, serialized navigation commands and the fan-out of
//! derived state to the host's views) while treating the trees
//! themselves, and all rendering, as opaque inputs.
//!
//! # Key entry points
//!
//! - [`movie::MovieData`] - the immutable movie payload
//! - [`engine::MovieEngine`] - navigation, playback and view updates
//! - [`index::TransitionIndex`] - pure anchor/transition arithmetic
//! - [`timeline::Timeline`] - progress ↔ index conversions
//! - [`options::Options`] - runtime configuration (playback, display,
//!   keybindings)
//!
//! # Architecture
//!
//! Ownership is strictly tree-shaped: the engine is the sole owner of
//! live state and the only writer of the current position. The index
//! and timeline layers are pure and parameter-free once built. Hosts
//! mount views by implementing the [`engine::facades`] traits; payloads
//! carry values, never references back into the engine, and the model
//! is single-threaded cooperative throughout.

pub mod engine;
pub mod error;
pub mod highlight;
pub mod index;
pub mod input;
pub mod movie;
pub mod msa;
pub mod options;
pub mod timeline;
