//! Clause-to-text highlight mapping.
//!
//! The analyzer quotes clauses with its own spacing and line breaks, so
//! clauses are located in a canonical (whitespace-free, case-folded) copy of
//! the document and the results are mapped back onto the original text
//! through an index map. Pipeline: [`normalize`] -> [`locate`] ->
//! [`resolve`] -> [`render`]; [`workflow`] runs all four.

pub mod anchors;
pub mod cards;
pub mod export;
pub mod locate;
pub mod model;
pub mod normalize;
pub mod render;
pub mod resolve;
pub mod text_layer;
pub mod workflow;
