//! Pixel Painter grid editing engine
//!
//! This crate provides the core of the pixel-art editor:
//! - [`color`] - Packed `0xAARRGGBB` color codec and hex parsing
//! - [`grid`] - Fixed-resolution cell grid
//! - [`painted`] - Set of cells painted by the user over a reference image
//! - [`brush`] - Block brush for paint and erase
//! - [`convert`] - Image-to-grid converters (pixelate and outline)
//! - [`composite`] - Display compositing with reference fade-through
//! - [`export`] - Flattening and PNG encoding of the finished grid
//! - [`pipeline`] - Canvas session: gestures, undo and conversion sequencing

pub mod brush;
pub mod color;
pub mod composite;
pub mod constants;
pub mod convert;
pub mod error;
pub mod export;
pub mod grid;
pub mod painted;
pub mod pipeline;
pub mod types;

pub use brush::*;
pub use color::*;
pub use composite::*;
pub use constants::*;
pub use convert::*;
pub use error::*;
pub use export::*;
pub use grid::*;
pub use painted::*;
pub use pipeline::*;
pub use types::*;
