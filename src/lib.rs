//! Draw digits on a canvas, label them, and collect them into an MNIST-style CSV.
//!
//! The pipeline is `canvas` (280×280 bitmap + brush) → `sampler` (28×28 gray
//! capture) → `dataset` (labeled samples, CSV export). A [`session::Session`]
//! owns all three and is driven by [`session::Event`]s from either the
//! interactive window (`app`) or a headless script (`replay`).

pub mod app;
pub mod canvas;
pub mod config;
pub mod dataset;
pub mod draw;
pub mod error;
pub mod replay;
pub mod sampler;
pub mod session;
pub mod types;
