#![warn(clippy::all, rust_2018_idioms)]

//! Scales, datasets, view states and scene building for the chartdeck demos.
//!
//! Everything in here is free of any GUI toolkit: charts are built as a
//! [`scene::Scene`] and drawn through the [`scene::Renderer`] trait.

pub mod axis;
pub mod charts;
pub mod color;
pub mod dataset;
pub mod dispatch;
pub mod format;
pub mod join;
pub mod scale;
pub mod scene;
pub mod slider;
pub mod state;
pub mod svg_renderer;
pub mod timer;

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
