#![doc = include_str!("../README.MD")]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod binning;
pub mod column_ring;
pub mod histogram;
pub mod image;
pub mod kernel;
pub mod quantile;
pub mod smooth;

#[cfg(feature = "c-exports")]
pub mod exports;

pub use binning::BinLayout;
pub use histogram::Counts;
pub use image::Image;
pub use quantile::Strategy;
pub use smooth::{smooth, NullProgress, ProgressSink, SmoothError, SmoothParams};
