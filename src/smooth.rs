//! Driver loop (C5) and de-binning pass (C6): ties the binning map, column
//! ring, kernel histogram, and quantile evaluator together into the public
//! `smooth` entry point.
//!
//! Grounded on `original_source/lib/libqhs/qhsmooth.c`: bin the whole input
//! once up front, then walk output rows top to bottom. Each row loads its
//! row span into the column ring, resets the kernel (no "snaking" across
//! rows), then walks output columns left to right loading each column span
//! into the kernel and evaluating the quantile. A final pass converts
//! decimal bin positions back to sample values.

use alloc::vec::Vec;
use core::cmp::min;
use core::time::Duration;

#[cfg(feature = "std")]
use std::time::Instant;

use crate::binning::{BinLayout, BinLayoutError};
use crate::column_ring::ColumnHistogramRing;
use crate::image::Image;
use crate::kernel::KernelHistogram;
use crate::quantile::{self, Strategy};

/// Minimum wall-clock interval between [`ProgressSink::on_row`] calls.
/// Matches the original's `MIN_DELAY 0.2` in `hsmooth.h`.
pub const MIN_PROGRESS_DELAY: Duration = Duration::from_millis(200);

/// Parameters for one [`smooth`] call: kernel half-widths, the target
/// quantile, the histogram's value range and bin count, and which
/// quantile-evaluation strategy to use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothParams {
    pub half_x: u32,
    pub half_y: u32,
    pub quantile: f64,
    pub hmin: f32,
    pub hmax: f32,
    pub bins: u32,
    pub strategy: Strategy,
}

impl SmoothParams {
    fn validate(&self) -> Result<BinLayout, SmoothError> {
        if !(self.quantile > 0.0 && self.quantile < 1.0) {
            return Err(SmoothError::InvalidQuantile { quantile: self.quantile });
        }
        BinLayout::new(self.hmin, self.hmax, self.bins).map_err(SmoothError::from)
    }
}

/// Errors `smooth` (and the C ABI wrapper) can report.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SmoothError {
    #[error("invalid histogram range: hmin ({hmin}) must be < hmax ({hmax})")]
    InvalidRange { hmin: f32, hmax: f32 },
    #[error("invalid bin count: {bins} (must be >= 1)")]
    InvalidBinCount { bins: u32 },
    #[error("invalid quantile: {quantile} (must satisfy 0 < q < 1)")]
    InvalidQuantile { quantile: f64 },
    #[error("output dimensions {got:?} do not match input dimensions {expected:?}")]
    DimensionMismatch { expected: (usize, usize), got: (usize, usize) },
    #[error("smoothing cancelled by progress sink")]
    Cancelled,
}

impl From<BinLayoutError> for SmoothError {
    fn from(err: BinLayoutError) -> Self {
        match err {
            BinLayoutError::InvalidRange { hmin, hmax } => SmoothError::InvalidRange { hmin, hmax },
            BinLayoutError::InvalidBinCount { bins } => SmoothError::InvalidBinCount { bins },
        }
    }
}

/// Row-progress and cooperative-cancellation hook. The driver calls
/// `on_row` at most once per [`MIN_PROGRESS_DELAY`] of wall-clock time
/// (always for the final row); returning `false` aborts the smoothing
/// pass with [`SmoothError::Cancelled`]. `elapsed` is always `Duration::ZERO`
/// in `no_std` builds, which have no wall clock to measure it with.
pub trait ProgressSink {
    fn on_row(&mut self, row: usize, total_rows: usize, elapsed: Duration) -> bool;
}

/// The default, zero-cost [`ProgressSink`]: never reports, never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    #[inline]
    fn on_row(&mut self, _row: usize, _total_rows: usize, _elapsed: Duration) -> bool {
        true
    }
}

/// Smooths `input` with a 2-D sliding-window quantile filter.
///
/// For every cell `(x, y)`, the output holds the requested quantile of the
/// non-NaN input samples in the `(2 * half_x + 1) x (2 * half_y + 1)`
/// window centered on `(x, y)`, clipped (not padded) at the image edges. The
/// window is never evaluated from scratch: a per-column histogram ring
/// tracks the moving row band and a kernel histogram tracks the moving
/// column range on top of it, so cost per cell is proportional to the
/// window's perimeter rather than its area.
///
/// # Arguments
///
/// * `input` - The samples to smooth, read-only.
/// * `params` - Kernel half-widths, target quantile, histogram range/bin
///   count, and evaluation strategy. See [`SmoothParams`].
/// * `progress` - Row-granularity progress/cancellation hook. Pass
///   [`NullProgress`] if neither is needed.
///
/// # Returns
///
/// A new image the same shape as `input` on success (`input` itself is not
/// modified); a cell whose window contains no valid samples is NaN. Returns
/// [`SmoothError`] if `params` fails validation or `progress` requests
/// cancellation.
///
/// # Example
///
/// ```
/// use qhsmooth_core::{smooth, Image, NullProgress, SmoothParams, Strategy};
///
/// let input = Image::from_vec(3, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
/// let params = SmoothParams {
///     half_x: 1,
///     half_y: 1,
///     quantile: 0.5,
///     hmin: 0.0,
///     hmax: 10.0,
///     bins: 10,
///     strategy: Strategy::FptBinCenters,
/// };
/// let output = smooth(&input, &params, &mut NullProgress).unwrap();
/// assert_eq!((output.width(), output.height()), (3, 3));
/// ```
pub fn smooth(
    input: &Image<f32>,
    params: &SmoothParams,
    progress: &mut dyn ProgressSink,
) -> Result<Image<f32>, SmoothError> {
    let layout = params.validate()?;
    let width = input.width();
    let height = input.height();

    let binned = bin_image(input, &layout);
    let mut positions = Image::filled(width, height, f64::NAN);

    let mut ring = ColumnHistogramRing::new(width, layout.histogram_len());
    let mut kernel = KernelHistogram::new(layout.histogram_len());

    #[cfg(feature = "std")]
    let start = Instant::now();
    #[cfg(feature = "std")]
    let mut last_report = start.checked_sub(MIN_PROGRESS_DELAY).unwrap_or(start);

    for y in 0..height {
        #[cfg(feature = "std")]
        {
            let now = Instant::now();
            if now.duration_since(last_report) >= MIN_PROGRESS_DELAY || y == height - 1 {
                if !progress.on_row(y, height, now.duration_since(start)) {
                    return Err(SmoothError::Cancelled);
                }
                last_report = now;
            }
        }
        #[cfg(not(feature = "std"))]
        {
            if !progress.on_row(y, height, Duration::ZERO) {
                return Err(SmoothError::Cancelled);
            }
        }

        let ymin = y.saturating_sub(params.half_y as usize);
        let ymax = min(y + params.half_y as usize, height - 1);
        ring.advance(&binned, ymin as i64, ymax as i64);

        kernel.reset();

        for x in 0..width {
            let xmin = x.saturating_sub(params.half_x as usize);
            let xmax = min(x + params.half_x as usize, width - 1);
            kernel.advance(&ring, xmin as i64, xmax as i64);

            let p = quantile::evaluate(kernel.counts(), layout.nb(), params.quantile, params.strategy);
            positions.set(x, y, p);
        }
    }

    Ok(debin_image(&positions, &layout))
}

/// Computes the bin index of every input sample once, up front (C1).
fn bin_image(input: &Image<f32>, layout: &BinLayout) -> Image<u32> {
    let data: Vec<u32> = input.as_slice().iter().map(|&v| layout.bin(v)).collect();
    Image::from_vec(input.width(), input.height(), data)
}

/// Converts each decimal bin position back to a sample value (C6). A `NaN`
/// position (empty kernel) passes through as `NaN`.
fn debin_image(positions: &Image<f64>, layout: &BinLayout) -> Image<f32> {
    let data: Vec<f32> = positions.as_slice().iter().map(|&p| layout.debin(p)).collect();
    Image::from_vec(positions.width(), positions.height(), data)
}
