//! C ABI surface (C8), gated behind `feature = "c-exports"`.
//!
//! Null-pointer checks on every pointer argument, slices built from raw
//! parts only after those checks, and no panics allowed to cross the FFI
//! boundary. Unlike the safe `smooth()` entry point (which allocates its
//! own output `Image` and so can never disagree with it on shape), this
//! wrapper takes the output width/height as separate caller-supplied
//! arguments — since the output buffer is caller-owned, not allocated by
//! this crate — and validates them against the input shape before doing
//! any work. This is the minimal boundary a non-Rust caller could link
//! against, the kind of call site an IDL-to-C FFI wrapper would need.

use core::slice;

use crate::image::Image;
use crate::quantile::Strategy;
use crate::smooth::{smooth, NullProgress, SmoothError, SmoothParams};

/// Maps [`Strategy`]'s C ABI encoding: `0` = integer exact, `1` = floating
/// bin centers, `2` = floating sub-bin interpolation.
fn strategy_from_u8(tag: u8) -> Option<Strategy> {
    match tag {
        0 => Some(Strategy::IntegerExact),
        1 => Some(Strategy::FptBinCenters),
        2 => Some(Strategy::FptInterpolate),
        _ => None,
    }
}

fn error_code(err: SmoothError) -> i32 {
    match err {
        SmoothError::InvalidRange { .. } => -1,
        SmoothError::InvalidBinCount { .. } => -2,
        SmoothError::InvalidQuantile { .. } => -3,
        SmoothError::DimensionMismatch { .. } => -4,
        SmoothError::Cancelled => -5,
    }
}

/// Smooths a `width * height` row-major `f32` buffer and writes the result
/// into `output`.
///
/// # Arguments
///
/// * `input` - Address of the first element of a `width * height` row-major
///   `f32` buffer to read samples from.
/// * `width` - Width, in samples, of both `input` and `output`.
/// * `height` - Height, in samples, of both `input` and `output`.
/// * `half_x` - Horizontal kernel half-width in pixels.
/// * `half_y` - Vertical kernel half-width in pixels.
/// * `quantile` - Target quantile, strictly between `0.0` and `1.0`.
/// * `hmin` - Lower bound of the in-range histogram interval.
/// * `hmax` - Upper bound of the in-range histogram interval.
/// * `bins` - Number of in-range histogram bins.
/// * `strategy` - Quantile-evaluation strategy tag: `0` integer exact, `1`
///   floating bin centers, `2` floating sub-bin interpolation.
/// * `output` - Address of the first element of the caller-owned
///   `output_width * output_height` buffer to write the smoothed result into.
/// * `output_width` - Width, in samples, of `output`; must equal `width`.
/// * `output_height` - Height, in samples, of `output`; must equal `height`.
///
/// # Returns
///
/// `0` on success, or a negative error code: `-1` invalid range, `-2` invalid
/// bin count, `-3` invalid quantile, `-4` `output_width`/`output_height`
/// disagree with `width`/`height`, `-5` cancelled, `-6` a null pointer or
/// unrecognized `strategy` tag.
///
/// # Safety
///
/// `input` must be valid for reads of `width * height` `f32` values;
/// `output` must be valid for writes of `output_width * output_height` `f32`
/// values. Neither may be null.
#[no_mangle]
pub unsafe extern "C" fn qhsmooth_core_smooth_f32(
    input: *const f32,
    width: u32,
    height: u32,
    half_x: u32,
    half_y: u32,
    quantile: f64,
    hmin: f32,
    hmax: f32,
    bins: u32,
    strategy: u8,
    output: *mut f32,
    output_width: u32,
    output_height: u32,
) -> i32 {
    if input.is_null() || output.is_null() {
        return -6;
    }
    let Some(strategy) = strategy_from_u8(strategy) else {
        return -6;
    };

    if output_width != width || output_height != height {
        return error_code(SmoothError::DimensionMismatch {
            expected: (width as usize, height as usize),
            got: (output_width as usize, output_height as usize),
        });
    }

    let len = width as usize * height as usize;
    let in_slice = slice::from_raw_parts(input, len);
    let image = Image::from_vec(width as usize, height as usize, in_slice.to_vec());

    let params = SmoothParams { half_x, half_y, quantile, hmin, hmax, bins, strategy };

    match smooth(&image, &params, &mut NullProgress) {
        Ok(result) => {
            let out_slice = slice::from_raw_parts_mut(output, len);
            out_slice.copy_from_slice(result.as_slice());
            0
        }
        Err(err) => error_code(err),
    }
}
