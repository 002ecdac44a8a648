//! Quantile evaluator (C4): turns a kernel histogram's tally and bin counts
//! into a decimal bin position for the requested quantile.
//!
//! Grounded on `original_source/lib/libqhs/kern_calc.c`'s three accumulator
//! routines (`ikern_quant`, `fkern_quant`, `fkern_quant_s`), which this
//! module's three [`Strategy`] variants mirror one-for-one. All three share
//! the same cumulation walk; they differ only in the arithmetic applied
//! once the bin containing the quantile is found. [`BinLayout::debin`]
//! converts the decimal position this module returns into a sample value —
//! that conversion is identical across strategies and lives there, not here.

use crate::histogram::Counts;

/// Which arithmetic to apply once the target bin is located.
///
/// Dispatched as a plain `match` in [`evaluate`] rather than through a
/// trait object: the driver calls this once per output pixel, and a vtable
/// indirection in that hot loop buys nothing a strategy is picked once per
/// `smooth` call and never changes mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Integer-mode accumulator: no interpolation, returns whole bin
    /// indices (or a linear blend of two whole indices when the quantile
    /// falls between populated bins).
    IntegerExact,
    /// Floating-point accumulator using bin centers: every returned
    /// position is `i + 0.5` for some bin `i`, or a blend of two centers.
    FptBinCenters,
    /// Floating-point accumulator with sub-bin interpolation: accounts for
    /// how far into a bin's count the quantile element falls, giving
    /// sub-bin resolution instead of snapping to the bin center.
    FptInterpolate,
}

/// Evaluates `quantile` (strictly between 0 and 1) against a kernel
/// histogram's `nb` non-tally bins, returning a decimal bin position in
/// `BinLayout::debin`'s coordinate system (`0` is the underflow bin,
/// `nb - 1` is the overflow bin). Returns `NaN` if the kernel is empty.
pub fn evaluate(counts: &Counts, nb: usize, quantile: f64, strategy: Strategy) -> f64 {
    debug_assert!(quantile > 0.0 && quantile < 1.0);
    debug_assert_eq!(counts.len(), nb + 1);

    let npixels = counts.tally() as f64;
    if npixels == 0.0 {
        return f64::NAN;
    }

    // Decimal element (not an array index) corresponding to `quantile`.
    let qelem = (npixels + 1.0) * quantile;
    let histq = qelem.floor();
    let qfrac = qelem - histq;

    let (i, total) = cumulate(counts, nb, histq);

    match strategy {
        Strategy::IntegerExact => integer_exact(counts, nb, i, total, qelem, qfrac),
        Strategy::FptBinCenters => fpt_bin_centers(counts, nb, i, total, qelem, qfrac),
        Strategy::FptInterpolate => fpt_interpolate(counts, nb, i, total, qelem, qfrac),
    }
}

/// Walks bins `0..nb` accumulating counts until the running total reaches
/// `histq`, returning the stopping bin index and the total at that point.
/// Guaranteed to terminate with `i < nb`: `histq <= npixels` and `npixels`
/// is the sum of all `nb` bins.
fn cumulate(counts: &Counts, nb: usize, histq: f64) -> (usize, f64) {
    let mut total = 0.0;
    let mut i = nb - 1;
    let mut acc = 0.0;
    for k in 0..nb {
        acc += counts.get(k) as f64;
        if acc >= histq {
            i = k;
            total = acc;
            break;
        }
    }
    (i, total)
}

/// Finds the first bin at or after `start` with a nonzero count.
fn next_populated(counts: &Counts, nb: usize, start: usize) -> usize {
    for j in start..nb {
        if counts.get(j) > 0 {
            return j;
        }
    }
    nb - 1
}

fn integer_exact(counts: &Counts, nb: usize, i: usize, total: f64, qelem: f64, qfrac: f64) -> f64 {
    const HIST_UFLOW: f64 = 0.0;
    let hist_oflow = (nb - 1) as f64;

    if i == 0 {
        return HIST_UFLOW;
    }
    if i == nb - 1 {
        return hist_oflow;
    }
    if total >= qelem {
        return i as f64;
    }

    let j = next_populated(counts, nb, i + 1);
    if j == nb - 1 {
        return hist_oflow;
    }
    (1.0 - qfrac) * (i as f64) + qfrac * (j as f64)
}

fn fpt_bin_centers(counts: &Counts, nb: usize, i: usize, total: f64, qelem: f64, qfrac: f64) -> f64 {
    const HIST_UFLOW: f64 = 0.5;
    let hist_oflow = (nb as f64) - 0.5;

    if i == 0 {
        return HIST_UFLOW;
    }
    if i == nb - 1 {
        return hist_oflow;
    }
    if total >= qelem {
        return i as f64 + 0.5;
    }

    let j = next_populated(counts, nb, i + 1);
    if j == nb - 1 {
        return hist_oflow;
    }
    0.5 + (1.0 - qfrac) * (i as f64) + qfrac * (j as f64)
}

fn fpt_interpolate(counts: &Counts, nb: usize, i: usize, total: f64, qelem: f64, qfrac: f64) -> f64 {
    const HIST_UFLOW: f64 = 0.5;
    let hist_oflow = (nb as f64) - 0.5;

    if i == 0 {
        return HIST_UFLOW;
    }
    if i == nb - 1 {
        return hist_oflow;
    }

    let lo_counts = counts.get(i) as f64;
    if total >= qelem {
        // Lower and upper quantile elements fall in the same bin `i`.
        // Subtract the overshoot from the rightmost sub-bin center.
        return (i as f64 + 1.0) - ((total - qelem) / lo_counts);
    }

    let lo_eff_bin = i as f64 + ((lo_counts - 0.5) / lo_counts);
    let j = next_populated(counts, nb, i + 1);
    if j == nb - 1 {
        return hist_oflow;
    }
    let hi_counts = counts.get(j) as f64;
    let hi_eff_bin = j as f64 + (0.5 / hi_counts);
    (1.0 - qfrac) * lo_eff_bin + qfrac * hi_eff_bin
}
