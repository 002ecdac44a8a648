//! Kernel histogram (C3): the moving-window sum of column histograms
//! covering the current pixel's horizontal kernel range.
//!
//! Grounded on `original_source/lib/libqhs/load_kern_cols.c`'s `kern_prep`:
//! the same drop-then-append discipline as the column ring, but operating
//! on whole column histograms (`Counts::sub_all`/`add_all`) rather than
//! individual samples. `reset_kernel` only applies at the start of a new
//! output row in the original's "no snaking" row-major walk; this type's
//! `reset` mirrors that.

use crate::histogram::Counts;
use crate::column_ring::ColumnHistogramRing;

/// Sum of column histograms over the current horizontal kernel range
/// `[col_lo, col_hi]`. Starts empty (`col_lo = 0`, `col_hi = -1`).
pub struct KernelHistogram {
    counts: Counts,
    col_lo: i64,
    col_hi: i64,
}

impl KernelHistogram {
    pub fn new(histogram_len: usize) -> Self {
        KernelHistogram { counts: Counts::zeroed(histogram_len), col_lo: 0, col_hi: -1 }
    }

    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    pub fn col_lo(&self) -> i64 {
        self.col_lo
    }

    pub fn col_hi(&self) -> i64 {
        self.col_hi
    }

    /// Empties the kernel. Called at the start of each output row: the
    /// driver walks columns left to right within a row and does not carry
    /// a partial kernel across to the next row (no "snaking").
    pub fn reset(&mut self) {
        self.counts.reset();
        self.col_lo = 0;
        self.col_hi = -1;
    }

    /// Advances the kernel's column range to `[target_lo, target_hi]`,
    /// pulling column histograms from `ring`.
    ///
    /// Like [`ColumnHistogramRing::advance`], both bounds must be
    /// non-decreasing since the last call (or since the last [`reset`]).
    pub fn advance(&mut self, ring: &ColumnHistogramRing, target_lo: i64, target_hi: i64) {
        debug_assert!(target_lo <= target_hi);
        debug_assert!(target_lo >= self.col_lo, "kernel column range must advance monotonically (lo)");
        debug_assert!(target_hi >= self.col_hi, "kernel column range must advance monotonically (hi)");

        while self.col_lo < target_lo {
            self.counts.sub_all(ring.column(self.col_lo as usize));
            self.col_lo += 1;
        }
        while self.col_hi < target_hi {
            self.col_hi += 1;
            self.counts.add_all(ring.column(self.col_hi as usize));
        }
    }
}
