//! Column histogram ring (C2): one histogram per input column, tracking a
//! contiguous vertical row band shared by all columns.
//!
//! Grounded on `original_source/libqhs/load_hist_rows.c`'s `hist_prep`:
//! rows below the target band are dropped first, then rows above it are
//! appended. Both phases are `O(width * N)` per row, and because the
//! driver only ever walks output rows in increasing order, the band only
//! ever grows on both ends — see `advance`'s monotonicity assumption.

use alloc::vec::Vec;

use crate::binning::NAN_SENTINEL;
use crate::histogram::Counts;
use crate::image::Image;

/// Per-column histograms over a shared, moving row band `[row_lo, row_hi]`.
/// The band starts empty (`row_lo = 0`, `row_hi = -1`).
pub struct ColumnHistogramRing {
    histograms: Vec<Counts>,
    row_lo: i64,
    row_hi: i64,
}

impl ColumnHistogramRing {
    pub fn new(width: usize, histogram_len: usize) -> Self {
        ColumnHistogramRing {
            histograms: (0..width).map(|_| Counts::zeroed(histogram_len)).collect(),
            row_lo: 0,
            row_hi: -1,
        }
    }

    pub fn row_lo(&self) -> i64 {
        self.row_lo
    }

    pub fn row_hi(&self) -> i64 {
        self.row_hi
    }

    pub fn width(&self) -> usize {
        self.histograms.len()
    }

    pub fn column(&self, x: usize) -> &Counts {
        &self.histograms[x]
    }

    /// Advances the row band to `[target_lo, target_hi]`.
    ///
    /// Both bounds must be non-decreasing relative to the current band
    /// (`target_lo >= row_lo()`, `target_hi >= row_hi()`); the driver's
    /// strictly increasing output-row walk guarantees this. Violating it
    /// would require a `reset` this type deliberately does not provide —
    /// rows can only ever be appended or dropped from the correct end.
    pub fn advance(&mut self, binned: &Image<u32>, target_lo: i64, target_hi: i64) {
        debug_assert!(target_lo <= target_hi);
        debug_assert!(target_lo >= self.row_lo, "row band must advance monotonically (lo)");
        debug_assert!(target_hi >= self.row_hi, "row band must advance monotonically (hi)");

        while self.row_lo < target_lo {
            Self::update_row(&mut self.histograms, binned, self.row_lo as usize, Counts::remove_bin);
            self.row_lo += 1;
        }
        while self.row_hi < target_hi {
            self.row_hi += 1;
            Self::update_row(&mut self.histograms, binned, self.row_hi as usize, Counts::add_bin);
        }
    }

    fn update_row(
        histograms: &mut [Counts],
        binned: &Image<u32>,
        row: usize,
        mut apply: impl FnMut(&mut Counts, u32),
    ) {
        let bins = binned.row(row);
        for (hist, &bin) in histograms.iter_mut().zip(bins.iter()) {
            if bin != NAN_SENTINEL {
                apply(hist, bin);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binned_from(rows: &[&[u32]]) -> Image<u32> {
        let height = rows.len();
        let width = rows[0].len();
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            data.extend_from_slice(row);
        }
        Image::from_vec(width, height, data)
    }

    #[test]
    fn starts_empty() {
        let ring = ColumnHistogramRing::new(3, 5);
        assert_eq!(ring.row_lo(), 0);
        assert_eq!(ring.row_hi(), -1);
        for x in 0..3 {
            assert_eq!(ring.column(x).tally(), 0);
        }
    }

    #[test]
    fn appending_rows_accumulates_per_column() {
        let binned = binned_from(&[&[1, 2, 3], &[1, 1, 3]]);
        let mut ring = ColumnHistogramRing::new(3, 5);
        ring.advance(&binned, 0, 1);
        assert_eq!(ring.row_lo(), 0);
        assert_eq!(ring.row_hi(), 1);
        assert_eq!(ring.column(0).tally(), 2);
        assert_eq!(ring.column(0).get(1), 2);
        assert_eq!(ring.column(1).get(2), 1);
        assert_eq!(ring.column(1).get(1), 1);
        assert_eq!(ring.column(2).get(3), 2);
    }

    #[test]
    fn dropping_rows_reverses_append() {
        let binned = binned_from(&[&[1], &[1], &[2]]);
        let mut ring = ColumnHistogramRing::new(1, 5);
        ring.advance(&binned, 0, 2);
        assert_eq!(ring.column(0).tally(), 3);
        ring.advance(&binned, 1, 2);
        assert_eq!(ring.row_lo(), 1);
        assert_eq!(ring.column(0).tally(), 2);
        assert_eq!(ring.column(0).get(1), 1);
        assert_eq!(ring.column(0).get(2), 1);
    }

    #[test]
    fn nan_samples_are_excluded() {
        let binned = binned_from(&[&[NAN_SENTINEL, 1]]);
        let mut ring = ColumnHistogramRing::new(2, 5);
        ring.advance(&binned, 0, 0);
        assert_eq!(ring.column(0).tally(), 0);
        assert_eq!(ring.column(1).tally(), 1);
    }

    #[test]
    fn monotone_advance_band_only_grows_forward() {
        let binned = binned_from(&[&[1], &[1], &[1], &[1]]);
        let mut ring = ColumnHistogramRing::new(1, 5);
        ring.advance(&binned, 0, 1);
        ring.advance(&binned, 1, 2);
        ring.advance(&binned, 2, 3);
        assert_eq!(ring.row_lo(), 2);
        assert_eq!(ring.row_hi(), 3);
        assert_eq!(ring.column(0).tally(), 2);
    }
}
