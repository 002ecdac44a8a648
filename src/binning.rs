//! Binning map: convert real samples to/from a fixed-range integer
//! histogram space with explicit under/overflow bins.
//!
//! Every histogram in this crate (column histograms, the kernel histogram)
//! shares the same bin layout: index `0` is underflow, indices `1..=bins`
//! are in-range, index `bins + 1` is overflow, and one further slot past
//! that (not counted in [`BinLayout::nb`]) is the running tally of valid
//! samples the histogram represents.

/// Sentinel bin index for a NaN sample. Distinguishable from any real bin
/// index produced by [`BinLayout::bin`], which never exceeds `bins + 1`.
pub const NAN_SENTINEL: u32 = u32::MAX;

/// Error returned when constructing a [`BinLayout`] from out-of-range
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum BinLayoutError {
    #[error("invalid histogram range: hmin ({hmin}) must be < hmax ({hmax})")]
    InvalidRange { hmin: f32, hmax: f32 },
    #[error("invalid bin count: {bins} (must be >= 1 and leave room below the NaN sentinel)")]
    InvalidBinCount { bins: u32 },
}

/// Validated bin-layout parameters: `hmin < hmax`, a positive in-range bin
/// count `bins`, and the derived bin width `s = (hmax - hmin) / bins`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinLayout {
    hmin: f32,
    hmax: f32,
    bins: u32,
    bin_width: f32,
}

impl BinLayout {
    /// Number of non-tally histogram slots: underflow (1) + in-range
    /// (`bins`) + overflow (1). This is `NB = N - 1`.
    const fn nb_for(bins: u32) -> usize {
        bins as usize + 2
    }

    pub fn new(hmin: f32, hmax: f32, bins: u32) -> Result<Self, BinLayoutError> {
        if !(hmin < hmax) {
            return Err(BinLayoutError::InvalidRange { hmin, hmax });
        }
        if bins == 0 || Self::nb_for(bins) as u64 >= NAN_SENTINEL as u64 {
            return Err(BinLayoutError::InvalidBinCount { bins });
        }
        let bin_width = (hmax - hmin) / bins as f32;
        Ok(BinLayout { hmin, hmax, bins, bin_width })
    }

    pub fn hmin(&self) -> f32 {
        self.hmin
    }

    pub fn hmax(&self) -> f32 {
        self.hmax
    }

    pub fn bins(&self) -> u32 {
        self.bins
    }

    pub fn bin_width(&self) -> f32 {
        self.bin_width
    }

    /// Number of non-tally histogram slots (`NB`).
    pub fn nb(&self) -> usize {
        Self::nb_for(self.bins)
    }

    /// Total histogram width including the trailing tally counter
    /// (`N = bins + 3`).
    pub fn histogram_len(&self) -> usize {
        self.nb() + 1
    }

    /// Maps a sample to a bin index, with explicit under/overflow bins.
    ///
    /// `v < hmin` maps to the underflow bin `0`; `v >= hmax` maps to the
    /// overflow bin `bins + 1` (note the closed upper bound: a sample
    /// exactly equal to `hmax` is overflow, not the top in-range bin, for
    /// consistency with integer-data callers).
    ///
    /// # Arguments
    ///
    /// * `v` - The sample to bin. May be NaN.
    ///
    /// # Returns
    ///
    /// A bin index in `[0, bins + 1]`, or [`NAN_SENTINEL`] if `v` is NaN.
    ///
    /// # Example
    ///
    /// ```
    /// use qhsmooth_core::BinLayout;
    ///
    /// let layout = BinLayout::new(0.0, 10.0, 10).unwrap();
    /// assert_eq!(layout.bin(-1.0), 0); // underflow
    /// assert_eq!(layout.bin(4.5), 5);  // in range
    /// assert_eq!(layout.bin(10.0), 11); // overflow: hmax itself is excluded
    /// ```
    #[inline]
    pub fn bin(&self, v: f32) -> u32 {
        if v.is_nan() {
            return NAN_SENTINEL;
        }
        if v < self.hmin {
            return 0;
        }
        if v >= self.hmax {
            return self.bins + 1;
        }
        1 + ((v - self.hmin) / self.bin_width).floor() as u32
    }

    /// Maps a decimal bin position back to a real sample value.
    ///
    /// Shared by all three quantile strategies in [`crate::quantile`]; they
    /// differ only in which `p` they compute, not in how `p` is converted
    /// back to a value.
    ///
    /// # Arguments
    ///
    /// * `p` - A decimal bin position in the `NB`-bin coordinate system,
    ///   where `0` is underflow and `nb() - 1` is overflow.
    ///
    /// # Returns
    ///
    /// The sample value `hmin + bin_width * (p - 1)`. For the conventional
    /// `p` values each strategy returns, this yields `hmin - bin_width / 2`
    /// for floating-point underflow, `hmax + bin_width / 2` for
    /// floating-point overflow, and `hmin - bin_width` / `hmax` for the
    /// integer-mode equivalents.
    ///
    /// # Example
    ///
    /// ```
    /// use qhsmooth_core::BinLayout;
    ///
    /// let layout = BinLayout::new(0.0, 10.0, 10).unwrap();
    /// // bin index 1 covers [0, 1); its center sits at decimal position 1.5
    /// assert!((layout.debin(1.5) - 0.5).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn debin(&self, p: f64) -> f32 {
        (self.hmin as f64 + self.bin_width as f64 * (p - 1.0)) as f32
    }
}
