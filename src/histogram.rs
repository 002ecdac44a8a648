//! `Counts`: the `N`-wide counter array shared by column histograms and
//! the kernel histogram. The trailing slot is always the tally of valid
//! (non-NaN) samples the histogram represents; `add_bin`/`remove_bin`
//! touch the target bin and the tally together so the tally invariant
//! (`counter[N-1] == sum(counter[..N-1])`) cannot be violated by a caller
//! forgetting half of the update.
//!
//! This generalizes a fixed-256-wide counter array to a runtime-sized one,
//! since here the histogram width `N = bins + 3` is only known once the
//! caller picks a bin count.

use alloc::vec;
use alloc::vec::Vec;

/// A histogram counter array of width `N = bins + 3`: `bins + 2` bin
/// slots (underflow, in-range, overflow) followed by one tally slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counts {
    counter: Vec<u32>,
}

impl Counts {
    /// Creates a zero-filled counter array of the given total width
    /// (`N`, including the tally slot).
    pub fn zeroed(len: usize) -> Self {
        Counts { counter: vec![0; len] }
    }

    pub fn len(&self) -> usize {
        self.counter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counter.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> u32 {
        self.counter[i]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.counter
    }

    /// The running count of valid samples represented (the trailing slot).
    #[inline]
    pub fn tally(&self) -> u32 {
        *self.counter.last().expect("Counts is never zero-length")
    }

    /// Increments bin `bin` and the tally together.
    #[inline]
    pub fn add_bin(&mut self, bin: u32) {
        let last = self.counter.len() - 1;
        self.counter[bin as usize] += 1;
        self.counter[last] += 1;
    }

    /// Decrements bin `bin` and the tally together.
    #[inline]
    pub fn remove_bin(&mut self, bin: u32) {
        let last = self.counter.len() - 1;
        self.counter[bin as usize] -= 1;
        self.counter[last] -= 1;
    }

    /// Adds every slot of `other` into `self` (used when a column
    /// histogram enters the kernel range).
    #[inline]
    pub fn add_all(&mut self, other: &Counts) {
        debug_assert_eq!(self.counter.len(), other.counter.len());
        for (dst, src) in self.counter.iter_mut().zip(other.counter.iter()) {
            *dst += *src;
        }
    }

    /// Subtracts every slot of `other` from `self` (used when a column
    /// histogram leaves the kernel range).
    #[inline]
    pub fn sub_all(&mut self, other: &Counts) {
        debug_assert_eq!(self.counter.len(), other.counter.len());
        for (dst, src) in self.counter.iter_mut().zip(other.counter.iter()) {
            *dst -= *src;
        }
    }

    /// Zeros every slot, preserving length.
    pub fn reset(&mut self) {
        self.counter.iter_mut().for_each(|c| *c = 0);
    }

    /// Debug-only check of the tally invariant: `counter[N-1] ==
    /// sum(counter[..N-1])`.
    #[cfg(test)]
    fn tally_is_consistent(&self) -> bool {
        let sum: u64 = self.counter[..self.counter.len() - 1]
            .iter()
            .map(|&c| c as u64)
            .sum();
        sum == self.tally() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_bin_keeps_tally_consistent() {
        let mut c = Counts::zeroed(5);
        c.add_bin(0);
        c.add_bin(2);
        c.add_bin(2);
        assert!(c.tally_is_consistent());
        assert_eq!(c.tally(), 3);
        assert_eq!(c.get(2), 2);
    }

    #[test]
    fn remove_bin_undoes_add_bin() {
        let mut c = Counts::zeroed(5);
        c.add_bin(1);
        c.add_bin(1);
        c.remove_bin(1);
        assert!(c.tally_is_consistent());
        assert_eq!(c.get(1), 1);
        assert_eq!(c.tally(), 1);
    }

    #[test]
    fn add_all_sums_columns() {
        let mut a = Counts::zeroed(4);
        let mut b = Counts::zeroed(4);
        a.add_bin(0);
        b.add_bin(0);
        b.add_bin(1);
        a.add_all(&b);
        assert!(a.tally_is_consistent());
        assert_eq!(a.get(0), 2);
        assert_eq!(a.get(1), 1);
        assert_eq!(a.tally(), 3);
    }

    #[test]
    fn sub_all_reverses_add_all() {
        let mut a = Counts::zeroed(4);
        let mut b = Counts::zeroed(4);
        a.add_bin(0);
        a.add_bin(1);
        b.add_bin(0);
        a.add_all(&b);
        a.sub_all(&b);
        assert!(a.tally_is_consistent());
        assert_eq!(a.get(0), 1);
        assert_eq!(a.get(1), 1);
        assert_eq!(a.tally(), 2);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut c = Counts::zeroed(4);
        c.add_bin(0);
        c.add_bin(1);
        c.reset();
        assert_eq!(c.tally(), 0);
        assert!(c.as_slice().iter().all(|&x| x == 0));
    }
}
