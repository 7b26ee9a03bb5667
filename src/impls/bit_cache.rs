/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// Return a mask with the lowest `n` bits set, for `n` in `0..=8`.
#[inline(always)]
#[must_use]
pub(crate) fn byte_mask(n: usize) -> u8 {
    debug_assert!(n <= 8);
    ((1_u16 << n) - 1) as u8
}

/// Return a mask with the lowest `n` bits set, for `n` in `0..=64`.
#[inline(always)]
#[must_use]
pub(crate) fn word_mask(n: usize) -> u64 {
    debug_assert!(n <= 64);
    ((1_u128 << n) - 1) as u64
}

/// The one-byte bit cache shared by [`BitReader`](super::BitReader) and
/// [`BitWriter`](super::BitWriter).
///
/// The valid bits are the lowest `bits` bits of `byte`, and the bits above
/// them are always zero. For a reader they are the bits not yet returned; for
/// a writer they are the bits not yet flushed. The highest valid bit comes
/// first in the stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub(crate) struct BitCache {
    byte: u8,
    /// Always smaller than 8.
    bits: usize,
}

impl BitCache {
    #[inline(always)]
    #[must_use]
    pub(crate) fn bits(&self) -> usize {
        self.bits
    }

    #[inline(always)]
    #[must_use]
    pub(crate) fn byte(&self) -> u8 {
        self.byte
    }

    #[inline(always)]
    #[must_use]
    pub(crate) fn is_aligned(&self) -> bool {
        self.bits == 0
    }

    /// Space left before the cache forms a full byte.
    #[inline(always)]
    #[must_use]
    pub(crate) fn free_bits(&self) -> usize {
        8 - self.bits
    }

    /// Replace the content with the lowest `bits` bits of `byte`.
    #[inline(always)]
    pub(crate) fn set(&mut self, byte: u8, bits: usize) {
        debug_assert!(bits < 8);
        self.byte = byte & byte_mask(bits);
        self.bits = bits;
    }

    /// Append the lowest `n` bits of `value`, which must fit in the free space
    /// without filling it.
    #[inline(always)]
    pub(crate) fn push(&mut self, value: u64, n: usize) {
        debug_assert!(n < self.free_bits());
        self.byte = (self.byte << n) | (value as u8 & byte_mask(n));
        self.bits += n;
    }

    /// Remove the `n` highest valid bits and return them in the lowest bits.
    #[inline(always)]
    pub(crate) fn pop(&mut self, n: usize) -> u8 {
        debug_assert!(n <= self.bits);
        self.bits -= n;
        let result = self.byte >> self.bits;
        self.byte &= byte_mask(self.bits);
        result
    }

    /// Empty the cache, returning the number of bits discarded.
    #[inline(always)]
    pub(crate) fn clear(&mut self) -> usize {
        let discarded = self.bits;
        self.byte = 0;
        self.bits = 0;
        discarded
    }
}
