/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// An implementation of [`ByteRead`] for a slice, with a native bulk read.
///
/// Reading past the end of the slice returns [`ByteError::UnexpectedEof`].
///
/// # Example
/// ```
/// use msb_bitio::prelude::*;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut byte_reader = MemByteReader::new(&data);
///
/// assert_eq!(byte_reader.read_byte().unwrap(), 0x01);
/// let mut buf = [0; 4];
/// let partial = byte_reader.read_bytes(&mut buf).unwrap_err();
/// assert_eq!(partial.transferred, 2);
/// assert_eq!(&buf[..2], &[0x02, 0x03]);
/// assert_eq!(byte_reader.byte_pos(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemByteReader<B: AsRef<[u8]>> {
    data: B,
    byte_pos: usize,
}

impl<B: AsRef<[u8]>> MemByteReader<B> {
    /// Create a new [`MemByteReader`] from a slice of data
    #[must_use]
    pub fn new(data: B) -> Self {
        Self { data, byte_pos: 0 }
    }

    /// Return the index of the next byte to read.
    #[must_use]
    pub fn byte_pos(&self) -> usize {
        self.byte_pos
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u8]>> ByteRead for MemByteReader<B> {
    type Error = ByteError;

    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8, ByteError> {
        match self.data.as_ref().get(self.byte_pos) {
            Some(&byte) => {
                self.byte_pos += 1;
                Ok(byte)
            }
            None => Err(ByteError::UnexpectedEof {
                byte_pos: self.byte_pos,
            }),
        }
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PartialTransfer<ByteError>> {
        let data = self.data.as_ref();
        let available = data.len().saturating_sub(self.byte_pos);
        let transferred = buf.len().min(available);
        buf[..transferred].copy_from_slice(&data[self.byte_pos..self.byte_pos + transferred]);
        self.byte_pos += transferred;
        if transferred < buf.len() {
            return Err(PartialTransfer {
                transferred,
                error: ByteError::UnexpectedEof {
                    byte_pos: self.byte_pos,
                },
            });
        }
        Ok(transferred)
    }
}
