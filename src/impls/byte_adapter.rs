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
use std::io::{ErrorKind, Read, Write};

/// An adapter from [`Read`] and [`Write`] to [`ByteRead`] and [`ByteWrite`],
/// respectively.
///
/// Instances of this struct can be created using [`ByteAdapter::new`]. They
/// turn every standard source or destination of bytes (such as
/// [`std::fs::File`], [`std::io::BufReader`], sockets, etc.) into a source
/// or destination of bytes for a [`BitReader`](crate::impls::BitReader) or a
/// [`BitWriter`](crate::impls::BitWriter).
///
/// Bulk transfers use the native [`Read::read`] and [`Write::write`] methods,
/// and [`close`](ByteWrite::close) calls [`Write::flush`]. End of data is
/// reported as an error of kind [`ErrorKind::UnexpectedEof`].
///
/// Since single-byte operations are passed through to the backend, you should
/// wrap unbuffered backends in a [`std::io::BufReader`] or
/// [`std::io::BufWriter`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct ByteAdapter<B> {
    backend: B,
}

impl<B> ByteAdapter<B> {
    /// Create a new ByteAdapter
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn into_inner(self) -> B {
        self.backend
    }
}

impl<B: Read> ByteRead for ByteAdapter<B> {
    type Error = std::io::Error;

    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut byte = [0_u8; 1];
        self.backend.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PartialTransfer<Self::Error>> {
        let mut transferred = 0;
        while transferred < buf.len() {
            match self.backend.read(&mut buf[transferred..]) {
                Ok(0) => {
                    return Err(PartialTransfer {
                        transferred,
                        error: std::io::Error::from(ErrorKind::UnexpectedEof),
                    });
                }
                Ok(n) => transferred += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(error) => return Err(PartialTransfer { transferred, error }),
            }
        }
        Ok(transferred)
    }
}

impl<B: Write> ByteWrite for ByteAdapter<B> {
    type Error = std::io::Error;

    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.backend.write_all(&[byte])
    }

    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, PartialTransfer<Self::Error>> {
        let mut transferred = 0;
        while transferred < buf.len() {
            match self.backend.write(&buf[transferred..]) {
                Ok(0) => {
                    return Err(PartialTransfer {
                        transferred,
                        error: std::io::Error::from(ErrorKind::WriteZero),
                    });
                }
                Ok(n) => transferred += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(error) => return Err(PartialTransfer { transferred, error }),
            }
        }
        Ok(transferred)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.backend.flush()
    }
}
