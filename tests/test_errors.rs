/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt::{Display, Formatter};
use msb_bitio::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SinkError {
    Full,
    Close,
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SinkError::Full => write!(f, "Can't write more"),
            SinkError::Close => write!(f, "Obliged not to close"),
        }
    }
}

impl std::error::Error for SinkError {}

/// A sink accepting a limited number of bytes, with only the single-byte
/// primitive.
struct LimitedSink {
    limit: usize,
    written: Vec<u8>,
}

impl LimitedSink {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            written: Vec::new(),
        }
    }
}

impl ByteWrite for LimitedSink {
    type Error = SinkError;

    fn write_byte(&mut self, byte: u8) -> Result<(), SinkError> {
        if self.limit == 0 {
            return Err(SinkError::Full);
        }
        self.limit -= 1;
        self.written.push(byte);
        Ok(())
    }
}

/// A sink that always fails to close.
struct FailingCloser {
    inner: LimitedSink,
    closed: usize,
}

impl ByteWrite for FailingCloser {
    type Error = SinkError;

    fn write_byte(&mut self, byte: u8) -> Result<(), SinkError> {
        self.inner.write_byte(byte)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.closed += 1;
        Err(SinkError::Close)
    }
}

/// A source with only the single-byte primitive.
struct PlainSource<'a> {
    data: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Exhausted;

impl Display for Exhausted {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Exhausted")
    }
}

impl std::error::Error for Exhausted {}

impl ByteRead for PlainSource<'_> {
    type Error = Exhausted;

    fn read_byte(&mut self) -> Result<u8, Exhausted> {
        let (&first, rest) = self.data.split_first().ok_or(Exhausted)?;
        self.data = rest;
        Ok(first)
    }
}

#[test]
fn test_partial_write() {
    let mut writer = BitWriter::new(LimitedSink::new(1));
    assert_eq!(writer.write_bool(true), Ok(()));
    let partial = writer.write_bytes(&[0x01, 0x02]).unwrap_err();
    assert_eq!(partial.transferred, 1);
    assert_eq!(partial.error, BitError::Stream(SinkError::Full));
    assert!(writer.close().is_err());
    assert_eq!(writer.into_inner().written, [0x80]);
}

#[test]
fn test_aligned_partial_write() {
    let mut writer = BitWriter::new(LimitedSink::new(2));
    let partial = writer.write_bytes(&[0x01, 0x02, 0x03]).unwrap_err();
    assert_eq!(partial.transferred, 2);
    assert_eq!(partial.error, BitError::Stream(SinkError::Full));
    assert_eq!(writer.write_byte(0), Err(BitError::Poisoned));
}

#[test]
fn test_write_bits_errors() {
    let mut writer = BitWriter::new(LimitedSink::new(0));
    assert_eq!(
        writer.write_bits(0x00, 9),
        Err(BitError::Stream(SinkError::Full))
    );

    let mut writer = BitWriter::new(LimitedSink::new(1));
    assert_eq!(
        writer.write_bits(0x00, 17),
        Err(BitError::Stream(SinkError::Full))
    );

    let mut writer = BitWriter::new(LimitedSink::new(0));
    assert_eq!(writer.write_bits(0x00, 7), Ok(7));
    assert_eq!(
        writer.write_bool(false),
        Err(BitError::Stream(SinkError::Full))
    );

    let mut writer = BitWriter::new(LimitedSink::new(0));
    assert_eq!(writer.write_bool(true), Ok(()));
    assert_eq!(writer.align(), Err(BitError::Stream(SinkError::Full)));
}

#[test]
fn test_close_errors() {
    // finalization error when there is nothing to flush
    let mut writer = BitWriter::new(FailingCloser {
        inner: LimitedSink::new(0),
        closed: 0,
    });
    assert_eq!(writer.close(), Err(BitError::Stream(SinkError::Close)));
    assert_eq!(writer.get_ref().closed, 1);

    // the flush error takes precedence, but the sink is closed anyway
    let mut writer = BitWriter::new(FailingCloser {
        inner: LimitedSink::new(0),
        closed: 0,
    });
    writer.write_bits(0b1, 1).unwrap();
    assert_eq!(writer.close(), Err(BitError::Stream(SinkError::Full)));
    assert_eq!(writer.get_ref().closed, 1);

    // closing twice
    assert_eq!(writer.close(), Err(BitError::Closed));
    assert_eq!(writer.get_ref().closed, 1);
}

#[test]
fn test_closed_writer() -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = BitWriter::new(MemByteWriterVec::new(Vec::new()));
    writer.write_bits(0x3, 2)?;
    writer.close()?;
    assert_eq!(writer.write_bits(1, 1), Err(BitError::Closed));
    assert_eq!(writer.write_byte(1), Err(BitError::Closed));
    assert_eq!(writer.align(), Err(BitError::Closed));
    assert_eq!(writer.close(), Err(BitError::Closed));
    let partial = writer.write_bytes(&[1]).unwrap_err();
    assert_eq!(partial.transferred, 0);
    assert_eq!(partial.error, BitError::Closed);
    assert_eq!(writer.into_inner().into_inner(), [0xc0]);
    Ok(())
}

#[test]
fn test_single_byte_streams() -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = BitWriter::new(LimitedSink::new(usize::MAX));
    writer.write_bytes(&[0xde, 0xad])?;
    writer.write_bits(0x5, 3)?;
    writer.write_bytes(&[0xbe, 0xef])?;
    writer.close()?;
    let data = writer.into_inner().written;
    assert_eq!(data, [0xde, 0xad, 0xb7, 0xdd, 0xe0]);

    let mut reader = BitReader::new(PlainSource { data: &data });
    let mut buf = [0; 2];
    assert_eq!(reader.read_bytes(&mut buf)?, 2);
    assert_eq!(buf, [0xde, 0xad]);
    assert_eq!(reader.read_bits(3)?, 0x5);
    assert_eq!(reader.read_bytes(&mut buf)?, 2);
    assert_eq!(buf, [0xbe, 0xef]);
    assert_eq!(reader.align(), 5);

    let partial = reader.read_bytes(&mut buf).unwrap_err();
    assert_eq!(partial.transferred, 0);
    assert_eq!(partial.error, BitError::Stream(Exhausted));
    Ok(())
}

#[test]
fn test_error_messages() {
    let error: BitError<SinkError> = BitError::InvalidWidth { n: 65 };
    assert_eq!(
        error.to_string(),
        "The number of bits must be in [1..64], but it is 65"
    );
    let error = BitError::Stream(SinkError::Full);
    assert_eq!(error.to_string(), "Stream error: Can't write more");
    assert!(std::error::Error::source(&error).is_some());
    let partial = PartialTransfer {
        transferred: 3,
        error: BitError::<SinkError>::Poisoned,
    };
    assert_eq!(
        partial.to_string(),
        "Transfer stopped after 3 bytes: The bit writer failed on a previous write"
    );
}
