/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of byte streams and bit streams.

If you need to read or write bytes from a file or any backend implementing
[`std::io::Read`] or [`std::io::Write`] you just need to wrap it in a
[`ByteAdapter`].

If instead you want to read or write directly from memory, you can use
[`MemByteReader`], [`MemByteWriter`], and [`MemByteWriterVec`].

Once you have a way to access bytes, you can use [`BitReader`] and
[`BitWriter`] to read or write bit fields of 1 to 64 bits, most significant
bit first. Both keep the bits that have not been consumed or emitted yet in a
one-byte cache, and pass byte operations straight to the underlying stream
when the cache is empty.

The bulk operations of the underlying stream ([`ByteRead::read_bytes`],
[`ByteWrite::write_bytes`]) and its finalization ([`ByteWrite::close`]) are
optional: streams that do not provide them get the default implementations
based on single-byte operations. Which implementation is used is decided
statically by the type of the stream the bit stream is built on.

[`ByteRead::read_bytes`]: crate::traits::ByteRead::read_bytes
[`ByteWrite::write_bytes`]: crate::traits::ByteWrite::write_bytes
[`ByteWrite::close`]: crate::traits::ByteWrite::close

*/

mod bit_cache;

mod mem_byte_reader;
pub use mem_byte_reader::*;

mod mem_byte_writer;
pub use mem_byte_writer::*;

#[cfg(feature = "std")]
mod byte_adapter;
#[cfg(feature = "std")]
pub use byte_adapter::*;

mod bit_reader;
pub use bit_reader::BitReader;

mod bit_writer;
pub use bit_writer::BitWriter;
