/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits for byte streams and bit streams.

[`ByteRead`] and [`ByteWrite`] describe the byte-oriented backends a bit
stream is built on: a single-byte primitive is mandatory, while bulk transfers
and finalization are optional and have default implementations in terms of
the primitive.

[`BitRead`] and [`BitWrite`] describe bit streams packing fields of 1 to 64
bits most-significant-bit first.

*/

mod byte_stream;
pub use byte_stream::*;

mod bit_stream;
pub use bit_stream::*;
