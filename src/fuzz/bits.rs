/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use alloc::vec::Vec;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug, Clone)]
pub struct FuzzCase {
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug, Clone)]
enum RandomCommand {
    Bits(u64, u8),
    Bool(bool),
    Byte(u8),
    Bytes(Vec<u8>),
    Align,
}

/// Write the commands of `data` to a [`BitWriter`], read them back with a
/// [`BitReader`], and check that the stream ends exactly where expected.
pub fn bits(data: FuzzCase) {
    let mut data = data;
    for command in &mut data.commands {
        if let RandomCommand::Bits(value, n_bits) = command {
            *n_bits = 1 + (*n_bits % 64);
            if *n_bits < 64 {
                *value &= (1 << *n_bits) - 1;
            }
        }
    }

    log::debug!("{:#4?}", data);

    let mut writer = CountBitWriter::new(BitWriter::new(MemByteWriterVec::new(Vec::new())));
    let mut paddings = Vec::new();
    for command in &data.commands {
        match command {
            RandomCommand::Bits(value, n_bits) => {
                assert_eq!(
                    writer.write_bits(*value, *n_bits as usize),
                    Ok(*n_bits as usize)
                );
            }
            RandomCommand::Bool(bit) => assert_eq!(writer.write_bool(*bit), Ok(())),
            RandomCommand::Byte(byte) => assert_eq!(writer.write_byte(*byte), Ok(())),
            RandomCommand::Bytes(bytes) => {
                assert_eq!(writer.write_bytes(bytes), Ok(bytes.len()));
            }
            RandomCommand::Align => {
                let padding = writer.align().unwrap();
                assert!(padding < 8);
                paddings.push(padding);
            }
        }
    }
    let total_bits = writer.bits_written;
    assert_eq!(writer.close(), Ok(()));
    let buffer = writer.into_inner().into_inner().into_inner();
    assert_eq!(buffer.len(), total_bits.div_ceil(8));

    let mut reader = CountBitReader::new(BitReader::new(MemByteReader::new(&buffer)));
    let mut paddings = paddings.into_iter();
    for command in &data.commands {
        match command {
            RandomCommand::Bits(value, n_bits) => {
                assert_eq!(reader.read_bits(*n_bits as usize), Ok(*value));
            }
            RandomCommand::Bool(bit) => assert_eq!(reader.read_bool(), Ok(*bit)),
            RandomCommand::Byte(byte) => assert_eq!(reader.read_byte(), Ok(*byte)),
            RandomCommand::Bytes(bytes) => {
                let mut buf = alloc::vec![0; bytes.len()];
                assert_eq!(reader.read_bytes(&mut buf), Ok(bytes.len()));
                assert_eq!(&buf, bytes);
            }
            RandomCommand::Align => {
                assert_eq!(Some(reader.align()), paddings.next());
            }
        }
    }
    assert_eq!(reader.bits_read, total_bits);

    // only the final padding is left
    reader.align();
    assert_eq!(
        reader.read_bool(),
        Err(BitError::Stream(ByteError::UnexpectedEof {
            byte_pos: buffer.len()
        }))
    );
}
