/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![cfg(feature = "fuzz")]

use arbitrary::Arbitrary;
use msb_bitio::fuzz::bits::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_fuzz_bits() -> Result<(), Box<dyn std::error::Error>> {
    let mut r = SmallRng::seed_from_u64(0);
    for _ in 0..1000 {
        let len = r.random_range(0..4096);
        let bytes: Vec<u8> = (0..len).map(|_| r.random()).collect();
        let mut unstructured = arbitrary::Unstructured::new(&bytes);
        let data = FuzzCase::arbitrary(&mut unstructured)?;
        bits(data);
    }
    Ok(())
}
