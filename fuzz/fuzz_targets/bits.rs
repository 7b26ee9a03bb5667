#![no_main]

use libfuzzer_sys::fuzz_target;
use msb_bitio::fuzz::bits::*;

fuzz_target!(|data: FuzzCase| {
    bits(data);
});
