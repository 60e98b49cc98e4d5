#![no_main]

use libfuzzer_sys::fuzz_target;
use psl_syntax::{Schema, TextSize};

const MAX_SOURCE_BYTES: usize = 8192;

fuzz_target!(|data: &[u8]| {
    let capped = &data[..data.len().min(MAX_SOURCE_BYTES)];
    let source = String::from_utf8_lossy(capped).into_owned();
    let len = TextSize::of(source.as_str());

    let schema = Schema::single_file("file:///fuzz.prisma", source);
    for block in schema.blocks() {
        assert!(block.range.end() <= len);
        for field in &block.fields {
            assert!(field.range.end() <= len);
        }
    }
});
