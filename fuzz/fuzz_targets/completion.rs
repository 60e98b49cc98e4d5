#![no_main]

use libfuzzer_sys::fuzz_target;
use psl_ide::{complete_with_trigger, Trigger};
use psl_syntax::{Position, Schema};

const MAX_SOURCE_BYTES: usize = 4096;
const URI: &str = "file:///fuzz.prisma";

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let (header, body) = data.split_at(3);
    let capped = &body[..body.len().min(MAX_SOURCE_BYTES)];
    let source = String::from_utf8_lossy(capped).into_owned();
    let trigger = match header[2] % 4 {
        0 => Trigger::Invoked,
        1 => Trigger::Character('@'),
        2 => Trigger::Character('"'),
        _ => Trigger::Character('.'),
    };

    let schema = Schema::single_file(URI, source);
    let line_count = schema.documents()[0].line_index().line_count() as u32;
    let line = u32::from(header[0]) % (line_count + 1);
    let character = u32::from(header[1]);

    // Positions past the end are allowed and must not panic either.
    let _ = complete_with_trigger(&schema, URI, Position::new(line, character), trigger);
});
