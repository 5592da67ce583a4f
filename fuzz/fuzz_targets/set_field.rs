#![no_main]

use fieldkit::{AccessorConfig, Record, Value, set_field_with_config};
use libfuzzer_sys::fuzz_target;

#[derive(Record, Default)]
pub struct Target {
    pub name: String,
    pub start_time: String,
    pub count: i32,
    pub quota: u32,
    pub total: i64,
}

const NAMES: &[&str] = &["name", "start_time", "count", "quota", "total", "missing"];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let name = NAMES[usize::from(selector) % NAMES.len()];
    let mut word = [0u8; 8];
    for (dst, src) in word.iter_mut().zip(rest) {
        *dst = *src;
    }
    let value = match selector / 8 % 6 {
        0 => Value::Bytes(rest.to_vec()),
        1 => Value::I64(i64::from_le_bytes(word)),
        2 => Value::U64(u64::from_le_bytes(word)),
        3 => Value::I32(i32::from_le_bytes([word[0], word[1], word[2], word[3]])),
        4 => Value::from_json(parse_json(rest)),
        _ => Value::Unset,
    };

    let mut target = Target::default();
    let config = AccessorConfig::new().with_warn_int_to_text(false);
    // Any outcome is fine as long as the write path does not panic.
    let _ = set_field_with_config(&mut target, name, value, &config);
});

fn parse_json(bytes: &[u8]) -> serde_json::Value {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or(serde_json::Value::Null)
}
