#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::ByteReader;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    while !reader.is_empty() {
        let Some(op) = reader.read_u8().ok() else {
            break;
        };
        let ok = match op % 8 {
            0 => reader.read_var_i32().is_ok(),
            1 => reader.read_var_len().is_ok(),
            2 => reader.read_bool().is_ok(),
            3 => reader.read_i16().is_ok(),
            4 => reader.read_f64().is_ok(),
            5 => reader.read_uuid().is_ok(),
            6 => reader.read_fixed_point().is_ok(),
            _ => reader.read_angle().is_ok(),
        };
        if !ok {
            break;
        }
    }
});
