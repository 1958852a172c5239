#![no_main]

use codec::{decode_packet, ProtocolVersion};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = wire::Limits::for_testing();
    for version in ProtocolVersion::ALL {
        if let Ok(packet) = decode_packet(data, version, &limits) {
            // Anything that decodes must encode and decode to the same kind.
            let bytes = packet.encode(version);
            let again = decode_packet(&bytes, version, &wire::Limits::unlimited());
            assert_eq!(again.map(|p| p.kind()).ok(), Some(packet.kind()));
        }
    }
});
