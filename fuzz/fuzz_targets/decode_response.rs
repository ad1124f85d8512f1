#![no_main]

use debug_marshal::Marshaller;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let marshaller = Marshaller::new();
        if let Ok(response) = marshaller.unmarshall_response(line) {
            let encoded = marshaller.encode_response(&response);
            assert_eq!(marshaller.unmarshall_response(&encoded).ok(), Some(response));
        }
    }
});
