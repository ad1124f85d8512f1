#![no_main]

use debug_marshal::Marshaller;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let mut marshaller = Marshaller::new();
        if let Ok(request) = marshaller.unmarshall_request(line) {
            // Whatever decodes must re-encode to a line that decodes the same.
            let encoded = marshaller.encode_request(&request);
            assert_eq!(marshaller.unmarshall_request(&encoded).ok(), Some(request));
        }
    }
});
