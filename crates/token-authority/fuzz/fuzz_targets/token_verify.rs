#![no_main]

use libfuzzer_sys::fuzz_target;
use token_authority::{extract_bearer, SigningAlgorithm, TokenAuthority};

const SECRET: &[u8] = b"fuzz-secret-fuzz-secret-fuzz-sec";

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(authority) = TokenAuthority::from_secret(SECRET, SigningAlgorithm::Hs256) else {
        return;
    };

    // Neither path may panic on arbitrary input.
    let _ = authority.verify(input);

    if let Ok(token) = extract_bearer(Some(input)) {
        let _ = authority.verify(token);
    }
});
