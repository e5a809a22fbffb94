#![no_main]

use libfuzzer_sys::fuzz_target;
use static_site_tools::charset::decode_html;

fuzz_target!(|data: &[u8]| {
    let _ = decode_html(data);
});
