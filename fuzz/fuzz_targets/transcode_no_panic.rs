#![no_main]

use libfuzzer_sys::fuzz_target;
use static_site_tools::html_to_markdown;

fuzz_target!(|html: &str| {
    let _ = html_to_markdown(html);
});
