#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;
use variable_injector::expand::Expander;
use variable_injector::ResourceList;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Must not panic regardless of input
        let variables = BTreeMap::from([("DOMAIN".to_string(), "example.com".to_string())]);
        let _ = Expander::new(&variables, None).expand_str(input.to_string());
        let _ = Expander::new(&variables, Some("P_")).expand_str(input.to_string());
        let _ = ResourceList::parse(input);
    }
});
