#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let docs = match autocheck::parse_documents(&s) {
        Ok(d) => d,
        Err(_) => return,
    };
    let Some(root) = autocheck::select_root(docs) else {
        return;
    };

    let yaml = match autocheck::serialize::to_yaml(&root) {
        Ok(y) => y,
        Err(_) => return,
    };

    // If we can serialize a parsed root, we must be able to parse it back.
    if autocheck::parse_documents(&yaml).is_err() {
        panic!(
            "Roundtrip failure: serialize produced YAML that cannot be re-parsed.\n\
             Input (lossy): {:?}\n\
             Serialized YAML:\n{}",
            s.get(..200).unwrap_or(&s),
            yaml.get(..500).unwrap_or(&yaml),
        );
    }
});
