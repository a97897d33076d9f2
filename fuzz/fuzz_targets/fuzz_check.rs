#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let result = match autocheck::check(&s) {
        Ok(r) => r,
        Err(e) => {
            let _ = e.to_diagnostic();
            return;
        }
    };

    for report in &result.reports {
        let ordered = report
            .diagnostics
            .windows(2)
            .all(|w| w[0].severity <= w[1].severity);
        assert!(ordered, "diagnostics out of order: {:?}", report.diagnostics);
    }
    let _ = autocheck::render::render_text(&result.notices(), &result.reports);
});
