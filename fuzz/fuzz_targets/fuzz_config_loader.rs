#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing, validation and evaluator construction must never panic.
    if let Ok(cfg) = hydro_config::load_toml(data) {
        if cfg.validate().is_ok() {
            // A validated config always yields an evaluator.
            let ev = hydro_core::Evaluator::from_config(&cfg);
            assert!(ev.is_ok(), "validated config rejected: {ev:?}");
        }
    }
});
