#![no_main]
use libfuzzer_sys::fuzz_target;

use mcbe_nbt::{decode, decode_with_opts, DecodeOpts, RootEnd};

fuzz_target!(|data: &[u8]| {
    match decode(data) {
        Ok(trace) => {
            assert_eq!(trace.consumed(), data.len());
            trace.check_nesting().unwrap();
        }
        Err(partial) => {
            assert!(partial.error().offset() <= data.len());
        }
    }

    let opts = DecodeOpts::new().max_depth(16).root_end(RootEnd::Terminate);
    if let Ok(trace) = decode_with_opts(data, opts) {
        assert!(trace.consumed() <= data.len());
        trace.check_nesting().unwrap();
    }
});
