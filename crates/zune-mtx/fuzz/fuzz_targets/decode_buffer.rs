#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use zune_mtx::zune_core::bytestream::ZCursor;
    use zune_mtx::{MtxDecoder, MtxRevision};

    for revision in [MtxRevision::Basic, MtxRevision::Extended] {
        let mut decoder = MtxDecoder::new(ZCursor::new(data));
        decoder.set_revision(revision);
        let _ = decoder.decode();
    }
});
