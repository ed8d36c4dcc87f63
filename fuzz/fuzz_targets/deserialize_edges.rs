#![no_main]

use libfuzzer_sys::fuzz_target;
use vertex_edges::{EdgeStoreKind, EdgeStoreOptions, NoValue};

fuzz_target!(|data: &[u8]| {
    for kind in EdgeStoreKind::ALL {
        let Ok(mut store) = EdgeStoreOptions::new(kind).build::<u64, NoValue>() else {
            continue;
        };
        if store.deserialize(data).is_ok() {
            // Accepted input must survive a second round trip unchanged in size.
            let bytes = store.serialize().expect("re-serialize");
            let len = store.len();
            store.deserialize(&bytes).expect("re-deserialize");
            assert_eq!(store.len(), len);
        }
    }

    for kind in [EdgeStoreKind::Array, EdgeStoreKind::HashMap, EdgeStoreKind::ByteArray] {
        if let Ok(mut store) = EdgeStoreOptions::new(kind).build::<u32, String>() {
            let _ = store.deserialize(data);
            let _ = store.edges().count();
        }
    }
});
