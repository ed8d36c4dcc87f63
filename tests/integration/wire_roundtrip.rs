#![allow(clippy::all)]

use proptest::prelude::*;
use vertex_edges::{
    types::{EdgeStoreError, Result},
    Edge, EdgeFactory, EdgeStoreKind, EdgeStoreOptions, NoValue, VertexEdges,
};

fn store<V: vertex_edges::EdgeValue + 'static>(
    kind: EdgeStoreKind,
) -> Box<dyn VertexEdges<u64, V>> {
    EdgeStoreOptions::new(kind).build::<u64, V>().unwrap()
}

fn is_ordered(kind: EdgeStoreKind) -> bool {
    matches!(
        kind,
        EdgeStoreKind::Array | EdgeStoreKind::NullArray | EdgeStoreKind::ByteArray
    )
}

#[test]
fn valueless_wire_is_java_compatible() -> Result<()> {
    // writeInt(count) followed by writeLong(id) per edge.
    let mut edges = store::<NoValue>(EdgeStoreKind::NullArray);
    edges.initialize(
        &mut [1u64, 0x0102_0304_0506_0708]
            .into_iter()
            .map(EdgeFactory::create_valueless),
    )?;
    let bytes = edges.serialize()?;
    assert_eq!(
        bytes,
        [0u8, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 1, 1, 2, 3, 4, 5, 6, 7, 8]
    );
    Ok(())
}

#[test]
fn every_kind_reads_what_it_wrote_across_kinds() -> Result<()> {
    let ids = [4u64, 9, 1];
    for writer in EdgeStoreKind::ALL {
        let mut source = store::<NoValue>(writer);
        source.initialize(&mut ids.into_iter().map(EdgeFactory::create_valueless))?;
        let bytes = source.serialize()?;
        for reader in EdgeStoreKind::ALL {
            let mut sink = store::<NoValue>(reader);
            sink.deserialize(&bytes)?;
            let mut got: Vec<u64> = sink.edges().map(|e| *e.target_id()).collect();
            got.sort_unstable();
            assert_eq!(got, [1, 4, 9], "{writer} -> {reader}");
        }
    }
    Ok(())
}

#[test]
fn truncated_and_overlong_input_is_rejected() -> Result<()> {
    for kind in EdgeStoreKind::ALL {
        let mut source = store::<NoValue>(kind);
        source.initialize(&mut [1u64, 2, 3].into_iter().map(EdgeFactory::create_valueless))?;
        let bytes = source.serialize()?;
        for cut in 0..bytes.len() {
            let mut sink = store::<NoValue>(kind);
            let err = sink.deserialize(&bytes[..cut]).unwrap_err();
            assert!(matches!(err, EdgeStoreError::Decode(_)), "{kind} cut at {cut}");
        }
        let mut padded = bytes.clone();
        padded.push(0);
        assert!(store::<NoValue>(kind).deserialize(&padded).is_err(), "{kind}");
    }
    Ok(())
}

#[test]
fn rejected_input_leaves_store_untouched() -> Result<()> {
    for kind in EdgeStoreKind::ALL {
        let mut source = store::<NoValue>(kind);
        source.initialize(&mut [1u64, 2].into_iter().map(EdgeFactory::create_valueless))?;
        let mut padded = source.serialize()?;
        padded.push(0);

        let mut sink = store::<NoValue>(kind);
        sink.initialize(&mut [7u64].into_iter().map(EdgeFactory::create_valueless))?;
        let err = sink.deserialize(&padded).unwrap_err();
        assert!(matches!(err, EdgeStoreError::Decode(_)), "{kind}");
        let ids: Vec<u64> = sink.edges().map(|e| *e.target_id()).collect();
        assert_eq!(ids, [7], "{kind}: trailing bytes");

        let truncated = &padded[..padded.len() - 2];
        assert!(sink.deserialize(truncated).is_err(), "{kind}");
        assert_eq!(sink.len(), 1, "{kind}: truncated record");
    }
    Ok(())
}

#[test]
fn metered_store_rejects_trailing_bytes_without_committing() -> Result<()> {
    let options = EdgeStoreOptions::new(EdgeStoreKind::Array)
        .metrics(vertex_edges::storage::default_metrics());
    let mut sink = options.build::<u64, u32>()?;
    sink.add(EdgeFactory::create(9, 1))?;
    let mut bytes = sink.serialize()?;
    bytes.extend_from_slice(&[0, 0]);
    assert!(sink.deserialize(&bytes).is_err());
    assert_eq!(sink.edge_value(&9), Some(1));
    Ok(())
}

#[test]
fn inflated_count_fails_before_reading_records() {
    let mut bytes = u32::MAX.to_be_bytes().to_vec();
    bytes.extend_from_slice(&7u64.to_be_bytes());
    for kind in EdgeStoreKind::ALL {
        let err = store::<NoValue>(kind).deserialize(&bytes).unwrap_err();
        assert!(err.to_string().contains("declared"), "{kind}: {err}");
    }
}

proptest! {
    #[test]
    fn roundtrip_law_for_weighted_edges(
        pairs in proptest::collection::vec((0u64..64, any::<i32>()), 0..48),
    ) {
        for kind in [EdgeStoreKind::Array, EdgeStoreKind::HashMap, EdgeStoreKind::ByteArray] {
            let mut source = store::<i32>(kind);
            source.initialize(&mut pairs.iter().cloned().map(Edge::from)).unwrap();
            let bytes = source.serialize().unwrap();
            let mut restored = store::<i32>(kind);
            restored.deserialize(&bytes).unwrap();

            prop_assert_eq!(restored.len(), source.len());
            let mut before: Vec<(u64, i32)> = source.edges().map(Edge::into_parts).collect();
            let mut after: Vec<(u64, i32)> = restored.edges().map(Edge::into_parts).collect();
            if !is_ordered(kind) {
                before.sort_unstable();
                after.sort_unstable();
            }
            prop_assert_eq!(after, before);
        }
    }

    #[test]
    fn roundtrip_law_for_labels(
        pairs in proptest::collection::vec((any::<u64>(), ".{0,12}"), 0..24),
    ) {
        let mut source = store::<String>(EdgeStoreKind::ByteArray);
        source.initialize(&mut pairs.iter().cloned().map(Edge::from)).unwrap();
        let mut restored = store::<String>(EdgeStoreKind::ByteArray);
        restored.deserialize(&source.serialize().unwrap()).unwrap();
        let got: Vec<(u64, String)> = restored.edges().map(Edge::into_parts).collect();
        prop_assert_eq!(got, pairs);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..96)) {
        for kind in [EdgeStoreKind::Array, EdgeStoreKind::HashMap, EdgeStoreKind::ByteArray] {
            let _ = store::<String>(kind).deserialize(&bytes);
        }
        for kind in EdgeStoreKind::ALL {
            let _ = store::<NoValue>(kind).deserialize(&bytes);
        }
    }
}
