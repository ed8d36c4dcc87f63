#![allow(clippy::all)]

use std::sync::atomic::Ordering;
use std::sync::{Arc, Once};

use tracing_subscriber::EnvFilter;
use vertex_edges::{
    storage::CounterMetrics,
    types::{EdgeStoreError, Result},
    ByteArrayMutation, EdgeFactory, EdgeStoreConfig, EdgeStoreKind, EdgeStoreOptions, NoValue,
    Vertex,
};

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("vertex_edges=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();
    });
}

#[test]
fn toml_config_selects_store() -> Result<()> {
    init_tracing();
    let config = EdgeStoreConfig::from_toml_str(
        r#"
            kind = "hash_set"
            initial_capacity = 8
        "#,
    )?;
    let mut edges = EdgeStoreOptions::from_config(&config).build::<u64, NoValue>()?;
    assert_eq!(edges.kind(), EdgeStoreKind::HashSet);
    assert!(edges.capabilities().strict_random_access);
    edges.add(EdgeFactory::create_valueless(1))?;
    edges.add(EdgeFactory::create_valueless(1))?;
    assert_eq!(edges.len(), 1);
    Ok(())
}

#[test]
fn kind_names_parse() -> Result<()> {
    assert_eq!("byte_array".parse::<EdgeStoreKind>()?, EdgeStoreKind::ByteArray);
    assert_eq!(EdgeStoreKind::NullArray.to_string(), "null_array");
    let err = "adjacency_list".parse::<EdgeStoreKind>().unwrap_err();
    assert!(matches!(err, EdgeStoreError::Config(_)));
    Ok(())
}

#[test]
fn valued_edges_rejected_for_valueless_kinds() {
    init_tracing();
    for kind in [EdgeStoreKind::HashSet, EdgeStoreKind::NullArray] {
        let err = EdgeStoreOptions::new(kind).build::<u64, f32>().err();
        assert!(matches!(err, Some(EdgeStoreError::Config(_))), "{kind}");
        assert!(!kind.supports(vertex_edges::ValueKind::Present));
    }
}

#[test]
fn read_only_byte_array_from_config() -> Result<()> {
    init_tracing();
    let config = EdgeStoreConfig::from_toml_str("byte_array_mutation = \"disallowed\"")?;
    assert_eq!(config.kind, EdgeStoreKind::ByteArray);
    let options = EdgeStoreOptions::from_config(&config);

    let mut source = EdgeStoreOptions::new(EdgeStoreKind::Array).build::<u64, f64>()?;
    source.add(EdgeFactory::create(2, 0.5))?;
    let bytes = source.serialize()?;

    let mut frozen = options.build::<u64, f64>()?;
    frozen.deserialize(&bytes)?;
    assert_eq!(frozen.edge_value(&2), Some(0.5));
    assert!(matches!(
        frozen.add(EdgeFactory::create(3, 1.0)),
        Err(EdgeStoreError::Unsupported(_))
    ));
    assert!(matches!(frozen.remove(&2), Err(EdgeStoreError::Unsupported(_))));
    assert_eq!(frozen.len(), 1);
    Ok(())
}

#[test]
fn counters_are_shared_across_stores() -> Result<()> {
    init_tracing();
    let counters = Arc::new(CounterMetrics::default());
    let options = EdgeStoreOptions::new(EdgeStoreKind::ByteArray)
        .byte_array_mutation(ByteArrayMutation::Rewrite)
        .metrics(counters.clone());

    let mut a = Vertex::<u64, u32, u32>::new(1, 0, &options)?;
    let mut b = Vertex::<u64, u32, u32>::new(2, 0, &options)?;
    a.add_edge(EdgeFactory::create(2, 10))?;
    a.add_edge(EdgeFactory::create(2, 11))?;
    b.add_edge(EdgeFactory::create(1, 12))?;
    a.remove_edges(&2)?;

    assert_eq!(counters.edges_added.load(Ordering::Relaxed), 3);
    assert_eq!(counters.edges_removed.load(Ordering::Relaxed), 2);

    let mut checkpoint = Vec::new();
    b.write_to(&mut checkpoint)?;
    let restored = Vertex::<u64, u32, u32>::read_from(&options, &checkpoint)?;
    assert_eq!(restored.edge_value(&1), Some(12));
    assert_eq!(counters.bytes_serialized.load(Ordering::Relaxed), 4 + 12);
    assert_eq!(counters.bytes_deserialized.load(Ordering::Relaxed), 4 + 12);
    Ok(())
}
