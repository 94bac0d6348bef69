use tessera_core::{StorageError, StorageType};
use tessera_storage::compliance::run_full_compliance;
use tessera_storage::{
    ArrayStorage, BigArrayStorage, EvictionPolicy, FileStorage, IndexedDataSource, ListStorage,
    PageCache, PagedConfig, SharedSource, VirtualStorage,
};
use tessera_test_utils::fixtures::{counting_array, counting_virtual};
use tessera_test_utils::{seeded_indices, seeded_values, MemoryPageStore};

#[test]
fn every_backend_is_compliant() {
    let values = seeded_values(7, 16);

    run_full_compliance(&mut ArrayStorage::<f64>::new(37).unwrap(), &values);
    run_full_compliance(
        &mut BigArrayStorage::with_chunk_len(37, 8, 0.0).unwrap(),
        &values,
    );
    run_full_compliance(&mut ListStorage::new(vec![0.0f64; 37]), &values);
    run_full_compliance(
        &mut VirtualStorage::new(37, |i, out: &mut f64| *out = i as f64).unwrap(),
        &values,
    );
    run_full_compliance(
        &mut FileStorage::<f64>::new(37, PagedConfig::new(5).with_cache_pages(2)).unwrap(),
        &values,
    );
    run_full_compliance(&mut SharedSource::new(ArrayStorage::<f64>::new(37).unwrap()), &values);
}

#[test]
fn empty_backends_reject_every_index() {
    let empty = ArrayStorage::<i32>::new(0).unwrap();
    assert_eq!(empty.size(), 0);
    assert!(matches!(
        empty.read(0),
        Err(StorageError::IndexOutOfRange { index: 0, size: 0 })
    ));
    let file = FileStorage::<i32>::new(0, PagedConfig::default()).unwrap();
    assert!(file.read(0).is_err());
}

#[test]
fn storage_types_classify_backends() {
    assert_eq!(counting_array(3).storage_type(), StorageType::MemArray);
    assert_eq!(counting_virtual(3).storage_type(), StorageType::MemVirtual);
    assert_eq!(
        BigArrayStorage::<u8>::new(3).unwrap().storage_type(),
        StorageType::MemArray
    );
}

#[test]
fn virtual_storage_materializes_with_overlay() {
    let mut v = counting_virtual(5);
    v.set(2, &-2).unwrap();
    assert_eq!(v.materialize().unwrap().as_slice(), &[0, 1, -2, 3, 4]);
    v.clear_overlay();
    assert_eq!(v.read(2).unwrap(), 2);
}

#[test]
fn file_storage_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("values.bin");
    let config = PagedConfig::new(4);
    {
        let mut file = FileStorage::<i64>::create(&path, 10, config).unwrap();
        for i in 0..10 {
            file.set(i, &(i * i)).unwrap();
        }
    }
    let reopened = FileStorage::<i64>::open(&path, 10, config).unwrap();
    assert_eq!(reopened.to_vec().unwrap(), (0..10).map(|i| i * i).collect::<Vec<_>>());
    assert_eq!(reopened.path(), Some(path.as_path()));
}

#[test]
fn file_storage_rejects_mismatched_length_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bin");
    let config = PagedConfig::new(4);
    drop(FileStorage::<i32>::create(&path, 10, config).unwrap());
    assert!(matches!(
        FileStorage::<i32>::open(&path, 11, config),
        Err(StorageError::InvalidConstruction { .. })
    ));
    assert!(matches!(
        FileStorage::<i32>::open(dir.path().join("missing.bin"), 10, config),
        Err(StorageError::Io(_))
    ));
}

#[test]
fn sequential_scan_loads_each_page_once() {
    let file = FileStorage::<f32>::new(100, PagedConfig::new(10)).unwrap();
    file.to_vec().unwrap();
    assert_eq!(file.page_loads(), 10);
}

#[test]
fn random_access_with_one_frame_reloads_pages() {
    let file = FileStorage::<f32>::new(100, PagedConfig::new(10)).unwrap();
    let indices = seeded_indices(3, 200, 100);
    let mut out = 0.0;
    for &i in &indices {
        file.get(i, &mut out).unwrap();
    }
    let page_changes = 1 + indices
        .windows(2)
        .filter(|w| w[0] / 10 != w[1] / 10)
        .count() as u64;
    assert_eq!(file.page_loads(), page_changes);
}

#[test]
fn duplicate_of_file_storage_is_independent() {
    let mut file = FileStorage::<i32>::new(20, PagedConfig::new(8)).unwrap();
    file.set(3, &33).unwrap();
    let mut copy = file.duplicate().unwrap();
    copy.set(3, &-1).unwrap();
    assert_eq!(file.read(3).unwrap(), 33);
    assert_eq!(copy.read(3).unwrap(), -1);
    assert!(copy.path().is_none());
}

#[test]
fn page_cache_writes_back_dirty_victims() {
    let store = MemoryPageStore::new(0u16);
    let mut cache = PageCache::new(store, 4, 2, EvictionPolicy::Lru).unwrap();
    cache.set(1, &11).unwrap(); // page 0
    cache.set(5, &55).unwrap(); // page 1
    let mut out = 0;
    cache.get(0, &mut out).unwrap(); // touch page 0
    cache.get(9, &mut out).unwrap(); // page 2 evicts page 1
    assert!(!cache.is_resident(1));
    assert_eq!(cache.store().page(1), Some(&[0, 55, 0, 0][..]));
    assert_eq!(cache.store().page(0), None);

    let store = cache.into_store().unwrap();
    assert_eq!(store.page(0), Some(&[0, 11, 0, 0][..]));
    assert_eq!(store.stores, 2);
    assert_eq!(store.loads, 3);
}

#[test]
fn fifo_evicts_oldest_load_even_if_recently_used() {
    let store = MemoryPageStore::new(0u8);
    let mut cache = PageCache::new(store, 2, 2, EvictionPolicy::Fifo).unwrap();
    let mut out = 0;
    cache.get(0, &mut out).unwrap(); // page 0
    cache.get(2, &mut out).unwrap(); // page 1
    cache.get(0, &mut out).unwrap();
    cache.get(4, &mut out).unwrap(); // page 2 evicts page 0
    assert!(!cache.is_resident(0));
    assert!(cache.is_resident(1));
    assert_eq!(cache.evictions(), 1);
}
