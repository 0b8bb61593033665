#![no_main]

use libfuzzer_sys::fuzz_target;
use todos_core::ListManager;
use todos_core::store::MemoryStore;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let store = MemoryStore::new();
    let mut list = ListManager::open(store.clone());
    list.add("seed task").expect("seed add");
    let before = list.list();

    match list.import_with_report(text) {
        Ok(report) => {
            assert_eq!(report.imported, list.count());
            let stats = list.stats();
            assert_eq!(stats.completed + stats.pending, stats.total);

            let reopened = ListManager::open(store);
            assert_eq!(reopened.list(), list.list());
        }
        Err(err) => {
            assert!(!err.is_validation());
            assert_eq!(list.list(), before);
        }
    }
});
