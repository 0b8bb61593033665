use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use todos_core::clock::ManualClock;
use todos_core::store::MemoryStore;
use todos_core::validate::{MAX_TEXT_LEN, normalize_text, validate_text};
use todos_core::{Filter, ListManager, TaskPatch};

use generators::*;

fn fresh() -> (ListManager, ManualClock) {
    let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    let clock = ManualClock::new(start);
    let list = ListManager::open(MemoryStore::new()).with_clock(clock.clone());
    (list, clock)
}

fn pick(list: &ListManager, i: usize) -> Option<String> {
    let tasks = list.list();
    (!tasks.is_empty()).then(|| tasks[i % tasks.len()].id.clone())
}

fn apply(list: &mut ListManager, clock: &ManualClock, op: &Op) {
    match op {
        Op::Add(text) => {
            let _ = list.add(text);
        }
        Op::Toggle(i) => {
            if let Some(id) = pick(list, *i) {
                list.toggle(&id).unwrap();
            }
        }
        Op::Edit(i, text) => {
            if let Some(id) = pick(list, *i) {
                let _ = list.update(&id, TaskPatch::text(text.clone()));
            }
        }
        Op::Remove(i) => {
            if let Some(id) = pick(list, *i) {
                assert!(list.remove(&id).unwrap());
            }
        }
        Op::RemoveCompleted => {
            list.remove_completed().unwrap();
        }
        Op::SetFilter(filter) => list.set_filter(*filter).unwrap(),
        Op::Tick(ms) => clock.advance(Duration::milliseconds(*ms)),
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn add_accepts_exactly_valid_text(raw in arb_raw_text()) {
        let (mut list, _) = fresh();
        let expected = normalize_text(&raw);
        let valid = !expected.is_empty() && expected.chars().count() <= MAX_TEXT_LEN;

        match list.add(&raw) {
            Ok(task) => {
                prop_assert!(valid);
                prop_assert_eq!(&task.text, &expected);
                prop_assert!(!task.completed);
                prop_assert_eq!(task.created_at, task.updated_at);
                prop_assert_eq!(list.count(), 1);
                prop_assert!(list.list().iter().any(|t| t.id == task.id));
            }
            Err(err) => {
                prop_assert!(!valid);
                prop_assert!(err.is_validation());
                prop_assert!(list.is_empty());
            }
        }
    }

    #[test]
    fn invariants_hold_after_any_sequence(ops in arb_ops()) {
        let (mut list, clock) = fresh();
        for op in &ops {
            apply(&mut list, &clock, op);
        }

        let tasks = list.list();
        let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        prop_assert_eq!(ids.len(), tasks.len());
        for task in &tasks {
            prop_assert!(validate_text(&task.text).is_ok());
            prop_assert!(task.updated_at >= task.created_at);
        }

        let stats = list.stats();
        prop_assert_eq!(stats.total, tasks.len());
        prop_assert_eq!(stats.completed + stats.pending, stats.total);
        prop_assert_eq!(stats.completed, tasks.iter().filter(|t| t.completed).count());

        let visible = list.list_filtered();
        match list.filter() {
            Filter::All => prop_assert_eq!(&visible, &tasks),
            Filter::Completed => {
                prop_assert!(visible.iter().all(|t| t.completed));
                prop_assert_eq!(visible.len(), stats.completed);
            }
            Filter::Pending => {
                prop_assert!(visible.iter().all(|t| !t.completed));
                prop_assert_eq!(visible.len(), stats.pending);
            }
        }
    }

    #[test]
    fn double_toggle_restores_flag(texts in prop::collection::vec(arb_valid_text(), 1..10), choice in any::<usize>()) {
        let (mut list, clock) = fresh();
        for text in &texts {
            list.add(text).unwrap();
        }
        let target = list.list()[choice % texts.len()].clone();

        clock.advance(Duration::milliseconds(1));
        let once = list.toggle(&target.id).unwrap().unwrap();
        clock.advance(Duration::milliseconds(1));
        let twice = list.toggle(&target.id).unwrap().unwrap();

        prop_assert_eq!(once.completed, !target.completed);
        prop_assert_eq!(twice.completed, target.completed);
        prop_assert!(once.updated_at >= target.updated_at);
        prop_assert!(twice.updated_at >= once.updated_at);
    }

    #[test]
    fn remove_completed_is_exact_and_idempotent(ops in arb_ops()) {
        let (mut list, clock) = fresh();
        for op in &ops {
            apply(&mut list, &clock, op);
        }
        let before = list.list();
        let expected: Vec<_> = before.iter().filter(|t| !t.completed).cloned().collect();

        let removed = list.remove_completed().unwrap();
        prop_assert_eq!(removed, before.len() - expected.len());
        prop_assert_eq!(list.list(), expected);
        prop_assert_eq!(list.remove_completed().unwrap(), 0);
    }

    #[test]
    fn export_then_import_restores_tasks(ops in arb_ops()) {
        let (mut list, clock) = fresh();
        for op in &ops {
            apply(&mut list, &clock, op);
        }
        let exported = list.export_all().unwrap();

        let (mut restored, _) = fresh();
        let imported = restored.import_all(&exported).unwrap();

        prop_assert_eq!(imported, list.count());
        let key = |l: &ListManager| {
            l.list()
                .into_iter()
                .map(|t| (t.id, t.text, t.completed))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(key(&restored), key(&list));
        prop_assert_eq!(restored.list(), list.list());
    }
}
