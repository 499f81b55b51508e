//! Tests for memoized functions

use cachedb::prelude::*;
use cachedb::{ManualClock, DEFAULT_OBJECT};
use serde::{ser, Deserialize, Serialize, Serializer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn open(temp_dir: &TempDir) -> (CacheDb, ManualClock) {
    let clock = ManualClock::new(0);
    let cfg = CacheConfig::new(temp_dir.path().join("memo.sqlite"))
        .with_default_object_type("proj")
        .with_default_data_type("misc");
    let db = CacheDb::open_with_clock(cfg, Arc::new(clock.clone())).unwrap();
    (db, clock)
}

#[test]
fn test_same_args_hit_cache() {
    let temp_dir = TempDir::new().unwrap();
    let (db, _clock) = open(&temp_dir);
    let calls = AtomicUsize::new(0);

    let f = db.memoize_with(
        "f",
        MemoizeOptions::new().object_type("C").object_name("bucket"),
        |args: &CallArgs| {
            calls.fetch_add(1, Ordering::SeqCst);
            let x: i64 = args.get(0).unwrap().unwrap();
            let y: i64 = args.get_kw("y").unwrap().unwrap_or(1);
            x + y
        },
    );

    let args = CallArgs::new().arg(&5i64).unwrap().kwarg("y", &7i64).unwrap();
    assert_eq!(f.call(&args).unwrap(), 12);
    assert_eq!(f.call(&args).unwrap(), 12);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Different keyword value is a different slot
    let other = CallArgs::new().arg(&5i64).unwrap().kwarg("y", &8i64).unwrap();
    assert_eq!(f.call(&other).unwrap(), 13);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_tuple_args() {
    let temp_dir = TempDir::new().unwrap();
    let (db, _clock) = open(&temp_dir);
    let calls = AtomicUsize::new(0);

    let add = db.memoize("add", |(x, y): &(i64, i64)| {
        calls.fetch_add(1, Ordering::SeqCst);
        x + y
    });

    assert_eq!(add.call(&(5, 7)).unwrap(), 12);
    assert_eq!(add.call(&(5, 7)).unwrap(), 12);
    assert_eq!(add.call(&(7, 5)).unwrap(), 12);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // Stored under the store defaults, with the function name as data type
    assert_eq!(db.list_data_types("proj").unwrap(), vec!["add"]);
    assert_eq!(db.list_objects("proj").unwrap(), vec!["default_object"]);
}

#[test]
fn test_respects_ttl() {
    let temp_dir = TempDir::new().unwrap();
    let (db, clock) = open(&temp_dir);
    let calls = AtomicUsize::new(0);

    let g = db.memoize_with(
        "g",
        MemoizeOptions::new()
            .object_type("C")
            .object_name("b")
            .ttl_secs(10),
        |x: &i32| {
            calls.fetch_add(1, Ordering::SeqCst);
            x * 2
        },
    );

    clock.set(100);
    assert_eq!(g.call(&3).unwrap(), 6);
    assert_eq!(g.call(&3).unwrap(), 6);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    clock.set(110);
    assert_eq!(g.call(&3).unwrap(), 6);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // After the TTL, recompute
    clock.set(111);
    assert_eq!(g.call(&3).unwrap(), 6);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_custom_key_fn_buckets() {
    let temp_dir = TempDir::new().unwrap();
    let (db, _clock) = open(&temp_dir);
    let calls = AtomicUsize::new(0);

    let h = db
        .memoize_with(
            "h",
            MemoizeOptions::new().object_type("C").object_name("b"),
            |x: &u32| {
                calls.fetch_add(1, Ordering::SeqCst);
                *x
            },
        )
        .with_key_fn(|x| format!("id:{}", x % 2));

    assert_eq!(h.call(&1).unwrap(), 1);
    assert_eq!(h.call(&2).unwrap(), 2);
    // Same buckets as above, so the first results come back
    assert_eq!(h.call(&3).unwrap(), 1);
    assert_eq!(h.call(&4).unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    assert_eq!(db.list_keys("C", "b", "h").unwrap(), vec!["id:0", "id:1"]);
}

#[test]
fn test_explicit_data_type_overrides_name() {
    let temp_dir = TempDir::new().unwrap();
    let (db, _clock) = open(&temp_dir);

    let f = db.memoize_with(
        "compute_prices",
        MemoizeOptions::new().object_type("model").data_type("prices"),
        |x: &u8| *x as u64 * 100,
    );
    assert_eq!(f.call(&3).unwrap(), 300);
    assert_eq!(db.list_data_types("model").unwrap(), vec!["prices"]);
}

#[test]
fn test_results_shared_across_wrappers_with_same_namespace() {
    let temp_dir = TempDir::new().unwrap();
    let (db, _clock) = open(&temp_dir);

    let first = db.memoize("slow", |x: &String| x.to_uppercase());
    assert_eq!(first.call(&"abc".to_string()).unwrap(), "ABC");

    // A second wrapper for the same name reads the stored result
    let second = db.memoize("slow", |_: &String| -> String { panic!("should not run") });
    assert_eq!(second.call(&"abc".to_string()).unwrap(), "ABC");
}

#[test]
fn test_store_failure_surfaces_from_call() {
    let temp_dir = TempDir::new().unwrap();
    let (db, _clock) = open(&temp_dir);
    let calls = AtomicUsize::new(0);

    let f = db.memoize("f", |x: &i32| {
        calls.fetch_add(1, Ordering::SeqCst);
        *x
    });
    db.close().unwrap();

    let err = f.call(&1).unwrap_err();
    assert!(err.is_storage_unavailable());
    // The lookup failed first; the computation never ran
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_optional_results_are_cached() {
    let temp_dir = TempDir::new().unwrap();
    let (db, _clock) = open(&temp_dir);
    let calls = AtomicUsize::new(0);

    let find = db.memoize("find", |x: &i32| {
        calls.fetch_add(1, Ordering::SeqCst);
        if *x > 0 {
            Some(*x)
        } else {
            None
        }
    });

    assert_eq!(find.call(&-1).unwrap(), None);
    assert_eq!(find.call(&-1).unwrap(), None);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// A result that refuses to be encoded
#[derive(Debug, Deserialize)]
struct Unencodable;

impl Serialize for Unencodable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Err(ser::Error::custom("value cannot be encoded"))
    }
}

#[test]
fn test_unencodable_result_is_serialization_error() {
    let temp_dir = TempDir::new().unwrap();
    let (db, _clock) = open(&temp_dir);
    let calls = AtomicUsize::new(0);

    let f = db.memoize("f", |_: &u32| {
        calls.fetch_add(1, Ordering::SeqCst);
        Unencodable
    });

    let err = f.call(&1).unwrap_err();
    assert!(matches!(err, CacheError::Serialization(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Nothing was written, not even the hierarchy
    let stats = db.stats().unwrap();
    assert_eq!(stats.entries, 0);
    assert_eq!(stats.object_types, 0);

    // Every call retries the computation
    assert!(f.call(&1).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

/// An argument type with no serde support
struct Connection {
    host: String,
    port: u16,
}

#[test]
fn test_key_fn_allows_unserializable_arguments() {
    let temp_dir = TempDir::new().unwrap();
    let (db, _clock) = open(&temp_dir);
    let calls = AtomicUsize::new(0);

    let describe = db.memoize_keyed(
        "describe",
        MemoizeOptions::new().object_type("net"),
        |c: &Connection| format!("{}:{}", c.host, c.port),
        |c: &Connection| {
            calls.fetch_add(1, Ordering::SeqCst);
            format!("connection to {} on port {}", c.host, c.port)
        },
    );

    let conn = Connection {
        host: "db.internal".to_string(),
        port: 5432,
    };
    let expected = "connection to db.internal on port 5432";
    assert_eq!(describe.call(&conn).unwrap(), expected);
    assert_eq!(describe.call(&conn).unwrap(), expected);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(describe.key_for(&conn).unwrap(), "db.internal:5432");
    assert_eq!(
        db.list_keys("net", DEFAULT_OBJECT, "describe").unwrap(),
        vec!["db.internal:5432"]
    );
    assert!(describe.invalidate(&conn).unwrap());
}
