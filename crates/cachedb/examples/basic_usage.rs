//! Basic Usage Example
//!
//! Demonstrates:
//! - Storing and reading values by (object type, object, data type, key)
//! - TTL expiry and purging
//! - Memoizing a slow function
//! - Browsing and deleting parts of the hierarchy
//!
//! Run with: cargo run --example basic_usage

use cachedb::prelude::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("cachedb=debug,cachedb_sqlite=debug")
        .init();

    println!("=== CacheDb Basic Usage ===\n");

    let temp_dir = tempfile::tempdir()?;
    let db = CacheDb::open(temp_dir.path())?;
    println!("Opened cache at {}\n", db.path().display());

    // ========================================
    // 1. Plain values
    // ========================================
    println!("1. Storing values...");

    let loc = Locator::new()
        .object_type("project")
        .object_name("alpha")
        .data_type("settings")
        .key("limits");

    let mut limits = BTreeMap::new();
    limits.insert("max_users".to_string(), 50u32);
    limits.insert("max_jobs".to_string(), 4u32);
    db.set_data(&limits, &loc, None)?;

    let back: Option<BTreeMap<String, u32>> = db.get_data(&loc)?;
    println!("✓ Read back: {:?}\n", back);

    // ========================================
    // 2. Expiring values
    // ========================================
    println!("2. Storing a value with a 60s TTL...");

    let session = Locator::new()
        .object_type("project")
        .object_name("alpha")
        .data_type("sessions")
        .key("token");
    db.set_data("abc123", &session, Some(60))?;
    let token: Option<String> = db.get_data(&session)?;
    println!("✓ Token: {:?}", token);
    println!("✓ Purged {} expired entries\n", db.purge_expired()?);

    // ========================================
    // 3. Memoization
    // ========================================
    println!("3. Memoizing a slow function...");

    let calls = AtomicUsize::new(0);
    let fib = db.memoize_with(
        "fib",
        MemoizeOptions::new().object_type("math").ttl_secs(3600),
        |n: &u64| {
            calls.fetch_add(1, Ordering::SeqCst);
            let (mut a, mut b) = (0u64, 1u64);
            for _ in 0..*n {
                let next = a.wrapping_add(b);
                a = b;
                b = next;
            }
            a
        },
    );

    for _ in 0..3 {
        println!("   fib(80) = {}", fib.call(&80)?);
    }
    println!("✓ Function ran {} time(s)\n", calls.load(Ordering::SeqCst));

    // ========================================
    // 4. Browsing the hierarchy
    // ========================================
    println!("4. Browsing...");

    for object_type in db.list_object_types()? {
        println!("   {}", object_type);
        for object in db.list_objects(&object_type)? {
            println!("     {}", object);
        }
    }

    let stats = db.stats()?;
    println!("✓ {} entries across {} object types\n", stats.entries, stats.object_types);

    // ========================================
    // 5. Deleting
    // ========================================
    println!("5. Deleting object type 'project'...");

    db.delete_object_type("project")?;
    let gone: Option<String> = db.get_data(&session)?;
    println!("✓ Token after delete: {:?}", gone);
    println!("✓ Remaining object types: {:?}\n", db.list_object_types()?);

    db.close()?;
    println!("=== Done ===");
    Ok(())
}
