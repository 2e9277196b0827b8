#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use dining_api::{LocationRecord, OpenInterval, WeekTime};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Every variable `AppConfig::load` reads.
pub const CONFIG_VARS: &[&str] = &[
    "DINING_CONFIG",
    "HOST",
    "PORT",
    "REFRESH_INTERVAL_SECS",
    "DINING_SOURCE_FILE",
    "DINING_SOURCE_URL",
    "STRICT_TIME_PARAMS",
];

/// Runs `f` with only the given config variables set.
///
/// All of [`CONFIG_VARS`] are cleared first so the ambient environment cannot
/// leak into a test. Previous values are restored afterwards, also on unwind,
/// and access is serialized because env vars are process-global.
pub fn with_config_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::capture();

    for key in CONFIG_VARS {
        std::env::remove_var(key);
    }
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    f()
}

struct EnvRestore {
    saved: HashMap<&'static str, Option<String>>,
}

impl EnvRestore {
    fn capture() -> Self {
        let saved = CONFIG_VARS
            .iter()
            .map(|key| (*key, std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain() {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

/// A location open on `day` between `from` and `to` (hours).
pub fn location_open(name: &str, day: i64, from: i64, to: i64) -> LocationRecord {
    LocationRecord::new(name).with_interval(OpenInterval::new(
        WeekTime::new(day, from, 0),
        WeekTime::new(day, to, 0),
    ))
}

/// `count` locations without opening hours.
pub fn locations(count: usize) -> Vec<LocationRecord> {
    (0..count)
        .map(|i| LocationRecord::new(format!("Location {}", i)))
        .collect()
}
