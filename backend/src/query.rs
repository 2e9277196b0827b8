//! Read queries over the current snapshot.
//!
//! Every query takes one snapshot reference at call time and works on it to
//! completion, so a refresh landing mid-query cannot change the record set
//! being filtered.

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::models::{LocationRecord, Snapshot, WeekTime};
use crate::store::SnapshotStore;

/// How time path parameters are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeParamPolicy {
    /// Components must be integers in their calendar range
    #[default]
    Strict,
    /// Each component is read up to its first non-digit; a component with
    /// no leading digits matches nothing. Any integer is used as given.
    Permissive,
}

/// Parse `day/hour/minute` path components.
///
/// Under [`TimeParamPolicy::Strict`] a malformed or out-of-range component is
/// an [`QueryError::InvalidArgument`]. Under [`TimeParamPolicy::Permissive`]
/// each component is read as its leading integer (`"8am"` is 8, `"12.5"` is
/// 12), and a component without one yields `Ok(None)`, meaning the query
/// matches nothing.
pub fn parse_time_params(
    policy: TimeParamPolicy,
    day: &str,
    hour: &str,
    minute: &str,
) -> Result<Option<WeekTime>, QueryError> {
    match policy {
        TimeParamPolicy::Strict => {
            let t = WeekTime::new(
                parse_component("day", day, 0..=6)?,
                parse_component("hour", hour, 0..=23)?,
                parse_component("minute", minute, 0..=59)?,
            );
            Ok(Some(t))
        }
        TimeParamPolicy::Permissive => {
            let parsed = (
                leading_integer(day),
                leading_integer(hour),
                leading_integer(minute),
            );
            Ok(match parsed {
                (Some(day), Some(hour), Some(minute)) => Some(WeekTime::new(day, hour, minute)),
                _ => None,
            })
        }
    }
}

/// Leading integer of `raw`, ignoring whatever follows it.
///
/// Leading whitespace and one sign are skipped, and a `0x` prefix switches to
/// hexadecimal. `None` when no digit follows. Values beyond `i64` saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let rest = raw.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut digits = rest.chars().map_while(|c| c.to_digit(radix)).peekable();
    digits.peek()?;
    let magnitude = digits.fold(0i64, |acc, d| {
        acc.saturating_mul(i64::from(radix))
            .saturating_add(i64::from(d))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_component(
    field: &str,
    raw: &str,
    range: std::ops::RangeInclusive<i64>,
) -> Result<i64, QueryError> {
    let value: i64 = raw.parse().map_err(|_| {
        QueryError::InvalidArgument(format!("{} must be an integer, got {:?}", field, raw))
    })?;
    if !range.contains(&value) {
        return Err(QueryError::InvalidArgument(format!(
            "{} must be between {} and {}, got {}",
            field,
            range.start(),
            range.end(),
            value
        )));
    }
    Ok(value)
}

/// Records whose name contains `query`, ignoring case, in snapshot order.
pub fn filter_by_name(snapshot: &Snapshot, query: &str) -> Vec<LocationRecord> {
    let needle = query.to_lowercase();
    snapshot
        .records()
        .iter()
        .filter(|record| record.name_contains(&needle))
        .cloned()
        .collect()
}

/// Records with any opening window containing `t`, in snapshot order.
pub fn filter_open_at(snapshot: &Snapshot, t: WeekTime) -> Vec<LocationRecord> {
    snapshot
        .records()
        .iter()
        .filter(|record| record.is_open_at(t))
        .cloned()
        .collect()
}

/// Query front-end over a [`SnapshotStore`].
///
/// Before the first snapshot is accepted every query returns an empty list.
#[derive(Clone)]
pub struct QueryEngine {
    store: SnapshotStore,
}

impl QueryEngine {
    pub fn new(store: SnapshotStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn all(&self) -> Vec<LocationRecord> {
        self.store
            .current_snapshot()
            .map(|snapshot| snapshot.records().to_vec())
            .unwrap_or_default()
    }

    pub fn find_by_name(&self, query: &str) -> Vec<LocationRecord> {
        self.store
            .current_snapshot()
            .map(|snapshot| filter_by_name(&snapshot, query))
            .unwrap_or_default()
    }

    pub fn find_open_at(&self, t: WeekTime) -> Vec<LocationRecord> {
        self.store
            .current_snapshot()
            .map(|snapshot| filter_open_at(&snapshot, t))
            .unwrap_or_default()
    }
}
