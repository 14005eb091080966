// src/version/timestamp.rs

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

use crate::properties::{PropertySource, DEV_BUILD};

/// Version code for the current local time, recomputed on every call.
///
/// `1` when `devBuild` is set, so development builds never bump the code.
pub fn version_code_timestamp(props: &PropertySource) -> u64 {
    version_code_at(props, Local::now().naive_local())
}

/// `yyMMddHHmm` of `now` as an integer, or `1` for development builds.
pub fn version_code_at(props: &PropertySource, now: NaiveDateTime) -> u64 {
    if props.has(DEV_BUILD) {
        return 1;
    }

    let yy = u64::from(now.year().rem_euclid(100).unsigned_abs());
    yy * 100_000_000
        + u64::from(now.month()) * 1_000_000
        + u64::from(now.day()) * 10_000
        + u64::from(now.hour()) * 100
        + u64::from(now.minute())
}
