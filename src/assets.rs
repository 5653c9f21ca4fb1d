use std::path::PathBuf;

pub const DEFAULT_SOURCE_EXT: &str = "urm";

pub fn default_suite_dir() -> PathBuf {
    ["urm", "test"].iter().collect()
}

/// Units which take long enough that they only run with the `big_tests` feature.
pub fn default_bench_dir() -> PathBuf {
    ["urm", "bench"].iter().collect()
}
