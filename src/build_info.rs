//! Compile-time build information, printed by `simulator --version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version banner: `bossfight 0.1.0 (abc1234, 2026-01-01)`.
pub fn version_line() -> String {
    format!("bossfight {} ({}, {})", ENGINE_VERSION, BUILD_COMMIT, BUILD_DATE)
}
