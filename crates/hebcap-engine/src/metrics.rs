//! Pipeline metrics.
//!
//! Counters are emitted through the `metrics` facade. Nothing is recorded
//! unless the embedding binary installs a recorder.

use metrics::counter;

use hebcap_models::{CorrectionKind, HookType, Platform};

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// QA corrections applied, by rule kind.
    pub const QA_CORRECTIONS_TOTAL: &str = "hebcap_qa_corrections_total";

    /// Platform packages built, by platform.
    pub const PLATFORM_PACKAGES_TOTAL: &str = "hebcap_platform_packages_total";

    /// Inputs rejected before processing.
    pub const VALIDATION_FAILURES_TOTAL: &str = "hebcap_validation_failures_total";

    /// Hooks generated, by hook type.
    pub const HOOKS_GENERATED_TOTAL: &str = "hebcap_hooks_generated_total";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record one applied correction.
pub fn record_correction(kind: CorrectionKind) {
    counter!(
        names::QA_CORRECTIONS_TOTAL,
        "kind" => kind.as_str()
    )
    .increment(1);
}

/// Record a finished platform package.
pub fn record_package(platform: Platform) {
    counter!(
        names::PLATFORM_PACKAGES_TOTAL,
        "platform" => platform.as_str()
    )
    .increment(1);
}

/// Record a generated hook.
pub fn record_hook(hook_type: HookType) {
    counter!(
        names::HOOKS_GENERATED_TOTAL,
        "hook_type" => hook_type.as_str()
    )
    .increment(1);
}

/// Record a rejected input.
pub fn record_validation_failure() {
    counter!(names::VALIDATION_FAILURES_TOTAL).increment(1);
}

// =============================================================================
// Tests
// =============================================================================
