//! Centralized constants for the client balance report
//!
//! Deployment-specific values can be overridden in config.toml.

// =============================================================================
// Data Source
// =============================================================================

/// Client list endpoint
pub const DEFAULT_SOURCE_URL: &str = "https://rivhit.onrender.com/api/clients";

/// Request timeout for the client list fetch (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Agent Directory
// Built-in agent code -> display name table, used when config.toml has no
// [[agents]] entries. Several codes belong to the same shop.
// =============================================================================

pub const DEFAULT_AGENTS: &[(&str, &str)] = &[
    ("87", "יוגב - חנות"),
    ("257", "גל"),
    ("258", "יוגב - חנות"),
    ("259", "יוגב - חנות"),
    ("294", "יוגב - חנות"),
    ("555", "נדב"),
    ("697", "עידו"),
    ("718", "נדב"),
];

// =============================================================================
// Report
// =============================================================================

/// Title of the printed report
pub const DEFAULT_REPORT_TITLE: &str = "הדפסת לקוחות";

/// Printed report filename (written to the output directory)
pub const REPORT_FILENAME: &str = "selected_clients.html";

/// Default CSV export filename
pub const EXPORT_FILENAME: &str = "selected_clients.csv";

// =============================================================================
// Files
// =============================================================================

/// Default config file path
pub const CONFIG_FILE: &str = "config.toml";
