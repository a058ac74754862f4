//! Centralized constants for the Switchboard configuration pipeline.
//!
//! This module contains file names, variable names and prefixes used across
//! crates to avoid duplicated string literals.

// =============================================================================
// Dotenv Layering
// =============================================================================

/// Base dotenv file name; per-environment layers append `.{env}` and/or `.local`.
pub const DOTENV_BASE_FILE: &str = ".env";

/// Suffix of the machine-local override layers.
pub const DOTENV_LOCAL_SUFFIX: &str = "local";

/// Setting this variable to `1` or `true` skips every dotenv file.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

/// Environment name used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

// =============================================================================
// Casting
// =============================================================================

/// Marks a value as base64-encoded for `optionally_decode`.
pub const BASE64_PREFIX: &str = "base64:";

/// Replacement text for sensitive values in errors and displays.
pub const REDACTED: &str = "<redacted>";
