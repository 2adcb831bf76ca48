/// Punctuation set a registration password must draw at least one character from
pub const PASSWORD_SPECIAL_CHARS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

// =============================================================================
// EMERGENCY ALERT STATUS
// =============================================================================

/// Alert raised and not yet closed by its owner
pub const ALERT_STATUS_ACTIVE: &str = "active";

/// Alert closed by its owner
pub const ALERT_STATUS_RESOLVED: &str = "resolved";
