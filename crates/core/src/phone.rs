//! Display formatting for provider phone numbers.
//!
//! The provider hands back raw MSISDNs (`"905551234567"`, sometimes with a
//! leading `+`). Turkish numbers are reformatted for display by stripping the
//! country prefix and regrouping the subscriber digits; anything else passes
//! through untouched. The result is a pure function of the raw string, so a
//! session rendered twice from the same provider payload always shows the
//! same number.

/// Format a raw provider MSISDN for display.
///
/// `"905551234567"` and `"+905551234567"` both become `"+90 555 123 4567"`.
/// Numbers without the Turkish prefix are returned unchanged.
pub fn format_msisdn(raw: &str) -> String {
    if !(raw.starts_with("90") || raw.starts_with("+90")) {
        return raw.to_string();
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let subscriber = digits.strip_prefix("90").unwrap_or(&digits);

    if subscriber.len() < 7 {
        // Too short to regroup; show the raw value rather than garbage.
        return raw.to_string();
    }

    format!(
        "+90 {} {} {}",
        &subscriber[..3],
        &subscriber[3..6],
        &subscriber[6..]
    )
}
