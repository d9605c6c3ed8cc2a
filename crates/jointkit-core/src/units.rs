//! Number formatting for drawings and reports
//!
//! All geometry is kept in millimetres.

/// Format a millimetre value for vector output.
///
/// At most three decimals, trailing zeros and a trailing dot removed, and
/// negative zero printed as `0` so output stays byte-stable.
pub fn format_mm(value: f64) -> String {
    let mut s = format!("{:.3}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
