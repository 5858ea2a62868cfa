/// Display-only amount formatting. The minor-vs-major-unit guess is a
/// heuristic: a raw value carrying a decimal separator is taken as major units
/// verbatim, an integer-looking value as minor units. It exists purely so the
/// confirmation copy can show a figure before the gateway result arrives; the
/// commit decision never reads it. An explicit unit tag from the gateway would
/// make the guess unnecessary.
pub fn display_amount(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains('.') {
        return trimmed.parse::<f64>().ok().map(format_major);
    }

    trimmed.parse::<i64>().ok().map(|minor| format_major(minor as f64 / 100.0))
}

pub fn format_major(value: f64) -> String {
    format!("{:.2}", value)
}
