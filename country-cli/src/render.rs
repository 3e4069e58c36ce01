use country_core::Displayed;
use std::fmt::Write;

/// Text shown when nothing has been looked up yet.
pub const EMPTY: &str = "No country selected";

/// Human-readable view of the display slot.
pub fn render(displayed: Option<&Displayed>) -> String {
    let Some(d) = displayed else {
        return EMPTY.to_string();
    };

    let mut out = String::new();
    let record = &d.record;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", record.name);
    let _ = writeln!(out, "  Capital:   {}", record.capital);
    let _ = writeln!(out, "  Languages: {}", record.languages);
    if !record.flag_url.is_empty() {
        let _ = writeln!(out, "  Flag:      {}", record.flag_url);
    }
    let _ = write!(
        out,
        "  (from {}, {})",
        d.origin,
        d.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    out
}
