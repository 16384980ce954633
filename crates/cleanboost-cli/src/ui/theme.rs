//! Formatting helpers.

/// Render a byte count with a binary-unit suffix.
pub fn format_size(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    let mb = kb / 1024.0;
    if mb >= 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else if kb >= 1024.0 {
        format!("{mb:.1} MB")
    } else if kb >= 1.0 {
        format!("{kb:.1} KB")
    } else {
        format!("{bytes} B")
    }
}

/// Render a percentage gauge like `[=====     ]  48.2%`.
pub fn format_gauge(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = (clamped / 10.0).round() as usize;
    let bar: String = "=".repeat(filled) + &" ".repeat(10 - filled);
    format!("[{bar}] {percent:5.1}%")
}
