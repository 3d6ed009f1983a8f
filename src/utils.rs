/*!
 * Utility functions for MergeFS
 */

use once_cell::sync::Lazy;

/// Marker opening or closing a fenced block
pub const FENCE: &str = "```";

/// Format a human-readable file size
///
/// Scales by 1024 through Bytes, KB, MB and GB, rounding to two decimals
/// and dropping trailing zeros (`1536` renders as `1.5 KB`).
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && exponent < UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[exponent])
}

/// Rough token count for LLM context budgeting
///
/// Length is counted in UTF-16 code units, so characters outside the basic
/// plane count twice. Text containing a fence is assumed to be code and
/// weighted more heavily.
pub fn estimate_tokens(text: &str) -> usize {
    let multiplier = if text.contains(FENCE) { 1.3 } else { 1.1 };
    let units = text.encode_utf16().count() as f64;
    (units / 4.0 * multiplier).ceil() as usize
}

/// Strip angle brackets so text is safe to embed in rendered output
pub fn strip_angle_brackets(text: &str) -> String {
    text.chars().filter(|c| *c != '<' && *c != '>').collect()
}

/// Default names skipped while walking a folder
pub static DEFAULT_IGNORE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        ".svn",
        ".hg",
        ".bzr",
        // OS Files
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        // Dependencies
        "node_modules",
        "bower_components",
        ".npm",
        ".yarn",
        ".pnpm-store",
        // Python
        "__pycache__",
        ".pytest_cache",
        ".venv",
        // Rust
        "target",
        // IDEs & Editors
        ".idea",
        ".vscode",
        ".vs",
        // Caches
        ".cache",
        ".sass-cache",
        ".eslintcache",
        // JavaScript/TypeScript
        ".next",
        ".nuxt",
        ".nyc_output",
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        // 20 chars of prose: 5 * 1.1
        assert_eq!(estimate_tokens(&"a".repeat(20)), 6);
        assert_eq!(estimate_tokens(&"🐛".repeat(4)), 3);
        // 20 chars including a fence: 5 * 1.3
        let fenced = format!("{}{}", FENCE, "b".repeat(17));
        assert_eq!(estimate_tokens(&fenced), 7);
    }

    #[test]
    fn test_strip_angle_brackets() {
        assert_eq!(strip_angle_brackets("src/<script>.js"), "src/script.js");
        assert_eq!(strip_angle_brackets("plain/path.rs"), "plain/path.rs");
    }
}
