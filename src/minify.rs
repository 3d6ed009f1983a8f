/*!
 * Best-effort minification of code-like text
 *
 * The transform is regex based and knows nothing about the language it is
 * applied to. Comment markers inside string literals or URLs (`"http://..."`)
 * are stripped like real comments, and indentation inside multi-line string
 * literals is lost. Both are accepted limitations of this transform.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*[\s\S]*?\*/").unwrap());
// Whitespace before a line comment goes with it
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]*//.*$").unwrap());
static LEADING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s+").unwrap());
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Strip comments, indentation and blank lines
pub fn minify(text: &str) -> String {
    let text = BLOCK_COMMENT.replace_all(text, "");
    let text = LINE_COMMENT.replace_all(&text, "");
    let text = LEADING_WS.replace_all(&text, "");
    let text = BLANK_LINES.replace_all(&text, "\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_comment_blank_and_indent() {
        assert_eq!(minify("foo(); // comment\n\n  bar();"), "foo();\nbar();");
    }

    #[test]
    fn test_block_comment_across_lines() {
        let src = "/* header\n * more\n */\nfn main() {\n    run(); /* inline */\n}\n";
        assert_eq!(minify(src), "fn main() {\nrun(); \n}");
    }

    #[test]
    fn test_url_in_string_is_cut() {
        let src = "let url = \"https://example.com\";";
        assert_eq!(minify(src), "let url = \"https:");
    }

    #[test]
    fn test_deterministic() {
        let src = "  a();\n\n\n\t// gone\n  b();  ";
        assert_eq!(minify(src), minify(src));
        assert_eq!(minify(src), "a();\nb();");
    }
}
