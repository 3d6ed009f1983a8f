/*!
 * File classification: code detection and fenced-block language tags
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Extensions treated as code, mapped to the language tag used on fences
static LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("js", "javascript"),
        ("jsx", "jsx"),
        ("ts", "typescript"),
        ("tsx", "tsx"),
        ("py", "python"),
        ("java", "java"),
        ("c", "c"),
        ("cpp", "cpp"),
        ("cs", "csharp"),
        ("php", "php"),
        ("rb", "ruby"),
        ("go", "go"),
        ("rs", "rust"),
        ("swift", "swift"),
        ("kt", "kotlin"),
        ("scala", "scala"),
        ("html", "html"),
        ("css", "css"),
        ("scss", "scss"),
        ("sass", "sass"),
        ("less", "less"),
        ("vue", "vue"),
        ("svelte", "svelte"),
        ("md", "markdown"),
        ("json", "json"),
        ("xml", "xml"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("sql", "sql"),
        ("sh", "bash"),
        ("bash", "bash"),
        ("ps1", "powershell"),
        ("bat", "batch"),
        ("dockerfile", "dockerfile"),
        ("makefile", "makefile"),
    ])
});

/// Lower-cased text after the last `.`, or the whole name when there is none
pub fn extension_of(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}

/// Whether the extension belongs to the recognized code set
pub fn is_code_file(extension: &str) -> bool {
    LANGUAGES.contains_key(extension)
}

/// Language tag for a fenced block; unknown extensions tag as themselves
pub fn language_tag(extension: &str) -> String {
    LANGUAGES
        .get(extension)
        .map(|lang| lang.to_string())
        .unwrap_or_else(|| extension.to_string())
}

/// Classification of one file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub extension: String,
    pub is_code: bool,
    pub language: String,
}

/// Classify a file name in one step
pub fn classify(name: &str) -> Classification {
    let extension = extension_of(name);
    Classification {
        is_code: is_code_file(&extension),
        language: language_tag(&extension),
        extension,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("main.RS"), "rs");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("Dockerfile"), "dockerfile");
        assert_eq!(extension_of(".env"), "env");
    }

    #[test]
    fn test_dockerfile_is_code() {
        let class = classify("Dockerfile");
        assert!(class.is_code);
        assert_eq!(class.language, "dockerfile");
    }

    #[test]
    fn test_language_tag_fallback() {
        assert_eq!(language_tag("ts"), "typescript");
        assert_eq!(language_tag("yml"), "yaml");
        assert_eq!(language_tag("toml"), "toml");
        assert!(!is_code_file("toml"));
        assert!(!is_code_file("txt"));
    }
}
