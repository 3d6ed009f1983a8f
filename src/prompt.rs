/*!
 * Canned prompt text for prefixing combined output before handing it to an
 * AI assistant
 */

use clap::ValueEnum;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::utils::strip_angle_brackets;

/// Prompt templates that can prefix the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PromptTemplate {
    Debug,
    Refactor,
    Explain,
    Optimize,
    Convert,
    Review,
    Test,
    Document,
    Security,
    Architecture,
}

impl PromptTemplate {
    /// Full template text, ending in a blank line
    pub fn text(self) -> &'static str {
        match self {
            Self::Debug => "🐛 **DEBUG REQUEST**: Please analyze the following code and help me identify and fix any bugs or issues:\n\n",
            Self::Refactor => "♻️ **REFACTOR REQUEST**: Please review this code and suggest improvements for better readability, performance, and maintainability:\n\n",
            Self::Explain => "💡 **EXPLAIN REQUEST**: Please explain how this code works, including the main components, functions, and logic flow:\n\n",
            Self::Optimize => "⚡ **OPTIMIZATION REQUEST**: Please analyze this code and suggest performance optimizations and best practices:\n\n",
            Self::Convert => "🔄 **CONVERSION REQUEST**: Please help me convert or migrate this code (specify target framework/language in your message):\n\n",
            Self::Review => "👀 **CODE REVIEW**: Please provide a comprehensive code review including potential issues, suggestions, and best practices:\n\n",
            Self::Test => "🧪 **TEST REQUEST**: Please help me write unit tests for the following code:\n\n",
            Self::Document => "📚 **DOCUMENTATION REQUEST**: Please help me create comprehensive documentation for this code:\n\n",
            Self::Security => "🔒 **SECURITY AUDIT**: Please analyze this code for potential security vulnerabilities and suggest fixes:\n\n",
            Self::Architecture => "🏗️ **ARCHITECTURE REVIEW**: Please review the overall structure and architecture of this code and suggest improvements:\n\n",
        }
    }

    /// Short label: the template text up to its first colon
    pub fn label(self) -> &'static str {
        let text = self.text();
        text.split(':').next().unwrap_or(text)
    }

    /// Every template with its label, in menu order
    pub fn menu() -> Vec<(Self, &'static str)> {
        Self::iter().map(|t| (t, t.label())).collect()
    }
}

/// Fill-in-the-blanks project context block
pub fn project_context() -> &'static str {
    "
## 📁 PROJECT CONTEXT
**Framework/Technology**: [Specify: React, Vue, Node.js, Python Django, etc.]
**Purpose**: [Brief description of what this project/feature does]
**Current Issue**: [Describe the problem you're facing]
**Goal**: [What you want to achieve]

---

"
}

/// Free-form request line; empty input yields nothing
pub fn custom_prompt(request: &str) -> Option<String> {
    if request.is_empty() {
        return None;
    }
    Some(format!("**CUSTOM REQUEST**: {}\n\n", strip_angle_brackets(request)))
}

/// Prefix text with a prompt
pub fn prepend(prefix: &str, text: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + text.len());
    out.push_str(prefix);
    out.push_str(text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(PromptTemplate::Debug.label(), "🐛 **DEBUG REQUEST**");
        assert_eq!(PromptTemplate::Review.label(), "👀 **CODE REVIEW**");
        assert_eq!(PromptTemplate::menu().len(), 10);
    }

    #[test]
    fn test_templates_end_with_blank_line() {
        for template in PromptTemplate::iter() {
            assert!(template.text().ends_with(":\n\n"), "{}", template);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "security".parse::<PromptTemplate>().unwrap(),
            PromptTemplate::Security
        );
        assert!("nope".parse::<PromptTemplate>().is_err());
    }

    #[test]
    fn test_custom_prompt() {
        assert_eq!(custom_prompt(""), None);
        assert_eq!(
            custom_prompt("fix <b>this</b>").unwrap(),
            "**CUSTOM REQUEST**: fix bthis/b\n\n"
        );
    }

    #[test]
    fn test_project_context() {
        let out = prepend(project_context(), "body");
        assert!(out.starts_with("\n## 📁 PROJECT CONTEXT\n"));
        assert!(out.ends_with("---\n\nbody"));
    }
}
