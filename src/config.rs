/*!
 * Configuration handling for MergeFS
 */

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;

use crate::error::Result;
use crate::filter::FilterKind;
use crate::prompt::PromptTemplate;
use crate::report::ReportFormat;
use crate::types::CombineOptions;
use crate::writer::DEFAULT_OUTPUT_NAME;

/// Initial selection applied after loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SelectMode {
    /// Every loaded file
    All,
    /// Nothing (use --pick to choose files)
    None,
    /// Files with a recognized code extension (default)
    #[default]
    Code,
}

/// Command-line arguments for MergeFS
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "mergefs",
    version = env!("CARGO_PKG_VERSION"),
    about = "Combine selected files of a folder into one Markdown document",
    long_about = "Loads a folder, selects a subset of its files and concatenates them into a single Markdown document, optionally fenced, minified and prefixed with a prompt for an AI assistant."
)]
pub struct Args {
    /// Folder to load
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output Markdown file
    #[clap(default_value = DEFAULT_OUTPUT_NAME)]
    pub output_file: String,

    /// Initial selection
    #[clap(long, value_enum, default_value_t = SelectMode::default())]
    pub select: SelectMode,

    /// Comma-separated globs on the relative path; replaces the selection
    #[clap(long, value_delimiter = ',')]
    pub pick: Vec<String>,

    /// View used for the file listing (never changes the selection)
    #[clap(long, value_enum, default_value_t = FilterKind::default())]
    pub filter: FilterKind,

    /// Write raw content without fenced code blocks
    #[clap(long)]
    pub no_code_blocks: bool,

    /// Strip comments, indentation and blank lines from code files
    #[clap(long)]
    pub minify: bool,

    /// Prefix the output with a prompt template
    #[clap(long, value_enum)]
    pub prompt: Option<PromptTemplate>,

    /// Prefix the output with a project context block to fill in
    #[clap(long)]
    pub project_context: bool,

    /// Prefix the output with a custom request
    #[clap(long)]
    pub custom_prompt: Option<String>,

    /// Comma-separated list of patterns to ignore
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Comma-separated list of patterns to include (if specified, only matching files are loaded)
    #[clap(long, value_delimiter = ',')]
    pub include_patterns: Vec<String>,

    /// Respect .gitignore files
    #[clap(long, default_value_t = true, action = ArgAction::Set)]
    pub respect_gitignore: bool,

    /// Path to an extra gitignore-style file applied to the whole walk
    #[clap(long)]
    pub gitignore_path: Option<String>,

    /// List the files visible under --filter and exit
    #[clap(long)]
    pub list: bool,

    /// Copy output to clipboard
    #[clap(long, help = "Copy output to system clipboard")]
    pub clip: bool,

    /// Also print the output to stdout
    #[clap(long)]
    pub stdout: bool,

    /// Report format
    #[clap(long, value_enum, default_value_t = ReportFormat::default())]
    pub report: ReportFormat,

    /// Hide progress and report
    #[clap(long, short)]
    pub quiet: bool,

    /// Enable debug logging
    #[clap(long, short)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Folder to load
    pub target_dir: PathBuf,

    /// Output Markdown file path
    pub output_file: PathBuf,

    /// Patterns to ignore
    pub ignore_patterns: Vec<String>,

    /// Patterns to include (if empty, include all)
    pub include_patterns: Vec<String>,

    /// Whether to respect .gitignore files
    pub respect_gitignore: bool,

    /// Path to custom .gitignore file
    pub gitignore_path: Option<PathBuf>,

    /// Initial selection
    pub select: SelectMode,

    /// Relative-path globs replacing the selection
    pub pick: Vec<String>,

    /// Listing view
    pub filter: FilterKind,

    /// Combine options
    pub options: CombineOptions,

    /// Prompt template prefix
    pub prompt: Option<PromptTemplate>,

    /// Whether to prefix the project context block
    pub project_context: bool,

    /// Custom request prefix
    pub custom_prompt: Option<String>,

    /// List and exit
    pub list: bool,

    /// Copy output to clipboard
    pub clip: bool,

    /// Print output to stdout
    pub stdout: bool,

    /// Report format
    pub report: ReportFormat,

    /// Hide progress and report
    pub quiet: bool,

    /// Enable debug logging
    pub verbose: bool,
}

impl Config {
    /// Configuration for a folder with every option at its default
    pub fn for_directory(target_dir: impl Into<PathBuf>) -> Self {
        let target_dir = target_dir.into();
        Self {
            output_file: target_dir.join(DEFAULT_OUTPUT_NAME),
            target_dir,
            ignore_patterns: vec![],
            include_patterns: vec![],
            respect_gitignore: true,
            gitignore_path: None,
            select: SelectMode::default(),
            pick: vec![],
            filter: FilterKind::default(),
            options: CombineOptions::default(),
            prompt: None,
            project_context: false,
            custom_prompt: None,
            list: false,
            clip: false,
            stdout: false,
            report: ReportFormat::default(),
            quiet: true,
            verbose: false,
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: PathBuf::from(args.directory_path),
            output_file: PathBuf::from(args.output_file),
            ignore_patterns: args.ignore_patterns,
            include_patterns: args.include_patterns,
            respect_gitignore: args.respect_gitignore,
            gitignore_path: args.gitignore_path.map(PathBuf::from),
            select: args.select,
            pick: args.pick,
            filter: args.filter,
            options: CombineOptions {
                use_code_blocks: !args.no_code_blocks,
                minify: args.minify,
            },
            prompt: args.prompt,
            project_context: args.project_context,
            custom_prompt: args.custom_prompt,
            list: args.list,
            clip: args.clip,
            stdout: args.stdout,
            report: args.report,
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.target_dir.is_dir(),
            Config,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        if let Some(parent) = self.output_file.parent() {
            crate::ensure!(
                parent.as_os_str().is_empty() || parent.is_dir(),
                Config,
                "Output directory not found: {}",
                parent.display()
            );
        }

        if let Some(path) = &self.gitignore_path {
            crate::ensure!(
                path.exists(),
                Config,
                "Custom .gitignore file not found: {}",
                path.display()
            );
        }

        crate::ensure!(
            !self.pick.iter().any(|p| p.trim().is_empty()),
            InvalidArgument,
            "--pick patterns must not be empty"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MergeFsError;

    #[test]
    fn test_from_args_defaults() {
        let args = Args::parse_from(["mergefs"]);
        let config = Config::from_args(args);
        assert_eq!(config.target_dir, PathBuf::from("."));
        assert_eq!(config.output_file, PathBuf::from("combined-files.md"));
        assert_eq!(config.select, SelectMode::Code);
        assert_eq!(config.filter, FilterKind::All);
        assert!(config.options.use_code_blocks);
        assert!(!config.options.minify);
        assert!(config.respect_gitignore);
    }

    #[test]
    fn test_from_args_flags() {
        let args = Args::parse_from([
            "mergefs",
            "src",
            "out.md",
            "--select",
            "none",
            "--pick",
            "*.rs,*.toml",
            "--filter",
            "config",
            "--no-code-blocks",
            "--minify",
            "--prompt",
            "review",
            "--respect-gitignore",
            "false",
        ]);
        let config = Config::from_args(args);
        assert_eq!(config.select, SelectMode::None);
        assert_eq!(config.pick, vec!["*.rs", "*.toml"]);
        assert_eq!(config.filter, FilterKind::Config);
        assert!(!config.options.use_code_blocks);
        assert!(config.options.minify);
        assert_eq!(config.prompt, Some(PromptTemplate::Review));
        assert!(!config.respect_gitignore);
    }

    #[test]
    fn test_validate() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_directory(dir.path());
        assert!(config.validate().is_ok());

        let missing = Config::for_directory(dir.path().join("missing"));
        assert!(matches!(missing.validate(), Err(MergeFsError::Config(_))));

        let mut bad_output = Config::for_directory(dir.path());
        bad_output.output_file = dir.path().join("nope").join("out.md");
        assert!(bad_output.validate().is_err());

        let mut bad_pick = Config::for_directory(dir.path());
        bad_pick.pick = vec![" ".into()];
        assert!(matches!(
            bad_pick.validate(),
            Err(MergeFsError::InvalidArgument(_))
        ));
    }
}
