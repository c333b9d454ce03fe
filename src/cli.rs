use clap::Parser;
use logsplice::engine::{DEFAULT_DELIMITER, DEFAULT_MAX_ITERATIONS};
use logsplice::{Config, ErrorPolicy, ResolutionContext};
use std::path::PathBuf;

/// Parsed command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "logsplice",
    version,
    about = "Replace £expression£ spans in a document with values extracted from log files",
    after_help = "Span syntax: £name£, £name()£, £name(\"file.log\")£, £name(-1)£\n\
                  Run with --list-functions to see the available extraction functions."
)]
pub(crate) struct Cli {
    /// Input document ('-' reads standard input)
    #[arg(required_unless_present = "list_functions")]
    pub(crate) input: Option<String>,

    /// Write the expanded document here instead of standard output
    #[arg(short, long, value_name = "PATH")]
    pub(crate) output: Option<PathBuf>,

    /// Colon-separated directories searched, in order, for named log files
    #[arg(short, long, value_name = "DIRS", env = "LOGSPLICE_DIRS", default_value = ".")]
    pub(crate) dirs: String,

    /// Replace failing spans with ERROR instead of aborting
    #[arg(short, long)]
    pub(crate) permissive: bool,

    /// Reserved delimiter character
    #[arg(long, value_name = "CHAR", env = "LOGSPLICE_DELIMITER", default_value_t = DEFAULT_DELIMITER)]
    pub(crate) delimiter: char,

    /// Stop after this many substitutions
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub(crate) max_iterations: usize,

    /// Print the extraction functions and exit
    #[arg(long)]
    pub(crate) list_functions: bool,

    /// Log every substitution
    #[arg(short, long, conflicts_with = "quiet")]
    pub(crate) verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub(crate) quiet: bool,
}

impl Cli {
    pub(crate) fn config(&self) -> Config {
        Config {
            delimiter: self.delimiter,
            policy: if self.permissive {
                ErrorPolicy::Permissive
            } else {
                ErrorPolicy::Strict
            },
            max_iterations: self.max_iterations,
        }
    }

    pub(crate) fn resolution_context(&self) -> ResolutionContext {
        ResolutionContext::from_dir_list(&self.dirs)
    }

    /// Default tracing filter; RUST_LOG takes precedence
    pub(crate) fn log_filter(&self) -> &'static str {
        if self.verbose {
            "logsplice=debug"
        } else if self.quiet {
            "logsplice=error"
        } else {
            "logsplice=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("logsplice").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&["report.tex"]);
        assert_eq!(cli.input.as_deref(), Some("report.tex"));
        assert_eq!(cli.config(), Config::default());
        assert_eq!(cli.output, None);
        assert_eq!(cli.log_filter(), "logsplice=info");
    }

    #[test]
    fn permissive_and_dirs() {
        let cli = parse(&["-p", "-d", "logs:old", "-o", "out.tex", "report.tex"]);
        assert_eq!(cli.config().policy, ErrorPolicy::Permissive);
        assert_eq!(cli.resolution_context().dirs(), &[PathBuf::from("logs"), PathBuf::from("old")]);
        assert_eq!(cli.output, Some(PathBuf::from("out.tex")));
    }

    #[test]
    fn custom_delimiter() {
        let cli = parse(&["--delimiter", "@", "--max-iterations", "5", "-"]);
        assert_eq!(cli.config().delimiter, '@');
        assert_eq!(cli.config().max_iterations, 5);
    }

    #[test]
    fn input_required() {
        assert!(Cli::try_parse_from(["logsplice"]).is_err());
        assert!(Cli::try_parse_from(["logsplice", "--list-functions"]).is_ok());
    }

    #[test]
    fn extra_positional_rejected() {
        assert!(Cli::try_parse_from(["logsplice", "a.tex", "b.tex"]).is_err());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["logsplice", "-v", "-q", "a.tex"]).is_err());
    }
}
