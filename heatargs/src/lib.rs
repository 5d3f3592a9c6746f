//! Declarative command-line argument parsing.
//!
//! A destination record lists its options once, as a table of [`Arg`]
//! builders:
//! - `/name:value` and `-name:value` options, booleans as `/flag`, `/flag+`, `/flag-`
//! - implicit first-letter short names, explicit ones via `.short(...)`
//! - collections with optional per-value uniqueness
//! - `@file` response files, expanded in place
//! - column-aligned usage text for any terminal width

mod argument;
mod error;
mod parser;
pub mod response;
mod usage;
mod value;

pub use argument::{Arg, Argument, Arguments, Cardinality};
pub use error::{Diagnostic, LexError, SpecError};
pub use parser::{NullReporter, Parser, Reporter, StderrReporter, MAX_RESPONSE_DEPTH};
pub use usage::{usage_width, DEFAULT_WIDTH, MIN_WIDTH};
pub use value::{OptionEnum, OptionValue, Value, ValueKind};

#[derive(Debug, Default)]
struct HelpRequest {
    help: bool,
}

impl Arguments for HelpRequest {
    fn arguments() -> Vec<Arg<Self>> {
        vec![Arg::new("help", |h: &mut HelpRequest, v: bool| h.help = v).short("?")]
    }
}

/// Parse `tokens` into `dest`, writing diagnostics to stderr.
pub fn parse_arguments<D, S>(tokens: &[S], dest: &mut D) -> Result<bool, SpecError>
where
    D: Arguments,
    S: AsRef<str>,
{
    let parser = Parser::<D>::from_arguments()?;
    Ok(parser.parse(tokens, dest, &mut StderrReporter))
}

/// Whether `tokens` ask for help (`/?`, `-?`, `/help`). Reports nothing.
pub fn parse_help<S: AsRef<str>>(tokens: &[S]) -> bool {
    let Ok(parser) = Parser::<HelpRequest>::from_arguments() else {
        return false;
    };
    let mut request = HelpRequest::default();
    parser.parse(tokens, &mut request, &mut NullReporter);
    request.help
}

/// Usage text for `D`, laid out for `width` columns.
pub fn arguments_usage<D: Arguments>(width: usize) -> Result<String, SpecError> {
    Ok(Parser::<D>::from_arguments()?.usage(width))
}

/// Parse `tokens` into `dest`; on a help request or any diagnostic, print
/// the usage text to stdout and return `Ok(false)`.
pub fn parse_with_usage<D, S>(tokens: &[S], dest: &mut D, width: usize) -> Result<bool, SpecError>
where
    D: Arguments,
    S: AsRef<str>,
{
    let parser = Parser::<D>::from_arguments()?;
    if parse_help(tokens) || !parser.parse(tokens, dest, &mut StderrReporter) {
        print!("{}", parser.usage(width));
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Build {
        target: String,
        jobs: u32,
        release: bool,
    }

    impl Arguments for Build {
        fn arguments() -> Vec<Arg<Self>> {
            vec![
                Arg::new("target", |b: &mut Build, v: String| b.target = v).required(),
                Arg::new("jobs", |b: &mut Build, v: u32| b.jobs = v)
                    .default_value(4u32)
                    .help("Parallel jobs."),
                Arg::new("release", |b: &mut Build, v: bool| b.release = v),
            ]
        }
    }

    #[derive(Default)]
    struct Broken {
        n: i32,
    }

    impl Arguments for Broken {
        fn arguments() -> Vec<Arg<Self>> {
            vec![Arg::new("n1", |b: &mut Broken, v: i32| b.n = v)
                .required()
                .default_value(1)]
        }
    }

    // ── Group 1: help requests ──────────────────────────────────

    #[test]
    fn recognizes_help_spellings() {
        assert!(parse_help(&["/?"]));
        assert!(parse_help(&["-?"]));
        assert!(parse_help(&["/help"]));
        assert!(parse_help(&["/target:x", "-help"]));
    }

    #[test]
    fn other_tokens_are_not_help() {
        assert!(!parse_help(&["/target:x", "stray", "/h"]));
        assert!(!parse_help(&[] as &[&str]));
        assert!(!parse_help(&["/help-"]));
    }

    // ── Group 2: entry points ───────────────────────────────────

    #[test]
    fn parse_with_usage_succeeds_on_valid_input() {
        let mut build = Build::default();
        let ok = parse_with_usage(&["/target:lib", "/r+"], &mut build, 80).unwrap();
        assert!(ok);
        assert_eq!(build.target, "lib");
        assert_eq!(build.jobs, 4);
        assert!(build.release);
    }

    #[test]
    fn parse_with_usage_fails_on_help_or_error() {
        let mut build = Build::default();
        assert!(!parse_with_usage(&["/target:lib", "/?"], &mut build, 80).unwrap());
        let mut build = Build::default();
        assert!(!parse_with_usage(&[] as &[&str], &mut build, 80).unwrap());
    }

    #[test]
    fn declaration_errors_propagate() {
        let mut broken = Broken::default();
        assert_eq!(
            parse_arguments(&["/n1:2"], &mut broken).err(),
            Some(SpecError::RequiredWithDefault("n1".into()))
        );
        assert!(arguments_usage::<Broken>(80).is_err());
    }

    #[test]
    fn arguments_usage_renders_table() {
        let text = arguments_usage::<Build>(80).unwrap();
        let first: Vec<&str> = text.lines().take(1).collect();
        assert_eq!(first, vec!["/target:<string>  (short form /t)"]);
        assert!(text.contains("Parallel jobs. Default value:'4' (short form /j)"));
        assert!(text.contains("@<file>"));
    }
}
