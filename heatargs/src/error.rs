/// A malformed argument declaration. These are programming mistakes in the
/// declaring tool and are raised before any token is looked at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    #[error("argument long name must not be empty")]
    EmptyLongName,

    #[error("duplicate argument name '{0}'")]
    DuplicateLongName(String),

    #[error("short name '{short}' is claimed by both '{first}' and '{second}'")]
    DuplicateShortName {
        short: String,
        first: String,
        second: String,
    },

    #[error("positional argument '{0}' cannot declare a short name")]
    PositionalShortName(String),

    #[error("only one positional argument is allowed, found '{first}' and '{second}'")]
    DuplicatePositional { first: String, second: String },

    #[error("argument '{0}' has an unsupported value kind")]
    UnsupportedKind(String),

    #[error("argument '{0}' is unique but is not a collection")]
    UniqueRequiresCollection(String),

    #[error("collection argument '{0}' must allow multiple occurrences")]
    CollectionRequiresMultiple(String),

    #[error("required argument '{0}' cannot have a default value")]
    RequiredWithDefault(String),

    #[error("default value for '{0}' does not match its declared type")]
    DefaultTypeMismatch(String),
}

/// A problem found while parsing. The rendered message is what reaches the
/// reporter; parsing carries on after every one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("Unrecognized command line argument '{0}'")]
    Unrecognized(String),

    #[error("Duplicate '{0}' argument")]
    DuplicateArgument(String),

    #[error("Duplicate '{name}' argument '{value}'")]
    DuplicateValue { name: String, value: String },

    #[error("'{value}' is not a valid value for the '{name}' command line option")]
    InvalidValue { name: String, value: String },

    #[error("Missing required argument '/{0}'.")]
    MissingRequired(String),

    #[error("Missing required argument '<{0}>'.")]
    MissingPositional(String),

    #[error("Error: Can't open command line argument file '{path}' : '{reason}'")]
    ResponseFileUnreadable { path: String, reason: String },

    #[error("Error: Unbalanced '\"' in command line argument file '{0}'")]
    UnbalancedQuote(String),

    #[error("Error: Command line argument file '{0}' nested too deeply")]
    ResponseFileTooDeep(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unbalanced quote in response file")]
    UnbalancedQuote,
}
