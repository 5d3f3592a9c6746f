use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{Diagnostic, SpecError};
use crate::response;
use crate::argument::{Arg, Argument, Arguments};
use crate::usage;
use crate::value::Value;

/// Deepest chain of `@file` indirections followed before giving up.
pub const MAX_RESPONSE_DEPTH: usize = 32;

const RESPONSE_FILE_SYNTAX: &str = "@<file>";
const RESPONSE_FILE_HELP: &str = "Read response file for more options";

/// Receives one rendered message per parse problem.
pub trait Reporter {
    fn report(&mut self, message: &str);
}

/// Writes each message as a line on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn report(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _message: &str) {}
}

impl<F: FnMut(&str)> Reporter for F {
    fn report(&mut self, message: &str) {
        self(message)
    }
}

/// A validated argument table for destination type `D`.
///
/// Immutable once built; every [`Parser::parse`] call keeps its own state,
/// so one parser may be reused.
pub struct Parser<D> {
    /// Named arguments in declaration order.
    arguments: Vec<Argument<D>>,
    positional: Option<Argument<D>>,
    /// Long and resolved short names to an index into `arguments`.
    by_name: HashMap<String, usize>,
}

impl<D: Arguments> Parser<D> {
    pub fn from_arguments() -> Result<Self, SpecError> {
        Self::new(D::arguments())
    }
}

impl<D> Parser<D> {
    pub fn new(args: Vec<Arg<D>>) -> Result<Self, SpecError> {
        let mut arguments = Vec::new();
        let mut positional: Option<Argument<D>> = None;

        for arg in args {
            let arg = arg.build()?;
            if !arg.is_positional() {
                arguments.push(arg);
                continue;
            }
            if let Some(first) = &positional {
                return Err(SpecError::DuplicatePositional {
                    first: first.long_name().to_string(),
                    second: arg.long_name().to_string(),
                });
            }
            positional = Some(arg);
        }

        // Long names first, so no short name can shadow one.
        let mut by_name = HashMap::new();
        for (i, arg) in arguments.iter().enumerate() {
            if by_name.insert(arg.long_name().to_string(), i).is_some() {
                return Err(SpecError::DuplicateLongName(arg.long_name().to_string()));
            }
        }
        if let Some(p) = &positional {
            if by_name.contains_key(p.long_name()) {
                return Err(SpecError::DuplicateLongName(p.long_name().to_string()));
            }
        }

        // Explicit short names must not collide with anything.
        for (i, arg) in arguments.iter().enumerate() {
            if !arg.has_explicit_short() {
                continue;
            }
            let Some(short) = arg.short_name() else {
                continue;
            };
            match by_name.get(short) {
                Some(&owner) if owner == i => {}
                Some(&owner) => {
                    return Err(SpecError::DuplicateShortName {
                        short: short.to_string(),
                        first: arguments[owner].long_name().to_string(),
                        second: arg.long_name().to_string(),
                    });
                }
                None => {
                    by_name.insert(short.to_string(), i);
                }
            }
        }

        // Implicit short names only fill gaps.
        for (i, arg) in arguments.iter_mut().enumerate() {
            if arg.has_explicit_short() {
                continue;
            }
            let Some(short) = arg.short_name().map(str::to_string) else {
                continue;
            };
            if by_name.contains_key(&short) {
                trace!(argument = arg.long_name(), short = %short, "implicit short name taken");
                arg.clear_short_name();
            } else {
                by_name.insert(short, i);
            }
        }

        debug!(
            arguments = arguments.len(),
            positional = ?positional.as_ref().map(|p| p.long_name()),
            names = by_name.len(),
            "argument table built"
        );

        Ok(Parser {
            arguments,
            positional,
            by_name,
        })
    }

    /// Named arguments in declaration order.
    pub fn arguments(&self) -> &[Argument<D>] {
        &self.arguments
    }

    pub fn positional(&self) -> Option<&Argument<D>> {
        self.positional.as_ref()
    }

    /// Find a named argument by long or short name.
    pub fn lookup(&self, name: &str) -> Option<&Argument<D>> {
        self.by_name.get(name).map(|&i| &self.arguments[i])
    }

    /// Parse `tokens` into `dest`, reporting every problem found.
    ///
    /// Returns `true` only if nothing was reported.
    pub fn parse<S: AsRef<str>>(
        &self,
        tokens: &[S],
        dest: &mut D,
        reporter: &mut dyn Reporter,
    ) -> bool {
        let mut session = Session::new(self, dest, reporter);
        session.parse_list(tokens);
        session.finish();
        !session.had_error
    }

    /// Like [`Parser::parse`], returning the messages instead of reporting.
    pub fn parse_collect<S: AsRef<str>>(&self, tokens: &[S], dest: &mut D) -> (bool, Vec<String>) {
        let mut messages = Vec::new();
        let ok = self.parse(tokens, dest, &mut |m: &str| messages.push(m.to_string()));
        (ok, messages)
    }

    /// Usage text for every argument, laid out for `width` columns.
    pub fn usage(&self, width: usize) -> String {
        let mut entries: Vec<(String, String)> = self
            .arguments()
            .iter()
            .map(|a| (a.syntax_help(), a.full_help()))
            .collect();
        entries.push((
            RESPONSE_FILE_SYNTAX.to_string(),
            RESPONSE_FILE_HELP.to_string(),
        ));
        if let Some(p) = &self.positional {
            entries.push((p.syntax_help(), p.full_help()));
        }
        usage::format_entries(&entries, width)
    }

    /// Slot `arguments.len()` is the positional.
    fn slot(&self, index: usize) -> Option<&Argument<D>> {
        if index < self.arguments.len() {
            self.arguments.get(index)
        } else {
            self.positional.as_ref()
        }
    }
}

/// Split an option token body (marker already removed) into name and value.
///
/// The name ends at the first `:`, `+` or `-`. After `:` the value is the
/// rest of the token; after `+` or `-` it is that one character.
fn split_option(body: &str) -> (&str, Option<&str>) {
    match body.find(&[':', '+', '-'][..]) {
        None => (body, None),
        Some(pos) => {
            let (name, rest) = body.split_at(pos);
            match rest.strip_prefix(':') {
                Some(value) => (name, Some(value)),
                None => (name, Some(&rest[..1])),
            }
        }
    }
}

#[derive(Default)]
struct Slot {
    seen: bool,
    values: Vec<Value>,
}

struct Session<'a, D> {
    parser: &'a Parser<D>,
    dest: &'a mut D,
    reporter: &'a mut dyn Reporter,
    slots: Vec<Slot>,
    had_error: bool,
    depth: usize,
}

impl<'a, D> Session<'a, D> {
    fn new(parser: &'a Parser<D>, dest: &'a mut D, reporter: &'a mut dyn Reporter) -> Self {
        let count = parser.arguments.len() + 1;
        Session {
            parser,
            dest,
            reporter,
            slots: (0..count).map(|_| Slot::default()).collect(),
            had_error: false,
            depth: 0,
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.reporter.report(&diagnostic.to_string());
        self.had_error = true;
    }

    fn parse_list<S: AsRef<str>>(&mut self, tokens: &[S]) {
        for token in tokens {
            let token = token.as_ref();
            match token.chars().next() {
                None => {}
                Some('-') | Some('/') => self.option(token),
                Some('@') => self.expand(&token[1..]),
                Some(_) => self.bare(token),
            }
        }
    }

    fn option(&mut self, token: &str) {
        let (name, value) = split_option(&token[1..]);
        match self.parser.by_name.get(name) {
            Some(&index) => {
                self.set_value(index, value);
            }
            None => self.report(Diagnostic::Unrecognized(token.to_string())),
        }
    }

    fn bare(&mut self, token: &str) {
        if self.parser.positional.is_some() {
            self.set_value(self.parser.arguments.len(), Some(token));
        } else {
            self.report(Diagnostic::Unrecognized(token.to_string()));
        }
    }

    fn expand(&mut self, path: &str) {
        if self.depth >= MAX_RESPONSE_DEPTH {
            self.report(Diagnostic::ResponseFileTooDeep(path.to_string()));
            return;
        }
        debug!(path, depth = self.depth, "expanding response file");
        let lexed = match response::read(Path::new(path)) {
            Ok(lexed) => lexed,
            Err(e) => {
                self.report(Diagnostic::ResponseFileUnreadable {
                    path: path.to_string(),
                    reason: e.to_string(),
                });
                return;
            }
        };
        if lexed.error.is_some() {
            self.report(Diagnostic::UnbalancedQuote(path.to_string()));
        }
        debug!(path, tokens = lexed.tokens.len(), "response file read");

        self.depth += 1;
        self.parse_list(&lexed.tokens);
        self.depth -= 1;
    }

    /// Convert and store one occurrence. Returns `false` if it was rejected.
    fn set_value(&mut self, index: usize, text: Option<&str>) -> bool {
        let parser = self.parser;
        let Some(arg) = parser.slot(index) else {
            return false;
        };
        let name = arg.long_name();

        if self.slots[index].seen && !arg.allows_multiple() {
            self.report(Diagnostic::DuplicateArgument(name.to_string()));
            return false;
        }

        let Some(value) = arg.kind().parse(text) else {
            self.report(Diagnostic::InvalidValue {
                name: name.to_string(),
                value: text.unwrap_or_default().to_string(),
            });
            return false;
        };

        if arg.is_collection() {
            if arg.is_unique() && self.slots[index].values.contains(&value) {
                self.report(Diagnostic::DuplicateValue {
                    name: name.to_string(),
                    value: value.to_string(),
                });
                return false;
            }
            self.slots[index].values.push(value);
        } else {
            arg.assign(self.dest, value);
        }

        self.slots[index].seen = true;
        true
    }

    /// Apply defaults, hand collections over and check required arguments.
    fn finish(&mut self) {
        let parser = self.parser;
        let named = parser.arguments.iter().enumerate();
        let positional = parser
            .positional
            .iter()
            .map(|p| (parser.arguments.len(), p));

        for (index, arg) in named.chain(positional) {
            let slot = std::mem::take(&mut self.slots[index]);

            if arg.is_collection() {
                let values = match (slot.seen, arg.default_value()) {
                    (false, Some(Value::List(defaults))) => defaults.clone(),
                    _ => slot.values,
                };
                arg.assign_list(self.dest, values);
            } else if !slot.seen {
                if let Some(default) = arg.default_value() {
                    arg.assign(self.dest, default.clone());
                }
            }

            if arg.is_required() && !slot.seen {
                let name = arg.long_name().to_string();
                self.report(if arg.is_positional() {
                    Diagnostic::MissingPositional(name)
                } else {
                    Diagnostic::MissingRequired(name)
                });
            }
        }
    }
}
