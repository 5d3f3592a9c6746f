//! Argument declarations.
//!
//! A destination type describes its options as a list of [`Arg`] builders,
//! each carrying the setter that writes a converted value into the
//! destination. [`crate::Parser::new`] validates them into [`Argument`]s.

use crate::error::SpecError;
use crate::value::{self, OptionEnum, OptionValue, Value, ValueKind};

type ScalarSetter<D> = Box<dyn Fn(&mut D, Value)>;
type ListSetter<D> = Box<dyn Fn(&mut D, Vec<Value>)>;

enum Setter<D> {
    Scalar(ScalarSetter<D>),
    List(ListSetter<D>),
}

/// How often an argument may or must appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cardinality {
    pub required: bool,
    pub multiple: bool,
    /// Collections only: reject a value already given.
    pub unique: bool,
}

impl Cardinality {
    pub const AT_MOST_ONCE: Self = Cardinality {
        required: false,
        multiple: false,
        unique: false,
    };
    pub const REQUIRED: Self = Cardinality {
        required: true,
        multiple: false,
        unique: false,
    };
    pub const MULTIPLE: Self = Cardinality {
        required: false,
        multiple: true,
        unique: false,
    };
    pub const MULTIPLE_UNIQUE: Self = Cardinality {
        required: false,
        multiple: true,
        unique: true,
    };
}

/// A destination type with a fixed set of command-line arguments.
pub trait Arguments: Sized {
    fn arguments() -> Vec<Arg<Self>>;
}

/// Builder for one argument of destination type `D`.
pub struct Arg<D> {
    long_name: String,
    short_name: Option<String>,
    kind: ValueKind,
    positional: bool,
    cardinality: Option<Cardinality>,
    default_value: Option<Value>,
    help: Option<String>,
    setter: Setter<D>,
}

impl<D: 'static> Arg<D> {
    /// A scalar argument (`i32`, `u32`, `bool` or `String`).
    pub fn new<T, F>(long_name: &str, setter: F) -> Self
    where
        T: OptionValue,
        F: Fn(&mut D, T) + 'static,
    {
        Self::with_setter(
            long_name,
            T::kind(),
            Setter::Scalar(Box::new(move |dest: &mut D, v: Value| {
                if let Some(v) = T::from_value(v) {
                    setter(dest, v);
                }
            })),
        )
    }

    /// A collection argument; values are delivered in command-line order.
    pub fn list<T, F>(long_name: &str, setter: F) -> Self
    where
        T: OptionValue,
        F: Fn(&mut D, Vec<T>) + 'static,
    {
        Self::with_setter(
            long_name,
            T::kind(),
            Setter::List(Box::new(move |dest: &mut D, values: Vec<Value>| {
                setter(dest, values.into_iter().filter_map(T::from_value).collect());
            })),
        )
    }

    /// A scalar argument drawn from a closed enumeration.
    pub fn choice<E, F>(long_name: &str, setter: F) -> Self
    where
        E: OptionEnum,
        F: Fn(&mut D, E) + 'static,
    {
        Self::with_setter(
            long_name,
            value::enum_kind::<E>(),
            Setter::Scalar(Box::new(move |dest: &mut D, v: Value| {
                if let Some(v) = value::enum_from_value::<E>(v) {
                    setter(dest, v);
                }
            })),
        )
    }

    /// A collection of enumeration members.
    pub fn choice_list<E, F>(long_name: &str, setter: F) -> Self
    where
        E: OptionEnum,
        F: Fn(&mut D, Vec<E>) + 'static,
    {
        Self::with_setter(
            long_name,
            value::enum_kind::<E>(),
            Setter::List(Box::new(move |dest: &mut D, values: Vec<Value>| {
                setter(
                    dest,
                    values
                        .into_iter()
                        .filter_map(value::enum_from_value::<E>)
                        .collect(),
                );
            })),
        )
    }

    fn with_setter(long_name: &str, kind: ValueKind, setter: Setter<D>) -> Self {
        Arg {
            long_name: long_name.to_string(),
            short_name: None,
            kind,
            positional: false,
            cardinality: None,
            default_value: None,
            help: None,
            setter,
        }
    }
}

impl<D> Arg<D> {
    /// Explicit short alias. An empty name means "no short form".
    pub fn short(mut self, name: &str) -> Self {
        self.short_name = Some(name.to_string());
        self
    }

    /// Suppress the implicit first-letter short form.
    pub fn no_short(self) -> Self {
        self.short("")
    }

    /// Bind the argument to bare (non-option) tokens.
    pub fn positional(mut self) -> Self {
        self.positional = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.cardinality = Some(Cardinality {
            required: true,
            ..self.effective_cardinality()
        });
        self
    }

    pub fn multiple(mut self) -> Self {
        self.cardinality = Some(Cardinality {
            multiple: true,
            ..self.effective_cardinality()
        });
        self
    }

    pub fn unique(mut self) -> Self {
        self.cardinality = Some(Cardinality {
            unique: true,
            ..self.effective_cardinality()
        });
        self
    }

    /// Replace the whole cardinality, overriding the per-kind default.
    pub fn cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = Some(cardinality);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn help(mut self, text: &str) -> Self {
        self.help = Some(text.to_string());
        self
    }

    fn is_collection(&self) -> bool {
        matches!(self.setter, Setter::List(_))
    }

    fn effective_cardinality(&self) -> Cardinality {
        self.cardinality.unwrap_or(if self.is_collection() {
            Cardinality::MULTIPLE_UNIQUE
        } else {
            Cardinality::AT_MOST_ONCE
        })
    }

    /// Check the per-argument invariants and resolve defaults.
    pub(crate) fn build(self) -> Result<Argument<D>, SpecError> {
        if self.long_name.is_empty() {
            return Err(SpecError::EmptyLongName);
        }
        let name = self.long_name.clone();
        let collection = self.is_collection();
        let cardinality = self.effective_cardinality();
        let explicit_short = self.short_name.is_some();

        if self.positional && self.short_name.as_deref().is_some_and(|s| !s.is_empty()) {
            return Err(SpecError::PositionalShortName(name));
        }
        if matches!(&self.kind, ValueKind::Enum(names) if names.is_empty()) {
            return Err(SpecError::UnsupportedKind(name));
        }
        if cardinality.unique && !collection {
            return Err(SpecError::UniqueRequiresCollection(name));
        }
        if collection && !cardinality.multiple {
            return Err(SpecError::CollectionRequiresMultiple(name));
        }
        if let Some(default) = &self.default_value {
            if cardinality.required {
                return Err(SpecError::RequiredWithDefault(name));
            }
            let matches = match default {
                Value::List(items) => collection && items.iter().all(|v| self.kind.accepts(v)),
                scalar => !collection && self.kind.accepts(scalar),
            };
            if !matches {
                return Err(SpecError::DefaultTypeMismatch(name));
            }
        }

        let short_name = if self.positional {
            None
        } else if explicit_short {
            self.short_name.filter(|s| !s.is_empty())
        } else {
            self.long_name.chars().next().map(String::from)
        };

        Ok(Argument {
            long_name: self.long_name,
            short_name,
            explicit_short,
            kind: self.kind,
            collection,
            positional: self.positional,
            cardinality,
            default_value: self.default_value,
            help: self.help,
            setter: self.setter,
        })
    }
}

/// A validated argument, as held by a [`crate::Parser`].
pub struct Argument<D> {
    long_name: String,
    short_name: Option<String>,
    explicit_short: bool,
    kind: ValueKind,
    collection: bool,
    positional: bool,
    cardinality: Cardinality,
    default_value: Option<Value>,
    help: Option<String>,
    setter: Setter<D>,
}

impl<D> Argument<D> {
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn is_collection(&self) -> bool {
        self.collection
    }

    pub fn is_positional(&self) -> bool {
        self.positional
    }

    pub fn is_required(&self) -> bool {
        self.cardinality.required
    }

    pub fn allows_multiple(&self) -> bool {
        self.cardinality.multiple
    }

    pub fn is_unique(&self) -> bool {
        self.cardinality.unique
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub(crate) fn has_explicit_short(&self) -> bool {
        self.explicit_short
    }

    pub(crate) fn clear_short_name(&mut self) {
        self.short_name = None;
    }

    /// `<name>` for the positional, `/name` plus a type hint otherwise.
    pub fn syntax_help(&self) -> String {
        if self.positional {
            format!("<{}>", self.long_name)
        } else {
            format!("/{}{}", self.long_name, self.kind.syntax_hint())
        }
    }

    /// Help text followed by the default value and short form, if any.
    pub fn full_help(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(help) = self.help().filter(|h| !h.is_empty()) {
            parts.push(help.to_string());
        }
        if let Some(default) = &self.default_value {
            parts.push(format!("Default value:'{}'", default));
        }
        if let Some(short) = &self.short_name {
            parts.push(format!("(short form /{})", short));
        }
        parts.join(" ")
    }

    pub(crate) fn assign(&self, dest: &mut D, value: Value) {
        if let Setter::Scalar(set) = &self.setter {
            set(dest, value);
        }
    }

    pub(crate) fn assign_list(&self, dest: &mut D, values: Vec<Value>) {
        if let Setter::List(set) = &self.setter {
            set(dest, values);
        }
    }
}
