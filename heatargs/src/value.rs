//! Typed option values and their command-line text conversions.

use std::fmt;

/// The type of value an argument accepts. Collections are described by the
/// argument itself; this is always the element kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    UnsignedInt,
    Bool,
    String,
    /// Closed enumeration; member names in declaration order.
    Enum(Vec<&'static str>),
}

impl ValueKind {
    /// Hint appended to `/name` in usage text.
    pub fn syntax_hint(&self) -> String {
        match self {
            ValueKind::Int => ":<int>".to_string(),
            ValueKind::UnsignedInt => ":<uint>".to_string(),
            ValueKind::Bool => "[+|-]".to_string(),
            ValueKind::String => ":<string>".to_string(),
            ValueKind::Enum(names) => format!(":{{{}}}", names.join("|")),
        }
    }

    /// Whether `value` is a well-formed scalar of this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueKind::Int, Value::Int(_))
            | (ValueKind::UnsignedInt, Value::UnsignedInt(_))
            | (ValueKind::Bool, Value::Bool(_))
            | (ValueKind::String, Value::String(_)) => true,
            (ValueKind::Enum(names), Value::Enum(name)) => names.contains(&name.as_str()),
            _ => false,
        }
    }

    /// Convert the inline text of an option into a value of this kind.
    ///
    /// `None` means the option carried no value at all (`/flag`), which only
    /// a boolean accepts. An empty string is a valid `String` value.
    pub fn parse(&self, text: Option<&str>) -> Option<Value> {
        match self {
            ValueKind::String => text.map(|s| Value::String(s.to_string())),
            ValueKind::Bool => match text {
                None | Some("+") => Some(Value::Bool(true)),
                Some("-") => Some(Value::Bool(false)),
                Some(_) => None,
            },
            ValueKind::Int => text?.parse().ok().map(Value::Int),
            ValueKind::UnsignedInt => text?.parse().ok().map(Value::UnsignedInt),
            ValueKind::Enum(names) => {
                let text = text?;
                names
                    .iter()
                    .find(|name| name.eq_ignore_ascii_case(text))
                    .map(|name| Value::Enum(name.to_string()))
            }
        }
    }
}

/// A converted argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i32),
    UnsignedInt(u32),
    Bool(bool),
    String(String),
    /// Canonical (declared) member name of an enumeration.
    Enum(String),
    /// Default of a collection argument.
    List(Vec<Value>),
}

impl Value {
    /// Value of an enumeration member, e.g. for `.default_value(...)`.
    pub fn choice<E: OptionEnum>(member: E) -> Self {
        Value::Enum(member.name().to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::UnsignedInt(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", if *b { "+" } else { "-" }),
            Value::String(s) | Value::Enum(s) => write!(f, "{}", s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::UnsignedInt(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Scalar Rust types a destination field may hold.
pub trait OptionValue: Sized + 'static {
    fn kind() -> ValueKind;
    fn from_value(value: Value) -> Option<Self>;
}

impl OptionValue for i32 {
    fn kind() -> ValueKind {
        ValueKind::Int
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }
}

impl OptionValue for u32 {
    fn kind() -> ValueKind {
        ValueKind::UnsignedInt
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::UnsignedInt(n) => Some(n),
            _ => None,
        }
    }
}

impl OptionValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Bool
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl OptionValue for String {
    fn kind() -> ValueKind {
        ValueKind::String
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A closed enumeration usable as an option value.
///
/// `variants()` fixes the member order shown in usage text; `name()` is the
/// spelling accepted on the command line (matched case-insensitively).
pub trait OptionEnum: Sized + Clone + 'static {
    fn variants() -> &'static [Self];
    fn name(&self) -> &'static str;
}

pub(crate) fn enum_kind<E: OptionEnum>() -> ValueKind {
    ValueKind::Enum(E::variants().iter().map(|v| v.name()).collect())
}

pub(crate) fn enum_from_value<E: OptionEnum>(value: Value) -> Option<E> {
    match value {
        Value::Enum(name) => E::variants().iter().find(|v| v.name() == name).cloned(),
        _ => None,
    }
}
