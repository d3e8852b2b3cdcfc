//! Named value generators used by placeholders
//!
//! Every placeholder name in a skeleton (`id`, `firstName`, `numberBetween:1:9`, ...)
//! selects a generator from a [`GeneratorRegistry`]. Generators take positional
//! string arguments and draw all randomness from the RNG they are handed, so a
//! seeded RNG makes a whole resolution pass reproducible.
//!
//! - `faker`: general-purpose leaves (names, words, numbers, patterns, time)
//! - `telegram`: Bot API flavoured values (ids, file ids, users, commands)

pub mod faker;
mod rng;
pub mod telegram;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

pub use rng::FakeRng;

/// Signature shared by all generators.
///
/// The registry is passed in so composite generators can call other generators.
pub type GeneratorFn = fn(&GeneratorRegistry, &mut FakeRng, &[String]) -> GeneratorResult;

pub type GeneratorResult = Result<Generated, GeneratorError>;

/// What a generator produced
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    /// A concrete value, used as the resolved leaf as-is
    Value(Value),
    /// A skeleton that still contains placeholders and must be resolved further
    Skeleton(Value),
}

impl Generated {
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) | Self::Skeleton(value) => value,
        }
    }
}

/// Shorthand for `Generated::Value`
pub fn concrete(value: impl Into<Value>) -> GeneratorResult {
    Ok(Generated::Value(value.into()))
}

/// Why a generator could not produce a value.
///
/// The resolver turns all of these into the literal-text fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("unknown generator `{0}`")]
    Unknown(String),

    #[error("generator `{name}` takes {expected} argument(s), got {given}")]
    Arity {
        name: String,
        expected: String,
        given: usize,
    },

    #[error("generator `{name}`: invalid argument {arg:?} ({reason})")]
    InvalidArgument { name: String, arg: String, reason: String },
}

/// A registered generator and the argument counts it accepts
#[derive(Debug, Clone, Copy)]
pub struct GeneratorSpec {
    pub name: &'static str,
    pub min_args: usize,
    /// `None` means any number of trailing arguments
    pub max_args: Option<usize>,
    pub func: GeneratorFn,
}

impl GeneratorSpec {
    pub const fn new(name: &'static str, min_args: usize, max_args: Option<usize>, func: GeneratorFn) -> Self {
        Self {
            name,
            min_args,
            max_args,
            func,
        }
    }

    pub fn accepts(&self, given: usize) -> bool {
        given >= self.min_args && self.max_args.map_or(true, |max| given <= max)
    }

    fn expected(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{}..={}", self.min_args, max),
            None => format!("at least {}", self.min_args),
        }
    }
}

static DEFAULT_REGISTRY: Lazy<GeneratorRegistry> = Lazy::new(GeneratorRegistry::with_defaults);

/// Name → generator table
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    generators: HashMap<&'static str, GeneratorSpec>,
}

impl GeneratorRegistry {
    /// The process-wide registry with every built-in generator
    pub fn global() -> &'static GeneratorRegistry {
        &DEFAULT_REGISTRY
    }

    /// A registry with no generators at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fresh registry with every built-in generator, ready for additions
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        faker::register(&mut registry);
        telegram::register(&mut registry);
        registry
    }

    /// Adds or replaces a generator
    pub fn register(&mut self, spec: GeneratorSpec) -> &mut Self {
        if self.generators.insert(spec.name, spec).is_some() {
            log::debug!("generator `{}` replaced", spec.name);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Sorted generator names
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.generators.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Runs generator `name` with `args`, checking arity first.
    pub fn invoke(&self, name: &str, args: &[String], rng: &mut FakeRng) -> GeneratorResult {
        let spec = self
            .generators
            .get(name)
            .ok_or_else(|| GeneratorError::Unknown(name.to_string()))?;

        if !spec.accepts(args.len()) {
            return Err(GeneratorError::Arity {
                name: name.to_string(),
                expected: spec.expected(),
                given: args.len(),
            });
        }

        (spec.func)(self, rng, args)
    }
}

/// Reads optional argument `index`, parsing it as `T`, or returns `default`.
///
/// An empty argument (`"id:"`) counts as absent.
pub(crate) fn arg_or<T>(name: &str, args: &[String], index: usize, default: T) -> Result<T, GeneratorError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match args.get(index).map(|raw| raw.trim()) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| GeneratorError::InvalidArgument {
            name: name.to_string(),
            arg: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Reads a length or count argument like [`arg_or`], rejecting anything above `max`.
pub(crate) fn length_arg(
    name: &str,
    args: &[String],
    index: usize,
    default: usize,
    max: usize,
) -> Result<usize, GeneratorError> {
    let length: usize = arg_or(name, args, index, default)?;
    if length > max {
        return Err(GeneratorError::InvalidArgument {
            name: name.to_string(),
            arg: length.to_string(),
            reason: format!("must be at most {max}"),
        });
    }
    Ok(length)
}

/// Renders a generated value as plain text (strings unquoted).
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
