//! Predicate values and predicates.
//!
//! A [`Predicate`] maps backend field names to [`PredicateValue`]s. The set
//! of fields is open; each backend interprets the fields it understands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single scalar predicate value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Bool(bool),
    Number(f64),
    String(String),
}

impl Primitive {
    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::String(value)
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Bool(value)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Number(value)
    }
}

/// Match options bucket a value can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchBucket {
    /// Union semantics.
    Any,
    /// Intersection semantics.
    All,
    /// Exclusion semantics.
    Not,
}

impl MatchBucket {
    /// Buckets read when no explicit set is requested.
    pub const DEFAULT: [MatchBucket; 2] = [MatchBucket::Any, MatchBucket::All];
}

/// Structured match options for a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<Primitive>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<Primitive>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Vec<Primitive>>,
}

impl MatchOptions {
    /// Match options with only an `any` bucket.
    pub fn any<I, P>(values: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Primitive>,
    {
        Self {
            any: Some(values.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Match options with only an `all` bucket.
    pub fn all<I, P>(values: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Primitive>,
    {
        Self {
            all: Some(values.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Adds a `not` bucket.
    pub fn with_not<I, P>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Primitive>,
    {
        self.not = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Values held in `bucket`.
    pub fn bucket(&self, bucket: MatchBucket) -> &[Primitive] {
        let values = match bucket {
            MatchBucket::Any => &self.any,
            MatchBucket::All => &self.all,
            MatchBucket::Not => &self.not,
        };
        values.as_deref().unwrap_or(&[])
    }
}

/// Unit of a relative date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeDateUnit {
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

/// Date-valued predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DateValue {
    /// Absolute range. Bounds are epoch milliseconds or date strings.
    #[serde(rename = "date-range")]
    Range { from: Primitive, to: Primitive },
    /// The last `num` units.
    #[serde(rename = "relative-date")]
    Relative { num: u32, unit: RelativeDateUnit },
}

/// Any value a predicate field may hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredicateValue {
    /// Explicit `null`, read as "no predicate".
    Null,
    Primitive(Primitive),
    List(Vec<Primitive>),
    Date(DateValue),
    Match(MatchOptions),
}

impl PredicateValue {
    /// True for `null` and the empty string, which both mean "no predicate".
    pub fn is_absent(&self) -> bool {
        match self {
            PredicateValue::Null => true,
            PredicateValue::Primitive(Primitive::String(s)) => s.is_empty(),
            _ => false,
        }
    }

    /// True for string and boolean primitives.
    pub fn is_string_or_bool(&self) -> bool {
        matches!(
            self,
            PredicateValue::Primitive(Primitive::String(_) | Primitive::Bool(_))
        )
    }

    /// Normalizes the value into match options.
    ///
    /// Primitives and lists land in `any`; nulls and date values carry no
    /// match options.
    pub fn to_match_options(&self) -> MatchOptions {
        match self {
            PredicateValue::Primitive(p) => MatchOptions::any([p.clone()]),
            PredicateValue::List(values) => MatchOptions::any(values.iter().cloned()),
            PredicateValue::Match(options) => options.clone(),
            PredicateValue::Null | PredicateValue::Date(_) => MatchOptions::default(),
        }
    }
}

impl From<&str> for PredicateValue {
    fn from(value: &str) -> Self {
        PredicateValue::Primitive(value.into())
    }
}

impl From<String> for PredicateValue {
    fn from(value: String) -> Self {
        PredicateValue::Primitive(value.into())
    }
}

impl From<bool> for PredicateValue {
    fn from(value: bool) -> Self {
        PredicateValue::Primitive(value.into())
    }
}

impl From<f64> for PredicateValue {
    fn from(value: f64) -> Self {
        PredicateValue::Primitive(value.into())
    }
}

impl<P: Into<Primitive>> From<Vec<P>> for PredicateValue {
    fn from(values: Vec<P>) -> Self {
        PredicateValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<MatchOptions> for PredicateValue {
    fn from(value: MatchOptions) -> Self {
        PredicateValue::Match(value)
    }
}

impl From<DateValue> for PredicateValue {
    fn from(value: DateValue) -> Self {
        PredicateValue::Date(value)
    }
}

/// Field name to value mapping interpreted by a search backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Predicate(BTreeMap<String, PredicateValue>);

impl Predicate {
    /// Creates an empty predicate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a predicate with a single field.
    pub fn field(name: impl Into<String>, value: impl Into<PredicateValue>) -> Self {
        Self::new().with(name, value)
    }

    /// Adds a field.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PredicateValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a field, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PredicateValue>,
    ) -> Option<PredicateValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&PredicateValue> {
        self.0.get(field)
    }

    /// True when `field` is present, not `null` and not the empty string.
    pub fn has_value(&self, field: &str) -> bool {
        self.get(field).is_some_and(|v| !v.is_absent())
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PredicateValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
