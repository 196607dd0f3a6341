//! InfluxDB points and batches, and their line protocol encoding.
//!
//! A line has the form `measurement,tag=value,... field=value,... timestamp`.
//! Tags are sorted by key when encoding so that the same point always
//! produces the same line. Fields keep the order they were added in.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use thiserror::Error;

/// Errors raised while constructing a [`MetricPoint`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointError {
    #[error("measurement name cannot be empty")]
    EmptyMeasurement,

    #[error("{kind} key cannot be empty")]
    EmptyKey { kind: &'static str },

    #[error("duplicate {kind} key: {key}")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("point must have at least one field")]
    NoFields,

    #[error("field {key} is not a finite number")]
    NonFiniteField { key: String },
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl FieldValue {
    fn write_line_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "\"{}\"", value.replace('"', "\\\"")),
            Self::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// A single time-series sample.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    measurement: String,
    tags: HashMap<String, String>,
    fields: Vec<(String, FieldValue)>,
    timestamp: i64,
}

impl MetricPoint {
    /// Creates a point after validating its measurement, tags and fields.
    ///
    /// `timestamp` is in milliseconds since the Unix epoch.
    pub fn new<T, F, K, V, FK>(
        measurement: impl Into<String>,
        tags: T,
        fields: F,
        timestamp: i64,
    ) -> Result<Self, PointError>
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
        F: IntoIterator<Item = (FK, FieldValue)>,
        FK: Into<String>,
    {
        let measurement = measurement.into();
        if measurement.is_empty() {
            return Err(PointError::EmptyMeasurement);
        }

        let mut tag_map: HashMap<String, String> = HashMap::new();
        for (key, value) in tags {
            let key = key.into();
            if key.is_empty() {
                return Err(PointError::EmptyKey { kind: "tag" });
            }
            match tag_map.entry(key) {
                Entry::Occupied(occupied) => {
                    return Err(PointError::DuplicateKey {
                        kind: "tag",
                        key: occupied.key().clone(),
                    });
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(value.into());
                }
            }
        }

        let mut field_list: Vec<(String, FieldValue)> = Vec::new();
        for (key, value) in fields {
            let key = key.into();
            if key.is_empty() {
                return Err(PointError::EmptyKey { kind: "field" });
            }
            if field_list.iter().any(|(existing, _)| *existing == key) {
                return Err(PointError::DuplicateKey { kind: "field", key });
            }
            if matches!(value, FieldValue::Float(f) if !f.is_finite()) {
                return Err(PointError::NonFiniteField { key });
            }
            field_list.push((key, value));
        }
        if field_list.is_empty() {
            return Err(PointError::NoFields);
        }

        Ok(Self {
            measurement,
            tags: tag_map,
            fields: field_list,
            timestamp,
        })
    }

    /// Starts building a point for `measurement`.
    pub fn builder(measurement: impl Into<String>) -> MetricPointBuilder {
        MetricPointBuilder {
            measurement: measurement.into(),
            tags: Vec::new(),
            fields: Vec::new(),
            timestamp: 0,
        }
    }

    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    pub const fn tags(&self) -> &HashMap<String, String> {
        &self.tags
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Milliseconds since the Unix epoch.
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Encodes the point as one line of line protocol, without a newline.
    pub fn to_line_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MetricPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<(&String, &String)> = self.tags.iter().collect();
        tags.sort_unstable_by(|a, b| a.0.cmp(b.0));

        f.write_str(&self.measurement)?;
        for (key, value) in tags {
            write!(f, ",{key}={value}")?;
        }

        f.write_str(" ")?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}=")?;
            value.write_line_value(f)?;
        }

        write!(f, " {}", self.timestamp)
    }
}

/// Builder for [`MetricPoint`]. Validation happens in [`Self::build`].
#[derive(Debug, Clone)]
#[must_use]
pub struct MetricPointBuilder {
    measurement: String,
    tags: Vec<(String, String)>,
    fields: Vec<(String, FieldValue)>,
    timestamp: i64,
}

impl MetricPointBuilder {
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn build(self) -> Result<MetricPoint, PointError> {
        MetricPoint::new(self.measurement, self.tags, self.fields, self.timestamp)
    }
}

/// An ordered collection of points, written to InfluxDB in one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricBatch {
    points: Vec<MetricPoint>,
}

impl MetricBatch {
    pub const fn new(points: Vec<MetricPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[MetricPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricPoint> {
        self.points.iter()
    }

    /// Encodes every point, one per line, with no trailing newline.
    ///
    /// An empty batch encodes to the empty string.
    pub fn to_line_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MetricBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{point}")?;
        }
        Ok(())
    }
}

impl FromIterator<MetricPoint> for MetricBatch {
    fn from_iter<I: IntoIterator<Item = MetricPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for MetricBatch {
    type Item = MetricPoint;
    type IntoIter = std::vec::IntoIter<MetricPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a MetricBatch {
    type Item = &'a MetricPoint;
    type IntoIter = std::slice::Iter<'a, MetricPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
