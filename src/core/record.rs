use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ScrollyError, ScrollyResult};
use crate::visualization::VisualizationKind;

/// Value of a non-decade record field.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordField {
    Metric(f64),
    /// Label such as a genre or an artist name.
    Category(String),
    /// Named numeric breakdown, e.g. the genre shares of one decade.
    Group(IndexMap<String, f64>),
}

/// Data record handed to a visualization's `init`.
///
/// Every record carries a decade (time-bucket) key. Remaining fields keep
/// their source order: numbers become metrics, strings categories and
/// objects of numbers groups. Serialization writes `decade` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Record {
    pub decade: String,
    pub fields: IndexMap<String, RecordField>,
}

impl Record {
    #[must_use]
    pub fn new(decade: impl Into<String>) -> Self {
        Self {
            decade: decade.into(),
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), RecordField::Metric(value));
        self
    }

    #[must_use]
    pub fn with_category(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .insert(name.into(), RecordField::Category(value.into()));
        self
    }

    #[must_use]
    pub fn with_group<K: Into<String>>(
        mut self,
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        let group = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        self.fields.insert(name.into(), RecordField::Group(group));
        self
    }

    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        match self.fields.get(name) {
            Some(RecordField::Metric(value)) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(RecordField::Category(value)) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&IndexMap<String, f64>> {
        match self.fields.get(name) {
            Some(RecordField::Group(group)) => Some(group),
            _ => None,
        }
    }

    /// Metric fields in source order.
    pub fn metrics(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields.iter().filter_map(|(name, field)| match field {
            RecordField::Metric(value) => Some((name.as_str(), *value)),
            _ => None,
        })
    }
}

fn finite_number(key: &str, number: &serde_json::Number) -> ScrollyResult<f64> {
    number
        .as_f64()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ScrollyError::InvalidData(format!("record field `{key}` is not finite")))
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = ScrollyError;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut decade = None;
        let mut fields = IndexMap::new();

        for (key, value) in object {
            let field = match (key.as_str(), value) {
                ("decade", Value::String(text)) => {
                    decade = Some(text);
                    continue;
                }
                ("decade", other) => {
                    return Err(ScrollyError::InvalidData(format!(
                        "record `decade` must be a string, got {other}"
                    )));
                }
                (_, Value::Number(number)) => RecordField::Metric(finite_number(&key, &number)?),
                (_, Value::String(text)) => RecordField::Category(text),
                (_, Value::Object(entries)) => {
                    let mut group = IndexMap::with_capacity(entries.len());
                    for (name, entry) in entries {
                        let path = format!("{key}.{name}");
                        let Value::Number(number) = entry else {
                            return Err(ScrollyError::InvalidData(format!(
                                "record field `{path}` must be a number"
                            )));
                        };
                        group.insert(name, finite_number(&path, &number)?);
                    }
                    RecordField::Group(group)
                }
                (_, Value::Array(_)) => {
                    return Err(ScrollyError::InvalidData(format!(
                        "record field `{key}` must not be an array"
                    )));
                }
                // absent values
                (_, Value::Null | Value::Bool(_)) => continue,
            };
            fields.insert(key, field);
        }

        let decade = decade
            .ok_or_else(|| ScrollyError::InvalidData("record is missing `decade`".to_owned()))?;
        Ok(Self { decade, fields })
    }
}

fn number_value(value: f64) -> Option<Value> {
    serde_json::Number::from_f64(value).map(Value::Number)
}

impl From<Record> for Map<String, Value> {
    fn from(record: Record) -> Self {
        let mut object = Map::new();
        object.insert("decade".to_owned(), Value::String(record.decade));
        for (name, field) in record.fields {
            let value = match field {
                RecordField::Metric(value) => number_value(value),
                RecordField::Category(text) => Some(Value::String(text)),
                RecordField::Group(group) => Some(Value::Object(
                    group
                        .into_iter()
                        .filter_map(|(key, value)| number_value(value).map(|value| (key, value)))
                        .collect(),
                )),
            };
            if let Some(value) = value {
                object.insert(name, value);
            }
        }
        object
    }
}

/// Per-visualization record arrays supplied by the data collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryData {
    #[serde(default)]
    pub popularity: Vec<Record>,
    #[serde(default)]
    pub genres: Vec<Record>,
    #[serde(default)]
    pub energy_danceability: Vec<Record>,
    #[serde(default)]
    pub top_artists: Vec<Record>,
    #[serde(default)]
    pub radial_data: Vec<Record>,
}

impl StoryData {
    pub fn from_json_str(input: &str) -> ScrollyResult<Self> {
        let data: Self = serde_json::from_str(input)
            .map_err(|e| ScrollyError::InvalidData(format!("failed to parse story data: {e}")))?;
        debug!(
            popularity = data.popularity.len(),
            genres = data.genres.len(),
            energy_danceability = data.energy_danceability.len(),
            top_artists = data.top_artists.len(),
            radial_data = data.radial_data.len(),
            "story data parsed"
        );
        Ok(data)
    }

    #[must_use]
    pub fn series(&self, kind: VisualizationKind) -> &[Record] {
        match kind {
            VisualizationKind::Line => &self.popularity,
            VisualizationKind::StackedBar => &self.genres,
            VisualizationKind::Scatter => &self.energy_danceability,
            VisualizationKind::Bubble => &self.top_artists,
            VisualizationKind::Radial => &self.radial_data,
        }
    }
}
