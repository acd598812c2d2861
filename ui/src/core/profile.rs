//! Result mapping handed to the chart: cognitive function → index → percentile.
//!
//! Both levels keep insertion order. The order decides left-to-right plotting and
//! which indices are grouped under one function, so the JSON form is read and
//! written in document order rather than through a sorted map.

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const PERCENTILE_MIN: f64 = 0.0;
pub const PERCENTILE_MAX: f64 = 100.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProfileError {
    #[error("percentile for `{index}` must be between 0 and 100 (got {value})")]
    PercentileOutOfRange { index: String, value: f64 },
    #[error("percentile for `{index}` is not a number")]
    NonFinitePercentile { index: String },
    #[error("index `{index}` appears under both `{first}` and `{second}`")]
    DuplicateIndex {
        index: String,
        first: String,
        second: String,
    },
    #[error("unknown index `{0}`")]
    UnknownIndex(String),
}

/// Single measurement and its percentile.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexScore {
    pub name: String,
    pub percentile: f64,
}

/// One cognitive function and its indices, in entry order.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionScores {
    name: String,
    indices: Vec<IndexScore>,
}

impl FunctionScores {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            indices: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn indices(&self) -> &[IndexScore] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, index: &str) -> Option<f64> {
        self.indices
            .iter()
            .find(|entry| entry.name == index)
            .map(|entry| entry.percentile)
    }

    /// Replaces the value in place when the index already exists, appends otherwise.
    pub fn insert(&mut self, index: impl Into<String>, percentile: f64) {
        let index = index.into();
        match self.indices.iter_mut().find(|entry| entry.name == index) {
            Some(entry) => entry.percentile = percentile,
            None => self.indices.push(IndexScore {
                name: index,
                percentile,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultMapping {
    functions: Vec<FunctionScores>,
}

impl ResultMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form: appends (or extends) a function with the given indices.
    pub fn with_function<N, I, K>(mut self, name: N, indices: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let group = self.function_mut(name.into());
        for (index, percentile) in indices {
            group.insert(index, percentile);
        }
        self
    }

    pub fn insert(
        &mut self,
        function: impl Into<String>,
        index: impl Into<String>,
        percentile: f64,
    ) {
        self.function_mut(function.into()).insert(index, percentile);
    }

    pub fn functions(&self) -> &[FunctionScores] {
        &self.functions
    }

    pub fn function(&self, name: &str) -> Option<&FunctionScores> {
        self.functions.iter().find(|group| group.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.functions.iter().all(FunctionScores::is_empty)
    }

    pub fn index_count(&self) -> usize {
        self.functions.iter().map(FunctionScores::len).sum()
    }

    /// Checks the invariants the collection layer is expected to uphold.
    ///
    /// The renderer never calls this: it draws whatever it is given.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let mut seen: Vec<(&str, &str)> = Vec::with_capacity(self.index_count());
        for group in &self.functions {
            for entry in &group.indices {
                check_percentile(&entry.name, entry.percentile)?;
                if let Some((_, owner)) = seen.iter().find(|(name, _)| *name == entry.name) {
                    return Err(ProfileError::DuplicateIndex {
                        index: entry.name.clone(),
                        first: owner.to_string(),
                        second: group.name.clone(),
                    });
                }
                seen.push((entry.name.as_str(), group.name.as_str()));
            }
        }
        Ok(())
    }

    /// Index names used by more than one function.
    pub fn duplicate_indices(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for entry in self.functions.iter().flat_map(|group| group.indices.iter()) {
            if !seen.insert(entry.name.as_str()) && !duplicates.contains(&entry.name.as_str()) {
                duplicates.push(entry.name.as_str());
            }
        }
        duplicates
    }

    fn function_mut(&mut self, name: String) -> &mut FunctionScores {
        let position = match self.functions.iter().position(|group| group.name == name) {
            Some(position) => position,
            None => {
                self.functions.push(FunctionScores::new(name));
                self.functions.len() - 1
            }
        };
        &mut self.functions[position]
    }
}

pub(crate) fn check_percentile(index: &str, value: f64) -> Result<(), ProfileError> {
    if !value.is_finite() {
        return Err(ProfileError::NonFinitePercentile {
            index: index.to_string(),
        });
    }
    if !(PERCENTILE_MIN..=PERCENTILE_MAX).contains(&value) {
        return Err(ProfileError::PercentileOutOfRange {
            index: index.to_string(),
            value,
        });
    }
    Ok(())
}

/// Case identification shown in the chart title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMeta {
    pub case_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl DisplayMeta {
    pub fn new(case_number: impl Into<String>, age: Option<u32>) -> Self {
        Self {
            case_number: case_number.into(),
            age,
        }
    }
}

/// A saved case: who it is and what they scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub meta: DisplayMeta,
    pub results: ResultMapping,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("profile JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ProfileError),
}

impl ProfileDocument {
    /// Parses and validates a document. Unlike rendering, loading rejects
    /// out-of-range percentiles and repeated index names.
    pub fn from_json_str(raw: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(raw)?;
        document.results.validate()?;
        tracing::debug!(
            case = %document.meta.case_number,
            indices = document.results.index_count(),
            "loaded profile document"
        );
        Ok(document)
    }
}

impl Serialize for FunctionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.indices.len()))?;
        for entry in &self.indices {
            map.serialize_entry(&entry.name, &entry.percentile)?;
        }
        map.end()
    }
}

impl Serialize for ResultMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.functions.len()))?;
        for group in &self.functions {
            map.serialize_entry(&group.name, group)?;
        }
        map.end()
    }
}

/// Inner `{index: percentile}` object, read in document order.
struct OrderedIndices(Vec<IndexScore>);

impl<'de> Deserialize<'de> for OrderedIndices {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IndicesVisitor;

        impl<'de> Visitor<'de> for IndicesVisitor {
            type Value = OrderedIndices;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of index names to percentiles")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut indices: Vec<IndexScore> = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, percentile)) = access.next_entry::<String, f64>()? {
                    match indices.iter_mut().find(|entry| entry.name == name) {
                        Some(entry) => entry.percentile = percentile,
                        None => indices.push(IndexScore { name, percentile }),
                    }
                }
                Ok(OrderedIndices(indices))
            }
        }

        deserializer.deserialize_map(IndicesVisitor)
    }
}

impl<'de> Deserialize<'de> for ResultMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = ResultMapping;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of cognitive functions to index results")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut mapping = ResultMapping::new();
                while let Some((name, OrderedIndices(indices))) =
                    access.next_entry::<String, OrderedIndices>()?
                {
                    let group = mapping.function_mut(name);
                    for entry in indices {
                        group.insert(entry.name, entry.percentile);
                    }
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}
