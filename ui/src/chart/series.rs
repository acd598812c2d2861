//! Flattening of a [`ResultMapping`] into chart coordinates.

use std::rc::Rc;

use crate::core::profile::ResultMapping;

/// Category span covered by one cognitive function.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpan {
    pub name: String,
    pub first: usize,
    pub last: usize,
}

impl GroupSpan {
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }
}

/// Parallel sequences consumed by the draw passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Half-index positions between consecutive groups; the right edge is implicit.
    pub group_boundaries: Vec<f64>,
    pub groups: Vec<GroupSpan>,
}

impl ChartSeries {
    pub fn from_mapping(mapping: &ResultMapping) -> Self {
        let mut series = ChartSeries {
            labels: Vec::with_capacity(mapping.index_count()),
            values: Vec::with_capacity(mapping.index_count()),
            ..Default::default()
        };

        for group in mapping.functions().iter().filter(|group| !group.is_empty()) {
            let first = series.labels.len();
            for entry in group.indices() {
                series.labels.push(entry.name.clone());
                series.values.push(entry.percentile);
            }
            series.groups.push(GroupSpan {
                name: group.name().to_string(),
                first,
                last: series.labels.len() - 1,
            });
        }

        if let Some((_, leading)) = series.groups.split_last() {
            series.group_boundaries = leading
                .iter()
                .map(|span| (span.last + 1) as f64 - 0.5)
                .collect();
        }

        series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Remembers the last flattening and reuses it while the input compares equal.
#[derive(Debug, Default)]
pub struct FlattenCache {
    last: Option<(ResultMapping, Rc<ChartSeries>)>,
    hits: u64,
    misses: u64,
}

impl FlattenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_flatten(&mut self, mapping: &ResultMapping) -> Rc<ChartSeries> {
        if let Some((cached, series)) = &self.last {
            if cached == mapping {
                self.hits += 1;
                return Rc::clone(series);
            }
        }

        self.misses += 1;
        let series = Rc::new(ChartSeries::from_mapping(mapping));
        self.last = Some((mapping.clone(), Rc::clone(&series)));
        series
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
