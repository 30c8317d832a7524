//! Unit results - Ordered mapping from unit id to its result.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{AnalysisResult, RiskProfile};

/// Results of one run keyed by unit id, in unit declaration order.
///
/// Serializes as a JSON object whose keys follow the declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitResults {
    entries: Vec<AnalysisResult>,
}

impl UnitResults {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a result, replacing any previous result for the same unit.
    ///
    /// A replaced result keeps its original position.
    pub fn insert(&mut self, result: AnalysisResult) {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.unit_id == result.unit_id)
        {
            Some(existing) => *existing = result,
            None => self.entries.push(result),
        }
    }

    /// Returns the result for a unit.
    pub fn get(&self, unit_id: &str) -> Option<&AnalysisResult> {
        self.entries.iter().find(|r| r.unit_id == unit_id)
    }

    /// True when a result exists for the unit.
    pub fn contains(&self, unit_id: &str) -> bool {
        self.get(unit_id).is_some()
    }

    /// Unit ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|r| r.unit_id.as_str())
    }

    /// All results in order.
    pub fn iter(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.entries.iter()
    }

    /// Results of units that completed.
    pub fn successful(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.entries.iter().filter(|r| !r.is_degraded())
    }

    /// Results of units that failed.
    pub fn degraded(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.entries.iter().filter(|r| r.is_degraded())
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no results are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First risk profile found among the results.
    pub fn risk_profile(&self) -> Option<&RiskProfile> {
        self.entries.iter().find_map(|r| r.risk_profile())
    }
}

impl FromIterator<AnalysisResult> for UnitResults {
    fn from_iter<T: IntoIterator<Item = AnalysisResult>>(iter: T) -> Self {
        let mut results = UnitResults::new();
        for result in iter {
            results.insert(result);
        }
        results
    }
}

impl IntoIterator for UnitResults {
    type Item = AnalysisResult;
    type IntoIter = std::vec::IntoIter<AnalysisResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for UnitResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for result in &self.entries {
            map.serialize_entry(&result.unit_id, result)?;
        }
        map.end()
    }
}
