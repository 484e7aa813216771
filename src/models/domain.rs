use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Demographic and cost attributes of a candidate location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub population: f64,
    pub age: f64,
    pub income: f64,
    #[serde(rename = "employedpopulation")]
    pub employed_population: f64,
    pub ad_cost: f64,
    #[serde(rename = "foottraffic")]
    pub foot_traffic: f64,
}

impl LocationRecord {
    /// Share of the population that is employed, as a percentage.
    ///
    /// Returns `None` when the population is not positive.
    pub fn employed_percentage(&self) -> Option<f64> {
        if self.population > 0.0 {
            Some(self.employed_population / self.population * 100.0)
        } else {
            None
        }
    }

    /// Check the record against the dataset constraints.
    ///
    /// Returns a description of the first violated constraint.
    pub fn check(&self) -> Result<(), String> {
        let fields = [
            ("population", self.population),
            ("age", self.age),
            ("income", self.income),
            ("employedpopulation", self.employed_population),
            ("ad_cost", self.ad_cost),
            ("foottraffic", self.foot_traffic),
        ];

        if let Some((field, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(format!("{} must be a finite number", field));
        }
        if let Some((field, _)) = fields.iter().find(|(_, value)| *value < 0.0) {
            return Err(format!("{} must not be negative", field));
        }
        if !self.population.is_normal() {
            return Err("population is zero or too small to divide by".to_string());
        }
        if self.employed_population > self.population {
            return Err(format!(
                "employedpopulation ({}) exceeds population ({})",
                self.employed_population, self.population
            ));
        }

        Ok(())
    }
}

/// Immutable, insertion-ordered mapping of location name to record
///
/// Deserializes from a JSON object and keeps the object's key order, which
/// is the order every "all locations" view of the pipeline reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    entries: Vec<(String, LocationRecord)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&LocationRecord> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, record)| record)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Location names in original order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocationRecord)> {
        self.entries.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Keep only the entries matching `keep`, preserving order
    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &LocationRecord) -> bool,
    {
        self.entries.retain(|(name, record)| keep(name, record));
    }
}

impl FromIterator<(String, LocationRecord)> for Dataset {
    /// Later duplicates replace the earlier record in its original slot.
    fn from_iter<I: IntoIterator<Item = (String, LocationRecord)>>(iter: I) -> Self {
        let mut entries: Vec<(String, LocationRecord)> = Vec::new();
        for (name, record) in iter {
            match entries.iter_mut().find(|(key, _)| *key == name) {
                Some(slot) => slot.1 = record,
                None => entries.push((name, record)),
            }
        }
        Self { entries }
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DatasetVisitor;

        impl<'de> Visitor<'de> for DatasetVisitor {
            type Value = Dataset;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of location name to demographic record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Dataset, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, record)) = access.next_entry::<String, LocationRecord>()? {
                    entries.push((name, record));
                }
                Ok(entries.into_iter().collect())
            }
        }

        deserializer.deserialize_map(DatasetVisitor)
    }
}

/// A location with its derived reach and efficiency scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLocation {
    pub name: String,
    #[serde(flatten)]
    pub record: LocationRecord,
    /// Estimated people exposed, rounded to a whole number
    pub audience_reach: f64,
    /// Audience reach per unit of ad cost; zero when the ad is free
    pub cost_efficiency_score: f64,
}

/// A ranked location with its share of the budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    #[serde(flatten)]
    pub location: ScoredLocation,
    pub allocated_budget: f64,
}

/// Mean demographics over the filtered set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageStats {
    pub age: f64,
    pub income: f64,
    pub employed_percentage: f64,
}
