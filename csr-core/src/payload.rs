//! Typed decoding of the prediction service payloads.
//!
//! Both payloads are JSON objects keyed by week. Week order is taken from
//! the document as written and kept as an explicit sequence, so nothing
//! downstream depends on map iteration order.

use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt,
    path::Path,
};

use crate::{error::Result, StressType, WeekKey};

/// Scores of every temperature stress type for one week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StressTypeScore(BTreeMap<StressType, u32>);

impl StressTypeScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a score, returning the previous one for that stress type.
    pub fn insert(&mut self, stress_type: StressType, score: u32) -> Option<u32> {
        self.0.insert(stress_type, score)
    }

    pub fn get(&self, stress_type: StressType) -> Option<u32> {
        self.0.get(&stress_type).copied()
    }

    /// Highest temperature stress score in the record, `None` when there is
    /// none. A drought entry never counts; drought has its own payload.
    pub fn max_score(&self) -> Option<u32> {
        self.0
            .iter()
            .filter(|(stress_type, _)| **stress_type != StressType::Drought)
            .map(|(_, score)| *score)
            .max()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(StressType, u32)> for StressTypeScore {
    fn from_iter<T: IntoIterator<Item = (StressType, u32)>>(iter: T) -> Self {
        StressTypeScore(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for StressTypeScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ScoreVisitor;

        impl<'de> Visitor<'de> for ScoreVisitor {
            type Value = StressTypeScore;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of stress type names to non-negative integer scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut scores = StressTypeScore::new();
                while let Some((stress_type, score)) = map.next_entry::<StressType, u32>()? {
                    // Drought is reported by its own endpoint.
                    if stress_type == StressType::Drought {
                        return Err(de::Error::custom(
                            "drought is not a temperature stress type",
                        ));
                    }
                    if scores.insert(stress_type, score).is_some() {
                        return Err(de::Error::custom(format!(
                            "duplicate stress type `{stress_type}`"
                        )));
                    }
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoreVisitor)
    }
}

/// Body of `GET /api/predict/temp_stress/{crop}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TempStressPayload {
    weeks: Vec<(WeekKey, StressTypeScore)>,
}

impl TempStressPayload {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let body = std::fs::read_to_string(path)?;
        Self::from_json(&body)
    }

    pub fn get(&self, week: &WeekKey) -> Option<&StressTypeScore> {
        self.weeks
            .iter()
            .find(|(key, _)| key == week)
            .map(|(_, scores)| scores)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WeekKey, &StressTypeScore)> {
        self.weeks.iter().map(|(week, scores)| (week, scores))
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

impl FromIterator<(WeekKey, StressTypeScore)> for TempStressPayload {
    fn from_iter<T: IntoIterator<Item = (WeekKey, StressTypeScore)>>(iter: T) -> Self {
        TempStressPayload {
            weeks: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for TempStressPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct WeeksVisitor;

        impl<'de> Visitor<'de> for WeeksVisitor {
            type Value = TempStressPayload;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of week keys to stress type scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut seen: HashSet<WeekKey> = HashSet::new();
                let mut weeks = Vec::new();
                while let Some((week, scores)) = map.next_entry::<WeekKey, StressTypeScore>()? {
                    if !seen.insert(week.clone()) {
                        return Err(de::Error::custom(format!("duplicate week `{week}`")));
                    }
                    weeks.push((week, scores));
                }
                Ok(TempStressPayload { weeks })
            }
        }

        deserializer.deserialize_map(WeeksVisitor)
    }
}

/// Body of `GET /api/predict/drought_stress`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DroughtPayload(HashMap<WeekKey, u32>);

impl DroughtPayload {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let body = std::fs::read_to_string(path)?;
        Self::from_json(&body)
    }

    /// Drought score for `week`; weeks the service did not report score 0.
    pub fn score(&self, week: &WeekKey) -> u32 {
        self.0.get(week).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(WeekKey, u32)> for DroughtPayload {
    fn from_iter<T: IntoIterator<Item = (WeekKey, u32)>>(iter: T) -> Self {
        DroughtPayload(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for DroughtPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DroughtVisitor;

        impl<'de> Visitor<'de> for DroughtVisitor {
            type Value = DroughtPayload;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of week keys to non-negative integer scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut scores = HashMap::new();
                while let Some((week, score)) = map.next_entry::<WeekKey, u32>()? {
                    if scores.contains_key(&week) {
                        return Err(de::Error::custom(format!("duplicate week `{week}`")));
                    }
                    scores.insert(week, score);
                }
                Ok(DroughtPayload(scores))
            }
        }

        deserializer.deserialize_map(DroughtVisitor)
    }
}
