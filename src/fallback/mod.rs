//! Fallback data for backend outages.
//!
//! Read routes answer with these samples when the backend cannot be reached,
//! so the UI keeps working. The tables are compiled in and never change.
//! `mock` builds the canned output of the local generation endpoints.

pub mod mock;
mod samples;

pub use mock::{mock_lesson, MissingFields, MockRequest};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

/// Kinds of entity that have a fallback table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    Activities,
    GeneratedActivities,
    Rubrics,
    LessonPlans,
}

impl DomainKind {
    pub const ALL: [DomainKind; 4] = [
        DomainKind::Activities,
        DomainKind::GeneratedActivities,
        DomainKind::Rubrics,
        DomainKind::LessonPlans,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DomainKind::Activities => "activities",
            DomainKind::GeneratedActivities => "generated-activities",
            DomainKind::Rubrics => "rubrics",
            DomainKind::LessonPlans => "lesson-plans",
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no fallback table for '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for DomainKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DomainKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Sample entities for `kind`. Pure: the same kind always yields the same data.
pub fn fallback_for(kind: DomainKind) -> Vec<Value> {
    match kind {
        DomainKind::Activities => to_values(samples::ACTIVITIES),
        DomainKind::GeneratedActivities => to_values(samples::GENERATED_ACTIVITIES),
        DomainKind::Rubrics => to_values(samples::RUBRICS),
        DomainKind::LessonPlans => to_values(samples::LESSON_PLANS),
    }
}

fn to_values<T: Serialize>(items: &[T]) -> Vec<Value> {
    // Only &'static str, integers and nested structs: serialization cannot fail.
    items
        .iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_deterministic() {
        for kind in DomainKind::ALL {
            assert_eq!(fallback_for(kind), fallback_for(kind), "{}", kind);
        }
    }

    #[test]
    fn every_table_is_populated_with_ids() {
        for kind in DomainKind::ALL {
            let entries = fallback_for(kind);
            assert!(!entries.is_empty(), "{}", kind);
            assert!(entries.iter().all(|e| e["id"].is_string()), "{}", kind);
        }
    }

    #[test]
    fn activities_have_expected_shape() {
        let activities = fallback_for(DomainKind::Activities);
        assert_eq!(activities.len(), 3);
        assert_eq!(activities[0]["id"], "activity-1");
        assert!(activities[0]["content"]["objectives"].is_string());
        assert_eq!(activities[1]["duration"], 30);
    }

    #[test]
    fn rubric_levels_are_nested() {
        let rubrics = fallback_for(DomainKind::Rubrics);
        let levels = rubrics[0]["criteria"][0]["levels"].as_array().unwrap();
        assert_eq!(levels.len(), 4);
        assert_eq!(levels[0]["points"], 10);
    }

    #[test]
    fn kinds_parse_from_names() {
        assert_eq!("rubrics".parse::<DomainKind>(), Ok(DomainKind::Rubrics));
        assert_eq!("lesson-plans".parse::<DomainKind>(), Ok(DomainKind::LessonPlans));
        assert!("quizzes".parse::<DomainKind>().is_err());
    }
}
