//! Backend endpoints the relay knows how to forward to.

use std::fmt;
use std::str::FromStr;

use crate::fallback::DomainKind;

/// Generation endpoints (`POST /api/{name}` on the backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationEndpoint {
    Lesson,
    Rubric,
    Activities,
    UnitPlan,
}

impl GenerationEndpoint {
    pub const ALL: [GenerationEndpoint; 4] = [
        GenerationEndpoint::Lesson,
        GenerationEndpoint::Rubric,
        GenerationEndpoint::Activities,
        GenerationEndpoint::UnitPlan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GenerationEndpoint::Lesson => "generate-lesson",
            GenerationEndpoint::Rubric => "generate-rubric",
            GenerationEndpoint::Activities => "generate-activities",
            GenerationEndpoint::UnitPlan => "generate-unit-plan",
        }
    }

    /// Older field name some backend versions use instead of `data`.
    pub fn legacy_alias(self) -> Option<&'static str> {
        match self {
            GenerationEndpoint::Activities => Some("activities"),
            _ => None,
        }
    }

    pub fn backend_path(self) -> String {
        format!("/api/{}", self.as_str())
    }
}

impl fmt::Display for GenerationEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown endpoint '{0}'")]
pub struct UnknownEndpoint(pub String);

impl FromStr for GenerationEndpoint {
    type Err = UnknownEndpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim_start_matches('/');
        GenerationEndpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.as_str() == name)
            .ok_or_else(|| UnknownEndpoint(s.to_string()))
    }
}

/// Read-only collections (`GET /api/{name}` on the backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadResource {
    Activities,
    Rubrics,
    LessonPlans,
}

impl ReadResource {
    pub fn as_str(self) -> &'static str {
        match self {
            ReadResource::Activities => "activities",
            ReadResource::Rubrics => "rubrics",
            ReadResource::LessonPlans => "lesson-plans",
        }
    }

    pub fn legacy_alias(self) -> &'static str {
        match self {
            ReadResource::Activities => "activities",
            ReadResource::Rubrics => "rubrics",
            ReadResource::LessonPlans => "lesson_plans",
        }
    }

    pub fn fallback_kind(self) -> DomainKind {
        match self {
            ReadResource::Activities => DomainKind::Activities,
            ReadResource::Rubrics => DomainKind::Rubrics,
            ReadResource::LessonPlans => DomainKind::LessonPlans,
        }
    }

    pub fn backend_path(self) -> String {
        format!("/api/{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_names_round_trip() {
        for endpoint in GenerationEndpoint::ALL {
            assert_eq!(endpoint.as_str().parse::<GenerationEndpoint>(), Ok(endpoint));
        }
        assert_eq!("/generate-rubric".parse(), Ok(GenerationEndpoint::Rubric));
        assert!("generate-quiz".parse::<GenerationEndpoint>().is_err());
    }

    #[test]
    fn only_activities_has_a_legacy_alias() {
        assert_eq!(GenerationEndpoint::Activities.legacy_alias(), Some("activities"));
        assert_eq!(GenerationEndpoint::Lesson.legacy_alias(), None);
        assert_eq!(GenerationEndpoint::UnitPlan.backend_path(), "/api/generate-unit-plan");
    }
}
