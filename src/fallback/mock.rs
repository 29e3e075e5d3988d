//! Canned generation output for the local mock endpoints.

use serde_json::{json, Value};

const DEFAULT_DURATION_MINUTES: u64 = 60;

/// Fields every generation request must carry.
const REQUIRED: [&str; 3] = ["subject", "grade", "topic"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields: {}", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

/// The parts of a generation request the mock endpoints look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    pub subject: String,
    pub grade: String,
    pub topic: String,
    pub duration: u64,
    pub competency: Option<String>,
}

impl MockRequest {
    /// Strings and numbers count as present; empty strings do not.
    pub fn from_json(request: &Value) -> Result<Self, MissingFields> {
        let missing: Vec<&'static str> = REQUIRED
            .into_iter()
            .filter(|name| text_field(request, name).is_none())
            .collect();

        match (
            text_field(request, "subject"),
            text_field(request, "grade"),
            text_field(request, "topic"),
        ) {
            (Some(subject), Some(grade), Some(topic)) => Ok(Self {
                subject,
                grade,
                topic,
                duration: request
                    .get("duration")
                    .and_then(Value::as_u64)
                    .unwrap_or(DEFAULT_DURATION_MINUTES),
                competency: text_field(request, "competency"),
            }),
            _ => Err(MissingFields(missing)),
        }
    }
}

fn text_field(request: &Value, name: &str) -> Option<String> {
    match request.get(name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A four-phase lesson plan shaped after the request.
pub fn mock_lesson(request: &MockRequest) -> Value {
    let topic = &request.topic;
    json!({
        "title": format!("Introduction to {} - {} ({})", topic, request.subject, request.grade),
        "subject": request.subject,
        "grade": request.grade,
        "topic": topic,
        "duration": request.duration,
        "competency": request.competency.as_deref().unwrap_or("General competency"),
        "objectives": [
            format!("Students understand the key ideas behind {}", topic),
            "Students apply what they learned in guided practice",
            "Students build critical thinking through discussion",
        ],
        "materials": ["Textbook", "Worksheets", "Manipulatives", "Interactive digital resources"],
        "activities": [
            {
                "name": "Opening",
                "duration": "10 minutes",
                "description": format!("Warm-up: ask what students already know about {} and record their answers.", topic),
            },
            {
                "name": "Development",
                "duration": "25 minutes",
                "description": "Present the key concepts with visual aids and worked examples on the board.",
            },
            {
                "name": "Practice",
                "duration": "15 minutes",
                "description": "Pairs solve practice problems while the teacher circulates.",
            },
            {
                "name": "Closing",
                "duration": "10 minutes",
                "description": "Summarize the key points and assign reinforcing homework.",
            },
        ],
        "assessment": {
            "method": "Formative assessment",
            "description": "Exit ticket with three to five comprehension questions.",
        },
        "differentiation": {
            "advanced": "Offer harder problems to students who finish early.",
            "support": "Provide extra scaffolding for students who need it.",
        },
    })
}
