//! Compiled-in sample entities.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ActivityContent {
    pub description: &'static str,
    pub objectives: &'static str,
    pub materials: &'static str,
    pub instructions: &'static str,
    pub assessment: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SampleActivity {
    pub id: &'static str,
    pub title: &'static str,
    pub subject: &'static str,
    pub grade: &'static str,
    pub duration: u32,
    pub created_at: &'static str,
    pub content: ActivityContent,
}

#[derive(Debug, Serialize)]
pub struct RubricLevel {
    pub name: &'static str,
    pub description: &'static str,
    pub points: u32,
}

#[derive(Debug, Serialize)]
pub struct RubricCriterion {
    pub name: &'static str,
    pub levels: &'static [RubricLevel],
}

#[derive(Debug, Serialize)]
pub struct SampleRubric {
    pub id: &'static str,
    pub title: &'static str,
    pub subject: &'static str,
    pub grade: &'static str,
    pub created_at: &'static str,
    pub criteria: &'static [RubricCriterion],
}

#[derive(Debug, Serialize)]
pub struct LessonContent {
    pub introduction: &'static str,
    pub main_content: &'static str,
    pub activities: &'static str,
    pub assessment: &'static str,
    pub closure: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SampleLessonPlan {
    pub id: &'static str,
    pub topic: &'static str,
    pub subject: &'static str,
    pub grade: &'static str,
    pub duration: u32,
    pub objectives: &'static str,
    pub created_at: &'static str,
    pub content: LessonContent,
}

pub const ACTIVITIES: &[SampleActivity] = &[
    SampleActivity {
        id: "activity-1",
        title: "Group Problem Solving",
        subject: "Math",
        grade: "8th Grade",
        duration: 20,
        created_at: "2023-03-30T14:30:00Z",
        content: ActivityContent {
            description: "Small groups work through a set of linear equations together.",
            objectives: "Practice collaborative reasoning and reinforce solving for one variable.",
            materials: "Equation worksheet, calculators",
            instructions: "Form groups of three or four; each group solves every problem and records its reasoning.",
            assessment: "Each group presents one worked solution to the class.",
        },
    },
    SampleActivity {
        id: "activity-2",
        title: "Water Cycle Diagram",
        subject: "Science",
        grade: "5th Grade",
        duration: 30,
        created_at: "2023-03-29T10:15:00Z",
        content: ActivityContent {
            description: "Students draw and label the stages of the water cycle.",
            objectives: "Describe evaporation, condensation, precipitation and collection.",
            materials: "Blank paper, colored pencils, reference chart",
            instructions: "Draw the full cycle and label every stage with a one-line explanation.",
            assessment: "Accuracy and completeness of the labels.",
        },
    },
    SampleActivity {
        id: "activity-3",
        title: "Sonnet Analysis Workshop",
        subject: "English",
        grade: "9th Grade",
        duration: 45,
        created_at: "2023-03-28T09:45:00Z",
        content: ActivityContent {
            description: "Groups analyze the structure and imagery of an assigned sonnet.",
            objectives: "Identify literary devices and explain their effect.",
            materials: "Printed sonnets, annotation guide",
            instructions: "Annotate the sonnet, then share findings with the class.",
            assessment: "Depth of analysis and clarity of the presentation.",
        },
    },
];

pub const GENERATED_ACTIVITIES: &[SampleActivity] = &[
    SampleActivity {
        id: "gen-activity-1",
        title: "Fractions With Manipulatives",
        subject: "Math",
        grade: "Primary",
        duration: 45,
        created_at: "2023-04-02T08:00:00Z",
        content: ActivityContent {
            description: "Students model fractions with concrete materials.",
            objectives: "Understand a fraction as part of a whole.",
            materials: "Fraction circles, pattern blocks, colored paper",
            instructions: "In pairs, build each fraction on the card and record the representation.",
            assessment: "Correct representations and a short spoken explanation.",
        },
    },
    SampleActivity {
        id: "gen-activity-2",
        title: "Fraction Word Problems",
        subject: "Math",
        grade: "Primary",
        duration: 30,
        created_at: "2023-04-02T08:05:00Z",
        content: ActivityContent {
            description: "Everyday problems that need fractions to solve.",
            objectives: "Apply fractions to real situations.",
            materials: "Worksheets, recipe cards",
            instructions: "Solve individually first, then compare answers in groups.",
            assessment: "Accuracy of calculations and explanation of the method.",
        },
    },
];

const FOUR_LEVELS_CONTENT: &[RubricLevel] = &[
    RubricLevel { name: "Excellent", description: "Thorough and insightful", points: 10 },
    RubricLevel { name: "Good", description: "Adequate with some insight", points: 8 },
    RubricLevel { name: "Satisfactory", description: "Basic with limited insight", points: 6 },
    RubricLevel { name: "Needs Improvement", description: "Minimal and lacking insight", points: 4 },
];

const FOUR_LEVELS_STRUCTURE: &[RubricLevel] = &[
    RubricLevel { name: "Excellent", description: "Clear, deliberate structure", points: 10 },
    RubricLevel { name: "Good", description: "Mostly organized", points: 8 },
    RubricLevel { name: "Satisfactory", description: "Several structural issues", points: 6 },
    RubricLevel { name: "Needs Improvement", description: "Little visible structure", points: 4 },
];

pub const RUBRICS: &[SampleRubric] = &[
    SampleRubric {
        id: "rub-1",
        title: "Essay Writing Rubric",
        subject: "English",
        grade: "10th Grade",
        created_at: "2023-03-29T14:30:00Z",
        criteria: &[
            RubricCriterion { name: "Content", levels: FOUR_LEVELS_CONTENT },
            RubricCriterion { name: "Organization", levels: FOUR_LEVELS_STRUCTURE },
        ],
    },
    SampleRubric {
        id: "rub-2",
        title: "Science Project Rubric",
        subject: "Science",
        grade: "8th Grade",
        created_at: "2023-03-28T10:15:00Z",
        criteria: &[
            RubricCriterion { name: "Research", levels: FOUR_LEVELS_CONTENT },
            RubricCriterion { name: "Presentation", levels: FOUR_LEVELS_STRUCTURE },
        ],
    },
];

pub const LESSON_PLANS: &[SampleLessonPlan] = &[
    SampleLessonPlan {
        id: "test-plan-1",
        topic: "Poetry Analysis",
        subject: "English",
        grade: "8th Grade",
        duration: 60,
        objectives: "Identify literary devices in poetry and analyze their effect.",
        created_at: "2023-03-30T14:30:00Z",
        content: LessonContent {
            introduction: "Read a short poem aloud and collect first impressions.",
            main_content: "Walk through metaphor, imagery and symbolism in the poem.",
            activities: "Groups find devices in a second poem.",
            assessment: "Short written analysis of one poem.",
            closure: "Discuss how the same skills apply to prose.",
        },
    },
    SampleLessonPlan {
        id: "test-plan-2",
        topic: "The Solar System",
        subject: "Science",
        grade: "5th Grade",
        duration: 45,
        objectives: "Name the planets in order and describe one feature of each.",
        created_at: "2023-03-29T10:15:00Z",
        content: LessonContent {
            introduction: "Short video on space exploration.",
            main_content: "Tour of the planets with visual aids.",
            activities: "Build a scale model along the classroom wall.",
            assessment: "Quiz on order and key facts.",
            closure: "Reflect on Earth's place in the system.",
        },
    },
    SampleLessonPlan {
        id: "test-plan-3",
        topic: "Algebra Basics",
        subject: "Mathematics",
        grade: "9th Grade",
        duration: 55,
        objectives: "Solve simple equations with one variable.",
        created_at: "2023-03-28T09:45:00Z",
        content: LessonContent {
            introduction: "Variables in everyday examples.",
            main_content: "Worked examples of solving for x.",
            activities: "Worksheet with graduated difficulty.",
            assessment: "Exit ticket with three equations.",
            closure: "Where algebra shows up in careers.",
        },
    },
];
