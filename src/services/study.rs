//! Mock study plan and resource generators

use serde::{Deserialize, Serialize};

pub const DEFAULT_PLAN_DURATION: &str = "1 hour";

/// One block of a study plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSection {
    pub topic: String,
    pub duration: String,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub subject: String,
    pub duration: String,
    pub sections: Vec<PlanSection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Article,
    Exercises,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyResource {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub url: String,
}

fn section(topic: String, duration: &str, activities: [&str; 2]) -> PlanSection {
    PlanSection {
        topic,
        duration: duration.to_string(),
        activities: activities.iter().map(|a| a.to_string()).collect(),
    }
}

/// Build a three-part study plan for a subject
pub fn generate_plan(subject: &str, duration: Option<&str>) -> StudyPlan {
    let duration = duration
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_PLAN_DURATION);

    StudyPlan {
        subject: subject.to_string(),
        duration: duration.to_string(),
        sections: vec![
            section(
                format!("Introduction to {}", subject),
                "15 minutes",
                ["Review key concepts", "Read introductory material"],
            ),
            section(
                format!("Core principles of {}", subject),
                "30 minutes",
                ["Practice problems", "Note important formulas/concepts"],
            ),
            section(
                "Review and synthesis".to_string(),
                "15 minutes",
                ["Summarize what you learned", "Create connections with previous knowledge"],
            ),
        ],
    }
}

/// URL path fragment for a subject: lowercase, spaces become dashes
pub fn subject_slug(subject: &str) -> String {
    subject.to_lowercase().replace(' ', "-")
}

/// Recommend an article, a problem set and a video for a subject
pub fn find_resources(subject: &str) -> Vec<StudyResource> {
    let slug = subject_slug(subject);

    vec![
        StudyResource {
            title: format!("Introduction to {}", subject),
            kind: ResourceKind::Article,
            url: format!("https://example.com/{}-intro", slug),
        },
        StudyResource {
            title: format!("{} Practice Problems", subject),
            kind: ResourceKind::Exercises,
            url: format!("https://example.com/{}-practice", slug),
        },
        StudyResource {
            title: format!("Advanced {} Concepts", subject),
            kind: ResourceKind::Video,
            url: format!("https://example.com/{}-advanced", slug),
        },
    ]
}
