//! Mock study services module
//! 
//! This module contains the canned generators behind the study plan,
//! resource search and chat endpoints.

pub mod assistant;
pub mod study;

// Re-export main functions
pub use assistant::reply;
pub use study::{find_resources, generate_plan, StudyPlan, StudyResource};
