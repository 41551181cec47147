use serde::{Deserialize, Serialize};

use crate::models::de::{lenient_string, unit_interval};

/// Structured view of a job description, produced by the analyzer or the frontend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysis {
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub position: String,
    pub requirements: Vec<Requirement>,
    pub skills: Vec<String>,
    pub keywords: Vec<String>,
    /// Free-form seniority label, e.g. "senior". Matched case-insensitively.
    #[serde(default, deserialize_with = "lenient_string")]
    pub experience_level: String,
}

/// A single line item parsed out of a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    #[serde(default)]
    pub category: RequirementCategory,
    #[serde(rename = "type", default)]
    pub kind: RequirementType,
    #[serde(default = "full_importance", deserialize_with = "unit_interval")]
    pub importance: f64,
}

fn full_importance() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementCategory {
    #[default]
    Required,
    Preferred,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementType {
    Education,
    Experience,
    #[default]
    Skill,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requirement_wire_format() {
        let req: Requirement = serde_json::from_value(json!({
            "text": "Bachelor's degree in Computer Science",
            "category": "preferred",
            "type": "education",
            "importance": 0.6
        }))
        .unwrap();
        assert_eq!(req.category, RequirementCategory::Preferred);
        assert_eq!(req.kind, RequirementType::Education);
        assert!((req.importance - 0.6).abs() < f64::EPSILON);

        let back = serde_json::to_value(&req).unwrap();
        assert_eq!(back["type"], "education");
        assert_eq!(back["category"], "preferred");
    }

    #[test]
    fn test_requirement_defaults() {
        let req: Requirement = serde_json::from_value(json!({"text": "Rust"})).unwrap();
        assert_eq!(req.category, RequirementCategory::Required);
        assert_eq!(req.kind, RequirementType::Skill);
        assert_eq!(req.importance, 1.0);
    }

    #[test]
    fn test_job_analysis_requires_keyword_arrays() {
        let result = serde_json::from_value::<JobAnalysis>(json!({
            "position": "Engineer",
            "requirements": [],
            "skills": ["Rust"],
            "keywords": null
        }));
        assert!(result.is_err());
    }
}
