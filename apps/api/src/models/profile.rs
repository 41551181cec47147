use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::models::de::{lenient_date, lenient_f64, lenient_f64_or_zero, lenient_string, parse_date};

/// Snapshot of a candidate's profile as the frontend submits it.
///
/// Collections are required on the wire. Scalars are lenient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
    /// Expected most-recent-first. The experience scorer reads the first entry
    /// as the latest role.
    pub experience: Vec<WorkExperience>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillEntry>,
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub position: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: RoleEnd,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
}

impl WorkExperience {
    /// Only a missing or `null` end date marks a role as current.
    pub fn is_current(&self) -> bool {
        matches!(self.end_date, RoleEnd::Ongoing)
    }
}

/// End of a role as submitted.
///
/// `null` or absent means ongoing. A value that is present but not a readable
/// date is kept verbatim and never treated as ongoing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoleEnd {
    #[default]
    Ongoing,
    On(NaiveDate),
    Unreadable(String),
}

impl RoleEnd {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            RoleEnd::On(date) => Some(*date),
            _ => None,
        }
    }
}

impl From<Option<NaiveDate>> for RoleEnd {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(RoleEnd::Ongoing, RoleEnd::On)
    }
}

impl<'de> Deserialize<'de> for RoleEnd {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => RoleEnd::Ongoing,
            Value::String(raw) => parse_date(&raw).map_or(RoleEnd::Unreadable(raw), RoleEnd::On),
            other => RoleEnd::Unreadable(other.to_string()),
        })
    }
}

impl Serialize for RoleEnd {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RoleEnd::Ongoing => serializer.serialize_none(),
            RoleEnd::On(date) => date.serialize(serializer),
            RoleEnd::Unreadable(raw) => serializer.serialize_str(raw),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub institution: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub field_of_study: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gpa: Option<f64>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub proficiency: String,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub years_of_experience: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    pub technologies: Vec<String>,
    pub highlights: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub github_url: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
}
