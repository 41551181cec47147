pub mod de;
pub mod job;
pub mod profile;

pub use job::{JobAnalysis, Requirement, RequirementCategory, RequirementType};
pub use profile::{
    CandidateProfile, EducationEntry, PersonalInfo, ProjectEntry, RoleEnd, SkillEntry,
    WorkExperience,
};
