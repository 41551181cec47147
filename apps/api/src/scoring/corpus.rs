use crate::models::CandidateProfile;

/// Flattens the searchable parts of a profile into one lower-cased string.
///
/// Order: summary, then per experience {position, description, achievements},
/// per skill {name}, per project {title, description, highlights}.
/// Empty fields still take a slot in the join, so two adjacent spaces can appear.
pub fn build_corpus(profile: &CandidateProfile) -> String {
    let mut parts: Vec<&str> = vec![profile.summary.as_str()];

    for exp in &profile.experience {
        parts.push(&exp.position);
        parts.push(&exp.description);
        parts.extend(exp.achievements.iter().map(String::as_str));
    }

    parts.extend(profile.skills.iter().map(|s| s.name.as_str()));

    for project in &profile.projects {
        parts.push(&project.title);
        parts.push(&project.description);
        parts.extend(project.highlights.iter().map(String::as_str));
    }

    parts.join(" ").to_lowercase()
}
