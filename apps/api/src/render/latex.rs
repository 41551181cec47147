use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{
    CandidateProfile, EducationEntry, ProjectEntry, RoleEnd, SkillEntry, WorkExperience,
};

const PREAMBLE: &str = r"\documentclass[11pt,letterpaper]{article}
\usepackage[margin=1in]{geometry}
\usepackage[hidelinks]{hyperref}
\usepackage{enumitem}
\setlist[itemize]{leftmargin=*,noitemsep,topsep=2pt}
\pagestyle{empty}
\setlength{\parindent}{0pt}
";

/// Escapes the LaTeX special characters `\ & % $ # _ { } ~ ^`.
pub fn escape_latex(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a complete `article` document for the profile.
/// Sections without content are left out.
pub fn render_resume_latex(profile: &CandidateProfile) -> String {
    let mut doc = String::from(PREAMBLE);
    doc.push_str("\n\\begin{document}\n\n");

    render_header(&mut doc, profile);

    if !profile.summary.trim().is_empty() {
        section(&mut doc, "Summary");
        doc.push_str(&escape_latex(profile.summary.trim()));
        doc.push_str("\n\n");
    }

    if !profile.experience.is_empty() {
        section(&mut doc, "Experience");
        for exp in &profile.experience {
            render_experience(&mut doc, exp);
        }
    }

    if !profile.education.is_empty() {
        section(&mut doc, "Education");
        for edu in &profile.education {
            render_education(&mut doc, edu);
        }
    }

    if !profile.skills.is_empty() {
        section(&mut doc, "Skills");
        render_skills(&mut doc, &profile.skills);
    }

    if !profile.projects.is_empty() {
        section(&mut doc, "Projects");
        for project in &profile.projects {
            render_project(&mut doc, project);
        }
    }

    doc.push_str("\\end{document}\n");
    doc
}

fn section(doc: &mut String, title: &str) {
    let _ = writeln!(doc, "\\section*{{{title}}}");
}

fn render_header(doc: &mut String, profile: &CandidateProfile) {
    let info = &profile.personal_info;
    if !info.name.trim().is_empty() {
        let _ = writeln!(
            doc,
            "\\begin{{center}}\n{{\\LARGE\\bfseries {}}}\n\\end{{center}}",
            escape_latex(info.name.trim())
        );
    }

    let contact: Vec<String> = [&info.email, &info.phone, &info.location]
        .into_iter()
        .map(|field| field.trim())
        .filter(|field| !field.is_empty())
        .map(escape_latex)
        .collect();
    if !contact.is_empty() {
        let _ = writeln!(
            doc,
            "\\begin{{center}}\n{}\n\\end{{center}}",
            contact.join(r" \textbar{} ")
        );
    }
    doc.push('\n');
}

fn render_experience(doc: &mut String, exp: &WorkExperience) {
    let _ = writeln!(
        doc,
        "\\textbf{{{}}} \\hfill {}\\\\\n\\textit{{{}}}\\\\",
        escape_latex(&exp.position),
        role_range(exp.start_date, &exp.end_date),
        escape_latex(&exp.company)
    );
    if !exp.description.trim().is_empty() {
        let _ = writeln!(doc, "{}", escape_latex(exp.description.trim()));
    }
    render_bullets(doc, &exp.achievements);
    doc.push('\n');
}

fn render_education(doc: &mut String, edu: &EducationEntry) {
    let degree = match (edu.degree.trim(), edu.field_of_study.trim()) {
        ("", field) => field.to_string(),
        (degree, "") => degree.to_string(),
        (degree, field) => format!("{degree} in {field}"),
    };
    let _ = writeln!(
        doc,
        "\\textbf{{{}}} \\hfill {}\\\\\n{}",
        escape_latex(&degree),
        date_range(edu.start_date, edu.end_date),
        escape_latex(&edu.institution)
    );
    if let Some(gpa) = edu.gpa {
        let _ = writeln!(doc, "\\\\GPA: {gpa:.2}");
    }
    render_bullets(doc, &edu.achievements);
    doc.push('\n');
}

/// One line per category, categories in first-seen order.
fn render_skills(doc: &mut String, skills: &[SkillEntry]) {
    let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
    for skill in skills {
        let category = match skill.category.trim() {
            "" => "Other",
            category => category,
        };
        let name = escape_latex(&skill.name);
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, names)) => names.push(name),
            None => groups.push((category, vec![name])),
        }
    }

    let lines: Vec<String> = groups
        .into_iter()
        .map(|(category, names)| {
            format!("\\textbf{{{}:}} {}", escape_latex(category), names.join(", "))
        })
        .collect();
    let _ = writeln!(doc, "{}\n", lines.join("\\\\\n"));
}

fn render_project(doc: &mut String, project: &ProjectEntry) {
    let link = [&project.url, &project.github_url]
        .into_iter()
        .map(|u| u.trim())
        .find(|u| !u.is_empty());
    let title = escape_latex(&project.title);
    let heading = match link {
        Some(url) => format!("\\href{{{}}}{{\\textbf{{{title}}}}}", escape_url(url)),
        None => format!("\\textbf{{{title}}}"),
    };

    let _ = write!(doc, "{heading}");
    if !project.technologies.is_empty() {
        let techs: Vec<String> = project.technologies.iter().map(|t| escape_latex(t)).collect();
        let _ = write!(doc, " \\textit{{({})}}", techs.join(", "));
    }
    if project.start_date.is_some() || project.end_date.is_some() {
        let _ = write!(doc, " \\hfill {}", date_range(project.start_date, project.end_date));
    }
    doc.push_str("\\\\\n");
    if !project.description.trim().is_empty() {
        let _ = writeln!(doc, "{}", escape_latex(project.description.trim()));
    }
    render_bullets(doc, &project.highlights);
    doc.push('\n');
}

fn render_bullets(doc: &mut String, bullets: &[String]) {
    let items: Vec<&String> = bullets.iter().filter(|b| !b.trim().is_empty()).collect();
    if items.is_empty() {
        return;
    }
    doc.push_str("\\begin{itemize}\n");
    for item in items {
        let _ = writeln!(doc, "  \\item {}", escape_latex(item.trim()));
    }
    doc.push_str("\\end{itemize}\n");
}

/// URLs keep their slashes and colons; only characters that break `\href` are escaped.
fn escape_url(url: &str) -> String {
    url.replace('\\', "")
        .replace('%', r"\%")
        .replace('#', r"\#")
        .replace('{', "")
        .replace('}', "")
}

/// Unreadable end dates are printed as submitted.
fn role_range(start: Option<NaiveDate>, end: &RoleEnd) -> String {
    match end {
        RoleEnd::Unreadable(raw) => match start {
            Some(s) => format!("{} -- {}", s.format("%b %Y"), escape_latex(raw.trim())),
            None => escape_latex(raw.trim()),
        },
        end => date_range(start, end.date()),
    }
}

fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let fmt = |d: NaiveDate| d.format("%b %Y").to_string();
    match (start, end) {
        (Some(s), Some(e)) => format!("{} -- {}", fmt(s), fmt(e)),
        (Some(s), None) => format!("{} -- Present", fmt(s)),
        (None, Some(e)) => fmt(e),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{date, sample_profile};
    use crate::models::PersonalInfo;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_latex("R&D 100% $5 #1 a_b"), r"R\&D 100\% \$5 \#1 a\_b");
        assert_eq!(escape_latex("{x}"), r"\{x\}");
        assert_eq!(
            escape_latex(r"~^\"),
            r"\textasciitilde{}\textasciicircum{}\textbackslash{}"
        );
        assert_eq!(escape_latex("plain text"), "plain text");
    }

    #[test]
    fn test_full_document_structure() {
        let latex = render_resume_latex(&sample_profile());
        assert!(latex.starts_with(r"\documentclass"));
        assert!(latex.trim_end().ends_with(r"\end{document}"));
        for heading in ["Summary", "Experience", "Education", "Skills", "Projects"] {
            assert!(latex.contains(&format!("\\section*{{{heading}}}")), "missing {heading}");
        }
        assert!(latex.contains("Jane Doe"));
        assert!(latex.contains(r"jane@example.com \textbar{} +1 555 0100 \textbar{} Berlin"));
    }

    #[test]
    fn test_experience_dates_and_bullets() {
        let latex = render_resume_latex(&sample_profile());
        assert!(latex.contains("Jan 2021 -- Present"));
        assert!(latex.contains("Jan 2019 -- Dec 2020"));
        assert!(latex.contains(r"\item Improved application performance by 40\% through query optimization"));
        assert!(latex.contains(r"\textit{TechCorp}"));
    }

    #[test]
    fn test_skills_grouped_by_category_in_first_seen_order() {
        let latex = render_resume_latex(&sample_profile());
        assert!(latex.contains(r"\textbf{Language:} JavaScript, TypeScript, Python"));
        let language = latex.find(r"\textbf{Language:}").unwrap();
        let cloud = latex.find(r"\textbf{Cloud:}").unwrap();
        assert!(language < cloud);
    }

    #[test]
    fn test_education_and_project_links() {
        let latex = render_resume_latex(&sample_profile());
        assert!(latex.contains(r"\textbf{Bachelor of Science in Computer Science}"));
        assert!(latex.contains("GPA: 3.70"));
        assert!(latex.contains(
            r"\href{https://github.com/janedoe/task-manager}{\textbf{Task Manager}}"
        ));
        assert!(latex.contains("Mar 2022 -- Sep 2022"));
    }

    #[test]
    fn test_unreadable_end_date_printed_as_submitted() {
        let exp = WorkExperience {
            start_date: Some(date(2019, 5, 1)),
            end_date: RoleEnd::Unreadable("Summer_2020".to_string()),
            ..Default::default()
        };
        assert_eq!(role_range(exp.start_date, &exp.end_date), r"May 2019 -- Summer\_2020");
        assert_eq!(role_range(exp.start_date, &RoleEnd::Ongoing), "May 2019 -- Present");
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let profile = CandidateProfile {
            personal_info: PersonalInfo {
                name: "Solo Dev".to_string(),
                ..Default::default()
            },
            experience: vec![WorkExperience {
                position: "C# & .NET Developer".to_string(),
                company: "Acme_Inc".to_string(),
                start_date: Some(date(2020, 2, 1)),
                ..Default::default()
            }],
            ..Default::default()
        };
        let latex = render_resume_latex(&profile);
        assert!(latex.contains(r"\section*{Experience}"));
        assert!(!latex.contains(r"\section*{Summary}"));
        assert!(!latex.contains(r"\section*{Skills}"));
        assert!(!latex.contains(r"\section*{Projects}"));
        assert!(!latex.contains(r"\section*{Education}"));
        assert!(!latex.contains(r"\begin{itemize}"));
        assert!(latex.contains(r"C\# \& .NET Developer"));
        assert!(latex.contains(r"Acme\_Inc"));
        assert!(latex.contains("Feb 2020 -- Present"));
    }
}
