//! Parsed resume record, its extractor, and the review-step editing rules.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{Rejection, StepResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub hard_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub awards: Vec<String>,
}

/// Source of the structured record produced by "analysis".
pub trait ResumeExtractor: fmt::Debug {
    fn extract(&self) -> ParsedResume;
}

/// Returns the same demonstration record every time.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedExtractor;

impl ResumeExtractor for CannedExtractor {
    fn extract(&self) -> ParsedResume {
        let strings = |items: &[&str]| items.iter().map(ToString::to_string).collect::<Vec<_>>();
        ParsedResume {
            education: vec![EducationEntry {
                id: "e1".into(),
                degree: "BSc".into(),
                field: "Computer Science".into(),
                institution: "University of London".into(),
                year: "2019".into(),
            }],
            experience: vec![
                ExperienceEntry {
                    id: "x1".into(),
                    title: "Software Engineer".into(),
                    company: "TechCorp".into(),
                    duration: "2019–2022".into(),
                    responsibilities: strings(&[
                        "Built REST APIs",
                        "Led sprint planning",
                        "Mentored junior developers",
                    ]),
                },
                ExperienceEntry {
                    id: "x2".into(),
                    title: "Senior Developer".into(),
                    company: "StartupXYZ".into(),
                    duration: "2022–Present".into(),
                    responsibilities: strings(&[
                        "Architecture design",
                        "Team leadership",
                        "CI/CD pipeline management",
                    ]),
                },
            ],
            hard_skills: strings(&[
                "JavaScript",
                "TypeScript",
                "React",
                "Node.js",
                "PostgreSQL",
                "AWS",
            ]),
            soft_skills: strings(&["Communication", "Leadership", "Problem solving", "Teamwork"]),
            projects: vec![ProjectEntry {
                id: "p1".into(),
                name: "E-commerce Platform".into(),
                description: "Full-stack marketplace with payments".into(),
            }],
            awards: strings(&["AWS Certified Solutions Architect", "Employee of the Year 2021"]),
        }
    }
}

/// Sections with per-entry editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySection {
    Education,
    Experience,
    Projects,
}

impl EntrySection {
    pub const ALL: [Self; 3] = [Self::Education, Self::Experience, Self::Projects];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Experience => "Experience",
            Self::Projects => "Projects",
        }
    }
}

/// Free-form chip lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagSection {
    HardSkills,
    SoftSkills,
    Awards,
}

/// A single field of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum EntryField {
    Degree(String),
    Field(String),
    Institution(String),
    Year(String),
    Title(String),
    Company(String),
    Duration(String),
    Responsibilities(Vec<String>),
    Name(String),
    Description(String),
}

impl EntryField {
    const fn name(&self) -> &'static str {
        match self {
            Self::Degree(_) => "degree",
            Self::Field(_) => "field",
            Self::Institution(_) => "institution",
            Self::Year(_) => "year",
            Self::Title(_) => "title",
            Self::Company(_) => "company",
            Self::Duration(_) => "duration",
            Self::Responsibilities(_) => "responsibilities",
            Self::Name(_) => "name",
            Self::Description(_) => "description",
        }
    }
}

/// Hands out `entry-{n}` ids that do not collide with existing ones.
#[derive(Debug, Clone, Default)]
pub struct EntryIds {
    counter: u64,
}

impl EntryIds {
    pub fn allocate(&mut self, taken: &HashSet<String>) -> String {
        loop {
            self.counter += 1;
            let candidate = format!("entry-{}", self.counter);
            if !taken.contains(&candidate) {
                return candidate;
            }
        }
    }
}

impl ParsedResume {
    fn all_ids(&self) -> HashSet<String> {
        self.education
            .iter()
            .map(|e| e.id.clone())
            .chain(self.experience.iter().map(|e| e.id.clone()))
            .chain(self.projects.iter().map(|e| e.id.clone()))
            .filter(|id| !id.is_empty())
            .collect()
    }

    /// Give every entry a unique id, replacing blank or duplicated ones.
    pub fn assign_ids(&mut self, ids: &mut EntryIds) {
        let mut seen = HashSet::new();
        let mut pending: Vec<&mut String> = Vec::new();
        let entries = self
            .education
            .iter_mut()
            .map(|e| &mut e.id)
            .chain(self.experience.iter_mut().map(|e| &mut e.id))
            .chain(self.projects.iter_mut().map(|e| &mut e.id));
        for id in entries {
            if id.is_empty() || !seen.insert(id.clone()) {
                pending.push(id);
            }
        }
        for id in pending {
            let fresh = ids.allocate(&seen);
            seen.insert(fresh.clone());
            *id = fresh;
        }
    }

    #[must_use]
    pub fn tags(&self, section: TagSection) -> &[String] {
        match section {
            TagSection::HardSkills => &self.hard_skills,
            TagSection::SoftSkills => &self.soft_skills,
            TagSection::Awards => &self.awards,
        }
    }

    fn tags_mut(&mut self, section: TagSection) -> &mut Vec<String> {
        match section {
            TagSection::HardSkills => &mut self.hard_skills,
            TagSection::SoftSkills => &mut self.soft_skills,
            TagSection::Awards => &mut self.awards,
        }
    }

    /// Trimmed, non-empty, not already present. Returns whether it was added.
    pub fn add_tag(&mut self, section: TagSection, text: &str) -> bool {
        let trimmed = text.trim();
        let tags = self.tags_mut(section);
        if trimmed.is_empty() || tags.iter().any(|t| t == trimmed) {
            return false;
        }
        tags.push(trimmed.to_string());
        true
    }

    pub fn remove_tag(&mut self, section: TagSection, text: &str) -> bool {
        let tags = self.tags_mut(section);
        let before = tags.len();
        tags.retain(|t| t != text);
        tags.len() != before
    }

    #[must_use]
    pub fn entry_count(&self, section: EntrySection) -> usize {
        match section {
            EntrySection::Education => self.education.len(),
            EntrySection::Experience => self.experience.len(),
            EntrySection::Projects => self.projects.len(),
        }
    }

    /// Append a blank entry and return its id.
    pub fn add_entry(&mut self, section: EntrySection, ids: &mut EntryIds) -> String {
        let id = ids.allocate(&self.all_ids());
        match section {
            EntrySection::Education => self.education.push(EducationEntry {
                id: id.clone(),
                ..EducationEntry::default()
            }),
            EntrySection::Experience => self.experience.push(ExperienceEntry {
                id: id.clone(),
                ..ExperienceEntry::default()
            }),
            EntrySection::Projects => self.projects.push(ProjectEntry {
                id: id.clone(),
                ..ProjectEntry::default()
            }),
        }
        id
    }

    /// # Errors
    ///
    /// Rejected when no entry in `section` has `id`.
    pub fn delete_entry(&mut self, section: EntrySection, id: &str) -> StepResult {
        let before = self.entry_count(section);
        match section {
            EntrySection::Education => self.education.retain(|e| e.id != id),
            EntrySection::Experience => self.experience.retain(|e| e.id != id),
            EntrySection::Projects => self.projects.retain(|e| e.id != id),
        }
        if self.entry_count(section) == before {
            Err(missing_entry(section, id))
        } else {
            Ok(())
        }
    }

    /// # Errors
    ///
    /// Rejected for unknown ids or a field the section does not have.
    pub fn update_entry(
        &mut self,
        section: EntrySection,
        id: &str,
        field: EntryField,
    ) -> StepResult {
        let mismatch = |field: &EntryField| {
            Rejection::new(format!(
                "{} entries have no `{}` field",
                section.title(),
                field.name()
            ))
        };
        match section {
            EntrySection::Education => {
                let entry = self
                    .education
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or_else(|| missing_entry(section, id))?;
                match field {
                    EntryField::Degree(v) => entry.degree = v,
                    EntryField::Field(v) => entry.field = v,
                    EntryField::Institution(v) => entry.institution = v,
                    EntryField::Year(v) => entry.year = v,
                    other => return Err(mismatch(&other)),
                }
            }
            EntrySection::Experience => {
                let entry = self
                    .experience
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or_else(|| missing_entry(section, id))?;
                match field {
                    EntryField::Title(v) => entry.title = v,
                    EntryField::Company(v) => entry.company = v,
                    EntryField::Duration(v) => entry.duration = v,
                    EntryField::Responsibilities(items) => {
                        entry.responsibilities = items
                            .into_iter()
                            .map(|item| item.trim().to_string())
                            .filter(|item| !item.is_empty())
                            .collect();
                    }
                    other => return Err(mismatch(&other)),
                }
            }
            EntrySection::Projects => {
                let entry = self
                    .projects
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or_else(|| missing_entry(section, id))?;
                match field {
                    EntryField::Name(v) => entry.name = v,
                    EntryField::Description(v) => entry.description = v,
                    other => return Err(mismatch(&other)),
                }
            }
        }
        Ok(())
    }
}

fn missing_entry(section: EntrySection, id: &str) -> Rejection {
    Rejection::new(format!("no {} entry with id `{id}`", section.title()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_record_matches_demo_data() {
        let record = CannedExtractor.extract();
        assert_eq!(record.education[0].institution, "University of London");
        assert_eq!(record.experience.len(), 2);
        assert_eq!(record.experience[1].duration, "2022–Present");
        assert_eq!(record.hard_skills.len(), 6);
        assert_eq!(record.awards[1], "Employee of the Year 2021");
    }

    #[test]
    fn camel_case_wire_format() {
        let json = serde_json::to_value(CannedExtractor.extract()).unwrap();
        assert!(json.get("hardSkills").is_some());
        assert!(json.get("softSkills").is_some());
        assert!(json.get("hard_skills").is_none());
    }

    #[test]
    fn assign_ids_repairs_blank_and_duplicate_ids() {
        let mut record = CannedExtractor.extract();
        record.projects[0].id = "x1".into();
        record.education.push(EducationEntry::default());
        let mut ids = EntryIds::default();
        record.assign_ids(&mut ids);

        let all = record.all_ids();
        assert_eq!(all.len(), 5);
        assert_eq!(record.education[1].id, "entry-1");
        assert_eq!(record.projects[0].id, "entry-2");
        assert_eq!(record.experience[0].id, "x1");
    }

    #[test]
    fn allocation_skips_existing_ids() {
        let taken: HashSet<String> = ["entry-1".to_string(), "entry-2".to_string()].into();
        let mut ids = EntryIds::default();
        assert_eq!(ids.allocate(&taken), "entry-3");
    }

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let mut record = ParsedResume::default();
        assert!(record.add_tag(TagSection::HardSkills, "  Rust "));
        assert!(!record.add_tag(TagSection::HardSkills, "Rust"));
        assert!(!record.add_tag(TagSection::HardSkills, "   "));
        assert_eq!(record.tags(TagSection::HardSkills), ["Rust"]);
        assert!(record.remove_tag(TagSection::HardSkills, "Rust"));
        assert!(!record.remove_tag(TagSection::HardSkills, "Rust"));
    }

    #[test]
    fn entry_updates_check_section_fields() {
        let mut record = CannedExtractor.extract();
        record
            .update_entry(
                EntrySection::Education,
                "e1",
                EntryField::Year("2020".into()),
            )
            .unwrap();
        assert_eq!(record.education[0].year, "2020");
        assert!(
            record
                .update_entry(EntrySection::Education, "e1", EntryField::Company("X".into()))
                .is_err()
        );
        assert!(
            record
                .update_entry(EntrySection::Projects, "zzz", EntryField::Name("X".into()))
                .is_err()
        );
        record
            .update_entry(
                EntrySection::Experience,
                "x1",
                EntryField::Responsibilities(vec![" Shipped ".into(), String::new()]),
            )
            .unwrap();
        assert_eq!(record.experience[0].responsibilities, ["Shipped"]);
    }

    #[test]
    fn add_and_delete_entries() {
        let mut record = CannedExtractor.extract();
        let mut ids = EntryIds::default();
        let id = record.add_entry(EntrySection::Projects, &mut ids);
        assert_eq!(id, "entry-1");
        assert_eq!(record.entry_count(EntrySection::Projects), 2);
        record.delete_entry(EntrySection::Projects, &id).unwrap();
        assert!(record.delete_entry(EntrySection::Projects, &id).is_err());
    }
}
