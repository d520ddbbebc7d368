//! Profile Data Model
//!
//! Core data structures for DigitalWorkforce worker profiles. Profiles live
//! in the marketplace's document store and arrive here as loosely-shaped
//! JSON: fields may be absent, empty, or (for skills and certifications)
//! either plain strings or structured objects. Everything deserializes
//! leniently - a field with an unexpected shape coerces to its default
//! instead of failing the whole document.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a field, falling back to `Default` when the stored shape
/// doesn't match the declared type (e.g. `skills` stored as a string).
fn or_default<'de, T, D>(de: D) -> Result<T, D::Error>
where
    T: Deserialize<'de> + Default,
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(de)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

// ============================================================
// PROFILE RECORD
// ============================================================

/// A worker profile document as stored by the marketplace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRecord {
    #[serde(deserialize_with = "or_default")]
    pub name: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub title: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub bio: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub location: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub availability: Option<Availability>,
    #[serde(deserialize_with = "or_default")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "or_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "or_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "or_default")]
    pub projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "or_default")]
    pub certifications: Vec<Certification>,
    #[serde(deserialize_with = "or_default")]
    pub achievements: Vec<String>,
    #[serde(deserialize_with = "or_default")]
    pub goals: Vec<String>,
    #[serde(deserialize_with = "or_default")]
    pub hobbies: Vec<String>,
    #[serde(deserialize_with = "or_default")]
    pub online_courses: Vec<String>,
    #[serde(deserialize_with = "or_default")]
    pub testimonials: Vec<String>,
    #[serde(deserialize_with = "or_default")]
    pub work_preferences: Option<WorkPreferences>,
    #[serde(deserialize_with = "or_default")]
    pub portfolio_samples: Option<PortfolioSamples>,
    #[serde(deserialize_with = "or_default")]
    pub contact_info: Option<ContactInfo>,
}

/// Declared working availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Freelance")]
    Freelance,
}

// ============================================================
// UNION FIELDS (plain string or structured object)
// ============================================================

/// A skill, stored either as a bare name or a structured entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skill {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        proficiency: Option<String>,
        #[serde(default)]
        category: Option<String>,
    },
}

impl Skill {
    pub fn name(&self) -> &str {
        match self {
            Skill::Name(n) => n,
            Skill::Detailed { name, .. } => name,
        }
    }

    pub fn proficiency(&self) -> Option<&str> {
        match self {
            Skill::Name(_) => None,
            Skill::Detailed { proficiency, .. } => proficiency.as_deref(),
        }
    }
}

impl From<&str> for Skill {
    fn from(name: &str) -> Self {
        Skill::Name(name.to_string())
    }
}

/// A certification, stored either as a bare name or a structured entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Certification {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        issuer: Option<String>,
        #[serde(default)]
        year: Option<String>,
        #[serde(default)]
        link: Option<String>,
    },
}

impl Certification {
    pub fn name(&self) -> &str {
        match self {
            Certification::Name(n) => n,
            Certification::Detailed { name, .. } => name,
        }
    }
}

// ============================================================
// SEQUENCE ENTRY TYPES
// ============================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub role: Option<String>,
    pub company: Option<String>,
    pub duration: Option<String>,
    pub details: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub achievements: Vec<String>,
    #[serde(deserialize_with = "or_default")]
    pub responsibilities: Vec<String>,
}

impl ExperienceEntry {
    /// An entry is "detailed" when role, company, and details are all filled.
    pub fn is_detailed(&self) -> bool {
        [&self.role, &self.company, &self.details]
            .iter()
            .all(|f| f.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub institution: Option<String>,
    /// Documents in the wild carry this as a string or a number.
    #[serde(deserialize_with = "year_string")]
    pub year: Option<String>,
    pub gpa: Option<String>,
    pub honors: Option<String>,
}

fn year_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(de)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub technologies: Vec<String>,
    pub status: Option<String>,
    pub outcome: Option<String>,
    pub metrics: Option<String>,
}

// ============================================================
// OBJECT FIELDS
// ============================================================

/// Free-form work preferences. Present iff at least one field is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkPreferences {
    pub salary_expectation: Option<String>,
    pub work_type: Option<String>,
    pub notice_period: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub preferred_industries: Vec<String>,
    pub open_to_relocation: Option<bool>,
}

impl WorkPreferences {
    pub fn has_any(&self) -> bool {
        self.salary_expectation.is_some()
            || self.work_type.is_some()
            || self.notice_period.is_some()
            || !self.preferred_industries.is_empty()
            || self.open_to_relocation.is_some()
    }
}

/// Portfolio links shown on the public profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioSamples {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

impl PortfolioSamples {
    /// Any usable portfolio link at all.
    pub fn has_link(&self) -> bool {
        [&self.github, &self.linkedin, &self.website]
            .iter()
            .any(|f| f.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false))
    }
}

/// Ways a client can reach the worker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ContactInfo {
    /// How many of the four fields that count toward reachability are set.
    /// Email is intentionally excluded: it comes from the auth account and
    /// says nothing about profile effort.
    pub fn reachable_field_count(&self) -> usize {
        [&self.linkedin, &self.github, &self.website, &self.phone]
            .iter()
            .filter(|f| f.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false))
            .count()
    }

    pub fn has_any(&self) -> bool {
        self.reachable_field_count() > 0
            || self.email.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_union_parses_both_shapes() {
        let json = r#"["Rust", {"name": "Go", "proficiency": "expert"}]"#;
        let skills: Vec<Skill> = serde_json::from_str(json).unwrap();
        assert_eq!(skills[0].name(), "Rust");
        assert_eq!(skills[0].proficiency(), None);
        assert_eq!(skills[1].name(), "Go");
        assert_eq!(skills[1].proficiency(), Some("expert"));
    }

    #[test]
    fn test_certification_union() {
        let json = r#"["AWS SAA", {"name": "CKA", "issuer": "CNCF", "year": "2024"}]"#;
        let certs: Vec<Certification> = serde_json::from_str(json).unwrap();
        assert_eq!(certs[0].name(), "AWS SAA");
        assert_eq!(certs[1].name(), "CKA");
    }

    #[test]
    fn test_malformed_fields_coerce_to_absent() {
        // skills stored as a string, workPreferences as a number
        let json = r#"{"name": "Alice", "skills": "not-a-list", "workPreferences": 7}"#;
        let profile: ProfileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Alice"));
        assert!(profile.skills.is_empty());
        assert!(profile.work_preferences.is_none());
    }

    #[test]
    fn test_education_year_accepts_number() {
        let json = r#"{"degree": "BSc", "institution": "MIT", "year": 2019}"#;
        let edu: EducationEntry = serde_json::from_str(json).unwrap();
        assert_eq!(edu.year.as_deref(), Some("2019"));
    }

    #[test]
    fn test_availability_wire_names() {
        let a: Availability = serde_json::from_str(r#""Full-time""#).unwrap();
        assert_eq!(a, Availability::FullTime);
        assert_eq!(serde_json::to_string(&Availability::Freelance).unwrap(), r#""Freelance""#);
    }

    #[test]
    fn test_experience_detail_check() {
        let full = ExperienceEntry {
            role: Some("Dev".into()),
            company: Some("X".into()),
            details: Some("built things".into()),
            ..Default::default()
        };
        assert!(full.is_detailed());

        let sparse = ExperienceEntry {
            role: Some("Dev".into()),
            company: Some("  ".into()),
            ..Default::default()
        };
        assert!(!sparse.is_detailed());
    }

    #[test]
    fn test_contact_info_counts() {
        let info = ContactInfo {
            linkedin: Some("in/alice".into()),
            github: Some("alice".into()),
            email: Some("a@b.c".into()),
            ..Default::default()
        };
        assert_eq!(info.reachable_field_count(), 2);
        assert!(info.has_any());
    }

    #[test]
    fn test_empty_object_fields() {
        assert!(!WorkPreferences::default().has_any());
        assert!(!PortfolioSamples::default().has_link());
        assert!(!ContactInfo::default().has_any());
    }
}
