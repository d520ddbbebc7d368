//! Profile Completion Analyzer
//!
//! Implements the completion scoring that drives the onboarding chat.
//! Generates a weighted completion percentage, the ordered list of missing
//! fields, the next questions the assistant should ask, and a follow-up
//! priority tier.
//!
//! ARCHITECTURAL RULES:
//! - Analysis is read-only (no side effects, input never mutated)
//! - Every call is independent; results are computed fresh and not cached
//! - All thresholds live in named constants in this file

use super::types::ProfileRecord;
use serde::{Deserialize, Serialize};

// ============================================================
// TUNING CONSTANTS
// ============================================================

/// Sum of all field weights in [`TRACKED_FIELDS`].
pub const TOTAL_WEIGHT: u32 = 16;

/// Completion percentage at or above which a profile can be complete.
pub const COMPLETE_AT: u8 = 95;

/// Skill lists shorter than this get a "tell me more skills" nudge.
pub const SKILLS_SPARSE_BELOW: usize = 3;

/// Contact fields (linkedin/github/website/phone) required before the
/// profile counts as reachable without a portfolio link.
pub const CONTACT_FIELDS_REQUIRED: usize = 3;

/// At most this many suggestions are surfaced per analysis.
pub const MAX_SUGGESTIONS: usize = 3;

const PRIORITY_LOW_AT: u8 = 85;
const PRIORITY_MEDIUM_AT: u8 = 60;

// ============================================================
// FIELD PRESENCE EVALUATOR
// ============================================================

fn text_present(field: &Option<String>) -> bool {
    field.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
}

/// Per-field presence flags for one profile, under each field's own
/// definition of "present" (trimmed string / non-empty sequence / object
/// with at least one set field / composite rule).
#[derive(Debug, Clone, Copy)]
pub struct FieldPresence {
    pub name: bool,
    pub bio: bool,
    pub title: bool,
    pub skills: bool,
    pub experience: bool,
    pub education: bool,
    pub projects: bool,
    pub goals: bool,
    pub certifications_achievements: bool,
    pub location: bool,
    pub availability: bool,
    pub work_preferences: bool,
    pub contact_info: bool,
    pub hobbies: bool,
}

impl FieldPresence {
    pub fn evaluate(profile: &ProfileRecord) -> Self {
        // Reachable either through a portfolio link or through enough
        // direct contact fields. Fewer than CONTACT_FIELDS_REQUIRED direct
        // fields without a portfolio link still counts as missing.
        let portfolio_link = profile
            .portfolio_samples
            .as_ref()
            .map(|p| p.has_link())
            .unwrap_or(false);
        let contact_fields = profile
            .contact_info
            .as_ref()
            .map(|c| c.reachable_field_count())
            .unwrap_or(0);

        Self {
            name: text_present(&profile.name),
            bio: text_present(&profile.bio),
            title: text_present(&profile.title),
            skills: !profile.skills.is_empty(),
            experience: !profile.experience.is_empty(),
            education: !profile.education.is_empty(),
            projects: !profile.projects.is_empty(),
            goals: !profile.goals.is_empty(),
            certifications_achievements: !profile.certifications.is_empty()
                || !profile.achievements.is_empty(),
            location: text_present(&profile.location),
            availability: profile.availability.is_some(),
            work_preferences: profile
                .work_preferences
                .as_ref()
                .map(|w| w.has_any())
                .unwrap_or(false),
            contact_info: portfolio_link || contact_fields >= CONTACT_FIELDS_REQUIRED,
            hobbies: !profile.hobbies.is_empty(),
        }
    }

    /// The fields a profile cannot do without: identity, story, skills,
    /// and at least one experience entry.
    pub fn critical_fields_present(&self) -> bool {
        self.name && self.bio && self.skills && self.experience
    }
}

// ============================================================
// FIELD TABLE (weights + suggestions, in evaluation order)
// ============================================================

struct TrackedField {
    id: &'static str,
    weight: u32,
    suggestion: &'static str,
    present: fn(&FieldPresence) -> bool,
}

/// Evaluation order is the suggestion priority order. Weights sum to
/// [`TOTAL_WEIGHT`]. Presence is boolean per field - one skill and twenty
/// skills score the same.
const TRACKED_FIELDS: &[TrackedField] = &[
    TrackedField {
        id: "name",
        weight: 2,
        suggestion: "What's your full name?",
        present: |p| p.name,
    },
    TrackedField {
        id: "bio",
        weight: 2,
        suggestion: "Tell me a bit about yourself and your professional background.",
        present: |p| p.bio,
    },
    TrackedField {
        id: "title",
        weight: 1,
        suggestion: "What's your professional title or role?",
        present: |p| p.title,
    },
    TrackedField {
        id: "skills",
        weight: 2,
        suggestion: "What are your top skills?",
        present: |p| p.skills,
    },
    TrackedField {
        id: "experience",
        weight: 2,
        suggestion: "Tell me about your work experience.",
        present: |p| p.experience,
    },
    TrackedField {
        id: "education",
        weight: 1,
        suggestion: "What's your educational background?",
        present: |p| p.education,
    },
    TrackedField {
        id: "projects",
        weight: 1,
        suggestion: "Have you worked on any projects you'd like to showcase?",
        present: |p| p.projects,
    },
    TrackedField {
        id: "goals",
        weight: 1,
        suggestion: "What are your career goals?",
        present: |p| p.goals,
    },
    TrackedField {
        id: "certifications_achievements",
        weight: 1,
        suggestion: "Do you have any certifications or notable achievements?",
        present: |p| p.certifications_achievements,
    },
    TrackedField {
        id: "location",
        weight: 1,
        suggestion: "Where are you based?",
        present: |p| p.location,
    },
    TrackedField {
        id: "availability",
        weight: 1,
        suggestion: "What's your availability - full-time, part-time, contract, or freelance?",
        present: |p| p.availability,
    },
    TrackedField {
        id: "work_preferences",
        weight: 1,
        suggestion: "What are your work preferences - expected rate, work type, notice period?",
        present: |p| p.work_preferences,
    },
    TrackedField {
        id: "contact_info",
        weight: 1,
        suggestion: "How can clients reach you? A portfolio link or a few contact details help a lot.",
        present: |p| p.contact_info,
    },
    TrackedField {
        id: "hobbies",
        weight: 1,
        suggestion: "What do you enjoy outside of work?",
        present: |p| p.hobbies,
    },
];

const SUGGESTION_MORE_SKILLS: &str =
    "What other skills do you have? A few more makes matching much better.";
const SUGGESTION_PROFICIENCY: &str =
    "How would you rate your proficiency in the skills you've listed?";
const SUGGESTION_EXPERIENCE_DETAIL: &str =
    "Can you share more detail on your roles - company, title, and what you actually built?";

// ============================================================
// ANALYSIS OUTPUT
// ============================================================

/// Follow-up priority for profile completion nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Result of analyzing one profile. Transient - computed per request and
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysis {
    pub completion_percentage: u8,
    pub missing_fields: Vec<String>,
    pub next_suggestions: Vec<String>,
    pub priority: Priority,
    pub is_complete: bool,
}

// ============================================================
// ANALYZER
// ============================================================

/// Analyze a profile: weighted completion score, ordered missing fields,
/// next suggestions (at most [`MAX_SUGGESTIONS`]), and follow-up priority.
pub fn analyze_profile_completion(profile: &ProfileRecord) -> ProfileAnalysis {
    let presence = FieldPresence::evaluate(profile);

    let earned: u32 = TRACKED_FIELDS
        .iter()
        .filter(|f| (f.present)(&presence))
        .map(|f| f.weight)
        .sum();
    let completion_percentage =
        ((100.0 * earned as f64 / TOTAL_WEIGHT as f64).round() as u32).min(100) as u8;

    let mut missing_fields = Vec::new();
    let mut suggestions = Vec::new();
    for field in TRACKED_FIELDS {
        if (field.present)(&presence) {
            match field.id {
                // Nuance suggestions: the base field is there, but thin.
                // These never land in missing_fields and never affect score.
                "skills" => {
                    let count = profile.skills.len();
                    if count < SKILLS_SPARSE_BELOW {
                        suggestions.push(SUGGESTION_MORE_SKILLS.to_string());
                    }
                    let annotated = profile
                        .skills
                        .iter()
                        .filter(|s| s.proficiency().is_some())
                        .count();
                    if annotated * 2 < count {
                        suggestions.push(SUGGESTION_PROFICIENCY.to_string());
                    }
                }
                "experience" => {
                    if !profile.experience.iter().any(|e| e.is_detailed()) {
                        suggestions.push(SUGGESTION_EXPERIENCE_DETAIL.to_string());
                    }
                }
                _ => {}
            }
        } else {
            missing_fields.push(field.id.to_string());
            suggestions.push(field.suggestion.to_string());
        }
    }
    suggestions.truncate(MAX_SUGGESTIONS);

    let critical = presence.critical_fields_present();
    let priority = if completion_percentage >= PRIORITY_LOW_AT && critical {
        Priority::Low
    } else if completion_percentage >= PRIORITY_MEDIUM_AT && critical {
        Priority::Medium
    } else {
        Priority::High
    };

    ProfileAnalysis {
        completion_percentage,
        missing_fields,
        next_suggestions: suggestions,
        priority,
        is_complete: completion_percentage >= COMPLETE_AT && critical,
    }
}

/// Whether the chat should nudge the worker toward finishing their profile.
pub fn should_suggest_profile_completion(analysis: &ProfileAnalysis) -> bool {
    analysis.completion_percentage < 100 && analysis.priority != Priority::Low
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::types::{
        Availability, Certification, ContactInfo, ExperienceEntry, PortfolioSamples,
        ProjectEntry, Skill, WorkPreferences,
    };

    fn critical_profile() -> ProfileRecord {
        ProfileRecord {
            name: Some("Alice".into()),
            bio: Some("Engineer".into()),
            skills: vec!["Go".into(), "Rust".into(), "C++".into()],
            experience: vec![ExperienceEntry {
                role: Some("Dev".into()),
                company: Some("X".into()),
                details: Some("built things".into()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_weights_sum() {
        let sum: u32 = TRACKED_FIELDS.iter().map(|f| f.weight).sum();
        assert_eq!(sum, TOTAL_WEIGHT);
    }

    #[test]
    fn test_empty_profile() {
        let analysis = analyze_profile_completion(&ProfileRecord::default());
        assert_eq!(analysis.completion_percentage, 0);
        assert_eq!(analysis.priority, Priority::High);
        assert!(!analysis.is_complete);
        let expected: Vec<&str> = vec![
            "name",
            "bio",
            "title",
            "skills",
            "experience",
            "education",
            "projects",
            "goals",
            "certifications_achievements",
            "location",
            "availability",
            "work_preferences",
            "contact_info",
            "hobbies",
        ];
        assert_eq!(analysis.missing_fields, expected);
        assert_eq!(analysis.next_suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(analysis.next_suggestions[0], "What's your full name?");
    }

    #[test]
    fn test_critical_only_profile_is_50_percent_high() {
        // name(2) + bio(2) + skills(2) + experience(2) = 8 of 16 = 50%.
        // Critical fields are all present, but 50 < 60 so priority stays
        // high per the rule ordering.
        let analysis = analyze_profile_completion(&critical_profile());
        assert_eq!(analysis.completion_percentage, 50);
        assert_eq!(analysis.priority, Priority::High);
        assert!(!analysis.is_complete);
        assert!(should_suggest_profile_completion(&analysis));
    }

    #[test]
    fn test_secondary_fields_cannot_escape_high_priority() {
        // Everything except the critical four.
        let profile = ProfileRecord {
            title: Some("Developer".into()),
            location: Some("Berlin".into()),
            availability: Some(Availability::Freelance),
            education: vec![Default::default()],
            projects: vec![ProjectEntry::default()],
            goals: vec!["Lead a team".into()],
            achievements: vec!["Hackathon winner".into()],
            hobbies: vec!["Chess".into()],
            work_preferences: Some(WorkPreferences {
                work_type: Some("Remote".into()),
                ..Default::default()
            }),
            portfolio_samples: Some(PortfolioSamples {
                github: Some("https://github.com/x".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let analysis = analyze_profile_completion(&profile);
        // 10 of 16 points (63%), yet no critical field is present.
        assert_eq!(analysis.completion_percentage, 63);
        assert_eq!(analysis.priority, Priority::High);
    }

    #[test]
    fn test_adding_a_field_never_decreases_score() {
        let mut profile = critical_profile();
        let before = analyze_profile_completion(&profile).completion_percentage;
        profile.location = Some("Lagos".into());
        let after = analyze_profile_completion(&profile).completion_percentage;
        assert!(after >= before);
    }

    #[test]
    fn test_full_profile_is_complete_low_priority() {
        let mut profile = critical_profile();
        profile.title = Some("Developer".into());
        profile.location = Some("Berlin".into());
        profile.availability = Some(Availability::Contract);
        profile.education = vec![Default::default()];
        profile.projects = vec![ProjectEntry::default()];
        profile.goals = vec!["Ship".into()];
        profile.certifications = vec![Certification::Name("CKA".into())];
        profile.hobbies = vec!["Climbing".into()];
        profile.work_preferences = Some(WorkPreferences {
            notice_period: Some("2 weeks".into()),
            ..Default::default()
        });
        profile.contact_info = Some(ContactInfo {
            linkedin: Some("in/a".into()),
            github: Some("a".into()),
            website: Some("https://a.dev".into()),
            ..Default::default()
        });
        let analysis = analyze_profile_completion(&profile);
        assert_eq!(analysis.completion_percentage, 100);
        assert_eq!(analysis.priority, Priority::Low);
        assert!(analysis.is_complete);
        assert!(analysis.missing_fields.is_empty());
        assert!(!should_suggest_profile_completion(&analysis));
    }

    #[test]
    fn test_contact_info_threshold() {
        let mut profile = critical_profile();
        // Two direct contact fields, no portfolio link: still missing.
        profile.contact_info = Some(ContactInfo {
            linkedin: Some("in/a".into()),
            phone: Some("+123".into()),
            ..Default::default()
        });
        let analysis = analyze_profile_completion(&profile);
        assert!(analysis.missing_fields.iter().any(|f| f == "contact_info"));

        // A third field crosses the threshold.
        profile.contact_info.as_mut().unwrap().website = Some("https://a.dev".into());
        let analysis = analyze_profile_completion(&profile);
        assert!(!analysis.missing_fields.iter().any(|f| f == "contact_info"));

        // A portfolio link alone is also enough.
        profile.contact_info = None;
        profile.portfolio_samples = Some(PortfolioSamples {
            website: Some("https://a.dev".into()),
            ..Default::default()
        });
        let analysis = analyze_profile_completion(&profile);
        assert!(!analysis.missing_fields.iter().any(|f| f == "contact_info"));
    }

    #[test]
    fn test_certifications_or_achievements_composite() {
        let mut profile = critical_profile();
        profile.achievements = vec!["Top rated 2025".into()];
        let analysis = analyze_profile_completion(&profile);
        assert!(!analysis
            .missing_fields
            .iter()
            .any(|f| f == "certifications_achievements"));
    }

    #[test]
    fn test_sparse_skills_nuance() {
        let mut profile = critical_profile();
        profile.skills = vec!["Rust".into()];
        let analysis = analyze_profile_completion(&profile);
        // Skills are present (not missing) but thin, so the nudge shows up.
        assert!(!analysis.missing_fields.iter().any(|f| f == "skills"));
        assert!(analysis
            .next_suggestions
            .iter()
            .any(|s| s == SUGGESTION_MORE_SKILLS));
    }

    #[test]
    fn test_proficiency_nuance() {
        let profile = critical_profile(); // three skills, none annotated
        let analysis = analyze_profile_completion(&profile);
        assert!(analysis
            .next_suggestions
            .iter()
            .any(|s| s == SUGGESTION_PROFICIENCY));

        // Annotating most of them silences the nudge.
        let mut profile = critical_profile();
        profile.skills = vec![
            Skill::Detailed {
                name: "Go".into(),
                proficiency: Some("expert".into()),
                category: None,
            },
            Skill::Detailed {
                name: "Rust".into(),
                proficiency: Some("advanced".into()),
                category: None,
            },
            "C++".into(),
        ];
        let analysis = analyze_profile_completion(&profile);
        assert!(!analysis
            .next_suggestions
            .iter()
            .any(|s| s == SUGGESTION_PROFICIENCY));
    }

    #[test]
    fn test_experience_detail_nuance() {
        let mut profile = critical_profile();
        profile.experience = vec![ExperienceEntry {
            role: Some("Dev".into()),
            ..Default::default()
        }];
        let analysis = analyze_profile_completion(&profile);
        assert!(!analysis.missing_fields.iter().any(|f| f == "experience"));
        assert!(analysis
            .next_suggestions
            .iter()
            .any(|s| s == SUGGESTION_EXPERIENCE_DETAIL));
    }

    #[test]
    fn test_suggestions_capped_at_three() {
        for profile in [ProfileRecord::default(), critical_profile()] {
            let analysis = analyze_profile_completion(&profile);
            assert!(analysis.next_suggestions.len() <= MAX_SUGGESTIONS);
            assert!(analysis.completion_percentage <= 100);
        }
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), r#""high""#);
    }
}
