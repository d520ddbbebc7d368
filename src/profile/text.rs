//! Text Normalization Utilities
//!
//! Stateless helpers that clean up free-text chat answers before they land
//! on a profile: URL extraction, canonical casing for known technologies and
//! roles, contraction fixes, and skill-list splitting. Each function is a
//! pure transform with no ordering dependency on the analyzer.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

// ============================================================
// URL EXTRACTION
// ============================================================

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Text with its URLs pulled out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlExtraction {
    pub clean_text: String,
    pub urls: Vec<String>,
}

/// Pull URLs out of free text, returning the whitespace-normalized
/// remainder and the URLs in order of appearance.
pub fn extract_urls(text: &str) -> UrlExtraction {
    let urls: Vec<String> = URL_RE
        .find_iter(text)
        .map(|m| {
            m.as_str()
                .trim_end_matches(&['.', ',', ';', ':', '!', '?', ')'][..])
                .to_string()
        })
        .collect();
    let without = URL_RE.replace_all(text, " ");
    let clean_text = WHITESPACE_RE.replace_all(&without, " ").trim().to_string();
    UrlExtraction { clean_text, urls }
}

// ============================================================
// CANONICAL TERM TABLE
// ============================================================

/// Lowercase spelling -> canonical display form for technologies and tools
/// workers commonly type into the chat.
const CANONICAL_TERMS: &[(&str, &str)] = &[
    ("js", "JavaScript"),
    ("javascript", "JavaScript"),
    ("ts", "TypeScript"),
    ("typescript", "TypeScript"),
    ("react", "React"),
    ("reactjs", "React"),
    ("react native", "React Native"),
    ("node", "Node.js"),
    ("nodejs", "Node.js"),
    ("node.js", "Node.js"),
    ("vue", "Vue.js"),
    ("vuejs", "Vue.js"),
    ("angular", "Angular"),
    ("next", "Next.js"),
    ("nextjs", "Next.js"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("sass", "Sass"),
    ("tailwind", "Tailwind CSS"),
    ("tailwindcss", "Tailwind CSS"),
    ("bootstrap", "Bootstrap"),
    ("redux", "Redux"),
    ("python", "Python"),
    ("django", "Django"),
    ("flask", "Flask"),
    ("java", "Java"),
    ("kotlin", "Kotlin"),
    ("swift", "Swift"),
    ("flutter", "Flutter"),
    ("php", "PHP"),
    ("laravel", "Laravel"),
    ("ruby", "Ruby"),
    ("rails", "Ruby on Rails"),
    ("go", "Go"),
    ("golang", "Go"),
    ("rust", "Rust"),
    ("c++", "C++"),
    ("cpp", "C++"),
    ("c#", "C#"),
    ("csharp", "C#"),
    ("sql", "SQL"),
    ("mysql", "MySQL"),
    ("postgres", "PostgreSQL"),
    ("postgresql", "PostgreSQL"),
    ("mongodb", "MongoDB"),
    ("mongo", "MongoDB"),
    ("redis", "Redis"),
    ("graphql", "GraphQL"),
    ("rest", "REST"),
    ("api", "API"),
    ("aws", "AWS"),
    ("gcp", "Google Cloud"),
    ("azure", "Azure"),
    ("firebase", "Firebase"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("k8s", "Kubernetes"),
    ("devops", "DevOps"),
    ("linux", "Linux"),
    ("bash", "Bash"),
    ("git", "Git"),
    ("github", "GitHub"),
    ("ml", "Machine Learning"),
    ("machine learning", "Machine Learning"),
    ("ai", "AI"),
    ("nlp", "NLP"),
    ("tensorflow", "TensorFlow"),
    ("pytorch", "PyTorch"),
    ("pandas", "Pandas"),
    ("numpy", "NumPy"),
    ("excel", "Excel"),
    ("powerpoint", "PowerPoint"),
    ("figma", "Figma"),
    ("photoshop", "Photoshop"),
    ("illustrator", "Illustrator"),
    ("wordpress", "WordPress"),
    ("shopify", "Shopify"),
    ("seo", "SEO"),
    ("ui", "UI"),
    ("ux", "UX"),
    ("qa", "QA"),
    ("jira", "Jira"),
    ("scrum", "Scrum"),
    ("agile", "Agile"),
];

static CANONICAL_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CANONICAL_TERMS.iter().copied().collect());

/// Common role shorthands -> full role names.
const ROLE_TERMS: &[(&str, &str)] = &[
    ("swe", "Software Engineer"),
    ("dev", "Developer"),
    ("fullstack", "Full-Stack Developer"),
    ("full stack", "Full-Stack Developer"),
    ("full-stack", "Full-Stack Developer"),
    ("frontend", "Frontend Developer"),
    ("front end", "Frontend Developer"),
    ("backend", "Backend Developer"),
    ("back end", "Backend Developer"),
    ("pm", "Product Manager"),
    ("ba", "Business Analyst"),
    ("sre", "Site Reliability Engineer"),
    ("ui/ux", "UI/UX Designer"),
    ("ux designer", "UX Designer"),
    ("qa engineer", "QA Engineer"),
];

static ROLE_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ROLE_TERMS.iter().copied().collect());

// ============================================================
// CASING
// ============================================================

/// Title-case: uppercase every letter that starts a word, lowercase the
/// rest. Word starts are letters preceded by a non-letter, so
/// "UNKNOWN_TOOL" becomes "Unknown_Tool".
pub fn to_title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Canonical display form for one skill: known terms map through the
/// lookup table, unknown terms fall back to title-casing.
pub fn professionalize_skill(skill: &str) -> String {
    let trimmed = skill.trim();
    match CANONICAL_LOOKUP.get(trimmed.to_lowercase().as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => to_title_case(trimmed),
    }
}

/// Canonicalize a list of skills, dropping empties.
pub fn professionalize_skills<S: AsRef<str>>(skills: &[S]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(professionalize_skill)
        .collect()
}

/// Canonical display form for a role/title: whole-string shorthands first,
/// then per-word canonicalization.
pub fn professionalize_role(role: &str) -> String {
    let trimmed = role.trim();
    if let Some(full) = ROLE_LOOKUP.get(trimmed.to_lowercase().as_str()) {
        return (*full).to_string();
    }
    trimmed
        .split_whitespace()
        .map(professionalize_skill)
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================
// PROSE CLEANUP
// ============================================================

/// (pattern, replacement) contraction and pronoun fixes applied in order.
const FIXUPS: &[(&str, &str)] = &[
    (r"\bi\b", "I"),
    (r"\bim\b", "I'm"),
    (r"\bive\b", "I've"),
    (r"\bdont\b", "don't"),
    (r"\bcant\b", "can't"),
    (r"\bwont\b", "won't"),
    (r"\bdoesnt\b", "doesn't"),
    (r"\bdidnt\b", "didn't"),
    (r"\bisnt\b", "isn't"),
    (r"\bwasnt\b", "wasn't"),
    (r"\bhavent\b", "haven't"),
    (r"\bcouldnt\b", "couldn't"),
    (r"\bwouldnt\b", "wouldn't"),
    (r"\bshouldnt\b", "shouldn't"),
];

static FIXUP_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    FIXUPS
        .iter()
        .map(|(pat, rep)| (Regex::new(pat).unwrap(), *rep))
        .collect()
});

/// Fix the contraction/pronoun slips people make when typing fast, and
/// collapse repeated whitespace.
pub fn fix_common_issues(text: &str) -> String {
    let mut fixed = text.to_string();
    for (re, replacement) in FIXUP_RES.iter() {
        fixed = re.replace_all(&fixed, *replacement).to_string();
    }
    WHITESPACE_RE.replace_all(&fixed, " ").trim().to_string()
}

/// Full prose cleanup: contraction fixes, sentence-start capitalization,
/// and a terminal period when the text trails off without one.
pub fn professionalize_text(text: &str) -> String {
    let fixed = fix_common_issues(text);
    if fixed.is_empty() {
        return fixed;
    }

    let mut out = String::with_capacity(fixed.len() + 1);
    let mut capitalize_next = true;
    for ch in fixed.chars() {
        if capitalize_next && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(ch);
            if matches!(ch, '.' | '!' | '?') {
                capitalize_next = true;
            }
        }
    }
    if !out.ends_with(&['.', '!', '?'][..]) {
        out.push('.');
    }
    out
}

// ============================================================
// COMPOSITE PROCESSORS (chat answer -> profile field)
// ============================================================

/// Prose with any embedded links separated out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedText {
    pub text: String,
    pub urls: Vec<String>,
}

/// Clean up an experience description typed into the chat: pull out links,
/// then professionalize the prose.
pub fn process_experience_description(input: &str) -> ProcessedText {
    let extraction = extract_urls(input);
    ProcessedText {
        text: professionalize_text(&extraction.clean_text),
        urls: extraction.urls,
    }
}

/// Same treatment for project descriptions; the first URL is typically used
/// as the project link by the caller.
pub fn process_project_description(input: &str) -> ProcessedText {
    process_experience_description(input)
}

static SKILL_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;\n]|\band\b").unwrap());

/// Split a free-text skills answer ("js, react and nodejs") into canonical
/// skill names, deduplicated case-insensitively in order of appearance.
pub fn process_skills_input(input: &str) -> Vec<String> {
    let parts: Vec<&str> = SKILL_SPLIT_RE.split(input).collect();
    let cleaned = professionalize_skills(&parts);
    let mut seen = std::collections::HashSet::new();
    cleaned
        .into_iter()
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect()
}
