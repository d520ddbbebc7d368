//! Greeting & Prompt Composer
//!
//! Formats a [`ProfileAnalysis`](super::analyzer::ProfileAnalysis) into the
//! natural-language strings the onboarding chat needs: a greeting picked by
//! completion bracket, and a context block injected ahead of the AI service's
//! base prompt. Pure string formatting, no state.

use super::analyzer::ProfileAnalysis;
use super::types::ProfileRecord;

// ============================================================
// GREETINGS
// ============================================================

/// Greeting templates by completion bracket. Each entry is the exclusive
/// upper bound paired with its template; the first bound the percentage is
/// below wins, and a full profile falls through to [`GREETING_COMPLETE`].
/// `{name}` expands to ", <name>" when the profile has one.
const GREETING_BRACKETS: &[(u8, &str)] = &[
    (1, "Hi{name}! I'm here to help you build a standout profile. Let's start with the basics - tell me a little about yourself."),
    (30, "Welcome back{name}! Your profile is just getting started. A few more details will go a long way."),
    (60, "Good to see you{name}! Your profile is taking shape. Let's fill in some of the gaps."),
    (90, "Hey{name}! Your profile is looking solid. A few finishing touches and you'll really stand out to clients."),
    (100, "Almost there{name}! Your profile is nearly complete. Just a couple of details left."),
];

const GREETING_COMPLETE: &str =
    "Your profile is complete{name}! Clients can see everything they need. Feel free to keep it fresh.";

/// Pick the greeting for a profile's completion bracket.
pub fn personalized_greeting(profile: &ProfileRecord, analysis: &ProfileAnalysis) -> String {
    let template = GREETING_BRACKETS
        .iter()
        .find(|(bound, _)| analysis.completion_percentage < *bound)
        .map(|(_, t)| *t)
        .unwrap_or(GREETING_COMPLETE);

    let name_part = profile
        .name
        .as_deref()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(|n| format!(", {}", n))
        .unwrap_or_default();

    template.replace("{name}", &name_part)
}

// ============================================================
// INDUSTRY TEMPLATES
// ============================================================

/// Follow-up question hints for one profession bucket.
pub struct IndustryTemplate {
    pub skills: &'static [&'static str],
    pub projects: &'static [&'static str],
    pub experience: &'static [&'static str],
}

static DEVELOPER_TEMPLATE: IndustryTemplate = IndustryTemplate {
    skills: &[
        "Which languages and frameworks do you reach for first?",
        "Any infrastructure or DevOps experience - cloud, CI/CD, containers?",
        "Do you work across the stack or specialize in one layer?",
    ],
    projects: &[
        "What's the most technically interesting thing you've shipped?",
        "Any open-source work or public repos clients could look at?",
        "Did any of your projects have measurable impact - users, performance, revenue?",
    ],
    experience: &[
        "What kind of systems did you own in your last role?",
        "Have you led code reviews, mentoring, or architecture decisions?",
        "What team sizes and development processes have you worked in?",
    ],
};

static DESIGNER_TEMPLATE: IndustryTemplate = IndustryTemplate {
    skills: &[
        "Which design tools are you strongest in - Figma, Sketch, Adobe?",
        "Do you do UX research, or mostly visual and interaction design?",
        "Any motion design, branding, or illustration in your toolkit?",
    ],
    projects: &[
        "Which portfolio piece best shows your design process?",
        "Have you designed anything end-to-end, from research to handoff?",
        "Any before/after redesigns with results you can share?",
    ],
    experience: &[
        "What kinds of products or brands have you designed for?",
        "How closely have you worked with engineers and product managers?",
        "Have you run usability tests or design workshops?",
    ],
};

static WRITER_TEMPLATE: IndustryTemplate = IndustryTemplate {
    skills: &[
        "What formats do you write most - blog posts, docs, copy, scripts?",
        "Any SEO or content-strategy experience?",
        "Which subject areas do you know deeply enough to write with authority?",
    ],
    projects: &[
        "What published pieces are you proudest of?",
        "Have any of your pieces driven measurable traffic or conversions?",
        "Do you have writing samples across different tones and audiences?",
    ],
    experience: &[
        "Who have you written for - agencies, in-house teams, publications?",
        "Have you owned an editorial calendar or content pipeline?",
        "Do you edit other writers' work as well?",
    ],
};

static MARKETING_TEMPLATE: IndustryTemplate = IndustryTemplate {
    skills: &[
        "Which channels do you know best - paid, email, social, SEO?",
        "What analytics tools do you use to measure campaigns?",
        "Any marketing automation or CRM experience?",
    ],
    projects: &[
        "What's the best-performing campaign you've run, and what made it work?",
        "Have you grown an audience or a list from scratch?",
        "Any A/B tests with results worth showing off?",
    ],
    experience: &[
        "What budgets and targets have you been responsible for?",
        "Have you worked b2b, b2c, or both?",
        "How do you usually report results to stakeholders?",
    ],
};

static DATA_TEMPLATE: IndustryTemplate = IndustryTemplate {
    skills: &[
        "Which parts of the data stack do you cover - SQL, Python, BI tools, ML?",
        "Have you built dashboards or self-serve analytics for teams?",
        "Any experience with data pipelines or warehousing?",
    ],
    projects: &[
        "What's an analysis or model of yours that changed a real decision?",
        "Have you productionized any models or pipelines?",
        "Any public notebooks, competitions, or datasets you've worked on?",
    ],
    experience: &[
        "What business domains have you analyzed - finance, product, ops?",
        "How big were the datasets and teams you worked with?",
        "Have you presented findings directly to decision makers?",
    ],
};

static DEFAULT_TEMPLATE: IndustryTemplate = IndustryTemplate {
    skills: &[
        "Which of your skills do clients value most?",
        "What tools or methods do you use day to day?",
        "Any skills you're currently building up?",
    ],
    projects: &[
        "What piece of work are you proudest of?",
        "Can you describe a project with a clear before-and-after result?",
        "Anything you've built or delivered that clients could look at?",
    ],
    experience: &[
        "What kinds of clients or employers have you worked with?",
        "What was your biggest responsibility in your last role?",
        "What outcomes did you deliver that you can point to?",
    ],
};

/// Ordered substring rules over the (lowercased) profile title. First match
/// wins, so a "developer advocate" hits the developer bucket, matching how
/// the marketplace has always bucketed titles.
static INDUSTRY_RULES: &[(&[&str], &IndustryTemplate)] = &[
    (&["developer", "engineer", "programmer"], &DEVELOPER_TEMPLATE),
    (&["designer", "design"], &DESIGNER_TEMPLATE),
    (&["writer", "content", "copywriter"], &WRITER_TEMPLATE),
    (&["marketing", "marketer", "growth"], &MARKETING_TEMPLATE),
    (&["data", "analyst", "scientist"], &DATA_TEMPLATE),
];

/// Look up the industry template for a title, falling back to the default
/// bucket when nothing matches (or there is no title at all).
pub fn industry_template(title: Option<&str>) -> &'static IndustryTemplate {
    let title = match title {
        Some(t) => t.to_lowercase(),
        None => return &DEFAULT_TEMPLATE,
    };
    for (patterns, template) in INDUSTRY_RULES {
        if patterns.iter().any(|p| title.contains(p)) {
            return template;
        }
    }
    &DEFAULT_TEMPLATE
}

// ============================================================
// PROFILE-AWARE PROMPT
// ============================================================

/// How many industry hints get injected into the prompt context.
const MAX_INDUSTRY_HINTS: usize = 2;

/// Build the context block handed to the AI chat service: what we already
/// know, what's missing, the single field to focus on next, and up to
/// [`MAX_INDUSTRY_HINTS`] profession-specific question ideas. The exact
/// wording is advisory for the downstream model; the known/missing/focus
/// content is what matters.
pub fn profile_aware_prompt(
    profile: &ProfileRecord,
    analysis: &ProfileAnalysis,
    base_prompt: &str,
) -> String {
    let mut known = Vec::new();
    if let Some(name) = profile.name.as_deref().filter(|s| !s.trim().is_empty()) {
        known.push(format!("name: {}", name.trim()));
    }
    if let Some(title) = profile.title.as_deref().filter(|s| !s.trim().is_empty()) {
        known.push(format!("title: {}", title.trim()));
    }
    if !profile.skills.is_empty() {
        known.push(format!("skills: {} listed", profile.skills.len()));
    }
    if !profile.experience.is_empty() {
        known.push(format!("experience: {} entries", profile.experience.len()));
    }
    if !profile.projects.is_empty() {
        known.push(format!("projects: {} entries", profile.projects.len()));
    }
    if !profile.education.is_empty() {
        known.push(format!("education: {} entries", profile.education.len()));
    }

    let focus = analysis.missing_fields.first().map(String::as_str);

    let template = industry_template(profile.title.as_deref());
    let hints = match focus {
        Some("projects") => template.projects,
        Some("experience") => template.experience,
        _ => template.skills,
    };

    let mut out = String::new();
    out.push_str("[Profile context]\n");
    out.push_str(&format!(
        "Completion: {}% ({:?} priority)\n",
        analysis.completion_percentage, analysis.priority
    ));
    if known.is_empty() {
        out.push_str("Known: nothing yet\n");
    } else {
        out.push_str(&format!("Known: {}\n", known.join("; ")));
    }
    if analysis.missing_fields.is_empty() {
        out.push_str("Missing: nothing - profile data is complete\n");
    } else {
        out.push_str(&format!("Missing: {}\n", analysis.missing_fields.join(", ")));
    }
    if let Some(focus) = focus {
        out.push_str(&format!("Next focus: {}\n", focus));
    }
    for hint in hints.iter().take(MAX_INDUSTRY_HINTS) {
        out.push_str(&format!("Consider asking: {}\n", hint));
    }
    out.push_str(
        "Keep replies to 2-3 short sentences, ask one question at a time, plain text only.\n\n",
    );
    out.push_str(base_prompt);
    out
}
