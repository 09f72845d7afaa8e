//! Heuristic extraction of structured fields from plain resume text

use crate::config::ExtractionConfig;
use crate::processing::display::{capitalize_skill, display_skill_name};
use crate::processing::models::{DegreeLabel, EducationEntry, ResumeProfile, WorkExperienceEntry};
use crate::processing::sections::{first_section_body, section_bodies, SectionEnd};
use log::debug;
use regex::{Regex, RegexSet};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

/// Canonical skill key and the raw spellings that map to it.
type SkillVariants = (&'static str, &'static [&'static str]);

const SKILL_VOCABULARY: &[(&str, &[SkillVariants])] = &[
    (
        "languages",
        &[
            ("python", &["python"]),
            ("java", &["java"]),
            ("javascript", &["javascript"]),
            ("typescript", &["typescript"]),
            ("c++", &["c++"]),
            ("c#", &["c#"]),
            ("ruby", &["ruby"]),
            ("php", &["php"]),
            ("swift", &["swift"]),
            ("kotlin", &["kotlin"]),
            ("go", &["go", "golang"]),
            ("rust", &["rust"]),
        ],
    ),
    (
        "frameworks",
        &[
            ("react", &["react", "react.js", "reactjs"]),
            ("angular", &["angular"]),
            ("vue", &["vue", "vue.js", "vuejs"]),
            ("node.js", &["node.js", "nodejs"]),
            ("express", &["express", "express.js"]),
            ("django", &["django"]),
            ("flask", &["flask"]),
            ("fastapi", &["fastapi"]),
            ("spring", &["spring", "spring boot"]),
            ("laravel", &["laravel"]),
        ],
    ),
    (
        "databases",
        &[
            ("sql", &["sql"]),
            ("mysql", &["mysql"]),
            ("postgresql", &["postgresql", "postgres"]),
            ("mongodb", &["mongodb"]),
            ("redis", &["redis"]),
            ("elasticsearch", &["elasticsearch"]),
            ("cassandra", &["cassandra"]),
            ("oracle", &["oracle"]),
        ],
    ),
    (
        "cloud",
        &[
            ("aws", &["aws"]),
            ("azure", &["azure"]),
            ("gcp", &["gcp"]),
            ("docker", &["docker"]),
            ("kubernetes", &["kubernetes", "k8s"]),
            ("jenkins", &["jenkins"]),
            ("terraform", &["terraform"]),
            ("ansible", &["ansible"]),
        ],
    ),
    (
        "machine learning",
        &[
            ("machine learning", &["machine learning"]),
            ("deep learning", &["deep learning"]),
            ("nlp", &["nlp", "natural language processing"]),
            ("computer vision", &["computer vision"]),
            ("tensorflow", &["tensorflow"]),
            ("pytorch", &["pytorch"]),
            ("scikit-learn", &["scikit-learn", "sklearn"]),
        ],
    ),
    (
        "tooling",
        &[
            ("git", &["git"]),
            ("github", &["github"]),
            ("gitlab", &["gitlab"]),
            ("bitbucket", &["bitbucket"]),
            ("ci/cd", &["ci/cd"]),
            ("devops", &["devops"]),
            ("agile", &["agile"]),
            ("scrum", &["scrum"]),
        ],
    ),
    (
        "web",
        &[
            ("html", &["html", "html5"]),
            ("css", &["css", "css3"]),
            ("sass", &["sass"]),
            ("less", &["less"]),
            ("bootstrap", &["bootstrap"]),
            ("tailwind", &["tailwind", "tailwindcss"]),
            ("material-ui", &["material-ui"]),
        ],
    ),
    (
        "api",
        &[
            ("rest api", &["rest api", "restful api"]),
            ("graphql", &["graphql"]),
            ("microservices", &["microservices"]),
            ("websockets", &["websockets", "websocket"]),
            ("grpc", &["grpc"]),
        ],
    ),
    (
        "data science",
        &[
            ("pandas", &["pandas"]),
            ("numpy", &["numpy"]),
            ("matplotlib", &["matplotlib"]),
            ("seaborn", &["seaborn"]),
            ("plotly", &["plotly"]),
            ("jupyter", &["jupyter"]),
        ],
    ),
    (
        "shell",
        &[
            ("linux", &["linux"]),
            ("unix", &["unix"]),
            ("bash", &["bash"]),
            ("shell scripting", &["shell scripting"]),
            ("powershell", &["powershell"]),
        ],
    ),
];

/// One alternation per vocabulary category plus the variant-to-key lookup.
struct CategoryMatcher {
    name: &'static str,
    pattern: Regex,
    keys: HashMap<&'static str, &'static str>,
}

static CATEGORY_MATCHERS: LazyLock<Vec<CategoryMatcher>> = LazyLock::new(|| {
    SKILL_VOCABULARY
        .iter()
        .map(|(name, skills)| compile_category(name, skills))
        .collect()
});

fn compile_category(name: &'static str, skills: &[SkillVariants]) -> CategoryMatcher {
    let mut keys = HashMap::new();
    for (key, variants) in skills {
        for variant in *variants {
            keys.insert(*variant, *key);
        }
    }

    // Longest variant first so "spring boot" wins over "spring"
    let mut variants: Vec<&str> = keys.keys().copied().collect();
    variants.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let alternation = variants
        .iter()
        .map(|variant| {
            let escaped = regex::escape(variant);
            if variant.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
                format!(r"{}\b", escaped)
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join("|");

    let pattern = Regex::new(&format!(r"(?i)\b(?:{})", alternation)).expect("Invalid skill vocabulary regex");

    CategoryMatcher { name, pattern, keys }
}

pub struct ResumeExtractor {
    config: ExtractionConfig,
    skills_header: Regex,
    skills_end_markers: Regex,
    item_delimiters: Regex,
    bullet_prefix: Regex,
    invalid_skill: RegexSet,
    email_regex: Regex,
    phone_patterns: Vec<Regex>,
    education_header: Regex,
    education_markers: Regex,
    degree_patterns: Vec<(Regex, DegreeLabel)>,
    year_regex: Regex,
    score_regex: Regex,
    institution_regex: Regex,
    experience_header: Regex,
    experience_markers: Regex,
    experience_line: Regex,
    experience_years_patterns: Vec<Regex>,
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeExtractor {
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        // Title case or upper case only, so prose such as "Improved team skills"
        // does not open a list
        let skills_header = Regex::new(
            r"^(?:(?:[A-Z][A-Za-z]*|&)\s+){0,2}(?:Skills?|SKILLS?|Competencies|COMPETENCIES|Technologies|TECHNOLOGIES)\s*:?\s*$",
        )
        .expect("Invalid skills header regex");
        let skills_end_markers = Regex::new(
            r"(?i)^(?:(?:work|professional)\s+experience|experience|employment(?:\s+history)?|work\s+history|education|(?:academic|educational)\s+qualifications?|projects?|certifications?|achievements|awards|summary|(?:career\s+)?objective|interests|hobbies|references)\s*:?\s*$",
        )
        .expect("Invalid skills end marker regex");
        let item_delimiters = Regex::new(r"[,;•\n|]").expect("Invalid delimiter regex");
        let bullet_prefix = Regex::new(r"^[-•*]\s*").expect("Invalid bullet regex");

        let invalid_skill = RegexSet::new([
            r"^\d+\s+years?",
            r"experience",
            r"^\w+:$",
            r":\s*$",
            r"\bat\s+\w+",
            r"^\d{4}\s*[-–]\s*\d{4}",
            r"bachelor|master|phd|degree",
            r"developed|implemented|worked|built",
            r"senior|junior|lead|principal",
            r"engineer|developer|scientist|analyst",
            r"programming\s+languages",
            r"web\s+technologies",
            r"tools?\s+&?\s*technologies",
            r"databases?:",
            r"^projects?$",
            r"^technical\s+skills?$",
        ])
        .expect("Invalid skill filter regex set");

        let email_regex =
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("Invalid email regex");

        let phone_patterns = [
            r"\b\d{10}\b",
            r"\b\d{5}\s?\d{5}\b",
            r"\+91[-\s]?\d{10}\b",
            r"\b91\d{10}\b",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Invalid phone regex"))
        .collect();

        let education_header = Regex::new(
            r"(?i)^(?:academic\s+qualifications?|educational\s+qualifications?|education)\s*:?\s*$",
        )
        .expect("Invalid education header regex");
        let education_markers =
            Regex::new(r"(?i)^(?:work|(?:professional\s+)?experience|skills|technical\s+skills|projects?)\b")
                .expect("Invalid education marker regex");

        let degree_patterns = [
            (
                r"(?i)\bB\.?\s?Tech\b(?:[ \t]+(?:CSE|CS|IT|ECE|EE|ME)\b)?(?:[ \t]+AI\s*&?\s*ML\b)?",
                DegreeLabel::BTech,
            ),
            (r"(?i)\bBachelor\s+of\s+Technology\b", DegreeLabel::BTech),
            (r"(?i)\bM\.?\s?Tech\b", DegreeLabel::MTech),
            (r"(?i)\bMaster\s+of\s+Technology\b", DegreeLabel::MTech),
            // Case-sensitive: "be" is an ordinary word
            (r"\bB\.?E\b\.?", DegreeLabel::BE),
            (r"(?i)\bBachelor\s+of\s+Engineering\b", DegreeLabel::BE),
            (r"(?i)\bBCA\b", DegreeLabel::Bca),
            (r"(?i)\bMCA\b", DegreeLabel::Mca),
            (r"(?i)\bMBA\b", DegreeLabel::Mba),
            (r"(?i)\b(?:12th|XII|Higher\s+Secondary)\b", DegreeLabel::Twelfth),
            (r"(?i:\b10th\b)|\bX\b", DegreeLabel::Tenth),
        ]
        .iter()
        .map(|(pattern, label)| (Regex::new(pattern).expect("Invalid degree regex"), *label))
        .collect();

        let year_regex = Regex::new(r"\b(?:19|20)\d{2}\b").expect("Invalid year regex");
        let score_regex = Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:%|cgpa)").expect("Invalid score regex");
        let institution_regex = Regex::new(r"[A-Z][A-Za-z \t]+(?:University|College|Board|Institute)")
            .expect("Invalid institution regex");

        let experience_header = Regex::new(
            r"(?i)^(?:work\s+experience|professional\s+experience|experience|employment(?:\s+history)?)\s*:?\s*$",
        )
        .expect("Invalid experience header regex");
        let experience_markers =
            Regex::new(r"(?i)^(?:education|academic\s+qualifications?|skills|technical\s+skills|projects?)\b")
                .expect("Invalid experience marker regex");
        let experience_line = Regex::new(
            r"(?i)\b((?:Software|Senior|Junior|Lead|Full Stack|Backend|Frontend|Data|ML|DevOps)?\s*(?:Engineer|Developer|Analyst|Manager|Intern))\s+at\s+([A-Za-z\s&,\.]+?)\s*\((\d{4}\s*[-–]\s*(?:\d{4}|Present|Current))",
        )
        .expect("Invalid experience line regex");

        let experience_years_patterns = [
            r"(?i)(\d+(?:\.\d+)?)\+?\s*years?\s+(?:of\s+)?experience",
            r"(?i)experience[:\s]+(\d+(?:\.\d+)?)\+?\s*years?",
            r"(?i)(\d+(?:\.\d+)?)\+?\s*yrs?\s+(?:of\s+)?experience",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Invalid experience years regex"))
        .collect();

        Self {
            config,
            skills_header,
            skills_end_markers,
            item_delimiters,
            bullet_prefix,
            invalid_skill,
            email_regex,
            phone_patterns,
            education_header,
            education_markers,
            degree_patterns,
            year_regex,
            score_regex,
            institution_regex,
            experience_header,
            experience_markers,
            experience_line,
            experience_years_patterns,
        }
    }

    /// Run every extractor over one text blob.
    pub fn parse_resume_full(&self, text: &str, filename: &str) -> ResumeProfile {
        let profile = ResumeProfile {
            text: text.to_string(),
            name: self.extract_name(text),
            email: self.extract_email(text),
            phone: self.extract_phone(text),
            skills: self.extract_skills_from_text(text),
            education: self.extract_education(text),
            work_experience: self.extract_work_experience(text),
            experience_years: self.extract_experience_years(text),
            filename: filename.to_string(),
        };

        debug!(
            "Extracted {} skills, {} education entries, {} work entries from {}",
            profile.skills.len(),
            profile.education.len(),
            profile.work_experience.len(),
            filename
        );

        profile
    }

    pub fn extract_name(&self, text: &str) -> Option<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(self.config.name_scan_lines)
            .filter(|line| {
                let upper = line.to_uppercase();
                !matches!(upper.as_str(), "RESUME" | "CV" | "CURRICULUM VITAE")
            })
            .find(|line| looks_like_name(line))
            .map(str::to_string)
    }

    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email_regex.find(text).map(|m| m.as_str().to_string())
    }

    /// First hit of the phone patterns, tried in order.
    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_patterns
            .iter()
            .find_map(|pattern| pattern.find(text))
            .map(|m| m.as_str().to_string())
    }

    /// Vocabulary hits anywhere in the text plus items listed under a skills
    /// heading, as sorted display names.
    pub fn extract_skills_from_text(&self, text: &str) -> Vec<String> {
        let mut skills = BTreeSet::new();

        for category in CATEGORY_MATCHERS.iter() {
            let before = skills.len();
            for found in category.pattern.find_iter(text) {
                let variant = found.as_str().to_lowercase();
                let Some(key) = category.keys.get(variant.as_str()) else {
                    continue;
                };
                let skill = capitalize_skill(key);
                if self.is_valid_skill(&skill) {
                    skills.insert(skill);
                }
            }
            if skills.len() > before {
                debug!("Category '{}' added {} skills", category.name, skills.len() - before);
            }
        }

        for skill in self.extract_skills_section(text) {
            skills.insert(skill);
        }

        skills.into_iter().collect()
    }

    fn extract_skills_section(&self, text: &str) -> Vec<String> {
        let end = SectionEnd::BlankLine {
            markers: &self.skills_end_markers,
        };
        let bodies = section_bodies(text, &self.skills_header, &end);
        debug!("Found {} skills sections", bodies.len());

        bodies
            .iter()
            .flat_map(|body| self.item_delimiters.split(body))
            .map(|item| self.bullet_prefix.replace(item.trim(), "").trim().to_string())
            .filter(|item| self.is_valid_skill(item))
            .map(|item| display_skill_name(&item))
            .collect()
    }

    /// Rejects sentence fragments, headings, dates and job titles that show up
    /// between list delimiters.
    pub fn is_valid_skill(&self, candidate: &str) -> bool {
        let length = candidate.chars().count();
        if length < self.config.min_skill_length || length > self.config.max_skill_length {
            return false;
        }

        !self.invalid_skill.is_match(&candidate.to_lowercase())
    }

    /// At most one entry per degree label, in pattern order.
    pub fn extract_education(&self, text: &str) -> Vec<EducationEntry> {
        let end = SectionEnd::Heading {
            markers: &self.education_markers,
        };
        let Some(section) = first_section_body(text, &self.education_header, &end) else {
            debug!("No education section found");
            return Vec::new();
        };

        let mut seen_degrees = HashSet::new();
        let mut education = Vec::new();

        for (pattern, label) in &self.degree_patterns {
            if seen_degrees.contains(label) {
                continue;
            }
            let Some(found) = pattern.find(&section) else {
                continue;
            };
            seen_degrees.insert(*label);

            let context = context_window(
                &section,
                found.start(),
                found.end(),
                self.config.context_before,
                self.config.context_after,
            );

            education.push(EducationEntry {
                degree: *label,
                matched_text: found.as_str().trim().to_string(),
                institution: self
                    .institution_regex
                    .find(context)
                    .map(|m| m.as_str().trim().to_string()),
                year: self.year_regex.find(context).map(|m| m.as_str().to_string()),
                score: self.score_regex.find(context).map(|m| m.as_str().to_string()),
            });
        }

        education
    }

    /// `Title at Company (YYYY-YYYY|Present)` lines, deduplicated by title and
    /// company.
    pub fn extract_work_experience(&self, text: &str) -> Vec<WorkExperienceEntry> {
        let end = SectionEnd::Heading {
            markers: &self.experience_markers,
        };
        let Some(section) = first_section_body(text, &self.experience_header, &end) else {
            debug!("No experience section found");
            return Vec::new();
        };

        let mut seen_entries = HashSet::new();
        let mut experiences = Vec::new();

        for line in section.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let Some(caps) = self.experience_line.captures(line) else {
                continue;
            };

            let title = caps[1].trim().to_string();
            let company = caps[2].trim().to_string();
            if !seen_entries.insert((title.clone(), company.clone())) {
                continue;
            }

            experiences.push(WorkExperienceEntry {
                title,
                company,
                duration: caps[3].trim().to_string(),
            });
        }

        experiences
    }

    pub fn extract_experience_years(&self, text: &str) -> Option<f64> {
        self.experience_years_patterns
            .iter()
            .filter_map(|pattern| pattern.captures(text))
            .find_map(|caps| caps[1].parse::<f64>().ok())
    }
}

/// One to four tokens, each alphabetic once trailing periods are dropped.
fn looks_like_name(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() > 4 {
        return false;
    }

    tokens.iter().all(|token| {
        let stem = token.trim_end_matches('.');
        !stem.is_empty() && stem.chars().all(char::is_alphabetic)
    })
}

/// Slice of `text` reaching `before` characters ahead of `start` and `after`
/// characters past `end`, clamped to the text.
fn context_window(text: &str, start: usize, end: usize, before: usize, after: usize) -> &str {
    let from = if before == 0 {
        start
    } else {
        text[..start]
            .char_indices()
            .rev()
            .nth(before - 1)
            .map_or(0, |(idx, _)| idx)
    };
    let to = text[end..]
        .char_indices()
        .nth(after)
        .map_or(text.len(), |(idx, _)| end + idx);

    &text[from..to]
}
