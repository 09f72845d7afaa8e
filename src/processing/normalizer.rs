//! Skill normalization used as the equality key for matching and scoring.
//!
//! Abbreviations are expanded to their verbose lowercase form here. The
//! human-facing direction (abbreviation to proper-cased name) lives in
//! [`crate::processing::display`]; the two tables must stay separate.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

pub struct SkillNormalizer {
    synonyms: HashMap<&'static str, &'static str>,
    disallowed_chars: Regex,
    whitespace: Regex,
}

/// Overlap statistics between two skill lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillOverlap {
    pub matching: Vec<String>,
    pub only_in_first: Vec<String>,
    pub only_in_second: Vec<String>,
    pub overlap_ratio: f64,
    pub match_count: usize,
    pub total_unique: usize,
}

impl Default for SkillNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillNormalizer {
    pub fn new() -> Self {
        let disallowed_chars = Regex::new(r"[^\w\s+#/-]").expect("Invalid disallowed-chars regex");
        let whitespace = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            synonyms: Self::create_synonyms(),
            disallowed_chars,
            whitespace,
        }
    }

    /// Canonicalize one raw skill token. Returns an empty string when nothing
    /// survives cleaning; callers drop those.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let stripped = self.disallowed_chars.replace_all(lowered.trim(), "");
        let collapsed = self.whitespace.replace_all(stripped.trim(), " ");

        match self.synonyms.get(&*collapsed) {
            Some(canonical) => canonical.to_string(),
            None => collapsed.into_owned(),
        }
    }

    /// Normalize each skill, drop empties and keep the first occurrence of each.
    pub fn normalize_many<S: AsRef<str>>(&self, raws: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for raw in raws {
            let skill = self.normalize(raw.as_ref());
            if !skill.is_empty() && seen.insert(skill.clone()) {
                result.push(skill);
            }
        }

        result
    }

    /// Space-joined normalized skills, the document form fed to the vectorizer.
    pub fn skills_to_text<S: AsRef<str>>(&self, skills: &[S]) -> String {
        self.normalize_many(skills).join(" ")
    }

    pub fn calculate_skill_overlap<S: AsRef<str>>(&self, first: &[S], second: &[S]) -> SkillOverlap {
        let set1: BTreeSet<String> = self.normalize_many(first).into_iter().collect();
        let set2: BTreeSet<String> = self.normalize_many(second).into_iter().collect();

        let matching: Vec<String> = set1.intersection(&set2).cloned().collect();
        let only_in_first: Vec<String> = set1.difference(&set2).cloned().collect();
        let only_in_second: Vec<String> = set2.difference(&set1).cloned().collect();

        let total_unique = set1.union(&set2).count();
        let overlap_ratio = if total_unique > 0 {
            matching.len() as f64 / total_unique as f64
        } else {
            0.0
        };

        SkillOverlap {
            match_count: matching.len(),
            matching,
            only_in_first,
            only_in_second,
            overlap_ratio,
            total_unique,
        }
    }

    /// Abbreviation to verbose canonical form
    fn create_synonyms() -> HashMap<&'static str, &'static str> {
        [
            ("js", "javascript"),
            ("ts", "typescript"),
            ("py", "python"),
            ("ml", "machine learning"),
            ("ai", "artificial intelligence"),
            ("dl", "deep learning"),
            ("nlp", "natural language processing"),
            ("cv", "computer vision"),
            ("db", "database"),
            ("sql", "structured query language"),
            ("nosql", "non-relational database"),
            ("aws", "amazon web services"),
            ("gcp", "google cloud platform"),
            ("k8s", "kubernetes"),
            ("ci/cd", "continuous integration continuous deployment"),
            ("rest", "restful api"),
            ("api", "application programming interface"),
        ]
        .into_iter()
        .collect()
    }
}
