//! Display-oriented skill names: abbreviation to proper-cased canonical form.
//!
//! Not interchangeable with [`crate::processing::normalizer::SkillNormalizer`],
//! which produces verbose lowercase matching keys.

use std::collections::HashMap;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

static DISPLAY_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("python", "Python"),
        ("java", "Java"),
        ("javascript", "JavaScript"),
        ("js", "JavaScript"),
        ("typescript", "TypeScript"),
        ("ts", "TypeScript"),
        ("c++", "C++"),
        ("c#", "C#"),
        ("node.js", "Node.js"),
        ("nodejs", "Node.js"),
        ("react", "React"),
        ("angular", "Angular"),
        ("vue", "Vue"),
        ("django", "Django"),
        ("flask", "Flask"),
        ("fastapi", "FastAPI"),
        ("sql", "SQL"),
        ("mysql", "MySQL"),
        ("postgresql", "PostgreSQL"),
        ("mongodb", "MongoDB"),
        ("redis", "Redis"),
        ("aws", "AWS"),
        ("azure", "Azure"),
        ("gcp", "GCP"),
        ("docker", "Docker"),
        ("kubernetes", "Kubernetes"),
        ("k8s", "Kubernetes"),
        ("git", "Git"),
        ("github", "GitHub"),
        ("gitlab", "GitLab"),
        ("html", "HTML"),
        ("css", "CSS"),
        ("rest api", "REST API"),
        ("graphql", "GraphQL"),
        ("grpc", "gRPC"),
        ("tensorflow", "TensorFlow"),
        ("pytorch", "PyTorch"),
        ("scikit-learn", "Scikit-learn"),
        ("machine learning", "Machine Learning"),
        ("ml", "Machine Learning"),
        ("deep learning", "Deep Learning"),
        ("nlp", "NLP"),
        ("computer vision", "Computer Vision"),
        ("pandas", "Pandas"),
        ("numpy", "NumPy"),
        ("ci/cd", "CI/CD"),
        ("devops", "DevOps"),
        ("php", "PHP"),
    ]
    .into_iter()
    .collect()
});

/// Proper-cased display name for a known skill, or the trimmed input unchanged.
pub fn display_skill_name(raw: &str) -> String {
    let trimmed = raw.trim();
    match DISPLAY_NAMES.get(trimmed.to_lowercase().as_str()) {
        Some(name) => name.to_string(),
        None => trimmed.to_string(),
    }
}

/// Title-case every word, then resolve through the display table. Used for
/// vocabulary hits that arrive lowercased.
pub fn capitalize_skill(raw: &str) -> String {
    display_skill_name(&title_case(raw.trim()))
}

fn title_case(text: &str) -> String {
    text.split_word_bounds()
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_alphabetic() => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                _ => segment.to_string(),
            }
        })
        .collect()
}
