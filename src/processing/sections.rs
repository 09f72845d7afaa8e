//! Locating resume sections by their header lines

use regex::Regex;

/// How a section body is terminated once its header has been found.
pub enum SectionEnd<'a> {
    /// First blank line, a line opening another known section, or an
    /// all-caps heading with a trailing colon. A bare all-caps line such as
    /// `AWS` stays in the body.
    BlankLine { markers: &'a Regex },
    /// An all-caps heading that follows a blank line, or a line opening with
    /// one of the marker words.
    Heading { markers: &'a Regex },
}

/// Bodies of every section whose header line matches `header`, in document
/// order. Header lines are matched after trimming.
pub fn section_bodies(text: &str, header: &Regex, end: &SectionEnd<'_>) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut bodies = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        if !header.is_match(lines[idx].trim()) {
            idx += 1;
            continue;
        }

        let start = idx + 1;
        let stop = find_section_end(&lines, start, header, end);
        let body = lines[start..stop].join("\n");
        if !body.trim().is_empty() {
            bodies.push(body);
        }
        idx = stop.max(start);
    }

    bodies
}

/// Body of the first matching section only.
pub fn first_section_body(text: &str, header: &Regex, end: &SectionEnd<'_>) -> Option<String> {
    section_bodies(text, header, end).into_iter().next()
}

fn find_section_end(lines: &[&str], start: usize, header: &Regex, end: &SectionEnd<'_>) -> usize {
    let mut previous_blank = false;

    for (idx, line) in lines.iter().enumerate().skip(start) {
        let trimmed = line.trim();

        // A repeated header opens a new section of the same kind
        if header.is_match(trimmed) {
            return idx;
        }

        match end {
            SectionEnd::BlankLine { markers } => {
                if trimmed.is_empty() || markers.is_match(trimmed) {
                    return idx;
                }
                if trimmed.ends_with(':') && is_all_caps_heading(trimmed) {
                    return idx;
                }
            }
            SectionEnd::Heading { markers } => {
                if previous_blank && is_all_caps_heading(trimmed) {
                    return idx;
                }
                if markers.is_match(trimmed) {
                    return idx;
                }
            }
        }

        previous_blank = trimmed.is_empty();
    }

    lines.len()
}

/// A line such as `WORK EXPERIENCE` or `PROJECTS:`: starts with a letter, has at
/// least two letters, no lowercase letters and no list delimiters.
pub fn is_all_caps_heading(line: &str) -> bool {
    let heading = line.trim().trim_end_matches(':').trim_end();

    let starts_with_letter = heading.chars().next().is_some_and(char::is_alphabetic);
    let letters = heading.chars().filter(|c| c.is_alphabetic()).count();
    let has_lowercase = heading.chars().any(char::is_lowercase);
    let has_delimiters = heading.contains([',', ';', '|', '•']);

    starts_with_letter && letters >= 2 && !has_lowercase && !has_delimiters
}
