/// Ordered (category, keywords) pairs. Order is the tie-break: when two
/// categories score the same, the one listed first wins.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "frontend",
        &["frontend", "front-end", "front end", "react", "vue", "angular"],
    ),
    (
        "backend",
        &[
            "backend", "back-end", "back end", "server", "node", "django", "spring", "api",
        ],
    ),
    (
        "mobile",
        &["mobile", "android", "ios", "flutter", "swift", "kotlin"],
    ),
    (
        "devops",
        &["devops", "sre", "infra", "kubernetes", "cloud", "platform"],
    ),
    (
        "data",
        &["data", "machine learning", "analytics", "scientist"],
    ),
    ("security", &["security", "secops", "penetration"]),
    ("fullstack", &["fullstack", "full-stack", "full stack"]),
];

pub const OTHER_CATEGORY: &str = "other";

/// Score each category by how many of its keywords appear as substrings of
/// the lowercased title; highest nonzero score wins, first-listed wins ties.
pub fn classify(title: &str) -> &'static str {
    let lowered = title.to_lowercase();

    let mut best: Option<(&'static str, usize)> = None;
    for (category, keywords) in CATEGORIES {
        let score = keywords.iter().filter(|kw| lowered.contains(*kw)).count();
        if score == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= score => {}
            _ => best = Some((category, score)),
        }
    }

    best.map(|(category, _)| category).unwrap_or(OTHER_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_title_with_two_keywords() {
        assert_eq!(classify("Senior Backend Engineer (Node)"), "backend");
    }

    #[test]
    fn no_keyword_match_is_other() {
        assert_eq!(classify("Technical Writer"), "other");
        assert_eq!(classify(""), "other");
    }

    #[test]
    fn tie_goes_to_first_listed_category() {
        // One frontend keyword (react), one backend keyword (django):
        // frontend is listed first, so it wins the tie.
        assert_eq!(classify("React + Django Developer"), "frontend");
    }

    #[test]
    fn higher_score_beats_earlier_category() {
        // frontend scores 1 (react), mobile scores 2 (mobile, android).
        assert_eq!(classify("Mobile Android Engineer (React Native)"), "mobile");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("DEVOPS / SRE"), "devops");
    }
}
