use super::model::{AccessLevel, Category};

const LOW_KEYWORDS: [&str; 3] = ["low", "poor", "1"];
const MEDIUM_KEYWORDS: [&str; 3] = ["medium", "partial", "2"];

/// Map a raw accessibility cell onto the traffic-light scale.
///
/// Numbers: `<= 1` is low, exactly `2` is medium, everything else high.
/// Text is matched case-insensitively by keyword, low keywords first.
/// Anything unrecognised (including a missing cell) falls back to high.
pub fn classify(level: &AccessLevel) -> Category {
    match level {
        AccessLevel::Numeric(v) => {
            if *v <= 1.0 {
                Category::Low
            } else if *v == 2.0 {
                Category::Medium
            } else {
                Category::High
            }
        }
        AccessLevel::Text(s) => classify_text(s),
        AccessLevel::Missing => Category::High,
    }
}

fn classify_text(s: &str) -> Category {
    let lower = s.to_lowercase();
    if LOW_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Category::Low
    } else if MEDIUM_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Category::Medium
    } else {
        Category::High
    }
}
