use regex::Regex;
use std::sync::LazyLock;

use crate::schedule::WEEKDAYS;

use super::anchors::HOUR_LABEL_RE;

const COPYRIGHT_GLYPH: char = '©';

static LOCATION_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(ITIS|IPSIA|Lab\.)\b").expect("valid location label regex"));

// "Rossi M.", "Müller K." — surname then dotted initial.
static TEACHER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-zÀ-ÖØ-öø-ÿ]+\s+[A-Z]\.").expect("valid teacher name regex")
});

pub(super) fn is_subject_candidate(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    !is_weekday_label(text)
        && !is_hour_label(text)
        && !is_decorative(text)
        && !is_location_label(text)
        && !is_teacher_name(text)
}

pub(super) fn is_weekday_label(text: &str) -> bool {
    WEEKDAYS.contains(&text)
}

pub(crate) fn is_hour_label(text: &str) -> bool {
    HOUR_LABEL_RE.is_match(text.trim())
}

pub(super) fn is_decorative(text: &str) -> bool {
    text.contains(COPYRIGHT_GLYPH)
}

pub(super) fn is_location_label(text: &str) -> bool {
    LOCATION_LABEL_RE.is_match(text)
}

pub(super) fn is_teacher_name(text: &str) -> bool {
    TEACHER_NAME_RE.is_match(text)
}
