//! Best-effort parser for unit "uniques" strings.
//!
//! Uniques are free-form mod text like `[+25]% Strength <vs cities>` or
//! "Self-destructs when attacking". Each string is checked against a fixed
//! priority-ordered pattern table; the first matching pattern extracts one
//! [Modifier]. Strings that match nothing, or whose numeric capture fails
//! to parse, are skipped without error — mod uniques are free-form and this
//! tool is deliberately best-effort, not a validator.

use serde::Serialize;

/// Normalized effect of one unique string on the force formula.
///
/// Percent values are stored as written in the unique (25.0 for `[+25]%`,
/// negative for penalties). The calculator owns all combination rules;
/// the parser reports each match independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Modifier {
    /// `[N]% Strength` conditional on cities (attack or defense).
    StrengthVsCities(f64),
    /// `[N]% Strength <when attacking>`.
    StrengthWhenAttacking(f64),
    /// `[N]% Strength <when defending>`.
    StrengthWhenDefending(f64),
    /// `[N]% Strength` on a particular terrain (`<in [Forest] tiles>` etc.).
    StrengthOnTerrain(f64),
    /// `[N]% Strength <vs [X]>` for any other target filter.
    StrengthVsUnits(f64),
    /// Extra attacks per turn beyond the first.
    ExtraAttacks(u32),
    /// Unit can paradrop.
    Paradrop,
    /// Must set up to ranged attack.
    MustSetUp,
    /// Self-destructs when attacking.
    SelfDestructs,
    /// Nuclear weapon (flat force bonus).
    NuclearWeapon,
}

/// One entry of the pattern table: a cheap matcher plus an extractor.
///
/// `matches` decides whether this pattern claims the (lowercased) string;
/// `extract` pulls the numeric parameters out. A claimed string whose
/// extraction fails yields no record — later patterns are not retried.
pub struct Pattern {
    pub name: &'static str,
    matches: fn(&str) -> bool,
    extract: fn(&str) -> Option<Modifier>,
}

/// Pattern table in priority order. Adding a recognized phrasing means
/// adding one entry here; the parse loop never changes.
pub static PATTERNS: &[Pattern] = &[
    Pattern {
        name: "nuclear_weapon",
        matches: |text| text.contains("nuclear weapon"),
        extract: |_| Some(Modifier::NuclearWeapon),
    },
    Pattern {
        name: "self_destructs",
        matches: |text| {
            text.contains("self-destruct")
                || text.contains("self destruct")
                || text.contains("suicide")
                || text.contains("explodes when attacking")
        },
        extract: |_| Some(Modifier::SelfDestructs),
    },
    Pattern {
        name: "must_set_up",
        matches: |text| text.contains("must set up"),
        extract: |_| Some(Modifier::MustSetUp),
    },
    Pattern {
        name: "paradrop",
        matches: |text| text.contains("paradrop") || text.contains("paratroop"),
        extract: |_| Some(Modifier::Paradrop),
    },
    Pattern {
        name: "extra_attacks",
        matches: |text| {
            text.contains("additional attack")
                || text.contains("extra attack")
                || text.contains("attack twice")
                || text.contains("attacks twice")
                || (text.contains("attack") && text.contains("per turn"))
        },
        extract: extract_extra_attacks,
    },
    Pattern {
        name: "percent_strength",
        matches: |text| text.contains('%') && text.contains("strength"),
        extract: extract_percent_strength,
    },
];

/// Parse a list of unique strings into modifier records, skipping anything
/// unrecognized. Never fails; an empty or all-unmatched input yields an
/// empty list.
pub fn parse_uniques(uniques: &[String]) -> Vec<Modifier> {
    uniques.iter().filter_map(|raw| parse_unique(raw)).collect()
}

/// Parse a single unique string. First matching pattern wins; `None` means
/// the string is unrecognized or its numeric capture was malformed.
pub fn parse_unique(raw: &str) -> Option<Modifier> {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    PATTERNS
        .iter()
        .find(|pattern| (pattern.matches)(&text))
        .and_then(|pattern| (pattern.extract)(&text))
}

/// Contents of every `<...>` conditional tag in `text`, in order.
fn angle_tags(text: &str) -> Vec<&str> {
    let mut tags = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) => {
                tags.push(after[..close].trim());
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    tags
}

/// Parse `+25` / `-25` / `25` into a finite f64.
fn parse_signed_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_start_matches('+');
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Find the percent value of a `[N]% Strength` span: the bracketed group
/// whose closing bracket is followed by `%` and then `strength`.
fn percent_before_strength(text: &str) -> Option<f64> {
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let close = after.find(']')?;
        let group = &after[..close];
        let tail = after[close + 1..].trim_start();
        if let Some(stripped) = tail.strip_prefix('%') {
            if stripped.trim_start().starts_with("strength") {
                return parse_signed_number(group);
            }
        }
        rest = &after[close + 1..];
    }
    None
}

/// Classify a percent-strength unique by its conditional tags. Untagged
/// percent bonuses are not part of the force formula and yield nothing.
fn extract_percent_strength(text: &str) -> Option<Modifier> {
    let percent = percent_before_strength(text)?;
    let tags = angle_tags(text);
    if tags.iter().any(|tag| tag.contains("city") || tag.contains("cities")) {
        return Some(Modifier::StrengthVsCities(percent));
    }
    if tags.iter().any(|tag| tag.contains("when attacking")) {
        return Some(Modifier::StrengthWhenAttacking(percent));
    }
    if tags.iter().any(|tag| tag.contains("when defending")) {
        return Some(Modifier::StrengthWhenDefending(percent));
    }
    if tags.iter().any(|tag| tag.starts_with("in ") || tag.contains("tiles")) {
        return Some(Modifier::StrengthOnTerrain(percent));
    }
    if tags.iter().any(|tag| tag.starts_with("vs ")) {
        return Some(Modifier::StrengthVsUnits(percent));
    }
    None
}

/// Number of extra attacks per turn, from the common phrasings:
/// `[2] additional attacks per turn`, `1 extra attack`, `may attack twice`,
/// or `2 attacks per turn` (counted beyond the first).
fn extract_extra_attacks(text: &str) -> Option<Modifier> {
    if let Some(digits) = digits_before(text, "additional attack")
        .or_else(|| digits_before(text, "extra attack"))
    {
        // A digit run that does not fit a count is a malformed capture;
        // it must not fall back to the count-free phrasings below.
        let count = digits.parse::<u32>().ok()?;
        return (count > 0).then_some(Modifier::ExtraAttacks(count));
    }
    if text.contains("per turn") {
        if let Some(digits) = digits_before(text, "attack") {
            let count = digits.parse::<u32>().ok()?;
            if count > 1 {
                return Some(Modifier::ExtraAttacks(count - 1));
            }
        }
    }
    if text.contains("attack twice") || text.contains("attacks twice") || text.contains("extra attack")
    {
        return Some(Modifier::ExtraAttacks(1));
    }
    None
}

/// The digit run (bare or bracketed) immediately preceding `needle`.
/// Scans char-wise from the end; anything non-ASCII before the digits is
/// simply where the run stops, never a slicing hazard.
fn digits_before<'a>(text: &'a str, needle: &str) -> Option<&'a str> {
    let position = text.find(needle)?;
    let head = text[..position].trim_end();
    let head = head.strip_suffix(']').unwrap_or(head);
    let digits_start = head
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let digits = &head[digits_start..];
    (!digits.is_empty()).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(strings: &[&str]) -> Vec<String> {
        strings.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn city_percent_is_extracted() {
        let parsed = parse_unique("[+25]% Strength <vs cities>");
        assert_eq!(parsed, Some(Modifier::StrengthVsCities(25.0)));
    }

    #[test]
    fn negative_percent_is_preserved() {
        let parsed = parse_unique("[-10]% Strength <vs [Mounted] units>");
        assert_eq!(parsed, Some(Modifier::StrengthVsUnits(-10.0)));
    }

    #[test]
    fn attack_and_defend_tags_are_distinguished() {
        assert_eq!(
            parse_unique("[+33]% Strength <when attacking>"),
            Some(Modifier::StrengthWhenAttacking(33.0))
        );
        assert_eq!(
            parse_unique("[+25]% Strength <when defending>"),
            Some(Modifier::StrengthWhenDefending(25.0))
        );
    }

    #[test]
    fn city_tag_beats_attacking_tag() {
        // "vs cities when attacking" style double conditionals count as city.
        let parsed = parse_unique("[+100]% Strength <vs cities> <when attacking>");
        assert_eq!(parsed, Some(Modifier::StrengthVsCities(100.0)));
    }

    #[test]
    fn terrain_tag_is_recognized() {
        let parsed = parse_unique("[+33]% Strength <in [Forest] tiles>");
        assert_eq!(parsed, Some(Modifier::StrengthOnTerrain(33.0)));
    }

    #[test]
    fn untagged_percent_yields_nothing() {
        assert_eq!(parse_unique("[+10]% Strength"), None);
    }

    #[test]
    fn flags_are_recognized() {
        assert_eq!(
            parse_unique("Self-destructs when attacking"),
            Some(Modifier::SelfDestructs)
        );
        assert_eq!(
            parse_unique("Must set up to ranged attack"),
            Some(Modifier::MustSetUp)
        );
        assert_eq!(parse_unique("May Paradrop up to [5] tiles"), Some(Modifier::Paradrop));
        assert_eq!(
            parse_unique("Nuclear weapon of Strength [1]"),
            Some(Modifier::NuclearWeapon)
        );
    }

    #[test]
    fn extra_attack_phrasings() {
        assert_eq!(
            parse_unique("[1] additional attack per turn"),
            Some(Modifier::ExtraAttacks(1))
        );
        assert_eq!(parse_unique("2 extra attacks"), Some(Modifier::ExtraAttacks(2)));
        assert_eq!(parse_unique("May attack twice"), Some(Modifier::ExtraAttacks(1)));
        assert_eq!(
            parse_unique("3 attacks per turn"),
            Some(Modifier::ExtraAttacks(2))
        );
    }

    #[test]
    fn multibyte_text_before_a_count_still_parses() {
        // '№' is multibyte; the digit scan must stop at a char boundary.
        assert_eq!(parse_unique("№2 extra attacks"), Some(Modifier::ExtraAttacks(2)));
        assert_eq!(
            parse_unique("→3 attacks per turn"),
            Some(Modifier::ExtraAttacks(2))
        );
        assert_eq!(parse_unique("über attack twice"), Some(Modifier::ExtraAttacks(1)));
    }

    #[test]
    fn overflowing_count_is_a_malformed_capture() {
        // Digits were present but unparseable: skip, no count-free fallback.
        assert_eq!(parse_unique("99999999999 extra attacks"), None);
        assert_eq!(parse_unique("[99999999999] additional attacks per turn"), None);
    }

    #[test]
    fn unrecognized_strings_are_skipped_silently() {
        let parsed = parse_uniques(&owned(&[
            "Founds a new city",
            "May upgrade for free",
            "",
        ]));
        assert!(parsed.is_empty());
    }

    #[test]
    fn malformed_numeric_capture_is_skipped() {
        // Matches the percent-strength pattern but the capture is not a number.
        assert_eq!(parse_unique("[ten]% Strength <vs cities>"), None);
    }

    #[test]
    fn matched_pattern_with_failed_capture_does_not_fall_through() {
        // Claims the percent pattern, fails extraction, and must not be
        // retried against later entries.
        let parsed = parse_uniques(&owned(&["[x]% Strength <vs cities>"]));
        assert!(parsed.is_empty());
    }

    #[test]
    fn duplicates_are_reported_independently() {
        let parsed = parse_uniques(&owned(&[
            "[+25]% Strength <vs cities>",
            "[+50]% Strength <vs cities>",
        ]));
        assert_eq!(
            parsed,
            vec![
                Modifier::StrengthVsCities(25.0),
                Modifier::StrengthVsCities(50.0)
            ]
        );
    }

    #[test]
    fn parsing_is_idempotent() {
        let input = owned(&[
            "[+25]% Strength <vs cities>",
            "Must set up to ranged attack",
            "not a unique at all",
        ]);
        assert_eq!(parse_uniques(&input), parse_uniques(&input));
    }

    #[test]
    fn angle_tags_scan_in_order() {
        assert_eq!(angle_tags("<one> <two >"), vec!["one", "two"]);
        assert!(angle_tags("no tags here").is_empty());
    }
}
