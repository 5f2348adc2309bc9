/// Round to two decimal places
pub fn round_to_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Average of `total` over `count`, rounded to two decimals. Zero when `count` is zero.
pub fn average(total: u32, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round_to_2(total as f64 / count as f64)
}

/// Option label for a zero-based index: 0 -> 'A', 1 -> 'B', ...
pub fn option_letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Validate team name format
pub fn validate_team_name(name: &str) -> bool {
    !name.trim().is_empty() && name.len() <= 100
}

/// Interpret a free-text true/false answer. `None` when the token is not recognised.
pub fn parse_truthy(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Closest candidate to `name` by Jaro-Winkler similarity, if any is close enough
pub fn closest_name<'a, I>(name: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    const THRESHOLD: f64 = 0.85;

    let target = name.to_lowercase();
    candidates
        .into_iter()
        .map(|c| (c, strsim::jaro_winkler(&target, &c.to_lowercase())))
        .filter(|(_, score)| *score >= THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(c, _)| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average() {
        assert_eq!(average(9, 3), 3.0);
        assert_eq!(average(10, 3), 3.33);
        assert_eq!(average(5, 0), 0.0);
    }

    #[test]
    fn test_option_letter() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Brighton & Hove <Albion>"), "Brighton &amp; Hove &lt;Albion&gt;");
        assert_eq!(escape_html("\"q\""), "&quot;q&quot;");
    }

    #[test]
    fn test_validate_team_name() {
        assert!(validate_team_name("Celtic"));
        assert!(!validate_team_name("   "));
        assert!(!validate_team_name(&"x".repeat(101)));
    }

    #[test]
    fn test_parse_truthy() {
        assert_eq!(parse_truthy(" Yes "), Some(true));
        assert_eq!(parse_truthy("F"), Some(false));
        assert_eq!(parse_truthy("perhaps"), None);
    }

    #[test]
    fn test_closest_name() {
        let names = ["Celtic", "Malmö FF", "Juventus"];
        assert_eq!(closest_name("Celtc", names), Some("Celtic".to_string()));
        assert_eq!(closest_name("Malmo FF", names), Some("Malmö FF".to_string()));
        assert_eq!(closest_name("Barcelona", names), None);
    }
}
