//! Input-shape rules for [`TextStep`](crate::steps::TextStep).

/// A check on raw text. `Err` carries the message shown before re-asking.
pub type Rule = std::sync::Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Hostname-style server names: 1-63 characters of lowercase letters,
/// digits and `-`, not starting or ending with `-`.
pub fn server_name_rule(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > 63 {
        return Err("Server names must be 1-63 characters long.".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Use only lowercase letters, digits and '-'.".to_string());
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err("Server names cannot start or end with '-'.".to_string());
    }
    Ok(())
}

/// Reject answers longer than `max` characters.
pub fn max_len(max: usize) -> impl Fn(&str) -> Result<(), String> + Send + Sync + 'static {
    move |text: &str| {
        if text.chars().count() > max {
            Err(format!("At most {} characters, please.", max))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_name_rule() {
        assert!(server_name_rule("web-01").is_ok());
        assert!(server_name_rule("a").is_ok());
        assert!(server_name_rule("").is_err());
        assert!(server_name_rule("Web").is_err());
        assert!(server_name_rule("web_01").is_err());
        assert!(server_name_rule("-web").is_err());
        assert!(server_name_rule("web-").is_err());
        assert!(server_name_rule(&"x".repeat(64)).is_err());
    }

    #[test]
    fn test_max_len_counts_chars() {
        let rule = max_len(3);
        assert!(rule("äbc").is_ok());
        assert!(rule("abcd").is_err());
    }
}
