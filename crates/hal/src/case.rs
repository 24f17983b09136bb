//! Key casing conversions used by URL templating and key normalization.

/// Converts camelCase or PascalCase to snake_case.
///
/// An underscore goes before an uppercase letter that follows a lowercase
/// letter or digit, and before the last letter of an uppercase run that is
/// followed by a lowercase letter. Everything is lowercased afterwards.
///
/// ```
/// use helios_hal::case::camel_to_snake;
///
/// assert_eq!(camel_to_snake("postId"), "post_id");
/// assert_eq!(camel_to_snake("UserID"), "user_id");
/// assert_eq!(camel_to_snake("XMLHttp"), "xml_http");
/// ```
pub fn camel_to_snake(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            let starts_word = (prev.is_alphanumeric() && !prev.is_uppercase())
                || (prev.is_uppercase() && next_is_lower);
            if starts_word {
                result.push('_');
            }
        }
        result.extend(ch.to_lowercase());
    }
    result
}

/// Converts snake_case or kebab-case to PascalCase.
///
/// Words are lowercased before capitalizing, so `USER_ID` gives `UserId`.
pub fn snake_to_pascal(s: &str) -> String {
    s.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// PascalCase with the first character lowercased.
pub fn lower_first_camel(s: &str) -> String {
    let pascal = snake_to_pascal(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}
