//! String helpers shared by the manipulators and the generator.

use crate::error::{Error, Result};

/// Convert PascalCase to snake_case.
///
/// Every uppercase letter after the first character gets a preceding
/// underscore, so acronyms are split letter by letter (`HTTPClient` becomes
/// `h_t_t_p_client`).
pub fn to_snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert snake_case to PascalCase.
pub fn to_pascal_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Whether `name` is an ASCII identifier: a letter or `_` followed by letters, digits or `_`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Reject empty or malformed bundle names before any file is touched.
pub fn validate_bundle_name(bundle: &str) -> Result<()> {
    if is_identifier(bundle) {
        Ok(())
    } else {
        Err(Error::InvalidBundleName(bundle.to_string()))
    }
}

/// Snake-cased bundle name without its `Bundle` suffix (`AcmeBlogBundle` -> `acme_blog`).
pub fn bundle_base_name(bundle: &str) -> String {
    let short = bundle.strip_suffix("Bundle").unwrap_or(bundle);
    to_snake_case(short)
}

/// Remove every `{...}` placeholder span from a route.
///
/// Spans close at the first `}`, so `/{/foo}` is removed as a whole. An
/// unterminated `{` is kept verbatim.
pub fn strip_placeholders(route: &str) -> String {
    let mut out = String::with_capacity(route.len());
    let mut rest = route;
    while let Some(open) = rest.find('{') {
        match rest[open..].find('}') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Literal path segments of a route prefix, in order, with placeholders and
/// empty segments removed.
///
/// Segments are lowercased and every character outside `[a-z0-9]` becomes a
/// single `_` separator, so `/{_locale}/Api-V1` yields `["api_v1"]`.
pub fn literal_segments(prefix: &str) -> Vec<String> {
    strip_placeholders(prefix)
        .split('/')
        .map(sanitize_segment)
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn sanitize_segment(segment: &str) -> String {
    segment
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Class name generated for a console command (`app:foo-bar` -> `FooBarCommand`).
///
/// The name is made of `:`-separated parts; only the last one names the class.
pub fn command_class_name(name: &str) -> Result<String> {
    let invalid = || Error::InvalidCommandName(name.to_string());
    let valid_part = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    if !name.split(':').all(valid_part) {
        return Err(invalid());
    }

    let last = name.rsplit(':').next().unwrap_or(name);
    let words: String = last
        .split(|c: char| !c.is_ascii_alphanumeric())
        .collect::<Vec<_>>()
        .join("_");
    let class = to_pascal_case(&words);
    if !class.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }
    Ok(format!("{class}Command"))
}

/// Placeholder names of a route (`/{id}/{slug}` -> `["id", "slug"]`).
pub fn route_placeholders(route: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = route;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        names.push(rest[open + 1..open + close].to_string());
        rest = &rest[open + close + 1..];
    }
    names
}

/// Action name without its `Action` suffix (`showPageAction` -> `showPage`).
pub fn action_base(action: &str) -> &str {
    action.strip_suffix("Action").unwrap_or(action)
}
