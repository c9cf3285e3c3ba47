//! `{placeholder}` substitution for localized message templates

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// Replace every `{name}` in `template` with its value from `vars`.
///
/// Placeholders without a value are left as written.
pub fn render<'t>(template: &'t str, vars: &[(&str, String)]) -> Cow<'t, str> {
    PLACEHOLDER.replace_all(template, |caps: &Captures| {
        let name = &caps[1];
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => value.clone(),
            None => caps[0].to_string(),
        }
    })
}

/// Percent with one decimal, as shown in range messages
pub fn format_percent(percent: f64) -> String {
    format!("{percent:.1}")
}

/// Number without a trailing `.0` when it is whole
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
