// crates/realizer/src/template.rs
//! Surface templates and the variable substitution that fills them.

use std::collections::HashMap;

use eunlg_types::FactKind;

/// One surface form for a (fact kind, text key) pair, in both headline
/// and body register.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub kind: FactKind,
    pub text_key: &'static str,
    pub headline: &'static str,
    pub body: &'static str,
}

/// Render a template string with variable substitution.
///
/// Supports `{key}` for plain substitution and `{key:.N}` (N = 0-2)
/// for numeric precision, e.g. `{value:.1}` renders 105 as "105.0".
/// Non-numeric values fall back to plain substitution; placeholders
/// with no matching variable are left as-is.
pub fn render_template(template: &str, vars: &HashMap<&'static str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);

        for precision in 0..=2usize {
            let pattern = format!("{{{key}:.{precision}}}");
            if result.contains(&pattern) {
                let formatted = value
                    .parse::<f64>()
                    .map(|v| format!("{v:.precision$}"))
                    .unwrap_or_else(|_| value.clone());
                result = result.replace(&pattern, &formatted);
            }
        }
    }
    result
}
