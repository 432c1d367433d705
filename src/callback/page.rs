// ABOUTME: HTML rendering of the OAuth callback page
// ABOUTME: Fills the callback template with the glyph, message, and action for a status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::CallbackStatus;

/// Renderer for the callback status page
pub struct CallbackPage;

impl CallbackPage {
    /// Render the page for `status`
    #[must_use]
    pub fn render(status: &CallbackStatus) -> String {
        const TEMPLATE: &str = include_str!("../../templates/oauth_callback.html");

        let glyph = match status {
            CallbackStatus::Loading => r#"<div class="spinner" role="status"></div>"#,
            CallbackStatus::Success { .. } => r#"<div class="glyph success">&#10003;</div>"#,
            CallbackStatus::Error(_) => r#"<div class="glyph error">&#10007;</div>"#,
        };

        let action = status.action().map_or_else(String::new, |action| {
            format!(
                r#"<a class="action" href="{}">{}</a>"#,
                encode_double_quoted_attribute(action.href()),
                encode_text(action.label())
            )
        });

        let status_name = match status {
            CallbackStatus::Loading => "loading",
            CallbackStatus::Success { .. } => "success",
            CallbackStatus::Error(_) => "error",
        };

        let title = encode_text(status.title());
        let raw_message = status.message();
        let message = encode_text(&raw_message);

        fill(
            TEMPLATE,
            &[
                ("STATUS", status_name),
                ("GLYPH", glyph),
                ("TITLE", &*title),
                ("MESSAGE", &*message),
                ("ACTION", action.as_str()),
            ],
        )
    }
}

/// Substitute `{{NAME}}` placeholders in one pass; inserted values are never rescanned
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let replacement = after.find("}}").and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });

        match replacement {
            Some((value, end)) => {
                output.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                output.push_str("{{");
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}
