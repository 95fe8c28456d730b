use maud::html;

/// Escape HTML special characters so the value renders as inert text.
///
/// Applied to every free-text field on the way out of the API.
/// Example: `"<script>"` → `"&lt;script&gt;"`
pub fn escape_markup(input: &str) -> String {
    html! { (input) }.into_string()
}
