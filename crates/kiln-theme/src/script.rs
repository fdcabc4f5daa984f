//! Inline script applying the stored theme before first paint.

use ironhtml::html;

/// Reads `localStorage.theme`, resolves `system` through
/// `prefers-color-scheme` and sets `data-theme` and `color-scheme` on the
/// root element.
pub const BOOTSTRAP_JS: &str = r#"(function () {
  var theme = 'system';
  try {
    theme = localStorage.getItem('theme') || 'system';
  } catch (e) {}
  if (theme !== 'dark' && theme !== 'light') {
    theme = window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light';
  }
  var root = document.documentElement;
  root.dataset.theme = theme;
  root.style.colorScheme = theme;
})();"#;

/// Renders the bootstrap `<script>` element for the document head.
pub fn bootstrap_script() -> String {
    html! { script.id("theme-bootstrap") }
        .raw(BOOTSTRAP_JS)
        .render()
}
