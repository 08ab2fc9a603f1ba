//! Inline display contract for the source corpus document.
//!
//! The document is never parsed or transformed here: the presenter only
//! decides how the resource is framed and where the escape hatch points.

pub const DEFAULT_VIEWER_HEIGHT: &str = "600px";
/// Viewer parameters appended to the inline locator's fragment.
pub const INLINE_VIEW_PARAMS: &str = "toolbar=1&navpanes=1&scrollbar=1&view=FitH";
pub const EXTERNAL_OPEN_LABEL: &str = "Open in New Tab";
pub const FALLBACK_HEADLINE: &str = "Having trouble viewing the PDF?";
pub const FALLBACK_GUIDANCE: &str = "Try opening it in a new tab or downloading it directly.";

/// The escape-hatch control: opens the unmodified resource in its own context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub href: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPresenter {
    src: String,
    title: String,
    height: String,
}

impl DocumentPresenter {
    pub fn new(src: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            title: title.into(),
            height: DEFAULT_VIEWER_HEIGHT.to_string(),
        }
    }

    /// Overrides the viewport height; blank values keep the default.
    pub fn with_height(mut self, height: Option<impl Into<String>>) -> Self {
        let height: Option<String> = height.map(Into::into);
        if let Some(height) = height {
            if !height.trim().is_empty() {
                self.height = height.trim().to_string();
            }
        }
        self
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn height(&self) -> &str {
        &self.height
    }

    /// Height in pixels for native renderers (`"600px"` and `"600"` both work).
    pub fn height_px(&self) -> Option<f32> {
        let raw = self.height.strip_suffix("px").unwrap_or(&self.height);
        raw.trim().parse::<f32>().ok().filter(|px| *px > 0.0)
    }

    /// Locator for the inline frame: the resource plus viewer parameters.
    pub fn inline_src(&self) -> String {
        if self.src.contains('#') {
            format!("{}&{INLINE_VIEW_PARAMS}", self.src)
        } else {
            format!("{}#{INLINE_VIEW_PARAMS}", self.src)
        }
    }

    pub fn external_link(&self) -> ExternalLink {
        ExternalLink {
            href: self.src.clone(),
            label: EXTERNAL_OPEN_LABEL,
        }
    }

    pub fn fallback_message(&self) -> String {
        format!("{FALLBACK_HEADLINE} {FALLBACK_GUIDANCE}")
    }

    /// Embed markup: the escape-hatch control, the inline frame, and the
    /// fallback guidance, in that order.
    pub fn render_html(&self) -> String {
        let link = self.external_link();
        format!(
            r#"<div class="document-presenter">
  <div class="document-presenter__controls">
    <a class="document-presenter__open" href="{href}" target="_blank" rel="noopener noreferrer">{label}</a>
  </div>
  <div class="document-presenter__viewport" style="min-height: {height}; overflow: hidden; border: 1px solid #cbd5e0; border-radius: 6px; background: #fff;">
    <iframe src="{inline_src}" title="{title}" width="100%" height="{height}" style="border: none; display: block;"></iframe>
  </div>
  <p class="document-presenter__fallback"><strong>{headline}</strong> {guidance}</p>
</div>
"#,
            href = html_escape(&link.href),
            label = html_escape(link.label),
            height = html_escape(&self.height),
            inline_src = html_escape(&self.inline_src()),
            title = html_escape(&self.title),
            headline = html_escape(FALLBACK_HEADLINE),
            guidance = html_escape(FALLBACK_GUIDANCE),
        )
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laws() -> DocumentPresenter {
        DocumentPresenter::new("/laws.pdf", "Laws of the Seven Kingdoms PDF")
    }

    #[test]
    fn inline_locator_adds_viewer_params() {
        assert_eq!(
            laws().inline_src(),
            "/laws.pdf#toolbar=1&navpanes=1&scrollbar=1&view=FitH"
        );
    }

    #[test]
    fn inline_locator_extends_existing_fragment() {
        let presenter = DocumentPresenter::new("/laws.pdf#page=3", "Laws");
        assert_eq!(
            presenter.inline_src(),
            "/laws.pdf#page=3&toolbar=1&navpanes=1&scrollbar=1&view=FitH"
        );
    }

    #[test]
    fn external_link_points_at_unmodified_src() {
        let link = laws().external_link();
        assert_eq!(link.href, "/laws.pdf");
        assert_eq!(link.label, "Open in New Tab");
    }

    #[test]
    fn height_defaults_and_overrides() {
        assert_eq!(laws().height(), "600px");
        assert_eq!(laws().height_px(), Some(600.0));
        assert_eq!(laws().with_height(Some("  ")).height(), "600px");
        assert_eq!(laws().with_height(Some("480")).height_px(), Some(480.0));
        assert_eq!(laws().with_height(None::<String>).height(), "600px");
    }

    #[test]
    fn html_has_one_frame_and_one_external_control() {
        let html = laws().render_html();

        assert_eq!(html.matches("<iframe").count(), 1);
        assert!(html.contains(
            r#"<iframe src="/laws.pdf#toolbar=1&amp;navpanes=1&amp;scrollbar=1&amp;view=FitH""#
        ));
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains(r#"href="/laws.pdf" target="_blank""#));
        assert!(html.contains(r#"title="Laws of the Seven Kingdoms PDF""#));
        assert!(html.contains("Having trouble viewing the PDF?"));
    }

    #[test]
    fn html_escapes_title_and_locator() {
        let html = DocumentPresenter::new("/a\"b.pdf", "<Laws & Edicts>").render_html();
        assert!(html.contains("title=\"&lt;Laws &amp; Edicts&gt;\""));
        assert!(html.contains("href=\"/a&quot;b.pdf\""));
    }
}
