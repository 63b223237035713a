//! Document viewer overlay
//!
//! A terminal cannot paint a PDF, so the overlay shows what the document check learned
//! about the document and offers to open it externally.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use super::modal::{centered_rect, Modal};
use crate::render::sanitize::strip_control;
use crate::tui::theme::Theme;
use crate::viewer::DocumentInfo;

const WIDTH_PERCENT: u16 = 80;
const HEIGHT_PERCENT: u16 = 70;

/// Region the overlay occupies; clicks outside it close the viewer
pub fn viewer_area(area: Rect) -> Rect {
    centered_rect(area, WIDTH_PERCENT, HEIGHT_PERCENT)
}

pub struct ViewerPanel<'a> {
    title: &'a str,
    url: &'a str,
    info: Option<&'a DocumentInfo>,
    theme: &'a Theme,
}

impl<'a> ViewerPanel<'a> {
    pub fn new(title: &'a str, url: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            url,
            info: None,
            theme,
        }
    }

    pub fn info(mut self, info: Option<&'a DocumentInfo>) -> Self {
        self.info = info;
        self
    }

    fn field(&self, label: &'a str, value: &str) -> Line<'a> {
        Line::from(vec![
            Span::styled(label, Style::default().fg(self.theme.text_muted)),
            Span::styled(
                strip_control(value),
                Style::default().fg(self.theme.text_primary),
            ),
        ])
    }
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

impl Widget for ViewerPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut content = vec![Line::default(), self.field("  Link: ", self.url)];
        match self.info {
            Some(info) => {
                content.push(self.field(
                    "  Type: ",
                    info.content_type.as_deref().unwrap_or("unknown"),
                ));
                let size = info
                    .content_length
                    .map(format_size)
                    .unwrap_or_else(|| "unknown".to_string());
                content.push(self.field("  Size: ", &size));
            }
            None => content.push(Line::from(Span::styled(
                "  Loading document...",
                Style::default().fg(self.theme.cyan),
            ))),
        }

        let footer = Line::from(Span::styled(
            " o open externally · esc close ",
            Style::default().fg(self.theme.text_muted),
        ));
        let title = strip_control(self.title);
        Modal::new(&title, self.theme)
            .content(content)
            .footer(footer)
            .width(WIDTH_PERCENT)
            .height(HEIGHT_PERCENT)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_support::render_widget;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_panel_shows_title_link_and_info() {
        let theme = Theme::default();
        let info = DocumentInfo {
            content_type: Some("application/pdf".to_string()),
            content_length: Some(2048),
        };
        let panel = ViewerPanel::new("Circular #12", "https://x/doc.pdf", &theme).info(Some(&info));
        let output = render_widget(panel, 80, 20);
        assert!(output.contains("Circular #12"));
        assert!(output.contains("https://x/doc.pdf"));
        assert!(output.contains("application/pdf"));
        assert!(output.contains("2.0 KB"));
    }

    #[test]
    fn test_panel_strips_control_characters() {
        let theme = Theme::default();
        let info = DocumentInfo {
            content_type: Some("application/pdf\x1b[31m".to_string()),
            content_length: None,
        };
        let panel = ViewerPanel::new("Circular\x07 #3", "https://x/\x1b[2J.pdf", &theme)
            .info(Some(&info));
        let output = render_widget(panel, 80, 20);
        assert!(!output.contains('\x1b'));
        assert!(!output.contains('\x07'));
        assert!(output.contains("https://x/ [2J.pdf"));
    }

    #[test]
    fn test_panel_without_info_shows_loading() {
        let theme = Theme::default();
        let panel = ViewerPanel::new("PDF Viewer", "https://x/doc.pdf", &theme);
        let output = render_widget(panel, 80, 20);
        assert!(output.contains("Loading document..."));
    }
}
