//! Manual share dialog

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::modal::Modal;
use crate::render::sanitize::strip_control;
use crate::share::dialog::DIALOG_TITLE;
use crate::share::{CopyFeedback, ShareDialog};
use crate::tui::theme::Theme;

pub struct ShareDialogPanel<'a> {
    dialog: &'a ShareDialog,
    theme: &'a Theme,
}

impl<'a> ShareDialogPanel<'a> {
    pub fn new(dialog: &'a ShareDialog, theme: &'a Theme) -> Self {
        Self { dialog, theme }
    }
}

impl Widget for ShareDialogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut content: Vec<Line> = self
            .dialog
            .message()
            .lines()
            .map(|line| Line::from(format!(" {}", strip_control(line))))
            .collect();
        content.push(Line::default());

        let feedback_style = match self.dialog.feedback() {
            CopyFeedback::Idle => Style::default().fg(self.theme.blue),
            CopyFeedback::Copied => Style::default().fg(self.theme.green),
            CopyFeedback::Manual => Style::default().fg(self.theme.yellow),
        };
        content.push(Line::from(vec![
            Span::styled(" [c] ", Style::default().fg(self.theme.text_muted)),
            Span::styled(
                self.dialog.copy_label(),
                feedback_style.add_modifier(Modifier::BOLD),
            ),
        ]));

        let footer = Line::from(Span::styled(
            " esc close ",
            Style::default().fg(self.theme.text_muted),
        ));
        Modal::new(DIALOG_TITLE, self.theme)
            .content(content)
            .footer(footer)
            .width(70)
            .height(80)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_support::render_widget;

    #[test]
    fn test_dialog_shows_message_and_copy_action() {
        let theme = Theme::default();
        let dialog = ShareDialog::new("Serial No: #12\nSubject:\nExam <Schedule>");
        let output = render_widget(ShareDialogPanel::new(&dialog, &theme), 80, 24);
        assert!(output.contains("Share Circular"));
        assert!(output.contains("Exam <Schedule>"));
        assert!(output.contains("Copy Text"));
    }

    #[test]
    fn test_dialog_strips_control_characters() {
        let theme = Theme::default();
        let dialog = ShareDialog::new("Subject:\nExam\x1b[2J day");
        let output = render_widget(ShareDialogPanel::new(&dialog, &theme), 80, 24);
        assert!(!output.contains('\x1b'));
        assert!(output.contains("Exam [2J day"));
    }
}
