#![forbid(unsafe_code)]

//! Contact screen: four single-line fields, a send action, and the status
//! banner.

use crossterm::style::Color;
use folio_contact::{
    BannerKind, BannerStage, ContactError, EmailSender, Field, FieldError, Outcome, Submission,
};
use folio_core::Instant;
use folio_core::event::{KeyCode, KeyEvent};

use crate::canvas::{Canvas, Rect, Style};

const FORM_TOP: i32 = 3;
const FIELD_ROWS: i32 = 3;

/// Contact screen state.
#[derive(Debug)]
pub struct ContactScreen<S: EmailSender + 'static> {
    submission: Submission<S>,
    focus: Field,
    errors: Vec<FieldError>,
}

impl<S: EmailSender + 'static> ContactScreen<S> {
    #[must_use]
    pub fn new(submission: Submission<S>) -> Self {
        Self {
            submission,
            focus: Field::Name,
            errors: Vec::new(),
        }
    }

    /// The submission flow.
    #[must_use]
    pub fn submission(&self) -> &Submission<S> {
        &self.submission
    }

    /// Focused field.
    #[must_use]
    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Validation errors from the last submit attempt.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Route a key. Returns `true` if anything changed.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.focus = self.focus.prev();
                true
            }
            KeyCode::Down => {
                self.focus = self.focus.next();
                true
            }
            KeyCode::Enter => {
                self.submit(now);
                true
            }
            KeyCode::Escape => {
                let had = !self.errors.is_empty();
                self.errors.clear();
                had
            }
            KeyCode::Backspace => self.submission.form_mut().get_mut(self.focus).pop().is_some(),
            KeyCode::Char(ch) if !key.ctrl() => {
                self.submission.form_mut().get_mut(self.focus).push(ch);
                self.errors.retain(|e| e.field != self.focus);
                true
            }
            _ => false,
        }
    }

    fn submit(&mut self, now: Instant) {
        match self.submission.submit(now) {
            Ok(()) => self.errors.clear(),
            Err(ContactError::Invalid(errors)) => {
                if let Some(first) = errors.first() {
                    self.focus = first.field;
                }
                self.errors = errors;
            }
            // Busy: keep waiting. Config failures are on the banner already.
            Err(_) => {}
        }
    }

    /// Pick up send results and advance the banner. Returns `true` if a
    /// redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.submission.banner().current();
        let outcome = self.submission.poll(now);
        if let Some(Outcome::Sent) = outcome {
            self.focus = Field::Name;
        }
        outcome.is_some() || self.submission.banner().current() != before
    }

    /// When the screen next needs a tick.
    #[must_use]
    pub fn next_wake(&self) -> Option<Instant> {
        self.submission.next_wake()
    }

    /// Whether a send is outstanding (the host should keep polling).
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.submission.is_submitting()
    }

    /// Draw into `canvas`.
    pub fn render(&self, canvas: &mut Canvas) {
        let width = i32::from(canvas.width());
        let form_w = (width - 4).clamp(10, 72);
        canvas.put_str(2, 1, "Get in touch", Style::fg(Color::White).bold(), width);

        let form = self.submission.form();
        for (i, field) in Field::ALL.iter().enumerate() {
            let y = FORM_TOP + i as i32 * FIELD_ROWS;
            let focused = *field == self.focus;
            let error = self.errors.iter().find(|e| e.field == *field);
            let border = match (focused, error.is_some()) {
                (_, true) => Style::fg(Color::Red),
                (true, false) => Style::fg(Color::Cyan),
                (false, false) => Style::fg(Color::DarkGrey),
            };
            let rect = Rect::new(2, y, form_w, FIELD_ROWS);
            canvas.draw_box(rect, border);
            canvas.put_str(4, y, &format!(" {} ", field_title(*field)), border, rect.right() - 1);

            let inner = rect.right() - 2;
            let value = form.get(*field);
            // Show the tail of long values so the cursor stays visible.
            let room = usize::try_from(inner - 4).unwrap_or(0);
            let shown: String = {
                let count = value.chars().count();
                value.chars().skip(count.saturating_sub(room)).collect()
            };
            let end = canvas.put_str(4, y + 1, &shown, Style::PLAIN, inner);
            if focused {
                canvas.set(end, y + 1, '▏', Style::fg(Color::Cyan));
            }
            if let Some(error) = error {
                let msg = error.to_string();
                let x = (rect.right() - msg.chars().count() as i32 - 3).max(4);
                canvas.put_str(
                    x,
                    y + FIELD_ROWS - 1,
                    &format!(" {msg} "),
                    Style::fg(Color::Red),
                    rect.right() - 1,
                );
            }
        }

        let action_y = FORM_TOP + Field::ALL.len() as i32 * FIELD_ROWS + 1;
        let action = if self.submission.is_submitting() {
            "Sending..."
        } else {
            "[ Enter ] Send Message"
        };
        canvas.put_str(2, action_y, action, Style::fg(Color::Blue).bold(), width);

        if let Some((kind, stage)) = self.submission.banner().current() {
            let (icon, color) = match kind {
                BannerKind::Success => ('✔', Color::Green),
                BannerKind::Error => ('✖', Color::Red),
            };
            let mut style = Style::fg(color);
            if stage == BannerStage::Fading {
                style = style.dim();
            }
            let line = format!("{icon} {}", kind.message());
            canvas.put_str(2, action_y + 2, &line, style, width);
        }
    }
}

fn field_title(field: Field) -> &'static str {
    match field {
        Field::Name => "Name",
        Field::Email => "Email",
        Field::Subject => "Subject",
        Field::Message => "Message",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_contact::{ConfigError, SendError, SendRequest};
    use folio_core::Duration;
    use folio_core::event::Modifiers;

    struct Accept;

    impl EmailSender for Accept {
        fn send(&self, _request: &SendRequest) -> Result<(), SendError> {
            Ok(())
        }
    }

    fn screen() -> ContactScreen<Accept> {
        ContactScreen::new(Submission::with_config(
            Accept,
            Box::new(|| Err(ConfigError::Missing("FOLIO_EMAILJS_SERVICE_ID"))),
        ))
    }

    fn type_str(s: &mut ContactScreen<Accept>, text: &str, now: Instant) {
        for ch in text.chars() {
            s.handle_key(KeyEvent::new(KeyCode::Char(ch)), now);
        }
    }

    #[test]
    fn typing_fills_focused_field() {
        let mut s = screen();
        let now = Instant::now();
        type_str(&mut s, "Ada", now);
        s.handle_key(KeyEvent::new(KeyCode::Down), now);
        type_str(&mut s, "ada@x.io", now);
        s.handle_key(KeyEvent::new(KeyCode::Backspace), now);
        let form = s.submission().form();
        assert_eq!(form.name, "Ada");
        assert_eq!(form.email, "ada@x.i");
    }

    #[test]
    fn ctrl_chars_are_not_typed() {
        let mut s = screen();
        let key = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(!s.handle_key(key, Instant::now()));
        assert!(s.submission().form().is_blank());
    }

    #[test]
    fn empty_submit_focuses_first_error() {
        let mut s = screen();
        let now = Instant::now();
        s.handle_key(KeyEvent::new(KeyCode::Down), now);
        s.handle_key(KeyEvent::new(KeyCode::Down), now);
        s.handle_key(KeyEvent::new(KeyCode::Enter), now);
        assert_eq!(s.errors().len(), 4);
        assert_eq!(s.focus(), Field::Name);
        type_str(&mut s, "A", now);
        assert_eq!(s.errors().len(), 3);
    }

    #[test]
    fn missing_config_shows_error_banner() {
        let mut s = screen();
        let now = Instant::now();
        *s.submission.form_mut() = folio_contact::ContactForm::new()
            .name("A")
            .email("a@b.co")
            .subject("S")
            .message("M");
        s.handle_key(KeyEvent::new(KeyCode::Enter), now);
        assert!(s.errors().is_empty());

        let mut canvas = Canvas::new(80, 24);
        s.render(&mut canvas);
        let rendered: Vec<String> = (0..24).map(|y| canvas.row_text(y)).collect();
        assert!(rendered.iter().any(|row| row.contains("Something went wrong")));

        assert!(s.tick(now + Duration::from_millis(5000)));
        assert!(s.tick(now + Duration::from_millis(5300)));
        assert!(s.submission().banner().current().is_none());
    }

    #[test]
    fn render_marks_focus_and_labels() {
        let s = screen();
        let mut canvas = Canvas::new(80, 24);
        s.render(&mut canvas);
        assert!(canvas.row_text(FORM_TOP as u16).contains("Name"));
        assert!(canvas.row_text((FORM_TOP + FIELD_ROWS) as u16).contains("Email"));
        assert_eq!(canvas.style_at(2, FORM_TOP as u16).and_then(|s| s.fg), Some(Color::Cyan));
    }
}
