use annotext_engine::{
    Cmd, CommentPanel, Direction, Document, Editor, FormatInput, Point, Range, io,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

/// Which part of the screen receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Panel,
}

pub struct App {
    pub document_path: PathBuf,
    pub editor: Editor,
    pub panel: CommentPanel,
    pub focus: Focus,
    pub placeholder: String,
    pub status: String,
    saved: Document,
}

impl App {
    pub fn new(document_path: PathBuf, editor: Editor, placeholder: String) -> Self {
        let mut app = Self {
            document_path,
            saved: editor.document().clone(),
            editor,
            panel: CommentPanel::new(),
            focus: Focus::Editor,
            placeholder,
            status: String::new(),
        };
        app.editor.set_focused(true);
        app.editor.select(Some(Range::caret(Point::default())));
        app.panel.refresh(&app.editor);
        app
    }

    pub fn is_dirty(&self) -> bool {
        self.editor.document() != &self.saved
    }

    /// Handle one key press. Returns `false` once the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('q') {
            return false;
        }

        // document-wide bindings work whichever side has focus
        match key.code {
            KeyCode::Char('z') if ctrl => self.undo(),
            KeyCode::Char('y') if ctrl => self.redo(),
            KeyCode::Char('s') if ctrl => self.save(),
            _ => match self.focus {
                Focus::Editor => self.handle_editor_key(key, ctrl),
                Focus::Panel => self.handle_panel_key(key, ctrl),
            },
        }

        self.panel.refresh(&self.editor);
        if self.focus == Focus::Panel && !self.panel.is_visible() {
            self.focus_editor();
        }
        true
    }

    fn handle_editor_key(&mut self, key: KeyEvent, ctrl: bool) {
        let extend = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Char('b') if ctrl => self.format(FormatInput::Bold),
            KeyCode::Char('i') if ctrl => self.format(FormatInput::Italic),
            KeyCode::Char('u') if ctrl => self.format(FormatInput::Underline),
            KeyCode::Char('k') if ctrl => self.format(FormatInput::Comment),
            KeyCode::Char('a') if ctrl => self.editor.select_all(),
            KeyCode::Char(c) if !ctrl => {
                self.editor.apply(Cmd::InsertText {
                    text: c.to_string(),
                });
            }
            KeyCode::Enter => {
                self.editor.apply(Cmd::SplitBlock);
            }
            KeyCode::Backspace => {
                self.editor.apply(Cmd::DeleteBackward);
            }
            KeyCode::Delete => {
                self.editor.apply(Cmd::DeleteForward);
            }
            KeyCode::Left => self.editor.move_caret(Direction::Left, extend),
            KeyCode::Right => self.editor.move_caret(Direction::Right, extend),
            KeyCode::Up => self.editor.move_caret(Direction::Up, extend),
            KeyCode::Down => self.editor.move_caret(Direction::Down, extend),
            KeyCode::Home => self.editor.move_caret(Direction::LineStart, extend),
            KeyCode::End => self.editor.move_caret(Direction::LineEnd, extend),
            KeyCode::Tab if self.panel.is_visible() => {
                // the editor loses focus but keeps its selection
                self.focus = Focus::Panel;
                self.editor.set_focused(false);
            }
            _ => {}
        }
    }

    fn handle_panel_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char(c) if !ctrl => self.panel.draft_mut().push(c),
            KeyCode::Backspace => {
                self.panel.draft_mut().pop();
            }
            KeyCode::Enter => {
                if self.panel.apply(&mut self.editor).is_some() {
                    self.status = "Comment saved".to_string();
                }
            }
            KeyCode::Esc => {
                if self.panel.cancel(&mut self.editor).is_some() {
                    self.status = "Comment removed".to_string();
                }
                self.focus_editor();
            }
            KeyCode::Tab => self.focus_editor(),
            _ => {}
        }
    }

    fn undo(&mut self) {
        if self.editor.undo().is_none() {
            self.status = "Nothing to undo".to_string();
        }
    }

    fn redo(&mut self) {
        if self.editor.redo().is_none() {
            self.status = "Nothing to redo".to_string();
        }
    }

    fn focus_editor(&mut self) {
        self.focus = Focus::Editor;
        self.editor.set_focused(true);
    }

    fn format(&mut self, input: FormatInput) {
        let draft = self.panel.draft().to_string();
        let cmd = input.to_cmd(Some(&draft));
        self.editor.apply(cmd);
    }

    fn save(&mut self) {
        match io::write_document(&self.document_path, self.editor.document()) {
            Ok(()) => {
                self.saved = self.editor.document().clone();
                self.status = format!("Saved {}", self.document_path.display());
            }
            Err(e) => {
                log::error!("save failed: {e}");
                self.status = format!("Save failed: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotext_engine::{Block, Leaf, Mark};
    use pretty_assertions::assert_eq;

    fn app_with(leaves: Vec<Leaf>) -> App {
        let document = Document::from_blocks(vec![Block::paragraph(leaves)]);
        App::new(
            PathBuf::from("unused.json"),
            Editor::new(document),
            "Enter some text...".to_string(),
        )
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
        app.handle_key(KeyEvent::new(code, modifiers))
    }

    fn select_word(app: &mut App, len: usize) {
        for _ in 0..len {
            press_with(app, KeyCode::Right, KeyModifiers::SHIFT);
        }
    }

    #[test]
    fn test_typing_and_ctrl_bold() {
        let mut app = app_with(vec![Leaf::new("")]);

        for c in "hey".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Home);
        select_word(&mut app, 3);
        press_with(&mut app, KeyCode::Char('b'), KeyModifiers::CONTROL);

        assert_eq!(
            app.editor.document().blocks()[0].children,
            vec![Leaf::new("hey").with(Mark::Bold)]
        );
        assert!(app.is_dirty());
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = app_with(vec![Leaf::new("x")]);
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(!press_with(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_comment_through_panel() {
        let mut app = app_with(vec![Leaf::new("note this")]);
        select_word(&mut app, 4);
        assert!(app.panel.is_visible());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Panel);
        assert!(!app.editor.is_focused());
        assert!(app.panel.is_visible());

        for c in "why".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.editor.document().blocks()[0].children,
            vec![Leaf::new("note").with_comment("why"), Leaf::new(" this")]
        );

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Editor);
        assert_eq!(
            app.editor.document().blocks()[0].children,
            vec![Leaf::new("note this")]
        );
    }

    #[test]
    fn test_tab_ignored_while_panel_hidden() {
        let mut app = app_with(vec![Leaf::new("text")]);
        assert!(!app.panel.is_visible());

        press(&mut app, KeyCode::Tab);

        assert_eq!(app.focus, Focus::Editor);
        assert_eq!(app.editor.document().text(), "text");
    }

    #[test]
    fn test_undo_with_empty_history_sets_status() {
        let mut app = app_with(vec![Leaf::new("text")]);
        press_with(&mut app, KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(app.status, "Nothing to undo");
    }

    #[test]
    fn test_document_shortcuts_work_from_panel() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(vec![Leaf::new("note this")]);
        app.document_path = dir.path().join("doc.json");
        select_word(&mut app, 4);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('x'));

        press_with(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(app.document_path.exists());
        assert_eq!(app.panel.draft(), "x");
        assert_eq!(app.focus, Focus::Panel);
        assert!(app.status.starts_with("Saved"));

        press(&mut app, KeyCode::Enter);
        assert!(app.editor.is_mark_active(Mark::Comment));

        press_with(&mut app, KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(
            app.editor.document().blocks()[0].children,
            vec![Leaf::new("note this")]
        );
        assert_eq!(app.panel.draft(), "");

        press_with(&mut app, KeyCode::Char('y'), KeyModifiers::CONTROL);
        assert!(app.editor.is_mark_active(Mark::Comment));
        assert_eq!(app.panel.draft(), "x");
    }
}
