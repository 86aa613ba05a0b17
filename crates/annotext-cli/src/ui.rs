use annotext_engine::{Block as TextBlock, Leaf, Mark, PanelButtons, Range};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, Focus};

const PANEL_WIDTH: u16 = 48;
const PANEL_HEIGHT: u16 = 4;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let title = if app.is_dirty() {
        format!("{} [+]", app.document_path.display())
    } else {
        app.document_path.display().to_string()
    };
    let editor_block = Block::default().borders(Borders::ALL).title(title);
    let inner = editor_block.inner(chunks[0]);

    let document = app.editor.document();
    let selection = app.editor.selection();
    let focus = selection.map(|range| range.focus).unwrap_or_default();
    let width = usize::from(inner.width).max(1);

    // blocks are hard-wrapped here so caret rows and columns match the screen
    let mut lines: Vec<Line> = Vec::new();
    let mut caret_row = 0;
    let mut caret_col = 0;
    if document.text().is_empty() {
        lines.push(Line::from(Span::styled(
            app.placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for (index, block) in document.blocks().iter().enumerate() {
            if index == focus.block {
                let (row, col) = wrap_position(&block.text(), focus.offset, width);
                caret_row = lines.len() + row;
                caret_col = col;
            }
            let spans = block_spans(block, selected_span(selection, index, block));
            lines.extend(wrap_spans(spans, width));
        }
    }

    let height = usize::from(inner.height).max(1);
    let scroll = caret_row.saturating_sub(height - 1);

    let content = Paragraph::new(lines)
        .block(editor_block)
        .scroll((scroll as u16, 0));
    f.render_widget(content, chunks[0]);

    let caret = (
        inner.x + caret_col as u16,
        inner.y + (caret_row - scroll) as u16,
    );

    if app.panel.is_visible() {
        let area = panel_area(inner, caret);
        draw_panel(f, app, area);
        if app.focus == Focus::Panel {
            let draft_width = Span::raw(app.panel.draft()).width() as u16;
            f.set_cursor_position((
                (area.x + 1 + draft_width).min(area.right().saturating_sub(2)),
                area.y + 1,
            ));
        }
    }

    if app.focus == Focus::Editor {
        f.set_cursor_position(caret);
    }

    f.render_widget(status_line(app), chunks[1]);
}

/// Character range of `block` covered by an expanded selection
fn selected_span(selection: Option<Range>, index: usize, block: &TextBlock) -> Option<(usize, usize)> {
    let range = selection.filter(Range::is_expanded)?;
    let (start, end) = (range.start(), range.end());
    if index < start.block || index > end.block {
        return None;
    }
    let from = if index == start.block { start.offset } else { 0 };
    let to = if index == end.block {
        end.offset
    } else {
        block.char_len()
    };
    Some((from, to))
}

fn leaf_style(leaf: &Leaf) -> Style {
    let mut style = Style::default();
    if leaf.has(Mark::Bold) {
        style = style.add_modifier(Modifier::BOLD);
    }
    if leaf.has(Mark::Italic) {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if leaf.has(Mark::Underlined) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if leaf.has(Mark::Comment) {
        style = style.bg(Color::Yellow).fg(Color::Black);
    }
    style
}

/// Spans of one block, split at leaf and selection edges
fn block_spans(block: &TextBlock, selected: Option<(usize, usize)>) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut start = 0;

    for leaf in &block.children {
        let end = start + leaf.char_len();
        let style = leaf_style(leaf);

        let mut cuts = vec![start, end];
        if let Some((from, to)) = selected {
            cuts.extend([from, to].into_iter().filter(|cut| *cut > start && *cut < end));
        }
        cuts.sort_unstable();
        cuts.dedup();

        for pair in cuts.windows(2) {
            let text: String = leaf
                .text
                .chars()
                .skip(pair[0] - start)
                .take(pair[1] - pair[0])
                .collect();
            let in_selection = selected.is_some_and(|(from, to)| pair[0] >= from && pair[1] <= to);
            let style = if in_selection {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            };
            spans.push(Span::styled(text, style));
        }

        start = end;
    }

    spans
}

fn char_width(c: char) -> usize {
    let mut buf = [0u8; 4];
    Span::raw(&*c.encode_utf8(&mut buf)).width()
}

/// Break spans into rows of at most `width` columns. A row that ends
/// exactly at `width` is followed by an empty row for the caret.
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    let mut rows: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    let mut col = 0;

    for span in spans {
        let mut piece = String::new();
        for c in span.content.chars() {
            let w = char_width(c);
            if col > 0 && col + w > width {
                if !piece.is_empty() {
                    let row = rows.len() - 1;
                    rows[row].push(Span::styled(std::mem::take(&mut piece), span.style));
                }
                rows.push(Vec::new());
                col = 0;
            }
            piece.push(c);
            col += w;
        }
        if !piece.is_empty() {
            let row = rows.len() - 1;
            rows[row].push(Span::styled(piece, span.style));
        }
    }
    if col >= width {
        rows.push(Vec::new());
    }

    rows.into_iter().map(Line::from).collect()
}

/// Row and column of character `offset` in `text` wrapped like `wrap_spans`
fn wrap_position(text: &str, offset: usize, width: usize) -> (usize, usize) {
    let (mut row, mut col) = (0, 0);
    for c in text.chars().take(offset) {
        let w = char_width(c);
        if col > 0 && col + w > width {
            row += 1;
            col = 0;
        }
        col += w;
    }
    if col >= width { (row + 1, 0) } else { (row, col) }
}

/// Below the caret line when it fits, otherwise above it
fn panel_area(inner: Rect, caret: (u16, u16)) -> Rect {
    let width = PANEL_WIDTH.min(inner.width);
    let height = PANEL_HEIGHT.min(inner.height);
    let x = caret.0.min(inner.right().saturating_sub(width));
    let y = if caret.1 + 1 + height <= inner.bottom() {
        caret.1 + 1
    } else {
        caret.1.saturating_sub(height).max(inner.y)
    };
    Rect::new(x, y, width, height)
}

fn draw_panel(f: &mut Frame, app: &App, area: Rect) {
    let props = app.panel.props();
    let buttons = match props.buttons {
        PanelButtons::Comment => "Enter: Comment",
        PanelButtons::UpdateOrCancel => "Enter: Update | Esc: Cancel",
    };
    let border_style = if app.focus == Focus::Panel {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let body = vec![
        Line::from(props.comment_text),
        Line::from(Span::styled(buttons, Style::default().fg(Color::DarkGray))),
    ];
    let panel = Paragraph::new(body).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Comment (Tab)"),
    );

    f.render_widget(Clear, area);
    f.render_widget(panel, area);
}

fn status_line(app: &App) -> Paragraph<'static> {
    let marks: String = Mark::ALL
        .iter()
        .filter(|mark| app.editor.is_mark_active(**mark))
        .map(|mark| mark.name())
        .collect::<Vec<_>>()
        .join(" ");

    let mut spans = vec![Span::raw(
        "^Q: Quit | ^S: Save | ^B/^I/^U: Format | ^K: Comment | ^Z/^Y: Undo/Redo",
    )];
    if !marks.is_empty() {
        spans.push(Span::styled(
            format!(" | {marks}"),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    if !app.status.is_empty() {
        spans.push(Span::raw(format!(" | {}", app.status)));
    }

    Paragraph::new(Line::from(spans))
}
