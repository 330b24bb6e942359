//! Plain-text rendering of the chat transcript.
//!
//! Streamed messages are printed incrementally: the first fragment on append,
//! then only the newly added suffix on each update.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::config::ChatConfig;
use crate::models::{CellValue, Message, MessageId, MessageKind};
use crate::session::ChatObserver;

/// Maximum characters of a tool result shown inline
const TOOL_RESULT_PREVIEW: usize = 200;

/// Format a data table with columns padded to their display width.
///
/// Null cells render as an em-dash.
pub fn format_table(columns: &[String], rows: &[Vec<CellValue>]) -> Vec<String> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(CellValue::display_text).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.width()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(cell.width()),
                None => widths.push(cell.width()),
            }
        }
    }

    let format_row = |row: &[String]| -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                pad(cell, width)
            })
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(format_row(columns));
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &cells {
        lines.push(format_row(row.as_slice()));
    }
    lines
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn preview(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let mut out: String = first_line.chars().take(max_chars).collect();
    if first_line.chars().count() > max_chars || text.lines().nth(1).is_some() {
        out.push_str("...");
    }
    out
}

/// Renders messages as plain text to a writer.
pub struct PlainRenderer<W: Write + Send> {
    out: W,
    config: ChatConfig,
    /// Streamed message being printed and how many bytes of it are out
    streamed: Option<(MessageId, usize)>,
}

impl PlainRenderer<io::Stdout> {
    /// Render to stdout.
    pub fn stdout(config: ChatConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write + Send> PlainRenderer<W> {
    pub fn new(out: W, config: ChatConfig) -> Self {
        Self {
            out,
            config,
            streamed: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// End the streamed line, if one is open
    fn close_stream(&mut self) {
        if self.streamed.take().is_some() {
            writeln!(self.out).ok();
        }
    }

    fn line(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }

    fn start_stream(&mut self, message: &Message, label: Option<&str>) {
        if let Some(label) = label {
            write!(self.out, "{} ", label).ok();
        }
        write!(self.out, "{}", message.content).ok();
        self.out.flush().ok();
        self.streamed = Some((message.id, message.content.len()));
    }
}

impl<W: Write + Send> ChatObserver for PlainRenderer<W> {
    fn on_message(&mut self, message: &Message) {
        self.close_stream();

        match &message.kind {
            // The user typed it; echoing would duplicate the prompt line
            MessageKind::User => {}
            MessageKind::Thinking => self.start_stream(message, Some("[thinking]")),
            MessageKind::Assistant => self.start_stream(message, None),
            MessageKind::ToolCall { tool_args, .. } => {
                let args = serde_json::to_string(tool_args).unwrap_or_default();
                self.line(&format!("[tool] {} {}", message.content, args));
            }
            MessageKind::ToolResult {
                tool_name, success, ..
            } => {
                let status = if *success { "ok" } else { "failed" };
                let text = format!(
                    "[tool] {} {}: {}",
                    tool_name,
                    status,
                    preview(&message.content, TOOL_RESULT_PREVIEW)
                );
                self.line(&text);
            }
            MessageKind::DataTable { columns, rows, .. } => {
                for line in format_table(columns, rows) {
                    self.line(&line);
                }
                self.line(&format!("({})", message.content));
            }
            MessageKind::Visualization {
                visualization_type,
                visualization_url,
            } => {
                let url = self.config.resolve_url(visualization_url);
                self.line(&format!(
                    "[{}] {} {}",
                    visualization_type, message.content, url
                ));
            }
            // Surfaced through on_error
            MessageKind::Error { .. } => {}
        }
        self.out.flush().ok();
    }

    fn on_update(&mut self, message: &Message) {
        match self.streamed {
            Some((id, printed)) if id == message.id => {
                if let Some(suffix) = message.content.get(printed..) {
                    write!(self.out, "{}", suffix).ok();
                    self.out.flush().ok();
                }
                self.streamed = Some((id, message.content.len()));
            }
            _ => {
                // Not the message we were printing; show it whole
                self.close_stream();
                self.start_stream(message, None);
            }
        }
    }

    fn on_error(&mut self, error: &str) {
        self.close_stream();
        self.line(&format!("Error: {}", error));
        self.out.flush().ok();
    }

    fn on_idle(&mut self) {
        self.close_stream();
        self.out.flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VisualizationType;
    use serde_json::Number;

    fn rendered(renderer: PlainRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_format_table_pads_and_shows_null() {
        let columns = vec!["region".to_string(), "revenue".to_string()];
        let rows = vec![
            vec![
                CellValue::String("north".to_string()),
                CellValue::Number(Number::from(1200u64)),
            ],
            vec![CellValue::String("south".to_string()), CellValue::Null],
        ];
        let lines = format_table(&columns, &rows);
        assert_eq!(
            lines,
            vec![
                "region | revenue",
                "-------+--------",
                "north  | 1200",
                "south  | \u{2014}",
            ]
        );
    }

    #[test]
    fn test_format_table_wide_chars() {
        let columns = vec!["city".to_string()];
        let rows = vec![vec![CellValue::String("東京".to_string())]];
        let lines = format_table(&columns, &rows);
        // "東京" is four columns wide
        assert_eq!(lines[0], "city");
        assert_eq!(lines[1], "----");
    }

    #[test]
    fn test_streamed_text_printed_incrementally() {
        let mut renderer = PlainRenderer::new(Vec::new(), ChatConfig::default());
        let mut msg = Message::new(MessageKind::Assistant, "Hel");
        renderer.on_message(&msg);
        msg.content = "Hello".to_string();
        renderer.on_update(&msg);
        renderer.on_idle();

        assert_eq!(rendered(renderer), "Hello\n");
    }

    #[test]
    fn test_thinking_then_tool_call() {
        let mut renderer = PlainRenderer::new(Vec::new(), ChatConfig::default());
        renderer.on_message(&Message::new(MessageKind::Thinking, "Checking"));
        renderer.on_message(&Message::new(
            MessageKind::ToolCall {
                tool_name: "query_data".to_string(),
                tool_args: serde_json::Map::new(),
                call_id: "c1".to_string(),
            },
            "Calling query_data",
        ));

        assert_eq!(
            rendered(renderer),
            "[thinking] Checking\n[tool] Calling query_data {}\n"
        );
    }

    #[test]
    fn test_visualization_url_resolved() {
        let mut renderer = PlainRenderer::new(
            Vec::new(),
            ChatConfig::new().with_base_url("http://localhost:8000"),
        );
        renderer.on_message(&Message::new(
            MessageKind::Visualization {
                visualization_type: VisualizationType::Html,
                visualization_url: "/api/files/chart.html".to_string(),
            },
            "chart.html",
        ));

        assert_eq!(
            rendered(renderer),
            "[html] chart.html http://localhost:8000/api/files/chart.html\n"
        );
    }

    #[test]
    fn test_error_closes_stream() {
        let mut renderer = PlainRenderer::new(Vec::new(), ChatConfig::default());
        renderer.on_message(&Message::new(MessageKind::Assistant, "partial"));
        renderer.on_error("E1: boom");

        assert_eq!(rendered(renderer), "partial\nError: E1: boom\n");
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("line one\nline two", 50), "line one...");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("short", 10), "short");
    }
}
