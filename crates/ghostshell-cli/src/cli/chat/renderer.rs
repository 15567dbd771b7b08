//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! Prose goes through `termimad`; fenced code blocks go through `syntect`.

use crossterm::style::Color;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

use ghostshell_types::llm::ToolCall;

const CODE_THEME: &str = "base16-ocean.dark";

/// Renders assistant replies for the terminal.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl ChatRenderer {
    /// `accent` colors headers and bold text.
    pub fn new(accent: Option<Color>) -> Self {
        let mut skin = MadSkin::default_dark();

        if let Some(color) = accent {
            let tc = Self::crossterm_to_termimad(color);
            skin.bold.set_fg(tc);
            skin.headers[0].set_fg(tc);
            skin.headers[1].set_fg(tc);
        }
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render a full markdown reply. An unclosed fence is still highlighted.
    pub fn render(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut code_lang: Option<String> = None;
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") {
                match code_lang.take() {
                    Some(lang) => {
                        output.push_str(&self.highlight_code(&code_buf, &lang));
                        output.push('\n');
                    }
                    None => {
                        code_lang = Some(line.trim_start_matches('`').trim().to_string());
                        code_buf.clear();
                    }
                }
            } else if code_lang.is_some() {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&self.skin.term_text(line).to_string());
            }
        }

        if let Some(lang) = &code_lang {
            if !code_buf.is_empty() {
                output.push_str(&self.highlight_code(&code_buf, lang));
            }
        }

        output
    }

    /// One line per requested tool call: name and raw arguments.
    pub fn render_tool_calls(&self, calls: &[ToolCall]) -> String {
        calls
            .iter()
            .map(|call| {
                format!(
                    "  {} {}({})\n",
                    console::style("tool").magenta().bold(),
                    console::style(&call.name).magenta(),
                    console::style(&call.arguments).dim()
                )
            })
            .collect()
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let mut output = String::new();
        output.push_str(&format!("  {}\n", console::style(format!("--- {lang} ---")).dim()));

        let Some(theme) = self.theme_set.themes.get(CODE_THEME) else {
            for line in code.lines() {
                output.push_str(&format!("  {line}\n"));
            }
            return output;
        };

        let mut h = HighlightLines::new(syntax, theme);
        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }

    fn crossterm_to_termimad(color: Color) -> termimad::crossterm::style::Color {
        match color {
            Color::Cyan => termimad::crossterm::style::Color::Cyan,
            Color::Green => termimad::crossterm::style::Color::Green,
            Color::Yellow => termimad::crossterm::style::Color::Yellow,
            Color::Magenta => termimad::crossterm::style::Color::Magenta,
            Color::Blue => termimad::crossterm::style::Color::Blue,
            Color::Red => termimad::crossterm::style::Color::Red,
            Color::Rgb { r, g, b } => termimad::crossterm::style::Color::Rgb { r, g, b },
            _ => termimad::crossterm::style::Color::Cyan,
        }
    }
}
