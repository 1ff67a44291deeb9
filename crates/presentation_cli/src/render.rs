//! Text rendering of a widget view

use std::fmt::Write;

use application::{ViewBody, WidgetView};

const WIDTH: usize = 38;

/// Where the rendered widget is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Printed once by `show`
    OneShot,
    /// Redrawn under the interactive prompt
    Interactive,
}

impl RenderMode {
    const fn retry_hint(self) -> &'static str {
        match self {
            Self::OneShot => "Run the command again to retry",
            Self::Interactive => "Type :retry to try again",
        }
    }
}

/// Render the view as a framed block of text
pub fn render(view: &WidgetView, mode: RenderMode) -> String {
    let mut lines = Vec::new();

    let title = if view.title.is_empty() {
        "Weather"
    } else {
        view.title.as_str()
    };
    lines.push(spread(title, view.toggle_glyph));
    lines.push(format!(
        "{}  {}  {}",
        view.clock.date, view.clock.time, view.clock.zone
    ));
    lines.push(String::new());

    match &view.body {
        ViewBody::Empty => lines.push("Search for a city to begin".to_string()),
        ViewBody::Loading { text } => lines.push((*text).to_string()),
        ViewBody::NotFound { message } => lines.push((*message).to_string()),
        ViewBody::Failed { reason, retryable } => {
            lines.push(format!("Could not load weather: {reason}"));
            if *retryable {
                lines.push(mode.retry_hint().to_string());
            }
        },
        ViewBody::Weather(panel) => {
            let icon = panel.icon.map_or("", |icon| icon.glyph());
            lines.push(spread(
                format!("{icon} {}", panel.condition).trim_start(),
                &panel.temperature,
            ));
            lines.push(format!("Humidity {}", panel.humidity));
            lines.push(format!("Wind {}", panel.wind));
        },
    }

    lines.push(String::new());
    let field = if view.query_text.is_empty() {
        format!("[ {} ]", view.placeholder)
    } else {
        format!("[ {} ]", view.query_text)
    };
    lines.push(field);
    lines.push(format!(
        "{} theme, {} -> {}",
        view.theme, view.gradient.from, view.gradient.to
    ));

    frame(&lines)
}

/// Left and right aligned on one line
fn spread(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = WIDTH.saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}

fn frame(lines: &[String]) -> String {
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max(WIDTH);

    let mut out = String::new();
    let _ = writeln!(out, "+{}+", "-".repeat(width + 2));
    for line in lines {
        let pad = width - line.chars().count();
        let _ = writeln!(out, "| {line}{} |", " ".repeat(pad));
    }
    let _ = write!(out, "+{}+", "-".repeat(width + 2));
    out
}
