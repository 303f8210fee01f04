//! Rendered view of the timer for the terminal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerState;

const BAR_WIDTH: usize = 20;

/// How each update is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Snapshot of what the widget would show
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub display: String,
    pub remaining: i64,
    pub running: bool,
    pub overtime: bool,
    pub message: Option<String>,
    pub progress: f64,
    pub timestamp: DateTime<Utc>,
}

impl TimerView {
    pub fn new(state: &TimerState) -> Self {
        Self {
            display: state.display_text(),
            remaining: state.remaining,
            running: state.running,
            overtime: state.overtime,
            message: (!state.message.is_empty()).then(|| state.message.clone()),
            progress: state.progress(),
            timestamp: Utc::now(),
        }
    }

    /// Single-line text form, e.g. `[running] 0:42 [######..............]`
    pub fn to_text(&self) -> String {
        let status = if self.running { "running" } else { "paused" };

        match &self.message {
            Some(message) => format!("[{}] {}  {}", status, self.display, message),
            None => {
                let filled = (self.progress * BAR_WIDTH as f64).round() as usize;
                let filled = filled.min(BAR_WIDTH);
                format!(
                    "[{}] {} [{}{}]",
                    status,
                    self.display,
                    "#".repeat(filled),
                    ".".repeat(BAR_WIDTH - filled)
                )
            }
        }
    }

    /// Render as one line in the requested format, without a trailing newline
    pub fn render(&self, format: OutputFormat) -> Result<String, String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => serde_json::to_string(self)
                .map_err(|e| format!("Failed to serialize timer view: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_while_counting_down() {
        let state = TimerState {
            remaining: 30,
            running: true,
            ..TimerState::new()
        };
        let view = TimerView::new(&state);
        assert_eq!(view.message, None);
        assert_eq!(view.to_text(), "[running] 0:30 [##########..........]");
    }

    #[test]
    fn test_text_in_overtime_shows_message() {
        let state = TimerState {
            remaining: 3,
            running: false,
            overtime: true,
            message: "TL;DR time! 📝".to_string(),
        };
        let view = TimerView::new(&state);
        assert_eq!(view.to_text(), "[paused] +0:03  TL;DR time! 📝");
    }

    #[test]
    fn test_json_render() {
        let view = TimerView::new(&TimerState::new());
        let line = view.render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["display"], "1:00");
        assert_eq!(value["remaining"], 60);
        assert_eq!(value["running"], false);
        assert_eq!(value["overtime"], false);
        assert!(value["message"].is_null());
        assert!(!line.contains('\n'));
    }
}
