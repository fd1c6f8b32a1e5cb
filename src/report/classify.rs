// Result coloring policy

use super::Color;
use crate::state::ResultEvent;

/// Display style for an echoed result line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStyle {
    Failed,
    Skipped,
    Todo,
    Normal,
}

impl ResultStyle {
    /// Classify an event. First matching rule wins, so a failing test
    /// stays `Failed` even when it carries a SKIP or TODO directive.
    pub fn classify(event: &ResultEvent) -> Self {
        match event {
            e if e.is_test() && !e.is_ok() => Self::Failed,
            e if e.is_test() && e.has_skip() => Self::Skipped,
            e if e.is_test() && e.has_todo() => Self::Todo,
            _ => Self::Normal,
        }
    }

    pub fn colors(self) -> &'static [Color] {
        match self {
            Self::Failed => &[Color::Red],
            Self::Skipped => &[Color::White, Color::OnBlue],
            Self::Todo => &[Color::Yellow],
            Self::Normal => &[],
        }
    }
}
