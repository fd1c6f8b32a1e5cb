// Parsed result events

use serde::{Deserialize, Serialize};

/// Kind of protocol line a result event was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Test,
    Plan,
    Bailout,
    Comment,
    Version,
    Unknown,
}

/// Directive attached to a test line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directive {
    Skip,
    Todo,
}

/// One line of a test run, as handed over by the protocol parser.
///
/// The session only reads these; it never builds or mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEvent {
    pub kind: ResultKind,
    #[serde(default)]
    pub number: Option<u64>,
    /// Declared test count, set on plan lines only
    #[serde(default)]
    pub planned: Option<u64>,
    /// Passing as far as the run is concerned; failing TODO tests count as ok
    #[serde(default = "default_ok")]
    pub ok: bool,
    /// The literal `ok` / `not ok` status when it differs from `ok`
    #[serde(default)]
    pub actual_ok: Option<bool>,
    #[serde(default)]
    pub directive: Option<Directive>,
    #[serde(default)]
    pub explanation: String,
    /// The line as it should be echoed to the user
    #[serde(default)]
    pub raw: String,
}

fn default_ok() -> bool {
    true
}

impl ResultEvent {
    /// Create a passing test line
    pub fn pass(number: u64, description: impl AsRef<str>) -> Self {
        Self::test(number, true, description)
    }

    /// Create a failing test line
    pub fn fail(number: u64, description: impl AsRef<str>) -> Self {
        Self::test(number, false, description)
    }

    fn test(number: u64, ok: bool, description: impl AsRef<str>) -> Self {
        let status = if ok { "ok" } else { "not ok" };
        let description = description.as_ref();
        let raw = if description.is_empty() {
            format!("{} {}", status, number)
        } else {
            format!("{} {} {}", status, number, description)
        };
        Self {
            kind: ResultKind::Test,
            number: Some(number),
            planned: None,
            ok,
            actual_ok: None,
            directive: None,
            explanation: String::new(),
            raw,
        }
    }

    /// Attach a SKIP or TODO directive with its explanation
    pub fn with_directive(mut self, directive: Directive, explanation: impl Into<String>) -> Self {
        let explanation = explanation.into();
        let tag = match directive {
            Directive::Skip => "SKIP",
            Directive::Todo => "TODO",
        };
        self.raw = if explanation.is_empty() {
            format!("{} # {}", self.raw, tag)
        } else {
            format!("{} # {} {}", self.raw, tag, explanation)
        };
        if directive == Directive::Todo && !self.ok {
            self.actual_ok = Some(false);
            self.ok = true;
        }
        self.directive = Some(directive);
        self.explanation = explanation;
        self
    }

    /// Create a `Bail out!` line
    pub fn bailout(explanation: impl Into<String>) -> Self {
        let explanation = explanation.into();
        Self {
            kind: ResultKind::Bailout,
            number: None,
            planned: None,
            ok: true,
            actual_ok: None,
            directive: None,
            raw: format!("Bail out!  {}", explanation),
            explanation,
        }
    }

    /// Create a diagnostic comment line
    pub fn comment(text: impl AsRef<str>) -> Self {
        Self {
            kind: ResultKind::Comment,
            number: None,
            planned: None,
            ok: true,
            actual_ok: None,
            directive: None,
            explanation: String::new(),
            raw: format!("# {}", text.as_ref()),
        }
    }

    /// Create a plan line (`1..N`)
    pub fn plan(planned: u64) -> Self {
        Self {
            kind: ResultKind::Plan,
            number: None,
            planned: Some(planned),
            ok: true,
            actual_ok: None,
            directive: None,
            explanation: String::new(),
            raw: format!("1..{}", planned),
        }
    }

    /// Create a `1..0 # SKIP` plan that skips the whole file
    pub fn skip_all(reason: impl Into<String>) -> Self {
        Self::plan(0).with_directive(Directive::Skip, reason)
    }

    pub fn is_plan(&self) -> bool {
        self.kind == ResultKind::Plan
    }

    pub fn is_test(&self) -> bool {
        self.kind == ResultKind::Test
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// The literal `ok` / `not ok` status, ignoring directives
    pub fn is_actual_ok(&self) -> bool {
        self.actual_ok.unwrap_or(self.ok)
    }

    pub fn is_bailout(&self) -> bool {
        self.kind == ResultKind::Bailout
    }

    pub fn is_comment(&self) -> bool {
        self.kind == ResultKind::Comment
    }

    pub fn has_skip(&self) -> bool {
        self.directive == Some(Directive::Skip)
    }

    pub fn has_todo(&self) -> bool {
        self.directive == Some(Directive::Todo)
    }

    pub fn has_directive(&self) -> bool {
        self.directive.is_some()
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for ResultEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
