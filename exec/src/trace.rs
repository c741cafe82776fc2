use std::fmt;

use serde::Serialize;

/// Rendered lines of an execution, in order.
///
/// A trace is only ever appended to. Its [`Display`](fmt::Display) form is
/// the lines joined with newlines, each one terminated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace(Vec<String>);

impl Trace {
    /// An empty trace.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    /// The lines so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.0 {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_terminates_every_line() {
        let mut trace = Trace::new();
        trace.push("mkdir -p $WORK");
        trace.push("rm $WORK/x");
        assert_eq!(trace.to_string(), "mkdir -p $WORK\nrm $WORK/x\n");
        assert_eq!(Trace::new().to_string(), "");
    }
}
