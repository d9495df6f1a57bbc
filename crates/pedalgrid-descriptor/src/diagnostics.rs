/// Accumulates the dual error/warning report of one extraction call.
///
/// Validation steps receive this by mutable reference instead of capturing
/// shared state; the engine sorts both lists once at the end. Exact duplicate
/// messages are kept.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Lexicographically sorted (errors, warnings).
    pub fn into_sorted(mut self) -> (Vec<String>, Vec<String>) {
        self.errors.sort();
        self.warnings.sort();
        (self.errors, self.warnings)
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[cfg(test)]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
