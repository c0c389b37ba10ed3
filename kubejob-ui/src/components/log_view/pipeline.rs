//! Raw log text to display lines.

/// Splits `raw` on `\n`, keeps lines containing `filter` (ignoring case)
/// and reverses the result when `descending`.
///
/// Empty raw text yields no lines; an empty filter keeps every line.
pub fn process_lines(raw: &str, filter: &str, descending: bool) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let needle = filter.to_lowercase();
    let mut lines: Vec<String> = raw
        .split('\n')
        .filter(|line| needle.is_empty() || line.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect();

    if descending {
        lines.reverse();
    }
    lines
}

/// Holds the inputs of [`process_lines`] and its latest output.
///
/// The output is recomputed, as a fresh sequence, whenever an input
/// actually changes; every recompute bumps [`generation`](Self::generation).
#[derive(Debug, Clone, Default)]
pub struct LogPipeline {
    raw: String,
    filter: String,
    descending: bool,
    lines: Vec<String>,
    generation: u64,
}

impl LogPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` if the text differed and the lines were recomputed.
    pub fn set_raw(&mut self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        if raw == self.raw {
            return false;
        }
        self.raw = raw;
        self.recompute();
        true
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) -> bool {
        let filter = filter.into();
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.recompute();
        true
    }

    pub fn set_descending(&mut self, descending: bool) -> bool {
        if descending == self.descending {
            return false;
        }
        self.descending = descending;
        self.recompute();
        true
    }

    pub fn toggle_order(&mut self) {
        self.set_descending(!self.descending);
    }

    fn recompute(&mut self) {
        self.lines = process_lines(&self.raw, &self.filter, self.descending);
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_is_case_insensitive() {
        assert_eq!(process_lines("a\nb\nA\nc", "a", false), vec!["a", "A"]);
        assert_eq!(process_lines("a\nb\nA\nc", "a", true), vec!["A", "a"]);
    }

    #[test]
    fn test_empty_raw_yields_nothing() {
        assert!(process_lines("", "", false).is_empty());
        assert!(process_lines("", "x", true).is_empty());
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        assert_eq!(process_lines("one\ntwo\n", "", false), vec!["one", "two", ""]);
    }

    #[test]
    fn test_unicode_case_folding() {
        assert_eq!(process_lines("ÉTAT ok\nother", "état", false), vec!["ÉTAT ok"]);
    }

    #[test]
    fn test_recompute_only_on_change() {
        let mut pipeline = LogPipeline::new();
        assert!(pipeline.set_raw("x\ny"));
        let generation = pipeline.generation();

        assert!(!pipeline.set_raw("x\ny"));
        assert!(!pipeline.set_filter(""));
        assert_eq!(pipeline.generation(), generation);

        pipeline.toggle_order();
        assert_eq!(pipeline.generation(), generation + 1);
        assert_eq!(pipeline.lines(), ["y", "x"]);
    }
}
