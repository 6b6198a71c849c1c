use once_cell::sync::Lazy;
use regex::Regex;
use semchunk_config::NormalizeConfig;
use tracing::debug;

// Control characters except \t, \n and \r
static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("valid regex"));
static LINE_ENDINGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").expect("valid regex"));
static HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Cleans raw extracted text before boundaries are classified.
///
/// The output has no runs of horizontal whitespace, no whitespace at either
/// end of a line, at most one blank line between blocks, and no blank lines
/// at either end. Heading markers and punctuation are left alone. Applying
/// it to its own output is a no-op.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    pub fn normalize(&self, text: &str) -> String {
        let stripped = if self.config.strip_control_chars {
            CONTROL_CHARS.replace_all(text, "")
        } else {
            text.into()
        };
        let unix = LINE_ENDINGS.replace_all(&stripped, "\n");
        let spaced = HORIZONTAL_WS.replace_all(&unix, " ");

        let trimmed = spaced
            .split('\n')
            .map(|line| line.trim_matches(' '))
            .collect::<Vec<_>>()
            .join("\n");

        let collapsed = BLANK_RUNS.replace_all(&trimmed, "\n\n");
        let result = collapsed.trim_matches('\n').to_string();

        debug!(
            input_len = text.len(),
            output_len = result.len(),
            "Normalized text"
        );
        result
    }
}
