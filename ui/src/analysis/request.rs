//! Form state and validation for starting an analysis.

/// Which input the form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    File,
    Rss,
}

/// An audio file picked in the browser, read fully before submission.
#[derive(Clone, PartialEq, Default)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Exactly one submission payload; the variant carries the proof.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPayload {
    File(SelectedFile),
    RssUrl(String),
}

/// A fully validated submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub payload: AnalysisPayload,
    pub api_key_openai: String,
    pub api_key_perplexity: String,
}

/// Raw form fields as bound to the upload view's inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisForm {
    pub mode: InputMode,
    pub file: Option<SelectedFile>,
    pub rss_url: String,
    pub api_key_openai: String,
    pub api_key_perplexity: String,
}

impl AnalysisForm {
    /// Checks every submission precondition and reports all violations
    /// together, never just the first one.
    pub fn validate(&self) -> Result<AnalysisRequest, Vec<String>> {
        let mut violations = Vec::new();

        let payload = match self.mode {
            InputMode::File => match &self.file {
                Some(file) => Some(AnalysisPayload::File(file.clone())),
                None => {
                    violations.push("Please upload a podcast file".to_string());
                    None
                }
            },
            InputMode::Rss => {
                if self.rss_url.trim().is_empty() {
                    violations.push("Please input RSS link".to_string());
                    None
                } else {
                    Some(AnalysisPayload::RssUrl(self.rss_url.clone()))
                }
            }
        };

        if self.api_key_openai.trim().is_empty() {
            violations.push("OpenAI API Key is required".to_string());
        }
        if self.api_key_perplexity.trim().is_empty() {
            violations.push("Perplexity API Key is required".to_string());
        }

        match payload {
            Some(payload) if violations.is_empty() => Ok(AnalysisRequest {
                payload,
                api_key_openai: self.api_key_openai.clone(),
                api_key_perplexity: self.api_key_perplexity.clone(),
            }),
            _ => Err(violations),
        }
    }
}
