use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "PAPER_INTEL_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_GROQ_API_KEY: &str = "GROQ_API_KEY";
const ENV_MODEL: &str = "PAPER_INTEL_MODEL";
const ENV_LLM_BASE_URL: &str = "PAPER_INTEL_LLM_BASE_URL";

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Language-model gateway configuration.
///
/// The credential is resolved once at startup and passed down explicitly;
/// nothing below the composition root reads the environment.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Local embedding model configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbeddingConfig {
    /// Directory for downloaded model files. Defaults to the embedding
    /// library's own cache location.
    #[serde(default)]
    pub cache_dir: Option<String>,
}

/// Policy deciding how a SUPPORTED/UNSUPPORTED verdict response is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupportPolicy {
    /// Any case-insensitive occurrence of "SUPPORTED" counts as supported.
    /// "UNSUPPORTED" contains "SUPPORTED", so negative verdicts match too.
    ContainsMatch,
    /// "UNSUPPORTED" anywhere in the response wins as unsupported before
    /// "SUPPORTED" is considered.
    #[default]
    NegationAware,
}

impl SupportPolicy {
    /// Decide whether a verdict response marks the claim as supported.
    pub fn is_supported(&self, response: &str) -> bool {
        let upper = response.to_uppercase();
        match self {
            SupportPolicy::ContainsMatch => upper.contains("SUPPORTED"),
            SupportPolicy::NegationAware => {
                !upper.contains("UNSUPPORTED") && upper.contains("SUPPORTED")
            }
        }
    }
}

/// Tunables for segmentation, retrieval and claim evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Character budget per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Chunks retrieved per chat question
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Leading chunks concatenated into the claim-evaluation context
    #[serde(default = "default_context_chunks")]
    pub context_chunks: usize,
    /// Character cap on the text sent for summary extraction
    #[serde(default = "default_max_summary_chars")]
    pub max_summary_chars: usize,
    /// Fragments with this many whitespace tokens or fewer are not claims
    #[serde(default = "default_min_claim_tokens")]
    pub min_claim_tokens: usize,
    /// Upper bound on concurrent claim classifications
    #[serde(default = "default_claim_concurrency")]
    pub claim_concurrency: usize,
    #[serde(default)]
    pub support_policy: SupportPolicy,
}

fn default_chunk_size() -> usize {
    500
}

fn default_top_k() -> usize {
    3
}

fn default_context_chunks() -> usize {
    5
}

fn default_max_summary_chars() -> usize {
    8000
}

fn default_min_claim_tokens() -> usize {
    5
}

fn default_claim_concurrency() -> usize {
    1
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            top_k: default_top_k(),
            context_chunks: default_context_chunks(),
            max_summary_chars: default_max_summary_chars(),
            min_claim_tokens: default_min_claim_tokens(),
            claim_concurrency: default_claim_concurrency(),
            support_policy: SupportPolicy::default(),
        }
    }
}

/// Citation lookup service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CitationConfig {
    #[serde(default = "default_citation_base_url")]
    pub base_url: String,
    #[serde(default = "default_citation_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_citation_base_url() -> String {
    "https://api.semanticscholar.org".to_string()
}

fn default_citation_timeout_secs() -> u64 {
    15
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            base_url: default_citation_base_url(),
            timeout_secs: default_citation_timeout_secs(),
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub citations: CitationConfig,
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub analysis: AnalysisConfig,
    pub citations: CitationConfig,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let llm = LlmConfig {
            api_key: std::env::var(ENV_GROQ_API_KEY).unwrap_or_default(),
            model: std::env::var(ENV_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var(ENV_LLM_BASE_URL)
                .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string()),
            temperature: DEFAULT_TEMPERATURE,
        };

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        Self {
            llm,
            embedding: file.embedding,
            analysis: file.analysis,
            citations: file.citations,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                // Handle empty file
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AnalysisConfig::default();
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.context_chunks, 5);
        assert_eq!(config.max_summary_chars, 8000);
        assert_eq!(config.min_claim_tokens, 5);
        assert_eq!(config.claim_concurrency, 1);
        assert_eq!(config.support_policy, SupportPolicy::NegationAware);
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let yaml = r#"
analysis:
  chunk_size: 200
  support_policy: contains-match
citations:
  timeout_secs: 5
"#;
        let file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.analysis.chunk_size, 200);
        assert_eq!(file.analysis.top_k, 3);
        assert_eq!(file.analysis.support_policy, SupportPolicy::ContainsMatch);
        assert_eq!(file.citations.timeout_secs, 5);
        assert_eq!(file.citations.base_url, "https://api.semanticscholar.org");
    }

    #[test]
    fn contains_match_treats_negative_verdicts_as_supported() {
        let policy = SupportPolicy::ContainsMatch;
        assert!(policy.is_supported("SUPPORTED."));
        assert!(policy.is_supported("unsupported"));
        assert!(!policy.is_supported("no verdict here"));
    }

    #[test]
    fn negation_aware_reads_unsupported_first() {
        let policy = SupportPolicy::NegationAware;
        assert!(policy.is_supported("SUPPORTED."));
        assert!(policy.is_supported("The claim is supported by the context."));
        assert!(!policy.is_supported("UNSUPPORTED."));
        assert!(!policy.is_supported("Verdict: unsupported, the context never mentions it"));
        assert!(!policy.is_supported("no verdict here"));
    }
}
