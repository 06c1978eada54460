pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai";
pub const DEFAULT_LLM_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_CORPUS_DIR: &str = "data";
pub const DEFAULT_CORPUS_EXTENSION: &str = "md";
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;
pub const DEFAULT_TOP_K: usize = 3;

/// Environment variables that override config keys, as `(variable, path)`.
pub const ENV_OVERRIDES: [(&str, &[&str]); 4] = [
    ("GROQ_API_KEY", &["secrets", "groq_api_key"]),
    ("HUGGINGFACEHUB_API_TOKEN", &["secrets", "huggingfacehub_api_token"]),
    ("PORTFOLIO_HOST", &["server", "host"]),
    ("PORT", &["server", "port"]),
];
