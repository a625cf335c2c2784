use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FapiaoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Interpretation error: {0}")]
    Interpret(#[from] InterpretError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API key is not set (expected DEEPSEEK_API_KEY or an explicit key)")]
    MissingApiKey,

    #[error("Invalid API host '{url}': {reason}")]
    InvalidHost { url: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read document '{path}': {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a valid PDF document '{path}': {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    #[error("Document has no pages: {0}")]
    EmptyDocument(PathBuf),

    #[error("Failed to run pdftotext: {0}")]
    PdfToText(#[source] std::io::Error),

    #[error("pdftotext exited with {status}: {stderr}")]
    PdfToTextFailed { status: String, stderr: String },

    #[error("Failed to parse positioned-text layout: {0}")]
    LayoutParse(String),
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("API response contained no choices")]
    EmptyChoices,
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to read cache entry '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode cache entry '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write cache entry '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode cache entry '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a single file's interpretation. Token-extraction and LLM-call
/// failures share one category with the cause preserved; a response that is
/// not parseable JSON is its own category.
#[derive(Error, Debug)]
pub enum InterpretError {
    #[error("Text extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("LLM response was empty")]
    EmptyResponse,

    #[error("LLM response was not valid JSON: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create report '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write report row: {0}")]
    WriteRow(#[from] csv::Error),

    #[error("Failed to flush report: {0}")]
    Flush(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Failed to scan directory '{path}': {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Batch worker panicked")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, FapiaoError>;
