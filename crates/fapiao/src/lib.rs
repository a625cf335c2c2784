pub mod batch;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod interpret;
pub mod llm;
pub mod model;
pub mod report;

pub use batch::{BatchRunner, BatchSummary, BatchWorker, CancelHandle, ProgressEvent};
pub use cache::InvoiceCache;
pub use config::LlmConfig;
pub use error::{
    BatchError, CacheError, ConfigError, ExtractError, FapiaoError, InterpretError, LlmError,
    ReportError, Result,
};
pub use extract::{PdfTokenSource, TokenSource};
pub use interpret::InvoiceInterpreter;
pub use llm::{ChatCompletion, DeepSeekClient};
pub use model::{InvoiceInfo, InvoiceItem};
