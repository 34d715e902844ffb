//! Report stage of the presswatch pipeline.
//!
//! Builds the analyst prompt, asks the language model for the markdown
//! report, reads the chart metrics back out of it, and renders the final
//! HTML page.

pub mod error;
pub mod llm;
pub mod metrics;
pub mod prompt;
pub mod publish;
pub mod render;
pub mod vocabulary;

pub use error::ReportError;
pub use llm::{fallback_report, strip_code_fence, OpenAiClient};
pub use metrics::{extract_metrics, ReportMetrics};
pub use prompt::{build_prompt, DateRange, PromptInput};
pub use publish::{open_in_browser, report_filename, write_report};
pub use render::{render_report, RenderContext};
