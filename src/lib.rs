//! # rethread
//!
//! Garment upcycling studio: upload a photo of a garment, pick a style
//! ("vibe"), and have a hosted image model redesign it from the same fabric.
//!
//! ## Features
//!
//! - **Validated ingest** of PNG, JPEG and WebP uploads
//!   with a size bound, base64 transport encoding and a `data:` preview
//! - **Deterministic instructions** built from a fixed four-entry style catalog
//! - **Gemini `generateContent` client** behind a [`TransformService`] trait,
//!   so the remote model can be swapped or scripted in tests
//! - **Explicit state machine** ([`WorkflowController`]) over landing, studio
//!   and results, with at most one transform in flight
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rethread::{GeminiClient, RethreadConfig, StageKind, WorkflowController};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RethreadConfig::from_env()?;
//!     let client = GeminiClient::new(config.clone())?;
//!     let mut workflow = WorkflowController::new(&config);
//!
//!     workflow.upload_path(Path::new("old-dress.jpg"))?;
//!     workflow.select_style("boho-chic");
//!     workflow.confirm_transform(&client).await;
//!
//!     match workflow.kind() {
//!         StageKind::Results => {
//!             let image = workflow.generated_image().unwrap();
//!             std::fs::write("redesign.png", image.decode()?)?;
//!         }
//!         _ => eprintln!("{}", workflow.error().unwrap_or("nothing happened")),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Instructions
//!
//! ```rust
//! use rethread::{render_instruction, StyleOption};
//!
//! let style = StyleOption::find("minimalist").unwrap();
//! let text = render_instruction(style);
//! assert!(text.contains("Quiet Luxury"));
//! assert!(text.contains("Keep the same fabric texture"));
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod guide;
pub mod ingest;
pub mod prompt;
pub mod types;
pub mod workflow;

// Re-export main types at crate root
pub use client::{extract_generated_image, GeminiClient, TransformService};
pub use config::RethreadConfig;
pub use error::{
    ConfigError, IngestError, Result, RethreadError, TransformError, TRANSFORM_FAILED_MESSAGE,
};
pub use guide::{tailoring_guide, SustainabilityFacts, TailoringStep, SUSTAINABILITY};
pub use ingest::UploadedGarment;
pub use prompt::{render_instruction, TransformRequest};
pub use types::{GeneratedImage, StageKind, StyleOption, DEFAULT_STYLE_ID, STYLE_CATALOG};
pub use workflow::{AttemptId, PendingTransform, ResultsState, Stage, StudioState, WorkflowController};
