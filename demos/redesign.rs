//! Redesign one garment photo from the command line.
//!
//! Requires an API key in `RETHREAD_API_KEY` (or `GEMINI_API_KEY`).
//!
//! ```sh
//! cargo run --example redesign -- old-dress.jpg boho-chic
//! ```

use rethread::{GeminiClient, RethreadConfig, StageKind, StyleOption, WorkflowController};
use std::path::Path;

#[tokio::main]
async fn main() -> rethread::Result<()> {
    tracing_subscriber::fmt().init();

    let image_path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: redesign <image_path> [style]");
        eprintln!("Styles:");
        for style in StyleOption::all() {
            eprintln!("  {:<12} {} ({})", style.id, style.label, style.description);
        }
        std::process::exit(1);
    });
    let style = std::env::args().nth(2);

    let config = RethreadConfig::from_env()?;
    let client = GeminiClient::new(config.clone())?;
    let mut workflow = WorkflowController::new(&config);

    workflow.upload_path(Path::new(&image_path))?;
    if let Some(style) = style {
        if !workflow.select_style(&style) {
            eprintln!("Unknown style '{}', keeping the default", style);
        }
    }

    let label = workflow.selected_style().map(|s| s.label).unwrap_or_default();
    println!("Reimagining {} as {}...", image_path, label);

    workflow.confirm_transform(&client).await;

    if workflow.kind() != StageKind::Results {
        eprintln!("{}", workflow.error().unwrap_or("Transformation failed"));
        return Ok(());
    }

    if let Some(image) = workflow.generated_image() {
        image.write_to(Path::new("redesign.png"))?;
        println!("Saved: redesign.png");
    }

    if let Some(steps) = workflow.tailoring_guide() {
        println!("\nTailoring guide:");
        for step in steps {
            println!("  {}. {}: {}", step.number, step.title, step.detail);
        }
    }
    println!("\n{}", rethread::SUSTAINABILITY.quote);

    Ok(())
}
