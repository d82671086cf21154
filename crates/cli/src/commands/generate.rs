//! Generate command implementation.

use infowidget_engine::{
    DirectoryResources, EmbeddedResources, GenerationReport, ResourceProvider, WidgetGenerator,
};
use miette::{Result, miette};

use crate::config::Settings;
use crate::output;

/// Generates the widgets described by the settings.
pub async fn execute(settings: &Settings, dry_run: bool) -> Result<()> {
    if dry_run {
        output::info("Dry run mode - no files will be written");
    }

    output::info(&format!(
        "Generating widgets from {} into {}",
        settings.metadata.display(),
        settings.output.display()
    ));

    let report = generate(settings, dry_run).await?;

    for path in &report.written {
        output::widget_written(path, report.dry_run);
    }

    output::summary(report.written.len(), report.dry_run, report.duration_ms);

    Ok(())
}

/// Loads the catalog and runs the generator once.
pub async fn generate(settings: &Settings, dry_run: bool) -> Result<GenerationReport> {
    let catalog = infowidget_parser::parse_file(&settings.metadata)
        .map_err(|e| miette!("Failed to load metadata: {}", e))?;

    let mut generator = WidgetGenerator::new(catalog, &settings.output, resources(settings))
        .with_dry_run(dry_run);

    if settings.parallel > 0 {
        generator = generator.with_max_parallelism(settings.parallel);
    }

    generator
        .generate()
        .await
        .map_err(|e| miette!("Generation failed: {}", e))
}

/// Picks the resource provider: a custom directory, or the embedded defaults.
pub fn resources(settings: &Settings) -> Box<dyn ResourceProvider> {
    match &settings.resources {
        Some(dir) => Box::new(DirectoryResources::new(dir)),
        None => Box::new(EmbeddedResources),
    }
}
