//! Batch widget generation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use infowidget_core::{Result, UpdateCenter, WidgetError};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::renderer;
use crate::resources::{ResourceProvider, STYLESHEET_NAME};

/// Generates one widget file per plugin of a catalog.
pub struct WidgetGenerator {
    /// The catalog being rendered.
    catalog: UpdateCenter,

    /// Existing directory receiving the widgets.
    output_dir: PathBuf,

    /// Template and stylesheet source.
    resources: Box<dyn ResourceProvider>,

    /// Maximum number of concurrent file writes.
    max_parallelism: usize,

    /// Dry run mode (render but don't write).
    dry_run: bool,
}

/// Generation report.
#[derive(Debug)]
pub struct GenerationReport {
    /// Widget files written (or that would be written in dry run), sorted.
    pub written: Vec<PathBuf>,

    /// Copied stylesheet, absent in dry run.
    pub stylesheet: Option<PathBuf>,

    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Total generation time in milliseconds.
    pub duration_ms: u64,
}

impl WidgetGenerator {
    /// Creates a new generator.
    pub fn new(
        catalog: UpdateCenter,
        output_dir: impl Into<PathBuf>,
        resources: Box<dyn ResourceProvider>,
    ) -> Self {
        Self {
            catalog,
            output_dir: output_dir.into(),
            resources,
            max_parallelism: num_cpus::get(),
            dry_run: false,
        }
    }

    /// Sets the maximum number of concurrent writes.
    pub fn with_max_parallelism(mut self, max: usize) -> Self {
        self.max_parallelism = max.max(1);
        self
    }

    /// Enables or disables dry run mode.
    pub fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &UpdateCenter {
        &self.catalog
    }

    /// Returns the maximum parallelism setting.
    pub fn max_parallelism(&self) -> usize {
        self.max_parallelism
    }

    /// Returns the widget path for a plugin key.
    pub fn widget_path(&self, key: &str) -> PathBuf {
        self.output_dir.join(format!("{}.html", key))
    }

    /// Renders every plugin, then writes the stylesheet and the widgets.
    ///
    /// Nothing is written if any plugin fails to render.
    pub async fn generate(&self) -> Result<GenerationReport> {
        let start = Instant::now();

        if !self.output_dir.is_dir() {
            return Err(WidgetError::OutputDirNotFound(self.output_dir.clone()));
        }

        let template = self.resources.template()?;

        info!(plugins = self.catalog.len(), "Starting widget generation");
        let widgets = self.render_all(&template)?;

        if self.dry_run {
            let mut written: Vec<PathBuf> = widgets.into_iter().map(|(path, _)| path).collect();
            written.sort();
            return Ok(GenerationReport {
                written,
                stylesheet: None,
                dry_run: true,
                duration_ms: start.elapsed().as_millis() as u64,
            });
        }

        let stylesheet = self.copy_stylesheet().await?;
        let written = self.write_widgets(widgets).await?;

        Ok(GenerationReport {
            written,
            stylesheet: Some(stylesheet),
            dry_run: false,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Renders all plugins, failing on the first unusable key or missing release.
    fn render_all(&self, template: &str) -> Result<Vec<(PathBuf, String)>> {
        self.catalog
            .plugins()
            .map(|plugin| -> Result<(PathBuf, String)> {
                if !is_file_stem(&plugin.key) {
                    return Err(WidgetError::InvalidKey(plugin.key.clone()));
                }
                debug!(plugin = %plugin.key, "Rendering widget");
                let html = renderer::render(template, plugin)?;
                Ok((self.widget_path(&plugin.key), html))
            })
            .collect()
    }

    async fn copy_stylesheet(&self) -> Result<PathBuf> {
        let path = self.output_dir.join(STYLESHEET_NAME);
        let content = self.resources.stylesheet()?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| WidgetError::FileWrite {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// Writes rendered widgets concurrently, bounded by `max_parallelism`.
    async fn write_widgets(&self, widgets: Vec<(PathBuf, String)>) -> Result<Vec<PathBuf>> {
        let semaphore = Arc::new(Semaphore::new(self.max_parallelism));
        let mut tasks = JoinSet::new();

        for (path, html) in widgets {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(std::io::Error::other)?;

            tasks.spawn(async move {
                let _permit = permit;
                tokio::fs::write(&path, html)
                    .await
                    .map_err(|source| WidgetError::FileWrite {
                        path: path.clone(),
                        source,
                    })?;
                info!(file = %path.display(), "Generated widget");
                Ok::<_, WidgetError>(path)
            });
        }

        let mut written = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            written.push(joined.map_err(std::io::Error::other)??);
        }

        written.sort();
        Ok(written)
    }
}

/// Whether a plugin key names a file directly inside the output directory.
pub fn is_file_stem(key: &str) -> bool {
    !key.is_empty() && key != "." && key != ".." && !key.contains(['/', '\\'])
}
