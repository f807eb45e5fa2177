use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::{
    CONFIG_PATH,
    chart::renderer::RenderState,
    config::AppConfig,
    data::{filter::filter_series, loader, point::DataPoint},
    error::*,
    selection::FilterSelection,
    widget::StockChart,
};

/// A dataset file together with how to read it.
#[derive(Clone, Debug)]
pub struct DatasetSource {
    pub path: PathBuf,
    pub delimiter: u8,
}

pub struct RenderOutput {
    pub points: usize,
    pub state: RenderState,
}

pub fn get_config_path() -> ScResult<PathBuf> {
    Ok(CONFIG_PATH.read()?.clone())
}

pub async fn get_config() -> ScResult<AppConfig> {
    let config_path = get_config_path()?;
    tokio::task::spawn_blocking(move || AppConfig::load(&config_path)).await?
}

pub async fn set_config(key: &str, value: &str) -> ScResult<AppConfig> {
    let config_path = get_config_path()?;
    let (key, value) = (key.to_string(), value.to_string());

    tokio::task::spawn_blocking(move || -> ScResult<AppConfig> {
        let mut config = AppConfig::load(&config_path)?;
        config.set(&key, &value)?;
        config.store(&config_path)?;
        debug!("Set config '{key}' in '{}'", config_path.to_string_lossy());

        Ok(config)
    })
    .await?
}

/// Uses `path` when given, otherwise the dataset from the config.
pub async fn resolve_dataset(path: Option<&Path>) -> ScResult<DatasetSource> {
    let config = get_config().await?;
    let delimiter = config.delimiter_byte()?;

    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config.dataset.ok_or_else(|| ScError::NoData {
            code: "NO_DATASET",
            message: "No dataset given, pass -d <csv> or run 'config set dataset <csv>'"
                .to_string(),
        })?,
    };

    Ok(DatasetSource { path, delimiter })
}

pub async fn load_dataset(source: &DatasetSource) -> ScResult<Vec<DataPoint>> {
    let points = loader::load_csv(&source.path, source.delimiter).await?;
    info!(
        "Dataset '{}' loaded with {} points",
        source.path.to_string_lossy(),
        points.len()
    );

    Ok(points)
}

pub async fn filter_dataset(
    source: &DatasetSource,
    selection: &FilterSelection,
) -> ScResult<Vec<DataPoint>> {
    let dataset = load_dataset(source).await?;

    Ok(filter_series(
        &dataset,
        selection.company(),
        selection.month(),
    ))
}

pub async fn render_chart(
    source: &DatasetSource,
    selection: &FilterSelection,
    output: &Path,
) -> ScResult<RenderOutput> {
    let dataset = load_dataset(source).await?;
    let chart = StockChart::with_selection(dataset, *selection);

    tokio::fs::write(output, chart.to_svg()).await?;
    info!("Chart written to '{}'", output.to_string_lossy());

    Ok(RenderOutput {
        points: chart.filtered().len(),
        state: chart.state(),
    })
}
