//! # stockchart lib

use std::{
    env,
    path::PathBuf,
    sync::{LazyLock, RwLock},
};

use directories::ProjectDirs;

pub mod api;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod gui;
pub mod selection;
pub mod utils;
pub mod widget;

pub static CHANNEL_BUFFER_DEFAULT: usize = 64;

pub static VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn init(config_path: Option<PathBuf>) {
    env_logger::Builder::new()
        .parse_filters(env::var("LOG").as_deref().unwrap_or("off"))
        .init();

    if let Some(config_path) = config_path {
        if let Ok(mut p) = CONFIG_PATH.write() {
            *p = config_path;
        }
    }
}

static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(
        match ProjectDirs::from("", "", env!("CARGO_PKG_NAME")) {
            Some(proj_dirs) => proj_dirs.config_dir().to_path_buf(),
            None => env::current_dir().unwrap_or_default(),
        }
        .join("config.toml"),
    )
});
