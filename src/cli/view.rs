use std::path::PathBuf;

use colored::Colorize;
use eframe::egui;
use stockchart::{VERSION, api, gui::chart_viewer::ChartViewer};

#[derive(clap::Args)]
pub struct ViewCommand {
    #[arg(
        short = 'd',
        long = "data",
        help = "CSV with Company, Date, Open and Close columns, the default is the configured dataset"
    )]
    dataset: Option<PathBuf>,
}

impl ViewCommand {
    pub async fn exec(&self) {
        match api::resolve_dataset(self.dataset.as_deref()).await {
            Ok(source) => {
                let options = eframe::NativeOptions {
                    viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 640.0]),
                    ..Default::default()
                };

                if let Err(err) = eframe::run_native(
                    &format!("Stock Chart {VERSION}"),
                    options,
                    Box::new(|cc| {
                        Ok(Box::new(ChartViewer::new(
                            cc,
                            &source.path,
                            source.delimiter,
                        )))
                    }),
                ) {
                    println!("[!] {}", err.to_string().red());
                }
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}
