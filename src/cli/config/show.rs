use colored::Colorize;
use stockchart::api;
use tabled::settings::{Color, object::Columns};

#[derive(clap::Args)]
pub struct ConfigShowCommand;

impl ConfigShowCommand {
    pub async fn exec(&self) {
        match api::get_config().await {
            Ok(config) => {
                let table_data: Vec<Vec<String>> = config
                    .entries()
                    .into_iter()
                    .map(|(k, v)| vec![k, v])
                    .collect();

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Columns::first(), Color::FG_CYAN);
                println!("{table}");

                if let Ok(config_path) = api::get_config_path() {
                    println!("{}", config_path.to_string_lossy().bright_black());
                }
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}
