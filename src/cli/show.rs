use std::path::PathBuf;

use colored::Colorize;
use stockchart::{
    api,
    chart::scene::EMPTY_MESSAGE,
    data::point::{Company, DataPoint, Month},
    error::ScResult,
    selection::FilterSelection,
    utils::{datetime::date_to_str, text::format_fixed},
};
use tabled::settings::{
    Alignment, Color,
    object::{Columns, Object, Rows},
};

#[derive(clap::Args)]
pub struct ShowCommand {
    #[arg(
        short = 'd',
        long = "data",
        help = "CSV with Company, Date, Open and Close columns, the default is the configured dataset"
    )]
    dataset: Option<PathBuf>,

    #[arg(
        short = 'c',
        long = "company",
        default_value_t = Company::Apple,
        help = "One of Apple, Microsoft, Amazon, Google, Meta"
    )]
    company: Company,

    #[arg(
        short = 'm',
        long = "month",
        default_value_t = Month::November,
        help = "Month name, e.g. -m November"
    )]
    month: Month,

    #[arg(long = "json", help = "Print as JSON instead of a table")]
    json: bool,
}

impl ShowCommand {
    pub async fn exec(&self) {
        match self.load().await {
            Ok(series) => {
                if self.json {
                    match serde_json::to_string_pretty(&series) {
                        Ok(json) => println!("{json}"),
                        Err(err) => println!("[!] {}", err.to_string().red()),
                    }
                } else if series.is_empty() {
                    println!("[!] {}", EMPTY_MESSAGE.yellow());
                } else {
                    let mut table_data: Vec<Vec<String>> = vec![vec![
                        "Date".to_string(),
                        "Open".to_string(),
                        "Close".to_string(),
                        "Diff".to_string(),
                    ]];
                    for p in &series {
                        table_data.push(vec![
                            date_to_str(&p.date()),
                            format_fixed(p.open(), 2),
                            format_fixed(p.close(), 2),
                            format_fixed(p.diff(), 2),
                        ]);
                    }

                    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                    table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
                    table.modify(Columns::first().not(Rows::first()), Color::FG_CYAN);
                    table.modify(Columns::new(1..), Alignment::right());
                    println!("{table}");
                }
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }

    async fn load(&self) -> ScResult<Vec<DataPoint>> {
        let source = api::resolve_dataset(self.dataset.as_deref()).await?;
        let selection = FilterSelection::new(self.company, self.month);

        api::filter_dataset(&source, &selection).await
    }
}
