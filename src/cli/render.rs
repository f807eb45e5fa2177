use std::path::PathBuf;

use colored::Colorize;
use stockchart::{
    api,
    chart::renderer::RenderState,
    data::point::{Company, Month},
    selection::FilterSelection,
};

#[derive(clap::Args)]
pub struct RenderCommand {
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

    #[arg(short = 'o', long = "output", help = "SVG file to write, e.g. -o chart.svg")]
    output: PathBuf,
}

impl RenderCommand {
    pub async fn exec(&self) {
        let selection = FilterSelection::new(self.company, self.month);

        let result = match api::resolve_dataset(self.dataset.as_deref()).await {
            Ok(source) => api::render_chart(&source, &selection, &self.output).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(rendered) => {
                if rendered.state == RenderState::Empty {
                    println!(
                        "[!] No data for {} in {}, the chart shows the empty state",
                        self.company.to_string().yellow(),
                        self.month.to_string().yellow()
                    );
                } else {
                    println!(
                        "{} {} points of {} in {}",
                        "✔".green(),
                        rendered.points,
                        self.company.to_string().cyan(),
                        self.month.to_string().cyan()
                    );
                }
                println!("{}", self.output.to_string_lossy().bright_black());
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}
