use clap::Subcommand;

mod config;
mod render;
mod show;
mod view;

#[derive(Subcommand)]
pub enum Commands {
    /// Show or change configurations
    #[command(subcommand)]
    Config(config::ConfigCommand),

    #[command(about = "Render the chart of a company and month to an SVG file")]
    Render(Box<render::RenderCommand>),

    #[command(about = "Print the prices of a company in a month")]
    #[clap(visible_aliases = &["ls"])]
    Show(Box<show::ShowCommand>),

    #[command(about = "Open the interactive chart window")]
    View(Box<view::ViewCommand>),
}
