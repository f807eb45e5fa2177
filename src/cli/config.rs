use clap::Subcommand;

mod set;
mod show;

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Set the default dataset path or the CSV delimiter")]
    Set(Box<set::ConfigSetCommand>),

    #[command(about = "Show the default dataset path and the CSV delimiter")]
    Show(Box<show::ConfigShowCommand>),
}

impl ConfigCommand {
    pub async fn exec(&self) {
        match self {
            Self::Set(cmd) => cmd.exec().await,
            Self::Show(cmd) => cmd.exec().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[derive(Parser)]
    struct ConfigCli {
        #[command(subcommand)]
        command: ConfigCommand,
    }

    #[test]
    fn test_config_commands() {
        ConfigCli::command().debug_assert();

        let cli = ConfigCli::try_parse_from(["config", "set", "delimiter", ";"]).unwrap();
        assert!(matches!(cli.command, ConfigCommand::Set(_)));

        let cli = ConfigCli::try_parse_from(["config", "show"]).unwrap();
        assert!(matches!(cli.command, ConfigCommand::Show(_)));

        let command = ConfigCli::command();
        let about = command
            .find_subcommand("set")
            .and_then(|c| c.get_about())
            .unwrap()
            .to_string();
        assert!(about.contains("dataset") && about.contains("delimiter"));
    }
}
