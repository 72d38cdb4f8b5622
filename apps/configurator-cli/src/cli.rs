use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// EliteEV vehicle configurator - build an EV and get a priced quote
#[derive(Debug, Parser)]
#[command(name = "ev-configurator")]
#[command(about = "Configure an electric vehicle and generate a priced quote")]
#[command(version)]
pub struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List vehicle models with their base price
    Models,
    /// List configuration sections and their options
    Options,
    /// Price a configuration
    Price {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Generate, store and write a quote document
    Quote {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        customer: CustomerArgs,

        /// Document format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Output directory (overrides CONFIGURATOR_OUTPUT_DIR)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Read commands from stdin, keeping the selection and quotes between them
    Session,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Vehicle model id (e.g. tesla-model-3). Defaults to the catalog default
    #[arg(short, long)]
    pub model: Option<String>,

    /// Option choice as SECTION=OPTION (e.g. battery=long-range). Repeatable
    #[arg(short, long = "option", value_name = "SECTION=OPTION", value_parser = parse_option_pair)]
    pub options: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CustomerArgs {
    /// Customer name
    #[arg(long)]
    pub name: Option<String>,

    /// Customer email
    #[arg(long)]
    pub email: Option<String>,

    /// Customer phone
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Paginated plain text
    Text,
    /// Pretty-printed JSON
    Json,
    /// A4 PDF document
    Pdf,
}

/// Parses `section=option`.
pub fn parse_option_pair(raw: &str) -> Result<(String, String), String> {
    let (section, option) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SECTION=OPTION, got '{}'", raw))?;

    let (section, option) = (section.trim(), option.trim());
    if section.is_empty() || option.is_empty() {
        return Err(format!("expected SECTION=OPTION, got '{}'", raw));
    }

    Ok((section.to_string(), option.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_option_pair() {
        assert_eq!(
            parse_option_pair("battery=long-range").unwrap(),
            ("battery".to_string(), "long-range".to_string())
        );
        assert_eq!(
            parse_option_pair(" wheels = 21 ").unwrap(),
            ("wheels".to_string(), "21".to_string())
        );
        assert!(parse_option_pair("battery").is_err());
        assert!(parse_option_pair("=long-range").is_err());
        assert!(parse_option_pair("battery=").is_err());
    }

    #[test]
    fn test_parse_quote_command() {
        let cli = Cli::try_parse_from([
            "ev-configurator",
            "--json",
            "quote",
            "--model",
            "bmw-i4",
            "-o",
            "battery=performance",
            "--option",
            "color=red",
            "--name",
            "Ada Lovelace",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Quote {
                selection,
                customer,
                format,
                out,
            } => {
                assert_eq!(selection.model.as_deref(), Some("bmw-i4"));
                assert_eq!(selection.options.len(), 2);
                assert_eq!(selection.options[1], ("color".to_string(), "red".to_string()));
                assert_eq!(customer.name.as_deref(), Some("Ada Lovelace"));
                assert_eq!(customer.email, None);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(out, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_session_and_pdf() {
        let cli = Cli::try_parse_from(["ev-configurator", "session"]).unwrap();
        assert!(matches!(cli.command, Command::Session));

        let cli = Cli::try_parse_from(["ev-configurator", "quote", "-f", "pdf"]).unwrap();
        assert!(matches!(cli.command, Command::Quote { format: OutputFormat::Pdf, .. }));
    }

    #[test]
    fn test_bad_option_pair_rejected_by_parser() {
        assert!(Cli::try_parse_from(["ev-configurator", "price", "--option", "battery"]).is_err());
    }
}
