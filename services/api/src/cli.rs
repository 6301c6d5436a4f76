use crate::demo::{run_queries, run_score, QueriesArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_risk::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Risk Playground",
    about = "Score loan applicants and browse portfolio analytics from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one applicant and print the explanation panel
    Score(ScoreArgs),
    /// List the analytics query catalog
    Queries(QueriesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override RISK_MODEL_PATH
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Override ANALYTICS_SNAPSHOT_DIR
    #[arg(long)]
    pub(crate) snapshots: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Queries(args) => {
            run_queries(args);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["credit-risk-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_overrides_parse() {
        let cli = Cli::try_parse_from([
            "credit-risk-api",
            "serve",
            "--port",
            "8080",
            "--snapshots",
            "/srv/snapshots",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.snapshots, Some(PathBuf::from("/srv/snapshots")));
                assert!(args.model.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn score_accepts_profile_flags() {
        let cli = Cli::try_parse_from([
            "credit-risk-api",
            "score",
            "--probability",
            "0.1",
            "--age",
            "52",
            "--region",
            "north Bohemia",
            "--district",
            "Most",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.probability, Some(0.1));
                assert_eq!(args.age, Some(52));
                assert_eq!(args.district.as_deref(), Some("Most"));
                assert!(!args.tech_adopter);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
