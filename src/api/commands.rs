//! Console commands
//!
//! One line of input is one command. Parsing never touches the session;
//! [`execute`] runs a parsed command and returns the text to print.

use std::fmt::Write;
use std::str::FromStr;

use super::client::ScoringClient;
use crate::error::{AppError, AppResult};
use crate::logic::{render, Preset, Session};
use crate::models::FeatureField;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Blank line
    Empty,
    /// Set a field from raw text; empty text makes it absent
    Set { field: FeatureField, raw: String },
    ClientId(Option<String>),
    Preset(Preset),
    Show,
    Score,
    Explain,
    /// Batch-score presets (all four when none given)
    Batch(Vec<Preset>),
    History,
    Stats,
    Legend,
    Clear,
    Health,
    Help,
    Quit,
}

/// What the shell does after a command
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub const HELP: &str = "\
Commands:
  set <field> [value]   set a field; no value makes it absent
  unset <field>         make a field absent
  client [id]           set or clear the client id
  preset <name>         load legit | fraud | new-device-large-amount | night-micro-transfers
  show                  show the current transaction
  score                 score the current transaction
  explain               explain the last score
  batch [preset...]     score presets in one call
  history               session history (newest first)
  stats                 session statistics
  legend                risk tier legend
  clear                 clear the session history
  health                check the scoring service
  help                  this text
  quit                  leave
";

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Command::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match name {
            "set" => {
                let (field, rest) = args
                    .split_first()
                    .ok_or(AppError::Usage("set <field> [value]"))?;
                Command::Set {
                    field: field.parse()?,
                    raw: rest.join(" "),
                }
            }
            "unset" => match args.as_slice() {
                [field] => Command::Set {
                    field: field.parse()?,
                    raw: String::new(),
                },
                _ => return Err(AppError::Usage("unset <field>")),
            },
            "client" => match args.as_slice() {
                [] => Command::ClientId(None),
                [id] => Command::ClientId(Some(id.to_string())),
                _ => return Err(AppError::Usage("client [id]")),
            },
            "preset" => match args.as_slice() {
                [name] => Command::Preset(name.parse()?),
                _ => return Err(AppError::Usage("preset <name>")),
            },
            "batch" => {
                let presets = args
                    .iter()
                    .map(|name| name.parse())
                    .collect::<Result<Vec<Preset>, _>>()?;
                if presets.is_empty() {
                    Command::Batch(Preset::ALL.to_vec())
                } else {
                    Command::Batch(presets)
                }
            }
            "show" => Command::Show,
            "score" => Command::Score,
            "explain" => Command::Explain,
            "history" => Command::History,
            "stats" => Command::Stats,
            "legend" => Command::Legend,
            "clear" => Command::Clear,
            "health" => Command::Health,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(AppError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

/// Line the shell prints for a failed command
pub fn error_line(err: &AppError) -> String {
    format!("Error: {}\n", err.user_message())
}

/// Run one command against the session
pub async fn execute(
    session: &mut Session,
    client: &ScoringClient,
    command: Command,
) -> AppResult<Flow> {
    let output = match command {
        Command::Empty => String::new(),
        Command::Quit => return Ok(Flow::Quit),
        Command::Help => HELP.to_string(),

        Command::Set { field, raw } => {
            session.builder.set_field(field, &raw);
            match session.builder.current_vector().get(field) {
                Some(value) => format!("{} = {}\n", field, value),
                None if raw.trim().is_empty() => format!("{} is now absent\n", field),
                None => format!(
                    "{}: '{}' is not a number, field left absent\n",
                    field,
                    raw.trim()
                ),
            }
        }
        Command::ClientId(id) => {
            session.builder.set_client_id(id.as_deref());
            match &session.builder.current_vector().client_id {
                Some(id) => format!("client_id = {}\n", id),
                None => "client_id cleared\n".to_string(),
            }
        }
        Command::Preset(preset) => {
            session.builder.apply_preset(preset);
            format!(
                "Loaded preset '{}' ({})\n{}",
                preset,
                preset.description(),
                render::vector(session.builder.current_vector())
            )
        }
        Command::Show => {
            let mut out = render::vector(session.builder.current_vector());
            for (field, raw) in session.builder.rejected_inputs() {
                let _ = writeln!(out, "! {}: '{}' is not a number", field, raw);
            }
            out
        }

        Command::Score => {
            let scored = session.score(client).await?;
            render::outcome(&scored.outcome)
        }
        Command::Explain => {
            let text = session.explain(client).await?;
            render::explanation(text)
        }
        Command::Batch(presets) => {
            let results = session.score_presets(client, &presets).await?;
            let mut out = String::new();
            for (preset, outcome) in results {
                let _ = writeln!(
                    out,
                    "{:<24} {:>8}  {}",
                    preset.as_str(),
                    render::percent(outcome.fraud_probability, 2),
                    render::badge(&outcome.risk_level)
                );
            }
            out
        }

        Command::History => render::history(session.ledger.entries()),
        Command::Stats => render::statistics(&session.ledger.statistics()),
        Command::Legend => render::legend(&client.config().thresholds),
        Command::Clear => {
            session.reset();
            "Session history cleared\n".to_string()
        }
        Command::Health => {
            let health = client.health_check().await?;
            format!("Scoring service: {}\n", health.status)
        }
    };

    Ok(Flow::Continue(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{self, MockService};
    use crate::config::Config;
    use crate::error::ApiError;

    #[test]
    fn test_parse_commands() {
        assert_eq!("".parse::<Command>().unwrap(), Command::Empty);
        assert_eq!(
            "set amount 1500".parse::<Command>().unwrap(),
            Command::Set { field: FeatureField::Amount, raw: "1500".into() }
        );
        assert_eq!(
            "set os_ver_cnt_30d".parse::<Command>().unwrap(),
            Command::Set { field: FeatureField::OsVerCnt30d, raw: String::new() }
        );
        assert_eq!(
            "unset burstiness_sessions".parse::<Command>().unwrap(),
            Command::Set { field: FeatureField::BurstinessSessions, raw: String::new() }
        );
        assert_eq!(
            "preset night-micro-transfers".parse::<Command>().unwrap(),
            Command::Preset(Preset::NightMicroTransfers)
        );
        assert_eq!("batch".parse::<Command>().unwrap(), Command::Batch(Preset::ALL.to_vec()));
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("client".parse::<Command>().unwrap(), Command::ClientId(None));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("set".parse::<Command>(), Err(AppError::Usage(_))));
        assert!(matches!("set speed 3".parse::<Command>(), Err(AppError::UnknownField(_))));
        assert!(matches!("preset holiday".parse::<Command>(), Err(AppError::UnknownPreset(_))));
        assert!(matches!("launch".parse::<Command>(), Err(AppError::UnknownCommand(_))));
        assert!(matches!("client a b".parse::<Command>(), Err(AppError::Usage("client [id]"))));
        assert_eq!(
            "client c-42".parse::<Command>().unwrap(),
            Command::ClientId(Some("c-42".into()))
        );
    }

    #[tokio::test]
    async fn test_execute_round_trip() {
        let base = mock::spawn(MockService::default()).await;
        let client = ScoringClient::new(Config {
            api_base_url: base,
            ..Config::default()
        })
        .unwrap();
        let mut session = Session::new();

        let run = |line: &str| line.parse::<Command>().unwrap();

        let set = run("set login_sessions_7d abc");
        let Flow::Continue(out) = execute(&mut session, &client, set).await.unwrap() else {
            panic!("expected output");
        };
        assert!(out.contains("not a number"));

        let err = execute(&mut session, &client, run("score")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        execute(&mut session, &client, run("preset fraud")).await.unwrap();
        let Flow::Continue(out) = execute(&mut session, &client, run("score")).await.unwrap() else {
            panic!("expected output");
        };
        assert!(out.starts_with("High risk"));
        assert!(out.contains("91.00%"));

        let Flow::Continue(out) = execute(&mut session, &client, run("stats")).await.unwrap() else {
            panic!("expected output");
        };
        assert_eq!(out, "Checked: 1   Average risk: 91.0%   HIGH share: 100.0%\n");

        assert_eq!(execute(&mut session, &client, run("quit")).await.unwrap(), Flow::Quit);
    }

    #[tokio::test]
    async fn test_transport_failure_prints_unexpected_error() {
        // Nothing listens on port 9 locally
        let client = ScoringClient::new(Config {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        })
        .unwrap();
        let mut session = Session::new();

        let err = execute(&mut session, &client, Command::Score).await.unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::Network(_))));
        assert!(error_line(&err).starts_with("Error: "));
        assert!(session.last_result().is_none());

        let silent = AppError::Api(ApiError::Network(String::new()));
        assert_eq!(error_line(&silent), "Error: Unexpected error\n");
    }

    #[tokio::test]
    async fn test_failed_explain_prints_status() {
        let service = MockService::default();
        let base = mock::spawn(service.clone()).await;
        let client = ScoringClient::new(Config {
            api_base_url: base,
            ..Config::default()
        })
        .unwrap();
        let mut session = Session::new();

        execute(&mut session, &client, Command::Score).await.unwrap();
        service.fail_with(503);

        let err = execute(&mut session, &client, Command::Explain).await.unwrap_err();
        assert_eq!(error_line(&err), "Error: API error: 503\n");
        assert!(session.last_result().is_some());
    }
}
