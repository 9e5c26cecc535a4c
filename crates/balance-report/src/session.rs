//! Interactive session: filter, select and print from a prompt
//!
//! One [`ReportView`] lives for the whole session. Filters persist across
//! `reload`; the selection does not.

use anyhow::{Result, bail};
use balance_core::ReportView;
use std::io::Write as _;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::actions;
use crate::config::Config;
use crate::constants;
use crate::table;

const HELP: &str = "\
Filters:
  name [text]          filter by client name substring (no text clears)
  agent [name]         toggle an agent in the agent filter (no name clears)
  balance [text]       filter by balance substring (no text clears)
  clear                clear all filters
Selection:
  select <id>...       select clients by id (space or comma separated)
  deselect <id>...     deselect clients by id
  select-visible       select every client shown by the current filter
  select-none          clear the selection
Views:
  list                 show filtered clients
  selected             show selected clients
  total                show the selection total
  agents               show the agent directory
Output:
  print                write the selected clients report and open it for printing
  export [file]        export selected clients to CSV
Other:
  reload               load the client list again (clears the selection)
  help                 show this help
  quit                 leave the session";

/// A parsed prompt line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Name(String),
    Agent(Option<String>),
    Balance(String),
    ClearFilters,
    Select(Vec<String>),
    Deselect(Vec<String>),
    SelectVisible,
    SelectNone,
    List,
    Selected,
    Total,
    Agents,
    Print,
    Export(Option<PathBuf>),
    Reload,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse one line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "name" => SessionCommand::Name(rest.to_string()),
            "agent" => SessionCommand::Agent((!rest.is_empty()).then(|| rest.to_string())),
            "balance" => SessionCommand::Balance(rest.to_string()),
            "clear" => SessionCommand::ClearFilters,
            "select" | "deselect" => {
                let ids = split_ids(rest);
                if ids.is_empty() {
                    bail!("`{word}` needs at least one id");
                }
                if word == "select" {
                    SessionCommand::Select(ids)
                } else {
                    SessionCommand::Deselect(ids)
                }
            }
            "select-visible" => SessionCommand::SelectVisible,
            "select-none" => SessionCommand::SelectNone,
            "list" | "ls" => SessionCommand::List,
            "selected" => SessionCommand::Selected,
            "total" => SessionCommand::Total,
            "agents" => SessionCommand::Agents,
            "print" => SessionCommand::Print,
            "export" => SessionCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "reload" => SessionCommand::Reload,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            other => bail!("unknown command `{other}` (type `help` for commands)"),
        };
        Ok(Some(command))
    }
}

/// Ids separated by whitespace and/or commas
pub fn split_ids(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether the session continues after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session state
pub struct Session {
    config: Config,
    view: ReportView,
}

impl Session {
    pub fn new(config: Config, view: ReportView) -> Self {
        Self { config, view }
    }

    /// Run the prompt loop over `input` until `quit` or end of input.
    ///
    /// Never loads on its own; an unloaded view waits for `reload`.
    pub async fn run<R>(mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        if !self.view.is_loaded() {
            println!("Type `reload` to try loading again.");
        }
        println!("Type `help` for commands.");

        let mut lines = input.lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match SessionCommand::parse(&line) {
                Ok(Some(command)) => {
                    if self.execute(command).await? == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => println!("{e}"),
            }
        }
        Ok(())
    }

    /// Apply one command
    pub async fn execute(&mut self, command: SessionCommand) -> Result<Flow> {
        let currency = &self.config.currency;

        match command {
            SessionCommand::Name(pattern) => {
                self.view.criteria_mut().name_pattern = pattern;
                table::print_listing(&self.view, currency);
            }
            SessionCommand::Agent(Some(agent)) => {
                if !self.config.directory.display_names().contains(&agent.as_str()) {
                    println!("Note: `{agent}` is not in the agent directory");
                }
                let included = self.view.criteria_mut().toggle_agent(&agent);
                println!("Agent `{agent}` {}", if included { "added to filter" } else { "removed from filter" });
                table::print_listing(&self.view, currency);
            }
            SessionCommand::Agent(None) => {
                self.view.criteria_mut().agent_set.clear();
                table::print_listing(&self.view, currency);
            }
            SessionCommand::Balance(pattern) => {
                self.view.criteria_mut().balance_pattern = pattern;
                table::print_listing(&self.view, currency);
            }
            SessionCommand::ClearFilters => {
                self.view.criteria_mut().clear();
                table::print_listing(&self.view, currency);
            }
            SessionCommand::Select(ids) => {
                for id in ids {
                    if !self.view.records().iter().any(|r| r.id == id) {
                        println!("Note: no client with id `{id}`");
                    }
                    self.view.select(id);
                }
                println!("{}", table::selection_summary(&self.view, currency));
            }
            SessionCommand::Deselect(ids) => {
                for id in ids {
                    self.view.deselect(&id);
                }
                println!("{}", table::selection_summary(&self.view, currency));
            }
            SessionCommand::SelectVisible => {
                let count = self.view.select_visible();
                println!("Selected {count} visible client(s)");
                println!("{}", table::selection_summary(&self.view, currency));
            }
            SessionCommand::SelectNone => {
                self.view.clear_selection();
                println!("{}", table::selection_summary(&self.view, currency));
            }
            SessionCommand::List => table::print_listing(&self.view, currency),
            SessionCommand::Selected => {
                let selected = self.view.selected_records();
                if selected.is_empty() {
                    println!("Nothing selected.");
                } else {
                    println!("{}", table::clients_table(&self.view, &selected, currency));
                }
                println!("{}", table::selection_summary(&self.view, currency));
            }
            SessionCommand::Total => println!("{}", table::selection_summary(&self.view, currency)),
            SessionCommand::Agents => println!("{}", table::agents_table(&self.config.directory)),
            SessionCommand::Print => actions::print_selection(&self.view, &self.config)?,
            SessionCommand::Export(path) => {
                let path = path.unwrap_or_else(|| PathBuf::from(constants::EXPORT_FILENAME));
                actions::export_selection(&self.view, &path)?;
            }
            SessionCommand::Reload => {
                actions::load_or_report(&mut self.view, &self.config).await;
            }
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileConfig, Overrides};

    #[test]
    fn test_parse_filters() {
        assert_eq!(
            SessionCommand::parse("name  Dan Levi ").unwrap(),
            Some(SessionCommand::Name("Dan Levi".to_string()))
        );
        assert_eq!(SessionCommand::parse("name").unwrap(), Some(SessionCommand::Name(String::new())));
        assert_eq!(
            SessionCommand::parse("agent יוגב - חנות").unwrap(),
            Some(SessionCommand::Agent(Some("יוגב - חנות".to_string())))
        );
        assert_eq!(SessionCommand::parse("agent").unwrap(), Some(SessionCommand::Agent(None)));
        assert_eq!(
            SessionCommand::parse("balance 100").unwrap(),
            Some(SessionCommand::Balance("100".to_string()))
        );
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            SessionCommand::parse("select 1, 2 3,4").unwrap(),
            Some(SessionCommand::Select(vec!["1".into(), "2".into(), "3".into(), "4".into()]))
        );
        assert!(SessionCommand::parse("select").is_err());
        assert!(SessionCommand::parse("deselect ,").is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(SessionCommand::parse("   ").unwrap(), None);
        assert_eq!(SessionCommand::parse("q").unwrap(), Some(SessionCommand::Quit));
        assert_eq!(
            SessionCommand::parse("export out.csv").unwrap(),
            Some(SessionCommand::Export(Some(PathBuf::from("out.csv"))))
        );
        assert_eq!(SessionCommand::parse("export").unwrap(), Some(SessionCommand::Export(None)));
        assert!(SessionCommand::parse("frobnicate").is_err());
    }

    #[tokio::test]
    async fn test_session_flow() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clients.json");
        std::fs::write(
            &input,
            r#"[{"id": 1, "Name": "Dan", "agent_name": "257", "balance": 100},
                {"id": 2, "Name": "Dan", "agent_name": "718", "balance": null},
                {"id": 3, "Name": "Ori", "agent_name": "555", "balance": 50}]"#,
        )
        .unwrap();
        let config = Config::from_file(
            FileConfig::default(),
            Overrides {
                input: Some(input),
                output_dir: Some(dir.path().to_path_buf()),
                no_open: true,
                ..Overrides::default()
            },
        );

        let mut session = Session::new(config, ReportView::new());
        session.execute(SessionCommand::Reload).await.unwrap();
        assert_eq!(session.view.records().len(), 3);

        session.execute(SessionCommand::Agent(Some("נדב".to_string()))).await.unwrap();
        let visible: Vec<_> = session.view.visible().iter().map(|r| r.id.clone()).collect();
        assert_eq!(visible, vec!["2", "3"]);

        session.execute(SessionCommand::SelectVisible).await.unwrap();
        session.execute(SessionCommand::Select(vec!["1".into()])).await.unwrap();
        session.execute(SessionCommand::Deselect(vec!["2".into()])).await.unwrap();
        assert_eq!(session.view.total(), 150.0);

        session.execute(SessionCommand::Reload).await.unwrap();
        assert!(session.view.selected_ids().is_empty());
        assert!(session.view.criteria().agent_set.contains("נדב"));

        assert_eq!(session.execute(SessionCommand::Quit).await.unwrap(), Flow::Quit);
    }

    #[tokio::test]
    async fn test_run_executes_lines_until_quit() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clients.json");
        std::fs::write(&input, r#"[{"id": 1, "Name": "Dan", "balance": 5}]"#).unwrap();
        let config = Config::from_file(
            FileConfig::default(),
            Overrides {
                input: Some(input),
                ..Overrides::default()
            },
        );

        let script: &[u8] = b"reload\nselect 1\nquit\nreload\n";
        Session::new(config, ReportView::new()).run(script).await.unwrap();
    }
}
