//! The interactive session. On a TTY the shell offers dialoguer menus; on
//! piped input it reads one command per line, so sessions can be scripted.
//! Every action runs to completion before the next is read, and a failed
//! action is a non-fatal notice that leaves the model untouched.

use std::io::{self, BufRead};

use dialoguer::{Input, Select};

use crate::analysis::resilience::simulate_removal;
use crate::cli::{print_dot, print_gaps, print_recommendations, print_resilience, print_summary};
use crate::config::AppConfig;
use crate::error::{CollabnetError, Result};
use crate::model::seed::demo_network;
use crate::model::{Network, PersonId};
use crate::render::{tables, ViewMode};
use crate::util::output;

pub struct Session {
    pub network: Network,
    pub mode: ViewMode,
    /// Person selected for the resilience view, if any.
    pub focus: Option<PersonId>,
    pub config: AppConfig,
}

impl Session {
    pub fn new(config: AppConfig, demo: bool) -> Self {
        Self {
            network: if demo { demo_network() } else { Network::new() },
            mode: ViewMode::default(),
            focus: None,
            config,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

pub fn run_shell(config: AppConfig, demo: bool) -> Result<()> {
    let mut session = Session::new(config, demo);
    if console::user_attended() {
        run_menu(&mut session)
    } else {
        run_script(&mut session)
    }
}

fn run_script(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if apply_line(session, &line) == Outcome::Quit {
            break;
        }
    }
    Ok(())
}

/// Run one command line against the session. Errors are surfaced as notices
/// and never end the session.
pub fn apply_line(session: &mut Session, line: &str) -> Outcome {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Outcome::Continue;
    }
    let args = split_args(line);
    match run_command(session, &args) {
        Ok(outcome) => outcome,
        Err(err) => {
            output::error(&err.to_string());
            Outcome::Continue
        }
    }
}

fn run_command(session: &mut Session, args: &[String]) -> Result<Outcome> {
    let mut words = args.iter().map(String::as_str);
    let command = words.next().unwrap_or("");
    let rest: Vec<&str> = words.collect();

    match command {
        "help" => {
            output::info(HELP);
            Ok(Outcome::Continue)
        }
        "seed" => {
            if session.network.node_count() > 0 {
                output::warn("replacing the current network");
            }
            session.network = demo_network();
            session.focus = None;
            output::success("demo network loaded");
            Ok(Outcome::Continue)
        }
        "person" => person_command(session, &rest),
        "collab" => collab_command(session, &rest),
        "people" => {
            print!("{}", tables::people_table(&session.network));
            Ok(Outcome::Continue)
        }
        "collabs" => {
            print!("{}", tables::collaborations_table(&session.network));
            Ok(Outcome::Continue)
        }
        "view" => {
            let mode = rest
                .first()
                .ok_or_else(|| usage("view <normal|recommendations|resilience|gaps>"))?;
            session.mode = mode
                .parse()
                .map_err(|msg: String| CollabnetError::Other(anyhow::anyhow!(msg)))?;
            output::info(&format!("view mode: {}", session.mode));
            Ok(Outcome::Continue)
        }
        "show" => {
            show(session)?;
            Ok(Outcome::Continue)
        }
        "dot" => {
            print_dot(
                &session.network,
                session.mode,
                session.focus.as_ref().map(PersonId::as_str),
                &session.config,
            )?;
            Ok(Outcome::Continue)
        }
        "summary" => {
            print_summary(&session.network, wants_json(&rest))?;
            Ok(Outcome::Continue)
        }
        "recommend" => {
            print_recommendations(&session.network, wants_json(&rest))?;
            Ok(Outcome::Continue)
        }
        "resilience" => {
            let person = rest
                .first()
                .filter(|arg| !arg.starts_with("--"))
                .ok_or_else(|| usage("resilience <person> [--json]"))?;
            let id = PersonId::new(person.trim());
            let impact = simulate_removal(&session.network, &id)?;
            session.focus = Some(id);
            session.mode = ViewMode::Resilience;
            print_resilience(&impact, wants_json(&rest))?;
            Ok(Outcome::Continue)
        }
        "gaps" => {
            print_gaps(&session.network, &session.config, wants_json(&rest))?;
            Ok(Outcome::Continue)
        }
        "quit" | "exit" => Ok(Outcome::Quit),
        other => Err(usage(&format!(
            "unknown command '{other}', try 'help'"
        ))),
    }
}

fn person_command(session: &mut Session, rest: &[&str]) -> Result<Outcome> {
    match rest {
        ["add", id, name, program, interests @ ..] => {
            let interests = interests.join(" ");
            let person = session.network.add_person(id, name, program, &interests)?;
            output::success(&format!("added {} ({})", person.id, person.program));
        }
        ["edit", id, name, program, interests @ ..] => {
            let interests = interests.join(" ");
            let person = session
                .network
                .update_person(id, name, program, &interests)?;
            output::success(&format!("updated {}", person.id));
        }
        ["rm", id] => {
            let removed = session.network.remove_person(&PersonId::new(*id))?;
            if session.focus.as_ref() == Some(&removed.person.id) {
                session.focus = None;
            }
            output::success(&format!(
                "removed {} and {} collaboration(s)",
                removed.person.id,
                removed.lost_collaborations.len()
            ));
        }
        _ => {
            return Err(usage(
                "person add|edit <id> <name> <program> [interests] | person rm <id>",
            ))
        }
    }
    Ok(Outcome::Continue)
}

fn collab_command(session: &mut Session, rest: &[&str]) -> Result<Outcome> {
    match rest {
        ["add", a, b] => {
            let collab = session
                .network
                .add_collaboration(&PersonId::new(*a), &PersonId::new(*b))?;
            output::success(&format!("connected {} -- {}", collab.a, collab.b));
        }
        ["rm", a, b] => {
            let collab = session
                .network
                .remove_collaboration(&PersonId::new(*a), &PersonId::new(*b))?;
            output::success(&format!("disconnected {} -- {}", collab.a, collab.b));
        }
        _ => return Err(usage("collab add|rm <person> <person>")),
    }
    Ok(Outcome::Continue)
}

fn show(session: &mut Session) -> Result<()> {
    print!("{}", tables::people_table(&session.network));
    print!("{}", tables::collaborations_table(&session.network));
    match session.mode {
        ViewMode::Normal => print_summary(&session.network, false),
        ViewMode::Recommendations => print_recommendations(&session.network, false),
        ViewMode::Resilience => {
            let focus = session.focus.clone().ok_or_else(|| {
                usage("select a person first: resilience <person>")
            })?;
            let impact = simulate_removal(&session.network, &focus)?;
            print_resilience(&impact, false)
        }
        ViewMode::Gaps => print_gaps(&session.network, &session.config, false),
    }
}

fn wants_json(rest: &[&str]) -> bool {
    rest.iter().any(|arg| *arg == "--json")
}

fn usage(message: &str) -> CollabnetError {
    CollabnetError::Other(anyhow::anyhow!(message.to_string()))
}

/// Split a command line on whitespace, keeping double-quoted spans together
/// so names and interest lists can contain spaces.
pub fn split_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

const HELP: &str = "\
commands:
  person add <id> <name> <program> [interests]   create a person (interests comma-separated)
  person edit <id> <name> <program> [interests]  edit a person in place
  person rm <id>                                 remove a person and their collaborations
  collab add <a> <b>                             connect two people
  collab rm <a> <b>                              disconnect two people
  people | collabs                               list people / collaborations
  view <normal|recommendations|resilience|gaps>  switch the view mode
  show                                           render the current view
  dot                                            print Graphviz DOT for the current view
  summary | recommend | gaps [--json]            run an analysis
  resilience <person> [--json]                   simulate removing a person
  seed                                           load the demo network
  quit                                           end the session";

// --- interactive menu -------------------------------------------------------

const MENU: &[&str] = &[
    "add person",
    "edit person",
    "remove person",
    "add collaboration",
    "remove collaboration",
    "show current view",
    "switch view mode",
    "recommendations",
    "resilience simulation",
    "gap report",
    "network summary",
    "print DOT",
    "load demo network",
    "quit",
];

fn run_menu(session: &mut Session) -> Result<()> {
    loop {
        let choice = Select::new()
            .with_prompt("collabnet")
            .items(MENU)
            .default(0)
            .interact()
            .map_err(dialoguer_err)?;

        let result = match MENU[choice] {
            "add person" => menu_person(session, false),
            "edit person" => menu_person(session, true),
            "remove person" => menu_remove_person(session),
            "add collaboration" => menu_collab(session, true),
            "remove collaboration" => menu_collab(session, false),
            "show current view" => show(session),
            "switch view mode" => menu_view(session),
            "recommendations" => print_recommendations(&session.network, false),
            "resilience simulation" => menu_resilience(session),
            "gap report" => print_gaps(&session.network, &session.config, false),
            "network summary" => print_summary(&session.network, false),
            "print DOT" => print_dot(
                &session.network,
                session.mode,
                session.focus.as_ref().map(PersonId::as_str),
                &session.config,
            ),
            "load demo network" => {
                if session.network.node_count() > 0 {
                    output::warn("replacing the current network");
                }
                session.network = demo_network();
                session.focus = None;
                output::success("demo network loaded");
                Ok(())
            }
            _ => return Ok(()),
        };

        // Non-fatal per action: report and keep the session alive.
        if let Err(err) = result {
            output::error(&err.to_string());
        }
    }
}

fn menu_person(session: &mut Session, edit: bool) -> Result<()> {
    let id: String = prompt("id")?;
    let name: String = prompt("name")?;
    let program: String = prompt("program")?;
    let interests: String = prompt_allow_empty("interests (comma-separated)")?;
    if edit {
        let person = session
            .network
            .update_person(&id, &name, &program, &interests)?;
        output::success(&format!("updated {}", person.id));
    } else {
        let person = session.network.add_person(&id, &name, &program, &interests)?;
        output::success(&format!("added {} ({})", person.id, person.program));
    }
    Ok(())
}

fn menu_remove_person(session: &mut Session) -> Result<()> {
    let id: String = prompt("id")?;
    let confirmed = output::confirm(
        &format!("remove '{id}' and all their collaborations?"),
        false,
    )
    .map_err(dialoguer_err)?;
    if !confirmed {
        return Ok(());
    }
    let removed = session.network.remove_person(&PersonId::new(id.trim()))?;
    if session.focus.as_ref() == Some(&removed.person.id) {
        session.focus = None;
    }
    output::success(&format!(
        "removed {} and {} collaboration(s)",
        removed.person.id,
        removed.lost_collaborations.len()
    ));
    Ok(())
}

fn menu_collab(session: &mut Session, add: bool) -> Result<()> {
    let a: String = prompt("first person")?;
    let b: String = prompt("second person")?;
    let a = PersonId::new(a.trim());
    let b = PersonId::new(b.trim());
    if add {
        let collab = session.network.add_collaboration(&a, &b)?;
        output::success(&format!("connected {} -- {}", collab.a, collab.b));
    } else {
        let collab = session.network.remove_collaboration(&a, &b)?;
        output::success(&format!("disconnected {} -- {}", collab.a, collab.b));
    }
    Ok(())
}

fn menu_view(session: &mut Session) -> Result<()> {
    let modes = ["normal", "recommendations", "resilience", "gaps"];
    let choice = Select::new()
        .with_prompt("view mode")
        .items(&modes)
        .default(0)
        .interact()
        .map_err(dialoguer_err)?;
    session.mode = modes[choice]
        .parse()
        .map_err(|msg: String| CollabnetError::Other(anyhow::anyhow!(msg)))?;
    output::info(&format!("view mode: {}", session.mode));
    Ok(())
}

fn menu_resilience(session: &mut Session) -> Result<()> {
    let person: String = prompt("person to remove")?;
    let id = PersonId::new(person.trim());
    let impact = simulate_removal(&session.network, &id)?;
    session.focus = Some(id);
    session.mode = ViewMode::Resilience;
    print_resilience(&impact, false)
}

fn prompt(label: &str) -> Result<String> {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .map_err(dialoguer_err)
}

fn prompt_allow_empty(label: &str) -> Result<String> {
    Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
        .map_err(dialoguer_err)
}

fn dialoguer_err(err: dialoguer::Error) -> CollabnetError {
    CollabnetError::Other(anyhow::Error::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(AppConfig::default(), false)
    }

    #[test]
    fn split_args_honors_quotes() {
        assert_eq!(
            split_args(r#"person add ana "Ana Torres" Engineering "ai, graph theory""#),
            vec![
                "person",
                "add",
                "ana",
                "Ana Torres",
                "Engineering",
                "ai, graph theory"
            ]
        );
    }

    #[test]
    fn blank_and_comment_lines_are_ignored() {
        let mut session = session();
        assert_eq!(apply_line(&mut session, "   "), Outcome::Continue);
        assert_eq!(apply_line(&mut session, "# comment"), Outcome::Continue);
        assert_eq!(session.network.node_count(), 0);
    }

    #[test]
    fn script_lines_build_the_model() {
        let mut session = session();
        apply_line(&mut session, r#"person add ana "Ana" Engineering ai"#);
        apply_line(&mut session, r#"person add pedro "Pedro" Mathematics ai"#);
        apply_line(&mut session, "collab add ana pedro");
        assert_eq!(session.network.node_count(), 2);
        assert_eq!(session.network.edge_count(), 1);
    }

    #[test]
    fn failed_actions_are_non_fatal_and_leave_the_model_alone() {
        let mut session = session();
        apply_line(&mut session, r#"person add ana "Ana" Engineering ai"#);
        // Duplicate id, unknown endpoint, self pair: all rejected, session lives.
        assert_eq!(
            apply_line(&mut session, r#"person add ana "Twin" Medicine"#),
            Outcome::Continue
        );
        assert_eq!(
            apply_line(&mut session, "collab add ana ghost"),
            Outcome::Continue
        );
        assert_eq!(
            apply_line(&mut session, "collab add ana ana"),
            Outcome::Continue
        );
        assert_eq!(session.network.node_count(), 1);
        assert_eq!(session.network.edge_count(), 0);
        assert_eq!(
            session.network.person(&PersonId::new("ana")).map(|p| p.name.as_str()),
            Some("Ana")
        );
    }

    #[test]
    fn view_command_switches_modes() {
        let mut session = session();
        apply_line(&mut session, "view gaps");
        assert_eq!(session.mode, ViewMode::Gaps);
        apply_line(&mut session, "view nonsense");
        assert_eq!(session.mode, ViewMode::Gaps);
    }

    #[test]
    fn resilience_sets_the_focus() {
        let mut session = session();
        apply_line(&mut session, "seed");
        apply_line(&mut session, "resilience maria");
        assert_eq!(session.focus, Some(PersonId::new("maria")));
        assert_eq!(session.mode, ViewMode::Resilience);
        // Removing the focused person clears the focus.
        apply_line(&mut session, "person rm maria");
        assert_eq!(session.focus, None);
    }

    #[test]
    fn quit_ends_the_session() {
        let mut session = session();
        assert_eq!(apply_line(&mut session, "quit"), Outcome::Quit);
        assert_eq!(apply_line(&mut session, "exit"), Outcome::Quit);
    }
}
