//! `weekmenu plan` command: a line-oriented planning session.
//!
//! Reads one command per line and maps it onto a [`Session`] handler. Errors
//! from a handler are reported and the session carries on with its menu
//! unchanged; only I/O failures on the terminal itself end the loop.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use rand::Rng;

use weekmenu_core::{Session, SessionError, SlotRef, render_table};
use weekmenu_store::log::MenuLog;
use weekmenu_store::models::{Day, Meal, Role};

const HELP: &str = "\
Commands:
  show                                  print the current menu
  options <day> <meal> [role]           list the recipes a slot accepts
  set <day> <meal> [role] <recipe>      fill a slot (\"None\" empties it)
  regenerate                            replace the menu with a random one
  clear                                 empty every slot
  list                                  shopping list for the current menu
  finalize                              record the menu and print the shopping list
  help                                  show this help
  quit                                  leave without recording
Roles: breakfast takes no role; lunch and dinner take main (default) or side.
A recipe whose full name starts with a role word is matched as written.";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanCommand {
    Show,
    Options {
        meal: Meal,
        role: Role,
    },
    /// Fill `slot` with `recipe`. When the line carried a role word,
    /// `unsplit` holds the text from the role word on; if that whole text
    /// names a catalog recipe it goes into the meal's default slot instead.
    Set {
        slot: SlotRef,
        recipe: String,
        unsplit: Option<String>,
    },
    Regenerate,
    Clear,
    List,
    Finalize,
    Help,
    Quit,
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// `<day> <meal> [role]` plus the untouched text that follows.
struct SlotArgs<'a> {
    day: Day,
    meal: Meal,
    role: Option<Role>,
    /// Trimmed text after the meal word, role word included.
    after_meal: &'a str,
    /// Trimmed text after the role word; equal to `after_meal` without one.
    after_role: &'a str,
}

/// Split the first whitespace-delimited word off `s`. The remainder keeps its
/// inner spacing.
fn split_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some(s.split_at(end))
}

/// Parse a non-blank input line.
pub fn parse_command(line: &str) -> Result<PlanCommand> {
    let Some((verb, args)) = split_word(line) else {
        bail!("empty command");
    };

    let cmd = match verb.to_ascii_lowercase().as_str() {
        "show" => PlanCommand::Show,
        "regenerate" | "random" => PlanCommand::Regenerate,
        "clear" => PlanCommand::Clear,
        "list" => PlanCommand::List,
        "finalize" => PlanCommand::Finalize,
        "help" | "?" => PlanCommand::Help,
        "quit" | "exit" => PlanCommand::Quit,
        "options" => {
            let args = parse_slot(args)?;
            if !args.after_role.is_empty() {
                if let Ok(role) = args.after_role.parse::<Role>() {
                    bail!("{} has no {role} slot", args.meal);
                }
                bail!("unexpected arguments after slot: {}", args.after_role);
            }
            PlanCommand::Options {
                meal: args.meal,
                role: args.role.unwrap_or(args.meal.default_role()),
            }
        }
        "set" => {
            let args = parse_slot(args)?;
            match args.role {
                Some(role) if !args.after_role.is_empty() => PlanCommand::Set {
                    slot: SlotRef::new(args.day, args.meal, role),
                    recipe: args.after_role.to_owned(),
                    unsplit: Some(args.after_meal.to_owned()),
                },
                _ if !args.after_meal.is_empty() => PlanCommand::Set {
                    slot: SlotRef::new(args.day, args.meal, args.meal.default_role()),
                    recipe: args.after_meal.to_owned(),
                    unsplit: None,
                },
                _ => bail!("usage: set <day> <meal> [role] <recipe>"),
            }
        }
        other => bail!("unknown command {other:?} (try `help`)"),
    };
    Ok(cmd)
}

/// Parse `<day> <meal> [role]` off the front of `args`. A word that is not a
/// role the meal accepts is left as the start of the remaining text.
fn parse_slot(args: &str) -> Result<SlotArgs<'_>> {
    let Some((day, rest)) = split_word(args) else {
        bail!("expected <day> <meal>");
    };
    let Some((meal, rest)) = split_word(rest) else {
        bail!("expected <day> <meal>");
    };
    let day: Day = day.parse()?;
    let meal: Meal = meal.parse()?;

    let after_meal = rest.trim();
    let (role, after_role) = match split_word(after_meal) {
        Some((word, tail)) => match word.parse::<Role>() {
            Ok(role) if meal.accepts(role) => (Some(role), tail.trim()),
            _ => (None, after_meal),
        },
        None => (None, after_meal),
    };

    Ok(SlotArgs {
        day,
        meal,
        role,
        after_meal,
        after_role,
    })
}

/// Run one command against the session, appending any output to `buf`.
fn execute<R: Rng + ?Sized>(
    cmd: PlanCommand,
    session: &mut Session,
    log: &MenuLog,
    rng: &mut R,
    buf: &mut String,
) -> Result<Flow, SessionError> {
    let mut print = |text: &str| {
        buf.push_str(text);
        buf.push('\n');
    };

    match cmd {
        PlanCommand::Show => print(&render_table(&session.rows())),
        PlanCommand::Options { meal, role } => {
            let options = session.catalog().options(meal, role).unwrap_or_default();
            if options.is_empty() {
                print("(no recipes)");
            }
            for name in options {
                print(&format!("  {name}"));
            }
        }
        PlanCommand::Set {
            slot,
            recipe,
            unsplit,
        } => {
            let (slot, recipe) = match unsplit {
                Some(name) if session.catalog().contains(&name) => (
                    SlotRef::new(slot.day, slot.meal, slot.meal.default_role()),
                    name,
                ),
                _ => (slot, recipe),
            };
            session.on_edit_slot(slot, recipe.as_str())?;
            print(&format!("{slot}: {recipe}"));
        }
        PlanCommand::Regenerate => {
            session.on_regenerate(rng)?;
            print(&render_table(&session.rows()));
        }
        PlanCommand::Clear => {
            session.on_clear();
            print("Menu cleared.");
        }
        PlanCommand::List => print_shopping_list(&session.shopping_list(), &mut print),
        PlanCommand::Finalize => {
            let done = session.on_finalize(log)?;
            print(&render_table(&done.rows));
            print_shopping_list(&done.shopping_list, &mut print);
            print(&format!(
                "Menu recorded at {} in {}.",
                done.entry.timestamp,
                log.path().display()
            ));
        }
        PlanCommand::Help => print(HELP),
        PlanCommand::Quit => return Ok(Flow::Stop),
    }
    Ok(Flow::Continue)
}

fn print_shopping_list(items: &[String], print: &mut impl FnMut(&str)) {
    print("Shopping List");
    if items.is_empty() {
        print("(nothing to buy)");
    }
    for item in items {
        print(item);
    }
}

/// Drive a session from `input` until EOF or `quit`.
pub fn run_plan<R: Rng + ?Sized>(
    session: &mut Session,
    log: &MenuLog,
    rng: &mut R,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "{}", render_table(&session.rows()))?;
    writeln!(out, "Type `help` for commands.")?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let mut buf = String::new();
        let outcome = parse_command(&line)
            .map_err(|e| format!("{e:#}"))
            .and_then(|cmd| {
                execute(cmd, session, log, rng, &mut buf).map_err(|e| e.to_string())
            });
        out.write_all(buf.as_bytes())
            .context("failed to write output")?;

        match outcome {
            Ok(Flow::Stop) => break,
            Ok(Flow::Continue) => {}
            Err(msg) => {
                tracing::debug!(%msg, "command failed");
                writeln!(out, "error: {msg}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
