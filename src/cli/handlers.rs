use std::io::{BufRead, Write};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::controller::{CLEAR_PROMPT, Controller};
use crate::io::store::Store;
use crate::model::task::Filter;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let store = Store::resolve(cli.file.as_deref());
    let mut controller = Controller::new(store);

    match cli.command {
        // No subcommand launches the TUI from main, never reaches dispatch
        None => Ok(()),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(&mut controller, args, json),
            Commands::Add(args) => cmd_add(&mut controller, args, json),
            Commands::Toggle(args) => cmd_toggle(&mut controller, args),
            Commands::Rm(args) => cmd_rm(&mut controller, args),
            Commands::Clear(args) => cmd_clear(&mut controller, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn cmd_list(
    controller: &mut Controller,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = Filter::from_name(&args.filter)
        .ok_or_else(|| format!("unknown filter '{}' (use all, pending, completed)", args.filter))?;
    controller.set_filter(filter);

    if json {
        let out = ListJson {
            filter: filter.name().to_string(),
            total: controller.tasks().len(),
            completed: controller.completed_count(),
            counter: controller.counter_text(),
            tasks: controller.visible().iter().map(|t| task_to_json(t)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let visible = controller.visible();
    if visible.is_empty() {
        println!("Nenhuma tarefa encontrada");
    } else {
        for task in &visible {
            println!("{}", task_row(task));
        }
    }
    println!();
    println!("{}", controller.counter_text());
    Ok(())
}

fn cmd_add(
    controller: &mut Controller,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Empty text is a silent no-op, exit 0
    if let Some(id) = controller.add(&args.text)? {
        if json {
            println!("{}", serde_json::to_string(&AddedJson { id })?);
        } else {
            println!("{}", id);
        }
    }
    Ok(())
}

fn cmd_toggle(
    controller: &mut Controller,
    args: IdArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    // Unknown ids are silently ignored
    controller.toggle(args.id)?;
    Ok(())
}

fn cmd_rm(controller: &mut Controller, args: IdArgs) -> Result<(), Box<dyn std::error::Error>> {
    controller.delete(args.id)?;
    Ok(())
}

fn cmd_clear(
    controller: &mut Controller,
    args: ClearArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Nothing completed: no prompt, no action
    if controller.completed_count() == 0 {
        if json {
            println!("{}", serde_json::to_string(&ClearedJson { removed: 0 })?);
        }
        return Ok(());
    }

    if !args.yes && !confirm_on_tty()? {
        return Ok(());
    }

    let removed = controller.clear_completed()?;
    if json {
        println!("{}", serde_json::to_string(&ClearedJson { removed })?);
    }
    Ok(())
}

/// Blocking y/n prompt on stderr, answer read from stdin.
fn confirm_on_tty() -> Result<bool, std::io::Error> {
    eprint!("{} [y/N] ", CLEAR_PROMPT);
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("s"))
}
