use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ta", about = concat!("[·] tarefa v", env!("CARGO_PKG_VERSION"), " - your task list is one json file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different task file
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Toggle a task's completion flag
    Toggle(IdArgs),
    /// Delete a task
    Rm(IdArgs),
    /// Remove all completed tasks
    Clear(ClearArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (all, pending, completed)
    #[arg(long, default_value = "all")]
    pub filter: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task id
    pub id: i64,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}
