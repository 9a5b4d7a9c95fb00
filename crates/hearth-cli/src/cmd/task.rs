//! `hearth task` — manage global and personal chores.

use clap::{Args, Subcommand};
use hearth_core::model::{GlobalTask, PersonalTask, TaskKind};
use serde::Serialize;
use std::io::Write;

use super::{Ctx, parse_kind};
use crate::output::render;

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a chore: global by default, personal with --person.
    Add(AddArgs),
    /// Rename a chore.
    Update(UpdateArgs),
    /// Remove a chore, retracting it from recorded history.
    Rm(RmArgs),
    /// List chores.
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Chore title.
    #[arg(short, long)]
    pub title: String,

    /// Owner for a personal chore; omit for a chore that applies to everyone.
    #[arg(short, long)]
    pub person: Option<i64>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Task id.
    pub id: i64,

    /// New title.
    #[arg(short, long)]
    pub title: String,

    /// Which id space the task lives in.
    #[arg(short, long, default_value = "global", value_parser = parse_kind)]
    pub kind: TaskKind,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Task id.
    pub id: i64,

    /// Which id space the task lives in.
    #[arg(short, long, default_value = "global", value_parser = parse_kind)]
    pub kind: TaskKind,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Also list this person's personal chores.
    #[arg(short, long)]
    pub person: Option<i64>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum CreatedTask {
    Global(GlobalTask),
    Personal(PersonalTask),
}

#[derive(Serialize)]
struct TaskListing {
    global: Vec<GlobalTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    personal: Option<Vec<PersonalTask>>,
}

#[derive(Serialize)]
struct Deleted {
    id: i64,
    kind: TaskKind,
    deleted: bool,
}

pub fn run(command: &TaskCommand, ctx: &Ctx) -> anyhow::Result<()> {
    match command {
        TaskCommand::Add(args) => {
            let _lock = ctx.write_lock()?;
            let mut store = ctx.open_store()?;
            let created = match args.person {
                Some(person_id) => {
                    CreatedTask::Personal(store.create_personal_task(person_id, &args.title)?)
                }
                None => CreatedTask::Global(store.create_global_task(&args.title)?),
            };
            if ctx.quiet {
                return Ok(());
            }
            render(ctx.output, &created, |created, w| match created {
                CreatedTask::Global(task) => {
                    writeln!(w, "Added global chore \"{}\" (#{})", task.title, task.id)
                }
                CreatedTask::Personal(task) => writeln!(
                    w,
                    "Added personal chore \"{}\" (#{}) for person #{}",
                    task.title, task.id, task.person_id
                ),
            })
        }
        TaskCommand::Update(args) => {
            let _lock = ctx.write_lock()?;
            let mut store = ctx.open_store()?;
            let updated = match args.kind {
                TaskKind::Global => CreatedTask::Global(store.update_global_task(args.id, &args.title)?),
                TaskKind::Personal => {
                    CreatedTask::Personal(store.update_personal_task(args.id, &args.title)?)
                }
            };
            if ctx.quiet {
                return Ok(());
            }
            render(ctx.output, &updated, |updated, w| match updated {
                CreatedTask::Global(task) => {
                    writeln!(w, "Renamed global chore #{} to \"{}\"", task.id, task.title)
                }
                CreatedTask::Personal(task) => {
                    writeln!(w, "Renamed personal chore #{} to \"{}\"", task.id, task.title)
                }
            })
        }
        TaskCommand::Rm(args) => {
            let _lock = ctx.write_lock()?;
            let mut store = ctx.open_store()?;
            match args.kind {
                TaskKind::Global => store.delete_global_task(args.id)?,
                TaskKind::Personal => store.delete_personal_task(args.id)?,
            }
            if ctx.quiet {
                return Ok(());
            }
            render(
                ctx.output,
                &Deleted {
                    id: args.id,
                    kind: args.kind,
                    deleted: true,
                },
                |deleted, w| writeln!(w, "Removed {} chore #{}", deleted.kind, deleted.id),
            )
        }
        TaskCommand::List(args) => {
            let _lock = ctx.read_lock()?;
            let store = ctx.open_store()?;
            let listing = TaskListing {
                global: store.global_tasks()?,
                personal: match args.person {
                    Some(person_id) => Some(store.personal_tasks(person_id)?),
                    None => None,
                },
            };
            render(ctx.output, &listing, |listing, w| {
                for task in &listing.global {
                    writeln!(w, "global #{} {}", task.id, task.title)?;
                }
                if let Some(personal) = &listing.personal {
                    for task in personal {
                        writeln!(
                            w,
                            "personal #{} {} (person #{})",
                            task.id, task.title, task.person_id
                        )?;
                    }
                }
                Ok(())
            })
        }
    }
}
