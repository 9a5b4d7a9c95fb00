//! `hearth person` — manage tracked people and view their snapshots.

use clap::{Args, Subcommand};
use hearth_core::model::{NewPerson, PersonPatch, PersonSnapshot};
use serde::Serialize;
use std::io::{self, Write};

use super::Ctx;
use crate::output::{pretty_kv, pretty_section, render};

#[derive(Subcommand, Debug)]
pub enum PersonCommand {
    /// Add a person.
    Add(AddArgs),
    /// Update a person's fields.
    Update(UpdateArgs),
    /// Remove a person and all of their history.
    Rm(RmArgs),
    /// Show one person's live snapshot.
    Show(ShowArgs),
    /// List every person's live snapshot.
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Display name.
    #[arg(short, long)]
    pub name: String,

    /// Free-text role (e.g. kid, parent).
    #[arg(short, long)]
    pub role: String,

    /// Display theme.
    #[arg(short, long)]
    pub theme: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Person id.
    pub id: i64,

    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long)]
    pub role: Option<String>,

    #[arg(short, long)]
    pub theme: Option<String>,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Person id.
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Person id.
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct ListArgs {}

/// Human rendering for a snapshot; shared with `hearth check`.
pub fn write_snapshot(snapshot: &PersonSnapshot, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("{} ({})", snapshot.name, snapshot.role))?;
    for task in snapshot.global_tasks.iter().chain(&snapshot.personal_tasks) {
        let mark = if task.completed { "x" } else { " " };
        writeln!(w, "  [{mark}] {} #{} ({})", task.title, task.id, task.kind)?;
    }
    pretty_kv(
        w,
        "progress",
        format!(
            "{}/{} ({}%)",
            snapshot.completed_tasks, snapshot.total_tasks, snapshot.progress
        ),
    )?;
    pretty_kv(w, "level 2", if snapshot.is_level2 { "yes" } else { "no" })
}

#[derive(Serialize)]
struct Deleted {
    id: i64,
    deleted: bool,
}

pub fn run(command: &PersonCommand, ctx: &Ctx) -> anyhow::Result<()> {
    match command {
        PersonCommand::Add(args) => {
            let _lock = ctx.write_lock()?;
            let mut store = ctx.open_store()?;
            let person = store.create_person(&NewPerson {
                name: args.name.clone(),
                role: args.role.clone(),
                theme: args.theme.clone(),
            })?;
            if ctx.quiet {
                return Ok(());
            }
            render(ctx.output, &person, |person, w| {
                writeln!(w, "Added {} (#{})", person.name, person.id)
            })
        }
        PersonCommand::Update(args) => {
            let _lock = ctx.write_lock()?;
            let mut store = ctx.open_store()?;
            let person = store.update_person(
                args.id,
                &PersonPatch {
                    name: args.name.clone(),
                    role: args.role.clone(),
                    theme: args.theme.clone(),
                },
            )?;
            if ctx.quiet {
                return Ok(());
            }
            render(ctx.output, &person, |person, w| {
                writeln!(w, "Updated {} (#{})", person.name, person.id)
            })
        }
        PersonCommand::Rm(args) => {
            let _lock = ctx.write_lock()?;
            let mut store = ctx.open_store()?;
            store.delete_person(args.id)?;
            if ctx.quiet {
                return Ok(());
            }
            render(
                ctx.output,
                &Deleted {
                    id: args.id,
                    deleted: true,
                },
                |deleted, w| writeln!(w, "Removed person #{}", deleted.id),
            )
        }
        PersonCommand::Show(args) => {
            let _lock = ctx.read_lock()?;
            let store = ctx.open_store()?;
            let snapshot = store.person_snapshot(args.id)?;
            render(ctx.output, &snapshot, |snapshot, w| {
                write_snapshot(snapshot, w)
            })
        }
        PersonCommand::List(_) => {
            let _lock = ctx.read_lock()?;
            let store = ctx.open_store()?;
            let snapshots = store.all_snapshots()?;
            render(ctx.output, &snapshots, |snapshots, w| {
                for snapshot in snapshots {
                    writeln!(
                        w,
                        "#{} {} ({}) {}/{} {}%{}",
                        snapshot.id,
                        snapshot.name,
                        snapshot.role,
                        snapshot.completed_tasks,
                        snapshot.total_tasks,
                        snapshot.progress,
                        if snapshot.is_level2 { " *" } else { "" },
                    )?;
                }
                Ok(())
            })
        }
    }
}
