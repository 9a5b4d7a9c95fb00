//! `hearth calendar` — the fixed six-week month grid.

use chrono::{Datelike, NaiveDate};
use clap::Args;
use hearth_core::Store;
use hearth_core::model::DayCell;
use std::io::{self, Write};

use super::Ctx;
use crate::output::{OutputMode, pretty_section, render};

#[derive(Args, Debug)]
pub struct CalendarArgs {
    /// Person id. Omit when using --all.
    #[arg(required_unless_present = "all")]
    pub person: Option<i64>,

    /// Calendar year (defaults to the current one).
    #[arg(long)]
    pub year: Option<i32>,

    /// Calendar month 1-12 (defaults to the current one).
    #[arg(long)]
    pub month: Option<u32>,

    /// Show every person's calendar.
    #[arg(long, conflicts_with = "person")]
    pub all: bool,
}

fn month_heading(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map_or_else(|| format!("{year}-{month:02}"), |d| d.format("%B %Y").to_string())
}

fn cell_marker(cell: &DayCell) -> char {
    if cell.is_level2 {
        '*'
    } else if cell.completed_tasks > 0 {
        '.'
    } else {
        ' '
    }
}

/// Six rows of seven day cells, Sunday first. Level-2 days are starred,
/// partially-completed days dotted, out-of-month days blanked.
fn write_grid(days: &[DayCell], w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "  Su   Mo   Tu   We   Th   Fr   Sa")?;
    for week in days.chunks(7) {
        for cell in week {
            if cell.is_current_month {
                write!(w, " {:>3}{}", cell.date.day(), cell_marker(cell))?;
            } else {
                write!(w, "   . ")?;
            }
        }
        writeln!(w)?;
    }
    Ok(())
}

fn write_text_rows(days: &[DayCell], w: &mut dyn Write) -> io::Result<()> {
    for cell in days {
        if cell.total_tasks == 0 {
            continue;
        }
        writeln!(
            w,
            "{} {}/{}{}",
            cell.date,
            cell.completed_tasks,
            cell.total_tasks,
            if cell.is_level2 { " level2" } else { "" },
        )?;
    }
    Ok(())
}

pub fn run(args: &CalendarArgs, ctx: &Ctx) -> anyhow::Result<()> {
    let _lock = ctx.read_lock()?;
    let store = ctx.open_store()?;

    let today = Store::today();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = args.month.unwrap_or_else(|| today.month());
    let pretty = matches!(ctx.output, OutputMode::Pretty);

    if args.all {
        let months = store.all_month_grids(year, month)?;
        return render(ctx.output, &months, |months, w| {
            for person_month in months {
                if pretty {
                    pretty_section(
                        w,
                        &format!("{} — {}", month_heading(year, month), person_month.name),
                    )?;
                    write_grid(&person_month.days, w)?;
                    writeln!(w)?;
                } else {
                    writeln!(w, "# {} (#{})", person_month.name, person_month.person_id)?;
                    write_text_rows(&person_month.days, w)?;
                }
            }
            Ok(())
        });
    }

    let Some(person_id) = args.person else {
        anyhow::bail!("a person id is required unless --all is given");
    };
    let days = store.month_grid(person_id, year, month)?;
    render(ctx.output, &days, |days, w| {
        if pretty {
            pretty_section(w, &month_heading(year, month))?;
            write_grid(days, w)
        } else {
            write_text_rows(days, w)
        }
    })
}
