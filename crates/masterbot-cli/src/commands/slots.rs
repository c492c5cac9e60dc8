use chrono::{DateTime, Duration, Utc};
use clap::Args;
use masterbot_core::Schedule;
use std::path::PathBuf;

use super::{format_local, parse_time, read_events};

#[derive(Args)]
pub struct SlotsArgs {
    /// JSON file with committed events
    #[arg(long)]
    schedule: PathBuf,
    /// Range start (RFC 3339, e.g. 2026-06-10T08:00:00Z)
    #[arg(long, value_parser = parse_time)]
    from: DateTime<Utc>,
    /// Range end (RFC 3339)
    #[arg(long, value_parser = parse_time)]
    to: DateTime<Utc>,
    /// Only list slots at least this many minutes long
    #[arg(long, default_value_t = 0)]
    min: u32,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SlotsArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.from > args.to {
        return Err(format!("--from {} is after --to {}", args.from, args.to).into());
    }

    let schedule = Schedule::from(read_events(&args.schedule)?);
    let min_length = Duration::minutes(i64::from(args.min));
    let slots: Vec<_> = schedule
        .free_time_slots(args.from, args.to)
        .into_iter()
        .filter(|slot| slot.can_fit(min_length))
        .collect();
    tracing::debug!(events = schedule.len(), slots = slots.len(), "computed free slots");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&slots)?);
        return Ok(());
    }

    if slots.is_empty() {
        println!("No free time in range.");
    }
    for slot in &slots {
        println!(
            "{} -> {} ({} min)",
            format_local(slot.start),
            format_local(slot.end),
            slot.duration().num_minutes()
        );
    }
    Ok(())
}
