mod snapshot;

use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};

use rigops_core::{Clock, FixedClock, SystemClock};
use rigops_market::{AvailabilityConfig, AvailabilityFilter};
use rigops_tender::BidDisplay;

use crate::snapshot::Snapshot;

const USAGE: &str = "usage:
  rigops assess <snapshot.json>
  rigops bids <snapshot.json> [--now <RFC3339>]";

fn main() -> anyhow::Result<()> {
    rigops_observability::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [cmd, path] if cmd == "assess" => assess(PathBuf::from(path)),
        [cmd, path, rest @ ..] if cmd == "bids" => bids(PathBuf::from(path), rest),
        _ => bail!("{USAGE}"),
    }
}

fn assess(path: PathBuf) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(&path)?;
    let filter = AvailabilityFilter::new(AvailabilityConfig::from_env());
    for line in snapshot.assessment_lines(&filter) {
        println!("{line}");
    }
    Ok(())
}

fn bids(path: PathBuf, rest: &[String]) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(&path)?;
    let display = BidDisplay::from_env();

    let clock: Box<dyn Clock> = match rest {
        [] => Box::new(SystemClock),
        [flag, at] if flag == "--now" => {
            let at: DateTime<Utc> = DateTime::parse_from_rfc3339(at)
                .with_context(|| format!("--now {at:?} is not RFC 3339"))?
                .with_timezone(&Utc);
            Box::new(FixedClock::new(at))
        }
        _ => bail!("{USAGE}"),
    };

    for line in snapshot.bid_lines(clock.as_ref(), &display) {
        println!("{line}");
    }
    Ok(())
}
