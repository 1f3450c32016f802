use std::thread;
use std::time::Duration;
use chrono::{DateTime, Local, NaiveTime, TimeDelta};
use log::{error, info};
use crate::config::Config;
use crate::initialization::Mgr;
use crate::worker;

/// Upper bound on one sleep slice, so a host suspend or clock adjustment
/// cannot push a tick more than a minute
const MAX_SLEEP_SLICE_MILLIS: u64 = 60_000;

/// Drives the ingest pipeline, once immediately at startup and then at each
/// configured time of day
///
/// A failed run is logged and the loop waits for the next tick; nothing short
/// of process termination stops the schedule.
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'mgr' - struct with configured managers
pub fn run_forever(config: &Config, mgr: &Mgr) {
    run_once(config, mgr);

    loop {
        let target = next_run(Local::now(), &config.schedule.ticks);
        info!("next ingest run scheduled for {}", target.format("%Y-%m-%d %H:%M"));

        sleep_until(target);
        run_once(config, mgr);
    }
}

/// Runs one ingest pass and logs any failure
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'mgr' - struct with configured managers
fn run_once(config: &Config, mgr: &Mgr) {
    if let Err(e) = worker::run(config, mgr) {
        error!("ingest run failed: {}", e);
    }
}

/// Returns the earliest configured run time strictly after the given time,
/// today or tomorrow
///
/// # Arguments
///
/// * 'now' - the time to schedule from
/// * 'ticks' - configured run times of day
fn next_run(now: DateTime<Local>, ticks: &[NaiveTime]) -> DateTime<Local> {
    let today = now.date_naive();

    ticks.iter()
        .flat_map(|tick| {
            [today, today + TimeDelta::days(1)].into_iter()
                .filter_map(move |day| day.and_time(*tick).and_local_timezone(Local).earliest())
        })
        .filter(|candidate| *candidate > now)
        .min()
        .expect("should exist at least one run time within the next day")
}

/// Sleeps in bounded slices until the target time is reached
///
/// # Arguments
///
/// * 'target' - the wall clock time to wake at
fn sleep_until(target: DateTime<Local>) {
    loop {
        let remaining = (target - Local::now()).num_milliseconds();
        if remaining <= 0 {
            break;
        }
        thread::sleep(Duration::from_millis((remaining as u64).min(MAX_SLEEP_SLICE_MILLIS)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ticks() -> Vec<NaiveTime> {
        vec![
            NaiveTime::from_hms_opt(0, 1, 0).unwrap(),
            NaiveTime::from_hms_opt(12, 1, 0).unwrap(),
        ]
    }

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn before_first_tick_runs_today() {
        let next = next_run(local(2024, 11, 24, 0, 0, 30), &ticks());

        assert_eq!(next, local(2024, 11, 24, 0, 1, 0));
    }

    #[test]
    fn between_ticks_runs_at_the_second() {
        let next = next_run(local(2024, 11, 24, 7, 30, 0), &ticks());

        assert_eq!(next, local(2024, 11, 24, 12, 1, 0));
    }

    #[test]
    fn after_last_tick_rolls_to_tomorrow() {
        let next = next_run(local(2024, 11, 24, 23, 59, 0), &ticks());

        assert_eq!(next, local(2024, 11, 25, 0, 1, 0));
    }

    #[test]
    fn exactly_on_a_tick_picks_the_next_one() {
        let next = next_run(local(2024, 11, 24, 12, 1, 0), &ticks());

        assert_eq!(next, local(2024, 11, 25, 0, 1, 0));
    }
}
