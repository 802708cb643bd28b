use std::{fmt::Display, str::FromStr};

use chrono::{Local, Timelike};

/// Clock time as seconds since midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(u32);

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Time {
    pub fn now() -> Self {
        let now = Local::now();
        Self(now.num_seconds_from_midnight())
    }

    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    pub fn from_hm(time: &str) -> Option<Self> {
        const HOUR_TO_SEC: u32 = 60 * 60;
        const MINUTE_TO_SEC: u32 = 60;
        let mut split = time.trim().split(':');
        let hours: u32 = split.next()?.parse().ok()?;
        let minutes: u32 = split.next()?.parse().ok()?;
        if split.next().is_some() || hours > 23 || minutes > 59 {
            return None;
        }
        Some(Self(hours * HOUR_TO_SEC + minutes * MINUTE_TO_SEC))
    }

    pub fn to_hm_string(&self) -> String {
        let h = self.0 / 3600;
        let m = (self.0 % 3600) / 60;
        format!("{:02}:{:02}", h, m)
    }
}

/// A scheduled route departure. Timetables list either a fixed time
/// ("07:10") or a service window ("07:10~07:40").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    At(Time),
    Window(Time, Time),
}

impl Departure {
    pub const fn starts(&self) -> Time {
        match self {
            Departure::At(time) => *time,
            Departure::Window(start, _) => *start,
        }
    }

    pub fn contains(&self, time: Time) -> bool {
        match self {
            Departure::At(at) => *at == time,
            Departure::Window(start, end) => *start <= time && time <= *end,
        }
    }
}

impl FromStr for Departure {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((start, end)) = s.split_once('~') {
            let start = Time::from_hm(start).ok_or(())?;
            let end = Time::from_hm(end).ok_or(())?;
            Ok(Self::Window(start, end))
        } else {
            Ok(Self::At(Time::from_hm(s).ok_or(())?))
        }
    }
}

impl Display for Departure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Departure::At(time) => f.write_str(&time.to_hm_string()),
            Departure::Window(start, end) => f.write_fmt(format_args!(
                "{}~{}",
                start.to_hm_string(),
                end.to_hm_string()
            )),
        }
    }
}

/// First departure a rider arriving at `after` can still board:
/// a window containing `after` wins, otherwise the earliest departure
/// starting at or after `after`. Expects `departures` in start order.
pub fn next_departure(departures: &[Departure], after: Time) -> Option<Departure> {
    departures
        .iter()
        .find(|departure| departure.contains(after) || departure.starts() >= after)
        .copied()
}

#[test]
fn parse_unparse_1() {
    let time = "00:00";
    let stime = Time::from_hm(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn parse_unparse_2() {
    let time = "07:30";
    let stime = Time::from_hm(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn parse_unparse_3() {
    let time = "23:59";
    let stime = Time::from_hm(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn valid_time_test_1() {
    let time = "00:01";
    assert_eq!(Time::from_hm(time).unwrap().as_seconds(), 60);
}

#[test]
fn valid_time_test_2() {
    let time = "01:01";
    assert_eq!(Time::from_hm(time).unwrap().as_seconds(), 3660);
}

#[test]
fn invalid_time_test_1() {
    let time = "00:0a";
    assert!(Time::from_hm(time).is_none())
}

#[test]
fn invalid_time_test_2() {
    let time = "25:00";
    assert!(Time::from_hm(time).is_none())
}

#[test]
fn invalid_time_test_3() {
    let time = "07:10:30";
    assert!(Time::from_hm(time).is_none())
}

#[test]
fn departure_parse_test() {
    let at: Departure = "07:10".parse().unwrap();
    assert_eq!(at, Departure::At(Time::from_seconds(7 * 3600 + 600)));

    let window: Departure = "07:10~07:40".parse().unwrap();
    assert_eq!(
        window,
        Departure::Window(
            Time::from_seconds(7 * 3600 + 600),
            Time::from_seconds(7 * 3600 + 2400)
        )
    );

    assert!("7h10".parse::<Departure>().is_err());
}

#[test]
fn next_departure_test() {
    let departures = [
        "06:30".parse().unwrap(),
        "07:10~07:40".parse().unwrap(),
        "08:00".parse().unwrap(),
    ];

    // Before everything.
    let next = next_departure(&departures, Time::from_hm("06:00").unwrap()).unwrap();
    assert_eq!(next.to_string(), "06:30");

    // Inside the window.
    let next = next_departure(&departures, Time::from_hm("07:20").unwrap()).unwrap();
    assert_eq!(next.to_string(), "07:10~07:40");

    // Between the window and the last slot.
    let next = next_departure(&departures, Time::from_hm("07:50").unwrap()).unwrap();
    assert_eq!(next.to_string(), "08:00");

    // Past everything.
    assert!(next_departure(&departures, Time::from_hm("09:00").unwrap()).is_none());
}
