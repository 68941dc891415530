use std::fmt;
use std::time::Duration;

use enum_map::{enum_map, EnumMap};
use instant::Instant;
use serde::{Deserialize, Serialize};

use crate::force::Force;
use crate::node::Node;


const MILLIS_PER_SEC: u64 = 1000;
const MILLIS_PER_DECI: u64 = MILLIS_PER_SEC / 10;
const SECS_PER_DAY: u64 = 24 * 60 * 60;

// Fixed increment time control. Must be a whole number of seconds.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TimeControl {
    pub initial: Duration,
    pub increment: Duration,
}

impl fmt::Display for TimeControl {
    // Summary form used in game descriptions: initial minutes + increment seconds.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.initial.as_secs_f64() / 60.;
        if minutes.fract() == 0. {
            write!(f, "{} + {}", minutes as u64, self.increment.as_secs())
        } else {
            write!(f, "{} + {}", minutes, self.increment.as_secs())
        }
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimeBreakdown {
    NormalTime { minutes: u32, seconds: u32 },
    LowTime { seconds: u32, deciseconds: u32 },
}

#[derive(Clone, Debug)]
pub struct ClockShowing {
    pub is_active: bool,
    pub show_separator: bool,
    pub out_of_time: bool,
    pub time_breakdown: TimeBreakdown,
}

impl From<Duration> for TimeBreakdown {
    fn from(time: Duration) -> Self {
        // Always round the time up, so that we never show "0.0" for a player who has not
        // lost by flag, and the first tick happens one second after the game starts rather
        // than immediately.
        let millis = time.as_millis() as u64;
        let ds_ceil = millis.div_ceil(MILLIS_PER_DECI);
        if ds_ceil < 200 {
            let seconds = (ds_ceil / 10) as u32;
            let deciseconds = (ds_ceil % 10) as u32;
            TimeBreakdown::LowTime { seconds, deciseconds }
        } else {
            let s_ceil = millis.div_ceil(MILLIS_PER_SEC);
            let minutes = (s_ceil / 60) as u32;
            let seconds = (s_ceil % 60) as u32;
            TimeBreakdown::NormalTime { minutes, seconds }
        }
    }
}

impl ClockShowing {
    pub fn ui_string(&self) -> String {
        let separator = |s| if self.show_separator { s } else { " " };
        match self.time_breakdown {
            TimeBreakdown::NormalTime { minutes, seconds } => {
                format!("{:02}{}{:02}", minutes, separator(":"), seconds)
            }
            TimeBreakdown::LowTime { seconds, deciseconds } => {
                format!("{:02}{}{}", seconds, separator("."), deciseconds)
            }
        }
    }
}


// Game clock as seen by the client: remaining times come from server updates and the
// active side's time keeps counting down from the last sync point.
#[derive(Clone, Debug)]
pub struct RoundClock {
    control: TimeControl,
    remaining: EnumMap<Force, Duration>,
    running: Option<(Force, Instant)>, // force, sync point
}

impl RoundClock {
    pub fn new(control: TimeControl) -> Self {
        RoundClock {
            control,
            remaining: enum_map! { _ => control.initial },
            running: None,
        }
    }

    pub fn control(&self) -> TimeControl { self.control }
    pub fn active_force(&self) -> Option<Force> { self.running.map(|(force, _)| force) }

    pub fn set_remaining(&mut self, force: Force, time: Duration, now: Instant) {
        self.remaining[force] = time;
        if let Some((running_force, ref mut since)) = self.running {
            if running_force == force {
                *since = now;
            }
        }
    }

    // Starts the countdown for `force`. At most one side is ticking at a time.
    pub fn start(&mut self, force: Force, now: Instant) {
        if let Some((prev_force, since)) = self.running {
            if prev_force != force {
                self.remaining[prev_force] =
                    self.remaining[prev_force].saturating_sub(now - since);
            } else {
                return;
            }
        }
        self.running = Some((force, now));
    }

    pub fn stop(&mut self, now: Instant) {
        if let Some((prev_force, since)) = self.running {
            self.remaining[prev_force] = self.remaining[prev_force].saturating_sub(now - since);
        }
        self.running = None;
    }

    pub fn time_left(&self, force: Force, now: Instant) -> Duration {
        let mut ret = self.remaining[force];
        if let Some((running_force, since)) = self.running {
            if running_force == force {
                ret = ret.saturating_sub(now - since);
            }
        }
        ret
    }

    pub fn showing_for(&self, force: Force, now: Instant) -> ClockShowing {
        let is_active = self.active_force() == Some(force);
        let mut time = self.time_left(force, now);

        // Never consider an active player to be out of time: they may have zero time
        // locally, but the verdict belongs to the server.
        let out_of_time = !is_active && time.is_zero();
        if !out_of_time && time.is_zero() {
            time = Duration::from_millis(1);
        }

        let time_breakdown = time.into();
        let show_separator = match (is_active, time_breakdown) {
            (false, _) => true,
            (true, TimeBreakdown::NormalTime { .. }) => time.subsec_millis() >= 500,
            (true, TimeBreakdown::LowTime { .. }) => true,
        };

        ClockShowing {
            is_active,
            show_separator,
            out_of_time,
            time_breakdown,
        }
    }
}


// Correspondence clock: time banked per side, no ticking.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CorresClock {
    pub days_per_turn: u32,
    pub remaining: EnumMap<Force, Duration>,
}

impl CorresClock {
    pub fn ui_string(&self, force: Force) -> String {
        let secs = self.remaining[force].as_secs();
        let days = secs / SECS_PER_DAY;
        match days {
            0 => format!("{:02}:{:02}", secs / 3600, (secs % 3600) / 60),
            1 => "1 day".to_owned(),
            _ => format!("{days} days"),
        }
    }
}


pub fn render_clock(clock: &RoundClock, force: Force, now: Instant) -> Node {
    let showing = clock.showing_for(force, now);
    Node::elem("div")
        .with_class("clock")
        .with_class_if("running", showing.is_active)
        .with_class_if("outoftime", showing.out_of_time)
        .with_text(showing.ui_string())
}

pub fn render_corres_clock(clock: &CorresClock, force: Force) -> Node {
    Node::elem("div").with_class("corres-clock").with_text(clock.ui_string(force))
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn time_breakdown() {
        use TimeBreakdown::*;
        let cases = [
            (0, LowTime { seconds: 0, deciseconds: 0 }),
            (1, LowTime { seconds: 0, deciseconds: 1 }),
            (100, LowTime { seconds: 0, deciseconds: 1 }),
            (101, LowTime { seconds: 0, deciseconds: 2 }),
            (900, LowTime { seconds: 0, deciseconds: 9 }),
            (901, LowTime { seconds: 1, deciseconds: 0 }),
            (1_000, LowTime { seconds: 1, deciseconds: 0 }),
            (1_001, LowTime { seconds: 1, deciseconds: 1 }),
            (19_900, LowTime { seconds: 19, deciseconds: 9 }),
            (19_901, NormalTime { minutes: 0, seconds: 20 }),
            (20_000, NormalTime { minutes: 0, seconds: 20 }),
            (20_001, NormalTime { minutes: 0, seconds: 21 }),
            (59_000, NormalTime { minutes: 0, seconds: 59 }),
            (59_001, NormalTime { minutes: 1, seconds: 0 }),
            (60_000, NormalTime { minutes: 1, seconds: 0 }),
            (60_001, NormalTime { minutes: 1, seconds: 1 }),
            (119_000, NormalTime { minutes: 1, seconds: 59 }),
            (119_001, NormalTime { minutes: 2, seconds: 0 }),
        ];
        for (millis, breakdown) in cases {
            assert_eq!(TimeBreakdown::from(Duration::from_millis(millis)), breakdown);
        }
    }

    #[test]
    fn single_ticking_side() {
        let control = TimeControl {
            initial: Duration::from_secs(300),
            increment: Duration::from_secs(10),
        };
        let mut clock = RoundClock::new(control);
        let t0 = Instant::now();
        assert_eq!(clock.active_force(), None);
        clock.start(Force::Sente, t0);
        assert_eq!(clock.active_force(), Some(Force::Sente));
        clock.start(Force::Gote, t0 + Duration::from_secs(2));
        assert_eq!(clock.active_force(), Some(Force::Gote));
        assert_eq!(
            clock.time_left(Force::Sente, t0 + Duration::from_secs(2)),
            Duration::from_secs(298)
        );
        clock.stop(t0 + Duration::from_secs(5));
        assert_eq!(clock.active_force(), None);
        assert_eq!(
            clock.time_left(Force::Gote, t0 + Duration::from_secs(60)),
            Duration::from_secs(297)
        );
    }

    #[test]
    fn out_of_time_only_when_stopped() {
        let control = TimeControl {
            initial: Duration::from_secs(1),
            increment: Duration::ZERO,
        };
        let mut clock = RoundClock::new(control);
        let t0 = Instant::now();
        clock.start(Force::Sente, t0);
        let late = t0 + Duration::from_secs(10);
        assert!(!clock.showing_for(Force::Sente, late).out_of_time);
        clock.stop(late);
        assert!(clock.showing_for(Force::Sente, late).out_of_time);
        assert!(!clock.showing_for(Force::Gote, late).out_of_time);
    }

    #[test]
    fn time_control_summary() {
        let tc = |initial, increment| TimeControl {
            initial: Duration::from_secs(initial),
            increment: Duration::from_secs(increment),
        };
        assert_eq!(tc(300, 10).to_string(), "5 + 10");
        assert_eq!(tc(30, 0).to_string(), "0.5 + 0");
    }

    #[test]
    fn corres_banked_time() {
        let clock = CorresClock {
            days_per_turn: 2,
            remaining: enum_map! {
                Force::Sente => Duration::from_secs(2 * SECS_PER_DAY),
                Force::Gote => Duration::from_secs(3 * 3600 + 25 * 60),
            },
        };
        assert_eq!(clock.ui_string(Force::Sente), "2 days");
        assert_eq!(clock.ui_string(Force::Gote), "03:25");
    }
}
