//! Quality of service.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Timeliness {
    Unspecified,
    Realtime,
    DelayedUnknown,
    /// Delayed by the given number of seconds.
    Delayed(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rate {
    Unspecified,
    TickByTick,
    JitConflated,
    /// Conflated over the given number of milliseconds.
    TimeConflated(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Qos {
    pub timeliness: Timeliness,
    pub rate: Rate,
}

impl Qos {
    pub fn realtime_tick_by_tick() -> Self {
        Qos {
            timeliness: Timeliness::Realtime,
            rate: Rate::TickByTick,
        }
    }
}

impl Default for Qos {
    fn default() -> Self {
        Qos::realtime_tick_by_tick()
    }
}
