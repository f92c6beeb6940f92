//! Day/night clock
//!
//! The cycle is a day phase followed by a (shorter) night phase.
//! `time_of_day` maps the day onto 0.0..0.5 and the night onto 0.5..1.0,
//! so dusk and dawn sit at fixed points regardless of phase lengths.

pub const DAY_LENGTH_MS: f64 = 30_000.0;
pub const NIGHT_LENGTH_MS: f64 = 15_000.0;
pub const NIGHT_DARKNESS: u8 = 180;

#[derive(Debug, Clone, PartialEq)]
pub struct DayNightCycle {
    elapsed_ms: f64,
    day_length_ms: f64,
    night_length_ms: f64,
}

impl DayNightCycle {
    pub fn new() -> Self {
        DayNightCycle {
            elapsed_ms: 0.0,
            day_length_ms: DAY_LENGTH_MS,
            night_length_ms: NIGHT_LENGTH_MS,
        }
    }

    /// Restores a clock from a saved `time_of_day`
    pub fn from_time_of_day(time_of_day: f64) -> Self {
        let mut cycle = DayNightCycle::new();
        let t = time_of_day.rem_euclid(1.0);
        cycle.elapsed_ms = if t < 0.5 {
            t / 0.5 * cycle.day_length_ms
        } else {
            cycle.day_length_ms + (t - 0.5) / 0.5 * cycle.night_length_ms
        };
        cycle
    }

    fn full_cycle_ms(&self) -> f64 {
        self.day_length_ms + self.night_length_ms
    }

    pub fn update(&mut self, dt_ms: f64) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).rem_euclid(self.full_cycle_ms());
    }

    /// 0.0 = morning, 0.5 = dusk, 1.0 = next morning
    pub fn time_of_day(&self) -> f64 {
        if self.elapsed_ms < self.day_length_ms {
            self.elapsed_ms / self.day_length_ms * 0.5
        } else {
            0.5 + (self.elapsed_ms - self.day_length_ms) / self.night_length_ms * 0.5
        }
    }

    /// Overlay alpha: ramps up through the evening, full at night, fades at dawn
    pub fn darkness(&self) -> u8 {
        let t = self.time_of_day();
        let night = NIGHT_DARKNESS as f64;

        let value = if t > 0.25 && t < 0.5 {
            (t - 0.25) / 0.25 * night
        } else if (0.5..0.75).contains(&t) {
            night
        } else if t >= 0.75 {
            (1.0 - t) / 0.25 * night
        } else {
            0.0
        };

        value as u8
    }

    pub fn is_night(&self) -> bool {
        self.time_of_day() >= 0.5
    }
}

impl Default for DayNightCycle {
    fn default() -> Self {
        Self::new()
    }
}
