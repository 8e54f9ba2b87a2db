//! Platform abstraction layer
//!
//! Turns the outside world into [`InputEvent`]s:
//! - text commands typed on the terminal
//! - wall-clock time, converted into one-second countdown ticks

use std::time::Duration;

use glam::Vec2;

use crate::sim::InputEvent;

/// A line of terminal input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Input(InputEvent),
    /// Redraw the current frame without changing anything
    Show,
    Quit,
}

/// Parse `click X Y`, `move X Y`, `tick`, `show` or `quit` (case-insensitive,
/// first letter is enough).
pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_lowercase();

    let mut point = || -> Option<Vec2> {
        let x = words.next()?.parse::<f32>().ok()?;
        let y = words.next()?.parse::<f32>().ok()?;
        Some(Vec2::new(x, y))
    };

    match verb.as_str() {
        "click" | "c" => Some(Command::Input(InputEvent::Click(point()?))),
        "move" | "m" => Some(Command::Input(InputEvent::MouseMove(point()?))),
        "tick" | "t" => Some(Command::Input(InputEvent::TimerTick)),
        "show" | "s" => Some(Command::Show),
        "quit" | "q" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Fixed-step accumulator converting elapsed time into timer ticks
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    accumulator: Duration,
    /// Cap per update so a long stall cannot flood the game
    max_ticks: u32,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulator: Duration::ZERO,
            max_ticks: 3600,
        }
    }

    /// Add `elapsed` and return how many whole ticks are due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.interval && ticks < self.max_ticks {
            self.accumulator -= self.interval;
            ticks += 1;
        }
        if ticks == self.max_ticks {
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// Time left until the next tick falls due. A zero interval never ticks.
    pub fn until_next_tick(&self) -> Duration {
        if self.interval.is_zero() {
            return Duration::MAX;
        }
        self.interval.saturating_sub(self.accumulator)
    }

    /// Drop any partial tick (e.g. when the countdown starts)
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("click 10 20"),
            Some(Command::Input(InputEvent::Click(Vec2::new(10.0, 20.0))))
        );
        assert_eq!(
            parse_command("  M 1.5 -2 "),
            Some(Command::Input(InputEvent::MouseMove(Vec2::new(1.5, -2.0))))
        );
        assert_eq!(parse_command("tick"), Some(Command::Input(InputEvent::TimerTick)));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("show"), Some(Command::Show));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("click 10"), None);
        assert_eq!(parse_command("click a b"), None);
        assert_eq!(parse_command("jump"), None);
    }

    #[test]
    fn test_clock_accumulates() {
        let mut clock = TickClock::new(Duration::from_millis(1000));
        assert_eq!(clock.advance(Duration::from_millis(400)), 0);
        assert_eq!(clock.advance(Duration::from_millis(700)), 1);
        assert_eq!(clock.advance(Duration::from_millis(2950)), 3);
        clock.reset();
        assert_eq!(clock.advance(Duration::from_millis(999)), 0);
    }

    #[test]
    fn test_clock_time_until_next_tick() {
        let mut clock = TickClock::new(Duration::from_millis(1000));
        assert_eq!(clock.until_next_tick(), Duration::from_millis(1000));
        clock.advance(Duration::from_millis(1300));
        assert_eq!(clock.until_next_tick(), Duration::from_millis(700));
        clock.reset();
        assert_eq!(clock.until_next_tick(), Duration::from_millis(1000));

        let stopped = TickClock::new(Duration::ZERO);
        assert_eq!(stopped.until_next_tick(), Duration::MAX);
    }

    #[test]
    fn test_clock_caps_long_stalls() {
        let mut clock = TickClock::new(Duration::from_millis(1));
        assert_eq!(clock.advance(Duration::from_secs(60)), 3600);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }
}
