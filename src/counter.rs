//! Stat counter animation arithmetic.
//!
//! Linear increments only: the target is split into 50 equal fractional
//! steps over 1.5 seconds, the displayed value is the floor of the
//! accumulator, and reaching the target snaps the display to `"{target}+"`.

pub const STEPS: u32 = 50;
pub const DURATION_MS: u32 = 1_500;
pub const STEP_INTERVAL_MS: u32 = DURATION_MS / STEPS;

#[derive(Clone, PartialEq, Debug)]
pub struct CounterAnim {
    target: u32,
    current: f64,
    step: u32,
    finished: bool,
}

impl CounterAnim {
    pub fn new(target: u32) -> Self {
        Self {
            target,
            current: 0.0,
            step: 0,
            finished: false,
        }
    }

    /// Advance one step and return the text to display.
    pub fn tick(&mut self) -> String {
        if self.finished {
            return self.final_display();
        }

        self.step += 1;
        self.current += f64::from(self.target) / f64::from(STEPS);
        // The step count, not the float accumulator, decides completion;
        // repeated additions of target/50 can land a hair under the target.
        if self.step >= STEPS || self.current >= f64::from(self.target) {
            self.finished = true;
            self.final_display()
        } else {
            format!("{}", self.current.floor() as u32)
        }
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    fn final_display(&self) -> String {
        format!("{}+", self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_interval_is_thirty_ms() {
        assert_eq!(STEP_INTERVAL_MS, 30);
    }

    #[test]
    fn reaches_target_in_exactly_fifty_ticks() {
        let mut anim = CounterAnim::new(120);
        let mut ticks = 0;
        let mut last = String::new();
        while !anim.finished() {
            last = anim.tick();
            ticks += 1;
            assert!(ticks <= STEPS, "animation never finished");
        }
        assert_eq!(ticks, STEPS);
        assert_eq!(last, "120+");
    }

    #[test]
    fn display_is_monotonic_and_below_target_while_running() {
        let mut anim = CounterAnim::new(120);
        let mut previous = 0;
        while !anim.finished() {
            let text = anim.tick();
            if anim.finished() {
                break;
            }
            let value: u32 = text.parse().expect("running display is an integer");
            assert!(value >= previous);
            assert!(value < 120);
            previous = value;
        }
    }

    #[test]
    fn stops_mutating_after_finish() {
        let mut anim = CounterAnim::new(120);
        while !anim.finished() {
            anim.tick();
        }
        assert_eq!(anim.tick(), "120+");
        assert_eq!(anim.tick(), "120+");
    }

    #[test]
    fn zero_target_snaps_immediately() {
        let mut anim = CounterAnim::new(0);
        assert_eq!(anim.tick(), "0+");
        assert!(anim.finished());
    }
}
