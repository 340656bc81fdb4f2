use std::collections::VecDeque;
use std::time::SystemTime;

#[derive(Clone, Debug)]
pub struct Timer {
    start: SystemTime
}

impl Default for Timer {
    fn default() -> Self {
        Timer::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Timer {
            start: SystemTime::now()
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().unwrap().as_secs_f64()
    }

    pub fn reset(&mut self) {
        self.start = SystemTime::now();
    }
}

const FPS_WINDOW: usize = 100;

/// Per-frame clock: call `tick()` once at the top of every frame to get the
/// delta time, and `fps()` for a rate smoothed over the last 100 frames.
#[derive(Clone, Debug)]
pub struct FrameClock {
    frame_timer: Timer,
    delta: f32,
    last_dts: VecDeque<f32>
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock {
            frame_timer: Timer::new(),
            delta: 0.0,
            last_dts: VecDeque::with_capacity(FPS_WINDOW)
        }
    }

    pub fn tick(&mut self) -> f32 {
        self.delta = self.frame_timer.elapsed() as f32;
        self.frame_timer.reset();

        if self.last_dts.len() >= FPS_WINDOW {
            self.last_dts.pop_front();
        }
        self.last_dts.push_back(self.delta);

        self.delta
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn fps(&self) -> f32 {
        if self.last_dts.is_empty() {
            return 0.0;
        }

        let avg = self.last_dts.iter().sum::<f32>() / self.last_dts.len() as f32;
        if avg <= 0.0 {
            0.0
        } else {
            1.0 / avg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_clock_reports_zero_fps_before_first_tick() {
        let clock = FrameClock::new();
        assert_eq!(clock.fps(), 0.0);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn frame_clock_window_stays_bounded() {
        let mut clock = FrameClock::new();
        for _ in 0..(FPS_WINDOW * 2) {
            clock.tick();
        }
        assert!(clock.last_dts.len() <= FPS_WINDOW);
    }
}
