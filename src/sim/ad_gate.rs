//! Ad break gate - while an ad is playing the simulation is frozen

use serde::{Deserialize, Serialize};

use crate::consts::{AD_DURATION, AD_HP_BUFF};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdGate {
    paused: bool,
    timer: f32,
}

impl AdGate {
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Seconds into the current ad
    pub fn elapsed(&self) -> f32 {
        self.timer
    }

    /// HP granted for watching an ad
    pub fn hp_buff(&self) -> i32 {
        AD_HP_BUFF
    }

    pub fn start(&mut self) {
        self.timer = 0.0;
        self.paused = true;
    }

    /// Advance the ad timer. Returns true on the frame the ad finishes.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.paused {
            return false;
        }
        self.timer += dt;
        if self.timer >= AD_DURATION {
            self.paused = false;
            return true;
        }
        false
    }

    /// Which of the two ad images is showing (0 for the first half, then 1)
    pub fn frame(&self) -> u32 {
        if self.timer < AD_DURATION * 0.5 { 0 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ad_runs_for_fixed_duration() {
        let mut gate = AdGate::default();
        assert!(!gate.update(1.0));
        gate.start();
        assert!(gate.is_paused());
        assert_eq!(gate.frame(), 0);
        assert!(!gate.update(3.0));
        assert_eq!(gate.frame(), 1);
        assert!(gate.update(2.0));
        assert!(!gate.is_paused());
    }
}
