//! Charge-and-fire weapon state.
//!
//! A player holds fire to charge a shirt and releases to throw it. The
//! component only tracks the cycle (charging, cooldown, ammo); systems turn
//! the returned [`Release`] into a spawned projectile, sounds and HUD changes.

use bevy_ecs::prelude::Component;

use crate::components::curve::Curve;
use crate::math;

/// Why a charge could not start.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChargeBlocked {
    AlreadyCharging,
    CoolingDown,
    NoAmmo,
}

/// Outcome of releasing a charge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Release {
    /// Curve-shaped charge strength in `[0, 1]`.
    pub strength: f32,
}

impl Release {
    pub fn is_full(&self) -> bool {
        self.strength >= 1.0
    }
}

#[derive(Component, Clone, Debug)]
pub struct ChargeWeapon {
    pub ammo: i32,
    pub is_firing: bool,
    pub charge_timer: f32,
    pub is_cooling_down: bool,
    pub cooldown_timer: f32,
    pub max_charge_time: f32,
    pub cooldown_time: f32,
    pub charge_curve: Curve,
    /// The looping hold sound has been started for the current charge.
    pub holding_sound: bool,
}

impl ChargeWeapon {
    pub fn new(ammo: i32, max_charge_time: f32, cooldown_time: f32) -> Self {
        Self {
            ammo,
            is_firing: false,
            charge_timer: 0.0,
            is_cooling_down: false,
            cooldown_timer: 0.0,
            max_charge_time,
            cooldown_time,
            charge_curve: Curve::linear(),
            holding_sound: false,
        }
    }

    /// Raw charge ratio in `[0, 1]`.
    pub fn charge_ratio(&self) -> f32 {
        if self.max_charge_time <= 0.0 {
            return 1.0;
        }
        math::clamp01(self.charge_timer / self.max_charge_time)
    }

    /// Charge ratio passed through the charge curve.
    pub fn strength(&self) -> f32 {
        self.charge_curve.evaluate(self.charge_ratio())
    }

    pub fn begin_charge(&mut self) -> Result<(), ChargeBlocked> {
        if self.is_firing {
            return Err(ChargeBlocked::AlreadyCharging);
        }
        if self.is_cooling_down {
            return Err(ChargeBlocked::CoolingDown);
        }
        if self.ammo <= 0 {
            return Err(ChargeBlocked::NoAmmo);
        }
        self.is_firing = true;
        self.charge_timer = 0.0;
        self.holding_sound = false;
        Ok(())
    }

    /// Finish a charge. Returns `None` when nothing was charging.
    pub fn release(&mut self) -> Option<Release> {
        if !self.is_firing {
            return None;
        }
        let strength = self.strength();
        self.is_firing = false;
        self.is_cooling_down = true;
        self.cooldown_timer = self.cooldown_time;
        self.ammo -= 1;
        self.charge_timer = 0.0;
        self.holding_sound = false;
        Some(Release { strength })
    }

    /// Advance charge and cooldown timers. Returns true on the tick the
    /// cooldown finishes.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.is_firing {
            self.charge_timer += dt;
        }
        if self.is_cooling_down {
            self.cooldown_timer -= dt;
            if self.cooldown_timer <= 0.0 {
                self.cooldown_timer = 0.0;
                self.is_cooling_down = false;
                return true;
            }
        }
        false
    }

    /// Reticle level for the current charge given `levels` reticle sprites.
    ///
    /// Level 0 is idle; while charging the level runs from 1 up to
    /// `levels - 1` at full charge.
    pub fn reticle_level(&self, levels: usize) -> usize {
        if !self.is_firing || levels < 2 {
            return 0;
        }
        let top = (levels - 2) as f32;
        math::lerp_f32(0.0, top, self.strength()).floor() as usize + 1
    }

    /// Adds (or removes) ammo, keeping the count in `[0, 99]`.
    pub fn add_ammo(&mut self, amount: i32) {
        self.ammo = (self.ammo + amount).clamp(0, 99);
    }
}
