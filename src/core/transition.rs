//! Per-pixel fade engine.
//!
//! A [`Transition`] is planned once per tick from the previous and the new
//! [`ActiveSet`] and then stepped on sub-ticks until every pixel it owns has
//! reached its target color. Each step moves every channel toward the target by
//! at most the configured step and never past it. Pixels are only written when
//! their color actually changes, so an idle transition costs nothing.

use anyhow::Result;
use smart_leds::RGB8;
use std::collections::BTreeSet;

use crate::device::{LedDevice, OFF};

/// The set of LED indices lit for one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet(BTreeSet<usize>);

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split the union of `self` (previous) and `next` into fade groups.
    pub fn diff(&self, next: &ActiveSet) -> SetDiff {
        SetDiff {
            turn_on: next.0.difference(&self.0).copied().collect(),
            turn_off: self.0.difference(&next.0).copied().collect(),
            unchanged: self.0.intersection(&next.0).copied().collect(),
        }
    }
}

impl FromIterator<usize> for ActiveSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Result of comparing two active sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDiff {
    pub turn_on: ActiveSet,
    pub turn_off: ActiveSet,
    pub unchanged: ActiveSet,
}

impl SetDiff {
    pub fn is_empty(&self) -> bool {
        self.turn_on.is_empty() && self.turn_off.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeState {
    Idle,
    Fading,
}

/// Maximum per-channel change per sub-tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeSteps {
    pub fade_in: u8,
    pub fade_out: u8,
}

/// A planned fade from one active set to the next.
#[derive(Debug, Clone)]
pub struct Transition {
    fade_in: Vec<usize>,
    fade_out: Vec<usize>,
    on_color: RGB8,
    steps: FadeSteps,
    state: FadeState,
    sub_ticks: u32,
}

impl Transition {
    /// Plan the fade from `previous` to `next`.
    ///
    /// Newly lit pixels fade in to `on_color` and dropped pixels fade out to
    /// black. When the set changed, pixels that stay lit but no longer match
    /// `on_color` join the fade-in group so brightness changes reach them too.
    /// Equal sets yield an idle transition that never touches the device.
    pub fn plan(
        previous: &ActiveSet,
        next: &ActiveSet,
        on_color: RGB8,
        steps: FadeSteps,
        device: &dyn LedDevice,
    ) -> Result<Self> {
        let diff = previous.diff(next);
        if diff.is_empty() {
            return Ok(Self::idle(on_color, steps));
        }

        let mut fade_in: Vec<usize> = diff.turn_on.iter().collect();
        for index in diff.unchanged.iter() {
            if device.get_pixel(index)? != on_color {
                fade_in.push(index);
            }
        }

        Ok(Self {
            fade_in,
            fade_out: diff.turn_off.iter().collect(),
            on_color,
            steps,
            state: FadeState::Fading,
            sub_ticks: 0,
        })
    }

    pub fn idle(on_color: RGB8, steps: FadeSteps) -> Self {
        Self {
            fade_in: Vec::new(),
            fade_out: Vec::new(),
            on_color,
            steps,
            state: FadeState::Idle,
            sub_ticks: 0,
        }
    }

    pub fn state(&self) -> FadeState {
        self.state
    }

    pub fn fade_in_count(&self) -> usize {
        self.fade_in.len()
    }

    pub fn fade_out_count(&self) -> usize {
        self.fade_out.len()
    }

    /// Sub-ticks stepped so far.
    pub fn sub_ticks(&self) -> u32 {
        self.sub_ticks
    }

    /// Advance every owned pixel by one step.
    ///
    /// Returns `true` once every pixel in both groups equals its target on all
    /// channels; the transition is then idle and further calls are no-ops.
    /// The caller flushes the device.
    pub fn step(&mut self, device: &mut dyn LedDevice) -> Result<bool> {
        if self.state == FadeState::Idle {
            return Ok(true);
        }
        self.sub_ticks += 1;

        let mut converged = true;
        for &index in &self.fade_in {
            converged &= approach_pixel(device, index, self.on_color, self.steps.fade_in)?;
        }
        for &index in &self.fade_out {
            converged &= approach_pixel(device, index, OFF, self.steps.fade_out)?;
        }

        if converged {
            self.state = FadeState::Idle;
        }
        Ok(converged)
    }
}

/// Move one pixel toward `target`, writing only on change.
/// Returns whether the pixel now equals the target.
fn approach_pixel(
    device: &mut dyn LedDevice,
    index: usize,
    target: RGB8,
    step: u8,
) -> Result<bool> {
    let current = device.get_pixel(index)?;
    let next = approach_color(current, target, step);
    if next != current {
        device.set_pixel(index, next)?;
    }
    Ok(next == target)
}

pub fn approach_color(current: RGB8, target: RGB8, step: u8) -> RGB8 {
    RGB8 {
        r: approach_channel(current.r, target.r, step),
        g: approach_channel(current.g, target.g, step),
        b: approach_channel(current.b, target.b, step),
    }
}

/// Move `current` toward `target` by at most `step`, never overshooting.
pub fn approach_channel(current: u8, target: u8, step: u8) -> u8 {
    if current < target {
        current.saturating_add(step).min(target)
    } else {
        current.saturating_sub(step).max(target)
    }
}
