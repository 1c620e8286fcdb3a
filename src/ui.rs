//! Control panel state
//!
//! What each demo's panel edits between frames. Forcing profiles are picked from a
//! catalog of templates; the selected template is copied into the parameter set when
//! the panel is applied, so editing a template never touches the running body.

use sim_physics::{
    FlywheelParams, ForcingFunction, JellyParams, SpringParams, WhirligigParams, GRAVITY,
};
use sim_scheduler::RunParams;

const HISTORY_LENGTH: usize = 10_000;
const TRAJECTORY_LENGTH: usize = 5000;

/// A forcing profile combo: editable templates plus the selected entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForcingSelector {
    pub templates: [ForcingFunction; 4],
    selected: usize,
}

impl ForcingSelector {
    pub fn new(amplitude: f32) -> Self {
        Self::from_templates(ForcingFunction::catalog(amplitude))
    }

    /// Unit-amplitude catalog whose constant entry starts at zero.
    pub fn unit() -> Self {
        let mut templates = ForcingFunction::catalog(1.0);
        templates[0] = ForcingFunction::constant(0.0);
        Self::from_templates(templates)
    }

    pub fn from_templates(templates: [ForcingFunction; 4]) -> Self {
        Self {
            templates,
            selected: 0,
        }
    }

    /// Picks a template; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.templates.len() {
            self.selected = index;
        }
    }

    pub fn selected(&self) -> ForcingFunction {
        self.templates[self.selected]
    }

    pub fn selected_mut(&mut self) -> &mut ForcingFunction {
        &mut self.templates[self.selected]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringPanel {
    pub params: SpringParams,
    pub run: RunParams,
    pub rest_position: ForcingSelector,
    pub field_force: ForcingSelector,
    pub history_length: usize,
}

impl SpringPanel {
    /// Parameters with the selected forcing templates filled in.
    pub fn params(&self) -> SpringParams {
        SpringParams {
            rest_position_function: self.rest_position.selected(),
            field_force_function: self.field_force.selected(),
            ..self.params
        }
    }
}

impl Default for SpringPanel {
    fn default() -> Self {
        Self {
            params: SpringParams::default(),
            run: RunParams::new(0.01, 100),
            rest_position: ForcingSelector::unit(),
            field_force: ForcingSelector::unit(),
            history_length: HISTORY_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhirligigPanel {
    pub params: WhirligigParams,
    pub run: RunParams,
    pub gravity: ForcingSelector,
    pub trajectory_length: usize,
}

impl WhirligigPanel {
    pub fn params(&self) -> WhirligigParams {
        WhirligigParams {
            gravity_function: self.gravity.selected(),
            ..self.params
        }
    }
}

impl Default for WhirligigPanel {
    fn default() -> Self {
        Self {
            params: WhirligigParams::default(),
            run: RunParams::new(0.01, 100),
            gravity: ForcingSelector::new(GRAVITY),
            trajectory_length: TRAJECTORY_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JellyPanel {
    pub params: JellyParams,
    pub run: RunParams,
}

impl Default for JellyPanel {
    fn default() -> Self {
        Self {
            params: JellyParams::default(),
            run: RunParams::new(0.001, 100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlywheelPanel {
    pub params: FlywheelParams,
    pub run: RunParams,
    pub history_length: usize,
}

impl Default for FlywheelPanel {
    fn default() -> Self {
        Self {
            params: FlywheelParams::default(),
            run: RunParams::new(0.01, 100),
            history_length: HISTORY_LENGTH,
        }
    }
}
