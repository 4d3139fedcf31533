//! Planner and smoothing configuration.
//!
//! Every tuning constant of the search lives here with its tuned value as
//! the default. Sections deserialize from the `[planner]` and `[smoothing]`
//! tables of the TOML config file.

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;
use crate::error::{Result, VayuError};

/// Tree growth strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Uniform sampling with choose-parent and rewiring, fixed iteration budget.
    RrtStar,
    /// Goal / obstacle-boundary biased sampling, greedy growth, stops at the goal.
    #[default]
    MultiBias,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::RrtStar => write!(f, "rrt_star"),
            Strategy::MultiBias => write!(f, "multi_bias"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = VayuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "rrt_star" | "rrtstar" => Ok(Strategy::RrtStar),
            "multi_bias" | "multibias" => Ok(Strategy::MultiBias),
            other => Err(VayuError::Config(format!(
                "unknown strategy '{}', expected rrt_star or multi_bias",
                other
            ))),
        }
    }
}

/// Axis-aligned sampling region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower x limit (meters)
    pub min_x: f64,
    /// Upper x limit (meters)
    pub max_x: f64,
    /// Lower y limit (meters)
    pub min_y: f64,
    /// Upper y limit (meters)
    pub max_y: f64,
}

impl Bounds {
    /// Square region `[-half, half]²`.
    pub fn square(half: f64) -> Self {
        Self {
            min_x: -half,
            max_x: half,
            min_y: -half,
            max_y: half,
        }
    }

    /// Whether `p` lies inside (inclusive).
    pub fn contains(&self, p: WorldPoint) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_y..=self.max_y).contains(&p.y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::square(7.5)
    }
}

/// Tree growth parameters shared by both strategies.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Which growth strategy to run
    pub strategy: Strategy,
    /// Sampling region
    pub bounds: Bounds,
    /// Fixed steering step from the nearest node (meters)
    pub expand_dis: f64,
    /// Neighborhood radius for choose-parent and rewiring (meters)
    pub search_radius: f64,
    /// Iteration budget
    pub max_iterations: usize,
    /// Arrival radius for multi-bias; `None` reuses `expand_dis`
    pub goal_tolerance: Option<f64>,
    /// Probability of sampling the goal itself (multi-bias)
    pub goal_sample_rate: f64,
    /// Probability of a boundary-seeking Gaussian pair (multi-bias)
    pub boundary_sample_rate: f64,
    /// Standard deviation of the Gaussian pair offset (meters)
    pub gaussian_sigma: f64,
    /// Push rewired costs down to descendants (RRT*)
    pub propagate_rewire_cost: bool,
    /// Require the nearest → candidate edge to be segment-safe, not just the
    /// candidate point (`false` checks the point only)
    pub check_steer_edge: bool,
    /// RNG seed, 0 for entropy
    pub seed: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            bounds: Bounds::default(),
            expand_dis: 0.7,
            search_radius: 1.8,
            max_iterations: 2500,
            goal_tolerance: None,
            goal_sample_rate: 0.15,
            boundary_sample_rate: 0.45,
            gaussian_sigma: 2.0,
            propagate_rewire_cost: false,
            check_steer_edge: true,
            seed: 0,
        }
    }
}

impl PlannerConfig {
    /// Radius within which a new multi-bias node counts as arrived.
    #[inline]
    pub fn arrival_tolerance(&self) -> f64 {
        self.goal_tolerance.unwrap_or(self.expand_dis)
    }

    /// Probability of drawing a plain uniform sample (multi-bias).
    #[inline]
    pub fn uniform_sample_rate(&self) -> f64 {
        1.0 - self.goal_sample_rate - self.boundary_sample_rate
    }

    /// Reject parameter combinations the planner cannot run with.
    pub fn validate(&self) -> Result<()> {
        let b = &self.bounds;
        let finite = [b.min_x, b.max_x, b.min_y, b.max_y]
            .iter()
            .all(|v| v.is_finite());
        // Spans must stay finite too: uniform sampling draws over max - min.
        let spans_finite = (b.max_x - b.min_x).is_finite() && (b.max_y - b.min_y).is_finite();
        if !finite || !spans_finite || b.min_x >= b.max_x || b.min_y >= b.max_y {
            return Err(VayuError::Config(format!(
                "bounds must be finite and non-empty, got x [{}, {}] y [{}, {}]",
                b.min_x, b.max_x, b.min_y, b.max_y
            )));
        }
        positive("expand_dis", self.expand_dis)?;
        non_negative("search_radius", self.search_radius)?;
        non_negative("gaussian_sigma", self.gaussian_sigma)?;
        if let Some(tolerance) = self.goal_tolerance {
            positive("goal_tolerance", tolerance)?;
        }
        if self.max_iterations == 0 {
            return Err(VayuError::Config("max_iterations must be > 0".into()));
        }
        probability("goal_sample_rate", self.goal_sample_rate)?;
        probability("boundary_sample_rate", self.boundary_sample_rate)?;
        if self.goal_sample_rate + self.boundary_sample_rate > 1.0 {
            return Err(VayuError::Config(format!(
                "goal_sample_rate + boundary_sample_rate must be <= 1, got {}",
                self.goal_sample_rate + self.boundary_sample_rate
            )));
        }
        Ok(())
    }
}

/// Path shortcutting settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Run the shortcut pass on the extracted path
    pub enabled: bool,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

pub(crate) fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(VayuError::Config(format!("{name} must be > 0, got {value}")))
    }
}

pub(crate) fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(VayuError::Config(format!("{name} must be >= 0, got {value}")))
    }
}

fn probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(VayuError::Config(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
