//! Newton's cradle, scripted rather than simulated.
//!
//! Only the end balls swing, each along a half-sine for half the cycle. The
//! inner pair gets a small antisymmetric nudge inside a narrow window
//! around each collision, which reads as momentum passing through.

use crate::clock::cycle_phase;
use crate::controller::Visual;
use crate::easing::half_sine;

pub const BALLS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct CradleParams {
    pub cycle_ms: f64,
    /// Peak swing of an end ball (radians).
    pub max_angle: f64,
    /// Peak nudge of the inner balls (radians).
    pub nudge: f64,
    /// Half-width of the collision window, as a fraction of the cycle.
    pub collision_window: f64,
    /// X of the leftmost pivot.
    pub origin_x: f64,
    pub pivot_y: f64,
    pub string_length: f64,
    pub ball_radius: f64,
    /// Horizontal distance between pivots.
    pub spacing: f64,
    /// Label opacity when its ball hangs still.
    pub label_base_opacity: f64,
    /// Outward label shift at full swing.
    pub label_shift: f64,
}

impl Default for CradleParams {
    fn default() -> Self {
        Self {
            cycle_ms: 2000.0,
            max_angle: 0.6,
            nudge: 0.02,
            collision_window: 0.02,
            origin_x: 36.0,
            pivot_y: 12.0,
            string_length: 60.0,
            ball_radius: 8.0,
            spacing: 16.0,
            label_base_opacity: 0.5,
            label_shift: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPose {
    /// Swing angle; positive swings right.
    pub angle: f64,
    pub pivot_x: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CradleLabel {
    pub opacity: f64,
    /// Horizontal offset from the label's resting position.
    pub offset_x: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CradlePose {
    pub balls: [BallPose; BALLS],
    /// Label tied to the left ball.
    pub work: CradleLabel,
    /// Label tied to the right ball.
    pub life: CradleLabel,
}

#[derive(Debug, Clone, Default)]
pub struct Cradle {
    params: CradleParams,
}

impl Cradle {
    pub fn new(params: CradleParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CradleParams {
        &self.params
    }

    /// Ball angles at cycle fraction `t` in [0, 1].
    ///
    /// `t = 0` and `t = 1` are both the resting instant of a collision and
    /// return exactly zero for every ball.
    pub fn angles_at(&self, t: f64) -> [f64; BALLS] {
        let p = &self.params;
        let t = if (0.0..=1.0).contains(&t) {
            t
        } else {
            t.rem_euclid(1.0)
        };

        let mut angles = [0.0; BALLS];
        if t < 0.5 {
            angles[0] = -p.max_angle * half_sine(t / 0.5);
        } else {
            angles[BALLS - 1] = p.max_angle * half_sine((t - 0.5) / 0.5);
        }

        let nudge = self.nudge_at(t);
        angles[1] = nudge;
        angles[2] = nudge;
        angles
    }

    /// Inner-ball nudge: rightward after the left ball strikes at t = 0.5,
    /// leftward after the right ball strikes at t = 0 / 1.
    ///
    /// The window spans both sides of each strike, so the inner pair also
    /// leans toward the incoming ball just before contact. The sine is
    /// antisymmetric about the strike and exactly zero at it.
    fn nudge_at(&self, t: f64) -> f64 {
        let p = &self.params;
        let w = p.collision_window;
        if w <= 0.0 {
            return 0.0;
        }
        let window = |d: f64| {
            if d.abs() < w {
                (std::f64::consts::PI * d / w).sin()
            } else {
                0.0
            }
        };

        let from_left = t - 0.5;
        let from_right = if t < 0.5 { t } else { t - 1.0 };
        p.nudge * window(from_left) - p.nudge * window(from_right)
    }

    fn pose_for(&self, angles: [f64; BALLS]) -> CradlePose {
        let p = &self.params;
        let balls = std::array::from_fn(|i| {
            let pivot_x = p.origin_x + p.spacing * i as f64;
            let a = angles[i];
            BallPose {
                angle: a,
                pivot_x,
                x: pivot_x + p.string_length * a.sin(),
                y: p.pivot_y + p.string_length * a.cos(),
            }
        });

        let label = |angle: f64, outward: f64| {
            let swing = if p.max_angle > 0.0 {
                (angle.abs() / p.max_angle).min(1.0)
            } else {
                0.0
            };
            CradleLabel {
                opacity: p.label_base_opacity + (1.0 - p.label_base_opacity) * swing,
                offset_x: outward * p.label_shift * swing,
            }
        };

        CradlePose {
            balls,
            work: label(angles[0], -1.0),
            life: label(angles[BALLS - 1], 1.0),
        }
    }
}

impl Visual for Cradle {
    type Pose = CradlePose;

    fn pose_at(&self, elapsed_ms: f64) -> CradlePose {
        let t = cycle_phase(elapsed_ms, self.params.cycle_ms);
        self.pose_for(self.angles_at(t))
    }

    /// All four balls hanging still.
    fn rest_pose(&self) -> CradlePose {
        self.pose_for([0.0; BALLS])
    }
}
