//! Layered-system wave: a damped ripple through stacked layers.

use crate::controller::Visual;
use crate::easing::wave_burst;

#[derive(Debug, Clone, PartialEq)]
pub struct WaveParams {
    /// Delay before the first burst.
    pub first_delay_ms: f64,
    /// Time between burst starts.
    pub interval_ms: f64,
    /// Length of one burst.
    pub burst_ms: f64,
    /// Peak vertical displacement (SVG units) of a depth-1 layer.
    pub amplitude: f64,
    /// Static per-layer weights, front layer first.
    pub depths: Vec<f64>,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            first_delay_ms: 1000.0,
            interval_ms: 5000.0,
            burst_ms: 1000.0,
            amplitude: 6.0,
            depths: vec![1.0, 0.72, 0.48, 0.26],
        }
    }
}

/// Per-layer displacement for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePose {
    /// Shared envelope value in (-1, 1).
    pub envelope: f64,
    /// Vertical offset of each layer, in `depths` order.
    pub offsets: Vec<f64>,
    /// Extra opacity per layer while the wave passes through it.
    pub highlights: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct LayeredWave {
    params: WaveParams,
}

impl LayeredWave {
    pub fn new(params: WaveParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn layer_count(&self) -> usize {
        self.params.depths.len()
    }

    /// Envelope value `elapsed_ms` after the visual appeared.
    pub fn envelope_at(&self, elapsed_ms: f64) -> f64 {
        let p = &self.params;
        if elapsed_ms < p.first_delay_ms || p.interval_ms <= 0.0 || p.burst_ms <= 0.0 {
            return 0.0;
        }
        let since = (elapsed_ms - p.first_delay_ms).rem_euclid(p.interval_ms);
        if since >= p.burst_ms {
            return 0.0;
        }
        wave_burst(since / p.burst_ms)
    }

    fn pose_for(&self, envelope: f64) -> WavePose {
        let p = &self.params;
        WavePose {
            envelope,
            offsets: p.depths.iter().map(|d| p.amplitude * d * envelope).collect(),
            highlights: p.depths.iter().map(|d| 0.25 * d * envelope.abs()).collect(),
        }
    }
}

impl Visual for LayeredWave {
    type Pose = WavePose;

    fn pose_at(&self, elapsed_ms: f64) -> WavePose {
        self.pose_for(self.envelope_at(elapsed_ms))
    }

    fn rest_pose(&self) -> WavePose {
        self.pose_for(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quiet_before_first_trigger() {
        let wave = LayeredWave::default();
        for t in [0.0, 250.0, 999.0] {
            assert_eq!(wave.envelope_at(t), 0.0);
        }
    }

    #[test]
    fn test_burst_then_rest() {
        let wave = LayeredWave::default();
        assert!(wave.envelope_at(1250.0) > 0.0);
        assert_eq!(wave.envelope_at(2500.0), 0.0);
        assert_eq!(wave.envelope_at(5999.0), 0.0);
    }

    #[test]
    fn test_retriggers_every_interval() {
        let wave = LayeredWave::default();
        for offset in [100.0, 300.0, 700.0] {
            assert_relative_eq!(
                wave.envelope_at(1000.0 + offset),
                wave.envelope_at(6000.0 + offset),
                epsilon = 1e-12
            );
            assert_relative_eq!(
                wave.envelope_at(1000.0 + offset),
                wave.envelope_at(21000.0 + offset),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_layers_scale_by_depth() {
        let wave = LayeredWave::default();
        let pose = wave.pose_at(1200.0);
        assert_eq!(pose.offsets.len(), 4);
        assert_relative_eq!(pose.offsets[0], 6.0 * pose.envelope);
        assert_relative_eq!(pose.offsets[2], 6.0 * 0.48 * pose.envelope);
        assert!(pose.offsets[0].abs() > pose.offsets[3].abs());
    }

    #[test]
    fn test_rest_pose_is_flat() {
        let pose = LayeredWave::default().rest_pose();
        assert!(pose.offsets.iter().all(|o| *o == 0.0));
        assert!(pose.highlights.iter().all(|h| *h == 0.0));
    }
}
