use nalgebra as na;
use ndarray::Array2;

use crate::chest::ChestBound;
use crate::math;

/// Deprojection capability supplied by the camera driver: a color pixel
/// plus a depth reading into a 3D point. `None` means the driver could not
/// produce a valid point (e.g. zero depth).
pub trait Deproject {
    fn deproject(&self, px: f32, py: f32, depth: f32) -> Option<na::Point3<f32>>;
}

/// Dense per-pixel depth map sharing the color frame's timestamp. Values
/// are raw sensor units, millimeters on the target rig. Indexed row-major,
/// `[y, x]`.
#[derive(Debug, Clone)]
pub struct DepthFrame {
    data: Array2<u16>,
}

impl DepthFrame {
    pub fn new(data: Array2<u16>) -> Self {
        Self { data }
    }

    pub fn constant(width: usize, height: usize, value: u16) -> Self {
        Self {
            data: Array2::from_elem((height, width), value),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Median depth over every sample inside `bound`, after mapping the
    /// color-frame rectangle into this frame's resolution with `scale`.
    /// The median rejects sensor noise and pixels straddling the silhouette
    /// edge. `None` when the scaled region covers no in-frame pixels.
    pub fn sample_median(&self, bound: &ChestBound, scale: (f32, f32)) -> Option<f32> {
        let x0 = (bound.xmin as f32 * scale.0) as i32;
        let x1 = (bound.xmax as f32 * scale.0) as i32;
        let y0 = (bound.ymin as f32 * scale.1) as i32;
        let y1 = (bound.ymax as f32 * scale.1) as i32;

        let (height, width) = (self.height() as i32, self.width() as i32);

        let mut samples =
            Vec::with_capacity((x1 - x0).max(0) as usize * (y1 - y0).max(0) as usize);
        for y in y0..y1 {
            for x in x0..x1 {
                if x >= 0 && y >= 0 && x < width && y < height {
                    samples.push(self.data[[y as usize, x as usize]]);
                }
            }
        }

        math::median(&mut samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_SCALE: (f32, f32) = (1.0, 1.0);

    #[test]
    fn test_constant_frame_median() {
        let frame = DepthFrame::constant(320, 240, 2000);
        let bound = ChestBound {
            xmin: 100,
            ymin: 100,
            xmax: 140,
            ymax: 200,
        };

        assert_eq!(frame.sample_median(&bound, NO_SCALE), Some(2000.0));
    }

    #[test]
    fn test_zero_area_bound() {
        let frame = DepthFrame::constant(320, 240, 2000);
        let bound = ChestBound {
            xmin: 50,
            ymin: 50,
            xmax: 50,
            ymax: 80,
        };

        assert_eq!(frame.sample_median(&bound, NO_SCALE), None);
    }

    #[test]
    fn test_out_of_frame_bound() {
        let frame = DepthFrame::constant(64, 48, 2000);
        let bound = ChestBound {
            xmin: 100,
            ymin: 100,
            xmax: 140,
            ymax: 200,
        };

        assert_eq!(frame.sample_median(&bound, NO_SCALE), None);
    }

    #[test]
    fn test_scale_maps_into_half_resolution() {
        let mut data = Array2::zeros((120, 160));
        for y in 50..100 {
            for x in 50..70 {
                data[[y, x]] = 1500;
            }
        }
        let frame = DepthFrame::new(data);

        let bound = ChestBound {
            xmin: 100,
            ymin: 100,
            xmax: 140,
            ymax: 200,
        };

        assert_eq!(frame.sample_median(&bound, (0.5, 0.5)), Some(1500.0));
    }
}
