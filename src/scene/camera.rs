use crate::foundation::core::{Affine, ContainerSize, Point, Size};

/// Orthographic projection of a world-space rectangle onto normalized device coordinates.
///
/// World space is y-up and centred on the container; NDC spans `[-1, 1]` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoCamera {
    /// World x mapped to NDC -1.
    pub left: f64,
    /// World x mapped to NDC +1.
    pub right: f64,
    /// World y mapped to NDC +1.
    pub top: f64,
    /// World y mapped to NDC -1.
    pub bottom: f64,
    projection: Affine,
}

impl OrthoCamera {
    /// Camera with explicit bounds. The projection is computed immediately.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        let mut cam = Self {
            left,
            right,
            top,
            bottom,
            projection: Affine::IDENTITY,
        };
        cam.update_projection();
        cam
    }

    /// Camera framing a container centred on the world origin.
    pub fn for_container(container: ContainerSize) -> Self {
        let (hw, hh) = (container.width / 2.0, container.height / 2.0);
        Self::new(-hw, hw, hh, -hh)
    }

    /// Re-frame the camera on a resized container and recompute the projection.
    pub fn fit_container(&mut self, container: ContainerSize) {
        let (hw, hh) = (container.width / 2.0, container.height / 2.0);
        self.left = -hw;
        self.right = hw;
        self.top = hh;
        self.bottom = -hh;
        self.update_projection();
    }

    /// Recompute the cached projection from the current bounds.
    ///
    /// Degenerate bounds leave the previous projection in place.
    pub fn update_projection(&mut self) {
        let w = self.right - self.left;
        let h = self.top - self.bottom;
        if !(w.is_finite() && h.is_finite()) || w == 0.0 || h == 0.0 {
            return;
        }
        self.projection = Affine::new([
            2.0 / w,
            0.0,
            0.0,
            2.0 / h,
            -(self.right + self.left) / w,
            -(self.top + self.bottom) / h,
        ]);
    }

    /// World → NDC transform.
    pub fn projection(&self) -> Affine {
        self.projection
    }

    /// World → surface pixel transform for a surface of `size` (pixel y grows downwards).
    pub fn world_to_pixel(&self, size: Size) -> Affine {
        let (hw, hh) = (f64::from(size.width) / 2.0, f64::from(size.height) / 2.0);
        let viewport = Affine::new([hw, 0.0, 0.0, -hh, hw, hh]);
        viewport * self.projection
    }

    /// Surface pixel → world transform, the inverse of [`OrthoCamera::world_to_pixel`].
    pub fn pixel_to_world(&self, size: Size) -> Affine {
        self.world_to_pixel(size).inverse()
    }

    /// World position seen at the centre of pixel `(x, y)`.
    pub fn unproject_pixel_centre(&self, size: Size, x: u32, y: u32) -> Point {
        self.pixel_to_world(size) * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
