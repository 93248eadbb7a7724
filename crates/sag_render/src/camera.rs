use glam::{Mat4, Vec2};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Screen-space camera: world units are canvas pixels, origin at the top-left
/// corner, y growing downward.
pub struct Camera2D {
    pub position: Vec2,
    pub viewport: (u32, u32),
}

impl Camera2D {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let w = self.viewport.0 as f32;
        let h = self.viewport.1 as f32;
        Mat4::orthographic_rh(
            self.position.x,
            self.position.x + w,
            self.position.y + h,
            self.position.y,
            -1.0,
            1.0,
        )
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn project(camera: &Camera2D, x: f32, y: f32) -> Vec2 {
        let clip = camera.view_proj() * Vec4::new(x, y, 0.0, 1.0);
        Vec2::new(clip.x / clip.w, clip.y / clip.w)
    }

    #[test]
    fn top_left_maps_to_upper_left_clip_corner() {
        let camera = Camera2D::new(512, 512);
        let p = project(&camera, 0.0, 0.0);
        assert!((p.x + 1.0).abs() < 1e-5);
        assert!((p.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn bottom_right_maps_to_lower_right_clip_corner() {
        let camera = Camera2D::new(512, 512);
        let p = project(&camera, 512.0, 512.0);
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn canvas_center_maps_to_origin() {
        let camera = Camera2D::new(512, 512);
        let p = project(&camera, 256.0, 256.0);
        assert!(p.x.abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
    }
}
