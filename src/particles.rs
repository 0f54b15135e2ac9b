//! The smoke field: a fixed list of flat sprites that slowly spin.

use glam::{Mat4, Quat, Vec3};
use rand::Rng;

use crate::config::ParticleConfig;

/// One smoke sprite. Geometry and material are shared by the whole field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Rotation about the sprite's normal (z), in radians.
    pub rotation_z: f32,
}

impl Particle {
    /// Model matrix for a unit quad scaled to `size`.
    pub fn model_matrix(&self, size: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::new(size, size, 1.0),
            Quat::from_rotation_z(self.rotation_z),
            self.position,
        )
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    plane_size: f32,
}

impl ParticleField {
    /// Place `config.count` sprites uniformly inside the configured bounds.
    pub fn spawn<R: Rng>(config: &ParticleConfig, rng: &mut R) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle {
                position: Vec3::new(
                    rng.random_range(config.x.clone()),
                    rng.random_range(config.y.clone()),
                    rng.random_range(config.z.clone()),
                ),
                rotation_z: rng.random_range(config.rotation.clone()),
            })
            .collect();
        log::debug!("spawned {} smoke particles", config.count);
        Self {
            particles,
            plane_size: config.plane_size,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn plane_size(&self) -> f32 {
        self.plane_size
    }

    /// Spin every sprite by `step` radians. No wraparound is applied.
    pub fn advance(&mut self, step: f32) {
        for p in &mut self.particles {
            p.rotation_z += step;
        }
    }

    /// Indices ordered far-to-near along the camera's view direction, the
    /// order transparent sprites must be drawn in.
    pub fn back_to_front(&self, view: &Mat4) -> Vec<usize> {
        let depth: Vec<f32> = self
            .particles
            .iter()
            .map(|p| view.transform_point3(p.position).z)
            .collect();
        let mut order: Vec<usize> = (0..self.particles.len()).collect();
        order.sort_by(|&a, &b| depth[a].total_cmp(&depth[b]));
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn spawns_exact_count() {
        let mut rng = SmallRng::seed_from_u64(1);
        let field = ParticleField::spawn(&ParticleConfig::default(), &mut rng);
        assert_eq!(field.len(), 150);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = ParticleConfig::default();
        let a = ParticleField::spawn(&config, &mut SmallRng::seed_from_u64(9));
        let b = ParticleField::spawn(&config, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn back_to_front_puts_farthest_first() {
        let mut field = ParticleField::spawn(
            &ParticleConfig { count: 3, ..Default::default() },
            &mut SmallRng::seed_from_u64(3),
        );
        field.particles[0].position = Vec3::new(0.0, 0.0, 100.0);
        field.particles[1].position = Vec3::new(0.0, 0.0, -50.0);
        field.particles[2].position = Vec3::new(0.0, 0.0, 300.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 400.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(field.back_to_front(&view), vec![1, 0, 2]);
    }
}
