//! Golden-angle ("Fibonacci") sphere layout.
//!
//! Every poster index maps to one point on a sphere whose radius grows with
//! the number of posters. The whole set is a pure function of the count, so
//! it is recomputed, never patched, whenever the item list changes length:
//! each index's height depends on the total.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Sphere radius as a function of the number of items placed on it:
/// `sqrt(count) * scale + base`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusPolicy {
    /// Growth per square-root item. Sub-linear so hundreds of posters stay in frame.
    pub scale: f32,
    /// Radius of a near-empty galaxy; keeps a handful of posters from crowding the camera.
    pub base: f32,
}

impl Default for RadiusPolicy {
    fn default() -> Self {
        Self {
            scale: 2.8,
            base: 8.0,
        }
    }
}

impl RadiusPolicy {
    pub const fn new(scale: f32, base: f32) -> Self {
        Self { scale, base }
    }

    pub fn radius(&self, count: usize) -> f32 {
        ((count as f64).sqrt() * f64::from(self.scale) + f64::from(self.base))
            as f32
    }

    /// Finite, non-decreasing in count, and never collapsing to the origin.
    pub fn is_valid(&self) -> bool {
        self.scale.is_finite()
            && self.base.is_finite()
            && self.scale >= 0.0
            && self.base > 0.0
    }
}

/// Maps item counts to evenly spread points on a sphere.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SphereLayoutEngine {
    policy: RadiusPolicy,
}

impl SphereLayoutEngine {
    pub fn new(policy: RadiusPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RadiusPolicy {
        self.policy
    }

    pub fn radius_for(&self, count: usize) -> f32 {
        self.policy.radius(count)
    }

    /// Positions for `count` items; `positions[i]` belongs to item `i`.
    pub fn layout(&self, count: usize) -> Vec<Vec3> {
        layout_with(count, |n| self.policy.radius(n))
    }

    pub fn layout_for<T>(&self, items: &[T]) -> Vec<Vec3> {
        self.layout(items.len())
    }
}

/// Golden-angle spiral with a caller supplied radius function.
///
/// `y` runs linearly from `+1` (index 0) to `-1` (last index). A single item
/// sits at the north pole, `(0, radius, 0)`.
pub fn layout_with<F>(count: usize, radius_fn: F) -> Vec<Vec3>
where
    F: Fn(usize) -> f32,
{
    if count == 0 {
        return Vec::new();
    }

    let radius = f64::from(radius_fn(count));
    if count == 1 {
        return vec![Vec3::new(0.0, radius as f32, 0.0)];
    }

    let golden_angle = PI * (3.0 - 5f64.sqrt());
    let last = (count - 1) as f64;

    (0..count)
        .map(|i| {
            let i = i as f64;
            let y = 1.0 - (i / last) * 2.0;
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i;
            Vec3::new(
                (theta.cos() * ring * radius) as f32,
                (y * radius) as f32,
                (theta.sin() * ring * radius) as f32,
            )
        })
        .collect()
}
