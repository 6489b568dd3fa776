//! Coordinate sampling.
//!
//! Draws uniformly distributed points inside a [`BoundingRegion`]. The RNG
//! is injected, so production uses an entropy-seeded generator while tests
//! seed a [`rand::rngs::StdRng`] for reproducible output.

use rand::Rng;

use crate::coord::{BoundingRegion, GeoPoint};

/// Sample a point uniformly inside the region.
///
/// Each axis is drawn independently from `[center - range, center + range]`
/// and the result is rounded to 6 decimal places.
pub fn sample_point<R: Rng>(rng: &mut R, region: &BoundingRegion) -> GeoPoint {
    let range = region.range_deg;
    let latitude = region.center.latitude + rng.random_range(-range..=range);
    let longitude = region.center.longitude + rng.random_range(-range..=range);

    GeoPoint::new(latitude, longitude).rounded()
}
