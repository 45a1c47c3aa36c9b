//! Contact response formulas
//!
//! Scalar, single-axis formulas used by the engine once a collision has been
//! accepted. Normal-axis work happens on the sweep axis; friction acts on the
//! other one.

/// Velocities after an impulse exchange between two dynamic bodies
///
/// `restitution` of 1 is perfectly elastic, 0 perfectly plastic. Momentum
/// `m1 * v1 + m2 * v2` is conserved for any restitution.
pub fn exchange_impulse(mass1: f32, velocity1: f32, mass2: f32, velocity2: f32, restitution: f32) -> (f32, f32) {
    let impulse = -(1.0 + restitution) * (velocity1 - velocity2) / (1.0 / mass1 + 1.0 / mass2);
    (velocity1 + impulse / mass1, velocity2 - impulse / mass2)
}

/// Velocity of a body bouncing off an obstacle that is not pushed back
///
/// The obstacle keeps `obstacle_velocity`; a static obstacle passes zero.
pub fn bounce_off(velocity: f32, obstacle_velocity: f32, bounce: f32) -> f32 {
    obstacle_velocity - bounce * (velocity - obstacle_velocity)
}

/// Combined restitution for two dynamic bodies
pub fn combine_bounce(a: f32, b: f32) -> f32 {
    (a + b) / 2.0
}

/// Combined friction coefficient for a pair of surfaces
pub fn combine_friction(a: f32, b: f32) -> f32 {
    (a * b).max(0.0).sqrt()
}

/// Reduced mass of a pair; `None` stands for an immovable partner
pub fn reduced_mass(mass: f32, other: Option<f32>) -> f32 {
    other.map_or(mass, |other| mass * other / (mass + other))
}

/// Signed tangential impulse to apply to the first body of a pair
///
/// Coulomb friction: the magnitude is bounded by `mu` times the normal impulse
/// and by whatever it takes to cancel `relative_velocity` entirely, so
/// friction never reverses the sliding direction. The second body receives
/// the opposite impulse.
pub fn friction_impulse(mu: f32, normal_impulse: f32, relative_velocity: f32, reduced_mass: f32) -> f32 {
    if relative_velocity == 0.0 {
        return 0.0;
    }
    let limit = mu * normal_impulse.abs();
    let stop = relative_velocity.abs() * reduced_mass;
    -relative_velocity.signum() * limit.min(stop)
}
