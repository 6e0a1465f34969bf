//! Geometrical helpers for rotation axes and angles.

use std::f64::consts::PI;

use nalgebra::Vector3;

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod geometry_tests;

/// Returns the rotation angle adjusted to be in the interval $`(-\pi, +\pi]`$ and the number of
/// $`2\pi`$-folds required to bring the original angle to that interval.
///
/// # Arguments
///
/// * `rot_ang` - A rotation angle.
/// * `thresh` - A threshold for comparisons at the interval ends.
///
/// # Returns
///
/// The normalised rotation angle and the signed number of folds removed.
#[must_use]
pub fn normalise_rotation_angle(rot_ang: f64, thresh: f64) -> (f64, i64) {
    if !rot_ang.is_finite() {
        return (rot_ang, 0);
    }
    let mut norm_rot_ang = rot_ang.rem_euclid(2.0 * PI);
    #[allow(clippy::cast_possible_truncation)]
    let mut folds = ((rot_ang - norm_rot_ang) / (2.0 * PI)).round() as i64;
    if norm_rot_ang > PI + thresh {
        norm_rot_ang -= 2.0 * PI;
        folds += 1;
    }
    (norm_rot_ang, folds)
}

/// Returns the positive pole of a rotation axis.
///
/// The positive pole is the one of $`\pm\hat{\mathbf{n}}`$ with a positive $`z`$-component, or,
/// if that vanishes, a positive $`x`$-component, or, if that also vanishes, a positive
/// $`y`$-component. See S.L. Altmann, Rotations, Quaternions, and Double Groups (Dover
/// Publications, Inc., New York, 2005) (Chapter 9).
///
/// # Arguments
///
/// * `axis` - An axis of rotation.
/// * `thresh` - Threshold below which a component is considered to vanish.
///
/// # Returns
///
/// The positive pole of `axis`.
#[must_use]
pub fn get_positive_pole(axis: &Vector3<f64>, thresh: f64) -> Vector3<f64> {
    let mut pole = *axis;
    if pole[2].abs() > thresh {
        pole *= pole[2].signum();
    } else if pole[0].abs() > thresh {
        pole *= pole[0].signum();
    } else if pole[1].abs() > thresh {
        pole *= pole[1].signum();
    }
    pole
}

/// Returns the angle in $`[0, \pi)`$ that the projection of a line onto the $`xy`$-plane makes with
/// the $`x`$-axis. Since a line has no direction, $`\hat{\mathbf{n}}`$ and $`-\hat{\mathbf{n}}`$ give
/// the same result.
#[must_use]
pub fn get_line_azimuth(axis: &Vector3<f64>) -> f64 {
    let azimuth = axis[1].atan2(axis[0]).rem_euclid(PI);
    // `rem_euclid` can round up to exactly π for tiny negative inputs.
    if azimuth >= PI {
        0.0
    } else {
        azimuth
    }
}
