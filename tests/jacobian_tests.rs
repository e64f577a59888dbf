use approx::assert_relative_eq;
use manifolds::algorithms::{jacobian, numerical_gradient};
use manifolds::manifolds::{Point2, Pose2};
use ndarray::arr2;

// =========================================================================
// TEST 1: Difference of two points in a sequence
// =========================================================================

#[test]
fn test_point_difference_jacobian() {
    let pts = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 2.0),
        Point2::new(-3.0, 0.5),
    ];

    let j = jacobian(|pts: &Vec<Point2>| pts[1] - pts[0], &pts, 1e-6).unwrap();

    let expected = arr2(&[
        [-1.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        [0.0, -1.0, 0.0, 1.0, 0.0, 0.0],
    ]);
    assert_eq!(j.dim(), (2, 6));
    for (a, b) in j.iter().zip(expected.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-8);
    }
}

// =========================================================================
// TEST 2: Transforming a fixed point by a pose
// =========================================================================

fn transform(pose: &Pose2, q: Point2) -> Point2 {
    let (s, c) = pose.rot.sin_cos();
    Point2::new(c * q.x - s * q.y + pose.t.x, s * q.x + c * q.y + pose.t.y)
}

#[test]
fn test_pose_transform_jacobian() {
    let q = Point2::new(2.0, -1.0);
    let pose = Pose2::new(0.5, 0.25, 0.4);

    let j = jacobian(|p: &Pose2| transform(p, q), &pose, 1e-6).unwrap();

    let (s, c) = 0.4_f64.sin_cos();
    let expected = arr2(&[
        [1.0, 0.0, -s * q.x - c * q.y],
        [0.0, 1.0, c * q.x - s * q.y],
    ]);
    assert_eq!(j.dim(), (2, 3));
    for (a, b) in j.iter().zip(expected.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-6);
    }
}

#[test]
fn test_identity_jacobian_on_scalar_output() {
    let j = jacobian(|p: &Pose2| p.rot, &Pose2::new(1.0, 1.0, 1.0), 1e-6).unwrap();

    assert_eq!(j.dim(), (1, 3));
    assert_relative_eq!(j[[0, 0]], 0.0, epsilon = 1e-10);
    assert_relative_eq!(j[[0, 1]], 0.0, epsilon = 1e-10);
    assert_relative_eq!(j[[0, 2]], 1.0, epsilon = 1e-8);
}

// =========================================================================
// TEST 3: Numerical gradient against a hand-written one
// =========================================================================

#[test]
fn test_pose_chain_gradient() {
    // Sum of squared distances between consecutive pose translations
    let objective = |poses: &Vec<Pose2>| {
        poses
            .windows(2)
            .map(|w| {
                let d = w[1].t - w[0].t;
                d.x * d.x + d.y * d.y
            })
            .sum::<f64>()
    };

    let poses = vec![
        Pose2::new(0.0, 0.0, 0.1),
        Pose2::new(1.0, 0.5, 0.2),
        Pose2::new(1.5, 2.0, -0.3),
    ];

    let g = numerical_gradient(&objective, &poses, 1e-6).unwrap();

    let d01 = poses[1].t - poses[0].t;
    let d12 = poses[2].t - poses[1].t;
    let expected = [
        (-2.0 * d01.x, -2.0 * d01.y),
        (2.0 * d01.x - 2.0 * d12.x, 2.0 * d01.y - 2.0 * d12.y),
        (2.0 * d12.x, 2.0 * d12.y),
    ];

    assert_eq!(g.len(), 3);
    for (gi, (ex, ey)) in g.iter().zip(expected) {
        assert_relative_eq!(gi.t.x, ex, epsilon = 1e-6);
        assert_relative_eq!(gi.t.y, ey, epsilon = 1e-6);
        assert_relative_eq!(gi.rot, 0.0, epsilon = 1e-10);
    }
}
