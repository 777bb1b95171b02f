use mpsnum::{Axis, Vector1D, Vector2D, Vector3D};

#[test]
fn test_add_and_sub_concrete_values() {
    let mut v = Vector1D::zeros(3).unwrap();
    let mut w = Vector1D::zeros(3).unwrap();
    let mut s = Vector1D::zeros(3).unwrap();

    v.as_mut_slice().copy_from_slice(&[1.0, 2.0, 3.0]);
    w.as_mut_slice().copy_from_slice(&[4.0, 5.0, 6.0]);

    Vector1D::add(&v, &w, &mut s, 3).unwrap();
    assert_eq!(s.as_slice(), &[5.0, 7.0, 9.0]);

    Vector1D::sub(&v, &w, &mut s, 3).unwrap();
    assert_eq!(s.as_slice(), &[-3.0, -3.0, -3.0]);
}

#[test]
fn test_mul_and_div_concrete_values() {
    let mut v = Vector1D::zeros(3).unwrap();
    let mut w = Vector1D::zeros(3).unwrap();
    let mut s = Vector1D::zeros(3).unwrap();

    v.as_mut_slice().copy_from_slice(&[1.0, 2.0, 3.0]);
    w.as_mut_slice().copy_from_slice(&[4.0, 5.0, 6.0]);

    Vector1D::mul(&v, &w, &mut s, 3).unwrap();
    assert_eq!(s.as_slice(), &[4.0, 10.0, 18.0]);

    Vector1D::div(&v, &w, &mut s, 3).unwrap();
    assert_eq!(s.as_slice(), &[0.25, 0.4, 0.5]);
}

#[test]
fn test_div_by_zero_is_not_an_error() {
    let mut v = Vector1D::zeros(2).unwrap();
    let w = Vector1D::zeros(2).unwrap(); // all divisors are zero
    let mut s = Vector1D::zeros(2).unwrap();

    v.as_mut_slice().copy_from_slice(&[1.0, 0.0]);

    Vector1D::div(&v, &w, &mut s, 2).unwrap();
    assert_eq!(s.as_slice()[0], f64::INFINITY, "1/0 must give +inf");
    assert!(s.as_slice()[1].is_nan(), "0/0 must give NaN");
}

#[test]
fn test_fresh_vectors_are_zero() {
    let v = Vector3D::zeros(50).unwrap();
    assert!(v.x().iter().all(|&e| e == 0.0));
    assert!(v.y().iter().all(|&e| e == 0.0));
    assert!(v.z().iter().all(|&e| e == 0.0));
}

#[test]
fn test_copy_is_deep_per_component() {
    let mut v = Vector3D::zeros(3).unwrap();
    v.x_mut().copy_from_slice(&[1.0, 2.0, 3.0]);
    v.y_mut().copy_from_slice(&[4.0, 5.0, 6.0]);
    v.z_mut().copy_from_slice(&[7.0, 8.0, 9.0]);

    let mut w = Vector3D::zeros(3).unwrap();
    Vector3D::copy(&v, &mut w).unwrap();
    assert_eq!(w.x(), v.x());
    assert_eq!(w.y(), v.y());
    assert_eq!(w.z(), v.z());

    // mutating the source must not change the copy
    v.x_mut()[0] = -1.0;
    assert_eq!(w.x()[0], 1.0, "copy must not alias the source");
}

#[test]
fn test_copy_rejects_length_mismatch() {
    let v = Vector2D::zeros(3).unwrap();
    let mut w = Vector2D::zeros(4).unwrap();
    assert!(Vector2D::copy(&v, &mut w).is_err());
}

#[test]
fn test_elementwise_ops_cover_all_components() {
    let n = 128;
    let mut v = Vector3D::zeros(n).unwrap();
    let mut w = Vector3D::zeros(n).unwrap();
    let mut s = Vector3D::zeros(n).unwrap();

    for i in 0..n {
        v.x_mut()[i] = i as f64;
        v.y_mut()[i] = 2.0 * i as f64;
        v.z_mut()[i] = 3.0 * i as f64;
        w.x_mut()[i] = 1.0;
        w.y_mut()[i] = 2.0;
        w.z_mut()[i] = 4.0;
    }

    Vector3D::add(&v, &w, &mut s, n).unwrap();
    for i in 0..n {
        assert_eq!(s.x()[i], v.x()[i] + w.x()[i]);
        assert_eq!(s.y()[i], v.y()[i] + w.y()[i]);
        assert_eq!(s.z()[i], v.z()[i] + w.z()[i]);
    }

    Vector3D::mul(&v, &w, &mut s, n).unwrap();
    for i in 0..n {
        assert_eq!(s.z()[i], v.z()[i] * w.z()[i]);
    }
}

#[test]
fn test_parallel_ops_match_sequential() {
    let n = 10_000;
    let mut v = Vector2D::zeros(n).unwrap();
    let mut w = Vector2D::zeros(n).unwrap();

    for i in 0..n {
        v.x_mut()[i] = (i as f64).sin();
        v.y_mut()[i] = (i as f64).cos();
        w.x_mut()[i] = 1.0 + i as f64;
        w.y_mut()[i] = 2.0 + i as f64;
    }

    let mut seq = Vector2D::zeros(n).unwrap();
    let mut par = Vector2D::zeros(n).unwrap();

    Vector2D::div(&v, &w, &mut seq, n).unwrap();
    Vector2D::par_div(&v, &w, &mut par, n).unwrap();

    assert_eq!(seq.x(), par.x());
    assert_eq!(seq.y(), par.y());
}

#[test]
fn test_prefix_count_leaves_the_tail_untouched() {
    let mut v = Vector1D::zeros(4).unwrap();
    let mut w = Vector1D::zeros(4).unwrap();
    let mut s = Vector1D::zeros(4).unwrap();

    v.as_mut_slice().copy_from_slice(&[1.0, 1.0, 1.0, 1.0]);
    w.as_mut_slice().copy_from_slice(&[2.0, 2.0, 2.0, 2.0]);
    s.as_mut_slice().copy_from_slice(&[9.0, 9.0, 9.0, 9.0]);

    Vector1D::add(&v, &w, &mut s, 2).unwrap();
    assert_eq!(s.as_slice(), &[3.0, 3.0, 9.0, 9.0]);
}

#[test]
fn test_release_makes_further_ops_fail() {
    let mut v = Vector3D::zeros(8).unwrap();
    let w = Vector3D::zeros(8).unwrap();
    let mut s = Vector3D::zeros(8).unwrap();

    v.release();
    assert_eq!(v.len(), 0);
    assert!(Vector3D::add(&v, &w, &mut s, 8).is_err(), "arithmetic on a released vector must be rejected");

    v.release(); // second release is a no-op
    assert_eq!(v.len(), 0);
}

#[test]
fn test_transverse_line_format() {
    let mut v = Vector2D::zeros(3).unwrap();
    v.x_mut().copy_from_slice(&[1.0, 2.5, -3.0]);

    let line = v.component_line(Axis::X).unwrap();
    assert_eq!(line, "vector2D::x = {1, 2.5, -3}");

    let line = v.component_line(Axis::Y).unwrap();
    assert_eq!(line, "vector2D::y = {0, 0, 0}");
}
