use lu_core::generators::{
    diagonally_dominant, ramp_vector, random_diagonally_dominant, random_vector,
};
use lu_solver::{
    factorize_in_place, factorize_partial_pivot_in_place, norm_inf, residual_norm_inf,
    solve_packed, DenseMatrix, FactorizeAlgorithm, LuCoreError, LuSolve, Matrix, NoPivotLu,
    PartialPivotLu, PivotTolerance,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Helper for float comparison in tests
fn assert_approx_eq_vec(a: &[f64], b: &[f64], tolerance: f64) {
    assert_eq!(a.len(), b.len(), "Vector lengths differ");
    for i in 0..a.len() {
        let diff = (a[i] - b[i]).abs();
        assert!(
            diff <= tolerance,
            "Verification failed at index {}: expected {}, got {}, diff {}",
            i,
            b[i],
            a[i],
            diff
        );
    }
}

/// Straight transcription of the textbook loop nest: row outer, column inner.
fn reference_factorize(a: &mut [f64], n: usize) {
    for d in 0..n - 1 {
        for r in d + 1..n {
            a[r + d * n] /= a[d + d * n];
            for c in d + 1..n {
                a[r + c * n] -= a[r + d * n] * a[d + c * n];
            }
        }
    }
}

fn example_system() -> (DenseMatrix<f64>, Vec<f64>) {
    let a = DenseMatrix::from_rows(&[
        vec![4.0, 1.0, 1.0],
        vec![1.0, 3.0, 1.0],
        vec![1.0, 1.0, 2.0],
    ])
    .unwrap();
    (a, vec![6.0, 5.0, 4.0])
}

#[test]
fn test_solve_small_dominant_system() -> Result<(), LuCoreError> {
    init_logging();
    let (a, b) = example_system();

    let factors = NoPivotLu::default().factorize(a.clone())?;
    let x = factors.solve(&b)?;

    assert_approx_eq_vec(&x, &[1.0, 1.0, 1.0], 1e-12);
    assert_approx_eq_vec(&a.mul_vec(&x)?, &b, 1e-9);
    Ok(())
}

#[test]
fn test_packed_layout_of_small_system() -> Result<(), LuCoreError> {
    let (a, _) = example_system();
    let factors = NoPivotLu::new().factorize(a)?;

    // Column 0 multipliers are A[r,0] / 4.
    assert_eq!(factors.packed()[1], 0.25);
    assert_eq!(factors.packed()[2], 0.25);
    // U's first row is A's first row.
    assert_eq!(factors.packed()[0], 4.0);
    assert_eq!(factors.packed()[3], 1.0);
    assert_eq!(factors.packed()[6], 1.0);
    // Second pivot: 3 - 0.25 * 1.
    assert_eq!(factors.packed()[4], 2.75);

    let lower = factors.lower();
    let upper = factors.upper();
    for i in 0..3 {
        assert_eq!(lower[(i, i)], 1.0);
        for j in 0..i {
            assert_eq!(upper[(i, j)], 0.0);
            assert_eq!(lower[(j, i)], 0.0);
        }
    }
    let diagonal_min = (0..3).map(|i| upper[(i, i)].abs()).fold(f64::INFINITY, f64::min);
    assert_eq!(factors.min_pivot(), diagonal_min);
    Ok(())
}

#[test]
fn test_scale_scenario_residual() -> Result<(), LuCoreError> {
    init_logging();
    let n = 128;
    let a = diagonally_dominant::<f64>(n);
    let b = ramp_vector::<f64>(n);

    let factors = NoPivotLu::new().factorize(a.clone())?;
    let x = factors.solve(&b)?;

    let residual = residual_norm_inf(&a, &x, &b)?;
    assert!(residual < 1e-6, "residual {} too large", residual);
    Ok(())
}

#[test]
fn test_reconstruction_matches_original() -> Result<(), LuCoreError> {
    let mut rng = fastrand::Rng::with_seed(42);
    let mut inputs = vec![diagonally_dominant::<f64>(128)];
    for n in [1, 2, 5, 17, 40] {
        inputs.push(random_diagonally_dominant::<f64>(n, &mut rng));
    }

    for a in inputs {
        let n = a.rows() as f64;
        let tolerance = 10.0 * n * f64::EPSILON * a.norm_inf();
        let factors = NoPivotLu::new().factorize(a.clone())?;
        let diff = factors.reconstruct()?.max_abs_diff(&a)?;
        assert!(
            diff <= tolerance,
            "n = {}: reconstruction error {} exceeds {}",
            n,
            diff,
            tolerance
        );
    }
    Ok(())
}

#[test]
fn test_random_dominant_systems_solve() -> Result<(), LuCoreError> {
    let mut rng = fastrand::Rng::with_seed(2024);
    for n in [1, 3, 8, 33, 64] {
        let a = random_diagonally_dominant::<f64>(n, &mut rng);
        let b = random_vector::<f64>(n, &mut rng);
        let x = NoPivotLu::new().factorize(a.clone())?.solve(&b)?;

        let tolerance = 20.0 * n as f64 * f64::EPSILON * a.norm_inf() * norm_inf(&x).max(1.0);
        let residual = residual_norm_inf(&a, &x, &b)?;
        assert!(residual <= tolerance, "n = {}: residual {} exceeds {}", n, residual, tolerance);
    }
    Ok(())
}

#[test]
fn test_column_walk_matches_textbook_loop_order() -> Result<(), LuCoreError> {
    let mut rng = fastrand::Rng::with_seed(9);
    let n = 24;
    let a = random_diagonally_dominant::<f64>(n, &mut rng);

    let mut expected = a.data().to_vec();
    reference_factorize(&mut expected, n);

    let factors = NoPivotLu::with_params(PivotTolerance::Unchecked).factorize(a)?;
    let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(factors.packed()), bits(&expected));
    Ok(())
}

#[test]
fn test_resolve_is_bit_identical() -> Result<(), LuCoreError> {
    let n = 50;
    let factors = NoPivotLu::new().factorize(diagonally_dominant::<f64>(n))?;
    let snapshot = factors.clone();
    let b = ramp_vector::<f64>(n);

    let first = factors.solve(&b)?;
    let mut second = vec![0.0; n];
    factors.solve_into(&b, &mut second)?;

    let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(factors, snapshot);
    Ok(())
}

#[test]
fn test_dimension_guards() {
    let empty = DenseMatrix::<f64>::zeros(0, 0);
    assert!(matches!(
        NoPivotLu::new().factorize(empty.clone()),
        Err(LuCoreError::InvalidDimensions(_))
    ));
    assert!(matches!(
        PartialPivotLu::new().factorize(empty),
        Err(LuCoreError::InvalidDimensions(_))
    ));

    let rectangular = DenseMatrix::<f64>::zeros(2, 3);
    match NoPivotLu::new().factorize(rectangular) {
        Err(LuCoreError::InvalidDimensions(msg)) => assert!(msg.contains("must be square")),
        other => panic!("Expected InvalidDimensions error, got {:?}", other),
    }

    let (a, _) = example_system();
    let factors = NoPivotLu::new().factorize(a).unwrap();
    assert!(matches!(
        factors.solve(&[1.0, 2.0]),
        Err(LuCoreError::InvalidDimensions(_))
    ));
    let mut short_x = vec![0.0; 2];
    assert!(matches!(
        factors.solve_into(&[1.0, 2.0, 3.0], &mut short_x),
        Err(LuCoreError::InvalidDimensions(_))
    ));

    let mut storage: Vec<f64> = vec![];
    assert!(matches!(
        factorize_in_place(&mut storage, 0, None),
        Err(LuCoreError::InvalidDimensions(_))
    ));
    let mut storage = vec![1.0; 5];
    assert!(matches!(
        factorize_in_place(&mut storage, 2, None),
        Err(LuCoreError::InvalidDimensions(_))
    ));
    let mut x = vec![0.0; 2];
    assert!(matches!(
        solve_packed(&[1.0, 0.0, 0.0, 1.0], 2, &[1.0], &mut x, None),
        Err(LuCoreError::InvalidDimensions(_))
    ));
}

#[test]
fn test_zero_leading_pivot_is_singular() {
    init_logging();
    let a = DenseMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();

    for tolerance in [PivotTolerance::default(), PivotTolerance::Exact] {
        match NoPivotLu::with_params(tolerance).factorize(a.clone()) {
            Err(LuCoreError::SingularMatrix { step, pivot, .. }) => {
                assert_eq!(step, 0);
                assert_eq!(pivot, 0.0);
            }
            other => panic!("Expected SingularMatrix error, got {:?}", other),
        }
    }
}

#[test]
fn test_zero_trailing_pivot_is_singular() {
    let a = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
    match NoPivotLu::new().factorize(a) {
        Err(LuCoreError::SingularMatrix { step, .. }) => assert_eq!(step, 1),
        other => panic!("Expected SingularMatrix error, got {:?}", other),
    }
}

#[test]
fn test_absolute_tolerance_rejects_small_pivot() {
    let a = DenseMatrix::from_rows(&[vec![1e-4, 1.0], vec![1.0, 1.0]]).unwrap();

    let strict = NoPivotLu::with_params(PivotTolerance::Absolute(1e-3));
    match strict.factorize(a.clone()) {
        Err(LuCoreError::SingularMatrix {
            step, threshold, ..
        }) => {
            assert_eq!(step, 0);
            assert_eq!(threshold, 1e-3);
        }
        other => panic!("Expected SingularMatrix error, got {:?}", other),
    }

    assert!(NoPivotLu::with_params(PivotTolerance::Exact)
        .factorize(a)
        .is_ok());
}

#[test]
fn test_unchecked_propagates_non_finite_values() -> Result<(), LuCoreError> {
    init_logging();
    let a = DenseMatrix::<f64>::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]])?;

    let factors = NoPivotLu::with_params(PivotTolerance::Unchecked).factorize(a)?;
    assert_eq!(factors.threshold(), None);

    let x = factors.solve(&[2.0, 3.0])?;
    assert!(x.iter().any(|v| !v.is_finite()), "expected inf/NaN, got {:?}", x);
    Ok(())
}

#[test]
fn test_backward_substitution_checks_pivots() {
    // Packed [[1, 0], [0, 0]]: factorization was skipped, U[1,1] is zero.
    let packed = [1.0, 0.0, 0.0, 0.0];
    let mut x = vec![0.0; 2];
    match solve_packed(&packed, 2, &[1.0, 1.0], &mut x, Some(0.0)) {
        Err(LuCoreError::SingularMatrix { step, .. }) => assert_eq!(step, 1),
        other => panic!("Expected SingularMatrix error, got {:?}", other),
    }
}

#[test]
fn test_partial_pivot_solves_permutation_matrix() -> Result<(), LuCoreError> {
    let a = DenseMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]])?;

    let factors = PartialPivotLu::new().factorize(a)?;
    assert_eq!(factors.permutation().as_slice(), &[1, 0]);

    let x = factors.solve(&[2.0, 3.0])?;
    assert_approx_eq_vec(&x, &[3.0, 2.0], 0.0);
    Ok(())
}

#[test]
fn test_partial_pivot_reconstructs_permuted_matrix() -> Result<(), LuCoreError> {
    let mut rng = fastrand::Rng::with_seed(77);
    let n = 30;
    let a = DenseMatrix::from_fn(n, n, |_, _| rng.f64() * 2.0 - 1.0);
    let b = random_vector::<f64>(n, &mut rng);

    let factors = PartialPivotLu::new().factorize(a.clone())?;
    let pa = factors.permutation().permute_rows(&a)?;
    let diff = factors.reconstruct()?.max_abs_diff(&pa)?;
    assert!(diff <= 1e-12, "reconstruction error {}", diff);

    // Multipliers never exceed one in magnitude.
    let lower = factors.factors().lower();
    assert!(lower.data().iter().all(|m| m.abs() <= 1.0));

    let x = factors.solve(&b)?;
    let tolerance = 100.0 * n as f64 * f64::EPSILON * a.norm_inf() * norm_inf(&x).max(1.0);
    assert!(residual_norm_inf(&a, &x, &b)? <= tolerance);
    Ok(())
}

#[test]
fn test_partial_pivot_agrees_on_dominant_input() -> Result<(), LuCoreError> {
    let a = diagonally_dominant::<f64>(32);

    let plain = NoPivotLu::new().factorize(a.clone())?;
    let pivoted = PartialPivotLu::new().factorize(a)?;

    assert_eq!(pivoted.permutation().as_slice(), (0..32).collect::<Vec<_>>().as_slice());
    assert_eq!(pivoted.factors(), &plain);
    Ok(())
}

#[test]
fn test_single_precision() -> Result<(), LuCoreError> {
    let a = DenseMatrix::<f32>::from_rows(&[
        vec![4.0, 1.0, 1.0],
        vec![1.0, 3.0, 1.0],
        vec![1.0, 1.0, 2.0],
    ])?;
    let x = lu_solver::solve_dense(a, &[6.0, 5.0, 4.0])?;
    for xi in x {
        assert!((xi - 1.0).abs() < 1e-5);
    }
    Ok(())
}

#[test]
fn test_solve_dense_helper() -> Result<(), LuCoreError> {
    let (a, b) = example_system();
    let x = lu_solver::solve_dense(a, &b)?;
    assert_approx_eq_vec(&x, &[1.0, 1.0, 1.0], 1e-12);
    Ok(())
}

#[test]
fn test_algorithm_config_from_json() {
    let default: NoPivotLu = serde_json::from_str("{}").unwrap();
    assert_eq!(default, NoPivotLu::default());
    assert_eq!(default.pivot_tolerance, PivotTolerance::EpsilonScaled(1.0));

    let absolute: NoPivotLu =
        serde_json::from_str(r#"{"pivot_tolerance":{"Absolute":0.001}}"#).unwrap();
    assert_eq!(absolute.pivot_tolerance, PivotTolerance::Absolute(1e-3));

    let unchecked: PartialPivotLu =
        serde_json::from_str(r#"{"pivot_tolerance":"Unchecked"}"#).unwrap();
    assert_eq!(unchecked, PartialPivotLu::with_params(PivotTolerance::Unchecked));
}

#[test]
fn test_partial_pivot_kernel_in_place() {
    // Column-major [[1, 2], [3, 4]]
    let mut a: Vec<f64> = vec![1.0, 3.0, 2.0, 4.0];
    let mut perm = vec![0; 2];
    let min_pivot = factorize_partial_pivot_in_place(&mut a, 2, &mut perm, Some(0.0)).unwrap();

    assert_eq!(perm, vec![1, 0]);
    // P·A = [[3, 4], [1, 2]] = [[1, 0], [1/3, 1]] · [[3, 4], [0, 2 - 4/3]]
    assert_eq!(a[0], 3.0);
    assert_eq!(a[1], 1.0 / 3.0);
    assert_eq!(a[2], 4.0);
    assert_eq!(a[3], 2.0 - (1.0 / 3.0) * 4.0);
    assert_eq!(min_pivot, a[3].abs());

    let mut short_perm = vec![0; 1];
    assert!(matches!(
        factorize_partial_pivot_in_place(&mut a, 2, &mut short_perm, None),
        Err(LuCoreError::InvalidDimensions(_))
    ));
}

#[test]
fn test_overflowing_dimensions_are_rejected() {
    // n * n does not fit in usize.
    let n = 1usize << (usize::BITS / 2);

    let mut storage: Vec<f64> = vec![];
    assert!(matches!(
        factorize_in_place(&mut storage, n, None),
        Err(LuCoreError::InvalidDimensions(_))
    ));

    let mut perm = vec![];
    assert!(matches!(
        factorize_partial_pivot_in_place(&mut storage, n, &mut perm, None),
        Err(LuCoreError::InvalidDimensions(_))
    ));

    let mut x: Vec<f64> = vec![];
    assert!(matches!(
        solve_packed(&[], n, &[], &mut x, None),
        Err(LuCoreError::InvalidDimensions(_))
    ));

    assert!(matches!(
        DenseMatrix::<f64>::new(n, n, vec![]),
        Err(LuCoreError::InvalidDimensions(_))
    ));
}

#[test]
fn test_default_threshold_survives_huge_entries() -> Result<(), LuCoreError> {
    // ‖A‖∞ = 2e308 overflows to inf; the threshold must stay finite.
    let a = DenseMatrix::<f64>::from_rows(&[vec![1e308, 1e308], vec![0.0, 1e308]])?;

    let threshold = PivotTolerance::default().threshold_for(&a).unwrap();
    assert!(threshold.is_finite());
    assert!(threshold > 0.0 && threshold < 1e300);

    let factors = NoPivotLu::new().factorize(a)?;
    assert_eq!(factors.min_pivot(), 1e308);

    let pivoted = PartialPivotLu::new().factorize(DenseMatrix::from_rows(&[
        vec![1e308, 1e308],
        vec![0.0, 1e308],
    ])?)?;
    assert_eq!(pivoted.factors(), &factors);
    Ok(())
}

#[test]
fn test_default_threshold_without_finite_scale() -> Result<(), LuCoreError> {
    let with_inf = DenseMatrix::from_rows(&[vec![f64::INFINITY, 0.0], vec![0.0, 1.0]])?;
    assert_eq!(PivotTolerance::default().threshold_for(&with_inf), Some(0.0));

    let zero = DenseMatrix::<f64>::zeros(2, 2);
    assert_eq!(PivotTolerance::default().threshold_for(&zero), Some(0.0));
    assert!(matches!(
        NoPivotLu::new().factorize(zero),
        Err(LuCoreError::SingularMatrix { step: 0, .. })
    ));
    Ok(())
}

#[test]
fn test_unchecked_nan_pivot_is_reported() -> Result<(), LuCoreError> {
    init_logging();
    // Zero leading pivot over a zero column: 0/0 makes the second pivot NaN.
    let a = DenseMatrix::<f64>::from_rows(&[vec![0.0, 0.0], vec![0.0, 1.0]])?;
    let unchecked = PivotTolerance::Unchecked;

    let plain = NoPivotLu::with_params(unchecked).factorize(a.clone())?;
    assert!(plain.min_pivot().is_nan());
    assert!(plain.has_degenerate_pivot());

    let pivoted = PartialPivotLu::with_params(unchecked).factorize(a)?;
    assert!(pivoted.factors().min_pivot().is_nan());
    assert!(pivoted.factors().has_degenerate_pivot());

    let healthy = NoPivotLu::with_params(unchecked).factorize(diagonally_dominant::<f64>(4))?;
    assert!(!healthy.has_degenerate_pivot());
    assert!(healthy.min_pivot().is_finite());
    Ok(())
}
