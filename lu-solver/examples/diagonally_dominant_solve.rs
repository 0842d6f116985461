use lu_core::generators::{diagonally_dominant, ramp_vector};
use lu_solver::{
    residual_norm_inf, DenseMatrix, FactorizeAlgorithm, LuSolve, Matrix, NoPivotLu,
};
use std::time::Instant;

const PRINT_LIMIT: usize = 8;
const PROFILE_ITERATIONS: u32 = 100;

fn log_matrix(a: &DenseMatrix<f64>) {
    if a.rows() > PRINT_LIMIT {
        log::info!("Matrix too large to print (n={})", a.rows());
        return;
    }
    for r in 0..a.rows() {
        let row: Vec<String> = (0..a.cols()).map(|c| format!("{:8.3}", a[(r, c)])).collect();
        log::info!("{}", row.join(" "));
    }
}

fn log_vector(v: &[f64]) {
    if v.len() > PRINT_LIMIT {
        log::info!("Vector too large to print (n={})", v.len());
        return;
    }
    for value in v {
        log::info!("{:8.3}", value);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging based on RUST_LOG environment variable
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let n = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<usize>())
        .transpose()?
        .unwrap_or(128);

    log::info!("LU Factorization and Solve Demo (n={})", n);

    let a = diagonally_dominant::<f64>(n);
    let b = ramp_vector::<f64>(n);

    log::info!("Original matrix A:");
    log_matrix(&a);
    log::info!("Right-hand side vector b:");
    log_vector(&b);

    let algorithm = NoPivotLu::new();

    let start = Instant::now();
    let factors = algorithm.factorize(a.clone())?;
    let mid = Instant::now();
    let x = factors.solve(&b)?;
    let end = Instant::now();

    log::info!("Solution vector x:");
    log_vector(&x);

    log::info!("Performance Results:");
    log::info!("  LU Factorization time: {:?}", mid - start);
    log::info!("  System solve time:     {:?}", end - mid);
    log::info!("  Total time:            {:?}", end - start);
    log::info!("  Smallest pivot:        {:.6e}", factors.min_pivot());
    log::info!("  Residual ||Ax - b||:   {:.6e}", residual_norm_inf(&a, &x, &b)?);

    log::info!("Running {} iterations for profiling...", PROFILE_ITERATIONS);
    let start = Instant::now();
    for _ in 0..PROFILE_ITERATIONS {
        // Regenerate each time: factorization consumes the matrix.
        let factors = algorithm.factorize(diagonally_dominant::<f64>(n))?;
        factors.solve(&b)?;
    }
    log::info!(
        "Average time per iteration: {:?}",
        start.elapsed() / PROFILE_ITERATIONS
    );

    Ok(())
}
