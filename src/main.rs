use jacobi2d::cli::Args;
use jacobi2d::solver::Solver;

fn main() {
    let args = Args::cli_setup();
    let params = args.solver_parameters();

    let mut solver = Solver::new(params);
    let report = solver.solve();

    println!("mode: {}", params.mode.label());
    println!("status: {}", report.status);
    println!("iterations: {}", report.iterations);
    println!("time: {} s", report.elapsed.as_secs_f64());
}
