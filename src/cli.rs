//! Command line surface and process-wide setup.

use crate::build_info;
use crate::solver::SolverParameters;
use crate::sweep::ExecutionMode;
use clap::error::ErrorKind;
use clap::Parser;

#[cfg(feature = "profile-with-puffin")]
static PUFFIN_SERVER: std::sync::OnceLock<puffin_http::Server> =
    std::sync::OnceLock::new();

/// Steady-state heat diffusion on a square grid via Jacobi relaxation.
#[derive(Parser, Debug)]
#[command(version = build_info::GIT_DESCRIBE, about, long_about = None)]
pub struct Args {
    /// Grid side length, boundary ring included.
    pub grid_size: usize,

    /// Convergence bound on the max per-cell change of a pass.
    pub threshold: f32,

    /// Cap on relaxation passes.
    pub max_iterations: usize,

    /// Execution mode, 0 for sequential, anything else for parallel.
    pub mode: u8,

    /// The number of threads to use.
    #[arg(short, long, default_value = "8")]
    pub threads: usize,
}

impl Args {
    pub fn solver_parameters(&self) -> SolverParameters {
        SolverParameters {
            grid_size: self.grid_size,
            threshold: self.threshold,
            max_iterations: self.max_iterations,
            mode: ExecutionMode::from_flag(self.mode),
        }
    }

    /// Parse arguments and configure the process.
    ///
    /// Argument errors print usage and exit with code 1.
    pub fn cli_setup() -> Self {
        let args = match Args::try_parse() {
            Ok(args) => args,
            Err(err) => {
                let _ = err.print();
                let code = match err.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                    _ => 1,
                };
                std::process::exit(code);
            }
        };

        #[cfg(feature = "profile-with-puffin")]
        {
            PUFFIN_SERVER.get_or_init(|| {
                let server_addr =
                    format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
                println!(
                    "Run this to view profiling data:  puffin_viewer {server_addr}"
                );
                let server = puffin_http::Server::new(&server_addr).unwrap();
                profiling::puffin::set_scopes_on(true);
                server
            });
        }

        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .thread_name(|i| format!("rayon_thread_{}", i))
            .build_global()
            .unwrap();

        args
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn four_positionals_parse() {
        let args =
            Args::try_parse_from(["jacobi2d", "100", "0.001", "500", "1"])
                .unwrap();
        assert_eq!(args.grid_size, 100);
        assert_eq!(args.threshold, 0.001);
        assert_eq!(args.max_iterations, 500);
        let params = args.solver_parameters();
        assert_eq!(params.mode, ExecutionMode::Parallel);
    }

    #[test]
    fn mode_zero_is_sequential() {
        let args =
            Args::try_parse_from(["jacobi2d", "100", "0.001", "500", "0"])
                .unwrap();
        assert_eq!(
            args.solver_parameters().mode,
            ExecutionMode::Sequential
        );
    }

    #[test]
    fn wrong_argument_count_is_rejected() {
        assert!(Args::try_parse_from(["jacobi2d"]).is_err());
        assert!(Args::try_parse_from(["jacobi2d", "100", "0.001"]).is_err());
        assert!(Args::try_parse_from([
            "jacobi2d", "100", "0.001", "500", "1", "9"
        ])
        .is_err());
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert!(Args::try_parse_from([
            "jacobi2d", "abc", "0.001", "500", "1"
        ])
        .is_err());
        assert!(Args::try_parse_from([
            "jacobi2d", "100", "0.001", "500", "fast"
        ])
        .is_err());
    }

    #[test]
    fn threads_flag() {
        let args = Args::try_parse_from([
            "jacobi2d", "100", "0.001", "500", "1", "--threads", "4",
        ])
        .unwrap();
        assert_eq!(args.threads, 4);
    }
}
