#[derive(Debug, clap::Parser)]
#[command(next_help_heading = "Runner")]
pub struct RunnerArguments {
    /// Number of concurrent workers. Too many parallel requests might make you violate request
    /// rates. A value of zero is treated as one.
    #[arg(short, long, env = "WORKERS", default_value = "5")]
    pub workers: usize,
}
