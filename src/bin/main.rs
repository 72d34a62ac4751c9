//! CLI for the Synology disk-health exporter

use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use synostat::{any_disk_idle_above, any_disk_idle_below, Sampler, SynoCollector, SysfsRoot};

#[derive(Parser)]
#[command(name = "synostat")]
#[command(about = "Synology disk-health metrics exporter", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Sysfs mount point
    #[arg(
        long,
        env = "SYNOSTAT_SYSFS_PATH",
        default_value = "/sys",
        global = true
    )]
    sysfs_path: PathBuf,

    /// Metric namespace prefix
    #[arg(
        long,
        env = "SYNOSTAT_NAMESPACE",
        default_value = synostat::DEFAULT_NAMESPACE,
        global = true
    )]
    namespace: String,

    /// Listen address for the exposition endpoint
    #[arg(
        long,
        env = "SYNOSTAT_LISTEN_ADDRESS",
        default_value = "0.0.0.0:9100",
        global = true
    )]
    listen_address: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "SYNOSTAT_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve /metrics over HTTP (default)
    Serve,
    /// Run one sampling pass and print the samples as JSON lines
    Sample,
    /// Evaluate a spin-down predicate; exits 0 if it holds, 1 otherwise
    Idle {
        /// Holds if any disk has been idle longer than this many seconds
        #[arg(long, conflicts_with = "below")]
        above: Option<i64>,
        /// Holds if any disk has been idle shorter than this many seconds
        #[arg(long)]
        below: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .parse_filters(&cli.log_level)
        .init();

    let root = SysfsRoot::new(&cli.sysfs_path);
    let result = match cli.command {
        None | Some(Commands::Serve) => {
            serve(root, &cli.namespace, &cli.listen_address).await
        }
        Some(Commands::Sample) => dump_samples(root),
        Some(Commands::Idle { above, below }) => return run_idle(&root, above, below),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Metrics Server
// =============================================================================

async fn serve(root: SysfsRoot, namespace: &str, addr: &str) -> synostat::Result<()> {
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::server::conn::http1;
    use hyper::service::service_fn;
    use hyper::{Request, Response, StatusCode};
    use hyper_util::rt::TokioIo;
    use prometheus::{Encoder, Registry, TextEncoder};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    let registry = Arc::new(Registry::new());
    registry.register(Box::new(SynoCollector::new(root, namespace)?))?;

    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| synostat::Error::InvalidAddress(format!("{}: {}", addr, e)))?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}/metrics", addr);

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let registry = Arc::clone(&registry);

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                let registry = Arc::clone(&registry);
                async move {
                    let response = match req.uri().path() {
                        "/metrics" => {
                            let encoder = TextEncoder::new();
                            let mut buffer = Vec::new();
                            match encoder.encode(&registry.gather(), &mut buffer) {
                                Ok(()) => Response::builder()
                                    .status(StatusCode::OK)
                                    .header("Content-Type", encoder.format_type())
                                    .body(Full::new(Bytes::from(buffer)))
                                    .unwrap(),
                                Err(e) => Response::builder()
                                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                                    .body(Full::new(Bytes::from(format!("encode error: {}", e))))
                                    .unwrap(),
                            }
                        }
                        _ => Response::builder()
                            .status(StatusCode::NOT_FOUND)
                            .body(Full::new(Bytes::from("not found")))
                            .unwrap(),
                    };
                    Ok::<_, std::convert::Infallible>(response)
                }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                error!("Connection error: {}", e);
            }
        });
    }
}

// =============================================================================
// One-shot modes
// =============================================================================

fn dump_samples(root: SysfsRoot) -> synostat::Result<()> {
    let sampler = Sampler::new(root);
    for sample in sampler.samples() {
        println!("{}", serde_json::to_string(&sample)?);
    }
    Ok(())
}

fn run_idle(root: &SysfsRoot, above: Option<i64>, below: Option<i64>) -> ExitCode {
    let holds = match (above, below) {
        (Some(threshold), None) => any_disk_idle_above(root, threshold),
        (None, Some(threshold)) => any_disk_idle_below(root, threshold),
        _ => {
            eprintln!("specify exactly one of --above or --below");
            return ExitCode::from(2);
        }
    };
    println!("{}", holds);
    if holds {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
