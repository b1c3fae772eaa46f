use anyhow::{Context, Result};
use clap::Parser;
use flock_client::SimulationClient;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the flock simulation service", long_about = None)]
struct Args {
    /// Simulation server URL (e.g. http://localhost:8080)
    #[arg(short, long)]
    server: String,

    /// Frame rate to drive the step loop at
    #[arg(short, long, default_value_t = 30)]
    fps: u32,

    /// Stop after this many frames (0 = run until interrupted)
    #[arg(long, default_value_t = 0)]
    frames: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("flock headless driver starting...");
    log::info!("Server: {}", args.server);
    log::info!("Frame rate: {} fps", args.fps);

    let client = SimulationClient::new(args.server).context("failed to build client")?;
    client.refresh_snapshot().await;
    log::info!(
        "Initial state: step {}, {} birds, {} obstacles, running={}",
        client.step(),
        client.bird_count(),
        client.obstacle_count(),
        client.is_running()
    );

    // Same cycle as the browser loop: step only while running, but keep
    // ticking so a remote resume is picked up on the next frame.
    let fps = args.fps.max(1);
    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
    let mut frame: u64 = 0;

    loop {
        interval.tick().await;
        frame += 1;

        if client.is_running() {
            client.advance_step().await;
        } else {
            client.refresh_snapshot().await;
        }

        if frame % u64::from(fps) == 0 {
            log::info!(
                "step {}: {} birds, {} obstacles, running={}",
                client.step(),
                client.bird_count(),
                client.obstacle_count(),
                client.is_running()
            );
        }

        if args.frames > 0 && frame >= args.frames {
            log::info!("Requested frame count reached, exiting");
            break;
        }
    }

    Ok(())
}
