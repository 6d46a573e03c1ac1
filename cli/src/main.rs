//! gridwalk: Dijkstra search between two points of the reference obstacle
//! map, drawn in the terminal.
//!
//! Usage:
//!   gridwalk                     # prompts for the coordinates
//!   gridwalk 5 5 140 14 --animate

use std::io::{self, Write};
use std::time::{Duration, Instant};

use clap::Parser;
use gridwalk_cli::{Request, check_request, read_request, write_report};
use gridwalk_paths::{ExplorationLog, ReferenceMap, SearchConfig, SearchEngine};
use gridwalk_term::{Canvas, ReplayOptions, Scale, render_static, replay};

/// Find the cheapest 8-connected route around the five obstacles of the
/// 300x200 reference map.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// start_x start_y goal_x goal_y; prompted for when omitted
    #[arg(
        num_args = 4,
        value_names = ["START_X", "START_Y", "GOAL_X", "GOAL_Y"],
        allow_negative_numbers = true
    )]
    coords: Vec<i32>,

    /// Stop after finalizing this many nodes
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Animate the exploration instead of drawing the final picture once
    #[arg(short, long)]
    animate: bool,

    /// Pause between animation frames, in milliseconds
    #[arg(long, default_value_t = 10)]
    delay_ms: u64,

    /// Map cells per terminal character, as WxH
    #[arg(long, default_value_t = Scale::default())]
    scale: Scale,

    /// Skip drawing the map
    #[arg(long)]
    no_render: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();
    let args = Args::parse();

    let map = ReferenceMap;
    let mut config = SearchConfig::reference();
    if let Some(max) = args.max_expansions {
        config = config.with_max_expansions(max);
    }

    let request = match <[i32; 4]>::try_from(args.coords.as_slice()) {
        Ok(coords) => {
            let req = Request::from_coordinates(coords);
            check_request(config.bounds, &map, req)?
        }
        Err(_) => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            match read_request(&mut stdin.lock(), &mut stdout, config.bounds, &map)? {
                Some(req) => req,
                None => {
                    log::info!("no coordinates entered");
                    return Ok(());
                }
            }
        }
    };

    println!("Starting exploration...");
    let tic = Instant::now();
    let mut exploration = ExplorationLog::new();
    let engine = SearchEngine::new(config, &map, request.start, request.goal)?;
    let result = engine.run_with(&mut exploration)?;
    let elapsed = tic.elapsed();
    let stats = result.stats;
    log::info!("{:?} after {} expansions", result.status, stats.expansions);
    log::debug!("{} nodes left on the frontier", stats.frontier_left);

    let mut stdout = io::stdout();
    if !args.no_render {
        let mut canvas = Canvas::new(config.bounds, args.scale, &map);
        canvas.mark_endpoints(request.start, request.goal);
        if args.animate {
            let opts = ReplayOptions {
                delay: Duration::from_millis(args.delay_ms),
                ..ReplayOptions::default()
            };
            let events = exploration.events();
            replay(&mut stdout, &mut canvas, events, &result.path, &opts)?;
        } else {
            canvas.mark_explored(exploration.events());
            canvas.mark_route(&result.path);
            render_static(&mut stdout, &canvas)?;
        }
    }

    write_report(&mut stdout, &result, elapsed)?;
    stdout.flush()?;
    Ok(())
}
