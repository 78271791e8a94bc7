use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};
use std::{
    env,
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
};

use copilot::{
    display::StatusReport,
    plugins::CopilotPlugin,
    resources::{
        snapshot_channel, Classifier, CopilotConfig, FixedScoreClassifier, FlightSnapshot,
        Loadout, MlpClassifier, RunningFlag, SnapshotReceiver,
    },
    utils::SimError,
};

const USAGE: &str =
    "usage: copilot [PILOT_LBS CARGO_LBS] [--config FILE] [--model FILE] [--seed N] [--json]";

#[derive(Debug, Default)]
struct Args {
    weights: Option<(f64, f64)>,
    config: Option<PathBuf>,
    model: Option<PathBuf>,
    seed: Option<u64>,
    json: bool,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, SimError> {
        let mut parsed = Args::default();
        let mut positional = Vec::new();
        let mut args = args;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(PathBuf::from(value(&mut args, &arg)?)),
                "--model" => parsed.model = Some(PathBuf::from(value(&mut args, &arg)?)),
                "--seed" => {
                    let seed = value(&mut args, &arg)?;
                    parsed.seed = Some(seed.parse().map_err(|_| {
                        SimError::InvalidInput(format!("seed must be an integer, got '{}'", seed))
                    })?);
                }
                "--json" => parsed.json = true,
                "-h" | "--help" => return Err(SimError::InvalidInput(USAGE.to_string())),
                _ => positional.push(parse_weight(&arg)?),
            }
        }

        parsed.weights = match positional.as_slice() {
            [] => None,
            [pilot, cargo] => Some((*pilot, *cargo)),
            _ => return Err(SimError::InvalidInput(USAGE.to_string())),
        };
        Ok(parsed)
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, SimError> {
    args.next()
        .ok_or_else(|| SimError::InvalidInput(format!("{} needs a value", flag)))
}

fn parse_weight(text: &str) -> Result<f64, SimError> {
    text.trim()
        .parse()
        .map_err(|_| SimError::InvalidInput(format!("'{}' is not a weight", text.trim())))
}

fn prompt_weight(label: &str) -> Result<f64, SimError> {
    print!("Enter {} weight (lbs): ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    parse_weight(&line)
}

fn load_classifier(model: Option<&PathBuf>) -> Result<Classifier, SimError> {
    match model {
        Some(path) => Ok(Classifier::new(MlpClassifier::from_yaml_file(path)?)),
        None => {
            warn!("No classifier model given, criticality is fixed at 0.0");
            Ok(Classifier::new(FixedScoreClassifier(0.0)))
        }
    }
}

/// Writes every snapshot to `out` and returns the last one received.
fn relay(
    receiver: &SnapshotReceiver,
    out: &mut impl Write,
    destination: &str,
    display_count: usize,
    json: bool,
) -> Result<Option<FlightSnapshot>, SimError> {
    let mut last = None;
    while let Some(snapshot) = receiver.recv() {
        if json {
            writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
        } else {
            let report = StatusReport::new(&snapshot, destination, display_count);
            writeln!(out, "--- tick {} ---\n{}\n", snapshot.tick, report)?;
        }
        out.flush()?;
        last = Some(snapshot);
    }
    Ok(last)
}

fn spawn_display(
    receiver: SnapshotReceiver,
    running: RunningFlag,
    destination: String,
    display_count: usize,
    json: bool,
) -> thread::JoinHandle<Result<Option<FlightSnapshot>, SimError>> {
    thread::spawn(move || {
        let result = relay(
            &receiver,
            &mut io::stdout(),
            &destination,
            display_count,
            json,
        );
        if result.is_err() {
            running.stop();
        }
        result
    })
}

fn main() -> Result<(), SimError> {
    let args = Args::parse(env::args().skip(1))?;

    let mut app = App::new();
    app.add_plugins(LogPlugin::default());

    let mut config = match &args.config {
        Some(path) => CopilotConfig::from_yaml_file(path)?,
        None => CopilotConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let tick_interval = config.simulation.tick_interval()?;

    info!("Flight simulation: {}", config.route.name);
    let (pilot_weight, cargo_weight) = match args.weights {
        Some(weights) => weights,
        None => (prompt_weight("pilot")?, prompt_weight("cargo")?),
    };
    let loadout = Loadout::new(pilot_weight, cargo_weight)?;
    let classifier = load_classifier(args.model.as_ref())?;

    let (publisher, receiver) = snapshot_channel();
    let running = RunningFlag::new();
    let display = spawn_display(
        receiver,
        running.clone(),
        config.route.name.clone(),
        config.simulation.display_count,
        args.json,
    );

    info!("Starting decision support simulation");
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick_interval)))
        .add_plugins(
            CopilotPlugin::new(config, loadout, classifier)
                .with_publisher(publisher)
                .with_running_flag(running),
        );

    // The runner consumes the app, so the publisher is gone once this returns
    let exit = app.run();
    debug!("App exited with {:?}", exit);

    let last = display
        .join()
        .map_err(|_| SimError::Display("display thread panicked".to_string()))??;
    match last {
        Some(snapshot) => info!(
            "Flight ended after {} ticks: {}",
            snapshot.tick, snapshot.status
        ),
        None => warn!("Flight ended before any tick was published"),
    }
    Ok(())
}
