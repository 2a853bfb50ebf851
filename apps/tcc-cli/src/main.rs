use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tcc_app::export;
use tcc_app::{AppError, AppResult, CoordinateOptions, analysis, study_service};
use tcc_core::units::amps;
use tcc_curves::CurveSweep;
use tcc_signals::{MhoCircle, Phasor, WaveformSpec, decompose};
use tracing::debug;

#[derive(Parser)]
#[command(name = "tcc-cli")]
#[command(about = "TCC CLI - Protection device time-current curves and grading", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate study file syntax and settings
    Validate {
        /// Path to the study YAML/JSON file
        study_path: PathBuf,
    },
    /// List devices in a study
    Devices {
        /// Path to the study YAML/JSON file
        study_path: PathBuf,
    },
    /// Operating time of one device at a given current
    Trip {
        /// Path to the study YAML/JSON file
        study_path: PathBuf,
        /// Device ID
        device_id: String,
        /// Current in amperes
        current_a: f64,
    },
    /// Export time-current curves as CSV
    Curve {
        /// Path to the study YAML/JSON file
        study_path: PathBuf,
        /// Only this device (hidden devices allowed)
        #[arg(long)]
        device: Option<String>,
        #[command(flatten)]
        sweep: SweepArgs,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Grade the study at one fault current
    Coordinate {
        /// Path to the study YAML/JSON file
        study_path: PathBuf,
        /// Fault current in amperes (overrides the study)
        #[arg(long)]
        fault_current: Option<f64>,
        /// Minimum coordination time interval in seconds (overrides the study)
        #[arg(long)]
        cti: Option<f64>,
        /// Write the report as JSON instead of CSV
        #[arg(long)]
        json: bool,
        /// Output file path (optional, defaults to a summary on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Grade the study across a range of fault currents
    Grade {
        /// Path to the study YAML/JSON file
        study_path: PathBuf,
        #[command(flatten)]
        sweep: SweepArgs,
        /// Minimum coordination time interval in seconds (overrides the study)
        #[arg(long)]
        cti: Option<f64>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sample a sine waveform with optional CT saturation
    Waveform {
        #[arg(long, default_value_t = 2)]
        cycles: usize,
        /// Frequency in Hz
        #[arg(long, default_value_t = 50.0)]
        frequency: f64,
        /// Peak amplitude
        #[arg(long, default_value_t = 1.0)]
        magnitude: f64,
        /// Phase shift in degrees
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        phase: f64,
        /// CT saturation factor, 0 to 1
        #[arg(long, default_value_t = 0.0)]
        saturation: f64,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Points of a mho distance characteristic
    Mho {
        /// Reach (circle diameter) in ohms
        reach: f64,
        #[arg(long, allow_hyphen_values = true)]
        center_x: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        center_y: Option<f64>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Symmetrical components of three phasors given as MAG@ANGLE
    Sequence {
        #[arg(value_parser = parse_phasor)]
        a: Phasor,
        #[arg(value_parser = parse_phasor)]
        b: Phasor,
        #[arg(value_parser = parse_phasor)]
        c: Phasor,
    },
}

/// Current axis overrides; unset values come from the study plot range.
#[derive(clap::Args)]
struct SweepArgs {
    /// Lowest current in amperes
    #[arg(long)]
    min_current: Option<f64>,
    /// Highest current in amperes
    #[arg(long)]
    max_current: Option<f64>,
    /// Number of log-spaced points
    #[arg(long)]
    points: Option<usize>,
}

impl SweepArgs {
    fn resolve(&self, base: CurveSweep) -> AppResult<CurveSweep> {
        let sweep = CurveSweep::new(
            self.min_current.map(amps).unwrap_or(base.start()),
            self.max_current.map(amps).unwrap_or(base.end()),
            self.points.unwrap_or(base.points()),
        )?;
        Ok(sweep)
    }
}

fn parse_phasor(s: &str) -> Result<Phasor, String> {
    let (mag, angle) = s
        .split_once('@')
        .ok_or_else(|| format!("expected MAG@ANGLE, got '{s}'"))?;
    let magnitude = mag
        .trim()
        .parse()
        .map_err(|e| format!("bad magnitude '{mag}': {e}"))?;
    let angle_deg = angle
        .trim()
        .parse()
        .map_err(|e| format!("bad angle '{angle}': {e}"))?;
    Ok(Phasor::new(magnitude, angle_deg))
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { study_path } => cmd_validate(&study_path),
        Commands::Devices { study_path } => cmd_devices(&study_path),
        Commands::Trip {
            study_path,
            device_id,
            current_a,
        } => cmd_trip(&study_path, &device_id, current_a),
        Commands::Curve {
            study_path,
            device,
            sweep,
            output,
        } => cmd_curve(&study_path, device.as_deref(), &sweep, output.as_deref()),
        Commands::Coordinate {
            study_path,
            fault_current,
            cti,
            json,
            output,
        } => cmd_coordinate(
            &study_path,
            CoordinateOptions {
                fault_current_a: fault_current,
                minimum_cti_s: cti,
            },
            json,
            output.as_deref(),
        ),
        Commands::Grade {
            study_path,
            sweep,
            cti,
            output,
        } => cmd_grade(&study_path, &sweep, cti, output.as_deref()),
        Commands::Waveform {
            cycles,
            frequency,
            magnitude,
            phase,
            saturation,
            output,
        } => cmd_waveform(
            WaveformSpec {
                cycles,
                frequency_hz: frequency,
                magnitude,
                phase_shift_deg: phase,
                saturation_factor: saturation,
                ..WaveformSpec::default()
            },
            output.as_deref(),
        ),
        Commands::Mho {
            reach,
            center_x,
            center_y,
            output,
        } => cmd_mho(reach, center_x, center_y, output.as_deref()),
        Commands::Sequence { a, b, c } => cmd_sequence(a, b, c),
    }
}

/// Write to a file or stdout
fn emit(content: &str, rows: usize, output: Option<&Path>) -> AppResult<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
        println!("✓ Exported {} rows to {}", rows, path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_validate(study_path: &Path) -> AppResult<()> {
    println!("Validating study: {}", study_path.display());
    let study = study_service::load_study(study_path)?;
    study_service::validate_study(&study)?;
    println!("✓ Study is valid");
    Ok(())
}

fn cmd_devices(study_path: &Path) -> AppResult<()> {
    let study = study_service::load_study(study_path)?;
    let devices = study_service::list_devices(&study);

    if devices.is_empty() {
        println!("No devices found in study");
    } else {
        println!("Devices in study '{}':", study.name);
        for dev in devices {
            let inst = dev
                .instantaneous_a
                .map(|i| format!(", inst {} A", i))
                .unwrap_or_default();
            let hidden = if dev.visible { "" } else { " [hidden]" };
            println!(
                "  {} - {} ({}, pickup {} A, TMS {}{}){}",
                dev.id, dev.name, dev.curve, dev.pickup_a, dev.time_multiplier, inst, hidden
            );
        }
    }
    Ok(())
}

fn cmd_trip(study_path: &Path, device_id: &str, current_a: f64) -> AppResult<()> {
    let study = study_service::load_study(study_path)?;
    let result = analysis::trip_time(&study, device_id, current_a)?;
    println!("{} at {} A: {}", device_id, current_a, result);
    Ok(())
}

fn cmd_curve(
    study_path: &Path,
    device_id: Option<&str>,
    sweep: &SweepArgs,
    output: Option<&Path>,
) -> AppResult<()> {
    let study = study_service::load_study(study_path)?;
    let sweep = sweep.resolve(study.sweep()?)?;
    debug!("curve sweep: {}", sweep);

    let curves = match device_id {
        Some(id) => vec![analysis::device_curve(&study, id, Some(sweep))?],
        None => analysis::device_curves(&study, Some(sweep))?,
    };

    let rows = curves.iter().map(|c| c.points.len()).sum();
    emit(&export::curves_to_csv(&curves), rows, output)
}

fn cmd_coordinate(
    study_path: &Path,
    options: CoordinateOptions,
    json: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let study = study_service::load_study(study_path)?;
    let report = analysis::coordinate(&study, &options)?;

    if json || output.is_some() {
        let content = if json {
            export::report_to_json(&report)?
        } else {
            export::report_to_csv(&report)
        };
        return emit(&content, report.sequence.len(), output);
    }

    println!(
        "Coordination at {} A (minimum CTI {:.3} s):",
        report.fault_current_a, report.minimum_cti_s
    );
    if report.is_empty() {
        println!("  No device operates at this current");
        return Ok(());
    }

    for (i, trip) in report.sequence.iter().enumerate() {
        println!("  {}. {} trips at {:.3} s", i + 1, trip.name, trip.trip_time_s);
        if let Some(margin) = report.margins.get(i) {
            let flag = if margin.violation { "  ✗ below CTI" } else { "" };
            println!("       margin {:.3} s{}", margin.margin_s, flag);
        }
    }

    if report.is_coordinated() {
        println!("✓ All adjacent devices are graded");
    } else {
        println!("✗ {} grading violation(s)", report.violations().count());
    }
    Ok(())
}

fn cmd_grade(
    study_path: &Path,
    sweep: &SweepArgs,
    cti: Option<f64>,
    output: Option<&Path>,
) -> AppResult<()> {
    let study = study_service::load_study(study_path)?;
    let sweep = sweep.resolve(study.sweep()?)?;
    let rows = analysis::grading_scan(&study, &sweep, cti)?;
    emit(&export::grading_to_csv(&rows), rows.len(), output)
}

fn cmd_waveform(spec: WaveformSpec, output: Option<&Path>) -> AppResult<()> {
    if spec.cycles == 0 {
        return Err(AppError::InvalidInput("cycles must be at least 1".to_string()));
    }
    let samples: Vec<_> = spec.samples().collect();
    emit(&export::waveform_to_csv(&samples), samples.len(), output)
}

fn cmd_mho(
    reach: f64,
    center_x: Option<f64>,
    center_y: Option<f64>,
    output: Option<&Path>,
) -> AppResult<()> {
    let circle = MhoCircle::new(reach, center_x, center_y);
    debug!(
        "mho circle center ({}, {}) radius {}",
        circle.center_x, circle.center_y, circle.radius
    );
    let points = circle.points();
    emit(&export::mho_to_csv(&points), points.len(), output)
}

fn cmd_sequence(a: Phasor, b: Phasor, c: Phasor) -> AppResult<()> {
    let components = decompose(a, b, c);
    print!("{}", export::sequence_to_csv(&components));
    match components.negative_to_positive_ratio() {
        Some(ratio) => println!("# unbalance I2/I1 = {:.4}", ratio),
        None => println!("# no positive sequence"),
    }
    Ok(())
}
