use catpoint::config::{self, ClassifierKind, Config};
use catpoint::input::camera::{
    CameraImage, FakeImageClassifier, FixedVerdictClassifier, ImageClassifier,
};
use catpoint::input::simulation::{SYNTHETIC_FRAME_BYTES, run_simulation};
use catpoint::instance_lock::InstanceLock;
use catpoint::service::LoggingStatusListener;
use catpoint::store::JsonFileSecurityRepository;
use catpoint::{
    AlarmStatus, ArmingStatus, Result, SecurityError, SecurityService, Sensor, SensorId,
    SensorType,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;

#[derive(Parser)]
#[command(name = "catpoint", version, about = "Home security alarm control")]
struct Cli {
    /// State file to use instead of the configured one
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show alarm status, arming status and sensors
    Status,
    /// Arm the system
    Arm {
        #[arg(value_enum)]
        mode: ArmMode,
    },
    /// Disarm the system and clear any alarm
    Disarm,
    /// Force the alarm status (no-alarm, pending-alarm, alarm)
    Alarm { status: AlarmStatus },
    /// Manage sensors
    Sensor {
        #[command(subcommand)]
        command: SensorCommand,
    },
    /// Run one camera frame through the cat classifier
    Camera {
        /// Image file; a synthetic frame is used when omitted
        file: Option<PathBuf>,
    },
    /// Generate sensor and camera activity until Ctrl+C
    Simulate {
        #[arg(long)]
        interval_secs: Option<u64>,
        /// Only feed camera frames, leave sensors alone
        #[arg(long)]
        no_toggle: bool,
    },
}

#[derive(Subcommand)]
enum SensorCommand {
    /// Register a new sensor
    Add {
        name: String,
        /// door, window or motion
        sensor_type: SensorType,
    },
    /// Unregister a sensor by id or name
    Remove { sensor: String },
    List,
    /// Activate or deactivate a sensor by id or name
    Set {
        sensor: String,
        #[arg(value_enum)]
        state: SwitchState,
    },
    /// Unregister all sensors
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum ArmMode {
    Home,
    Away,
}

impl From<ArmMode> for ArmingStatus {
    fn from(mode: ArmMode) -> Self {
        match mode {
            ArmMode::Home => ArmingStatus::ArmedHome,
            ArmMode::Away => ArmingStatus::ArmedAway,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SwitchState {
    On,
    Off,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn build_classifier(config: &Config) -> Arc<dyn ImageClassifier> {
    match config.camera.classifier {
        ClassifierKind::Random => match config.camera.seed {
            Some(seed) => Arc::new(FakeImageClassifier::with_seed(seed)),
            None => Arc::new(FakeImageClassifier::new()),
        },
        ClassifierKind::AlwaysCat => Arc::new(FixedVerdictClassifier::new(true)),
        ClassifierKind::NeverCat => Arc::new(FixedVerdictClassifier::new(false)),
    }
}

fn print_sensors(service: &SecurityService) -> Result<()> {
    let sensors = service.sensors()?;
    if sensors.is_empty() {
        println!("No sensors registered");
    }
    for sensor in sensors {
        println!(
            "{}  {:<20} {:<7} {}",
            sensor.id(),
            sensor.name(),
            sensor.sensor_type(),
            if sensor.is_active() { "active" } else { "inactive" }
        );
    }
    Ok(())
}

fn print_status(service: &SecurityService) -> Result<()> {
    let alarm = service.alarm_status()?;
    let arming = service.arming_status()?;
    println!("Alarm:  {} ({})", alarm, alarm.description());
    println!("Arming: {} ({})", arming, arming.description());
    print_sensors(service)
}

async fn simulate(
    service: Arc<SecurityService>,
    config: &Config,
    interval_secs: Option<u64>,
    no_toggle: bool,
) -> Result<()> {
    let mut sim_config = config.simulation.clone();
    if let Some(secs) = interval_secs {
        sim_config.interval_secs = secs;
    }
    if no_toggle {
        sim_config.toggle_sensors = false;
    }
    info!(
        "Simulating every {}s (sensor toggling {}) - press Ctrl+C to exit",
        sim_config.interval_secs,
        if sim_config.toggle_sensors { "on" } else { "off" }
    );

    let task = run_simulation(service, sim_config, config.camera.seed);
    let result = signal::ctrl_c().await;
    task.abort();
    result?;
    info!("Received shutdown signal");
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(path) = cli.state_file {
        config.store.state_file = path;
    }

    let read_only = matches!(
        cli.command,
        Command::Status
            | Command::Sensor {
                command: SensorCommand::List
            }
    );
    let _lock = if read_only {
        None
    } else {
        Some(InstanceLock::acquire()?)
    };

    let repository = Arc::new(JsonFileSecurityRepository::open(
        &config.store.state_file,
    )?);
    let service = Arc::new(SecurityService::new(
        repository,
        build_classifier(&config),
    ));
    service.add_status_listener(Arc::new(LoggingStatusListener));

    match cli.command {
        Command::Status => print_status(&service)?,
        Command::Arm { mode } => service.set_arming_status(mode.into())?,
        Command::Disarm => service.set_arming_status(ArmingStatus::Disarmed)?,
        Command::Alarm { status } => service.set_alarm_status(status)?,
        Command::Sensor { command } => match command {
            SensorCommand::Add { name, sensor_type } => {
                let sensor = Sensor::new(name, sensor_type);
                println!("{}", sensor.id());
                service.add_sensor(sensor)?;
            }
            SensorCommand::Remove { sensor } => {
                let sensor = service.find_sensor(&sensor)?;
                service.remove_sensor(sensor.id())?;
            }
            SensorCommand::List => print_sensors(&service)?,
            SensorCommand::Set { sensor, state } => {
                let sensor = service.find_sensor(&sensor)?;
                let active = matches!(state, SwitchState::On);
                service.change_sensor_activation_status(sensor.id(), active)?;
            }
            SensorCommand::Clear => {
                let ids: Vec<SensorId> = service.sensors()?.iter().map(Sensor::id).collect();
                service.remove_all_sensors(ids)?;
            }
        },
        Command::Camera { file } => {
            let image = match file {
                Some(path) => CameraImage::from_file(&path)?,
                None => {
                    let mut rng = match config.camera.seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_entropy(),
                    };
                    CameraImage::synthetic(&mut rng, SYNTHETIC_FRAME_BYTES)
                }
            };
            let cat = service.process_image(&image)?;
            let alarm = service.alarm_status()?;
            println!(
                "{}: {} -> alarm {}",
                image.label(),
                if cat { "cat" } else { "no cat" },
                alarm
            );
        }
        Command::Simulate {
            interval_secs,
            no_toggle,
        } => simulate(service, &config, interval_secs, no_toggle).await?,
    }
    Ok(())
}

fn main() -> ExitCode {
    // Load .env file before the runtime starts any threads
    config::load_dotenv();
    init_logger();
    let cli = Cli::parse();

    let result = tokio::runtime::Runtime::new()
        .map_err(SecurityError::from)
        .and_then(|runtime| runtime.block_on(run(cli)));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
