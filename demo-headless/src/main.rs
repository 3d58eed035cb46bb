use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wildfire_threat_core::{
    EngineConfig, EnvironmentalFeatures, FireBehaviorEngine, IgnitionModel, IgnitionRisk,
    LinearModel, ThreatPipeline, ThreatPrediction,
};

mod console;

/// Wildfire threat report for a single site or a batch of sites
#[derive(Parser, Debug)]
#[command(name = "threat-headless")]
#[command(about = "Derive fire behaviour and threat from environmental features", long_about = None)]
struct Args {
    /// Temperature in °C
    #[arg(short, long, default_value_t = 30.0, allow_negative_numbers = true)]
    temperature: f64,

    /// Relative humidity in %
    #[arg(long, default_value_t = 45.0)]
    humidity: f64,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 0.7)]
    wind_speed: f64,

    /// 24 h precipitation in mm
    #[arg(long)]
    precip: Option<f64>,

    /// NDVI (-1 to 1)
    #[arg(long, allow_negative_numbers = true)]
    ndvi: Option<f64>,

    /// NDMI (-1 to 1)
    #[arg(long, allow_negative_numbers = true)]
    ndmi: Option<f64>,

    /// Elevation in meters
    #[arg(long, allow_negative_numbers = true)]
    elevation: Option<f64>,

    /// Slope in degrees
    #[arg(long)]
    slope: Option<f64>,

    /// Aspect in degrees clockwise from north
    #[arg(long)]
    aspect: Option<f64>,

    /// Lightning strikes within range over the last 24 h
    #[arg(short, long, default_value_t = 0)]
    lightning_strikes: u32,

    /// Rate of spread in m/min (used when no spread model is given)
    #[arg(short, long)]
    ros: Option<f64>,

    /// JSON linear model predicting rate of spread
    #[arg(long)]
    spread_model: Option<PathBuf>,

    /// JSON linear model predicting ignition probability
    #[arg(long)]
    ignition_model: Option<PathBuf>,

    /// JSON engine configuration (partial files fall back to defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON array of feature records to evaluate instead of the flags above
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Print JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn site(&self) -> EnvironmentalFeatures {
        let mut site = EnvironmentalFeatures::new(self.temperature, self.humidity, self.wind_speed)
            .with_lightning(self.lightning_strikes);
        site.precip_mm = self.precip.map(Into::into);
        site.ndvi = self.ndvi;
        site.ndmi = self.ndmi;
        site.elevation_m = self.elevation.map(Into::into);
        site.slope_deg = self.slope.map(Into::into);
        site.aspect_deg = self.aspect.map(Into::into);
        site
    }
}

/// Where the rate of spread comes from
enum Estimator {
    Fixed {
        engine: FireBehaviorEngine,
        ros: f64,
        ignition_model: Option<LinearModel>,
    },
    Model(ThreatPipeline),
}

impl Estimator {
    fn build(args: &Args, engine: FireBehaviorEngine) -> Result<Self> {
        let ignition_model = args
            .ignition_model
            .as_deref()
            .map(load_model)
            .transpose()?;

        match (&args.spread_model, args.ros) {
            (Some(path), _) => {
                let spread_model = load_model(path)?;
                let mut pipeline = ThreatPipeline::new(engine, Box::new(spread_model));
                if let Some(model) = ignition_model {
                    pipeline = pipeline.with_ignition_model(Box::new(model));
                }
                Ok(Estimator::Model(pipeline))
            }
            (None, Some(ros)) => Ok(Estimator::Fixed {
                engine,
                ros,
                ignition_model,
            }),
            (None, None) => bail!("either --ros or --spread-model is required"),
        }
    }

    fn predict(&self, site: &EnvironmentalFeatures) -> Result<ThreatPrediction> {
        match self {
            Estimator::Model(pipeline) => Ok(pipeline.predict(site)?),
            Estimator::Fixed {
                engine,
                ros,
                ignition_model,
            } => {
                let evaluation = engine.evaluate(site, *ros);
                let ignition_risk = match ignition_model {
                    Some(model) => Some(IgnitionRisk::from_probability(
                        model.predict_probability(&evaluation.features)?,
                    )),
                    None => None,
                };
                Ok(ThreatPrediction {
                    features: evaluation.features,
                    ros_prediction_m_per_min: evaluation.fire_behavior.ros_base_m_per_min,
                    ignition_risk,
                    fire_behavior: evaluation.fire_behavior,
                    threat_assessment: evaluation.threat_assessment,
                })
            }
        }
    }

    fn predict_all(&self, sites: &[EnvironmentalFeatures]) -> Result<Vec<ThreatPrediction>> {
        match self {
            Estimator::Model(pipeline) => pipeline
                .predict_batch(sites)
                .into_iter()
                .enumerate()
                .map(|(index, result)| result.with_context(|| format!("site {index} failed")))
                .collect(),
            Estimator::Fixed { .. } => sites.iter().map(|site| self.predict(site)).collect(),
        }
    }

    fn window_area_ha(&self) -> f64 {
        let engine = match self {
            Estimator::Fixed { engine, .. } => engine,
            Estimator::Model(pipeline) => pipeline.engine(),
        };
        engine.config().damage.window_area_ha
    }
}

fn load_model(path: &Path) -> Result<LinearModel> {
    let model = LinearModel::load(path)
        .with_context(|| format!("failed to load model {}", path.display()))?;
    info!(
        "Loaded model {} ({} feature columns)",
        path.display(),
        model.feature_columns.len()
    );
    Ok(model)
}

fn load_batch(path: &Path) -> Result<Vec<EnvironmentalFeatures>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read batch file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("batch file {} is not a JSON array of sites", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = FireBehaviorEngine::new(config)?;
    let estimator = Estimator::build(&args, engine)?;

    if let Some(path) = &args.batch {
        let sites = load_batch(path)?;
        info!("Evaluating {} sites from {}", sites.len(), path.display());
        let predictions = estimator.predict_all(&sites)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&predictions)?);
        } else {
            for prediction in &predictions {
                console::print_prediction(prediction, estimator.window_area_ha());
            }
        }
        return Ok(());
    }

    let prediction = estimator.predict(&args.site())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        console::print_prediction(&prediction, estimator.window_area_ha());
    }
    Ok(())
}
