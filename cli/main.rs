#![deny(dead_code)]
#![deny(unused_imports)]

use clap::{Parser, Subcommand};
use itertools::Itertools;
use std::process;

use prognos::bundle::PosteriorBundle;
use prognos::covariates::{BaseInput, PredictionInput};
use prognos::predictor::Predictor;

#[derive(Parser)]
#[command(
    name = "prognos",
    about = "Posterior-predictive event-probability estimates from a fitted hazard mixture bundle",
    long_about = "Loads a JSON bundle of posterior draws from a fitted two-component hazard \
                  mixture model and reports the posterior mean and 95% credible interval of \
                  the predicted event probability, pointwise or as a curve over time."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the event probability for one covariate input
    #[command(about = "Predict event probability with a 95% credible interval (TSV on stdout)")]
    Predict {
        /// Path to the posterior bundle JSON file
        #[arg(long)]
        bundle: String,

        /// Age in years; omit when unknown
        #[arg(long)]
        age: Option<f64>,

        /// Binary sex indicator, using the encoding the model was fitted with
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
        sex: u8,

        /// Elapsed time in minutes; omitting it selects the no-time branch
        #[arg(long)]
        time: Option<f64>,
    },

    /// Probability-vs-time curve for fixed covariates
    #[command(about = "Evaluate a probability-vs-time curve with band (TSV on stdout)")]
    Curve {
        /// Path to the posterior bundle JSON file
        #[arg(long)]
        bundle: String,

        /// Age in years; omit when unknown
        #[arg(long)]
        age: Option<f64>,

        /// Binary sex indicator, using the encoding the model was fitted with
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
        sex: u8,

        /// Number of evenly spaced grid points over the modeled time range
        #[arg(long, default_value = "61")]
        points: usize,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Predict {
            bundle,
            age,
            sex,
            time,
        } => predict_command(&bundle, age, sex, time),
        Commands::Curve {
            bundle,
            age,
            sex,
            points,
        } => curve_command(&bundle, age, sex, points),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load_engine(path: &str) -> Result<Predictor, Box<dyn std::error::Error>> {
    let bundle = PosteriorBundle::load(path)?;
    Ok(Predictor::new(bundle)?)
}

fn predict_command(
    bundle_path: &str,
    age: Option<f64>,
    sex: u8,
    time: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = load_engine(bundle_path)?;
    let input = PredictionInput {
        age,
        sex: sex as f64,
        time_minutes: time,
        use_time: time.is_some(),
    };
    let result = engine.predict(&input)?;

    println!("mean\tlo\thi");
    println!("{:.6}\t{:.6}\t{:.6}", result.mean, result.lo, result.hi);
    Ok(())
}

fn curve_command(
    bundle_path: &str,
    age: Option<f64>,
    sex: u8,
    points: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = load_engine(bundle_path)?;
    let base = BaseInput {
        age,
        sex: sex as f64,
    };
    let curve = engine.curve(&base, points)?;

    println!("t\tmean\tlo\thi");
    let rows = curve
        .iter()
        .map(|p| format!("{:.2}\t{:.6}\t{:.6}\t{:.6}", p.t, p.mean, p.lo, p.hi))
        .join("\n");
    if !rows.is_empty() {
        println!("{rows}");
    }
    Ok(())
}
