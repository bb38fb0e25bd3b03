//! One-shot body-fat estimate from the command line
//! Usage: cargo run --bin estimate_body_fat -- <protocol> <birth_date> <sex> [site=mm ...] [weight_kg=kg]
//!
//! Example:
//!   estimate_body_fat 3-skinfold 1990-04-12 female triceps=18 suprailiac=14 thigh=25 weight_kg=62
//!
//! Exit status is 0 whenever the JSON assessment is printed, including when
//! no estimate could be made (see its `reason`). Malformed arguments exit
//! non-zero: 2 for missing arguments, 1 for anything that cannot be parsed.

use std::collections::HashMap;

use tracing_subscriber::EnvFilter;

use bodycomp::composition::{parse_date, today, FormatError, SkinfoldSet};
use bodycomp::tools::estimate;

const USAGE: &str =
    "usage: estimate_body_fat <protocol> <birth_date> <sex> [site=mm ...] [weight_kg=kg]";

/// Skinfolds keyed by canonical site name, plus the optional body weight
type Readings = (HashMap<String, f64>, Option<f64>);

/// Parse the `site=mm` and `weight_kg=kg` arguments
fn parse_readings(args: &[String]) -> Result<Readings, Box<dyn std::error::Error>> {
    let mut named = Vec::new();
    let mut weight_kg = None;
    for arg in args {
        match arg.split_once('=') {
            Some(("weight_kg", raw)) => weight_kg = Some(raw.trim().parse::<f64>()?),
            Some((name, _)) => {
                let (_, mm) = SkinfoldSet::parse_assignment(arg)?;
                named.push((name.trim().to_string(), mm));
            }
            None => return Err(FormatError::UnknownSite(arg.clone()).into()),
        }
    }

    // Rejects a site given twice before the names are canonicalized
    let folds = SkinfoldSet::from_named(named.iter().map(|(name, mm)| (name, *mm)))?;
    let skinfolds = folds
        .iter()
        .map(|(site, mm)| (site.as_str().to_string(), mm))
        .collect();

    Ok((skinfolds, weight_kg))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bodycomp=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }
    let (protocol, birth_date, sex) = (&args[0], &args[1], &args[2]);
    let (skinfolds, weight_kg) = parse_readings(&args[3..])?;

    let reference_date = match std::env::var("BODYCOMP_TODAY") {
        Ok(value) if !value.trim().is_empty() => parse_date(&value)?,
        _ => today(),
    };

    let response = estimate::estimate_body_fat(protocol, birth_date, sex, &skinfolds, weight_kg, reference_date)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
