use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};
use thiserror::Error;
use zip::ZipArchive;

pub mod models;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
    #[error("Route id {0} appears more than once")]
    DuplicateRoute(String),
    #[error("Route {route_id} references unknown site {site_id}")]
    UnknownSite { route_id: String, site_id: String },
    #[error("Row references unknown route {0}")]
    UnknownRoute(String),
    #[error("Unknown direction: {0}")]
    UnknownDirection(String),
    #[error("Stop {stop} has coordinates out of range: {lat}, {lng}")]
    CoordinateOutOfRange { stop: String, lat: f64, lng: f64 },
    #[error("Could not parse departure time: {0}")]
    InvalidDeparture(String),
}

pub struct Config {
    pub sites_file_name: String,
    pub routes_file_name: String,
    pub stops_file_name: String,
    pub departures_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sites_file_name: "sites.csv".into(),
            routes_file_name: "routes.csv".into(),
            stops_file_name: "stops.csv".into(),
            departures_file_name: "departures.csv".into(),
        }
    }
}

/// The output tables of the data build step, row for row.
/// The departures table is optional, older exports do not carry it.
#[derive(Default, Debug)]
pub struct Dataset {
    pub sites: Vec<RawSite>,
    pub routes: Vec<RawRoute>,
    pub stops: Vec<RawStop>,
    pub departures: Vec<RawDeparture>,
}

impl Dataset {
    /// Loads every table from a directory of CSV files.
    pub fn load_from_dir<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self, Error> {
        let dir = path.as_ref();
        let mut dataset = Self::default();
        parse_csv(&mut dataset.sites, &mut open(dir, &config.sites_file_name)?)?;
        parse_csv(&mut dataset.routes, &mut open(dir, &config.routes_file_name)?)?;
        parse_csv(&mut dataset.stops, &mut open(dir, &config.stops_file_name)?)?;
        let departures_path = dir.join(&config.departures_file_name);
        if departures_path.exists() {
            parse_csv(&mut dataset.departures, &mut File::open(departures_path)?)?;
        }
        Ok(dataset)
    }

    /// Loads every table from a single zip bundle.
    pub fn load_from_zip<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self, Error> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;
        let mut dataset = Self::default();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_owned();
            match name.as_str() {
                val if val == config.sites_file_name => parse_csv(&mut dataset.sites, &mut file)?,
                val if val == config.routes_file_name => parse_csv(&mut dataset.routes, &mut file)?,
                val if val == config.stops_file_name => parse_csv(&mut dataset.stops, &mut file)?,
                val if val == config.departures_file_name => {
                    parse_csv(&mut dataset.departures, &mut file)?
                }
                _ => tracing::debug!("Skipped {name}"),
            };
        }
        if dataset.sites.is_empty() && dataset.routes.is_empty() && dataset.stops.is_empty() {
            return Err(Error::FileNotFound(config.sites_file_name.clone()));
        }
        Ok(dataset)
    }
}

fn open(dir: &Path, file_name: &str) -> Result<File, Error> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Err(Error::FileNotFound(file_name.to_string()));
    }
    Ok(File::open(path)?)
}

fn parse_csv<R, T>(buf: &mut Vec<T>, reader: &mut R) -> Result<(), Error>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut rdr = csv::Reader::from_reader(reader);
    for result in rdr.deserialize() {
        let record: T = result?;
        buf.push(record);
    }
    Ok(())
}
