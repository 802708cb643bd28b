use serde::{Deserialize, Serialize};
use shuttlego::catalog::Stop;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDto {
    pub sequence: u16,
    pub stop_name: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<&Stop> for StopDto {
    fn from(stop: &Stop) -> Self {
        Self {
            sequence: stop.sequence,
            stop_name: stop.name.to_string(),
            lat: stop.coordinate.latitude,
            lng: stop.coordinate.longitude,
        }
    }
}
