use serde::{Deserialize, Serialize};
use shuttlego::{
    catalog::Direction,
    nearest::Recommendation,
    shared::time::{Time, next_departure},
};

use crate::dto::StopDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationDto {
    pub route_id: String,
    pub route_name: String,
    pub direction: Direction,
    pub operator: Option<String>,
    pub notes: Option<String>,
    pub nearest_stop: StopDto,
    pub distance_m: u64,
    /// First stop of the path (where a commute-out bus sets off).
    pub origin_stop: Option<StopDto>,
    /// Last stop of the path (where a commute-in bus terminates).
    pub terminus_stop: Option<StopDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_time: Option<String>,
    pub all_departure_times: Vec<String>,
    pub route_stops: Vec<StopDto>,
}

impl RecommendationDto {
    pub fn from(rec: &Recommendation, time: Option<Time>) -> Self {
        let route = rec.route;
        let board_time = time
            .and_then(|after| next_departure(&route.departures, after))
            .map(|departure| departure.to_string());
        Self {
            route_id: route.id.to_string(),
            route_name: route.name.to_string(),
            direction: route.direction,
            operator: route.operator.as_ref().map(|val| val.to_string()),
            notes: route.notes.as_ref().map(|val| val.to_string()),
            nearest_stop: StopDto::from(rec.boarding_stop),
            distance_m: rec.distance.as_meters().round() as u64,
            origin_stop: rec.stops.first().map(|stop| StopDto::from(*stop)),
            terminus_stop: rec.stops.last().map(|stop| StopDto::from(*stop)),
            board_time,
            all_departure_times: route
                .departures
                .iter()
                .map(|departure| departure.to_string())
                .collect(),
            route_stops: rec.stops.iter().map(|stop| StopDto::from(*stop)).collect(),
        }
    }
}
