pub mod catalog;
pub mod dataset;
pub mod nearest;
pub mod shared;

pub mod prelude {
    pub use crate::catalog::{Catalog, Direction, Route, Site, Stop};
    pub use crate::dataset::{Config, Dataset};
    pub use crate::nearest::{
        DEFAULT_ROUTE_OPTIONS, Recommendation, find_nearest, find_top_routes,
    };
    pub use crate::shared::geo::{Coordinate, Distance};
    pub use crate::shared::time::{Departure, Time};
}
