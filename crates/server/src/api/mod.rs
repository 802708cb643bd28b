mod shuttle;
mod sites;

pub use shuttle::*;
pub use sites::*;

pub async fn health() -> &'static str {
    "ok"
}
