use serde::{Deserialize, Serialize};
use shuttlego::catalog::Site;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteDto {
    pub site_id: String,
    pub site_name: String,
}

impl From<&Site> for SiteDto {
    fn from(site: &Site) -> Self {
        Self {
            site_id: site.id.to_string(),
            site_name: site.name.to_string(),
        }
    }
}
