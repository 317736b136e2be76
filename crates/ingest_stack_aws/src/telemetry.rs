//! Synthetic vehicle telemetry, the sample workload pushed through the
//! provisioned event source.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NEEDS_MAINTENANCE")]
    NeedsMaintenance,
}

/// One ingestion record. Field names are the wire contract the processor
/// function inserts into the destination table, so they stay snake_case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryRecord {
    pub vehicle_id: String,
    pub ts: String,
    pub location_lat: f64,
    pub location_long: f64,
    pub speed: f64,
    pub battery_level: f64,
    pub maintenance_status: MaintenanceStatus,
    pub passenger_count: u8,
}

impl TelemetryRecord {
    pub fn sample(rng: &mut impl Rng) -> Self {
        Self {
            vehicle_id: Uuid::new_v4().simple().to_string(),
            ts: Utc::now().to_rfc3339(),
            location_lat: rng.gen_range(-90.0..=90.0),
            location_long: rng.gen_range(-180.0..=180.0),
            speed: rng.gen_range(0.0..=100.0),
            battery_level: rng.gen_range(0.0..=100.0),
            maintenance_status: if rng.gen_bool(0.5) {
                MaintenanceStatus::Ok
            } else {
                MaintenanceStatus::NeedsMaintenance
            },
            passenger_count: rng.gen_range(0..=4),
        }
    }
}
