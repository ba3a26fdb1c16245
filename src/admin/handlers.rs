use axum::{extract::State, Json};
use serde::Serialize;

use crate::admin::AdminState;
use crate::routing::mount::MountInfo;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct MountsSummary {
    /// `where` of the first mount, `/` when none are configured.
    pub prefix: String,
    pub parametric: bool,
    pub mounts: Vec<MountInfo>,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn get_mounts(State(state): State<AdminState>) -> Json<MountsSummary> {
    let table = state.resolver.table();
    Json(MountsSummary {
        prefix: table.mount_prefix().to_string(),
        parametric: table.has_parametric_mounts(),
        mounts: table.info(),
    })
}
