// Application state for HTTP handlers
use crate::application::report_service::ReportService;
use crate::application::trajectory_service::TrajectoryService;

#[derive(Clone)]
pub struct AppState {
    pub trajectory_service: TrajectoryService,
    pub report_service: ReportService,
}
