//! View state: tabs, loading indicator, results panel.

mod loading;
mod results;
mod tabs;

pub use loading::LoadingGuard;
pub use results::{
    format_confidence, PredictionView, ResultView, NO_MODEL_NOTICE, SUCCESS_HEADLINE,
};
pub use tabs::{TabPanel, TabSet, CAMERA_TAB, UPLOAD_TAB};

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Unknown tab '{0}'")]
    UnknownTab(String),
}
