use crate::{CaptureRecord, DisplayMode, Notice, PaneLayout};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub controls_enabled: bool,
    /// `None` while the progress surface is hidden.
    pub progress: Option<ProgressView>,
    pub success_visible: bool,
    pub notice: Option<Notice>,
    pub captures: Vec<CaptureRecord>,
    pub screen: ScreenView,
    /// Folder awaiting delete confirmation.
    pub pending_delete: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub message: String,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScreenView {
    #[default]
    Welcome,
    Comparison(ComparisonView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonView {
    pub title: String,
    pub folder_name: String,
    /// Post-redirect address, only when it differs from the original.
    pub final_url: Option<String>,
    pub mode: DisplayMode,
    pub original: PaneView,
    pub captured: PaneView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneView {
    pub source: String,
    pub layout: PaneLayout,
}
