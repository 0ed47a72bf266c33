use crate::record::CaptureRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Split,
    Original,
    Captured,
}

impl DisplayMode {
    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Split => "split",
            DisplayMode::Original => "original",
            DisplayMode::Captured => "captured",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub visible: bool,
    pub width_percent: u8,
}

impl PaneLayout {
    const HIDDEN: Self = Self {
        visible: false,
        width_percent: 0,
    };

    fn shown(width_percent: u8) -> Self {
        Self {
            visible: true,
            width_percent,
        }
    }
}

/// Side-by-side viewer for one completed capture.
///
/// Both content sources are fixed when the controller is opened; switching
/// modes only changes pane layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonController {
    record: CaptureRecord,
    captured_url: String,
    mode: DisplayMode,
}

impl ComparisonController {
    pub fn open(record: CaptureRecord, captured_url: impl Into<String>) -> Self {
        Self {
            record,
            captured_url: captured_url.into(),
            mode: DisplayMode::default(),
        }
    }

    /// Address the original ended up at, when the server followed a redirect.
    pub fn final_url(&self) -> Option<&str> {
        self.record
            .final_url
            .as_deref()
            .filter(|url| *url != self.record.original_url)
    }

    pub fn folder_name(&self) -> &str {
        &self.record.folder_name
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn title(&self) -> String {
        format!("Comparing: {}", self.record.original_url)
    }

    pub fn original_source(&self) -> &str {
        &self.record.original_url
    }

    pub fn captured_source(&self) -> &str {
        &self.captured_url
    }

    /// Returns `true` when the mode actually changed.
    pub fn set_mode(&mut self, mode: DisplayMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    /// Layout of the (original, captured) panes for the current mode.
    pub fn panes(&self) -> (PaneLayout, PaneLayout) {
        match self.mode {
            DisplayMode::Split => (PaneLayout::shown(50), PaneLayout::shown(50)),
            DisplayMode::Original => (PaneLayout::shown(100), PaneLayout::HIDDEN),
            DisplayMode::Captured => (PaneLayout::HIDDEN, PaneLayout::shown(100)),
        }
    }

    /// Address to open in a separate tab: the already-resolved captured content.
    pub fn new_tab_target(&self) -> Option<&str> {
        (!self.captured_url.is_empty()).then_some(self.captured_url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{ComparisonController, DisplayMode, PaneLayout};
    use crate::record::{AssetCounts, CaptureRecord};

    fn controller() -> ComparisonController {
        ComparisonController::open(
            CaptureRecord {
                folder_name: "example_com_1".to_string(),
                original_url: "https://example.com".to_string(),
                final_url: None,
                capture_time: "2024-05-01T10:00:00".to_string(),
                assets: AssetCounts::default(),
            },
            "http://localhost:5001/captured/example_com_1/index.html",
        )
    }

    #[test]
    fn opens_in_split_mode_with_half_width_panes() {
        let comparison = controller();
        assert_eq!(comparison.mode(), DisplayMode::Split);
        let (original, captured) = comparison.panes();
        assert_eq!(original, PaneLayout { visible: true, width_percent: 50 });
        assert_eq!(captured, PaneLayout { visible: true, width_percent: 50 });
    }

    #[test]
    fn single_pane_modes_use_full_width() {
        let mut comparison = controller();

        assert!(comparison.set_mode(DisplayMode::Original));
        let (original, captured) = comparison.panes();
        assert_eq!(original.width_percent, 100);
        assert!(!captured.visible);

        assert!(comparison.set_mode(DisplayMode::Captured));
        let (original, captured) = comparison.panes();
        assert!(!original.visible);
        assert_eq!(captured.width_percent, 100);
    }

    #[test]
    fn switching_to_the_same_mode_is_idempotent() {
        let mut comparison = controller();
        comparison.set_mode(DisplayMode::Captured);
        let before = comparison.clone();
        assert!(!comparison.set_mode(DisplayMode::Captured));
        assert_eq!(comparison, before);
    }

    #[test]
    fn new_tab_reuses_captured_address() {
        let comparison = controller();
        assert_eq!(
            comparison.new_tab_target(),
            Some("http://localhost:5001/captured/example_com_1/index.html")
        );
        assert_eq!(comparison.title(), "Comparing: https://example.com");
    }
}
