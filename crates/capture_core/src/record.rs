#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetCounts {
    pub css: u32,
    pub js: u32,
    pub images: u32,
}

/// A completed capture as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    pub folder_name: String,
    pub original_url: String,
    pub final_url: Option<String>,
    /// ISO-8601 text exactly as reported by the server.
    pub capture_time: String,
    pub assets: AssetCounts,
}

pub(crate) fn find_record<'a>(
    captures: &'a [CaptureRecord],
    folder_name: &str,
) -> Option<&'a CaptureRecord> {
    captures
        .iter()
        .find(|record| record.folder_name == folder_name)
}
