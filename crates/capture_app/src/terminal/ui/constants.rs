pub const PROGRESS_BAR_WIDTH: usize = 20;
pub const RULE: &str = "------------------------------------------------------------";
pub const PROMPT: &str = "> ";
