pub const APP_TITLE: &str = "Job Portal";
pub const APP_TAGLINE: &str = "Find your next opportunity or post a new one!";

pub const SECTION_POST: &str = "Post a New Job";
pub const SECTION_FIND: &str = "Find Jobs";
pub const SECTION_OPENINGS: &str = "Available Job Openings";

pub const LABEL_PROFILE: &str = "Job Profile / Title";
pub const LABEL_DESC: &str = "Description";
pub const LABEL_EXP: &str = "Experience (Years)";
pub const LABEL_TECHS: &str = "Technologies (comma-separated)";
pub const LABEL_SEARCH: &str = "Search by keyword";

pub const BUTTON_ADD: &str = "Add Job Post";
pub const BUTTON_ADD_PENDING: &str = "Adding...";
pub const BUTTON_SEARCH: &str = "Search";
pub const BUTTON_SEARCH_PENDING: &str = "Searching...";
pub const BUTTON_SHOW_ALL: &str = "Show All";

pub const RULE: &str = "----------------------------------------";
