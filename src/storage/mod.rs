//! JSON files: maps, riddle pools and end-of-match reports.

pub mod maps;
pub mod report;
pub mod riddles;

pub use maps::{discover_maps, load_maze, save_maze, KnownMap, KNOWN_MAPS};
pub use report::{export_match_summary, export_mission_report, report_file_name};
pub use riddles::load_riddles;
