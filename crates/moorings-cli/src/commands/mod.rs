pub mod assign;
pub mod audit;
pub mod free;
pub mod init;
pub mod list;
pub mod maintenance;
pub mod occupancy;
pub mod release;
pub mod relocate;
pub mod reserve;
pub mod snapshot;
pub mod update_vessel;
pub mod view_mode;
