use clap::{Parser, Subcommand, ValueEnum};

pub const DEFAULT_STATE_PATH: &str = ".moorings/marina.jsonl";

#[derive(Parser)]
#[command(
    name = "moorings",
    about = "Moorings: berth occupancy and placement tracking for a marina",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a marina state file from a TOML layout
    Init {
        /// Path to the layout TOML declaring the berths
        layout: String,

        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign a boat to a free berth
    Assign {
        /// Berth ID to occupy
        berth_id: String,

        /// Boat size class: xs, s, m, l, or xl
        #[arg(long)]
        size: String,

        /// Heading in degrees (compass, clockwise from north)
        #[arg(long, default_value_t = 0.0)]
        rotation: f64,

        /// Depicted latitude (defaults to the berth anchor)
        #[arg(long)]
        lat: Option<f64>,

        /// Depicted longitude (defaults to the berth anchor)
        #[arg(long)]
        lng: Option<f64>,

        /// Vessel name
        #[arg(long)]
        name: Option<String>,

        /// Vessel registration number
        #[arg(long)]
        registration: Option<String>,

        /// Vessel image URL
        #[arg(long)]
        image_url: Option<String>,

        /// Operator recorded as the placer
        #[arg(long, default_value = "cli")]
        actor: String,

        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move a placed boat to a new position and heading
    Relocate {
        /// Placement ID to move
        placement_id: String,

        /// New depicted latitude
        #[arg(long)]
        lat: f64,

        /// New depicted longitude
        #[arg(long)]
        lng: f64,

        /// New heading in degrees
        #[arg(long, default_value_t = 0.0)]
        rotation: f64,

        /// Operator recorded as the placer
        #[arg(long, default_value = "cli")]
        actor: String,

        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update vessel metadata on a placement
    UpdateVessel {
        /// Placement ID to update
        placement_id: String,

        /// New vessel name (empty string clears it)
        #[arg(long)]
        name: Option<String>,

        /// New registration number (empty string clears it)
        #[arg(long)]
        registration: Option<String>,

        /// New image URL (empty string clears it)
        #[arg(long)]
        image_url: Option<String>,

        /// Operator performing the update
        #[arg(long, default_value = "cli")]
        actor: String,

        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark an occupied berth as reserved
    Reserve {
        /// Berth ID to reserve
        berth_id: String,

        /// Operator performing the reservation
        #[arg(long, default_value = "cli")]
        actor: String,

        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Return a reserved berth to plain occupied
    Unreserve {
        /// Berth ID to unreserve
        berth_id: String,

        /// Operator performing the change
        #[arg(long, default_value = "cli")]
        actor: String,

        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Release a berth: remove its placement and free it
    Release {
        /// Berth ID to release
        berth_id: String,

        /// Operator performing the release
        #[arg(long, default_value = "cli")]
        actor: String,

        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle maintenance on an empty berth
    Maintenance {
        /// Berth ID to toggle
        berth_id: String,

        /// Maintenance state: on or off
        #[arg(long, value_enum)]
        set: MaintenanceArg,

        /// Operator performing the change
        #[arg(long, default_value = "cli")]
        actor: String,

        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List berths, optionally filtered by pontoon
    List {
        /// Pontoon key to filter by
        #[arg(long)]
        pontoon: Option<String>,

        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List free berths that admit at least a given boat size
    Free {
        /// Minimum boat size class: xs, s, m, l, or xl
        #[arg(long, default_value = "xs")]
        min_size: String,

        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Occupancy summary per pontoon
    Occupancy {
        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Full map snapshot: berths joined with their placements
    Snapshot {
        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify store invariants without mutating anything
    Check {
        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite drifted berth status from placement ground truth
    Repair {
        /// Path to the marina state JSONL
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read or set the preferred map view mode
    ViewMode {
        /// New mode; omit to print the current one
        #[arg(value_enum)]
        mode: Option<ViewModeArg>,

        /// Path to the preferences TOML
        #[arg(long, default_value = ".moorings/prefs.toml")]
        prefs: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MaintenanceArg {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewModeArg {
    Desktop,
    Mobile,
}
