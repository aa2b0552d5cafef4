//! Moorings CLI: the `moorings` command.

mod cli;
mod commands;
mod prefs;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            layout,
            state,
            force,
            json,
        } => commands::init::run(layout, state, force, json),

        Commands::Assign {
            berth_id,
            size,
            rotation,
            lat,
            lng,
            name,
            registration,
            image_url,
            actor,
            state,
            json,
        } => commands::assign::run(commands::assign::Args {
            berth_id,
            size,
            rotation,
            lat,
            lng,
            name,
            registration,
            image_url,
            actor,
            state,
            json,
        }),

        Commands::Relocate {
            placement_id,
            lat,
            lng,
            rotation,
            actor,
            state,
            json,
        } => commands::relocate::run(placement_id, lat, lng, rotation, actor, state, json),

        Commands::UpdateVessel {
            placement_id,
            name,
            registration,
            image_url,
            actor,
            state,
            json,
        } => commands::update_vessel::run(
            placement_id,
            name,
            registration,
            image_url,
            actor,
            state,
            json,
        ),

        Commands::Reserve {
            berth_id,
            actor,
            state,
            json,
        } => commands::reserve::run_reserve(berth_id, actor, state, json),

        Commands::Unreserve {
            berth_id,
            actor,
            state,
            json,
        } => commands::reserve::run_unreserve(berth_id, actor, state, json),

        Commands::Release {
            berth_id,
            actor,
            state,
            json,
        } => commands::release::run(berth_id, actor, state, json),

        Commands::Maintenance {
            berth_id,
            set,
            actor,
            state,
            json,
        } => commands::maintenance::run(berth_id, set, actor, state, json),

        Commands::List {
            pontoon,
            state,
            json,
        } => commands::list::run(pontoon, state, json),

        Commands::Free {
            min_size,
            state,
            json,
        } => commands::free::run(min_size, state, json),

        Commands::Occupancy { state, json } => commands::occupancy::run(state, json),

        Commands::Snapshot { state, json } => commands::snapshot::run(state, json),

        Commands::Check { state, json } => commands::audit::run_check(state, json),

        Commands::Repair { state, json } => commands::audit::run_repair(state, json),

        Commands::ViewMode { mode, prefs, json } => commands::view_mode::run(mode, prefs, json),
    }
}
