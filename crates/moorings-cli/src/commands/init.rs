use crate::support::{exit_error, print_json, yes_no};
use moorings_engine::{BerthRegistry, Marina, PlacementLedger, load_layout, save_marina};
use serde_json::json;
use std::path::Path;

pub fn run(layout: String, state: String, force: bool, json_output: bool) {
    let state_path = Path::new(&state);
    let existed = state_path.exists();
    if existed && !force {
        exit_error(format!(
            "state file already exists: {state} (pass --force to overwrite)"
        ));
    }

    let berths = load_layout(&layout).unwrap_or_else(|e| exit_error(e));
    let berth_count = berths.len();
    let registry = BerthRegistry::from_berths(berths).unwrap_or_else(|e| exit_error(e));
    let marina = Marina::from_parts(registry, PlacementLedger::default());
    save_marina(state_path, &marina).unwrap_or_else(|e| exit_error(e));

    if json_output {
        print_json(&json!({
            "action": "init",
            "layout": layout,
            "state": state,
            "berth_count": berth_count,
            "overwrote_existing": existed,
        }));
    } else {
        println!("moorings init {layout}");
        println!("  state: {state}");
        println!("  berths: {berth_count}");
        println!("  overwrote existing: {}", yes_no(existed));
    }
}
