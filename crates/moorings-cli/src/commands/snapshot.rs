use crate::support::{load_marina_or_exit, print_json};
use serde_json::json;

pub fn run(state: String, json_output: bool) {
    let marina = load_marina_or_exit(&state);
    let snapshot = marina.map_snapshot();

    if json_output {
        print_json(&json!({
            "action": "snapshot",
            "berth_count": snapshot.berths.len(),
            "berths": snapshot.berths,
        }));
    } else {
        println!("moorings snapshot");
        for view in &snapshot.berths {
            match &view.placement {
                Some(placement) => {
                    let vessel = if placement.vessel_name.is_empty() {
                        placement.id.clone()
                    } else {
                        placement.vessel_name.clone()
                    };
                    println!(
                        "  {}  {}  {} ({})",
                        view.berth.code, view.berth.status, vessel, placement.size
                    );
                }
                None => println!("  {}  {}", view.berth.code, view.berth.status),
            }
        }
    }
}
