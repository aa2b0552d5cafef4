use crate::cli::MaintenanceArg;
use crate::support::{mutate_or_exit, print_json};
use serde_json::json;

pub fn run(berth_id: String, set: MaintenanceArg, actor: String, state: String, json_output: bool) {
    let on = set == MaintenanceArg::On;
    let berth = mutate_or_exit(&state, |marina| {
        marina
            .set_maintenance(&berth_id, on, &actor)
            .map(|berth| (berth, true))
    });

    if json_output {
        print_json(&json!({
            "action": "maintenance",
            "berth": berth,
        }));
    } else {
        println!(
            "moorings maintenance {berth_id} --set {}",
            if on { "on" } else { "off" }
        );
        println!("  berth: {}", berth.code);
        println!("  status: {}", berth.status);
    }
}
