use crate::support::{load_marina_or_exit, print_json};
use serde_json::json;

pub fn run(state: String, json_output: bool) {
    let marina = load_marina_or_exit(&state);
    let rows = marina.occupancy_by_pontoon();

    if json_output {
        print_json(&json!({
            "action": "occupancy",
            "pontoons": rows,
        }));
    } else {
        println!("moorings occupancy");
        for row in &rows {
            println!(
                "  {}: {}/{} bound ({:.0}%)  free={} occupied={} reserved={} maintenance={}",
                row.pontoon,
                row.occupied + row.reserved,
                row.total,
                row.occupancy_rate * 100.0,
                row.free,
                row.occupied,
                row.reserved,
                row.maintenance
            );
        }
    }
}
