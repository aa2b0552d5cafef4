use crate::support::{mutate_or_exit, print_json};
use serde_json::json;

pub fn run(berth_id: String, actor: String, state: String, json_output: bool) {
    let berth = mutate_or_exit(&state, |marina| {
        marina.release(&berth_id, &actor).map(|berth| (berth, true))
    });

    if json_output {
        print_json(&json!({
            "action": "release",
            "berth": berth,
        }));
    } else {
        println!("moorings release {berth_id}");
        println!("  berth: {}", berth.code);
        println!("  status: {}", berth.status);
    }
}
