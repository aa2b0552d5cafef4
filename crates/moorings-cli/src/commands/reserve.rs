use crate::support::{mutate_or_exit, print_json};
use serde_json::json;

pub fn run_reserve(berth_id: String, actor: String, state: String, json_output: bool) {
    let berth = mutate_or_exit(&state, |marina| {
        marina.reserve(&berth_id, &actor).map(|berth| (berth, true))
    });
    report("reserve", &berth, json_output);
}

pub fn run_unreserve(berth_id: String, actor: String, state: String, json_output: bool) {
    let berth = mutate_or_exit(&state, |marina| {
        marina
            .unreserve(&berth_id, &actor)
            .map(|berth| (berth, true))
    });
    report("unreserve", &berth, json_output);
}

fn report(action: &str, berth: &moorings_model::Berth, json_output: bool) {
    if json_output {
        print_json(&json!({
            "action": action,
            "berth": berth,
        }));
    } else {
        println!("moorings {action} {}", berth.id);
        println!("  berth: {}", berth.code);
        println!("  status: {}", berth.status);
        if let Some(boat) = &berth.assigned_boat_id {
            println!("  placement: {boat}");
        }
    }
}
