use crate::support::{load_marina_or_exit, mutate_or_exit, print_json};
use moorings_engine::{check, repair};
use serde_json::json;

pub fn run_check(state: String, json_output: bool) {
    let marina = load_marina_or_exit(&state);
    let report = check(&marina);

    if json_output {
        print_json(&json!({
            "action": "check",
            "state": state,
            "report": report,
        }));
    } else {
        println!("moorings check");
        println!("  result: {}", report.result);
        for finding in &report.findings {
            println!(
                "  [{}] {}: {}",
                finding.failure_class, finding.subject, finding.message
            );
        }
    }

    if !report.is_consistent() {
        std::process::exit(1);
    }
}

pub fn run_repair(state: String, json_output: bool) {
    let actions = mutate_or_exit(&state, |marina| {
        let actions = repair(marina);
        let changed = !actions.is_empty();
        Ok((actions, changed))
    });

    if json_output {
        print_json(&json!({
            "action": "repair",
            "state": state,
            "repaired_count": actions.len(),
            "repairs": actions,
        }));
    } else {
        println!("moorings repair");
        for action in &actions {
            println!(
                "  {}: {} -> {} (boat: {})",
                action.berth_id,
                action.from_status,
                action.to_status,
                action.assigned_boat_id.as_deref().unwrap_or("none")
            );
        }
        println!("  repaired: {}", actions.len());
    }
}
