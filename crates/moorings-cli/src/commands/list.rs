use crate::support::{exit_error, load_marina_or_exit, print_json};
use serde_json::json;

pub fn run(pontoon: Option<String>, state: String, json_output: bool) {
    let marina = load_marina_or_exit(&state);

    let berths: Vec<_> = match &pontoon {
        Some(key) => {
            if !marina.registry().pontoons().contains(key) {
                exit_error(format!("unknown pontoon: {key}"));
            }
            marina.registry().list_by_pontoon(key)
        }
        None => {
            let mut all: Vec<_> = marina.registry().berths().collect();
            all.sort_by(|a, b| a.code.cmp(&b.code));
            all
        }
    };

    if json_output {
        print_json(&json!({
            "action": "list",
            "pontoon": pontoon,
            "berth_count": berths.len(),
            "berths": berths,
        }));
    } else {
        match &pontoon {
            Some(key) => println!("moorings list --pontoon {key}"),
            None => println!("moorings list"),
        }
        for berth in &berths {
            let boat = berth
                .assigned_boat_id
                .as_deref()
                .map(|id| format!(" [{id}]"))
                .unwrap_or_default();
            println!(
                "  {}  {:11}  {:.1}x{:.1}m{boat}",
                berth.code, berth.status, berth.footprint.width_m, berth.footprint.length_m
            );
        }
        println!("  total: {}", berths.len());
    }
}
