use crate::support::{load_marina_or_exit, parse_size_or_exit, print_json};
use serde_json::json;

pub fn run(min_size: String, state: String, json_output: bool) {
    let min = parse_size_or_exit(&min_size);
    let marina = load_marina_or_exit(&state);
    let berths = marina.free_berths_with_min_size(min);

    if json_output {
        print_json(&json!({
            "action": "free",
            "min_size": min.as_str(),
            "berth_count": berths.len(),
            "berths": berths,
        }));
    } else {
        println!("moorings free --min-size {min}");
        for berth in &berths {
            let fits = berth
                .max_admissible_size()
                .map(|size| size.as_str())
                .unwrap_or("none");
            println!("  {}  up to {fits}", berth.code);
        }
        println!("  total: {}", berths.len());
    }
}
