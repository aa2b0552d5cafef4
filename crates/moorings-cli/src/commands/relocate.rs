use crate::support::{mutate_or_exit, print_json};
use moorings_model::GeoPoint;
use serde_json::json;

pub fn run(
    placement_id: String,
    lat: f64,
    lng: f64,
    rotation: f64,
    actor: String,
    state: String,
    json_output: bool,
) {
    let placement = mutate_or_exit(&state, |marina| {
        marina
            .relocate(&placement_id, GeoPoint::new(lat, lng), rotation, &actor)
            .map(|placement| (placement, true))
    });

    if json_output {
        print_json(&json!({
            "action": "relocate",
            "placement": placement,
        }));
    } else {
        println!("moorings relocate {placement_id}");
        println!(
            "  position: {} {}",
            placement.position.lat, placement.position.lng
        );
        println!("  rotation: {}", placement.rotation);
        println!("  berth: {}", placement.berth_code);
    }
}
