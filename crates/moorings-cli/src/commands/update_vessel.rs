use crate::support::{exit_error, mutate_or_exit, print_json};
use moorings_engine::MetadataPatch;
use serde_json::json;

pub fn run(
    placement_id: String,
    name: Option<String>,
    registration: Option<String>,
    image_url: Option<String>,
    actor: String,
    state: String,
    json_output: bool,
) {
    if name.is_none() && registration.is_none() && image_url.is_none() {
        exit_error("nothing to update; pass at least one of --name, --registration, --image-url");
    }

    let patch = MetadataPatch {
        vessel_name: name,
        vessel_registration: registration,
        vessel_image_url: image_url,
    };
    let placement = mutate_or_exit(&state, |marina| {
        marina
            .update_metadata(&placement_id, patch, &actor)
            .map(|placement| (placement, true))
    });

    if json_output {
        print_json(&json!({
            "action": "update_vessel",
            "placement": placement,
        }));
    } else {
        println!("moorings update-vessel {placement_id}");
        println!("  name: {}", placement.vessel_name);
        println!("  registration: {}", placement.vessel_registration);
        println!("  image url: {}", placement.vessel_image_url);
    }
}
