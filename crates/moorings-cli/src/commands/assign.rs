use crate::support::{exit_error, mutate_or_exit, parse_size_or_exit, print_json};
use moorings_engine::AssignRequest;
use moorings_model::GeoPoint;
use serde_json::json;

#[derive(Debug)]
pub struct Args {
    pub berth_id: String,
    pub size: String,
    pub rotation: f64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub name: Option<String>,
    pub registration: Option<String>,
    pub image_url: Option<String>,
    pub actor: String,
    pub state: String,
    pub json: bool,
}

pub fn run(args: Args) {
    let size = parse_size_or_exit(&args.size);
    let position = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        (None, None) => None,
        _ => exit_error("--lat and --lng must be given together"),
    };

    let mut request = AssignRequest::new(&args.berth_id, size, &args.actor);
    request.rotation = args.rotation;
    request.position = position;
    request.vessel_name = args.name.unwrap_or_default();
    request.vessel_registration = args.registration.unwrap_or_default();
    request.vessel_image_url = args.image_url.unwrap_or_default();

    let placement = mutate_or_exit(&args.state, |marina| {
        marina.assign(request).map(|placement| (placement, true))
    });

    if args.json {
        print_json(&json!({
            "action": "assign",
            "placement": placement,
        }));
    } else {
        println!("moorings assign {}", args.berth_id);
        println!("  placement: {}", placement.id);
        println!("  berth: {} ({})", placement.berth_code, placement.berth_id);
        println!("  size: {}", placement.size);
        println!("  rotation: {}", placement.rotation);
        if !placement.vessel_name.is_empty() {
            println!("  vessel: {}", placement.vessel_name);
        }
        println!("  placed by: {}", placement.placed_by);
    }
}
