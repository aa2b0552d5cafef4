use moorings_engine::{CommandError, Marina, load_marina, mutate_state_jsonl};
use moorings_model::BoatSize;
use serde_json::Value;
use std::fmt::Display;

pub fn exit_error(message: impl Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

pub fn load_marina_or_exit(state: &str) -> Marina {
    load_marina(state).unwrap_or_else(|e| exit_error(format!("failed to load {state}: {e}")))
}

/// Run one lock-scoped command against the state file, exiting with the
/// command's error message on failure.
pub fn mutate_or_exit<T>(
    state: &str,
    mutator: impl FnOnce(&mut Marina) -> Result<(T, bool), CommandError>,
) -> T {
    mutate_state_jsonl(state, mutator).unwrap_or_else(|e| exit_error(e))
}

pub fn parse_size_or_exit(token: &str) -> BoatSize {
    BoatSize::from_token(token).unwrap_or_else(|| {
        exit_error(format!(
            "unknown boat size {token:?}; expected one of xs, s, m, l, xl"
        ))
    })
}

pub fn print_json(payload: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}

pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}
