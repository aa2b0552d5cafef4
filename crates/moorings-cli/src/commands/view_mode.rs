use crate::cli::ViewModeArg;
use crate::prefs::{ViewMode, load_prefs, save_prefs};
use crate::support::{exit_error, print_json};
use serde_json::json;

pub fn run(mode: Option<ViewModeArg>, prefs_path: String, json_output: bool) {
    let mut prefs = load_prefs(&prefs_path).unwrap_or_else(|e| exit_error(e));

    let changed = match mode {
        Some(arg) => {
            prefs.view_mode = match arg {
                ViewModeArg::Desktop => ViewMode::Desktop,
                ViewModeArg::Mobile => ViewMode::Mobile,
            };
            save_prefs(&prefs_path, &prefs).unwrap_or_else(|e| exit_error(e));
            true
        }
        None => false,
    };

    if json_output {
        print_json(&json!({
            "action": "view_mode",
            "view_mode": prefs.view_mode.as_str(),
            "changed": changed,
        }));
    } else {
        println!("moorings view-mode");
        println!("  view mode: {}", prefs.view_mode.as_str());
    }
}
