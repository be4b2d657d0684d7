//! LoadPlan Headless Harness
//!
//! Checks placement behaviour end to end without any front end.
//! Runs entirely in-process: no rendering, no browser.
//!
//! Usage:
//!   cargo run -p loadplan-simtest
//!   cargo run -p loadplan-simtest -- --verbose
//!   cargo run -p loadplan-simtest -- --json
//!   cargo run -p loadplan-simtest -- --config editor.json

use loadplan_editor::intent::Axis;
use loadplan_editor::{Editor, Frame, Intent, Outcome};
use loadplan_logic::command::Direction;
use loadplan_logic::config::{validate_config, EditorConfig};
use loadplan_logic::error::{PlacementError, PlacementWarning};
use loadplan_logic::geometry::{rotated_footprint, Rotation};
use loadplan_logic::package::{Container, Package};
use loadplan_logic::placement::{
    align_to_wall, delete, resize, rotate90, set_absolute_position, ResizeRequest, Wall,
};
use loadplan_logic::stacking::AutoStack;
use serde::Serialize;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Serialize)]
struct Report<'a> {
    passed: usize,
    failed: usize,
    results: &'a [TestResult],
    frame: Option<Frame>,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let json = args.iter().any(|a| a == "--json");
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1));

    let config = match config_path {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Cannot read config {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => EditorConfig::default(),
    };

    println!("=== LoadPlan Placement Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration
    results.extend(validate_configuration(&config, verbose));

    // 2. Footprint geometry
    results.extend(validate_geometry(verbose));

    // 3. Placement operations
    results.extend(validate_placement(verbose));

    // 4. Auto-stack
    results.extend(validate_auto_stack(verbose));

    // 5. Session sweep through the editor shell
    let (session, frame) = validate_session(&config, verbose);
    results.extend(session);

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if json {
        let report = Report {
            passed,
            failed,
            results: &results,
            frame,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Cannot serialize report: {}", e),
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_config(path: &str) -> Result<EditorConfig, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&raw).map_err(|e| e.to_string())
}

fn trailer() -> Container {
    Container {
        length: 13.6,
        width: 2.45,
        height: 2.7,
    }
}

fn package(id: u32, x: f64, depth: f64, stackable: bool) -> Package {
    let mut p = Package::with_defaults(id);
    p.x = x;
    p.depth = depth;
    p.stackable = stackable;
    p
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn find(packages: &[Package], id: u32) -> Option<&Package> {
    packages.iter().find(|p| p.id == id)
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(config: &EditorConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let errors = validate_config(config);
    if verbose {
        println!(
            "  container {}×{}×{}, step {}, clearance {}, auto-stack {}",
            config.container.length,
            config.container.width,
            config.container.height,
            config.move_step,
            config.stack_clearance,
            config.auto_stack
        );
    }
    vec![TestResult {
        name: "config_valid".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            "configuration accepted".into()
        } else {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    }]
}

// ── 2. Geometry ─────────────────────────────────────────────────────────

fn validate_geometry(_verbose: bool) -> Vec<TestResult> {
    println!("--- Footprint Geometry ---");
    let mut results = Vec::new();

    let sizes = [(3.0, 1.2), (0.5, 2.0), (1.0, 1.0), (7.3, 0.25)];

    let swapped = sizes
        .iter()
        .all(|&(w, h)| rotated_footprint(w, h, Rotation::Deg90) == (h, w));
    results.push(TestResult {
        name: "footprint_quarter_turn_swaps".into(),
        passed: swapped,
        detail: "(w, h, 90) == (h, w)".into(),
    });

    let mut periodic = true;
    for &(w, h) in &sizes {
        for deg in (-720_i64..=720).step_by(90) {
            let (Some(r), Some(wrapped)) =
                (Rotation::from_degrees(deg), Rotation::from_degrees(deg + 360))
            else {
                periodic = false;
                continue;
            };
            periodic &= rotated_footprint(w, h, r) == rotated_footprint(w, h, wrapped);
        }
    }
    results.push(TestResult {
        name: "footprint_periodic".into(),
        passed: periodic,
        detail: "footprint(r) == footprint(r + 360) for r in -720..=720".into(),
    });

    let rejects_odd = [45_i64, 91, -30, 1000]
        .iter()
        .all(|&d| Rotation::from_degrees(d).is_none());
    results.push(TestResult {
        name: "rotation_quarter_turns_only".into(),
        passed: rejects_odd,
        detail: "non-multiples of 90 are rejected".into(),
    });

    results
}

// ── 3. Placement ────────────────────────────────────────────────────────

fn validate_placement(_verbose: bool) -> Vec<TestResult> {
    println!("--- Placement ---");
    let mut results = Vec::new();
    let c = trailer();

    // Align to floor is idempotent
    let mut lifted = package(1, 2.0, 1.0, false);
    lifted.z = 1.3;
    let floor_ok = align_to_wall(1, &[lifted], &c, Wall::Floor)
        .and_then(|once| {
            let twice = align_to_wall(1, &once.packages, &c, Wall::Floor)?;
            Ok(once.packages == twice.packages
                && find(&once.packages, 1).is_some_and(|p| p.z == 0.0))
        })
        .unwrap_or(false);
    results.push(TestResult {
        name: "align_floor_idempotent".into(),
        passed: floor_ok,
        detail: "z = 0 after one or two floor aligns".into(),
    });

    // Four quarter turns restore the rotation
    let mut packages = vec![package(1, 1.0, 1.0, false)];
    let mut turned_ok = true;
    for _ in 0..4 {
        match rotate90(1, &packages, &c) {
            Ok(p) => packages = p.packages,
            Err(_) => turned_ok = false,
        }
    }
    let rotation = find(&packages, 1).map(|p| p.rotation);
    results.push(TestResult {
        name: "rotate_four_times".into(),
        passed: turned_ok && rotation == Some(Rotation::Deg0),
        detail: format!("rotation after 4 turns: {:?}", rotation),
    });

    // Absolute position past the end clamps
    let short = [package(1, 0.0, 1.0, false)];
    let far = set_absolute_position(1, &short, &c, (20.0, 0.0, 0.0), AutoStack::Off)
        .ok()
        .and_then(|p| find(&p.packages, 1).map(|p| p.x));
    let mut long = package(1, 0.0, 1.0, false);
    long.width = 20.0;
    let oversized = set_absolute_position(1, &[long], &c, (5.0, 0.0, 0.0), AutoStack::Off)
        .ok()
        .and_then(|p| find(&p.packages, 1).map(|p| p.x));
    results.push(TestResult {
        name: "absolute_position_clamps".into(),
        passed: far.is_some_and(|x| close(x, 10.6)) && oversized == Some(0.0),
        detail: format!("x=20 → {:?}, oversized → {:?}", far, oversized),
    });

    // Undersized resize is a no-op
    let request = ResizeRequest {
        width: Some(0.05),
        ..Default::default()
    };
    let resized = resize(1, &[package(1, 0.0, 1.0, false)], &c, &request);
    results.push(TestResult {
        name: "resize_below_minimum".into(),
        passed: matches!(resized, Err(PlacementError::OutOfRange { field: "width", .. })),
        detail: format!("{:?}", resized.err()),
    });

    // Delete removes exactly one
    let three: Vec<Package> = (1..=3).map(|id| package(id, 0.0, 1.0, false)).collect();
    let left = delete(2, &three);
    let ids: Vec<u32> = left.iter().map(|p| p.id).collect();
    results.push(TestResult {
        name: "delete_one_of_three".into(),
        passed: ids == [1, 3] && delete(2, &left) == left,
        detail: format!("remaining ids {:?}", ids),
    });

    results
}

// ── 4. Auto-stack ───────────────────────────────────────────────────────

fn validate_auto_stack(verbose: bool) -> Vec<TestResult> {
    println!("--- Auto-stack ---");
    let mut results = Vec::new();
    let c = trailer();

    let packages = vec![package(1, 0.0, 1.0, false), package(2, 5.0, 1.0, true)];
    let stacked = set_absolute_position(2, &packages, &c, (1.0, 0.0, 0.0), AutoStack::on());
    let z_on_top = stacked
        .as_ref()
        .ok()
        .and_then(|p| find(&p.packages, 2).map(|p| p.z));
    results.push(TestResult {
        name: "stack_on_support".into(),
        passed: z_on_top.is_some_and(|z| close(z, 1.1)),
        detail: format!("z = {:?} (expected 1.1)", z_on_top),
    });

    let z_away = stacked
        .ok()
        .and_then(|p| {
            set_absolute_position(2, &p.packages, &c, (6.0, 0.0, 1.1), AutoStack::on()).ok()
        })
        .and_then(|p| find(&p.packages, 2).map(|p| p.z));
    results.push(TestResult {
        name: "stack_drops_when_clear".into(),
        passed: z_away == Some(0.0),
        detail: format!("z = {:?} (expected 0.0)", z_away),
    });

    let tall = vec![package(1, 0.0, 1.0, false), package(2, 5.0, 2.0, true)];
    let overflow = set_absolute_position(2, &tall, &c, (1.0, 0.0, 0.0), AutoStack::on());
    let (held, warned) = match &overflow {
        Ok(p) => (
            find(&p.packages, 2).is_some_and(|b| b.z == 0.0 && close(b.x, 1.0)),
            matches!(p.warning, Some(PlacementWarning::StackOverflow { id: 2, .. })),
        ),
        Err(_) => (false, false),
    };
    if verbose {
        if let Ok(Some(w)) = overflow.as_ref().map(|p| p.warning.as_ref()) {
            println!("  overflow warning: {}", w);
        }
    }
    results.push(TestResult {
        name: "stack_overflow_rejected".into(),
        passed: held && warned,
        detail: format!("height held={} warning={}", held, warned),
    });

    results
}

// ── 5. Session ──────────────────────────────────────────────────────────

fn validate_session(config: &EditorConfig, verbose: bool) -> (Vec<TestResult>, Option<Frame>) {
    println!("--- Editor Session ---");
    let mut results = Vec::new();
    let mut editor = match Editor::with_seed(config.clone(), 7) {
        Ok(editor) => editor,
        Err(errors) => {
            results.push(TestResult {
                name: "session_opens".into(),
                passed: false,
                detail: format!("{} config error(s), session refused", errors.len()),
            });
            return (results, None);
        }
    };

    // Every demo order, every package, pushed hard in every direction
    let moves = [
        Intent::Key("ArrowUp".into()),
        Intent::Key("ArrowDown".into()),
        Intent::Key("ArrowLeft".into()),
        Intent::Key("ArrowRight".into()),
        Intent::Key("PageUp".into()),
        Intent::Key("PageDown".into()),
        Intent::Rotate,
        Intent::Slider(Axis::X, 99.0),
        Intent::Slider(Axis::Y, -5.0),
        Intent::Nudge(Direction::ZPlus),
    ];
    let mut escapes = 0;
    let mut rejected = 0;
    for order in 0..20 {
        editor.handle(Intent::LoadOrder(order.to_string()));
        editor.handle(Intent::ToggleAutoStack);
        let ids: Vec<u32> = editor.state().store.list().iter().map(|p| p.id).collect();
        for id in ids {
            editor.handle(Intent::Select(id));
            editor.handle(Intent::ToggleStackable);
            for _ in 0..30 {
                for intent in &moves {
                    if let Outcome::Rejected(_) = editor.handle(intent.clone()) {
                        rejected += 1;
                    }
                }
            }
            let store = &editor.state().store;
            escapes += store
                .list()
                .iter()
                .filter(|p| !p.fits_within(store.container()))
                .count();
        }
    }
    results.push(TestResult {
        name: "session_bounds_hold".into(),
        passed: escapes == 0 && rejected == 0,
        detail: format!("{} packages outside container, {} rejections", escapes, rejected),
    });

    // URL precedence
    editor.handle(Intent::LoadUrl(
        "/?order=3&packages=Crate%2C2%2C1%2C1%2C200%3Bbroken%3BDrum%2C1%2C1%2C1.5%2C90".into(),
    ));
    let names: Vec<String> = editor
        .state()
        .store
        .list()
        .iter()
        .map(|p| p.name.clone())
        .collect();
    results.push(TestResult {
        name: "url_packages_precedence".into(),
        passed: names == ["Crate", "Drum"] && editor.order().is_none(),
        detail: format!("loaded {:?}, warning {:?}", names, editor.last_warning()),
    });

    let frame = editor.frame();
    if verbose {
        println!(
            "  final frame: {} packages, {:.1}% utilised, {} grid cells",
            frame.packages.len(),
            frame.utilization_percent,
            frame.grid.len()
        );
    }

    (results, Some(frame))
}
