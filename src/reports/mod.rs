use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use gamesense::benchmark::BenchmarkResult;
use gamesense::community::CommunitySummary;
use gamesense::device::DeviceInfo;
use gamesense::sensitivity::{Scope, ScopeTable, SensitivityTables};
use gamesense::stats::StatsSummary;
use gamesense::storage::NOT_AVAILABLE;

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn key_value_table(title: &str, rows: Vec<(String, String)>) -> Table {
    let mut table = base_table();
    table.set_header(vec![
        Cell::new(title).add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);
    for (k, v) in rows {
        table.add_row(vec![Cell::new(k).fg(Color::Green), Cell::new(v)]);
    }
    table
}

pub fn print_device_info(device: &DeviceInfo) {
    let rows = device
        .rows()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    println!("\n{}", key_value_table("Device", rows));
}

/// All three tables side by side, one row per scope.
pub fn print_sensitivity(title: &str, tables: &SensitivityTables) {
    println!("\n=== {} ===", title);
    let mut table = base_table();
    table.set_header(vec![
        Cell::new("Scope").add_attribute(Attribute::Bold),
        Cell::new("Camera").fg(Color::Cyan),
        Cell::new("Firing").fg(Color::Red),
        Cell::new("Gyro").fg(Color::Yellow),
    ]);
    for i in 1..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for scope in Scope::all() {
        let gyro = tables
            .gyro
            .map(|g| format!("{:.1}", g.get(scope)))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(scope.to_string()).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1}", tables.camera.get(scope))),
            Cell::new(format!("{:.1}", tables.firing.get(scope))),
            Cell::new(gyro),
        ]);
    }
    println!("{}", table);
    if tables.gyro.is_none() {
        println!("   Gyro: {}", NOT_AVAILABLE);
    }
}

pub fn print_scope_table(title: &str, values: &ScopeTable) {
    let rows = values
        .iter()
        .map(|(scope, v)| (scope.to_string(), format!("{:.1}", v)))
        .collect();
    println!("\n{}", key_value_table(title, rows));
}

pub fn print_stats(summary: &StatsSummary) {
    let mut rows = vec![
        (
            "Total Calculations".to_string(),
            summary.total_calculations.to_string(),
        ),
        (
            "With Stored Feedback".to_string(),
            summary.feedback_count.to_string(),
        ),
    ];
    for (game, count) in &summary.per_game {
        rows.push((format!("  {}", game), count.to_string()));
    }
    if let Some(latest) = &summary.latest {
        rows.push(("Last Calculation".to_string(), latest.timestamp.clone()));
        rows.push(("Last Game".to_string(), latest.game.to_string()));
        rows.push(("Last Device".to_string(), latest.device.clone()));
        rows.push(("Last Player Style".to_string(), latest.player_style.describe()));
    }
    println!("\n{}", key_value_table("Statistics", rows));

    if let Some(latest) = &summary.latest {
        print_scope_table("Last Camera Sensitivity", &latest.camera_sensitivity);
        print_scope_table("Last Firing Sensitivity", &latest.firing_sensitivity);
        match &latest.gyro_sensitivity {
            Some(gyro) => print_scope_table("Last Gyro Sensitivity", gyro),
            None => println!("\nLast Gyro Sensitivity: {}", NOT_AVAILABLE),
        }
    }
}

pub fn print_community_summary(summary: &CommunitySummary) {
    let rows = vec![
        (
            "Total Contributions".to_string(),
            summary.contributions.to_string(),
        ),
        ("Unique Games".to_string(), summary.unique_games.to_string()),
        (
            "Unique Devices".to_string(),
            summary.unique_devices.to_string(),
        ),
    ];
    println!("\n{}", key_value_table("Community Database", rows));
}

pub fn print_benchmark(result: &BenchmarkResult) {
    fn opt(v: Option<f64>, unit: &str) -> String {
        v.map(|x| format!("{:.2}{}", x, unit))
            .unwrap_or_else(|| "Unavailable".to_string())
    }
    let rows = vec![
        ("Timestamp".to_string(), result.timestamp.clone()),
        ("Frame Rate".to_string(), opt(result.fps, " fps")),
        ("Touch Latency".to_string(), opt(result.touch_latency, " ms")),
        ("Performance Score".to_string(), opt(result.performance_score, "")),
        (
            "Suggested Adjustment".to_string(),
            format!("{:.1}x", result.suggestion()),
        ),
    ];
    println!("\n{}", key_value_table("Benchmark", rows));
}
