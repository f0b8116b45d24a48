use std::path::Path;

use exam_timetabler::assemble::{
    all_specialties, build_grid, student_schedule, timetable_entries, SpecialtyFilter,
    SpecialtyGrid,
};
use exam_timetabler::chart::{render_chart_bitmap, render_chart_svg, CAPTURE_SCALE};
use exam_timetabler::display::{print_comparison, print_student_schedule, print_timetable};
use exam_timetabler::export::{
    export_document, specialty_timetable_filename, student_schedule_filename, write_rows_csv,
    ExportMode, TableView, ViewSnapshot,
};
use exam_timetabler::gateway::{RunPipeline, SolverClient, SolverParams, Variant};
use exam_timetabler::records::RecordSlot;
use exam_timetabler::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = args.get(1).cloned().unwrap_or_else(|| "data".to_string());
    let base_url = std::env::var("BACKEND_URL")
        .unwrap_or_else(|_| "http://localhost:5000/api".to_string());

    let mut params = SolverParams::default();
    if let Some(iterations) = args.get(2).and_then(|v| v.parse().ok()) {
        params.max_iterations = iterations;
    }

    let mut state = AppState::new();
    state.set_params(params);

    println!("Loading record sets from {}/ ...", data_dir);
    for entry in std::fs::read_dir(&data_dir)?.flatten() {
        let path = entry.path();
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("");
        if let Some(slot) = RecordSlot::from_name(stem) {
            let text = std::fs::read_to_string(&path).unwrap_or_default();
            let count = state.load_slot(slot, &text);
            println!("  {} -> {} {} loaded", path.display(), count, slot.name());
        }
    }

    if let Err(message) = state.begin_run() {
        println!("{}", message);
        return Ok(());
    }

    // The two solver calls are strictly sequential: the hybrid call is only
    // issued once the traditional call has resolved successfully.
    let client = SolverClient::new(&base_url);
    println!("\n=== Running Optimization (backend: {}) ===", base_url);
    println!("Running {}...", Variant::Traditional.label());
    let mut pipeline = RunPipeline::Pending.apply_traditional(
        client
            .run_variant(Variant::Traditional, &state.store, &state.params)
            .await,
    );
    if pipeline.error().is_none() {
        println!("Running {}...", Variant::Hybrid.label());
        pipeline = pipeline.apply_hybrid(
            client
                .run_variant(Variant::Hybrid, &state.store, &state.params)
                .await,
        );
    }
    state.finish_run(pipeline);

    if let Some(message) = state.run_error() {
        println!("{}", message);
        return Ok(());
    }
    let (traditional, hybrid) = match state.results() {
        Some(results) => results,
        None => return Ok(()),
    };

    let mut written = Vec::new();
    for (variant, result) in [
        (Variant::Traditional, traditional),
        (Variant::Hybrid, hybrid),
    ] {
        print_comparison(variant, result);

        let rows = student_schedule(result, &state.store);
        print_student_schedule(variant, &rows);

        let entries = timetable_entries(result, &state.store);
        let full_grid = build_grid(&entries, SpecialtyFilter::All);
        print_timetable(variant, &full_grid);

        let student_csv = student_schedule_filename(variant);
        write_rows_csv(&rows, Path::new(&student_csv))?;
        written.push(student_csv);

        let mut filters = vec![SpecialtyFilter::All];
        filters.extend(
            all_specialties(&state.store)
                .into_iter()
                .map(SpecialtyFilter::Only),
        );
        for filter in &filters {
            let export_rows = SpecialtyGrid::export_rows(&entries, filter);
            let timetable_csv = specialty_timetable_filename(filter, variant);
            write_rows_csv(&export_rows, Path::new(&timetable_csv))?;
            written.push(timetable_csv);
        }

        let table_pdf = format!("student_schedule_{}.pdf", variant.slug());
        let snapshot = ViewSnapshot::of_table(
            format!("{} - Student Schedule", variant.label()),
            TableView::from_student_rows(&rows),
        );
        export_document(&snapshot, Path::new(&table_pdf), ExportMode::VectorTable)?;
        written.push(table_pdf);
    }

    // Comparison chart: SVG alongside a raster-mode PDF capture.
    let svg = render_chart_svg(&traditional.history, &hybrid.history, None);
    std::fs::write("convergence.svg", svg)?;
    written.push("convergence.svg".to_string());

    let bitmap = render_chart_bitmap(&traditional.history, &hybrid.history, CAPTURE_SCALE);
    let chart_snapshot = ViewSnapshot::of_bitmap("Cost Convergence Comparison", bitmap);
    export_document(
        &chart_snapshot,
        Path::new("convergence_chart.pdf"),
        ExportMode::Raster,
    )?;
    written.push("convergence_chart.pdf".to_string());

    println!("\n=== Exports ===");
    for file in &written {
        println!("  - {}", file);
    }

    Ok(())
}
