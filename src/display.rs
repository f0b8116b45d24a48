use crate::assemble::grid::DAYS;
use crate::assemble::{SpecialtyGrid, StudentScheduleRow};
use crate::gateway::{OptimizationResult, Variant};

/// Cost improvement from the first history point to the final cost, as a
/// percentage. An empty or zero-cost start reports no improvement.
pub fn improvement_percent(result: &OptimizationResult) -> f64 {
    let initial = match result.history.first() {
        Some(point) if point.cost > 0.0 => point.cost,
        _ => return 0.0,
    };
    (initial - result.cost) / initial * 100.0
}

/// Prints the per-variant summary block: final cost, iteration count,
/// initial cost and improvement.
pub fn print_comparison(variant: Variant, result: &OptimizationResult) {
    println!("\n=== {} ===", variant.label());
    println!("  Final Cost:   {:.2}", result.cost);
    println!("  Iterations:   {}", result.history.len());
    if let Some(first) = result.history.first() {
        println!("  Initial Cost: {:.2}", first.cost);
    }
    println!("  Improvement:  {:.1}%", improvement_percent(result));
}

pub fn print_student_schedule(variant: Variant, rows: &[StudentScheduleRow]) {
    println!("\n=== {} - Student Schedule ===", variant.label());
    println!("Total rows: {}", rows.len());
    for row in rows {
        println!(
            "  {} ({}) [{}] -> {} on {} {} in {} with {}",
            row.student_name,
            row.student_id,
            row.specialty,
            row.module_name,
            row.exam_day,
            row.time,
            row.classroom,
            row.instructor
        );
    }
}

pub fn print_timetable(variant: Variant, grid: &SpecialtyGrid) {
    println!(
        "\n=== {} - Timetable ({}) ===",
        variant.label(),
        grid.filter.slug()
    );
    for (time_index, time) in grid.times.iter().enumerate() {
        println!("  {}", time);
        for (day_index, day) in DAYS.iter().enumerate() {
            let cell = grid.cell(time_index, day_index);
            if cell.is_empty() {
                continue;
            }
            for entry in cell {
                println!(
                    "    {} -> {} ({}, {})",
                    day, entry.course, entry.room, entry.instructor
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::CostPoint;

    fn result(history: &[f64], cost: f64) -> OptimizationResult {
        OptimizationResult {
            solution: Vec::new(),
            cost,
            history: history.iter().map(|&cost| CostPoint { cost }).collect(),
        }
    }

    #[test]
    fn improvement_is_relative_to_the_initial_cost() {
        assert_eq!(improvement_percent(&result(&[100.0, 70.0, 60.0], 60.0)), 40.0);
        assert_eq!(improvement_percent(&result(&[50.0], 50.0)), 0.0);
    }

    #[test]
    fn degenerate_histories_report_zero() {
        assert_eq!(improvement_percent(&result(&[], 10.0)), 0.0);
        assert_eq!(improvement_percent(&result(&[0.0], 0.0)), 0.0);
    }
}
