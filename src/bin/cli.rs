use std::io::{self, Write};
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use yoga_log::{
    CourseLog, CourseRecord, FileCourseStore, NewCourse, YearMonth, load_courses_from_json,
    save_courses_to_csv, save_courses_to_json, stats::MonthlyBreakdown,
};

const COURSE_COLUMNS: [&str; 7] = [
    "id", "date", "start", "end", "location", "course", "hours",
];

fn render_courses_table(records: &[CourseRecord]) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(records.len());
    for record in records {
        rows.push(vec![
            record.id.to_string(),
            record.date.format("%Y-%m-%d").to_string(),
            record.start_time.clone(),
            record.end_time.clone(),
            record.location.clone(),
            record.course_name.clone(),
            record.duration.to_string(),
        ]);
    }

    // Compute column widths
    let mut widths: Vec<usize> = COURSE_COLUMNS.iter().map(|n| n.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    // Build horizontal separator
    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    // Header
    out.push('|');
    for (ci, name) in COURSE_COLUMNS.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[ci] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    // Rows
    for row in &rows {
        out.push('|');
        for (ci, cell) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            let pad = widths[ci].saturating_sub(cell.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               List courses, most recent first\n  add <date> <start> <end> <location> <course> [remarks...]\n                                     Log a course (date YYYY-MM-DD, 1 hour)\n  delete <id>                        Delete a course\n  total                              Show total hours taught\n  months                             List selectable months\n  stats <YYYY-MM>                    Hours per location for a month\n  export <csv|json> <path>           Export all courses to a file\n  import json <path>                 Replace all courses from a JSON file\n  quit|exit                          Exit"
    );
}

fn print_breakdown(log: &CourseLog, month: YearMonth) {
    match log.location_breakdown(month) {
        MonthlyBreakdown::NoData => println!("No courses recorded for {month}."),
        MonthlyBreakdown::Locations(entries) => {
            for entry in entries {
                println!("  {:<24} {} h", entry.location, entry.total_hours);
            }
        }
    }
}

fn show_courses(log: &CourseLog) {
    if log.is_empty() {
        println!("No courses logged yet.");
        return;
    }
    let sorted = log.by_date_desc();
    println!("{}", render_courses_table(&sorted));
    for record in sorted.iter().filter(|r| !r.remarks.is_empty()) {
        println!("  #{} remarks: {}", record.id, record.remarks);
    }
}

fn main() {
    let slot = std::env::var("YOGA_LOG_PATH").unwrap_or_else(|_| "yoga_log.json".to_string());
    let store = FileCourseStore::new(&slot);
    let mut log = CourseLog::open(Box::new(store));

    println!("Yoga Course Log (CLI) - type 'help' for commands\n");
    println!("Logged courses: {}, total hours: {}", log.len(), log.total_hours());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() {
            break;
        }
        if line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => {
                print_help();
            }
            "quit" | "exit" => break,
            "show" => {
                show_courses(&log);
            }
            "add" => {
                let date_s = parts.next();
                let start_s = parts.next();
                let end_s = parts.next();
                let location_s = parts.next();
                let course_s = parts.next();
                match (date_s, start_s, end_s, location_s, course_s) {
                    (Some(date_s), Some(start), Some(end), Some(location), Some(course)) => {
                        let date = match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                            Ok(d) => d,
                            Err(_) => {
                                println!("Invalid date (YYYY-MM-DD)");
                                continue;
                            }
                        };
                        let remarks = parts.collect::<Vec<_>>().join(" ");
                        let fields = NewCourse {
                            date,
                            start_time: start.to_string(),
                            end_time: end.to_string(),
                            location: location.to_string(),
                            course_name: course.to_string(),
                            remarks,
                        };
                        match log.add(fields) {
                            Ok(record) => println!("Added course {}.", record.id),
                            Err(e) => println!("Error adding course: {}", e),
                        }
                    }
                    _ => {
                        println!("Usage: add <date> <start> <end> <location> <course> [remarks...]");
                    }
                }
            }
            "delete" => {
                let id_s = parts.next();
                match id_s {
                    Some(id_s) => match id_s.parse::<u64>() {
                        Ok(id) => match log.remove(id) {
                            Ok(true) => println!("Deleted course {id}."),
                            Ok(false) => println!("Course {id} not found."),
                            Err(e) => println!("Error deleting course: {}", e),
                        },
                        Err(_) => println!("Invalid id"),
                    },
                    None => println!("Usage: delete <id>"),
                }
            }
            "total" => {
                println!("Total hours taught: {}", log.total_hours());
            }
            "months" => {
                let today = Local::now().date_naive();
                for month in log.month_options(today) {
                    println!("  {month}");
                }
            }
            "stats" => {
                let month_s = parts.next();
                match month_s {
                    Some(month_s) => match YearMonth::from_str(month_s) {
                        Ok(month) => print_breakdown(&log, month),
                        Err(e) => println!("{e}"),
                    },
                    None => println!("Usage: stats <YYYY-MM>"),
                }
            }
            "export" => {
                let format_s = parts.next();
                let path_s = parts.next();
                match (format_s, path_s) {
                    (Some("csv"), Some(path)) => {
                        match save_courses_to_csv(log.records(), path) {
                            Ok(()) => println!("Courses exported to {path}"),
                            Err(e) => println!("Export failed: {}", e),
                        }
                    }
                    (Some("json"), Some(path)) => {
                        match save_courses_to_json(log.records(), path) {
                            Ok(()) => println!("Courses exported to {path}"),
                            Err(e) => println!("Export failed: {}", e),
                        }
                    }
                    _ => println!("Usage: export <csv|json> <path>"),
                }
            }
            "import" => {
                let format_s = parts.next();
                let path_s = parts.next();
                match (format_s, path_s) {
                    (Some("json"), Some(path)) => match load_courses_from_json(path) {
                        Ok(records) => {
                            let count = records.len();
                            match log.replace_all(records) {
                                Ok(()) => println!("Imported {count} courses from {path}"),
                                Err(e) => println!("Error saving imported courses: {}", e),
                            }
                        }
                        Err(e) => println!("Import failed: {}", e),
                    },
                    _ => println!("Usage: import json <path>"),
                }
            }
            other => {
                println!("Unknown command '{other}' - type 'help' for commands");
            }
        }
    }
}
