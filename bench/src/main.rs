use std::path::Path;
use std::process::Command;

// Configuration
const BINARY_NAME: &str = "harness";
const TEXT_FILES: &[&str] = &["data/mobydick.txt", "data/ipsum.txt"];

const PATTERNS: &[(&str, &str)] = &[
    ("the", "Common Word"),
    ("whale", "Medium Word"),
    ("Moby Dick", "Phrase"),
    ("XYZXYZMISSING", "Not Present"),
];

const ALGORITHMS: &[&str] = &["automaton", "kmp", "rabin-karp"];

#[derive(Debug)]
struct ResultEntry {
    algo: String,
    pattern: String,
    file: String,
    duration_ns: u128,
}

fn main() {
    println!("--- Starting Benchmark Script ---");

    println!("> Building project in release mode...");
    let build_status = Command::new("cargo")
        .args(["build", "--release"])
        .status()
        .expect("Failed to execute cargo build");

    if !build_status.success() {
        eprintln!("Error: Cargo build failed.");
        std::process::exit(1);
    }

    let binary_path = Path::new("target").join("release").join(BINARY_NAME);
    if !binary_path.exists() {
        eprintln!(
            "Error: Binary not found at {:?}. Check crate name.",
            binary_path
        );
        std::process::exit(1);
    }

    let mut results: Vec<ResultEntry> = Vec::new();

    for (pattern, pat_desc) in PATTERNS {
        for algo in ALGORITHMS {
            println!("> Running {} on pattern '{}' ({})", algo, pattern, pat_desc);

            let mut args = vec![
                "--measure-time".to_string(),
                "--pattern".to_string(),
                pattern.to_string(),
                "--algo".to_string(),
                algo.to_string(),
            ];

            for txt in TEXT_FILES {
                args.push("-t".to_string());
                args.push(txt.to_string());
            }

            let output = Command::new(&binary_path)
                .args(&args)
                .output()
                .expect("Failed to run binary");

            if !output.status.success() {
                eprintln!("  ! Algorithm {} failed on pattern {}", algo, pattern);
                let stderr = String::from_utf8_lossy(&output.stderr);
                eprintln!("  ! Error: {}", stderr);
                continue;
            }

            let stdout = String::from_utf8_lossy(&output.stdout);
            let parsed_results = parse_output(&stdout, algo, pattern);
            results.extend(parsed_results);
        }

        run_validation_sweep(&binary_path, pattern);
    }

    print_summary_table(&results);
}

/// Cross-check the three matchers against each other on every text,
/// reporting any divergence line the harness prints.
fn run_validation_sweep(binary_path: &Path, pattern: &str) {
    let mut args = vec![
        "--pattern".to_string(),
        pattern.to_string(),
        "--algo".to_string(),
        "validate".to_string(),
    ];

    for txt in TEXT_FILES {
        args.push("-t".to_string());
        args.push(txt.to_string());
    }

    let output = Command::new(binary_path)
        .args(&args)
        .output()
        .expect("Failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        if line.starts_with("divergence:") {
            eprintln!("  ! Divergence for pattern '{}': {}", pattern, line);
        }
    }
    if !stdout.lines().any(|l| l.starts_with("divergence:")) {
        println!("> Validation passed for pattern '{}'", pattern);
    }
}

/// Pick up `text=` / `execution_time:` line pairs from one harness
/// run. Timing lines that appear before any `text=` line are dropped.
fn parse_output(output: &str, algo: &str, pattern: &str) -> Vec<ResultEntry> {
    let mut entries = Vec::new();
    let mut current_file: Option<String> = None;

    for line in output.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("text=") {
            current_file = Some(rest.trim_matches('"').to_string());
        } else if let Some(rest) = line.strip_prefix("execution_time:") {
            let parsed = rest.trim().trim_end_matches("ns").parse::<u128>();
            if let (Ok(duration_ns), Some(file)) = (parsed, current_file.as_ref()) {
                entries.push(ResultEntry {
                    algo: algo.to_string(),
                    pattern: pattern.to_string(),
                    file: file.clone(),
                    duration_ns,
                });
            }
        }
    }

    entries
}

impl ResultEntry {
    fn summary_row(&self) -> String {
        let micros = self.duration_ns as f64 / 1000.0;
        let short_file = Path::new(&self.file)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let pattern: String = self.pattern.chars().take(12).collect();

        format!(
            "{:<18} | {:<15} | {:<25} | {:>15.2}",
            self.algo, pattern, short_file, micros
        )
    }
}

fn print_summary_table(results: &[ResultEntry]) {
    println!("\n\n{:=^80}", " RESULTS SUMMARY ");
    println!(
        "{:<18} | {:<15} | {:<25} | {:>15}",
        "Algorithm", "Pattern", "File", "Time (µs)"
    );
    println!("{:-^80}", "");

    for entry in results {
        println!("{}", entry.summary_row());
    }
    println!("{:=^80}", " END ");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timing_lines_grouped_by_text() {
        let output = "# algorithm=Kmp, pattern-length=3\n\
                      text=\"data/mobydick.txt\"\n\
                      execution_time: 1234ns\n\
                      matches: [0, 7]\n\
                      \n\
                      text=\"data/ipsum.txt\"\n\
                      execution_time: 99ns\n\
                      matches: []\n";

        let entries = parse_output(output, "kmp", "the");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file, "data/mobydick.txt");
        assert_eq!(entries[0].duration_ns, 1234);
        assert_eq!(entries[1].file, "data/ipsum.txt");
        assert_eq!(entries[1].duration_ns, 99);
    }

    #[test]
    fn timing_without_a_text_line_is_dropped() {
        let entries = parse_output("execution_time: 5ns\n", "kmp", "the");
        assert!(entries.is_empty());
    }

    #[test]
    fn summary_row_shortens_file_and_pattern() {
        let entry = ResultEntry {
            algo: "automaton".to_string(),
            pattern: "a-very-long-pattern".to_string(),
            file: "data/mobydick.txt".to_string(),
            duration_ns: 2_500,
        };

        let row = entry.summary_row();
        assert!(row.contains("mobydick.txt"));
        assert!(row.contains("a-very-long-"));
        assert!(!row.contains("a-very-long-pattern"));
        assert!(row.contains("2.50"));
    }
}
