use clap::{Parser, ValueEnum};
use linexpr_expr::{Expression, FormatOptions, Term, Variable};
use serde::Serialize;
use std::time::Instant;

const DEFAULT_CASES: [usize; 4] = [100, 1_000, 10_000, 100_000];

#[derive(Parser, Debug)]
#[command(author, version, about = "linexpr expression benchmark runner")]
struct Cli {
    /// Comma-separated list of term counts per expression
    #[arg(long, value_delimiter = ',')]
    terms: Option<Vec<usize>>,

    /// Number of distinct variables terms are drawn from
    #[arg(long, default_value_t = 1_000)]
    variables: usize,

    /// Number of repetitions per case
    #[arg(long, default_value_t = 3)]
    repetitions: u32,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct BenchRecord {
    terms: usize,
    variables: usize,
    repetition: u32,
    aggregated_terms: usize,
    build_ms: f64,
    value_ms: f64,
    render_ms: f64,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.variables == 0 {
        return Err(boxed_input_error("--variables must be greater than zero"));
    }
    if cli.repetitions == 0 {
        return Err(boxed_input_error("--repetitions must be greater than zero"));
    }

    let variables = (0..cli.variables)
        .map(|idx| {
            let variable = Variable::named(format!("x{idx}"));
            variable.set_value(idx as f64 * 0.5);
            variable
        })
        .collect::<Vec<_>>();

    let cases = cli.terms.clone().unwrap_or_else(|| DEFAULT_CASES.to_vec());
    let mut records = Vec::new();
    for terms in cases {
        for repetition in 0..cli.repetitions {
            records.push(execute_case(&variables, terms, repetition));
        }
    }

    match cli.format {
        OutputFormat::Table => print_table(&records),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
    }
    Ok(())
}

fn execute_case(variables: &[Variable], terms: usize, repetition: u32) -> BenchRecord {
    // Walk variables with a stride so later terms revisit earlier variables
    // out of order and exercise aggregation.
    let stride = 7;
    let input = (0..terms)
        .map(|idx| {
            let variable = &variables[(idx * stride) % variables.len()];
            if idx % 5 == 0 {
                Term::Constant(1.0)
            } else {
                Term::Scaled((idx % 13) as f64 - 6.0, variable.clone())
            }
        })
        .collect::<Vec<_>>();

    let started = Instant::now();
    let expr = Expression::from_terms(input);
    let build_ms = elapsed_ms(started);

    let started = Instant::now();
    let value = expr.value();
    let value_ms = elapsed_ms(started);

    let started = Instant::now();
    let rendered = expr.format_with(&FormatOptions::full());
    let render_ms = elapsed_ms(started);

    std::hint::black_box((value, rendered.len()));

    BenchRecord {
        terms,
        variables: variables.len(),
        repetition,
        aggregated_terms: expr.terms().len(),
        build_ms,
        value_ms,
        render_ms,
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1_000.0
}

fn print_table(records: &[BenchRecord]) {
    println!(
        "{:>10} {:>10} {:>4} {:>10} {:>12} {:>12} {:>12}",
        "terms", "variables", "rep", "merged", "build_ms", "value_ms", "render_ms"
    );
    for record in records {
        println!(
            "{:>10} {:>10} {:>4} {:>10} {:>12.3} {:>12.3} {:>12.3}",
            record.terms,
            record.variables,
            record.repetition,
            record.aggregated_terms,
            record.build_ms,
            record.value_ms,
            record.render_ms
        );
    }
}

fn boxed_input_error(message: &str) -> Box<dyn std::error::Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_case_aggregates_repeated_variables() {
        let variables = (0..3).map(|_| Variable::new()).collect::<Vec<_>>();
        let record = execute_case(&variables, 50, 0);
        assert_eq!(record.terms, 50);
        assert_eq!(record.variables, 3);
        assert!(record.aggregated_terms <= 3);
    }

    #[test]
    fn cli_parses_term_cases() {
        let cli = Cli::parse_from(["linexpr-bench", "--terms", "10,20", "--format", "json"]);
        assert_eq!(cli.terms, Some(vec![10, 20]));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.repetitions, 3);
    }
}
