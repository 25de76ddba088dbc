use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gitfame_chart::{file_extension, render, BarChart, ChartColor, ChartFormat};
use gitfame_core::{FameConfig, FameError, OutputFormat};
use gitfame_stats::commits::{count_commits, AuthorCommits};
use gitfame_stats::ownership::{measure_ownership, AuthorLines, BlameProgress};
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result, WrapErr};

#[derive(Parser)]
#[command(
    name = "gitfame",
    version,
    about = "Per-author commit counts and line ownership, rendered as bar charts",
    long_about = "gitfame walks a git repository and answers two questions:\n\
                   who committed, and whose lines are still in the tree?\n\n\
                   Commit counts come from `git shortlog`; line ownership comes from\n\
                   blaming every tracked file and tallying per-line authorship.\n\
                   Both tallies are printed and rendered as SVG bar charts.\n\n\
                   Examples:\n  \
                     gitfame .                     Analyze the current repository\n  \
                     gitfame ~/src/proj --top 10   Chart only the ten biggest contributors\n  \
                     gitfame . --format json       Machine-readable tallies on stdout\n  \
                     gitfame . --out charts/       Write commits.svg and ownership.svg there"
)]
struct Cli {
    /// Path to the git repository to analyze
    repo_path: PathBuf,

    /// Path to configuration file (default: .gitfame.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for the tally listings
    #[arg(
        long,
        default_value = "text",
        long_help = "Output format for the tally listings on stdout.\n\n\
                       Formats:\n  \
                         text      Terminal bar rows with counts (default)\n  \
                         json      Machine-readable JSON with camelCase keys\n  \
                         markdown  GitHub-flavored Markdown tables"
    )]
    format: OutputFormat,

    /// Directory where chart files are written
    #[arg(long)]
    out: Option<PathBuf>,

    /// Chart only the N highest entries (0 = all)
    #[arg(long)]
    top: Option<usize>,

    /// Skip writing SVG chart files
    #[arg(long)]
    no_charts: bool,

    /// When to use colors
    #[arg(long, default_value = "auto")]
    color: ColorChoice,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Wrap a repository-access failure with a usage hint.
fn repo_diagnostic(err: FameError) -> miette::Report {
    miette::miette!(
        help = "pass a path to an existing git repository work tree",
        "{err}"
    )
}

fn markdown_table<'a>(rows: impl Iterator<Item = (&'a str, u64)>, value_head: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("| Author | {value_head} |\n"));
    out.push_str("|--------|-------:|\n");
    for (author, value) in rows {
        out.push_str(&format!("| {author} | {value} |\n"));
    }
    out
}

fn print_listings(format: OutputFormat, commits: &[AuthorCommits], ownership: &[AuthorLines]) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "commitsByAuthor": commits,
                "linesByAuthor": ownership,
            });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        }
        OutputFormat::Markdown => {
            println!("# Repository Fame\n");
            println!("## Commits per Author\n");
            print!(
                "{}",
                markdown_table(
                    commits.iter().map(|e| (e.author.as_str(), e.commits)),
                    "Commits",
                )
            );
            println!("\n## Lines of Code Owned per Author\n");
            print!(
                "{}",
                markdown_table(
                    ownership.iter().map(|e| (e.author.as_str(), e.lines)),
                    "Lines",
                )
            );
        }
        // Text listings are the rendered terminal charts, printed by the caller
        OutputFormat::Text => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FameConfig::from_file(path)?,
        None => {
            let default_path = std::path::Path::new(".gitfame.toml");
            if default_path.exists() {
                FameConfig::from_file(default_path)?
            } else {
                FameConfig::default()
            }
        }
    };

    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err()
        }
    };

    if cli.verbose {
        eprintln!("format: {}", cli.format);
    }

    let repo = &cli.repo_path;

    eprintln!("Extracting commit data from {}...", repo.display());
    let commits = count_commits(repo).map_err(repo_diagnostic)?;
    eprintln!("Counted {} committing authors.", commits.len());

    eprintln!("Extracting line ownership data...");
    let show_bar = std::io::stderr().is_terminal();
    let mut bar: Option<ProgressBar> = None;
    let mut skipped = 0usize;
    let ownership = measure_ownership(repo, |event| match event {
        BlameProgress::Listed(total) => {
            if show_bar {
                let pb = ProgressBar::new(total as u64);
                let template = if use_color {
                    "{bar:40.cyan/blue} {pos}/{len} {msg}"
                } else {
                    "{bar:40} {pos}/{len} {msg}"
                };
                pb.set_style(ProgressStyle::with_template(template).unwrap());
                bar = Some(pb);
            }
        }
        BlameProgress::Counted(file) => {
            if let Some(pb) = &bar {
                pb.set_message(file.to_string());
                pb.inc(1);
            }
        }
        BlameProgress::Skipped(file, err) => {
            skipped += 1;
            let warning = format!("warning: skipping {file}: {err}");
            match &bar {
                Some(pb) => {
                    pb.println(warning);
                    pb.inc(1);
                }
                None => eprintln!("{warning}"),
            }
        }
    })
    .map_err(repo_diagnostic)?;
    if let Some(pb) = bar.take() {
        pb.finish_and_clear();
    }
    eprintln!("Counted lines for {} authors.", ownership.len());
    if cli.verbose && skipped > 0 {
        eprintln!("{skipped} files could not be blamed and were skipped.");
    }

    print_listings(cli.format, &commits, &ownership)?;

    let commit_color: ChartColor = config
        .charts
        .commit_color
        .parse()
        .map_err(FameError::Config)?;
    let ownership_color: ChartColor = config
        .charts
        .ownership_color
        .parse()
        .map_err(FameError::Config)?;
    let top = cli.top.unwrap_or(config.output.top);

    let mut commit_chart = BarChart::new(
        "Commits per Author",
        "Authors",
        "Number of Commits",
        commit_color,
    )
    .with_size(config.charts.width, config.charts.height);
    for entry in &commits {
        commit_chart.push(entry.author.clone(), entry.commits);
    }
    commit_chart.keep_top(top);

    let mut ownership_chart = BarChart::new(
        "Lines of Code Owned per Author",
        "Authors",
        "Lines of Code",
        ownership_color,
    )
    .with_size(config.charts.width, config.charts.height);
    for entry in &ownership {
        ownership_chart.push(entry.author.clone(), entry.lines);
    }
    ownership_chart.keep_top(top);

    if cli.format == OutputFormat::Text {
        print!("{}", render(&commit_chart, ChartFormat::Text));
        println!();
        print!("{}", render(&ownership_chart, ChartFormat::Text));
    }

    if !cli.no_charts {
        let out_dir = cli.out.unwrap_or_else(|| config.output.dir.clone());
        std::fs::create_dir_all(&out_dir)
            .into_diagnostic()
            .wrap_err(format!("creating {}", out_dir.display()))?;

        for (name, chart) in [("commits", &commit_chart), ("ownership", &ownership_chart)] {
            let path = out_dir.join(format!("{name}.{}", file_extension(ChartFormat::Svg)));
            std::fs::write(&path, render(chart, ChartFormat::Svg))
                .into_diagnostic()
                .wrap_err(format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
    }

    Ok(())
}
