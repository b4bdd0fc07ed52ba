use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::Args;
use grant_eligibility::config::AppConfig;
use grant_eligibility::eligibility::{
    EligibilityEngine, EligibilityResult, GrantFamily, ResearcherRecord, RosterNotice,
};
use grant_eligibility::error::AppError;
use grant_eligibility::roster::hr_update::{StaffListUpdate, DEFAULT_RESEARCHER_FUNCTIONS};
use grant_eligibility::roster::synthetic::consecutive_defense_dates;
use grant_eligibility::roster::RosterImporter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Researchers roster CSV
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Where to write the augmented roster (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Processing date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct HrUpdateArgs {
    /// HR staff export CSV
    #[arg(long)]
    pub(crate) hr: PathBuf,
    /// Previous researchers roster CSV
    #[arg(long)]
    pub(crate) researchers: PathBuf,
    /// Where to write the refreshed roster (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Function keyword marking a researcher position. Repeat to add more;
    /// the built-in list is used when none are given.
    #[arg(long)]
    pub(crate) function: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// First PhD defense date of the generated roster (YYYY-MM-DD).
    /// Defaults to straddling the Veni/Vidi boundary of the processing year.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Number of researchers, one defense date per day
    #[arg(long, default_value_t = 30)]
    pub(crate) days: usize,
    /// Processing date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        roster,
        output,
        today,
    } = args;

    let config = AppConfig::load()?;
    let engine = EligibilityEngine::new(config.policy);
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let roster = RosterImporter::from_path(&roster)?;
    let evaluation = engine.evaluate_roster(roster.records(), today);

    let to_stdout = output.is_none();
    roster.write_with_eligibility(&evaluation.results, open_output(output)?)?;

    if to_stdout {
        render_notices(&mut io::stderr(), &evaluation.notices)?;
    } else {
        println!("Evaluated {} researchers as of {}", roster.len(), today);
        render_notices(&mut io::stdout(), &evaluation.notices)?;
    }

    Ok(())
}

pub(crate) fn run_hr_update(args: HrUpdateArgs) -> Result<(), AppError> {
    let HrUpdateArgs {
        hr,
        researchers,
        output,
        function,
    } = args;

    let functions = if function.is_empty() {
        DEFAULT_RESEARCHER_FUNCTIONS
            .iter()
            .map(|keyword| keyword.to_string())
            .collect()
    } else {
        function
    };

    let update =
        StaffListUpdate::from_readers(File::open(hr)?, File::open(researchers)?, &functions)?;

    let to_stdout = output.is_none();
    update.write(open_output(output)?)?;

    if to_stdout {
        render_notices(&mut io::stderr(), &update.notices)?;
    } else {
        println!("Refreshed roster holds {} researchers", update.rows.len());
        render_notices(&mut io::stdout(), &update.notices)?;
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { start, days, today } = args;

    let config = AppConfig::load()?;
    let engine = EligibilityEngine::new(config.policy);
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let start = match start {
        Some(start) => start,
        None => NaiveDate::from_ymd_opt(today.year() - 3, 1, 1)
            .and_then(|boundary| boundary.checked_sub_signed(Duration::days(days as i64 / 2)))
            .unwrap_or(today),
    };

    let records = consecutive_defense_dates(start, days, today);
    let evaluation = engine.evaluate_roster(&records, today);

    println!("Grant eligibility demo");
    println!(
        "{} researchers defending daily from {} evaluated as of {}\n",
        records.len(),
        start,
        today
    );
    let mut stdout = io::stdout();
    render_results(&mut stdout, &records, &evaluation.results)?;
    render_notices(&mut stdout, &evaluation.notices)?;

    Ok(())
}

fn open_output(output: Option<PathBuf>) -> Result<Box<dyn Write>, AppError> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}

fn render_results<W: Write>(
    out: &mut W,
    records: &[ResearcherRecord],
    results: &[EligibilityResult],
) -> io::Result<()> {
    write!(out, "{:<12}", "PhD defense")?;
    for family in GrantFamily::ALL {
        write!(out, "  {:<20}", family.column())?;
    }
    writeln!(out)?;

    for (record, result) in records.iter().zip(results) {
        write!(out, "{:<12}", record.phd_defense_date.as_deref().unwrap_or("-"))?;
        for (_, label) in result.iter() {
            let text = label.map(ToString::to_string).unwrap_or_else(|| "-".to_string());
            write!(out, "  {:<20}", text)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_notices<W: Write>(out: &mut W, notices: &[RosterNotice]) -> io::Result<()> {
    if notices.is_empty() {
        return Ok(());
    }

    writeln!(out, "\nNotices ({})", notices.len())?;
    for notice in notices {
        writeln!(out, "- {}", notice.message())?;
    }
    Ok(())
}
