//! Subcommand implementations. Each writes its result to `out`.

use std::io::{Read, Write};

use anyhow::{bail, Context, Result};
use lexis_core::analyzer::{remove_line_breaks, StopwordSet, TextCounts};
use lexis_core::export::{to_json, write_groups_csv, write_summary_csv, write_table_csv};
use lexis_core::pipeline::{Analysis, Analyzer};
use lexis_core::roster::{partition, GroupPlan, Roster};
use lexis_types::AnalysisConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::{Format, GroupArgs};

pub(crate) fn count<W: Write>(text: &str, out: &mut W) -> Result<()> {
    let counts = TextCounts::of(text);
    writeln!(out, "Word Count: {}", counts.words)?;
    writeln!(out, "Sentence Count: {}", counts.sentences)?;
    Ok(())
}

pub(crate) fn unbreak<W: Write>(text: &str, out: &mut W) -> Result<()> {
    writeln!(out, "{}", remove_line_breaks(text))?;
    Ok(())
}

fn run_analysis(text: &str, cfg: &AnalysisConfig, stopwords: &str) -> Analysis {
    let stopwords = StopwordSet::parse(stopwords);
    Analyzer::new(*cfg).analyze(text, &stopwords)
}

pub(crate) fn freq<W: Write>(
    text: &str,
    cfg: &AnalysisConfig,
    stopwords: &str,
    format: Format,
    chart: Option<usize>,
    out: &mut W,
) -> Result<()> {
    let report = match run_analysis(text, cfg, stopwords) {
        Analysis::Report(report) => report,
        Analysis::NoTokens(stage) => {
            warn!(?stage, "nothing to count");
            writeln!(out, "{stage}")?;
            return Ok(());
        }
    };

    match format {
        Format::Table => {
            writeln!(out, "Unique words: {}", report.table.len())?;
            write!(out, "{}", report.table)?;
        }
        Format::Csv => write_table_csv(&report.table, &mut *out)?,
        Format::Json => writeln!(out, "{}", to_json(&report.table)?)?,
    }

    // Chart rows are plain text, so they only follow table output.
    if let Some(k) = chart {
        if format != Format::Table {
            warn!(?format, "bar chart is only printed with table output");
            return Ok(());
        }
        writeln!(out)?;
        writeln!(out, "Top {} words", report.table.top(k).len())?;
        let widest = report.table.top(k).first().map_or(1, |e| e.count);
        for e in report.table.top(k) {
            // Scale bars to 40 columns relative to the most frequent word.
            let bar = (e.count as u64 * 40 / widest as u64).max(1) as usize;
            writeln!(out, "{:<16} {} {}", e.word.as_str(), "#".repeat(bar), e.count)?;
        }
    }

    Ok(())
}

pub(crate) fn diversity<W: Write>(
    text: &str,
    cfg: &AnalysisConfig,
    stopwords: &str,
    format: Format,
    out: &mut W,
) -> Result<()> {
    let report = match run_analysis(text, cfg, stopwords) {
        Analysis::Report(report) => report,
        Analysis::NoTokens(stage) => {
            warn!(?stage, "nothing to measure");
            writeln!(out, "{stage}")?;
            return Ok(());
        }
    };

    match format {
        Format::Table => write!(out, "{}", report.summary)?,
        Format::Csv => write_summary_csv(&report.summary, &mut *out)?,
        Format::Json => writeln!(out, "{}", to_json(&report.summary.rows())?)?,
    }
    Ok(())
}

pub(crate) fn group<W: Write>(args: &GroupArgs, out: &mut W) -> Result<()> {
    let file = std::fs::File::open(&args.roster)
        .with_context(|| format!("failed to open {}", args.roster.display()))?;
    group_from_reader(file, args, out)
}

fn group_from_reader<R, W>(reader: R, args: &GroupArgs, out: &mut W) -> Result<()>
where
    R: Read,
    W: Write,
{
    let roster = Roster::from_csv_reader(reader, args.positional)
        .with_context(|| format!("invalid roster {}", args.roster.display()))?;

    let Some(course) = &args.course else {
        writeln!(out, "Courses:")?;
        for c in roster.courses() {
            writeln!(out, "  {c}")?;
        }
        return Ok(());
    };

    let plan = match &args.plan {
        Some(spec) => spec.parse::<GroupPlan>()?,
        None => GroupPlan::threes_and_fours(args.threes, args.fours),
    };
    if plan.group_count() == 0 {
        bail!("no groups requested; use --threes/--fours or --plan");
    }

    let mut names = roster.members(course)?;
    if !args.no_shuffle {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        names.shuffle(&mut rng);
    }

    let groups = partition(&names, &plan)?;
    info!(course = course.as_str(), groups = groups.len(), "grouping complete");
    write_groups_csv(&groups, &mut *out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_types::RosterError;

    fn run<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn count_output() {
        let out = run(|o| count("The cat sat. The cat ran!", o));
        assert_eq!(out, "Word Count: 6\nSentence Count: 2\n");
    }

    #[test]
    fn freq_csv() {
        let cfg = AnalysisConfig::default();
        let out = run(|o| freq("The cat sat. The cat ran!", &cfg, "the", Format::Csv, None, o));
        assert_eq!(out, "word,count\ncat,2\nran,1\nsat,1\n");
    }

    #[test]
    fn freq_reports_empty_state() {
        let cfg = AnalysisConfig::default();
        let out = run(|o| freq("the the", &cfg, "the", Format::Table, None, o));
        assert_eq!(out, "No tokens left after applying stop words.\n");
    }

    #[test]
    fn freq_chart_rows() {
        let cfg = AnalysisConfig::default();
        let out = run(|o| freq("a a b c", &cfg, "", Format::Table, Some(2), o));
        assert!(out.contains("Top 2 words"));
        assert!(out.contains(&format!("{:<16} {} 2", "a", "#".repeat(40))));
        assert!(out.contains(&format!("{:<16} {} 1", "b", "#".repeat(20))));
    }

    #[test]
    fn freq_chart_skipped_for_machine_formats() {
        let cfg = AnalysisConfig::default();
        let out = run(|o| freq("a a b c", &cfg, "", Format::Csv, Some(2), o));
        assert_eq!(out, "word,count\na,2\nb,1\nc,1\n");

        let out = run(|o| freq("a a b c", &cfg, "", Format::Json, Some(2), o));
        assert!(!out.contains("Top 2 words"));
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(3));
    }

    const ROSTER: &str = "Course,Name_ori\n\
        EAP,ana\nEAP,ben\nEAP,cho\nEAP,dev\nEAP,eli\nEAP,fay\nEAP,gus\n\
        LIT,hal\n";

    fn group_args() -> GroupArgs {
        GroupArgs {
            roster: "roster.csv".into(),
            course: Some("EAP".to_owned()),
            threes: 1,
            fours: 1,
            plan: None,
            seed: None,
            no_shuffle: false,
            positional: false,
        }
    }

    fn run_group(roster: &str, args: &GroupArgs) -> Result<String> {
        let mut buf = Vec::new();
        group_from_reader(roster.as_bytes(), args, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn group_same_seed_same_groups() {
        let args = GroupArgs {
            seed: Some(7),
            ..group_args()
        };
        let first = run_group(ROSTER, &args).unwrap();
        assert_eq!(run_group(ROSTER, &args).unwrap(), first);
        assert!(first.starts_with("Group,Member1,Member2,Member3,Member4\n"));
        assert_eq!(first.lines().count(), 3);
        assert!(!first.contains("hal"));
    }

    #[test]
    fn group_no_shuffle_keeps_roster_order() {
        let args = GroupArgs {
            no_shuffle: true,
            ..group_args()
        };
        assert_eq!(
            run_group(ROSTER, &args).unwrap(),
            "Group,Member1,Member2,Member3,Member4\n\
             Group 1,ana,ben,cho,\n\
             Group 2,dev,eli,fay,gus\n"
        );
    }

    #[test]
    fn group_explicit_plan() {
        let args = GroupArgs {
            plan: Some("2x3".to_owned()),
            no_shuffle: true,
            ..group_args()
        };
        let out = run_group(ROSTER, &args).unwrap();
        assert!(out.ends_with("Group 3,eli,fay\n"));
    }

    #[test]
    fn group_empty_plan_bails() {
        let args = GroupArgs {
            threes: 0,
            fours: 0,
            ..group_args()
        };
        let err = run_group(ROSTER, &args).unwrap_err();
        assert!(err.to_string().contains("no groups requested"));
    }

    #[test]
    fn group_unknown_course_errors() {
        let args = GroupArgs {
            course: Some("BIO".to_owned()),
            ..group_args()
        };
        let err = run_group(ROSTER, &args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RosterError>(),
            Some(RosterError::UnknownCourse(c)) if c == "BIO"
        ));
    }

    #[test]
    fn group_too_few_members_errors() {
        let args = GroupArgs {
            fours: 2,
            ..group_args()
        };
        let err = run_group(ROSTER, &args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RosterError>(),
            Some(RosterError::NotEnoughMembers {
                requested: 11,
                available: 7
            })
        ));
    }

    #[test]
    fn group_lists_courses_without_course() {
        let args = GroupArgs {
            course: None,
            ..group_args()
        };
        assert_eq!(run_group(ROSTER, &args).unwrap(), "Courses:\n  EAP\n  LIT\n");
    }

    #[test]
    fn group_positional_needs_opt_in() {
        let unlabeled = "class,student\nEAP,ana\nEAP,ben\nEAP,cho\n";
        let args = GroupArgs {
            threes: 1,
            fours: 0,
            no_shuffle: true,
            ..group_args()
        };
        let err = run_group(unlabeled, &args).unwrap_err();
        assert!(matches!(
            err.root_cause().downcast_ref::<RosterError>(),
            Some(RosterError::MissingColumns(_))
        ));

        let args = GroupArgs {
            positional: true,
            ..args
        };
        assert_eq!(
            run_group(unlabeled, &args).unwrap(),
            "Group,Member1,Member2,Member3\nGroup 1,ana,ben,cho\n"
        );
    }

    #[test]
    fn diversity_csv() {
        let cfg = AnalysisConfig::lexical_diversity();
        let out = run(|o| diversity("Hello.", &cfg, "", Format::Csv, o));
        assert!(out.starts_with("metric,value\nTokens (N),1\nTypes (V),1\n"));
        assert!(out.ends_with("Log TTR = log(V)/log(N),\n"));
    }

    #[test]
    fn unbreak_output() {
        let out = run(|o| unbreak("a\r\nb\n\nc", o));
        assert_eq!(out, "a b c\n");
    }
}
