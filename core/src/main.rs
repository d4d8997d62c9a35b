use clap::Parser;
use log::{error, info};
use std::process;

use ctcurate_core::cli::{Cli, Command, LabelArgs, OutputFormat, QualifyArgs, RegisterArgs};
use ctcurate_core::pipeline::{
    collect_series, find_study_paths, register_data_source, run_labeling, LabelOptions,
    RegisterOptions,
};
use ctcurate_core::{qualify_study, SplitConfig, StudyQualification, TextReport};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        Command::Register(args) => run_register(args),
        Command::Label(args) => run_label(args),
        Command::Qualify(args) => run_qualify(args),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn run_register(args: RegisterArgs) -> ctcurate_core::Result<()> {
    if !args.src_dir.is_dir() {
        eprintln!("Error: {} is not a directory", args.src_dir.display());
        process::exit(1);
    }

    let opts = RegisterOptions {
        src_dir: args.src_dir,
        datasources_root: args.root,
        data_source: args.datasource_name,
        overwrite: args.overwrite,
        qualify: args.criteria.to_config(),
    };
    let dst = register_data_source(&opts)?;
    info!("data source registered at {}", dst.display());
    println!("{}", dst.display());
    Ok(())
}

fn run_label(args: LabelArgs) -> ctcurate_core::Result<()> {
    let opts = LabelOptions {
        labels_csv: args.csv_file,
        datasources_root: args.root,
        task_dir: args.tasks_root.join(&args.task_name),
        pinned_split: args.split.map(Into::into),
        split: SplitConfig::default()
            .with_eval_fraction(args.eval_fraction)
            .with_seed(args.seed),
    };
    let table_path = run_labeling(&opts)?;
    println!("{}", table_path.display());
    Ok(())
}

fn run_qualify(args: QualifyArgs) -> ctcurate_core::Result<()> {
    if !args.src_dir.is_dir() {
        eprintln!("Error: {} is not a directory", args.src_dir.display());
        process::exit(1);
    }

    let cfg = args.criteria.to_config();
    let mut studies = Vec::new();
    for study_path in find_study_paths(&args.src_dir)? {
        let groups = collect_series(&study_path)?;
        let candidates: Vec<_> = groups.iter().map(|g| g.to_candidate()).collect();
        let qualified = qualify_study(&candidates, &cfg);
        studies.push(StudyQualification {
            study_path,
            total_series: groups.len(),
            qualified,
        });
    }

    output_studies(&studies, args.format);
    Ok(())
}

fn output_studies(studies: &[StudyQualification], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("{}", TextReport::new(studies));
        }
        OutputFormat::Uids => {
            for study in studies {
                for uid in &study.qualified {
                    println!("{}", uid);
                }
            }
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(studies) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
