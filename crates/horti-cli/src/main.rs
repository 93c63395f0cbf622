// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use horti_app::{
    AppCommand, AppState, SelectorKind, SortDirection, SortKey, SortSpec, TableBody, table_view,
};
use horti_data::Loader;
use runtime::SystemOpener;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `horti --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let _log_guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(error) => {
            eprintln!("logging disabled: {error:#}");
            None
        }
    };

    let source = config.data_source(options.source.as_deref())?;
    let loader = Loader::new(source, config.timeout()?).with_context(|| {
        format!(
            "invalid [data] config in {}; fix source/timeout values",
            options.config_path.display()
        )
    })?;
    let tracker = config.tracker()?;
    info!(source = %loader.source(), "starting horti");

    if options.check_only {
        let catalog = loader.load()?;
        println!("{} robots in {}", catalog.len(), loader.source());
        return Ok(());
    }

    let mut state = AppState::default();
    if options.list {
        state.load(loader.load()?);
        apply_initial_view(&mut state, &options);
        for line in list_lines(&state) {
            println!("{line}");
        }
        return Ok(());
    }

    match loader.load() {
        Ok(catalog) => {
            state.load(catalog);
        }
        Err(error) => {
            warn!(error = %format!("{error:#}"), "catalog load failed");
            state.fail_load(format!("{error:#}"));
        }
    }
    apply_initial_view(&mut state, &options);

    let mut runtime = SystemOpener;
    horti_tui::run_app(&mut state, &tracker, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    source: Option<String>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    list: bool,
    show_help: bool,
    query: Option<String>,
    selectors: Vec<(SelectorKind, String)>,
    sort: Option<SortSpec>,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        source: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        list: false,
        show_help: false,
        query: None,
        selectors: Vec::new(),
        sort: None,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str, what: &str| -> Result<String> {
            iter.next()
                .map(|value| value.as_ref().to_owned())
                .ok_or_else(|| anyhow!("{flag} requires {what}"))
        };
        match arg.as_ref() {
            "--config" => {
                options.config_path = PathBuf::from(value_for("--config", "a file path")?);
            }
            "--source" => {
                options.source = Some(value_for("--source", "a URL or file path")?);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--list" => {
                options.list = true;
            }
            "--query" => {
                options.query = Some(value_for("--query", "search text")?);
            }
            "--brand" => {
                let value = value_for("--brand", "a brand")?;
                options.selectors.push((SelectorKind::Brand, value));
            }
            "--crop" => {
                let value = value_for("--crop", "a crop")?;
                options.selectors.push((SelectorKind::Crop, value));
            }
            "--operation" => {
                let value = value_for("--operation", "an operation")?;
                options.selectors.push((SelectorKind::Operation, value));
            }
            "--stage" => {
                let value = value_for("--stage", "a development stage")?;
                options.selectors.push((SelectorKind::Stage, value));
            }
            "--sort" => {
                let value = value_for("--sort", "a column such as price or price:desc")?;
                options.sort = Some(parse_sort_arg(&value)?);
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn parse_sort_arg(raw: &str) -> Result<SortSpec> {
    let (key, direction) = match raw.split_once(':') {
        Some((key, direction)) => (key, Some(direction)),
        None => (raw, None),
    };
    let key = SortKey::parse(key).ok_or_else(|| {
        let known = SortKey::ALL
            .iter()
            .map(|key| key.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        anyhow!("unknown sort column {key:?}; use one of {known}")
    })?;
    let direction = match direction.map(str::trim) {
        None | Some("asc") => SortDirection::Asc,
        Some("desc") => SortDirection::Desc,
        Some(other) => {
            return Err(anyhow!(
                "unknown sort direction {other:?}; use asc or desc"
            ));
        }
    };
    Ok(SortSpec { key, direction })
}

/// Applies the filter and sort flags through the same commands the UI uses.
fn apply_initial_view(state: &mut AppState, options: &CliOptions) {
    if let Some(query) = &options.query {
        state.dispatch(AppCommand::SetQuery(query.clone()));
    }
    for (kind, value) in &options.selectors {
        state.dispatch(AppCommand::SetSelector(*kind, Some(value.clone())));
    }
    if let Some(spec) = options.sort {
        state.dispatch(AppCommand::SortBy(spec.key));
        if spec.direction == SortDirection::Desc {
            state.dispatch(AppCommand::SortBy(spec.key));
        }
    }
}

/// Header plus one tab-separated line per visible robot.
fn list_lines(state: &AppState) -> Vec<String> {
    let view = table_view(state);
    let header = view
        .columns
        .iter()
        .map(|column| column.label)
        .collect::<Vec<_>>()
        .join("\t");

    let mut lines = vec![header];
    if let TableBody::Rows(rows) = view.body {
        for row in rows {
            let [brand, name, crops, operations, _, price] = row.cells();
            let cells = [brand, name, crops, operations, row.stage.text, price];
            lines.push(
                cells
                    .iter()
                    .map(|cell| tsv_cell(cell))
                    .collect::<Vec<_>>()
                    .join("\t"),
            );
        }
    }
    lines
}

fn tsv_cell(value: &str) -> String {
    value
        .chars()
        .map(|ch| if matches!(ch, '\t' | '\n' | '\r') { ' ' } else { ch })
        .collect()
}

fn print_help() {
    println!("horti - browse the horticulture robot catalog");
    println!("  --config <path>          Use a specific config path");
    println!("  --source <url|path>      Load the catalog from this URL or file");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Load the catalog, report the robot count, exit");
    println!("  --list                   Print the table as tab-separated text, no UI");
    println!("  --query <text>           Initial search text");
    println!("  --brand <name>           Initial brand filter");
    println!("  --crop <name>            Initial crop filter");
    println!("  --operation <name>       Initial operation filter");
    println!("  --stage <name>           Initial development stage filter");
    println!("  --sort <column>[:desc]   Sort by brand, name, crops, operations, stage or price");
    println!("  --help                   Show this help");
}
