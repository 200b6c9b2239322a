use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing::info_span;

use atlas_classify::{
    ClassificationRequest, cascade_filter, classify, export_filename, family_options, map_title,
};
use atlas_cli::export::{ExportFormat, write_outcome};
use atlas_cli::settings::{Settings, save_settings, settings_path};
use atlas_cli::summary::{options_table, print_classification, print_dataset_summary, regions_table};
use atlas_ingest::{LoadedDataset, load_dataset, load_reference_regions, montana_counties};
use atlas_model::{
    BoundaryInput, ColorConfig, ColorSlot, ColorSpec, FilterSelection, MissingYearPolicy,
    ReferenceRegions, Selection,
};

use crate::cli::{
    ClassifyArgs, ColorArgs, DataArgs, ExportFormatArg, MissingYearArg, OptionsArgs,
    RegionsArgs, SettingsArgs,
};

/// Region names from `--regions`, the settings file, or the built-in county list.
fn resolve_regions(args: &RegionsArgs, settings: &Settings) -> Result<ReferenceRegions> {
    match args.regions.as_deref().or(settings.regions_file.as_deref()) {
        Some(path) => load_reference_regions(path)
            .with_context(|| format!("load regions from {}", path.display())),
        None => Ok(montana_counties()),
    }
}

fn load(args: &DataArgs, settings: &Settings) -> Result<(ReferenceRegions, LoadedDataset)> {
    let regions = resolve_regions(&args.regions, settings)?;
    let loaded = load_dataset(&args.data, &regions)
        .with_context(|| format!("load {}", args.data.display()))?;
    Ok((regions, loaded))
}

pub fn run_regions(args: &RegionsArgs, settings: &Settings) -> Result<()> {
    let regions = resolve_regions(args, settings)?;
    println!("{}", regions_table(&regions));
    println!("{} regions", regions.len());
    Ok(())
}

pub fn run_summary(args: &DataArgs, settings: &Settings) -> Result<()> {
    let (_, loaded) = load(args, settings)?;
    let families = family_options(&loaded.dataset);
    print_dataset_summary(&loaded, &families);
    Ok(())
}

pub fn run_options(args: &OptionsArgs, settings: &Settings) -> Result<()> {
    let (_, loaded) = load(&args.data, settings)?;
    let Some(family) = args.family.as_deref().and_then(Selection::parse) else {
        println!("{}", options_table("Family", &family_options(&loaded.dataset)));
        return Ok(());
    };
    let genus = args.genus.as_deref().and_then(Selection::parse);
    let cascade = cascade_filter(&loaded.dataset, &family, genus.as_ref());
    println!("{}", options_table("Genus", &cascade.genera));
    if let Some(species) = &cascade.species {
        println!("{}", options_table("Species", species));
    }
    Ok(())
}

pub fn run_classify(args: &ClassifyArgs, settings: &Settings) -> Result<()> {
    let span = info_span!("classify", data = %args.data.data.display());
    let _guard = span.enter();

    let (regions, loaded) = load(&args.data, settings)?;
    let selection = filter_selection(args)?;
    let colors = {
        let mut colors = settings.colors.clone();
        apply_color_overrides(&args.colors, &mut colors);
        colors
    };
    let missing_year = args
        .missing_year
        .map_or(settings.missing_year, missing_year_policy);

    let request = ClassificationRequest::from_selection(&selection, colors, missing_year)?;
    let outcome = classify(&loaded.dataset, &regions, &request)?;

    let title = map_title(&request.taxon);
    let image_filename = export_filename(
        &request.taxon,
        &request.boundaries,
        Local::now().naive_local(),
    );
    print_classification(&outcome, &title, &image_filename);

    if let Some(path) = &args.output {
        write_outcome(
            path,
            export_format(args.format),
            &outcome,
            &title,
            &image_filename,
        )?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

pub fn run_settings(args: &SettingsArgs, settings: &Settings, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => settings_path().ok_or_else(|| anyhow!("no platform config folder"))?,
    };
    if args.write {
        save_settings(settings, &path)?;
        println!("Wrote {}", path.display());
    } else {
        println!("# {}", path.display());
        print!("{}", toml::to_string_pretty(settings).context("serialize settings")?);
    }
    Ok(())
}

fn filter_selection(args: &ClassifyArgs) -> Result<FilterSelection> {
    let mut selection = FilterSelection::new();
    selection.set_family(args.family.as_deref().and_then(Selection::parse));
    selection.set_genus(args.genus.as_deref().and_then(Selection::parse));
    selection.set_species(args.species.as_deref().and_then(Selection::parse));
    selection.boundaries = match &args.years {
        Some(years) => match years.as_slice() {
            [first, second] => BoundaryInput::Dual {
                first: Some(first.clone()),
                second: Some(second.clone()),
            },
            _ => return Err(anyhow!("--years takes exactly two values")),
        },
        None => BoundaryInput::Single(args.year.clone()),
    };
    Ok(selection)
}

fn apply_color_overrides(args: &ColorArgs, colors: &mut ColorConfig) {
    let overrides = [
        (ColorSlot::Pre, &args.pre),
        (ColorSlot::Post, &args.post),
        (ColorSlot::All, &args.all),
        (ColorSlot::FirstPeriod, &args.first),
        (ColorSlot::SecondPeriod, &args.second),
        (ColorSlot::ThirdPeriod, &args.third),
    ];
    for (slot, value) in overrides {
        if let Some(value) = value {
            colors.set(slot, ColorSpec::new(value.as_str()));
        }
    }
}

fn missing_year_policy(arg: MissingYearArg) -> MissingYearPolicy {
    match arg {
        MissingYearArg::Exclude => MissingYearPolicy::Exclude,
        MissingYearArg::AssumeOlder => MissingYearPolicy::AssumeOlder,
    }
}

fn export_format(arg: ExportFormatArg) -> ExportFormat {
    match arg {
        ExportFormatArg::Json => ExportFormat::Json,
        ExportFormatArg::Csv => ExportFormat::Csv,
    }
}
