use std::path::{Path, PathBuf};

use clap::Parser;

use cassette_cutlist::config::cli::{Cli, Command, SettingsAction};
use cassette_cutlist::core::format::format_lines;
use cassette_cutlist::domain::model::CalculationResult;
use cassette_cutlist::utils::error::ErrorSeverity;
use cassette_cutlist::utils::{logger, validation::Validate};
use cassette_cutlist::{CutlistEngine, ModelFileAdapter, Result, Settings, SettingsStore};

fn main() {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("🚀 Starting cutlist CLI");

    if let Err(e) = run(cli) {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Calculate {
            model,
            settings,
            json,
            dry_run,
        } => calculate(&model, settings, json, dry_run),
        Command::Selection { model } => selection(&model),
        Command::Settings { action } => match action {
            SettingsAction::Show { settings } => settings_show(settings),
            SettingsAction::Init { settings } => settings_init(settings),
            SettingsAction::Path { settings } => settings_path(settings),
        },
    }
}

fn store_for(path: Option<PathBuf>) -> Result<SettingsStore> {
    match path {
        Some(path) => Ok(SettingsStore::at(path)),
        None => SettingsStore::default_location(),
    }
}

fn calculate(
    model_path: &Path,
    settings_path: Option<PathBuf>,
    json: bool,
    dry_run: bool,
) -> Result<()> {
    let store = store_for(settings_path)?;
    let settings = store.load()?;
    settings.validate()?;

    let adapter = ModelFileAdapter::open(model_path)?;
    display_config_summary(&settings, model_path);

    let mut engine = CutlistEngine::new(settings, adapter);
    let openings = engine.selection()?;
    tracing::info!("📥 Selected {} openings", openings.len());

    let params = engine.calc_params()?;
    let result = engine.calculate(&openings, &params);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_report(&result, openings.len());
    }

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - no annotations written");
        println!("🔍 Dry run: annotations were not written");
        return Ok(());
    }

    let write_success = engine.write_back(&result)?;
    if write_success {
        tracing::info!("✅ Cut-list written to target objects");
        println!("✅ Cut-list written to target objects");
    } else {
        eprintln!("⚠️ Some target objects were not updated");
        std::process::exit(2);
    }

    Ok(())
}

fn selection(model_path: &Path) -> Result<()> {
    let adapter = ModelFileAdapter::open(model_path)?;
    let engine = CutlistEngine::new(Settings::default(), adapter);

    let openings = engine.selection()?;
    println!("📥 {} openings in {}", openings.len(), model_path.display());
    for opening in &openings {
        println!(
            "  {} [{:?}] {:.3} x {:.3} m, sill {:.3} m -> {:?}",
            opening.id,
            opening.kind,
            opening.width,
            opening.height,
            opening.sill_height,
            opening.calc_type
        );
    }

    let duplicates = cassette_cutlist::core::aggregate::find_duplicates(&openings);
    if duplicates.is_empty() {
        println!("  No duplicate identifiers");
    } else {
        println!("⚠️ Duplicate identifiers: {}", duplicates.join(", "));
    }

    Ok(())
}

fn settings_show(settings_path: Option<PathBuf>) -> Result<()> {
    let store = store_for(settings_path)?;
    let settings = store.load()?;

    println!("📋 Settings ({})", store.path().display());
    println!("  Default type: {}", settings.default_type);
    println!("  Wall id for floor height: {}", settings.wall_id_for_floor_height);
    println!("  Floor height: {} m", settings.floor_height);
    println!("  Duplicate warning: {}", settings.show_duplicate_warning);
    println!("  Overflow warning: {}", settings.warn_on_overflow);
    for (label, block) in [("Type 0", &settings.type0), ("Types 1-2", &settings.type1_2)] {
        println!("  {}:", label);
        println!("    Plank width: {} mm", block.plank_width);
        println!("    Slope width: {} mm", block.slope_width);
        println!("    Offsets: X {} / Y {} mm", block.offset_x, block.offset_y);
        if !block.cassette_id.is_empty() {
            println!("    X2 coefficient: {} mm", block.x2_coeff);
            println!("    Cassette target: {}", block.cassette_id);
        }
        println!(
            "    Targets: {} / {} / {}",
            block.plank_id, block.left_slope_id, block.right_slope_id
        );
    }

    Ok(())
}

fn settings_init(settings_path: Option<PathBuf>) -> Result<()> {
    let store = store_for(settings_path)?;
    store.reset()?;
    println!("✅ Default settings written to {}", store.path().display());
    Ok(())
}

fn settings_path(settings_path: Option<PathBuf>) -> Result<()> {
    let store = store_for(settings_path)?;
    println!("{}", store.path().display());
    Ok(())
}

fn display_config_summary(settings: &Settings, model_path: &Path) {
    println!("📋 Configuration Summary:");
    println!("  Model: {}", model_path.display());
    println!(
        "  Plank widths: {} / {} mm (type 0 / types 1-2)",
        settings.type0.plank_width, settings.type1_2.plank_width
    );
    println!(
        "  Slope widths: {} / {} mm",
        settings.type0.slope_width, settings.type1_2.slope_width
    );
    println!(
        "  Offsets: X {} / Y {} / top {} mm",
        settings.type0.offset_x, settings.type0.offset_y, settings.type1_2.x2_coeff
    );
    println!("  Wall id for floor height: {}", settings.wall_id_for_floor_height);
}

fn display_report(result: &CalculationResult, opening_count: usize) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    println!("📊 Cut-list report ({})", timestamp);
    println!("  Openings: {}", opening_count);
    if !result.duplicate_ids.is_empty() {
        println!("  ⚠️ Duplicate identifiers: {}", result.duplicate_ids.join(", "));
    }

    let lines = format_lines(result);
    for (label, section) in [
        ("Cassettes (types 1-2)", &lines.cassette_lines),
        ("Planks (type 0)", &lines.plank_lines0),
        ("Planks (types 1-2)", &lines.plank_lines12),
        ("Left slopes (type 0)", &lines.left_slope_lines0),
        ("Left slopes (types 1-2)", &lines.left_slope_lines12),
        ("Right slopes (type 0)", &lines.right_slope_lines0),
        ("Right slopes (types 1-2)", &lines.right_slope_lines12),
    ] {
        if section.is_empty() {
            continue;
        }
        println!("  {}:", label);
        for line in section {
            println!("    {}", line);
        }
    }
}
