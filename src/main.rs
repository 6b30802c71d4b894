use clap::Parser;
use pom_updater::config::LogFormat;
use pom_updater::utils::error::{ErrorSeverity, UpdaterError};
use pom_updater::utils::{logger, validation::Validate};
use pom_updater::{CliConfig, FileOutcome, LocalStorage, PomPipeline, RunReport, UpdateEngine};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.log_format {
        LogFormat::Text => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting pom-updater");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入並驗證釘選設定
    let pins = match config.pin_config().and_then(|pins| pins.validate().map(|_| pins)) {
        Ok(pins) => pins,
        Err(e) => exit_with(&e),
    };
    let root = match config.root_dir() {
        Ok(root) => root,
        Err(e) => exit_with(&e),
    };

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - descriptors will not be written");
    }

    let pipeline = PomPipeline::new(LocalStorage::new(), pins.clone()).with_dry_run(config.dry_run);
    let engine = UpdateEngine::new(pipeline, pins.target_file.as_str()).with_fail_fast(config.fail_fast);

    let report = match engine.run(&root) {
        Ok(report) => report,
        Err(e) => exit_with(&e),
    };

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, config.dry_run);
    }

    if report.has_failures() {
        std::process::exit(2);
    }
    Ok(())
}

fn exit_with(e: &UpdaterError) -> ! {
    tracing::error!(
        "❌ pom update failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn print_summary(report: &RunReport, dry_run: bool) {
    println!("📋 Run Summary ({}):", report.root.display());
    println!("  Files visited: {}", report.files_visited);
    println!("  Descriptors: {}", report.descriptors_found);
    if dry_run {
        println!("  Would update: {}", report.updated);
    } else {
        println!("  Updated: {}", report.updated);
    }
    println!("  Unchanged: {}", report.unchanged);
    println!("  Skipped entries: {}", report.skipped_entries);

    if report.has_failures() {
        println!("  ❌ Failed: {}", report.failed);
        for outcome in report.failures() {
            if let FileOutcome::Failed { error, .. } = outcome {
                println!("    {}", error.user_friendly_message());
            }
        }
    } else {
        println!("✅ All descriptors processed");
    }
}
