use bike_booking::app::commands::{self, OutputFormat};
use bike_booking::app::shell;
use bike_booking::config::cli::Command;
use bike_booking::config::toml_config::LogFormat;
use bike_booking::core::Ledger;
use bike_booking::utils::logger;
use bike_booking::{BookingError, CliConfig, TomlConfig};
use clap::Parser;
use tokio::io::BufReader;

// 預約被拒絕時的 exit code，與錯誤嚴重度的 1..=3 區分
const EXIT_REJECTED: i32 = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入設定檔，未指定時使用內建目錄
    let config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::builtin(),
    };

    // 初始化日誌
    match config.log_format() {
        LogFormat::Json => logger::init_json_logger(if cli.verbose {
            "debug"
        } else {
            config.log_level()
        }),
        LogFormat::Compact => logger::init_cli_logger(cli.verbose, config.log_level()),
    }

    tracing::info!("🚀 Starting {}", config.service.name);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let engine = match config.build_engine() {
        Ok(engine) => engine,
        Err(e) => exit_with(e),
    };
    tracing::debug!("Ledger holds {} bookings", engine.ledger().len());

    match &cli.command {
        Command::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            let rejected = shell::run_shell(&engine, stdin, tokio::io::stdout(), cli.json)
                .await
                .unwrap_or_else(|e| exit_with(e));
            tracing::info!("👋 Shell closed ({} rejected reservations)", rejected);
        }
        command => {
            let format = if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            let output = commands::execute(&engine, command, format)
                .await
                .unwrap_or_else(|e| exit_with(e));
            print!("{}", output.body);
            if output.rejected {
                std::process::exit(EXIT_REJECTED);
            }
        }
    }

    Ok(())
}

fn exit_with(e: BookingError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}
