use anyhow::Context;
use clap::Parser;
use fredbet::config::{Command, ImageCommand, UserCommand};
use fredbet::core::user_import_export::{
    ExportResponse, ImportMessage, UploadedFile, EXPORT_FILE_NAME,
};
use fredbet::utils::{logger, validation::Validate};
use fredbet::{
    build_strategy, CliConfig, FredbetError, ImageLocationStrategy,
    JsonFileUserImportExportService, UserImportExportController,
};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.app_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Images(command) => {
            let strategy = build_strategy(&config.storage).await?;
            run_image_command(strategy.as_ref(), command).await
        }
        Command::Users(command) => {
            let service = JsonFileUserImportExportService::new(config.users.store_path());
            run_user_command(UserImportExportController::new(service), command).await
        }
    };

    if let Err(e) = result {
        tracing::error!("❌ {:#}", e);
        if let Some(fredbet_error) = e.downcast_ref::<FredbetError>() {
            eprintln!("❌ {}", fredbet_error.user_friendly_message());
        } else {
            eprintln!("❌ {:#}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run_image_command(
    strategy: &dyn ImageLocationStrategy,
    command: ImageCommand,
) -> anyhow::Result<()> {
    match command {
        ImageCommand::Save {
            group,
            key,
            image,
            thumbnail,
        } => {
            let image_bytes = tokio::fs::read(&image)
                .await
                .with_context(|| format!("reading {}", image.display()))?;
            let thumbnail_bytes = tokio::fs::read(&thumbnail)
                .await
                .with_context(|| format!("reading {}", thumbnail.display()))?;
            strategy
                .save_image(&key, &group, &image_bytes, &thumbnail_bytes)
                .await?;
            println!("✅ Saved image {} in group {}", key, group);
        }
        ImageCommand::Get { group, key, output } => {
            let image = strategy.get_image_by_key(&key, &group).await?;
            write_output(&output, image.bytes()).await?;
        }
        ImageCommand::Thumbnail { group, key, output } => {
            let thumbnail = strategy.get_thumbnail_by_key(&key, &group).await?;
            write_output(&output, thumbnail.bytes()).await?;
        }
        ImageCommand::List => {
            let images = strategy.find_all_images().await?;
            for image in &images {
                println!("{}\t{} bytes", image.key(), image.bytes().len());
            }
            println!("📁 {} images", images.len());
        }
        ImageCommand::Delete { group, key } => {
            strategy.delete_image(&key, &group).await?;
            println!("🗑️  Deleted image {} in group {}", key, group);
        }
    }
    Ok(())
}

/// The user store is synchronous file I/O, so the controller runs on the
/// blocking pool.
async fn run_user_command(
    controller: UserImportExportController<JsonFileUserImportExportService>,
    command: UserCommand,
) -> anyhow::Result<()> {
    match command {
        UserCommand::Export { output } => {
            let response = tokio::task::spawn_blocking(move || controller.export_users()).await??;
            match response {
                ExportResponse::Download(download) => {
                    let output = output.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
                    write_output(&output, &download.body).await?;
                    println!("📁 Users exported to: {}", output.display());
                }
                ExportResponse::NotFound => {
                    anyhow::bail!("no users to export");
                }
            }
        }
        UserCommand::Import { file, content_type } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let upload = UploadedFile {
                content_type: Some(content_type),
                bytes,
            };
            let message =
                tokio::task::spawn_blocking(move || controller.upload_json_file(Some(upload)))
                    .await?;
            match message {
                ImportMessage::Saved(count) => println!("✅ Imported {} users", count),
                message => anyhow::bail!("{} {:?}", message.code(), message),
            }
        }
    }
    Ok(())
}

async fn write_output(output: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    tokio::fs::write(output, bytes)
        .await
        .with_context(|| format!("writing {}", output.display()))?;
    println!("📁 Written {} bytes to: {}", bytes.len(), output.display());
    Ok(())
}
