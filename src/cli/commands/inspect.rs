//! Inspect command - show what a flat file contains

use crate::cli::args::{InspectArgs, OutputFormat};
use crate::config::Config;
use crate::db::{FileReport, FlatFile};
use crate::error::FlatDbResult;
use crate::ui::{self, UiContext};

/// Execute the inspect command
pub fn execute(args: InspectArgs, config: &Config) -> FlatDbResult<()> {
    let store = config.store_config()?;
    let file = FlatFile::new(args.file, "", store.network_tag().clone());
    let report = file.inspect()?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => print_plain(&report),
        OutputFormat::Table => print_table(&report),
    }

    Ok(())
}

fn print_table(report: &FileReport) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, &format!("Inspect {}", report.path.display()));

    ui::key_value(&ctx, "Size", &format!("{} bytes", report.file_size));
    ui::key_value_status(
        &ctx,
        "Checksum",
        if report.checksum_ok { "match" } else { "mismatch" },
        report.checksum_ok,
    );
    ui::key_value(&ctx, "Stored", &report.stored_checksum);
    ui::key_value(&ctx, "Computed", &report.computed_checksum);

    if let Some(err) = &report.header_error {
        ui::step_warn_hint(&ctx, "Header not decodable", err);
        return;
    }

    if let Some(tag) = &report.type_tag {
        ui::key_value(&ctx, "Type tag", tag);
    }
    if let Some(tag) = &report.network_tag {
        let network = report
            .network
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        ui::key_value(&ctx, "Network tag", &format!("{} ({})", tag, network));
    }
    if let Some(size) = report.payload_size {
        ui::key_value(&ctx, "Payload", &format!("{} bytes", size));
    }
}

fn print_plain(report: &FileReport) {
    println!("size={}", report.file_size);
    println!("checksum_ok={}", report.checksum_ok);
    if let Some(tag) = &report.type_tag {
        println!("type_tag={}", tag);
    }
    if let Some(tag) = &report.network_tag {
        println!("network_tag={}", tag);
    }
    if let Some(size) = report.payload_size {
        println!("payload_size={}", size);
    }
}
