//! Verify command - dry-run read of a flat file

use crate::cli::args::{OutputFormat, VerifyArgs};
use crate::config::Config;
use crate::db::{FlatFile, RawPayload, ReadStatus, Verdict};
use crate::error::{FlatDbError, FlatDbResult};
use crate::ui::{self, UiContext};
use serde::Serialize;

#[derive(Serialize)]
struct VerifyJson<'a> {
    path: String,
    type_tag: &'a str,
    network_tag: String,
    status: ReadStatus,
    verdict: Verdict,
    payload_size: usize,
}

/// Execute the verify command
pub fn execute(args: VerifyArgs, config: &Config) -> FlatDbResult<()> {
    let store = config.store_config()?;
    let file = FlatFile::new(&args.file, &args.type_tag, store.network_tag().clone());

    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let mut payload = RawPayload::new(filename);
    let status = file.read(&mut payload, true);
    let verdict = status.verdict();

    match args.format {
        OutputFormat::Json => {
            let json = VerifyJson {
                path: args.file.display().to_string(),
                type_tag: &args.type_tag,
                network_tag: store.network_tag().to_string(),
                status,
                verdict,
                payload_size: payload.bytes().len(),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Plain => println!("{}", verdict),
        OutputFormat::Table => {
            let ctx = UiContext::detect();
            ui::intro(&ctx, &format!("Verify {}", args.file.display()));
            ui::key_value(&ctx, "Type tag", &args.type_tag);
            ui::key_value(&ctx, "Network tag", &store.network_tag().to_string());
            if status.is_ok() {
                ui::step_ok_detail(
                    &ctx,
                    "File verified",
                    &format!("{} payload bytes", payload.bytes().len()),
                );
            } else if verdict.should_abort() {
                ui::step_error_detail(&ctx, "Unrecoverable", &status.to_string());
            } else {
                ui::step_warn_hint(&ctx, &status.to_string(), "file would be recreated on save");
            }
        }
    }

    if status.is_ok() {
        Ok(())
    } else {
        Err(FlatDbError::VerifyFailed {
            path: args.file,
            status,
        })
    }
}
