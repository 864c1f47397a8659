//! The five verbs every device menu supports, generic over the record type.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tikly_core::{Client, CoreError, Resource};

use crate::cli::{GlobalOpts, ResourceArgs, ResourceCommand};
use crate::error::CliError;
use crate::output;

use super::util;

/// Handle `tikly <command> <verb>` for resource type `R`.
///
/// `command` is the subcommand name, used in not-found hints.
pub async fn handle<R>(
    args: ResourceArgs,
    client: &Client,
    global: &GlobalOpts,
    command: &str,
) -> Result<(), CliError>
where
    R: Resource + Serialize + DeserializeOwned,
{
    let color = output::should_color(&global.color);

    match args.command {
        ResourceCommand::List => {
            let records: Vec<R> = client.list().await?;
            let out = output::render_list(&global.output, &records)?;
            output::print_output(&out, global.quiet);
        }

        ResourceCommand::Get { key } => {
            let record: R = client
                .find(&key)
                .await
                .map_err(|e| with_list_hint(e, command))?;
            let out = output::render_single(&global.output, &record, color)?;
            output::print_output(&out, global.quiet);
        }

        ResourceCommand::Add { from } => {
            let record: R = util::read_record(from.as_deref())?;
            let stored = client.add(&record).await?;
            let out = output::render_single(&global.output, &stored, color)?;
            output::print_output(&out, global.quiet);
        }

        ResourceCommand::Update { from } => {
            let record: R = util::read_record(from.as_deref())?;
            let stored = client
                .update(&record)
                .await
                .map_err(|e| with_list_hint(e, command))?;
            let out = output::render_single(&global.output, &stored, color)?;
            output::print_output(&out, global.quiet);
        }

        ResourceCommand::Delete { key } => {
            let prompt = format!("Delete {} '{key}'?", R::KIND);
            if !util::confirm(&prompt, &format!("{command} delete"), global.yes)? {
                return Ok(());
            }
            client.delete::<R>(&key).await?;
            if !global.quiet {
                eprintln!("Deleted {} {key}", R::KIND);
            }
        }
    }

    client.gateway().close().await;
    Ok(())
}

/// Point not-found errors at the matching `list` subcommand.
fn with_list_hint(err: CoreError, command: &str) -> CliError {
    match err {
        CoreError::NotFound { kind, key } => CliError::NotFound {
            resource_type: kind.into(),
            identifier: key,
            list_command: format!("{command} list"),
        },
        other => other.into(),
    }
}
