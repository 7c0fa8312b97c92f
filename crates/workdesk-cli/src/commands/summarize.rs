//! Summarization command: start a job and watch it to completion.

use clap::Args;

use workdesk_core::error::AppError;
use workdesk_core::types::{FolderId, ProjectId};
use workdesk_session::{SessionEvent, SummarizeOutcome, WorkspaceSession};

use crate::output;

/// Arguments for the summarize command
#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Project ID
    pub project_id: ProjectId,
    /// Scope to a folder instead of the whole project
    #[arg(short = 'd', long)]
    pub folder: Option<FolderId>,
}

enum Step {
    Interrupted,
    Progress(String),
    Finished(SummarizeOutcome),
    Closed,
    Other,
}

/// Execute the summarize command
pub async fn execute(args: &SummarizeArgs, env: &str) -> Result<(), AppError> {
    let mut session = super::open_project_session(env, args.project_id).await?;
    if let Some(folder) = args.folder {
        session.enter_folder(folder)?;
    }

    let task_id = session.summarize().await?;
    println!("Summarization task {task_id} started, waiting...");

    // Ctrl+C cancels the watch (and the remote job, best-effort) instead of
    // leaving the tracker stuck in polling; the cancellation event then
    // arrives like any other and ends the loop.
    loop {
        let step = tokio::select! {
            _ = tokio::signal::ctrl_c() => Step::Interrupted,
            event = session.next_event() => match event {
                Some(SessionEvent::SummarizeProgress { message, .. }) => Step::Progress(message),
                Some(SessionEvent::SummarizeFinished { outcome, .. }) => Step::Finished(outcome),
                Some(_) => Step::Other,
                None => Step::Closed,
            },
        };
        match step {
            Step::Interrupted => session.cancel_summarize(),
            Step::Progress(message) => println!("  {message}"),
            Step::Finished(outcome) => {
                report_outcome(&session, outcome);
                break;
            }
            Step::Closed => break,
            Step::Other => {}
        }
    }

    session.dispose();
    Ok(())
}

fn report_outcome(session: &WorkspaceSession, outcome: SummarizeOutcome) {
    match outcome {
        SummarizeOutcome::Completed { result_url } => {
            output::print_success("Summarization completed");
            if let Some(url) = result_url {
                output::print_kv("result", &url);
            }
            output::print_kv("documents", &session.documents().len().to_string());
        }
        SummarizeOutcome::Errored { message } => {
            output::print_warning(&format!("Summarization failed: {message}"));
        }
        SummarizeOutcome::Cancelled => {
            output::print_warning("Summarization cancelled");
        }
    }
}
