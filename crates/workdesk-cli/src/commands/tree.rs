//! Content tree display command.

use clap::Args;

use workdesk_core::error::AppError;
use workdesk_core::types::ProjectId;
use workdesk_entity::ContentNode;

/// Arguments for the tree command
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Project ID
    pub project_id: ProjectId,
}

/// Execute the tree command
pub async fn execute(args: &TreeArgs, env: &str) -> Result<(), AppError> {
    let session = super::open_project_session(env, args.project_id).await?;

    let project = session.project().expect("project just opened");
    println!("{} ({})", project.name, project.id);

    for item in session.all_items() {
        println!("├── {} [{}]", item.name(), item.kind().as_str());
    }
    for node in session.tree() {
        print_node(node, 0);
    }
    Ok(())
}

fn print_node(node: &ContentNode, depth: usize) {
    let indent = "    ".repeat(depth);
    println!("{indent}├── {}/", node.folder.name);
    let inner = "    ".repeat(depth + 1);
    for doc in &node.documents {
        println!("{inner}├── {} [document]", doc.name);
    }
    for text in &node.texts {
        println!("{inner}├── {} [text]", text.title);
    }
    for child in &node.folders {
        print_node(child, depth + 1);
    }
}
