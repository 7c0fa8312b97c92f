//! Workspace session scenario tests.

mod helpers;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use helpers::MockWorkspaceApi;
use workdesk_core::error::ErrorKind;
use workdesk_entity::{ItemKind, WorkspaceItem};

#[tokio::test]
async fn open_project_builds_the_tree() {
    let api = Arc::new(MockWorkspaceApi::new());
    let project = helpers::project("thesis");
    let reports = helpers::folder(project.id, "reports", None);
    let drafts = helpers::folder(project.id, "drafts", Some(reports.id));
    api.seed_project(&project);
    api.seed_folder(&reports);
    api.seed_folder(&drafts);
    api.seed_document(&helpers::document(project.id, "intro.pdf", None));
    api.seed_document(&helpers::document(project.id, "q1.pdf", Some(reports.id)));
    api.seed_text(&helpers::text(project.id, "scratch", Some(drafts.id)));

    let session = helpers::session_with(Arc::clone(&api), &project).await;

    assert_eq!(session.tree().len(), 1);
    let root = &session.tree()[0];
    assert_eq!(root.folder.name, "reports");
    assert_eq!(root.documents.len(), 1);
    assert_eq!(root.folders[0].folder.name, "drafts");
    assert_eq!(root.folders[0].texts.len(), 1);

    // Root-level rendering comes from the flat lists.
    let items = session.all_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name(), "intro.pdf");
    assert_eq!(items[0].kind(), ItemKind::Document);
}

#[tokio::test]
async fn rejected_uploads_never_reach_the_api() {
    let api = Arc::new(MockWorkspaceApi::new());
    let project = helpers::project("p");
    api.seed_project(&project);

    let mut session = helpers::session_with(Arc::clone(&api), &project).await;

    let err = session
        .upload_document("report.exe", Bytes::from_static(b"MZ"))
        .await
        .expect_err("extension rejected");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(err.message.contains("file type"));

    let oversized = Bytes::from(vec![0u8; 60 * 1024 * 1024]);
    let err = session
        .upload_document("notes.pdf", oversized)
        .await
        .expect_err("size rejected");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(err.message.contains("too large"));

    assert_eq!(api.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn valid_upload_lands_in_the_current_folder() {
    let api = Arc::new(MockWorkspaceApi::new());
    let project = helpers::project("p");
    let reports = helpers::folder(project.id, "reports", None);
    api.seed_project(&project);
    api.seed_folder(&reports);

    let mut session = helpers::session_with(Arc::clone(&api), &project).await;
    session.enter_folder(reports.id).unwrap();

    let doc = session
        .upload_document("q2.pdf", Bytes::from_static(b"%PDF"))
        .await
        .expect("upload accepted");
    assert_eq!(doc.folder_id, Some(reports.id));

    // The new document is attached to its folder node immediately.
    let node = workdesk_session::tree::find_folder(session.tree(), reports.id).unwrap();
    assert_eq!(node.documents.len(), 1);
}

#[tokio::test]
async fn folder_navigation_follows_history_semantics() {
    let api = Arc::new(MockWorkspaceApi::new());
    let project = helpers::project("p");
    let a = helpers::folder(project.id, "a", None);
    let b = helpers::folder(project.id, "b", Some(a.id));
    api.seed_project(&project);
    api.seed_folder(&a);
    api.seed_folder(&b);

    let mut session = helpers::session_with(Arc::clone(&api), &project).await;

    session.enter_folder(a.id).unwrap();
    session.enter_folder(b.id).unwrap();
    session.go_back();
    assert_eq!(session.navigation().current().unwrap().id, a.id);
    session.go_back();
    assert!(session.navigation().current().is_none());
    session.go_forward();
    session.go_forward();
    assert_eq!(session.navigation().current().unwrap().id, b.id);

    let err = session
        .enter_folder(workdesk_core::types::FolderId::new())
        .expect_err("unknown folder");
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn ask_scopes_to_the_current_folder_and_clears_context() {
    let api = Arc::new(MockWorkspaceApi::new());
    let project = helpers::project("p");
    let reports = helpers::folder(project.id, "reports", None);
    let doc = helpers::document(project.id, "intro.pdf", None);
    let note = helpers::text(project.id, "scratch", None);
    api.seed_project(&project);
    api.seed_folder(&reports);
    api.seed_document(&doc);
    api.seed_text(&note);

    let mut session = helpers::session_with(Arc::clone(&api), &project).await;
    session.toggle_context(WorkspaceItem::Document(doc).item_ref());
    session.toggle_context(WorkspaceItem::Text(note).item_ref());

    let err = session.ask_question("   ").await.expect_err("empty question");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(api.ask_calls.lock().unwrap().is_empty());
    // A failed ask keeps the context for retry.
    assert_eq!(session.selection().context_items().len(), 2);

    let answer = session.ask_question("what is this about?").await.unwrap();
    assert_eq!(answer, "answer to: what is this about?");

    let calls = api.ask_calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("what is this about?".to_string(), 2)]);
    // Context clears once an answer arrives.
    assert!(session.selection().context_items().is_empty());
}

#[tokio::test]
async fn moving_a_folder_under_its_descendant_is_rejected() {
    let api = Arc::new(MockWorkspaceApi::new());
    let project = helpers::project("p");
    let a = helpers::folder(project.id, "a", None);
    let b = helpers::folder(project.id, "b", Some(a.id));
    api.seed_project(&project);
    api.seed_folder(&a);
    api.seed_folder(&b);

    let mut session = helpers::session_with(Arc::clone(&api), &project).await;

    let err = session
        .move_folder(a.id, Some(b.id))
        .await
        .expect_err("cycle rejected");
    assert_eq!(err.kind, ErrorKind::Validation);
    let err = session
        .move_folder(a.id, Some(a.id))
        .await
        .expect_err("self-parent rejected");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(api.update_folder_calls.load(Ordering::SeqCst), 0);

    // Moving b to root is legal.
    session.move_folder(b.id, None).await.expect("legal move");
    assert_eq!(session.tree().len(), 2);
}

#[tokio::test]
async fn deleting_an_already_deleted_project_is_tolerated() {
    let api = Arc::new(MockWorkspaceApi::new());
    let project = helpers::project("p");
    api.seed_project(&project);

    let mut session = helpers::session_with(Arc::clone(&api), &project).await;

    // Simulate another client deleting it first.
    api.projects.lock().unwrap().clear();
    session
        .delete_project(project.id)
        .await
        .expect("not-found delete treated as done");
    assert!(session.project().is_none());
}

#[tokio::test]
async fn deleting_the_open_item_closes_the_viewer() {
    let api = Arc::new(MockWorkspaceApi::new());
    let project = helpers::project("p");
    let note = helpers::text(project.id, "scratch", None);
    api.seed_project(&project);
    api.seed_text(&note);

    let mut session = helpers::session_with(Arc::clone(&api), &project).await;
    session.toggle_item(WorkspaceItem::Text(note.clone()));
    assert!(session.selection().selected_text().is_some());

    session.delete_text(note.id).await.unwrap();
    assert!(session.selection().selected_text().is_none());
    assert!(session.texts().is_empty());
}

#[tokio::test]
async fn refresh_prunes_navigation_into_vanished_folders() {
    let api = Arc::new(MockWorkspaceApi::new());
    let project = helpers::project("p");
    let a = helpers::folder(project.id, "a", None);
    api.seed_project(&project);
    api.seed_folder(&a);

    let mut session = helpers::session_with(Arc::clone(&api), &project).await;
    session.enter_folder(a.id).unwrap();

    // The folder disappears server-side before the next refresh.
    api.folders.lock().unwrap().clear();
    session.refresh().await.unwrap();

    assert!(session.navigation().current().is_none());
    assert!(session.tree().is_empty());
}

#[tokio::test(start_paused = true)]
async fn transcription_merges_at_the_cursor_and_schedules_a_save() {
    let api = Arc::new(MockWorkspaceApi::new());
    let project = helpers::project("p");
    let mut note = helpers::text(project.id, "minutes", None);
    note.content = "before  after".to_string();
    api.seed_project(&project);
    api.seed_text(&note);

    let mut session = helpers::session_with(Arc::clone(&api), &project).await;
    session.toggle_item(WorkspaceItem::Text(note.clone()));

    let transcript = session
        .transcribe_audio(Bytes::from_static(b"opus"), "clip.webm", 7)
        .await
        .unwrap();
    assert_eq!(transcript, "[transcript]");
    assert_eq!(
        session.selection().selected_text().unwrap().content,
        "before [transcript] after"
    );

    tokio::time::sleep(Duration::from_millis(1100)).await;
    let calls = api.update_text_calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1.content, "before [transcript] after");
}

#[tokio::test]
async fn creating_entities_requires_an_open_project() {
    let api = Arc::new(MockWorkspaceApi::new());
    let config = workdesk_core::config::AppConfig::default();
    let mut session = workdesk_session::WorkspaceSession::new(api, &config);

    let err = session.create_folder("orphan").await.expect_err("no project");
    assert_eq!(err.kind, ErrorKind::Validation);
    let err = session.summarize().await.expect_err("no project");
    assert_eq!(err.kind, ErrorKind::Validation);
}
