mod common;

use common::{harness, harness_with_artifact};
use strum::IntoEnumIterator;
use studymate_application::NavigationOutcome;
use studymate_core::navigation::Screen;
use studymate_core::notification::Severity;

#[tokio::test]
async fn test_history_invariants_hold_for_every_sequence() {
    let h = harness();

    // Walk every screen twice, interleaving back steps.
    let screens: Vec<Screen> = Screen::iter().chain(Screen::iter()).collect();
    for (i, screen) in screens.into_iter().enumerate() {
        h.app.go_to(screen).await;
        if i % 3 == 0 {
            h.app.go_back().await;
        }

        let snapshot = h.app.snapshot().await;
        let history = snapshot.navigation.history();
        assert!(!history.is_empty());
        assert_eq!(snapshot.navigation.current(), *history.last().unwrap());
        assert_eq!(history[0], Screen::Entry);
    }
}

#[tokio::test]
async fn test_go_back_at_floor_is_noop() {
    let h = harness();
    let before = h.app.snapshot().await;

    assert!(!h.app.go_back().await);

    assert_eq!(h.app.snapshot().await, before);
}

#[tokio::test]
async fn test_qa_before_upload_raises_one_warning() {
    let h = harness();
    h.app.go_to(Screen::Dashboard).await;
    let shown_before = h.app.notifications_shown().await;

    let outcome = h.app.go_to(Screen::Qa).await;

    assert_eq!(outcome, NavigationOutcome::Rejected);
    assert_eq!(h.app.current_screen().await, Screen::Dashboard);
    assert_eq!(h.app.notifications_shown().await, shown_before + 1);
    let notification = h.app.snapshot().await.notification.unwrap();
    assert_eq!(notification.severity, Severity::Warning);
    assert!(notification.message.contains("upload a document first"));
}

#[tokio::test]
async fn test_every_guarded_screen_is_rejected_without_artifact() {
    let h = harness();
    for screen in Screen::iter().filter(|s| s.requires_artifact()) {
        assert_eq!(h.app.go_to(screen).await, NavigationOutcome::Rejected);
    }
    assert_eq!(h.app.current_screen().await, Screen::Entry);
}

#[tokio::test]
async fn test_upload_opens_study_plan_and_unlocks_guarded_screens() {
    let h = harness_with_artifact().await;
    assert_eq!(h.app.current_screen().await, Screen::StudyPlan);

    assert_eq!(h.app.go_to(Screen::Quiz).await, NavigationOutcome::Moved);
    assert_eq!(h.app.go_to(Screen::Quiz).await, NavigationOutcome::Unchanged);
    assert_eq!(
        h.app.snapshot().await.navigation.history(),
        &[Screen::Entry, Screen::StudyPlan, Screen::Quiz]
    );
}

#[tokio::test]
async fn test_navigation_closes_drawer() {
    let h = harness();
    assert!(h.app.toggle_drawer().await);

    h.app.go_to(Screen::History).await;

    assert!(!h.app.snapshot().await.navigation.drawer_open);
}

#[tokio::test]
async fn test_start_new_session_clears_study_and_opens_upload() {
    let h = harness_with_artifact().await;
    h.app.set_quiz_answer(1, 0, "divide").await;

    h.app.start_new_session().await;

    let snapshot = h.app.snapshot().await;
    assert!(!snapshot.has_artifact());
    assert!(snapshot.quiz_submission.is_empty());
    assert!(snapshot.quiz_result.is_none());
    assert_eq!(snapshot.navigation.current(), Screen::Upload);
    assert_eq!(h.app.go_to(Screen::StudyPlan).await, NavigationOutcome::Rejected);
}
