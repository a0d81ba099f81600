//! Application event handling.
//!
//! Processes reports from background tasks. Today those are the simulated
//! players: progress updates, end of stream and failures.

use crate::app::{App, AppEvent};
use crate::playback::{PlayerReport, PlayerReportKind};
use crate::util::strip_control_chars;

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Playback(report) => handle_playback_report(app, report),
    }
}

fn handle_playback_report(app: &mut App, report: PlayerReport) {
    let PlayerReport {
        session: slot,
        post_id,
        generation,
        kind,
    } = report;

    let Some(session) = app.session_at_mut(slot) else {
        tracing::debug!(slot, post_id = %post_id, "Report for a feed screen that is not open");
        return;
    };

    // Queued reports from before the latest play no longer describe the player.
    if session
        .handle_play_generation(&post_id)
        .is_some_and(|current| current != generation)
    {
        tracing::debug!(slot, post_id = %post_id, generation, "Dropping report from an earlier play");
        return;
    }

    match kind {
        PlayerReportKind::Started => {
            tracing::debug!(slot, post_id = %post_id, "Playback started");
        }
        PlayerReportKind::Progress {
            position_secs,
            duration_secs,
        } => {
            // Late ticks from a player that was just paused still count.
            if session.post(&post_id).is_some() {
                app.positions
                    .insert((slot, post_id), (position_secs, duration_secs));
            }
        }
        PlayerReportKind::Ended => {
            session.report_playback_ended(&post_id);
            tracing::debug!(slot, post_id = %post_id, "Playback ended");
            app.positions.remove(&(slot, post_id));
        }
        PlayerReportKind::Failed(error) => {
            session.report_playback_error(&post_id);
            tracing::warn!(slot, post_id = %post_id, error = %error, "Playback failed");
            app.set_status(format!("Playback failed: {}", strip_control_chars(&error)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::PostSet;
    use crate::playback::PlayState;
    use tokio::sync::mpsc;

    /// App with the first visible video playing.
    fn playing_app() -> (App, String, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(64);
        let mut app = App::new(PostSet::sample().unwrap(), &Config::default(), tx);
        app.set_feed_viewport(30);
        app.report_viewport();

        let session = app.session_mut().unwrap();
        let video = session
            .current_ordered_posts()
            .iter()
            .take(3)
            .find(|p| p.is_video())
            .map(|p| p.id.clone())
            .unwrap();
        session.request_toggle(&video);
        assert!(session.is_playing(&video));
        (app, video, rx)
    }

    fn report(post_id: &str, kind: PlayerReportKind) -> AppEvent {
        AppEvent::Playback(PlayerReport {
            session: 0,
            post_id: post_id.to_string(),
            generation: 1,
            kind,
        })
    }

    #[tokio::test]
    async fn test_progress_recorded() {
        let (mut app, video, _rx) = playing_app();
        handle_app_event(
            &mut app,
            report(
                &video,
                PlayerReportKind::Progress {
                    position_secs: 12,
                    duration_secs: 596,
                },
            ),
        );
        assert_eq!(app.position(0, &video), Some((12, 596)));
    }

    #[tokio::test]
    async fn test_ended_resets_to_idle() {
        let (mut app, video, _rx) = playing_app();
        app.positions.insert((0, video.clone()), (595, 596));

        handle_app_event(&mut app, report(&video, PlayerReportKind::Ended));

        let session = app.session().unwrap();
        assert_eq!(session.play_state(&video), PlayState::VisibleIdle);
        assert_eq!(app.position(0, &video), None);
    }

    #[tokio::test]
    async fn test_failure_resets_and_reports_status() {
        let (mut app, video, _rx) = playing_app();

        handle_app_event(
            &mut app,
            report(&video, PlayerReportKind::Failed("codec\x1b[2J missing".into())),
        );

        assert!(!app.session().unwrap().is_playing(&video));
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.starts_with("Playback failed"));
        assert!(!msg.contains('\x1b'));
    }

    #[tokio::test]
    async fn test_report_for_unopened_screen_ignored() {
        let (mut app, video, _rx) = playing_app();
        let event = AppEvent::Playback(PlayerReport {
            session: 3,
            post_id: video.clone(),
            generation: 1,
            kind: PlayerReportKind::Ended,
        });
        handle_app_event(&mut app, event);
        assert!(app.session().unwrap().is_playing(&video));
    }

    #[tokio::test]
    async fn test_ended_from_earlier_play_ignored() {
        let (mut app, video, _rx) = playing_app();
        let session = app.session_mut().unwrap();
        session.request_toggle(&video);
        session.request_toggle(&video);
        assert_eq!(session.handle_play_generation(&video), Some(2));

        handle_app_event(&mut app, report(&video, PlayerReportKind::Ended));

        let session = app.session().unwrap();
        assert_eq!(session.play_state(&video), PlayState::VisiblePlaying);
    }
}
